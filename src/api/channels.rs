// src/api/channels.rs
//! Direct-message channels opened by accepted applications

use crate::api::params::{ChannelListParams, PageParams};
use crate::core::{ApiResult, NetClient, RequestOptions};
use crate::types::requests::MessageBody;
use crate::types::{Channel, MarkedAllRead, MarkedRead, MarkedUnread, Message, Paginated};

pub struct ChannelApi<'a> {
    client: &'a NetClient,
}

impl<'a> ChannelApi<'a> {
    pub(crate) fn new(client: &'a NetClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ChannelListParams) -> ApiResult<Paginated<Channel>> {
        self.client.list("/v1/channels", params).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Channel> {
        self.client
            .request(&format!("/v1/channels/{}", id), RequestOptions::get())
            .await
    }

    /// Newest first.
    pub async fn messages(
        &self,
        channel_id: &str,
        params: &PageParams,
    ) -> ApiResult<Paginated<Message>> {
        self.client
            .list(&format!("/v1/channels/{}/messages", channel_id), params)
            .await
    }

    pub async fn message(&self, channel_id: &str, message_id: &str) -> ApiResult<Message> {
        self.client
            .request(
                &format!("/v1/channels/{}/messages/{}", channel_id, message_id),
                RequestOptions::get(),
            )
            .await
    }

    pub async fn send_message(&self, channel_id: &str, content_md: &str) -> ApiResult<Message> {
        let options = RequestOptions::post().json(&MessageBody { content_md })?;
        self.client
            .request(&format!("/v1/channels/{}/messages", channel_id), options)
            .await
    }

    pub async fn mark_read(&self, channel_id: &str, message_id: &str) -> ApiResult<MarkedRead> {
        self.client
            .request(
                &format!("/v1/channels/{}/messages/{}/read", channel_id, message_id),
                RequestOptions::post(),
            )
            .await
    }

    pub async fn mark_unread(&self, channel_id: &str, message_id: &str) -> ApiResult<MarkedUnread> {
        self.client
            .request(
                &format!("/v1/channels/{}/messages/{}/read", channel_id, message_id),
                RequestOptions::delete(),
            )
            .await
    }

    pub async fn mark_all_read(&self, channel_id: &str) -> ApiResult<MarkedAllRead> {
        self.client
            .request(
                &format!("/v1/channels/{}/read-all", channel_id),
                RequestOptions::post(),
            )
            .await
    }
}
