// src/api/applications.rs
use crate::core::{ApiResult, NetClient, RequestOptions};
use crate::types::requests::{BatchRequest, RejectionBody};
use crate::types::{
    Application, ApplicationAccepted, BatchAction, BatchActionResponse, MessageResponse,
};

pub struct ApplicationApi<'a> {
    client: &'a NetClient,
}

impl<'a> ApplicationApi<'a> {
    pub(crate) fn new(client: &'a NetClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> ApiResult<Application> {
        self.client
            .request(&format!("/v1/applications/{}", id), RequestOptions::get())
            .await
    }

    /// Accepting opens a channel between poster and applicant.
    pub async fn accept(&self, id: &str) -> ApiResult<ApplicationAccepted> {
        self.client
            .request(
                &format!("/v1/applications/{}/accept", id),
                RequestOptions::post(),
            )
            .await
    }

    pub async fn reject(&self, id: &str, reason: Option<&str>) -> ApiResult<MessageResponse> {
        let options = RequestOptions::post().json(&RejectionBody { reason })?;
        self.client
            .request(&format!("/v1/applications/{}/reject", id), options)
            .await
    }

    pub async fn withdraw(&self, id: &str) -> ApiResult<MessageResponse> {
        self.client
            .request(
                &format!("/v1/applications/{}/withdraw", id),
                RequestOptions::post(),
            )
            .await
    }

    pub async fn batch(
        &self,
        action: BatchAction,
        application_ids: &[String],
        reason: Option<&str>,
    ) -> ApiResult<BatchActionResponse> {
        let options = RequestOptions::post().json(&BatchRequest {
            action,
            application_ids,
            reason,
        })?;
        self.client.request("/v1/applications/batch", options).await
    }
}
