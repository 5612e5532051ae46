// src/api/posts.rs
use crate::api::params::{ApplicationFilter, PostListParams};
use crate::core::{ApiResult, NetClient, RequestOptions};
use crate::types::{
    Application, ApplicationDraft, NewPost, Paginated, Post, PostPatch, ResourceAck,
};

pub struct PostApi<'a> {
    client: &'a NetClient,
}

impl<'a> PostApi<'a> {
    pub(crate) fn new(client: &'a NetClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &PostListParams) -> ApiResult<Paginated<Post>> {
        self.client.list("/v1/posts", params).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Post> {
        self.client
            .request(&format!("/v1/posts/{}", id), RequestOptions::get())
            .await
    }

    pub async fn create(&self, post: &NewPost) -> ApiResult<Post> {
        let options = RequestOptions::post().json(post)?;
        self.client.request("/v1/posts/create", options).await
    }

    pub async fn update(&self, id: &str, patch: &PostPatch) -> ApiResult<Post> {
        let options = RequestOptions::patch().json(patch)?;
        self.client
            .request(&format!("/v1/posts/{}", id), options)
            .await
    }

    pub async fn close(&self, id: &str) -> ApiResult<ResourceAck> {
        self.client
            .request(&format!("/v1/posts/{}/close", id), RequestOptions::post())
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<ResourceAck> {
        self.client
            .request(&format!("/v1/posts/{}", id), RequestOptions::delete())
            .await
    }

    /// An empty draft is sent as `{}`.
    pub async fn apply(&self, post_id: &str, draft: &ApplicationDraft) -> ApiResult<Application> {
        let options = RequestOptions::post().json(draft)?;
        self.client
            .request(&format!("/v1/posts/{}/applications", post_id), options)
            .await
    }

    pub async fn applications(
        &self,
        post_id: &str,
        filter: &ApplicationFilter,
    ) -> ApiResult<Paginated<Application>> {
        self.client
            .list(&format!("/v1/posts/{}/applications", post_id), filter)
            .await
    }

    /// `None` when the current user has not applied.
    pub async fn my_application(&self, post_id: &str) -> ApiResult<Option<Application>> {
        self.client
            .request(
                &format!("/v1/posts/{}/applications/me", post_id),
                RequestOptions::get(),
            )
            .await
    }
}
