// src/api/users.rs
use crate::api::params::{ApplicationFilter, PageParams};
use crate::core::{ApiResult, NetClient, RequestOptions};
use crate::types::requests::ProfileUpdate;
use crate::types::{
    Application, JoinRequest, OrgInvite, Organization, Paginated, Post, ProfilePatch, User,
    UserSummary,
};

pub struct UserApi<'a> {
    client: &'a NetClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a NetClient) -> Self {
        Self { client }
    }

    pub async fn get_me(&self) -> ApiResult<User> {
        self.client.request("/v1/users/me", RequestOptions::get()).await
    }

    pub async fn update_me(&self, profile: &ProfilePatch) -> ApiResult<User> {
        let options = RequestOptions::patch().json(&ProfileUpdate { profile })?;
        self.client.request("/v1/users/me", options).await
    }

    pub async fn get_user(&self, id: &str) -> ApiResult<User> {
        self.client
            .request(&format!("/v1/users/{}", id), RequestOptions::get())
            .await
    }

    pub async fn my_orgs(&self, params: &PageParams) -> ApiResult<Paginated<Organization>> {
        self.client.list("/v1/users/me/orgs", params).await
    }

    pub async fn my_posts(&self, params: &PageParams) -> ApiResult<Paginated<Post>> {
        self.client.list("/v1/users/me/posts", params).await
    }

    pub async fn my_invites(&self, params: &PageParams) -> ApiResult<Paginated<OrgInvite>> {
        self.client.list("/v1/users/me/invites", params).await
    }

    pub async fn my_join_requests(&self, params: &PageParams) -> ApiResult<Paginated<JoinRequest>> {
        self.client.list("/v1/users/me/join-requests", params).await
    }

    pub async fn my_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> ApiResult<Paginated<Application>> {
        self.client.list("/v1/users/me/applications", filter).await
    }

    pub async fn summary(&self) -> ApiResult<UserSummary> {
        self.client
            .request("/v1/users/me/summary", RequestOptions::get())
            .await
    }
}
