// src/api/orgs.rs
//! Organizations with their members, invites, join requests and posts

use crate::api::params::{OrgListParams, PageParams};
use crate::core::{ApiResult, NetClient, RequestOptions};
use crate::types::requests::{ApprovalBody, InviteRequest, JoinRequestBody, RoleChange};
use crate::types::{
    InviteAccepted, InviteRole, JoinRequest, JoinRequestApproved, MessageResponse,
    NewOrganization, OrgInvite, OrgMember, OrgRole, Organization, OrganizationPatch, Paginated,
    Post, ResourceAck,
};

pub struct OrgApi<'a> {
    client: &'a NetClient,
}

impl<'a> OrgApi<'a> {
    pub(crate) fn new(client: &'a NetClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &OrgListParams) -> ApiResult<Paginated<Organization>> {
        self.client.list("/v1/orgs", params).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Organization> {
        self.client
            .request(&format!("/v1/orgs/{}", id), RequestOptions::get())
            .await
    }

    pub async fn create(&self, org: &NewOrganization) -> ApiResult<Organization> {
        let options = RequestOptions::post().json(org)?;
        self.client.request("/v1/orgs/create", options).await
    }

    pub async fn update(&self, id: &str, patch: &OrganizationPatch) -> ApiResult<Organization> {
        let options = RequestOptions::patch().json(patch)?;
        self.client
            .request(&format!("/v1/orgs/{}", id), options)
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<ResourceAck> {
        self.client
            .request(&format!("/v1/orgs/{}", id), RequestOptions::delete())
            .await
    }

    pub async fn leave(&self, id: &str) -> ApiResult<MessageResponse> {
        self.client
            .request(&format!("/v1/orgs/{}/leave", id), RequestOptions::post())
            .await
    }

    // Members

    pub async fn members(&self, id: &str, params: &PageParams) -> ApiResult<Paginated<OrgMember>> {
        self.client
            .list(&format!("/v1/orgs/{}/members", id), params)
            .await
    }

    pub async fn update_member_role(
        &self,
        org_id: &str,
        user_id: &str,
        role: OrgRole,
    ) -> ApiResult<OrgMember> {
        let options = RequestOptions::patch().json(&RoleChange { role })?;
        self.client
            .request(&format!("/v1/orgs/{}/members/{}", org_id, user_id), options)
            .await
    }

    pub async fn remove_member(&self, org_id: &str, user_id: &str) -> ApiResult<MessageResponse> {
        self.client
            .request(
                &format!("/v1/orgs/{}/members/{}", org_id, user_id),
                RequestOptions::delete(),
            )
            .await
    }

    // Invites

    pub async fn invites(&self, id: &str, params: &PageParams) -> ApiResult<Paginated<OrgInvite>> {
        self.client
            .list(&format!("/v1/orgs/{}/invites", id), params)
            .await
    }

    pub async fn send_invite(
        &self,
        org_id: &str,
        email: &str,
        role: InviteRole,
    ) -> ApiResult<OrgInvite> {
        let options = RequestOptions::post().json(&InviteRequest { email, role })?;
        self.client
            .request(&format!("/v1/orgs/{}/sendinvite", org_id), options)
            .await
    }

    pub async fn cancel_invite(&self, org_id: &str, invite_id: &str) -> ApiResult<MessageResponse> {
        self.client
            .request(
                &format!("/v1/orgs/{}/invites/{}", org_id, invite_id),
                RequestOptions::delete(),
            )
            .await
    }

    pub async fn accept_invite(&self, invite_id: &str) -> ApiResult<InviteAccepted> {
        self.client
            .request(
                &format!("/v1/org/invites/{}/accept", invite_id),
                RequestOptions::post(),
            )
            .await
    }

    pub async fn decline_invite(&self, invite_id: &str) -> ApiResult<MessageResponse> {
        self.client
            .request(
                &format!("/v1/org/invites/{}/decline", invite_id),
                RequestOptions::post(),
            )
            .await
    }

    // Join requests

    pub async fn join_requests(
        &self,
        id: &str,
        params: &PageParams,
    ) -> ApiResult<Paginated<JoinRequest>> {
        self.client
            .list(&format!("/v1/orgs/{}/join-requests", id), params)
            .await
    }

    pub async fn send_join_request(
        &self,
        org_id: &str,
        message: Option<&str>,
    ) -> ApiResult<JoinRequest> {
        let options = RequestOptions::post().json(&JoinRequestBody { message })?;
        self.client
            .request(&format!("/v1/orgs/{}/sendjoinrequest", org_id), options)
            .await
    }

    pub async fn approve_join_request(
        &self,
        request_id: &str,
        role: Option<InviteRole>,
    ) -> ApiResult<JoinRequestApproved> {
        let options = RequestOptions::post().json(&ApprovalBody { role })?;
        self.client
            .request(
                &format!("/v1/org/join-requests/{}/approve", request_id),
                options,
            )
            .await
    }

    pub async fn reject_join_request(&self, request_id: &str) -> ApiResult<MessageResponse> {
        self.client
            .request(
                &format!("/v1/org/join-requests/{}/reject", request_id),
                RequestOptions::post(),
            )
            .await
    }

    pub async fn cancel_join_request(&self, request_id: &str) -> ApiResult<MessageResponse> {
        self.client
            .request(
                &format!("/v1/org/join-requests/{}", request_id),
                RequestOptions::delete(),
            )
            .await
    }

    // Posts

    pub async fn posts(&self, id: &str, params: &PageParams) -> ApiResult<Paginated<Post>> {
        self.client
            .list(&format!("/v1/orgs/{}/posts", id), params)
            .await
    }
}
