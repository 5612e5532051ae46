// src/api/mod.rs
//! Endpoint wrappers: one thin function per remote resource or action

pub mod applications;
pub mod channels;
pub mod orgs;
pub mod params;
pub mod posts;
pub mod users;

pub use applications::ApplicationApi;
pub use channels::ChannelApi;
pub use orgs::OrgApi;
pub use params::{ApplicationFilter, ChannelListParams, OrgListParams, PageParams, PostListParams};
pub use posts::PostApi;
pub use users::UserApi;

use serde::de::DeserializeOwned;

use crate::core::{ApiResult, NetClient, RequestOptions, ToQuery};
use crate::types::Paginated;

impl NetClient {
    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn orgs(&self) -> OrgApi<'_> {
        OrgApi::new(self)
    }

    pub fn posts(&self) -> PostApi<'_> {
        PostApi::new(self)
    }

    pub fn applications(&self) -> ApplicationApi<'_> {
        ApplicationApi::new(self)
    }

    pub fn channels(&self) -> ChannelApi<'_> {
        ChannelApi::new(self)
    }

    /// GET a list endpoint with its allow-listed query.
    pub(crate) async fn list<T, Q>(&self, path: &str, params: &Q) -> ApiResult<Paginated<T>>
    where
        T: DeserializeOwned,
        Q: ToQuery + ?Sized,
    {
        self.request(&params.to_query().append_to(path), RequestOptions::get())
            .await
    }
}
