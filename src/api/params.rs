// src/api/params.rs
//! Allow-listed query parameters of the list endpoints

use crate::core::query::{Query, ToQuery};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

impl PageParams {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            skip: None,
        }
    }

    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    fn query(&self) -> Query {
        Query::new()
            .number("limit", self.limit)
            .number("skip", self.skip)
    }
}

impl ToQuery for PageParams {
    fn to_query(&self) -> Query {
        self.query()
    }
}

/// Applications listed for a post or for the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub page: PageParams,
    pub status: Option<String>,
    pub keyword: Option<String>,
}

impl ToQuery for ApplicationFilter {
    fn to_query(&self) -> Query {
        self.page
            .query()
            .text("status", self.status.as_deref())
            .text("keyword", self.keyword.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgListParams {
    pub page: PageParams,
    pub name: Option<String>,
    pub status: Option<String>,
    pub keyword: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

impl ToQuery for OrgListParams {
    fn to_query(&self) -> Query {
        self.page
            .query()
            .text("name", self.name.as_deref())
            .text("status", self.status.as_deref())
            .text("keyword", self.keyword.as_deref())
            .text("sort_field", self.sort_field.as_deref())
            .text("sort_order", self.sort_order.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostListParams {
    pub page: PageParams,
    pub status: Option<String>,
    pub org_id: Option<String>,
    pub expires_after: Option<String>,
    pub expires_before: Option<String>,
    pub query: Option<String>,
    pub filter: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
    /// Sent as a string; the server expects `"true"` or `"false"`.
    pub exclude_applied: Option<String>,
}

impl ToQuery for PostListParams {
    fn to_query(&self) -> Query {
        self.page
            .query()
            .text("status", self.status.as_deref())
            .text("org_id", self.org_id.as_deref())
            .text("expires_after", self.expires_after.as_deref())
            .text("expires_before", self.expires_before.as_deref())
            .text("query", self.query.as_deref())
            .text("filter", self.filter.as_deref())
            .text("sort_field", self.sort_field.as_deref())
            .text("sort_order", self.sort_order.as_deref())
            .text("exclude_applied", self.exclude_applied.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelListParams {
    pub page: PageParams,
    pub status: Option<String>,
    pub application_id: Option<String>,
    pub post_id: Option<String>,
}

impl ToQuery for ChannelListParams {
    fn to_query(&self) -> Query {
        self.page
            .query()
            .text("status", self.status.as_deref())
            .text("application_id", self.application_id.as_deref())
            .text("post_id", self.post_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_params_keep_allow_list_order() {
        let params = PostListParams {
            page: PageParams::limit(50),
            status: Some("open".to_string()),
            query: Some("rust".to_string()),
            exclude_applied: Some("false".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.to_query().append_to("/v1/posts"),
            "/v1/posts?limit=50&status=open&query=rust&exclude_applied=false"
        );
    }

    #[test]
    fn test_zero_skip_is_omitted() {
        let params = PageParams::limit(20).with_skip(0);
        assert_eq!(params.to_query().encode(), "limit=20");
    }

    #[test]
    fn test_channel_params() {
        let params = ChannelListParams {
            status: Some("active".to_string()),
            post_id: Some("p1".to_string()),
            ..Default::default()
        };
        assert_eq!(params.to_query().encode(), "status=active&post_id=p1");
    }
}
