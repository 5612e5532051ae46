// src/views/mod.rs
//! Page loaders and their terminal rendering.
//!
//! Each loader issues the reads its page needs. Independent reads are
//! joined with `tokio::try_join!`: the first failure aborts the page and
//! the other results are discarded.

pub mod applications;
pub mod dashboard;
pub mod messages;
pub mod orgs;
pub mod posts;

pub use applications::MyApplications;
pub use dashboard::Dashboard;
pub use messages::{Conversation, Inbox};
pub use orgs::{OrgDetail, OrgDirectory};
pub use posts::{PostBoard, PostDetail};

use chrono::{DateTime, Utc};

pub(crate) fn short_date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

pub(crate) fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// `count` followed by the noun, pluralized with a trailing `s`.
pub(crate) fn plural(count: u32, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
