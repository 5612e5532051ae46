// src/views/dashboard.rs
use std::fmt;

use crate::core::{ApiResult, NetClient};
use crate::types::{Application, SummaryBucket, UserSummary};
use crate::views::plural;

/// Activity overview built from `/v1/users/me/summary`.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub summary: UserSummary,
}

impl Dashboard {
    pub async fn load(client: &NetClient) -> ApiResult<Self> {
        let summary = client.users().summary().await?;
        Ok(Self { summary })
    }

    /// Number of items that want the user's attention.
    pub fn attention_count(&self) -> u32 {
        let s = &self.summary;
        [
            s.pending_applicants.total,
            s.org_invites.count,
            s.org_join_requests.count,
        ]
        .into_iter()
        .fold(s.unread_messages.total, u32::saturating_add)
    }
}

fn write_applications(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    bucket: &SummaryBucket<Application>,
) -> fmt::Result {
    writeln!(f, "  {:<9} {}", label, bucket.count)?;
    for app in &bucket.items {
        writeln!(
            f,
            "    - {} ({})",
            app.post_title.as_deref().unwrap_or(&app.post_id),
            app.id
        )?;
    }
    Ok(())
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;

        match self.attention_count() {
            0 => writeln!(f, "Nothing needs your attention.\n")?,
            n => writeln!(f, "{} waiting for you\n", plural(n, "item"))?,
        }

        writeln!(f, "📬 Messages: {} unread", s.unread_messages.total)?;
        for channel in &s.unread_messages.channels {
            writeln!(
                f,
                "    - channel {}: {}",
                channel.channel_id,
                plural(channel.unread_count, "unread message")
            )?;
        }

        writeln!(f, "👥 Pending applicants: {}", s.pending_applicants.total)?;
        for post in &s.pending_applicants.posts {
            writeln!(
                f,
                "    - {} ({}): {}",
                post.title,
                post.post_id,
                plural(post.pending_count, "applicant")
            )?;
        }

        writeln!(f, "📝 My applications")?;
        write_applications(f, "pending", &s.my_applications.pending)?;
        write_applications(f, "accepted", &s.my_applications.accepted)?;
        write_applications(f, "rejected", &s.my_applications.rejected)?;

        writeln!(f, "✉️  Organization invites: {}", s.org_invites.count)?;
        for invite in &s.org_invites.items {
            writeln!(f, "    - {} (invite {})", invite.org_name, invite.invite_id)?;
        }

        writeln!(f, "🙋 Join requests: {}", s.org_join_requests.count)?;
        for request in &s.org_join_requests.items {
            writeln!(
                f,
                "    - {} wants to join {} (request {})",
                request.user_name, request.org_name, request.request_id
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures;
    use serde_json::json;

    fn summary() -> UserSummary {
        serde_json::from_value(json!({
            "unread_messages": {"total": 3, "channels": [{"channel_id": "c1", "unread_count": 3}]},
            "pending_applicants": {"total": 1, "posts": [{"post_id": "p1", "title": "Backend engineer", "pending_count": 1}]},
            "my_applications": {
                "pending": {"count": 1, "items": [fixtures::application("a1", "p9", "pending")]},
                "accepted": {"count": 0, "items": []},
                "rejected": {"count": 0, "items": []}
            },
            "org_invites": {"count": 1, "items": [{"invite_id": "i1", "org_id": "o1", "org_name": "Acme"}]},
            "org_join_requests": {"count": 0, "items": []}
        }))
        .unwrap()
    }

    #[test]
    fn test_attention_count() {
        let dashboard = Dashboard { summary: summary() };
        assert_eq!(dashboard.attention_count(), 5);
    }

    #[test]
    fn test_render_lists_each_section() {
        let rendered = Dashboard { summary: summary() }.to_string();
        assert!(rendered.contains("Messages: 3 unread"));
        assert!(rendered.contains("channel c1: 3 unread messages"));
        assert!(rendered.contains("Backend engineer (p1): 1 applicant"));
        assert!(rendered.contains("Acme (invite i1)"));
        assert!(rendered.contains("Join requests: 0"));
        assert!(rendered.starts_with("5 items waiting for you"));
    }

    #[test]
    fn test_attention_count_saturates() {
        let mut summary = summary();
        summary.unread_messages.total = u32::MAX;
        let dashboard = Dashboard { summary };
        assert_eq!(dashboard.attention_count(), u32::MAX);
    }
}
