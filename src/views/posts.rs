// src/views/posts.rs
use std::fmt;
use tracing::debug;

use crate::api::{ApplicationFilter, PageParams, PostListParams};
use crate::core::{ApiResult, NetClient};
use crate::types::{Application, Paginated, Post, User};
use crate::views::{plural, short_date, timestamp};

/// Open posts board. Posts the user already applied to are kept.
#[derive(Debug, Clone)]
pub struct PostBoard {
    pub posts: Paginated<Post>,
}

impl PostBoard {
    pub async fn load(
        client: &NetClient,
        status: Option<&str>,
        query: Option<&str>,
    ) -> ApiResult<Self> {
        let params = PostListParams {
            page: PageParams::limit(50),
            status: status.map(str::to_string),
            query: query.map(str::to_string),
            exclude_applied: Some("false".to_string()),
            ..Default::default()
        };
        let posts = client.posts().list(&params).await?;
        Ok(Self { posts })
    }
}

impl fmt::Display for PostBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.posts.data.is_empty() {
            return writeln!(f, "No posts found.");
        }
        for post in &self.posts.data {
            write_post_line(f, post)?;
        }
        if self.posts.has_more() {
            writeln!(f, "… more posts available")?;
        }
        Ok(())
    }
}

pub(crate) fn write_post_line(f: &mut fmt::Formatter<'_>, post: &Post) -> fmt::Result {
    write!(
        f,
        "{:<24} [{}] {} · {} · expires {}",
        post.id,
        post.status,
        post.title,
        plural(post.application_count, "application"),
        short_date(&post.expires_at)
    )?;
    if let Some(org) = &post.org_name {
        write!(f, " · {}", org)?;
    }
    if let Some(status) = &post.my_application_status {
        write!(f, " · applied ({})", status)?;
    }
    writeln!(f)
}

/// A post with the applications its author sees, or the viewer's own
/// application otherwise.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub me: User,
    pub applications: Vec<Application>,
    pub my_application: Option<Application>,
}

impl PostDetail {
    pub async fn load(client: &NetClient, post_id: &str) -> ApiResult<Self> {
        let posts = client.posts();
        let users = client.users();
        let (post, me) = tokio::try_join!(posts.get(post_id), users.get_me())?;

        let mut detail = Self {
            post,
            me,
            applications: Vec::new(),
            my_application: None,
        };

        if detail.is_owner() {
            debug!("Viewer owns post {}, loading applications", post_id);
            detail.applications = Self::load_applications(client, post_id, None).await?;
        } else {
            detail.my_application = posts.my_application(post_id).await?;
        }
        Ok(detail)
    }

    /// Applications of a post, optionally narrowed to one status.
    pub async fn load_applications(
        client: &NetClient,
        post_id: &str,
        status: Option<&str>,
    ) -> ApiResult<Vec<Application>> {
        let filter = ApplicationFilter {
            page: PageParams::limit(50),
            status: status.map(str::to_string),
            keyword: None,
        };
        Ok(client.posts().applications(post_id, &filter).await?.data)
    }

    pub fn is_owner(&self) -> bool {
        self.me.id == self.post.author_id
    }
}

impl fmt::Display for PostDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let post = &self.post;
        writeln!(f, "{} [{}]", post.title, post.status)?;
        if let Some(org) = &post.org_name {
            writeln!(f, "Organization: {}", org)?;
        }
        writeln!(
            f,
            "Posted {} · expires {} · {}",
            short_date(&post.created_at),
            short_date(&post.expires_at),
            plural(post.application_count, "application")
        )?;
        if let Some(short) = &post.short_content {
            writeln!(f, "\n{}", short)?;
        }
        if let Some(long) = &post.long_content {
            writeln!(f, "\n{}", long)?;
        }

        if self.is_owner() {
            writeln!(f, "\nApplications ({}):", self.applications.len())?;
            for app in &self.applications {
                writeln!(
                    f,
                    "  {:<24} [{}] {} · {}",
                    app.id,
                    app.status,
                    app.applicant_name.as_deref().unwrap_or(&app.applicant_id),
                    timestamp(&app.created_at)
                )?;
            }
        } else {
            match &self.my_application {
                Some(app) => {
                    writeln!(f, "\nYou applied on {} [{}]", short_date(&app.created_at), app.status)?;
                    if let Some(reason) = &app.rejection_reason {
                        writeln!(f, "Reason: {}", reason)?;
                    }
                }
                None => writeln!(f, "\nYou have not applied to this post.")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures;

    fn detail(author: &str, me: &str) -> PostDetail {
        PostDetail {
            post: serde_json::from_value(fixtures::post("p1", author)).unwrap(),
            me: serde_json::from_value(fixtures::user(me, "Ada")).unwrap(),
            applications: vec![
                serde_json::from_value(fixtures::application("a1", "p1", "pending")).unwrap(),
            ],
            my_application: None,
        }
    }

    #[test]
    fn test_owner_sees_applications() {
        let view = detail("u1", "u1");
        assert!(view.is_owner());
        let rendered = view.to_string();
        assert!(rendered.contains("Applications (1):"));
        assert!(rendered.contains("[pending] Grace"));
    }

    #[test]
    fn test_visitor_sees_own_status() {
        let view = detail("u1", "u2");
        assert!(!view.is_owner());
        assert!(view.to_string().contains("You have not applied"));
    }
}
