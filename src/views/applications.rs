// src/views/applications.rs
use std::fmt;

use crate::api::{ApplicationFilter, PageParams};
use crate::core::{ApiResult, NetClient};
use crate::types::{Application, ApplicationStatus, Paginated};
use crate::views::short_date;

#[derive(Debug, Clone)]
pub struct MyApplications {
    pub applications: Paginated<Application>,
}

impl MyApplications {
    pub async fn load(
        client: &NetClient,
        status: Option<&str>,
        keyword: Option<&str>,
    ) -> ApiResult<Self> {
        let filter = ApplicationFilter {
            page: PageParams::limit(50),
            status: status.map(str::to_string),
            keyword: keyword.map(str::to_string),
        };
        let applications = client.users().my_applications(&filter).await?;
        Ok(Self { applications })
    }

    /// Only pending applications can be withdrawn.
    pub fn withdrawable(&self) -> impl Iterator<Item = &Application> {
        self.applications
            .data
            .iter()
            .filter(|app| app.status == ApplicationStatus::Pending)
    }
}

impl fmt::Display for MyApplications {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.applications.data.is_empty() {
            return writeln!(f, "No applications found.");
        }
        for app in &self.applications.data {
            write!(
                f,
                "{:<24} [{}] {} · applied {}",
                app.id,
                app.status,
                app.post_title.as_deref().unwrap_or(&app.post_id),
                short_date(&app.created_at)
            )?;
            if let Some(reason) = &app.rejection_reason {
                write!(f, " · reason: {}", reason)?;
            }
            writeln!(f)?;
        }
        let pending = self.withdrawable().count();
        if pending > 0 {
            writeln!(f, "{} pending, withdraw with `applications withdraw <id>`", pending)?;
        }
        if self.applications.has_more() {
            writeln!(f, "… more applications available")?;
        }
        Ok(())
    }
}
