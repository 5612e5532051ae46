// src/views/orgs.rs
use std::fmt;

use crate::api::{OrgListParams, PageParams};
use crate::core::{ApiResult, NetClient};
use crate::types::{
    JoinRequest, JoinRequestStatus, OrgInvite, OrgMember, OrgRole, Organization, Paginated, Post,
    User,
};
use crate::views::posts::write_post_line;
use crate::views::short_date;

/// Organization browser: all active orgs, the user's orgs and pending invites.
#[derive(Debug, Clone)]
pub struct OrgDirectory {
    pub orgs: Paginated<Organization>,
    pub my_orgs: Paginated<Organization>,
    pub invites: Paginated<OrgInvite>,
}

impl OrgDirectory {
    pub async fn load(client: &NetClient, keyword: Option<&str>) -> ApiResult<Self> {
        let params = OrgListParams {
            page: PageParams::limit(50),
            keyword: keyword.map(str::to_string),
            status: Some("active".to_string()),
            ..Default::default()
        };
        let page = PageParams::limit(50);

        let org_api = client.orgs();
        let users = client.users();
        let (orgs, my_orgs, invites) = tokio::try_join!(
            org_api.list(&params),
            users.my_orgs(&page),
            users.my_invites(&page),
        )?;

        Ok(Self {
            orgs,
            my_orgs,
            invites,
        })
    }
}

impl fmt::Display for OrgDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.invites.data.is_empty() {
            writeln!(f, "Pending invites:")?;
            for invite in &self.invites.data {
                writeln!(
                    f,
                    "  {:<24} {} as {} · from {} · expires {}",
                    invite.id,
                    invite.org_name.as_deref().unwrap_or(&invite.org_id),
                    invite.role,
                    invite.inviter_name.as_deref().unwrap_or("unknown"),
                    short_date(&invite.expires_at)
                )?;
            }
            writeln!(f)?;
        }

        writeln!(f, "My organizations:")?;
        if self.my_orgs.data.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for org in &self.my_orgs.data {
            let role = org.role.map(|r| r.to_string()).unwrap_or_default();
            writeln!(f, "  {:<24} {} ({})", org.id, org.name, role)?;
        }

        writeln!(f, "\nAll organizations:")?;
        if self.orgs.data.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for org in &self.orgs.data {
            writeln!(f, "  {:<24} {} · {}", org.id, org.name, org.slug)?;
        }
        Ok(())
    }
}

/// One organization as seen by the current user. Invites and join requests
/// are only loaded for owners and admins.
#[derive(Debug, Clone)]
pub struct OrgDetail {
    pub org: Organization,
    pub me: User,
    pub my_role: Option<OrgRole>,
    pub members: Vec<OrgMember>,
    pub invites: Vec<OrgInvite>,
    pub join_requests: Vec<JoinRequest>,
    pub posts: Vec<Post>,
}

impl OrgDetail {
    pub async fn load(client: &NetClient, org_id: &str) -> ApiResult<Self> {
        let org_api = client.orgs();
        let users = client.users();

        let (org, me) = tokio::try_join!(org_api.get(org_id), users.get_me())?;

        let my_role = users
            .my_orgs(&PageParams::limit(100))
            .await?
            .data
            .into_iter()
            .find(|o| o.id == org_id)
            .and_then(|o| o.role);

        let members = org_api.members(org_id, &PageParams::limit(100)).await?.data;

        let (invites, join_requests) = if my_role.is_some_and(OrgRole::can_manage) {
            let page = PageParams::limit(50);
            let (invites, requests) = tokio::try_join!(
                org_api.invites(org_id, &page),
                org_api.join_requests(org_id, &page),
            )?;
            let pending = requests
                .data
                .into_iter()
                .filter(|r| r.status == JoinRequestStatus::Pending)
                .collect();
            (invites.data, pending)
        } else {
            (Vec::new(), Vec::new())
        };

        let posts = org_api.posts(org_id, &PageParams::limit(20)).await?.data;

        Ok(Self {
            org,
            me,
            my_role,
            members,
            invites,
            join_requests,
            posts,
        })
    }

    pub fn is_member(&self) -> bool {
        self.my_role.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.my_role.is_some_and(OrgRole::can_manage)
    }
}

impl fmt::Display for OrgDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let org = &self.org;
        writeln!(f, "{} ({}) [{}]", org.name, org.slug, org.status)?;
        if let Some(description) = &org.description {
            writeln!(f, "{}", description)?;
        }
        if let Some(website) = &org.website {
            writeln!(f, "🌐 {}", website)?;
        }
        match self.my_role {
            Some(role) => writeln!(f, "Your role: {}", role)?,
            None => writeln!(f, "You are not a member")?,
        }

        writeln!(f, "\nMembers ({}):", self.members.len())?;
        for member in &self.members {
            let you = if member.user_id == self.me.id { " (you)" } else { "" };
            writeln!(
                f,
                "  {:<24} {} · {}{}",
                member.user_id, member.user_name, member.role, you
            )?;
        }

        if self.is_admin() {
            writeln!(f, "\nPending invites ({}):", self.invites.len())?;
            for invite in &self.invites {
                writeln!(
                    f,
                    "  {:<24} {} as {} · expires {}",
                    invite.id,
                    invite.invitee_email.as_deref().unwrap_or("-"),
                    invite.role,
                    short_date(&invite.expires_at)
                )?;
            }

            writeln!(f, "\nJoin requests ({}):", self.join_requests.len())?;
            for request in &self.join_requests {
                writeln!(
                    f,
                    "  {:<24} {}{}",
                    request.id,
                    request.user_name.as_deref().unwrap_or("unknown"),
                    request
                        .message
                        .as_deref()
                        .map(|m| format!(": {}", m))
                        .unwrap_or_default()
                )?;
            }
        }

        writeln!(f, "\nPosts ({}):", self.posts.len())?;
        for post in &self.posts {
            write!(f, "  ")?;
            write_post_line(f, post)?;
        }
        Ok(())
    }
}
