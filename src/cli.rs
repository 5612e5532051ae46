// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::PageParams;
use crate::core::{ConfigManager, NetClient, Session};
use crate::types::{
    ApplicationDraft, BatchAction, InviteRole, Location, NewOrganization, NewPost, OrgRole,
    OrganizationPatch, PostPatch, ProfileData, ProfilePatch,
};
use crate::views::{
    Conversation, Dashboard, Inbox, MyApplications, OrgDetail, OrgDirectory, PostBoard,
    PostDetail,
};
use crate::web::{start_config_server, ServerConfig};

#[derive(Parser)]
#[command(name = "net-studio")]
#[command(about = "Terminal front-end for the Net job and matching network", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Bootstrap file (defaults to ~/.nimrobo/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Net API base URL, overriding the bootstrap file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token for this invocation only; nothing is persisted
    #[arg(long, global = true)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store a token (or adopt the bootstrap file's key) for later runs
    Login {
        #[arg(value_name = "TOKEN")]
        key: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show the authenticated user
    Whoami,
    /// Overview of messages, applicants, applications and invites
    Dashboard,
    /// View or edit your profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Organizations, members, invites and join requests
    #[command(subcommand)]
    Orgs(OrgsCommand),
    /// Job posts and their applications
    #[command(subcommand)]
    Posts(PostsCommand),
    /// Your applications and decisions on received ones
    #[command(subcommand)]
    Applications(ApplicationsCommand),
    /// List conversations
    Inbox {
        #[arg(long, default_value = "active")]
        status: String,
    },
    /// Read and write in a conversation
    #[command(subcommand)]
    Channel(ChannelCommand),
    /// Serve the bootstrap config on http://127.0.0.1:<port>/api/config
    Serve {
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    Show,
    Update(ProfileArgs),
}

#[derive(Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    /// Long-form profile text (markdown)
    #[arg(long)]
    pub content: Option<String>,
}

#[derive(Subcommand)]
pub enum OrgsCommand {
    List {
        #[arg(long)]
        keyword: Option<String>,
    },
    Show {
        id: String,
    },
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        website: Option<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        website: Option<String>,
        /// Clear the description
        #[arg(long, conflicts_with = "description")]
        clear_description: bool,
        /// Clear the website
        #[arg(long, conflicts_with = "website")]
        clear_website: bool,
    },
    Delete {
        id: String,
        #[arg(long, short)]
        yes: bool,
    },
    Leave {
        id: String,
        #[arg(long, short)]
        yes: bool,
    },
    Invite {
        org_id: String,
        email: String,
        #[arg(long, value_enum, default_value = "member")]
        role: InviteRole,
    },
    CancelInvite {
        org_id: String,
        invite_id: String,
    },
    AcceptInvite {
        invite_id: String,
    },
    DeclineInvite {
        invite_id: String,
    },
    Join {
        org_id: String,
        #[arg(long)]
        message: Option<String>,
    },
    Approve {
        request_id: String,
        #[arg(long, value_enum)]
        role: Option<InviteRole>,
    },
    Reject {
        request_id: String,
    },
    CancelRequest {
        request_id: String,
    },
    SetRole {
        org_id: String,
        user_id: String,
        #[arg(value_enum)]
        role: OrgRole,
    },
    RemoveMember {
        org_id: String,
        user_id: String,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum PostsCommand {
    List {
        /// Empty string lists every status
        #[arg(long, default_value = "open")]
        status: String,
        #[arg(long)]
        query: Option<String>,
    },
    /// Posts you authored
    Mine,
    Show {
        id: String,
    },
    Create {
        title: String,
        #[command(flatten)]
        fields: PostFields,
    },
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: PostFields,
        /// Detach the post from its organization
        #[arg(long, conflicts_with = "org_id")]
        detach_org: bool,
    },
    Close {
        id: String,
        #[arg(long, short)]
        yes: bool,
    },
    Delete {
        id: String,
        #[arg(long, short)]
        yes: bool,
    },
    Apply {
        post_id: String,
        /// Cover message (markdown)
        #[arg(long)]
        message: Option<String>,
    },
    Applications {
        post_id: String,
        #[arg(long)]
        status: Option<String>,
    },
}

#[derive(Args)]
pub struct PostFields {
    #[arg(long)]
    pub short: Option<String>,
    #[arg(long)]
    pub long: Option<String>,
    /// Expiry timestamp, e.g. 2026-12-31T00:00:00Z
    #[arg(long)]
    pub expires_at: Option<String>,
    #[arg(long)]
    pub org_id: Option<String>,
}

#[derive(Subcommand)]
pub enum ApplicationsCommand {
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        keyword: Option<String>,
    },
    Show {
        id: String,
    },
    Accept {
        id: String,
    },
    Reject {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    Withdraw {
        id: String,
        #[arg(long, short)]
        yes: bool,
    },
    Batch {
        #[arg(value_enum)]
        action: BatchAction,
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ChannelCommand {
    Show { id: String },
    Send { id: String, message: String },
    Read { id: String, message_id: String },
    Unread { id: String, message_id: String },
    ReadAll { id: String },
}

/// Resolve configuration, build the session and client, then dispatch.
pub async fn handle_command(cli: Cli) -> Result<()> {
    let mut config = ConfigManager::load()?.with_base_url(cli.base_url);
    if let Some(path) = cli.config {
        config = config.with_config_path(path);
    }

    if let Command::Serve { port } = cli.command {
        let server_config = ServerConfig {
            config_path: config.config_path.clone(),
            state_path: config.state_path.clone(),
        };
        return start_config_server(server_config, port).await;
    }

    reject_ephemeral_login(cli.token.as_deref(), &cli.command)?;

    let session = match cli.token {
        Some(token) => Session::ephemeral(Some(token)),
        None => Session::bootstrap(config.token_store(), config.bootstrap.as_ref())
            .context("Failed to initialize session")?,
    };
    let client = NetClient::new(config.net_api_base_url(), Arc::new(session))?;
    info!("Using Net API at {}", client.base_url());

    match cli.command {
        Command::Login { key } => login(&client, &config, key).await?,
        Command::Logout => {
            client.session().set_token(None)?;
            println!("✓ Logged out");
        }
        Command::Whoami => {
            require_login(&client);
            let me = client.users().get_me().await?;
            println!("{} <{}> ({})", me.display_name(), me.email, me.id);
        }
        Command::Dashboard => {
            require_login(&client);
            let dashboard = Dashboard::load(&client)
                .await
                .context("Failed to load dashboard")?;
            print!("{}", dashboard);
        }
        Command::Profile(command) => handle_profile(&client, command).await?,
        Command::Orgs(command) => handle_orgs(&client, command).await?,
        Command::Posts(command) => handle_posts(&client, command).await?,
        Command::Applications(command) => handle_applications(&client, command).await?,
        Command::Inbox { status } => {
            let inbox = Inbox::load(&client, Some(&status))
                .await
                .context("Failed to load messages")?;
            print!("{}", inbox);
        }
        Command::Channel(command) => handle_channel(&client, command).await?,
        // Served before the client exists.
        Command::Serve { .. } => {}
    }

    Ok(())
}

/// `--token` is never persisted, so it cannot be combined with commands
/// whose only effect is on the stored token.
fn reject_ephemeral_login(token: Option<&str>, command: &Command) -> Result<()> {
    if token.is_some() && matches!(command, Command::Login { .. } | Command::Logout) {
        anyhow::bail!("--token applies to a single run and cannot be used with login or logout");
    }
    Ok(())
}

async fn login(client: &NetClient, config: &ConfigManager, token: Option<String>) -> Result<()> {
    let token = token
        .or_else(|| config.api_key().map(str::to_string))
        .context("No token given and no API_KEY in the bootstrap config. Run `nimrobo screen login` first.")?;
    client.session().set_token(Some(token))?;

    match client.users().get_me().await {
        Ok(me) => println!("✓ Logged in as {} <{}>", me.display_name(), me.email),
        Err(e) => {
            warn!("Stored token could not be verified: {}", e);
            println!("⚠️  Token stored, but the API rejected it: {}", e);
        }
    }
    Ok(())
}

fn require_login(client: &NetClient) {
    if !client.session().is_authenticated() {
        warn!("No credential available, request will be unauthenticated");
        eprintln!("⚠️  Not logged in. Authenticate with `nimrobo screen login` or `net-studio login <token>`.");
    }
}

async fn handle_profile(client: &NetClient, command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::Show => print_json(&client.users().get_me().await?)?,
        ProfileCommand::Update(args) => {
            let location = (args.city.is_some() || args.country.is_some()).then(|| Location {
                city: args.city,
                country: args.country,
            });
            let data = ProfileData {
                name: args.name,
                location,
                short_bio: args.bio,
            };
            let has_data = data.name.is_some() || data.location.is_some() || data.short_bio.is_some();
            let patch = ProfilePatch {
                data: has_data.then_some(data),
                content: args.content,
            };
            let updated = client.users().update_me(&patch).await?;
            println!("✓ Profile updated for {}", updated.display_name());
        }
    }
    Ok(())
}

async fn handle_orgs(client: &NetClient, command: OrgsCommand) -> Result<()> {
    let orgs = client.orgs();
    match command {
        OrgsCommand::List { keyword } => {
            let directory = OrgDirectory::load(client, keyword.as_deref())
                .await
                .context("Failed to load organizations")?;
            print!("{}", directory);
        }
        OrgsCommand::Show { id } => {
            let detail = OrgDetail::load(client, &id)
                .await
                .context("Failed to load organization")?;
            print!("{}", detail);
        }
        OrgsCommand::Create {
            name,
            description,
            website,
        } => {
            let org = orgs
                .create(&NewOrganization {
                    name,
                    description,
                    website,
                    data: None,
                })
                .await?;
            println!("✓ Created organization {} ({})", org.name, org.id);
        }
        OrgsCommand::Update {
            id,
            name,
            description,
            website,
            clear_description,
            clear_website,
        } => {
            let patch = OrganizationPatch {
                name,
                description: if clear_description { Some(None) } else { description.map(Some) },
                website: if clear_website { Some(None) } else { website.map(Some) },
                data: None,
            };
            let org = orgs.update(&id, &patch).await?;
            println!("✓ Updated organization {}", org.name);
        }
        OrgsCommand::Delete { id, yes } => {
            if confirm(&format!("Delete organization {}?", id), yes)? {
                let result = orgs.delete(&id).await?;
                println!("✓ {}", result.message);
            }
        }
        OrgsCommand::Leave { id, yes } => {
            if confirm(&format!("Leave organization {}?", id), yes)? {
                println!("✓ {}", orgs.leave(&id).await?.message);
            }
        }
        OrgsCommand::Invite {
            org_id,
            email,
            role,
        } => {
            let invite = orgs.send_invite(&org_id, &email, role).await?;
            println!("✓ Invited {} as {} (invite {})", email, invite.role, invite.id);
        }
        OrgsCommand::CancelInvite { org_id, invite_id } => {
            println!("✓ {}", orgs.cancel_invite(&org_id, &invite_id).await?.message);
        }
        OrgsCommand::AcceptInvite { invite_id } => {
            let accepted = orgs.accept_invite(&invite_id).await?;
            println!("✓ {} (org {}, role {})", accepted.message, accepted.org_id, accepted.role);
        }
        OrgsCommand::DeclineInvite { invite_id } => {
            println!("✓ {}", orgs.decline_invite(&invite_id).await?.message);
        }
        OrgsCommand::Join { org_id, message } => {
            let request = orgs.send_join_request(&org_id, message.as_deref()).await?;
            println!("✓ Join request {} sent [{}]", request.id, request.status);
        }
        OrgsCommand::Approve { request_id, role } => {
            let approved = orgs.approve_join_request(&request_id, role).await?;
            println!("✓ {} ({} joined as {})", approved.message, approved.user_id, approved.role);
        }
        OrgsCommand::Reject { request_id } => {
            println!("✓ {}", orgs.reject_join_request(&request_id).await?.message);
        }
        OrgsCommand::CancelRequest { request_id } => {
            println!("✓ {}", orgs.cancel_join_request(&request_id).await?.message);
        }
        OrgsCommand::SetRole {
            org_id,
            user_id,
            role,
        } => {
            let member = orgs.update_member_role(&org_id, &user_id, role).await?;
            println!("✓ {} is now {}", member.user_name, member.role);
        }
        OrgsCommand::RemoveMember {
            org_id,
            user_id,
            yes,
        } => {
            if confirm(&format!("Remove {} from {}?", user_id, org_id), yes)? {
                println!("✓ {}", orgs.remove_member(&org_id, &user_id).await?.message);
            }
        }
    }
    Ok(())
}

async fn handle_posts(client: &NetClient, command: PostsCommand) -> Result<()> {
    let posts = client.posts();
    match command {
        PostsCommand::List { status, query } => {
            let board = PostBoard::load(client, Some(&status), query.as_deref())
                .await
                .context("Failed to load posts")?;
            print!("{}", board);
        }
        PostsCommand::Mine => {
            let mine = client.users().my_posts(&PageParams::limit(50)).await?;
            let board = PostBoard { posts: mine };
            print!("{}", board);
        }
        PostsCommand::Show { id } => {
            let detail = PostDetail::load(client, &id)
                .await
                .context("Failed to load post")?;
            print!("{}", detail);
        }
        PostsCommand::Create { title, fields } => {
            let post = posts
                .create(&NewPost {
                    title,
                    short_content: fields.short,
                    long_content: fields.long,
                    data: None,
                    expires_at: fields.expires_at,
                    org_id: fields.org_id,
                })
                .await?;
            println!("✓ Created post {} ({})", post.title, post.id);
        }
        PostsCommand::Update {
            id,
            title,
            fields,
            detach_org,
        } => {
            let patch = PostPatch {
                title,
                short_content: fields.short,
                long_content: fields.long,
                data: None,
                expires_at: fields.expires_at,
                org_id: if detach_org { Some(None) } else { fields.org_id.map(Some) },
            };
            let post = posts.update(&id, &patch).await?;
            println!("✓ Updated post {}", post.title);
        }
        PostsCommand::Close { id, yes } => {
            if confirm(&format!("Close post {}? No new applications will be accepted.", id), yes)? {
                println!("✓ {}", posts.close(&id).await?.message);
            }
        }
        PostsCommand::Delete { id, yes } => {
            if confirm(&format!("Delete post {}?", id), yes)? {
                println!("✓ {}", posts.delete(&id).await?.message);
            }
        }
        PostsCommand::Apply { post_id, message } => {
            let draft = ApplicationDraft {
                data: None,
                content_md: message,
            };
            let application = posts.apply(&post_id, &draft).await?;
            println!("✓ Applied (application {}, {})", application.id, application.status);
        }
        PostsCommand::Applications { post_id, status } => {
            let applications =
                PostDetail::load_applications(client, &post_id, status.as_deref()).await?;
            if applications.is_empty() {
                println!("No applications.");
            }
            for app in applications {
                println!(
                    "{:<24} [{}] {}",
                    app.id,
                    app.status,
                    app.applicant_name.as_deref().unwrap_or(&app.applicant_id)
                );
            }
        }
    }
    Ok(())
}

async fn handle_applications(client: &NetClient, command: ApplicationsCommand) -> Result<()> {
    let applications = client.applications();
    match command {
        ApplicationsCommand::List { status, keyword } => {
            let view = MyApplications::load(client, status.as_deref(), keyword.as_deref())
                .await
                .context("Failed to load applications")?;
            print!("{}", view);
        }
        ApplicationsCommand::Show { id } => print_json(&applications.get(&id).await?)?,
        ApplicationsCommand::Accept { id } => {
            let accepted = applications.accept(&id).await?;
            println!("✓ {} (channel {})", accepted.message, accepted.channel_id);
        }
        ApplicationsCommand::Reject { id, reason } => {
            println!("✓ {}", applications.reject(&id, reason.as_deref()).await?.message);
        }
        ApplicationsCommand::Withdraw { id, yes } => {
            if confirm(&format!("Withdraw application {}?", id), yes)? {
                println!("✓ {}", applications.withdraw(&id).await?.message);
            }
        }
        ApplicationsCommand::Batch {
            action,
            ids,
            reason,
        } => {
            let response = applications.batch(action, &ids, reason.as_deref()).await?;
            println!("{}", response.message);
            for result in response.results {
                if result.success {
                    println!("  ✅ {}", result.id);
                } else {
                    println!("  ❌ {}: {}", result.id, result.error.unwrap_or_default());
                }
            }
        }
    }
    Ok(())
}

async fn handle_channel(client: &NetClient, command: ChannelCommand) -> Result<()> {
    let channels = client.channels();
    match command {
        ChannelCommand::Show { id } => {
            let conversation = Conversation::load(client, &id)
                .await
                .context("Failed to load conversation")?;
            print!("{}", conversation);
        }
        ChannelCommand::Send { id, message } => {
            let content = message.trim();
            if content.is_empty() {
                anyhow::bail!("Message is empty");
            }
            let sent = channels.send_message(&id, content).await?;
            println!("✓ Sent message {}", sent.id);
        }
        ChannelCommand::Read { id, message_id } => {
            let marked = channels.mark_read(&id, &message_id).await?;
            println!("✓ {} at {}", marked.message, marked.read_at);
        }
        ChannelCommand::Unread { id, message_id } => {
            println!("✓ {}", channels.mark_unread(&id, &message_id).await?.message);
        }
        ChannelCommand::ReadAll { id } => {
            let marked = channels.mark_all_read(&id).await?;
            println!("✓ {} ({} messages)", marked.message, marked.messages_marked);
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ask before destructive actions unless `--yes` was given.
fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
    if !confirmed {
        println!("Cancelled.");
    }
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_apply_with_global_token() {
        let cli = Cli::try_parse_from([
            "net-studio",
            "posts",
            "apply",
            "p1",
            "--message",
            "hello",
            "--token",
            "abc123",
        ])
        .unwrap();
        assert_eq!(cli.token.as_deref(), Some("abc123"));
        match cli.command {
            Command::Posts(PostsCommand::Apply { post_id, message }) => {
                assert_eq!(post_id, "p1");
                assert_eq!(message.as_deref(), Some("hello"));
            }
            _ => panic!("expected posts apply"),
        }
    }

    #[test]
    fn test_parse_batch_action() {
        let cli = Cli::try_parse_from(["net-studio", "applications", "batch", "reject", "a1", "a2"])
            .unwrap();
        match cli.command {
            Command::Applications(ApplicationsCommand::Batch { action, ids, reason }) => {
                assert_eq!(action, BatchAction::Reject);
                assert_eq!(ids, vec!["a1", "a2"]);
                assert!(reason.is_none());
            }
            _ => panic!("expected applications batch"),
        }
    }

    #[test]
    fn test_token_flag_rejected_for_login_and_logout() {
        let cli = Cli::try_parse_from(["net-studio", "--token", "x", "login", "y"]).unwrap();
        assert!(reject_ephemeral_login(cli.token.as_deref(), &cli.command).is_err());

        let cli = Cli::try_parse_from(["net-studio", "logout", "--token", "x"]).unwrap();
        assert!(reject_ephemeral_login(cli.token.as_deref(), &cli.command).is_err());

        let cli = Cli::try_parse_from(["net-studio", "login", "y"]).unwrap();
        assert!(reject_ephemeral_login(cli.token.as_deref(), &cli.command).is_ok());

        let cli = Cli::try_parse_from(["net-studio", "--token", "x", "whoami"]).unwrap();
        assert!(reject_ephemeral_login(cli.token.as_deref(), &cli.command).is_ok());
    }

    #[test]
    fn test_confirm_with_yes_flag() {
        assert!(confirm("Delete?", true).unwrap());
    }
}
