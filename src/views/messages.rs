// src/views/messages.rs
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::api::{ChannelListParams, PageParams};
use crate::core::{ApiResult, NetClient};
use crate::types::{Channel, Message, User};
use crate::views::{plural, timestamp};

/// Channel list with unread counts taken from the user summary.
#[derive(Debug, Clone)]
pub struct Inbox {
    pub channels: Vec<Channel>,
    pub unread_total: u32,
    unread: HashMap<String, u32>,
}

impl Inbox {
    pub async fn load(client: &NetClient, status: Option<&str>) -> ApiResult<Self> {
        let params = ChannelListParams {
            page: PageParams::limit(50),
            status: status.map(str::to_string),
            ..Default::default()
        };

        let channel_api = client.channels();
        let users = client.users();
        let (channels, summary) = tokio::try_join!(channel_api.list(&params), users.summary())?;

        let unread = summary
            .unread_messages
            .channels
            .into_iter()
            .map(|c| (c.channel_id, c.unread_count))
            .collect();

        Ok(Self {
            channels: channels.data,
            unread_total: summary.unread_messages.total,
            unread,
        })
    }

    pub fn unread_count(&self, channel_id: &str) -> u32 {
        self.unread.get(channel_id).copied().unwrap_or(0)
    }
}

impl fmt::Display for Inbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unread_total > 0 {
            writeln!(f, "{} unread", self.unread_total)?;
        } else {
            writeln!(f, "Your conversations")?;
        }
        if self.channels.is_empty() {
            return writeln!(f, "No conversations yet.");
        }
        for channel in &self.channels {
            write!(
                f,
                "  {:<24} {} & {} [{}]",
                channel.id, channel.user1_name, channel.user2_name, channel.status
            )?;
            if let Some(at) = &channel.last_message_at {
                write!(f, " · last {}", timestamp(at))?;
            }
            let unread = self.unread_count(&channel.id);
            if unread > 0 {
                write!(f, " · {}", plural(unread, "unread message"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One channel with its latest messages, oldest first.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub channel: Channel,
    pub messages: Vec<Message>,
    pub me: User,
}

impl Conversation {
    /// Loads the channel and marks everything read. A failed mark-read is
    /// ignored; the conversation still renders.
    pub async fn load(client: &NetClient, channel_id: &str) -> ApiResult<Self> {
        let channel_api = client.channels();
        let users = client.users();
        let latest = PageParams::limit(100);

        let (channel, page, me) = tokio::try_join!(
            channel_api.get(channel_id),
            channel_api.messages(channel_id, &latest),
            users.get_me(),
        )?;

        let mut messages = page.data;
        messages.reverse();

        if let Err(e) = channel_api.mark_all_read(channel_id).await {
            debug!("Ignoring mark-all-read failure for {}: {}", channel_id, e);
        }

        Ok(Self {
            channel,
            messages,
            me,
        })
    }

    pub fn peer_name(&self) -> &str {
        self.channel.peer_name(&self.me.id)
    }
}

impl fmt::Display for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conversation with {} [{}] · expires {}",
            self.peer_name(),
            self.channel.status,
            timestamp(&self.channel.expires_at)
        )?;
        if self.messages.is_empty() {
            return writeln!(f, "No messages yet.");
        }
        for message in &self.messages {
            let sender = if message.sender_id == self.me.id {
                "You"
            } else {
                message.sender_name.as_str()
            };
            writeln!(f, "[{}] {}:", timestamp(&message.created_at), sender)?;
            for line in message.content_md.lines() {
                writeln!(f, "    {}", line)?;
            }
        }
        Ok(())
    }
}
