//! Outbound reply surface.
//!
//! Commands never touch the chat transport directly; they write to a
//! [`ReplySink`] bound to the channel the command arrived on.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use bgs_types::EmbedPage;
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::http::Http;
use serenity::model::id::ChannelId;
use serenity::model::Timestamp;

/// Where a command's responses go.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_text(&self, content: &str) -> Result<()>;
    async fn send_embed(&self, page: &EmbedPage) -> Result<()>;
}

/// [`ReplySink`] backed by serenity's HTTP client.
pub struct DiscordSink {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl DiscordSink {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl ReplySink for DiscordSink {
    async fn send_text(&self, content: &str) -> Result<()> {
        self.channel_id.say(&self.http, content).await?;
        Ok(())
    }

    async fn send_embed(&self, page: &EmbedPage) -> Result<()> {
        let mut embed = CreateEmbed::new().title(&page.title).color(page.color);
        for field in &page.fields {
            embed = embed.field(&field.name, &field.value, field.inline);
        }
        if let Ok(timestamp) = Timestamp::from_unix_timestamp(page.timestamp.timestamp()) {
            embed = embed.timestamp(timestamp);
        }
        self.channel_id
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;
        Ok(())
    }
}

/// Records everything a command sends. Test double for [`ReplySink`].
#[derive(Clone, Default)]
pub struct MockSink {
    inner: Arc<Mutex<Sent>>,
}

#[derive(Default)]
struct Sent {
    texts: Vec<String>,
    pages: Vec<EmbedPage>,
    embed_attempts: usize,
    failing_embeds: HashSet<usize>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `index`-th `send_embed` call (0-based) fail.
    pub fn fail_embed(&self, index: usize) {
        self.inner.lock().unwrap().failing_embeds.insert(index);
    }

    /// Snapshot of all text replies in send order.
    pub fn texts(&self) -> Vec<String> {
        self.inner.lock().unwrap().texts.clone()
    }

    /// Snapshot of all embed pages in send order.
    pub fn pages(&self) -> Vec<EmbedPage> {
        self.inner.lock().unwrap().pages.clone()
    }

    /// Return `true` if nothing has been sent.
    pub fn is_empty(&self) -> bool {
        let sent = self.inner.lock().unwrap();
        sent.texts.is_empty() && sent.pages.is_empty()
    }
}

#[async_trait]
impl ReplySink for MockSink {
    async fn send_text(&self, content: &str) -> Result<()> {
        self.inner.lock().unwrap().texts.push(content.to_string());
        Ok(())
    }

    async fn send_embed(&self, page: &EmbedPage) -> Result<()> {
        let mut sent = self.inner.lock().unwrap();
        let attempt = sent.embed_attempts;
        sent.embed_attempts += 1;
        if sent.failing_embeds.contains(&attempt) {
            anyhow::bail!("mock send failure for embed {}", attempt);
        }
        sent.pages.push(page.clone());
        Ok(())
    }
}
