//! Report delivery over the Discord REST API.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use tracing::debug;

use tallyforge_core::ReportSink;

/// Sends payout reports via a plain HTTP client, independent of the
/// gateway connection.
pub struct DiscordSink {
    http: Arc<Http>,
}

impl DiscordSink {
    pub fn new(token: &str) -> Self {
        Self { http: Arc::new(Http::new(token)) }
    }

    pub fn from_http(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ReportSink for DiscordSink {
    async fn send(&self, channel_id: u64, text: &str) -> Result<()> {
        ChannelId::new(channel_id)
            .say(&self.http, text)
            .await
            .with_context(|| format!("Failed to deliver report to channel {channel_id}"))?;
        debug!(channel_id, chars = text.len(), "Report delivered");
        Ok(())
    }
}
