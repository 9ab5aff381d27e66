use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

/// Role membership lookups against the chat platform.
#[async_trait]
pub trait Membership: Send + Sync {
    /// The set of role names the user currently holds.
    /// Returns an empty set for unknown users or users who left the guild.
    async fn role_labels_of(&self, user_id: &str) -> Result<HashSet<String>>;
}

/// Outbound delivery of payout reports and notices.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Send `text` to the given channel. An error here means the report was
    /// not published; callers must not discard state afterwards.
    async fn send(&self, channel_id: u64, text: &str) -> Result<()>;
}
