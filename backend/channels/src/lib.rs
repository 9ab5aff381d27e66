use async_trait::async_trait;

pub mod discord;
pub mod membership;
pub mod sink;

pub use discord::{BotState, DiscordAdapter};
pub use membership::DiscordMembership;
pub use sink::DiscordSink;

/// All channel adapters implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Start the adapter's long-running connection. Returns only on a
    /// fatal connection error.
    async fn start(&self) -> anyhow::Result<()>;
}
