//! Discord gateway adapter.
//!
//! Listens for receipt screenshots in the proof channel, runs the
//! OCR → extract → record pipeline per attachment, and routes prefixed
//! text commands to the dispatcher. Failures are per-attachment: a broken
//! image never aborts its siblings.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::model::channel::{Attachment, Message};
use serenity::model::gateway::Ready;
use serenity::model::mention::Mentionable;
use serenity::prelude::*;
use tracing::{error, info, warn};

use tallyforge_commands::{detect_command, CommandContext, CommandDispatcher, CommandRegistry};
use tallyforge_core::{extract_amounts, TallyError};
use tallyforge_ledger::ContributionStore;
use tallyforge_ocr::{is_image_filename, preprocess, OcrEngine, PreprocessParams};

use crate::ChannelAdapter;

/// Everything the event handler needs, wired up once at startup.
pub struct BotState {
    pub store: Arc<ContributionStore>,
    pub ocr: Arc<dyn OcrEngine>,
    pub registry: Arc<CommandRegistry>,
    pub dispatcher: Arc<CommandDispatcher>,
    pub proof_channel_id: u64,
    pub command_prefix: String,
    pub currency_symbol: String,
    pub preprocess: PreprocessParams,
}

/// One successfully processed receipt image.
struct ProcessedReceipt {
    numbers: Vec<f64>,
    total: f64,
}

struct Handler {
    state: Arc<BotState>,
}

impl Handler {
    async fn reply(&self, ctx: &Context, msg: &Message, text: String) {
        if let Err(e) = msg.channel_id.say(&ctx.http, text).await {
            error!(error = %e, "Failed to send Discord reply");
        }
    }

    /// Manage Guild or Administrator, resolved against the cached guild.
    fn sender_is_admin(&self, ctx: &Context, msg: &Message) -> bool {
        let Some(guild_id) = msg.guild_id else { return false };
        let Some(guild) = ctx.cache.guild(guild_id) else { return false };
        let Some(member) = guild.members.get(&msg.author.id) else { return false };
        let perms = guild.member_permissions(member);
        perms.manage_guild() || perms.administrator()
    }

    async fn handle_command(&self, ctx: &Context, msg: &Message) -> bool {
        let Some(inv) =
            detect_command(&msg.content, &self.state.command_prefix, &self.state.registry)
        else {
            return false;
        };

        let command_ctx = CommandContext {
            sender_id: msg.author.id.to_string(),
            channel_id: msg.channel_id.get(),
            is_admin: self.sender_is_admin(ctx, msg),
        };

        match self.state.dispatcher.dispatch(&command_ctx, &inv).await {
            Ok(response) => self.reply(ctx, msg, response.text).await,
            Err(e) => {
                error!(command = %inv.key, error = %e, "Command failed");
                self.reply(ctx, msg, format!("❌ Command failed: `{e}`")).await;
            }
        }
        true
    }

    /// Download → decode → OCR → extract → record, for one attachment.
    /// `Ok(None)` means the image held no numeric content (not an error).
    async fn process_attachment(
        &self,
        user_id: &str,
        attachment: &Attachment,
    ) -> Result<Option<ProcessedReceipt>, TallyError> {
        let bytes = attachment
            .download()
            .await
            .map_err(|e| TallyError::ImageDecode(format!("download failed: {e}")))?;

        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| TallyError::ImageDecode(e.to_string()))?;

        let prepared = preprocess(&decoded, &self.state.preprocess);
        let text = self
            .state
            .ocr
            .recognize(&prepared)
            .await
            .map_err(|e| TallyError::Ocr(e.to_string()))?;

        let numbers = extract_amounts(&text);
        if numbers.is_empty() {
            return Ok(None);
        }

        let total: f64 = numbers.iter().sum();
        self.state
            .store
            .record(user_id, total)
            .await
            .map_err(|e| TallyError::Storage(e.to_string()))?;

        Ok(Some(ProcessedReceipt { numbers, total }))
    }

    async fn handle_receipts(&self, ctx: &Context, msg: &Message) {
        let user_id = msg.author.id.to_string();

        for attachment in &msg.attachments {
            if !is_image_filename(&attachment.filename) {
                continue;
            }

            match self.process_attachment(&user_id, attachment).await {
                Ok(Some(receipt)) => {
                    let listed = receipt
                        .numbers
                        .iter()
                        .map(|n| n.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    self.reply(
                        ctx,
                        msg,
                        format!(
                            "🧾 {} found numbers: `{listed}`\n➕ Receipt total: **{:.2}{}** (added to your weekly tally).",
                            msg.author.mention(),
                            receipt.total,
                            self.state.currency_symbol
                        ),
                    )
                    .await;
                }
                Ok(None) => {
                    self.reply(
                        ctx,
                        msg,
                        format!("{} ❕ No numbers found in the receipt.", msg.author.mention()),
                    )
                    .await;
                }
                Err(e) => {
                    warn!(file = %attachment.filename, error = %e, "Receipt processing failed");
                    self.reply(ctx, msg, format!("{} ❌ {e}", msg.author.mention())).await;
                }
            }
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        // Commands work from any channel.
        if self.handle_command(&ctx, &msg).await {
            return;
        }

        // Receipts only from the proof channel.
        if msg.channel_id.get() != self.state.proof_channel_id {
            return;
        }
        if msg.attachments.is_empty() {
            return;
        }

        self.handle_receipts(&ctx, &msg).await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "Discord adapter connected");
    }
}

pub struct DiscordAdapter {
    token: String,
    state: Arc<BotState>,
}

impl DiscordAdapter {
    pub fn new(token: impl Into<String>, state: Arc<BotState>) -> Self {
        Self { token: token.into(), state }
    }
}

#[async_trait]
impl ChannelAdapter for DiscordAdapter {
    fn name(&self) -> &str {
        "discord"
    }

    async fn start(&self) -> anyhow::Result<()> {
        info!("Starting Discord adapter");

        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::MESSAGE_CONTENT;

        let mut client = Client::builder(&self.token, intents)
            .event_handler(Handler { state: self.state.clone() })
            .await?;

        if let Err(why) = client.start().await {
            error!("Client error: {:?}", why);
            anyhow::bail!("Discord client error: {:?}", why);
        }

        Ok(())
    }
}
