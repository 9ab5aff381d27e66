//! Command dispatch — route detected commands to handler functions,
//! applying the admin gate centrally.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::registry::CommandRegistry;
use crate::types::CommandInvocation;

/// Context passed to every command handler.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub sender_id: String,
    pub channel_id: u64,
    /// Whether the sender holds Manage Guild or Administrator.
    pub is_admin: bool,
}

/// Text reply to send back to the invoking channel.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    pub text: String,
}

impl CommandResponse {
    pub fn ok(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse>;
}

pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry, handlers: HashMap::new() }
    }

    pub fn register(&mut self, key: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(key.into(), handler);
    }

    pub async fn dispatch(
        &self,
        ctx: &CommandContext,
        inv: &CommandInvocation,
    ) -> Result<CommandResponse> {
        if let Some(def) = self.registry.find_by_key(&inv.key) {
            if def.admin_only && !ctx.is_admin {
                return Ok(CommandResponse::ok(
                    "❌ Only members with **Manage Server** can run this command.",
                ));
            }
        }

        match self.handlers.get(&inv.key) {
            Some(handler) => {
                info!(command = %inv.key, sender = %ctx.sender_id, "Dispatching command");
                handler.handle(ctx, inv).await
            }
            None => Ok(CommandResponse::ok(format!(
                "❓ No handler registered for command {}",
                inv.key
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl CommandHandler for Echo {
        async fn handle(
            &self,
            _ctx: &CommandContext,
            inv: &CommandInvocation,
        ) -> Result<CommandResponse> {
            Ok(CommandResponse::ok(format!("ran {}", inv.key)))
        }
    }

    fn ctx(is_admin: bool) -> CommandContext {
        CommandContext {
            sender_id: "77".into(),
            channel_id: 1,
            is_admin,
        }
    }

    fn inv(key: &str) -> CommandInvocation {
        CommandInvocation {
            key: key.into(),
            raw_alias: key.into(),
            raw_args: String::new(),
        }
    }

    #[tokio::test]
    async fn admin_gate_blocks_privileged_commands() {
        let mut dispatcher = CommandDispatcher::new(Arc::new(CommandRegistry::builtin()));
        dispatcher.register("payout_now", Arc::new(Echo));

        let denied = dispatcher.dispatch(&ctx(false), &inv("payout_now")).await.unwrap();
        assert!(denied.text.contains("Manage Server"));

        let allowed = dispatcher.dispatch(&ctx(true), &inv("payout_now")).await.unwrap();
        assert_eq!(allowed.text, "ran payout_now");
    }

    #[tokio::test]
    async fn unprivileged_commands_run_for_anyone() {
        let mut dispatcher = CommandDispatcher::new(Arc::new(CommandRegistry::builtin()));
        dispatcher.register("status", Arc::new(Echo));

        let resp = dispatcher.dispatch(&ctx(false), &inv("status")).await.unwrap();
        assert_eq!(resp.text, "ran status");
    }
}
