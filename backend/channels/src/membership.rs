//! Role membership lookups over the Discord REST API.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::id::{GuildId, UserId};
use tracing::debug;

use tallyforge_core::Membership;

pub struct DiscordMembership {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl DiscordMembership {
    pub fn new(token: &str, guild_id: u64) -> Self {
        Self {
            http: Arc::new(Http::new(token)),
            guild_id: GuildId::new(guild_id),
        }
    }

    pub fn from_http(http: Arc<Http>, guild_id: u64) -> Self {
        Self { http, guild_id: GuildId::new(guild_id) }
    }
}

#[async_trait]
impl Membership for DiscordMembership {
    async fn role_labels_of(&self, user_id: &str) -> Result<HashSet<String>> {
        let uid: u64 = user_id
            .parse()
            .with_context(|| format!("Non-numeric Discord user id: {user_id}"))?;

        // Unknown user or left the guild: no roles, not an error.
        let member = match self.guild_id.member(&self.http, UserId::new(uid)).await {
            Ok(member) => member,
            Err(e) => {
                debug!(user_id, error = %e, "Member lookup came back empty");
                return Ok(HashSet::new());
            }
        };

        let guild_roles = self
            .guild_id
            .roles(&self.http)
            .await
            .context("Failed to fetch guild roles")?;

        Ok(member
            .roles
            .iter()
            .filter_map(|role_id| guild_roles.get(role_id).map(|role| role.name.clone()))
            .collect())
    }
}
