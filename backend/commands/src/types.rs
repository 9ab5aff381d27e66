//! Text command types.

/// A command entry in the registry.
#[derive(Debug, Clone)]
pub struct CommandDef {
    /// Unique key (e.g. "status", "payout_now").
    pub key: &'static str,
    pub description: &'static str,
    /// Aliases matched after the command prefix, primary first.
    pub aliases: &'static [&'static str],
    /// Requires the Manage Guild or Administrator capability.
    pub admin_only: bool,
}

impl CommandDef {
    pub fn primary_alias(&self) -> &'static str {
        self.aliases.first().copied().unwrap_or(self.key)
    }
}

/// A detected and parsed command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub key: String,
    pub raw_alias: String,
    /// Remaining text after the command name, trimmed.
    pub raw_args: String,
}
