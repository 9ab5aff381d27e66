//! Command detection — identify prefixed commands in inbound messages.

use crate::registry::CommandRegistry;
use crate::types::CommandInvocation;

/// Detect a command at the start of a message.
/// Returns `None` for normal messages and unknown aliases.
pub fn detect_command(
    text: &str,
    prefix: &str,
    registry: &CommandRegistry,
) -> Option<CommandInvocation> {
    let trimmed = text.trim();
    let rest = trimmed.strip_prefix(prefix)?;

    let (alias, args) = rest
        .split_once(|c: char| c.is_whitespace())
        .map(|(a, r)| (a, r.trim()))
        .unwrap_or((rest, ""));

    let def = registry.find_by_alias(alias)?;

    Some(CommandInvocation {
        key: def.key.to_string(),
        raw_alias: alias.to_string(),
        raw_args: args.to_string(),
    })
}
