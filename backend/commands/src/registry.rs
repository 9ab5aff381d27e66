//! The built-in command registry.

use crate::types::CommandDef;

const BUILTIN: &[CommandDef] = &[
    CommandDef {
        key: "status",
        description: "Show your weekly receipt total, role, and salary estimate.",
        aliases: &["status"],
        admin_only: false,
    },
    CommandDef {
        key: "payout_now",
        description: "Run the weekly payout immediately and clear the week.",
        aliases: &["payout_now", "payout"],
        admin_only: true,
    },
    CommandDef {
        key: "reset_week",
        description: "Clear the current week's receipts without paying out.",
        aliases: &["reset_week"],
        admin_only: true,
    },
    CommandDef {
        key: "help",
        description: "List available commands.",
        aliases: &["help"],
        admin_only: false,
    },
];

pub struct CommandRegistry {
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    pub fn builtin() -> Self {
        Self { commands: BUILTIN.to_vec() }
    }

    pub fn all(&self) -> &[CommandDef] {
        &self.commands
    }

    /// Look up a command by one of its aliases (without the prefix).
    pub fn find_by_alias(&self, alias: &str) -> Option<&CommandDef> {
        self.commands
            .iter()
            .find(|def| def.aliases.iter().any(|a| a.eq_ignore_ascii_case(alias)))
    }

    pub fn find_by_key(&self, key: &str) -> Option<&CommandDef> {
        self.commands.iter().find(|def| def.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_case_insensitively() {
        let registry = CommandRegistry::builtin();
        assert_eq!(registry.find_by_alias("STATUS").unwrap().key, "status");
        assert_eq!(registry.find_by_alias("payout").unwrap().key, "payout_now");
        assert!(registry.find_by_alias("unknown").is_none());
    }

    #[test]
    fn privileged_commands_are_marked() {
        let registry = CommandRegistry::builtin();
        assert!(registry.find_by_key("payout_now").unwrap().admin_only);
        assert!(registry.find_by_key("reset_week").unwrap().admin_only);
        assert!(!registry.find_by_key("status").unwrap().admin_only);
    }
}
