//! Payroll roles and percentage resolution.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The payroll roles, in strict priority order (strongest first).
///
/// A user may hold several Discord roles; only the highest-priority known
/// label determines the payout percentage. Unknown labels are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    OriginalBoss,
    ViceBoss,
    Manager,
    Worker,
    Delivery,
}

impl Role {
    /// Priority order used for resolution, strongest role first.
    pub const PRIORITY: [Role; 5] = [
        Role::OriginalBoss,
        Role::ViceBoss,
        Role::Manager,
        Role::Worker,
        Role::Delivery,
    ];

    /// The Discord role name this payroll role matches against.
    pub fn label(&self) -> &'static str {
        match self {
            Role::OriginalBoss => "Original Boss",
            Role::ViceBoss => "Vice Boss",
            Role::Manager => "Manager",
            Role::Worker => "Worker",
            Role::Delivery => "Delivery",
        }
    }

    /// Fraction of the weekly total awarded to holders of this role.
    pub fn percentage(&self) -> f64 {
        match self {
            Role::OriginalBoss => 0.30,
            Role::ViceBoss => 0.25,
            Role::Manager => 0.20,
            Role::Worker => 0.15,
            Role::Delivery => 0.10,
        }
    }

    /// Percentage as a whole number, for display.
    pub fn percent_display(&self) -> u32 {
        (self.percentage() * 100.0).round() as u32
    }

    /// Resolve a user's set of held role labels to the highest-priority
    /// known role. Returns `None` when the user holds none of the known
    /// labels, which pays out at 0%.
    pub fn resolve(labels: &HashSet<String>) -> Option<Role> {
        Role::PRIORITY
            .iter()
            .copied()
            .find(|role| labels.contains(role.label()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_single_known_role() {
        assert_eq!(Role::resolve(&labels(&["Worker"])), Some(Role::Worker));
    }

    #[test]
    fn ties_break_by_priority_not_percentage() {
        // Manager outranks Delivery regardless of how the set iterates.
        assert_eq!(
            Role::resolve(&labels(&["Delivery", "Manager"])),
            Some(Role::Manager)
        );
        assert_eq!(
            Role::resolve(&labels(&["Worker", "Original Boss"])),
            Some(Role::OriginalBoss)
        );
    }

    #[test]
    fn unknown_labels_are_ignored() {
        assert_eq!(Role::resolve(&labels(&["Moderator", "DJ"])), None);
        assert_eq!(
            Role::resolve(&labels(&["Moderator", "Delivery"])),
            Some(Role::Delivery)
        );
    }

    #[test]
    fn empty_set_resolves_to_none() {
        assert_eq!(Role::resolve(&HashSet::new()), None);
    }

    #[test]
    fn percentages_match_the_payout_table() {
        assert_eq!(Role::OriginalBoss.percent_display(), 30);
        assert_eq!(Role::ViceBoss.percent_display(), 25);
        assert_eq!(Role::Manager.percent_display(), 20);
        assert_eq!(Role::Worker.percent_display(), 15);
        assert_eq!(Role::Delivery.percent_display(), 10);
    }
}
