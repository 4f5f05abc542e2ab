use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::plan::{Plan, PlanKind};

/// Session key the in-flight wizard is stored under. The accumulation
/// buffer is scoped to one session: two browsers entering items at the
/// same time never see each other's half-built plans.
pub const WIZARD_SESSION_KEY: &str = "plan_wizard";

/// An in-flight plan creation: the kind was chosen, `remaining` items
/// are still to be entered, `items` holds what came in so far in
/// submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    pub kind: PlanKind,
    pub remaining: u8,
    pub items: Vec<String>,
}

impl WizardState {
    pub fn new(kind: PlanKind) -> Self {
        Self {
            kind,
            remaining: 0,
            items: Vec::new(),
        }
    }

    /// True once the target count was set and an item is still owed.
    pub fn is_collecting(&self) -> bool {
        self.remaining > 0
    }

    pub fn set_count(&mut self, count: u8) {
        self.remaining = count;
        self.items.clear();
    }

    /// Appends one item and decrements the owed count. Callers check
    /// `is_collecting` first; pushing past the target is a no-op.
    pub fn push_item(&mut self, text: String) {
        if self.remaining == 0 {
            return;
        }
        self.items.push(text);
        self.remaining -= 1;
    }

    /// Turns the collected buffer into a plan starting now.
    pub fn into_plan(self, now: NaiveDateTime) -> Plan {
        Plan::new(self.kind, self.items, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 5, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_collects_exactly_n_items_in_order() {
        let mut wizard = WizardState::new(PlanKind::Day);
        assert!(!wizard.is_collecting());

        wizard.set_count(2);
        wizard.push_item("buy milk".into());
        assert!(wizard.is_collecting());
        wizard.push_item("call mom".into());
        assert!(!wizard.is_collecting());

        let plan = wizard.into_plan(noon());
        assert_eq!(plan.items, vec!["buy milk".to_string(), "call mom".to_string()]);
        assert_eq!(plan.time_final, noon() + Duration::days(1));
    }

    #[test]
    fn test_push_past_target_is_ignored() {
        let mut wizard = WizardState::new(PlanKind::Month);
        wizard.set_count(1);
        wizard.push_item("one".into());
        wizard.push_item("two".into());
        assert_eq!(wizard.items, vec!["one".to_string()]);
    }

    #[test]
    fn test_set_count_restarts_collection() {
        let mut wizard = WizardState::new(PlanKind::Day);
        wizard.set_count(2);
        wizard.push_item("stale".into());
        wizard.set_count(1);
        assert!(wizard.items.is_empty());
        assert_eq!(wizard.remaining, 1);
    }
}
