use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::plan::{Plan, PlanStatus};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub login_hash: String,     // bcrypt digest of the login code
    pub password_hash: String,  // bcrypt digest of the password
    pub plan: Option<Plan>,
}

impl User {
    pub fn new(name: String, email: String, login_hash: String, password_hash: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            login_hash,
            password_hash,
            plan: None,
        }
    }

    /// Installs a freshly committed plan. Rejected if one is already
    /// in place; the stored plan is left untouched in that case.
    pub fn start_plan(&mut self, plan: Plan) -> Result<(), Plan> {
        if self.plan.is_some() {
            return Err(plan);
        }
        self.plan = Some(plan);
        Ok(())
    }

    pub fn plan_status(&self, now: NaiveDateTime) -> PlanStatus<'_> {
        match &self.plan {
            None => PlanStatus::NoPlan,
            Some(plan) if plan.is_expired(now) => PlanStatus::Expired,
            Some(plan) => PlanStatus::Active(plan),
        }
    }

    /// Marks the front item done. Emptying the list clears the plan
    /// entirely, deadline included.
    pub fn complete_first_item(&mut self) -> Option<String> {
        let plan = self.plan.as_mut()?;
        let done = plan.complete_first();
        if plan.items.is_empty() {
            self.plan = None;
        }
        done
    }

    pub fn clear_plan(&mut self) {
        self.plan = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::PlanKind;
    use chrono::{Duration, NaiveDate};

    fn test_user() -> User {
        User::new(
            "al".into(),
            "a@x.com".into(),
            "$2b$12$loginhash".into(),
            "$2b$12$passwordhash".into(),
        )
    }

    fn noon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 5, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_user_has_no_plan() {
        let user = test_user();
        assert!(user.plan.is_none());
        assert_eq!(user.plan_status(noon()), PlanStatus::NoPlan);
    }

    #[test]
    fn test_start_plan_rejected_when_one_exists() {
        let mut user = test_user();
        let first = Plan::new(PlanKind::Day, vec!["buy milk".into()], noon());
        user.start_plan(first.clone()).unwrap();

        let second = Plan::new(PlanKind::Month, vec!["other".into()], noon());
        assert!(user.start_plan(second).is_err());
        // The stored plan is untouched by the rejected attempt.
        assert_eq!(user.plan.as_ref(), Some(&first));
    }

    #[test]
    fn test_status_flips_to_expired_at_deadline() {
        let mut user = test_user();
        user.start_plan(Plan::new(PlanKind::Day, vec!["x".into()], noon()))
            .unwrap();
        assert!(matches!(user.plan_status(noon()), PlanStatus::Active(_)));
        assert_eq!(
            user.plan_status(noon() + Duration::days(1)),
            PlanStatus::Expired
        );
    }

    #[test]
    fn test_completing_last_item_clears_everything() {
        let mut user = test_user();
        user.start_plan(Plan::new(
            PlanKind::Day,
            vec!["buy milk".into(), "call mom".into()],
            noon(),
        ))
        .unwrap();

        assert_eq!(user.complete_first_item().as_deref(), Some("buy milk"));
        assert!(user.plan.is_some());
        assert_eq!(user.complete_first_item().as_deref(), Some("call mom"));
        assert!(user.plan.is_none());
        assert_eq!(user.complete_first_item(), None);
    }

    #[test]
    fn test_clear_plan_is_idempotent() {
        let mut user = test_user();
        user.start_plan(Plan::new(PlanKind::Day, vec!["x".into()], noon()))
            .unwrap();
        user.clear_plan();
        let cleared = user.clone();
        user.clear_plan();
        assert!(user.plan.is_none());
        assert_eq!(user.plan, cleared.plan);
    }
}
