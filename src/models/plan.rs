use chrono::{Duration, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp format used in stored records: naive local time rendered
/// as `%Y-%m-%dT%H:%M:%SZ`, no timezone awareness.
pub mod plan_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

// Only these two kinds exist; anything else coming in from a request
// is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    Day,
    Month,
}

impl PlanKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "day" => Some(Self::Day),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
        }
    }

    /// Deadline for a plan of this kind starting at `start`: one day
    /// later for day plans, one calendar month later for month plans.
    pub fn deadline_from(&self, start: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::Day => start + Duration::days(1),
            Self::Month => start + Months::new(1),
        }
    }
}

/// An active plan. Kind, items and both timestamps live and die together:
/// a user either has all four or none of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub kind: PlanKind,
    pub items: Vec<String>,
    #[serde(with = "plan_time")]
    pub time_start: NaiveDateTime,
    #[serde(with = "plan_time")]
    pub time_final: NaiveDateTime,
}

impl Plan {
    pub fn new(kind: PlanKind, items: Vec<String>, now: NaiveDateTime) -> Self {
        Self {
            kind,
            items,
            time_start: now,
            time_final: kind.deadline_from(now),
        }
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now >= self.time_final
    }

    /// Removes the front item. Items are consumed strictly in the order
    /// they were entered.
    pub fn complete_first(&mut self) -> Option<String> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }
}

/// What the profile page sees for a given user at a given instant.
#[derive(Debug, PartialEq)]
pub enum PlanStatus<'a> {
    NoPlan,
    Active(&'a Plan),
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_kind_parse_closed_set() {
        assert_eq!(PlanKind::parse("day"), Some(PlanKind::Day));
        assert_eq!(PlanKind::parse("month"), Some(PlanKind::Month));
        assert_eq!(PlanKind::parse("week"), None);
        assert_eq!(PlanKind::parse("Day"), None);
        assert_eq!(PlanKind::parse(""), None);
    }

    #[test]
    fn test_day_deadline() {
        let start = at(2023, 5, 14);
        let plan = Plan::new(PlanKind::Day, vec!["buy milk".into()], start);
        assert_eq!(plan.time_start, start);
        assert_eq!(plan.time_final, start + Duration::days(1));
        assert!(plan.time_final > plan.time_start);
    }

    #[test]
    fn test_month_deadline_is_calendar_month() {
        let start = at(2023, 1, 31);
        let plan = Plan::new(PlanKind::Month, vec!["taxes".into()], start);
        // Jan 31 + 1 month clamps to Feb 28, not Mar 2.
        assert_eq!(plan.time_final, at(2023, 2, 28));
    }

    #[test]
    fn test_expiry_boundary() {
        let start = at(2023, 5, 14);
        let plan = Plan::new(PlanKind::Day, vec!["x".into()], start);
        assert!(!plan.is_expired(start));
        assert!(!plan.is_expired(plan.time_final - Duration::seconds(1)));
        assert!(plan.is_expired(plan.time_final));
        assert!(plan.is_expired(plan.time_final + Duration::hours(3)));
    }

    #[test]
    fn test_items_consumed_from_front() {
        let mut plan = Plan::new(
            PlanKind::Day,
            vec!["first".into(), "second".into(), "third".into()],
            at(2023, 5, 14),
        );
        assert_eq!(plan.complete_first().as_deref(), Some("first"));
        assert_eq!(plan.complete_first().as_deref(), Some("second"));
        assert_eq!(plan.items, vec!["third".to_string()]);
        assert_eq!(plan.complete_first().as_deref(), Some("third"));
        assert_eq!(plan.complete_first(), None);
    }

    #[test]
    fn test_timestamp_wire_format() {
        let plan = Plan::new(PlanKind::Day, vec!["x".into()], at(2023, 5, 14));
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"2023-05-14T09:30:00Z\""));
        assert!(json.contains("\"2023-05-15T09:30:00Z\""));
    }
}
