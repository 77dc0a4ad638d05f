use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::EmailCategory;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRecipient {
    pub email: String,
    #[serde(default)]
    pub template_vars: HashMap<String, String>,
}

/// The reminders a webinar registrant receives ahead of the start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    DayBefore,
    HourBefore,
}

impl ReminderKind {
    pub fn window(&self) -> ReminderWindow {
        match self {
            ReminderKind::DayBefore => ReminderWindow {
                lead: Duration::hours(24),
                tolerance: Duration::minutes(15),
            },
            ReminderKind::HourBefore => ReminderWindow {
                lead: Duration::hours(1),
                tolerance: Duration::minutes(15),
            },
        }
    }

    pub fn category(&self) -> EmailCategory {
        match self {
            ReminderKind::DayBefore => EmailCategory::Reminder24h,
            ReminderKind::HourBefore => EmailCategory::Reminder1h,
        }
    }
}

/// Start times due for a reminder on this tick: `[now + lead - tolerance, now + lead + tolerance]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindow {
    pub lead: Duration,
    pub tolerance: Duration,
}

impl ReminderWindow {
    pub fn bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let target = now + self.lead;
        (target - self.tolerance, target + self.tolerance)
    }

    pub fn contains(&self, now: DateTime<Utc>, at: DateTime<Utc>) -> bool {
        let (from, to) = self.bounds(now);
        from <= at && at <= to
    }
}
