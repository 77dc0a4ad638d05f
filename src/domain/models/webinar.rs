use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WebinarStatus {
    Scheduled,
    Live,
    Completed,
    Cancelled,
}

impl WebinarStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebinarStatus::Scheduled => "scheduled",
            WebinarStatus::Live => "live",
            WebinarStatus::Completed => "completed",
            WebinarStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(WebinarStatus::Scheduled),
            "live" => Some(WebinarStatus::Live),
            "completed" => Some(WebinarStatus::Completed),
            "cancelled" => Some(WebinarStatus::Cancelled),
            _ => None,
        }
    }
}

/// A scheduled webinar. Owned by the webinar management service; this crate only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webinar {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub presenter_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub reminders_enabled: bool,
    pub status: WebinarStatus,
    pub recording_url: Option<String>,
}

impl Webinar {
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.scheduled_at + Duration::minutes(i64::from(self.duration_minutes))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Registered,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "registered" => Some(RegistrationStatus::Registered),
            "cancelled" => Some(RegistrationStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    pub webinar_id: Uuid,
    pub name: String,
    pub email: String,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
}
