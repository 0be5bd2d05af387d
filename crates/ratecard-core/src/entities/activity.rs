//! Activity entity - one immutable audit log entry for an admin action

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::RecordId;

/// Kind of admin action recorded in the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    UserCreated,
    UserUpdated,
    UserDeleted,
    PortCreated,
    PortUpdated,
    PortDeleted,
    RateCreated,
    RateUpdated,
    RateDeleted,
    UserLogin,
    UserLogout,
    /// Stored type this build does not recognize
    Unknown,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserCreated => "user_created",
            Self::UserUpdated => "user_updated",
            Self::UserDeleted => "user_deleted",
            Self::PortCreated => "port_created",
            Self::PortUpdated => "port_updated",
            Self::PortDeleted => "port_deleted",
            Self::RateCreated => "rate_created",
            Self::RateUpdated => "rate_updated",
            Self::RateDeleted => "rate_deleted",
            Self::UserLogin => "user_login",
            Self::UserLogout => "user_logout",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for ActivityType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "user_created" => Self::UserCreated,
            "user_updated" => Self::UserUpdated,
            "user_deleted" => Self::UserDeleted,
            "port_created" => Self::PortCreated,
            "port_updated" => Self::PortUpdated,
            "port_deleted" => Self::PortDeleted,
            "rate_created" => Self::RateCreated,
            "rate_updated" => Self::RateUpdated,
            "rate_deleted" => Self::RateDeleted,
            "user_login" => Self::UserLogin,
            "user_logout" => Self::UserLogout,
            _ => Self::Unknown,
        })
    }
}

impl From<String> for ActivityType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<ActivityType> for String {
    fn from(kind: ActivityType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User who performed an action. Absent on system-initiated activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityActor {
    pub id: RecordId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    #[serde(default)]
    pub data: Value,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<ActivityActor>,
}

impl Activity {
    pub fn new(
        id: RecordId,
        activity_type: ActivityType,
        data: Value,
        user: Option<ActivityActor>,
    ) -> Self {
        Self {
            id,
            activity_type,
            data,
            timestamp: Utc::now(),
            user,
        }
    }
}

/// One-line human readable summary of an activity
pub fn describe(activity: &Activity) -> String {
    if activity.activity_type == ActivityType::Unknown {
        return "Unknown activity".to_string();
    }
    summarize(activity.activity_type, &activity.data)
        .unwrap_or_else(|| "Activity description unavailable".to_string())
}

fn summarize(kind: ActivityType, data: &Value) -> Option<String> {
    let text = |pointer: &str| data.pointer(pointer).and_then(Value::as_str);

    let line = match kind {
        ActivityType::UserCreated => format!(
            "New user {} ({}) was created",
            text("/user_details/name")?,
            text("/user_details/role")?
        ),
        ActivityType::UserUpdated => format!("User {} was updated", text("/original/name")?),
        ActivityType::UserDeleted => format!("User {} was deleted", text("/user_details/name")?),
        ActivityType::PortCreated => format!(
            "New port {} ({}) was added",
            text("/port_details/port_name")?,
            text("/port_details/port_code")?
        ),
        ActivityType::PortUpdated => format!("Port {} was updated", text("/original/port_name")?),
        ActivityType::PortDeleted => {
            format!("Port {} was deleted", text("/port_details/port_name")?)
        }
        ActivityType::RateCreated => format!(
            "New rate was added for {} to {}",
            text("/rate_details/pol")?,
            text("/rate_details/pod")?
        ),
        ActivityType::RateUpdated => format!(
            "Rate was updated for {} to {}",
            text("/original/pol")?,
            text("/original/pod")?
        ),
        ActivityType::RateDeleted => format!(
            "Rate was deleted for {} to {}",
            text("/rate_details/pol")?,
            text("/rate_details/pod")?
        ),
        ActivityType::UserLogin => format!("User {} logged in", text("/user_email")?),
        ActivityType::UserLogout => format!("User {} logged out", text("/user_email")?),
        ActivityType::Unknown => return None,
    };
    Some(line)
}
