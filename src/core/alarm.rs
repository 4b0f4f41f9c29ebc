use chrono::{DateTime, Utc};
use serde::Serialize;

/// Alarm event raised by the backend, displayed as is.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlarmEvent {
    pub timestamp: DateTime<Utc>,
    pub metric: String,
    pub value: f64,
    pub acknowledged: bool,
}
