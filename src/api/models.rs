//! Wire rows of the metrics backend.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, de};
use serde_with::serde_as;

use crate::core::{
    alarm::AlarmEvent,
    sample::{Sample, SampleSeries},
};

/// Measurements as listed by the API. Rows that fail to deserialize are skipped.
#[must_use]
#[serde_as]
#[derive(Deserialize, derive_more::Deref)]
pub struct Measurements(#[serde_as(as = "serde_with::VecSkipError<_>")] Vec<Measurement>);

#[derive(Deserialize)]
pub struct Measurement {
    #[serde(deserialize_with = "deserialize_timestamp")]
    timestamp: DateTime<Utc>,

    value: f64,
}

impl From<Measurements> for SampleSeries {
    fn from(measurements: Measurements) -> Self {
        measurements
            .0
            .into_iter()
            .map(|measurement| Sample::new(measurement.timestamp, measurement.value))
            .collect()
    }
}

#[must_use]
#[serde_as]
#[derive(Deserialize, derive_more::Deref)]
pub struct AlarmEvents(#[serde_as(as = "serde_with::VecSkipError<_>")] Vec<AlarmEventRow>);

#[derive(Deserialize)]
pub struct AlarmEventRow {
    #[serde(deserialize_with = "deserialize_timestamp")]
    timestamp: DateTime<Utc>,

    metric: String,
    value: f64,

    #[serde(default)]
    acknowledged: bool,
}

impl From<AlarmEvents> for Vec<AlarmEvent> {
    fn from(events: AlarmEvents) -> Self {
        events
            .0
            .into_iter()
            .map(|row| AlarmEvent {
                timestamp: row.timestamp,
                metric: row.metric,
                value: row.value,
                acknowledged: row.acknowledged,
            })
            .collect()
    }
}

/// Parse RFC 3339, or a naive ISO 8601 timestamp which the backend stores in UTC.
fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let text = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|timestamp| timestamp.to_utc())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|timestamp| timestamp.and_utc())
        })
        .map_err(|error| de::Error::custom(format!("invalid timestamp `{text}`: {error}")))
}
