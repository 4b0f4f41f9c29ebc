use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use serde_with::serde_as;

use crate::core::sample::SampleSeries;

/// A device is online while its latest sample is younger than this.
pub const STALENESS_THRESHOLD_SECONDS: i64 = 60;

#[serde_as]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeviceStatus {
    Online {
        last_seen: DateTime<Utc>,
    },

    Offline {
        last_seen: DateTime<Utc>,

        #[serde_as(as = "serde_with::DurationSeconds<i64>")]
        #[serde(rename = "age_seconds")]
        age: TimeDelta,
    },

    NoData,
}

impl DeviceStatus {
    /// Classify by the latest sample of the first non-empty series.
    pub fn classify<'a>(
        series: impl IntoIterator<Item = &'a SampleSeries>,
        now: DateTime<Utc>,
    ) -> Self {
        let Some(last_seen) =
            series.into_iter().find_map(SampleSeries::latest).map(|sample| sample.timestamp)
        else {
            return Self::NoData;
        };
        let age = (now - last_seen).max(TimeDelta::zero());
        if age < TimeDelta::seconds(STALENESS_THRESHOLD_SECONDS) {
            Self::Online { last_seen }
        } else {
            Self::Offline { last_seen, age }
        }
    }

    #[must_use]
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Online { .. })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::core::sample::Sample;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap()
    }

    fn seen_ago(seconds: i64) -> SampleSeries {
        SampleSeries::from(vec![Sample::new(now() - TimeDelta::seconds(seconds), 230.0)])
    }

    #[test]
    fn test_online() {
        let status = DeviceStatus::classify([&seen_ago(59)], now());
        assert!(status.is_online());
    }

    #[test]
    fn test_offline() {
        let status = DeviceStatus::classify([&seen_ago(61)], now());
        assert_eq!(
            status,
            DeviceStatus::Offline {
                last_seen: now() - TimeDelta::seconds(61),
                age: TimeDelta::seconds(61)
            }
        );
    }

    #[test]
    fn test_no_data() {
        let empty = SampleSeries::default();
        assert_eq!(DeviceStatus::classify([&empty, &empty, &empty], now()), DeviceStatus::NoData);
    }

    #[test]
    fn test_priority() {
        let empty = SampleSeries::default();
        let status = DeviceStatus::classify([&empty, &seen_ago(120), &seen_ago(1)], now());
        assert!(!status.is_online(), "current has priority over power");
    }

    #[test]
    fn test_future_sample_is_online() {
        let status = DeviceStatus::classify([&seen_ago(-30)], now());
        assert!(status.is_online());
    }

    #[test]
    fn test_serialize_offline() -> anyhow::Result<()> {
        let status = DeviceStatus::classify([&seen_ago(90)], now());
        let json = serde_json::to_value(status)?;
        assert_eq!(json["status"], "offline");
        assert_eq!(json["age_seconds"], 90);
        Ok(())
    }
}
