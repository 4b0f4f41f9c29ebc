use std::slice::Iter;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metric names as requested from the metrics API.
#[derive(Debug, Hash, Serialize, enumset::EnumSetType)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Voltage,
    Current,
    Power,

    /// Cumulative energy counter reported by the meter itself, in watt-hours.
    EnergyWh,

    VoltageL1,
    VoltageL2,
    VoltageL3,
    CurrentL1,
    CurrentL2,
    CurrentL3,
    PowerL1,
    PowerL2,
    PowerL3,
    PowerTotal,
}

impl Metric {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Voltage => "voltage",
            Self::Current => "current",
            Self::Power => "power",
            Self::EnergyWh => "energy_wh",
            Self::VoltageL1 => "voltage_l1",
            Self::VoltageL2 => "voltage_l2",
            Self::VoltageL3 => "voltage_l3",
            Self::CurrentL1 => "current_l1",
            Self::CurrentL2 => "current_l2",
            Self::CurrentL3 => "current_l3",
            Self::PowerL1 => "power_l1",
            Self::PowerL2 => "power_l2",
            Self::PowerL3 => "power_l3",
            Self::PowerTotal => "power_total",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Sample {
    pub const fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Samples of a single metric, newest first, as the API returns them.
///
/// The order is not re-validated: consumers that need the chronological order reverse it.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, derive_more::From)]
pub struct SampleSeries(Vec<Sample>);

impl FromIterator<Sample> for SampleSeries {
    fn from_iter<T: IntoIterator<Item = Sample>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl SampleSeries {
    pub fn iter(&self) -> Iter<'_, Sample> {
        self.0.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The instantaneous reading, that is the first sample.
    #[must_use]
    pub fn latest(&self) -> Option<Sample> {
        self.0.first().copied()
    }

    /// Value of the latest sample, zero if there is none.
    #[must_use]
    pub fn latest_value(&self) -> f64 {
        self.latest().map_or(0.0, |sample| sample.value)
    }

    /// Iterate the samples in the chronological order.
    pub fn chronological(&self) -> impl Iterator<Item = &Sample> {
        self.0.iter().rev()
    }

    /// Iterate over the bare values, newest first.
    pub fn values(&self) -> impl Iterator<Item = f64> {
        self.0.iter().map(|sample| sample.value)
    }
}
