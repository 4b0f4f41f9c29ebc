use std::ops::RangeInclusive;

use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::core::{phase::Phases, sample::SampleSeries, topology::PhaseSeries};

/// Descriptive statistics over one series window.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub mean: f64,

    /// Sample standard deviation, zero for fewer than two samples.
    pub std_dev: f64,

    pub min: f64,
    pub max: f64,

    /// Process capability index within the natural limits, `mean ± 3σ`.
    ///
    /// That is one for any spread, and zero when there is none.
    pub cpk: f64,
}

impl SeriesSummary {
    pub fn of(series: &SampleSeries) -> Self {
        let variance: average::Variance = series.values().collect();
        let (min, max) = match series.values().minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => (0.0, 0.0),
            MinMaxResult::OneElement(value) => (value, value),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        let mean = if series.is_empty() { 0.0 } else { variance.mean() };
        let std_dev = if series.len() < 2 { 0.0 } else { variance.sample_variance().sqrt() };
        let natural_limits = 3.0_f64.mul_add(-std_dev, mean)..=3.0_f64.mul_add(std_dev, mean);
        Self {
            count: series.len(),
            mean,
            std_dev,
            min,
            max,
            cpk: capability_index(mean, std_dev, natural_limits),
        }
    }
}

/// Process capability index `Cpk` of a normal process within the specification limits.
///
/// Zero for a process without spread.
#[must_use]
pub fn capability_index(mean: f64, std_dev: f64, limits: RangeInclusive<f64>) -> f64 {
    if std_dev > 0.0 {
        ((limits.end() - mean) / (3.0 * std_dev)).min((mean - limits.start()) / (3.0 * std_dev))
    } else {
        0.0
    }
}

/// Summary of a labelled series.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NamedSummary {
    pub name: String,
    pub unit: &'static str,

    #[serde(flatten)]
    pub summary: SeriesSummary,
}

impl NamedSummary {
    fn new(name: impl Into<String>, unit: &'static str, series: &SampleSeries) -> Self {
        Self { name: name.into(), unit, summary: SeriesSummary::of(series) }
    }

    fn per_phase(
        quantity: &str,
        unit: &'static str,
        series: &Phases<SampleSeries>,
    ) -> impl Iterator<Item = Self> {
        series
            .iter()
            .map(move |(phase, series)| Self::new(format!("{quantity} {phase}"), unit, series))
    }
}

impl PhaseSeries {
    /// Summaries of every scalar series of the window.
    #[must_use]
    pub fn summarize(&self) -> Vec<NamedSummary> {
        match self {
            Self::SinglePhase(series) => vec![
                NamedSummary::new("Voltage", "V", &series.voltage),
                NamedSummary::new("Current", "A", &series.current),
                NamedSummary::new("Power", "W", &series.power),
            ],
            Self::ThreePhase(series) => NamedSummary::per_phase("Voltage", "V", &series.voltage)
                .chain(NamedSummary::per_phase("Current", "A", &series.current))
                .chain(NamedSummary::per_phase("Power", "W", &series.power))
                .chain([NamedSummary::new("Total power", "W", &series.total_power)])
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{TimeDelta, Utc};

    use super::*;
    use crate::core::{
        sample::Sample,
        topology::{SinglePhaseSeries, ThreePhaseSeries},
    };

    fn series(values: &[f64]) -> SampleSeries {
        let now = Utc::now();
        values
            .iter()
            .zip(0..)
            .map(|(value, age)| Sample::new(now - TimeDelta::seconds(age), *value))
            .collect()
    }

    #[test]
    fn test_summary() {
        let summary = SeriesSummary::of(&series(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]));
        assert_eq!(summary.count, 8);
        assert_abs_diff_eq!(summary.mean, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.std_dev, (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(summary.min, 2.0);
        assert_abs_diff_eq!(summary.max, 9.0);
    }

    #[test]
    fn test_cpk_within_natural_limits() {
        let summary = SeriesSummary::of(&series(&[229.0, 231.0, 230.0, 232.0]));
        assert_abs_diff_eq!(summary.cpk, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(SeriesSummary::of(&series(&[230.0, 230.0])).cpk, 0.0);
    }

    #[test]
    fn test_capability_index() {
        // Off-centre process: the upper limit is the closer one.
        assert_abs_diff_eq!(capability_index(230.0, 2.0, 207.0..=242.0), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(capability_index(230.0, 2.0, 224.0..=236.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(capability_index(230.0, 0.0, 207.0..=253.0), 0.0);
    }

    #[test]
    fn test_single_sample() {
        let summary = SeriesSummary::of(&series(&[230.0]));
        assert_eq!(summary.count, 1);
        assert_abs_diff_eq!(summary.std_dev, 0.0);
        assert_abs_diff_eq!(summary.min, 230.0);
        assert_abs_diff_eq!(summary.max, 230.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(SeriesSummary::of(&SampleSeries::default()), SeriesSummary::default());
    }

    #[test]
    fn test_summarize_names() {
        let single = PhaseSeries::SinglePhase(SinglePhaseSeries::default()).summarize();
        assert_eq!(single.len(), 3);

        let three = PhaseSeries::ThreePhase(ThreePhaseSeries::default()).summarize();
        let names: Vec<_> = three.iter().map(|summary| summary.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Voltage L1",
                "Voltage L2",
                "Voltage L3",
                "Current L1",
                "Current L2",
                "Current L3",
                "Power L1",
                "Power L2",
                "Power L3",
                "Total power",
            ]
        );
    }
}
