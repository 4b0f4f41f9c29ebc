use std::ops::Range;

use chrono::{Local, TimeZone, Timelike};
use serde::Serialize;

use crate::{
    core::{
        sample::{Sample, SampleSeries},
        series::Average,
        topology::PhaseSeries,
    },
    quantity::power::Watts,
};

/// Hours of day that make up the peak tariff window.
///
/// The dashboard reads them in the local time zone of the host, not in UTC.
pub const PEAK_HOURS: Range<u32> = 18..21;

/// Demand within one tariff class.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct DemandClass {
    pub max: Watts,
    pub mean: Watts,
    pub samples: usize,
}

impl DemandClass {
    fn of<'a>(samples: impl IntoIterator<Item = &'a Sample>) -> Self {
        let values: Vec<f64> = samples.into_iter().map(|sample| sample.value).collect();
        Self {
            max: values.iter().copied().map(Watts).max().unwrap_or(Watts::ZERO),
            mean: Watts(values.iter().copied().mean_or_zero()),
            samples: values.len(),
        }
    }
}

/// Peak and off-peak demand over the power window.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct DemandProfile {
    pub peak: DemandClass,
    pub off_peak: DemandClass,
    pub max: Watts,
    pub mean: Watts,
    pub min: Watts,

    /// Mean power by the hour of day.
    pub hourly: [Option<Watts>; 24],
}

impl DemandProfile {
    /// Profile the power window with the hours of day taken in the time zone.
    ///
    /// Returns `None` for an empty window.
    pub fn in_time_zone<Tz: TimeZone>(power: &SampleSeries, time_zone: &Tz) -> Option<Self> {
        let max = power.values().map(Watts).max()?;
        let min = power.values().map(Watts).min()?;
        let (peak, off_peak): (Vec<&Sample>, Vec<&Sample>) = power.iter().partition(|sample| {
            PEAK_HOURS.contains(&sample.timestamp.with_timezone(time_zone).hour())
        });
        Some(Self {
            peak: DemandClass::of(peak),
            off_peak: DemandClass::of(off_peak),
            max,
            mean: Watts(power.values().mean_or_zero()),
            min,
            hourly: power
                .iter()
                .map(|sample| (sample.timestamp, Watts(sample.value)))
                .average_hourly(time_zone),
        })
    }
}

impl PhaseSeries {
    /// Demand profile of the active power window in the local time zone.
    pub fn demand(&self) -> Option<DemandProfile> {
        DemandProfile::in_time_zone(self.power(), &Local)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{FixedOffset, Utc};

    use super::*;
    use crate::core::topology::{SinglePhaseSeries, ThreePhaseSeries};

    fn at(hour: u32) -> chrono::DateTime<chrono::Utc> {
        Local.with_ymd_and_hms(2025, 1, 15, hour, 0, 0).unwrap().to_utc()
    }

    #[test]
    fn test_demand() {
        let power = SampleSeries::from(vec![
            Sample::new(at(20), 3000.0),
            Sample::new(at(18), 2000.0),
            Sample::new(at(17), 500.0),
            Sample::new(at(9), 1500.0),
        ]);
        let series = PhaseSeries::SinglePhase(SinglePhaseSeries { power, ..Default::default() });
        let profile = series.demand().unwrap();

        assert_eq!(profile.peak.samples, 2);
        assert_abs_diff_eq!(profile.peak.max.0, 3000.0);
        assert_abs_diff_eq!(profile.peak.mean.0, 2500.0);
        assert_eq!(profile.off_peak.samples, 2);
        assert_abs_diff_eq!(profile.off_peak.max.0, 1500.0);
        assert_abs_diff_eq!(profile.off_peak.mean.0, 1000.0);
        assert_abs_diff_eq!(profile.max.0, 3000.0);
        assert_abs_diff_eq!(profile.min.0, 500.0);
        assert_abs_diff_eq!(profile.mean.0, 1750.0, epsilon = 1e-9);
        assert_eq!(profile.hourly[18], Some(Watts(2000.0)));
        assert_eq!(profile.hourly[21], None);
    }

    #[test]
    fn test_hour_21_is_off_peak() {
        let power = SampleSeries::from(vec![Sample::new(at(21), 800.0)]);
        let series = PhaseSeries::SinglePhase(SinglePhaseSeries { power, ..Default::default() });
        let profile = series.demand().unwrap();
        assert_eq!(profile.peak, DemandClass::default());
        assert_eq!(profile.off_peak.samples, 1);
    }

    #[test]
    fn test_peak_hours_follow_time_zone() {
        // 21:30 UTC is 18:30 at UTC-3.
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 15, 21, 30, 0).unwrap();
        let power = SampleSeries::from(vec![Sample::new(timestamp, 1000.0)]);
        let utc_minus_3 = FixedOffset::west_opt(3 * 3600).unwrap();

        let profile = DemandProfile::in_time_zone(&power, &utc_minus_3).unwrap();
        assert_eq!(profile.peak.samples, 1);
        assert_eq!(profile.off_peak.samples, 0);
        assert_eq!(profile.hourly[18], Some(Watts(1000.0)));

        let profile = DemandProfile::in_time_zone(&power, &Utc).unwrap();
        assert_eq!(profile.peak.samples, 0);
        assert_eq!(profile.hourly[21], Some(Watts(1000.0)));
    }

    #[test]
    fn test_three_phase_uses_total_power() {
        let total_power = SampleSeries::from(vec![Sample::new(at(19), 4200.0)]);
        let series =
            PhaseSeries::ThreePhase(ThreePhaseSeries { total_power, ..Default::default() });
        assert_eq!(series.demand().unwrap().peak.samples, 1);
    }

    #[test]
    fn test_empty() {
        assert!(PhaseSeries::SinglePhase(SinglePhaseSeries::default()).demand().is_none());
    }
}
