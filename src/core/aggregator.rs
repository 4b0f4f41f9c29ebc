//! Instantaneous and window-averaged values of a refresh cycle.
//!
//! Apparent power of a three-phase system is the arithmetic sum of the per-phase `Vₖ·Iₖ`.
//! This is not the vector apparent power, and it overestimates the latter under unbalanced loads.

use serde::Serialize;

use crate::{
    core::{
        energy::{EnergyEstimate, EnergySource},
        phase::Phases,
        sample::SampleSeries,
        series::Average,
        topology::{PhaseSeries, SinglePhaseSeries, ThreePhaseSeries},
    },
    quantity::{
        cost::Cost,
        electric::{Amperes, VoltAmperes, Volts},
        energy::KilowattHours,
        power::Watts,
        rate::KilowattHourRate,
        ratios::PowerFactor,
    },
};

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct LiveMetrics {
    pub voltage: Volts,
    pub current: Amperes,
    pub power: Watts,
    pub apparent_power: VoltAmperes,
    pub power_factor: PowerFactor,
    pub energy: KilowattHours,
    pub energy_source: EnergySource,
    pub cost: Cost,
    pub averages: Averages,

    /// Per-phase readings, only for three-phase installations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phases: Option<PhaseMetrics>,
}

#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct Averages {
    pub voltage: Volts,
    pub current: Amperes,
    pub power: Watts,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PhaseMetrics {
    pub voltage: Phases<Volts>,
    pub current: Phases<Amperes>,
    pub power: Phases<Watts>,
    pub apparent_power: Phases<VoltAmperes>,
}

impl PhaseSeries {
    /// Derive the live metrics. Empty series degrade to zeros.
    pub fn aggregate(&self, unit_price: KilowattHourRate) -> LiveMetrics {
        let energy = EnergyEstimate::settle(self.power(), self.energy());
        let live = match self {
            Self::SinglePhase(series) => series.aggregate(),
            Self::ThreePhase(series) => series.aggregate(),
        };
        LiveMetrics {
            energy: energy.energy,
            energy_source: energy.source,
            cost: energy.cost(unit_price),
            ..live
        }
    }
}

impl SinglePhaseSeries {
    fn aggregate(&self) -> LiveMetrics {
        let voltage = Volts(self.voltage.latest_value());
        let current = Amperes(self.current.latest_value());
        let power = Watts(self.power.latest_value());
        let apparent_power = voltage * current;
        LiveMetrics {
            voltage,
            current,
            power,
            apparent_power,
            power_factor: power / apparent_power,
            energy: KilowattHours::ZERO,
            energy_source: EnergySource::Unavailable,
            cost: Cost::ZERO,
            averages: Averages {
                voltage: Volts(mean(&self.voltage)),
                current: Amperes(mean(&self.current)),
                power: Watts(mean(&self.power)),
            },
            phases: None,
        }
    }
}

impl ThreePhaseSeries {
    fn aggregate(&self) -> LiveMetrics {
        let voltage = self.voltage.map(|series| Volts(series.latest_value()));
        let current = self.current.map(|series| Amperes(series.latest_value()));
        let power = self.power.map(|series| Watts(series.latest_value()));
        let apparent_power = voltage.zip(&current, |voltage, current| *voltage * *current);

        let total_apparent_power = apparent_power.l1 + apparent_power.l2 + apparent_power.l3;
        let total_power = if self.total_power.is_empty() {
            power.l1 + power.l2 + power.l3
        } else {
            Watts(self.total_power.latest_value())
        };

        let mean_voltage = self.voltage.map(mean);
        let mean_current = self.current.map(mean);
        let mean_power = if self.total_power.is_empty() {
            self.power.map(mean).sum()
        } else {
            mean(&self.total_power)
        };

        LiveMetrics {
            voltage: (voltage.l1 + voltage.l2 + voltage.l3) / 3.0,
            current: current.l1 + current.l2 + current.l3,
            power: total_power,
            apparent_power: total_apparent_power,
            power_factor: total_power / total_apparent_power,
            energy: KilowattHours::ZERO,
            energy_source: EnergySource::Unavailable,
            cost: Cost::ZERO,
            averages: Averages {
                voltage: Volts(mean_voltage.sum() / 3.0),
                current: Amperes(mean_current.sum()),
                power: Watts(mean_power),
            },
            phases: Some(PhaseMetrics { voltage, current, power, apparent_power }),
        }
    }
}

impl Phases<f64> {
    fn sum(&self) -> f64 {
        self.l1 + self.l2 + self.l3
    }
}

fn mean(series: &SampleSeries) -> f64 {
    series.values().mean_or_zero()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use approx::assert_abs_diff_eq;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    use super::*;
    use crate::core::{
        sample::{Metric, Sample},
        topology::Topology,
    };

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap()
    }

    /// Build a descending series from the values given newest first, one minute apart.
    fn series(values: &[f64]) -> SampleSeries {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| Sample::new(start() - TimeDelta::minutes(index as i64), *value))
            .collect()
    }

    fn single_phase(voltage: &[f64], current: &[f64], power: &[f64]) -> PhaseSeries {
        PhaseSeries::SinglePhase(SinglePhaseSeries {
            voltage: series(voltage),
            current: series(current),
            power: series(power),
            energy: SampleSeries::default(),
        })
    }

    #[test]
    fn test_single_phase() {
        let live = single_phase(&[230.0, 220.0], &[0.5, 0.3], &[100.0, 80.0])
            .aggregate(KilowattHourRate(0.65));
        assert_abs_diff_eq!(live.apparent_power.0, 115.0);
        assert_abs_diff_eq!(live.power_factor.0, 100.0 / 115.0);
        assert_abs_diff_eq!(live.averages.voltage.0, 225.0);
        assert_abs_diff_eq!(live.averages.current.0, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(live.averages.power.0, 90.0);
        // (100 + 80) / 2 W over one minute:
        assert_abs_diff_eq!(live.energy.0, 0.0015, epsilon = 1e-12);
        assert_eq!(live.energy_source, EnergySource::Integrated);
        assert_abs_diff_eq!(live.cost.0, 0.0015 * 0.65, epsilon = 1e-12);
        assert!(live.phases.is_none());
    }

    #[test]
    fn test_negative_power() {
        let live = single_phase(&[230.0], &[1.0], &[-115.0]).aggregate(KilowattHourRate(0.65));
        assert_abs_diff_eq!(live.power_factor.0, 0.5);
    }

    #[test]
    fn test_empty_series() {
        let live = single_phase(&[], &[], &[]).aggregate(KilowattHourRate(0.65));
        assert_eq!(live.voltage, Volts(0.0));
        assert_eq!(live.power_factor, PowerFactor::ZERO);
        assert_eq!(live.averages, Averages::default());
        assert_eq!(live.energy_source, EnergySource::Unavailable);
    }

    #[test]
    fn test_power_factor_in_range() {
        for (voltage, current, power) in
            [(230.0, 1.0, 500.0), (230.0, 1.0, -500.0), (0.0, 1.0, 10.0), (-230.0, 1.0, 10.0)]
        {
            let live =
                single_phase(&[voltage], &[current], &[power]).aggregate(KilowattHourRate(1.0));
            assert!((0.0..=1.0).contains(&live.power_factor.0), "{voltage} {current} {power}");
        }
    }

    #[test]
    fn test_three_phase() {
        let fetched = HashMap::from([
            (Metric::VoltageL1, series(&[230.0, 226.0])),
            (Metric::VoltageL2, series(&[231.0])),
            (Metric::VoltageL3, series(&[229.0])),
            (Metric::CurrentL1, series(&[1.0, 3.0])),
            (Metric::CurrentL2, series(&[2.0])),
            (Metric::CurrentL3, series(&[3.0])),
            (Metric::PowerL1, series(&[200.0])),
            (Metric::PowerL2, series(&[400.0])),
            (Metric::PowerL3, series(&[600.0])),
            (Metric::PowerTotal, series(&[1200.0, 1000.0])),
        ]);
        let live = PhaseSeries::assemble(Topology::ThreePhase, fetched)
            .aggregate(KilowattHourRate(0.5));

        assert_abs_diff_eq!(live.voltage.0, 230.0);
        assert_abs_diff_eq!(live.current.0, 6.0);
        assert_abs_diff_eq!(live.power.0, 1200.0);
        assert_abs_diff_eq!(live.apparent_power.0, 230.0 + 462.0 + 687.0);
        assert_abs_diff_eq!(live.power_factor.0, 1200.0 / 1379.0);
        assert_abs_diff_eq!(live.averages.voltage.0, (228.0 + 231.0 + 229.0) / 3.0);
        assert_abs_diff_eq!(live.averages.current.0, 2.0 + 2.0 + 3.0);
        assert_abs_diff_eq!(live.averages.power.0, 1100.0);

        let phases = live.phases.unwrap();
        assert_abs_diff_eq!(phases.apparent_power.l2.0, 462.0);
        assert_abs_diff_eq!(phases.power.l3.0, 600.0);
    }

    #[test]
    fn test_three_phase_without_total() {
        let fetched = HashMap::from([
            (Metric::PowerL1, series(&[100.0, 300.0])),
            (Metric::PowerL2, series(&[100.0])),
            (Metric::PowerL3, series(&[100.0])),
        ]);
        let live = PhaseSeries::assemble(Topology::ThreePhase, fetched)
            .aggregate(KilowattHourRate(0.5));
        assert_abs_diff_eq!(live.power.0, 300.0);
        assert_abs_diff_eq!(live.averages.power.0, 400.0);
        assert_eq!(live.power_factor, PowerFactor::ZERO);
    }

    #[test]
    fn test_idempotent() {
        let series = single_phase(&[230.0, 229.0], &[0.4, 0.5], &[90.0, 95.0]);
        assert_eq!(
            series.aggregate(KilowattHourRate(0.65)),
            series.aggregate(KilowattHourRate(0.65)),
        );
    }
}
