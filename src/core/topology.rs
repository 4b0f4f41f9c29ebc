use std::collections::HashMap;

use enumset::{EnumSet, enum_set};
use serde::Serialize;

use crate::core::{
    phase::{Phase, Phases},
    sample::{Metric, SampleSeries},
};

/// Wiring of the monitored installation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    SinglePhase,
    ThreePhase,
}

impl Topology {
    /// Metric probed with a single-sample request before the batch fetch.
    pub const PROBE: Metric = Metric::VoltageL1;

    /// Decide the topology from the `voltage_l1` probe.
    ///
    /// Anything but a non-empty probe, including a failed one, means single-phase.
    pub fn detect(probe: Option<&SampleSeries>) -> Self {
        match probe {
            Some(series) if !series.is_empty() => Self::ThreePhase,
            _ => Self::SinglePhase,
        }
    }

    /// Metrics to fetch for a refresh cycle.
    #[must_use]
    pub const fn metrics(self) -> EnumSet<Metric> {
        match self {
            Self::SinglePhase => {
                enum_set!(Metric::Voltage | Metric::Current | Metric::Power | Metric::EnergyWh)
            }
            Self::ThreePhase => enum_set!(
                Metric::VoltageL1
                    | Metric::VoltageL2
                    | Metric::VoltageL3
                    | Metric::CurrentL1
                    | Metric::CurrentL2
                    | Metric::CurrentL3
                    | Metric::PowerL1
                    | Metric::PowerL2
                    | Metric::PowerL3
                    | Metric::PowerTotal
                    | Metric::EnergyWh
            ),
        }
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SinglePhase => f.write_str("single-phase"),
            Self::ThreePhase => f.write_str("three-phase"),
        }
    }
}

/// Series fetched within one refresh cycle, shaped by the detected topology.
#[must_use]
#[derive(Clone, Debug)]
pub enum PhaseSeries {
    SinglePhase(SinglePhaseSeries),
    ThreePhase(ThreePhaseSeries),
}

#[must_use]
#[derive(Clone, Debug, Default)]
pub struct SinglePhaseSeries {
    pub voltage: SampleSeries,
    pub current: SampleSeries,
    pub power: SampleSeries,
    pub energy: SampleSeries,
}

#[must_use]
#[derive(Clone, Debug, Default)]
pub struct ThreePhaseSeries {
    pub voltage: Phases<SampleSeries>,
    pub current: Phases<SampleSeries>,
    pub power: Phases<SampleSeries>,
    pub total_power: SampleSeries,
    pub energy: SampleSeries,
}

impl PhaseSeries {
    /// Pick the fetched series apart. Missing metrics become empty series.
    pub fn assemble(topology: Topology, mut fetched: HashMap<Metric, SampleSeries>) -> Self {
        let mut take = |metric: Metric| fetched.remove(&metric).unwrap_or_default();
        match topology {
            Topology::SinglePhase => Self::SinglePhase(SinglePhaseSeries {
                voltage: take(Metric::Voltage),
                current: take(Metric::Current),
                power: take(Metric::Power),
                energy: take(Metric::EnergyWh),
            }),
            Topology::ThreePhase => Self::ThreePhase(ThreePhaseSeries {
                voltage: Phases::from_fn(|phase| take(Phase::voltage(phase))),
                current: Phases::from_fn(|phase| take(Phase::current(phase))),
                power: Phases::from_fn(|phase| take(Phase::power(phase))),
                total_power: take(Metric::PowerTotal),
                energy: take(Metric::EnergyWh),
            }),
        }
    }

    pub const fn topology(&self) -> Topology {
        match self {
            Self::SinglePhase(_) => Topology::SinglePhase,
            Self::ThreePhase(_) => Topology::ThreePhase,
        }
    }

    /// The active power window: the only one for single-phase, the total for three-phase.
    pub const fn power(&self) -> &SampleSeries {
        match self {
            Self::SinglePhase(series) => &series.power,
            Self::ThreePhase(series) => &series.total_power,
        }
    }

    /// The meter-reported cumulative energy window.
    pub const fn energy(&self) -> &SampleSeries {
        match self {
            Self::SinglePhase(series) => &series.energy,
            Self::ThreePhase(series) => &series.energy,
        }
    }

    /// Voltage, current and power windows, in this order, which tell whether the device is alive.
    pub const fn liveness(&self) -> [&SampleSeries; 3] {
        match self {
            Self::SinglePhase(series) => [&series.voltage, &series.current, &series.power],
            Self::ThreePhase(series) => {
                [&series.voltage.l1, &series.current.l1, &series.total_power]
            }
        }
    }
}
