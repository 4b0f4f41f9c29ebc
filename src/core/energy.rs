use serde::Serialize;

use crate::{
    core::{sample::SampleSeries, series::Integrate},
    prelude::*,
    quantity::{
        cost::Cost,
        energy::{KilowattHours, WattHours},
        power::Watts,
        rate::KilowattHourRate,
    },
};

/// Meter-reported cumulative energy at or above this is treated as a sensor glitch.
pub const REPORTED_ENERGY_CEILING: WattHours = WattHours(100_000.0);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    /// Integrated from the power window.
    Integrated,

    /// Cumulative counter reported by the meter.
    Reported,

    Unavailable,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct EnergyEstimate {
    pub energy: KilowattHours,
    pub source: EnergySource,
}

impl EnergyEstimate {
    pub const UNAVAILABLE: Self =
        Self { energy: KilowattHours::ZERO, source: EnergySource::Unavailable };

    /// Estimate the energy consumed over the window.
    ///
    /// The locally integrated power wins whenever it is positive. Otherwise, the latest
    /// meter-reported counter is used, provided it is positive and below
    /// [`REPORTED_ENERGY_CEILING`].
    pub fn settle(power: &SampleSeries, reported: &SampleSeries) -> Self {
        let integrated = integrate_power(power);
        if integrated > WattHours::ZERO {
            return Self { energy: integrated.into(), source: EnergySource::Integrated };
        }
        match reported.latest().map(|sample| WattHours(sample.value)) {
            Some(reported) if reported >= REPORTED_ENERGY_CEILING => {
                debug!(?reported, "discarding implausible energy reading");
                Self::UNAVAILABLE
            }
            Some(reported) if reported > WattHours::ZERO => {
                Self { energy: reported.into(), source: EnergySource::Reported }
            }
            _ => Self::UNAVAILABLE,
        }
    }

    pub fn cost(self, unit_price: KilowattHourRate) -> Cost {
        self.energy * unit_price
    }
}

/// Trapezoidal integral of the power window, in the series own order.
pub fn integrate_power(power: &SampleSeries) -> WattHours {
    power.iter().map(|sample| (sample.timestamp, Watts(sample.value))).trapezoid()
}
