use std::ops::Div;

use crate::quantity::{
    electric::VoltAmperes,
    energy::WattHours,
    ratios::PowerFactor,
    time::Hours,
};

quantity!(
    /// Active power. Negative values mean the flow towards the grid.
    Watts, suffix: "W", precision: 1
);

implement_mul!(Watts, Hours, WattHours);

impl Watts {
    pub const ZERO: Self = Self(0.0);
}

impl Div<VoltAmperes> for Watts {
    type Output = PowerFactor;

    /// Calculate the power factor, `|P| / S`.
    ///
    /// Zero apparent power yields zero, and readings where `|P|` exceeds `S` are clamped to one.
    fn div(self, apparent_power: VoltAmperes) -> Self::Output {
        if apparent_power.0 > 0.0 {
            PowerFactor::new(self.0.abs() / apparent_power.0)
        } else {
            PowerFactor::ZERO
        }
    }
}
