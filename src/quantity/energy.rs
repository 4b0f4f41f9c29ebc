use crate::quantity::{cost::Cost, rate::KilowattHourRate};

quantity!(WattHours, suffix: "Wh", precision: 1);
quantity!(KilowattHours, suffix: "kWh", precision: 3);

implement_mul!(KilowattHours, KilowattHourRate, Cost);

impl From<WattHours> for KilowattHours {
    fn from(watt_hours: WattHours) -> Self {
        Self(watt_hours.0 / 1000.0)
    }
}

impl WattHours {
    pub const ZERO: Self = Self(0.0);
}

impl KilowattHours {
    pub const ZERO: Self = Self(0.0);
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_kilowatt_hours_from_watt_hours() {
        assert_abs_diff_eq!(KilowattHours::from(WattHours(5000.0)).0, 5.0);
    }

    #[test]
    fn test_cost() {
        assert_abs_diff_eq!((KilowattHours(2.0) * KilowattHourRate(0.65)).0, 1.3);
    }
}
