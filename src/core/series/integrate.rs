use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::quantity::{energy::WattHours, power::Watts, time::Hours};

impl<T> Integrate for T where T: ?Sized {}

pub trait Integrate {
    /// Integrate the power over time with the [trapezoidal rule][1].
    ///
    /// Every adjacent pair contributes `(P₁ + P₂) / 2 · |t₂ − t₁|`, so the direction of the series
    /// does not matter. Fewer than two points integrate to zero.
    ///
    /// [1]: https://en.wikipedia.org/wiki/Trapezoidal_rule
    fn trapezoid(self) -> WattHours
    where
        Self: Sized + Iterator<Item = (DateTime<Utc>, Watts)>,
    {
        self.tuple_windows()
            .map(|((from_time, from_power), (to_time, to_power))| {
                (from_power + to_power) / 2.0 * Hours::from((to_time - from_time).abs())
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_constant_power_over_one_hour() {
        let series = vec![(start() + TimeDelta::hours(1), Watts(100.0)), (start(), Watts(100.0))];
        assert_abs_diff_eq!(series.into_iter().trapezoid().0, 100.0);
    }

    #[test]
    fn test_direction_does_not_matter() {
        let descending = vec![
            (start() + TimeDelta::minutes(30), Watts(300.0)),
            (start() + TimeDelta::minutes(10), Watts(100.0)),
            (start(), Watts(50.0)),
        ];
        let ascending = descending.iter().rev().copied().collect::<Vec<_>>();
        // (300 + 100) / 2 · 1/3 h + (100 + 50) / 2 · 1/6 h
        let expected = 200.0 / 3.0 + 75.0 / 6.0;
        assert_abs_diff_eq!(descending.into_iter().trapezoid().0, expected, epsilon = 1e-9);
        assert_abs_diff_eq!(ascending.into_iter().trapezoid().0, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_fewer_than_two_points() {
        assert_abs_diff_eq!(Vec::<(DateTime<Utc>, Watts)>::new().into_iter().trapezoid().0, 0.0);
        assert_abs_diff_eq!(vec![(start(), Watts(500.0))].into_iter().trapezoid().0, 0.0);
    }
}
