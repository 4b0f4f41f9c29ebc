use std::{iter::Sum, ops::Div};

use chrono::{DateTime, TimeZone, Timelike, Utc};

impl<T> Average for T where T: ?Sized {}

pub trait Average {
    /// Arithmetic mean, or zero for an empty iterator.
    fn mean_or_zero(self) -> f64
    where
        Self: Sized + Iterator<Item = f64>,
    {
        let mean: average::Mean = self.collect();
        if mean.is_empty() { 0.0 } else { mean.mean() }
    }

    /// Average the values by the hour of day in the time zone.
    fn average_hourly<V, Tz: TimeZone>(self, time_zone: &Tz) -> [Option<V>; 24]
    where
        Self: Sized + Iterator<Item = (DateTime<Utc>, V)>,
        V: Copy + Sum + Div<f64, Output = V>,
    {
        let mut buckets: [Vec<V>; 24] = Default::default();
        for (timestamp, value) in self {
            buckets[timestamp.with_timezone(time_zone).hour() as usize].push(value);
        }
        buckets.map(|values| {
            if values.is_empty() {
                None
            } else {
                #[expect(clippy::cast_precision_loss)]
                let weight = values.len() as f64;
                Some(values.into_iter().sum::<V>() / weight)
            }
        })
    }
}
