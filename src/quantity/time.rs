use chrono::TimeDelta;

quantity!(Hours, suffix: "h", precision: 3);

impl From<TimeDelta> for Hours {
    fn from(time_delta: TimeDelta) -> Self {
        Self(time_delta.as_seconds_f64() / 3600.0)
    }
}
