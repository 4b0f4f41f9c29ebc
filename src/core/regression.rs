use serde::Serialize;

use crate::core::{
    phase::Phase,
    sample::SampleSeries,
    series::Average,
    topology::PhaseSeries,
};

/// Least-squares line `y = slope · x + intercept`.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,

    /// Coefficient of determination, zero when `y` is constant.
    pub r2: f64,

    /// Number of the paired samples.
    pub samples: usize,
}

impl LinearFit {
    /// Fit `y` against `x`.
    ///
    /// The series are paired sample by sample starting from the newest one, so the longer series
    /// is cut to the length of the shorter one. Non-finite pairs are dropped.
    /// A constant `x` yields a flat line through the mean of `y`.
    pub fn of(x: &SampleSeries, y: &SampleSeries) -> Self {
        let points: Vec<(f64, f64)> = x
            .values()
            .zip(y.values())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        if points.is_empty() {
            return Self::default();
        }

        let mean_x = points.iter().map(|(x, _)| *x).mean_or_zero();
        let mean_y = points.iter().map(|(_, y)| *y).mean_or_zero();
        let (ss_xy, ss_xx) = points.iter().fold((0.0, 0.0), |(ss_xy, ss_xx), (x, y)| {
            (ss_xy + (x - mean_x) * (y - mean_y), ss_xx + (x - mean_x).powi(2))
        });
        let slope = if ss_xx > 0.0 { ss_xy / ss_xx } else { 0.0 };
        let intercept = slope.mul_add(-mean_x, mean_y);

        let ss_total: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
        let ss_residual: f64 =
            points.iter().map(|(x, y)| (y - slope.mul_add(*x, intercept)).powi(2)).sum();
        let r2 = if ss_total > 0.0 { 1.0 - ss_residual / ss_total } else { 0.0 };

        Self { slope, intercept, r2, samples: points.len() }
    }
}

/// Fit of one series against another, labelled with both names.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NamedFit {
    pub x: String,
    pub y: String,

    #[serde(flatten)]
    pub fit: LinearFit,
}

impl NamedFit {
    fn new(x: impl Into<String>, y: impl Into<String>, fit: LinearFit) -> Self {
        Self { x: x.into(), y: y.into(), fit }
    }
}

impl PhaseSeries {
    /// Power against current and voltage, per phase for three-phase meters.
    #[must_use]
    pub fn regress(&self) -> Vec<NamedFit> {
        match self {
            Self::SinglePhase(series) => vec![
                NamedFit::new("Current", "Power", LinearFit::of(&series.current, &series.power)),
                NamedFit::new("Voltage", "Power", LinearFit::of(&series.voltage, &series.power)),
            ],
            Self::ThreePhase(series) => Phase::ALL
                .into_iter()
                .map(|phase| {
                    NamedFit::new(
                        format!("Current {phase}"),
                        format!("Power {phase}"),
                        LinearFit::of(series.current.get(phase), series.power.get(phase)),
                    )
                })
                .collect(),
        }
    }
}
