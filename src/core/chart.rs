use chrono::Local;
use serde::Serialize;

use crate::core::{
    phase::Phase,
    sample::SampleSeries,
    topology::{PhaseSeries, SinglePhaseSeries, ThreePhaseSeries},
};

/// Number of points per dataset in the combined overview chart.
pub const OVERVIEW_POINTS: usize = 50;

/// Chronological labels and values of one series.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Projection {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Projection {
    /// Reverse the newest-first series into the chronological order.
    pub fn chronological(series: &SampleSeries) -> Self {
        Self::take(series, usize::MAX)
    }

    /// The first [`OVERVIEW_POINTS`] points of the chronological projection, the oldest ones.
    pub fn overview(series: &SampleSeries) -> Self {
        Self::take(series, OVERVIEW_POINTS)
    }

    fn take(series: &SampleSeries, n_points: usize) -> Self {
        let (labels, values) = series
            .chronological()
            .take(n_points)
            .map(|sample| {
                let label = sample.timestamp.with_timezone(&Local).format("%H:%M:%S");
                (label.to_string(), sample.value)
            })
            .unzip();
        Self { labels, values }
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
}

/// Display-ready chart. The labels are those of the first dataset.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chart {
    pub title: &'static str,
    pub unit: &'static str,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl Chart {
    pub const fn new(title: &'static str, unit: &'static str) -> Self {
        Self { title, unit, labels: Vec::new(), datasets: Vec::new() }
    }

    pub fn with_dataset(mut self, label: impl Into<String>, projection: Projection) -> Self {
        if self.datasets.is_empty() {
            self.labels = projection.labels;
        }
        self.datasets.push(Dataset { label: label.into(), values: projection.values });
        self
    }
}

/// All charts of a refresh cycle, recomputed from scratch every time.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Charts {
    pub voltage: Chart,
    pub current: Chart,
    pub power: Chart,
    pub energy: Chart,
    pub overview: Chart,
}

impl Charts {
    pub fn project(series: &PhaseSeries) -> Self {
        match series {
            PhaseSeries::SinglePhase(series) => series.project(),
            PhaseSeries::ThreePhase(series) => series.project(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chart> {
        [&self.voltage, &self.current, &self.power, &self.energy, &self.overview].into_iter()
    }
}

impl SinglePhaseSeries {
    fn project(&self) -> Charts {
        Charts {
            voltage: Chart::new("Voltage", "V")
                .with_dataset("Voltage", Projection::chronological(&self.voltage)),
            current: Chart::new("Current", "A")
                .with_dataset("Current", Projection::chronological(&self.current)),
            power: Chart::new("Power", "W")
                .with_dataset("Power", Projection::chronological(&self.power)),
            energy: Chart::new("Energy", "Wh")
                .with_dataset("Energy", Projection::chronological(&self.energy)),
            overview: Chart::new("Overview", "V, A, W")
                .with_dataset("Voltage", Projection::overview(&self.voltage))
                .with_dataset("Current", Projection::overview(&self.current))
                .with_dataset("Power", Projection::overview(&self.power)),
        }
    }
}

impl ThreePhaseSeries {
    fn project(&self) -> Charts {
        let mut voltage = Chart::new("Voltage", "V");
        let mut current = Chart::new("Current", "A");
        let mut power = Chart::new("Power", "W");
        for phase in Phase::ALL {
            let label = phase.to_string();
            voltage = voltage
                .with_dataset(label.clone(), Projection::chronological(self.voltage.get(phase)));
            current = current
                .with_dataset(label.clone(), Projection::chronological(self.current.get(phase)));
            power = power.with_dataset(label, Projection::chronological(self.power.get(phase)));
        }
        Charts {
            voltage,
            current,
            power: power.with_dataset("Total", Projection::chronological(&self.total_power)),
            energy: Chart::new("Energy", "Wh")
                .with_dataset("Energy", Projection::chronological(&self.energy)),
            overview: Chart::new("Overview", "V, A, W")
                .with_dataset("Voltage L1", Projection::overview(&self.voltage.l1))
                .with_dataset("Current L1", Projection::overview(&self.current.l1))
                .with_dataset("Total power", Projection::overview(&self.total_power)),
        }
    }
}
