use bon::Builder;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    core::{
        DeviceId,
        aggregator::LiveMetrics,
        alarm::AlarmEvent,
        chart::Charts,
        demand::DemandProfile,
        regression::NamedFit,
        status::DeviceStatus,
        summary::NamedSummary,
        topology::{PhaseSeries, Topology},
    },
    quantity::rate::KilowattHourRate,
};

/// Everything a render sink needs to display one refresh cycle.
#[must_use]
#[derive(Clone, Debug, Serialize, Builder)]
pub struct Frame {
    pub device_id: DeviceId,

    /// Monotonically increasing cycle number, starting from 1.
    pub cycle: u64,

    pub taken_at: DateTime<Utc>,
    pub topology: Topology,
    pub status: DeviceStatus,
    pub live: LiveMetrics,
    pub charts: Charts,
    pub summaries: Vec<NamedSummary>,

    #[builder(default)]
    pub regressions: Vec<NamedFit>,

    pub demand: Option<DemandProfile>,

    #[builder(default)]
    pub alarms: Vec<AlarmEvent>,
}

impl Frame {
    /// Derive the frame from the series fetched within the cycle.
    pub fn derive(
        device_id: DeviceId,
        cycle: u64,
        taken_at: DateTime<Utc>,
        series: &PhaseSeries,
        unit_price: KilowattHourRate,
        alarms: Vec<AlarmEvent>,
    ) -> Self {
        Self::builder()
            .device_id(device_id)
            .cycle(cycle)
            .taken_at(taken_at)
            .topology(series.topology())
            .status(DeviceStatus::classify(series.liveness(), taken_at))
            .live(series.aggregate(unit_price))
            .charts(Charts::project(series))
            .summaries(series.summarize())
            .regressions(series.regress())
            .maybe_demand(series.demand())
            .alarms(alarms)
            .build()
    }
}
