use async_trait::async_trait;

use crate::{
    core::{DeviceId, alarm::AlarmEvent, sample::{Metric, SampleSeries}},
    prelude::*,
};

/// Read side of the metrics backend.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Latest samples of the metric, newest first, at most `limit` of them.
    async fn fetch_series(
        &self,
        device_id: DeviceId,
        metric: Metric,
        limit: usize,
    ) -> Result<SampleSeries>;

    /// Latest alarm events of the device, newest first.
    async fn fetch_alarm_events(&self, device_id: DeviceId, limit: usize)
    -> Result<Vec<AlarmEvent>>;
}
