//! Refresh cycle and the watch loop around it.

mod trigger;

use std::{collections::HashMap, time::Duration};

use bon::Builder;
use chrono::Utc;
use futures_util::future::try_join_all;
use tokio::{
    select,
    sync::mpsc,
    time::{MissedTickBehavior, interval},
    try_join,
};

pub use self::trigger::{Trigger, spawn_stdin_controls};
use crate::{
    api::MetricsSource,
    core::{
        DeviceId,
        frame::Frame,
        sample::{Metric, SampleSeries},
        topology::{PhaseSeries, Topology},
    },
    prelude::*,
    quantity::rate::KilowattHourRate,
    render::RenderSink,
};

#[derive(Builder)]
pub struct Dashboard<S> {
    source: S,
    device_id: DeviceId,

    #[builder(default = 100)]
    series_limit: usize,

    #[builder(default = 20)]
    alarm_limit: usize,

    unit_price: KilowattHourRate,

    #[builder(skip)]
    cycle: u64,

    /// Topology detected in the previous cycle of the current device.
    #[builder(skip)]
    last_topology: Option<Topology>,
}

impl<S: MetricsSource> Dashboard<S> {
    #[must_use]
    pub const fn device_id(&self) -> DeviceId {
        self.device_id
    }

    pub fn select_device(&mut self, device_id: DeviceId) {
        info!(device_id, "Switching the device");
        self.device_id = device_id;
        self.last_topology = None;
    }

    /// Run one refresh cycle.
    ///
    /// Any failed fetch except the topology probe fails the whole cycle.
    #[instrument(skip_all, fields(device_id = self.device_id, cycle = self.cycle + 1))]
    pub async fn refresh(&mut self) -> Result<Frame> {
        self.cycle += 1;
        let device_id = self.device_id;

        let probe = match self.source.fetch_series(device_id, Topology::PROBE, 1).await {
            Ok(probe) => Some(probe),
            Err(error) => {
                warn!("Topology probe failed, assuming single-phase: {error:#}");
                None
            }
        };
        let topology = Topology::detect(probe.as_ref());
        if let Some(last_topology) = self.last_topology
            && last_topology != topology
        {
            warn!(from = %last_topology, to = %topology, "Topology changed");
        }
        debug!(%topology, "Detected");

        let source = &self.source;
        let series_limit = self.series_limit;
        let batch = topology.metrics().into_iter().map(|metric| async move {
            let series = source.fetch_series(device_id, metric, series_limit).await?;
            Ok::<(Metric, SampleSeries), Error>((metric, series))
        });
        let alarms = source.fetch_alarm_events(device_id, self.alarm_limit);
        let (fetched, alarms) = try_join!(try_join_all(batch), alarms)?;
        let fetched: HashMap<_, _> = fetched.into_iter().collect();
        let series = PhaseSeries::assemble(topology, fetched);
        self.last_topology = Some(topology);

        let frame =
            Frame::derive(device_id, self.cycle, Utc::now(), &series, self.unit_price, alarms);
        info!(online = frame.status.is_online(), power = %frame.live.power, "Refreshed");
        Ok(frame)
    }

    /// Run one cycle and render its frame, or log the failure and leave the sink untouched.
    async fn render_cycle(&mut self, sink: &mut impl RenderSink) -> Result {
        match self.refresh().await {
            Ok(frame) => sink.render(&frame),
            Err(error) => {
                error!("Refresh failed, keeping the last frame: {error:#}");
                Ok(())
            }
        }
    }

    /// Refresh on the initial load, every `period`, and on every trigger until quit.
    ///
    /// A failed cycle is logged, and the last rendered frame stays as is.
    pub async fn watch(
        mut self,
        sink: &mut impl RenderSink,
        mut triggers: mpsc::Receiver<Trigger>,
        period: Duration,
    ) -> Result {
        self.render_cycle(sink).await?;

        let mut interval = interval(period);
        interval.reset_after(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut accepts_triggers = true;

        loop {
            select! {
                biased;
                _ = interval.tick() => {}
                trigger = triggers.recv(), if accepts_triggers => match trigger {
                    Some(Trigger::Refresh) => {}
                    Some(Trigger::SelectDevice(device_id)) => self.select_device(device_id),
                    Some(Trigger::Quit) => break,
                    None => {
                        accepts_triggers = false;
                        continue;
                    }
                },
            }
            self.render_cycle(sink).await?;
        }

        info!("Quitting…");
        Ok(())
    }
}
