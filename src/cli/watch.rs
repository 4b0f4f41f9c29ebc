use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;

use crate::{cli::dashboard::DashboardArgs, dashboard::spawn_stdin_controls, prelude::*};

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(flatten)]
    dashboard: DashboardArgs,

    #[clap(long, env = "METERDASH_REFRESH_INTERVAL", default_value = "30s")]
    refresh_interval: humantime::Duration,
}

impl WatchArgs {
    pub async fn run(self) -> Result {
        let period: Duration = self.refresh_interval.into();
        ensure!(!period.is_zero(), "the refresh interval must be positive");

        let dashboard = self.dashboard.connect()?;
        let mut sink = self.dashboard.sink();
        let (triggers, receiver) = mpsc::channel(16);

        spawn_stdin_controls(triggers)?;

        info!(
            device_id = dashboard.device_id(),
            ?period,
            "Watching… (`r` refresh, `d <id>` device, `q` quit)",
        );
        dashboard.watch(&mut sink, receiver, period).await
    }
}
