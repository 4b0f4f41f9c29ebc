use clap::Parser;

use crate::{cli::dashboard::DashboardArgs, prelude::*};

#[derive(Parser)]
pub struct SnapshotArgs {
    #[clap(flatten)]
    dashboard: DashboardArgs,
}

impl SnapshotArgs {
    pub async fn run(self) -> Result {
        let frame = self.dashboard.connect()?.refresh().await?;
        self.dashboard.sink().render(&frame)
    }
}
