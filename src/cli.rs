mod dashboard;
mod snapshot;
mod watch;

use clap::{Parser, Subcommand};

use crate::cli::{snapshot::SnapshotArgs, watch::WatchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Refresh the dashboard periodically and on demand from the standard input.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// Run a single refresh cycle and exit.
    #[clap(name = "snapshot")]
    Snapshot(Box<SnapshotArgs>),
}
