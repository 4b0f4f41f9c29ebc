use std::io::Write;

use crate::{
    core::frame::Frame,
    prelude::*,
    tables::{
        build_alarms_table,
        build_charts_table,
        build_demand_table,
        build_hourly_demand_table,
        build_live_table,
        build_phases_table,
        build_regressions_table,
        build_summaries_table,
    },
};

/// Receives the frame of every successful refresh cycle.
pub trait RenderSink {
    fn render(&mut self, frame: &Frame) -> Result;
}

impl<T: RenderSink + ?Sized> RenderSink for Box<T> {
    fn render(&mut self, frame: &Frame) -> Result {
        (**self).render(frame)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    Table,

    /// One JSON document per line and refresh cycle.
    Json,
}

impl OutputFormat {
    pub fn sink<W: Write + 'static>(self, writer: W, currency: String) -> Box<dyn RenderSink> {
        match self {
            Self::Table => Box::new(TableSink { writer, currency }),
            Self::Json => Box::new(JsonSink { writer }),
        }
    }
}

pub struct TableSink<W> {
    writer: W,
    currency: String,
}

impl<W: Write> RenderSink for TableSink<W> {
    fn render(&mut self, frame: &Frame) -> Result {
        let writer = &mut self.writer;
        writeln!(
            writer,
            "Cycle #{} at {}",
            frame.cycle,
            frame.taken_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S"),
        )?;
        writeln!(writer, "{}", build_live_table(frame, &self.currency))?;
        if let Some(phases) = &frame.live.phases {
            writeln!(writer, "{}", build_phases_table(phases))?;
        }
        writeln!(writer, "{}", build_summaries_table(&frame.summaries))?;
        writeln!(writer, "{}", build_regressions_table(&frame.regressions))?;
        if let Some(demand) = &frame.demand {
            writeln!(writer, "{}", build_demand_table(demand))?;
            writeln!(writer, "{}", build_hourly_demand_table(demand))?;
        }
        writeln!(writer, "{}", build_charts_table(&frame.charts))?;
        writeln!(writer, "{}", build_alarms_table(&frame.alarms))?;
        writer.flush().context("failed to flush the output")
    }
}

pub struct JsonSink<W> {
    writer: W,
}

impl<W: Write> RenderSink for JsonSink<W> {
    fn render(&mut self, frame: &Frame) -> Result {
        serde_json::to_writer(&mut self.writer, frame).context("failed to serialize the frame")?;
        writeln!(self.writer)?;
        self.writer.flush().context("failed to flush the output")
    }
}
