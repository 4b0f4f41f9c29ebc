use chrono::Local;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use humantime::format_duration;

use crate::{
    core::{
        aggregator::{LiveMetrics, PhaseMetrics},
        alarm::AlarmEvent,
        chart::Charts,
        demand::{DemandClass, DemandProfile},
        energy::EnergySource,
        frame::Frame,
        regression::NamedFit,
        status::DeviceStatus,
        summary::NamedSummary,
    },
    fmt::sparkline,
};

/// Number of the latest chart points drawn in a sparkline.
const SPARKLINE_WIDTH: usize = 40;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn status_cell(status: DeviceStatus) -> Cell {
    match status {
        DeviceStatus::Online { last_seen } => {
            Cell::new(format!("Online, {}", last_seen.with_timezone(&Local).format("%H:%M:%S")))
                .fg(Color::Green)
        }
        DeviceStatus::Offline { last_seen, age } => Cell::new(format!(
            "Offline for {}, since {}",
            age.to_std().map_or_else(|_| "?".into(), |age| format_duration(age).to_string()),
            last_seen.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
        ))
        .fg(Color::Red),
        DeviceStatus::NoData => Cell::new("No data").fg(Color::DarkYellow),
    }
}

#[must_use]
pub fn build_live_table(frame: &Frame, currency: &str) -> Table {
    let live: &LiveMetrics = &frame.live;
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(format!("Device #{}", frame.device_id)).add_attribute(Attribute::Bold),
        Cell::new(frame.topology),
        Cell::new("Average").set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![Cell::new("Status"), status_cell(frame.status), Cell::new("")]);
    table.add_row(vec![
        Cell::new("Voltage"),
        Cell::new(live.voltage).set_alignment(CellAlignment::Right),
        Cell::new(live.averages.voltage).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Current"),
        Cell::new(live.current).set_alignment(CellAlignment::Right),
        Cell::new(live.averages.current).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Power"),
        Cell::new(live.power).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
        Cell::new(live.averages.power).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Apparent power"),
        Cell::new(live.apparent_power).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Power factor"),
        Cell::new(live.power_factor).set_alignment(CellAlignment::Right).fg(
            if live.power_factor.0 >= 0.9 {
                Color::Green
            } else if live.power_factor.0 >= 0.8 {
                Color::DarkYellow
            } else {
                Color::Red
            },
        ),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Energy"),
        Cell::new(live.energy).set_alignment(CellAlignment::Right),
        Cell::new(match live.energy_source {
            EnergySource::Integrated => "integrated",
            EnergySource::Reported => "reported",
            EnergySource::Unavailable => "n/a",
        })
        .add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![
        Cell::new("Cost"),
        Cell::new(format!("{currency} {}", live.cost)).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    table
}

#[must_use]
pub fn build_phases_table(phases: &PhaseMetrics) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Phase", "Voltage", "Current", "Power", "Apparent power"]);
    for ((phase, voltage), (((_, current), (_, power)), (_, apparent_power))) in phases
        .voltage
        .iter()
        .zip(phases.current.iter().zip(phases.power.iter()).zip(phases.apparent_power.iter()))
    {
        table.add_row(vec![
            Cell::new(phase).add_attribute(Attribute::Bold),
            Cell::new(voltage).set_alignment(CellAlignment::Right),
            Cell::new(current).set_alignment(CellAlignment::Right),
            Cell::new(power).set_alignment(CellAlignment::Right),
            Cell::new(apparent_power).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_summaries_table(summaries: &[NamedSummary]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Series", "Samples", "Mean", "Std. dev.", "Min", "Max", "Cpk"]);
    for named in summaries {
        let value = |value: f64| {
            Cell::new(format!("{value:.2} {}", named.unit)).set_alignment(CellAlignment::Right)
        };
        table.add_row(vec![
            Cell::new(&named.name),
            Cell::new(named.summary.count).set_alignment(CellAlignment::Right),
            value(named.summary.mean),
            value(named.summary.std_dev),
            value(named.summary.min),
            value(named.summary.max),
            Cell::new(format!("{:.2}", named.summary.cpk)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_regressions_table(fits: &[NamedFit]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Y", "X", "Samples", "Slope", "Intercept", "R²"]);
    for named in fits {
        let value =
            |value: f64| Cell::new(format!("{value:.4}")).set_alignment(CellAlignment::Right);
        table.add_row(vec![
            Cell::new(&named.y),
            Cell::new(&named.x),
            Cell::new(named.fit.samples).set_alignment(CellAlignment::Right),
            value(named.fit.slope),
            value(named.fit.intercept),
            value(named.fit.r2),
        ]);
    }
    table
}

#[must_use]
pub fn build_demand_table(demand: &DemandProfile) -> Table {
    let class_row = |name: &str, class: &DemandClass| {
        vec![
            Cell::new(name),
            Cell::new(class.samples).set_alignment(CellAlignment::Right),
            Cell::new(class.mean).set_alignment(CellAlignment::Right),
            Cell::new(class.max).set_alignment(CellAlignment::Right),
        ]
    };
    let mut table = new_table();
    table
        .set_header(vec!["Demand", "Samples", "Mean", "Max"])
        .add_row(class_row("Peak (18:00–21:00)", &demand.peak))
        .add_row(class_row("Off-peak", &demand.off_peak))
        .add_row(vec![
            Cell::new("Overall").add_attribute(Attribute::Bold),
            Cell::new(format!("min {}", demand.min)).set_alignment(CellAlignment::Right),
            Cell::new(demand.mean)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold),
            Cell::new(demand.max).set_alignment(CellAlignment::Right),
        ]);
    table
}

#[must_use]
pub fn build_hourly_demand_table(demand: &DemandProfile) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Hour"),
        Cell::new("Power").set_alignment(CellAlignment::Right),
    ]);
    let hourly =
        demand.hourly.iter().enumerate().filter_map(|(hour, power)| Some((hour, (*power)?)));
    for (hour, power) in hourly {
        table.add_row(vec![
            Cell::new(format!("{hour:02}:00")),
            Cell::new(power).set_alignment(CellAlignment::Right).fg(if power > demand.mean {
                Color::Red
            } else if power < demand.mean {
                Color::Green
            } else {
                Color::Reset
            }),
        ]);
    }
    table
}

#[must_use]
pub fn build_alarms_table(alarms: &[AlarmEvent]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Time", "Metric", "Value", "Acknowledged"]);
    if alarms.is_empty() {
        table.add_row(vec![Cell::new("No alarms recorded").add_attribute(Attribute::Dim)]);
    }
    for alarm in alarms {
        table.add_row(vec![
            Cell::new(alarm.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")),
            Cell::new(&alarm.metric),
            Cell::new(format!("{:.2}", alarm.value)).set_alignment(CellAlignment::Right),
            if alarm.acknowledged {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("no").fg(Color::Red)
            },
        ]);
    }
    table
}

#[must_use]
pub fn build_charts_table(charts: &Charts) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Chart", "Series", "From", "To", "Last", "Trend"]);
    for chart in charts.iter() {
        for dataset in &chart.datasets {
            let tail = &dataset.values[dataset.values.len().saturating_sub(SPARKLINE_WIDTH)..];
            table.add_row(vec![
                Cell::new(format!("{} ({})", chart.title, chart.unit)),
                Cell::new(&dataset.label),
                Cell::new(chart.labels.first().map_or("", String::as_str))
                    .add_attribute(Attribute::Dim),
                Cell::new(chart.labels.last().map_or("", String::as_str))
                    .add_attribute(Attribute::Dim),
                dataset
                    .values
                    .last()
                    .map_or_else(|| Cell::new("n/a"), |value| Cell::new(format!("{value:.2}")))
                    .set_alignment(CellAlignment::Right),
                Cell::new(sparkline(tail)).fg(Color::Cyan),
            ]);
        }
    }
    table
}
