use clap::Parser;
use reqwest::Url;

use crate::{
    api::Backend,
    core::DeviceId,
    dashboard::Dashboard,
    prelude::*,
    quantity::rate::KilowattHourRate,
    render::{OutputFormat, RenderSink},
};

#[derive(Parser)]
pub struct DashboardArgs {
    /// Base URL of the monitoring backend.
    #[clap(long, env = "METERDASH_API_BASE_URL")]
    api_base_url: Url,

    #[clap(long, env = "METERDASH_DEVICE_ID")]
    device_id: DeviceId,

    /// Number of the latest samples to fetch per metric.
    #[clap(long, env = "METERDASH_SERIES_LIMIT", default_value = "100")]
    series_limit: usize,

    /// Number of the latest alarm events to fetch.
    #[clap(long, env = "METERDASH_ALARM_LIMIT", default_value = "20")]
    alarm_limit: usize,

    /// Energy price per kilowatt-hour.
    #[clap(long, env = "METERDASH_UNIT_PRICE", default_value = "0.65")]
    unit_price: KilowattHourRate,

    #[clap(long, env = "METERDASH_CURRENCY", default_value = "R$")]
    currency: String,

    #[clap(long, env = "METERDASH_OUTPUT", value_enum, default_value = "table")]
    output: OutputFormat,
}

impl DashboardArgs {
    pub fn connect(&self) -> Result<Dashboard<Backend>> {
        ensure!(self.series_limit > 0, "the series limit must be positive");
        ensure!(self.alarm_limit > 0, "the alarm limit must be positive");
        Ok(Dashboard::builder()
            .source(Backend::try_new(self.api_base_url.clone())?)
            .device_id(self.device_id)
            .series_limit(self.series_limit)
            .alarm_limit(self.alarm_limit)
            .unit_price(self.unit_price)
            .build())
    }

    pub fn sink(&self) -> Box<dyn RenderSink> {
        self.output.sink(std::io::stdout(), self.currency.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() -> Result {
        let args = DashboardArgs::try_parse_from([
            "meterdash",
            "--api-base-url",
            "http://localhost:8000",
            "--device-id",
            "3",
        ])?;
        assert_eq!(args.series_limit, 100);
        assert_eq!(args.alarm_limit, 20);
        assert_eq!(args.unit_price, KilowattHourRate(0.65));
        assert_eq!(args.currency, "R$");
        assert_eq!(args.output, OutputFormat::Table);
        Ok(())
    }

    #[test]
    fn test_zero_limit_rejected() -> Result {
        let args = DashboardArgs::try_parse_from([
            "meterdash",
            "--api-base-url",
            "http://localhost:8000",
            "--device-id",
            "3",
            "--series-limit",
            "0",
        ])?;
        assert!(args.connect().is_err());
        Ok(())
    }
}
