use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    api::{
        models::{AlarmEvents, Measurements},
        source::MetricsSource,
    },
    core::{
        DeviceId,
        alarm::AlarmEvent,
        sample::{Metric, SampleSeries},
    },
    prelude::*,
};

/// HTTP client of the monitoring backend.
pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn try_new(base_url: Url) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, base_url })
    }

    /// Append the path segments to the base URL, keeping whatever prefix it already has.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("`{}` cannot be a base URL", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<Q: Serialize + Sync, R: DeserializeOwned>(
        &self,
        url: Url,
        query: &Q,
    ) -> Result<R> {
        self.client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .with_context(|| format!("failed to call `{url}`"))?
            .error_for_status()
            .with_context(|| format!("`{url}` failed"))?
            .json()
            .await
            .with_context(|| format!("failed to deserialize the response from `{url}`"))
    }
}

#[derive(Serialize)]
struct SeriesQuery {
    device_id: DeviceId,
    metric: Metric,
    limit: usize,
}

#[derive(Serialize)]
struct AlarmEventsQuery {
    device_id: DeviceId,
    limit: usize,
}

#[async_trait]
impl MetricsSource for Api {
    #[instrument(skip_all, fields(device_id = device_id, metric = %metric))]
    async fn fetch_series(
        &self,
        device_id: DeviceId,
        metric: Metric,
        limit: usize,
    ) -> Result<SampleSeries> {
        let url = self.endpoint(&["api", "metrics"])?;
        let measurements: Measurements = self
            .get(url, &SeriesQuery { device_id, metric, limit })
            .await
            .with_context(|| format!("failed to fetch `{metric}`"))?;
        debug!(n_samples = measurements.len(), "Fetched");
        Ok(measurements.into())
    }

    #[instrument(skip_all, fields(device_id = device_id))]
    async fn fetch_alarm_events(
        &self,
        device_id: DeviceId,
        limit: usize,
    ) -> Result<Vec<AlarmEvent>> {
        let url = self.endpoint(&["api", "alarms", "events"])?;
        let events: AlarmEvents = self
            .get(url, &AlarmEventsQuery { device_id, limit })
            .await
            .context("failed to fetch the alarm events")?;
        debug!(n_events = events.len(), "Fetched");
        Ok(events.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() -> Result {
        let api = Api::try_new(Url::parse("http://localhost:8000/")?)?;
        let endpoint = api.endpoint(&["api", "metrics"])?;
        assert_eq!(endpoint.as_str(), "http://localhost:8000/api/metrics");
        Ok(())
    }

    #[test]
    fn test_endpoint_with_prefix() -> Result {
        let api = Api::try_new(Url::parse("https://example.com/monitoring")?)?;
        assert_eq!(
            api.endpoint(&["api", "alarms", "events"])?.as_str(),
            "https://example.com/monitoring/api/alarms/events"
        );
        Ok(())
    }

    #[test]
    fn test_series_query() -> Result {
        let api = Api::try_new(Url::parse("http://localhost:8000")?)?;
        let request = api
            .client
            .get(api.endpoint(&["api", "metrics"])?)
            .query(&SeriesQuery { device_id: 3, metric: Metric::PowerTotal, limit: 100 })
            .build()?;
        assert_eq!(request.url().query(), Some("device_id=3&metric=power_total&limit=100"));
        Ok(())
    }
}
