use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::BandwidthError;
use crate::metric::BandwidthSample;
use crate::time_range::{SummaryPeriod, TimeRange};

#[async_trait]
pub trait ResolveId {
    async fn resolve_id(&self, identifier: &str) -> Result<u64, BandwidthError>;
}

#[async_trait]
pub trait BandwidthSource {
    async fn bandwidth_data(
        &self,
        hardware_id: u64,
        time_range: &TimeRange,
        period: SummaryPeriod,
    ) -> Result<Vec<BandwidthSample>, BandwidthError>;
}

pub struct SoftLayerClient {
    client: Client,
    endpoint_url: String,
    username: String,
    api_key: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
    code: Option<String>,
}

#[async_trait]
impl ResolveId for SoftLayerClient {
    /// Only numeric ids are understood; hostname lookups are not supported.
    async fn resolve_id(&self, identifier: &str) -> Result<u64, BandwidthError> {
        identifier
            .trim()
            .parse::<u64>()
            .map_err(|_| BandwidthError::UnknownIdentifier(identifier.to_string()))
    }
}

#[async_trait]
impl BandwidthSource for SoftLayerClient {
    async fn bandwidth_data(
        &self,
        hardware_id: u64,
        time_range: &TimeRange,
        period: SummaryPeriod,
    ) -> Result<Vec<BandwidthSample>, BandwidthError> {
        let tracking_id = self.tracking_object_id(hardware_id).await?;
        debug!(hardware_id, tracking_id, "resolved metric tracking object");

        let response = self
            .client
            .post(self.url("SoftLayer_Metric_Tracking_Object", tracking_id, "getBandwidthData"))
            .basic_auth(&self.username, Some(&self.api_key))
            .json(&json!({
                "parameters": [time_range.start, time_range.end, null, period.as_secs()]
            }))
            .send()
            .await?;
        let samples: Vec<BandwidthSample> = Self::check_status(response).await?.json().await?;
        info!(hardware_id, samples = samples.len(), %period, "fetched bandwidth data");
        Ok(samples)
    }
}

impl SoftLayerClient {
    pub fn new(config: &Config) -> Result<Self, BandwidthError> {
        let (username, api_key) = config.credentials()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self::new_with_client(
            client,
            &config.endpoint_url,
            username,
            api_key,
        ))
    }

    fn new_with_client(client: Client, endpoint_url: &str, username: &str, api_key: &str) -> Self {
        SoftLayerClient {
            client,
            endpoint_url: endpoint_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn url(&self, service: &str, id: u64, method: &str) -> String {
        format!("{}/{}/{}/{}.json", self.endpoint_url, service, id, method)
    }

    async fn tracking_object_id(&self, hardware_id: u64) -> Result<u64, BandwidthError> {
        let response = self
            .client
            .get(self.url("SoftLayer_Hardware_Server", hardware_id, "getMetricTrackingObjectId"))
            .basic_auth(&self.username, Some(&self.api_key))
            .send()
            .await?;
        Ok(Self::check_status(response).await?.json::<u64>().await?)
    }

    async fn check_status(response: Response) -> Result<Response, BandwidthError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await?;
        Err(match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(api_error) => BandwidthError::Api {
                code: api_error.code.unwrap_or_else(|| status.to_string()),
                message: api_error.error,
            },
            Err(_) => BandwidthError::Api {
                code: status.to_string(),
                message: body,
            },
        })
    }
}
