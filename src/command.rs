use tracing::info;

use crate::bandwidth::BandwidthAggregator;
use crate::error::BandwidthError;
use crate::report::ReportTable;
use crate::softlayer_client::{BandwidthSource, ResolveId};
use crate::time_range::{SummaryPeriod, TimeRange};

pub struct BandwidthRequest {
    pub identifier: String,
    pub time_range: TimeRange,
    pub period: SummaryPeriod,
    pub quiet_summary: bool,
}

/// Returns the tables in print order: the summary first, then the per-interval
/// detail unless only the summary was asked for.
pub async fn bandwidth_report<C>(
    client: &C,
    request: &BandwidthRequest,
) -> Result<Vec<ReportTable>, BandwidthError>
where
    C: ResolveId + BandwidthSource + Sync,
{
    let hardware_id = client.resolve_id(&request.identifier).await?;
    info!(identifier = %request.identifier, hardware_id, "resolved hardware");

    let samples = client
        .bandwidth_data(hardware_id, &request.time_range, request.period)
        .await?;
    let aggregator = BandwidthAggregator::ingest(&samples, request.period);

    let mut tables = vec![aggregator.summary_table()];
    if !request.quiet_summary {
        tables.push(aggregator.detail_table(&request.time_range));
    }
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use crate::command::{bandwidth_report, BandwidthRequest};
    use crate::error::BandwidthError;
    use crate::metric::BandwidthSample;
    use crate::softlayer_client::{BandwidthSource, ResolveId};
    use crate::time_range::{SummaryPeriod, TimeRange};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeClient {
        samples: Vec<BandwidthSample>,
        fail_fetch: bool,
        fetches: AtomicUsize,
    }

    impl FakeClient {
        fn new(samples: Vec<BandwidthSample>) -> Self {
            FakeClient {
                samples,
                fail_fetch: false,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ResolveId for FakeClient {
        async fn resolve_id(&self, identifier: &str) -> Result<u64, BandwidthError> {
            match identifier {
                "web01" => Ok(1234),
                _ => Err(BandwidthError::UnknownIdentifier(identifier.to_string())),
            }
        }
    }

    #[async_trait]
    impl BandwidthSource for FakeClient {
        async fn bandwidth_data(
            &self,
            hardware_id: u64,
            _time_range: &TimeRange,
            _period: SummaryPeriod,
        ) -> Result<Vec<BandwidthSample>, BandwidthError> {
            assert_eq!(hardware_id, 1234);
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch {
                return Err(BandwidthError::Api {
                    code: "SoftLayer_Exception_Public".to_string(),
                    message: "Rate limit exceeded".to_string(),
                });
            }
            Ok(self.samples.clone())
        }
    }

    fn request(identifier: &str, quiet_summary: bool) -> BandwidthRequest {
        BandwidthRequest {
            identifier: identifier.to_string(),
            time_range: TimeRange::new("2019-05-01", "2019-05-02"),
            period: SummaryPeriod::default(),
            quiet_summary,
        }
    }

    #[tokio::test]
    async fn test_summary_then_detail() {
        let client = FakeClient::new(vec![BandwidthSample::new(
            "2019-05-01T00:00:00-06:00",
            "publicIn_net_octet",
            1073741824.0,
        )]);

        let tables = bandwidth_report(&client, &request("web01", false)).await.unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].title.as_deref(), Some("Summary"));
        assert_eq!(
            tables[1].title.as_deref(),
            Some("Bandwidth Report: 2019-05-01 - 2019-05-02")
        );
        assert_eq!(tables[1].rows.len(), 1);
    }

    #[tokio::test]
    async fn test_quiet_summary() {
        let client = FakeClient::new(vec![]);
        let tables = bandwidth_report(&client, &request("web01", true)).await.unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_identifier_skips_fetch() {
        let client = FakeClient::new(vec![]);
        let result = bandwidth_report(&client, &request("db02", false)).await;
        assert!(matches!(result, Err(BandwidthError::UnknownIdentifier(_))));
        assert_eq!(client.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let client = FakeClient {
            fail_fetch: true,
            ..FakeClient::new(vec![])
        };
        let result = bandwidth_report(&client, &request("web01", false)).await;
        assert!(matches!(result, Err(BandwidthError::Api { .. })));
    }
}
