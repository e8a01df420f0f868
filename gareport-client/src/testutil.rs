//! Scripted in-memory [`ReportingService`] for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gareport_core::{
    BatchGetRequest, BatchGetResponse, ColumnHeader, DateRangeValues, MetricHeader,
    MetricHeaderEntry, RawReport, ReportData, ReportRow,
};

use crate::auth::AccessToken;
use crate::error::ClientError;
use crate::service::ReportingService;

/// Fake service that replays scripted responses and records every request.
///
/// Cloning shares the scripted queue and the recorded state, so tests can
/// keep a handle after moving the service into a client.
#[derive(Clone, Default)]
pub(crate) struct FakeService {
    responses: Arc<Mutex<VecDeque<BatchGetResponse>>>,
    requests: Arc<Mutex<Vec<BatchGetRequest>>>,
    auth_calls: Arc<AtomicUsize>,
}

impl FakeService {
    pub(crate) fn script(responses: Vec<BatchGetResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            ..Self::default()
        }
    }

    pub(crate) fn recorded_requests(&self) -> Vec<BatchGetRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn auth_count(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReportingService for FakeService {
    async fn authorize(&self) -> Result<AccessToken, ClientError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        Ok(AccessToken {
            token: "fake-token".to_string(),
            expires_at: None,
        })
    }

    async fn batch_get(
        &self,
        _token: &AccessToken,
        request: &BatchGetRequest,
    ) -> Result<BatchGetResponse, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::Remote("no scripted response left".to_string()))
    }
}

/// Builds one raw report page with a single dimension and metric column.
pub(crate) fn report_page(
    dimension: &str,
    metric: &str,
    metric_type: Option<&str>,
    rows: &[(&str, &str)],
    next_page_token: Option<&str>,
) -> RawReport {
    RawReport {
        column_header: ColumnHeader {
            dimensions: vec![dimension.to_string()],
            metric_header: MetricHeader {
                metric_header_entries: vec![MetricHeaderEntry {
                    name: metric.to_string(),
                    metric_type: metric_type.map(String::from),
                }],
            },
        },
        data: ReportData {
            rows: rows
                .iter()
                .map(|(dim, value)| ReportRow {
                    dimensions: vec![(*dim).to_string()],
                    metrics: vec![DateRangeValues {
                        values: vec![(*value).to_string()],
                    }],
                })
                .collect(),
            ..ReportData::default()
        },
        next_page_token: next_page_token.map(String::from),
    }
}
