//! The request orchestrator.
//!
//! A [`Client`] accumulates report descriptors, authenticates once, and
//! submits them in a single batched call. A per-instance request ceiling
//! caps the total number of submission attempts as a safety valve against
//! runaway pagination loops; it is not a rate limiter.

use gareport_core::{BatchGetRequest, Report};
use tracing::{debug, info};

use crate::auth::AccessToken;
use crate::error::ClientError;
use crate::response::ApiResponse;
use crate::service::ReportingService;

/// Default submission ceiling per client.
pub const DEFAULT_MAX_REQUESTS: u32 = 10;

/// Client configuration, applied at construction.
#[derive(Debug, Clone, Copy)]
pub struct ClientOptions {
    /// Maximum number of batch submission attempts.
    pub max_requests: u32,

    /// When true, `get` keeps requesting continuation pages until no
    /// report carries a token (fetch-all mode).
    pub all_results: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            all_results: false,
        }
    }
}

/// Batched reporting client.
///
/// Generic over the [`ReportingService`] seam; production code uses
/// [`GoogleService`](crate::service::GoogleService).
#[derive(Debug)]
pub struct Client<S> {
    service: S,
    reports: Vec<Report>,
    token: Option<AccessToken>,
    max_requests: u32,
    all_results: bool,
}

impl<S: ReportingService> Client<S> {
    /// Creates a client with default options.
    pub fn new(service: S) -> Self {
        Self::with_options(service, ClientOptions::default())
    }

    /// Creates a client with explicit options.
    pub fn with_options(service: S, options: ClientOptions) -> Self {
        Self {
            service,
            reports: Vec::new(),
            token: None,
            max_requests: options.max_requests,
            all_results: options.all_results,
        }
    }

    /// Adds a report to the accumulated request list.
    pub fn add(&mut self, report: Report) -> &mut Self {
        self.reports.push(report);
        self
    }

    /// The accumulated report list.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Submission attempts left before the ceiling trips.
    pub fn remaining_requests(&self) -> u32 {
        self.max_requests
    }

    /// Whether fetch-all mode is enabled.
    pub fn all_results(&self) -> bool {
        self.all_results
    }

    /// Exchanges the configured credentials for a live token.
    ///
    /// Must complete before any submission. Repeated calls re-authenticate;
    /// no validity window is assumed.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::Auth`] on credential or network rejection.
    pub async fn authorize(&mut self) -> Result<AccessToken, ClientError> {
        let token = self.service.authorize().await?;
        self.token = Some(token.clone());
        Ok(token)
    }

    /// Submits one batch of report descriptors.
    ///
    /// The batch is owned by the client for the duration of the
    /// submission and handed to the returned [`ApiResponse`] as the
    /// originating descriptor list.
    ///
    /// # Errors
    ///
    /// - [`ClientError::EmptyBatch`] for zero descriptors
    /// - [`ClientError::Auth`] when called before [`Client::authorize`]
    /// - [`ClientError::RequestCeiling`] once the ceiling is exhausted;
    ///   the endpoint is not contacted
    /// - [`ClientError::Remote`] for transport/API failures (no retry)
    pub async fn submit(&mut self, reports: Vec<Report>) -> Result<ApiResponse, ClientError> {
        if reports.is_empty() {
            return Err(ClientError::EmptyBatch);
        }

        let token = self.token.clone().ok_or_else(|| {
            ClientError::Auth("not authorized; call authorize() before submitting".to_string())
        })?;

        if self.max_requests == 0 {
            return Err(ClientError::RequestCeiling);
        }
        self.max_requests -= 1;

        for report in &reports {
            debug!(report = %report.name(), "Requesting");
        }

        let body = BatchGetRequest {
            report_requests: reports.iter().map(Report::to_wire).collect(),
        };

        let raw = self.service.batch_get(&token, &body).await?;
        Ok(ApiResponse::new(raw, reports))
    }

    /// Top-level entry: authorizes, submits every accumulated report in
    /// one batch, and in fetch-all mode drains continuation pages until no
    /// report carries a token (the request ceiling is the backstop).
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::NoReports`] when nothing was added;
    /// otherwise propagates authorization and submission failures.
    pub async fn get(&mut self) -> Result<ApiResponse, ClientError> {
        if self.reports.is_empty() {
            return Err(ClientError::NoReports);
        }

        self.authorize().await?;

        let batch = self.reports.clone();
        let mut response = self.submit(batch).await?;

        if self.all_results {
            while response.has_continuation() {
                info!("Continuation tokens present, fetching next pages");
                response.paginate(self).await?;
            }
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{report_page, FakeService};
    use gareport_core::BatchGetResponse;

    fn sample_report() -> Report {
        let mut report = Report::new("A", "123");
        report
            .date("2020-01-01", "2020-01-31")
            .metric("sessions")
            .dimension("country");
        report
    }

    #[tokio::test]
    async fn test_get_without_reports_fails() {
        let mut client = Client::new(FakeService::default());
        let err = client.get().await.unwrap_err();
        assert!(matches!(err, ClientError::NoReports));
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_batch() {
        let mut client = Client::new(FakeService::default());
        let err = client.submit(Vec::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyBatch));
    }

    #[tokio::test]
    async fn test_submit_requires_authorization() {
        let mut client = Client::new(FakeService::default());
        let err = client.submit(vec![sample_report()]).await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(_)));
    }

    #[tokio::test]
    async fn test_ceiling_trips_without_contacting_the_endpoint() {
        let service = FakeService::script(vec![
            BatchGetResponse {
                reports: vec![report_page("ga:country", "ga:sessions", None, &[], None)],
            },
            BatchGetResponse::default(),
        ]);

        let mut client = Client::with_options(
            service.clone(),
            ClientOptions {
                max_requests: 1,
                all_results: false,
            },
        );

        client.authorize().await.unwrap();
        client.submit(vec![sample_report()]).await.unwrap();

        let err = client.submit(vec![sample_report()]).await.unwrap_err();
        assert!(matches!(err, ClientError::RequestCeiling));
        assert_eq!(service.recorded_requests().len(), 1);
        assert_eq!(client.remaining_requests(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_propagates() {
        let service = FakeService::script(Vec::new());
        let mut client = Client::new(service);
        client.authorize().await.unwrap();

        let err = client.submit(vec![sample_report()]).await.unwrap_err();
        assert!(matches!(err, ClientError::Remote(_)));
    }

    #[tokio::test]
    async fn test_get_submits_one_batch_without_fetch_all() {
        let service = FakeService::script(vec![BatchGetResponse {
            reports: vec![report_page(
                "ga:country",
                "ga:sessions",
                None,
                &[("Canada", "10"), ("Mexico", "5")],
                Some("t1"),
            )],
        }]);

        let mut client = Client::new(service.clone());
        client.add(sample_report());

        let response = client.get().await.unwrap();
        assert_eq!(service.recorded_requests().len(), 1);
        assert!(response.has_continuation());
        assert_eq!(response.to_records().unwrap()[0].len(), 2);
    }

    #[tokio::test]
    async fn test_get_fetch_all_drains_continuation_pages() {
        let service = FakeService::script(vec![
            BatchGetResponse {
                reports: vec![report_page(
                    "ga:country",
                    "ga:sessions",
                    None,
                    &[("Canada", "10"), ("Mexico", "5")],
                    Some("t1"),
                )],
            },
            BatchGetResponse {
                reports: vec![report_page(
                    "ga:country",
                    "ga:sessions",
                    None,
                    &[("Brazil", "2")],
                    None,
                )],
            },
        ]);

        let mut client = Client::with_options(
            service.clone(),
            ClientOptions {
                max_requests: 10,
                all_results: true,
            },
        );
        client.add(sample_report());

        let response = client.get().await.unwrap();

        // One authorization, two submissions; the second carries the
        // continuation token of the first page.
        assert_eq!(service.auth_count(), 1);
        let recorded = service.recorded_requests();
        assert_eq!(recorded.len(), 2);
        assert_eq!(
            recorded[1].report_requests[0].page_token.as_deref(),
            Some("t1")
        );

        // Rows from both pages land on the original report.
        assert!(!response.has_continuation());
        let records = response.to_records().unwrap();
        assert_eq!(records[0].len(), 3);
        assert_eq!(response.requests()[0].name(), "A");
    }

    #[tokio::test]
    async fn test_fetch_all_runaway_pagination_hits_the_ceiling() {
        // Every page advertises another token; the ceiling must stop the
        // loop rather than spin forever.
        let page = || BatchGetResponse {
            reports: vec![report_page(
                "ga:country",
                "ga:sessions",
                None,
                &[("Canada", "1")],
                Some("again"),
            )],
        };
        let service = FakeService::script(vec![page(), page(), page()]);

        let mut client = Client::with_options(
            service,
            ClientOptions {
                max_requests: 3,
                all_results: true,
            },
        );
        client.add(sample_report());

        let err = client.get().await.unwrap_err();
        assert!(matches!(err, ClientError::RequestCeiling));
    }
}
