//! The aggregated batch response.
//!
//! An [`ApiResponse`] owns the 1:1 ordinal pairing between raw report
//! results and the descriptors that produced them. Pagination merges
//! mutate it in place by appending rows; the pairing itself never changes,
//! so the pair at index `i` always originates from the `i`-th submitted
//! descriptor, across any number of merge rounds.

use std::fmt;

use gareport_core::{BatchGetResponse, RawReport, Record, Report, ReportOverrides};
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::client::Client;
use crate::error::ClientError;
use crate::service::ReportingService;

/// Raw batched results paired with their originating descriptors.
pub struct ApiResponse {
    reports: Vec<RawReport>,
    requests: Vec<Report>,
}

impl ApiResponse {
    /// Pairs a raw batched result with its originating descriptor list.
    pub fn new(raw: BatchGetResponse, requests: Vec<Report>) -> Self {
        if raw.reports.len() != requests.len() {
            warn!(
                results = raw.reports.len(),
                requests = requests.len(),
                "Result count does not match request count"
            );
        }

        let response = Self {
            reports: raw.reports,
            requests,
        };

        response.each(|report, request, _| {
            debug!(report = %request.name(), rows = report.data.rows.len(), "Received records");
            None::<()>
        });

        response
    }

    /// Number of report pairs.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// True when the response holds no reports.
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// The raw report results, in submission order.
    pub fn reports(&self) -> &[RawReport] {
        &self.reports
    }

    /// The originating descriptors, in submission order.
    pub fn requests(&self) -> &[Report] {
        &self.requests
    }

    /// Raw result at `index`.
    pub fn report(&self, index: usize) -> Option<&RawReport> {
        self.reports.get(index)
    }

    /// Originating descriptor at `index`.
    pub fn request(&self, index: usize) -> Option<&Report> {
        self.requests.get(index)
    }

    /// Calls `f` on every pair in order and collects the `Some` returns.
    ///
    /// Doubles as ordered iteration (ignore the return) and as a filter
    /// over the pairs, mirroring how the pagination path selects reports
    /// that still need another page.
    pub fn each<T>(&self, mut f: impl FnMut(&RawReport, &Report, usize) -> Option<T>) -> Vec<T> {
        self.reports
            .iter()
            .zip(self.requests.iter())
            .enumerate()
            .filter_map(|(index, (report, request))| f(report, request, index))
            .collect()
    }

    /// True when any report still carries a continuation token.
    pub fn has_continuation(&self) -> bool {
        self.reports
            .iter()
            .any(|report| report.next_page_token.is_some())
    }

    /// Derives one continuation request per token-carrying pair, tagged
    /// with the pair's ordinal slot.
    fn continuation_requests(&self) -> Vec<(usize, Report)> {
        self.each(|report, request, index| {
            report.next_page_token.as_ref().map(|token| {
                let clone = request.clone_with(
                    format!("{}-page-{token}", request.name()),
                    ReportOverrides {
                        page_token: Some(token.clone()),
                        ..ReportOverrides::default()
                    },
                );
                (index, clone)
            })
        })
    }

    /// Fetches one round of continuation pages and merges them in.
    ///
    /// For every pair whose result carries a continuation token, a clone
    /// of the originating descriptor (named `<name>-page-<token>`, with
    /// `pageToken` set) is submitted through `client` in a single derived
    /// batch. Each returned result's rows are appended onto the original
    /// pair's rows, and the pair's token is replaced by the follow-up's —
    /// cleared when the follow-up is the last page — so repeated rounds
    /// converge. Resolves immediately when no pair needs continuation.
    ///
    /// # Errors
    ///
    /// Propagates whatever the client's submission raises.
    pub async fn paginate<S: ReportingService>(
        &mut self,
        client: &mut Client<S>,
    ) -> Result<(), ClientError> {
        let continuations = self.continuation_requests();
        if continuations.is_empty() {
            return Ok(());
        }

        debug!(reports = continuations.len(), "Fetching continuation pages");

        let (slots, derived): (Vec<usize>, Vec<Report>) = continuations.into_iter().unzip();
        let follow = client.submit(derived).await?;

        for (slot, incoming) in slots.into_iter().zip(follow.reports) {
            let target = &mut self.reports[slot];
            target.data.rows.extend(incoming.data.rows);
            target.next_page_token = incoming.next_page_token;
        }

        Ok(())
    }

    /// Appends `other`'s rows onto this response, pair by ordinal pair.
    ///
    /// Each pair adopts the incoming side's continuation token.
    ///
    /// # Errors
    ///
    /// Fails fast with [`ClientError::MergeMismatch`] when the two
    /// responses hold different report counts; nothing is merged.
    pub fn merge_with(&mut self, other: ApiResponse) -> Result<(), ClientError> {
        if self.reports.len() != other.reports.len() {
            return Err(ClientError::MergeMismatch {
                left: self.reports.len(),
                right: other.reports.len(),
            });
        }

        for (target, incoming) in self.reports.iter_mut().zip(other.reports) {
            target.data.rows.extend(incoming.data.rows);
            target.next_page_token = incoming.next_page_token;
        }

        Ok(())
    }

    /// Flattens every report into plain records, ordinally aligned with
    /// the originating descriptors.
    ///
    /// # Errors
    ///
    /// Fails when a report's rows are inconsistent with its column header.
    pub fn to_records(&self) -> Result<Vec<Vec<Record>>, ClientError> {
        self.reports
            .iter()
            .map(|report| report.flatten().map_err(ClientError::from))
            .collect()
    }
}

impl Serialize for ApiResponse {
    /// Serializes the stored raw report list.
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.reports.serialize(serializer)
    }
}

impl fmt::Display for ApiResponse {
    /// Renders the same stored raw report list as indented JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self.reports).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl fmt::Debug for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiResponse")
            .field("reports", &self.reports.len())
            .field("requests", &self.requests.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientOptions;
    use crate::testutil::{report_page, FakeService};
    use gareport_core::BatchGetResponse;

    fn named_report(name: &str) -> Report {
        let mut report = Report::new(name, "123");
        report
            .date("2020-01-01", "2020-01-31")
            .metric("sessions")
            .dimension("country");
        report
    }

    fn two_report_response(token_on_second: Option<&str>) -> ApiResponse {
        ApiResponse::new(
            BatchGetResponse {
                reports: vec![
                    report_page("ga:country", "ga:sessions", None, &[("Canada", "1")], None),
                    report_page(
                        "ga:country",
                        "ga:sessions",
                        None,
                        &[("Mexico", "2"), ("Brazil", "3")],
                        token_on_second,
                    ),
                ],
            },
            vec![named_report("first"), named_report("second")],
        )
    }

    #[test]
    fn test_each_collects_only_some_returns() {
        let response = two_report_response(Some("tok"));

        let names = response.each(|report, request, index| {
            report
                .next_page_token
                .as_ref()
                .map(|_| format!("{index}:{}", request.name()))
        });

        assert_eq!(names, vec!["1:second"]);
    }

    #[test]
    fn test_continuation_clone_naming_and_token() {
        let response = two_report_response(Some("t99"));

        let continuations = response.continuation_requests();
        assert_eq!(continuations.len(), 1);

        let (slot, clone) = &continuations[0];
        assert_eq!(*slot, 1);
        assert_eq!(clone.name(), "second-page-t99");
        assert_eq!(clone.request().page_token.as_deref(), Some("t99"));

        // Only the name and token differ from the source descriptor.
        let mut expected = response.requests()[1].to_wire();
        expected.page_token = Some("t99".to_string());
        assert_eq!(clone.to_wire(), expected);
    }

    #[tokio::test]
    async fn test_paginate_merges_into_the_tracked_slot() {
        // Only the SECOND report paginates; its follow-up comes back at
        // position 0 of the derived batch and must still land on slot 1.
        let mut response = two_report_response(Some("t1"));

        let service = FakeService::script(vec![BatchGetResponse {
            reports: vec![report_page(
                "ga:country",
                "ga:sessions",
                None,
                &[("Chile", "4")],
                None,
            )],
        }]);
        let mut client = Client::new(service.clone());
        client.authorize().await.unwrap();

        response.paginate(&mut client).await.unwrap();

        assert_eq!(response.report(0).unwrap().data.rows.len(), 1);
        assert_eq!(response.report(1).unwrap().data.rows.len(), 3);
        assert!(!response.has_continuation());

        // The originating descriptors are untouched by the merge.
        assert_eq!(response.requests()[0].name(), "first");
        assert_eq!(response.requests()[1].name(), "second");

        let recorded = service.recorded_requests();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].report_requests.len(), 1);
        assert_eq!(
            recorded[0].report_requests[0].page_token.as_deref(),
            Some("t1")
        );
    }

    #[tokio::test]
    async fn test_paginate_resolves_immediately_without_tokens() {
        let mut response = two_report_response(None);

        let service = FakeService::script(Vec::new());
        let mut client = Client::with_options(
            service.clone(),
            ClientOptions {
                max_requests: 1,
                all_results: false,
            },
        );
        client.authorize().await.unwrap();

        response.paginate(&mut client).await.unwrap();

        // No submission was made and the ceiling is untouched.
        assert!(service.recorded_requests().is_empty());
        assert_eq!(client.remaining_requests(), 1);
    }

    #[test]
    fn test_merge_with_is_row_count_additive() {
        let mut left = two_report_response(Some("tok"));
        let right = two_report_response(None);

        left.merge_with(right).unwrap();

        assert_eq!(left.report(0).unwrap().data.rows.len(), 2);
        assert_eq!(left.report(1).unwrap().data.rows.len(), 4);
        // The incoming side's (absent) token is adopted.
        assert!(!left.has_continuation());
    }

    #[test]
    fn test_merge_with_fails_fast_on_length_mismatch() {
        let mut left = two_report_response(None);
        let right = ApiResponse::new(
            BatchGetResponse {
                reports: vec![report_page("ga:country", "ga:sessions", None, &[], None)],
            },
            vec![named_report("only")],
        );

        let err = left.merge_with(right).unwrap_err();
        assert!(matches!(
            err,
            ClientError::MergeMismatch { left: 2, right: 1 }
        ));
        // Fail fast: nothing merged.
        assert_eq!(left.report(0).unwrap().data.rows.len(), 1);
    }

    #[test]
    fn test_to_records_is_ordinally_aligned() {
        let response = two_report_response(None);
        let records = response.to_records().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[1].len(), 2);
        assert_eq!(records[0][0]["ga:country"], "Canada");
        assert_eq!(records[1][1]["ga:country"], "Brazil");
    }

    #[test]
    fn test_serialization_and_display_share_the_stored_reports() {
        let response = two_report_response(Some("tok"));

        let serialized = serde_json::to_value(&response).unwrap();
        let displayed: serde_json::Value = serde_json::from_str(&response.to_string()).unwrap();

        assert_eq!(serialized, displayed);
        assert_eq!(serialized.as_array().unwrap().len(), 2);
        assert_eq!(serialized[1]["nextPageToken"], "tok");
    }
}
