//! Integration tests for the wire-format types.

use gareport_core::{BatchGetRequest, BatchGetResponse, Report};

#[test]
fn test_batch_request_round_trip() {
    let mut a = Report::new("a", "123");
    a.date("2020-01-01", "2020-01-31").metric("sessions").dimension("country");

    let mut b = Report::new("b", "456");
    b.date("2020-02-01", "2020-02-29").metric("pageviews").limit(50);

    let body = BatchGetRequest {
        report_requests: vec![a.to_wire(), b.to_wire()],
    };

    let json = serde_json::to_string(&body).unwrap();
    assert!(json.contains("\"reportRequests\""));

    let parsed: BatchGetRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, body);
    assert_eq!(parsed.report_requests[1].page_size, Some(50));
}

#[test]
fn test_batch_response_round_trip() {
    let json = r#"{
        "reports": [
            {
                "columnHeader": {
                    "dimensions": ["ga:country"],
                    "metricHeader": {
                        "metricHeaderEntries": [
                            {"name": "ga:sessions", "type": "INTEGER"},
                            {"name": "ga:bounceRate", "type": "PERCENT"}
                        ]
                    }
                },
                "data": {
                    "rows": [
                        {"dimensions": ["Canada"], "metrics": [{"values": ["42", "0.5"]}]},
                        {"dimensions": ["Mexico"], "metrics": [{"values": ["7", "0.25"]}]}
                    ],
                    "rowCount": 2
                }
            }
        ]
    }"#;

    let response: BatchGetResponse = serde_json::from_str(json).unwrap();
    let reencoded = serde_json::to_string(&response).unwrap();
    let reparsed: BatchGetResponse = serde_json::from_str(&reencoded).unwrap();
    assert_eq!(reparsed, response);

    let records = response.reports[0].flatten().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["ga:sessions"], 42);
    assert_eq!(records[1]["ga:bounceRate"], "0.25%");
}
