//! Tests for real-world failure scenarios.
//!
//! A profile source failure aborts the run. Registry failures only blank the affected rows.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coauthor_roster::client::{FileProfileSource, OrcidClient, SemanticScholarClient};
use coauthor_roster::aggregate::SkipReason;
use coauthor_roster::config::Config;
use coauthor_roster::error::{ClientError, RosterError, SourceError};
use coauthor_roster::models::{PublicationRecord, YearRange};
use coauthor_roster::pipeline::{self, RunContext};
use coauthor_roster::{IdentifierRegistry, TargetIdentity};

fn context() -> RunContext {
    let target = TargetIdentity::new("Jane Doe", Vec::<String>::new()).unwrap();
    RunContext::new(target, YearRange::new(2021, 2024).unwrap(), Duration::from_secs(5))
}

fn one_paper_source() -> FileProfileSource {
    FileProfileSource::new(
        vec![PublicationRecord::new("Paper", 2023, ["Jane Doe", "Bob Lee", "Ann Wu"])],
        HashMap::new(),
    )
}

// =============================================================================
// Profile source failures
// =============================================================================

#[tokio::test]
async fn test_source_server_error_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/author/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let config = Config::for_testing(&server.uri());
    let profiles = SemanticScholarClient::new(&config).unwrap();
    let registry = OrcidClient::new(&config).unwrap();

    let err = pipeline::run(&context(), &profiles, &registry).await.unwrap_err();

    assert!(err.is_source_unavailable());
    assert!(matches!(
        err,
        RosterError::SourceUnavailable(SourceError::Client(ClientError::Server { .. }))
    ));
}

#[tokio::test]
async fn test_source_rate_limit_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/author/search"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "60")
                .set_body_string("Rate limit exceeded"),
        )
        .mount(&server)
        .await;

    let config = Config::for_testing(&server.uri());
    let profiles = SemanticScholarClient::new(&config).unwrap();
    let registry = OrcidClient::new(&config).unwrap();

    let err = pipeline::run(&context(), &profiles, &registry).await.unwrap_err();

    match err {
        RosterError::SourceUnavailable(SourceError::Client(client_err)) => {
            assert!(client_err.is_retryable());
            assert_eq!(client_err.retry_after(), Some(Duration::from_secs(60)));
        }
        other => panic!("Expected rate limit, got {other:?}"),
    }
}

#[tokio::test]
async fn test_source_malformed_json_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/author/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json {{{"))
        .mount(&server)
        .await;

    let config = Config::for_testing(&server.uri());
    let profiles = SemanticScholarClient::new(&config).unwrap();
    let registry = OrcidClient::new(&config).unwrap();

    assert!(pipeline::run(&context(), &profiles, &registry).await.is_err());
}

// =============================================================================
// Registry failures
// =============================================================================

#[tokio::test]
async fn test_registry_error_only_blanks_that_row() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orcid/v3.0/expanded-search/"))
        .and(query_param("q", r#"given-names:"Bob" AND family-name:"Lee""#))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orcid/v3.0/expanded-search/"))
        .and(query_param("q", r#"given-names:"Ann" AND family-name:"Wu""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expanded-result": [{"orcid-id": "0000-0004-0000-0001", "institution-name": ["MIT"]}],
            "num-found": 1
        })))
        .mount(&server)
        .await;

    let registry = OrcidClient::new(&Config::for_testing(&server.uri())).unwrap();
    let roster = pipeline::run(&context(), &one_paper_source(), &registry).await.unwrap();

    assert_eq!(roster.rows.len(), 2);
    assert_eq!(roster.rows[0].name, "Ann Wu");
    assert_eq!(roster.rows[0].status, "unique");
    assert_eq!(roster.rows[0].affiliation, "MIT");
    assert_eq!(roster.rows[1].name, "Bob Lee");
    assert_eq!(roster.rows[1].status, "none");
    assert_eq!(roster.rows[1].identifier, "");
}

#[tokio::test]
async fn test_registry_timeout_resolves_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orcid/v3.0/expanded-search/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"expanded-result": null, "num-found": 0}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let registry = OrcidClient::new(&Config::for_testing(&server.uri())).unwrap();
    let ctx = RunContext { lookup_timeout: Duration::from_millis(100), ..context() };

    let roster = pipeline::run(&ctx, &one_paper_source(), &registry).await.unwrap();

    assert_eq!(roster.rows.len(), 2);
    assert!(roster.rows.iter().all(|r| r.status == "none"));
}

#[tokio::test]
async fn test_registry_bad_request_is_client_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orcid/v3.0/expanded-search/"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid query"))
        .mount(&server)
        .await;

    let registry = OrcidClient::new(&Config::for_testing(&server.uri())).unwrap();
    let err = registry.search("Bob", "Lee").await.unwrap_err();

    assert!(matches!(err, ClientError::BadRequest { .. }));
    assert!(!err.is_retryable());
}

// =============================================================================
// Offline source with bad entries
// =============================================================================

#[tokio::test]
async fn test_bad_file_entry_is_skipped_and_rest_aggregate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orcid/v3.0/expanded-search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expanded-result": [],
            "num-found": 0
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("pubs.json");
    std::fs::write(
        &file,
        r#"[
            {"title": "Good", "year": 2023, "authors": ["Jane Doe", "Bob Lee"]},
            {"title": "Bad", "year": 2023, "authors": 42},
            {"title": "No year", "authors": ["Jane Doe", "Ann Wu"]}
        ]"#,
    )
    .unwrap();

    let profiles = FileProfileSource::load(&file).unwrap();
    let registry = OrcidClient::new(&Config::for_testing(&server.uri())).unwrap();
    let roster = pipeline::run(&context(), &profiles, &registry).await.unwrap();

    let names: Vec<_> = roster.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Bob Lee"]);
    assert_eq!(roster.skipped.len(), 1);
    assert_eq!(roster.skipped[0].title, "Bad");
    assert_eq!(roster.skipped[0].reason, SkipReason::EmptyAuthorList);
}

#[test]
fn test_unreadable_publications_file_is_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("pubs.json");
    std::fs::write(&file, r#"{"publications": "not a list"}"#).unwrap();

    let err = FileProfileSource::load(&file).unwrap_err();
    assert!(matches!(err, SourceError::Parse { .. }));
}
