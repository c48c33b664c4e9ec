//! Integration tests for the provider adapters over HTTP

use std::time::Duration;

use bullion::error::SourceError;
use bullion::models::{Metal, Price};
use bullion::services::market_data::{QuoteSource, BROWSER_USER_AGENT};
use bullion::services::sources::{CbrXmlSource, MfdTableSource};
use chrono::Utc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::*;

const MFD_PATH: &str = "/centrobank/preciousmetals/";
const CBR_PATH: &str = "/scripts/xml_metall.asp";

async fn mfd_upstream(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MFD_PATH))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

fn mfd_source(server: &MockServer, timeout: Duration) -> MfdTableSource {
    MfdTableSource::with_url(format!("{}{}", server.uri(), MFD_PATH), timeout)
}

#[tokio::test]
async fn mfd_fetch_parses_table() {
    let server = mfd_upstream(ResponseTemplate::new(200).set_body_string(standard_mfd_page())).await;
    let source = mfd_source(&server, Duration::from_secs(5));

    let batch = source.fetch(30).await.expect("fetch succeeds");
    assert_eq!(batch.current.len(), 4);
    assert_eq!(batch.current[0].metal, Metal::Gold);
    assert_eq!(batch.current[0].price.to_string(), "8372.41");
    assert_eq!(batch.history.get(Metal::Gold).len(), HISTORY_ROWS);
}

#[tokio::test]
async fn mfd_fetch_sends_browser_user_agent() {
    let server = mfd_upstream(ResponseTemplate::new(200).set_body_string(standard_mfd_page())).await;
    mfd_source(&server, Duration::from_secs(5))
        .fetch(30)
        .await
        .expect("fetch succeeds");

    let requests = server.received_requests().await.expect("wiremock requests");
    assert_eq!(requests.len(), 1);
    let user_agent = requests[0]
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(user_agent, BROWSER_USER_AGENT);
}

#[tokio::test]
async fn mfd_non_success_status_is_network_error() {
    let server = mfd_upstream(ResponseTemplate::new(503)).await;
    let err = mfd_source(&server, Duration::from_secs(5))
        .fetch(30)
        .await
        .unwrap_err();

    match err {
        SourceError::Network(message) => assert!(message.contains("503"), "{}", message),
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn mfd_slow_upstream_times_out() {
    let server = mfd_upstream(
        ResponseTemplate::new(200)
            .set_body_string(standard_mfd_page())
            .set_delay(Duration::from_secs(3)),
    )
    .await;
    let err = mfd_source(&server, Duration::from_millis(200))
        .fetch(30)
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Network(_)), "{:?}", err);
}

#[tokio::test]
async fn mfd_page_without_table_is_format_error() {
    let server = mfd_upstream(
        ResponseTemplate::new(200).set_body_string("<html><body>Service unavailable</body></html>"),
    )
    .await;
    let err = mfd_source(&server, Duration::from_secs(5))
        .fetch(30)
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::SourceFormat(_)));
}

#[tokio::test]
async fn cbr_fetch_requests_date_range() {
    let server = MockServer::start().await;
    let xml = cbr_document(&[
        cbr_record("31.05.2024", "1", "8350,10"),
        cbr_record("01.06.2024", "1", "8372,41"),
        cbr_record("01.06.2024", "2", "80,12"),
        cbr_record("01.06.2024", "3", "2500,00"),
        cbr_record("01.06.2024", "4", "2000,00"),
    ]);
    Mock::given(method("GET"))
        .and(path(CBR_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml))
        .mount(&server)
        .await;

    let source = CbrXmlSource::with_url(format!("{}{}", server.uri(), CBR_PATH), Duration::from_secs(5));
    let batch = source.fetch(30).await.expect("fetch succeeds");

    assert_eq!(batch.current.len(), 4);
    let gold = batch.current.iter().find(|q| q.metal == Metal::Gold).unwrap();
    assert_eq!(gold.date, Some(date(1, 6, 2024)));
    assert!(matches!(gold.price, Price::Available(_)));
    assert_eq!(batch.history.get(Metal::Gold).len(), 2);

    let requests = server.received_requests().await.expect("wiremock requests");
    let query: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let today = Utc::now().date_naive().format("%d/%m/%Y").to_string();
    assert!(query.iter().any(|(k, _)| k == "date_req1"));
    assert!(query.iter().any(|(k, v)| k == "date_req2" && *v == today));
}
