//! Runs the Yahoo client against a local HTTP server that enforces the
//! cookie + crumb session the real endpoint requires.

use api_client::error::ApiError;
use api_client::{SnapshotSource, YahooFinanceClient};
use configuration::DataSourceSettings;
use core_types::Metric;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const KO_BODY: &str = r#"{"quoteSummary":{"result":[{"financialData":{"returnOnEquity":{"raw":0.42,"fmt":"42%"}}}],"error":null}}"#;
const NOT_FOUND_BODY: &str = r#"{"quoteSummary":{"result":null,"error":{"code":"Not Found","description":"Quote not found"}}}"#;
const UNAUTHORIZED_BODY: &str = r#"{"finance":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#;

#[derive(Default)]
struct FakeYahoo {
    crumbs_issued: AtomicUsize,
    quote_requests: AtomicUsize,
    expire_first_crumb: AtomicBool,
}

impl FakeYahoo {
    fn current_crumb(&self) -> String {
        format!("crumb{}", self.crumbs_issued.load(Ordering::SeqCst))
    }

    fn respond(&self, request: &str) -> (u16, &'static str, String) {
        let target = request.split_whitespace().nth(1).unwrap_or_default();
        let has_cookie = request
            .lines()
            .any(|line| line.to_ascii_lowercase().starts_with("cookie:") && line.contains("A3=session"));

        if target.starts_with("/fc") {
            return (404, "Set-Cookie: A3=session; Path=/\r\n", String::new());
        }
        if target.starts_with("/v1/test/getcrumb") {
            if !has_cookie {
                return (401, "", String::new());
            }
            self.crumbs_issued.fetch_add(1, Ordering::SeqCst);
            return (200, "", self.current_crumb());
        }

        self.quote_requests.fetch_add(1, Ordering::SeqCst);
        let crumb_ok = target.contains(&format!("crumb={}", self.current_crumb()));
        if !has_cookie || !crumb_ok || self.expire_first_crumb.swap(false, Ordering::SeqCst) {
            return (401, "", UNAUTHORIZED_BODY.to_string());
        }
        if target.starts_with("/v10/finance/quoteSummary/KO") {
            (200, "", KO_BODY.to_string())
        } else {
            (404, "", NOT_FOUND_BODY.to_string())
        }
    }
}

async fn start_server(state: Arc<FakeYahoo>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 16 * 1024];
                let mut len = 0;
                while !buf[..len].windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf[len..]).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => len += n,
                    }
                }
                let request = String::from_utf8_lossy(&buf[..len]).to_string();
                let (status, headers, body) = state.respond(&request);
                let response = format!(
                    "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n{headers}\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

fn client_for(base: &str) -> YahooFinanceClient {
    let settings = DataSourceSettings {
        base_url: base.to_string(),
        cookie_url: format!("{base}/fc"),
        ..DataSourceSettings::default()
    };
    let http = reqwest::Client::builder()
        .cookie_store(true)
        .no_proxy()
        .build()
        .unwrap();
    YahooFinanceClient::with_client(http, &settings)
}

#[tokio::test]
async fn handshake_runs_once_and_the_crumb_is_reused() {
    let state = Arc::new(FakeYahoo::default());
    let client = client_for(&start_server(Arc::clone(&state)).await);

    let first = client.fetch_snapshot("ko").await.unwrap();
    let second = client.fetch_snapshot("KO").await.unwrap();

    assert_eq!(first.number(Metric::ReturnOnEquity), Some(dec!(0.42)));
    assert_eq!(first, second);
    assert_eq!(state.crumbs_issued.load(Ordering::SeqCst), 1);
    assert_eq!(state.quote_requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn rejected_crumb_is_renewed_once() {
    let state = Arc::new(FakeYahoo::default());
    state.expire_first_crumb.store(true, Ordering::SeqCst);
    let client = client_for(&start_server(Arc::clone(&state)).await);

    let snapshot = client.fetch_snapshot("KO").await.unwrap();

    assert_eq!(snapshot.symbol(), "KO");
    assert_eq!(state.crumbs_issued.load(Ordering::SeqCst), 2);
    assert_eq!(state.quote_requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unknown_symbol_is_data_unavailable() {
    let state = Arc::new(FakeYahoo::default());
    let client = client_for(&start_server(Arc::clone(&state)).await);

    match client.fetch_snapshot("ZZZZ").await {
        Err(ApiError::DataUnavailable { symbol, reason }) => {
            assert_eq!(symbol, "ZZZZ");
            assert!(reason.contains("Not Found"), "{reason}");
        }
        other => panic!("expected DataUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_crumb_endpoint_is_data_unavailable() {
    let client = client_for("http://127.0.0.1:9");

    assert!(matches!(
        client.fetch_snapshot("KO").await,
        Err(ApiError::DataUnavailable { .. })
    ));
}
