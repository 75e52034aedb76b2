use alquran_lib::{ClientConfig, QuranClient, RequestError, RetryPolicy};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

type Hits = Arc<AtomicUsize>;

/// Serve `router` on an ephemeral port and return the API base URL
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

fn client(base_url: String) -> QuranClient {
    let config = ClientConfig {
        base_url,
        timeout: Some(Duration::from_secs(5)),
        retry: RetryPolicy::default(),
    };
    QuranClient::new(&config).unwrap()
}

async fn flaky_languages(State(hits): State<Hits>) -> (StatusCode, Json<Value>) {
    if hits.fetch_add(1, Ordering::SeqCst) == 0 {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "code": 503, "status": "Service Unavailable", "data": "busy" })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "code": 200, "status": "OK", "data": ["ar", "en"] })))
    }
}

async fn missing(State(hits): State<Hits>) -> (StatusCode, Json<Value>) {
    hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "code": 404, "status": "NOT FOUND", "data": "Surah not found" })),
    )
}

async fn no_editions() -> Json<Value> {
    Json(json!({ "code": 200, "status": "OK", "data": [] }))
}

#[tokio::test]
async fn retries_once_then_succeeds() {
    let hits = Hits::default();
    let router = Router::new()
        .route("/v1/edition/language", get(flaky_languages))
        .with_state(hits.clone());
    let client = client(spawn_upstream(router).await);

    let languages = client.languages().await.expect("second attempt succeeds");

    assert_eq!(languages, vec!["ar", "en"]);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn persistent_status_error_reports_once_after_two_attempts() {
    let hits = Hits::default();
    let router = Router::new()
        .route("/v1/surah/999/en.asad", get(missing))
        .with_state(hits.clone());
    let base = spawn_upstream(router).await;
    let client = client(base.clone());

    let err = client.surah(999, "en.asad").await.unwrap_err();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.to_string(),
        format!("Error Code: 404\nMessage: Http failure response for {base}/surah/999/en.asad: 404 Not Found")
    );
}

#[tokio::test]
async fn unreachable_upstream_has_no_status() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{}/v1", addr)).meta().await.unwrap_err();

    assert!(matches!(err, RequestError::Transport(_)));
    assert_eq!(err.status(), None);
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn empty_language_listing_is_ok() {
    let router = Router::new().route("/v1/edition/language/xx", get(no_editions));
    let client = client(spawn_upstream(router).await);

    let editions = client.editions_for_language("xx").await.unwrap();
    assert!(editions.is_empty());
}

/// Answer every connection with a 503 whose body is cut off mid-stream
async fn spawn_truncating_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = socket
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 64\r\nConnection: close\r\n\r\n{\"code\":",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{}/v1", addr)
}

#[tokio::test]
async fn unreadable_error_body_keeps_status() {
    let client = client(spawn_truncating_upstream().await);

    let err = client.meta().await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().ends_with("/v1/meta: 503 Service Unavailable"));
}
