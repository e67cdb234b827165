use super::*;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use tokio::net::TcpListener;

/// Fixed-draw classifier so tests pick the classification branch explicitly.
struct FixedDrawClassifier(f64);

impl OutcomeClassifier for FixedDrawClassifier {
    fn draw(&self) -> f64 {
        self.0
    }
}

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    body: &'static str,
}

const ADA_BODY: &str = r#"{"results":[{"name":{"first":"Ada","last":"Lovelace"},"email":"ada@x.io","picture":{"large":"http://x/p.png"}}]}"#;

async fn handle_api(State(state): State<ServerState>) -> impl IntoResponse {
    (state.status, state.body)
}

async fn spawn_api_server(status: StatusCode, body: &'static str) -> anyhow::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/", get(handle_api))
        .with_state(ServerState { status, body });
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}/api/"))
}

#[tokio::test]
async fn non_200_status_resolves_to_failed_with_that_code() {
    let url = spawn_api_server(StatusCode::INTERNAL_SERVER_ERROR, "oops")
        .await
        .expect("spawn server");
    let client = RandomUserClient::new(url, FixedDrawClassifier(0.8));

    assert_eq!(client.fetch_random_user().await, FetchOutcome::Failed(500));
}

#[tokio::test]
async fn success_draw_resolves_to_the_first_record() {
    let url = spawn_api_server(StatusCode::OK, ADA_BODY)
        .await
        .expect("spawn server");
    let client = RandomUserClient::new(url, FixedDrawClassifier(0.8));

    let outcome = client.fetch_random_user().await;
    let FetchOutcome::Success(record) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(record.full_name(), "Ada Lovelace");
    assert_eq!(record.email, "ada@x.io");
    assert_eq!(record.picture_url.as_deref(), Some("http://x/p.png"));
}

#[tokio::test]
async fn middle_draw_resolves_to_empty() {
    let url = spawn_api_server(StatusCode::OK, ADA_BODY)
        .await
        .expect("spawn server");
    let client = RandomUserClient::new(url, FixedDrawClassifier(0.5));

    assert_eq!(client.fetch_random_user().await, FetchOutcome::Empty);
}

#[tokio::test]
async fn low_draw_resolves_to_simulated_404() {
    let url = spawn_api_server(StatusCode::OK, ADA_BODY)
        .await
        .expect("spawn server");
    let client = RandomUserClient::new(url, FixedDrawClassifier(0.2));

    assert_eq!(client.fetch_random_user().await, FetchOutcome::Failed(404));
}

#[tokio::test]
async fn malformed_body_resolves_to_failed_minus_one() {
    let url = spawn_api_server(StatusCode::OK, "{not json")
        .await
        .expect("spawn server");
    let client = RandomUserClient::new(url, FixedDrawClassifier(0.8));

    assert_eq!(client.fetch_random_user().await, FetchOutcome::Failed(-1));
}

#[tokio::test]
async fn success_draw_with_empty_results_degrades_to_empty() {
    let url = spawn_api_server(StatusCode::OK, r#"{"results":[]}"#)
        .await
        .expect("spawn server");
    let client = RandomUserClient::new(url, FixedDrawClassifier(0.9));

    assert_eq!(client.fetch_random_user().await, FetchOutcome::Empty);
}

#[tokio::test]
async fn unreachable_endpoint_resolves_to_failed_minus_one() {
    // Reserve a port, then drop the listener so nothing is bound there.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = RandomUserClient::new(format!("http://{addr}/api/"), FixedDrawClassifier(0.8));
    assert_eq!(client.fetch_random_user().await, FetchOutcome::Failed(-1));
}

#[tokio::test]
async fn fetch_portrait_returns_raw_bytes() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/p.png", get(|| async { &b"portrait-bytes"[..] }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = RandomUserClient::with_defaults();
    let bytes = client
        .fetch_portrait(&format!("http://{addr}/p.png"))
        .await
        .expect("portrait");
    assert_eq!(bytes, b"portrait-bytes");
}

fn ada_record() -> UserRecord {
    UserRecord {
        name_first: "Ada".to_string(),
        name_last: "Lovelace".to_string(),
        email: "ada@x.io".to_string(),
        picture_url: Some("http://x/p.png".to_string()),
    }
}

#[test]
fn classify_thresholds_are_exclusive_at_the_boundaries() {
    // r <= 0.33 fails, 0.33 < r <= 0.66 is empty, r > 0.66 succeeds.
    assert_eq!(classify(0.0, vec![ada_record()]), FetchOutcome::Failed(404));
    assert_eq!(classify(0.33, vec![ada_record()]), FetchOutcome::Failed(404));
    assert_eq!(classify(0.34, vec![ada_record()]), FetchOutcome::Empty);
    assert_eq!(classify(0.66, vec![ada_record()]), FetchOutcome::Empty);
    assert_eq!(
        classify(0.67, vec![ada_record()]),
        FetchOutcome::Success(ada_record())
    );
}

#[test]
fn thread_rng_classifier_stays_in_unit_interval() {
    let classifier = ThreadRngClassifier;
    for _ in 0..1000 {
        let draw = classifier.draw();
        assert!((0.0..1.0).contains(&draw), "draw out of range: {draw}");
    }
}
