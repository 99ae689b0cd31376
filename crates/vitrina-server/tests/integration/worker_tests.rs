//! End-to-end worker cycles against the real repository: enqueue over HTTP,
//! run one claim/execute/commit cycle, read the terminal record back.

use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use tower::ServiceExt;

use vitrina_client::SelectorExtract;
use vitrina_core::job::{JobStatus, WorkerConfig};
use vitrina_core::job_store::JobStore;
use vitrina_core::snapshot::ProductSnapshot;
use vitrina_core::testutil::{MockFetcher, MockReporter};
use vitrina_core::worker::WorkerService;
use vitrina_core::{AppError, Connector};
use vitrina_db::JobRepository;

use crate::integration::common::setup_test_app;

const PRODUCT_PAGE: &str = r#"
    <html><head>
        <meta property="og:title" content="Shirt">
        <meta property="og:image" content="img.jpg">
    </head><body>
        <div class="price">999 ₽</div>
    </body></html>
"#;

async fn enqueue(app: &axum::Router, url: &str) -> i64 {
    let body = serde_json::json!({"url": url});
    let response = app
        .clone()
        .oneshot(
            Request::post("/enqueue")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    json["job_id"].as_i64().unwrap()
}

#[tokio::test]
async fn worker_cycle_completes_job_with_snapshot() {
    let (app, pool) = setup_test_app().await;
    let repo = JobRepository::new(pool);

    let job_id = enqueue(&app, "https://example.com/p/1").await;

    let worker = WorkerService::new(
        repo.clone(),
        MockFetcher::new(PRODUCT_PAGE),
        SelectorExtract::new(),
        WorkerConfig::default(),
    );

    let claimed = repo.next_pending().await.unwrap().expect("pending job");
    assert_eq!(claimed.id, job_id);
    worker.process_job(&claimed, &MockReporter::new()).await;

    let updated = repo.get_job(job_id).await.unwrap().unwrap();
    assert_eq!(updated.status, JobStatus::Done);
    assert_eq!(updated.attempts, 1);

    let snapshot: ProductSnapshot = serde_json::from_str(&updated.result).unwrap();
    assert_eq!(
        snapshot,
        ProductSnapshot {
            title: "Shirt".into(),
            image: "img.jpg".into(),
            price: "999".into(),
            source_url: "https://example.com/p/1".into(),
        }
    );
}

#[tokio::test]
async fn worker_cycle_records_transport_timeout() {
    let (app, pool) = setup_test_app().await;
    let repo = JobRepository::new(pool);

    let job_id = enqueue(&app, "https://example.com/p/2").await;

    let worker = WorkerService::new(
        repo.clone(),
        MockFetcher::with_error(AppError::Timeout(15)),
        SelectorExtract::new(),
        WorkerConfig::default(),
    );

    let claimed = repo.next_pending().await.unwrap().expect("pending job");
    worker.process_job(&claimed, &MockReporter::new()).await;

    let updated = repo.get_job(job_id).await.unwrap().unwrap();
    assert_eq!(updated.status, JobStatus::Failed);
    assert_eq!(updated.attempts, 1);
    assert!(updated.result.contains("timed out"));

    // Terminal failure is not re-claimed
    assert!(repo.next_pending().await.unwrap().is_none());
}

#[tokio::test]
async fn connector_resolution_is_checked_at_execution_time() {
    // An unknown connector name on the record falls back cleanly
    let (app, pool) = setup_test_app().await;
    let repo = JobRepository::new(pool);

    let body = serde_json::json!({
        "url": "https://example.com/p/3",
        "connector": "somesite-v2"
    });
    let response = app
        .clone()
        .oneshot(
            Request::post("/enqueue")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::ACCEPTED);

    let claimed = repo.next_pending().await.unwrap().unwrap();
    assert_eq!(claimed.connector, "somesite-v2");
    assert_eq!(
        Connector::resolve(&claimed.connector, &claimed.url),
        Connector::Generic
    );
}
