use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::integration::common::setup_test_app;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn enqueue_request(body: &serde_json::Value) -> Request<Body> {
    Request::post("/enqueue")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn health_returns_200() {
    let (app, _pool) = setup_test_app().await;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "ok");
}

#[tokio::test]
async fn enqueue_and_get_job() {
    let (app, _pool) = setup_test_app().await;

    let create_body = serde_json::json!({
        "url": "https://example.com/p/1",
        "connector": "wildberries"
    });

    let response = app
        .clone()
        .oneshot(enqueue_request(&create_body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let json = body_json(response).await;
    assert_eq!(json["status"], "enqueued");
    let job_id = json["job_id"].as_i64().unwrap();

    let response = app
        .oneshot(
            Request::get(format!("/jobs/{job_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"].as_i64(), Some(job_id));
    assert_eq!(json["url"], "https://example.com/p/1");
    assert_eq!(json["connector"], "wildberries");
    assert_eq!(json["status"], "pending");
    assert_eq!(json["attempts"], 0);
    assert_eq!(json["result"], "");
    assert!(json["created_at"].is_string());
    assert!(json["updated_at"].is_string());
}

#[tokio::test]
async fn enqueue_defaults_connector_to_generic() {
    let (app, _pool) = setup_test_app().await;

    let create_body = serde_json::json!({"url": "https://example.com/p/1"});
    let response = app
        .clone()
        .oneshot(enqueue_request(&create_body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let job_id = body_json(response).await["job_id"].as_i64().unwrap();

    let response = app
        .oneshot(
            Request::get(format!("/jobs/{job_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(body_json(response).await["connector"], "generic");
}

#[tokio::test]
async fn enqueue_rejects_malformed_url() {
    let (app, _pool) = setup_test_app().await;

    let create_body = serde_json::json!({"url": "definitely not a url"});
    let response = app
        .clone()
        .oneshot(enqueue_request(&create_body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "validation_error");

    // No job record was created
    let response = app
        .oneshot(Request::get("/jobs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(response).await["total"], 0);
}

#[tokio::test]
async fn get_unknown_job_returns_404() {
    let (app, _pool) = setup_test_app().await;

    let response = app
        .oneshot(Request::get("/jobs/424242").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn list_jobs_honors_limit_newest_first() {
    let (app, _pool) = setup_test_app().await;

    let mut ids = Vec::new();
    for n in 0..5 {
        let create_body = serde_json::json!({"url": format!("https://example.com/p/{n}")});
        let response = app
            .clone()
            .oneshot(enqueue_request(&create_body))
            .await
            .unwrap();
        ids.push(body_json(response).await["job_id"].as_i64().unwrap());
    }

    let response = app
        .oneshot(Request::get("/jobs?limit=2").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["jobs"][0]["id"].as_i64(), Some(ids[4]));
    assert_eq!(json["jobs"][1]["id"].as_i64(), Some(ids[3]));
}
