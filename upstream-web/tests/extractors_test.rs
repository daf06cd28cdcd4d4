// Extractors wired through a real router
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use chrono::{Duration as ChronoDuration, Utc};
use tower::ServiceExt;
use upstream_web::{
    error_logging_middleware, handle_not_found, request_id_middleware, DelayHeaders, LimitQuery,
    REQUEST_ID_HEADER, X_DELAY, X_DELAY_PERCENT, X_SLOWDOWN, X_SLOWDOWN_FROM,
};

async fn describe(DelayHeaders(directive): DelayHeaders, query: LimitQuery) -> String {
    format!(
        "fixed={:?} percent={} slowdown={:?} limit={:?}",
        directive.fixed_delay,
        directive.delay_probability_percent,
        directive.slowdown_delay,
        query.limit
    )
}

fn app() -> Router {
    Router::new()
        .route("/probe", get(describe))
        .fallback(handle_not_found)
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
}

async fn send(request: Request<Body>) -> (StatusCode, String) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_all_headers_reach_the_handler() {
    let from = (Utc::now() - ChronoDuration::minutes(1)).to_rfc3339();
    let request = Request::builder()
        .uri("/probe?limit=7")
        .header(X_DELAY, "200ms")
        .header(X_DELAY_PERCENT, "40")
        .header(X_SLOWDOWN, "2s")
        .header(X_SLOWDOWN_FROM, from)
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "fixed=Some(200ms) percent=40 slowdown=Some(2s) limit=Some(7)"
    );
}

#[tokio::test]
async fn test_bad_slowdown_timestamp_rejects() {
    let request = Request::builder()
        .uri("/probe")
        .header(X_DELAY, "5s")
        .header(X_SLOWDOWN, "1s")
        .header(X_SLOWDOWN_FROM, "not-a-time")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Invalid timestamp 'not-a-time'"), "{}", body);
}

#[tokio::test]
async fn test_unknown_route_keeps_request_id() {
    let request = Request::builder()
        .uri("/missing")
        .header(REQUEST_ID_HEADER, "abc")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "abc");
}
