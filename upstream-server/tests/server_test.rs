//! Live socket tests against a bound listener

use std::time::{Duration, Instant};

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use upstream_config::UpstreamConfig;
use upstream_server::{
    resolve_listen_addr, serve, serve_listener, serve_tls, AppConfig, AppContext, Server,
};

#[tokio::test]
async fn test_live_server_round_trip() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = upstream_server::create_app(AppContext::default(), AppConfig::default());

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(serve_listener(listener, app, async {
        let _ = shutdown_rx.await;
    }));

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let started = Instant::now();
    let response = client
        .get(format!("{}/size/32", base))
        .header("X-Delay", "100ms")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.text().await.unwrap().len(), 32);
    assert!(started.elapsed() >= Duration::from_millis(100));

    let resources: serde_json::Value = client
        .get(format!("{}/resource?limit=2", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resources.as_object().unwrap().len(), 2);

    let missing = client
        .get(format!("{}/resource/150", base))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(missing.text().await.unwrap(), "Not Found");

    shutdown_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_serve_rejects_malformed_address() {
    assert!(serve("localhost").await.is_err());
    assert!(serve("127.0.0.1:http").await.is_err());
}

#[tokio::test]
async fn test_serve_tls_fails_on_missing_material() {
    let result = serve_tls(
        "127.0.0.1:0",
        "/nonexistent/upstream/cert.pem",
        "/nonexistent/upstream/key.pem",
    )
    .await;

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to load TLS certificate"));
}

#[tokio::test]
async fn test_server_binds_hostname() {
    let mut config = UpstreamConfig::default();
    config.server.set_listen_address("localhost:0").unwrap();
    config.validate_all().unwrap();

    let server = Server::new(config);
    let listener = server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();
    assert!(addr.ip().is_loopback());
    assert_ne!(addr.port(), 0);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let running = tokio::spawn(serve_listener(listener, server.build_app(), async {
        let _ = shutdown_rx.await;
    }));

    let response = reqwest::get(format!("http://{}/xml", addr)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    shutdown_tx.send(()).unwrap();
    running.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_resolve_listen_addr_accepts_hostnames() {
    let mut config = UpstreamConfig::default();
    config.server.set_listen_address("localhost:8443").unwrap();

    let addr = resolve_listen_addr(&config.server).await.unwrap();
    assert!(addr.ip().is_loopback());
    assert_eq!(addr.port(), 8443);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_serve_tls_answers_over_https() {
    let dir = tempfile::tempdir().unwrap();
    let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let cert_path = dir.path().join("cert.pem");
    let key_path = dir.path().join("key.pem");
    std::fs::write(&cert_path, certified.cert.pem()).unwrap();
    std::fs::write(&key_path, certified.key_pair.serialize_pem()).unwrap();

    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let addr = format!("127.0.0.1:{}", port);

    let server = tokio::spawn({
        let addr = addr.clone();
        async move { serve_tls(&addr, cert_path, key_path).await }
    });

    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .build()
        .unwrap();
    let url = format!("https://{}/xml", addr);

    let mut response = None;
    for _ in 0..50 {
        match client.get(&url).send().await {
            Ok(ok) => {
                response = Some(ok);
                break;
            }
            Err(_) => tokio::time::sleep(Duration::from_millis(100)).await,
        }
    }

    let response = response.expect("HTTPS listener never came up");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.text().await.unwrap().contains("<slideshow"));

    assert!(!server.is_finished());
    server.abort();
}
