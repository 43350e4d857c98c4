//! Integration tests for the HTTP control plane with a mock server

use seqpipe_core::control::{self, ControlPlane, HttpControlPlane};
use seqpipe_core::{SeqpipeError, ServerAddress};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn control_plane(server: &MockServer) -> HttpControlPlane {
    let address = ServerAddress::parse(&server.uri()).unwrap();
    HttpControlPlane::new(address, Some(Duration::from_secs(5))).unwrap()
}

async fn mount_json(server: &MockServer, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_server_status_over_http() {
    let server = MockServer::start().await;
    mount_json(&server, "/uptime", 200, json!({"uptime": 86_400_000})).await;
    mount_json(&server, "/pipelines", 200, json!({"pipelines": ["mbnb", "phylo"]})).await;

    let (uptime, pipelines) = control::server_status(&control_plane(&server)).await.unwrap();

    assert_eq!(uptime, Duration::from_secs(86_400));
    assert_eq!(pipelines, vec!["mbnb", "phylo"]);
}

#[tokio::test]
async fn test_endpoint_joined_under_base_path() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/pipelines", 200, json!({"pipelines": ["mbnb"]})).await;

    let address = ServerAddress::parse(&format!("{}/api", server.uri())).unwrap();
    let control = HttpControlPlane::new(address, None).unwrap();

    assert_eq!(control.pipelines().await.unwrap(), vec!["mbnb"]);
}

#[tokio::test]
async fn test_non_success_status_is_control_plane_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pipelines"))
        .respond_with(ResponseTemplate::new(503).set_body_string("warming up"))
        .mount(&server)
        .await;

    let err = control_plane(&server).pipelines().await.unwrap_err();

    assert_eq!(err.error_code(), "CONTROL_PLANE");
    match err {
        SeqpipeError::ControlPlane {
            status_code, url, ..
        } => {
            assert_eq!(status_code, Some(503));
            assert!(url.unwrap().ends_with("/pipelines"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_negative_uptime_is_rejected() {
    let server = MockServer::start().await;
    mount_json(&server, "/uptime", 200, json!({"uptime": -1})).await;

    let err = control_plane(&server).uptime().await.unwrap_err();
    assert_eq!(err.error_code(), "CONTROL_PLANE");
}

#[tokio::test]
async fn test_unexpected_body_is_control_plane_error() {
    let server = MockServer::start().await;
    mount_json(&server, "/pipelines", 200, json!({"names": ["mbnb"]})).await;

    let err = control_plane(&server).pipelines().await.unwrap_err();
    assert_eq!(err.error_code(), "CONTROL_PLANE");
}
