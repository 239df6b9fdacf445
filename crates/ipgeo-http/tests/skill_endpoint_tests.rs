//! Integration tests for the skill webhook endpoint

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use ipgeo_core::{GeoRecord, OracleError, SkillConfig, SkillConfigBuilder, SkillRouter};
use ipgeo_http::{HttpRuntimeConfigBuilder, SkillRuntime};
use ipgeo_testing::{MockGeoOracle, fixtures};
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt;

fn runtime(oracle: &MockGeoOracle, config: SkillConfig) -> SkillRuntime<MockGeoOracle> {
    SkillRuntime::new(SkillRouter::new(oracle.clone(), config)).unwrap()
}

fn create_test_app(oracle: &MockGeoOracle) -> axum::Router {
    runtime(oracle, SkillConfig::default()).router()
}

fn skill_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/skill")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn lookup_body(octets: [&str; 4]) -> Value {
    fixtures::envelope_json(fixtures::intent_request_json(
        "LookupCityIntent",
        &[
            ("One", Some(octets[0])),
            ("Two", Some(octets[1])),
            ("Three", Some(octets[2])),
            ("Four", Some(octets[3])),
        ],
    ))
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_lookup_returns_speechlet_envelope() {
    let oracle = MockGeoOracle::new().with_record(
        "8.8.8.8",
        GeoRecord::new("Mountain View", "California", "United States"),
    );
    let app = create_test_app(&oracle);

    let response = app
        .oneshot(skill_request(&lookup_body(["8", "8", "8", "8"])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["version"], "1.0");
    assert_eq!(json["sessionAttributes"], json!({}));
    assert_eq!(json["response"]["outputSpeech"]["type"], "PlainText");
    assert_eq!(
        json["response"]["outputSpeech"]["text"],
        "That address is in Mountain View, California, United States"
    );
    assert_eq!(json["response"]["card"]["type"], "Simple");
    assert_eq!(json["response"]["card"]["title"], "IP Geo Lookup - 8.8.8.8");
    assert_eq!(
        json["response"]["card"]["content"],
        json["response"]["outputSpeech"]["text"]
    );
    assert_eq!(json["response"]["reprompt"]["outputSpeech"]["text"], Value::Null);
    assert_eq!(json["response"]["shouldEndSession"], true);
}

#[tokio::test]
async fn test_private_address_is_ordinary_response() {
    let oracle = MockGeoOracle::new();
    let app = create_test_app(&oracle);

    let response = app
        .oneshot(skill_request(&lookup_body(["192", "168", "0", "1"])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["response"]["shouldEndSession"], false);
    assert_eq!(
        json["response"]["reprompt"]["outputSpeech"]["text"],
        "Please try again with a public address."
    );
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_undecodable_body_is_bad_request() {
    let app = create_test_app(&MockGeoOracle::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/skill")
                .header("x-request-id", "client-req-42")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-request-id"], "client-req-42");

    let json = body_json(response).await;
    assert_eq!(json["error"], "malformed_envelope");
    assert_eq!(json["request_id"], "client-req-42");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_unrecognized_intent_is_bad_request() {
    let app = create_test_app(&MockGeoOracle::new());
    let body = fixtures::envelope_json(fixtures::intent_request_json("AMAZON.CancelIntent", &[]));

    let response = app.oneshot(skill_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "unrecognized_intent");
}

#[tokio::test]
async fn test_application_mismatch_is_bad_request() {
    let config = SkillConfigBuilder::new()
        .expected_application_id("amzn1.ask.skill.other")
        .build()
        .unwrap();
    let app = runtime(&MockGeoOracle::new(), config).router();

    let response = app
        .oneshot(skill_request(&fixtures::envelope_json(json!({
            "type": "LaunchRequest",
            "requestId": "r-1"
        }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "application_mismatch");
}

#[tokio::test]
async fn test_unavailable_database_is_server_error() {
    let oracle = MockGeoOracle::new()
        .with_default_error(OracleError::Unavailable("/data/GeoLite2-City.mmdb".into()));
    let app = create_test_app(&oracle);

    let response = app
        .oneshot(skill_request(&lookup_body(["8", "8", "8", "8"])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "oracle_unavailable");
    assert!(!json["message"].as_str().unwrap().contains("GeoLite2"));
}

#[tokio::test]
async fn test_generated_request_id_when_header_invalid() {
    let app = create_test_app(&MockGeoOracle::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/skill")
                .header("x-request-id", "bad:id")
                .body(Body::from(
                    fixtures::envelope_json(json!({
                        "type": "LaunchRequest",
                        "requestId": "r-1"
                    }))
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let id = response.headers()["x-request-id"].to_str().unwrap();
    assert_ne!(id, "bad:id");
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let runtime = runtime(&MockGeoOracle::new(), SkillConfig::default());
    let config = HttpRuntimeConfigBuilder::new()
        .max_body_size(128)
        .build()
        .unwrap();
    let app = runtime.router_with_config(&config);

    let response = app
        .oneshot(skill_request(&lookup_body(["8", "8", "8", "8"])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test(start_paused = true)]
async fn test_slow_request_times_out() {
    let oracle = MockGeoOracle::new()
        .with_default_record(GeoRecord::default())
        .with_delay(Duration::from_secs(60));
    let skill_config = SkillConfigBuilder::new()
        .lookup_timeout(Duration::from_secs(20))
        .build()
        .unwrap();
    let config = HttpRuntimeConfigBuilder::new()
        .request_timeout_secs(1)
        .build()
        .unwrap();
    let app = runtime(&oracle, skill_config).router_with_config(&config);

    let response = app
        .oneshot(skill_request(&lookup_body(["8", "8", "8", "8"])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_outcomes_recorded_in_metrics() {
    let oracle = MockGeoOracle::new();
    let runtime = runtime(&oracle, SkillConfig::default());
    let metrics = runtime.metrics.clone();
    let app = runtime.router();

    let launch = fixtures::envelope_json(json!({ "type": "LaunchRequest", "requestId": "r-1" }));
    app.clone().oneshot(skill_request(&launch)).await.unwrap();
    app.clone()
        .oneshot(skill_request(&lookup_body(["4", "4", "4", "4"])))
        .await
        .unwrap();
    app.clone()
        .oneshot(skill_request(&json!({ "garbage": true })))
        .await
        .unwrap();

    assert_eq!(metrics.responses("welcome"), 1);
    assert_eq!(metrics.responses("not_found"), 1);
    assert_eq!(metrics.responses("error"), 1);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("ipgeo_skill_responses_total{outcome=\"not_found\"} 1"));
    assert!(text.contains("ipgeo_skill_request_duration_seconds"));
}
