//! Integration tests against a mock Artboard API server

use artboard_client::resources::{CreateDesign, ElementKind, NewElement, RenderFormat};
use artboard_client::{ArtboardClient, Error, ErrorKind, JobStatus, ListParams, RetryPolicy, WaitOptions};
use bytes::Bytes;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ArtboardClient {
    ArtboardClient::builder()
        .api_key("ak_test")
        .base_url(format!("{}/v1", server.uri()))
        .retry_policy(
            RetryPolicy::default()
                .with_initial_delay(Duration::from_millis(1))
                .with_max_delay(Duration::from_millis(10)),
        )
        .build()
        .unwrap()
}

fn design_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "width": 1080,
        "height": 1350,
        "created_at": "2026-08-01T12:00:00Z",
        "updated_at": "2026-08-02T08:30:00Z"
    })
}

#[tokio::test]
async fn get_design_sends_bearer_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/designs/des_1"))
        .and(header("authorization", "Bearer ak_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(design_json("des_1", "Poster")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let design = client.designs().get("des_1").await.unwrap();
    assert_eq!(design.id, "des_1");
    assert_eq!(design.title, "Poster");
    assert_eq!(design.width, 1080);
}

#[tokio::test]
async fn create_design_posts_the_request_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/designs"))
        .and(body_partial_json(json!({
            "title": "Launch poster",
            "width": 1080,
            "height": 1350,
            "template_id": "tpl_9"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(design_json("des_2", "Launch poster")))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = CreateDesign::new("Launch poster", 1080, 1350).with_template("tpl_9");
    let design = client.designs().create(&request).await.unwrap();
    assert_eq!(design.id, "des_2");
}

#[tokio::test]
async fn list_designs_follows_continuation_cursors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/designs"))
        .and(query_param("limit", "2"))
        .and(query_param("continuation", "cur_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [design_json("des_3", "C")]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/designs"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [design_json("des_1", "A"), design_json("des_2", "B")],
            "continuation": "cur_2"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let first = client
        .designs()
        .list(&ListParams::new().with_limit(2))
        .await
        .unwrap();
    assert_eq!(first.items.len(), 2);
    assert!(first.has_more());

    let next = client
        .designs()
        .list(
            &ListParams::new()
                .with_limit(2)
                .with_continuation(first.continuation.unwrap()),
        )
        .await
        .unwrap();
    assert_eq!(next.items.len(), 1);
    assert!(!next.has_more());
}

#[tokio::test]
async fn status_401_maps_to_authentication() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/designs/des_1"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "invalid api key"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.designs().get("des_1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn status_403_with_scope_message_maps_to_insufficient_scope() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/designs/des_1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(
            json!({"error": "insufficient scope for this action"}),
        ))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.designs().delete("des_1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientScope);
}

#[tokio::test]
async fn status_404_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/templates/tpl_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no such template"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.templates().get("tpl_missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "not found: no such template");
}

#[tokio::test]
async fn residual_3xx_is_not_treated_as_an_error() {
    // Redirects are followed automatically, but a 304 has no Location and
    // reaches the client as-is; anything below 400 must pass as success.
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/designs/des_1"))
        .respond_with(ResponseTemplate::new(304))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.designs().delete("des_1").await.unwrap();
}

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/billing/plan"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "hiccup"})))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/billing/plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "studio",
            "renders_per_month": 5000,
            "price_cents": 4900,
            "currency": "USD"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let plan = client.billing().plan().await.unwrap();
    assert_eq!(plan.name, "studio");
}

#[tokio::test]
async fn rate_limit_with_retry_after_header_is_honored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/usage"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_json(json!({"error": "slow down"})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "period_start": "2026-08-01T00:00:00Z",
            "period_end": "2026-08-31T23:59:59Z",
            "renders": 412,
            "api_requests": 8123,
            "storage_bytes": 73400320
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let usage = client.usage().current().await.unwrap();
    assert_eq!(usage.renders, 412);
}

#[tokio::test]
async fn exhausted_retries_surface_the_last_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/billing/plan"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "maintenance"})))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.billing().plan().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.to_string(), "server error: maintenance");
}

#[tokio::test]
async fn validation_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/designs"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"error": "width must be positive"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .designs()
        .create(&CreateDesign::new("Broken", 0, 100))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn request_timeout_surfaces_as_timeout_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/billing/plan"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let client = ArtboardClient::builder()
        .api_key("ak_test")
        .base_url(format!("{}/v1", server.uri()))
        .request_timeout(Duration::from_millis(50))
        .retry_policy(RetryPolicy::none())
        .build()
        .unwrap();

    let err = client.billing().plan().await.unwrap_err();
    assert!(matches!(err, Error::Timeout { .. }));
    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn asset_upload_and_download_round_trip() {
    let server = MockServer::start().await;
    let payload = Bytes::from_static(b"\x89PNG\r\n\x1a\nfake");

    Mock::given(method("POST"))
        .and(path("/v1/assets"))
        .and(query_param("filename", "logo.png"))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ast_1",
            "filename": "logo.png",
            "content_type": "image/png",
            "size_bytes": 12,
            "created_at": "2026-08-01T12:00:00Z"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/assets/ast_1/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(payload.to_vec()),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let asset = client
        .assets()
        .upload("logo.png", "image/png", payload.clone())
        .await
        .unwrap();
    assert_eq!(asset.id, "ast_1");

    let downloaded = client.assets().download("ast_1").await.unwrap();
    assert_eq!(downloaded, payload);
}

#[tokio::test]
async fn render_wait_resolves_a_completed_job() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/renders"))
        .and(body_partial_json(json!({"design_id": "des_1", "format": "png"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "job_1",
            "design_id": "des_1",
            "status": "pending"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/renders/job_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "job_1",
            "design_id": "des_1",
            "status": "completed",
            "output_url": "https://cdn.artboard.dev/out/job_1.png"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request =
        artboard_client::resources::RenderRequest::new("des_1", RenderFormat::Png).with_scale(2.0);
    let queued = client.renders().create(&request).await.unwrap();
    assert_eq!(queued.status, JobStatus::Pending);

    let options = WaitOptions::job().with_poll_interval(Duration::from_millis(1));
    let finished = client.renders().wait(&queued.id, &options).await.unwrap();
    assert_eq!(finished.status, JobStatus::Completed);
    assert!(finished.output_url.is_some());
}

#[tokio::test]
async fn canvas_elements_can_be_added_and_removed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/designs/des_1/elements"))
        .and(body_partial_json(json!({"kind": "text", "x": 40.0, "y": 60.0})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "el_1",
            "kind": "text",
            "x": 40.0,
            "y": 60.0,
            "width": 400.0,
            "height": 80.0,
            "content": {"text": "Hello"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/designs/des_1/elements/el_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let element = client
        .canvas()
        .add_element(
            "des_1",
            &NewElement::new(ElementKind::Text, 40.0, 60.0, 400.0, 80.0)
                .with_content(json!({"text": "Hello"})),
        )
        .await
        .unwrap();
    assert_eq!(element.id, "el_1");
    assert_eq!(element.kind, ElementKind::Text);

    client.canvas().remove_element("des_1", "el_1").await.unwrap();
}

#[tokio::test]
async fn created_api_key_carries_the_one_time_secret() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/api-keys"))
        .and(body_partial_json(json!({"name": "ci", "scopes": ["renders:write"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "secret": "ak_live_supersecret",
            "id": "key_1",
            "name": "ci",
            "prefix": "ak_live_sup",
            "scopes": ["renders:write"],
            "created_at": "2026-08-01T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let created = client
        .api_keys()
        .create("ci", &["renders:write"])
        .await
        .unwrap();
    assert_eq!(created.secret, "ak_live_supersecret");
    assert_eq!(created.key.prefix, "ak_live_sup");
}
