//! End-to-end tests of the authorization flow against a mocked Webex

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::json;
use std::time::Duration;
use tower::ServiceExt;
use webex_oauth::{api, AppState, Config};
use webex_oauth_common::Secret;
use wiremock::matchers::{body_json, body_string_contains, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATE: &str = "CiscoDevNet";

fn test_config(webex: &MockServer) -> Config {
    let mut config = Config::default();
    config.oauth.client_id = "client-1".to_string();
    config.oauth.client_secret = Secret::new("client-secret-1");
    config.oauth.redirect_uri = Some("http://localhost:8080/oauth".to_string());
    config.oauth.token_endpoint = format!("{}/access_token", webex.uri());
    config.webex.api_base_url = webex.uri();
    config.webex.bot_token = Secret::new("bot-token-1");
    config.webex.space_id = "space-1".to_string();
    config
}

fn app(config: Config) -> Router {
    api::router(AppState::new(config).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

async fn callback(app: Router) -> String {
    let (status, _, body) = get(app, &format!("/oauth?code=auth-code-1&state={STATE}")).await;
    assert_eq!(status, StatusCode::OK);
    body
}

fn token_payload() -> serde_json::Value {
    json!({
        "access_token": "user-token-1",
        "expires_in": 1209599,
        "refresh_token": "refresh-token-1",
        "refresh_token_expires_in": 7775999,
    })
}

async fn mount_token_success(webex: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/access_token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code-1"))
        .and(body_string_contains("client_secret=client-secret-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_payload()))
        .expect(1)
        .mount(webex)
        .await;
}

async fn mount_person(webex: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/people/me"))
        .and(header_eq("authorization", "Bearer user-token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(webex)
        .await;
}

async fn mount_membership(webex: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/memberships"))
        .and(header_eq("authorization", "Bearer bot-token-1"))
        .and(body_json(json!({
            "roomId": "space-1",
            "personEmail": "user@example.com",
            "isModerator": false,
        })))
        .respond_with(response)
        .mount(webex)
        .await;
}

fn user() -> serde_json::Value {
    json!({"id": "person-1", "emails": ["user@example.com"], "displayName": "User"})
}

#[tokio::test]
async fn test_root_redirects_to_index() {
    let webex = MockServer::start().await;
    let response = app(test_config(&webex))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/index.html"
    );
}

#[tokio::test]
async fn test_index_links_to_authorize_endpoint() {
    let webex = MockServer::start().await;
    let (status, _, body) = get(app(test_config(&webex)), "/index.html").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("https://webexapis.com/v1/authorize?client_id=client-1"));
    assert!(body.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Foauth"));
    assert!(body.contains("scope=spark%3Aall"));
    assert!(!body.contains("client-secret-1"));
}

#[tokio::test]
async fn test_provider_errors_render_feedback() {
    let cases = [
        ("error=access_denied", "Got your NO, ciao."),
        ("error=invalid_scope", "invalid scope, Bye bye."),
        ("error=server_error", "Server Error, Auf Wiedersehen."),
        ("error=temporarily_unavailable", "Error case not implemented, au revoir."),
        ("error=access_denied&code=x&state=wrong", "Got your NO, ciao."),
        ("code=abc", "Unexpected query parameters, ignoring..."),
        ("state=CiscoDevNet", "Unexpected query parameters, ignoring..."),
        ("", "Unexpected query parameters, ignoring..."),
        ("code=abc&state=wrong", "Wrong secret, aborting..."),
    ];

    for (query, expected) in cases {
        let webex = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_payload()))
            .expect(0)
            .mount(&webex)
            .await;

        let (status, content_type, body) =
            get(app(test_config(&webex)), &format!("/oauth?{query}")).await;

        assert_eq!(status, StatusCode::OK, "query {query:?}");
        assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
        assert!(body.contains(expected), "query {query:?} rendered {body}");
        assert!(body.contains("OAuth Integration could not complete"));
    }
}

#[tokio::test]
async fn test_bad_request_shows_provider_message() {
    let webex = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/access_token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "bad thing"})),
        )
        .mount(&webex)
        .await;

    let body = callback(app(test_config(&webex))).await;
    assert!(body.contains("Bad request."));
    assert!(body.contains("bad thing"));
}

#[tokio::test]
async fn test_bad_request_without_message_asks_to_retry() {
    let webex = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/access_token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("not json"))
        .mount(&webex)
        .await;

    let body = callback(app(test_config(&webex))).await;
    assert!(body.contains("Sorry, could not retrieve your access token. Try again..."));
}

#[tokio::test]
async fn test_unauthorized_asks_to_check_secret() {
    let webex = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/access_token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "invalid client"})),
        )
        .mount(&webex)
        .await;

    let body = callback(app(test_config(&webex))).await;
    assert!(body.contains("check the secret"));
    assert!(!body.contains("invalid client"));
}

#[tokio::test]
async fn test_incomplete_token_payload_asks_to_retry() {
    let webex = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-token-1",
            "expires_in": 1209599,
            "refresh_token_expires_in": 7775999,
        })))
        .mount(&webex)
        .await;
    Mock::given(method("GET"))
        .and(path("/people/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user()))
        .expect(0)
        .mount(&webex)
        .await;

    let body = callback(app(test_config(&webex))).await;
    assert!(body.contains("Sorry, could not retrieve your access token. Try again..."));
    assert!(!body.contains("user-token-1"));
}

#[tokio::test]
async fn test_unreachable_token_endpoint_asks_to_retry() {
    let webex = MockServer::start().await;
    let mut config = test_config(&webex);
    config.oauth.token_endpoint = "http://127.0.0.1:1/access_token".to_string();

    let body = callback(app(config)).await;
    assert!(body.contains("Sorry, could not retrieve your access token. Try again..."));
}

#[tokio::test]
async fn test_success_opens_space_widget() {
    let webex = MockServer::start().await;
    mount_token_success(&webex).await;
    mount_person(&webex, user()).await;
    mount_membership(
        &webex,
        ResponseTemplate::new(200).set_body_json(json!({
            "id": "membership-1",
            "roomId": "space-1",
            "personEmail": "user@example.com",
        })),
    )
    .await;

    let body = callback(app(test_config(&webex))).await;
    assert!(body.contains(r#"data-access-token="user-token-1""#));
    assert!(body.contains(r#"data-destination-id="space-1""#));
    assert!(!body.contains("refresh-token-1"));
    assert!(!body.contains("bot-token-1"));
}

#[tokio::test]
async fn test_membership_added_without_body_opens_widget() {
    let webex = MockServer::start().await;
    mount_token_success(&webex).await;
    mount_person(&webex, user()).await;
    mount_membership(&webex, ResponseTemplate::new(204)).await;

    let body = callback(app(test_config(&webex))).await;
    assert!(body.contains(r#"data-access-token="user-token-1""#));
    assert!(!body.contains("Could not add you to the Demo Space"));
}

#[tokio::test]
async fn test_existing_membership_still_opens_widget() {
    let webex = MockServer::start().await;
    mount_token_success(&webex).await;
    mount_person(&webex, user()).await;
    mount_membership(
        &webex,
        ResponseTemplate::new(409).set_body_json(json!({
            "message": "User is already a participant",
            "trackingId": "ROUTER_1",
        })),
    )
    .await;

    let body = callback(app(test_config(&webex))).await;
    assert!(body.contains(r#"data-access-token="user-token-1""#));
}

#[tokio::test]
async fn test_membership_failure_reports_error() {
    let webex = MockServer::start().await;
    mount_token_success(&webex).await;
    mount_person(&webex, user()).await;
    mount_membership(
        &webex,
        ResponseTemplate::new(500).set_body_json(json!({"message": "Internal error"})),
    )
    .await;

    let body = callback(app(test_config(&webex))).await;
    assert!(body.contains("OAuth Integration Spaces"));
    assert!(body.contains("Could not add you to the Demo Space"));
    assert!(body.contains("received error 500 for a POST request"));
    assert!(!body.contains("bot-token-1"));
    assert!(!body.contains("data-access-token"));
}

#[tokio::test]
async fn test_person_without_email_reports_lookup_failure() {
    let webex = MockServer::start().await;
    mount_token_success(&webex).await;
    mount_person(&webex, json!({"id": "person-1", "emails": []})).await;
    Mock::given(method("POST"))
        .and(path("/memberships"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&webex)
        .await;

    let body = callback(app(test_config(&webex))).await;
    assert!(body.contains("Could not retrieve your Person details"));
}

#[tokio::test]
async fn test_rejected_person_lookup_reports_status() {
    let webex = MockServer::start().await;
    mount_token_success(&webex).await;
    Mock::given(method("GET"))
        .and(path("/people/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&webex)
        .await;

    let body = callback(app(test_config(&webex))).await;
    assert!(body.contains("Could not retrieve your Person details"));
    assert!(body.contains("received error 401 for a GET request"));
}

#[tokio::test]
async fn test_callback_deadline_renders_feedback() {
    let webex = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/access_token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_payload())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&webex)
        .await;

    let mut config = test_config(&webex);
    config.server.callback_deadline_secs = Some(1);

    let body = callback(app(config)).await;
    assert!(body.contains("took too long to respond"));
}

#[tokio::test]
async fn test_callback_path_follows_redirect_uri() {
    let webex = MockServer::start().await;
    let mut config = test_config(&webex);
    config.oauth.redirect_uri = Some("http://localhost:8080/auth/webex".to_string());

    let (status, _, body) = get(app(config), "/auth/webex?error=access_denied").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Got your NO, ciao."));
}

#[tokio::test]
async fn test_static_dir_is_served_as_fallback() {
    let webex = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("logo.txt"), "webex").unwrap();

    let mut config = test_config(&webex);
    config.server.static_dir = Some(dir.path().to_path_buf());

    let (status, _, body) = get(app(config), "/logo.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "webex");
}
