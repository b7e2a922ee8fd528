use docker_image_builder::registry::{AuthConfig, HubClient};
use docker_image_builder::{BuilderError, Logger};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, password: &str) -> HubClient {
    HubClient::builder(format!("{}/v2/", server.uri()))
        .with_credentials(AuthConfig::new("acme".to_string(), password.to_string()))
        .with_timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn update_sends_jwt_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc.def"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v2/repositories/acme/base/"))
        .and(header("authorization", "JWT abc.def"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let hub = client(&server, "secret");
    let logger = Logger::plain(true);
    hub.update_description("acme", "base", "# base", &logger)
        .await
        .unwrap();
    hub.update_description("acme", "base", "# base v2", &logger)
        .await
        .unwrap();
}

#[tokio::test]
async fn rejected_login_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/users/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect authentication credentials"})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let hub = client(&server, "wrong");
    let err = hub
        .update_description("acme", "base", "# base", &Logger::plain(false))
        .await
        .unwrap_err();

    assert!(matches!(err, BuilderError::Auth(ref m) if m == "Invalid credentials provided"));
}

#[tokio::test]
async fn login_without_token_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "ok"})))
        .mount(&server)
        .await;

    let hub = client(&server, "secret");
    let err = hub
        .update_description("acme", "base", "# base", &Logger::plain(false))
        .await
        .unwrap_err();

    assert!(matches!(err, BuilderError::Auth(_)));
}

#[tokio::test]
async fn missing_repository_is_a_registry_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc.def"})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v2/repositories/acme/ghost/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("object not found"))
        .mount(&server)
        .await;

    let hub = client(&server, "secret");
    let err = hub
        .update_description("acme", "ghost", "# ghost", &Logger::plain(false))
        .await
        .unwrap_err();

    match err {
        BuilderError::Registry(msg) => assert!(msg.contains("object not found"), "{}", msg),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn client_without_credentials_cannot_update() {
    let server = MockServer::start().await;
    let hub = HubClient::builder(server.uri()).build().unwrap();

    let err = hub
        .update_description("acme", "base", "# base", &Logger::plain(false))
        .await
        .unwrap_err();

    assert!(matches!(err, BuilderError::Auth(_)));
}
