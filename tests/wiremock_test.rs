//! Round-trip tests driving the default reqwest transport against wiremock.
//!
//! The mock server listens on plain HTTP, so these also exercise the
//! `secure_only = false` warning path.

use restbridge::{
    AuthStrategy, AuthorizeArgs, ClientConfig, Error, RestClient, middleware_fn,
};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer, strategy: AuthStrategy) -> RestClient {
    let config = ClientConfig::builder()
        .root(server.uri())
        .version("v1")
        .secure_only(false)
        .strategy(strategy)
        .build();
    RestClient::new(config).unwrap()
}

#[tokio::test]
async fn authorized_get_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users/1"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthStrategy::Bearer).await;
    client.authorize(AuthorizeArgs::with_token("abc")).unwrap();

    let response = client.get("/users/1", None).await.unwrap();
    assert!(response.ok());
    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn post_sends_serialized_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .and(header("Content-Type", "application/json"))
        .and(body_string(r#"{"item":"widget"}"#))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthStrategy::None).await;
    let response = client
        .post("/orders", Some(&serde_json::json!({"item": "widget"})), None)
        .await
        .unwrap();
    assert_eq!(response.status_u16(), 201);
}

#[tokio::test]
async fn not_found_rejects_with_the_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthStrategy::None).await;
    let err = client.get("/missing", None).await.unwrap_err();
    let response = err.response().expect("rejected response");
    assert_eq!(response.status_u16(), 404);
    assert_eq!(response.text(), "nope");
}

#[tokio::test]
async fn middleware_applies_over_real_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/greeting"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthStrategy::None).await;
    client.use_middleware(middleware_fn(|response| {
        let body = format!("{} world", response.text());
        Ok(response.with_body(body))
    }));

    let response = client.get("/greeting", None).await.unwrap();
    assert_eq!(response.text(), "hello world");
}

#[tokio::test]
async fn unreachable_server_surfaces_a_transport_error() {
    // Bind and immediately drop a server to get a dead port.
    let dead_uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let config = ClientConfig::builder()
        .root(dead_uri)
        .secure_only(false)
        .build();
    let client = RestClient::new(config).unwrap();

    let err = client.get("/anything", None).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
