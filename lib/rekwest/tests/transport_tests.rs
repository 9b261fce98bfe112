//! Integration tests for the `HyperClient` transport using wiremock.

use std::time::Duration;

use assert2::{check, let_assert};
use rekwest::tower::util::MapRequestLayer;
use rekwest::{HttpClient, HyperClient, Method, Request};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path},
};

fn url(server: &MockServer, route: &str) -> url::Url {
    url::Url::parse(&format!("{}{route}", server.uri())).expect("url")
}

#[tokio::test]
async fn get_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/animals/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"animal": "platypus"})))
        .mount(&server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::GET, url(&server, "/animals/1")).build();

    let response = client.execute(request).await.expect("response");

    check!(response.is_success());
    check!(response.content_type() == Some("application/json"));
    check!(response.text().expect("utf-8") == r#"{"animal":"platypus"}"#);
}

#[tokio::test]
async fn post_request_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/animals"))
        .and(header("content-type", "text/plain"))
        .and(body_string("wombat"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::POST, url(&server, "/animals"))
        .header("content-type", "text/plain")
        .body(bytes::Bytes::from_static(b"wombat"))
        .build();

    let response = client.execute(request).await.expect("response");
    check!(response.status() == 201);
}

#[tokio::test]
async fn error_status_is_still_a_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::GET, url(&server, "/missing")).build();

    let response = client.execute(request).await.expect("response");

    check!(response.is_client_error());
    check!(&response.body()[..] == b"Not Found");
}

#[tokio::test]
async fn response_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/with-headers"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "abc123")
                .set_body_raw("<ok/>", "application/xml"),
        )
        .mount(&server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::GET, url(&server, "/with-headers")).build();

    let response = client.execute(request).await.expect("response");

    check!(response.header("x-request-id") == Some("abc123"));
    check!(response.content_type() == Some("application/xml"));
}

#[tokio::test]
async fn transport_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = HyperClient::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let request = Request::builder(Method::GET, url(&server, "/slow")).build();

    let_assert!(Err(err) = client.execute(request).await);
    check!(err.is_timeout());
}

#[tokio::test]
async fn connection_error() {
    let client = HyperClient::new();
    let request = Request::builder(Method::GET, url::Url::parse("http://127.0.0.1:1").expect("url")).build();

    let_assert!(Err(err) = client.execute(request).await);
    check!(err.is_connection());
}

#[tokio::test]
async fn logging_layer_keeps_the_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logged"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HyperClient::builder().with_debug_logging().build();
    let request = Request::builder(Method::GET, url(&server, "/logged")).build();

    let response = client.execute(request).await.expect("response");
    check!(response.is_success());
}

#[tokio::test]
async fn custom_layer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/custom-layer"))
        .and(header("x-zoo", "open"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HyperClient::builder()
        .with_logging()
        .layer(MapRequestLayer::new(|mut request: Request| {
            request
                .headers_mut()
                .insert("x-zoo".to_string(), "open".to_string());
            request
        }))
        .build();
    let request = Request::builder(Method::GET, url(&server, "/custom-layer")).build();

    let response = client.execute(request).await.expect("response");
    check!(response.is_success());
}
