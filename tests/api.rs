use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{self, Request, StatusCode};
use axum::Router;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower::ServiceExt;
use trust_dns_client::rr::Name;
use zonekeeper::config::{Config, SharedConfig, DEFAULT_AUTH_HEADER};
use zonekeeper::record_store::DynRecordStore;
use zonekeeper::{InMemoryRecordStore, Resource};

const TOKEN: &str = "sooper-secret";

fn test_config() -> SharedConfig {
    Arc::new(Config {
        api_bind_addr: "127.0.0.1:0".parse().unwrap(),
        api_token: TOKEN.to_string(),
        auth_header: DEFAULT_AUTH_HEADER.to_string(),
        insecure: true,
        api_cert_path: None,
        api_key_path: None,
        api_domain: Name::from_str("ns.example.com").unwrap().into(),
        api_timeout: Duration::from_secs(5),
        record_state_path: None,
    })
}

fn app() -> Router {
    let store: DynRecordStore = Arc::new(RwLock::new(InMemoryRecordStore::default()));
    zonekeeper::api::router(test_config(), store)
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))))
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(DEFAULT_AUTH_HEADER, token);
    }
    if body.is_some() {
        builder = builder.header(http::header::CONTENT_TYPE, "application/json");
    }
    builder
        .body(body.map_or_else(Body::empty, |body| Body::from(body.to_string())))
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const EXAMPLE: &str =
    r#"{"domain":"example.com","answers":[{"type":"A","value":"1.2.3.4","ttl":300}]}"#;

// --- authentication ---

#[tokio::test]
async fn missing_token_is_unauthorized_on_every_route() {
    for (method, uri, body) in [
        ("POST", "/records", Some(EXAMPLE)),
        ("GET", "/records", None),
        ("PUT", "/records", Some("[]")),
        ("GET", "/records/example.com", None),
        ("PUT", "/records/example.com", Some(EXAMPLE)),
        ("DELETE", "/records/example.com", None),
        ("GET", "/no-such-route", None),
    ] {
        let resp = app()
            .oneshot(request(method, uri, None, body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        let err: serde_json::Value = body_json(resp).await;
        assert_eq!(err["error"], "unauthorized");
    }
}

#[tokio::test]
async fn wrong_token_is_unauthorized() {
    let resp = app()
        .oneshot(request("GET", "/records", Some("not-the-token"), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_route_with_token_is_json_not_found() {
    let resp = app()
        .oneshot(request("GET", "/no-such-route", Some(TOKEN), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: serde_json::Value = body_json(resp).await;
    assert_eq!(err["error"], "not found");
}

// --- create ---

#[tokio::test]
async fn create_returns_201_echoing_the_resource() {
    let resp = app()
        .oneshot(request("POST", "/records", Some(TOKEN), Some(EXAMPLE)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let stored: Resource = body_json(resp).await;
    assert_eq!(stored.domain.to_string(), "example.com");
    assert_eq!(stored.answers.len(), 1);
    assert_eq!(stored.answers[0].value, "1.2.3.4");
    assert_eq!(stored.answers[0].class, "IN");
}

#[tokio::test]
async fn create_with_root_domain_is_rejected() {
    let resp = app()
        .oneshot(request(
            "POST",
            "/records",
            Some(TOKEN),
            Some(r#"{"domain":"."}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: serde_json::Value = body_json(resp).await;
    assert_eq!(err["error"], "resource domain must not be empty");
}

#[tokio::test]
async fn create_with_malformed_json_is_bad_request() {
    let resp = app()
        .oneshot(request("POST", "/records", Some(TOKEN), Some("{not json")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: serde_json::Value = body_json(resp).await;
    assert!(err["error"].is_string());
}

#[tokio::test]
async fn create_with_mistyped_body_is_unprocessable() {
    let resp = app()
        .oneshot(request(
            "POST",
            "/records",
            Some(TOKEN),
            Some(r#"{"answers":[]}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_without_content_type_is_unsupported_media_type() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/records")
                .header(DEFAULT_AUTH_HEADER, TOKEN)
                .body(Body::from(EXAMPLE))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// --- get ---

#[tokio::test]
async fn create_then_get_returns_the_same_payload() {
    let app = app();
    let created = app
        .clone()
        .oneshot(request("POST", "/records", Some(TOKEN), Some(EXAMPLE)))
        .await
        .unwrap();
    let created: Resource = body_json(created).await;

    let resp = app
        .oneshot(request("GET", "/records/example.com", Some(TOKEN), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Resource = body_json(resp).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_unknown_domain_is_not_found() {
    let resp = app()
        .oneshot(request("GET", "/records/missing.com", Some(TOKEN), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: serde_json::Value = body_json(resp).await;
    assert_eq!(err["error"], "not found");
}

#[tokio::test]
async fn domains_are_case_insensitive() {
    let app = app();
    app.clone()
        .oneshot(request("POST", "/records", Some(TOKEN), Some(EXAMPLE)))
        .await
        .unwrap();
    let resp = app
        .oneshot(request("GET", "/records/EXAMPLE.com", Some(TOKEN), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- list ---

#[tokio::test]
async fn list_without_full_returns_domains_only() {
    let app = app();
    app.clone()
        .oneshot(request("POST", "/records", Some(TOKEN), Some(EXAMPLE)))
        .await
        .unwrap();

    let resp = app
        .oneshot(request("GET", "/records", Some(TOKEN), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let listed: Vec<Resource> = body_json(resp).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].domain.to_string(), "example.com");
    assert!(listed[0].answers.is_empty());
}

#[tokio::test]
async fn list_with_full_returns_answer_detail() {
    let app = app();
    app.clone()
        .oneshot(request("POST", "/records", Some(TOKEN), Some(EXAMPLE)))
        .await
        .unwrap();

    let resp = app
        .oneshot(request("GET", "/records?full=true", Some(TOKEN), None))
        .await
        .unwrap();
    let listed: Vec<Resource> = body_json(resp).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].answers.len(), 1);
}

// --- update ---

#[tokio::test]
async fn update_replaces_the_answer_set() {
    let app = app();
    app.clone()
        .oneshot(request("POST", "/records", Some(TOKEN), Some(EXAMPLE)))
        .await
        .unwrap();

    let replacement =
        r#"{"domain":"example.com","answers":[{"type":"AAAA","value":"::1","ttl":600}]}"#;
    let resp = app
        .clone()
        .oneshot(request(
            "PUT",
            "/records/example.com",
            Some(TOKEN),
            Some(replacement),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(request("GET", "/records/example.com", Some(TOKEN), None))
        .await
        .unwrap();
    let fetched: Resource = body_json(resp).await;
    assert_eq!(fetched.answers.len(), 1);
    assert_eq!(fetched.answers[0].value, "::1");
    assert_eq!(fetched.answers[0].ttl, 600);
}

#[tokio::test]
async fn update_path_domain_overrides_body_domain() {
    let app = app();
    app.clone()
        .oneshot(request("POST", "/records", Some(TOKEN), Some(EXAMPLE)))
        .await
        .unwrap();

    let body = r#"{"domain":"other.com","answers":[{"type":"A","value":"9.9.9.9","ttl":60}]}"#;
    let resp = app
        .clone()
        .oneshot(request(
            "PUT",
            "/records/example.com",
            Some(TOKEN),
            Some(body),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Resource = body_json(resp).await;
    assert_eq!(updated.domain.to_string(), "example.com");

    let resp = app
        .oneshot(request("GET", "/records/other.com", Some(TOKEN), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_unknown_domain_is_not_found() {
    let resp = app()
        .oneshot(request(
            "PUT",
            "/records/missing.com",
            Some(TOKEN),
            Some(EXAMPLE),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- bulk replace ---

#[tokio::test]
async fn bulk_replace_leaves_exactly_the_new_set() {
    let app = app();
    for body in [
        r#"{"domain":"a.com","answers":[{"type":"A","value":"1.1.1.1","ttl":300}]}"#,
        r#"{"domain":"b.com","answers":[{"type":"A","value":"2.2.2.2","ttl":300}]}"#,
    ] {
        app.clone()
            .oneshot(request("POST", "/records", Some(TOKEN), Some(body)))
            .await
            .unwrap();
    }

    let new_set = r#"[{"domain":"c.com","answers":[{"type":"A","value":"3.3.3.3","ttl":300}]}]"#;
    let resp = app
        .clone()
        .oneshot(request("PUT", "/records", Some(TOKEN), Some(new_set)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(request("GET", "/records?full=true", Some(TOKEN), None))
        .await
        .unwrap();
    let listed: Vec<Resource> = body_json(resp).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].domain.to_string(), "c.com");

    let resp = app
        .oneshot(request("GET", "/records/a.com", Some(TOKEN), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_removes_and_is_not_idempotent() {
    let app = app();
    app.clone()
        .oneshot(request("POST", "/records", Some(TOKEN), Some(EXAMPLE)))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(request("DELETE", "/records/example.com", Some(TOKEN), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let msg: serde_json::Value = body_json(resp).await;
    assert_eq!(msg["msg"], "success");

    let resp = app
        .clone()
        .oneshot(request("GET", "/records/example.com", Some(TOKEN), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .oneshot(request("DELETE", "/records/example.com", Some(TOKEN), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
