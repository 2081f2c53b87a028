use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::{Service, ServiceExt};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn order_request(token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, token);
    }
    builder.body(body.to_string()).unwrap()
}

async fn call(app: &mut axum::routing::RouterIntoService<String>, req: Request<String>) -> (StatusCode, Value) {
    let resp = ServiceExt::ready(app).await.unwrap().call(req).await.unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

fn service(router: Router) -> axum::routing::RouterIntoService<String> {
    router.into_service()
}

const USER: &str = r#"{"email":"cook@example.com","password":"secret","name":"Cook"}"#;

// --- ingredients ---

#[tokio::test]
async fn ingredients_lists_catalog() {
    let resp = app()
        .oneshot(Request::builder().uri("/api/ingredients").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), mock_server::catalog().len());
    assert!(data[0]["_id"].is_string());
    assert!(data[0]["name"].is_string());
}

// --- register ---

#[tokio::test]
async fn register_returns_tokens_and_user() {
    let resp = app()
        .oneshot(json_request("/api/auth/register", USER))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["accessToken"].as_str().unwrap().starts_with("Bearer "));
    assert!(!body["refreshToken"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "cook@example.com");
    assert_eq!(body["user"]["name"], "Cook");
}

#[tokio::test]
async fn register_missing_field_returns_403() {
    for body in [
        r#"{"password":"secret","name":"Cook"}"#,
        r#"{"email":"cook@example.com","name":"Cook"}"#,
        r#"{"email":"cook@example.com","password":"secret"}"#,
        r#"{"email":"","password":"secret","name":"Cook"}"#,
    ] {
        let resp = app()
            .oneshot(json_request("/api/auth/register", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{body}");
        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Email, password and name are required fields");
    }
}

#[tokio::test]
async fn register_twice_returns_403() {
    let mut app = service(app());

    let (status, _) = call(&mut app, json_request("/api/auth/register", USER)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&mut app, json_request("/api/auth/register", USER)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User already exists");
}

// --- login ---

#[tokio::test]
async fn login_after_register() {
    let mut app = service(app());
    call(&mut app, json_request("/api/auth/register", USER)).await;

    let (status, body) = call(
        &mut app,
        json_request(
            "/api/auth/login",
            r#"{"email":"cook@example.com","password":"secret"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["name"], "Cook");
}

#[tokio::test]
async fn login_wrong_password_returns_401() {
    let mut app = service(app());
    call(&mut app, json_request("/api/auth/register", USER)).await;

    let (status, body) = call(
        &mut app,
        json_request(
            "/api/auth/login",
            r#"{"email":"cook@example.com","password":"nope"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn login_unknown_user_returns_401() {
    let resp = app()
        .oneshot(json_request(
            "/api/auth/login",
            r#"{"email":"invalid@example.com","password":"wrongpassword"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- orders ---

#[tokio::test]
async fn order_without_token_returns_401() {
    let resp = app()
        .oneshot(order_request(None, r#"{"ingredients":["61c0c5a71d1f82001bdaaa6d"]}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["success"], false);
}

#[tokio::test]
async fn order_with_unknown_token_returns_401() {
    let resp = app()
        .oneshot(order_request(
            Some("Bearer forged"),
            r#"{"ingredients":["61c0c5a71d1f82001bdaaa6d"]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- full ordering flow ---

#[tokio::test]
async fn order_lifecycle() {
    let mut app = service(app());

    // register
    let (status, body) = call(&mut app, json_request("/api/auth/register", USER)).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["accessToken"].as_str().unwrap().to_string();

    // empty ingredients
    let (status, body) = call(&mut app, order_request(Some(&token), r#"{"ingredients":[]}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Ingredient ids must be provided");

    // missing ingredients key
    let (status, _) = call(&mut app, order_request(Some(&token), r#"{}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // unknown id
    let (status, body) = call(
        &mut app,
        order_request(Some(&token), r#"{"ingredients":["invalid_hash_1","invalid_hash_2"]}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "One or more ids provided are incorrect");

    // valid order
    let (status, body) = call(
        &mut app,
        order_request(
            Some(&token),
            r#"{"ingredients":["61c0c5a71d1f82001bdaaa6d","61c0c5a71d1f82001bdaaa72"]}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["name"], "Fluorescent Spicy-X burger");
    assert_eq!(body["order"]["number"], 1);
    assert_eq!(body["order"]["price"], 988 + 90);
    assert_eq!(body["order"]["owner"]["email"], "cook@example.com");

    // numbers increase
    let (_, body) = call(
        &mut app,
        order_request(Some(&token), r#"{"ingredients":["61c0c5a71d1f82001bdaaa6d"]}"#),
    )
    .await;
    assert_eq!(body["order"]["number"], 2);
}
