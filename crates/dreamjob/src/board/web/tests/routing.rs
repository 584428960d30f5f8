use super::common::*;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::board::web::{board_router, CANDIDATE_NOT_FOUND, DUPLICATE_EMAIL, SESSION_COOKIE};

#[tokio::test]
async fn index_renders_for_guests() {
    let router = board_router(memory_state(false).await);

    let response = router
        .oneshot(get_request("/", None))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["view"], json!("index"));
    assert_eq!(payload["model"]["user"]["name"], json!("Guest"));
}

#[tokio::test]
async fn seeded_vacancies_are_listed() {
    let router = board_router(memory_state(true).await);

    let response = router
        .oneshot(get_request("/vacancies", None))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["view"], json!("vacancies/list"));
    let vacancies = payload["model"]["vacancies"]
        .as_array()
        .expect("vacancy list");
    assert_eq!(vacancies.len(), 6);
    assert_eq!(vacancies[5]["title"], json!("Senior Java Developer"));
}

#[tokio::test]
async fn multipart_create_stores_candidate_and_file() {
    let router = board_router(memory_state(false).await);

    let response = router
        .clone()
        .oneshot(multipart_request(
            "/candidates/create",
            &[("name", "Petrov"), ("description", "Intern"), ("city_id", "1")],
            Some(("cv.pdf", &b"%PDF"[..])),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/candidates"));

    let response = router
        .clone()
        .oneshot(get_request("/candidates/1", None))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["view"], json!("candidates/one"));
    assert_eq!(payload["model"]["candidate"]["name"], json!("Petrov"));
    let file_id = payload["model"]["candidate"]["file_id"]
        .as_i64()
        .expect("file id");

    let response = router
        .oneshot(get_request(&format!("/files/{file_id}"), None))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    assert_eq!(&body[..], b"%PDF");
}

#[tokio::test]
async fn malformed_form_is_a_bad_request() {
    let router = board_router(memory_state(false).await);

    let response = router
        .oneshot(multipart_request(
            "/vacancies/create",
            &[("title", "Rust"), ("description", "tokio"), ("city_id", "north")],
            None,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["view"], json!("errors/404"));
    assert!(payload["model"]["message"]
        .as_str()
        .unwrap_or_default()
        .contains("city_id"));
}

#[tokio::test]
async fn deleting_missing_candidate_renders_not_found() {
    let router = board_router(memory_state(false).await);

    let response = router
        .oneshot(get_request("/candidates/delete/42", None))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["model"]["message"], json!(CANDIDATE_NOT_FOUND));
}

#[tokio::test]
async fn register_login_and_logout_round_trip() {
    let router = board_router(memory_state(false).await);

    let response = router
        .clone()
        .oneshot(form_request(
            "/users/register",
            "email=anna%40mail.ru&name=Anna&password=secret",
            None,
        ))
        .await
        .expect("route executes");
    assert_eq!(location(&response), Some("/vacancies"));

    let response = router
        .clone()
        .oneshot(form_request(
            "/users/register",
            "email=anna%40mail.ru&name=Other&password=other",
            None,
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["model"]["message"], json!(DUPLICATE_EMAIL));

    let response = router
        .clone()
        .oneshot(form_request(
            "/users/login",
            "email=anna%40mail.ru&password=secret",
            None,
        ))
        .await
        .expect("route executes");
    assert_eq!(location(&response), Some("/vacancies"));
    let cookie = session_cookie(&response).expect("session cookie issued");

    let response = router
        .clone()
        .oneshot(get_request("/index", Some(&cookie)))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["model"]["user"]["name"], json!("Anna"));
    assert!(payload["model"]["user"].get("password").is_none());

    let response = router
        .clone()
        .oneshot(get_request("/users/logout", Some(&cookie)))
        .await
        .expect("route executes");
    assert_eq!(location(&response), Some("/users/login"));

    let response = router
        .oneshot(get_request("/index", Some(&cookie)))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["model"]["user"]["name"], json!("Guest"));
}

#[tokio::test]
async fn wrong_password_keeps_visitor_on_login_page() {
    let router = board_router(memory_state(false).await);

    let response = router
        .oneshot(form_request(
            "/users/login",
            "email=nobody%40mail.ru&password=x",
            None,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    let payload = read_json_body(response).await;
    assert_eq!(payload["view"], json!("users/login"));
    assert!(payload["model"]["error"].is_string());
}

#[tokio::test]
async fn registration_without_password_is_a_bad_request() {
    let router = board_router(memory_state(false).await);

    let response = router
        .oneshot(form_request("/users/register", "email=a%40b.c&name=A", None))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["view"], json!("errors/404"));
    assert!(payload["model"]["message"]
        .as_str()
        .unwrap_or_default()
        .contains("password"));
}

#[tokio::test]
async fn login_without_password_is_a_bad_request() {
    let router = board_router(memory_state(false).await);

    let response = router
        .oneshot(form_request("/users/login", "email=a%40b.c", None))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn session_cookie_is_http_only_and_expires_when_idle() {
    let router = board_router(memory_state(false).await);
    router
        .clone()
        .oneshot(form_request(
            "/users/register",
            "email=+olga%40mail.ru+&name=Olga&password=pw",
            None,
        ))
        .await
        .expect("route executes");

    let response = router
        .oneshot(form_request(
            "/users/login",
            "email=olga%40mail.ru&password=pw",
            None,
        ))
        .await
        .expect("route executes");

    assert_eq!(location(&response), Some("/vacancies"));
    let set_cookie = response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .expect("session cookie issued");
    assert!(set_cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Max-Age="));
}
