mod common;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{MockBackend, TEST_TOKEN};
use dashboard_actions::revalidate::{MEETINGS_VIEW, USERS_VIEW};
use dashboard_actions::server::{app, AppState, ROLE_HEADER};

fn router(backend: &MockBackend) -> Router {
    app(AppState::new(backend.config()))
}

fn form_post(uri: &str, body: &str, authorized: bool) -> Result<Request<Body>> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if authorized {
        builder = builder
            .header(header::AUTHORIZATION, format!("Bearer {}", TEST_TOKEN))
            .header(ROLE_HEADER, "admin");
    }
    Ok(builder.body(Body::from(body.to_string()))?)
}

fn get(uri: &str, authorized: bool) -> Result<Request<Body>> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if authorized {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", TEST_TOKEN));
    }
    Ok(builder.body(Body::empty())?)
}

async fn json_body(response: axum::response::Response) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let backend = MockBackend::start().await?;

    let response = router(&backend).oneshot(get("/health", false)?).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("ok"));
    Ok(())
}

#[tokio::test]
async fn form_submit_creates_user_and_lists_stale_views() -> Result<()> {
    let backend = MockBackend::start().await?;
    let request = form_post(
        "/actions/users",
        "fullName=Jane+Doe&email=jane%40x.com&role=guest&password=secret1&confirmPassword=secret1",
        true,
    )?;

    let response = router(&backend).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "User created successfully!",
            "revalidated": [USERS_VIEW]
        })
    );

    let forwarded = backend.last_request();
    assert_eq!(forwarded.authorization, Some(format!("Bearer {}", TEST_TOKEN)));
    assert_eq!(forwarded.body["email"], json!("jane@x.com"));
    assert_eq!(forwarded.body["roleId"], json!(3));
    Ok(())
}

#[tokio::test]
async fn failed_action_still_answers_ok_with_envelope() -> Result<()> {
    let backend = MockBackend::start().await?;
    let request = form_post("/actions/users/4/delete", "", false)?;

    let response = router(&backend).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Authentication required. Please log in again."));
    assert_eq!(body["revalidated"], json!([]));
    assert_eq!(backend.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn saved_minutes_redirect_to_meetings() -> Result<()> {
    let backend = MockBackend::start().await?;
    let request = form_post(
        "/actions/minutes",
        "meetingId=12&discussion=Roadmap&decisions=Ship&actionItems=Notes",
        true,
    )?;

    let response = router(&backend).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some(MEETINGS_VIEW)
    );
    assert_eq!(backend.last_request().path, "/Moms");
    Ok(())
}

#[tokio::test]
async fn meeting_form_data_without_session_is_unauthorized() -> Result<()> {
    let backend = MockBackend::start().await?;

    let response = router(&backend)
        .oneshot(get("/actions/meetings/form-data", false)?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Authentication required. Please log in again."));
    Ok(())
}

#[tokio::test]
async fn meeting_form_data_passes_through_on_success() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond(
        "GET",
        "/Meetings/Form-Data",
        200,
        json!({"rooms": [{"id": 1, "name": "Atrium", "capacity": 30}], "users": []}),
    );

    let response = router(&backend)
        .oneshot(get("/actions/meetings/form-data", true)?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body["rooms"][0]["name"], json!("Atrium"));
    Ok(())
}

#[tokio::test]
async fn short_search_term_skips_backend() -> Result<()> {
    let backend = MockBackend::start().await?;

    let response = router(&backend)
        .oneshot(get("/actions/search?term=a", true)?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body["message"], json!("Search term is too short."));
    assert_eq!(body["data"], json!({"meetings": [], "rooms": [], "users": []}));
    assert_eq!(backend.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn account_request_needs_no_session() -> Result<()> {
    let backend = MockBackend::start().await?;
    let request = form_post(
        "/actions/account-request",
        "fullName=Jane+Doe&email=jane%40x.com&reason=New+starter",
        false,
    )?;

    let response = router(&backend).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(backend.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn meeting_edit_errors_keep_status_and_meeting_wording() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond("GET", "/Meetings/Details/9", 404, json!({}));
    backend.respond("GET", "/Meetings/Details/10", 403, json!({}));

    let response = router(&backend)
        .oneshot(get("/actions/meetings/9/edit", true)?)
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await?["error"], json!("Meeting not found."));

    let response = router(&backend)
        .oneshot(get("/actions/meetings/10/edit", true)?)
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        json_body(response).await?["error"],
        json!("You don't have permission to view meetings.")
    );
    Ok(())
}
