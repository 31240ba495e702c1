//! HTTP surface for browser form submissions.
//!
//! Each route builds a per-request `ActionContext` from the caller's headers,
//! runs one action and replies with its `ActionResult` plus the view paths the
//! action marked as stale.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap},
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::actions::{account, meetings, minutes, profile, rooms, search, users, ActionContext};
use crate::config::AppConfig;
use crate::error::Entity;
use crate::form::FormPayload;
use crate::revalidate::StalePaths;
use crate::types::{ActionResult, Role, Session};

pub const ROLE_HEADER: &str = "x-user-role";
pub const SESSION_EXPIRES_HEADER: &str = "x-session-expires";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

type FormPairs = Form<Vec<(String, String)>>;

/// Result envelope plus the views that should refetch
#[derive(Debug, Serialize)]
pub struct ActionResponse<T: Serialize> {
    #[serde(flatten)]
    pub result: ActionResult<T>,
    pub revalidated: Vec<String>,
}

pub fn app(state: AppState) -> Router {
    let config = state.config.clone();
    let mut router = Router::new()
        .route("/health", get(health))
        .merge(user_routes())
        .merge(room_routes())
        .merge(meeting_routes())
        .merge(account_routes())
        .route("/actions/minutes", post(save_minutes))
        .route("/actions/profile", post(update_profile))
        .route("/actions/search", get(global_search))
        .with_state(state);

    if config.server.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/actions/users", post(create_user))
        .route("/actions/users/:id", get(get_user).post(update_user))
        .route("/actions/users/:id/delete", post(delete_user))
}

fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/actions/rooms", post(create_room))
        .route("/actions/rooms/:id", get(get_room).post(update_room))
        .route("/actions/rooms/:id/delete", post(delete_room))
}

fn meeting_routes() -> Router<AppState> {
    Router::new()
        .route("/actions/meetings", post(create_meeting))
        .route("/actions/meetings/form-data", get(meeting_form_data))
        .route("/actions/meetings/:id", post(update_meeting))
        .route("/actions/meetings/:id/edit", get(meeting_for_edit))
        .route("/actions/meetings/:id/delete", post(delete_meeting))
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/actions/account-request", post(request_account))
        .route("/actions/password-reset-request", post(request_password_reset))
        .route("/actions/password-reset", post(reset_password))
}

/// Session as forwarded by the auth provider in front of this service
pub fn session_from_headers(headers: &HeaderMap) -> Option<Session> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();
    if token.is_empty() {
        return None;
    }

    let role = headers
        .get(ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(Role::from_name)
        .unwrap_or_default();
    let expires_at = headers
        .get(SESSION_EXPIRES_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| DateTime::parse_from_rfc3339(v.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Some(Session {
        access_token: Some(token.to_string()),
        role,
        expires_at,
    })
}

fn scope(state: &AppState, headers: &HeaderMap) -> (ActionContext, Arc<StalePaths>) {
    let stale = Arc::new(StalePaths::new());
    let ctx = ActionContext::new(session_from_headers(headers), &state.config, stale.clone());
    (ctx, stale)
}

fn respond<T: Serialize>(result: ActionResult<T>, stale: &StalePaths) -> Response {
    Json(ActionResponse {
        result,
        revalidated: stale.paths(),
    })
    .into_response()
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now(),
        }
    }))
}

// Users

async fn create_user(State(state): State<AppState>, headers: HeaderMap, Form(pairs): FormPairs) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(users::create_user(&ctx, &FormPayload::from_pairs(pairs)).await, &stale)
}

async fn get_user(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(users::get_user(&ctx, &id).await, &stale)
}

async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(pairs): FormPairs,
) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(users::update_user(&ctx, &id, &FormPayload::from_pairs(pairs)).await, &stale)
}

async fn delete_user(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(users::delete_user(&ctx, &id).await, &stale)
}

// Rooms

async fn create_room(State(state): State<AppState>, headers: HeaderMap, Form(pairs): FormPairs) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(rooms::create_room(&ctx, &FormPayload::from_pairs(pairs)).await, &stale)
}

async fn get_room(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(rooms::get_room(&ctx, &id).await, &stale)
}

async fn update_room(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(pairs): FormPairs,
) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(rooms::update_room(&ctx, &id, &FormPayload::from_pairs(pairs)).await, &stale)
}

async fn delete_room(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(rooms::delete_room(&ctx, &id).await, &stale)
}

// Meetings

async fn create_meeting(State(state): State<AppState>, headers: HeaderMap, Form(pairs): FormPairs) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(meetings::create_meeting(&ctx, &FormPayload::from_pairs(pairs)).await, &stale)
}

async fn update_meeting(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(pairs): FormPairs,
) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(meetings::update_meeting(&ctx, &id, &FormPayload::from_pairs(pairs)).await, &stale)
}

async fn delete_meeting(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(meetings::delete_meeting(&ctx, &id).await, &stale)
}

async fn meeting_form_data(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (ctx, _) = scope(&state, &headers);
    match meetings::get_meeting_form_data(&ctx).await {
        Ok(data) => Json(data).into_response(),
        Err(err) => err.into_response_for(Entity::Meeting, "load meeting form data"),
    }
}

async fn meeting_for_edit(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let (ctx, _) = scope(&state, &headers);
    match meetings::get_meeting_for_edit(&ctx, &id).await {
        Ok(details) => Json(details).into_response(),
        Err(err) => err.into_response_for(Entity::Meeting, "view meetings"),
    }
}

// Minutes, profile, search

async fn save_minutes(State(state): State<AppState>, headers: HeaderMap, Form(pairs): FormPairs) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    match minutes::save_minutes(&ctx, &FormPayload::from_pairs(pairs)).await {
        minutes::SaveMinutesOutcome::Redirect(location) => Redirect::to(&location).into_response(),
        minutes::SaveMinutesOutcome::Failed(result) => respond(result, &stale),
    }
}

async fn update_profile(State(state): State<AppState>, headers: HeaderMap, Form(pairs): FormPairs) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(profile::update_profile(&ctx, &FormPayload::from_pairs(pairs)).await, &stale)
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    term: String,
}

async fn global_search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Response {
    let (ctx, stale) = scope(&state, &headers);
    respond(search::global_search(&ctx, &query.term).await, &stale)
}

// Account stubs

async fn request_account(Form(pairs): FormPairs) -> Response {
    Json(account::request_account(&FormPayload::from_pairs(pairs))).into_response()
}

async fn request_password_reset(Form(pairs): FormPairs) -> Response {
    Json(account::request_password_reset(&FormPayload::from_pairs(pairs))).into_response()
}

async fn reset_password(Form(pairs): FormPairs) -> Response {
    Json(account::reset_password(&FormPayload::from_pairs(pairs))).into_response()
}
