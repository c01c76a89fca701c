//! Route table and request handlers.

use crate::auth::{bearer_token, Authenticator};
use crate::error::ApiError;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use salesdojo_application::TrainingUseCase;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state behind every handler.
#[derive(Clone)]
pub struct AppState {
    pub usecase: Arc<TrainingUseCase>,
    pub authenticator: Arc<dyn Authenticator>,
}

#[derive(Deserialize)]
pub struct StreamForm {
    pub query: String,
}

#[derive(Serialize)]
struct StartResponse {
    status: &'static str,
    duration: u64,
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct AnswerResponse {
    answer: String,
}

#[derive(Serialize)]
struct AdviceResponse {
    advice: String,
}

/// Builds the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(chat_page))
        .route("/start", post(start_session))
        .route("/end", post(end_session))
        .route("/stream", post(stream))
        .route("/coach", post(coach))
        .route("/coach/clicked", post(coach_clicked))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

/// Resolves the bearer token to `(token, username)` or rejects with 401.
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<(String, String), ApiError> {
    let token = bearer_token(headers).ok_or_else(ApiError::unauthorized)?;
    let user = state
        .authenticator
        .resolve(token)
        .ok_or_else(ApiError::unauthorized)?;
    Ok((token.to_string(), user))
}

/// The chat page itself is served by the external front end; this stub
/// confirms the service is up and the token is valid.
async fn chat_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let (_, user) = authenticate(&state, &headers)?;
    Ok(Html(format!(
        "<html><body><h1>salesdojo</h1><p>Signed in as {}.</p></body></html>",
        user
    )))
}

async fn start_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StartResponse>, ApiError> {
    let (token, user) = authenticate(&state, &headers)?;
    let duration = state.usecase.start_session(&token, &user).await?;
    Ok(Json(StartResponse {
        status: "started",
        duration,
    }))
}

async fn end_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, ApiError> {
    let (token, user) = authenticate(&state, &headers)?;
    state.usecase.end_session(&token, &user).await?;
    Ok(Json(StatusResponse { status: "ended" }))
}

async fn stream(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<StreamForm>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let (token, user) = authenticate(&state, &headers)?;
    let answer = state.usecase.customer_turn(&token, &user, &form.query).await?;
    Ok(Json(AnswerResponse { answer }))
}

async fn coach(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdviceResponse>, ApiError> {
    let (token, user) = authenticate(&state, &headers)?;
    let advice = state.usecase.coach_turn(&token, &user).await?;
    Ok(Json(AdviceResponse { advice }))
}

async fn coach_clicked(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, ApiError> {
    let (token, user) = authenticate(&state, &headers)?;
    state.usecase.mark_coach_clicked(&token, &user).await?;
    Ok(Json(StatusResponse { status: "ok" }))
}
