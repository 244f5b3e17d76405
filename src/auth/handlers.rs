use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{MeResponse, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse},
        extractors::AuthUser,
        services,
    },
    error::{AppError, AppResult},
    json::JsonBody,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn sign_up(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SignUpRequest>,
) -> AppResult<(StatusCode, Json<SignUpResponse>)> {
    let registered = services::register(state.store.as_ref(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "Sign-up successful",
            resume_id: registered.resume_id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn sign_in(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SignInRequest>,
) -> AppResult<Json<SignInResponse>> {
    let res = services::authenticate(state.store.as_ref(), &state.keys, payload).await?;
    Ok(Json(res))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> AppResult<Json<MeResponse>> {
    let user = state.store.find_by_email(&email).await?.ok_or_else(|| {
        warn!(email = %email, "token subject no longer exists");
        AppError::InvalidToken
    })?;

    Ok(Json(MeResponse {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        age: user.age,
        birthday: user.birthday,
        gender_id: user.gender_id,
        address: user.address,
        category: user.category,
        wages: user.wages,
        contact: user.contact,
        profile: user.profile,
        resume_id: user.resume_id,
    }))
}
