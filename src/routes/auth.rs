//! Authentication routes
//!
//! Signup, signin, signout, and the current-user lookup. Session
//! mutation happens here: on a successful signup or signin the handler
//! writes the user id into the request session; the auth service itself
//! never touches sessions.

use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use crate::state::AppState;
use crate::store::User;
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/signout", post(signout))
        .route("/whoami", get(whoami))
}

/// Signup/signin request body
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// User as exposed over the API. The stored credential never leaves the
/// service.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Register a new user
///
/// POST /api/v1/auth/signup
async fn signup(
    State(state): State<AppState>,
    mut session: Session,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let user = state.auth().signup(&req.email, &req.password).await?;

    session.data.user_id = Some(user.id);
    state.sessions().save(&session).await;

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, session.cookie())],
        Json(UserResponse::from(user)),
    ))
}

/// Sign in with email and password
///
/// POST /api/v1/auth/signin
async fn signin(
    State(state): State<AppState>,
    mut session: Session,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state.auth().signin(&req.email, &req.password).await?;

    session.data.user_id = Some(user.id);
    state.sessions().save(&session).await;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, session.cookie())],
        Json(UserResponse::from(user)),
    ))
}

/// Clear the signed-in user from the session
///
/// POST /api/v1/auth/signout
async fn signout(State(state): State<AppState>, mut session: Session) -> StatusCode {
    session.data.user_id = None;
    state.sessions().save(&session).await;
    StatusCode::NO_CONTENT
}

/// Current signed-in user
///
/// GET /api/v1/auth/whoami
///
/// A session without a signed-in user, or one pointing at a user that no
/// longer exists, reads as not signed in.
async fn whoami(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<UserResponse>> {
    let not_signed_in = || ApiError::Unauthorized("not signed in".to_string());

    let user_id = session.data.user_id.ok_or_else(not_signed_in)?;
    let user = state
        .store()
        .find_by_id(user_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(not_signed_in)?;

    Ok(Json(user.into()))
}
