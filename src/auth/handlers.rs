use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RefreshRequest, RegisterRequest},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, is_acceptable_password, verify_password, MIN_PASSWORD_LEN},
        repo_types::User,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles");
    }
    EMAIL_RE.is_match(email)
}

fn issue_pair(keys: &JwtKeys, user: User) -> Result<AuthResponse, ApiError> {
    let access_token = keys.sign_access(user.id, user.is_admin).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        ApiError::Internal(e)
    })?;
    let refresh_token = keys.sign_refresh(user.id).map_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
        ApiError::Internal(e)
    })?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: user.into(),
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::InvalidInput("Invalid email".into()));
    }

    if !is_acceptable_password(&payload.password) {
        warn!("password too short");
        return Err(ApiError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    // Ensure email is not taken
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password)?;
    let favorite_food = payload
        .favorite_food
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty());

    let user = User::create(&state.db, &payload.email, &hash, favorite_food)
        .await
        .map_err(|e| {
            error!(error = %e, "create user failed");
            ApiError::Internal(e)
        })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    let keys = JwtKeys::from_ref(&state);
    Ok(Json(issue_pair(&keys, user)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::InvalidInput("Invalid email".into()));
    }

    let user = match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::Unauthorized("Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(ApiError::Internal(e));
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    let keys = JwtKeys::from_ref(&state);
    Ok(Json(issue_pair(&keys, user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;

    Ok(Json(issue_pair(&keys, user)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, user_id).await?.ok_or_else(|| {
        error!(user_id = %user_id, "user not found");
        ApiError::Unauthorized("User not found".into())
    })?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_is_checked() {
        assert!(is_valid_email("ann@example.com"));
        assert!(!is_valid_email("ann@example"));
        assert!(!is_valid_email("ann example@x.io"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn public_user_serialization_hides_hash() {
        let user = User {
            id: uuid::Uuid::new_v4(),
            email: "test@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            favorite_food: Some("kimchi".into()),
            is_admin: false,
            created_at: time::OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("kimchi"));
        assert!(!json.contains("argon2"));
    }
}
