use axum::{
    Json,
    extract::{FromRef, FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::{auth::jwt::JwtService, error::ErrorResponse};

/// Caller identity proven by a bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl AuthenticatedUser {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

#[derive(Debug, PartialEq)]
pub enum AuthError {
    MissingToken,
    InvalidTokenFormat,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "No token, authorization denied",
            AuthError::InvalidTokenFormat => "Invalid token format",
            AuthError::InvalidToken => "Token is not valid",
        };

        (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(message))).into_response()
    }
}

fn authenticate(parts: &Parts, jwt: &JwtService) -> Result<AuthenticatedUser, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidTokenFormat)?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidTokenFormat)?;

    let claims = jwt.verify_token(token).map_err(|e| {
        debug!(error = %e, "token rejected");
        AuthError::InvalidToken
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;
    Ok(AuthenticatedUser::new(user_id))
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<JwtService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(*user);
        }
        let jwt = Arc::<JwtService>::from_ref(state);
        authenticate(parts, &jwt)
    }
}

/// Rejects the request with 401 unless it carries a valid bearer token; the
/// proven identity is stored in the request extensions.
pub async fn require_auth(
    State(jwt): State<Arc<JwtService>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let (mut parts, body) = request.into_parts();
    let user = authenticate(&parts, &jwt)?;
    parts.extensions.insert(user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}
