use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::account::models::AccountId;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated subject through the request
/// pipeline. Inserted by the access gate; read by protected handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject {
    pub account_id: AccountId,
}

/// Access gate: validates the bearer token and injects the authenticated
/// subject, or rejects the request.
///
/// Runs ahead of every protected handler. Side-effect free and store-free;
/// the only shared state is the read-only signing secret, so concurrent
/// requests verify independently. A missing credential is a 401, anything
/// wrong with a presented credential is a 403. Fail-closed: no path past
/// this function continues unauthenticated.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        ApiError::InvalidCredential("Invalid or expired token".to_string()).into_response()
    })?;

    let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a valid account ID");
        ApiError::InvalidCredential("Invalid token".to_string()).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedSubject { account_id });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::MissingCredential("Missing Authorization header".to_string())
                .into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::MissingCredential("Invalid Authorization header".to_string()).into_response()
    })?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::MissingCredential(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response()
    })?;

    Ok(token)
}
