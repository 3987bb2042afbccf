use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::Response,
};

use crate::axum_http::error_responses::error_response;

/// Caller identity from the `X-User-Id` header. Authentication proper is
/// handled upstream; this service only needs the resolved user id.
pub struct AuthUser {
    pub user_id: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok());

        match header_value.and_then(|value| value.parse::<i64>().ok()) {
            Some(user_id) if user_id > 0 => Ok(AuthUser { user_id }),
            _ => Err(error_response(
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Missing or invalid X-User-Id".to_string(),
            )),
        }
    }
}
