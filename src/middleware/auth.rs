use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller context extracted from a verified bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
    pub admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.sub,
            admin: claims.admin,
        }
    }
}

/// Bearer-token verification for the protected route group. Verifies the
/// token and injects `AuthUser` into the request extensions.
pub async fn bearer_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers).map_err(ApiError::unauthorized)?;

    let claims = auth::verify_token(&state.config.security, &token).map_err(|err| {
        tracing::debug!("rejected bearer token: {}", err);
        ApiError::unauthorized("Invalid or expired token")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<String, &'static str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let value = value.to_str().map_err(|_| "Invalid Authorization header")?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use the Bearer scheme")?;

    if token.trim().is_empty() {
        return Err("Empty bearer token");
    }
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(extract_bearer(&HeaderMap::new()).is_err());
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        assert!(extract_bearer(&headers_with("Basic dXNlcjpwdw==")).is_err());
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(extract_bearer(&headers_with("Bearer  ")).is_err());
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(
            extract_bearer(&headers_with("Bearer abc.def.ghi")).unwrap(),
            "abc.def.ghi"
        );
    }
}
