use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine as _;
use base64::engine::general_purpose;

use crate::server::AppState;
use crate::server::error::ApiError;

// CREDENTIALS
// ================================================================================================

/// The shared-secret pair guarding the payment routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// BASIC AUTH GATE
// ================================================================================================

/// Rejects requests to protected routes unless they carry the configured Basic credentials.
///
/// A missing or malformed header and a well-formed header with the wrong pair are both
/// unauthorized, with distinct messages.
pub(crate) async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::MissingCredentials)?;
    let (username, password) = decode_basic(header).ok_or(ApiError::MissingCredentials)?;

    if username != state.credentials.username || password != state.credentials.password {
        return Err(ApiError::InvalidCredentials);
    }

    Ok(next.run(request).await)
}

/// Decodes a `Basic` authorization header into its username/password pair.
///
/// The decoded payload splits on the first colon, so passwords may contain colons.
fn decode_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_owned(), password.to_owned()))
}

// TESTS
// ================================================================================================
