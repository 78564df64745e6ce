pub mod macros;
pub mod request;
pub mod setup;

use axum::{body::Body, http::Response};

/// Pulls the session marker out of a signup response so it can be replayed
/// on the verify request, the way a browser would.
pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .expect("set-cookie header on signup response")
        .to_string()
}
