use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use axum_macros::debug_handler;
use contextual::Context;
use serde::Deserialize;

use crate::{AppState, VerificationCode, session};

pub const PATH: &str = "/verify";

#[derive(Deserialize)]
pub struct RequestBody {
    pub code: String,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("{0}")]
    Sqlx(#[from] contextual::Error<sqlx::Error>),
}

/// Second half of the flow: matches the submitted code against the one
/// stored at signup and flips the `verified` flag.
///
/// Mismatches can be retried indefinitely and re-submitting the correct
/// code after verification succeeds again. A missing, expired or unreadable
/// session cookie is indistinguishable from an unknown user.
#[debug_handler]
#[tracing::instrument(skip_all, ret)]
pub async fn handler(
    State(AppState { data_access, .. }): State<AppState>,
    jar: CookieJar,
    Form(RequestBody { code }): Form<RequestBody>,
) -> Result<Redirect, Error> {
    let email = session::email_from_cookie_jar(&jar).ok_or(Error::UserNotFound)?;

    let user = data_access
        .find_user_by_email(&email)
        .await
        .context("email -> user")?
        .ok_or(Error::UserNotFound)?;

    if !VerificationCode::from(user.verification_code).matches(&code) {
        return Err(Error::InvalidCode);
    }

    data_access
        .mark_verified(&email)
        .await
        .context("mark verified")?;

    Ok(Redirect::to(crate::MAIN_PAGE_PATH))
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::UserNotFound | Error::InvalidCode => {
                tracing::info!("{:?}", self);
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            Error::Sqlx(_) => {
                tracing::error!("{:?}", self);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
