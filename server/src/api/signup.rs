use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use axum_macros::debug_handler;
use contextual::Context;
use email::Email;
use serde::Deserialize;
use tracing::Instrument;

use crate::{AppState, VerificationCode, session, smtp};

pub const PATH: &str = "/signup";

#[derive(Deserialize)]
pub struct RequestBody {
    pub email: String,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidEmail(&'static str),

    #[error("email `{0}` is already registered")]
    EmailExists(Email),

    #[error("{0}")]
    Sqlx(#[from] contextual::Error<sqlx::Error>),
}

/// First half of the flow: records the pending signup, mails the code and
/// hands the browser over to the code-entry step.
///
/// There is no transaction around "does the email exist" and "insert it", so
/// two concurrent signups for the same address can both get through the
/// existence check. Kept as-is; see the schema notes.
#[debug_handler]
#[tracing::instrument(fields(%email), skip_all)]
pub async fn handler(
    State(AppState { data_access, smtp }): State<AppState>,
    jar: CookieJar,
    Form(RequestBody { email }): Form<RequestBody>,
) -> Result<(CookieJar, Redirect), Error> {
    let email = Email::try_from(email).map_err(Error::InvalidEmail)?;

    if data_access
        .find_user_by_email(&email)
        .await
        .context("email exists")?
        .is_some()
    {
        return Err(Error::EmailExists(email));
    }

    let code = VerificationCode::random();

    data_access
        .insert_user(&email, code.value())
        .await
        .context("insert user")?;

    // fire-and-forget: a failed send is logged, never surfaced to the
    // caller, and does not roll back the insert
    tokio::spawn({
        let email = email.clone();

        async move {
            match smtp::send_verification_code(&smtp, &email, code).await {
                Ok(()) => tracing::info!("verification code sent to {email}"),
                Err(err) => tracing::error!("send verification code :: {err:?}"),
            }
        }
        .instrument(tracing::Span::current())
    });

    let jar = jar.add(session::email_cookie(&email));
    Ok((jar, Redirect::to(&format!("/verify?email={email}"))))
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidEmail(_) | Error::EmailExists(_) => {
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
