use std::sync::Arc;

use contextual::Context;
use email::Email;
use lettre::{
    AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
};

use crate::VerificationCode;

pub const VERIFICATION_SUBJECT: &str = "Account Verification";

/// Outbound mail transport.
///
/// `File` writes `.eml` files to a directory instead of talking to a relay;
/// integration tests inject it so no network is involved.
pub enum Mailer {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    File(AsyncFileTransport<Tokio1Executor>),
}

impl Mailer {
    pub async fn send(&self, message: Message) -> Result<(), MailerError> {
        match self {
            Mailer::Smtp(transport) => {
                transport.send(message).await?;
            }
            Mailer::File(transport) => {
                transport.send(message).await?;
            }
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum MailerError {
    #[error("{0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("{0}")]
    File(#[from] lettre::transport::file::Error),
}

#[derive(Clone)]
pub struct Smtp {
    pub mailer: Arc<Mailer>,
    pub sender: Email,
}

/// Sends the six digit code to a freshly signed up address.
///
/// Callers run this fire-and-forget: a failure here is logged and must never
/// change the outcome of the signup request that triggered it.
pub async fn send_verification_code(
    smtp: &Smtp,
    to: &Email,
    code: VerificationCode,
) -> Result<(), SendVerificationCodeError> {
    let from = Mailbox::new(None, smtp.sender.clone().into());
    let to = Mailbox::new(None, to.clone().into());

    let plain_text_content =
        format!("Thank you for signing up. Your verification code is: {code}.");
    let html_content = format!(
        "<p>Dear User,</p>\
         <p>Thank you for signing up. Your verification code is: <strong>{code}</strong>.</p>\
         <p>Please use this code to verify your account.</p>"
    );

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(VERIFICATION_SUBJECT)
        .multipart(MultiPart::alternative_plain_html(
            plain_text_content,
            html_content,
        ))
        .context("verification message builder")?;

    smtp.mailer
        .send(message)
        .await
        .context("send verification email")?;

    Ok(())
}

#[derive(thiserror::Error, Debug)]
pub enum SendVerificationCodeError {
    #[error("{0:?}")]
    EmailContent(#[from] contextual::Error<lettre::error::Error>),

    #[error("{0:?}")]
    Transport(#[from] contextual::Error<MailerError>),
}
