mod api;
mod code;
mod middleware;
mod redacted;
mod session;
mod smtp;
mod span;

pub use code::VerificationCode;
pub use redacted::Redacted;
pub use smtp::{Mailer, MailerError, Smtp};

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    middleware::from_fn,
    response::Redirect,
    routing::{get, get_service, post},
};
use contextual::Context;
use data_access::DataAccess;
use email::Email;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeFile,
    trace::TraceLayer,
};

pub const MAIN_PAGE_PATH: &str = "/main";

#[derive(Debug)]
pub struct ServerOpts {
    pub database_url: String,
    pub port: u16,
    pub ui_dir: PathBuf,
    pub smtp: SmtpConfig,
}

#[derive(Debug)]
pub struct SmtpConfig {
    pub relay: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<Redacted<String>>,
    pub sender: String,
}

#[derive(Clone)]
pub struct AppState {
    pub data_access: DataAccess,
    pub smtp: Smtp,
}

/// The two-step signup/verification flow plus health, behind the shared
/// middleware stack.
pub fn server(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(from_fn(middleware::mw_client_ip))
        .layer(TraceLayer::new_for_http().make_span_with(span::span))
        .layer(from_fn(middleware::latency_ms))
        .layer(from_fn(middleware::mw_handle_leaked_5xx));

    Router::new()
        .route(api::health::PATH, get(api::health::handler))
        .route(api::signup::PATH, post(api::signup::handler))
        .route(api::verify::PATH, post(api::verify::handler))
        .with_state(state)
        .layer(middleware)
}

/// Static pages: the signup form, the code-entry form and the landing page,
/// with `/` redirecting to the start of the flow. The `email` query param on
/// the code-entry page is display only and never read server side.
pub fn ui(ui_dir: &Path) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to(api::signup::PATH) }))
        .route(
            api::signup::PATH,
            get_service(ServeFile::new(ui_dir.join("signup.html"))),
        )
        .route(
            api::verify::PATH,
            get_service(ServeFile::new(ui_dir.join("verify.html"))),
        )
        .route(
            MAIN_PAGE_PATH,
            get_service(ServeFile::new(ui_dir.join("main.html"))),
        )
}

pub async fn serve(opts: ServerOpts) -> Result<(), ServerError> {
    tracing::info!(
        database_url = %opts.database_url,
        port = opts.port,
        ui_dir = %opts.ui_dir.display(),
        smtp_relay = %opts.smtp.relay,
        smtp_sender = %opts.smtp.sender,
    );

    let data_access = DataAccess::connect(&opts.database_url)
        .await
        .context(format!("connect database :: {}", opts.database_url))?;
    data_access.migrate().await.context("run migrations")?;

    let sender: Email = opts
        .smtp
        .sender
        .parse()
        .map_err(ServerError::InvalidSender)?;

    let transport = {
        let mut transport =
            lettre::AsyncSmtpTransport::<lettre::Tokio1Executor>::starttls_relay(&opts.smtp.relay)
                .context("smtp relay")?;

        if let (Some(username), Some(password)) = (opts.smtp.username, opts.smtp.password) {
            use lettre::transport::smtp::authentication::Credentials;
            transport = transport.credentials(Credentials::new(username, password.reveal()));
        }

        if let Some(port) = opts.smtp.port {
            transport = transport.port(port);
        }

        transport.build()
    };

    let smtp = Smtp {
        mailer: Arc::new(Mailer::Smtp(transport)),
        sender,
    };

    let app = Router::new()
        .merge(ui(&opts.ui_dir))
        .merge(server(AppState {
            data_access: data_access.clone(),
            smtp,
        }))
        .into_make_service_with_connect_info::<SocketAddr>();

    let addr = SocketAddr::from(([127, 0, 0, 1], opts.port));
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("bind :: {addr}"))?;
    tracing::info!(
        "listening on {}",
        listener.local_addr().context("local_addr")?
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("axum::serve")?;

    data_access.close().await;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => tracing::error!("install shutdown signal handler :: {err:?}"),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    Sqlx(#[from] contextual::Error<sqlx::Error>),

    #[error("{0}")]
    Migrate(#[from] contextual::Error<sqlx::migrate::MigrateError>),

    #[error("{0}")]
    SmtpTransport(#[from] contextual::Error<lettre::transport::smtp::Error>),

    #[error("invalid smtp sender address :: {0}")]
    InvalidSender(&'static str),

    #[error("{0}")]
    Io(#[from] contextual::Error<std::io::Error>),
}
