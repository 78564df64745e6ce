use std::path::PathBuf;

use clap::Parser;

use server::{Redacted, ServerError, ServerOpts, SmtpConfig, serve};

/// Signup and email-verification server.
#[derive(Debug, Parser)]
struct Args {
    /// The port number on which the server will listen for incoming connections.
    /// Example: `3000`
    #[arg(long, env = "PORT")]
    port: u16,

    /// The database connection URL used by the server.
    /// Example: `sqlite:///tmp/data/data.db` (or) `./data.db`
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// The directory containing the static pages
    /// (`signup.html`, `verify.html`, `main.html`).
    #[arg(long, env = "UI_DIR")]
    ui_dir: PathBuf,

    /// The SMTP relay used for sending verification emails.
    /// Example: `smtp.gmail.com`
    #[arg(long, env = "SMTP_RELAY")]
    smtp_relay: String,

    /// SMTP relay port, when not the protocol default.
    #[arg(long, env = "SMTP_PORT")]
    smtp_port: Option<u16>,

    /// The username for authenticating with the SMTP relay.
    #[arg(long, env = "SMTP_USERNAME")]
    smtp_username: Option<String>,

    /// The password for the SMTP relay. Never logged.
    #[arg(long, env = "SMTP_PASSWORD")]
    smtp_password: Option<Redacted<String>>,

    /// The sender address for verification emails.
    /// Example: `noreply@example.com`
    #[arg(long, env = "SMTP_SENDER")]
    smtp_sender: String,
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt().init();

    let args = Args::parse();

    serve(ServerOpts {
        database_url: args.database_url,
        port: args.port,
        ui_dir: args.ui_dir,
        smtp: SmtpConfig {
            relay: args.smtp_relay,
            port: args.smtp_port,
            username: args.smtp_username,
            password: args.smtp_password,
            sender: args.smtp_sender,
        },
    })
    .await
}
