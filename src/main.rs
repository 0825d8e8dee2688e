// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Guard Service
//!
//! Receives contact form submissions, sanitizes and validates them, applies
//! a per-client attempt limit and hands admitted messages to the mailer.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `MAX_ATTEMPTS`: Accepted submissions per client per window (default: 5)
//! - `WINDOW_MS`: Window length in milliseconds (default: 900000)
//! - `IDENTIFIER_SOURCE`: `client` (User-Agent + Host) or `peer` (socket address)
//! - `METRICS_ENABLED`: Expose `/metrics` (default: true)
//! - `MAIL_FROM`, `MAIL_TO`: Contact email envelope

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contact_guard::{
    config::Config,
    handlers::{router, AppState},
    mail::LogMailer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        max_attempts = config.rate_limit.max_attempts,
        window_ms = config.rate_limit.window_ms,
        identifier = ?config.identifier,
        "Starting contact guard"
    );

    let addr: SocketAddr = config.bind_addr.parse()?;
    let state = Arc::new(AppState::new(config, Box::new(LogMailer))?);
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
