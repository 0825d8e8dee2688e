// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact guard service.
//!
//! The website posts its contact form here. Admitted submissions are turned
//! into a contact email and handed to the configured [`Mailer`].

use crate::config::Config;
use crate::gate::{GateError, SubmissionGate};
use crate::identity::identify;
use crate::mail::{ContactEmail, Mailer};
use crate::metrics::{Metrics, Outcome};
use crate::submission::ContactSubmission;
use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Shared application state.
pub struct AppState {
    pub gate: SubmissionGate,
    pub mailer: Box<dyn Mailer>,
    pub metrics: Metrics,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, mailer: Box<dyn Mailer>) -> Result<Self, prometheus::Error> {
        Ok(Self {
            gate: SubmissionGate::from_config(&config),
            mailer,
            metrics: Metrics::new()?,
            config,
        })
    }
}

/// Submission response body.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<&'static str, String>,
}

impl SubmitResponse {
    fn failure(code: &'static str, message: &'static str) -> Self {
        Self {
            success: false,
            message,
            code: Some(code),
            remaining: None,
            retry_after_secs: None,
            fields: BTreeMap::new(),
        }
    }
}

/// Remaining attempts response.
#[derive(Debug, Serialize)]
pub struct LimitsResponse {
    pub remaining: u32,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    let mut router = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/contact", post(contact))
        .route("/limits", get(limits));

    if state.config.metrics.enabled {
        router = router.route(&state.config.metrics.path, get(metrics));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contact-guard",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Accept a contact form submission.
pub async fn contact(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(submission): Json<ContactSubmission>,
) -> Response {
    let peer = connect_info.map(|ConnectInfo(addr)| addr);
    let identifier = identify(state.config.identifier, &headers, peer);

    let result = state.gate.admit(&identifier, &submission);
    state
        .metrics
        .set_tracked_identifiers(state.gate.limiter().tracked_identifiers());

    let admitted = match result {
        Ok(admitted) => admitted,
        Err(GateError::Invalid(validation)) => {
            state.metrics.record(Outcome::Invalid);
            let mut body = SubmitResponse::failure("INVALID_FIELDS", "Please correct the highlighted fields");
            body.fields = validation.messages();
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
        }
        Err(GateError::RateLimited { retry_after }) => {
            state.metrics.record(Outcome::RateLimited);
            let retry_secs = ceil_secs(retry_after);
            let mut body =
                SubmitResponse::failure("RATE_LIMITED", "Too many messages sent. Please try again later");
            body.retry_after_secs = Some(retry_secs);
            return (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_secs.to_string())],
                Json(body),
            )
                .into_response();
        }
    };

    let email = ContactEmail::compose(&admitted.submission, &state.config.mail, Utc::now());
    if let Err(err) = state.mailer.deliver(&email).await {
        error!(error = %err, "Contact email delivery failed");
        state.metrics.record(Outcome::MailFailed);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SubmitResponse::failure("MAIL_FAILED", "Message could not be sent")),
        )
            .into_response();
    }

    debug!(remaining = admitted.remaining, "Contact submission delivered");
    state.metrics.record(Outcome::Accepted);
    (
        StatusCode::OK,
        Json(SubmitResponse {
            success: true,
            message: "Message sent",
            code: None,
            remaining: Some(admitted.remaining),
            retry_after_secs: None,
            fields: BTreeMap::new(),
        }),
    )
        .into_response()
}

/// Remaining submission attempts for the caller.
pub async fn limits(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Json<LimitsResponse> {
    let peer = connect_info.map(|ConnectInfo(addr)| addr);
    let identifier = identify(state.config.identifier, &headers, peer);

    Json(LimitsResponse {
        remaining: state.gate.remaining_attempts(&identifier),
    })
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}
