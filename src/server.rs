use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Form, Query, State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;

use crate::config::Config;
use crate::errors::WebhookError;
use crate::github::GitHubClient;
use crate::publish::PublishTransaction;
use crate::review::parse_review;
use crate::slack::{SlackPayload, WebhookForm};

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub config: Config,
    pub github: GitHubClient,
}

pub type SharedState = Arc<AppState>;

#[derive(Deserialize)]
pub struct AuthQuery {
    pub secret: Option<String>,
}

// ── Error handling ────────────────────────────────────────────────────

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        // Every failure is a 400 carrying the stringified error; the
        // response contract has no finer status taxonomy.
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook).fallback(not_implemented))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}

/// Fixed response for every non-POST method on the webhook path.
async fn not_implemented() -> Response {
    (StatusCode::NOT_IMPLEMENTED, "Nothing to see here...").into_response()
}

// ── Webhook handler ───────────────────────────────────────────────────

async fn handle_webhook(
    State(state): State<SharedState>,
    Query(query): Query<AuthQuery>,
    form: Result<Form<WebhookForm>, FormRejection>,
) -> Response {
    match process_webhook(&state, query, form).await {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "webhook request failed");
            err.into_response()
        }
    }
}

async fn process_webhook(
    state: &AppState,
    query: AuthQuery,
    form: Result<Form<WebhookForm>, FormRejection>,
) -> Result<&'static str, WebhookError> {
    if query.secret.as_deref() != Some(state.config.secret.as_str()) {
        return Err(WebhookError::Unauthorized);
    }

    let Form(form) = form.map_err(|rejection| WebhookError::InvalidForm(rejection.to_string()))?;
    let payload = SlackPayload::from_json(&form.payload)?;

    if !payload.is_message() {
        return Err(WebhookError::NotAMessage {
            kind: payload.message.kind.clone(),
        });
    }

    let (review, report) = parse_review(&payload.cleaned_text(), &payload.user.name);
    if !report.is_clean() {
        tracing::warn!(title = %review.title, missing = %report, "review parsed with missing fields");
    }

    let transaction = PublishTransaction::new(
        &state.github,
        &state.config.github.branch,
        &state.config.github.index_path,
    );
    let published = transaction.publish(&review).await?;
    tracing::info!(
        slug = %review.slug(),
        commit = %published.commit,
        author = %review.author,
        "review published"
    );

    Ok("Snacked!")
}

// ── Server startup ────────────────────────────────────────────────────

pub async fn start_server(config: Config, host: &str, port: u16) -> Result<()> {
    let github = GitHubClient::new(
        &config.github.token,
        &config.github.owner,
        &config.github.repo,
    );
    let state = Arc::new(AppState { config, github });
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    println!("snackpub listening at http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    println!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    println!("\nShutting down...");
}
