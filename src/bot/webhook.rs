//! Webhook transport: an HTTP receiver for updates pushed by Telegram
//!
//! Routes:
//! - `GET /` returns a fixed liveness string
//! - `POST /:token` accepts a Telegram update; the path segment must equal the bot token
//!
//! Every update that reaches the right path is acknowledged with `200`, even when
//! it is malformed or the reply cannot be delivered, so Telegram does not keep
//! redelivering it.

use anyhow::{Context, Result};
use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use teloxide::prelude::*;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, info_span, warn};

use crate::config::BotConfig;
use crate::responder::Responder;

use super::commands::reply_for_text;
use super::reply_sink::ReplySink;

/// Body of the health-check route
pub const HEALTH_RESPONSE: &str = "MedGuide webhook alive";

/// The subset of a Telegram update the bot reads
#[derive(Debug, Default, Deserialize)]
pub struct WebhookUpdate {
    #[serde(default)]
    pub message: Option<InboundMessage>,
    #[serde(default)]
    pub edited_message: Option<InboundMessage>,
    #[serde(default)]
    pub channel_post: Option<InboundMessage>,
}

impl WebhookUpdate {
    /// The message carried by the update, in the order Telegram may populate them
    pub fn into_message(self) -> Option<InboundMessage> {
        self.message
            .or(self.edited_message)
            .or(self.channel_post)
    }
}

#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    pub chat: InboundChat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InboundChat {
    pub id: i64,
}

/// Shared state of the webhook routes
#[derive(Clone)]
pub struct WebhookState {
    responder: Arc<Responder>,
    sink: Arc<dyn ReplySink>,
    token: Arc<str>,
}

impl WebhookState {
    pub fn new(responder: Arc<Responder>, sink: Arc<dyn ReplySink>, token: &str) -> Self {
        Self {
            responder,
            sink,
            token: Arc::from(token),
        }
    }
}

/// Build the webhook router
pub fn router(state: WebhookState) -> Router {
    // Spans carry only the method: the request path contains the bot token
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        info_span!("webhook_request", method = %request.method())
    });

    Router::new()
        .route("/", get(health))
        .route("/:token", post(handle_update))
        .layer(trace)
        .with_state(state)
}

async fn health() -> &'static str {
    HEALTH_RESPONSE
}

async fn handle_update(
    State(state): State<WebhookState>,
    Path(token): Path<String>,
    body: Bytes,
) -> (StatusCode, &'static str) {
    if token != *state.token {
        warn!("Rejected update posted to an unknown path");
        return (StatusCode::NOT_FOUND, "not found");
    }

    let update: WebhookUpdate = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, body_length = body.len(), "Invalid update JSON");
            return (StatusCode::OK, "bad json");
        }
    };

    let Some(message) = update.into_message() else {
        debug!("Ignoring update without a message");
        return (StatusCode::OK, "no message");
    };

    let chat_id = ChatId(message.chat.id);
    let text = message.text.as_deref().unwrap_or_default();
    debug!(user_id = %chat_id, message_length = text.len(), "Received webhook message");

    let reply = reply_for_text(&state.responder, text);
    if let Err(e) = state.sink.send_reply(chat_id, reply).await {
        error!(user_id = %chat_id, error = %e, "Failed to send reply");
    }

    (StatusCode::OK, "ok")
}

/// Register `{base}/{token}` with Telegram when a public base URL is configured
///
/// Failures are logged; the server keeps running so the webhook can be set manually.
pub async fn register_webhook(bot: &Bot, config: &BotConfig) {
    let Some(url) = config.webhook_url() else {
        warn!("WEBHOOK_BASE_URL not set; please call setWebhook manually");
        return;
    };

    let base_url = config.webhook_base_url.as_deref().unwrap_or_default();
    let url = match reqwest::Url::parse(&url) {
        Ok(url) => url,
        Err(e) => {
            error!(base_url, error = %e, "Webhook URL is not valid");
            return;
        }
    };

    info!(base_url, "Setting webhook");
    match bot.set_webhook(url).await {
        Ok(_) => info!(base_url, "Webhook registered"),
        Err(e) => error!(base_url, error = %e, "setWebhook failed"),
    }
}

/// Serve the webhook routes until ctrl-c
pub async fn serve(bot: Bot, responder: Arc<Responder>, config: &BotConfig) -> Result<()> {
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind webhook listener on {addr}"))?;
    info!(%addr, "Webhook server listening");

    // Only point Telegram at us once the listener is up
    register_webhook(&bot, config).await;

    let state = WebhookState::new(responder, Arc::new(bot), &config.bot_token);
    let app = router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Webhook server failed")?;

    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for ctrl-c");
    }
}
