//! SSE notification stream.
//!
//! GET /notifications/stream?token=JWT
//!
//! EventSource can't send custom headers, so the JWT may be passed as a
//! `?token=` query param; the Authorization header is honoured too.

use std::convert::Infallible;

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tracing::debug;

use crate::common::{AuthError, PortalError};
use crate::server::app::AxumAppState;
use crate::server::middleware::jwt_auth;

#[derive(Deserialize)]
pub struct StreamQuery {
    /// JWT token for authentication
    token: Option<String>,
}

/// SSE stream handler.
///
/// Emits `connected` once, then one `notification` event per broadcast. A client
/// that falls behind receives `lagged` with the number of events it missed.
pub async fn stream_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
) -> Result<Sse<impl futures::Stream<Item = Result<Event, Infallible>>>, PortalError> {
    let token = query
        .token
        .or_else(|| extract_bearer_token(&headers))
        .ok_or(AuthError::AuthenticationRequired)?;

    let user = jwt_auth::authenticate(&token, &state.jwt_service, &state.deps.db_pool)
        .await
        .ok_or(AuthError::InvalidToken)?;
    debug!(user_id = %user.user_id, "Notification stream opened");

    let rx = state.hub.subscribe();

    let connected =
        stream::once(async { Ok::<_, Infallible>(Event::default().event("connected").data("ok")) });

    let events = BroadcastStream::new(rx).filter_map(|result| async {
        match result {
            Ok(event) => Event::default()
                .event("notification")
                .json_data(&event)
                .ok()
                .map(Ok),
            Err(BroadcastStreamRecvError::Lagged(n)) => Event::default()
                .event("lagged")
                .json_data(serde_json::json!({"missed": n}))
                .ok()
                .map(Ok),
        }
    });

    Ok(Sse::new(connected.chain(events)).keep_alive(KeepAlive::default()))
}

/// Extract Bearer token from Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get("authorization")?.to_str().ok()?;
    auth.strip_prefix("Bearer ").map(|t| t.to_string())
}
