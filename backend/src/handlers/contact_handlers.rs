use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::HeaderMap,
    Extension, Json,
};
use std::net::SocketAddr;
use serde_json::json;
use studio_shared::ContactSubmission;

use crate::error::ApiError;
use crate::utils::rate_limit::client_key;
use crate::AppState;

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    peer: Option<Extension<ConnectInfo<SocketAddr>>>,
    headers: HeaderMap,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let peer = peer.map(|Extension(ConnectInfo(addr))| addr);
    let client = client_key(&headers, peer, state.config.trust_forwarded_for);
    if !state.contact_limiter.check(&client) {
        tracing::warn!("Contact rate limit hit by {}", client);
        return Err(ApiError::RateLimited);
    }

    let Json(submission) = payload?;

    // Same rules as the browser; this is the copy that counts.
    if let Err(e) = submission.validate() {
        tracing::debug!("Rejected contact request from {}: {}", client, e);
        return Err(e.into());
    }

    state
        .contact_sink
        .deliver(&submission)
        .await
        .map_err(|e| ApiError::Delivery(e.to_string()))?;

    tracing::info!(
        "Contact request delivered from {} (project: {})",
        client,
        submission.project_type.map_or("-", |p| p.as_str())
    );
    Ok(Json(json!({"message": "Thanks! We will get back to you shortly."})))
}
