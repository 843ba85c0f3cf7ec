use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use service::{errors::ServiceError, guestbook::domain::Entry};
use tracing::{info, warn};

use crate::{errors::ApiError, metrics, routes::ServerState};

/// Submission body. Both fields are optional at the wire level so that a
/// missing or null field gets the same 400 as a blank one.
#[derive(Debug, Deserialize)]
pub struct SubmitEntryInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[utoipa::path(
    get, path = "/api/guestbook", tag = "guestbook",
    responses(
        (status = 200, description = "Entries, newest first", body = [crate::openapi::EntryDoc]),
        (status = 500, description = "Store unavailable; body is an empty array")
    )
)]
pub async fn list_entries(State(state): State<ServerState>) -> (StatusCode, Json<Vec<Entry>>) {
    match state.guestbook.list().await {
        Ok(entries) => (StatusCode::OK, Json(entries)),
        Err(_) => {
            // already logged by the service
            metrics::STORAGE_ERRORS_TOTAL.inc();
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::new()))
        }
    }
}

#[utoipa::path(
    post, path = "/api/guestbook", tag = "guestbook",
    request_body = crate::openapi::SubmitEntryRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::EntryDoc),
        (status = 400, description = "Name and message are required", body = crate::openapi::ErrorBody),
        (status = 500, description = "Failed to save message; also returned for a body that is not a JSON object of strings", body = crate::openapi::ErrorBody)
    )
)]
pub async fn submit_entry(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    // Parsed whatever the Content-Type says.
    let input: SubmitEntryInput = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, "guestbook submission body unparseable");
            metrics::SUBMISSIONS_REJECTED_TOTAL.inc();
            return Err(ApiError::MalformedBody);
        }
    };

    let name = input.name.unwrap_or_default();
    let message = input.message.unwrap_or_default();
    match state.guestbook.submit(&name, &message).await {
        Ok(entry) => {
            metrics::ENTRIES_CREATED_TOTAL.inc();
            info!(id = entry.id, "guestbook_submit_ok");
            Ok((StatusCode::CREATED, Json(entry)))
        }
        Err(e) => {
            match &e {
                ServiceError::InvalidInput(_) => metrics::SUBMISSIONS_REJECTED_TOTAL.inc(),
                ServiceError::Storage(_) => metrics::STORAGE_ERRORS_TOTAL.inc(),
            }
            Err(e.into())
        }
    }
}
