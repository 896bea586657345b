//! HTTP route handlers.
//!
//! ```text
//! POST /contacts       - Create a contact
//! GET  /contacts       - List contacts (externalId, phoneNumber, limit, offset)
//! GET  /ping           - Liveness, answers "pong"
//! GET  /health/ready   - Readiness, checks the store
//! ```

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Deserializer};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::error::Result;
use crate::model::{Contact, CreateContactRequest, NewContact};
use crate::pagination::{PageRequest, DEFAULT_LIMIT, DEFAULT_OFFSET};
use crate::state::AppState;
use crate::store::ContactFilter;

/// Query string of `GET /contacts`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactQuery {
    #[serde(
        default,
        alias = "external_id",
        deserialize_with = "empty_as_none"
    )]
    pub external_id: Option<i32>,
    #[serde(default, alias = "phone_number")]
    pub phone_number: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default = "default_offset")]
    pub offset: i32,
}

/// `externalId=` binds to no value instead of failing to parse.
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

const fn default_limit() -> i32 {
    DEFAULT_LIMIT
}

const fn default_offset() -> i32 {
    DEFAULT_OFFSET
}

/// Build the service router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/health/ready", get(readiness))
        .route("/contacts", post(create_contact).get(list_contacts))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(false)),
        )
}

async fn create_contact(
    State(state): State<AppState>,
    Json(payload): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<Contact>)> {
    let new_contact = NewContact::stamped(payload, Utc::now());
    let contact = state.store().insert(new_contact).await?;

    tracing::debug!(id = contact.id, "contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn list_contacts(
    State(state): State<AppState>,
    Query(params): Query<ContactQuery>,
) -> Result<Json<Vec<Contact>>> {
    let page = PageRequest::from_limit_offset(params.limit, params.offset)?;
    let filter = ContactFilter::from_params(params.external_id, params.phone_number);

    tracing::debug!(
        ?filter,
        page_number = page.page_number(),
        page_size = page.page_size(),
        "listing contacts"
    );

    let contacts = state.store().query(&filter, page).await?;
    Ok(Json(contacts))
}

async fn ping() -> &'static str {
    "pong"
}

/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
