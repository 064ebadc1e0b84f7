//! Unauthenticated endpoints used by the public site.
//! Used by: server.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use super::Page;
use crate::error::Result;
use crate::state::AppState;
use crate::store::{Body, Collection, Record};

pub async fn contests(State(state): State<AppState>, Query(page): Query<Page>) -> Result<Json<Vec<Record>>> {
    Ok(Json(state.store.list(Collection::Contests, page.limit())?))
}

pub async fn testimonials(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Record>>> {
    Ok(Json(state.store.list(Collection::Testimonials, page.limit())?))
}

pub async fn contact(
    State(state): State<AppState>,
    Json(body): Json<Body>,
) -> Result<(StatusCode, Json<Record>)> {
    Collection::ContactMessages.validate(&body)?;
    let record = state.store.insert(Collection::ContactMessages, body)?;
    tracing::info!(id = %record.id, "contact message received");
    Ok((StatusCode::CREATED, Json(record)))
}

/// New proposals always enter review as `pending`.
pub async fn propose_breach(
    State(state): State<AppState>,
    Json(mut body): Json<Body>,
) -> Result<(StatusCode, Json<Record>)> {
    Collection::BreachProposals.validate(&body)?;
    body.insert("status".into(), Value::from("pending"));
    let record = state.store.insert(Collection::BreachProposals, body)?;
    tracing::info!(id = %record.id, "breach proposal submitted");
    Ok((StatusCode::CREATED, Json(record)))
}
