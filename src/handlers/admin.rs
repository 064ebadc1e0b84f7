//! Back-office record management. Every handler is gated by `AdminClaims`.
//! Used by: server.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::Page;
use crate::error::Result;
use crate::gate::AdminClaims;
use crate::state::AppState;
use crate::store::{Body, Collection, Record};

pub async fn list(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(collection): Path<Collection>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Record>>> {
    Ok(Json(state.store.list(collection, page.limit())?))
}

pub async fn create(
    AdminClaims(claims): AdminClaims,
    State(state): State<AppState>,
    Path(collection): Path<Collection>,
    Json(body): Json<Body>,
) -> Result<(StatusCode, Json<Record>)> {
    collection.validate(&body)?;
    let record = state.store.insert(collection, body)?;
    tracing::info!(sub = %claims.sub, collection = collection.as_str(), id = %record.id, "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path((collection, id)): Path<(Collection, String)>,
) -> Result<Json<Record>> {
    Ok(Json(state.store.get(collection, &id)?))
}

pub async fn update(
    AdminClaims(claims): AdminClaims,
    State(state): State<AppState>,
    Path((collection, id)): Path<(Collection, String)>,
    Json(patch): Json<Body>,
) -> Result<Json<Record>> {
    collection.validate_patch(&patch)?;
    let record = state.store.update(collection, &id, patch)?;
    tracing::info!(sub = %claims.sub, collection = collection.as_str(), id = %id, "record updated");
    Ok(Json(record))
}

pub async fn delete(
    AdminClaims(claims): AdminClaims,
    State(state): State<AppState>,
    Path((collection, id)): Path<(Collection, String)>,
) -> Result<StatusCode> {
    state.store.delete(collection, &id)?;
    tracing::info!(sub = %claims.sub, collection = collection.as_str(), id = %id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}
