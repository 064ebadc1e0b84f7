//! Auth telemetry snapshot endpoint (admin only).
//! Used by: server.

use axum::extract::State;
use axum::Json;

use crate::gate::AdminClaims;
use crate::state::AppState;
use crate::telemetry::MetricsSnapshot;

pub async fn metrics(_admin: AdminClaims, State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
