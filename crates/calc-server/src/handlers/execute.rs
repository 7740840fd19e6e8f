//! Query execution handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use tracing::{error, info};

use crate::dto::{QueryRequest, QueryResponse};
use crate::error::{AppError, AppJson};
use crate::AppState;

/// POST /execute - Runs the query text through the calculator agent.
///
/// Any agent failure becomes an opaque 500; the cause is only logged.
pub async fn execute(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<QueryRequest>,
) -> Result<Json<QueryResponse>, AppError> {
    let response = state.agent.run(&req.input_text).await.map_err(|e| {
        error!(user_id = %req.user_id, agent = state.agent.name(), "Agent execution failed: {}", e);
        AppError::from(e)
    })?;

    info!(user_id = %req.user_id, agent = state.agent.name(), "Query executed");
    Ok(Json(QueryResponse { response }))
}
