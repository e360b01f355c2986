//! Migration service - integration endpoint running the schema migration

use crate::core::{AppError, AppState};
use crate::migration::MigrationReport;
use axum::extract::{Json, State};
use std::sync::Arc;
use tracing::{info, instrument};

#[instrument(skip(state))]
pub async fn migrate_database(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MigrationReport>, AppError> {
    info!("Schema migration requested by integration");
    let report = state.migrator.migrate_database().await?;
    Ok(Json(report))
}
