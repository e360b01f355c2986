//! Schema migration - one-shot, idempotent upgrade of the legacy database
//!
//! The routine is a fixed, ordered list of guarded statements. Each step
//! introspects `information_schema` before touching anything, so running the
//! whole list again is a no-op. Steps run one at a time, without a
//! surrounding transaction: a failure stops the sequence and leaves the steps
//! before it applied.

pub mod steps;

use crate::repositories::PoolType;
use serde::Serialize;
use steps::{LegacyStep, Phase};
use tracing::{info, instrument, warn};

/// Steps that completed, in execution order
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct MigrationReport {
    pub completed_steps: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("step `{step}` failed: {source}")]
    Step {
        step: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("schema sync failed: {0}")]
    Sync(#[from] sqlx::migrate::MigrateError),
}

pub struct SchemaMigrator {
    connection_pool: PoolType,
}

impl SchemaMigrator {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    /// Runs the full sequence: legacy schema fixes, schema sync, data
    /// rewrites and cleanup.
    #[instrument(skip(self))]
    pub async fn migrate_database(&self) -> Result<MigrationReport, MigrationError> {
        let mut report = MigrationReport::default();

        info!("Migrating DB schema...");
        for step in steps::legacy_steps().iter().filter(|s| s.phase == Phase::Schema) {
            self.run_step(step, &mut report).await?;
        }

        info!("Syncing DB schema...");
        sqlx::migrate!("./migrations")
            .run(&self.connection_pool)
            .await?;
        report.completed_steps.push(steps::SCHEMA_SYNC_STEP.to_string());

        info!("Migrating DB data...");
        for step in steps::legacy_steps().iter().filter(|s| s.phase == Phase::Data) {
            self.run_step(step, &mut report).await?;
        }

        info!("Clean up old DB data...");
        for step in steps::legacy_steps().iter().filter(|s| s.phase == Phase::Cleanup) {
            self.run_step(step, &mut report).await?;
        }

        info!("Migration complete ({} steps)", report.completed_steps.len());
        Ok(report)
    }

    async fn run_step(
        &self,
        step: &LegacyStep,
        report: &mut MigrationReport,
    ) -> Result<(), MigrationError> {
        info!("Running migration step {}", step.name);
        // raw_sql: DO blocks and multi-statement scripts cannot be prepared
        sqlx::raw_sql(&step.sql)
            .execute(&self.connection_pool)
            .await
            .map_err(|source| {
                warn!("Migration step {} failed: {}", step.name, source);
                MigrationError::Step {
                    step: step.name.clone(),
                    source,
                }
            })?;
        report.completed_steps.push(step.name.clone());
        Ok(())
    }
}
