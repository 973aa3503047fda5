//! Wave planning and assignment
//!
//! The one genuinely algorithmic part of the admin console: deriving how
//! many sessions each wave needs, provisioning the standard waves a cohort
//! is configured for, and bucketing sessions into waves chronologically.
//! Per-athlete distribution into sessions/teams is NOT here — that is the
//! remote balancing service's job (see `services::distribution`).

pub mod assigner;
pub mod capacity;
pub mod provisioner;

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;
use tryline_common::db::models::Cohort;
use tryline_common::Result;

use crate::db;
pub use assigner::{Assignment, AssignmentOutcome};

/// Outcome of one full planning run for a cohort/season
#[derive(Debug, Serialize)]
pub struct PlanSummary {
    /// Live count of active athletes at the time of the run
    pub player_count: i64,
    /// Derived sessions-per-wave; 0 when not computable
    pub sessions_per_wave: i64,
    /// Standard waves created by this run (0 on a repeat run)
    pub waves_created: usize,
    pub assignment: Assignment,
}

/// Run the full planning sequence for a cohort against one season:
/// count athletes, derive sessions-per-wave, provision missing standard
/// waves, then assign sessions to waves.
///
/// Each step re-reads what it needs; in particular the assigner resolves
/// wave guids from the post-provisioning wave set. A provisioning failure
/// aborts the run before any assignment write.
pub async fn generate_wave_plan(
    pool: &SqlitePool,
    cohort: &Cohort,
    season_id: &str,
) -> Result<PlanSummary> {
    let player_count = db::athletes::count_active(pool, &cohort.guid, season_id).await?;
    let sessions_per_wave = capacity::sessions_per_wave(player_count, cohort.session_capacity);

    let waves_created = provisioner::ensure_standard_waves(
        pool,
        &cohort.guid,
        season_id,
        cohort.sessions_per_cohort,
    )
    .await?;

    let assignment =
        assigner::assign_sessions_to_waves(pool, &cohort.guid, season_id, sessions_per_wave)
            .await?;

    info!(
        cohort_id = %cohort.guid,
        season_id,
        player_count,
        sessions_per_wave,
        waves_created,
        "Wave plan generated"
    );

    Ok(PlanSummary {
        player_count,
        sessions_per_wave,
        waves_created,
        assignment,
    })
}
