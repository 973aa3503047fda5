//! Session-to-wave assignment
//!
//! Maps each session, in chronological order, to a wave number bucket and
//! writes back only the assignments that changed.

use std::collections::HashMap;

use futures::future;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};
use tryline_common::Result;

use crate::db;
use crate::planning::capacity::proposed_wave_number;

/// Result of one assignment run
#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Assignment {
    /// Sessions-per-wave was zero (no athletes, or capacity not
    /// configured); no wave numbers were computed and no writes issued
    NotComputable,
    Completed(AssignmentOutcome),
}

/// Per-session write tally for a completed assignment run.
///
/// Updates are independent single-row writes with no transaction across
/// them, so a run can partially succeed; `failed` counts writes that were
/// attempted and rejected.
#[derive(Debug, Default, Serialize)]
pub struct AssignmentOutcome {
    /// Sessions whose wave_id was updated
    pub updated: usize,
    /// Sessions already pointing at their proposed wave (no write issued)
    pub unchanged: usize,
    /// Sessions whose proposed wave number has no wave record
    pub unresolved: usize,
    /// Sessions whose update was attempted and failed
    pub failed: usize,
}

/// Assign each session at chronological position `i` to wave number
/// `floor(i / sessions_per_wave) + 1`, resolving numbers against the wave
/// set as it exists now — callers run this after provisioning so the
/// resolution sees the freshly created waves, not the stale set used to
/// decide what to provision.
///
/// Both reads (sessions, waves) complete before any resolution begins.
/// Only sessions whose current `wave_id` differs from the proposed wave's
/// guid generate a write; those writes target disjoint rows and are issued
/// concurrently with no ordering between them.
pub async fn assign_sessions_to_waves(
    pool: &SqlitePool,
    cohort_id: &str,
    season_id: &str,
    sessions_per_wave: i64,
) -> Result<Assignment> {
    if sessions_per_wave <= 0 {
        return Ok(Assignment::NotComputable);
    }

    let sessions = db::sessions::list_sessions(pool, cohort_id, season_id).await?;
    let waves = db::waves::list_waves(pool, cohort_id, season_id).await?;

    let wave_by_number: HashMap<i64, &str> = waves
        .iter()
        .filter_map(|w| w.wave_number.map(|n| (n, w.guid.as_str())))
        .collect();

    let mut outcome = AssignmentOutcome::default();
    let mut changes: Vec<(&str, &str)> = Vec::new();

    for (index, session) in sessions.iter().enumerate() {
        let number = proposed_wave_number(index, sessions_per_wave);
        match wave_by_number.get(&number) {
            Some(wave_guid) => {
                if session.wave_id.as_deref() == Some(*wave_guid) {
                    outcome.unchanged += 1;
                } else {
                    changes.push((session.guid.as_str(), *wave_guid));
                }
            }
            None => {
                // More sessions than provisioned waves can hold; leave the
                // session unassigned rather than invent a wave
                outcome.unresolved += 1;
            }
        }
    }

    let results = future::join_all(
        changes
            .iter()
            .map(|(session_guid, wave_guid)| {
                db::sessions::set_session_wave(pool, session_guid, wave_guid)
            }),
    )
    .await;

    for ((session_guid, _), result) in changes.iter().zip(results) {
        match result {
            Ok(1) => outcome.updated += 1,
            Ok(_) => {
                warn!(session_guid, "Session vanished during wave assignment");
                outcome.failed += 1;
            }
            Err(e) => {
                warn!(session_guid, error = %e, "Failed to update session wave assignment");
                outcome.failed += 1;
            }
        }
    }

    info!(
        cohort_id,
        season_id,
        updated = outcome.updated,
        unchanged = outcome.unchanged,
        unresolved = outcome.unresolved,
        failed = outcome.failed,
        "Session wave assignment complete"
    );

    Ok(Assignment::Completed(outcome))
}
