//! Wave provisioning
//!
//! Ensures the standard waves a cohort is configured for exist in the
//! database, creating only the missing ones.

use sqlx::SqlitePool;
use tracing::info;
use tryline_common::Result;

use crate::db;

/// Create the missing standard waves numbered `1..=sessions_per_cohort`
/// for a cohort/season. Returns how many waves were created.
///
/// Idempotent: wave numbers already present are skipped, so a second call
/// with no intervening state change performs zero writes. Custom waves are
/// never touched.
///
/// No locking is performed. If two provisioners race, the loser's batch
/// insert hits the uniqueness constraint on
/// `(cohort_id, season_id, wave_number)` and the error propagates; callers
/// must re-read wave state before any dependent step rather than assume
/// the set they computed against is still current.
pub async fn ensure_standard_waves(
    pool: &SqlitePool,
    cohort_id: &str,
    season_id: &str,
    sessions_per_cohort: i64,
) -> Result<usize> {
    if sessions_per_cohort <= 0 {
        return Ok(0);
    }

    let existing = db::waves::existing_wave_numbers(pool, cohort_id, season_id).await?;

    let missing: Vec<i64> = (1..=sessions_per_cohort)
        .filter(|n| !existing.contains(n))
        .collect();

    if missing.is_empty() {
        return Ok(0);
    }

    db::waves::create_standard_waves(pool, cohort_id, season_id, &missing).await?;

    info!(
        cohort_id,
        season_id,
        created = missing.len(),
        "Provisioned missing standard waves"
    );

    Ok(missing.len())
}
