//! Integration tests for the wave planning subsystem
//!
//! Exercises the provisioner, assigner, and full planning sequence against
//! a real SQLite database.

mod helpers;

use helpers::*;
use sqlx::Row;
use tryline_admin::db;
use tryline_admin::planning::{self, assigner, provisioner, Assignment};
use uuid::Uuid;

#[tokio::test]
async fn test_provisioner_creates_only_missing_waves() {
    let (_dir, pool) = setup_test_db().await;
    let assoc = seed_association(&pool).await;
    let season = seed_season(&pool, &assoc, "active").await;
    let cohort = seed_cohort(&pool, &assoc, "U12", 20, 3).await;

    // Waves 1 and 2 already exist
    for number in [1, 2] {
        sqlx::query(
            "INSERT INTO waves (guid, cohort_id, season_id, wave_number) VALUES (?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&cohort)
        .bind(&season)
        .bind(number)
        .execute(&pool)
        .await
        .unwrap();
    }

    let created = provisioner::ensure_standard_waves(&pool, &cohort, &season, 3)
        .await
        .unwrap();
    assert_eq!(created, 1, "Only wave 3 should be created");

    let numbers = db::waves::existing_wave_numbers(&pool, &cohort, &season)
        .await
        .unwrap();
    assert_eq!(numbers, vec![1, 2, 3]);

    // Second invocation with no state change performs zero writes
    let created_again = provisioner::ensure_standard_waves(&pool, &cohort, &season, 3)
        .await
        .unwrap();
    assert_eq!(created_again, 0);
}

#[tokio::test]
async fn test_provisioned_waves_carry_default_configuration() {
    let (_dir, pool) = setup_test_db().await;
    let assoc = seed_association(&pool).await;
    let season = seed_season(&pool, &assoc, "active").await;
    let cohort = seed_cohort(&pool, &assoc, "U12", 20, 2).await;

    provisioner::ensure_standard_waves(&pool, &cohort, &season, 2)
        .await
        .unwrap();

    let waves = db::waves::list_waves(&pool, &cohort, &season).await.unwrap();
    assert_eq!(waves.len(), 2);
    for wave in &waves {
        assert_eq!(wave.wave_type.as_str(), "standard");
        assert_eq!(wave.status.as_str(), "not_started");
        assert_eq!(wave.distribution_algorithm.as_str(), "alphabetical");
        assert_eq!(wave.teams_per_session, 2);
    }
}

#[tokio::test]
async fn test_provisioner_ignores_custom_waves() {
    let (_dir, pool) = setup_test_db().await;
    let assoc = seed_association(&pool).await;
    let season = seed_season(&pool, &assoc, "active").await;
    let cohort = seed_cohort(&pool, &assoc, "U12", 20, 2).await;

    sqlx::query(
        "INSERT INTO waves (guid, cohort_id, season_id, name, wave_type)
         VALUES (?, ?, ?, 'Goalies', 'custom')",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&cohort)
    .bind(&season)
    .execute(&pool)
    .await
    .unwrap();

    let created = provisioner::ensure_standard_waves(&pool, &cohort, &season, 2)
        .await
        .unwrap();
    assert_eq!(created, 2, "Custom wave must not count toward standard numbering");
}

#[tokio::test]
async fn test_assigner_buckets_sessions_chronologically() {
    let (_dir, pool) = setup_test_db().await;
    let assoc = seed_association(&pool).await;
    let season = seed_season(&pool, &assoc, "active").await;
    let cohort = seed_cohort(&pool, &assoc, "U12", 20, 3).await;
    provisioner::ensure_standard_waves(&pool, &cohort, &season, 3)
        .await
        .unwrap();

    // Seeded out of order; chronological position decides the bucket
    let s3 = seed_session(&pool, &cohort, &season, "2026-04-02", "09:00").await;
    let s1 = seed_session(&pool, &cohort, &season, "2026-04-01", "09:00").await;
    let s5 = seed_session(&pool, &cohort, &season, "2026-04-03", "09:00").await;
    let s2 = seed_session(&pool, &cohort, &season, "2026-04-01", "11:00").await;
    let s4 = seed_session(&pool, &cohort, &season, "2026-04-02", "11:00").await;

    let assignment = assigner::assign_sessions_to_waves(&pool, &cohort, &season, 2)
        .await
        .unwrap();
    let outcome = match assignment {
        Assignment::Completed(outcome) => outcome,
        Assignment::NotComputable => panic!("Assignment should be computable"),
    };
    assert_eq!(outcome.updated, 5);
    assert_eq!(outcome.unchanged, 0);
    assert_eq!(outcome.failed, 0);
    assert_eq!(outcome.unresolved, 0);

    // Positions 0-4 at 2 per wave map to waves [1, 1, 2, 2, 3]
    let waves = wave_map(&pool, &cohort, &season).await;
    assert_eq!(session_wave(&pool, &s1).await.as_deref(), Some(waves[&1].as_str()));
    assert_eq!(session_wave(&pool, &s2).await.as_deref(), Some(waves[&1].as_str()));
    assert_eq!(session_wave(&pool, &s3).await.as_deref(), Some(waves[&2].as_str()));
    assert_eq!(session_wave(&pool, &s4).await.as_deref(), Some(waves[&2].as_str()));
    assert_eq!(session_wave(&pool, &s5).await.as_deref(), Some(waves[&3].as_str()));
}

#[tokio::test]
async fn test_assigner_skips_sessions_already_assigned() {
    let (_dir, pool) = setup_test_db().await;
    let assoc = seed_association(&pool).await;
    let season = seed_season(&pool, &assoc, "active").await;
    let cohort = seed_cohort(&pool, &assoc, "U12", 20, 2).await;
    provisioner::ensure_standard_waves(&pool, &cohort, &season, 2)
        .await
        .unwrap();

    let s1 = seed_session(&pool, &cohort, &season, "2026-04-01", "09:00").await;
    let s2 = seed_session(&pool, &cohort, &season, "2026-04-01", "11:00").await;

    let waves = wave_map(&pool, &cohort, &season).await;

    // First session already points at its proposed wave
    sqlx::query("UPDATE sessions SET wave_id = ? WHERE guid = ?")
        .bind(&waves[&1])
        .bind(&s1)
        .execute(&pool)
        .await
        .unwrap();

    let assignment = assigner::assign_sessions_to_waves(&pool, &cohort, &season, 2)
        .await
        .unwrap();
    let outcome = match assignment {
        Assignment::Completed(outcome) => outcome,
        Assignment::NotComputable => panic!("Assignment should be computable"),
    };
    assert_eq!(outcome.unchanged, 1, "Pre-assigned session must not generate a write");
    assert_eq!(outcome.updated, 1);

    assert_eq!(session_wave(&pool, &s2).await.as_deref(), Some(waves[&1].as_str()));
}

#[tokio::test]
async fn test_assigner_noop_when_sessions_per_wave_is_zero() {
    let (_dir, pool) = setup_test_db().await;
    let assoc = seed_association(&pool).await;
    let season = seed_season(&pool, &assoc, "active").await;
    let cohort = seed_cohort(&pool, &assoc, "U12", 0, 2).await;
    provisioner::ensure_standard_waves(&pool, &cohort, &season, 2)
        .await
        .unwrap();

    let s1 = seed_session(&pool, &cohort, &season, "2026-04-01", "09:00").await;

    let assignment = assigner::assign_sessions_to_waves(&pool, &cohort, &season, 0)
        .await
        .unwrap();
    assert!(matches!(assignment, Assignment::NotComputable));
    assert_eq!(session_wave(&pool, &s1).await, None, "No update may be issued");
}

#[tokio::test]
async fn test_assigner_reports_sessions_beyond_provisioned_waves() {
    let (_dir, pool) = setup_test_db().await;
    let assoc = seed_association(&pool).await;
    let season = seed_season(&pool, &assoc, "active").await;
    let cohort = seed_cohort(&pool, &assoc, "U12", 20, 1).await;
    provisioner::ensure_standard_waves(&pool, &cohort, &season, 1)
        .await
        .unwrap();

    let s1 = seed_session(&pool, &cohort, &season, "2026-04-01", "09:00").await;
    let s2 = seed_session(&pool, &cohort, &season, "2026-04-02", "09:00").await;

    // One wave, one session per wave: the second session has no bucket
    let assignment = assigner::assign_sessions_to_waves(&pool, &cohort, &season, 1)
        .await
        .unwrap();
    let outcome = match assignment {
        Assignment::Completed(outcome) => outcome,
        Assignment::NotComputable => panic!("Assignment should be computable"),
    };
    assert_eq!(outcome.updated, 1);
    assert_eq!(outcome.unresolved, 1);
    assert!(session_wave(&pool, &s1).await.is_some());
    assert_eq!(session_wave(&pool, &s2).await, None);
}

#[tokio::test]
async fn test_count_active_ignores_inactive_athletes() {
    let (_dir, pool) = setup_test_db().await;
    let assoc = seed_association(&pool).await;
    let season = seed_season(&pool, &assoc, "active").await;
    let cohort = seed_cohort(&pool, &assoc, "U12", 20, 2).await;

    seed_athletes(&pool, &assoc, &cohort, &season, 7, "active").await;
    seed_athletes(&pool, &assoc, &cohort, &season, 3, "inactive").await;
    seed_athletes(&pool, &assoc, &cohort, &season, 2, "waitlisted").await;

    let count = db::athletes::count_active(&pool, &cohort, &season).await.unwrap();
    assert_eq!(count, 7);
}

#[tokio::test]
async fn test_generate_wave_plan_end_to_end() {
    let (_dir, pool) = setup_test_db().await;
    let assoc = seed_association(&pool).await;
    let season = seed_season(&pool, &assoc, "active").await;
    let cohort_id = seed_cohort(&pool, &assoc, "U14", 10, 4).await;
    seed_athletes(&pool, &assoc, &cohort_id, &season, 35, "active").await;

    let mut session_ids = Vec::new();
    for day in 1..=8 {
        let date = format!("2026-04-{:02}", day);
        session_ids.push(seed_session(&pool, &cohort_id, &season, &date, "18:00").await);
    }

    let cohort = db::cohorts::get_cohort(&pool, &cohort_id).await.unwrap().unwrap();
    let summary = planning::generate_wave_plan(&pool, &cohort, &season).await.unwrap();

    // 35 athletes at capacity 10: 4 sessions per wave
    assert_eq!(summary.player_count, 35);
    assert_eq!(summary.sessions_per_wave, 4);
    assert_eq!(summary.waves_created, 4);

    let outcome = match summary.assignment {
        Assignment::Completed(outcome) => outcome,
        Assignment::NotComputable => panic!("Assignment should be computable"),
    };
    assert_eq!(outcome.updated, 8);

    // Chronological buckets: first four sessions in wave 1, rest in wave 2
    let waves = wave_map(&pool, &cohort_id, &season).await;
    assert_eq!(waves.len(), 4);
    for (index, session_id) in session_ids.iter().enumerate() {
        let expected_wave = &waves[&((index as i64) / 4 + 1)];
        assert_eq!(
            session_wave(&pool, session_id).await.as_deref(),
            Some(expected_wave.as_str()),
            "Session at position {} landed in the wrong wave",
            index
        );
    }

    // Re-running the whole plan changes nothing
    let repeat = planning::generate_wave_plan(&pool, &cohort, &season).await.unwrap();
    assert_eq!(repeat.waves_created, 0);
    let outcome = match repeat.assignment {
        Assignment::Completed(outcome) => outcome,
        Assignment::NotComputable => panic!("Assignment should be computable"),
    };
    assert_eq!(outcome.updated, 0);
    assert_eq!(outcome.unchanged, 8);
}

#[tokio::test]
async fn test_session_counts_aggregate_related_rows() {
    let (_dir, pool) = setup_test_db().await;
    let assoc = seed_association(&pool).await;
    let season = seed_season(&pool, &assoc, "active").await;
    let cohort = seed_cohort(&pool, &assoc, "U12", 20, 1).await;
    let session = seed_session(&pool, &cohort, &season, "2026-04-01", "09:00").await;

    seed_athletes(&pool, &assoc, &cohort, &season, 2, "active").await;
    let athlete_ids: Vec<String> = sqlx::query("SELECT guid FROM athletes WHERE cohort_id = ?")
        .bind(&cohort)
        .fetch_all(&pool)
        .await
        .unwrap()
        .iter()
        .map(|row| row.get("guid"))
        .collect();
    for athlete_id in &athlete_ids {
        sqlx::query("INSERT INTO session_enrollments (session_id, athlete_id) VALUES (?, ?)")
            .bind(&session)
            .bind(athlete_id)
            .execute(&pool)
            .await
            .unwrap();
    }
    sqlx::query("INSERT INTO session_staff (session_id, email, role) VALUES (?, 'eva@example.org', 'evaluator')")
        .bind(&session)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO session_drills (session_id, name) VALUES (?, 'Skating circuit')")
        .bind(&session)
        .execute(&pool)
        .await
        .unwrap();

    let sessions = db::sessions::list_sessions_with_counts(&pool, &cohort, &season)
        .await
        .unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].enrolled_count, 2);
    assert_eq!(sessions[0].evaluator_count, 1);
    assert_eq!(sessions[0].intake_count, 0);
    assert_eq!(sessions[0].drill_count, 1);
}
