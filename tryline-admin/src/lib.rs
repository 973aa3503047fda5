//! tryline-admin library - association administration service
//!
//! HTTP service for association administrators: seasons, cohorts,
//! locations, position types, previous-level rankings, invitations, and
//! the wave/session planning operations.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod planning;
pub mod services;

use services::DistributionClient;

/// Tracks which resources have a mutating operation in flight, so the
/// same operation cannot be triggered re-entrantly while one run is
/// still awaiting remote calls.
#[derive(Clone, Default)]
pub struct InFlightGuard {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl InFlightGuard {
    /// Claim `key` for an operation. Returns None if an operation on that
    /// key is already running; otherwise a token that releases the claim
    /// on drop (including error and panic unwinds).
    pub fn try_begin(&self, key: &str) -> Option<InFlightToken> {
        let mut set = self.inner.lock().expect("in-flight guard poisoned");
        if !set.insert(key.to_string()) {
            return None;
        }
        Some(InFlightToken {
            inner: Arc::clone(&self.inner),
            key: key.to_string(),
        })
    }
}

/// Claim on a resource held for the duration of one operation
pub struct InFlightToken {
    inner: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightToken {
    fn drop(&mut self) {
        if let Ok(mut set) = self.inner.lock() {
            set.remove(&self.key);
        }
    }
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Remote balancing service client
    pub distribution: Arc<DistributionClient>,
    /// Per-cohort guard against re-entrant plan generation
    pub generating: InFlightGuard,
    /// Per-wave guard against re-entrant distribution calls
    pub distributing: InFlightGuard,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, distribution: DistributionClient) -> Self {
        Self {
            db,
            distribution: Arc::new(distribution),
            generating: InFlightGuard::default(),
            distributing: InFlightGuard::default(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    let api = Router::new()
        // Cohorts and planning
        .route("/api/cohorts", get(api::cohorts::list_cohorts).post(api::cohorts::create_cohort))
        .route(
            "/api/cohorts/:id",
            put(api::cohorts::update_cohort).delete(api::cohorts::delete_cohort),
        )
        .route("/api/cohorts/:id/plan", get(api::planning::get_plan_overview))
        .route("/api/cohorts/:id/waves/generate", post(api::planning::generate_waves))
        // Seasons
        .route("/api/seasons", get(api::seasons::list_seasons).post(api::seasons::create_season))
        .route("/api/seasons/active", get(api::seasons::get_active_season))
        .route("/api/seasons/:id/status", put(api::seasons::update_season_status))
        // Waves
        .route("/api/waves", get(api::waves::list_waves))
        .route("/api/waves/:id/config", put(api::waves::update_wave_config))
        .route("/api/waves/:id/distribute", post(api::distribution::distribute_wave))
        // Sessions
        .route("/api/sessions", get(api::sessions::list_sessions).post(api::sessions::create_session))
        .route("/api/sessions/:id", put(api::sessions::update_session))
        // Reference data
        .route("/api/levels", get(api::levels::list_levels).post(api::levels::create_level))
        .route("/api/levels/:id", put(api::levels::update_level).delete(api::levels::delete_level))
        .route(
            "/api/locations",
            get(api::locations::list_locations).post(api::locations::create_location),
        )
        .route(
            "/api/locations/:id",
            put(api::locations::update_location).delete(api::locations::delete_location),
        )
        .route(
            "/api/positions",
            get(api::positions::list_positions).post(api::positions::create_position),
        )
        .route(
            "/api/positions/:id",
            put(api::positions::update_position).delete(api::positions::delete_position),
        )
        // Invitations
        .route(
            "/api/invitations",
            get(api::invitations::list_invitations).post(api::invitations::create_invitation),
        )
        .route("/api/invitations/:id/status", put(api::invitations::update_invitation_status));

    Router::new()
        .merge(api)
        .merge(api::health::health_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
