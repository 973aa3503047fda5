//! HTTP API handlers for tryline-admin

pub mod cohorts;
pub mod distribution;
pub mod health;
pub mod invitations;
pub mod levels;
pub mod locations;
pub mod planning;
pub mod positions;
pub mod seasons;
pub mod sessions;
pub mod waves;

use serde::Deserialize;

/// Query parameter shared by the association-scoped list endpoints
#[derive(Debug, Deserialize)]
pub struct AssociationQuery {
    pub association_id: String,
}
