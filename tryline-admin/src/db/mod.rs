//! Database operations for tryline-admin
//!
//! One module per table. Every function takes the pool and returns
//! `tryline_common::Result`; rows are owned by the database — these
//! modules fetch, insert, and update, and nothing here caches.

pub mod athletes;
pub mod cohorts;
pub mod invitations;
pub mod levels;
pub mod locations;
pub mod positions;
pub mod seasons;
pub mod sessions;
pub mod waves;
