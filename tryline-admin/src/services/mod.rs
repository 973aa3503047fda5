//! External service clients

pub mod distribution;

pub use distribution::DistributionClient;
