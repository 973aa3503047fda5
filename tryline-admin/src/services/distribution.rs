//! Client for the remote player-balancing service
//!
//! Athlete placement into sessions/teams within a wave happens in a
//! separate service behind the `distribute_wave_players` endpoint. This
//! client sends the wave's configuration and reports success or the
//! service's error message; it never inspects the resulting placements.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tryline_common::config::BalancingConfig;
use tryline_common::db::models::DistributionAlgorithm;

const DISTRIBUTE_PATH: &str = "/rpc/distribute_wave_players";
const USER_AGENT: &str = concat!("tryline-admin/", env!("CARGO_PKG_VERSION"));

/// Balancing service client errors
#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Balancing service error {0}: {1}")]
    ServiceError(u16, String),

    #[error("Distribution rejected: {0}")]
    Rejected(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Serialize)]
struct DistributeRequest<'a> {
    wave_id: &'a str,
    algorithm: &'a str,
    teams_per_session: i64,
}

#[derive(Debug, Deserialize)]
struct DistributeResponse {
    success: bool,
    error: Option<String>,
}

/// Balancing service client
#[derive(Debug, Clone)]
pub struct DistributionClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl DistributionClient {
    pub fn new(config: &BalancingConfig) -> Result<Self, DistributionError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DistributionError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Ask the balancing service to distribute a wave's athletes into
    /// sessions/teams using the given algorithm and team count.
    ///
    /// Opaque success/failure contract: the service's placements are not
    /// returned or verified here.
    pub async fn distribute(
        &self,
        wave_id: &str,
        algorithm: DistributionAlgorithm,
        teams_per_session: i64,
    ) -> Result<(), DistributionError> {
        let url = format!("{}{}", self.base_url, DISTRIBUTE_PATH);
        let request = DistributeRequest {
            wave_id,
            algorithm: algorithm.as_str(),
            teams_per_session,
        };

        tracing::debug!(wave_id, algorithm = algorithm.as_str(), teams_per_session, "Invoking balancing service");

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DistributionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DistributionError::ServiceError(status.as_u16(), message));
        }

        let body: DistributeResponse = response
            .json()
            .await
            .map_err(|e| DistributionError::Parse(e.to_string()))?;

        if !body.success {
            return Err(DistributionError::Rejected(
                body.error.unwrap_or_else(|| "unspecified error".to_string()),
            ));
        }

        Ok(())
    }
}
