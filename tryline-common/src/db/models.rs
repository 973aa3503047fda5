//! Database models
//!
//! Row structs and the string-backed enums stored in TEXT columns.
//! Enum values are persisted in snake_case; `as_str`/`FromStr` keep the
//! database representation and the JSON representation identical.

use crate::Error;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Season lifecycle status. At most one season per association is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonStatus {
    Draft,
    Active,
    Completed,
}

impl SeasonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonStatus::Draft => "draft",
            SeasonStatus::Active => "active",
            SeasonStatus::Completed => "completed",
        }
    }
}

impl FromStr for SeasonStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(SeasonStatus::Draft),
            "active" => Ok(SeasonStatus::Active),
            "completed" => Ok(SeasonStatus::Completed),
            other => Err(Error::InvalidInput(format!("Unknown season status: {}", other))),
        }
    }
}

impl fmt::Display for SeasonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wave kind: standard waves are numbered, custom waves are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveType {
    Standard,
    Custom,
}

impl WaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveType::Standard => "standard",
            WaveType::Custom => "custom",
        }
    }
}

impl FromStr for WaveType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(WaveType::Standard),
            "custom" => Ok(WaveType::Custom),
            other => Err(Error::InvalidInput(format!("Unknown wave type: {}", other))),
        }
    }
}

/// Wave progress status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl WaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveStatus::NotStarted => "not_started",
            WaveStatus::InProgress => "in_progress",
            WaveStatus::Completed => "completed",
        }
    }
}

impl FromStr for WaveStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(WaveStatus::NotStarted),
            "in_progress" => Ok(WaveStatus::InProgress),
            "completed" => Ok(WaveStatus::Completed),
            other => Err(Error::InvalidInput(format!("Unknown wave status: {}", other))),
        }
    }
}

/// Strategy the remote balancing procedure uses to place athletes into
/// sessions/teams within a wave. The implementation of each strategy lives
/// in the balancing service; this is only the wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionAlgorithm {
    Alphabetical,
    Random,
    PreviousLevel,
}

impl DistributionAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionAlgorithm::Alphabetical => "alphabetical",
            DistributionAlgorithm::Random => "random",
            DistributionAlgorithm::PreviousLevel => "previous_level",
        }
    }
}

impl FromStr for DistributionAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alphabetical" => Ok(DistributionAlgorithm::Alphabetical),
            "random" => Ok(DistributionAlgorithm::Random),
            "previous_level" => Ok(DistributionAlgorithm::PreviousLevel),
            other => Err(Error::InvalidInput(format!(
                "Unknown distribution algorithm: {}",
                other
            ))),
        }
    }
}

/// Athlete roster status. Only active athletes count toward wave capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AthleteStatus {
    Active,
    Inactive,
    Waitlisted,
}

impl AthleteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AthleteStatus::Active => "active",
            AthleteStatus::Inactive => "inactive",
            AthleteStatus::Waitlisted => "waitlisted",
        }
    }
}

impl FromStr for AthleteStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AthleteStatus::Active),
            "inactive" => Ok(AthleteStatus::Inactive),
            "waitlisted" => Ok(AthleteStatus::Waitlisted),
            other => Err(Error::InvalidInput(format!("Unknown athlete status: {}", other))),
        }
    }
}

/// Invitation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Revoked,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Revoked => "revoked",
        }
    }
}

impl FromStr for InvitationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvitationStatus::Pending),
            "accepted" => Ok(InvitationStatus::Accepted),
            "revoked" => Ok(InvitationStatus::Revoked),
            other => Err(Error::InvalidInput(format!(
                "Unknown invitation status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Association {
    pub guid: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub guid: String,
    pub association_id: String,
    pub name: String,
    pub status: SeasonStatus,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cohort {
    pub guid: String,
    pub association_id: String,
    pub name: String,
    /// Athletes one session can hold; zero means capacity planning is not
    /// configured for this cohort
    pub session_capacity: i64,
    /// Number of standard waves the cohort runs per season
    pub sessions_per_cohort: i64,
    pub sort_order: i64,
    /// Retired cohorts stay in the database but drop out of admin listings
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wave {
    pub guid: String,
    pub cohort_id: String,
    pub season_id: String,
    /// Set for standard waves; custom waves carry `name` instead
    pub wave_number: Option<i64>,
    pub name: Option<String>,
    pub wave_type: WaveType,
    pub status: WaveStatus,
    pub distribution_algorithm: DistributionAlgorithm,
    pub teams_per_session: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub guid: String,
    pub cohort_id: String,
    pub season_id: String,
    pub location_id: Option<String>,
    pub scheduled_date: NaiveDate,
    /// "HH:MM", lexicographically orderable
    pub scheduled_time: String,
    pub wave_id: Option<String>,
}

/// Session plus the aggregated counts shown in the schedule view.
/// Counts are display-only; nothing recomputes from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionWithCounts {
    #[serde(flatten)]
    pub session: Session,
    pub drill_count: i64,
    pub evaluator_count: i64,
    pub intake_count: i64,
    pub enrolled_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Athlete {
    pub guid: String,
    pub association_id: String,
    pub cohort_id: String,
    pub season_id: String,
    pub first_name: String,
    pub last_name: String,
    pub status: AthleteStatus,
    pub previous_level_id: Option<String>,
}

/// Previous-level ranking entry; `rank` orders tiers for the
/// `previous_level` balancing input (1 = highest)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub guid: String,
    pub association_id: String,
    pub name: String,
    pub rank: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub guid: String,
    pub association_id: String,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionType {
    pub guid: String,
    pub association_id: String,
    pub name: String,
    pub sort_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub guid: String,
    pub association_id: String,
    pub email: String,
    /// "admin" | "evaluator" | "intake"
    pub role: String,
    pub status: InvitationStatus,
    pub invited_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_algorithm_round_trip() {
        for s in ["alphabetical", "random", "previous_level"] {
            let parsed: DistributionAlgorithm = s.parse().unwrap();
            assert_eq!(parsed.as_str(), s);
        }
        assert!("bogus".parse::<DistributionAlgorithm>().is_err());
    }

    #[test]
    fn test_season_status_strings() {
        assert_eq!(SeasonStatus::Active.as_str(), "active");
        assert_eq!("draft".parse::<SeasonStatus>().unwrap(), SeasonStatus::Draft);
        assert!("paused".parse::<SeasonStatus>().is_err());
    }
}
