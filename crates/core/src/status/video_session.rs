//! Video visit session taxonomy.

use serde::{Deserialize, Serialize};

use super::{StatusDisplay, StatusTaxonomy};

/// Error returned when a wire value does not name a known session status.
#[derive(Debug, thiserror::Error)]
#[error("unknown video session status: {0}")]
pub struct ParseVideoSessionStatusError(pub String);

/// Lifecycle stage of a scheduled video visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoSessionStatus {
    Scheduled,
    WaitingRoom,
    InProgress,
    Completed,
    NoShow,
    TechnicalIssue,
    Rescheduled,
    Cancelled,
}

impl VideoSessionStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [VideoSessionStatus; 8] = [
        VideoSessionStatus::Scheduled,
        VideoSessionStatus::WaitingRoom,
        VideoSessionStatus::InProgress,
        VideoSessionStatus::Completed,
        VideoSessionStatus::NoShow,
        VideoSessionStatus::TechnicalIssue,
        VideoSessionStatus::Rescheduled,
        VideoSessionStatus::Cancelled,
    ];

    /// Wire spelling, matching the persisted schema exactly.
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoSessionStatus::Scheduled => "SCHEDULED",
            VideoSessionStatus::WaitingRoom => "WAITING_ROOM",
            VideoSessionStatus::InProgress => "IN_PROGRESS",
            VideoSessionStatus::Completed => "COMPLETED",
            VideoSessionStatus::NoShow => "NO_SHOW",
            VideoSessionStatus::TechnicalIssue => "TECHNICAL_ISSUE",
            VideoSessionStatus::Rescheduled => "RESCHEDULED",
            VideoSessionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl StatusTaxonomy for VideoSessionStatus {
    const NAME: &'static str = "VideoSessionStatus";

    fn display(&self) -> StatusDisplay {
        let (label, icon) = match self {
            VideoSessionStatus::Scheduled => ("Video visit scheduled", "calendar"),
            VideoSessionStatus::WaitingRoom => ("In waiting room", "door-open"),
            VideoSessionStatus::InProgress => ("Visit in progress", "video"),
            VideoSessionStatus::Completed => ("Visit completed", "check-circle"),
            VideoSessionStatus::NoShow => ("Patient did not join", "user-x"),
            VideoSessionStatus::TechnicalIssue => ("Technical issue", "wifi-off"),
            VideoSessionStatus::Rescheduled => ("Visit rescheduled", "calendar-plus"),
            VideoSessionStatus::Cancelled => ("Visit cancelled", "x-circle"),
        };
        StatusDisplay { label, icon }
    }
}

impl std::fmt::Display for VideoSessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VideoSessionStatus {
    type Err = ParseVideoSessionStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseVideoSessionStatusError(s.to_string()))
    }
}
