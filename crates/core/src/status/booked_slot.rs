//! Booked collection/consultation slot taxonomy.

use serde::{Deserialize, Serialize};

use super::{StatusDisplay, StatusTaxonomy};

/// Error returned when a wire value does not name a known slot status.
#[derive(Debug, thiserror::Error)]
#[error("unknown booked slot status: {0}")]
pub struct ParseBookedSlotStatusError(pub String);

/// Lifecycle stage of a booked slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookedSlotStatus {
    Booked,
    Completed,
    Cancelled,
    NoShow,
}

impl BookedSlotStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [BookedSlotStatus; 4] = [
        BookedSlotStatus::Booked,
        BookedSlotStatus::Completed,
        BookedSlotStatus::Cancelled,
        BookedSlotStatus::NoShow,
    ];

    /// Wire spelling, matching the persisted schema exactly.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookedSlotStatus::Booked => "BOOKED",
            BookedSlotStatus::Completed => "COMPLETED",
            BookedSlotStatus::Cancelled => "CANCELLED",
            BookedSlotStatus::NoShow => "NO_SHOW",
        }
    }
}

impl StatusTaxonomy for BookedSlotStatus {
    const NAME: &'static str = "BookedSlotStatus";

    fn display(&self) -> StatusDisplay {
        let (label, icon) = match self {
            BookedSlotStatus::Booked => ("Slot booked", "calendar-check"),
            BookedSlotStatus::Completed => ("Appointment completed", "check-circle"),
            BookedSlotStatus::Cancelled => ("Slot cancelled", "x-circle"),
            BookedSlotStatus::NoShow => ("Missed appointment", "user-x"),
        };
        StatusDisplay { label, icon }
    }
}

impl std::fmt::Display for BookedSlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookedSlotStatus {
    type Err = ParseBookedSlotStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseBookedSlotStatusError(s.to_string()))
    }
}
