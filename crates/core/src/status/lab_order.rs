//! Lab order lifecycle taxonomy.
//!
//! The lifecycle runs order -> collection -> lab processing -> review ->
//! closure, with two failure branches (collection failed, sample issue) and
//! two end branches besides closure (cancelled, expired).

use serde::{Deserialize, Serialize};

use super::{StatusDisplay, StatusTaxonomy};

/// Error returned when a wire value does not name a known lab order status.
#[derive(Debug, thiserror::Error)]
#[error("unknown lab order status: {0}")]
pub struct ParseLabOrderStatusError(pub String);

/// Lifecycle stage of a lab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LabOrderStatus {
    Ordered,
    SlotBooked,
    PhlebotomistAssigned,
    SampleCollected,
    CollectionFailed,
    DeliveredToLab,
    SampleReceived,
    SampleIssue,
    Processing,
    ResultsReady,
    DoctorReviewed,
    ResultsUploaded,
    Cancelled,
    Expired,
    Closed,
}

impl LabOrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [LabOrderStatus; 15] = [
        LabOrderStatus::Ordered,
        LabOrderStatus::SlotBooked,
        LabOrderStatus::PhlebotomistAssigned,
        LabOrderStatus::SampleCollected,
        LabOrderStatus::CollectionFailed,
        LabOrderStatus::DeliveredToLab,
        LabOrderStatus::SampleReceived,
        LabOrderStatus::SampleIssue,
        LabOrderStatus::Processing,
        LabOrderStatus::ResultsReady,
        LabOrderStatus::DoctorReviewed,
        LabOrderStatus::ResultsUploaded,
        LabOrderStatus::Cancelled,
        LabOrderStatus::Expired,
        LabOrderStatus::Closed,
    ];

    /// Wire spelling, matching the persisted schema exactly.
    pub fn as_str(&self) -> &'static str {
        match self {
            LabOrderStatus::Ordered => "ORDERED",
            LabOrderStatus::SlotBooked => "SLOT_BOOKED",
            LabOrderStatus::PhlebotomistAssigned => "PHLEBOTOMIST_ASSIGNED",
            LabOrderStatus::SampleCollected => "SAMPLE_COLLECTED",
            LabOrderStatus::CollectionFailed => "COLLECTION_FAILED",
            LabOrderStatus::DeliveredToLab => "DELIVERED_TO_LAB",
            LabOrderStatus::SampleReceived => "SAMPLE_RECEIVED",
            LabOrderStatus::SampleIssue => "SAMPLE_ISSUE",
            LabOrderStatus::Processing => "PROCESSING",
            LabOrderStatus::ResultsReady => "RESULTS_READY",
            LabOrderStatus::DoctorReviewed => "DOCTOR_REVIEWED",
            LabOrderStatus::ResultsUploaded => "RESULTS_UPLOADED",
            LabOrderStatus::Cancelled => "CANCELLED",
            LabOrderStatus::Expired => "EXPIRED",
            LabOrderStatus::Closed => "CLOSED",
        }
    }

    /// Whether the order can make no further progress.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LabOrderStatus::Cancelled | LabOrderStatus::Expired | LabOrderStatus::Closed
        )
    }
}

impl StatusTaxonomy for LabOrderStatus {
    const NAME: &'static str = "LabOrderStatus";

    fn display(&self) -> StatusDisplay {
        let (label, icon) = match self {
            LabOrderStatus::Ordered => ("Test ordered", "clipboard-list"),
            LabOrderStatus::SlotBooked => ("Collection slot booked", "calendar-check"),
            LabOrderStatus::PhlebotomistAssigned => ("Sample collector assigned", "user-check"),
            LabOrderStatus::SampleCollected => ("Sample collected", "test-tube"),
            LabOrderStatus::CollectionFailed => ("Collection failed", "alert-triangle"),
            LabOrderStatus::DeliveredToLab => ("Sample on the way to lab", "truck"),
            LabOrderStatus::SampleReceived => ("Sample received at lab", "package-check"),
            LabOrderStatus::SampleIssue => ("Issue with sample", "alert-octagon"),
            LabOrderStatus::Processing => ("Sample being processed", "loader"),
            LabOrderStatus::ResultsReady => ("Results ready", "file-check"),
            LabOrderStatus::DoctorReviewed => ("Reviewed by your doctor", "stethoscope"),
            LabOrderStatus::ResultsUploaded => ("Results uploaded", "upload"),
            LabOrderStatus::Cancelled => ("Order cancelled", "x-circle"),
            LabOrderStatus::Expired => ("Order expired", "clock"),
            LabOrderStatus::Closed => ("Order closed", "check-circle"),
        };
        StatusDisplay { label, icon }
    }
}

impl std::fmt::Display for LabOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LabOrderStatus {
    type Err = ParseLabOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseLabOrderStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_has_fifteen_statuses() {
        assert_eq!(LabOrderStatus::ALL.len(), 15);
    }

    #[test]
    fn display_table_is_complete() {
        for status in LabOrderStatus::ALL {
            let display = status.display();
            assert!(!display.label.is_empty(), "{status} has no label");
            assert!(!display.icon.is_empty(), "{status} has no icon");
        }
    }

    #[test]
    fn wire_spellings_round_trip() {
        for status in LabOrderStatus::ALL {
            let parsed: LabOrderStatus =
                status.as_str().parse().expect("wire spelling should parse");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn serde_uses_the_wire_spelling() {
        let json = serde_json::to_string(&LabOrderStatus::PhlebotomistAssigned)
            .expect("serialize status");
        assert_eq!(json, "\"PHLEBOTOMIST_ASSIGNED\"");
    }

    #[test]
    fn only_the_three_end_branches_are_terminal() {
        let terminal: Vec<LabOrderStatus> = LabOrderStatus::ALL
            .into_iter()
            .filter(LabOrderStatus::is_terminal)
            .collect();
        assert_eq!(
            terminal,
            vec![
                LabOrderStatus::Cancelled,
                LabOrderStatus::Expired,
                LabOrderStatus::Closed
            ]
        );
    }

    #[test]
    fn rejects_unknown_wire_values() {
        let err = "SHIPPED".parse::<LabOrderStatus>().expect_err("unknown value");
        assert!(err.to_string().contains("SHIPPED"));
    }
}
