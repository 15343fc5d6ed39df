//! Treatment plan subscription taxonomy.

use serde::{Deserialize, Serialize};

use super::{StatusDisplay, StatusTaxonomy};

/// Error returned when a wire value does not name a known subscription status.
#[derive(Debug, thiserror::Error)]
#[error("unknown subscription status: {0}")]
pub struct ParseSubscriptionStatusError(pub String);

/// Lifecycle stage of a treatment plan subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
    Expired,
}

impl SubscriptionStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [SubscriptionStatus; 4] = [
        SubscriptionStatus::Active,
        SubscriptionStatus::Paused,
        SubscriptionStatus::Cancelled,
        SubscriptionStatus::Expired,
    ];

    /// Wire spelling, matching the persisted schema exactly.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::Paused => "PAUSED",
            SubscriptionStatus::Cancelled => "CANCELLED",
            SubscriptionStatus::Expired => "EXPIRED",
        }
    }
}

impl StatusTaxonomy for SubscriptionStatus {
    const NAME: &'static str = "SubscriptionStatus";

    fn display(&self) -> StatusDisplay {
        let (label, icon) = match self {
            SubscriptionStatus::Active => ("Plan active", "badge-check"),
            SubscriptionStatus::Paused => ("Plan paused", "pause-circle"),
            SubscriptionStatus::Cancelled => ("Plan cancelled", "x-circle"),
            SubscriptionStatus::Expired => ("Plan expired", "clock"),
        };
        StatusDisplay { label, icon }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = ParseSubscriptionStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseSubscriptionStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_has_four_statuses() {
        assert_eq!(SubscriptionStatus::ALL.len(), 4);
    }

    #[test]
    fn display_table_is_complete() {
        for status in SubscriptionStatus::ALL {
            let display = status.display();
            assert!(!display.label.is_empty(), "{status} has no label");
            assert!(!display.icon.is_empty(), "{status} has no icon");
        }
    }

    #[test]
    fn wire_spellings_round_trip() {
        for status in SubscriptionStatus::ALL {
            let parsed: SubscriptionStatus =
                status.as_str().parse().expect("wire spelling should parse");
            assert_eq!(parsed, status);
        }
    }
}
