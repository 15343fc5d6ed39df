//! Pharmacy/delivery order lifecycle taxonomy.
//!
//! Runs prescription -> pharmacy fulfilment -> dispatch -> delivery, with a
//! failure branch (delivery failed) and a reschedule branch.

use serde::{Deserialize, Serialize};

use super::{StatusDisplay, StatusTaxonomy};

/// Error returned when a wire value does not name a known order status.
#[derive(Debug, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

/// Lifecycle stage of a pharmacy/delivery order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    PrescriptionCreated,
    SentToPharmacy,
    PharmacyPreparing,
    PharmacyReady,
    PickupArranged,
    OutForDelivery,
    Delivered,
    DeliveryFailed,
    Rescheduled,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [OrderStatus; 10] = [
        OrderStatus::PrescriptionCreated,
        OrderStatus::SentToPharmacy,
        OrderStatus::PharmacyPreparing,
        OrderStatus::PharmacyReady,
        OrderStatus::PickupArranged,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::DeliveryFailed,
        OrderStatus::Rescheduled,
        OrderStatus::Cancelled,
    ];

    /// Wire spelling, matching the persisted schema exactly.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PrescriptionCreated => "PRESCRIPTION_CREATED",
            OrderStatus::SentToPharmacy => "SENT_TO_PHARMACY",
            OrderStatus::PharmacyPreparing => "PHARMACY_PREPARING",
            OrderStatus::PharmacyReady => "PHARMACY_READY",
            OrderStatus::PickupArranged => "PICKUP_ARRANGED",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::DeliveryFailed => "DELIVERY_FAILED",
            OrderStatus::Rescheduled => "RESCHEDULED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether the order can make no further progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl StatusTaxonomy for OrderStatus {
    const NAME: &'static str = "OrderStatus";

    fn display(&self) -> StatusDisplay {
        let (label, icon) = match self {
            OrderStatus::PrescriptionCreated => ("Prescription created", "file-text"),
            OrderStatus::SentToPharmacy => ("Sent to pharmacy", "send"),
            OrderStatus::PharmacyPreparing => ("Pharmacy preparing your order", "pill"),
            OrderStatus::PharmacyReady => ("Ready at pharmacy", "package"),
            OrderStatus::PickupArranged => ("Pickup arranged", "calendar-clock"),
            OrderStatus::OutForDelivery => ("Out for delivery", "truck"),
            OrderStatus::Delivered => ("Delivered", "check-circle"),
            OrderStatus::DeliveryFailed => ("Delivery failed", "alert-triangle"),
            OrderStatus::Rescheduled => ("Delivery rescheduled", "calendar-plus"),
            OrderStatus::Cancelled => ("Order cancelled", "x-circle"),
        };
        StatusDisplay { label, icon }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseOrderStatusError(s.to_string()))
    }
}
