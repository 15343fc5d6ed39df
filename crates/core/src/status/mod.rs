//! Status taxonomies for tracked platform entities.
//!
//! Each tracked entity (lab order, pharmacy order, video session, booked
//! slot, subscription) has a closed set of lifecycle stages. Every value
//! maps to patient-facing display metadata, and the lookup is total over the
//! enum: a value without an entry cannot be constructed.
//!
//! No ordering or transition logic lives here. These are classification
//! values for display and filtering, not a state machine.

mod booked_slot;
mod lab_order;
mod pharmacy_order;
mod subscription;
mod video_session;

pub use booked_slot::BookedSlotStatus;
pub use lab_order::LabOrderStatus;
pub use pharmacy_order::OrderStatus;
pub use subscription::SubscriptionStatus;
pub use video_session::VideoSessionStatus;

/// Patient-facing display metadata for a status value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusDisplay {
    /// Short label shown in timelines and dashboards.
    pub label: &'static str,
    /// Icon slug rendered beside the label.
    pub icon: &'static str,
}

/// Fallback display used when a raw status value cannot be resolved.
pub const UNKNOWN_STATUS_DISPLAY: StatusDisplay = StatusDisplay {
    label: "Unknown status",
    icon: "help-circle",
};

/// Common surface of every status taxonomy.
pub trait StatusTaxonomy: Copy + std::str::FromStr {
    /// Taxonomy name used in diagnostics.
    const NAME: &'static str;

    /// Display metadata for this value. Total over the enum.
    fn display(&self) -> StatusDisplay;
}

/// Resolve display metadata for a raw status value from the wire.
///
/// An unmapped value indicates schema drift between producer and consumer.
/// It is logged and mapped to [`UNKNOWN_STATUS_DISPLAY`] so a bad record
/// degrades one row of a timeline instead of failing the display layer.
pub fn display_for_raw<S: StatusTaxonomy>(raw: &str) -> StatusDisplay {
    match raw.parse::<S>() {
        Ok(status) => status.display(),
        Err(_) => {
            tracing::warn!(
                taxonomy = S::NAME,
                value = raw,
                "unmapped status value, falling back to generic display"
            );
            UNKNOWN_STATUS_DISPLAY
        }
    }
}
