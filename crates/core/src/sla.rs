//! SLA classification for operational escalation views.
//!
//! A resource's timing data is judged against its deadline on read; nothing
//! here is persisted. The approaching window is an escalation policy value
//! owned by configuration, never hardcoded here.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// On-time / approaching / breached judgement for a tracked resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlaStatus {
    OnTime,
    Approaching,
    Breached,
}

/// Derived SLA information. Computed on read, never stored.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlaInfo {
    pub status: SlaStatus,
    /// Human-readable cause, populated unless the resource is on time.
    pub reason: Option<String>,
    /// Whole hours past the deadline; only populated for breaches.
    pub hours_overdue: Option<i64>,
    pub deadline_at: DateTime<Utc>,
}

/// Classify a resource's deadline against the current time.
///
/// - `Breached` when `now` is strictly past `deadline_at`; `hours_overdue`
///   carries the overrun rounded to whole hours.
/// - `Approaching` when the remaining time is within `approaching_window`.
/// - `OnTime` otherwise, with `reason` and `hours_overdue` empty.
///
/// Pure function of the two timestamps and the window; repeated calls with
/// the same inputs return the same classification.
pub fn classify(
    deadline_at: DateTime<Utc>,
    now: DateTime<Utc>,
    approaching_window: Duration,
) -> SlaInfo {
    if now > deadline_at {
        let hours = rounded_hours(now - deadline_at);
        return SlaInfo {
            status: SlaStatus::Breached,
            reason: Some(format!("Deadline passed {hours} hour(s) ago")),
            hours_overdue: Some(hours),
            deadline_at,
        };
    }

    let remaining = deadline_at - now;
    if remaining <= approaching_window {
        return SlaInfo {
            status: SlaStatus::Approaching,
            reason: Some(format!("Due in about {} hour(s)", rounded_hours(remaining))),
            hours_overdue: None,
            deadline_at,
        };
    }

    SlaInfo {
        status: SlaStatus::OnTime,
        reason: None,
        hours_overdue: None,
        deadline_at,
    }
}

/// Round a non-negative duration to whole hours, half up.
fn rounded_hours(duration: Duration) -> i64 {
    (duration.num_minutes() + 30).div_euclid(60)
}
