//! Platform role taxonomy.
//!
//! Every authenticated principal carries exactly one role, and the role is
//! the sole authorization dimension across the platform. The wire spellings
//! here are a contract with the persisted schema and must not drift.

use serde::{Deserialize, Serialize};

/// Error returned when a wire value does not name a known role.
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Authorization role attached to a user at creation.
///
/// Immutable per session; a request carries exactly one role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
    Lab,
    Phlebotomist,
    Pharmacy,
    Delivery,
}

impl Role {
    /// All roles, in schema declaration order.
    pub const ALL: [Role; 7] = [
        Role::Patient,
        Role::Doctor,
        Role::Admin,
        Role::Lab,
        Role::Phlebotomist,
        Role::Pharmacy,
        Role::Delivery,
    ];

    /// Wire spelling, matching the persisted schema exactly.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "PATIENT",
            Role::Doctor => "DOCTOR",
            Role::Admin => "ADMIN",
            Role::Lab => "LAB",
            Role::Phlebotomist => "PHLEBOTOMIST",
            Role::Pharmacy => "PHARMACY",
            Role::Delivery => "DELIVERY",
        }
    }

    /// Human-readable name shown in the portal role tables.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Doctor => "Doctor",
            Role::Admin => "Care coordinator",
            Role::Lab => "Lab technician",
            Role::Phlebotomist => "Sample collector",
            Role::Pharmacy => "Pharmacy",
            Role::Delivery => "Delivery partner",
        }
    }

    /// Badge colour used by the admin portal's role tables.
    pub fn badge_color(&self) -> &'static str {
        match self {
            Role::Patient => "#2563eb",
            Role::Doctor => "#0d9488",
            Role::Admin => "#7c3aed",
            Role::Lab => "#b45309",
            Role::Phlebotomist => "#be185d",
            Role::Pharmacy => "#15803d",
            Role::Delivery => "#4b5563",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PATIENT" => Ok(Role::Patient),
            "DOCTOR" => Ok(Role::Doctor),
            "ADMIN" => Ok(Role::Admin),
            "LAB" => Ok(Role::Lab),
            "PHLEBOTOMIST" => Ok(Role::Phlebotomist),
            "PHARMACY" => Ok(Role::Pharmacy),
            "DELIVERY" => Ok(Role::Delivery),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}
