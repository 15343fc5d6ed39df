//! # Nivaran Core
//!
//! Core classification logic for the Nivaran telehealth platform.
//!
//! This crate contains pure domain logic with no API concerns:
//! - Role taxonomy used by every authorization check
//! - Status taxonomies for lab orders, pharmacy orders, video sessions,
//!   booked slots and subscriptions, with patient-facing display metadata
//! - SLA classification for operational escalation views
//! - Startup environment validation
//!
//! **No API concerns**: authentication, HTTP serving or the GraphQL schema
//! belong in `api-shared` and `api-graphql`.

pub mod config;
pub mod roles;
pub mod sla;
pub mod status;

pub use config::{AppConfig, ConfigError, Environment};
pub use roles::Role;
pub use sla::{SlaInfo, SlaStatus, classify};
