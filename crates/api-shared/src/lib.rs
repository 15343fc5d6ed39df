//! # API Shared
//!
//! Shared utilities and definitions for the Nivaran API surface.
//!
//! Contains:
//! - Principal model and bearer-token authentication (usable by any transport)
//! - Role guard and route authorization declarations
//! - CSRF header check
//! - GraphQL wire-error formatting
//! - Shared services like `HealthService`
//!
//! Used by `api-graphql` and the root binary for common functionality. The
//! decisions in this crate are pure; transport adapters (axum middleware,
//! GraphQL context extraction) live next to their transports.

pub mod auth;
pub mod csrf;
pub mod errors;
pub mod guard;
pub mod health;
pub mod principal;

pub use guard::{RouteAuthorization, role_allowed};
pub use health::{HealthRes, HealthService};
pub use principal::{Principal, PrincipalSource};
