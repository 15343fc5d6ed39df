//! # API GraphQL
//!
//! GraphQL transport for the Nivaran API.
//!
//! Handles:
//! - Schema and resolvers with async-graphql
//! - Role guards declared at resolver registration
//! - Bearer-token authentication and CSRF middleware
//! - Production error redaction at the response boundary
//!
//! Uses `api-shared` for the transport-agnostic decisions and
//! `nivaran-core` for domain logic.

#![warn(rust_2018_idioms)]

pub mod guard;
pub mod routes;
pub mod schema;

pub use routes::{AppState, router};
pub use schema::{AppSchema, SlaPolicy, build_schema};
