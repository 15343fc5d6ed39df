//! Authenticated request principal.

use nivaran_core::Role;
use uuid::Uuid;

/// The authenticated caller of a request.
///
/// Carries exactly one role, assigned at user creation and immutable per
/// session; the role is the sole authorization dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
}

/// Transport adapter surfacing the current request's principal.
///
/// The role guard stays transport-agnostic; each transport shape (HTTP
/// request extensions, GraphQL execution context) provides one
/// implementation that knows how to reach the request it wraps.
pub trait PrincipalSource {
    fn principal(&self) -> Option<Principal>;
}
