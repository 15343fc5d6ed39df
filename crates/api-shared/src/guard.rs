//! Role-based route authorization.
//!
//! Routes and resolvers declare the set of roles permitted to invoke them at
//! registration time; the guard evaluates set membership at dispatch. Open
//! by default when a route declares no restriction; closed whenever an
//! anonymous request hits a restricted route.

use nivaran_core::Role;

/// Allowed-role declaration attached to a route or resolver at registration.
///
/// Static for the lifetime of the process; never mutated at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteAuthorization {
    allowed_roles: Option<Vec<Role>>,
}

impl RouteAuthorization {
    /// A route with no role restriction.
    pub fn public() -> Self {
        Self {
            allowed_roles: None,
        }
    }

    /// A route restricted to the given roles.
    pub fn roles(allowed: &[Role]) -> Self {
        Self {
            allowed_roles: Some(allowed.to_vec()),
        }
    }

    /// The declared allowed roles, if any restriction was declared.
    pub fn allowed_roles(&self) -> Option<&[Role]> {
        self.allowed_roles.as_deref()
    }

    /// Whether a request carrying the given role may invoke this route.
    pub fn permits(&self, request_role: Option<Role>) -> bool {
        role_allowed(self.allowed_roles(), request_role)
    }
}

/// Core authorization decision.
///
/// - No restriction declared on the route: allow unconditionally.
/// - No principal on a restricted route: deny.
/// - Otherwise, set membership of the request role in the declared roles.
///
/// Pure decision over extracted context; the calling transport translates
/// `false` into an authorization failure (HTTP 403 / GraphQL `FORBIDDEN`).
/// This function itself never fails.
pub fn role_allowed(required_roles: Option<&[Role]>, request_role: Option<Role>) -> bool {
    let Some(required) = required_roles else {
        return true;
    };
    if required.is_empty() {
        return true;
    }
    let Some(role) = request_role else {
        return false;
    };
    required.contains(&role)
}
