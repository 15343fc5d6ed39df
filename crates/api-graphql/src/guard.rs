//! Role guard adapter for the GraphQL transport.

use async_graphql::{Context, Error, ErrorExtensions, Guard, Result};

use api_shared::errors::ErrorCode;
use api_shared::{Principal, PrincipalSource, RouteAuthorization};
use nivaran_core::Role;

/// Surfaces the principal stored in the GraphQL execution context.
///
/// One of the two transport adapters behind [`PrincipalSource`]; the other
/// wraps HTTP request extensions in `routes`.
pub struct GraphqlPrincipalSource<'a, 'ctx>(pub &'a Context<'ctx>);

impl PrincipalSource for GraphqlPrincipalSource<'_, '_> {
    fn principal(&self) -> Option<Principal> {
        self.0.data_opt::<Principal>().copied()
    }
}

/// Field guard evaluating a resolver's declared allowed roles.
///
/// Attached statically at resolver registration via `#[graphql(guard)]`, so
/// the association between an operation and its allowed-role set is explicit
/// and checkable in the schema definition.
pub struct RequireRole {
    authorization: RouteAuthorization,
}

impl RequireRole {
    /// Restrict a resolver to the given roles.
    pub fn any_of(allowed: &[Role]) -> Self {
        Self {
            authorization: RouteAuthorization::roles(allowed),
        }
    }
}

impl Guard for RequireRole {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        let principal = GraphqlPrincipalSource(ctx).principal();
        if self.authorization.permits(principal.map(|p| p.role)) {
            return Ok(());
        }

        let (message, code) = if principal.is_none() {
            ("Authentication required", ErrorCode::Unauthenticated)
        } else {
            (
                "You do not have permission to perform this action",
                ErrorCode::Forbidden,
            )
        };
        Err(Error::new(message).extend_with(|_, e| e.set("code", code.as_str())))
    }
}
