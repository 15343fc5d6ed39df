//! CSRF protection for cookie-authenticated requests.
//!
//! Relies on browsers refusing to attach custom headers to simple
//! cross-origin form submissions; combined with `SameSite=Lax` cookies
//! upstream as defence in depth. This is not a cryptographic token scheme.
//!
//! Bearer-token clients are exempt: tokens are not sent automatically
//! cross-origin, so CSRF does not apply to them.

/// Custom header that must accompany cookie-authenticated requests.
pub const CSRF_HEADER: &str = "x-requested-with";

/// Rejection raised when the CSRF requirement is not met.
#[derive(Debug, thiserror::Error)]
pub enum CsrfError {
    /// The request carried neither bearer credentials nor the custom header.
    #[error("missing x-requested-with header on a cookie-authenticated request")]
    MissingHeader,
}

/// Check a request's `Authorization` and `x-requested-with` headers.
///
/// Requests with a bearer-style `Authorization` header are allowed
/// unconditionally. All other requests must carry the custom header.
///
/// # Errors
///
/// Returns [`CsrfError::MissingHeader`] when the custom header is required
/// and absent; the transport reports it as Forbidden.
pub fn check(authorization: Option<&str>, requested_with: Option<&str>) -> Result<(), CsrfError> {
    if authorization.is_some_and(|value| value.starts_with("Bearer ")) {
        return Ok(());
    }
    if requested_with.is_some() {
        return Ok(());
    }
    Err(CsrfError::MissingHeader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_requests_are_exempt() {
        assert!(check(Some("Bearer abc.def.ghi"), None).is_ok());
        assert!(check(Some("Bearer abc.def.ghi"), Some("XMLHttpRequest")).is_ok());
    }

    #[test]
    fn cookie_requests_need_the_custom_header() {
        assert!(check(None, Some("XMLHttpRequest")).is_ok());

        let err = check(None, None).expect_err("should require the header");
        assert!(matches!(err, CsrfError::MissingHeader));
        assert!(err.to_string().contains("x-requested-with"));
    }

    #[test]
    fn non_bearer_authorization_is_not_exempt() {
        let err = check(Some("Basic dXNlcjpwYXNz"), None).expect_err("basic auth is not exempt");
        assert!(matches!(err, CsrfError::MissingHeader));

        // The prefix check is exact; a bare scheme name is not a bearer token.
        assert!(check(Some("Bearer"), None).is_err());
    }
}
