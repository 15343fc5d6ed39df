//! GraphQL wire-error formatting.
//!
//! In development every error passes through verbatim, stack traces
//! included. In production only client-safe, user-actionable codes keep
//! their original message; anything else is redacted to a generic message
//! so datastore or resolver internals never leave the process. Locations
//! and path describe query structure, not secrets, and are preserved in
//! both environments.

use std::collections::BTreeMap;

use nivaran_core::Environment;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message substituted for redacted errors in production.
pub const GENERIC_MESSAGE: &str = "Internal server error";

/// Error classifications surfaced to clients in `extensions.code`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadUserInput,
    Unauthenticated,
    Forbidden,
    GraphqlValidationFailed,
    InternalServerError,
}

impl ErrorCode {
    /// Wire spelling of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadUserInput => "BAD_USER_INPUT",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::GraphqlValidationFailed => "GRAPHQL_VALIDATION_FAILED",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Whether this code's message is safe to show end users verbatim in
    /// production. These are expected, user-actionable errors; everything
    /// else may carry implementation detail.
    pub fn is_client_safe(&self) -> bool {
        matches!(
            self,
            ErrorCode::BadUserInput
                | ErrorCode::Unauthenticated
                | ErrorCode::Forbidden
                | ErrorCode::GraphqlValidationFailed
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Position of an error within the query document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// A GraphQL error as it appears on the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattedError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ErrorLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, Value>,
}

impl FormattedError {
    /// The error's classification, if its extensions carry a known code.
    pub fn code(&self) -> Option<ErrorCode> {
        self.extensions
            .get("code")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// Format an error for the response boundary.
///
/// Non-production environments pass everything through unchanged, full
/// diagnostic fidelity included. Production keeps the original message only
/// for client-safe codes, reduces `extensions` to `{code}` (stripping stack
/// traces and other diagnostic fields) and preserves `locations`/`path`.
pub fn format_error(error: FormattedError, environment: Environment) -> FormattedError {
    if !environment.is_production() {
        return error;
    }

    let code = match error.code() {
        Some(code) => code,
        // The executor leaves parse/validation errors untagged; an error
        // that never reached a resolver has no response path.
        None if error.path.is_empty() => ErrorCode::GraphqlValidationFailed,
        None => ErrorCode::InternalServerError,
    };

    let message = if code.is_client_safe() {
        error.message
    } else {
        GENERIC_MESSAGE.to_string()
    };

    let mut extensions = BTreeMap::new();
    extensions.insert(
        "code".to_string(),
        Value::String(code.as_str().to_string()),
    );

    FormattedError {
        message,
        locations: error.locations,
        path: error.path,
        extensions,
    }
}

/// Format one entry of a serialized `errors` array.
///
/// Entries that do not deserialize as a wire error are passed through in
/// development and replaced wholesale with a generic internal error in
/// production.
pub fn format_error_value(value: Value, environment: Environment) -> Value {
    let parsed: FormattedError = match serde_json::from_value(value.clone()) {
        Ok(parsed) => parsed,
        Err(_) if environment.is_production() => FormattedError {
            message: GENERIC_MESSAGE.to_string(),
            ..Default::default()
        },
        Err(_) => return value,
    };

    let formatted = format_error(parsed, environment);
    serde_json::to_value(&formatted).unwrap_or_else(|_| {
        Value::String(GENERIC_MESSAGE.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn error_with_code(message: &str, code: &str) -> FormattedError {
        FormattedError {
            message: message.to_string(),
            locations: vec![ErrorLocation { line: 2, column: 5 }],
            path: vec![json!("patient"), json!(0)],
            extensions: BTreeMap::from([
                ("code".to_string(), json!(code)),
                ("stacktrace".to_string(), json!(["at resolver", "at exec"])),
            ]),
        }
    }

    #[test]
    fn production_redacts_internal_errors() {
        let input = error_with_code("db: connection refused to 10.0.0.1", "INTERNAL_SERVER_ERROR");
        let output = format_error(input, Environment::Production);

        assert_eq!(output.message, "Internal server error");
        assert_eq!(output.extensions.get("code"), Some(&json!("INTERNAL_SERVER_ERROR")));
        assert!(!output.extensions.contains_key("stacktrace"));
    }

    #[test]
    fn production_passes_client_safe_messages_verbatim() {
        let input = error_with_code("Phone number must be 10 digits", "BAD_USER_INPUT");
        let output = format_error(input, Environment::Production);

        assert_eq!(output.message, "Phone number must be 10 digits");
        assert_eq!(output.extensions.get("code"), Some(&json!("BAD_USER_INPUT")));
        assert_eq!(output.extensions.len(), 1);
    }

    #[test]
    fn production_preserves_locations_and_path() {
        let input = error_with_code("boom", "INTERNAL_SERVER_ERROR");
        let output = format_error(input.clone(), Environment::Production);

        assert_eq!(output.locations, input.locations);
        assert_eq!(output.path, input.path);
    }

    #[test]
    fn development_passes_everything_through_verbatim() {
        let input = error_with_code("db: connection refused", "INTERNAL_SERVER_ERROR");
        let output = format_error(input.clone(), Environment::Development);

        assert_eq!(output, input);
        assert!(output.extensions.contains_key("stacktrace"));
    }

    #[test]
    fn untagged_resolver_errors_are_redacted_in_production() {
        let input = FormattedError {
            message: "row not found in pharmacy_orders".to_string(),
            path: vec![json!("order")],
            ..Default::default()
        };
        let output = format_error(input, Environment::Production);

        assert_eq!(output.message, "Internal server error");
        assert_eq!(output.extensions.get("code"), Some(&json!("INTERNAL_SERVER_ERROR")));
    }

    #[test]
    fn untagged_pre_execution_errors_keep_their_message() {
        // No path: the query never reached a resolver, so the message
        // describes query shape, not internals.
        let input = FormattedError {
            message: "Unknown field \"labOrderz\" on type \"Query\"".to_string(),
            locations: vec![ErrorLocation { line: 1, column: 3 }],
            ..Default::default()
        };
        let output = format_error(input.clone(), Environment::Production);

        assert_eq!(output.message, input.message);
        assert_eq!(
            output.extensions.get("code"),
            Some(&json!("GRAPHQL_VALIDATION_FAILED"))
        );
    }

    #[test]
    fn client_safe_allow_list_matches_the_contract() {
        assert!(ErrorCode::BadUserInput.is_client_safe());
        assert!(ErrorCode::Unauthenticated.is_client_safe());
        assert!(ErrorCode::Forbidden.is_client_safe());
        assert!(ErrorCode::GraphqlValidationFailed.is_client_safe());
        assert!(!ErrorCode::InternalServerError.is_client_safe());
    }

    #[test]
    fn value_level_formatting_round_trips_the_wire_shape() {
        let entry = json!({
            "message": "secret leak",
            "path": ["me"],
            "extensions": {"code": "INTERNAL_SERVER_ERROR", "stacktrace": ["frame"]}
        });
        let formatted = format_error_value(entry, Environment::Production);

        assert_eq!(formatted["message"], json!("Internal server error"));
        assert_eq!(formatted["extensions"], json!({"code": "INTERNAL_SERVER_ERROR"}));
        assert_eq!(formatted["path"], json!(["me"]));
    }

    #[test]
    fn value_level_formatting_is_a_no_op_in_development() {
        let entry = json!({
            "message": "anything at all",
            "extensions": {"code": "INTERNAL_SERVER_ERROR", "stacktrace": ["frame"]}
        });
        let formatted = format_error_value(entry.clone(), Environment::Development);
        assert_eq!(formatted, entry);
    }
}
