//! Layered credential resolution for tool calls.
//!
//! Credentials reach a tool three ways: injected by the client under
//! [`CREDENTIALS_ARG`], supplied by a coordinating server under
//! [`SERVER_CREDENTIALS_ARG`], or spelled out as flat legacy arguments
//! ([`TOKEN_ARG`] plus the family's identifier field). Extraction strategies
//! are tried in that fixed order; the first one that yields both values
//! wins. A strategy that finds only one of the two values is skipped, not
//! an error; resolution fails only once every strategy is exhausted.
//!
//! Resolution is pure: it reads the call arguments and nothing else.

use rmcp::model::JsonObject;
use serde_json::Value;

use super::error::ToolError;

/// Reserved key for the client-injected credentials object.
pub const CREDENTIALS_ARG: &str = "__credentials__";

/// Reserved key for the server-supplied credentials object.
pub const SERVER_CREDENTIALS_ARG: &str = "server_credentials";

/// Reserved key for the legacy flat secret argument.
pub const TOKEN_ARG: &str = "__token__";

/// Field names of the credential pair used by one tool family.
///
/// `secret` and `identifier` name the sub-fields expected inside a
/// credentials object; `identifier` doubles as the flat legacy argument
/// name. Neither may collide with a tool's domain arguments.
#[derive(Debug, Clone, Copy)]
pub struct CredentialKeys {
    pub secret: &'static str,
    pub identifier: &'static str,
}

/// A fully-resolved credential pair.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredentials {
    pub secret: String,
    pub identifier: String,
}

/// The secret must never reach logs.
impl std::fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("secret", &"[REDACTED]")
            .field("identifier", &self.identifier)
            .finish()
    }
}

type Strategy = fn(&CredentialKeys, &JsonObject) -> Option<ResolvedCredentials>;

/// Extraction strategies in priority order; first fully-satisfied wins.
const STRATEGIES: &[Strategy] = &[injected, server_supplied, legacy_flat];

fn injected(keys: &CredentialKeys, args: &JsonObject) -> Option<ResolvedCredentials> {
    from_object(keys, args, CREDENTIALS_ARG)
}

fn server_supplied(keys: &CredentialKeys, args: &JsonObject) -> Option<ResolvedCredentials> {
    from_object(keys, args, SERVER_CREDENTIALS_ARG)
}

fn legacy_flat(keys: &CredentialKeys, args: &JsonObject) -> Option<ResolvedCredentials> {
    Some(ResolvedCredentials {
        secret: non_empty_str(args.get(TOKEN_ARG)?)?.to_string(),
        identifier: non_empty_str(args.get(keys.identifier)?)?.to_string(),
    })
}

fn from_object(
    keys: &CredentialKeys,
    args: &JsonObject,
    arg_name: &str,
) -> Option<ResolvedCredentials> {
    let object = args.get(arg_name)?.as_object()?;
    Some(ResolvedCredentials {
        secret: non_empty_str(object.get(keys.secret)?)?.to_string(),
        identifier: non_empty_str(object.get(keys.identifier)?)?.to_string(),
    })
}

/// Empty strings count as absent, like every other missing value.
fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

impl CredentialKeys {
    pub const fn new(secret: &'static str, identifier: &'static str) -> Self {
        Self { secret, identifier }
    }

    /// Resolve the credential pair from raw call arguments.
    ///
    /// On failure the error names the first missing value: the secret
    /// field first, then the identifier field.
    pub fn resolve(&self, args: &JsonObject) -> Result<ResolvedCredentials, ToolError> {
        for strategy in STRATEGIES {
            if let Some(creds) = strategy(self, args) {
                return Ok(creds);
            }
        }

        if args.get(TOKEN_ARG).and_then(non_empty_str).is_none() {
            return Err(ToolError::MissingCredential(self.secret));
        }
        Err(ToolError::MissingCredential(self.identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEYS: CredentialKeys = CredentialKeys::new("personal_api", "app_id");

    fn args(value: Value) -> JsonObject {
        value.as_object().expect("test arguments").clone()
    }

    #[test]
    fn test_all_three_forms_resolve_to_the_same_pair() {
        let expected = ResolvedCredentials {
            secret: "t1".to_string(),
            identifier: "a1".to_string(),
        };

        let injected = args(json!({
            "__credentials__": { "personal_api": "t1", "app_id": "a1" }
        }));
        let server = args(json!({
            "server_credentials": { "personal_api": "t1", "app_id": "a1" }
        }));
        let flat = args(json!({ "__token__": "t1", "app_id": "a1" }));

        assert_eq!(KEYS.resolve(&injected).unwrap(), expected);
        assert_eq!(KEYS.resolve(&server).unwrap(), expected);
        assert_eq!(KEYS.resolve(&flat).unwrap(), expected);
    }

    #[test]
    fn test_empty_arguments_name_the_secret_first() {
        let err = KEYS.resolve(&JsonObject::new()).unwrap_err();
        assert!(matches!(err, ToolError::MissingCredential("personal_api")));
    }

    #[test]
    fn test_flat_token_without_identifier_names_the_identifier() {
        let err = KEYS
            .resolve(&args(json!({ "__token__": "t1" })))
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingCredential("app_id")));
    }

    #[test]
    fn test_partial_object_falls_through_to_next_strategy() {
        // Injected object is missing app_id; the server-supplied object is
        // complete and must win instead of raising an error.
        let resolved = KEYS
            .resolve(&args(json!({
                "__credentials__": { "personal_api": "partial" },
                "server_credentials": { "personal_api": "t2", "app_id": "a2" }
            })))
            .unwrap();
        assert_eq!(resolved.secret, "t2");
        assert_eq!(resolved.identifier, "a2");
    }

    #[test]
    fn test_partial_object_alone_is_an_error_not_a_partial_result() {
        let err = KEYS
            .resolve(&args(json!({
                "__credentials__": { "app_id": "a1" }
            })))
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingCredential("personal_api")));
    }

    #[test]
    fn test_injected_wins_over_server_and_flat() {
        let resolved = KEYS
            .resolve(&args(json!({
                "__credentials__": { "personal_api": "inj", "app_id": "inj-app" },
                "server_credentials": { "personal_api": "srv", "app_id": "srv-app" },
                "__token__": "flat",
                "app_id": "flat-app"
            })))
            .unwrap();
        assert_eq!(resolved.secret, "inj");
        assert_eq!(resolved.identifier, "inj-app");
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let err = KEYS
            .resolve(&args(json!({ "__token__": "", "app_id": "a1" })))
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingCredential("personal_api")));
    }

    #[test]
    fn test_debug_redacts_the_secret() {
        let creds = ResolvedCredentials {
            secret: "super_secret_token".to_string(),
            identifier: "a1".to_string(),
        };
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super_secret_token"));
    }
}
