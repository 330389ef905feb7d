use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::connection_config::{ConfigExport, ConnectionDescriptor};

/// The single user-facing rejection message. Malformed JSON and an
/// incomplete BTC gRPC entry are deliberately indistinguishable to the user.
pub const MALFORMED_CONFIG: &str = "malformed configuration";

/// Verdict on a pasted connection string. Success is an explicit variant so
/// "validated and passing" can never be confused with "not yet validated".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(msg) => Some(msg),
        }
    }
}

/// Decides whether `text` encodes a usable BTC gRPC connection
/// configuration. Pure and synchronous; the descriptor itself is discarded,
/// only the verdict is reported.
pub fn validate(text: &str) -> ValidationResult {
    match extract_descriptor(text) {
        Ok(_) => ValidationResult::Valid,
        Err(e) => {
            log::debug!("connection string rejected: {e:#}");
            ValidationResult::Invalid(MALFORMED_CONFIG.to_string())
        }
    }
}

/// ```JSON
/// {
///     "configurations": [
///         { "type": "grpc", "cryptoCode": "BTC",
///           "host": "mynode.example", "port": 23000, "macaroon": "0201..." }
///     ]
/// }
/// ```
///
/// Scans `configurations` (absent means empty, never an error) for the first
/// entry with `type == "grpc"` and `cryptoCode == "BTC"`, then requires
/// `host`, `port` and `macaroon` to all be present and non-empty. Entries
/// for other assets or transports are skipped, not rejected.
pub fn extract_descriptor(text: &str) -> Result<ConnectionDescriptor> {
    let export: ConfigExport = serde_json::from_str(text)
        .with_context(|| "Invalid JSON: expected an object with a `configurations` array")?;

    let entry = export
        .configurations
        .iter()
        .find(|e| e.is_btc_grpc())
        .cloned()
        .unwrap_or_default();

    Ok(ConnectionDescriptor {
        host: required_field(&entry.host, "host")?,
        port: required_field(&entry.port, "port")?,
        macaroon: required_field(&entry.macaroon, "macaroon")?,
    })
}

/// Renders a field value, rejecting anything absent or empty. Ports show up
/// as numbers in some exports, so numbers render as their decimal form; zero
/// counts as empty.
fn required_field(value: &Value, name: &str) -> Result<String> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Ok(n.to_string()),
        Value::Bool(true) => Ok("true".to_string()),
        _ => bail!("Missing or empty `{}` in BTC gRPC entry", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_input() {
        assert_eq!(
            validate(""),
            ValidationResult::Invalid(MALFORMED_CONFIG.to_string())
        );
    }

    #[test]
    fn rejects_non_json() {
        assert!(!validate("not json").is_valid());
    }

    #[test]
    fn rejects_empty_configurations() {
        assert!(!validate(r#"{"configurations":[]}"#).is_valid());
    }

    #[test]
    fn rejects_missing_configurations_key() {
        // Absent list defaults to empty, which fails the entry check but is
        // not itself a parse error.
        assert!(!validate(r#"{"other":"stuff"}"#).is_valid());
    }

    #[test]
    fn accepts_complete_btc_grpc_entry() {
        let text = r#"{"configurations":[{"type":"grpc","cryptoCode":"BTC","host":"h","port":"1","macaroon":"m"}]}"#;
        assert_eq!(validate(text), ValidationResult::Valid);
    }

    #[test]
    fn skips_non_matching_entries() {
        let text = r#"{"configurations":[
            {"type":"grpc","cryptoCode":"LTC","host":"h","port":"1","macaroon":"m"},
            {"type":"grpc","cryptoCode":"BTC","host":"h2","port":"2","macaroon":"m2"}
        ]}"#;
        assert!(validate(text).is_valid());
        let descriptor = extract_descriptor(text).unwrap();
        assert_eq!(descriptor.host, "h2");
        assert_eq!(descriptor.port, "2");
        assert_eq!(descriptor.macaroon, "m2");
    }

    #[test]
    fn rejects_empty_host() {
        let text = r#"{"configurations":[{"type":"grpc","cryptoCode":"BTC","host":"","port":"1","macaroon":"m"}]}"#;
        assert!(!validate(text).is_valid());
    }

    #[test]
    fn rejects_null_host() {
        let text = r#"{"configurations":[{"type":"grpc","cryptoCode":"BTC","host":null,"port":"1","macaroon":"m"}]}"#;
        assert!(!validate(text).is_valid());
    }

    #[test]
    fn accepts_numeric_port() {
        let text = r#"{"configurations":[{"type":"grpc","cryptoCode":"BTC","host":"mynode","port":23000,"macaroon":"0201"}]}"#;
        assert!(validate(text).is_valid());
        assert_eq!(extract_descriptor(text).unwrap().port, "23000");
    }

    #[test]
    fn rejects_zero_port() {
        let text = r#"{"configurations":[{"type":"grpc","cryptoCode":"BTC","host":"mynode","port":0,"macaroon":"0201"}]}"#;
        assert!(!validate(text).is_valid());
    }

    #[test]
    fn rejects_rest_only_export() {
        let text = r#"{"configurations":[{"type":"rest","cryptoCode":"BTC","host":"h","port":"1","macaroon":"m"}]}"#;
        assert!(!validate(text).is_valid());
    }

    #[test]
    fn all_failures_share_one_message() {
        for text in ["", "[]", r#"{"configurations":[{}]}"#] {
            assert_eq!(validate(text).message(), Some(MALFORMED_CONFIG));
        }
    }
}
