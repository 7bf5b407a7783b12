//! Credential wrapper
//!
//! Client secrets, bot tokens and user tokens travel through configuration,
//! logs and error values. `Secret` keeps the raw value out of `Debug` and
//! `Display` output and wipes it from memory on drop. Reading the value
//! requires an explicit [`Secret::expose`] call.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

const REDACTED: &str = "[REDACTED]";

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw value
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Holder {
        client_secret: Secret,
    }

    #[test]
    fn test_debug_and_display_are_redacted() {
        let secret = Secret::new("81772d83ee75a5835d2b");
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(secret.to_string(), "[REDACTED]");

        let holder = Holder {
            client_secret: secret,
        };
        let debug = format!("{holder:?}");
        assert!(!debug.contains("81772d83"));
    }

    #[test]
    fn test_expose_returns_raw_value() {
        let secret = Secret::from("token-value");
        assert_eq!(secret.expose(), "token-value");
    }

    #[test]
    fn test_serde_is_transparent() {
        let holder: Holder = serde_json::from_str(r#"{"client_secret":"abc"}"#).unwrap();
        assert_eq!(holder.client_secret.expose(), "abc");

        let toml = toml::to_string(&holder).unwrap();
        assert!(toml.contains("client_secret = \"abc\""));
    }

    #[test]
    fn test_blank_secret_is_empty() {
        assert!(Secret::default().is_empty());
        assert!(Secret::new("   ").is_empty());
        assert!(!Secret::new("x").is_empty());
    }
}
