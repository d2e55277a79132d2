use thiserror::Error;

pub const EXIT_FAILURE: i32 = 1;

#[derive(Error, Debug)]
pub enum KeyclipError {
    #[error("Invalid timeout value {0}.")]
    InvalidTimeout(String),

    #[error("Entry {0} not found.")]
    EntryNotFound(String),

    #[error("Cannot find group {0}.")]
    GroupNotFound(String),

    #[error("ERROR: Please specify one of --attribute or --totp, not both.")]
    ConflictingSelectors,

    #[error("Entry with path {0} has no TOTP set up.")]
    NoTotpConfigured(String),

    #[error("ERROR: attribute {} is ambiguous, it matches {}.", .requested, separated_list(.candidates))]
    AmbiguousAttribute {
        requested: String,
        candidates: Vec<String>,
    },

    #[error("Attribute \"{0}\" not found.")]
    AttributeNotFound(String),

    #[error("Clipboard error: {0}")]
    ClipboardUnavailable(String),

    #[error("Invalid TOTP settings: {0}")]
    Totp(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Decryption failed")]
    Decryption,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl KeyclipError {
    /// Every failure ends the process with the same status.
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }

    /// "Attribute not found" is reported on the normal channel so that
    /// `--quiet` silences it.
    pub fn goes_to_output(&self) -> bool {
        matches!(self, KeyclipError::AttributeNotFound(_))
    }
}

/// Joins names as "a, b and c".
pub fn separated_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ambiguous_message_lists_every_candidate() {
        let err = KeyclipError::AmbiguousAttribute {
            requested: "pass".to_string(),
            candidates: vec![
                "passcode".to_string(),
                "passphrase".to_string(),
                "password".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "ERROR: attribute pass is ambiguous, it matches passcode, passphrase and password."
        );
    }

    #[test]
    fn separated_list_handles_short_lists() {
        assert_eq!(separated_list(&[]), "");
        assert_eq!(separated_list(&["a".to_string()]), "a");
        assert_eq!(separated_list(&["a".to_string(), "b".to_string()]), "a and b");
    }

    #[test]
    fn only_attribute_not_found_uses_output_channel() {
        assert!(KeyclipError::AttributeNotFound("x".to_string()).goes_to_output());
        assert!(!KeyclipError::EntryNotFound("x".to_string()).goes_to_output());
        assert!(!KeyclipError::ConflictingSelectors.goes_to_output());
        assert_eq!(KeyclipError::Decryption.exit_code(), EXIT_FAILURE);
    }
}
