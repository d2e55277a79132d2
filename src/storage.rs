use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::crypto::Crypto;
use crate::error::KeyclipError;
use crate::types::Database;

/// On-disk envelope of an encrypted database
#[derive(Debug, Serialize, Deserialize)]
pub struct EncryptedDatabase {
    pub keyclip_encrypted: bool,
    pub salt: String,
    pub nonce: String,
    pub ciphertext: String,
}

pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the database, asking `password` for a passphrase only when the
    /// file is encrypted
    pub fn load<F>(&self, password: F) -> Result<Database, KeyclipError>
    where
        F: FnOnce() -> Result<String, KeyclipError>,
    {
        if !self.path.exists() {
            return Err(KeyclipError::Database(format!(
                "Failed to open database file {}",
                self.path.display()
            )));
        }

        let raw = fs::read_to_string(&self.path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;

        if !value["keyclip_encrypted"].as_bool().unwrap_or(false) {
            return Ok(serde_json::from_value(value)?);
        }

        let envelope: EncryptedDatabase = serde_json::from_value(value)?;
        let ciphertext = decode_field(&envelope.ciphertext, "ciphertext")?;
        let nonce = decode_field(&envelope.nonce, "nonce")?;
        let salt = decode_field(&envelope.salt, "salt")?;

        let passphrase = password()?;
        let plaintext = Crypto::decrypt_with_password(&ciphertext, &nonce, &salt, &passphrase)?;
        Ok(serde_json::from_slice(&plaintext)?)
    }
}

fn decode_field(encoded: &str, field: &str) -> Result<Vec<u8>, KeyclipError> {
    BASE64
        .decode(encoded)
        .map_err(|e| KeyclipError::Database(format!("Invalid {}: {}", field, e)))
}
