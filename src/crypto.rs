use argon2::Argon2;
use chacha20poly1305::{
    ChaCha20Poly1305, Key, Nonce,
    aead::{Aead, KeyInit},
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::KeyclipError;

const KEY_SIZE: usize = 32;
const NONCE_SIZE: usize = 12;

/// Database key (zeroized on drop)
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    key: Vec<u8>,
}

pub struct Crypto;

impl Crypto {
    /// Derive key from password using Argon2id
    pub fn derive_key(password: &str, salt: &[u8]) -> Result<MasterKey, KeyclipError> {
        let mut key = vec![0u8; KEY_SIZE];
        Argon2::default()
            .hash_password_into(password.as_bytes(), salt, &mut key)
            .map_err(|e| KeyclipError::Database(format!("Key derivation failed: {}", e)))?;

        Ok(MasterKey { key })
    }

    /// Decrypt data sealed with ChaCha20-Poly1305
    pub fn decrypt(ciphertext: &[u8], nonce: &[u8], key: &MasterKey) -> Result<Vec<u8>, KeyclipError> {
        if nonce.len() != NONCE_SIZE {
            return Err(KeyclipError::Decryption);
        }
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&key.key));
        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| KeyclipError::Decryption)
    }

    /// Decrypt with password directly
    pub fn decrypt_with_password(
        ciphertext: &[u8],
        nonce: &[u8],
        salt: &[u8],
        password: &str,
    ) -> Result<Vec<u8>, KeyclipError> {
        let key = Self::derive_key(password, salt)?;
        Self::decrypt(ciphertext, nonce, &key)
    }
}
