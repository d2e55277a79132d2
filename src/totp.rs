use chrono::Utc;
use data_encoding::{BASE32, BASE32_NOPAD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use url::Url;

use crate::error::KeyclipError;
use crate::types::{TotpAlgorithm, TotpSettings};

pub fn decode_secret(secret: &str) -> Result<Vec<u8>, KeyclipError> {
    let normalized: String = secret
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let decoded = BASE32
        .decode(normalized.as_bytes())
        .or_else(|_| BASE32_NOPAD.decode(normalized.as_bytes()))
        .map_err(|_| KeyclipError::Totp("secret is not valid base32".to_string()))?;
    if decoded.is_empty() {
        return Err(KeyclipError::Totp("secret is empty".to_string()));
    }

    Ok(decoded)
}

/// Parse an `otpauth://totp/...` URI into settings
pub fn parse_otpauth_uri(uri: &str) -> Result<TotpSettings, KeyclipError> {
    let parsed = Url::parse(uri).map_err(|e| KeyclipError::Totp(e.to_string()))?;
    if parsed.scheme() != "otpauth" || parsed.host_str() != Some("totp") {
        return Err(KeyclipError::Totp(format!("unsupported URI {}", uri)));
    }

    let mut settings = TotpSettings {
        secret: String::new(),
        digits: 6,
        period: 30,
        algorithm: TotpAlgorithm::Sha1,
    };

    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            "secret" => settings.secret = value.into_owned(),
            "digits" => {
                settings.digits = value
                    .parse()
                    .map_err(|_| KeyclipError::Totp("digits must be an integer".to_string()))?;
            }
            "period" => {
                settings.period = value
                    .parse()
                    .map_err(|_| KeyclipError::Totp("period must be an integer".to_string()))?;
            }
            "algorithm" => settings.algorithm = parse_algorithm(&value)?,
            _ => {}
        }
    }

    if settings.secret.is_empty() {
        return Err(KeyclipError::Totp("missing secret".to_string()));
    }
    Ok(settings)
}

/// RFC 6238 code for the given Unix time
pub fn generate_totp(settings: &TotpSettings, unix_seconds: u64) -> Result<String, KeyclipError> {
    if settings.digits != 6 && settings.digits != 8 {
        return Err(KeyclipError::Totp(format!(
            "unsupported digit count {}",
            settings.digits
        )));
    }
    if settings.period == 0 {
        return Err(KeyclipError::Totp("period must be positive".to_string()));
    }

    let key = decode_secret(&settings.secret)?;
    let counter = (unix_seconds / u64::from(settings.period)).to_be_bytes();
    let digest = match settings.algorithm {
        TotpAlgorithm::Sha1 => hmac_digest::<Hmac<Sha1>>(&key, &counter)?,
        TotpAlgorithm::Sha256 => hmac_digest::<Hmac<Sha256>>(&key, &counter)?,
        TotpAlgorithm::Sha512 => hmac_digest::<Hmac<Sha512>>(&key, &counter)?,
    };

    let code = dynamic_truncate(&digest) % 10_u32.pow(u32::from(settings.digits));
    Ok(format!("{:0width$}", code, width = usize::from(settings.digits)))
}

pub fn generate_totp_now(settings: &TotpSettings) -> Result<String, KeyclipError> {
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    generate_totp(settings, now)
}

fn parse_algorithm(value: &str) -> Result<TotpAlgorithm, KeyclipError> {
    match value.to_ascii_uppercase().as_str() {
        "SHA1" => Ok(TotpAlgorithm::Sha1),
        "SHA256" => Ok(TotpAlgorithm::Sha256),
        "SHA512" => Ok(TotpAlgorithm::Sha512),
        _ => Err(KeyclipError::Totp(format!("unsupported algorithm {}", value))),
    }
}

fn hmac_digest<M: Mac + hmac::digest::KeyInit>(
    key: &[u8],
    message: &[u8],
) -> Result<Vec<u8>, KeyclipError> {
    let mut mac = <M as hmac::digest::KeyInit>::new_from_slice(key)
        .map_err(|_| KeyclipError::Totp("invalid key length".to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn dynamic_truncate(digest: &[u8]) -> u32 {
    // HMAC output is at least 20 bytes, so offset + 4 is always in range
    let offset = usize::from(digest[digest.len() - 1] & 0x0f);
    u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ])
}
