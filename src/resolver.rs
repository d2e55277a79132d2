//! Selecting one attribute of an entry by (partial) name.

use zeroize::Zeroizing;

use crate::error::KeyclipError;
use crate::types::{Entry, TOTP_ATTRIBUTE};

pub const DEFAULT_ATTRIBUTE: &str = "password";

/// Outcome of matching a requested name against an entry's attributes
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedAttribute {
    Found {
        name: String,
        value: Zeroizing<String>,
    },
    Ambiguous(Vec<String>),
    NotFound,
}

/// Which attribute the caller asked for
#[derive(Debug, Clone, Default)]
pub struct Selector {
    /// `--attribute`, `None` when not given on the command line
    pub attribute: Option<String>,
    /// `--totp`
    pub totp: bool,
}

impl Selector {
    pub fn requested_name(&self) -> &str {
        self.attribute.as_deref().unwrap_or(DEFAULT_ATTRIBUTE)
    }

    pub fn wants_totp(&self) -> bool {
        self.totp || self.requested_name() == TOTP_ATTRIBUTE
    }

    /// Both selection modes explicitly requested
    pub fn is_conflicting(&self) -> bool {
        self.totp && self.attribute.is_some()
    }
}

/// Names of the entry's attributes matching `requested`.
///
/// An exact, case-sensitive hit wins outright. Otherwise names equal to
/// `requested` ignoring case are taken, and failing that, names starting
/// with it ignoring case. Candidates come back in attribute order.
pub fn find_attributes(entry: &Entry, requested: &str) -> Vec<String> {
    let names = entry.attribute_names();
    if names.contains(&requested) {
        return vec![requested.to_string()];
    }

    let wanted = requested.to_lowercase();
    let equal: Vec<String> = names
        .iter()
        .filter(|name| name.to_lowercase() == wanted)
        .map(|name| name.to_string())
        .collect();
    if !equal.is_empty() {
        return equal;
    }

    names
        .iter()
        .filter(|name| name.to_lowercase().starts_with(&wanted))
        .map(|name| name.to_string())
        .collect()
}

/// Match a plain attribute name.
pub fn resolve(entry: &Entry, requested: &str) -> ResolvedAttribute {
    let mut matches = find_attributes(entry, requested);
    match matches.len() {
        0 => ResolvedAttribute::NotFound,
        1 => {
            let name = matches.remove(0);
            let value = Zeroizing::new(entry.attribute(&name).unwrap_or_default().to_string());
            ResolvedAttribute::Found { name, value }
        }
        _ => {
            matches.sort();
            ResolvedAttribute::Ambiguous(matches)
        }
    }
}

/// Resolve the selector to a `(name, value)` pair, computing the
/// one-time code when asked for it.
pub fn select(
    entry: &Entry,
    path: &str,
    selector: &Selector,
) -> Result<(String, Zeroizing<String>), KeyclipError> {
    if selector.is_conflicting() {
        return Err(KeyclipError::ConflictingSelectors);
    }

    if selector.wants_totp() {
        if !entry.has_totp() {
            return Err(KeyclipError::NoTotpConfigured(path.to_string()));
        }
        return Ok((TOTP_ATTRIBUTE.to_string(), Zeroizing::new(entry.totp()?)));
    }

    let requested = selector.requested_name();
    match resolve(entry, requested) {
        ResolvedAttribute::Found { name, value } => Ok((name, value)),
        ResolvedAttribute::Ambiguous(candidates) => Err(KeyclipError::AmbiguousAttribute {
            requested: requested.to_string(),
            candidates,
        }),
        ResolvedAttribute::NotFound => Err(KeyclipError::AttributeNotFound(requested.to_string())),
    }
}
