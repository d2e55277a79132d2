use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::KeyclipError;
use crate::totp;

/// Reserved attribute name selecting the one-time code
pub const TOTP_ATTRIBUTE: &str = "totp";

/// Attribute holding an `otpauth://` URI
pub const OTP_URI_ATTRIBUTE: &str = "otp";

pub const TITLE_ATTRIBUTE: &str = "title";

/// Decrypted credential database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
    pub root: Group,
}

/// A node of the entry tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// A named credential record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totp: Option<TotpSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub protected: bool,
}

impl Attribute {
    #[cfg(test)]
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            protected: false,
        }
    }
}

/// One-time code settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TotpSettings {
    /// Base32 encoded shared secret
    pub secret: String,
    #[serde(default = "default_digits")]
    pub digits: u8,
    #[serde(default = "default_period")]
    pub period: u16,
    #[serde(default)]
    pub algorithm: TotpAlgorithm,
}

fn default_digits() -> u8 {
    6
}

fn default_period() -> u16 {
    30
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TotpAlgorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl Group {
    /// Find an entry by its `/`-separated path, e.g. `Email/Work`.
    ///
    /// The root group's own name is not part of the path and a leading `/`
    /// is ignored. Segments match exactly, case-sensitively.
    pub fn find_entry_by_path(&self, path: &str) -> Option<&Entry> {
        let path = path.strip_prefix('/').unwrap_or(path);
        if path.is_empty() {
            return None;
        }
        self.find_entry_recursive(path)
    }

    fn find_entry_recursive(&self, path: &str) -> Option<&Entry> {
        if let Some(entry) = self.entries.iter().find(|e| e.title == path) {
            return Some(entry);
        }

        self.groups.iter().find_map(|group| {
            path.strip_prefix(group.name.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .and_then(|rest| group.find_entry_recursive(rest))
        })
    }

    /// Find a descendant group by path; an empty path or `/` is this group.
    pub fn find_group_by_path(&self, path: &str) -> Option<&Group> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Some(self);
        }

        let mut current = self;
        for segment in path.split('/') {
            current = current.groups.iter().find(|g| g.name == segment)?;
        }
        Some(current)
    }

    /// Paths of every entry below this group, groups first then entries.
    pub fn entry_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_paths("", &mut paths);
        paths
    }

    fn collect_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        for group in &self.groups {
            group.collect_paths(&format!("{}{}/", prefix, group.name), paths);
        }
        for entry in &self.entries {
            paths.push(format!("{}{}", prefix, entry.title));
        }
    }
}

impl Entry {
    #[cfg(test)]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            attributes: Vec::new(),
            totp: None,
        }
    }

    #[cfg(test)]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Attribute names in stored order, with `title` appended when the
    /// record does not carry it explicitly.
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.attributes.iter().map(|a| a.name.as_str()).collect();
        if !names.contains(&TITLE_ATTRIBUTE) {
            names.push(TITLE_ATTRIBUTE);
        }
        names
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
            .or_else(|| (name == TITLE_ATTRIBUTE).then_some(self.title.as_str()))
    }

    pub fn is_protected(&self, name: &str) -> bool {
        self.attributes
            .iter()
            .any(|a| a.name == name && a.protected)
    }

    pub fn has_totp(&self) -> bool {
        self.totp.is_some() || self.otp_uri().is_some()
    }

    /// Current one-time code.
    pub fn totp(&self) -> Result<String, KeyclipError> {
        let settings = match (&self.totp, self.otp_uri()) {
            (Some(settings), _) => settings.clone(),
            (None, Some(uri)) => totp::parse_otpauth_uri(uri)?,
            (None, None) => return Err(KeyclipError::NoTotpConfigured(self.title.clone())),
        };
        totp::generate_totp_now(&settings)
    }

    fn otp_uri(&self) -> Option<&str> {
        self.attribute(OTP_URI_ATTRIBUTE)
            .filter(|value| value.starts_with("otpauth://"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_root() -> Group {
        Group {
            name: "Root".to_string(),
            entries: vec![Entry::new("Bank").with_attribute("password", "b4nk")],
            groups: vec![
                Group {
                    name: "Email".to_string(),
                    entries: vec![
                        Entry::new("Work")
                            .with_attribute("password", "p@ss")
                            .with_attribute("username", "bob"),
                    ],
                    groups: vec![Group {
                        name: "Old".to_string(),
                        entries: vec![Entry::new("Work")],
                        groups: vec![],
                    }],
                },
                Group {
                    name: "Email Archive".to_string(),
                    entries: vec![Entry::new("Work")],
                    groups: vec![],
                },
            ],
        }
    }

    #[test]
    fn finds_entry_by_nested_path() {
        let root = sample_root();
        let entry = root.find_entry_by_path("Email/Work").unwrap();
        assert_eq!(entry.attribute("username"), Some("bob"));
        assert!(root.find_entry_by_path("/Email/Work").is_some());
        assert!(root.find_entry_by_path("Email/Old/Work").is_some());
        assert!(root.find_entry_by_path("Bank").is_some());
    }

    #[test]
    fn path_lookup_is_exact_and_case_sensitive() {
        let root = sample_root();
        assert!(root.find_entry_by_path("email/work").is_none());
        assert!(root.find_entry_by_path("Email/Wor").is_none());
        assert!(root.find_entry_by_path("Work").is_none());
        assert!(root.find_entry_by_path("").is_none());
        assert!(root.find_entry_by_path("Root/Bank").is_none());
    }

    #[test]
    fn group_name_prefix_does_not_match_sibling_group() {
        let root = sample_root();
        let archived = root.find_entry_by_path("Email Archive/Work").unwrap();
        assert!(archived.attributes.is_empty());
    }

    #[test]
    fn title_is_exposed_as_attribute() {
        let entry = Entry::new("Work").with_attribute("password", "x");
        assert_eq!(entry.attribute_names(), vec!["password", "title"]);
        assert_eq!(entry.attribute("title"), Some("Work"));
    }

    #[test]
    fn lists_entry_paths() {
        let root = sample_root();
        assert_eq!(
            root.entry_paths(),
            vec!["Email/Old/Work", "Email/Work", "Email Archive/Work", "Bank"]
        );
        assert!(root.find_group_by_path("Email/Old").is_some());
        assert!(root.find_group_by_path("/").is_some());
        assert!(root.find_group_by_path("Nope").is_none());
    }

    #[test]
    fn otp_attribute_enables_totp() {
        let entry = Entry::new("Site")
            .with_attribute("otp", "otpauth://totp/Site?secret=JBSWY3DPEHPK3PXP");
        assert!(entry.has_totp());
        assert_eq!(entry.totp().unwrap().len(), 6);

        let plain = Entry::new("Site").with_attribute("otp", "not a uri");
        assert!(!plain.has_totp());
        assert!(matches!(
            plain.totp(),
            Err(KeyclipError::NoTotpConfigured(_))
        ));
    }

    #[test]
    fn parses_database_json() {
        let json = r#"{
            "name": "Personal",
            "root": {
                "name": "Root",
                "groups": [{
                    "name": "Email",
                    "entries": [{
                        "title": "Work",
                        "attributes": [
                            {"name": "password", "value": "p@ss", "protected": true},
                            {"name": "username", "value": "bob"}
                        ],
                        "totp": {"secret": "JBSWY3DPEHPK3PXP"}
                    }]
                }]
            }
        }"#;
        let db: Database = serde_json::from_str(json).unwrap();
        let entry = db.root.find_entry_by_path("Email/Work").unwrap();
        assert!(entry.is_protected("password"));
        assert!(!entry.is_protected("username"));
        let totp = entry.totp.as_ref().unwrap();
        assert_eq!(totp.digits, 6);
        assert_eq!(totp.period, 30);
        assert_eq!(totp.algorithm, TotpAlgorithm::Sha1);
    }
}
