use crate::cli::CliDisplay;
use crate::error::KeyclipError;
use crate::output::Output;
use crate::resolver::{self, ResolvedAttribute};
use crate::types::{Database, TOTP_ATTRIBUTE};
use zeroize::Zeroizing;

const PROTECTED_PLACEHOLDER: &str = "PROTECTED";

pub fn execute(
    database: &Database,
    path: &str,
    attributes: &[String],
    totp: bool,
    show_protected: bool,
    output: &mut Output,
) -> Result<(), KeyclipError> {
    let entry = database
        .root
        .find_entry_by_path(path)
        .ok_or_else(|| KeyclipError::EntryNotFound(path.to_string()))?;

    if totp && !entry.has_totp() {
        return Err(KeyclipError::NoTotpConfigured(path.to_string()));
    }

    let requested: Vec<String> = if attributes.is_empty() && !totp {
        entry.attribute_names().into_iter().map(str::to_string).collect()
    } else {
        attributes.to_vec()
    };
    // A single explicitly requested value is printed bare
    let show_names = attributes.len() + usize::from(totp) != 1;

    for name in &requested {
        let (name, value) = match resolver::resolve(entry, name) {
            ResolvedAttribute::Found { name, value } => (name, value),
            ResolvedAttribute::Ambiguous(candidates) => {
                return Err(KeyclipError::AmbiguousAttribute {
                    requested: name.clone(),
                    candidates,
                });
            }
            ResolvedAttribute::NotFound => {
                return Err(KeyclipError::AttributeNotFound(name.clone()));
            }
        };

        let shown = if entry.is_protected(&name) && !show_protected {
            Zeroizing::new(PROTECTED_PLACEHOLDER.to_string())
        } else {
            value
        };
        CliDisplay::print_attribute(output, show_names.then_some(name.as_str()), &shown)?;
    }

    if totp {
        let code = Zeroizing::new(entry.totp()?);
        CliDisplay::print_attribute(output, show_names.then_some(TOTP_ATTRIBUTE), &code)?;
    }

    Ok(())
}
