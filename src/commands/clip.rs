use crate::cli::CliDisplay;
use crate::clipboard::{Clipboard, ClipboardSession, Sleeper};
use crate::error::KeyclipError;
use crate::output::Output;
use crate::resolver::{self, Selector};
use crate::types::Database;

pub struct ClipArgs {
    pub entry: String,
    pub timeout: Option<String>,
    pub selector: Selector,
}

/// Seconds to hold the value, `None` when no countdown was asked for.
///
/// Anything that is not a positive integer is rejected.
pub fn parse_timeout(raw: Option<&str>) -> Result<Option<u64>, KeyclipError> {
    let raw = match raw {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    match raw.trim().parse::<i64>() {
        Ok(seconds) if seconds > 0 => Ok(Some(seconds as u64)),
        _ => Err(KeyclipError::InvalidTimeout(raw.to_string())),
    }
}

pub fn execute<C: Clipboard, S: Sleeper>(
    database: &Database,
    args: &ClipArgs,
    default_timeout: u64,
    session: &mut ClipboardSession<C, S>,
    output: &mut Output,
) -> Result<(), KeyclipError> {
    let timeout = parse_timeout(args.timeout.as_deref())?.unwrap_or(default_timeout);

    let entry = database
        .root
        .find_entry_by_path(&args.entry)
        .ok_or_else(|| KeyclipError::EntryNotFound(args.entry.clone()))?;

    let (name, value) = resolver::select(entry, &args.entry, &args.selector)?;

    session.copy(&value)?;
    // The value is on the clipboard now; a lost status line must not skip the clear
    let _ = CliDisplay::print_attribute_copied(output, &name);

    if timeout > 0 {
        session.run_countdown(timeout, output.out());
    }

    Ok(())
}
