use crate::cli::CliDisplay;
use crate::error::KeyclipError;
use crate::output::Output;
use crate::types::Database;
use crate::utils;

pub fn execute(
    database: &Database,
    group: Option<&str>,
    flat: bool,
    output: &mut Output,
) -> Result<(), KeyclipError> {
    let path = group.unwrap_or("/");
    let group = database
        .root
        .find_group_by_path(path)
        .ok_or_else(|| KeyclipError::GroupNotFound(path.to_string()))?;

    let entries = group.entry_paths();

    if entries.is_empty() {
        CliDisplay::print_info(output, &format!("No entries in {}", path))?;
        return Ok(());
    }

    if flat {
        for entry in &entries {
            CliDisplay::print_entry_path(output, entry)?;
        }
    } else {
        CliDisplay::print_tree(output, &utils::format_tree(&entries, ""))?;
    }

    Ok(())
}
