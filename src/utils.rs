use anyhow::{Result, anyhow};
use colored::*;
use dialoguer::Password;

use crate::error::KeyclipError;

pub const PASSWORD_ENV: &str = "KEYCLIP_PASSWORD";

/// Format error for display
pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

/// Format success message
pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

/// Format info message
pub fn format_info(msg: &str) -> String {
    format!("{} {}", "→".blue().bold(), msg)
}

/// Format warning message
pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

/// Prompt for password
pub fn prompt_password(prompt: &str) -> Result<String> {
    let password = Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| anyhow!("Failed to read password: {}", e))?;

    Ok(password)
}

/// Database password from the environment, else asked interactively
pub fn database_password(database: &str) -> Result<String, KeyclipError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }
    prompt_password(&format!("Enter password to unlock {}", database))
        .map_err(|e| KeyclipError::Database(e.to_string()))
}

/// Format tree structure
pub fn format_tree(entries: &[String], prefix: &str) -> String {
    let mut tree = String::new();
    let mut path_tree: std::collections::BTreeMap<String, Vec<String>> =
        std::collections::BTreeMap::new();

    for entry in entries {
        match entry.split_once('/') {
            None => path_tree.entry(String::new()).or_default().push(entry.clone()),
            Some((dir, rest)) => path_tree.entry(dir.to_string()).or_default().push(rest.to_string()),
        }
    }

    let count = path_tree.len();
    for (i, (dir, children)) in path_tree.iter().enumerate() {
        let is_last = i == count - 1;

        if dir.is_empty() {
            // Entries directly at this level
            for (j, child) in children.iter().enumerate() {
                let connector = if is_last && j == children.len() - 1 { "└──" } else { "├──" };
                tree.push_str(&format!("{}{} {}\n", prefix, connector, child.cyan()));
            }
        } else {
            let connector = if is_last { "└──" } else { "├──" };
            tree.push_str(&format!("{}{} {}/\n", prefix, connector, dir.blue().bold()));

            let child_prefix = if is_last {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };
            tree.push_str(&format_tree(children, &child_prefix));
        }
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tree_nests_groups() {
        colored::control::set_override(false);
        let entries = vec![
            "Email/Work".to_string(),
            "Email/Home".to_string(),
            "Bank".to_string(),
        ];
        let tree = format_tree(&entries, "");
        assert_eq!(
            tree,
            "├── Bank\n└── Email/\n    ├── Work\n    └── Home\n"
        );
    }
}
