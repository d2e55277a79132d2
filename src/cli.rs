use clap::{Parser, Subcommand};
use colored::*;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::KeyclipError;
use crate::output::Output;
use crate::utils;

#[derive(Parser)]
#[command(name = "keyclip")]
#[command(about = "Copy credential attributes to the clipboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database file to open
    #[arg(long, global = true, env = "KEYCLIP_DATABASE")]
    pub database: Option<PathBuf>,

    /// Silence any non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy an entry's attribute to the clipboard
    Clip {
        /// Path of the entry to clip
        entry: String,
        /// Timeout in seconds before clearing the clipboard
        #[arg(allow_hyphen_values = true)]
        timeout: Option<String>,
        /// Copy the given attribute to the clipboard. Defaults to "password" if not specified
        #[arg(short, long)]
        attribute: Option<String>,
        /// Copy the current TOTP to the clipboard (equivalent to "-a totp")
        #[arg(short, long)]
        totp: bool,
    },

    /// Show an entry's attributes
    Show {
        /// Path of the entry to show
        entry: String,
        /// Names of the attributes to show, may be repeated
        #[arg(short, long = "attribute")]
        attributes: Vec<String>,
        /// Show the entry's current TOTP
        #[arg(short, long)]
        totp: bool,
        /// Show protected attributes in clear text
        #[arg(short, long)]
        show_protected: bool,
    },

    /// List database entries
    Ls {
        /// Path of the group to list, the root group when omitted
        group: Option<String>,
        /// Print one entry path per line instead of a tree
        #[arg(short, long)]
        flat: bool,
    },
}

pub struct CliDisplay;

impl CliDisplay {
    pub fn print_attribute_copied(output: &mut Output, attribute: &str) -> io::Result<()> {
        writeln!(
            output.out(),
            "{}",
            utils::format_success(&format!(
                "Entry's \"{}\" attribute copied to the clipboard!",
                attribute
            ))
        )
    }

    pub fn print_attribute(
        output: &mut Output,
        name: Option<&str>,
        value: &str,
    ) -> io::Result<()> {
        match name {
            Some(name) => writeln!(output.out(), "{}: {}", name.cyan(), value),
            None => writeln!(output.out(), "{}", value),
        }
    }

    pub fn print_entry_path(output: &mut Output, path: &str) -> io::Result<()> {
        writeln!(output.out(), "{}", path.cyan())
    }

    pub fn print_info(output: &mut Output, message: &str) -> io::Result<()> {
        writeln!(output.out(), "{}", utils::format_info(message))
    }

    pub fn print_tree(output: &mut Output, tree: &str) -> io::Result<()> {
        write!(output.out(), "{}", tree)
    }

    /// Report a failed command on the channel its kind belongs to
    pub fn print_failure(output: &mut Output, err: &KeyclipError) {
        let message = err.to_string();
        let _ = if err.goes_to_output() {
            writeln!(output.out(), "{}", utils::format_warning(&message))
        } else {
            writeln!(output.err(), "{}", utils::format_error(&message))
        };
    }

    pub fn print_error(output: &mut Output, message: &str) {
        let _ = writeln!(output.err(), "{}", utils::format_error(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::captured;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_clip_arguments() {
        let cli = Cli::parse_from(["keyclip", "--database", "db.json", "clip", "Email/Work", "-5"]);
        match cli.command {
            Commands::Clip {
                entry,
                timeout,
                attribute,
                totp,
            } => {
                assert_eq!(entry, "Email/Work");
                assert_eq!(timeout.as_deref(), Some("-5"));
                assert!(attribute.is_none());
                assert!(!totp);
            }
            _ => panic!("expected clip"),
        }
        assert_eq!(cli.database, Some(PathBuf::from("db.json")));
    }

    #[test]
    fn parses_selectors_and_quiet() {
        let cli = Cli::parse_from(["keyclip", "clip", "-q", "-t", "-a", "user", "Email/Work"]);
        assert!(cli.quiet);
        match cli.command {
            Commands::Clip { attribute, totp, .. } => {
                assert_eq!(attribute.as_deref(), Some("user"));
                assert!(totp);
            }
            _ => panic!("expected clip"),
        }
    }

    #[test]
    fn attribute_not_found_goes_to_normal_channel() {
        let (mut output, out, err) = captured(false);
        CliDisplay::print_failure(&mut output, &KeyclipError::AttributeNotFound("x".to_string()));
        assert!(out.contents().contains("Attribute \"x\" not found."));
        assert_eq!(err.contents(), "");
    }

    #[test]
    fn other_failures_go_to_error_channel() {
        let (mut output, out, err) = captured(true);
        CliDisplay::print_failure(&mut output, &KeyclipError::EntryNotFound("A/B".to_string()));
        assert_eq!(out.contents(), "");
        assert!(err.contents().contains("Entry A/B not found."));
    }
}
