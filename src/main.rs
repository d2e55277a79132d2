mod cli;
mod clipboard;
mod commands;
mod config;
mod crypto;
mod error;
mod output;
mod resolver;
mod storage;
mod totp;
mod types;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, CliDisplay, Commands};
use crate::clipboard::{ClipboardSession, SystemClipboard, ThreadSleeper};
use commands::clip::ClipArgs;
use config::Config;
use error::{EXIT_FAILURE, KeyclipError};
use output::Output;
use resolver::Selector;
use storage::Storage;
use types::Database;

fn main() {
    let cli = Cli::parse();
    let mut output = Output::stdio(cli.quiet);

    if let Err(err) = run(cli, &mut output) {
        let code = match err.downcast_ref::<KeyclipError>() {
            Some(err) => {
                CliDisplay::print_failure(&mut output, err);
                err.exit_code()
            }
            None => {
                CliDisplay::print_error(&mut output, &err.to_string());
                EXIT_FAILURE
            }
        };
        std::process::exit(code);
    }
}

fn run(cli: Cli, output: &mut Output) -> Result<()> {
    let config = Config::load()?;
    if !config.theme.use_colors {
        colored::control::set_override(false);
    }

    let database = open_database(&config, cli.database)?;

    match cli.command {
        Commands::Clip {
            entry,
            timeout,
            attribute,
            totp,
        } => {
            let args = ClipArgs {
                entry,
                timeout,
                selector: Selector { attribute, totp },
            };
            let mut session = ClipboardSession::new(SystemClipboard::default(), ThreadSleeper);
            commands::clip::execute(&database, &args, config.clipboard_timeout, &mut session, output)?
        }

        Commands::Show {
            entry,
            attributes,
            totp,
            show_protected,
        } => commands::show::execute(&database, &entry, &attributes, totp, show_protected, output)?,

        Commands::Ls { group, flat } => {
            commands::ls::execute(&database, group.as_deref(), flat, output)?
        }
    }

    Ok(())
}

fn open_database(config: &Config, flag: Option<std::path::PathBuf>) -> Result<Database> {
    let storage = Storage::new(config.database(flag)?);
    let name = storage.path().display().to_string();
    Ok(storage.load(|| utils::database_password(&name))?)
}
