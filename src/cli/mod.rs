//! Command-line entry points.
//!
//! Flags are handled before the TUI starts:
//!
//! ```ignore
//! use medicare::cli::{parse_args, run_cli_command};
//!
//! let args = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(&args.command, &services) {
//!     // CLI command was executed, exit with result
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod account;
pub mod args;
pub mod version;

pub use args::{parse_args, usage, CliArgs, CliCommand};
pub use version::{version_line, write_version, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::io;

use crate::services::Services;

/// Run `command` to completion.
///
/// Returns `None` for [`CliCommand::RunTui`]; the caller then starts the
/// interactive client.
pub fn run_cli_command(command: &CliCommand, services: &Services) -> Option<Result<()>> {
    match command {
        CliCommand::Version => Some(write_version(&mut io::stdout()).map_err(Into::into)),
        CliCommand::Help => {
            println!("{}", usage());
            Some(Ok(()))
        }
        CliCommand::Invalid(message) => Some(Err(eyre!("{}\n\n{}", message, usage()))),
        CliCommand::RunTui => None,
        CliCommand::Whoami
        | CliCommand::Logout
        | CliCommand::Login { .. }
        | CliCommand::Appointments => Some(run_session_command(command, services)),
    }
}

fn run_session_command(command: &CliCommand, services: &Services) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let mut stdout = io::stdout();
    let Services { api, session, .. } = services;

    match command {
        CliCommand::Whoami => runtime.block_on(account::whoami(session, &mut stdout)),
        CliCommand::Logout => runtime.block_on(account::logout(session, &mut stdout)),
        CliCommand::Appointments => {
            runtime.block_on(account::appointments(api, session, &mut stdout))
        }
        CliCommand::Login { email } => {
            let password = rpassword::prompt_password(format!("Password for {}: ", email))?;
            runtime.block_on(account::login(api, session, email, &password, &mut stdout))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryTokenStore, MockHttpClient};
    use crate::config::AppConfig;
    use std::sync::Arc;

    fn services() -> Services {
        Services::new(
            AppConfig::new(),
            Arc::new(MockHttpClient::new()),
            Arc::new(InMemoryTokenStore::new()),
        )
    }

    #[test]
    fn test_run_tui_returns_none() {
        assert!(run_cli_command(&CliCommand::RunTui, &services()).is_none());
    }

    #[test]
    fn test_invalid_returns_error_with_usage() {
        let result = run_cli_command(&CliCommand::Invalid("bad".to_string()), &services());
        let err = result.unwrap().unwrap_err();
        assert!(err.to_string().starts_with("bad"));
        assert!(err.to_string().contains("Usage"));
    }

    #[test]
    fn test_whoami_runs_without_session() {
        let result = run_cli_command(&CliCommand::Whoami, &services());
        assert!(result.unwrap().is_ok());
    }
}
