//! Command-line argument parsing.

/// What the binary should do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Print the signed-in identity
    Whoami,
    /// Forget the stored session
    Logout,
    /// Sign in with email and a prompted password
    Login { email: String },
    /// List the signed-in patient's appointments
    Appointments,
    /// Run the TUI application (default)
    RunTui,
    /// Arguments could not be understood
    Invalid(String),
}

/// Parsed command plus global options.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: CliCommand,
    /// `--api-url` override
    pub api_url: Option<String>,
}

/// Parse `args` (program name first).
///
/// The first command flag wins; `--api-url` may appear anywhere.
///
/// ```
/// use medicare::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["medicare".to_string(), "--whoami".to_string()];
/// assert_eq!(parse_args(args.into_iter()).command, CliCommand::Whoami);
/// ```
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: Iterator<Item = String>,
{
    let mut command: Option<CliCommand> = None;
    let mut api_url = None;
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let parsed = match arg.as_str() {
            "--version" | "-V" => CliCommand::Version,
            "--help" | "-h" => CliCommand::Help,
            "--whoami" => CliCommand::Whoami,
            "--logout" => CliCommand::Logout,
            "--appointments" => CliCommand::Appointments,
            "--login" => match args.next() {
                Some(email) if !email.starts_with('-') => CliCommand::Login { email },
                _ => CliCommand::Invalid("--login requires an email address".to_string()),
            },
            "--api-url" => {
                match args.next() {
                    Some(url) if !url.starts_with('-') => api_url = Some(url),
                    _ => {
                        command.get_or_insert(CliCommand::Invalid(
                            "--api-url requires a URL".to_string(),
                        ));
                    }
                }
                continue;
            }
            other if other.starts_with("--api-url=") => {
                api_url = Some(other["--api-url=".len()..].to_string());
                continue;
            }
            other => CliCommand::Invalid(format!("Unknown argument: {}", other)),
        };
        command.get_or_insert(parsed);
    }

    CliArgs {
        command: command.unwrap_or(CliCommand::RunTui),
        api_url,
    }
}

/// Usage text for `--help`.
pub fn usage() -> String {
    format!(
        "medicare {}\n\n\
         Usage: medicare [OPTIONS]\n\n\
         Options:\n  \
           --api-url <URL>     Backend base URL (overrides MEDICARE_API_URL)\n  \
           --login <EMAIL>     Sign in; the password is prompted for\n  \
           --logout            Forget the stored session\n  \
           --whoami            Show the signed-in user\n  \
           --appointments      List your appointments\n  \
           -V, --version       Print version\n  \
           -h, --help          Print this help\n\n\
         Without options the interactive client starts.",
        super::VERSION
    )
}
