//! Command-line argument parsing.

/// What the binary should do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Version,
    Help,
    /// Run the interactive shell, optionally against another API address
    RunShell { api_url: Option<String> },
}

/// Parse `std::env::args()`-style arguments (program name first).
///
/// ```
/// use musicboxd::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["musicboxd".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, String>
where
    I: Iterator<Item = String>,
{
    let mut api_url = None;
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--api-url" => match args.next() {
                Some(url) => api_url = Some(url),
                None => return Err("--api-url needs a value".to_string()),
            },
            other => {
                if let Some(url) = other.strip_prefix("--api-url=") {
                    api_url = Some(url.to_string());
                } else {
                    return Err(format!("unknown argument '{}'", other));
                }
            }
        }
    }
    Ok(CliCommand::RunShell { api_url })
}

pub const USAGE: &str = "\
Usage: musicboxd [--api-url <url>] [--version] [--help]

Options:
  --api-url <url>   API server address (overrides MUSICBOXD_API_URL)
  -V, --version     Print version
  -h, --help        Print this help

Environment:
  MUSICBOXD_API_URL       default http://localhost:8000
  MUSICBOXD_TIMEOUT_SECS  request timeout, default 30
  MUSICBOXD_TOKEN_PATH    token file, default ~/.musicboxd/storage.json
  MUSICBOXD_GET_RETRIES   retries for failed GET requests, default 0
  RUST_LOG                log filter, default warn";
