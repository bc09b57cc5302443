//! Command-line surface: argument parsing and the interactive shell.

pub mod args;
pub mod shell;

pub use args::{parse_args, CliCommand, USAGE};
pub use shell::{parse_line, ShellCommand, SHELL_HELP};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }
}
