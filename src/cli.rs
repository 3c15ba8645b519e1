//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// Set up and start the local development environment.
#[derive(Parser, Debug)]
#[command(name = "pitch", version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Only print warnings and errors
    #[arg(long, short, conflicts_with = "debug")]
    pub quiet: bool,

    /// Never prompt; resolve every question to its default
    #[arg(long)]
    pub non_interactive: bool,

    /// Project directory to set up (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cli = Cli::parse_from(["pitch"]);
        assert!(!cli.debug);
        assert!(!cli.quiet);
        assert!(!cli.non_interactive);
        assert!(cli.project.is_none());
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::parse_from(["pitch", "--debug", "--non-interactive", "--project", "/tmp/x"]);
        assert!(cli.debug);
        assert!(cli.non_interactive);
        assert_eq!(cli.project.unwrap(), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn quiet_conflicts_with_debug() {
        let result = Cli::try_parse_from(["pitch", "--quiet", "--debug"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
