use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `hire` binary.
#[derive(Debug, Parser)]
#[command(name = "hire", version, about = "Hiring platform client - sessions and job extraction")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only in the log)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use hire_core::SessionKind;
    use pretty_assertions::assert_eq;

    use super::subcommands::{AuthCommands, ExtractCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from(["hire", "--format", "raw", "auth", "status", "--verbose"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Status
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["hire", "--format", "table", "auth", "status"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn candidate_login_takes_a_mobile_number() {
        let cli = Cli::try_parse_from([
            "hire", "auth", "login", "--kind", "candidate", "--mobile", "+15550100", "--password",
            "pw",
        ])
        .expect("cli should parse");

        let Commands::Auth {
            action: AuthCommands::Login(args),
        } = cli.command
        else {
            panic!("expected auth login");
        };
        assert_eq!(args.kind, SessionKind::Candidate);
        assert_eq!(args.mobile.as_deref(), Some("+15550100"));
        assert!(args.email.is_none());
    }

    #[test]
    fn login_requires_an_identifier() {
        let parsed = Cli::try_parse_from(["hire", "auth", "login", "--password", "pw"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn logout_kind_and_all_conflict() {
        let parsed =
            Cli::try_parse_from(["hire", "auth", "logout", "--kind", "employer", "--all"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn extract_submit_needs_exactly_one_source() {
        assert!(Cli::try_parse_from(["hire", "extract", "submit"]).is_err());
        assert!(
            Cli::try_parse_from(["hire", "extract", "submit", "--text", "a", "--url", "b"])
                .is_err()
        );

        let cli = Cli::try_parse_from([
            "hire",
            "extract",
            "submit",
            "--url",
            "https://jobs.example/42",
            "--wait",
        ])
        .expect("cli should parse");
        let Commands::Extract {
            action: ExtractCommands::Submit(args),
        } = cli.command
        else {
            panic!("expected extract submit");
        };
        assert!(args.wait);
        assert_eq!(args.url.as_deref(), Some("https://jobs.example/42"));
    }
}
