//! # pwg CLI entry point
//!
//! Parses command-line arguments, loads the optional config file, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pwg_cli::config::GuideConfig;
use pwg_cli::lookup::{run_catalog, run_detail, run_steps, CatalogArgs, DetailArgs, StepsArgs};
use pwg_cli::session::{run_session, SessionArgs};

/// Paperwork Guide
///
/// Step-by-step checklists for the paperwork that follows a death, by
/// country and religious practice.
#[derive(Parser, Debug)]
#[command(name = "pwg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List supported countries, religions, and checklists.
    Catalog(CatalogArgs),

    /// Print the checklist for a country and religion.
    Steps(StepsArgs),

    /// Show detailed guidance for one step.
    Detail(DetailArgs),

    /// Run a checklist session from stdin or a script file.
    Session(SessionArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Rendered output owns stdout; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("pwg CLI starting");

    let result = run(cli);
    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let config = GuideConfig::resolve(cli.config.as_deref())?;
    let stdout = std::io::stdout();

    match cli.command {
        Commands::Catalog(args) => run_catalog(&args, &mut stdout.lock()),
        Commands::Steps(args) => run_steps(&args, &mut stdout.lock()),
        Commands::Detail(args) => {
            let resolver = config.detail_resolver()?;
            run_detail(&args, &resolver, &mut stdout.lock())
        }
        Commands::Session(args) => run_session(&args, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwg_cli::OutputFormat;

    #[test]
    fn cli_parse_catalog() {
        let cli = Cli::try_parse_from(["pwg", "catalog"]).unwrap();
        if let Commands::Catalog(args) = cli.command {
            assert_eq!(args.format, OutputFormat::Text);
        } else {
            panic!("expected Catalog");
        }
    }

    #[test]
    fn cli_parse_steps_json() {
        let cli = Cli::try_parse_from([
            "pwg", "steps", "--country", "UK", "--religion", "Islam", "--format", "json",
        ])
        .unwrap();
        if let Commands::Steps(args) = cli.command {
            assert_eq!(args.country, "UK");
            assert_eq!(args.religion, "Islam");
            assert_eq!(args.format, OutputFormat::Json);
        } else {
            panic!("expected Steps");
        }
    }

    #[test]
    fn cli_parse_steps_requires_names() {
        assert!(Cli::try_parse_from(["pwg", "steps", "--country", "UK"]).is_err());
    }

    #[test]
    fn cli_parse_detail() {
        let cli = Cli::try_parse_from([
            "pwg", "detail", "--country", "India", "--religion", "Hinduism", "--step", "3",
        ])
        .unwrap();
        if let Commands::Detail(args) = cli.command {
            assert_eq!(args.step, 3);
        } else {
            panic!("expected Detail");
        }
    }

    #[test]
    fn cli_parse_detail_rejects_non_numeric_step() {
        assert!(Cli::try_parse_from([
            "pwg", "detail", "--country", "UK", "--religion", "Islam", "--step", "first",
        ])
        .is_err());
    }

    #[test]
    fn cli_parse_session_with_script() {
        let cli = Cli::try_parse_from(["pwg", "session", "--script", "walkthrough.txt", "--dump-json"])
            .unwrap();
        if let Commands::Session(args) = cli.command {
            assert_eq!(args.script, Some(PathBuf::from("walkthrough.txt")));
            assert!(args.dump_json);
        } else {
            panic!("expected Session");
        }
    }

    #[test]
    fn cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pwg", "session", "-vv", "--config", "guide.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("guide.yaml")));
    }

    #[test]
    fn cli_parse_verbose_default_zero() {
        let cli = Cli::try_parse_from(["pwg", "catalog"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_parse_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["pwg", "obituary"]).is_err());
    }
}
