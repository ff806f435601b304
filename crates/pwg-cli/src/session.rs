//! # Session Subcommand
//!
//! A line-oriented checklist session. Reads commands from stdin, or from a
//! script file with `--script`, applies them to a `GuideSession`, and
//! re-renders the guide after every change.
//!
//! ## Commands
//!
//! | Command            | Action                                  |
//! |--------------------|-----------------------------------------|
//! | `country <name>`   | select a country                        |
//! | `religion <name>`  | select a religion                       |
//! | `toggle <n>`       | mark/unmark step `n` (1-based)          |
//! | `expand <n>`       | open/close details of step `n` (premium)|
//! | `reset`            | change selection                        |
//! | `premium`          | open the premium offer                  |
//! | `upgrade`          | accept the offer                        |
//! | `not-now`          | close the offer                         |
//! | `show`             | render without changing anything        |
//! | `help`             | list commands                           |
//! | `quit`             | end the session                         |
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::{BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;

use pwg_catalog::DetailResolver;
use pwg_core::Pick;
use pwg_state::{Action, Effect, GuideSession, Variant};

use crate::config::GuideConfig;
use crate::render;

/// Arguments for `pwg session`.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Read commands from this file instead of stdin.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Print the final session state as JSON on exit.
    #[arg(long)]
    pub dump_json: bool,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Apply an action to the session.
    Apply(Action),
    /// Render the current view.
    Show,
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

const HELP: &str = "\
Commands:
  country <name>    select a country (USA, India, UK)
  religion <name>   select a religion (Christianity, Islam, Hinduism)
  toggle <n>        mark or unmark step n
  expand <n>        show or hide details for step n (premium)
  reset             change selection
  premium           open the premium offer
  upgrade           accept the premium offer
  not-now           close the premium offer
  show              show the guide
  help              show this list
  quit              end the session";

/// Parse one input line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "country" => Command::Apply(Action::SelectCountry {
            country: Pick::from_name(required(rest, "country")?),
        }),
        "religion" => Command::Apply(Action::SelectReligion {
            religion: Pick::from_name(required(rest, "religion")?),
        }),
        "toggle" => Command::Apply(Action::ToggleStep {
            index: step_index(rest)?,
        }),
        "expand" => Command::Apply(Action::TogglePremiumExpanded {
            index: step_index(rest)?,
        }),
        "reset" => Command::Apply(Action::ResetSelection),
        "premium" => Command::Apply(Action::OpenPremium),
        "upgrade" => Command::Apply(Action::UpgradePremium),
        "not-now" | "notnow" => Command::Apply(Action::DeclinePremium),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {other:?}; type 'help' for a list"),
    };
    Ok(Some(command))
}

fn required<'a>(rest: &'a str, what: &str) -> Result<&'a str> {
    if rest.is_empty() {
        bail!("missing {what} name");
    }
    Ok(rest)
}

fn step_index(rest: &str) -> Result<usize> {
    let number: usize = rest
        .parse()
        .map_err(|_| anyhow!("expected a step number, got {rest:?}"))?;
    if number == 0 {
        bail!("step numbers start at 1");
    }
    Ok(number - 1)
}

fn is_premium_action(action: &Action) -> bool {
    matches!(
        action,
        Action::OpenPremium
            | Action::DeclinePremium
            | Action::UpgradePremium
            | Action::TogglePremiumExpanded { .. }
    )
}

/// Build a session from config, applying any preselection.
pub fn start_session(config: &GuideConfig) -> GuideSession {
    let mut session = GuideSession::new(config.variant);
    if let Some(country) = &config.default_country {
        session.select_country(country.as_str());
    }
    if let Some(religion) = &config.default_religion {
        session.select_religion(religion.as_str());
    }
    session
}

/// Drive `session` from `input`, writing rendered output to `out`.
///
/// Malformed lines print a message and are otherwise ignored.
pub fn run_session_io<R: BufRead, W: Write>(
    session: &mut GuideSession,
    resolver: &DetailResolver,
    config: &GuideConfig,
    input: R,
    out: &mut W,
    prompt: bool,
) -> Result<()> {
    let width = config.progress_bar_width;
    write!(out, "{}", render::render_view(&session.view(resolver), width))?;

    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading session input")?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!(line = %line, "rejected session input");
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Show => {
                write!(out, "{}", render::render_view(&session.view(resolver), width))?;
            }
            Command::Apply(action) => {
                if session.variant() == Variant::Basic && is_premium_action(&action) {
                    writeln!(out, "Premium is not available in the basic guide.")?;
                    continue;
                }
                for effect in session.apply(action) {
                    match effect {
                        Effect::PurchaseAcknowledged => {
                            writeln!(out, "{}", render::PURCHASE_ACKNOWLEDGMENT)?;
                        }
                    }
                }
                write!(out, "{}", render::render_view(&session.view(resolver), width))?;
            }
        }
    }
    Ok(())
}

/// Execute `pwg session`.
pub fn run_session(args: &SessionArgs, config: &GuideConfig) -> Result<u8> {
    let resolver = config.detail_resolver()?;
    let mut session = start_session(config);
    tracing::info!(session = %session.id(), variant = %session.variant(), "session started");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &args.script {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening script {}", path.display()))?;
            run_session_io(&mut session, &resolver, config, BufReader::new(file), &mut out, false)?;
        }
        None => {
            let stdin = std::io::stdin();
            let prompt = stdin.is_terminal();
            run_session_io(&mut session, &resolver, config, stdin.lock(), &mut out, prompt)?;
        }
    }

    tracing::info!(
        session = %session.id(),
        actions = session.log().len(),
        complete = session.is_complete(),
        "session ended"
    );

    if args.dump_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&session)?)?;
    }
    Ok(0)
}
