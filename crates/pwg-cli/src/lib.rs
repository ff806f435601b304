//! # pwg-cli: Paperwork Guide Command-Line Interface
//!
//! A terminal rendering surface for the checklist state machine in
//! `pwg-state`.
//!
//! ## Subcommands
//!
//! - `catalog`: List countries, religions, and checklist sizes
//! - `steps`: Print the checklist for a country and religion
//! - `detail`: Resolve premium detail content for one step
//! - `session`: Interactive checklist session (stdin or a script file)
//!
//! ## Crate Policy
//!
//! - Argument parsing and rendering live here; every state transition is
//!   delegated to `pwg_state::GuideSession`.
//! - Rendered output goes to stdout, logs to stderr.
//! - Step numbers are 1-based on the command line and 0-based everywhere
//!   else.

pub mod config;
pub mod lookup;
pub mod render;
pub mod session;

/// Output format shared by the lookup subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}
