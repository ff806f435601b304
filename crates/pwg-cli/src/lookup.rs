//! # Lookup Subcommands
//!
//! Read-only queries against the built-in catalog and the configured
//! detail resolver: `catalog`, `steps`, and `detail`.

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::json;

use pwg_catalog::{DetailResolver, StepCatalog};
use pwg_core::{Country, Religion};

use crate::render;
use crate::OutputFormat;

/// Arguments for `pwg catalog`.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for `pwg steps`.
#[derive(Args, Debug)]
pub struct StepsArgs {
    /// Country name (USA, India, UK).
    #[arg(long)]
    pub country: String,
    /// Religion name (Christianity, Islam, Hinduism).
    #[arg(long)]
    pub religion: String,
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for `pwg detail`.
#[derive(Args, Debug)]
pub struct DetailArgs {
    /// Country name (USA, India, UK).
    #[arg(long)]
    pub country: String,
    /// Religion name (Christianity, Islam, Hinduism).
    #[arg(long)]
    pub religion: String,
    /// Step number, starting at 1.
    #[arg(long)]
    pub step: usize,
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Execute `pwg catalog`.
pub fn run_catalog(args: &CatalogArgs, out: &mut impl Write) -> Result<u8> {
    let catalog = StepCatalog::builtin();
    match args.format {
        OutputFormat::Text => write!(out, "{}", render::render_catalog(catalog))?,
        OutputFormat::Json => {
            let entries: Vec<_> = catalog
                .pairs()
                .map(|(country, religion, steps)| {
                    json!({"country": country, "religion": religion, "steps": steps})
                })
                .collect();
            let body = json!({
                "countries": Country::all(),
                "religions": Religion::all(),
                "checklists": entries,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        }
    }
    Ok(0)
}

/// Execute `pwg steps`.
///
/// Unknown names are not an error: they print an empty checklist.
pub fn run_steps(args: &StepsArgs, out: &mut impl Write) -> Result<u8> {
    let steps = StepCatalog::builtin().lookup_names(&args.country, &args.religion);
    if steps.is_empty() {
        tracing::info!(country = %args.country, religion = %args.religion, "no checklist for selection");
    }
    match args.format {
        OutputFormat::Text => write!(
            out,
            "{}",
            render::render_steps(&args.country, &args.religion, steps)
        )?,
        OutputFormat::Json => {
            let body = json!({
                "country": args.country.trim(),
                "religion": args.religion.trim(),
                "steps": steps,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        }
    }
    Ok(0)
}

/// Execute `pwg detail`.
pub fn run_detail(args: &DetailArgs, resolver: &DetailResolver, out: &mut impl Write) -> Result<u8> {
    let country: Country = args.country.parse().context("--country")?;
    let religion: Religion = args.religion.parse().context("--religion")?;
    let steps = StepCatalog::builtin().steps(country, religion);

    if args.step == 0 || args.step > steps.len() {
        bail!(
            "step must be between 1 and {} for {religion} practices in {country}, got {}",
            steps.len(),
            args.step
        );
    }
    let index = args.step - 1;
    let text = steps[index];
    let detail = resolver.resolve(country, religion, index, text);

    match args.format {
        OutputFormat::Text => {
            writeln!(out, "Step {}  {text}", args.step)?;
            write!(out, "{}", render::render_detail(&detail))?;
        }
        OutputFormat::Json => {
            let body = json!({
                "country": country,
                "religion": religion,
                "step": args.step,
                "text": text,
                "detail": detail,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        }
    }
    Ok(0)
}
