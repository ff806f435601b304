//! # Text Rendering
//!
//! Turns a `GuideView` into plain terminal text. Pure string building; the
//! caller decides where it goes.

use std::fmt::Write;

use pwg_catalog::{Detail, StepCatalog};
use pwg_core::{Country, Religion};
use pwg_state::{GuideView, Progress};

const DISCLAIMER: &str = "This guide provides general information. Please consult with local \
authorities and professionals for specific requirements.";

const COMPLETION_MESSAGE: &str = "You have successfully completed all required paperwork steps. \
Please keep all documents in a safe place.";

/// Shown once, after a successful upgrade.
pub const PURCHASE_ACKNOWLEDGMENT: &str =
    "Thank you for upgrading to Premium! Detailed guidance is now unlocked for every step.";

/// `[######--------------]  33%`
pub fn progress_bar(progress: &Progress, width: usize) -> String {
    let filled = (progress.fraction() * width as f64).round() as usize;
    let filled = filled.min(width);
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        progress.percent()
    )
}

/// Render the whole guide screen.
pub fn render_view(view: &GuideView<'_>, bar_width: usize) -> String {
    let mut out = String::new();

    if view.show_picker {
        let _ = writeln!(out, "Select Country:  {}", choices(Country::all(), view.country.as_deref()));
        let _ = writeln!(out, "Select Religion: {}", choices(Religion::all(), view.religion.as_deref()));
    } else {
        let country = view.country.as_deref().unwrap_or_default();
        let religion = view.religion.as_deref().unwrap_or_default();
        if view.has_steps() {
            let badge = if view.premium_active { "  [premium]" } else { "" };
            let _ = writeln!(out, "Paperwork Guide: {religion} practices in {country}{badge}");
            let _ = writeln!(
                out,
                "Progress: {}  {}",
                view.progress,
                progress_bar(&view.progress, bar_width)
            );
            let _ = writeln!(out);
            for row in &view.steps {
                let mark = if row.done { "x" } else { " " };
                let _ = writeln!(out, "  [{mark}] Step {}  {}", row.number, row.text);
                if let Some(detail) = &row.detail {
                    for line in render_detail(detail).lines() {
                        let _ = writeln!(out, "        {line}");
                    }
                }
            }
            if view.complete {
                let _ = writeln!(out);
                let _ = writeln!(out, "All Steps Completed");
                let _ = writeln!(out, "  {COMPLETION_MESSAGE}");
            }
        } else {
            let _ = writeln!(out, "No checklist for {religion} practices in {country}.");
            let _ = writeln!(out, "Type 'reset' to change the selection.");
        }
    }

    if view.premium_modal_open {
        let _ = writeln!(out);
        let _ = writeln!(out, "Premium: unlock detailed guidance for every step.");
        let _ = writeln!(out, "Type 'upgrade' to continue or 'not-now' to close.");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{DISCLAIMER}");
    out
}

/// Render resolved detail content.
pub fn render_detail(detail: &Detail<'_>) -> String {
    match detail {
        Detail::Structured(d) => {
            let mut out = String::new();
            let _ = writeln!(out, "{}", d.title);
            for section in &d.sections {
                let _ = writeln!(out, "{}:", section.heading);
                for point in &section.points {
                    let _ = writeln!(out, "  - {point}");
                }
            }
            out
        }
        Detail::Keyword(text) | Detail::Fallback(text) => format!("{text}\n"),
    }
}

/// One line per catalog pair.
pub fn render_catalog(catalog: &StepCatalog) -> String {
    let mut out = String::new();
    for (country, religion, count) in catalog.pairs() {
        let _ = writeln!(out, "{:<6} {:<13} {count} steps", country.as_str(), religion.as_str());
    }
    out
}

/// Numbered checklist lines.
pub fn render_steps(country: &str, religion: &str, steps: &[&str]) -> String {
    if steps.is_empty() {
        return format!("No checklist for {religion} practices in {country}.\n");
    }
    let mut out = String::new();
    let _ = writeln!(out, "{religion} practices in {country}");
    for (i, step) in steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {step}", i + 1);
    }
    out
}

fn choices<T: std::fmt::Display>(all: &[T], current: Option<&str>) -> String {
    all.iter()
        .map(|item| {
            let label = item.to_string();
            if current == Some(label.as_str()) {
                format!("({label})")
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
