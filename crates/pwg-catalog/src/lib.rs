//! # pwg-catalog: Checklists and Step Details
//!
//! Holds the read-only content of the guide:
//!
//! - **Steps** (`steps.rs`): the `(Country, Religion) → [step]` table. Built
//!   once per process and only ever borrowed. Every enumerated pair has
//!   exactly [`STEPS_PER_CHECKLIST`] steps; anything else looks up as empty.
//!
//! - **Detail** (`detail.rs`): premium detail text for a step. A structured
//!   override table keyed by step position is consulted first, then an
//!   ordered list of keyword rules (first match wins), then a fallback.
//!   All of it is plain data and can be replaced from a YAML document.
//!
//! ## Crate Policy
//!
//! - Depends only on `pwg-core` internally.
//! - No lookup in this crate returns an error; unknown keys yield empty
//!   results or the fallback detail.

pub mod detail;
pub mod steps;

pub use detail::{
    Detail, DetailDocument, DetailOverride, DetailResolver, DetailRulesError, DetailSection,
    KeywordRule, StructuredDetail,
};
pub use steps::{StepCatalog, STEPS_PER_CHECKLIST};
