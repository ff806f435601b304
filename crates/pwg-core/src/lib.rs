//! # pwg-core: Foundational Types for the Paperwork Guide
//!
//! Defines the closed vocabularies every other crate keys on, plus the
//! small set of ambient primitives (identifiers, timestamps, errors).
//! Every other crate in the workspace depends on `pwg-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enumerations.** `Country` and `Religion` are enums with
//!    exhaustive `match` everywhere. Adding a country forces the catalog to
//!    provide its checklists at compile time.
//!
//! 2. **Lenient selection.** A user may pick a name that is not in the
//!    enumeration, or a known label spelled differently. That choice is
//!    carried as [`Pick::Unlisted`] and simply never matches a catalog
//!    entry. It is never an error.
//!
//! 3. **UTC-only timestamps.** [`Timestamp`] truncates to seconds so that
//!    action logs render identically everywhere.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pwg-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod region;
pub mod temporal;

pub use error::GuideError;
pub use identity::SessionId;
pub use region::{Country, Label, Pick, Religion, COUNTRY_COUNT, RELIGION_COUNT};
pub use temporal::Timestamp;
