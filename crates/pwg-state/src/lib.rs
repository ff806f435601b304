//! # pwg-state: Checklist Session State Machine
//!
//! Owns everything that changes while someone works through a checklist,
//! with no rendering and no I/O.
//!
//! ## Components
//!
//! - **Session** (`session.rs`): [`GuideSession`] holds the selection, the
//!   completion set, and the premium state. Every user action is applied
//!   through [`GuideSession::apply`], which records it in an ordered log.
//!
//! - **Premium** (`premium.rs`): the upsell modal
//!   (`Closed → Open → Closed`) and the per-step expansion set. Activation is
//!   one-way for the lifetime of a session.
//!
//! - **Action** (`action.rs`): the serializable action vocabulary, the
//!   [`Effect`]s a rendering surface must carry out, and log records.
//!
//! - **Progress** (`progress.rs`) and **View** (`view.rs`): derived values,
//!   recomputed on every read.
//!
//! ## Failure Semantics
//!
//! No action can fail. Actions that make no sense in the current state (an
//! out-of-range step index, "upgrade" while the modal is closed) are
//! recorded as not applied and leave the state untouched.
//!
//! ## Crate Policy
//!
//! - Depends on `pwg-core` and `pwg-catalog` internally.
//! - Single-threaded: a session is a plain owned value, mutated through
//!   `&mut self`. No locks, no interior mutability.

pub mod action;
pub mod premium;
pub mod progress;
pub mod session;
pub mod view;

pub use action::{Action, ActionRecord, Effect};
pub use premium::{PremiumModal, PremiumState};
pub use progress::Progress;
pub use session::{GuideSession, Selection, Variant};
pub use view::{GuideView, StepRow};
