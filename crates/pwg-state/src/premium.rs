//! # Premium Upsell State Machine
//!
//! ## States
//!
//! ```text
//!            open                 decline ("Not now")
//! Closed ──────────▶ Open ──────────────────────────▶ Closed   (active unchanged)
//!                     │
//!                     │ upgrade
//!                     ▼
//!                   Closed, active = true  ──▶ emits PurchaseAcknowledged once
//! ```
//!
//! `active` never goes back to `false` within a session. The expansion set
//! only accepts changes while `active` is true.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::action::Effect;

/// Visibility of the premium modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumModal {
    /// Modal hidden.
    #[default]
    Closed,
    /// Modal shown, awaiting "Upgrade" or "Not now".
    Open,
}

impl std::fmt::Display for PremiumModal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Closed => "CLOSED",
            Self::Open => "OPEN",
        })
    }
}

/// Premium flags and the per-step expansion set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumState {
    /// Whether premium was purchased in this session.
    pub active: bool,
    /// Modal visibility.
    pub modal: PremiumModal,
    /// 0-based indices whose detail panel is expanded.
    pub expanded: BTreeSet<usize>,
}

impl PremiumState {
    /// `Closed → Open`. Returns whether the state changed.
    pub fn open(&mut self) -> bool {
        if self.modal == PremiumModal::Open {
            return false;
        }
        self.modal = PremiumModal::Open;
        true
    }

    /// `Open → Closed` without purchasing. Returns whether the state changed.
    pub fn decline(&mut self) -> bool {
        if self.modal != PremiumModal::Open {
            return false;
        }
        self.modal = PremiumModal::Closed;
        true
    }

    /// `Open → Closed` with `active = true`.
    ///
    /// Returns `None` when the modal is closed. The acknowledgment effect is
    /// only emitted on the first activation.
    pub fn upgrade(&mut self) -> Option<Vec<Effect>> {
        if self.modal != PremiumModal::Open {
            return None;
        }
        self.modal = PremiumModal::Closed;
        if self.active {
            return Some(Vec::new());
        }
        self.active = true;
        Some(vec![Effect::PurchaseAcknowledged])
    }

    /// Flip expansion of `index` if premium is active and `index` is below
    /// `step_count`. Returns whether the state changed.
    pub fn toggle_expanded(&mut self, index: usize, step_count: usize) -> bool {
        if !self.active || index >= step_count {
            return false;
        }
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
        true
    }

    /// Whether the detail panel of `index` is open.
    pub fn is_expanded(&self, index: usize) -> bool {
        self.active && self.expanded.contains(&index)
    }

    /// Collapse every detail panel. Leaves `active` and the modal alone.
    pub fn clear_expanded(&mut self) {
        self.expanded.clear();
    }
}
