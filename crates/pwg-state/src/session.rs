//! # Guide Session
//!
//! The single owner of all mutable guide state.
//!
//! ## State
//!
//! - [`Selection`]: optional country, optional religion.
//! - Completion set: 0-based indices into the current checklist.
//! - [`PremiumState`]: modal, activation flag, expansion set.
//! - Action log: every action in arrival order, applied or not.
//!
//! ## Transitions
//!
//! | Action                  | Effect on state                                        |
//! |-------------------------|--------------------------------------------------------|
//! | `SelectCountry`         | sets country only; a blank name unsets it              |
//! | `SelectReligion`        | sets religion only; a blank name unsets it             |
//! | `ToggleStep(i)`         | flips `i` in the completion set if `i` is in range     |
//! | `ResetSelection`        | clears selection, completion, expansions               |
//! | `OpenPremium`           | modal `Closed → Open`                                  |
//! | `DeclinePremium`        | modal `Open → Closed`                                  |
//! | `UpgradePremium`        | modal `Open → Closed`, `active = true`                 |
//! | `TogglePremiumExpanded` | flips `i` in the expansion set if active and in range  |
//!
//! In the [`Variant::Basic`] guide the premium actions are never applied.
//!
//! ## Out-of-range indices
//!
//! A step index at or beyond the length of the current checklist is
//! ignored. The action is still logged, with `applied = false`.
//!
//! ## Action log
//!
//! The log is append-only and holds one record per action, no-ops included,
//! for the life of the session. Nothing trims it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use pwg_catalog::{DetailResolver, StepCatalog};
use pwg_core::{Country, Pick, Religion, SessionId, Timestamp};

use crate::action::{Action, ActionRecord, Effect};
use crate::premium::PremiumState;
use crate::progress::Progress;
use crate::view::GuideView;

// ─── Variant ─────────────────────────────────────────────────────────

/// Which flavour of the guide is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Checklist only.
    Basic,
    /// Checklist plus the premium upsell and step details.
    #[default]
    Extended,
}

impl Variant {
    /// The snake_case identifier, matching serde.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Extended => "extended",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Selection ───────────────────────────────────────────────────────

/// The user's current country and religion choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Chosen country, if any.
    pub country: Option<Pick<Country>>,
    /// Chosen religion, if any.
    pub religion: Option<Pick<Religion>>,
}

impl Selection {
    /// Whether both fields are set (listed or not).
    pub fn is_complete(&self) -> bool {
        self.country.is_some() && self.religion.is_some()
    }

    /// Whether neither field is set.
    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.religion.is_none()
    }

    /// The catalog key, when both fields are set to listed values.
    pub fn listed_pair(&self) -> Option<(Country, Religion)> {
        let country = self.country.as_ref()?.listed()?;
        let religion = self.religion.as_ref()?.listed()?;
        Some((country, religion))
    }

    fn clear(&mut self) {
        self.country = None;
        self.religion = None;
    }
}

// ─── Session ─────────────────────────────────────────────────────────

/// One in-memory run of the guide.
#[derive(Debug, Clone, Serialize)]
pub struct GuideSession {
    id: SessionId,
    variant: Variant,
    selection: Selection,
    completed: BTreeSet<usize>,
    premium: PremiumState,
    log: Vec<ActionRecord>,
}

impl Default for GuideSession {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

impl GuideSession {
    /// Start a session with nothing selected and premium inactive.
    pub fn new(variant: Variant) -> Self {
        let id = SessionId::new();
        tracing::debug!(session = %id, %variant, "guide session started");
        Self {
            id,
            variant,
            selection: Selection::default(),
            completed: BTreeSet::new(),
            premium: PremiumState::default(),
            log: Vec::new(),
        }
    }

    /// Apply one action, log it, and return the effects it produced.
    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        let mut effects = Vec::new();
        let applied = match &action {
            Action::SelectCountry { country } => {
                self.selection.country = Some(country.clone()).filter(|p| !p.is_blank());
                true
            }
            Action::SelectReligion { religion } => {
                self.selection.religion = Some(religion.clone()).filter(|p| !p.is_blank());
                true
            }
            Action::ToggleStep { index } => self.flip_completion(*index),
            Action::ResetSelection => {
                self.selection.clear();
                self.completed.clear();
                self.premium.clear_expanded();
                true
            }
            Action::OpenPremium => self.premium_enabled() && self.premium.open(),
            Action::DeclinePremium => self.premium_enabled() && self.premium.decline(),
            Action::UpgradePremium => {
                match self.premium_enabled().then(|| self.premium.upgrade()).flatten() {
                    Some(emitted) => {
                        effects = emitted;
                        true
                    }
                    None => false,
                }
            }
            Action::TogglePremiumExpanded { index } => {
                let step_count = self.current_steps().len();
                self.premium_enabled() && self.premium.toggle_expanded(*index, step_count)
            }
        };

        tracing::debug!(
            session = %self.id,
            sequence = self.log.len(),
            action = %action,
            applied,
            "guide action"
        );
        if effects.contains(&Effect::PurchaseAcknowledged) {
            tracing::info!(session = %self.id, "premium activated");
        }

        self.log.push(ActionRecord {
            sequence: self.log.len() as u64,
            action,
            applied,
            timestamp: Timestamp::now(),
        });
        effects
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Choose a country. Unlisted names are accepted and never match; a
    /// blank name leaves the country unset.
    pub fn select_country(&mut self, country: impl Into<Pick<Country>>) {
        self.apply(Action::SelectCountry {
            country: country.into(),
        });
    }

    /// Choose a religion. Unlisted names are accepted and never match; a
    /// blank name leaves the religion unset.
    pub fn select_religion(&mut self, religion: impl Into<Pick<Religion>>) {
        self.apply(Action::SelectReligion {
            religion: religion.into(),
        });
    }

    /// Flip the completion mark of step `index`.
    pub fn toggle_step(&mut self, index: usize) {
        self.apply(Action::ToggleStep { index });
    }

    /// Clear selection, completion, and expanded details.
    pub fn reset_selection(&mut self) {
        self.apply(Action::ResetSelection);
    }

    /// Show the premium modal.
    pub fn open_premium(&mut self) {
        self.apply(Action::OpenPremium);
    }

    /// Dismiss the premium modal ("Not now").
    pub fn decline_premium(&mut self) {
        self.apply(Action::DeclinePremium);
    }

    /// Buy premium from the open modal.
    pub fn upgrade_premium(&mut self) -> Vec<Effect> {
        self.apply(Action::UpgradePremium)
    }

    /// Flip the detail panel of step `index`.
    pub fn toggle_premium_expanded(&mut self, index: usize) {
        self.apply(Action::TogglePremiumExpanded { index });
    }

    // ── Derived values ───────────────────────────────────────────────

    /// The checklist for the current selection, or empty.
    pub fn current_steps(&self) -> &'static [&'static str] {
        match (&self.selection.country, &self.selection.religion) {
            (Some(country), Some(religion)) => StepCatalog::builtin().lookup(country, religion),
            _ => &[],
        }
    }

    /// Completed and total step counts.
    ///
    /// Only indices inside the current checklist are counted.
    pub fn progress_summary(&self) -> Progress {
        let total = self.current_steps().len();
        Progress {
            completed: self.completed.range(..total).count(),
            total,
        }
    }

    /// Completion as a fraction in `[0, 1]`; `0.0` for an empty checklist.
    pub fn progress(&self) -> f64 {
        self.progress_summary().fraction()
    }

    /// Whether a non-empty checklist has every step marked done.
    pub fn is_complete(&self) -> bool {
        self.progress_summary().is_complete()
    }

    /// Whether step `index` is marked done.
    pub fn is_step_done(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    /// Snapshot of everything a rendering surface displays.
    pub fn view<'r>(&self, resolver: &'r DetailResolver) -> GuideView<'r> {
        GuideView::build(self, resolver)
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The running variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The completion set.
    pub fn completed(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    /// The premium state.
    pub fn premium(&self) -> &PremiumState {
        &self.premium
    }

    /// Every action received so far, in order. Grows by one record per
    /// `apply`, including actions that changed nothing.
    pub fn log(&self) -> &[ActionRecord] {
        &self.log
    }

    fn premium_enabled(&self) -> bool {
        self.variant == Variant::Extended
    }

    fn flip_completion(&mut self, index: usize) -> bool {
        if index >= self.current_steps().len() {
            return false;
        }
        if !self.completed.remove(&index) {
            self.completed.insert(index);
        }
        true
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::premium::PremiumModal;
    use proptest::prelude::*;

    fn uk_islam() -> GuideSession {
        let mut s = GuideSession::new(Variant::Extended);
        s.select_country(Country::Uk);
        s.select_religion(Religion::Islam);
        s
    }

    fn upgraded(mut s: GuideSession) -> GuideSession {
        s.open_premium();
        s.upgrade_premium();
        s
    }

    // ── Selection ────────────────────────────────────────────────────

    #[test]
    fn test_new_session_is_unset() {
        let s = GuideSession::default();
        assert!(s.selection().is_empty());
        assert!(s.completed().is_empty());
        assert!(s.current_steps().is_empty());
        assert!(!s.premium().active);
        assert_eq!(s.variant(), Variant::Extended);
    }

    #[test]
    fn test_country_alone_yields_no_steps() {
        let mut s = GuideSession::default();
        s.select_country(Country::Usa);
        assert!(s.current_steps().is_empty());
        assert!(!s.selection().is_complete());
    }

    #[test]
    fn test_selection_is_independent() {
        let mut s = uk_islam();
        s.toggle_step(1);
        s.select_country(Country::India);
        assert_eq!(
            s.selection().religion,
            Some(Pick::Listed(Religion::Islam))
        );
        assert!(s.is_step_done(1));
        assert_eq!(s.current_steps()[0], "Obtain medical certificate of cause of death");
    }

    #[test]
    fn test_unlisted_selection_yields_empty_steps() {
        let mut s = GuideSession::default();
        s.select_country("Atlantis");
        s.select_religion(Religion::Islam);
        assert!(s.selection().is_complete());
        assert_eq!(s.selection().listed_pair(), None);
        assert!(s.current_steps().is_empty());
        assert_eq!(s.progress(), 0.0);
        assert!(!s.is_complete());
    }

    #[test]
    fn test_names_must_match_labels_exactly() {
        let mut s = GuideSession::default();
        s.select_country("uk");
        s.select_religion(" islam ");
        assert!(s.selection().is_complete());
        assert_eq!(s.selection().listed_pair(), None);
        assert!(s.current_steps().is_empty());

        s.select_country("UK");
        s.select_religion("Islam");
        assert_eq!(s.current_steps().len(), 6);
    }

    #[test]
    fn test_blank_name_unsets_field() {
        let mut s = uk_islam();
        s.select_country("");
        s.select_religion("   ");
        assert!(s.selection().is_empty());
        assert!(s.current_steps().is_empty());
        assert!(s.log().iter().all(|r| r.applied));

        s.select_country(Country::Usa);
        s.select_religion("");
        assert!(!s.selection().is_complete());
        assert_eq!(s.selection().religion, None);
    }

    #[test]
    fn test_steps_follow_latest_selection() {
        let mut s = uk_islam();
        assert_eq!(s.current_steps()[2], "Perform Ghusl (ritual washing) through Muslim community");
        s.select_religion(Religion::Hinduism);
        assert_eq!(s.current_steps()[2], "Contact Hindu priest for final rites guidance");
    }

    // ── Completion ───────────────────────────────────────────────────

    #[test]
    fn test_toggle_twice_restores() {
        let mut s = uk_islam();
        s.toggle_step(0);
        assert!(s.is_step_done(0));
        s.toggle_step(0);
        assert!(s.completed().is_empty());
    }

    #[test]
    fn test_toggle_out_of_range_is_noop() {
        let mut s = uk_islam();
        s.toggle_step(6);
        s.toggle_step(usize::MAX);
        assert!(s.completed().is_empty());
        assert_eq!(s.log().len(), 4);
        assert!(!s.log()[2].applied);
        assert!(!s.log()[3].applied);
    }

    #[test]
    fn test_toggle_without_selection_is_noop() {
        let mut s = GuideSession::default();
        s.toggle_step(0);
        assert!(s.completed().is_empty());
    }

    #[test]
    fn test_all_done_is_complete() {
        let mut s = uk_islam();
        for i in 0..5 {
            s.toggle_step(i);
            assert!(!s.is_complete());
        }
        s.toggle_step(5);
        assert_eq!(s.progress(), 1.0);
        assert!(s.is_complete());
        assert_eq!(s.progress_summary().percent(), 100);
    }

    #[test]
    fn test_progress_ignores_out_of_catalog_marks() {
        let mut s = uk_islam();
        s.toggle_step(0);
        s.toggle_step(1);
        s.select_country("Atlantis");
        assert_eq!(s.completed().len(), 2);
        assert_eq!(s.progress_summary(), Progress { completed: 0, total: 0 });
    }

    // ── Reset ────────────────────────────────────────────────────────

    #[test]
    fn test_reset_clears_selection_and_completion() {
        let mut s = upgraded(uk_islam());
        s.toggle_step(0);
        s.toggle_premium_expanded(2);
        s.reset_selection();
        assert!(s.selection().is_empty());
        assert!(s.completed().is_empty());
        assert!(s.premium().expanded.is_empty());
        assert!(s.premium().active);
    }

    // ── Premium ──────────────────────────────────────────────────────

    #[test]
    fn test_upgrade_emits_acknowledgment_once() {
        let mut s = uk_islam();
        s.open_premium();
        assert_eq!(s.upgrade_premium(), vec![Effect::PurchaseAcknowledged]);
        assert!(s.premium().active);
        assert_eq!(s.premium().modal, PremiumModal::Closed);

        s.open_premium();
        assert!(s.upgrade_premium().is_empty());
    }

    #[test]
    fn test_upgrade_while_closed_is_noop() {
        let mut s = uk_islam();
        assert!(s.upgrade_premium().is_empty());
        assert!(!s.premium().active);
        assert!(!s.log().last().unwrap().applied);
    }

    #[test]
    fn test_decline_keeps_inactive() {
        let mut s = uk_islam();
        s.open_premium();
        s.decline_premium();
        assert!(!s.premium().active);
        assert_eq!(s.premium().modal, PremiumModal::Closed);
    }

    #[test]
    fn test_expand_requires_active_premium() {
        let mut s = uk_islam();
        s.toggle_premium_expanded(0);
        assert!(s.premium().expanded.is_empty());

        let mut s = upgraded(s);
        s.toggle_premium_expanded(0);
        assert!(s.premium().is_expanded(0));
    }

    #[test]
    fn test_basic_variant_ignores_premium() {
        let mut s = GuideSession::new(Variant::Basic);
        s.select_country(Country::Uk);
        s.select_religion(Religion::Islam);
        s.open_premium();
        assert_eq!(s.premium().modal, PremiumModal::Closed);
        assert!(s.upgrade_premium().is_empty());
        assert!(!s.premium().active);
    }

    // ── Log ──────────────────────────────────────────────────────────

    #[test]
    fn test_log_preserves_order() {
        let mut s = uk_islam();
        s.toggle_step(3);
        s.reset_selection();
        let names: Vec<_> = s.log().iter().map(|r| r.action.name()).collect();
        assert_eq!(
            names,
            ["select_country", "select_religion", "toggle_step", "reset_selection"]
        );
        for (i, record) in s.log().iter().enumerate() {
            assert_eq!(record.sequence, i as u64);
        }
    }

    #[test]
    fn test_log_records_noops() {
        let mut s = GuideSession::default();
        for _ in 0..50 {
            s.toggle_step(0);
        }
        assert_eq!(s.log().len(), 50);
        assert!(s.log().iter().all(|r| !r.applied));
    }

    #[test]
    fn test_variant_serde_names() {
        let basic: Variant = serde_json::from_str("\"basic\"").unwrap();
        assert_eq!(basic, Variant::Basic);
        assert_eq!(serde_json::to_string(&Variant::Extended).unwrap(), "\"extended\"");
        assert!(serde_json::from_str::<Variant>("\"premium\"").is_err());
    }

    #[test]
    fn test_session_serializes() {
        let s = uk_islam();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["selection"]["country"], "UK");
        assert_eq!(json["variant"], "extended");
        assert_eq!(json["log"].as_array().unwrap().len(), 2);
    }

    // ── Properties ───────────────────────────────────────────────────

    fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            prop::sample::select(vec!["USA", "India", "UK", "Atlantis"])
                .prop_map(|c| Action::SelectCountry { country: c.into() }),
            prop::sample::select(vec!["Christianity", "Islam", "Hinduism", "Jainism"])
                .prop_map(|r| Action::SelectReligion { religion: r.into() }),
            (0usize..8).prop_map(|index| Action::ToggleStep { index }),
            Just(Action::ResetSelection),
            Just(Action::OpenPremium),
            Just(Action::DeclinePremium),
            Just(Action::UpgradePremium),
            (0usize..8).prop_map(|index| Action::TogglePremiumExpanded { index }),
        ]
    }

    proptest! {
        /// Toggling the same index twice returns the completion set to its prior state.
        #[test]
        fn toggle_is_involution(
            actions in prop::collection::vec(arb_action(), 0..30),
            index in 0usize..8,
        ) {
            let mut s = GuideSession::default();
            for a in actions {
                s.apply(a);
            }
            let before = s.completed().clone();
            s.toggle_step(index);
            s.toggle_step(index);
            prop_assert_eq!(s.completed(), &before);
        }

        /// Reset always empties selection and completion and never deactivates premium.
        #[test]
        fn reset_always_clears(actions in prop::collection::vec(arb_action(), 0..30)) {
            let mut s = GuideSession::default();
            for a in actions {
                s.apply(a);
            }
            let was_active = s.premium().active;
            s.reset_selection();
            prop_assert!(s.selection().is_empty());
            prop_assert!(s.completed().is_empty());
            prop_assert!(s.premium().expanded.is_empty());
            prop_assert_eq!(s.premium().active, was_active);
        }

        /// Progress stays in [0, 1] and is_complete agrees with it.
        #[test]
        fn progress_bounded(actions in prop::collection::vec(arb_action(), 0..40)) {
            let mut s = GuideSession::default();
            for a in actions {
                s.apply(a);
                let p = s.progress();
                prop_assert!((0.0..=1.0).contains(&p));
                prop_assert_eq!(s.is_complete(), p == 1.0);
            }
        }

        /// Premium activation is never undone.
        #[test]
        fn premium_never_downgrades(actions in prop::collection::vec(arb_action(), 0..40)) {
            let mut s = GuideSession::default();
            let mut seen_active = false;
            for a in actions {
                s.apply(a);
                if seen_active {
                    prop_assert!(s.premium().active);
                }
                seen_active = s.premium().active;
            }
        }
    }
}
