//! # Derived View
//!
//! A read-only snapshot of what a rendering surface shows for a session.
//! Rebuilt from scratch on every call; nothing is cached.

use serde::Serialize;

use pwg_catalog::{Detail, DetailResolver};
use pwg_core::SessionId;

use crate::premium::PremiumModal;
use crate::progress::Progress;
use crate::session::{GuideSession, Variant};

/// One checklist row.
#[derive(Debug, Clone, Serialize)]
pub struct StepRow<'r> {
    /// 0-based position.
    pub index: usize,
    /// 1-based label ("Step 1").
    pub number: usize,
    /// Instruction text.
    pub text: &'static str,
    /// Whether the step is marked done.
    pub done: bool,
    /// Whether the detail panel is open.
    pub expanded: bool,
    /// Resolved detail, present only while expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Detail<'r>>,
}

/// Everything needed to draw the guide for one session.
#[derive(Debug, Clone, Serialize)]
pub struct GuideView<'r> {
    /// Session being displayed.
    pub session: SessionId,
    /// Running variant.
    pub variant: Variant,
    /// Country label, if chosen.
    pub country: Option<String>,
    /// Religion label, if chosen.
    pub religion: Option<String>,
    /// Whether the country/religion picker is shown (either is unset).
    pub show_picker: bool,
    /// Rows of the current checklist.
    pub steps: Vec<StepRow<'r>>,
    /// Progress of the current checklist.
    pub progress: Progress,
    /// Whether the completion banner is shown.
    pub complete: bool,
    /// Whether premium is active.
    pub premium_active: bool,
    /// Whether the premium modal is showing.
    pub premium_modal_open: bool,
}

impl<'r> GuideView<'r> {
    pub(crate) fn build(session: &GuideSession, resolver: &'r DetailResolver) -> Self {
        let selection = session.selection();
        let premium = session.premium();
        let pair = selection.listed_pair();

        let steps = session
            .current_steps()
            .iter()
            .enumerate()
            .map(|(index, &text)| {
                let expanded = premium.is_expanded(index);
                let detail = match (expanded, pair) {
                    (true, Some((country, religion))) => {
                        Some(resolver.resolve(country, religion, index, text))
                    }
                    _ => None,
                };
                StepRow {
                    index,
                    number: index + 1,
                    text,
                    done: session.is_step_done(index),
                    expanded,
                    detail,
                }
            })
            .collect();

        let progress = session.progress_summary();
        Self {
            session: session.id(),
            variant: session.variant(),
            country: selection.country.as_ref().map(ToString::to_string),
            religion: selection.religion.as_ref().map(ToString::to_string),
            show_picker: !selection.is_complete(),
            steps,
            progress,
            complete: progress.is_complete(),
            premium_active: premium.active,
            premium_modal_open: premium.modal == PremiumModal::Open,
        }
    }

    /// Whether there is a checklist to show.
    pub fn has_steps(&self) -> bool {
        !self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwg_core::{Country, Religion};

    fn resolver() -> &'static DetailResolver {
        DetailResolver::builtin()
    }

    #[test]
    fn test_initial_view_shows_picker() {
        let s = GuideSession::default();
        let v = s.view(resolver());
        assert!(v.show_picker);
        assert!(!v.has_steps());
        assert_eq!(v.country, None);
        assert!(!v.complete);
    }

    #[test]
    fn test_view_rows() {
        let mut s = GuideSession::default();
        s.select_country(Country::Usa);
        s.select_religion(Religion::Hinduism);
        s.toggle_step(4);
        let v = s.view(resolver());
        assert!(!v.show_picker);
        assert_eq!(v.country.as_deref(), Some("USA"));
        assert_eq!(v.steps.len(), 6);
        assert_eq!(v.steps[4].number, 5);
        assert!(v.steps[4].done);
        assert!(!v.steps[3].done);
        assert_eq!(v.progress, Progress { completed: 1, total: 6 });
    }

    #[test]
    fn test_detail_only_when_expanded() {
        let mut s = GuideSession::default();
        s.select_country(Country::Uk);
        s.select_religion(Religion::Islam);
        s.open_premium();
        s.upgrade_premium();
        s.toggle_premium_expanded(0);

        let v = s.view(resolver());
        assert!(v.premium_active);
        assert!(v.steps[0].expanded);
        assert!(v.steps[0].detail.is_some_and(|d| d.is_structured()));
        assert!(v.steps[1].detail.is_none());
    }

    #[test]
    fn test_modal_flag() {
        let mut s = GuideSession::default();
        s.open_premium();
        assert!(s.view(resolver()).premium_modal_open);
        s.decline_premium();
        assert!(!s.view(resolver()).premium_modal_open);
    }

    #[test]
    fn test_view_serializes_without_empty_detail() {
        let mut s = GuideSession::default();
        s.select_country(Country::India);
        s.select_religion(Religion::Christianity);
        let json = serde_json::to_value(s.view(resolver())).unwrap();
        assert_eq!(json["steps"][0]["number"], 1);
        assert!(json["steps"][0].get("detail").is_none());
    }
}
