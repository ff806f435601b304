//! # Actions, Effects, and the Action Log
//!
//! Every user interaction is an [`Action`]. Applying an action may produce
//! [`Effect`]s that the rendering surface must carry out; the state machine
//! itself never performs I/O.

use serde::{Deserialize, Serialize};

use pwg_core::{Country, Pick, Religion, Timestamp};

/// A single user interaction with the guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Choose a country. Leaves religion and completion untouched.
    SelectCountry {
        /// The chosen country (listed or not).
        country: Pick<Country>,
    },
    /// Choose a religion. Leaves country and completion untouched.
    SelectReligion {
        /// The chosen religion (listed or not).
        religion: Pick<Religion>,
    },
    /// Flip the completion mark of a step.
    ToggleStep {
        /// 0-based step index.
        index: usize,
    },
    /// Clear selection, completion, and expansions. Premium stays active.
    ResetSelection,
    /// Show the premium modal.
    OpenPremium,
    /// Dismiss the premium modal without buying ("Not now").
    DeclinePremium,
    /// Buy premium from the open modal.
    UpgradePremium,
    /// Flip the detail expansion of a step. Requires active premium.
    TogglePremiumExpanded {
        /// 0-based step index.
        index: usize,
    },
}

impl Action {
    /// Short stable name, used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectCountry { .. } => "select_country",
            Self::SelectReligion { .. } => "select_religion",
            Self::ToggleStep { .. } => "toggle_step",
            Self::ResetSelection => "reset_selection",
            Self::OpenPremium => "open_premium",
            Self::DeclinePremium => "decline_premium",
            Self::UpgradePremium => "upgrade_premium",
            Self::TogglePremiumExpanded { .. } => "toggle_premium_expanded",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelectCountry { country } => write!(f, "select_country({country})"),
            Self::SelectReligion { religion } => write!(f, "select_religion({religion})"),
            Self::ToggleStep { index } => write!(f, "toggle_step({index})"),
            Self::TogglePremiumExpanded { index } => {
                write!(f, "toggle_premium_expanded({index})")
            }
            other => f.write_str(other.name()),
        }
    }
}

/// A side effect the rendering surface must perform after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Show the one-time "thank you for upgrading" acknowledgment.
    PurchaseAcknowledged,
}

/// One entry of a session's action log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Position in the log, starting at 0.
    pub sequence: u64,
    /// The action as received.
    pub action: Action,
    /// Whether the action changed any state.
    pub applied: bool,
    /// When the action was applied.
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serialization_shape() {
        let action = Action::SelectCountry {
            country: Country::Uk.into(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"action": "select_country", "country": "UK"})
        );

        let json = serde_json::to_value(Action::ResetSelection).unwrap();
        assert_eq!(json, serde_json::json!({"action": "reset_selection"}));
    }

    #[test]
    fn test_action_deserializes_unlisted_pick() {
        let action: Action =
            serde_json::from_str(r#"{"action":"select_religion","religion":"Jainism"}"#).unwrap();
        assert_eq!(
            action,
            Action::SelectReligion {
                religion: Pick::Unlisted("Jainism".to_string())
            }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::ToggleStep { index: 2 }.to_string(), "toggle_step(2)");
        assert_eq!(Action::UpgradePremium.to_string(), "upgrade_premium");
        assert_eq!(
            Action::SelectCountry {
                country: "Atlantis".into()
            }
            .to_string(),
            "select_country(Atlantis)"
        );
    }
}
