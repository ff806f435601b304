//! # Countries and Religions: The Catalog Key Space
//!
//! Defines the two closed vocabularies that key the step catalog, plus
//! [`Pick`], the value a user actually selects.
//!
//! ## Lenient Selection
//!
//! The catalog is keyed by `(Country, Religion)`, but a selection is a free
//! user choice. A name outside the enumeration is kept as
//! [`Pick::Unlisted`] rather than rejected. Catalog lookups on an unlisted
//! pick degrade to an empty checklist.
//!
//! Selection matches labels exactly: `"uk"` is an unlisted name, not
//! `Country::Uk`. A blank name is no choice at all, see [`Pick::is_blank`].
//!
//! Forgiving parsing is available through `FromStr` (ASCII case-insensitive,
//! trimmed) for callers that want an error instead, such as command-line
//! flags validated up front.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GuideError;

/// A closed vocabulary whose values are identified by a display label.
pub trait Label: Copy + 'static {
    /// Every value, in display order.
    fn all() -> &'static [Self];

    /// The display label.
    fn label(&self) -> &'static str;
}

/// Countries with a published checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Country {
    /// United States of America.
    #[serde(rename = "USA")]
    Usa,
    /// India.
    #[serde(rename = "India")]
    India,
    /// United Kingdom.
    #[serde(rename = "UK")]
    Uk,
}

/// Total number of countries. Used for compile-time assertions.
pub const COUNTRY_COUNT: usize = 3;

impl Country {
    /// All countries in display order.
    pub fn all() -> &'static [Country] {
        &[Self::Usa, Self::India, Self::Uk]
    }

    /// The display label, which is also the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usa => "USA",
            Self::India => "India",
            Self::Uk => "UK",
        }
    }
}

impl Label for Country {
    fn all() -> &'static [Self] {
        Country::all()
    }

    fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = GuideError;

    /// Parse a country from its label, ignoring ASCII case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| GuideError::UnknownCountry(s.to_string()))
    }
}

/// Religious traditions with a published checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Religion {
    /// Christianity.
    Christianity,
    /// Islam.
    Islam,
    /// Hinduism.
    Hinduism,
}

/// Total number of religions. Used for compile-time assertions.
pub const RELIGION_COUNT: usize = 3;

impl Religion {
    /// All religions in display order.
    pub fn all() -> &'static [Religion] {
        &[Self::Christianity, Self::Islam, Self::Hinduism]
    }

    /// The display label, which is also the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Christianity => "Christianity",
            Self::Islam => "Islam",
            Self::Hinduism => "Hinduism",
        }
    }
}

impl Label for Religion {
    fn all() -> &'static [Self] {
        Religion::all()
    }

    fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for Religion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Religion {
    type Err = GuideError;

    /// Parse a religion from its label, ignoring ASCII case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| GuideError::UnknownReligion(s.to_string()))
    }
}

// ─── Pick ────────────────────────────────────────────────────────────

/// A selected value: either one of the enumerated values, or a free-text
/// name that is outside the enumeration.
///
/// Serializes as a bare string. Deserialization tries the enumerated labels
/// first and falls back to `Unlisted`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pick<T> {
    /// An enumerated value.
    Listed(T),
    /// A name that matches nothing in the enumeration.
    Unlisted(String),
}

impl<T: Label> Pick<T> {
    /// Resolve a user-supplied name. Only an exact label is listed; any
    /// other name is kept verbatim as `Unlisted`.
    pub fn from_name(name: &str) -> Self {
        T::all()
            .iter()
            .copied()
            .find(|value| value.label() == name)
            .map_or_else(|| Self::Unlisted(name.to_string()), Self::Listed)
    }
}

impl<T: Copy> Pick<T> {
    /// The enumerated value, if this pick is listed.
    pub fn listed(&self) -> Option<T> {
        match self {
            Self::Listed(value) => Some(*value),
            Self::Unlisted(_) => None,
        }
    }
}

impl<T> Pick<T> {
    /// Whether this pick is one of the enumerated values.
    pub fn is_listed(&self) -> bool {
        matches!(self, Self::Listed(_))
    }

    /// Whether this pick is an empty or whitespace-only name, which stands
    /// for "nothing chosen".
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Listed(_) => false,
            Self::Unlisted(name) => name.trim().is_empty(),
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Pick<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listed(value) => value.fmt(f),
            Self::Unlisted(name) => f.write_str(name),
        }
    }
}

impl From<Country> for Pick<Country> {
    fn from(value: Country) -> Self {
        Self::Listed(value)
    }
}

impl From<&str> for Pick<Country> {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<Religion> for Pick<Religion> {
    fn from(value: Religion) -> Self {
        Self::Listed(value)
    }
}

impl From<&str> for Pick<Religion> {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}
