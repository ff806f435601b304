//! # Step Detail Resolution
//!
//! Resolves the expanded "details" text shown for a step once premium is
//! active.
//!
//! ## Resolution Order
//!
//! ```text
//! (country, religion, index) in override table? ──yes──▶ Structured
//!                  │ no
//!                  ▼
//! first keyword rule whose keyword is a
//! case-insensitive substring of the text?      ──yes──▶ Keyword
//!                  │ no
//!                  ▼
//!              Fallback
//! ```
//!
//! Overrides are keyed by step position, not text, and fully replace the
//! keyword result for that step. Rules are evaluated in order; order is
//! part of the data.
//!
//! ## Data
//!
//! The resolver is built from a [`DetailDocument`], which is plain serde
//! data. The built-in document ships with the crate; an alternative can be
//! loaded from YAML with [`DetailResolver::from_yaml`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pwg_core::{Country, Religion};

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised while building a resolver from a document.
#[derive(Error, Debug)]
pub enum DetailRulesError {
    /// The YAML document could not be parsed.
    #[error("invalid detail rules document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A keyword rule has no usable keyword and could never match.
    #[error("keyword rule {index} has no keywords")]
    EmptyRule {
        /// Position of the rule in the document.
        index: usize,
    },

    /// Two overrides target the same step.
    #[error("duplicate override for {country}/{religion} step {step}")]
    DuplicateOverride {
        /// Country of the duplicated key.
        country: Country,
        /// Religion of the duplicated key.
        religion: Religion,
        /// Step index of the duplicated key.
        step: usize,
    },
}

// ─── Document Types ──────────────────────────────────────────────────

/// One keyword rule: matches when any keyword occurs in the step text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Keywords compared case-insensitively as substrings.
    pub keywords: Vec<String>,
    /// Detail text returned on match.
    pub detail: String,
}

/// A titled group of guidance points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailSection {
    /// Section heading.
    pub heading: String,
    /// Ordered guidance points.
    pub points: Vec<String>,
}

/// Multi-part guidance for a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDetail {
    /// Short summary line.
    pub title: String,
    /// Ordered sections.
    pub sections: Vec<DetailSection>,
}

/// A structured detail pinned to one step position of one checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailOverride {
    /// Country of the checklist.
    pub country: Country,
    /// Religion of the checklist.
    pub religion: Religion,
    /// 0-based step index.
    pub step: usize,
    /// Content that replaces keyword resolution for this step.
    pub detail: StructuredDetail,
}

/// Serializable source of a [`DetailResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailDocument {
    /// Keyword rules, highest priority first.
    #[serde(default)]
    pub rules: Vec<KeywordRule>,
    /// Position-keyed overrides.
    #[serde(default)]
    pub overrides: Vec<DetailOverride>,
    /// Text used when nothing else matches.
    pub fallback: String,
}

// ─── Resolved Detail ─────────────────────────────────────────────────

/// The outcome of resolving a step's detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Detail<'a> {
    /// A structured override pinned to this step.
    Structured(&'a StructuredDetail),
    /// The detail of the first matching keyword rule.
    Keyword(&'a str),
    /// No override and no rule matched.
    Fallback(&'a str),
}

impl Detail<'_> {
    /// Whether this detail came from the override table.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }
}

// ─── Resolver ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct CompiledRule {
    needles: Vec<String>,
    detail: String,
}

/// Resolves detail content for steps. Immutable once built.
#[derive(Debug, Clone)]
pub struct DetailResolver {
    rules: Vec<CompiledRule>,
    overrides: BTreeMap<(Country, Religion, usize), StructuredDetail>,
    fallback: String,
}

impl DetailResolver {
    /// The built-in resolver, constructed on first use.
    pub fn builtin() -> &'static DetailResolver {
        static RESOLVER: OnceLock<DetailResolver> = OnceLock::new();
        RESOLVER.get_or_init(|| {
            let doc = builtin_document();
            DetailResolver {
                rules: doc.rules.into_iter().map(compile_rule).collect(),
                overrides: doc
                    .overrides
                    .into_iter()
                    .map(|o| ((o.country, o.religion, o.step), o.detail))
                    .collect(),
                fallback: doc.fallback,
            }
        })
    }

    /// Build a resolver from a document, rejecting empty rules and
    /// duplicate override keys.
    pub fn from_document(doc: DetailDocument) -> Result<Self, DetailRulesError> {
        let mut rules = Vec::with_capacity(doc.rules.len());
        for (index, rule) in doc.rules.into_iter().enumerate() {
            let compiled = compile_rule(rule);
            if compiled.needles.is_empty() {
                return Err(DetailRulesError::EmptyRule { index });
            }
            rules.push(compiled);
        }

        let mut overrides = BTreeMap::new();
        for o in doc.overrides {
            let key = (o.country, o.religion, o.step);
            if overrides.insert(key, o.detail).is_some() {
                return Err(DetailRulesError::DuplicateOverride {
                    country: o.country,
                    religion: o.religion,
                    step: o.step,
                });
            }
        }

        Ok(Self {
            rules,
            overrides,
            fallback: doc.fallback,
        })
    }

    /// Parse and build a resolver from a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self, DetailRulesError> {
        let doc: DetailDocument = serde_yaml::from_str(source)?;
        Self::from_document(doc)
    }

    /// Resolve the detail for step `index` of the `(country, religion)`
    /// checklist, whose text is `text`.
    pub fn resolve(
        &self,
        country: Country,
        religion: Religion,
        index: usize,
        text: &str,
    ) -> Detail<'_> {
        if let Some(detail) = self.overrides.get(&(country, religion, index)) {
            return Detail::Structured(detail);
        }
        self.resolve_text(text)
    }

    /// Resolve by text alone, skipping the override table.
    pub fn resolve_text(&self, text: &str) -> Detail<'_> {
        let haystack = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.needles.iter().any(|n| haystack.contains(n.as_str())))
            .map(|rule| Detail::Keyword(rule.detail.as_str()))
            .unwrap_or(Detail::Fallback(self.fallback.as_str()))
    }

    /// Number of keyword rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Number of structured overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

fn compile_rule(rule: KeywordRule) -> CompiledRule {
    CompiledRule {
        needles: rule
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect(),
        detail: rule.detail,
    }
}

// ─── Built-in Content ────────────────────────────────────────────────

/// Detail text used when no rule matches.
pub const FALLBACK_DETAIL: &str = "Requirements for this step differ between local authorities. \
Ask the registrar, your funeral director or a community leader which documents to bring, \
and keep a copy of everything you hand over.";

fn rule(keywords: &[&str], detail: &str) -> KeywordRule {
    KeywordRule {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        detail: detail.to_string(),
    }
}

fn section(heading: &str, points: &[&str]) -> DetailSection {
    DetailSection {
        heading: heading.to_string(),
        points: points.iter().map(|p| p.to_string()).collect(),
    }
}

fn uk_islam(step: usize, title: &str, sections: Vec<DetailSection>) -> DetailOverride {
    DetailOverride {
        country: Country::Uk,
        religion: Religion::Islam,
        step,
        detail: StructuredDetail {
            title: title.to_string(),
            sections,
        },
    }
}

fn builtin_document() -> DetailDocument {
    DetailDocument {
        rules: vec![
            rule(
                &["death certificate", "medical certificate"],
                "The certificate is the document almost every later step asks for. \
                 Order several certified copies at once: banks, insurers, pension \
                 providers and courts usually each keep one.",
            ),
            rule(
                &["register", "registrar"],
                "Registration is a legal deadline. Bring the medical certificate, the \
                 deceased's identity documents and proof of address. The registrar \
                 issues the paperwork needed for burial or cremation.",
            ),
            rule(
                &["burial permit", "cremation permit", "burial or cremation"],
                "No burial or cremation can take place without the permit. Funeral \
                 directors normally collect it on your behalf once registration is done.",
            ),
            rule(
                &["ghusl", "janazah"],
                "Most mosques keep a list of trained volunteers for washing and \
                 shrouding and can schedule the funeral prayer. Tell them early if \
                 burial must happen within a day.",
            ),
            rule(
                &["funeral", "church", "priest"],
                "Agree dates with the officiant before confirming the venue. Ask for a \
                 written itemised quote and check whether any prepaid plan exists.",
            ),
            rule(
                &["cremation", "crematorium", "antyesti", "asthi", "last rites"],
                "Crematoria publish slot calendars and usually require two medical \
                 forms. Ask whether family members may attend the committal and \
                 collect the ashes for immersion.",
            ),
            rule(
                &["social security", "government departments", "notify", "inform"],
                "Notify benefit, pension and tax offices in one pass where a \
                 tell-once service exists. Note reference numbers for each call.",
            ),
            rule(
                &["insurance", "bank"],
                "Send each institution a certified copy of the death certificate \
                 and ask which accounts are frozen and what the claim form needs.",
            ),
            rule(
                &["tax", "irs"],
                "A final return covers income up to the date of death. Keep records \
                 of estate income separately; it may need its own return.",
            ),
            rule(
                &["probate", "estate", "succession", "inheritance", "heir", "property"],
                "Locate the will before dividing anything. Courts or registries issue \
                 the authority needed to access accounts and transfer property.",
            ),
            rule(
                &["mourning", "ceremon", "ritual"],
                "Set dates for observances with the family and the officiant, and tell \
                 employers in advance about any leave that will be needed.",
            ),
        ],
        overrides: vec![
            uk_islam(
                0,
                "Register the death within 5 days",
                vec![
                    section(
                        "What to do",
                        &[
                            "Book an urgent appointment with the register office for the district where the death occurred.",
                            "Ask the hospital or GP to send the medical certificate of cause of death electronically.",
                            "Explain that an Islamic burial is planned; many offices offer same-day slots.",
                        ],
                    ),
                    section(
                        "Bring",
                        &[
                            "Medical certificate of cause of death",
                            "Passport or birth certificate of the deceased",
                            "Proof of address and NHS number if available",
                        ],
                    ),
                    section(
                        "If a coroner is involved",
                        &["Registration waits for the coroner's release; ask the coroner's office about expedited review for religious reasons."],
                    ),
                ],
            ),
            uk_islam(
                1,
                "Certificate and certified copies",
                vec![
                    section(
                        "What to do",
                        &[
                            "Order certified copies at registration; they cost more if requested later.",
                            "Collect the green form (certificate for burial) at the same appointment.",
                        ],
                    ),
                    section(
                        "Who needs a copy",
                        &[
                            "Banks and building societies",
                            "Insurers and pension providers",
                            "The probate registry",
                        ],
                    ),
                ],
            ),
            uk_islam(
                2,
                "Ghusl through the Muslim community",
                vec![
                    section(
                        "What to do",
                        &[
                            "Contact the local mosque or Muslim funeral service to arrange washing and shrouding.",
                            "Family members of the same sex may take part if they wish.",
                        ],
                    ),
                    section(
                        "Practical points",
                        &[
                            "The body must be released by the hospital or coroner first.",
                            "Ask whether kafan (shroud) cloth is provided or should be purchased.",
                        ],
                    ),
                ],
            ),
            uk_islam(
                3,
                "Janazah prayer at the mosque",
                vec![
                    section(
                        "What to do",
                        &[
                            "Agree the prayer time with the imam, usually after one of the daily prayers.",
                            "Share the time with family and community promptly.",
                        ],
                    ),
                    section(
                        "Practical points",
                        &["Confirm transport from the mosque to the burial ground with the funeral service."],
                    ),
                ],
            ),
            uk_islam(
                4,
                "Burial permit and a prompt burial",
                vec![
                    section(
                        "What to do",
                        &[
                            "Hand the green form to the funeral director or cemetery office.",
                            "Request a plot in the Muslim section of the cemetery, facing the qibla.",
                        ],
                    ),
                    section(
                        "Timing",
                        &[
                            "Many councils offer weekend or out-of-hours burials for faith reasons; ask directly.",
                            "If repatriation abroad is planned, an out-of-England certificate from the coroner is required instead.",
                        ],
                    ),
                ],
            ),
            uk_islam(
                5,
                "Islamic inheritance distribution",
                vec![
                    section(
                        "What to do",
                        &[
                            "Settle funeral costs and debts before any distribution.",
                            "Apply for probate if the estate includes property or large balances.",
                        ],
                    ),
                    section(
                        "Islamic will and English law",
                        &[
                            "Fixed shares under Islamic law only bind if recorded in a valid will.",
                            "Without a will, English intestacy rules apply; heirs may agree a deed of variation afterwards.",
                        ],
                    ),
                ],
            ),
        ],
        fallback: FALLBACK_DETAIL.to_string(),
    }
}
