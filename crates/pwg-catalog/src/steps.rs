//! # Step Catalog
//!
//! The `(Country, Religion) → ordered steps` table.
//!
//! The table content lives in an exhaustive `match` so that adding a
//! `Country` or `Religion` variant is a compile error until its checklists
//! are written. The map itself is built once, on first access, and handed
//! out as `&'static StepCatalog`. There is no mutation path.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use pwg_core::{Country, Pick, Religion};

/// Number of steps in every published checklist.
pub const STEPS_PER_CHECKLIST: usize = 6;

/// Read-only mapping from a `(Country, Religion)` pair to its checklist.
#[derive(Debug)]
pub struct StepCatalog {
    entries: BTreeMap<(Country, Religion), Vec<&'static str>>,
}

impl StepCatalog {
    /// The built-in catalog, constructed on first use.
    pub fn builtin() -> &'static StepCatalog {
        static CATALOG: OnceLock<StepCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            let mut entries = BTreeMap::new();
            for &country in Country::all() {
                for &religion in Religion::all() {
                    entries.insert(
                        (country, religion),
                        builtin_steps(country, religion).to_vec(),
                    );
                }
            }
            StepCatalog { entries }
        })
    }

    /// The checklist for an enumerated pair.
    pub fn steps(&self, country: Country, religion: Religion) -> &[&'static str] {
        self.entries
            .get(&(country, religion))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The checklist for a user selection.
    ///
    /// Returns an empty slice when either pick is unlisted.
    pub fn lookup(&self, country: &Pick<Country>, religion: &Pick<Religion>) -> &[&'static str] {
        match (country.listed(), religion.listed()) {
            (Some(c), Some(r)) => self.steps(c, r),
            _ => &[],
        }
    }

    /// The checklist for raw names. Unknown names yield an empty slice.
    pub fn lookup_names(&self, country: &str, religion: &str) -> &[&'static str] {
        self.lookup(&Pick::from_name(country), &Pick::from_name(religion))
    }

    /// All keyed pairs with their step counts, in catalog order.
    pub fn pairs(&self) -> impl Iterator<Item = (Country, Religion, usize)> + '_ {
        self.entries
            .iter()
            .map(|(&(country, religion), steps)| (country, religion, steps.len()))
    }

    /// Number of checklists in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no checklists.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn builtin_steps(country: Country, religion: Religion) -> [&'static str; STEPS_PER_CHECKLIST] {
    match (country, religion) {
        (Country::Usa, Religion::Christianity) => [
            "Obtain death certificate from attending physician or coroner",
            "Contact funeral home to arrange services",
            "Notify Social Security Administration",
            "Arrange burial permit through local authorities",
            "Contact insurance companies and banks",
            "File final tax return with IRS",
        ],
        (Country::Usa, Religion::Islam) => [
            "Obtain death certificate from attending physician or coroner",
            "Perform Ghusl (ritual washing) through Muslim community",
            "Arrange Janazah prayer at mosque",
            "Obtain burial permit for burial within 24 hours",
            "Contact Islamic funeral services",
            "Notify community and arrange for funeral prayers",
        ],
        (Country::Usa, Religion::Hinduism) => [
            "Obtain death certificate from attending physician or coroner",
            "Inform priest and extended family members",
            "Perform Antyesti rites according to tradition",
            "Arrange cremation through authorized facility",
            "Complete 13-day mourning period rituals",
            "Handle estate and legal documentation",
        ],
        (Country::India, Religion::Christianity) => [
            "Obtain medical certificate of cause of death",
            "Inform local registrar within 21 days",
            "Register death with municipal corporation",
            "Contact church for funeral arrangements",
            "Arrange burial permit through local authorities",
            "Complete succession certificate if needed",
        ],
        (Country::India, Religion::Islam) => [
            "Obtain medical certificate of cause of death",
            "Register death with local authorities within 21 days",
            "Perform Ghusl (ritual washing)",
            "Arrange Janazah prayer at local mosque",
            "Obtain burial permit for immediate burial",
            "Complete legal heir certificate process",
        ],
        (Country::India, Religion::Hinduism) => [
            "Obtain medical certificate of cause of death",
            "Register death with registrar within 21 days",
            "Inform priest and perform last rites",
            "Arrange cremation at designated crematorium",
            "Complete Asthi Visarjan (ash immersion) ceremony",
            "Handle succession and property transfer documents",
        ],
        (Country::Uk, Religion::Christianity) => [
            "Register death with local registrar within 5 days",
            "Obtain death certificate and certified copies",
            "Contact church for funeral service arrangements",
            "Arrange burial or cremation permit",
            "Notify relevant government departments",
            "Handle probate and estate administration",
        ],
        (Country::Uk, Religion::Islam) => [
            "Register death with local registrar within 5 days",
            "Obtain death certificate and certified copies",
            "Perform Ghusl (ritual washing) through Muslim community",
            "Arrange Janazah prayer at mosque",
            "Obtain burial permit and arrange burial quickly",
            "Complete Islamic inheritance distribution",
        ],
        (Country::Uk, Religion::Hinduism) => [
            "Register death with local registrar within 5 days",
            "Obtain death certificate and certified copies",
            "Contact Hindu priest for final rites guidance",
            "Arrange cremation at authorized crematorium",
            "Perform traditional ceremonies and rituals",
            "Handle legal documentation and estate matters",
        ],
    }
}
