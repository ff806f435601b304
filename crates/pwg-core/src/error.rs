//! # Error Types
//!
//! The guide's state machine itself cannot fail. The only library-level
//! error is strict parsing of a country or religion name.

use thiserror::Error;

/// Top-level error type for the paperwork guide.
#[derive(Error, Debug)]
pub enum GuideError {
    /// A country name did not match any enumerated country.
    #[error("unknown country: {0:?}")]
    UnknownCountry(String),

    /// A religion name did not match any enumerated religion.
    #[error("unknown religion: {0:?}")]
    UnknownReligion(String),
}
