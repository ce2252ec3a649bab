use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JidPart {
    Localpart,
    Domain,
    Resource,
}

impl fmt::Display for JidPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JidPart::Localpart => "localpart",
            JidPart::Domain => "domain",
            JidPart::Resource => "resource",
        };
        f.write_str(label)
    }
}

/// Structural failures: the address cannot be split into a usable shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("address cannot be empty")]
    Empty,
    #[error("address has no domain")]
    MissingDomain,
    #[error("invalid localpart: {0}")]
    InvalidLocalpart(String),
    #[error("invalid domain: {0}")]
    InvalidDomain(String),
}

/// A part could be split out but was rejected by the active stringprep profile.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("{part} is too long: {len} bytes")]
    TooLong { part: JidPart, len: usize },
    #[error("{part} contains prohibited character {ch:?}")]
    ProhibitedChar { part: JidPart, ch: char },
    #[error("domain has an empty label: {domain}")]
    EmptyLabel { domain: String },
    #[error("{part} rejected: {reason}")]
    Rejected { part: JidPart, reason: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JidError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

pub type Result<T> = std::result::Result<T, JidError>;

impl ParseError {
    /// The input named no address at all, as opposed to a malformed one.
    pub fn is_absent(&self) -> bool {
        matches!(self, ParseError::Empty | ParseError::MissingDomain)
    }
}

impl JidError {
    pub fn is_absent(&self) -> bool {
        matches!(self, JidError::Parse(err) if err.is_absent())
    }
}
