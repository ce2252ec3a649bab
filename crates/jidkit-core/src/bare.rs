use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::parser::parse_jid;
use crate::prep::Stringprep;

const DELIMITERS: &[char] = &['@', '/'];

/// `localpart@domain`, or a bare domain.
///
/// Values are immutable once built and carry their canonical string. Equality
/// and hashing look at the normalized parts; ordering compares canonical
/// strings. Parts never contain address delimiters, so both agree and the
/// canonical string always parses back to an equal value.
///
/// Serde uses the canonical string and deserializes through the trusted
/// constructor: stored addresses are expected to be normalized already.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BareJid {
    localpart: Option<String>,
    domain: String,
    repr: String,
}

impl BareJid {
    /// Builds an address from separate parts, running both through `prep`.
    pub fn new(prep: &dyn Stringprep, localpart: Option<&str>, domain: &str) -> Result<Self> {
        if domain.is_empty() {
            return Err(ParseError::MissingDomain.into());
        }

        let localpart = match localpart.filter(|value| !value.is_empty()) {
            Some(raw) => Some(prep.normalize_localpart(raw)?),
            None => None,
        };
        let domain = prep.normalize_domain(domain)?;

        Ok(Self::assemble(localpart.as_deref(), &domain)?)
    }

    /// Builds an address from parts that are already normalized.
    pub fn new_trusted(
        localpart: Option<&str>,
        domain: &str,
    ) -> std::result::Result<Self, ParseError> {
        Self::assemble(localpart, domain)
    }

    /// Parses and normalizes `raw`. A resource, if present, is dropped.
    pub fn parse(prep: &dyn Stringprep, raw: &str) -> Result<Self> {
        let parts = parse_jid(raw)?;
        Self::new(prep, parts.localpart, parts.domain)
    }

    pub fn parse_trusted(raw: &str) -> std::result::Result<Self, ParseError> {
        let parts = parse_jid(raw)?;
        Self::assemble(parts.localpart, parts.domain)
    }

    /// Like [`BareJid::parse`], but input naming no address gives `Ok(None)`.
    pub fn parse_opt(prep: &dyn Stringprep, raw: Option<&str>) -> Result<Option<Self>> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        match Self::parse(prep, raw) {
            Ok(jid) => Ok(Some(jid)),
            Err(err) if err.is_absent() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn parse_trusted_opt(raw: Option<&str>) -> std::result::Result<Option<Self>, ParseError> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        match Self::parse_trusted(raw) {
            Ok(jid) => Ok(Some(jid)),
            Err(err) if err.is_absent() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn localpart(&self) -> Option<&str> {
        self.localpart.as_deref()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn as_str(&self) -> &str {
        &self.repr
    }

    fn assemble(localpart: Option<&str>, domain: &str) -> std::result::Result<Self, ParseError> {
        let localpart = localpart.filter(|value| !value.is_empty());

        if domain.is_empty() {
            return Err(ParseError::MissingDomain);
        }
        if domain.contains(DELIMITERS) {
            return Err(ParseError::InvalidDomain(domain.to_string()));
        }
        if let Some(localpart) = localpart {
            if localpart.contains(DELIMITERS) {
                return Err(ParseError::InvalidLocalpart(localpart.to_string()));
            }
        }

        let repr = match localpart {
            Some(localpart) => format!("{localpart}@{domain}"),
            None => domain.to_string(),
        };

        Ok(Self {
            localpart: localpart.map(str::to_string),
            domain: domain.to_string(),
            repr,
        })
    }
}

impl PartialEq for BareJid {
    fn eq(&self, other: &Self) -> bool {
        self.localpart == other.localpart && self.domain == other.domain
    }
}

impl Eq for BareJid {}

impl Hash for BareJid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.localpart.hash(state);
        self.domain.hash(state);
    }
}

impl PartialOrd for BareJid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BareJid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.repr.cmp(&other.repr)
    }
}

impl fmt::Display for BareJid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl AsRef<str> for BareJid {
    fn as_ref(&self) -> &str {
        &self.repr
    }
}

impl TryFrom<String> for BareJid {
    type Error = ParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse_trusted(&value)
    }
}

impl From<BareJid> for String {
    fn from(value: BareJid) -> Self {
        value.repr
    }
}
