use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bare::BareJid;
use crate::error::{NormalizationError, ParseError, Result};
use crate::parser::parse_jid;
use crate::prep::Stringprep;

/// A bare address with an optional resource.
///
/// The bare part is shared: copies made with [`Jid::with_resource`] or
/// [`Jid::without_resource`] point at the same [`BareJid`]. Comparison follows
/// the canonical string, exactly as `a.as_str().cmp(b.as_str())` would.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Jid {
    bare: Arc<BareJid>,
    resource: Option<String>,
    repr: String,
}

impl Jid {
    pub fn from_bare(bare: impl Into<Arc<BareJid>>) -> Self {
        Self::assemble(bare.into(), None)
    }

    /// Attaches `resource` to `bare` after running it through `prep`.
    pub fn with_bare(
        prep: &dyn Stringprep,
        bare: impl Into<Arc<BareJid>>,
        resource: Option<&str>,
    ) -> std::result::Result<Self, NormalizationError> {
        let resource = match resource.filter(|value| !value.is_empty()) {
            Some(raw) => Some(prep.normalize_resource(raw)?),
            None => None,
        };
        Ok(Self::assemble(bare.into(), resource.as_deref()))
    }

    pub fn with_bare_trusted(bare: impl Into<Arc<BareJid>>, resource: Option<&str>) -> Self {
        Self::assemble(bare.into(), resource)
    }

    pub fn new(
        prep: &dyn Stringprep,
        localpart: Option<&str>,
        domain: &str,
        resource: Option<&str>,
    ) -> Result<Self> {
        let bare = BareJid::new(prep, localpart, domain)?;
        Ok(Self::with_bare(prep, bare, resource)?)
    }

    pub fn new_trusted(
        localpart: Option<&str>,
        domain: &str,
        resource: Option<&str>,
    ) -> std::result::Result<Self, ParseError> {
        let bare = BareJid::new_trusted(localpart, domain)?;
        Ok(Self::with_bare_trusted(bare, resource))
    }

    /// Parses `raw` and normalizes all three parts.
    pub fn parse(prep: &dyn Stringprep, raw: &str) -> Result<Self> {
        let parts = parse_jid(raw)?;
        Self::new(prep, parts.localpart, parts.domain, parts.resource)
    }

    pub fn parse_trusted(raw: &str) -> std::result::Result<Self, ParseError> {
        let parts = parse_jid(raw)?;
        Self::new_trusted(parts.localpart, parts.domain, parts.resource)
    }

    /// Like [`Jid::parse`], but input naming no address gives `Ok(None)`.
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

    /// Returns a copy carrying `resource` instead of the current one.
    /// An empty resource clears it.
    pub fn with_resource(
        &self,
        prep: &dyn Stringprep,
        resource: &str,
    ) -> std::result::Result<Self, NormalizationError> {
        Self::with_bare(prep, Arc::clone(&self.bare), Some(resource))
    }

    pub fn with_resource_trusted(&self, resource: &str) -> Self {
        Self::assemble(Arc::clone(&self.bare), Some(resource))
    }

    pub fn without_resource(&self) -> Self {
        Self::assemble(Arc::clone(&self.bare), None)
    }

    pub fn has_resource(&self) -> bool {
        self.resource.is_some()
    }

    pub fn bare_jid(&self) -> &Arc<BareJid> {
        &self.bare
    }

    pub fn to_bare(&self) -> BareJid {
        BareJid::clone(&self.bare)
    }

    pub fn localpart(&self) -> Option<&str> {
        self.bare.localpart()
    }

    pub fn domain(&self) -> &str {
        self.bare.domain()
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    pub fn as_str(&self) -> &str {
        &self.repr
    }

    fn assemble(bare: Arc<BareJid>, resource: Option<&str>) -> Self {
        let resource = resource.filter(|value| !value.is_empty());
        let repr = match resource {
            Some(resource) => format!("{}/{resource}", bare.as_str()),
            None => bare.as_str().to_string(),
        };
        Self {
            bare,
            resource: resource.map(str::to_string),
            repr,
        }
    }
}

impl PartialEq for Jid {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.bare, &other.bare) || self.bare == other.bare)
            && self.resource == other.resource
    }
}

impl Eq for Jid {}

impl Hash for Jid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bare.hash(state);
        self.resource.hash(state);
    }
}

impl PartialOrd for Jid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Jid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.repr.cmp(&other.repr)
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl AsRef<str> for Jid {
    fn as_ref(&self) -> &str {
        &self.repr
    }
}

impl From<BareJid> for Jid {
    fn from(value: BareJid) -> Self {
        Self::from_bare(value)
    }
}

impl From<Arc<BareJid>> for Jid {
    fn from(value: Arc<BareJid>) -> Self {
        Self::from_bare(value)
    }
}

impl TryFrom<String> for Jid {
    type Error = ParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse_trusted(&value)
    }
}

impl From<Jid> for String {
    fn from(value: Jid) -> Self {
        value.repr
    }
}
