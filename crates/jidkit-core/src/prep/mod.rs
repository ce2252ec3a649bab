//! Stringprep strategies applied to each address part.
//!
//! A process picks one strategy at startup, wraps it in a [`JidPrep`] handle and
//! passes that handle to every strict address constructor. Strategies are
//! shared across threads and must not keep unsynchronized mutable state.

mod basic;
mod noop;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::NormalizationError;

pub use basic::BasicPrep;
pub use noop::NoopPrep;

pub trait Stringprep: Send + Sync + fmt::Debug {
    /// Short profile name used in log events.
    fn name(&self) -> &'static str;

    fn normalize_localpart<'a>(&self, localpart: &'a str)
        -> Result<Cow<'a, str>, NormalizationError>;

    fn normalize_domain<'a>(&self, domain: &'a str) -> Result<Cow<'a, str>, NormalizationError>;

    fn normalize_resource<'a>(&self, resource: &'a str)
        -> Result<Cow<'a, str>, NormalizationError>;
}

/// Cloneable handle to the strategy chosen for this process.
#[derive(Clone)]
pub struct JidPrep {
    inner: Arc<dyn Stringprep>,
}

impl JidPrep {
    pub fn new<P: Stringprep + 'static>(prep: P) -> Self {
        Self {
            inner: Arc::new(prep),
        }
    }

    pub fn noop() -> Self {
        Self::new(NoopPrep)
    }

    pub fn basic() -> Self {
        Self::new(BasicPrep)
    }
}

impl fmt::Debug for JidPrep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl Stringprep for JidPrep {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn normalize_localpart<'a>(
        &self,
        localpart: &'a str,
    ) -> Result<Cow<'a, str>, NormalizationError> {
        self.inner.normalize_localpart(localpart)
    }

    fn normalize_domain<'a>(&self, domain: &'a str) -> Result<Cow<'a, str>, NormalizationError> {
        self.inner.normalize_domain(domain)
    }

    fn normalize_resource<'a>(
        &self,
        resource: &'a str,
    ) -> Result<Cow<'a, str>, NormalizationError> {
        self.inner.normalize_resource(resource)
    }
}

/// Built-in strategies selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrepProfile {
    #[serde(alias = "noop")]
    Empty,
    Basic,
}

impl PrepProfile {
    pub fn build(self) -> JidPrep {
        match self {
            PrepProfile::Empty => JidPrep::noop(),
            PrepProfile::Basic => JidPrep::basic(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrepProfile::Empty => "empty",
            PrepProfile::Basic => "basic",
        }
    }
}

impl fmt::Display for PrepProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown stringprep profile: {0}")]
pub struct UnknownProfile(pub String);

impl FromStr for PrepProfile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" | "noop" => Ok(PrepProfile::Empty),
            "basic" => Ok(PrepProfile::Basic),
            _ => Err(UnknownProfile(s.to_string())),
        }
    }
}

/// Strategy that empties every part it is given.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct BlankPrep;

#[cfg(test)]
impl Stringprep for BlankPrep {
    fn name(&self) -> &'static str {
        "blank"
    }

    fn normalize_localpart<'a>(
        &self,
        _localpart: &'a str,
    ) -> Result<Cow<'a, str>, NormalizationError> {
        Ok(Cow::Borrowed(""))
    }

    fn normalize_domain<'a>(&self, _domain: &'a str) -> Result<Cow<'a, str>, NormalizationError> {
        Ok(Cow::Borrowed(""))
    }

    fn normalize_resource<'a>(
        &self,
        _resource: &'a str,
    ) -> Result<Cow<'a, str>, NormalizationError> {
        Ok(Cow::Borrowed(""))
    }
}

#[cfg(test)]
mod tests {
    use super::{JidPrep, PrepProfile, Stringprep, UnknownProfile};
    use crate::error::{JidPart, NormalizationError};
    use std::borrow::Cow;

    #[derive(Debug)]
    struct RejectAll;

    impl Stringprep for RejectAll {
        fn name(&self) -> &'static str {
            "reject-all"
        }

        fn normalize_localpart<'a>(
            &self,
            _localpart: &'a str,
        ) -> Result<Cow<'a, str>, NormalizationError> {
            Err(NormalizationError::Rejected {
                part: JidPart::Localpart,
                reason: "closed".to_string(),
            })
        }

        fn normalize_domain<'a>(
            &self,
            domain: &'a str,
        ) -> Result<Cow<'a, str>, NormalizationError> {
            Ok(Cow::Borrowed(domain))
        }

        fn normalize_resource<'a>(
            &self,
            resource: &'a str,
        ) -> Result<Cow<'a, str>, NormalizationError> {
            Ok(Cow::Borrowed(resource))
        }
    }

    #[test]
    fn handle_delegates_to_custom_strategy() {
        let prep = JidPrep::new(RejectAll);
        let err = prep.normalize_localpart("alice").unwrap_err();
        assert!(matches!(err, NormalizationError::Rejected { .. }));
        assert_eq!(prep.normalize_domain("Example.com").unwrap(), "Example.com");
        assert_eq!(format!("{prep:?}"), "RejectAll");
        assert_eq!(prep.name(), "reject-all");
    }

    #[test]
    fn profile_builds_matching_strategy() {
        let empty = PrepProfile::Empty.build();
        assert_eq!(empty.name(), PrepProfile::Empty.as_str());
        assert_eq!(empty.normalize_domain("Example.COM").unwrap(), "Example.COM");

        let basic = PrepProfile::Basic.build();
        assert_eq!(basic.name(), PrepProfile::Basic.as_str());
        assert_eq!(basic.normalize_domain("Example.COM").unwrap(), "example.com");
    }

    #[test]
    fn profile_from_str() {
        assert_eq!("basic".parse::<PrepProfile>(), Ok(PrepProfile::Basic));
        assert_eq!(" Empty ".parse::<PrepProfile>(), Ok(PrepProfile::Empty));
        assert_eq!("noop".parse::<PrepProfile>(), Ok(PrepProfile::Empty));
        assert_eq!(
            "icu".parse::<PrepProfile>(),
            Err(UnknownProfile("icu".to_string()))
        );
    }
}
