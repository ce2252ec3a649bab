use std::borrow::Cow;

use super::Stringprep;
use crate::error::NormalizationError;

/// Passes every part through untouched and never fails.
///
/// Only safe in closed deployments where every address entering the system is
/// already in canonical form. Untrusted input must go through a real profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPrep;

impl Stringprep for NoopPrep {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn normalize_localpart<'a>(
        &self,
        localpart: &'a str,
    ) -> Result<Cow<'a, str>, NormalizationError> {
        Ok(Cow::Borrowed(localpart))
    }

    fn normalize_domain<'a>(&self, domain: &'a str) -> Result<Cow<'a, str>, NormalizationError> {
        Ok(Cow::Borrowed(domain))
    }

    fn normalize_resource<'a>(
        &self,
        resource: &'a str,
    ) -> Result<Cow<'a, str>, NormalizationError> {
        Ok(Cow::Borrowed(resource))
    }
}
