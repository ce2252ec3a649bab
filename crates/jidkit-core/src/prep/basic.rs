use std::borrow::Cow;

use super::Stringprep;
use crate::error::{JidPart, NormalizationError};

pub const MAX_PART_LEN: usize = 1023;

const LOCALPART_PROHIBITED: [char; 8] = ['"', '&', '\'', '/', ':', '<', '>', '@'];

/// Conservative profile for deployments without a full stringprep library.
///
/// Localpart and domain are case folded, the domain loses a single trailing
/// dot, and characters that can never appear in the respective part are
/// rejected. No Unicode compatibility mapping is applied, so visually identical
/// strings in different normalization forms stay distinct.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPrep;

impl Stringprep for BasicPrep {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn normalize_localpart<'a>(
        &self,
        localpart: &'a str,
    ) -> Result<Cow<'a, str>, NormalizationError> {
        for ch in localpart.chars() {
            if ch.is_control() || ch.is_whitespace() || LOCALPART_PROHIBITED.contains(&ch) {
                return Err(NormalizationError::ProhibitedChar {
                    part: JidPart::Localpart,
                    ch,
                });
            }
        }

        let folded = fold_case(localpart);
        check_len(JidPart::Localpart, &folded)?;
        Ok(folded)
    }

    fn normalize_domain<'a>(&self, domain: &'a str) -> Result<Cow<'a, str>, NormalizationError> {
        let trimmed = domain.strip_suffix('.').unwrap_or(domain);

        for ch in trimmed.chars() {
            if ch.is_control() || ch.is_whitespace() || ch == '@' || ch == '/' {
                return Err(NormalizationError::ProhibitedChar {
                    part: JidPart::Domain,
                    ch,
                });
            }
        }

        if trimmed.split('.').any(str::is_empty) {
            return Err(NormalizationError::EmptyLabel {
                domain: domain.to_string(),
            });
        }

        let folded = fold_case(trimmed);
        check_len(JidPart::Domain, &folded)?;
        Ok(folded)
    }

    fn normalize_resource<'a>(
        &self,
        resource: &'a str,
    ) -> Result<Cow<'a, str>, NormalizationError> {
        if let Some(ch) = resource.chars().find(|ch| ch.is_control()) {
            return Err(NormalizationError::ProhibitedChar {
                part: JidPart::Resource,
                ch,
            });
        }

        check_len(JidPart::Resource, resource)?;
        Ok(Cow::Borrowed(resource))
    }
}

fn fold_case(value: &str) -> Cow<'_, str> {
    if value.chars().any(|ch| ch.to_lowercase().ne([ch])) {
        Cow::Owned(value.to_lowercase())
    } else {
        Cow::Borrowed(value)
    }
}

fn check_len(part: JidPart, value: &str) -> Result<(), NormalizationError> {
    if value.len() > MAX_PART_LEN {
        return Err(NormalizationError::TooLong {
            part,
            len: value.len(),
        });
    }
    Ok(())
}
