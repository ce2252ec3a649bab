use crate::error::ParseError;

/// Raw substrings of an address, before any stringprep runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JidParts<'a> {
    pub localpart: Option<&'a str>,
    pub domain: &'a str,
    pub resource: Option<&'a str>,
}

/// Splits `raw` into localpart, domain and resource without validating anything.
///
/// The resource starts after the first `/`. In the text before it the localpart
/// ends at the first `@`. Empty localpart and resource sections are reported as
/// absent; the domain may come back empty.
pub fn split_jid(raw: &str) -> JidParts<'_> {
    let (address, resource) = match raw.split_once('/') {
        Some((address, resource)) => (address, non_empty(resource)),
        None => (raw, None),
    };

    let (localpart, domain) = match address.split_once('@') {
        Some((localpart, domain)) => (non_empty(localpart), domain),
        None => (None, address),
    };

    JidParts {
        localpart,
        domain,
        resource,
    }
}

/// Like [`split_jid`], but rejects input that cannot name an address.
pub fn parse_jid(raw: &str) -> Result<JidParts<'_>, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }

    let parts = split_jid(raw);
    if parts.domain.is_empty() {
        return Err(ParseError::MissingDomain);
    }

    Ok(parts)
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
