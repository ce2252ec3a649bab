use anyhow::Result;
use jidkit_core::{BareJid, BareJidCache, Jid, JidError, JidPrep};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;

pub mod addresses;
pub mod compare;
pub mod sort;

pub struct Context<'a> {
    pub prep: &'a JidPrep,
    pub cache: Option<&'a BareJidCache>,
    pub json: bool,
    pub trusted: bool,
}

impl Context<'_> {
    pub fn parse_jid(&self, raw: &str) -> Result<Jid, JidError> {
        if self.trusted {
            return Ok(Jid::parse_trusted(raw)?);
        }
        Jid::parse(self.prep, raw)
    }

    /// Bare form of `raw`, served from the cache when one is configured.
    pub fn parse_bare(&self, raw: &str) -> Result<Arc<BareJid>, JidError> {
        if self.trusted {
            return Ok(Arc::new(BareJid::parse_trusted(raw)?));
        }
        match self.cache {
            Some(cache) => cache.get_or_parse(raw),
            None => Ok(Arc::new(BareJid::parse(self.prep, raw)?)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JidDto<'a> {
    pub jid: &'a str,
    pub bare: &'a str,
    pub localpart: Option<&'a str>,
    pub domain: &'a str,
    pub resource: Option<&'a str>,
}

impl<'a> From<&'a Jid> for JidDto<'a> {
    fn from(jid: &'a Jid) -> Self {
        Self {
            jid: jid.as_str(),
            bare: jid.bare_jid().as_str(),
            localpart: jid.localpart(),
            domain: jid.domain(),
            resource: jid.resource(),
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
