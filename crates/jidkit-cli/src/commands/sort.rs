use crate::commands::{print_json, Context};
use crate::util::collect_inputs;
use anyhow::{Context as _, Result};
use clap::Args;
use jidkit_core::Jid;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Args)]
pub struct SortArgs {
    /// Addresses to sort; read from stdin when omitted
    pub jids: Vec<String>,
    /// Collapse every address to its bare form before sorting
    #[arg(long)]
    pub bare: bool,
}

pub fn sort(ctx: &Context<'_>, args: SortArgs) -> Result<()> {
    let inputs = collect_inputs(args.jids)?;
    let total = inputs.len();

    let mut sorted = BTreeSet::new();
    for raw in &inputs {
        let jid = if args.bare {
            ctx.parse_bare(raw).map(Jid::from_bare)
        } else {
            ctx.parse_jid(raw)
        };
        sorted.insert(jid.with_context(|| format!("parse address {raw:?}"))?);
    }
    debug!(total, unique = sorted.len(), "addresses sorted");
    if let Some(cache) = ctx.cache {
        debug!(entries = cache.len(), "bare jid cache");
    }

    if ctx.json {
        let items: Vec<&str> = sorted.iter().map(Jid::as_str).collect();
        print_json(&items)?;
        return Ok(());
    }

    for jid in &sorted {
        println!("{jid}");
    }
    Ok(())
}
