use crate::commands::{print_json, Context, JidDto};
use crate::util::collect_inputs;
use anyhow::{Context as _, Result};
use clap::Args;
use jidkit_core::Jid;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Addresses to parse; read from stdin when omitted
    pub jids: Vec<String>,
}

#[derive(Debug, Args)]
pub struct BareArgs {
    /// Addresses to reduce to their bare form; read from stdin when omitted
    pub jids: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ResourceArgs {
    pub jid: String,
    /// New resource; an empty value clears it
    pub resource: String,
}

pub fn parse(ctx: &Context<'_>, args: ParseArgs) -> Result<()> {
    let jids = parse_all(ctx, collect_inputs(args.jids)?)?;

    if ctx.json {
        let items: Vec<JidDto<'_>> = jids.iter().map(JidDto::from).collect();
        print_json(&items)?;
        return Ok(());
    }

    for jid in &jids {
        println!("{jid}");
    }
    Ok(())
}

pub fn bare(ctx: &Context<'_>, args: BareArgs) -> Result<()> {
    let mut bares = Vec::new();
    for raw in collect_inputs(args.jids)? {
        let bare = ctx
            .parse_bare(&raw)
            .with_context(|| format!("parse address {raw:?}"))?;
        bares.push(bare);
    }

    if ctx.json {
        let items: Vec<&str> = bares.iter().map(|bare| bare.as_str()).collect();
        print_json(&items)?;
        return Ok(());
    }

    for bare in &bares {
        println!("{bare}");
    }
    Ok(())
}

pub fn replace_resource(ctx: &Context<'_>, args: ResourceArgs) -> Result<()> {
    let jid = ctx
        .parse_jid(&args.jid)
        .with_context(|| format!("parse address {:?}", args.jid))?;
    let updated = if ctx.trusted {
        jid.with_resource_trusted(&args.resource)
    } else {
        jid.with_resource(ctx.prep, &args.resource)
            .with_context(|| format!("normalize resource {:?}", args.resource))?
    };

    if ctx.json {
        print_json(&JidDto::from(&updated))?;
    } else {
        println!("{updated}");
    }
    Ok(())
}

fn parse_all(ctx: &Context<'_>, raws: Vec<String>) -> Result<Vec<Jid>> {
    raws.iter()
        .map(|raw| {
            ctx.parse_jid(raw)
                .with_context(|| format!("parse address {raw:?}"))
        })
        .collect()
}
