use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use std::cmp::Ordering;

#[derive(Debug, Args)]
pub struct CompareArgs {
    pub left: String,
    pub right: String,
}

pub fn compare(ctx: &Context<'_>, args: CompareArgs) -> Result<()> {
    let left = ctx
        .parse_jid(&args.left)
        .with_context(|| format!("parse address {:?}", args.left))?;
    let right = ctx
        .parse_jid(&args.right)
        .with_context(|| format!("parse address {:?}", args.right))?;

    let label = ordering_label(left.cmp(&right));
    if ctx.json {
        print_json(&serde_json::json!({
            "left": left.as_str(),
            "right": right.as_str(),
            "ordering": label,
            "same_bare": left.bare_jid() == right.bare_jid(),
        }))?;
    } else {
        println!("{label}");
    }
    Ok(())
}

fn ordering_label(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}
