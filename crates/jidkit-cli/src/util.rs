use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use std::io::{self, BufRead};

/// Returns `values` when given, otherwise the non-blank lines of stdin.
pub fn collect_inputs(values: Vec<String>) -> Result<Vec<String>> {
    if !values.is_empty() {
        return Ok(values);
    }

    let stdin = io::stdin().lock();
    let lines = read_lines(stdin)?;
    if lines.is_empty() {
        return Err(invalid_input("no addresses given"));
    }
    Ok(lines)
}

pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line.with_context(|| "read input")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            out.push(trimmed.to_string());
        }
    }
    Ok(out)
}
