//! `pagebundle vars <url>` – print a page URL's query variables.

use anyhow::{Context, Result};
use pagebundle_core::page::UrlVars;

pub fn run_vars(url: &str) -> Result<()> {
    let vars = UrlVars::parse(url).with_context(|| format!("invalid URL {url}"))?;
    if vars.is_empty() {
        println!("No query variables.");
    }
    for (name, value) in vars.iter() {
        println!("{name}={value}");
    }
    Ok(())
}
