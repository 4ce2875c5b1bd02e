//! `pagebundle bundle <page>` – fetch all attachments and save one zip.

use anyhow::{Context, Result};
use pagebundle_core::archive::Progress;
use pagebundle_core::config::BundleConfig;
use pagebundle_core::fetch::CurlFetcher;
use pagebundle_core::flow::{BundleFlow, Delivery};
use pagebundle_core::lifecycle::{Activation, PageReady};
use pagebundle_core::record::discover_records;
use pagebundle_core::sanitize::archive_base_name;
use pagebundle_core::save::DirectorySaver;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

use super::page_input::load_page;

#[derive(Debug, Clone)]
pub struct BundleOptions {
    pub page: PathBuf,
    pub json: bool,
    pub name: Option<String>,
    pub base_url: Option<String>,
    pub app_key: Option<String>,
    pub out: Option<PathBuf>,
}

/// `DataPageReady` events for this page: the `--app-key` override if given,
/// otherwise one per data page embedded in the page.
fn announced_events(app_key: Option<&str>, page_keys: &[String]) -> Vec<PageReady> {
    match app_key {
        Some(key) => vec![PageReady::new(key)],
        None => page_keys.iter().map(PageReady::new).collect(),
    }
}

/// `--name`, else the calculated field, sanitized; `bundle` when both are empty.
fn archive_name(name: Option<String>, target_name: Option<String>) -> String {
    let raw = name
        .filter(|n| !n.trim().is_empty())
        .or(target_name)
        .unwrap_or_default();
    archive_base_name(&raw)
}

/// `--out`, else config `output_dir`, else the current directory.
fn output_dir(out: Option<PathBuf>, configured: Option<PathBuf>) -> Result<PathBuf> {
    match out.or(configured) {
        Some(dir) => Ok(dir),
        None => Ok(std::env::current_dir()?),
    }
}

pub async fn run_bundle(cfg: &BundleConfig, opts: BundleOptions) -> Result<()> {
    let snapshot = load_page(&opts.page, opts.json, cfg)?;

    let events = announced_events(opts.app_key.as_deref(), &snapshot.app_keys);
    let activation = Activation::new(cfg.expected_app_key.as_str());
    if activation.first_accepted(&events).is_none() {
        tracing::info!(
            expected = activation.expected_app_key(),
            announced = ?events,
            "bundle flow not attached"
        );
        println!(
            "No data page with app key {} on this page; nothing to bundle.",
            activation.expected_app_key()
        );
        return Ok(());
    }

    let records = discover_records(&snapshot.cells, &cfg.input_name_marker);
    if records.is_empty() {
        tracing::warn!("no attachments discovered; delivering an empty archive");
    }

    let base_name = archive_name(opts.name, snapshot.target_name);
    let out_dir = output_dir(opts.out, cfg.output_dir.clone())?;
    let base_url = opts
        .base_url
        .or_else(|| cfg.base_url.clone())
        .map(|u| Url::parse(&u).with_context(|| format!("invalid base URL {u}")))
        .transpose()?;

    let mut flow = BundleFlow::new(
        Arc::new(CurlFetcher::new(&cfg.http)),
        Arc::new(DirectorySaver::new(out_dir)),
    );
    if let Some(base) = base_url {
        flow = flow.with_base_url(base);
    }

    println!("Bundling {} file(s) into {}.zip", records.len(), base_name);
    let mut show = |p: &Progress| {
        tracing::debug!("{}", p);
        println!("  {}", p);
    };
    match flow.run(&base_name, &records, Some(&mut show)).await? {
        Delivery::Saved {
            path,
            entries,
            bytes,
            sha256,
        } => {
            println!("Saved {} ({} entries, {} bytes)", path.display(), entries, bytes);
            println!("  sha256 {}", sha256);
        }
        Delivery::Skipped => println!("Archive could not be written; see the log for details."),
    }
    Ok(())
}
