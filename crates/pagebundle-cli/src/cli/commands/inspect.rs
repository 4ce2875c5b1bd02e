//! `pagebundle inspect <page>` – show what a bundle run would pick up.

use anyhow::Result;
use pagebundle_core::config::BundleConfig;
use pagebundle_core::record::discover_records;
use std::path::Path;

use super::page_input::load_page;

pub fn run_inspect(cfg: &BundleConfig, page: &Path, json: bool) -> Result<()> {
    let snapshot = load_page(page, json, cfg)?;
    let records = discover_records(&snapshot.cells, &cfg.input_name_marker);

    match &snapshot.target_name {
        Some(name) => println!("Archive name: {name}"),
        None => println!("Archive name: (field {} not found)", cfg.filename_field),
    }
    if snapshot.app_keys.is_empty() {
        println!("App keys:     -");
    } else {
        for key in &snapshot.app_keys {
            let marker = if *key == cfg.expected_app_key { " (active)" } else { "" };
            println!("App key:      {key}{marker}");
        }
    }

    if records.is_empty() {
        println!("No attachments found.");
    } else {
        println!("{:<6} {:<32} {}", "EXT", "FILENAME", "URL");
        for r in &records {
            println!("{:<6} {:<32} {}", r.extension, r.filename, r.url);
        }
    }
    Ok(())
}
