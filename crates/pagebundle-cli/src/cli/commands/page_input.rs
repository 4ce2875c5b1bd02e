//! Load a page from disk as HTML or a JSON snapshot.

use anyhow::{Context, Result};
use pagebundle_core::config::BundleConfig;
use pagebundle_core::page::{html, PageSnapshot};
use std::path::Path;

pub fn load_page(path: &Path, json: bool, cfg: &BundleConfig) -> Result<PageSnapshot> {
    let data = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let snapshot = if json {
        PageSnapshot::from_json(&data).with_context(|| format!("parse {}", path.display()))?
    } else {
        html::scan(&data, &cfg.filename_field)
    };
    tracing::debug!(
        path = %path.display(),
        cells = snapshot.cells.len(),
        app_keys = ?snapshot.app_keys,
        "page loaded"
    );
    Ok(snapshot)
}
