//! Scan captured page HTML into a [`PageSnapshot`] (sync, uses scraper).
//!
//! `scraper::Html` is not `Send`; call from `spawn_blocking` if the HTML is
//! large and the caller is async.

use scraper::{ElementRef, Html, Selector};

use super::{Anchor, AttachmentCell, PageSnapshot};

/// Parse `html` and collect attachment cells, the archive name shown in the
/// calculated field `filename_field`, and the embedded data-page app keys.
pub fn scan(html: &str, filename_field: &str) -> PageSnapshot {
    let document = Html::parse_document(html);
    PageSnapshot {
        cells: attachment_cells(&document),
        target_name: target_name(&document, filename_field),
        app_keys: app_keys(&document),
    }
}

/// Every `<input type="file">` with the first `<a>` among its parent's children.
fn attachment_cells(document: &Html) -> Vec<AttachmentCell> {
    let mut cells = Vec::new();
    let (Ok(inputs), Ok(anchors)) = (Selector::parse("input[type]"), Selector::parse("a")) else {
        return cells;
    };

    for input in document.select(&inputs) {
        let input_type = input.value().attr("type").unwrap_or("").to_ascii_lowercase();
        if input_type != "file" {
            continue;
        }
        let input_name = input.value().attr("name").unwrap_or("").to_string();
        let link = input
            .parent()
            .and_then(ElementRef::wrap)
            .and_then(|parent| {
                parent
                    .children()
                    .filter_map(ElementRef::wrap)
                    .find(|child| anchors.matches(child))
            })
            .map(|a| Anchor {
                text: a.text().collect(),
                href: a.value().attr("href").map(str::to_string),
            });
        cells.push(AttachmentCell {
            input_name,
            input_type,
            link,
        });
    }
    cells
}

/// Text of the `<span>`s inside the element that follows the calculated-field label.
fn target_name(document: &Html, filename_field: &str) -> Option<String> {
    let (Ok(cells), Ok(spans)) = (
        Selector::parse("div[data-cb-cell-name]"),
        Selector::parse("span"),
    ) else {
        return None;
    };

    let label = document.select(&cells).find(|div| {
        div.value()
            .attr("data-cb-cell-name")
            .is_some_and(|name| name.contains(filename_field))
    })?;
    let value = label.next_siblings().find_map(ElementRef::wrap)?;
    let text: String = value.select(&spans).flat_map(|s| s.text()).collect();
    Some(text.trim().to_string())
}

/// App keys from deploy scripts of the form `.../dp/<key>/emb`, first occurrence order.
fn app_keys(document: &Html) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let Ok(scripts) = Selector::parse("script[src]") else {
        return keys;
    };
    for script in document.select(&scripts) {
        if let Some(key) = script.value().attr("src").and_then(app_key_from_src) {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
    }
    keys
}

fn app_key_from_src(src: &str) -> Option<&str> {
    let path = src.split(['?', '#']).next().unwrap_or("");
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    segments
        .windows(3)
        .find(|w| w[0] == "dp" && w[2] == "emb" && !w[1].is_empty())
        .map(|w| w[1])
}
