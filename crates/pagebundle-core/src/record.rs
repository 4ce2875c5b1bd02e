//! File records: which attachments a page references and where to fetch them.

use url::Url;

use crate::page::AttachmentCell;

/// One attached file to bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Displayed link text; becomes the entry name in the archive.
    pub filename: String,
    /// Link target as written on the page (may be relative).
    pub url: String,
    /// Derived from `filename` by [`get_url_extension`].
    pub extension: String,
}

impl FileRecord {
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        let filename = filename.into();
        let extension = get_url_extension(&filename).to_string();
        Self {
            filename,
            url: url.into(),
            extension,
        }
    }
}

/// Text after the last `.` of `url`, ignoring any `?query` or `#fragment`, trimmed.
///
/// Case is preserved. Without a dot the whole (trimmed) string comes back.
///
/// # Examples
///
/// - `get_url_extension("report.v2.final.CSV?x=1#frag")` → `"CSV"`
/// - `get_url_extension("readme")` → `"readme"`
pub fn get_url_extension(url: &str) -> &str {
    let path = url.split(['#', '?']).next().unwrap_or("");
    path.rsplit('.').next().unwrap_or("").trim()
}

/// Builds the ordered record list from the page's cells.
///
/// A cell qualifies when its input is a file input whose name contains
/// `input_name_marker` and its link has non-empty text and an href. Anything
/// else is skipped: an empty link means no file is attached.
pub fn discover_records(cells: &[AttachmentCell], input_name_marker: &str) -> Vec<FileRecord> {
    cells
        .iter()
        .filter(|cell| {
            cell.input_type.eq_ignore_ascii_case("file")
                && cell.input_name.contains(input_name_marker)
        })
        .filter_map(|cell| {
            let link = cell.link.as_ref()?;
            if link.text.is_empty() {
                return None;
            }
            match &link.href {
                Some(href) => Some(FileRecord::new(link.text.clone(), href.clone())),
                None => {
                    tracing::debug!(input = %cell.input_name, "attachment link has no href; skipped");
                    None
                }
            }
        })
        .collect()
}

/// Resolves a record URL against the page's base URL.
///
/// Absolute URLs are returned as-is (normalized). Relative ones need `base`.
pub fn resolve_url(href: &str, base: Option<&Url>) -> Result<Url, url::ParseError> {
    match Url::parse(href) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => base.join(href),
            None => Err(url::ParseError::RelativeUrlWithoutBase),
        },
        Err(e) => Err(e),
    }
}
