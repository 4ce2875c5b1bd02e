//! Typed view of the parts of a data page the bundle flow cares about.
//!
//! A page reaches us either as captured HTML (see [`html::scan`]) or as a
//! JSON [`PageSnapshot`] produced elsewhere. Either way the rest of the
//! crate only sees these structures, never selectors.

pub mod html;
mod url_vars;

pub use url_vars::UrlVars;

use serde::{Deserialize, Serialize};

/// A link rendered next to a file input: text is the file name, href the stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub text: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// One `<input>` found on the page with the first `<a>` among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentCell {
    /// The input's `name` attribute (e.g. `EditRecordAttachment`).
    pub input_name: String,
    /// The input's `type` attribute, lowercased.
    pub input_type: String,
    #[serde(default)]
    pub link: Option<Anchor>,
}

/// Everything the bundle flow reads from one page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub cells: Vec<AttachmentCell>,
    /// Displayed value of the calculated field that names the archive (trimmed).
    #[serde(default)]
    pub target_name: Option<String>,
    /// App keys of the data pages embedded in this page.
    #[serde(default)]
    pub app_keys: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid page snapshot: {0}")]
pub struct SnapshotError(#[from] serde_json::Error);

impl PageSnapshot {
    pub fn from_json(data: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(data)?)
    }
}
