//! Archive base-name sanitization for the local filesystem.

/// Used when the page's calculated field is empty or sanitizes to nothing.
pub const FALLBACK_BASE_NAME: &str = "bundle";

/// NAME_MAX minus room for the `.zip` suffix.
const BASE_NAME_MAX: usize = 255 - ".zip".len();

/// Turns the displayed calculated-field value into a safe archive base name.
///
/// - Trims surrounding whitespace
/// - Replaces NUL, `/`, `\`, and control characters with `_` (runs collapse to one)
/// - Strips leading/trailing dots and underscores
/// - Limits length so `<name>.zip` fits in 255 bytes
/// - Falls back to [`FALLBACK_BASE_NAME`] when nothing usable remains
pub fn archive_base_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_underscore = false;

    for c in raw.trim().chars() {
        if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c: char| c == '.' || c == '_' || c.is_whitespace());

    let name = if trimmed.len() > BASE_NAME_MAX {
        let mut take = BASE_NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        &trimmed[..take]
    } else {
        trimmed
    };

    if name.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        name.to_string()
    }
}
