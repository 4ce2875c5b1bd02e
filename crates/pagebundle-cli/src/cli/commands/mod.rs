//! CLI command handlers, one per file.

mod bundle;
mod checksum;
mod inspect;
mod page_input;
mod vars;

pub use bundle::{run_bundle, BundleOptions};
pub use checksum::run_checksum;
pub use inspect::run_inspect;
pub use vars::run_vars;
