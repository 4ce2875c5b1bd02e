pub mod config;
pub mod logging;

pub mod archive;
pub mod checksum;
pub mod fetch;
pub mod flow;
pub mod lifecycle;
pub mod page;
pub mod record;
pub mod sanitize;
pub mod save;
