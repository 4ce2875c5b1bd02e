//! Binary fetch of attachment content.
//!
//! [`Fetch`] is blocking so the curl backend can run on tokio's blocking
//! pool; the bundle flow spawns one call per record.

mod easy;

pub use easy::CurlFetcher;

/// Fetches the raw body at `url`. One attempt, no retry.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Error returned by a single fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, DNS, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The link could not be turned into a fetchable http(s) URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
