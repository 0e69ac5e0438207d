//! Error types for elitebgs-client

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Transport-level failures talking to the statistics API.
///
/// A lookup with zero matches is *not* an error; it is the `Ok(None)`
/// outcome of the fetch methods. Request timeouts surface through the
/// `Transport` variant.
#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
}
