//! Loader error types.

/// Errors produced while loading a model.
///
/// All variants are fatal: the load terminates immediately with nothing
/// usable emitted, and nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with a non-success status.
    #[error("fetch failed with HTTP status {status}")]
    Fetch { status: u16 },

    /// Transport-level failure fetching the model bytes.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The external parser failed to open, stream, or close the model.
    #[error("parser error: {0}")]
    Parser(String),

    /// A geometry buffer violated the extraction invariants.
    #[error(transparent)]
    Extract(#[from] geobim_extract::ExtractError),
}

/// Result alias for loader operations.
pub type Result<T> = std::result::Result<T, Error>;
