use std::num::ParseIntError;

use thiserror::Error;

/// Everything that can stop an article from being fetched.
///
/// None of these are retried; each ends the invocation.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The argument was neither a URL nor an article number.
    #[error("invalid article number {input:?}: {source}")]
    InvalidArgument {
        input: String,
        #[source]
        source: ParseIntError,
    },

    /// The request never produced a response, or the body could not be read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("got status {code} for {url}")]
    HttpStatus { code: u16, url: String },

    #[error("failed to parse page: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;
