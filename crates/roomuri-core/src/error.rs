//! Error type for the few operations that can fail.
//!
//! Parsing never fails; only URL joins and strict URL parsing surface errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UriError {
    /// `room` could not be resolved against `serverURL`.
    #[error("cannot resolve {reference:?} against {base:?}: {source}")]
    Join {
        base: String,
        reference: String,
        #[source]
        source: url::ParseError,
    },

    /// Input rejected by the standard URL parser.
    #[error("invalid URL {input:?}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
}
