use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid sort order: {0}")]
    InvalidSort(String),
}

/// Why a load produced no articles.
///
/// Callers of the store never see this as a failure: the collection is
/// emptied and the cause is logged and kept for inspection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("unexpected data structure: {0}")]
    Shape(String),
}
