use thiserror::Error;

use crate::Category;

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "Invalid number ID \"{0}\". Use 'p' for prime, 'f' for Fibonacci, 'e' for even, or 'r' for random numbers."
)]
pub struct UnknownCategoryError(pub String);

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("Window lock for {0} numbers is poisoned.")]
    Poisoned(Category),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Invalid upstream base URL \"{1}\": {0}")]
    InvalidBaseUrl(#[source] url::ParseError, String),

    #[error("Invalid endpoint \"{1}\" for {0} numbers: {2}")]
    InvalidEndpoint(Category, String, #[source] url::ParseError),

    #[error("Invalid bearer token.")]
    InvalidBearerToken,

    #[error("Failed to build HTTP client: {0}")]
    ClientInit(#[from] reqwest::Error),
}
