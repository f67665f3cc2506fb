use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::Category;

mod http;

pub use http::{HttpNumberSource, HttpNumberSourceOptions};

/// Provider of freshly classified numbers.
///
/// Implementations never fail: a source that cannot deliver returns
/// [`FetchOutcome::Unavailable`] and the caller carries on with zero new
/// numbers.
#[async_trait]
pub trait NumberSource: Send + Sync {
    async fn fetch(&self, category: Category) -> FetchOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched(Vec<i64>),
    Unavailable(FetchFailure),
}

impl FetchOutcome {
    pub fn into_numbers(self) -> Vec<i64> {
        match self {
            FetchOutcome::Fetched(numbers) => numbers,
            FetchOutcome::Unavailable(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("Upstream did not respond within {}ms.", .0.as_millis())]
    Timeout(Duration),

    #[error("Request to upstream failed: {0}")]
    Request(String),

    #[error("Upstream responded with status {0}.")]
    BadStatus(StatusCode),

    #[error("Malformed upstream payload: {0}")]
    MalformedPayload(String),
}
