use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::{Category, EndpointMap, error::SourceError};

use super::{FetchFailure, FetchOutcome, NumberSource};

#[derive(Debug, Clone)]
pub struct HttpNumberSourceOptions {
    pub base_url: String,
    pub endpoints: EndpointMap,
    pub timeout: Duration,
    pub bearer_token: Option<Arc<str>>,
}

/// Fetches numbers from the classification API, one `GET` per call.
///
/// The whole exchange (connect, status line, body) is bounded by the
/// configured timeout. A request still in flight when it elapses is dropped.
#[derive(Debug)]
pub struct HttpNumberSource {
    http_client: reqwest::Client,
    urls: [Url; 4],
    timeout: Duration,
}

#[derive(Deserialize)]
struct NumbersPayload {
    numbers: Option<Vec<i64>>,
}

impl HttpNumberSource {
    pub fn new(options: &HttpNumberSourceOptions) -> Result<Self, SourceError> {
        Url::parse(&options.base_url)
            .map_err(|e| SourceError::InvalidBaseUrl(e, options.base_url.clone()))?;

        let base_url = options.base_url.trim_end_matches('/');
        let [primes, fibonacci, even, random] = Category::ALL
            .map(|category| endpoint_url(base_url, category, options.endpoints.get(category)));
        let urls = [primes?, fibonacci?, even?, random?];

        let mut headers = HeaderMap::new();
        if let Some(token) = &options.bearer_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| SourceError::InvalidBearerToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            http_client,
            urls,
            timeout: options.timeout,
        })
    }

    pub fn url(&self, category: Category) -> &Url {
        &self.urls[category.index()]
    }

    async fn request(&self, url: &Url) -> Result<Vec<i64>, FetchFailure> {
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.map_reqwest_err(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::BadStatus(status));
        }

        let payload: NumbersPayload = response
            .json()
            .await
            .map_err(|err| self.map_reqwest_err(err))?;
        Ok(payload.numbers.unwrap_or_default())
    }

    fn map_reqwest_err(&self, err: reqwest::Error) -> FetchFailure {
        if err.is_timeout() {
            FetchFailure::Timeout(self.timeout)
        } else if err.is_decode() {
            FetchFailure::MalformedPayload(err.to_string())
        } else {
            FetchFailure::Request(err.to_string())
        }
    }
}

fn endpoint_url(base_url: &str, category: Category, endpoint: &str) -> Result<Url, SourceError> {
    let url = format!("{base_url}/{}", endpoint.trim_start_matches('/'));
    Url::parse(&url).map_err(|e| SourceError::InvalidEndpoint(category, endpoint.to_string(), e))
}

#[async_trait]
impl NumberSource for HttpNumberSource {
    async fn fetch(&self, category: Category) -> FetchOutcome {
        let url = self.url(category);
        let result = match tokio::time::timeout(self.timeout, self.request(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchFailure::Timeout(self.timeout)),
        };

        match result {
            Ok(numbers) => {
                debug!(%category, %url, count = numbers.len(), "Fetched numbers from upstream");
                FetchOutcome::Fetched(numbers)
            }
            Err(failure) => {
                warn!(%category, %url, %failure, "Continuing without new numbers");
                FetchOutcome::Unavailable(failure)
            }
        }
    }
}
