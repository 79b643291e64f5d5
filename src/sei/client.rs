use std::time::Duration;

use metrics::counter;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::errors::AnalyzerError;

pub const DEFAULT_API_ENDPOINTS: [&str; 3] = [
    "https://rest.sei-apis.com",
    "https://sei-api.polkachu.com",
    "https://api-sei.stingray.plus",
];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SeiClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid endpoint URL {0}")]
    InvalidUrl(String),

    #[error("all Sei endpoints failed; last error: {0}")]
    AllEndpointsFailed(String),
}

impl From<SeiClientError> for AnalyzerError {
    fn from(e: SeiClientError) -> Self {
        AnalyzerError::Network(e.to_string())
    }
}

/// REST client over an ordered list of equivalent gateways.
///
/// Endpoints are tried one after another until one answers 2xx with a body
/// that decodes; the first success short-circuits.
#[derive(Debug, Clone)]
pub struct SeiClient {
    http: Client,
    endpoints: Vec<String>,
    timeout: Duration,
}

impl SeiClient {
    pub fn new(http: Client, endpoints: Vec<String>, timeout: Duration) -> Self {
        Self {
            http,
            endpoints,
            timeout,
        }
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// GET `path` with `query` from the first endpoint that succeeds.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SeiClientError> {
        let mut last_error: Option<SeiClientError> = None;

        for endpoint in &self.endpoints {
            let result = match build_url(endpoint, path, query) {
                Ok(url) => self.try_endpoint(url).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!(
                        endpoint = %endpoint,
                        path = %path,
                        error = %e,
                        "Sei endpoint failed, trying next"
                    );
                    counter!("upstream_request_failures_total").increment(1);
                    last_error = Some(e);
                }
            }
        }

        Err(SeiClientError::AllEndpointsFailed(
            last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no endpoints configured".into()),
        ))
    }

    async fn try_endpoint<T: DeserializeOwned>(&self, url: Url) -> Result<T, SeiClientError> {
        let resp = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let body: T = resp.json().await?;
        Ok(body)
    }
}

fn build_url(endpoint: &str, path: &str, query: &[(&str, String)]) -> Result<Url, SeiClientError> {
    let raw = format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&raw).map_err(|e| SeiClientError::InvalidUrl(format!("{raw}: {e}")))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}
