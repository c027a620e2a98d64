use crate::config::Config;
use crate::errors::AppError;
use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT,
};
use reqwest::StatusCode;
use std::time::Duration;

/// Source of raw profile page markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the markup of `username`'s profile page.
    async fn fetch(&self, username: &str) -> Result<String, AppError>;
}

/// Fetches profile pages over HTTP with the configured outbound headers.
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPageFetcher {
    /// Creates a new `HttpPageFetcher`.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the profile base URL, request headers and timeout.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers(config)?)
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.profile_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/{}/", self.base_url, username)
    }
}

fn default_headers(config: &Config) -> Result<HeaderMap, AppError> {
    let pairs = [
        (USER_AGENT, config.user_agent.as_str()),
        (ACCEPT, config.accept.as_str()),
        (ACCEPT_LANGUAGE, config.accept_language.as_str()),
        (REFERER, config.referer.as_str()),
        (HeaderName::from_static("dnt"), config.dnt.as_str()),
    ];

    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let value = HeaderValue::from_str(value).map_err(|_| {
            AppError::Internal(format!("Invalid value for header '{}'", name))
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, username: &str) -> Result<String, AppError> {
        let url = self.profile_url(username);
        tracing::debug!("Fetching profile from URL: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Request error: {}", e);
            AppError::from(e)
        })?;

        let status = response.status();
        // A missing profile may be served as 404; its body still carries the marker.
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            tracing::error!("Profile page for '{}' returned status {}", username, status);
            return Err(AppError::Fetch(format!("upstream returned status {}", status)));
        }

        let body = response.text().await?;
        tracing::debug!(
            "Fetched {} bytes for '{}' (status {})",
            body.len(),
            username,
            status
        );
        Ok(body)
    }
}
