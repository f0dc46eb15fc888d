//! HTTP client for the FAT code list API

use super::normalize::normalize;
use super::source::CodeSystemSource;
use crate::config::RegistryConfig;
use crate::error::Fat2FshError;
use crate::model::CodeSystem;
use crate::result::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Path of a single code list below the base URL
const CODE_LIST_PATH: &str = "api/code-systems/adm/codelist";

/// Client for the FAT registry
///
/// Holds one connection pool configured from an immutable [`RegistryConfig`].
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
}

impl RegistryClient {
    /// Build a client; fails on an unparsable base URL or user agent
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            Fat2FshError::config_error(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                Fat2FshError::config_error(format!(
                    "Invalid user agent '{}': {}",
                    config.user_agent, e
                ))
            })?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                Fat2FshError::config_error(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of one code list, including the `includeInactive` flag
    pub fn code_list_url(&self, identifier: &str, include_inactive: bool) -> String {
        format!(
            "{}/{}/{}?includeInactive={}",
            self.base_url,
            CODE_LIST_PATH,
            urlencoding::encode(identifier),
            include_inactive
        )
    }

    /// Download and normalize one code system
    ///
    /// Never returns a partially populated code system: any failure after the
    /// request is sent surfaces as a transport or decode error.
    pub async fn fetch(&self, identifier: &str, include_inactive: bool) -> Result<CodeSystem> {
        let url = self.code_list_url(identifier, include_inactive);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Fat2FshError::transport(identifier, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Fat2FshError::transport(
                identifier,
                format!("HTTP status {}", status),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Fat2FshError::transport(identifier, e.to_string()))?;

        let document: Value = serde_json::from_str(&body)
            .map_err(|e| Fat2FshError::decode(identifier, format!("invalid JSON: {}", e)))?;

        let code_system = normalize(identifier, &document)?;
        debug!(
            "Fetched {} with {} concepts",
            identifier,
            code_system.concepts.len()
        );
        Ok(code_system)
    }

    /// Check that the API root answers with a success status
    pub async fn ping(&self, timeout: Duration) -> Result<()> {
        let response = self
            .client
            .get(&self.base_url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Fat2FshError::transport(&self.base_url, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Fat2FshError::transport(
                &self.base_url,
                format!("HTTP status {}", status),
            ))
        }
    }
}

#[async_trait]
impl CodeSystemSource for RegistryClient {
    async fn fetch_code_system(
        &self,
        identifier: &str,
        include_inactive: bool,
    ) -> Result<CodeSystem> {
        self.fetch(identifier, include_inactive).await
    }
}
