//! Datamgr HTTP Client
//!
//! A simple, type-safe HTTP client for the REST API of the remote analysis
//! platform that hosts the data managers and their lookup tables.
//!
//! # Example
//!
//! ```no_run
//! use datamgr_client::GalaxyClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), datamgr_client::ClientError> {
//!     let client = GalaxyClient::new("http://localhost:8080").with_api_key("secret");
//!
//!     let table = client.show_data_table("all_fasta").await?;
//!     println!("{} has {} row(s)", table.name, table.rows.len());
//!     Ok(())
//! }
//! ```

mod auth;
mod datasets;
pub mod error;
mod tables;
mod tools;

// Re-export commonly used types
pub use datamgr_core::dto::tool::RunToolResponse;
pub use error::{ClientError, Result};

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

/// Header carrying the API key on every authenticated request
const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the remote platform API
///
/// Methods are organized into logical groups:
/// - Authentication and connectivity (API key lookup, genome listing)
/// - Tool execution (submitting data manager jobs)
/// - Dataset state (observing job outputs)
/// - Tool data tables (reading and reloading lookup tables)
#[derive(Debug, Clone)]
pub struct GalaxyClient {
    /// Base URL of the platform (e.g., "https://usegalaxy.example.org")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// API key sent with every request once known
    api_key: Option<String>,
}

impl GalaxyClient {
    /// Create a new client without credentials
    ///
    /// # Example
    /// ```
    /// use datamgr_client::GalaxyClient;
    ///
    /// let client = GalaxyClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            api_key: None,
        }
    }

    /// Attach the API key used to authenticate subsequent requests
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Get the base URL of the platform
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether an API key is attached
    pub fn is_authenticated(&self) -> bool {
        self.api_key.is_some()
    }

    /// Start a request to `path` (which must begin with `/`)
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GalaxyClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = GalaxyClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = GalaxyClient::with_client("http://localhost:8080", http_client)
            .with_api_key("secret");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn test_api_error_keeps_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/datasets/abc")
            .with_status(403)
            .with_body("You are not allowed to access this dataset")
            .create_async()
            .await;

        let client = GalaxyClient::new(server.url());
        let err = client.show_dataset("abc").await.unwrap_err();

        mock.assert_async().await;
        assert!(err.is_client_error());
        assert!(err.to_string().contains("not allowed"));
    }
}
