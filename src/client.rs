//! Minimal HTTP client for the product entry point.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Body posted to the API; mirrors the fields `ProductForm` accepts.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub title: String,
    pub content: Option<String>,
    pub price: Value,
}

impl Default for NewProduct {
    fn default() -> Self {
        NewProduct {
            title: "hello World".to_string(),
            content: Some("I do not like you".to_string()),
            price: Value::from(10),
        }
    }
}

pub struct ApiClient {
    http: Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        url::Url::parse(&endpoint).with_context(|| format!("Invalid endpoint URL: {}", endpoint))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(ApiClient { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts the product and returns the decoded JSON body.
    ///
    /// A non-2xx status is an error that carries the response body, so the
    /// server's validation messages reach the caller.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Value> {
        tracing::debug!("POST {} {:?}", self.endpoint, product);

        let response = self
            .http
            .post(&self.endpoint)
            .json(product)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.endpoint))?;

        let status = response.status();
        let body = response.text().await.context("Failed to read response body")?;

        if !status.is_success() {
            anyhow::bail!("Server responded with {}: {}", status, body);
        }

        serde_json::from_str(&body).with_context(|| format!("Response is not valid JSON: {}", body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_product_posts_json() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/")
                    .json_body(json!({"title": "hello World", "content": "I do not like you", "price": 10}));
                then.status(201)
                    .json_body(json!({"id": 1, "title": "hello World", "my_discount": "2.00"}));
            })
            .await;

        let client = ApiClient::new(server.url("/api/"), DEFAULT_TIMEOUT).unwrap();
        let body = client.create_product(&NewProduct::default()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["my_discount"], "2.00");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/");
                then.status(400)
                    .json_body(json!({"error": {"code": "VALIDATION_ERROR"}}));
            })
            .await;

        let client = ApiClient::new(server.url("/api/"), DEFAULT_TIMEOUT).unwrap();
        let err = client.create_product(&NewProduct::default()).await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("VALIDATION_ERROR"));
    }

    #[tokio::test]
    async fn test_non_json_response_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let client = ApiClient::new(server.url("/api/"), DEFAULT_TIMEOUT).unwrap();
        let err = client.create_product(&NewProduct::default()).await.unwrap_err();

        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(ApiClient::new("not a url", DEFAULT_TIMEOUT).is_err());
    }
}
