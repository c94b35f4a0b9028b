use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use url::Url;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ModelDescriptor, ModelListResponse};

const DEFAULT_API_URL: &str = "http://localhost:8080";
const API_URL_ENV: &str = "OPENWEBUI_API_URL";
const API_KEY_ENV: &str = "OPENWEBUI_API_KEY";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for an Open WebUI-compatible backend.
#[derive(Clone)]
pub struct OpenWebUi {
    api_key: String,
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl OpenWebUi {
    /// Create a new client.
    ///
    /// The API key can be provided directly or read from the
    /// OPENWEBUI_API_KEY environment variable; the base URL comes from
    /// OPENWEBUI_API_URL or defaults to `http://localhost:8080`.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_options(api_key, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => env::var(API_KEY_ENV).map_err(|_| {
                Error::authentication(
                    "API key not provided and OPENWEBUI_API_KEY environment variable not set",
                )
            })?,
        };

        let base_url = match base_url {
            Some(url) => url,
            None => env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        };
        Url::parse(&base_url)?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            api_key,
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Install a logger that records successful responses.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .expect("API key should be valid"),
        );
        headers
    }

    /// Convert a transport-level reqwest error to our Error type.
    fn process_transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        // Open WebUI reports errors as {"detail": "..."}; OpenAI-compatible
        // layers use {"error": {"message": "..."}}. Fall back to the raw body.
        #[derive(Deserialize)]
        struct DetailResponse {
            detail: Option<String>,
        }

        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let error_message = serde_json::from_str::<DetailResponse>(&error_body)
            .ok()
            .and_then(|d| d.detail)
            .or_else(|| {
                serde_json::from_str::<ErrorResponse>(&error_body)
                    .ok()
                    .and_then(|e| e.error)
                    .and_then(|e| e.message)
            })
            .unwrap_or_else(|| error_body.clone());

        // Map HTTP status code to appropriate error type
        match status_code {
            400 => Error::bad_request(error_message, None),
            401 => Error::authentication(error_message),
            403 => Error::permission(error_message),
            404 => Error::not_found(error_message),
            408 => Error::timeout(error_message, None),
            429 => Error::rate_limit(error_message, retry_after),
            500 => Error::internal_server(error_message),
            502..=504 => Error::service_unavailable(error_message, retry_after),
            _ => Error::api(status_code, error_message),
        }
    }

    /// Fetch the list of models the backend currently serves.
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>> {
        observability::CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.list_models_inner().await;
        observability::CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if result.is_err() {
            observability::CLIENT_REQUEST_ERRORS.click();
        }
        result
    }

    async fn list_models_inner(&self) -> Result<Vec<ModelDescriptor>> {
        let url = format!("{}/api/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| self.process_transport_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let models = response
            .json::<ModelListResponse>()
            .await
            .map_err(|e| {
                Error::serialization(
                    format!("Failed to parse models response: {}", e),
                    Some(Box::new(e)),
                )
            })?
            .into_models();

        if let Some(logger) = &self.logger {
            logger.log_models_response(&models);
        }
        Ok(models)
    }

    /// Send a chat completion request and get the response.
    pub async fn chat(&self, request: ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        observability::CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.chat_inner(request).await;
        observability::CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if result.is_err() {
            observability::CLIENT_REQUEST_ERRORS.click();
        }
        result
    }

    async fn chat_inner(&self, request: ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let url = format!("{}/api/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.process_transport_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| {
                Error::serialization(
                    format!("Failed to parse completion response: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        if let Some(logger) = &self.logger {
            logger.log_chat_response(&completion);
        }
        Ok(completion)
    }
}

impl fmt::Debug for OpenWebUi {
    // api_key is a secret and the logger is opaque; show neither.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWebUi")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        // Test with explicit API key
        let client = OpenWebUi::with_options(
            Some("test-key".to_string()),
            Some("http://localhost:8080".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);

        // Test with custom options
        let client = OpenWebUi::with_options(
            Some("test-key".to_string()),
            Some("https://chat.example.com/".to_string()),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://chat.example.com");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = OpenWebUi::with_options(
            Some("test-key".to_string()),
            Some("not a url".to_string()),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Url { .. }));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = OpenWebUi::with_options(
            Some("sk-secret".to_string()),
            Some("http://localhost:8080".to_string()),
            None,
        )
        .unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("localhost:8080"));
    }
}
