use crate::errors::ClientError;
use reqwest::{header, Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// JSON helper over the backend's base URL.
///
/// Bodies are sent as JSON; responses are decoded only when the server says
/// they are JSON, otherwise the result is `Value::Null`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.request::<()>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.request::<()>(Method::DELETE, path, None).await
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "api request");

        let mut request = self
            .client
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));

        let payload = if is_json {
            let bytes = response.bytes().await?;
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        } else {
            Value::Null
        };

        if is_failure(status) {
            return Err(ClientError::Http {
                status: status.as_u16(),
                message: error_message(&payload, status),
            });
        }

        Ok(payload)
    }
}

/// Any status from 400 up, including nonstandard codes past 599.
fn is_failure(status: StatusCode) -> bool {
    status.as_u16() >= 400
}

fn error_message(payload: &Value, status: StatusCode) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|key| payload.get(key))
        .filter_map(Value::as_str)
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
