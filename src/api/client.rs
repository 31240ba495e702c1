//! Authenticated HTTP client for the remote booking API.
//!
//! A fresh client is built for every action from the caller's session. It
//! owns transport details only: URL building, headers, status checks and
//! JSON decoding. Mapping failures to user-facing text happens in
//! `crate::error`.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::ApiConfig;
use crate::error::ActionError;
use crate::types::Session;

const SERVER_MESSAGE_CHAR_LIMIT: usize = 300;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

/// Build a client carrying the session's bearer token.
///
/// Fails with `ActionError::AuthRequired` when there is no session or its
/// token is missing, blank or expired.
pub fn create_authenticated_api_client(
    session: Option<&Session>,
    api: &ApiConfig,
) -> Result<ApiClient, ActionError> {
    let token = session
        .and_then(Session::bearer_token)
        .ok_or(ActionError::AuthRequired)?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| ActionError::AuthRequired)?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);

    let mut builder = Client::builder()
        .default_headers(headers)
        .danger_accept_invalid_certs(api.accept_invalid_certs);
    if let Some(secs) = api.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let http = builder
        .build()
        .map_err(|e| ActionError::unexpected(format!("Failed to build HTTP client: {}", e)))?;

    let base_url = Url::parse(&api.base_url).map_err(|e| {
        ActionError::unexpected(format!("Invalid API base URL '{}': {}", api.base_url, e))
    })?;
    if base_url.cannot_be_a_base() {
        return Err(ActionError::unexpected(format!(
            "Invalid API base URL '{}'",
            api.base_url
        )));
    }

    Ok(ApiClient { http, base_url })
}

impl ApiClient {
    /// Append path segments to the base URL; each segment is percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ActionError> {
        let response = self.execute(self.http.get(url)).await?;
        decode(response).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<(), ActionError> {
        self.send(Method::POST, url, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<(), ActionError> {
        self.send(Method::PUT, url, Some(body)).await
    }

    pub async fn delete(&self, url: Url) -> Result<(), ActionError> {
        self.send::<()>(Method::DELETE, url, None).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<(), ActionError> {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await.map(|_| ())
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ActionError> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("{} {}", status.as_u16(), response.url());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ActionError::status(status.as_u16(), server_message(&body)))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ActionError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ActionError::unexpected(format!("Invalid response from server: {}", e)))
}

/// Pull a displayable message out of an error body.
///
/// Looks at `message`, then `title` (problem details), then `error`, then a
/// bare JSON string, and finally falls back to the plain-text body.
pub fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let message = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["message", "title", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        Ok(Value::String(text)) => Some(text),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }?;

    let message = message.trim();
    if message.is_empty() {
        return None;
    }
    Some(message.chars().take(SERVER_MESSAGE_CHAR_LIMIT).collect())
}
