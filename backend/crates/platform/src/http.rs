//! JSON HTTP Client
//!
//! Thin wrapper over `reqwest` for talking to JSON services such as the auth
//! provider. Non-2xx answers are returned as responses, not errors, so callers
//! can read the provider's error body. No timeouts or retries are applied.

use reqwest::{Client, Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::client::ClientInfo;

/// Errors raised before a usable response exists
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// Client could not be built
    #[error("Invalid HTTP client configuration: {0}")]
    Config(String),

    /// Connection, TLS or protocol failure
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Body was not the JSON we expected
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Buffered response
#[derive(Debug, Clone)]
pub struct JsonResponse {
    url: String,
    status: StatusCode,
    body: Vec<u8>,
}

impl JsonResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpClientError> {
        serde_json::from_slice(&self.body).map_err(|e| HttpClientError::Decode {
            url: self.url.clone(),
            message: e.to_string(),
        })
    }

    /// Body as text (lossy)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// JSON client bound to one base URL
#[derive(Debug, Clone)]
pub struct JsonClient {
    http: Client,
    base_url: String,
}

impl JsonClient {
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self, HttpClientError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| HttpClientError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body
    pub async fn post_json<B>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
        client: Option<&ClientInfo>,
    ) -> Result<JsonResponse, HttpClientError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, Some(body), bearer, client)
            .await
    }

    /// POST without a body
    pub async fn post_empty(
        &self,
        path: &str,
        bearer: Option<&str>,
        client: Option<&ClientInfo>,
    ) -> Result<JsonResponse, HttpClientError> {
        self.execute::<()>(Method::POST, path, None, bearer, client)
            .await
    }

    pub async fn get(
        &self,
        path: &str,
        bearer: Option<&str>,
        client: Option<&ClientInfo>,
    ) -> Result<JsonResponse, HttpClientError> {
        self.execute::<()>(Method::GET, path, None, bearer, client)
            .await
    }

    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        bearer: Option<&str>,
        client: Option<&ClientInfo>,
    ) -> Result<JsonResponse, HttpClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(header::ACCEPT, "application/json");

        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(client) = client {
            if let Some(ip) = client.ip_string() {
                request = request.header("x-forwarded-for", ip);
            }
            if let Some(user_agent) = &client.user_agent {
                request = request.header(header::USER_AGENT, user_agent.as_str());
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| HttpClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| HttpClientError::Transport {
                url: url.clone(),
                source,
            })?
            .to_vec();

        tracing::debug!(%method, %url, status = status.as_u16(), "HTTP call completed");

        Ok(JsonResponse { url, status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_json_sends_body_bearer_and_client_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/things"))
            .and(header_eq("authorization", "Bearer tok-1"))
            .and(header_eq("x-forwarded-for", "203.0.113.9"))
            .and(header_eq("user-agent", "TestAgent/1.0"))
            .and(body_json(json!({ "a": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = JsonClient::new(format!("{}/", server.uri()), "portal-test").unwrap();
        let info = ClientInfo {
            ip: Some("203.0.113.9".parse().unwrap()),
            user_agent: Some("TestAgent/1.0".to_string()),
        };

        let response = client
            .post_json("/api/things", &json!({ "a": 1 }), Some("tok-1"), Some(&info))
            .await
            .unwrap();

        assert!(response.is_success());
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_error_status_is_a_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&server)
            .await;

        let client = JsonClient::new(server.uri(), "portal-test").unwrap();
        let response = client.get("missing", None, None).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "nope");
        assert!(matches!(
            response.json::<serde_json::Value>(),
            Err(HttpClientError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = JsonClient::new(format!("http://127.0.0.1:{port}"), "portal-test").unwrap();
        let result = client.post_empty("/x", None, None).await;
        assert!(matches!(result, Err(HttpClientError::Transport { .. })));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = JsonClient::new("http://provider.local///", "portal-test").unwrap();
        assert_eq!(client.base_url(), "http://provider.local");
    }
}
