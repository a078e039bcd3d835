//! HTTP client for the Hotmart product API.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::StatusCode;

use hotsync_core::product::RemoteProduct;
use hotsync_core::remote::RemoteStoreApi;

use crate::error::{HotmartError, Result};
use crate::types::{AuthRequest, AuthResponse, TokenCheckRequest, TokenCheckResponse};

/// Default production endpoint.
pub const DEFAULT_API_URL: &str = "https://api.hotmart.com";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const MAX_LOG_BODY_CHARS: usize = 512;

/// Client for the Hotmart REST API.
///
/// Every operation is a single attempt; the scheduled pass provides the
/// retry cadence.
#[derive(Debug, Clone)]
pub struct HotmartClient {
    client: reqwest::Client,
    base_url: String,
}

impl HotmartClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the API (e.g., "https://api.hotmart.com")
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn log_response(status: StatusCode, body: &str) {
        if status.is_success() {
            debug!("API response status: {}", status);
            return;
        }

        let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
        if body.chars().count() > MAX_LOG_BODY_CHARS {
            preview.push_str("...");
        }
        debug!("API response error ({}): {}", status, preview);
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        Self::log_response(status, &body);

        if !status.is_success() {
            return Err(HotmartError::api(
                status.as_u16(),
                format!("Request failed: {}", body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to deserialize response. Body: {}, Error: {}", body, e);
            HotmartError::api(status.as_u16(), format!("Failed to parse response: {}", e))
        })
    }

    /// Exchange the API key for an access token.
    ///
    /// POST /auth
    pub async fn authenticate(&self, api_key: &str) -> Result<String> {
        let url = format!("{}/auth", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&AuthRequest { api_key })
            .send()
            .await?;

        let auth: AuthResponse = Self::parse_response(response).await?;
        match auth.access_token.filter(|token| !token.trim().is_empty()) {
            Some(token) => Ok(token),
            None => Err(HotmartError::auth("auth response carried no access_token")),
        }
    }

    /// Ask the API whether an access token is still valid.
    ///
    /// POST /auth/check
    pub async fn check_token(&self, access_token: &str) -> Result<bool> {
        let url = format!("{}/auth/check", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&TokenCheckRequest { access_token })
            .send()
            .await?;

        let check: TokenCheckResponse = Self::parse_response(response).await?;
        Ok(check.valid)
    }

    /// Fetch the full product list.
    ///
    /// The response array is parsed element-wise so one malformed record
    /// (missing or blank `sku`) costs only itself, not the whole pass.
    ///
    /// GET /product
    pub async fn list_products(&self, access_token: &str) -> Result<Vec<RemoteProduct>> {
        let url = format!("{}/product", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let raw: Vec<serde_json::Value> = Self::parse_response(response).await?;
        let mut products = Vec::with_capacity(raw.len());
        for value in raw {
            match serde_json::from_value::<RemoteProduct>(value) {
                Ok(product) if product.has_usable_sku() => products.push(product),
                Ok(product) => {
                    warn!("skipping remote product '{}' with blank sku", product.name);
                }
                Err(err) => {
                    warn!("skipping malformed remote product record: {}", err);
                }
            }
        }
        Ok(products)
    }
}

#[async_trait]
impl RemoteStoreApi for HotmartClient {
    async fn authenticate(&self, api_key: &str) -> hotsync_core::Result<String> {
        HotmartClient::authenticate(self, api_key)
            .await
            .map_err(Into::into)
    }

    async fn check_token(&self, access_token: &str) -> hotsync_core::Result<bool> {
        HotmartClient::check_token(self, access_token)
            .await
            .map_err(Into::into)
    }

    async fn list_products(&self, access_token: &str) -> hotsync_core::Result<Vec<RemoteProduct>> {
        HotmartClient::list_products(self, access_token)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::Mutex as TokioMutex;

    #[derive(Debug, Clone)]
    struct CapturedRequest {
        request_line: String,
        headers: HashMap<String, String>,
        body: String,
    }

    fn header_end_offset(buffer: &[u8]) -> Option<usize> {
        buffer.windows(4).position(|window| window == b"\r\n\r\n")
    }

    async fn read_http_request(stream: &mut tokio::net::TcpStream) -> Option<CapturedRequest> {
        let mut buffer = Vec::new();
        loop {
            let mut chunk = [0_u8; 2048];
            let read = stream.read(&mut chunk).await.ok()?;
            if read == 0 {
                return None;
            }
            buffer.extend_from_slice(&chunk[..read]);
            if header_end_offset(&buffer).is_some() {
                break;
            }
        }

        let header_end = header_end_offset(&buffer)?;
        let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
        let mut lines = head.lines();
        let request_line = lines.next()?.to_string();

        let mut headers = HashMap::new();
        for line in lines {
            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
            }
        }

        let content_length = headers
            .get("content-length")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);

        let mut body = buffer[header_end + 4..].to_vec();
        while body.len() < content_length {
            let mut chunk = [0_u8; 2048];
            let read = stream.read(&mut chunk).await.ok()?;
            if read == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..read]);
        }

        Some(CapturedRequest {
            request_line,
            headers,
            body: String::from_utf8_lossy(&body).to_string(),
        })
    }

    async fn write_http_response(
        stream: &mut tokio::net::TcpStream,
        status: u16,
        body: &str,
    ) -> std::io::Result<()> {
        let reason = match status {
            200 => "OK",
            400 => "Bad Request",
            401 => "Unauthorized",
            500 => "Internal Server Error",
            _ => "Error",
        };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await?;
        stream.flush().await
    }

    /// Serve scripted (status, body) responses, one per connection, and
    /// capture each request.
    async fn start_mock_server(
        responses: Vec<(u16, String)>,
    ) -> (
        String,
        Arc<TokioMutex<Vec<CapturedRequest>>>,
        tokio::task::JoinHandle<()>,
    ) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");
        let captured = Arc::new(TokioMutex::new(Vec::<CapturedRequest>::new()));
        let scripted = Arc::new(TokioMutex::new(VecDeque::from(responses)));
        let captured_clone = Arc::clone(&captured);
        let scripted_clone = Arc::clone(&scripted);

        let handle = tokio::spawn(async move {
            loop {
                let (mut stream, _) = match listener.accept().await {
                    Ok(value) => value,
                    Err(_) => break,
                };
                let Some(request) = read_http_request(&mut stream).await else {
                    continue;
                };
                captured_clone.lock().await.push(request);
                let (status, body) = scripted_clone
                    .lock()
                    .await
                    .pop_front()
                    .unwrap_or((500, r#"{"message":"unexpected request"}"#.to_string()));
                let _ = write_http_response(&mut stream, status, &body).await;
            }
        });

        (format!("http://{}", addr), captured, handle)
    }

    #[tokio::test]
    async fn authenticate_posts_api_key_and_returns_token() {
        let (base_url, captured, server) =
            start_mock_server(vec![(200, r#"{"access_token":"tok123"}"#.to_string())]).await;

        let client = HotmartClient::new(&base_url);
        let token = client.authenticate("key-1").await.expect("authenticate");

        assert_eq!(token, "tok123");
        let requests = captured.lock().await.clone();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].request_line.starts_with("POST /auth "));
        assert!(requests[0].body.contains(r#""apiKey":"key-1""#));

        server.abort();
    }

    #[tokio::test]
    async fn authenticate_without_token_is_auth_error() {
        let (base_url, _captured, server) =
            start_mock_server(vec![(200, r#"{"status":"ok"}"#.to_string())]).await;

        let client = HotmartClient::new(&base_url);
        let result = client.authenticate("key-1").await;

        assert!(matches!(result, Err(HotmartError::Auth(_))));
        server.abort();
    }

    #[tokio::test]
    async fn check_token_reads_valid_field() {
        let (base_url, captured, server) =
            start_mock_server(vec![(200, r#"{"valid":false}"#.to_string())]).await;

        let client = HotmartClient::new(&base_url);
        let valid = client.check_token("tok-stale").await.expect("check token");

        assert!(!valid);
        let requests = captured.lock().await.clone();
        assert!(requests[0].request_line.starts_with("POST /auth/check "));
        assert!(requests[0].body.contains(r#""access_token":"tok-stale""#));

        server.abort();
    }

    #[tokio::test]
    async fn list_products_sends_bearer_and_skips_malformed_records() {
        let body = r#"[
            {"sku":"ABC-1","name":"Course A","description":"Intro","price":99.9,"stock":10},
            {"name":"No Sku","description":"","price":1.0,"stock":1},
            {"sku":"ABC-2","name":"Course B","description":"Advanced","price":49.0,"stock":5}
        ]"#;
        let (base_url, captured, server) =
            start_mock_server(vec![(200, body.to_string())]).await;

        let client = HotmartClient::new(&base_url);
        let products = client.list_products("tok-live").await.expect("list products");

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].sku, "ABC-1");
        assert_eq!(products[0].price, dec!(99.9));
        assert_eq!(products[1].sku, "ABC-2");

        let requests = captured.lock().await.clone();
        assert!(requests[0].request_line.starts_with("GET /product "));
        assert_eq!(
            requests[0].headers.get("authorization").map(String::as_str),
            Some("Bearer tok-live")
        );

        server.abort();
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let (base_url, _captured, server) =
            start_mock_server(vec![(500, r#"{"message":"boom"}"#.to_string())]).await;

        let client = HotmartClient::new(&base_url);
        let result = client.list_products("tok-live").await;

        match result {
            Err(HotmartError::Api { status, .. }) => assert_eq!(status, 500),
            other => panic!("expected API error, got {:?}", other),
        }
        server.abort();
    }

    #[tokio::test]
    async fn transport_failure_is_http_error() {
        // Nothing is listening on this port.
        let client = HotmartClient::new("http://127.0.0.1:1");
        let result = client.check_token("tok").await;

        match result {
            Err(err) => assert!(err.is_transport()),
            Ok(_) => panic!("expected transport error"),
        }
    }
}
