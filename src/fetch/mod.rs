//! Asset fetcher for eDAM digital assets.
//!
//! An AEM DAM asset exposes its JSON representation at
//! `<asset-url>.2.json`. The fetcher issues one GET per asset with a
//! long per-request timeout and distinguishes two failure classes:
//!
//! - HTTP error statuses (4xx/5xx) are "no data" — logged, returned as
//!   `None`, and the batch continues;
//! - transport failures and non-JSON bodies are fatal and propagate.
//!
//! No retries, no backoff, no rate limiting.

use serde_json::Value;
use std::time::Duration;

use crate::error::{FetchError, FetchResult};
use crate::logs::log_warning;

/// Suffix appended to an asset URL to reach its JSON representation.
pub const JSON_SUFFIX: &str = ".2.json";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Build the fetch target for an asset URL.
///
/// Surrounding whitespace is trimmed first; exported URL cells often
/// carry a trailing space.
pub fn asset_json_url(url: &str) -> String {
    format!("{}{}", url.trim(), JSON_SUFFIX)
}

/// HTTP client for asset metadata downloads.
#[derive(Clone)]
pub struct AssetClient {
    client: reqwest::Client,
}

impl AssetClient {
    /// Create a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Download an asset's JSON representation.
    ///
    /// Returns `Ok(None)` on an HTTP error status (logged here with
    /// status and reason). Transport failures and bodies that are not
    /// valid JSON are fatal.
    pub async fn fetch_asset_json(&self, url: &str) -> FetchResult<Option<Value>> {
        let target = asset_json_url(url);
        let response = self.client.get(&target).send().await?;
        let status = response.status();

        if status.as_u16() >= 400 {
            log_warning(format!(
                "Failed to get {}. Status Code: {} - {}",
                target,
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown")
            ));
            return Ok(None);
        }

        let body = response.text().await?;
        let value = serde_json::from_str(&body).map_err(|source| FetchError::InvalidJson {
            url: target,
            source,
        })?;
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    #[test]
    fn test_asset_json_url() {
        assert_eq!(asset_json_url("http://dam/a.pdf"), "http://dam/a.pdf.2.json");
    }

    #[test]
    fn test_asset_json_url_trims_whitespace() {
        assert_eq!(
            asset_json_url("  http://dam/a.pdf \n"),
            "http://dam/a.pdf.2.json"
        );
    }

    /// Serve one canned HTTP/1.1 response on a local port.
    fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{}/asset", addr)
    }

    #[tokio::test]
    async fn test_fetch_ok_parses_json() {
        let url = one_shot_server("HTTP/1.1 200 OK", r#"{"jcr:content":{"metadata":{}}}"#);
        let client = AssetClient::new(Duration::from_secs(5)).unwrap();

        let value = client.fetch_asset_json(&url).await.unwrap().unwrap();
        assert!(value.get("jcr:content").is_some());
    }

    #[tokio::test]
    async fn test_fetch_http_error_is_no_data() {
        let url = one_shot_server("HTTP/1.1 404 Not Found", "not found");
        let client = AssetClient::new(Duration::from_secs(5)).unwrap();

        let result = client.fetch_asset_json(&url).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_fetch_invalid_json_is_fatal() {
        let url = one_shot_server("HTTP/1.1 200 OK", "<html>surprise</html>");
        let client = AssetClient::new(Duration::from_secs(5)).unwrap();

        let err = client.fetch_asset_json(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidJson { .. }));
    }

    #[tokio::test]
    async fn test_fetch_refused_connection_is_fatal() {
        // Bind then drop to get a port with nothing listening.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = AssetClient::new(Duration::from_secs(5)).unwrap();

        let result = client
            .fetch_asset_json(&format!("http://127.0.0.1:{port}/gone"))
            .await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
