//! HTTP transport to the world backend.
//!
//! Every call sends exactly one request: no retry, no backoff, no
//! timeout. Failures to reach the backend or to decode its reply surface
//! as [`EditorError`]s; an HTTP error status does not. The status is
//! logged and the JSON body is handed back to the caller as if the call
//! had succeeded.

use hexcrawl_types::{Endpoint, WorldSnapshot};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::EditorError;

/// JSON-over-HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    base_url: String,
}

impl Transport {
    /// Create a transport for the backend at `base_url`
    /// (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The backend base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// POST `payload` as JSON to `endpoint` and return the decoded reply.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Transport`] if no response arrives and
    /// [`EditorError::Decode`] if the body is not JSON. A 4xx/5xx reply
    /// with a JSON body is returned as `Ok`.
    pub async fn post<P>(&self, endpoint: Endpoint, payload: &P) -> Result<serde_json::Value, EditorError>
    where
        P: Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        debug!(endpoint = endpoint.path(), "sending mutation");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| EditorError::Transport(format!("POST {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| EditorError::Transport(format!("reading reply from {url} failed: {e}")))?;

        note_status(endpoint, status);

        serde_json::from_slice(&body)
            .map_err(|e| EditorError::Decode(format!("{} replied with non-JSON body: {e}", endpoint.path())))
    }

    /// GET the full world snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Transport`] if no response arrives and
    /// [`EditorError::Decode`] if the body is not a world snapshot.
    pub async fn fetch_world(&self) -> Result<WorldSnapshot, EditorError> {
        let endpoint = Endpoint::World;
        let url = self.url(endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| EditorError::Transport(format!("GET {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| EditorError::Transport(format!("reading reply from {url} failed: {e}")))?;

        note_status(endpoint, status);

        serde_json::from_slice(&body)
            .map_err(|e| EditorError::Decode(format!("world snapshot did not decode: {e}")))
    }
}

/// Log an error status without acting on it.
fn note_status(endpoint: Endpoint, status: StatusCode) {
    if status.is_success() {
        debug!(endpoint = endpoint.path(), status = status.as_u16(), "backend replied");
    } else {
        warn!(
            endpoint = endpoint.path(),
            status = status.as_u16(),
            "backend returned an error status; continuing as if it succeeded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let transport = Transport::new("http://localhost:8000/");
        assert_eq!(transport.base_url(), "http://localhost:8000");
        assert_eq!(transport.url(Endpoint::Paint), "http://localhost:8000/api/paint");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        // Bind then drop a listener so the port is known to be closed.
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            return;
        };
        let Ok(addr) = listener.local_addr() else {
            return;
        };
        drop(listener);

        let transport = Transport::new(&format!("http://{addr}"));
        let result = transport.fetch_world().await;
        assert!(matches!(result, Err(EditorError::Transport(_))));

        let result = transport.post(Endpoint::Simulate, &serde_json::json!({"days": "1"})).await;
        assert!(matches!(result, Err(EditorError::Transport(_))));
    }
}
