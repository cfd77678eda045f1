use crate::api::jsonrpc::{ApiError, ApiRequest, Method, RpcResponse};
use crate::api::models::*;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(build_http_client);
static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

#[cfg(not(target_arch = "wasm32"))]
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(target_arch = "wasm32")]
fn build_http_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// JSON-RPC client for one myMPD partition.
pub struct MympdClient {
    pub server: ServerConfig,
}

impl MympdClient {
    pub fn new(server: ServerConfig) -> Self {
        Self { server }
    }

    pub async fn call<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        let id = REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        debug!(target: "api", method = %request.method, id, "sending request");

        let response = HTTP_CLIENT
            .post(self.server.api_url())
            .json(&request.envelope(id))
            .send()
            .await?;
        let body = response.text().await?;
        let parsed: RpcResponse<T> = serde_json::from_str(&body)?;
        parsed.into_result()
    }

    /// Sends a mutating request and ignores the reply; failures are only logged.
    pub async fn dispatch(&self, request: ApiRequest) {
        if let Err(err) = self.call::<Value>(&request).await {
            warn!(target: "api", method = %request.method, error = %err, "request failed");
        }
    }

    pub async fn list_outputs(&self) -> Result<OutputList, ApiError> {
        self.call(&ApiRequest::empty(Method::PlayerOutputList)).await
    }

    pub async fn get_volume(&self) -> Result<VolumeResult, ApiError> {
        self.call(&ApiRequest::empty(Method::PlayerVolumeGet)).await
    }

    pub async fn list_jukebox(&self, request: &ApiRequest) -> Result<JukeboxList, ApiError> {
        debug_assert_eq!(request.method, Method::JukeboxList);
        self.call(request).await
    }

    pub async fn get_settings(&self) -> Result<PartitionSettings, ApiError> {
        self.call(&ApiRequest::empty(Method::SettingsGet)).await
    }
}
