use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::store::decode_records;
use shared::{
    AppConfig, AttendanceRecord, CreateRecordRequest, MonthlyStat, RecordStore, StoreError,
    UpdateRecordRequest,
};
use web_sys::AbortSignal;

use super::config::app_config;

/// API client for the remote attendance store
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    config: AppConfig,
    abort_signal: Option<AbortSignal>,
}

impl ApiClient {
    /// Create a new API client with the configured base URL
    pub fn new() -> Self {
        Self::with_config(app_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            abort_signal: None,
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self::with_config(AppConfig::new(base_url))
    }

    /// Copy of this client whose requests are all tied to `signal`
    pub fn with_abort_signal(&self, signal: AbortSignal) -> Self {
        Self {
            config: self.config.clone(),
            abort_signal: Some(signal),
        }
    }

    /// True once the owning component has gone away
    pub fn is_aborted(&self) -> bool {
        self.abort_signal
            .as_ref()
            .map(|s| s.aborted())
            .unwrap_or(false)
    }

    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    fn owner_path(prefix: &str, owner_email: &str) -> String {
        let encoded: String = js_sys::encode_uri_component(owner_email).into();
        format!("{}{}", prefix, encoded)
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Accept", "application/json")
            .abort_signal(self.abort_signal.as_ref())
    }

    fn transport_error(&self, e: gloo::net::Error) -> StoreError {
        if self.is_aborted() {
            StoreError::Aborted
        } else {
            StoreError::Network(e.to_string())
        }
    }

    async fn send(&self, request: Result<Request, gloo::net::Error>) -> Result<Response, StoreError> {
        let request = request.map_err(|e| StoreError::Encode(e.to_string()))?;
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        if response.ok() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(StoreError::Status { status, body })
        }
    }

    async fn send_json<B: Serialize>(&self, builder: RequestBuilder, body: &B) -> Result<Response, StoreError> {
        self.send(self.prepare(builder).json(body)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, StoreError> {
        let response = self.send(self.prepare(Request::get(url)).build()).await?;
        response.json::<T>().await.map_err(|e| {
            if self.is_aborted() {
                StoreError::Aborted
            } else {
                StoreError::Decode(e.to_string())
            }
        })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for ApiClient {
    async fn create(&self, request: &CreateRecordRequest) -> Result<(), StoreError> {
        self.send_json(Request::post(&self.url("/")), request).await?;
        Ok(())
    }

    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<AttendanceRecord>, StoreError> {
        let url = self.url(&Self::owner_path("/", owner_email));
        let values: Vec<serde_json::Value> = self.get_json(&url).await?;
        Ok(decode_records(values))
    }

    async fn update(&self, id: &str, request: &UpdateRecordRequest) -> Result<(), StoreError> {
        let url = self.url(&format!("/{}", id));
        self.send_json(Request::put(&url), request).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = self.url(&format!("/{}", id));
        self.send(self.prepare(Request::delete(&url)).build()).await?;
        Ok(())
    }

    async fn monthly_stats(&self, owner_email: &str) -> Result<Vec<MonthlyStat>, StoreError> {
        let url = self.url(&Self::owner_path("/stats/monthly/", owner_email));
        self.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_owner_path_is_encoded() {
        assert_eq!(
            ApiClient::owner_path("/stats/monthly/", "first+last@example.com"),
            "/stats/monthly/first%2Blast%40example.com"
        );
    }

    #[wasm_bindgen_test]
    fn test_abort_signal_is_observed() {
        let controller = web_sys::AbortController::new().unwrap();
        let client = ApiClient::with_base_url("https://api.example.com/".to_string())
            .with_abort_signal(controller.signal());

        assert_eq!(client.base_url(), "https://api.example.com");
        assert!(!client.is_aborted());
        controller.abort();
        assert!(client.is_aborted());
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("body cannot be encoded"))
        }
    }

    #[wasm_bindgen_test]
    async fn test_unencodable_body_reports_encode_error() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9".to_string());

        let result = client.send_json(Request::post(&client.url("/")), &Unencodable).await;
        match result {
            Err(StoreError::Encode(message)) => assert!(message.contains("body cannot be encoded")),
            other => panic!("expected an encode error, got {:?}", other.map(|_| ())),
        }
    }

    #[wasm_bindgen_test]
    async fn test_aborted_client_reports_aborted() {
        let controller = web_sys::AbortController::new().unwrap();
        controller.abort();
        let client = ApiClient::with_base_url("http://127.0.0.1:9".to_string())
            .with_abort_signal(controller.signal());

        let result = client.list_by_owner("student@example.com").await;
        assert_eq!(result, Err(StoreError::Aborted));
    }
}
