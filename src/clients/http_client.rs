//! Reqwest-backed user collection adapter.
//!
//! This adapter owns transport details only: URL construction, request bodies,
//! HTTP status mapping and JSON decoding. It never retries.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::clients::{ClientError, UserCollection};
use crate::config::ClientConfig;
use crate::model::{User, UserDraft, UserId};
use crate::validation::ValidationErrors;

/// Path of the collection resource relative to the base URL.
pub const USERS_PATH: &str = "users";

/// Failure body shape: `{ "message": "...", "errors": { "field": "..." } }`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, String>>,
}

/// User collection served over HTTP at `{base_url}/users`.
#[derive(Debug, Clone)]
pub struct HttpUserClient {
    client: Client,
    collection: Url,
}

impl HttpUserClient {
    /// Build an adapter without a request timeout.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the base URL cannot hold a path or the
    /// reqwest client cannot be constructed.
    pub fn new(base_url: &Url) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, None)
    }

    /// Build an adapter with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Same as [`HttpUserClient::new`].
    pub fn with_timeout(base_url: &Url, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::transport(format!("failed to build HTTP client: {e}")))?;
        let collection = resolve_collection(base_url)?;
        info!(%collection, ?timeout, "HTTP user client ready");
        Ok(Self { client, collection })
    }

    /// Build an adapter from the loaded client configuration.
    ///
    /// # Errors
    ///
    /// Same as [`HttpUserClient::new`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    /// URL of the collection resource.
    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    fn item_url(&self, id: &UserId) -> Result<Url, ClientError> {
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::transport("base URL cannot carry a path"))?
            .push(id.as_str());
        Ok(url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, ClientError> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let error = map_status_error(status, body.as_ref());
            warn!(status = status.as_u16(), error = %error, "Request rejected");
            return Err(error);
        }
        debug!(status = status.as_u16(), bytes = body.len(), "Response received");
        Ok(body.to_vec())
    }
}

#[async_trait]
impl UserCollection for HttpUserClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>, ClientError> {
        debug!("Sending request");
        let body = self.execute(self.client.get(self.collection.clone())).await?;
        decode(&body)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &UserId) -> Result<User, ClientError> {
        debug!("Sending request");
        let body = self.execute(self.client.get(self.item_url(id)?)).await?;
        decode(&body)
    }

    #[instrument(skip(self))]
    async fn create(&self, draft: &UserDraft) -> Result<User, ClientError> {
        debug!("Sending request");
        let request = self.client.post(self.collection.clone()).json(draft);
        let body = self.execute(request).await?;
        decode(&body)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, ClientError> {
        debug!("Sending request");
        let request = self.client.put(self.item_url(id)?).json(draft);
        let body = self.execute(request).await?;
        decode(&body)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &UserId) -> Result<(), ClientError> {
        debug!("Sending request");
        self.execute(self.client.delete(self.item_url(id)?)).await?;
        Ok(())
    }
}

fn resolve_collection(base_url: &Url) -> Result<Url, ClientError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(USERS_PATH)
        .map_err(|e| ClientError::transport(format!("invalid base URL '{base_url}': {e}")))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(body)
        .map_err(|e| ClientError::transport(format!("invalid response payload: {e}")))
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::transport(format!("request timed out: {error}"))
    } else {
        ClientError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ClientError {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let server_message = parsed.message.filter(|message| !message.trim().is_empty());
    let field_errors = parsed
        .errors
        .map(ValidationErrors::from_server)
        .unwrap_or_default();

    if status.is_client_error() && !field_errors.is_empty() {
        return ClientError::Validation {
            server_message,
            field_errors,
        };
    }

    ClientError::Transport {
        message: format!("Request failed with status code {}", status.as_u16()),
        server_message,
    }
}
