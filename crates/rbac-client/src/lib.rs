// ============================================================================
// RBAC Client - HTTP Role Repository
// File: crates/rbac-client/src/lib.rs
// Description: reqwest adapter for the role API
// ============================================================================
//! [`RoleRepository`] over the dashboard's role endpoints.
//!
//! | Operation    | Request                  |
//! |--------------|--------------------------|
//! | list         | `GET {base}/roles`       |
//! | find_by_id   | `GET {base}/roles/{id}`  |
//! | upsert (new) | `POST {base}/roles`      |
//! | upsert (id)  | `PUT {base}/roles/{id}`  |
//! | delete       | `DELETE {base}/roles/{id}` |
//!
//! Response bodies may be bare or wrapped in `{ "data": ... }`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use rbac_core::repositories::RoleRepository;
use rbac_core::{DomainError, Role, RoleUpsert};
use rbac_shared::config::ApiSettings;

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

#[derive(Clone)]
pub struct HttpRoleRepository {
    client: Client,
    base_url: String,
    roles: Url,
}

impl HttpRoleRepository {
    pub fn new(settings: &ApiSettings) -> Result<Self, DomainError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| DomainError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        let mut roles = Url::parse(&settings.base_url).map_err(|e| {
            DomainError::ValidationError(format!("Invalid api.base_url {}: {}", settings.base_url, e))
        })?;
        roles
            .path_segments_mut()
            .map_err(|_| DomainError::ValidationError(format!("api.base_url {} cannot hold a path", settings.base_url)))?
            .pop_if_empty()
            .push("roles");

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            roles,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn roles_url(&self) -> Url {
        self.roles.clone()
    }

    /// The id is pushed as one percent-encoded segment.
    fn role_url(&self, id: &str) -> Url {
        let mut url = self.roles.clone();
        // `new` already rejected cannot-be-a-base urls
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    async fn read_body<T: DeserializeOwned>(response: Response) -> Result<T, DomainError> {
        let text = response
            .text()
            .await
            .map_err(|e| DomainError::NetworkError(e.to_string()))?;
        let envelope: Envelope<T> = serde_json::from_str(&text)?;
        Ok(envelope.into_inner())
    }
}

fn network(error: reqwest::Error) -> DomainError {
    DomainError::NetworkError(error.to_string())
}

/// Turn a non-2xx response into [`DomainError::Api`].
async fn api_error(response: Response) -> DomainError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = error_message(&text).unwrap_or_else(|| {
        if text.trim().is_empty() {
            status.canonical_reason().unwrap_or("Request failed").to_string()
        } else {
            text.trim().to_string()
        }
    });

    warn!(status = status.as_u16(), "Role API error: {}", message);
    DomainError::Api {
        status: status.as_u16(),
        message,
    }
}

/// `message`, `error.message` or `error` from a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let candidates = [
        value.get("message"),
        value.get("error").and_then(|e| e.get("message")),
        value.get("error"),
    ];
    let found = candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str().map(str::to_string));
    found
}

#[async_trait]
impl RoleRepository for HttpRoleRepository {
    async fn list(&self) -> Result<Vec<Role>, DomainError> {
        debug!("GET {}", self.roles_url());
        let response = self.client.get(self.roles_url()).send().await.map_err(network)?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Self::read_body(response).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Role>, DomainError> {
        debug!("GET {}", self.role_url(id));
        let response = self.client.get(self.role_url(id)).send().await.map_err(network)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Self::read_body(response).await.map(Some)
    }

    async fn upsert(&self, role: &RoleUpsert) -> Result<Role, DomainError> {
        let request = match role.id.as_deref() {
            Some(id) => {
                debug!("PUT {}", self.role_url(id));
                self.client.put(self.role_url(id))
            }
            None => {
                debug!("POST {}", self.roles_url());
                self.client.post(self.roles_url())
            }
        };

        let response = request.json(role).send().await.map_err(network)?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Self::read_body(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        debug!("DELETE {}", self.role_url(id));
        let response = self.client.delete(self.role_url(id)).send().await.map_err(network)?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }
}
