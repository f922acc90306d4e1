//! Typed Rust client for the VM console's servers API.
//!
//! Covers the instance surface used by the console: get one, paged list,
//! create, delete, and power-state changes. Responses arrive in a
//! `{ data, message, code }` envelope which this crate unwraps.

mod types;

pub use types::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("servers api request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("servers api {endpoint} returned {status}: {message}")]
    Api {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        message: String,
        /// Parsed `{error, code, timestamp, path}` body, when the server sent one.
        body: Option<ErrorBody>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Client for the servers REST API.
#[derive(Clone)]
pub struct ServersClient {
    base_url: String,
    http: reqwest::Client,
}

impl ServersClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn check(resp: reqwest::Response, endpoint: &'static str) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(normalize_error(endpoint, status, &body));
        }
        Ok(resp)
    }

    async fn unwrap_envelope<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T> {
        let envelope: ApiEnvelope<T> = resp.json().await?;
        Ok(envelope.data)
    }

    // ── Instances ────────────────────────────────────────────────────

    pub async fn get_instance(&self, instance_id: i64) -> Result<InstanceDetail> {
        let resp = self
            .http
            .get(self.url(&format!("/api/v1/servers/instances/{instance_id}")))
            .send()
            .await?;

        Self::unwrap_envelope(Self::check(resp, "get instance").await?).await
    }

    pub async fn list_instances(&self, page: u32, size: u32) -> Result<InstancePage> {
        let resp = self
            .http
            .get(self.url("/api/v1/servers/instances"))
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;

        Self::unwrap_envelope(Self::check(resp, "list instances").await?).await
    }

    pub async fn create_instance(&self, req: &CreateInstanceRequest) -> Result<InstanceRecord> {
        let resp = self
            .http
            .post(self.url("/api/v1/servers/instances"))
            .json(req)
            .send()
            .await?;

        Self::unwrap_envelope(Self::check(resp, "create instance").await?).await
    }

    pub async fn delete_instance(&self, instance_id: i64) -> Result<DeleteReceipt> {
        let resp = self
            .http
            .delete(self.url("/api/v1/servers/instances"))
            .json(&DeleteInstanceRequest { instance_id })
            .send()
            .await?;

        Self::unwrap_envelope(Self::check(resp, "delete instance").await?).await
    }

    pub async fn update_power_status(
        &self,
        instance_id: i64,
        power_status_action: &str,
    ) -> Result<PowerStatusUpdate> {
        let resp = self
            .http
            .put(self.url("/api/v1/servers/instances/power"))
            .json(&UpdatePowerStatusRequest {
                instance_id,
                power_status_action: power_status_action.to_string(),
            })
            .send()
            .await?;

        Self::unwrap_envelope(Self::check(resp, "update power status").await?).await
    }
}

/// Normalize a non-2xx response into [`Error::Api`].
///
/// Uses the server's `{error, code, timestamp, path}` body when it parses,
/// otherwise synthesizes a message from the HTTP status.
fn normalize_error(endpoint: &'static str, status: reqwest::StatusCode, body: &str) -> Error {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => Error::Api {
            endpoint,
            status,
            message: parsed.error.clone(),
            body: Some(parsed),
        },
        Err(_) => Error::Api {
            endpoint,
            status,
            message: format!("HTTP {status}"),
            body: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn unparsable_error_body_synthesizes_from_status() {
        let err = normalize_error("delete instance", StatusCode::INTERNAL_SERVER_ERROR, "");
        let Error::Api { message, body, .. } = &err else {
            panic!("expected Api error");
        };
        assert!(message.contains("500"), "message was {message:?}");
        assert!(body.is_none());
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn structured_error_body_is_surfaced() {
        let raw = r#"{
            "error": "instance is locked",
            "code": "INSTANCE_LOCKED",
            "timestamp": "2024-01-15T09:00:00Z",
            "path": "/api/v1/servers/instances/power"
        }"#;
        let err = normalize_error("update power status", StatusCode::CONFLICT, raw);
        let Error::Api { message, body, .. } = &err else {
            panic!("expected Api error");
        };
        assert_eq!(message, "instance is locked");
        let body = body.as_ref().unwrap();
        assert_eq!(body.code, "INSTANCE_LOCKED");
        assert_eq!(body.path, "/api/v1/servers/instances/power");
    }

    #[test]
    fn envelope_unwraps_to_data() {
        let raw = r#"{
            "data": {
                "id": 1,
                "name": "production-web-server",
                "alias": "web-prod-001",
                "powerStatus": "RUNNING",
                "host": "prod-host-01.company.com"
            },
            "message": "ok",
            "code": "200"
        }"#;
        let envelope: ApiEnvelope<InstanceDetail> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.data.id, 1);
        assert_eq!(envelope.data.power_status, vmc_domain::PowerStatus::Running);
    }

    #[test]
    fn list_page_deserializes_camel_case() {
        let raw = r#"{
            "pageSize": 2,
            "pageNumber": 0,
            "totalPageCount": 2,
            "totalCount": 3,
            "data": [{
                "id": 3,
                "name": "staging-database",
                "alias": "db-staging-003",
                "powerStatus": "PAUSED",
                "host": "staging-host-03.company.com",
                "description": "Staging database server",
                "source": { "type": "image", "id": 103, "name": "postgresql-14" },
                "flavor": {
                    "id": 203,
                    "name": "large-8",
                    "description": "8 vCPU, 16GB RAM, 200GB Disk",
                    "memory": 16384,
                    "rootDisk": 200,
                    "vcpu": 8
                },
                "createdAt": "2023-03-10T11:45:00.000Z"
            }]
        }"#;
        let page: InstancePage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.page_number, 0);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.data[0].flavor.root_disk, 200);
        assert_eq!(page.data[0].source.kind, "image");
    }

    #[test]
    fn power_request_serializes_action_code() {
        let req = UpdatePowerStatusRequest {
            instance_id: 7,
            power_status_action: "2".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["instanceId"], 7);
        assert_eq!(json["powerStatusAction"], "2");
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = ServersClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
