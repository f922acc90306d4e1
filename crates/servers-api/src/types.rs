use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vmc_domain::PowerStatus;

// ── Envelope ─────────────────────────────────────────────────────────

/// Every servers endpoint wraps its payload in `{ data, message, code }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    pub message: String,
    pub code: String,
}

/// Error body the servers service produces for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub timestamp: String,
    pub path: String,
}

// ── Requests ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceRequest {
    pub name: String,
    pub description: String,
    pub host: String,
    pub flavor_id: i64,
    pub source_type: u8,
    pub source_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteInstanceRequest {
    pub instance_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePowerStatusRequest {
    pub instance_id: i64,
    /// Power-action wire code ("0".."3"), not a power-status code.
    pub power_status_action: String,
}

// ── Responses ────────────────────────────────────────────────────────

/// Single-instance lookup response. Minimal field set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDetail {
    pub id: i64,
    pub name: String,
    pub alias: String,
    pub power_status: PowerStatus,
    pub host: String,
}

/// List-row response: detail fields plus description, source, and flavor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceRecord {
    pub id: i64,
    pub name: String,
    pub alias: String,
    pub power_status: PowerStatus,
    pub host: String,
    pub description: String,
    pub source: SourceRecord,
    pub flavor: FlavorRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub memory: i64,
    pub root_disk: i64,
    pub vcpu: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstancePage {
    pub page_size: u32,
    pub page_number: u32,
    pub total_page_count: u32,
    pub total_count: u64,
    pub data: Vec<InstanceRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerStatusUpdate {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub instance_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_power_status: Option<PowerStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReceipt {
    pub instance_id: i64,
    pub is_accepted: bool,
    pub is_deleted: bool,
}
