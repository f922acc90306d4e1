use vmc_domain::instance::SourceKind;
use vmc_domain::{PowerStatus, VmInstanceListItem};

/// Specification for creating a VM instance.
#[derive(Debug, Clone)]
pub struct CreateInstanceSpec {
    pub name: String,
    pub description: String,
    pub host: String,
    pub flavor_id: i64,
    pub source_kind: SourceKind,
    pub source_id: i64,
}

/// One page of the instance list.
#[derive(Debug, Clone)]
pub struct VmInstancePage {
    pub page_size: u32,
    pub page_number: u32,
    pub total_page_count: u32,
    pub total_count: u64,
    pub items: Vec<VmInstanceListItem>,
}

/// Outcome of a power-state change request.
#[derive(Debug, Clone)]
pub struct PowerStatusReceipt {
    pub success: bool,
    pub message: Option<String>,
    pub instance_id: String,
    pub new_power_status: Option<PowerStatus>,
}

/// Outcome of an instance deletion request.
#[derive(Debug, Clone)]
pub struct DeleteReceipt {
    pub instance_id: String,
    pub is_accepted: bool,
    pub is_deleted: bool,
}
