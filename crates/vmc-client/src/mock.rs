//! In-memory mock backends for development builds.
//!
//! No network I/O and no failures: every call sleeps a randomized,
//! per-method latency and returns data from a fixed fixture set, so the UI
//! can be exercised without the real services.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures_util::StreamExt;
use rand::Rng;
use tracing::debug;

use agent_api::{
    AgentHealth, AgentResponse, ChatRequest, Conversation, ResponseMetadata, ResponseStatus,
};
use vmc_domain::{
    PowerAction, PowerStatus, VmFlavor, VmInstance, VmInstanceListItem, VmSource,
};

use crate::types::{CreateInstanceSpec, DeleteReceipt, PowerStatusReceipt, VmInstancePage};
use crate::{ChatApi, ChatStream, Result, VmApi};

/// Total size of the mock instance fixture set.
pub const MOCK_INSTANCE_COUNT: u32 = 10;

async fn simulate_latency(base_ms: u64, jitter_ms: u64) {
    let jitter = rand::rng().random_range(0..=jitter_ms);
    tokio::time::sleep(Duration::from_millis(base_ms + jitter)).await;
}

fn standard_flavor() -> VmFlavor {
    VmFlavor {
        id: 200,
        name: "standard-2".into(),
        description: "2 vCPU, 4GB RAM, 40GB Disk".into(),
        memory: 4096,
        root_disk: 40,
        vcpu: 2.0,
    }
}

/// Deterministic filler instance, used beyond the three curated fixtures.
fn generated_instance(id: i64) -> VmInstanceListItem {
    VmInstanceListItem {
        name: format!("vm-instance-{id}"),
        id: id.to_string(),
        power_state: PowerStatus::Running,
        alias: format!("vm-{id}"),
        host: format!("host-{id}.example.com"),
        description: format!("Mock VM instance {id}"),
        source: VmSource {
            kind: "image".into(),
            id: 100,
            name: "default-image".into(),
        },
        flavor: standard_flavor(),
    }
}

fn curated_instances() -> Vec<VmInstanceListItem> {
    vec![
        VmInstanceListItem {
            name: "production-web-server".into(),
            id: "1".into(),
            power_state: PowerStatus::Running,
            alias: "web-prod-001".into(),
            host: "prod-host-01.company.com".into(),
            description: "Production web server for main application".into(),
            source: VmSource {
                kind: "image".into(),
                id: 101,
                name: "ubuntu-22.04-lts".into(),
            },
            flavor: VmFlavor {
                id: 201,
                name: "standard-4".into(),
                description: "4 vCPU, 8GB RAM, 80GB Disk".into(),
                memory: 8192,
                root_disk: 80,
                vcpu: 4.0,
            },
        },
        VmInstanceListItem {
            name: "development-api-server".into(),
            id: "2".into(),
            power_state: PowerStatus::Shutdown,
            alias: "api-dev-002".into(),
            host: "dev-host-02.company.com".into(),
            description: "Development API server for testing".into(),
            source: VmSource {
                kind: "image".into(),
                id: 102,
                name: "centos-8-stream".into(),
            },
            flavor: VmFlavor {
                id: 202,
                name: "small-2".into(),
                description: "2 vCPU, 4GB RAM, 40GB Disk".into(),
                memory: 4096,
                root_disk: 40,
                vcpu: 2.0,
            },
        },
        VmInstanceListItem {
            name: "staging-database".into(),
            id: "3".into(),
            power_state: PowerStatus::Paused,
            alias: "db-staging-003".into(),
            host: "staging-host-03.company.com".into(),
            description: "Staging database server".into(),
            source: VmSource {
                kind: "image".into(),
                id: 103,
                name: "postgresql-14".into(),
            },
            flavor: VmFlavor {
                id: 203,
                name: "large-8".into(),
                description: "8 vCPU, 16GB RAM, 200GB Disk".into(),
                memory: 16384,
                root_disk: 200,
                vcpu: 8.0,
            },
        },
    ]
}

/// The full fixture dataset: three curated instances plus deterministic fill.
fn instance_dataset() -> Vec<VmInstanceListItem> {
    let mut instances = curated_instances();
    for id in (instances.len() as i64 + 1)..=(MOCK_INSTANCE_COUNT as i64) {
        instances.push(generated_instance(id));
    }
    instances
}

fn find_instance(instance_id: &str) -> VmInstanceListItem {
    instance_dataset()
        .into_iter()
        .find(|vm| vm.id == instance_id)
        .unwrap_or_else(|| generated_instance(instance_id.parse().unwrap_or(0)))
}

/// Mock VM service backend.
pub struct MockVmApi {
    next_id: AtomicI64,
}

impl MockVmApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1000),
        }
    }
}

impl Default for MockVmApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VmApi for MockVmApi {
    async fn get_instance(&self, instance_id: &str) -> Result<VmInstance> {
        simulate_latency(500, 1000).await;
        debug!(instance_id = %instance_id, "mock: fetching VM instance");
        Ok(find_instance(instance_id).as_instance())
    }

    async fn get_instance_list(&self, page: u32, size: u32) -> Result<VmInstancePage> {
        simulate_latency(300, 700).await;
        debug!(page, size, "mock: fetching VM instance list");

        let dataset = instance_dataset();
        let total_count = dataset.len() as u64;
        // size 0 only affects the page math; the slice below is empty anyway.
        let per_page = size.max(1) as u64;
        let total_page_count = total_count.div_ceil(per_page) as u32;

        let start = page as usize * size as usize;
        let items: Vec<_> = dataset
            .into_iter()
            .skip(start)
            .take(size as usize)
            .collect();

        Ok(VmInstancePage {
            page_size: size,
            page_number: page,
            total_page_count,
            total_count,
            items,
        })
    }

    async fn create_instance(&self, spec: &CreateInstanceSpec) -> Result<VmInstanceListItem> {
        simulate_latency(1000, 2000).await;
        debug!(name = %spec.name, "mock: creating VM instance");

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let base = generated_instance(id);
        Ok(VmInstanceListItem {
            name: spec.name.clone(),
            description: spec.description.clone(),
            host: spec.host.clone(),
            source: VmSource {
                kind: spec.source_kind.as_str().into(),
                id: spec.source_id,
                name: format!("image_{}", spec.source_id),
            },
            flavor: VmFlavor {
                id: spec.flavor_id,
                ..standard_flavor()
            },
            ..base
        })
    }

    async fn delete_instance(&self, instance_id: &str) -> Result<DeleteReceipt> {
        simulate_latency(1000, 1500).await;
        debug!(instance_id = %instance_id, "mock: deleting VM instance");
        Ok(DeleteReceipt {
            instance_id: instance_id.to_string(),
            is_accepted: true,
            is_deleted: true,
        })
    }

    async fn update_power_status(
        &self,
        instance_id: &str,
        action: PowerAction,
    ) -> Result<PowerStatusReceipt> {
        simulate_latency(1000, 1000).await;
        debug!(instance_id = %instance_id, action = %action, "mock: updating power status");

        let new_power_status = match action {
            PowerAction::Start | PowerAction::Reboot => PowerStatus::Running,
            PowerAction::Shutdown => PowerStatus::Shutdown,
            PowerAction::Pause => PowerStatus::Paused,
        };

        Ok(PowerStatusReceipt {
            success: true,
            message: Some(format!(
                "Power status action '{}' applied successfully",
                action.code()
            )),
            instance_id: instance_id.to_string(),
            new_power_status: Some(new_power_status),
        })
    }
}

const CANNED_RESPONSES: [&str; 4] = [
    "Hello! How can I help you today?",
    "Sure, what would you like to know?",
    "I'm here to help, just ask away!",
    "Hi! What question do you have?",
];

fn canned_response() -> AgentResponse {
    let content = CANNED_RESPONSES[rand::rng().random_range(0..CANNED_RESPONSES.len())];
    AgentResponse {
        content: content.into(),
        conversation_id: format!("conv-{}", uuid::Uuid::new_v4().simple()),
        timestamp: Utc::now(),
        is_streaming: false,
        sources: Vec::new(),
        metadata: ResponseMetadata {
            response_time: Some("150ms".into()),
            tools_used: Some(vec!["chat_assistant".into()]),
            ..ResponseMetadata::default()
        },
        status: ResponseStatus::Success,
    }
}

fn canned_conversations() -> Vec<Conversation> {
    vec![
        Conversation {
            id: "conv-1".into(),
            user_id: "user-123".into(),
            title: "Server status check".into(),
            summary: "Checked server status and asked about monitoring setup".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
            last_activity: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            message_count: 5,
            is_active: true,
        },
        Conversation {
            id: "conv-2".into(),
            user_id: "user-123".into(),
            title: "Metrics analysis request".into(),
            summary: "Requested analysis of performance metrics and usage data".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 14, 14, 20, 0).unwrap(),
            last_activity: Utc.with_ymd_and_hms(2024, 1, 14, 15, 45, 0).unwrap(),
            message_count: 8,
            is_active: false,
        },
        Conversation {
            id: "conv-3".into(),
            user_id: "user-123".into(),
            title: "Insight report".into(),
            summary: "Discussed system insights and optimization options".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 13, 11, 10, 0).unwrap(),
            last_activity: Utc.with_ymd_and_hms(2024, 1, 13, 12, 0, 0).unwrap(),
            message_count: 3,
            is_active: true,
        },
    ]
}

/// Mock chat service backend.
pub struct MockChatApi;

impl MockChatApi {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockChatApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatApi for MockChatApi {
    async fn send_message(&self, req: &ChatRequest) -> Result<AgentResponse> {
        simulate_latency(500, 1000).await;
        debug!(message = %req.message, "mock: chat message");
        Ok(canned_response())
    }

    async fn send_message_with_system_prompt(
        &self,
        req: &ChatRequest,
        _system_prompt: &str,
    ) -> Result<AgentResponse> {
        simulate_latency(700, 1000).await;
        debug!(message = %req.message, "mock: chat message with system prompt");
        Ok(canned_response())
    }

    async fn create_streaming_chat(
        &self,
        _message: &str,
        _conversation_id: Option<&str>,
        _user_id: Option<&str>,
    ) -> Result<ChatStream> {
        let response = canned_response();
        let chunks: Vec<String> = response
            .content
            .split_inclusive(' ')
            .map(str::to_string)
            .collect();

        let stream: ChatStream = futures_util::stream::iter(chunks)
            .then(|chunk| async move {
                tokio::time::sleep(Duration::from_millis(40)).await;
                Ok(chunk)
            })
            .boxed();
        Ok(stream)
    }

    async fn get_conversations(
        &self,
        _user_id: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<Conversation>> {
        simulate_latency(200, 300).await;
        let conversations = canned_conversations();
        Ok(if active_only {
            conversations.into_iter().filter(|c| c.is_active).collect()
        } else {
            conversations
        })
    }

    async fn delete_conversation(
        &self,
        conversation_id: &str,
        _user_id: Option<&str>,
    ) -> Result<()> {
        simulate_latency(200, 300).await;
        debug!(conversation_id = %conversation_id, "mock: conversation deleted");
        Ok(())
    }

    async fn get_health(&self) -> Result<AgentHealth> {
        simulate_latency(100, 200).await;
        Ok(AgentHealth {
            status: "UP".into(),
            service: "AI Agent".into(),
            timestamp: Utc::now().timestamp_millis(),
            active_conversations: 25,
        })
    }
}
