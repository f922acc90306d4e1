//! Backend access layer for the VM console.
//!
//! Exposes one capability trait per service domain ([`VmApi`], [`ChatApi`])
//! with two interchangeable implementations each: an HTTP client for the real
//! services and an in-memory mock for development. [`ApiProviders`] picks one
//! per domain from [`ApiConfig`] and memoizes it for its lifetime.

pub mod config;
pub mod http;
pub mod mock;
pub mod types;

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use futures_util::stream::BoxStream;

pub use agent_api::{AgentHealth, AgentResponse, ChatRequest, Conversation};
pub use config::{ApiConfig, BackendKind, RunMode};
pub use types::{CreateInstanceSpec, DeleteReceipt, PowerStatusReceipt, VmInstancePage};
use vmc_domain::{PowerAction, VmInstance, VmInstanceListItem};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("servers api error: {0}")]
    Servers(#[from] servers_api::Error),

    #[error("agent api error: {0}")]
    Agent(#[from] agent_api::Error),

    #[error("domain error: {0}")]
    Domain(#[from] vmc_domain::Error),

    #[error("invalid instance id: {0}")]
    InvalidId(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// `data:` payloads of a streaming chat, in arrival order.
pub type ChatStream = BoxStream<'static, Result<String>>;

/// Backend-agnostic interface to the VM instance service.
///
/// Both the HTTP and the mock backend satisfy these signatures, so callers
/// never learn which one is active.
#[async_trait]
pub trait VmApi: Send + Sync + 'static {
    /// Fetch one instance (detail variant).
    async fn get_instance(&self, instance_id: &str) -> Result<VmInstance>;

    /// Fetch one page of the instance list (full variant rows).
    async fn get_instance_list(&self, page: u32, size: u32) -> Result<VmInstancePage>;

    /// Create an instance from the given spec.
    async fn create_instance(&self, spec: &CreateInstanceSpec) -> Result<VmInstanceListItem>;

    /// Request deletion of an instance.
    async fn delete_instance(&self, instance_id: &str) -> Result<DeleteReceipt>;

    /// Apply a power action to an instance.
    async fn update_power_status(
        &self,
        instance_id: &str,
        action: PowerAction,
    ) -> Result<PowerStatusReceipt>;
}

/// Backend-agnostic interface to the AI chat assistant service.
#[async_trait]
pub trait ChatApi: Send + Sync + 'static {
    async fn send_message(&self, req: &ChatRequest) -> Result<AgentResponse>;

    async fn send_message_with_system_prompt(
        &self,
        req: &ChatRequest,
        system_prompt: &str,
    ) -> Result<AgentResponse>;

    /// Open a streaming chat; the stream yields response fragments.
    async fn create_streaming_chat(
        &self,
        message: &str,
        conversation_id: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<ChatStream>;

    async fn get_conversations(
        &self,
        user_id: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<Conversation>>;

    async fn delete_conversation(
        &self,
        conversation_id: &str,
        user_id: Option<&str>,
    ) -> Result<()>;

    async fn get_health(&self) -> Result<AgentHealth>;
}

/// Registry of the resolved API backends, owned by the composition root.
///
/// Each domain's backend is chosen on first use and cached for the lifetime
/// of the registry; repeated calls hand out the same instance. The once-only
/// cells make that a real compute-once guarantee even under concurrent first
/// calls.
pub struct ApiProviders {
    config: ApiConfig,
    vm: OnceLock<Arc<dyn VmApi>>,
    chat: OnceLock<Arc<dyn ChatApi>>,
}

impl ApiProviders {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            vm: OnceLock::new(),
            chat: OnceLock::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The VM service client, resolved once per registry.
    pub fn vm(&self) -> Arc<dyn VmApi> {
        self.vm
            .get_or_init(|| {
                let kind = self.config.backend();
                tracing::info!(backend = kind.as_str(), "resolved VM API backend");
                let client: Arc<dyn VmApi> = match kind {
                    BackendKind::Mock => Arc::new(mock::MockVmApi::new()),
                    BackendKind::Http => Arc::new(http::HttpVmApi::new(
                        servers_api::ServersClient::new(&self.config.servers_api_url),
                    )),
                };
                client
            })
            .clone()
    }

    /// The chat service client, resolved once per registry.
    pub fn chat(&self) -> Arc<dyn ChatApi> {
        self.chat
            .get_or_init(|| {
                let kind = self.config.backend();
                tracing::info!(backend = kind.as_str(), "resolved chat API backend");
                let client: Arc<dyn ChatApi> = match kind {
                    BackendKind::Mock => Arc::new(mock::MockChatApi::new()),
                    BackendKind::Http => Arc::new(http::HttpChatApi::new(
                        agent_api::AgentClient::new(&self.config.agent_api_url),
                    )),
                };
                client
            })
            .clone()
    }
}
