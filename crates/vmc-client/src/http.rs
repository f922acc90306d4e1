use async_trait::async_trait;
use futures_util::StreamExt;
use tracing::info;

use vmc_domain::{PowerAction, VmFlavor, VmInstance, VmInstanceListItem, VmSource};

use crate::types::{CreateInstanceSpec, DeleteReceipt, PowerStatusReceipt, VmInstancePage};
use crate::{ChatApi, ChatStream, Error, Result, VmApi};

/// HTTP-backed VM service client.
///
/// Delegates to [`servers_api::ServersClient`] and maps wire DTOs into the
/// domain value objects.
pub struct HttpVmApi {
    client: servers_api::ServersClient,
}

impl HttpVmApi {
    pub fn new(client: servers_api::ServersClient) -> Self {
        Self { client }
    }
}

fn parse_id(instance_id: &str) -> Result<i64> {
    instance_id
        .parse()
        .map_err(|_| Error::InvalidId(instance_id.to_string()))
}

/// Build the detail value object from its wire DTO. Copies every field.
pub(crate) fn instance_from_detail(dto: &servers_api::InstanceDetail) -> VmInstance {
    VmInstance {
        name: dto.name.clone(),
        id: dto.id.to_string(),
        power_state: dto.power_status,
        alias: dto.alias.clone(),
        host: dto.host.clone(),
    }
}

/// Build a list-row value object from its wire DTO. The detail fields are
/// mapped exactly as in [`instance_from_detail`]; source and flavor are
/// copied so the result shares nothing with the DTO.
pub(crate) fn instance_from_record(dto: &servers_api::InstanceRecord) -> VmInstanceListItem {
    VmInstanceListItem {
        name: dto.name.clone(),
        id: dto.id.to_string(),
        power_state: dto.power_status,
        alias: dto.alias.clone(),
        host: dto.host.clone(),
        description: dto.description.clone(),
        source: VmSource {
            kind: dto.source.kind.clone(),
            id: dto.source.id,
            name: dto.source.name.clone(),
        },
        flavor: VmFlavor {
            id: dto.flavor.id,
            name: dto.flavor.name.clone(),
            description: dto.flavor.description.clone(),
            memory: dto.flavor.memory,
            root_disk: dto.flavor.root_disk,
            vcpu: dto.flavor.vcpu,
        },
    }
}

#[async_trait]
impl VmApi for HttpVmApi {
    async fn get_instance(&self, instance_id: &str) -> Result<VmInstance> {
        let dto = self.client.get_instance(parse_id(instance_id)?).await?;
        Ok(instance_from_detail(&dto))
    }

    async fn get_instance_list(&self, page: u32, size: u32) -> Result<VmInstancePage> {
        let dto = self.client.list_instances(page, size).await?;
        Ok(VmInstancePage {
            page_size: dto.page_size,
            page_number: dto.page_number,
            total_page_count: dto.total_page_count,
            total_count: dto.total_count,
            items: dto.data.iter().map(instance_from_record).collect(),
        })
    }

    async fn create_instance(&self, spec: &CreateInstanceSpec) -> Result<VmInstanceListItem> {
        let dto = self
            .client
            .create_instance(&servers_api::CreateInstanceRequest {
                name: spec.name.clone(),
                description: spec.description.clone(),
                host: spec.host.clone(),
                flavor_id: spec.flavor_id,
                source_type: spec.source_kind.code(),
                source_id: spec.source_id,
            })
            .await?;

        info!(instance_id = dto.id, name = %dto.name, "servers: instance created");
        Ok(instance_from_record(&dto))
    }

    async fn delete_instance(&self, instance_id: &str) -> Result<DeleteReceipt> {
        let dto = self.client.delete_instance(parse_id(instance_id)?).await?;
        info!(instance_id = dto.instance_id, accepted = dto.is_accepted, "servers: instance delete requested");
        Ok(DeleteReceipt {
            instance_id: dto.instance_id.to_string(),
            is_accepted: dto.is_accepted,
            is_deleted: dto.is_deleted,
        })
    }

    async fn update_power_status(
        &self,
        instance_id: &str,
        action: PowerAction,
    ) -> Result<PowerStatusReceipt> {
        let dto = self
            .client
            .update_power_status(parse_id(instance_id)?, action.code())
            .await?;

        info!(instance_id = %instance_id, action = %action, "servers: power status updated");
        Ok(PowerStatusReceipt {
            success: dto.success,
            message: dto.message,
            instance_id: dto.instance_id.to_string(),
            new_power_status: dto.new_power_status,
        })
    }
}

/// HTTP-backed chat service client.
pub struct HttpChatApi {
    client: agent_api::AgentClient,
}

impl HttpChatApi {
    pub fn new(client: agent_api::AgentClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn send_message(&self, req: &agent_api::ChatRequest) -> Result<agent_api::AgentResponse> {
        Ok(self.client.send_message(req).await?)
    }

    async fn send_message_with_system_prompt(
        &self,
        req: &agent_api::ChatRequest,
        system_prompt: &str,
    ) -> Result<agent_api::AgentResponse> {
        Ok(self
            .client
            .send_message_with_system_prompt(req, system_prompt)
            .await?)
    }

    async fn create_streaming_chat(
        &self,
        message: &str,
        conversation_id: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<ChatStream> {
        let stream = self
            .client
            .stream_chat(message, conversation_id, user_id)
            .await?;
        Ok(stream.map(|item| item.map_err(Error::from)).boxed())
    }

    async fn get_conversations(
        &self,
        user_id: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<agent_api::Conversation>> {
        Ok(self.client.get_conversations(user_id, active_only).await?)
    }

    async fn delete_conversation(
        &self,
        conversation_id: &str,
        user_id: Option<&str>,
    ) -> Result<()> {
        self.client
            .delete_conversation(conversation_id, user_id)
            .await?;
        info!(conversation_id = %conversation_id, "agent: conversation deleted");
        Ok(())
    }

    async fn get_health(&self) -> Result<agent_api::AgentHealth> {
        Ok(self.client.get_health().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmc_domain::PowerStatus;

    fn record_fixture() -> servers_api::InstanceRecord {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "production-web-server",
            "alias": "web-prod-001",
            "powerStatus": "RUNNING",
            "host": "prod-host-01.company.com",
            "description": "Production web server for main application",
            "source": { "type": "image", "id": 101, "name": "ubuntu-22.04-lts" },
            "flavor": {
                "id": 201,
                "name": "standard-4",
                "description": "4 vCPU, 8GB RAM, 80GB Disk",
                "memory": 8192,
                "rootDisk": 80,
                "vcpu": 4
            }
        }))
        .unwrap()
    }

    #[test]
    fn detail_mapping_copies_all_fields() {
        let dto = servers_api::InstanceDetail {
            id: 123,
            name: "test-vm".into(),
            alias: "test-alias".into(),
            power_status: PowerStatus::Running,
            host: "test-host.com".into(),
        };
        let vm = instance_from_detail(&dto);
        assert_eq!(vm.id, "123");
        assert_eq!(vm.name, "test-vm");
        assert_eq!(vm.power_state_code(), 4);
    }

    #[test]
    fn record_mapping_is_independent_of_the_dto() {
        let mut dto = record_fixture();
        let vm = instance_from_record(&dto);

        dto.name = "mutated".into();
        dto.source.name = "mutated".into();
        dto.flavor.memory = 0;

        assert_eq!(vm.name, "production-web-server");
        assert_eq!(vm.source.name, "ubuntu-22.04-lts");
        assert_eq!(vm.flavor.memory, 8192);
    }

    #[test]
    fn record_maps_detail_fields_like_the_detail_converter() {
        let dto = record_fixture();
        let item = instance_from_record(&dto);
        let detail = servers_api::InstanceDetail {
            id: dto.id,
            name: dto.name.clone(),
            alias: dto.alias.clone(),
            power_status: dto.power_status,
            host: dto.host.clone(),
        };
        assert_eq!(item.as_instance(), instance_from_detail(&detail));
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!(matches!(parse_id("vm-abc"), Err(Error::InvalidId(_))));
        assert_eq!(parse_id("42").unwrap(), 42);
    }
}
