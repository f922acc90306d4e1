use serde::{Deserialize, Serialize};

use crate::power::PowerStatus;
use crate::{Error, Result};

/// Origin an instance's disk is provisioned from at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceKind {
    Image,
    InstanceSnapshot,
    BootableVolume,
    VolumeSnapshot,
}

impl SourceKind {
    /// Numeric wire code used in instance-creation requests.
    pub const fn code(self) -> u8 {
        match self {
            Self::Image => 0,
            Self::InstanceSnapshot => 1,
            Self::BootableVolume => 2,
            Self::VolumeSnapshot => 3,
        }
    }

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Image),
            1 => Ok(Self::InstanceSnapshot),
            2 => Ok(Self::BootableVolume),
            3 => Ok(Self::VolumeSnapshot),
            other => Err(Error::UnknownSourceKindCode(other)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::InstanceSnapshot => "instance_snapshot",
            Self::BootableVolume => "bootable_volume",
            Self::VolumeSnapshot => "volume_snapshot",
        }
    }
}

/// Provisioning source of an existing instance (e.g. the image it booted from).
#[derive(Debug, Clone, PartialEq)]
pub struct VmSource {
    pub kind: String,
    pub id: i64,
    pub name: String,
}

/// Resource-sizing template applied at instance creation.
///
/// `vcpu` is fractional on purpose: shared-core flavors expose values like 1.5.
#[derive(Debug, Clone, PartialEq)]
pub struct VmFlavor {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub memory: i64,
    pub root_disk: i64,
    pub vcpu: f64,
}

/// A VM instance as returned by single-instance lookups. Minimal field set.
///
/// Value objects own every field outright, so mutating whatever record they
/// were built from cannot reach back into them. No field is validated;
/// construction never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct VmInstance {
    pub name: String,
    pub id: String,
    pub power_state: PowerStatus,
    pub alias: String,
    pub host: String,
}

impl VmInstance {
    /// Numeric code of the current power state.
    pub fn power_state_code(&self) -> u8 {
        self.power_state.code()
    }
}

/// A VM instance as returned by list queries: the detail fields plus
/// description, provisioning source, and flavor.
#[derive(Debug, Clone, PartialEq)]
pub struct VmInstanceListItem {
    pub name: String,
    pub id: String,
    pub power_state: PowerStatus,
    pub alias: String,
    pub host: String,
    pub description: String,
    pub source: VmSource,
    pub flavor: VmFlavor,
}

impl VmInstanceListItem {
    pub fn power_state_code(&self) -> u8 {
        self.power_state.code()
    }

    /// The detail-variant view of this list row.
    pub fn as_instance(&self) -> VmInstance {
        VmInstance {
            name: self.name.clone(),
            id: self.id.clone(),
            power_state: self.power_state,
            alias: self.alias.clone(),
            host: self.host.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_fixture() -> VmInstance {
        VmInstance {
            name: "test-vm".into(),
            id: "vm-123".into(),
            power_state: PowerStatus::Running,
            alias: "test-alias".into(),
            host: "test-host.com".into(),
        }
    }

    fn list_fixture() -> VmInstanceListItem {
        VmInstanceListItem {
            name: "test-vm".into(),
            id: "vm-123".into(),
            power_state: PowerStatus::Running,
            alias: "test-alias".into(),
            host: "test-host.com".into(),
            description: "a test vm".into(),
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
        }
    }

    #[test]
    fn detail_reports_power_state_code() {
        let vm = detail_fixture();
        assert_eq!(vm.power_state, PowerStatus::Running);
        assert_eq!(vm.power_state_code(), 4);
    }

    #[test]
    fn construction_copies_instead_of_sharing() {
        let mut data = detail_fixture();
        let vm = data.clone();

        data.name = "modified-name".into();
        data.power_state = PowerStatus::Shutdown;

        assert_eq!(vm.name, "test-vm");
        assert_eq!(vm.power_state, PowerStatus::Running);
    }

    #[test]
    fn nested_source_and_flavor_are_copied() {
        let mut data = list_fixture();
        let vm = data.clone();

        data.source.name = "mutated".into();
        data.flavor.memory = 1;
        data.flavor.vcpu = 0.5;

        assert_eq!(vm.source.name, "ubuntu-22.04-lts");
        assert_eq!(vm.flavor.memory, 8192);
        assert_eq!(vm.flavor.vcpu, 4.0);
    }

    #[test]
    fn empty_fields_are_accepted() {
        let vm = VmInstance {
            name: String::new(),
            id: String::new(),
            power_state: PowerStatus::Nostate,
            alias: String::new(),
            host: String::new(),
        };
        assert_eq!(vm.name, "");
        assert_eq!(vm.power_state_code(), 3);
    }

    #[test]
    fn list_item_projects_to_detail() {
        let item = list_fixture();
        let vm = item.as_instance();
        assert_eq!(vm.name, item.name);
        assert_eq!(vm.id, item.id);
        assert_eq!(vm.power_state, item.power_state);
        assert_eq!(vm.alias, item.alias);
        assert_eq!(vm.host, item.host);
    }

    #[test]
    fn source_kind_codes_round_trip() {
        for code in 0..=3u8 {
            assert_eq!(SourceKind::from_code(code).unwrap().code(), code);
        }
        assert!(SourceKind::from_code(4).is_err());
    }
}
