//! Domain model for the VM console: power states, power actions, and the
//! immutable instance value objects the UI layer renders.

pub mod action;
pub mod instance;
pub mod power;

pub use action::PowerAction;
pub use instance::{VmFlavor, VmInstance, VmInstanceListItem, VmSource};
pub use power::PowerStatus;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown power status: {0}")]
    UnknownPowerStatus(String),

    #[error("unknown power status code: {0}")]
    UnknownPowerStatusCode(u8),

    #[error("unknown power action: {0}")]
    UnknownPowerAction(String),

    #[error("unknown power action code: {0}")]
    UnknownPowerActionCode(String),

    #[error("unknown source kind code: {0}")]
    UnknownSourceKindCode(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
