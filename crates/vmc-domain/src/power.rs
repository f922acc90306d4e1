use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Observed power state of a VM instance.
///
/// The numeric codes are fixed by the servers API and carried by the enum
/// discriminants; `code`/`from_code` round-trip losslessly over all six
/// values. On the wire the state travels as its SCREAMING-CASE name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum PowerStatus {
    Paused = 0,
    Shutdown = 1,
    Crashed = 2,
    Nostate = 3,
    Running = 4,
    Suspended = 5,
}

impl PowerStatus {
    /// Numeric wire code for this state.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`code`](Self::code). Codes outside `0..=5` are an error.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Paused),
            1 => Ok(Self::Shutdown),
            2 => Ok(Self::Crashed),
            3 => Ok(Self::Nostate),
            4 => Ok(Self::Running),
            5 => Ok(Self::Suspended),
            other => Err(Error::UnknownPowerStatusCode(other)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paused => "PAUSED",
            Self::Shutdown => "SHUTDOWN",
            Self::Crashed => "CRASHED",
            Self::Nostate => "NOSTATE",
            Self::Running => "RUNNING",
            Self::Suspended => "SUSPENDED",
        }
    }

    pub const ALL: [Self; 6] = [
        Self::Paused,
        Self::Shutdown,
        Self::Crashed,
        Self::Nostate,
        Self::Running,
        Self::Suspended,
    ];
}

impl fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PAUSED" => Ok(Self::Paused),
            "SHUTDOWN" => Ok(Self::Shutdown),
            "CRASHED" => Ok(Self::Crashed),
            "NOSTATE" => Ok(Self::Nostate),
            "RUNNING" => Ok(Self::Running),
            "SUSPENDED" => Ok(Self::Suspended),
            other => Err(Error::UnknownPowerStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_fixed() {
        assert_eq!(PowerStatus::Paused.code(), 0);
        assert_eq!(PowerStatus::Shutdown.code(), 1);
        assert_eq!(PowerStatus::Crashed.code(), 2);
        assert_eq!(PowerStatus::Nostate.code(), 3);
        assert_eq!(PowerStatus::Running.code(), 4);
        assert_eq!(PowerStatus::Suspended.code(), 5);
    }

    #[test]
    fn name_to_code_round_trips() {
        for status in PowerStatus::ALL {
            let code = status.code();
            assert_eq!(PowerStatus::from_code(code).unwrap(), status);
        }
    }

    #[test]
    fn code_to_name_round_trips() {
        for code in 0..=5u8 {
            let status = PowerStatus::from_code(code).unwrap();
            assert_eq!(status.code(), code);
            assert_eq!(status.as_str().parse::<PowerStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_inputs_are_errors() {
        assert_eq!(
            PowerStatus::from_code(6),
            Err(Error::UnknownPowerStatusCode(6))
        );
        assert_eq!(
            "SUSPEND".parse::<PowerStatus>(),
            Err(Error::UnknownPowerStatus("SUSPEND".into()))
        );
    }

    #[test]
    fn serializes_as_wire_name() {
        let json = serde_json::to_string(&PowerStatus::Running).unwrap();
        assert_eq!(json, "\"RUNNING\"");
        let back: PowerStatus = serde_json::from_str("\"SUSPENDED\"").unwrap();
        assert_eq!(back, PowerStatus::Suspended);
    }
}
