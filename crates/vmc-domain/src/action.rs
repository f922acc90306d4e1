use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// User-invokable power transition, distinct from the observed
/// [`PowerStatus`](crate::PowerStatus).
///
/// Wire codes are explicitly tabulated rather than derived from declaration
/// order: reordering the variants must not change what goes on the wire.
/// Action codes are strings and status codes are numbers; the two namespaces
/// never mix even where the numeric values coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    Start,
    Shutdown,
    Reboot,
    Pause,
}

impl PowerAction {
    /// Wire code sent as `powerStatusAction`.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Start => "0",
            Self::Shutdown => "1",
            Self::Reboot => "2",
            Self::Pause => "3",
        }
    }

    /// Inverse of [`code`](Self::code), same explicit-table shape.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "0" => Ok(Self::Start),
            "1" => Ok(Self::Shutdown),
            "2" => Ok(Self::Reboot),
            "3" => Ok(Self::Pause),
            other => Err(Error::UnknownPowerActionCode(other.to_string())),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Shutdown => "shutdown",
            Self::Reboot => "reboot",
            Self::Pause => "pause",
        }
    }

    pub const ALL: [Self; 4] = [Self::Start, Self::Shutdown, Self::Reboot, Self::Pause];
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "start" => Ok(Self::Start),
            "shutdown" => Ok(Self::Shutdown),
            "reboot" => Ok(Self::Reboot),
            "pause" => Ok(Self::Pause),
            other => Err(Error::UnknownPowerAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_table() {
        assert_eq!(PowerAction::Start.code(), "0");
        assert_eq!(PowerAction::Shutdown.code(), "1");
        assert_eq!(PowerAction::Reboot.code(), "2");
        assert_eq!(PowerAction::Pause.code(), "3");
    }

    #[test]
    fn code_round_trips() {
        for action in PowerAction::ALL {
            assert_eq!(PowerAction::from_code(action.code()).unwrap(), action);
        }
    }

    #[test]
    fn name_round_trips() {
        for action in PowerAction::ALL {
            assert_eq!(action.as_str().parse::<PowerAction>().unwrap(), action);
        }
    }

    #[test]
    fn unknown_inputs_are_errors() {
        assert_eq!(
            PowerAction::from_code("4"),
            Err(Error::UnknownPowerActionCode("4".into()))
        );
        assert_eq!(
            "restart".parse::<PowerAction>(),
            Err(Error::UnknownPowerAction("restart".into()))
        );
    }

    #[test]
    fn action_codes_are_not_status_codes() {
        // start maps to "0" while PAUSED maps to 0; shutdown happens to match.
        // The coincidence is numeric only, the domains stay separate.
        use crate::PowerStatus;
        assert_eq!(PowerAction::Start.code(), "0");
        assert_eq!(PowerStatus::Paused.code(), 0);
        assert_ne!(PowerAction::Start.as_str(), PowerStatus::Paused.as_str());
    }
}
