//! The primary and secondary server identities and their well known ports.
use std::fmt;
use std::str::FromStr;

use crate::JksError;

/// client port of the primary server
pub const PRIMARY_CLIENT_PORT: u16 = 4545;
/// client port of the secondary server
pub const SECONDARY_CLIENT_PORT: u16 = 4546;
/// admin port of the primary server
pub const PRIMARY_ADMIN_PORT: u16 = 5050;
/// admin port of the secondary server
pub const SECONDARY_ADMIN_PORT: u16 = 5051;

/// The two deployment identities of a jks server.
///
/// They behave identically and share nothing; they only differ in the ports they bind and
/// the tag prefixed to every line they send.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    /// listens on 4545 / 5050, lines are not tagged
    #[default]
    Primary,
    /// listens on 4546 / 5051, lines are prefixed with `<S2> `
    Secondary,
}

impl Identity {
    /// the port client requests are accepted on
    pub fn client_port(self) -> u16 {
        match self {
            Identity::Primary => PRIMARY_CLIENT_PORT,
            Identity::Secondary => SECONDARY_CLIENT_PORT,
        }
    }

    /// the port admin requests are accepted on
    pub fn admin_port(self) -> u16 {
        match self {
            Identity::Primary => PRIMARY_ADMIN_PORT,
            Identity::Secondary => SECONDARY_ADMIN_PORT,
        }
    }

    /// the prefix written in front of every line sent by this server
    pub fn tag(self) -> &'static str {
        match self {
            Identity::Primary => "",
            Identity::Secondary => "<S2> ",
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Primary => write!(f, "primary"),
            Identity::Secondary => write!(f, "secondary"),
        }
    }
}

impl FromStr for Identity {
    type Err = JksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Identity::Primary),
            "secondary" => Ok(Identity::Secondary),
            other => Err(JksError::Parsing(format!(
                "unknown server identity '{}', expected 'primary' or 'secondary'",
                other
            ))),
        }
    }
}
