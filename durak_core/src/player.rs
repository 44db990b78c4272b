use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Opaque stable token identifying a participant for the lifetime of its
/// connection. The transport layer picks the values; the engine only
/// compares them.
pub type PlayerId = u64;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Attacker,
    Defender,
}

impl Role {
    pub fn opposite(&self) -> Role {
        match self {
            Role::Attacker => Role::Defender,
            Role::Defender => Role::Attacker,
        }
    }
}
