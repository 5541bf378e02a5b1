use serde::{Deserialize, Serialize};

/// Newtype wrapper for NPC IDs assigned by the host game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NpcId(pub u64);

/// Identifies who is talking when a custom action is handed to the host.
///
/// The engine never interprets this; it only passes it along so the host can
/// route effects (camera moves, quest flags, animations) to the right NPC.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Speaker {
    pub id: NpcId,
    pub name: String,
}

impl Speaker {
    pub fn new(id: NpcId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
