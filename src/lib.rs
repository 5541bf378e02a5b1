//! Dialogue Engine — branching NPC conversations from plain-text scripts.
//!
//! Script lines are parsed into typed records (speaker, display text, state
//! tag, actions). A per-NPC state machine hands the presentation layer one
//! turn at a time and runs each chosen line's actions in two phases: mood
//! changes before the text is shown, state changes and other effects after.

pub mod core;
pub mod schema;

pub use crate::core::config::EngineConfig;
pub use crate::core::conversation::{Conversation, ConversationBuilder, ConversationError};
pub use crate::core::dispatch::{ActionHandler, IgnoreActions};
pub use crate::core::line::{ActionCall, Line, Role};
pub use crate::core::script::{Script, ScriptError};
pub use crate::core::variables::{GlobalVariables, Variables};
pub use crate::schema::interaction::Interaction;
pub use crate::schema::speaker::{NpcId, Speaker};
