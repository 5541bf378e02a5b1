//! Line records and their two-phase execution.

use serde::{Deserialize, Serialize};
use std::cell::Cell;

use crate::core::conversation::{Conversation, ConversationError};
use crate::core::parser;
use crate::schema::action::{Action, Timing};

/// Who says a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Spoken by the NPC.
    Npc,
    /// A response the player can pick (`>` prefix).
    Player,
}

/// One `!verb args...` action as written in the script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCall {
    pub verb: String,
    pub args: Vec<String>,
    pub timing: Timing,
}

impl ActionCall {
    pub fn new(verb: impl Into<String>, args: Vec<String>) -> Self {
        let verb = verb.into();
        let timing = Timing::of_verb(&verb);
        Self { verb, args, timing }
    }

    pub fn is_early(&self) -> bool {
        self.timing == Timing::Early
    }

    /// Built-in or custom classification, `None` if malformed.
    pub fn action(&self) -> Option<Action<'_>> {
        Action::classify(&self.verb, &self.args)
    }

    /// Verb followed by its arguments.
    pub fn words(&self) -> Vec<&str> {
        std::iter::once(self.verb.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

/// A parsed script line.
///
/// Everything is fixed at parse time except the visited flag, which flips
/// the first time the line is executed.
#[derive(Debug)]
pub struct Line {
    source: String,
    role: Role,
    text: String,
    target_state: Option<String>,
    actions: Vec<ActionCall>,
    visited: Cell<bool>,
}

impl Line {
    pub fn new(
        source: String,
        role: Role,
        text: String,
        target_state: Option<String>,
        actions: Vec<ActionCall>,
    ) -> Self {
        Self {
            source,
            role,
            text,
            target_state,
            actions,
            visited: Cell::new(false),
        }
    }

    /// Parse a raw script line, wrapping NPC text to `wrap_width`.
    pub fn parse(raw: &str, wrap_width: usize) -> Self {
        parser::parse_line(raw, wrap_width)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_npc(&self) -> bool {
        self.role == Role::Npc
    }

    /// Display text; wrapped for NPC lines.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target_state(&self) -> Option<&str> {
        self.target_state.as_deref()
    }

    pub fn actions(&self) -> &[ActionCall] {
        &self.actions
    }

    pub fn was_visited(&self) -> bool {
        self.visited.get()
    }

    /// Run the early (mood) actions, in source order.
    ///
    /// Call this before presenting the line.
    pub fn execute_before_line(&self, conversation: &mut Conversation) {
        for call in self.actions.iter().filter(|call| call.is_early()) {
            conversation.run_action(call);
        }
    }

    /// Mark the line visited, follow its state tag, then run the late
    /// actions in source order.
    ///
    /// Early actions are never repeated here. If the target state does not
    /// exist the error is returned before any late action runs.
    pub fn execute(&self, conversation: &mut Conversation) -> Result<(), ConversationError> {
        self.visited.set(true);
        if let Some(ref target) = self.target_state {
            conversation.set_state(target)?;
        }
        for call in self.actions.iter().filter(|call| !call.is_early()) {
            conversation.run_action(call);
        }
        Ok(())
    }
}
