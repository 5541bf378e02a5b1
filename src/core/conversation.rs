//! The conversation engine: per-NPC dialogue state machine and turn
//! generation.

use rustc_hash::FxHashMap;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

use crate::core::config::EngineConfig;
use crate::core::dispatch::{ActionHandler, Dispatched, Dispatcher};
use crate::core::line::{ActionCall, Line};
use crate::core::script::{Script, ScriptError, ENTRY_STATE};
use crate::core::variables::{GlobalVariables, Variables};
use crate::schema::interaction::Interaction;
use crate::schema::speaker::Speaker;

#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("state name {0} does not exist in conversation")]
    UnknownState(String),
    #[error("script error: {0}")]
    Script(#[from] ScriptError),
}

/// Position in the current state's lines. `index == len` means exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cursor {
    state: String,
    index: usize,
}

/// A running conversation with one NPC.
///
/// Built once from a [`Script`]; afterwards only the cursor, the variables,
/// the pending-end flag and each line's visited flag change.
#[derive(Debug)]
pub struct Conversation {
    speaker: Speaker,
    states: FxHashMap<String, Vec<Rc<Line>>>,
    cursor: Cursor,
    pending_end: bool,
    variables: Variables,
    dispatcher: Dispatcher,
}

/// Builder for constructing a `Conversation`.
pub struct ConversationBuilder {
    speaker: Speaker,
    globals: Option<GlobalVariables>,
    handler: Option<Box<dyn ActionHandler>>,
    config: EngineConfig,
}

impl Conversation {
    pub fn builder() -> ConversationBuilder {
        ConversationBuilder {
            speaker: Speaker::default(),
            globals: None,
            handler: None,
            config: EngineConfig::default(),
        }
    }

    /// A conversation with default settings, its own global store and no
    /// host handler.
    pub fn new(script: &Script) -> Result<Conversation, ConversationError> {
        Self::builder().build(script)
    }

    /// Load a script file (see [`Script::load`]) and build a conversation
    /// with default settings.
    pub fn load(path: &Path) -> Result<Conversation, ConversationError> {
        Self::builder().build_from_path(path)
    }

    /// Jump to the start of state `name`.
    pub fn set_state(&mut self, name: &str) -> Result<(), ConversationError> {
        if !self.states.contains_key(name) {
            return Err(ConversationError::UnknownState(name.to_string()));
        }
        tracing::debug!(speaker = %self.speaker.name, state = name, "entering state");
        self.cursor = Cursor {
            state: name.to_string(),
            index: 0,
        };
        Ok(())
    }

    /// Produce the next turn, or `None` once the conversation is over.
    ///
    /// A turn is at most one NPC line followed by the run of player options
    /// after it. The run stops at the next NPC line, which stays unread.
    ///
    /// A pending `end` is consumed here. Running out of lines also yields
    /// `None` but leaves no flag behind.
    pub fn next_interaction(&mut self) -> Option<Interaction> {
        if self.pending_end {
            self.pending_end = false;
            return None;
        }

        let first = self.peek_line()?;
        let mut interaction = Interaction::default();
        if first.is_npc() {
            self.advance();
            interaction.npc_line = Some(first);
        }
        while let Some(option) = self.peek_line().filter(|line| !line.is_npc()) {
            self.advance();
            interaction.options.push(option);
        }

        tracing::trace!(
            state = %self.cursor.state,
            index = self.cursor.index,
            npc_line = interaction.npc_line.is_some(),
            options = interaction.options.len(),
            "next interaction"
        );
        Some(interaction)
    }

    /// True between an executed `end` and the next call to
    /// [`next_interaction`](Self::next_interaction).
    pub fn has_ended(&self) -> bool {
        self.pending_end
    }

    /// Run one action: `end` and `set` are handled here, anything else goes
    /// to the host handler.
    pub fn run_action(&mut self, call: &ActionCall) {
        let outcome = self
            .dispatcher
            .dispatch(call, &self.speaker, &mut self.variables);
        if outcome == Dispatched::End {
            self.pending_end = true;
        }
    }

    /// Run the early actions of `line`; see [`Line::execute_before_line`].
    pub fn execute_before_line(&mut self, line: &Line) {
        line.execute_before_line(self);
    }

    /// Execute `line`; see [`Line::execute`].
    pub fn execute(&mut self, line: &Line) -> Result<(), ConversationError> {
        line.execute(self)
    }

    pub fn current_state(&self) -> &str {
        &self.cursor.state
    }

    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    /// Look a variable up in the scope its name selects.
    pub fn variable(&self, name: &str) -> Option<String> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn globals(&self) -> &GlobalVariables {
        self.variables.globals()
    }

    /// Parsed lines of a state.
    pub fn lines(&self, state: &str) -> Option<&[Rc<Line>]> {
        self.states.get(state).map(Vec::as_slice)
    }

    fn current_lines(&self) -> &[Rc<Line>] {
        self.states
            .get(&self.cursor.state)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn peek_line(&self) -> Option<Rc<Line>> {
        self.current_lines().get(self.cursor.index).cloned()
    }

    fn advance(&mut self) {
        if self.cursor.index < self.current_lines().len() {
            self.cursor.index += 1;
        }
    }
}

impl ConversationBuilder {
    pub fn speaker(mut self, speaker: Speaker) -> Self {
        self.speaker = speaker;
        self
    }

    /// Share a global variable store with other conversations.
    pub fn globals(mut self, globals: GlobalVariables) -> Self {
        self.globals = Some(globals);
        self
    }

    /// Receive custom actions.
    pub fn handler(mut self, handler: impl ActionHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the script at `path`, then [`build`](Self::build) from it.
    pub fn build_from_path(self, path: &Path) -> Result<Conversation, ConversationError> {
        let script = Script::load(path)?;
        self.build(&script)
    }

    /// Parse every line of `script` and enter the `entry` state.
    pub fn build(self, script: &Script) -> Result<Conversation, ConversationError> {
        let wrap_width = self.config.wrap_width;
        let states: FxHashMap<String, Vec<Rc<Line>>> = script
            .states()
            .map(|(name, lines)| {
                let parsed: Vec<Rc<Line>> = lines
                    .iter()
                    .map(|raw| Rc::new(Line::parse(raw, wrap_width)))
                    .collect();
                (name.to_string(), parsed)
            })
            .collect();

        let dispatcher = match self.handler {
            Some(handler) => Dispatcher::new(handler),
            None => Dispatcher::default(),
        };

        let mut conversation = Conversation {
            speaker: self.speaker,
            states,
            cursor: Cursor {
                state: String::new(),
                index: 0,
            },
            pending_end: false,
            variables: Variables::new(self.globals.unwrap_or_default()),
            dispatcher,
        };
        conversation.set_state(ENTRY_STATE)?;
        Ok(conversation)
    }
}
