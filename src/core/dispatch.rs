//! Action dispatch — built-in verbs are handled by the engine, everything else
//! is delegated to the host game.

use crate::core::line::ActionCall;
use crate::core::variables::Variables;
use crate::schema::action::Action;
use crate::schema::speaker::Speaker;

/// The host's side of custom actions (moods, quest flags, camera moves...).
///
/// The engine calls this once per custom action and assumes the effect is
/// complete by the time the next engine call is made.
pub trait ActionHandler {
    fn run_action(&mut self, verb: &str, speaker: &Speaker, args: &[String]);
}

impl<F> ActionHandler for F
where
    F: FnMut(&str, &Speaker, &[String]),
{
    fn run_action(&mut self, verb: &str, speaker: &Speaker, args: &[String]) {
        self(verb, speaker, args)
    }
}

/// Handler used when the host registers none. Custom actions are logged and
/// otherwise ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreActions;

impl ActionHandler for IgnoreActions {
    fn run_action(&mut self, verb: &str, speaker: &Speaker, args: &[String]) {
        tracing::warn!(verb, speaker = %speaker.name, ?args, "no action handler registered");
    }
}

/// What a dispatched action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// `end` — the conversation should finish after this turn.
    End,
    /// `set` — a variable was written.
    Set,
    /// Handed to the host handler.
    Forwarded,
    /// Malformed and skipped.
    Dropped,
}

/// Routes actions to built-in handling or to the host.
pub struct Dispatcher {
    handler: Box<dyn ActionHandler>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Box::new(IgnoreActions))
    }
}

impl Dispatcher {
    pub fn new(handler: Box<dyn ActionHandler>) -> Self {
        Self { handler }
    }

    pub fn dispatch(
        &mut self,
        call: &ActionCall,
        speaker: &Speaker,
        variables: &mut Variables,
    ) -> Dispatched {
        match call.action() {
            Some(Action::End) => Dispatched::End,
            Some(Action::Set { name, value }) => {
                variables.set(name, value);
                Dispatched::Set
            }
            Some(Action::Custom { verb, args }) => {
                tracing::debug!(verb, ?args, speaker = %speaker.name, "forwarding action to host");
                self.handler.run_action(verb, speaker, args);
                Dispatched::Forwarded
            }
            None => {
                tracing::warn!(verb = %call.verb, "dropping malformed action");
                Dispatched::Dropped
            }
        }
    }
}
