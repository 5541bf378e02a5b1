use std::rc::Rc;

use crate::core::line::Line;

/// One presented turn: an optional NPC line followed by the player options
/// that come right after it.
///
/// Lines are shared with the conversation, so executing one taken from here
/// marks the conversation's own record visited.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    pub npc_line: Option<Rc<Line>>,
    pub options: Vec<Rc<Line>>,
    /// Options known to lead nowhere new. Never populated yet; kept so
    /// presentation code can already render them separately.
    pub spoiled_options: Vec<Rc<Line>>,
}

impl Interaction {
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Every line of the turn in script order.
    pub fn lines(&self) -> impl Iterator<Item = &Rc<Line>> {
        self.npc_line.iter().chain(self.options.iter())
    }
}
