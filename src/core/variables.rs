//! Variable store — global names shared between conversations, local names
//! owned by one conversation.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

use crate::schema::action::Scope;

/// Global variables, shared by every conversation holding a clone.
///
/// Cloning is cheap and yields a handle to the same map. Names are expected
/// to carry the `$` sigil; the store itself does not check.
#[derive(Debug, Clone, Default)]
pub struct GlobalVariables {
    inner: Rc<RefCell<FxHashMap<String, String>>>,
}

impl GlobalVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.inner.borrow().get(name).cloned()
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.borrow_mut().insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Returns true if both handles point at the same store.
    pub fn shares_with(&self, other: &GlobalVariables) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// The two variable scopes seen by one conversation.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    globals: GlobalVariables,
    locals: FxHashMap<String, String>,
}

impl Variables {
    pub fn new(globals: GlobalVariables) -> Self {
        Self {
            globals,
            locals: FxHashMap::default(),
        }
    }

    /// Write `value` into the scope picked by the name's sigil, silently
    /// replacing any previous value.
    pub fn set(&mut self, name: &str, value: &str) {
        let scope = Scope::of(name);
        tracing::debug!(name, value, ?scope, "setting conversation variable");
        match scope {
            Scope::Global => self.globals.set(name, value),
            Scope::Local => {
                self.locals.insert(name.to_string(), value.to_string());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        match Scope::of(name) {
            Scope::Global => self.globals.get(name),
            Scope::Local => self.locals.get(name).cloned(),
        }
    }

    pub fn globals(&self) -> &GlobalVariables {
        &self.globals
    }

    pub fn locals(&self) -> &FxHashMap<String, String> {
        &self.locals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_handles_share_storage() {
        let a = GlobalVariables::new();
        let b = a.clone();
        a.set("$flag", "1");
        assert_eq!(b.get("$flag"), Some("1".to_string()));
        assert!(a.shares_with(&b));
        assert!(!a.shares_with(&GlobalVariables::new()));
    }

    #[test]
    fn sigil_routes_to_global() {
        let globals = GlobalVariables::new();
        let mut vars = Variables::new(globals.clone());
        vars.set("$met", "true");
        assert_eq!(globals.get("$met"), Some("true".to_string()));
        assert!(vars.locals().is_empty());
    }

    #[test]
    fn plain_name_stays_local() {
        let globals = GlobalVariables::new();
        let mut vars = Variables::new(globals.clone());
        vars.set("mood", "sad");
        assert_eq!(vars.get("mood"), Some("sad".to_string()));
        assert!(globals.is_empty());
        assert_eq!(globals.get("mood"), None);
    }

    #[test]
    fn locals_are_per_instance() {
        let globals = GlobalVariables::new();
        let mut first = Variables::new(globals.clone());
        let second = Variables::new(globals);
        first.set("mood", "sad");
        assert_eq!(second.get("mood"), None);
    }

    #[test]
    fn writes_overwrite() {
        let mut vars = Variables::new(GlobalVariables::new());
        vars.set("door", "closed");
        vars.set("door", "open");
        vars.set("$gold", "1");
        vars.set("$gold", "2");
        assert_eq!(vars.get("door"), Some("open".to_string()));
        assert_eq!(vars.get("$gold"), Some("2".to_string()));
        assert_eq!(vars.globals().len(), 1);
    }
}
