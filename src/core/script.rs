//! Authored dialogue scripts: state name → ordered raw lines.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// The state every conversation starts in.
pub const ENTRY_STATE: &str = "entry";

/// Separator used by flat single-state content.
pub const SEGMENT_SEPARATOR: &str = ":::";

/// Text shown by a flat script with no content.
pub const EMPTY_CONTENT_LINE: &str = "Nothing…";

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("unsupported script file: {0}")]
    UnsupportedFormat(String),
}

/// A dialogue script as authored, before any line is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    states: FxHashMap<String, Vec<String>>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a state.
    pub fn with_state<I, S>(mut self, name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_state(name, lines);
        self
    }

    pub fn insert_state<I, S>(&mut self, name: impl Into<String>, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states
            .insert(name.into(), lines.into_iter().map(Into::into).collect());
    }

    /// Build a single-state script from flat `:::`-separated content.
    ///
    /// Every piece becomes a line of the `entry` state. The last line jumps
    /// back to `entry` and ends the conversation, so talking to the NPC again
    /// replays it from the start.
    pub fn from_segments(content: Option<&str>) -> Self {
        let mut lines: Vec<String> = match content {
            Some(content) if !content.is_empty() => {
                content.split(SEGMENT_SEPARATOR).map(str::to_string).collect()
            }
            _ => vec![EMPTY_CONTENT_LINE.to_string()],
        };
        if let Some(last) = lines.last_mut() {
            last.push_str(" @entry !end");
        }
        Self::new().with_state(ENTRY_STATE, lines)
    }

    /// Parse a script from a JSON object of string arrays.
    pub fn from_json(input: &str) -> Result<Script, ScriptError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parse a script from a RON map of string lists.
    pub fn parse_ron(input: &str) -> Result<Script, ScriptError> {
        Ok(ron::from_str(input)?)
    }

    /// Load a script file, picking the format from its extension
    /// (`.json` or `.ron`).
    pub fn load(path: &Path) -> Result<Script, ScriptError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Self::from_json(&std::fs::read_to_string(path)?),
            Some("ron") => Self::parse_ron(&std::fs::read_to_string(path)?),
            _ => Err(ScriptError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn lines(&self, state: &str) -> Option<&[String]> {
        self.states.get(state).map(Vec::as_slice)
    }

    /// State names in sorted order.
    pub fn state_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn states(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.states
            .iter()
            .map(|(name, lines)| (name.as_str(), lines.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
