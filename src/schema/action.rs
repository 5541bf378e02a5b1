use serde::{Deserialize, Serialize};

/// Sigil marking a variable name as global.
pub const GLOBAL_SIGIL: char = '$';

/// Expression changes an NPC can make while speaking.
///
/// Mood verbs are the only actions that run before a line is shown, so the
/// speaker's face already matches the text when it appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Angry,
    Sad,
    Amused,
    Neutral,
    Bored,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Angry,
        Mood::Sad,
        Mood::Amused,
        Mood::Neutral,
        Mood::Bored,
    ];

    /// Returns the script verb for this mood (e.g., "angry").
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Angry => "angry",
            Self::Sad => "sad",
            Self::Amused => "amused",
            Self::Neutral => "neutral",
            Self::Bored => "bored",
        }
    }

    pub fn from_verb(verb: &str) -> Option<Mood> {
        Self::ALL.into_iter().find(|mood| mood.verb() == verb)
    }
}

/// When an action runs relative to its line being presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timing {
    /// Before the text is shown (mood verbs).
    Early,
    /// After the line is executed and any state change happened.
    Late,
}

impl Timing {
    pub fn of_verb(verb: &str) -> Timing {
        if Mood::from_verb(verb).is_some() {
            Timing::Early
        } else {
            Timing::Late
        }
    }
}

/// Which variable scope a name lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Shared by every conversation using the same global store.
    Global,
    /// Owned by a single conversation.
    Local,
}

impl Scope {
    /// Scope is decided by the sigil alone.
    pub fn of(name: &str) -> Scope {
        if name.starts_with(GLOBAL_SIGIL) {
            Scope::Global
        } else {
            Scope::Local
        }
    }
}

/// An action as the dispatcher sees it: built-in verbs are resolved by the
/// engine, anything else goes to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// `!end` — finish the conversation after this turn.
    End,
    /// `!set name [value]` — value defaults to `"true"`.
    Set { name: &'a str, value: &'a str },
    /// Any other verb, mood verbs included.
    Custom { verb: &'a str, args: &'a [String] },
}

impl<'a> Action<'a> {
    /// Classify a parsed verb and its arguments.
    ///
    /// Returns `None` for a `set` without a variable name.
    pub fn classify(verb: &'a str, args: &'a [String]) -> Option<Action<'a>> {
        match verb {
            "end" => Some(Action::End),
            "set" => {
                let name = args.first()?.as_str();
                let value = args.get(1).map(String::as_str).unwrap_or("true");
                Some(Action::Set { name, value })
            }
            _ => Some(Action::Custom { verb, args }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn mood_verbs_are_early() {
        for mood in Mood::ALL {
            assert_eq!(Timing::of_verb(mood.verb()), Timing::Early);
            assert_eq!(Mood::from_verb(mood.verb()), Some(mood));
        }
        assert_eq!(Timing::of_verb("cry"), Timing::Late);
        assert_eq!(Timing::of_verb("end"), Timing::Late);
        assert_eq!(Timing::of_verb("Sad"), Timing::Late);
    }

    #[test]
    fn scope_by_sigil() {
        assert_eq!(Scope::of("$flag"), Scope::Global);
        assert_eq!(Scope::of("mood"), Scope::Local);
        assert_eq!(Scope::of("flag$"), Scope::Local);
    }

    #[test]
    fn classify_end() {
        let extra = args(&["now"]);
        assert_eq!(Action::classify("end", &[]), Some(Action::End));
        assert_eq!(Action::classify("end", &extra), Some(Action::End));
    }

    #[test]
    fn classify_set_defaults_to_true() {
        let a = args(&["metGuard"]);
        assert_eq!(
            Action::classify("set", &a),
            Some(Action::Set {
                name: "metGuard",
                value: "true"
            })
        );
        let b = args(&["$gold", "12", "ignored"]);
        assert_eq!(
            Action::classify("set", &b),
            Some(Action::Set {
                name: "$gold",
                value: "12"
            })
        );
    }

    #[test]
    fn classify_set_without_name() {
        assert_eq!(Action::classify("set", &[]), None);
    }

    #[test]
    fn classify_custom() {
        let a = args(&["loudly"]);
        assert!(matches!(
            Action::classify("cry", &a),
            Some(Action::Custom { verb: "cry", args }) if args == ["loudly".to_string()]
        ));
        assert!(matches!(
            Action::classify("sad", &[]),
            Some(Action::Custom { verb: "sad", .. })
        ));
    }
}
