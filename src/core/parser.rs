//! Line parser — turns one raw script line into a [`Line`].
//!
//! A single pass over the line produces ordered tokens; the parser then reads
//! the display text, the first state tag and the action list off the token
//! stream.

use crate::core::line::{ActionCall, Line, Role};
use crate::core::wrap::wrap;

/// Prefix marking a player option.
pub const OPTION_PREFIX: char = '>';

/// A lexical piece of a line body. Each token borrows its raw source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Plain text.
    Text(&'a str),
    /// `@name` — a state tag.
    StateTag { raw: &'a str, name: &'a str },
    /// An `@` not followed by a letter. Never a tag, but still ends the
    /// displayed text.
    BareAt,
    /// One or more adjacent `!verb args` markers fused into a single run.
    ActionRun(&'a str),
}

impl<'a> Token<'a> {
    pub fn raw(&self) -> &'a str {
        match *self {
            Token::Text(raw) | Token::ActionRun(raw) => raw,
            Token::StateTag { raw, .. } => raw,
            Token::BareAt => "@",
        }
    }

    /// Byte offset inside this token where the displayed text stops, if any.
    ///
    /// Every `@` stops display; an action marker only does when its verb
    /// starts with a lowercase letter.
    fn display_cut(&self) -> Option<usize> {
        match self {
            Token::Text(_) => None,
            Token::StateTag { .. } | Token::BareAt => Some(0),
            Token::ActionRun(raw) => {
                let bytes = raw.as_bytes();
                (0..bytes.len().saturating_sub(1))
                    .find(|&i| bytes[i] == b'!' && bytes[i + 1].is_ascii_lowercase())
            }
        }
    }
}

fn starts_action(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'!' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_alphabetic())
}

fn is_action_body(b: u8) -> bool {
    // `$` is allowed so `!set $name` can reach the global scope.
    b.is_ascii_alphanumeric() || b == b' ' || b == b'$'
}

/// Split a line body into tokens.
///
/// All markers are ASCII, so scanning bytes never splits a multi-byte
/// character: non-ASCII bytes always land inside `Text`.
pub fn tokenize(body: &str) -> Vec<Token<'_>> {
    let bytes = body.as_bytes();
    let len = bytes.len();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < len {
        let start = i;
        let token = if bytes[i] == b'@' {
            i += 1;
            while i < len && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            if i == start + 1 {
                Token::BareAt
            } else {
                Token::StateTag {
                    raw: &body[start..i],
                    name: &body[start + 1..i],
                }
            }
        } else if starts_action(bytes, i) {
            // `!x` then alnum/space, repeated while another marker follows.
            while i < len && starts_action(bytes, i) {
                i += 2;
                while i < len && is_action_body(bytes[i]) {
                    i += 1;
                }
            }
            Token::ActionRun(&body[start..i])
        } else {
            i += 1;
            continue;
        };

        if text_start < start {
            tokens.push(Token::Text(&body[text_start..start]));
        }
        tokens.push(token);
        text_start = i;
    }

    if text_start < len {
        tokens.push(Token::Text(&body[text_start..]));
    }
    tokens
}

/// Text shown to the player: everything before the first cut.
pub fn display_text(tokens: &[Token<'_>]) -> String {
    let mut text = String::new();
    for token in tokens {
        match token.display_cut() {
            Some(cut) => {
                text.push_str(&token.raw()[..cut]);
                break;
            }
            None => text.push_str(token.raw()),
        }
    }
    text.trim().to_string()
}

/// The first state tag on the line; later ones are ignored.
pub fn target_state<'a>(tokens: &[Token<'a>]) -> Option<&'a str> {
    tokens.iter().find_map(|token| match token {
        Token::StateTag { name, .. } => Some(*name),
        _ => None,
    })
}

/// Every action on the line, in source order.
///
/// Runs are split on `!`; fragments that are empty after trimming are dropped
/// and the rest split on whitespace into verb and arguments.
pub fn actions(tokens: &[Token<'_>]) -> Vec<ActionCall> {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::ActionRun(raw) => Some(*raw),
            _ => None,
        })
        .flat_map(|run| run.split('!'))
        .filter_map(|fragment| {
            let mut words = fragment.split_whitespace();
            let verb = words.next()?;
            Some(ActionCall::new(verb, words.map(str::to_string).collect()))
        })
        .collect()
}

/// Parse one raw script line.
///
/// NPC text is wrapped to `wrap_width`; player options are kept verbatim.
pub fn parse_line(raw: &str, wrap_width: usize) -> Line {
    let (role, body) = match raw.strip_prefix(OPTION_PREFIX) {
        Some(rest) => (Role::Player, rest),
        None => (Role::Npc, raw),
    };

    let tokens = tokenize(body);
    let mut text = display_text(&tokens);
    if role == Role::Npc {
        text = wrap(&text, wrap_width);
    }

    Line::new(
        raw.to_string(),
        role,
        text,
        target_state(&tokens).map(str::to_string),
        actions(&tokens),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &Line) -> Vec<Vec<&str>> {
        line.actions().iter().map(|a| a.words()).collect()
    }

    #[test]
    fn tokenize_plain_text() {
        assert_eq!(tokenize("Hello there."), vec![Token::Text("Hello there.")]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn tokenize_tags_and_actions() {
        let tokens = tokenize(" Yes @forest !end");
        assert_eq!(
            tokens,
            vec![
                Token::Text(" Yes "),
                Token::StateTag {
                    raw: "@forest",
                    name: "forest"
                },
                Token::Text(" "),
                Token::ActionRun("!end"),
            ]
        );
    }

    #[test]
    fn tokenize_fuses_adjacent_action_markers() {
        let tokens = tokenize("Oh. !sad !cry loudly");
        assert_eq!(
            tokens,
            vec![Token::Text("Oh. "), Token::ActionRun("!sad !cry loudly")]
        );
    }

    #[test]
    fn tokenize_exclamation_without_letter_is_text() {
        assert_eq!(tokenize("Wow! Great!"), vec![Token::Text("Wow! Great!")]);
    }

    #[test]
    fn tokenize_bare_at() {
        assert_eq!(
            tokenize("Meet me @ noon"),
            vec![Token::Text("Meet me "), Token::BareAt, Token::Text(" noon")]
        );
    }

    #[test]
    fn parse_player_option_with_tag_and_action() {
        let line = parse_line("> Yes, let's go @forest !end", 50);
        assert!(!line.is_npc());
        assert_eq!(line.role(), Role::Player);
        assert_eq!(line.target_state(), Some("forest"));
        assert_eq!(words(&line), vec![vec!["end"]]);
        assert_eq!(line.text(), "Yes, let's go");
        assert_eq!(line.source(), "> Yes, let's go @forest !end");
    }

    #[test]
    fn parse_npc_with_multiple_actions() {
        let line = parse_line("I am so sad today. !sad !cry loudly", 50);
        assert!(line.is_npc());
        assert_eq!(line.text(), "I am so sad today.");
        assert_eq!(words(&line), vec![vec!["sad"], vec!["cry", "loudly"]]);
        assert!(line.actions()[0].is_early());
        assert!(!line.actions()[1].is_early());
        assert_eq!(line.target_state(), None);
    }

    #[test]
    fn first_state_tag_wins() {
        let line = parse_line("Go away. @gate @forest", 50);
        assert_eq!(line.target_state(), Some("gate"));
        assert_eq!(line.text(), "Go away.");
    }

    #[test]
    fn actions_separated_by_tag_stay_in_order() {
        let line = parse_line("Fine. !set door open @gate !end", 50);
        assert_eq!(words(&line), vec![vec!["set", "door", "open"], vec!["end"]]);
        assert_eq!(line.target_state(), Some("gate"));
    }

    #[test]
    fn irregular_whitespace_in_actions() {
        let line = parse_line("Hm. !give   sword  !  !wave", 50);
        assert_eq!(words(&line), vec![vec!["give", "sword"], vec!["wave"]]);
    }

    #[test]
    fn global_variable_name_in_action() {
        let line = parse_line("Noted. !set $met 1", 50);
        assert_eq!(words(&line), vec![vec!["set", "$met", "1"]]);
    }

    #[test]
    fn punctuation_ends_action_body() {
        let line = parse_line("Bye. !wave, then leave", 50);
        assert_eq!(words(&line), vec![vec!["wave"]]);
        assert_eq!(line.text(), "Bye.");
    }

    #[test]
    fn uppercase_marker_is_action_but_not_a_cut() {
        let line = parse_line("Hey!Bob come here", 50);
        assert_eq!(line.text(), "Hey!Bob come here");
        assert_eq!(words(&line), vec![vec!["Bob", "come", "here"]]);
    }

    #[test]
    fn npc_text_is_wrapped_options_are_not() {
        let long = "This is a rather long line of dialogue that goes on and on";
        let npc = parse_line(long, 20);
        assert!(npc.text().contains('\n'));
        assert!(npc.text().split('\n').all(|s| s.chars().count() <= 20));

        let option = parse_line(&format!(">{long}"), 20);
        assert_eq!(option.text(), long);
    }

    #[test]
    fn unicode_text_survives() {
        let line = parse_line("Grüß dich, Wanderer… !amused", 50);
        assert_eq!(line.text(), "Grüß dich, Wanderer…");
        assert_eq!(words(&line), vec![vec!["amused"]]);
    }

    #[test]
    fn empty_line() {
        let line = parse_line("", 50);
        assert!(line.is_npc());
        assert_eq!(line.text(), "");
        assert!(line.actions().is_empty());
        assert_eq!(line.target_state(), None);
    }
}
