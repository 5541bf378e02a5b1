//! Text wrapping for NPC speech.
//!
//! Lines are broken at the last space of a segment once the segment reaches
//! the column budget, or cut mid-word when the segment holds no space.

use std::iter::Peekable;
use std::str::Chars;

/// Default column budget for NPC lines.
pub const DEFAULT_WRAP_WIDTH: usize = 50;

/// Wrap `text` so that no segment between newlines is longer than
/// `max_width` characters.
///
/// Width is counted in Unicode scalar values. Existing newlines reset the
/// segment. A break only happens when the segment continues past the budget,
/// so wrapping already wrapped text returns it unchanged. A width of zero
/// disables wrapping.
pub fn wrap(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return text.to_string();
    }

    let mut out: Vec<char> = Vec::with_capacity(text.len() + text.len() / max_width + 1);
    let mut chars = text.chars().peekable();
    let mut segment_len = 0usize;
    let mut last_space: Option<usize> = None;

    while let Some(c) = chars.next() {
        if c == '\n' {
            out.push(c);
            segment_len = 0;
            last_space = None;
            continue;
        }

        if c == ' ' {
            last_space = Some(out.len());
        }
        out.push(c);
        segment_len += 1;

        if segment_len < max_width {
            continue;
        }
        // Nothing left on this segment, so it fits as is.
        match chars.peek() {
            None | Some('\n') => continue,
            Some(_) => {}
        }

        match last_space.take() {
            Some(pos) => {
                out[pos] = '\n';
                segment_len = out.len() - 1 - pos;
                if segment_len == 0 && skip_spaces(&mut chars) {
                    out.pop();
                }
            }
            None => {
                if skip_spaces(&mut chars) {
                    continue;
                }
                out.push('\n');
                segment_len = 0;
            }
        }
    }

    out.into_iter().collect()
}

/// Swallow the spaces right after a break so the next segment never opens
/// with a blank. Returns true when nothing follows on the segment.
fn skip_spaces(chars: &mut Peekable<Chars<'_>>) -> bool {
    while chars.next_if_eq(&' ').is_some() {}
    matches!(chars.peek(), None | Some('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(s: &str) -> Vec<&str> {
        s.split('\n').collect()
    }

    #[test]
    fn short_text_untouched() {
        assert_eq!(wrap("Hello there.", 50), "Hello there.");
    }

    #[test]
    fn exact_width_untouched() {
        assert_eq!(wrap("abcde", 5), "abcde");
        assert_eq!(wrap("ab cd", 5), "ab cd");
    }

    #[test]
    fn breaks_at_last_space() {
        let input = "Hello there, this sentence is definitely longer than fifty characters for sure";
        let wrapped = wrap(input, 50);
        let parts = segments(&wrapped);
        assert_eq!(parts[0], "Hello there, this sentence is definitely longer");
        assert!(parts.iter().all(|p| p.chars().count() <= 50));
        // Only spaces were replaced, no words were cut.
        assert_eq!(wrapped.replace('\n', " "), input);
    }

    #[test]
    fn hard_cut_without_spaces() {
        assert_eq!(wrap("abcdefghij", 4), "abcd\nefgh\nij");
    }

    #[test]
    fn hard_cut_then_word_break() {
        assert_eq!(wrap("abcdef gh", 4), "abcd\nef\ngh");
    }

    #[test]
    fn spaces_after_a_break_are_dropped() {
        assert_eq!(wrap("abcd  ef", 4), "abcd\nef");
        assert_eq!(wrap("abc  defg", 4), "abc\ndefg");
        assert_eq!(wrap("abcd   ", 4), "abcd");
        assert_eq!(wrap("abc   ", 4), "abc");
        assert_eq!(wrap("ab  cd", 2), "ab\ncd");
    }

    #[test]
    fn existing_newlines_reset_segment() {
        assert_eq!(wrap("abc\nabc\nabc", 4), "abc\nabc\nabc");
        assert_eq!(wrap("ab cd\nef gh ij", 5), "ab cd\nef\ngh ij");
    }

    #[test]
    fn space_before_newline_not_reused() {
        // The space in the first segment must not be used to break the second.
        assert_eq!(wrap("a b\ncdefgh", 3), "a b\ncde\nfgh");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let wrapped = wrap("ääää öööö", 4);
        assert_eq!(wrapped, "ääää\nöööö");
    }

    #[test]
    fn zero_width_disables_wrapping() {
        assert_eq!(wrap("no wrapping at all here", 0), "no wrapping at all here");
    }

    #[test]
    fn idempotent_on_sample() {
        let input = "The old bridge collapsed last winter, so you will have to wade across the river instead.";
        let once = wrap(input, 20);
        assert_eq!(wrap(&once, 20), once);
    }
}
