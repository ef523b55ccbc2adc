//! Word-preserving line wrapping.
//!
//! A line is only ever broken at a space, so tokens are never split even
//! when that leaves the line over the margin. Overflow is pushed onto the
//! start of the following line, which is then wrapped in turn.

/// Margin used when none is given
pub const DEFAULT_COLUMN: usize = 80;

/// Split `line` at the last space before `column`
///
/// Returns the head and whatever follows the space. A line that fits, or
/// that has no space after its first character within the margin, comes
/// back whole with an empty remainder.
pub fn split_line(line: &str, column: usize) -> (&str, &str) {
    if line.chars().count() <= column {
        return (line, "");
    }

    let split_at = line
        .char_indices()
        .take(column)
        .filter(|&(pos, c)| c == ' ' && pos > 0)
        .map(|(pos, _)| pos)
        .last();

    match split_at {
        Some(pos) => (&line[..pos], &line[pos + 1..]),
        None => (line, ""),
    }
}

/// Wrap every line at `column`
///
/// Output lines are right-trimmed. Overflow from the last line becomes a
/// new line of its own and is wrapped like any other.
pub fn wrap_lines<S: AsRef<str>>(lines: &[S], column: usize) -> Vec<String> {
    let mut block: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();

    let mut i = 0;
    while i < block.len() {
        let (head, excess) = {
            let (head, excess) = split_line(&block[i], column);
            (head.trim_end().to_string(), excess.trim_end().to_string())
        };
        block[i] = head;

        if !excess.is_empty() {
            match block.get_mut(i + 1) {
                Some(next) => *next = format!("{} {}", excess, next),
                None => block.push(excess),
            }
        }
        i += 1;
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line_fits() {
        assert_eq!(split_line("short", 10), ("short", ""));
        assert_eq!(split_line("exactly10!", 10), ("exactly10!", ""));
    }

    #[test]
    fn test_split_line_at_last_space_before_margin() {
        assert_eq!(split_line("the quick brown fox", 10), ("the quick", "brown fox"));
        assert_eq!(split_line("ab cd ef", 5), ("ab", "cd ef"));
    }

    #[test]
    fn test_split_line_never_breaks_a_word() {
        assert_eq!(split_line("abcdefghij", 5), ("abcdefghij", ""));
        assert_eq!(split_line("abcdefgh ij", 5), ("abcdefgh ij", ""));
    }

    #[test]
    fn test_split_line_ignores_leading_space() {
        assert_eq!(split_line(" abcdefgh", 5), (" abcdefgh", ""));
    }

    #[test]
    fn test_wrap_carries_overflow_forward() {
        let lines = ["the quick brown fox jumps", "over"];
        assert_eq!(
            wrap_lines(&lines, 10),
            vec!["the quick", "brown fox", "jumps over"]
        );
    }

    #[test]
    fn test_wrap_rewraps_trailing_overflow() {
        let lines = ["aa bb cc dd ee"];
        assert_eq!(wrap_lines(&lines, 6), vec!["aa bb", "cc dd", "ee"]);
        // The space must fall strictly before the margin; "dd ee" then fits
        assert_eq!(wrap_lines(&lines, 5), vec!["aa", "bb", "cc", "dd ee"]);
    }

    #[test]
    fn test_wrap_keeps_line_exactly_at_margin() {
        let lines = ["abc de", "abc def"];
        assert_eq!(wrap_lines(&lines, 6), vec!["abc de", "abc", "def"]);
        assert_eq!(split_line("abc de", 6), ("abc de", ""));
        assert_eq!(split_line("abc def", 6), ("abc", "def"));
    }

    #[test]
    fn test_wrap_trims_trailing_whitespace() {
        let lines = ["keep   ", "  indent  "];
        assert_eq!(wrap_lines(&lines, 80), vec!["keep", "  indent"]);
    }

    #[test]
    fn test_wrap_leaves_unbreakable_lines() {
        let lines = ["supercalifragilistic", "x"];
        assert_eq!(wrap_lines(&lines, 5), vec!["supercalifragilistic", "x"]);
    }

    #[test]
    fn test_wrap_empty_input() {
        let lines: [&str; 0] = [];
        assert!(wrap_lines(&lines, 80).is_empty());
    }
}
