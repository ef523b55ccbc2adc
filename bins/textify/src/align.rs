//! Alignment of a block of lines around an indicator string
//!
//! **Rules:**
//! - The align index is the length, in characters, of the text before the
//!   first indicator on each line that has one (untrimmed)
//! - Rightmost alignment takes the largest such length, leftmost the smallest
//! - An aligned line has its left side right-trimmed, then padded with
//!   spaces up to the index plus `padding`; lines already past the index
//!   get only the padding
//! - Lines without the indicator pass through untouched

/// Indicator used when none is given
pub const DEFAULT_INDICATOR: &str = "=";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignSide {
    #[default]
    Rightmost,
    Leftmost,
}

/// Column at which to place the indicator, or `None` if no line has one
pub fn align_index<S: AsRef<str>>(lines: &[S], indicator: &str, side: AlignSide) -> Option<usize> {
    if indicator.is_empty() {
        return None;
    }

    lines
        .iter()
        .filter_map(|line| line.as_ref().split_once(indicator))
        .map(|(lval, _)| lval.chars().count())
        .reduce(|index, len| match side {
            AlignSide::Rightmost => index.max(len),
            AlignSide::Leftmost => index.min(len),
        })
}

/// Align a single line at `index`; lines without the indicator are returned as is
pub fn align_line(line: &str, index: usize, indicator: &str, padding: usize) -> String {
    if indicator.is_empty() {
        return line.to_string();
    }
    match line.split_once(indicator) {
        Some((lval, rval)) => {
            let lval = lval.trim_end();
            let fill = index.saturating_sub(lval.chars().count()) + padding;
            format!("{}{}{}{}", lval, " ".repeat(fill), indicator, rval)
        }
        None => line.to_string(),
    }
}

/// Align every line of `lines` around `indicator`
pub fn align_block<S: AsRef<str>>(lines: &[S], indicator: &str, side: AlignSide, padding: usize) -> Vec<String> {
    let Some(index) = align_index(lines, indicator, side) else {
        return lines.iter().map(|l| l.as_ref().to_string()).collect();
    };

    lines
        .iter()
        .map(|line| align_line(line.as_ref(), index, indicator, padding))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rightmost_is_default() {
        assert_eq!(AlignSide::default(), AlignSide::Rightmost);
    }

    #[test]
    fn test_align_index_uses_untrimmed_length() {
        let lines = ["x = 1", "longer = 2", "mid=3", "none"];
        assert_eq!(align_index(&lines, "=", AlignSide::Rightmost), Some(7));
        assert_eq!(align_index(&lines, "=", AlignSide::Leftmost), Some(2));
    }

    #[test]
    fn test_align_index_without_indicator() {
        assert_eq!(align_index(&["abc", "def"], "=", AlignSide::Rightmost), None);
        assert_eq!(align_index(&["a=b"], "", AlignSide::Rightmost), None);
    }

    #[test]
    fn test_align_block_rightmost() {
        let lines = ["a=1\n", "bb=2\n"];
        assert_eq!(
            align_block(&lines, "=", AlignSide::Rightmost, 0),
            vec!["a =1\n", "bb=2\n"]
        );
    }

    #[test]
    fn test_align_block_leftmost_never_truncates() {
        let lines = ["x = 1", "longer = 2", "mid=3"];
        assert_eq!(
            align_block(&lines, "=", AlignSide::Leftmost, 0),
            vec!["x = 1", "longer= 2", "mid=3"]
        );
    }

    #[test]
    fn test_align_block_with_padding_and_custom_indicator() {
        let lines = ["name: x", "id: 7", "plain"];
        assert_eq!(
            align_block(&lines, ":", AlignSide::Rightmost, 1),
            vec!["name : x", "id   : 7", "plain"]
        );
    }

    #[test]
    fn test_only_first_indicator_is_aligned() {
        let lines = ["a=b=c", "long=d"];
        assert_eq!(
            align_block(&lines, "=", AlignSide::Rightmost, 0),
            vec!["a   =b=c", "long=d"]
        );
    }

    #[test]
    fn test_multi_character_indicator() {
        let lines = ["x and y", "longer and z"];
        assert_eq!(
            align_block(&lines, "and", AlignSide::Rightmost, 0),
            vec!["x      and y", "longer and z"]
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let lines = ["é=1", "ab=2"];
        assert_eq!(
            align_block(&lines, "=", AlignSide::Rightmost, 0),
            vec!["é =1", "ab=2"]
        );
    }
}
