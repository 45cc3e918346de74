//! Text flow: greedy word-wrap against a width budget, and the vertical spacing rule.
//!
//! The line-height factor is a fixed constant rather than a ratio of glyph metrics.
//! Page counts depend on it, so it must not drift.

use crate::layout::font_metrics::{Font, TextMeasure};

/// Vertical advance per line, as a multiple of the font size in points.
pub const LINE_HEIGHT_FACTOR: f32 = 0.4;

/// Wraps text to a width using a font-metrics collaborator.
pub struct TextFlow<'m> {
    measure: &'m dyn TextMeasure,
}

impl<'m> TextFlow<'m> {
    pub fn new(measure: &'m dyn TextMeasure) -> Self {
        Self { measure }
    }

    /// Splits `text` into the fewest lines whose measured width fits `max_width`.
    ///
    /// Breaks only at whitespace. A word wider than `max_width` gets a line of its
    /// own and is never split. Each `\n` starts a new line. A paragraph keeps its
    /// leading indent and the spacing between words on the same line; whitespace
    /// at a break is dropped. Empty input yields a single empty line.
    pub fn wrap(&self, text: &str, max_width: f32, font: Font) -> Vec<String> {
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();
            let mut current_width = 0.0_f32;
            let mut started = false;

            for (gap, word) in words(paragraph) {
                let word_w = self.measure.measure(word, font);
                let gap_w = self.measure.measure(gap, font);
                if !started {
                    current.push_str(gap);
                    current.push_str(word);
                    current_width = gap_w + word_w;
                    started = true;
                } else if current_width + gap_w + word_w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_width = word_w;
                } else {
                    current.push_str(gap);
                    current.push_str(word);
                    current_width += gap_w + word_w;
                }
            }
            lines.push(current);
        }

        lines
    }

    /// Height consumed by `line_count` lines at `font_size`.
    pub fn block_height(line_count: usize, font_size: f32) -> f32 {
        line_count as f32 * font_size * LINE_HEIGHT_FACTOR
    }

    /// `y + line_count * font_size * 0.4`.
    pub fn advance(y: f32, line_count: usize, font_size: f32) -> f32 {
        y + Self::block_height(line_count, font_size)
    }
}

/// Words of a paragraph, each paired with the whitespace before it.
/// Trailing whitespace is dropped.
fn words(paragraph: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut rest = paragraph;
    while let Some(start) = rest.find(|c: char| !c.is_whitespace()) {
        let (gap, tail) = rest.split_at(start);
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, next) = tail.split_at(end);
        out.push((gap, word));
        rest = next;
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::StandardFonts;

    /// Every character is 1 unit wide regardless of font, so widths are char counts.
    struct Monospace;

    impl TextMeasure for Monospace {
        fn measure(&self, text: &str, _font: Font) -> f32 {
            text.chars().count() as f32
        }
    }

    const BODY: Font = Font::normal(12.0);

    #[test]
    fn test_wrap_empty_is_one_empty_line() {
        let flow = TextFlow::new(&Monospace);
        assert_eq!(flow.wrap("", 10.0, BODY), vec![String::new()]);
    }

    #[test]
    fn test_wrap_whitespace_only_is_one_empty_line() {
        let flow = TextFlow::new(&Monospace);
        assert_eq!(flow.wrap("   \t ", 10.0, BODY), vec![String::new()]);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let flow = TextFlow::new(&Monospace);
        assert_eq!(flow.wrap("One. Two. Three.", 40.0, BODY), vec!["One. Two. Three."]);
    }

    #[test]
    fn test_wrap_breaks_at_whitespace() {
        let flow = TextFlow::new(&Monospace);
        let lines = flow.wrap("aaa bbb ccc ddd", 7.0, BODY);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_wrap_exact_fit_does_not_break() {
        let flow = TextFlow::new(&Monospace);
        assert_eq!(flow.wrap("ab cd", 5.0, BODY), vec!["ab cd"]);
    }

    #[test]
    fn test_wrap_keeps_spacing_between_words() {
        let flow = TextFlow::new(&Monospace);
        assert_eq!(flow.wrap("a    b\tc", 20.0, BODY), vec!["a    b\tc"]);
    }

    #[test]
    fn test_wrap_keeps_leading_indent() {
        let flow = TextFlow::new(&Monospace);
        assert_eq!(flow.wrap("  - DFS", 40.0, BODY), vec!["  - DFS"]);
    }

    #[test]
    fn test_wrap_indent_counts_toward_width_and_gap_dropped_at_break() {
        let flow = TextFlow::new(&Monospace);
        // "  ab cd" is 7 wide; the break swallows the space before "cd".
        assert_eq!(flow.wrap("  ab cd", 6.0, BODY), vec!["  ab", "cd"]);
    }

    #[test]
    fn test_wrap_drops_trailing_whitespace() {
        let flow = TextFlow::new(&Monospace);
        assert_eq!(flow.wrap("end   ", 40.0, BODY), vec!["end"]);
    }

    #[test]
    fn test_wrap_long_word_keeps_own_line() {
        let flow = TextFlow::new(&Monospace);
        let lines = flow.wrap("hi supercalifragilistic yo", 6.0, BODY);
        assert_eq!(lines, vec!["hi", "supercalifragilistic", "yo"]);
    }

    #[test]
    fn test_wrap_respects_newlines() {
        let flow = TextFlow::new(&Monospace);
        let lines = flow.wrap("first\n\nsecond", 40.0, BODY);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_wrap_lines_fit_width_with_real_metrics() {
        let flow = TextFlow::new(&StandardFonts);
        let text = "Photosynthesis converts light energy into chemical energy stored in \
                    glucose, releasing oxygen as a by-product of splitting water molecules \
                    inside the thylakoid membranes of the chloroplast.";
        let max_width = 60.0;
        let lines = flow.wrap(text, max_width, BODY);
        assert!(lines.len() > 1);
        for line in &lines {
            let width = StandardFonts.measure(line, BODY);
            let single_word = !line.contains(' ');
            assert!(
                width <= max_width + 1e-3 || single_word,
                "line '{line}' measures {width} > {max_width}"
            );
        }
        // Nothing lost or reordered.
        let rejoined = lines.join(" ");
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined.split_whitespace().collect::<Vec<_>>(), original);
    }

    #[test]
    fn test_wrap_is_greedy_minimal() {
        let flow = TextFlow::new(&Monospace);
        // 9 words of 1 char: "a b c" is 5 wide, so 3 per line at width 5.
        let lines = flow.wrap("a b c d e f g h i", 5.0, BODY);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_advance_formula() {
        assert_eq!(TextFlow::advance(20.0, 3, 12.0), 20.0 + 3.0 * 12.0 * 0.4);
        assert_eq!(TextFlow::advance(57.5, 1, 10.0), 57.5 + 1.0 * 10.0 * 0.4);
    }

    #[test]
    fn test_advance_zero_lines_is_identity() {
        assert_eq!(TextFlow::advance(42.0, 0, 14.0), 42.0);
    }
}
