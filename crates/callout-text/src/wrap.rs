#![forbid(unsafe_code)]

//! Greedy line wrapping by display width.
//!
//! Explicit newlines always break. Within a paragraph, words are packed
//! greedily; a word wider than the limit is split at grapheme boundaries so
//! no emoji or combining sequence is torn apart.
//!
//! ```
//! use callout_text::wrap_lines;
//!
//! assert_eq!(wrap_lines("Hello world foo bar", Some(10)), vec!["Hello", "world foo", "bar"]);
//! assert_eq!(wrap_lines("one\ntwo", None), vec!["one", "two"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of `text` in cells.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Split `text` into lines no wider than `max_width` cells.
///
/// `None` (or zero) only breaks at explicit newlines. Trailing whitespace is
/// trimmed from every line. Always returns at least one line.
#[must_use]
pub fn wrap_lines(text: &str, max_width: Option<usize>) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        match max_width.filter(|&w| w > 0) {
            Some(width) => wrap_paragraph(paragraph, width, &mut lines),
            None => lines.push(paragraph.trim_end().to_string()),
        }
    }
    lines
}

fn wrap_paragraph(text: &str, width: usize, lines: &mut Vec<String>) {
    let mut line = String::new();
    let mut line_width = 0;

    for word in split_words(text) {
        let word_width = word.width();

        if line_width + word_width <= width {
            line.push_str(word);
            line_width += word_width;
            continue;
        }

        let is_space = word.trim().is_empty();
        if !line.is_empty() {
            lines.push(line.trim_end().to_string());
            line.clear();
            line_width = 0;
        }
        if is_space {
            continue;
        }

        if word_width > width {
            for grapheme in word.graphemes(true) {
                let g_width = grapheme.width();
                if line_width + g_width > width && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push_str(grapheme);
                line_width += g_width;
            }
        } else {
            line.push_str(word);
            line_width = word_width;
        }
    }

    if !line.is_empty() || text.trim().is_empty() {
        lines.push(line.trim_end().to_string());
    }
}

/// Alternating runs of whitespace and non-whitespace graphemes.
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut in_space = None;

    for (idx, grapheme) in text.grapheme_indices(true) {
        let is_space = grapheme.chars().all(char::is_whitespace);
        if in_space.is_some_and(|prev| prev != is_space) {
            words.push(&text[start..idx]);
            start = idx;
        }
        in_space = Some(is_space);
    }
    if start < text.len() {
        words.push(&text[start..]);
    }
    words
}
