//! Property tests for wrapping and measurement.

use callout_core::geometry::Size;
use callout_text::{FontMetrics, TextMeasurer, display_width, wrap_lines};
use proptest::prelude::*;

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-z]{1,12}",
            Just(" ".to_string()),
            Just("  ".to_string()),
            Just("\n".to_string()),
            Just("日本".to_string()),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn lines_never_exceed_width(text in text_strategy(), width in 2usize..40) {
        for line in wrap_lines(&text, Some(width)) {
            prop_assert!(display_width(&line) <= width, "{:?} wider than {}", line, width);
        }
    }

    #[test]
    fn wrapping_keeps_every_word(text in text_strategy(), width in 2usize..40) {
        let original: String = text.split_whitespace().collect();
        let wrapped: String = wrap_lines(&text, Some(width))
            .iter()
            .flat_map(|l| l.split_whitespace())
            .collect();
        prop_assert_eq!(original, wrapped);
    }

    #[test]
    fn at_least_one_line_per_paragraph(text in text_strategy(), width in 0usize..40) {
        let paragraphs = text.split('\n').count();
        prop_assert!(wrap_lines(&text, Some(width)).len() >= paragraphs);
    }

    #[test]
    fn measured_height_is_whole_lines(text in text_strategy(), wrap in 0u32..400) {
        let mut measurer = TextMeasurer::new(FontMetrics::new(8.0, 16)).wrap_width(wrap);
        let size = measurer.compute_size(&text, None);
        prop_assert_eq!(size.height % 16, 0);
        prop_assert!(size.height >= 16);
        if wrap >= 16 {
            prop_assert!(size.width <= wrap, "{:?} wider than {}", size, wrap);
        }
    }
}

#[test]
fn measuring_is_repeatable() {
    let mut measurer = TextMeasurer::default().wrap_width(120);
    let first = measurer.compute_size("a callout with a few words in it", None);
    let second = measurer.compute_size("a callout with a few words in it", None);
    assert_eq!(first, second);
    assert_ne!(first, Size::ZERO);
}
