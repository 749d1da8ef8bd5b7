#![forbid(unsafe_code)]

//! Centered modal message frames.

use callout_core::geometry::{Rect, Sides, Size, saturate};

/// Chrome around a modal message box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageChrome {
    /// Space between the outer frame and the content on each side.
    pub insets: Sides,
}

impl MessageChrome {
    /// Message box drawn with border graphics.
    pub const fn graphic() -> Self {
        Self {
            insets: Sides::new(33, 44, 55, 44),
        }
    }

    /// Plain message box: a 2px border plus 20px padding.
    pub const fn plain() -> Self {
        Self {
            insets: Sides::all(2 + 20),
        }
    }

    /// Chrome with custom insets.
    pub const fn with_insets(insets: Sides) -> Self {
        Self { insets }
    }

    /// Outer frame for `content`, centered in `viewport`.
    ///
    /// The origin never goes negative: a frame larger than the viewport is
    /// pinned to the top-left corner.
    pub fn frame(&self, content: Size, viewport: Size) -> Rect {
        let outer = content.expand(self.insets);
        let x = (i64::from(viewport.width) - i64::from(outer.width)) / 2;
        let y = (i64::from(viewport.height) - i64::from(outer.height)) / 2;
        Rect::new(
            saturate(x.max(0)),
            saturate(y.max(0)),
            outer.width,
            outer.height,
        )
    }

    /// The content box inside a frame returned by [`frame`](Self::frame).
    pub fn content_rect(&self, frame: Rect) -> Rect {
        frame.inner(self.insets)
    }
}

impl Default for MessageChrome {
    fn default() -> Self {
        Self::graphic()
    }
}
