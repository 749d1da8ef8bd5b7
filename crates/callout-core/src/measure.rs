#![forbid(unsafe_code)]

//! The measurement half of the measure-then-place contract.
//!
//! Placement never waits for content to reflow. Callers measure first, then
//! hand the resulting [`Size`] to the placer.

use crate::geometry::Size;

/// Something that can report the natural size of a piece of content.
pub trait Measure<C: ?Sized> {
    /// Natural size of `content` in pixels.
    fn measure(&mut self, content: &C) -> Size;

    /// Size of `content` laid out no wider than `max_width` pixels.
    ///
    /// Measurers that cannot reflow report the natural size.
    fn measure_within(&mut self, content: &C, _max_width: u32) -> Size {
        self.measure(content)
    }
}

impl<C: ?Sized, F> Measure<C> for F
where
    F: FnMut(&C) -> Size,
{
    fn measure(&mut self, content: &C) -> Size {
        self(content)
    }
}

/// A measurer that reports the same size for everything.
///
/// Handy for content whose size is known up front (images, fixed widgets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSize(pub Size);

impl<C: ?Sized> Measure<C> for FixedSize {
    fn measure(&mut self, _content: &C) -> Size {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_measures() {
        let mut by_len = |s: &str| Size::new(s.len() as u32 * 8, 16);
        assert_eq!(by_len.measure("abcd"), Size::new(32, 16));
        assert_eq!(by_len.measure_within("abcd", 8), Size::new(32, 16));
    }

    #[test]
    fn fixed_size_ignores_content() {
        let mut fixed = FixedSize(Size::new(10, 20));
        assert_eq!(Measure::<str>::measure(&mut fixed, "anything"), Size::new(10, 20));
        assert_eq!(Measure::<[u8]>::measure(&mut fixed, &[1, 2, 3]), Size::new(10, 20));
    }
}
