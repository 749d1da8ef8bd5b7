#![forbid(unsafe_code)]

//! Fitting measured content into a bubble.
//!
//! Measured content gets a little slack on both axes. If a maximum height is
//! set and exceeded, the content is capped at that height and laid out in a
//! scroll container narrowed by the scrollbar allowance.

use callout_core::geometry::{Sides, Size};

/// Sizing rules applied between measurement and placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContentFit {
    /// Wrap width used when the caller does not give one.
    pub default_width: u32,
    /// Pixels added to the measured width and height.
    pub slack: u32,
    /// Width taken away from a scroll container for its scrollbar.
    pub scrollbar_allowance: u32,
}

/// Result of [`ContentFit::fit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FittedContent {
    /// Size of the content box handed to placement.
    pub size: Size,
    /// Inner width of the scroll container, when the content had to scroll.
    pub scroll_width: Option<u32>,
}

impl FittedContent {
    /// Whether the content overflowed the maximum height.
    pub const fn scrolls(&self) -> bool {
        self.scroll_width.is_some()
    }
}

impl ContentFit {
    pub const DEFAULT_WIDTH: u32 = 300;
    pub const DEFAULT_SLACK: u32 = 10;
    pub const DEFAULT_SCROLLBAR_ALLOWANCE: u32 = 25;

    pub const fn new() -> Self {
        Self {
            default_width: Self::DEFAULT_WIDTH,
            slack: Self::DEFAULT_SLACK,
            scrollbar_allowance: Self::DEFAULT_SCROLLBAR_ALLOWANCE,
        }
    }

    /// Set the fallback wrap width.
    #[must_use]
    pub const fn default_width(mut self, width: u32) -> Self {
        self.default_width = width;
        self
    }

    /// Set the measurement slack.
    #[must_use]
    pub const fn slack(mut self, slack: u32) -> Self {
        self.slack = slack;
        self
    }

    /// Set the scrollbar allowance.
    #[must_use]
    pub const fn scrollbar_allowance(mut self, allowance: u32) -> Self {
        self.scrollbar_allowance = allowance;
        self
    }

    /// Wrap width to use: `requested` if non-zero, else the default.
    pub fn wrap_width(&self, requested: Option<u32>) -> u32 {
        requested
            .filter(|&w| w > 0)
            .unwrap_or(self.default_width)
    }

    /// Fit a measured size, capping it at `max_height` (zero means no cap).
    pub fn fit(&self, measured: Size, max_height: Option<u32>) -> FittedContent {
        let size = measured.expand(Sides::new(0, self.slack, self.slack, 0));
        match max_height.filter(|&h| h > 0) {
            Some(max) if size.height > max => {
                let scroll_width = size.width.saturating_sub(self.scrollbar_allowance);
                callout_core::debug!(
                    height = size.height,
                    max,
                    scroll_width,
                    "bubble content overflows; scrolling"
                );
                FittedContent {
                    size: Size::new(size.width, max),
                    scroll_width: Some(scroll_width),
                }
            }
            _ => FittedContent {
                size,
                scroll_width: None,
            },
        }
    }
}

impl Default for ContentFit {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let fit = ContentFit::default();
        assert_eq!(fit.default_width, 300);
        assert_eq!(fit.slack, 10);
        assert_eq!(fit.scrollbar_allowance, 25);
    }

    #[test]
    fn adds_slack_on_both_axes() {
        let fitted = ContentFit::default().fit(Size::new(120, 40), None);
        assert_eq!(fitted.size, Size::new(130, 50));
        assert!(!fitted.scrolls());
    }

    #[test]
    fn caps_height_and_scrolls() {
        let fitted = ContentFit::default().fit(Size::new(200, 500), Some(300));
        assert_eq!(fitted.size, Size::new(210, 300));
        assert_eq!(fitted.scroll_width, Some(185));
    }

    #[test]
    fn height_equal_to_max_does_not_scroll() {
        let fitted = ContentFit::default().fit(Size::new(200, 290), Some(300));
        assert_eq!(fitted.scroll_width, None);
        assert_eq!(fitted.size.height, 300);
    }

    #[test]
    fn zero_max_height_means_unbounded() {
        let fitted = ContentFit::default().fit(Size::new(10, 5000), Some(0));
        assert_eq!(fitted.size, Size::new(20, 5010));
        assert!(!fitted.scrolls());
    }

    #[test]
    fn narrow_scroll_width_saturates() {
        let fitted = ContentFit::default().fit(Size::new(5, 500), Some(100));
        assert_eq!(fitted.scroll_width, Some(0));
    }

    #[test]
    fn wrap_width_falls_back_to_default() {
        let fit = ContentFit::new().default_width(250);
        assert_eq!(fit.wrap_width(None), 250);
        assert_eq!(fit.wrap_width(Some(0)), 250);
        assert_eq!(fit.wrap_width(Some(120)), 120);
    }
}
