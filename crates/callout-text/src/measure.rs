#![forbid(unsafe_code)]

//! Pixel sizes of text from simple font metrics.
//!
//! A [`TextMeasurer`] plays the part of an off-screen rendering context:
//! text is wrapped to an optional pixel width, each line's display width is
//! scaled by the font's cell width and the line count by its line height.
//! Named classes carry their own metrics, the way a style class would.
//!
//! ```
//! use callout_core::geometry::Size;
//! use callout_text::{FontMetrics, TextMeasurer};
//!
//! let mut measurer = TextMeasurer::new(FontMetrics::new(7.5, 16)).wrap_width(150);
//! assert_eq!(measurer.compute_size("Hello", None), Size::new(38, 16));
//! ```

use callout_core::geometry::Size;
use callout_core::measure::Measure;
use rustc_hash::FxHashMap;

use crate::width_cache::WidthCache;
use crate::wrap::wrap_lines;

/// Metrics of a monospaced-ish font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Pixels per display cell.
    pub cell_width: f64,
    /// Pixels per line.
    pub line_height: u32,
}

impl FontMetrics {
    pub const fn new(cell_width: f64, line_height: u32) -> Self {
        Self {
            cell_width,
            line_height,
        }
    }

    fn cells_in(&self, px: u32) -> usize {
        if self.cell_width > 0.0 && self.cell_width.is_finite() {
            ((f64::from(px) / self.cell_width).floor() as usize).max(1)
        } else {
            0
        }
    }

    fn px_for(&self, cells: usize) -> u32 {
        let px = (cells as f64 * self.cell_width).ceil();
        if px.is_finite() && px > 0.0 {
            px.min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::new(8.0, 16)
    }
}

/// Measures text boxes for bubble content.
#[derive(Debug)]
pub struct TextMeasurer {
    metrics: FontMetrics,
    classes: FxHashMap<String, FontMetrics>,
    wrap_width: Option<u32>,
    line_height: u32,
    cache: WidthCache,
}

impl TextMeasurer {
    /// Create a measurer with default metrics `metrics` and no wrapping.
    pub fn new(metrics: FontMetrics) -> Self {
        Self {
            metrics,
            classes: FxHashMap::default(),
            wrap_width: None,
            line_height: 0,
            cache: WidthCache::default(),
        }
    }

    /// Wrap text to `px` pixels wide (builder). Zero disables wrapping.
    #[must_use]
    pub fn wrap_width(mut self, px: u32) -> Self {
        self.set_wrap_width(Some(px).filter(|&w| w > 0));
        self
    }

    /// Register metrics for a named class (builder).
    #[must_use]
    pub fn with_class(mut self, name: impl Into<String>, metrics: FontMetrics) -> Self {
        self.classes.insert(name.into(), metrics);
        self
    }

    /// Change the wrap width.
    pub fn set_wrap_width(&mut self, px: Option<u32>) {
        self.wrap_width = px;
    }

    /// Current wrap width in pixels.
    pub fn current_wrap_width(&self) -> Option<u32> {
        self.wrap_width
    }

    /// Recompute the line height by measuring a single glyph.
    pub fn update(&mut self) {
        self.line_height = self.compute_size("A", None).height;
        callout_core::trace!(line_height = self.line_height, "text measurer updated");
    }

    /// Line height from the last [`update`](Self::update); zero before.
    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Size of `text` rendered with the metrics of `class` (or the defaults).
    ///
    /// Unknown classes fall back to the default metrics. Empty text is one
    /// line tall and zero wide.
    pub fn compute_size(&mut self, text: &str, class: Option<&str>) -> Size {
        self.size_at(text, class, self.wrap_width)
    }

    /// [`compute_size`](Self::compute_size) with the wrap width narrowed to
    /// at most `max_width` pixels for this call. Zero adds no limit.
    pub fn compute_size_within(
        &mut self,
        text: &str,
        class: Option<&str>,
        max_width: u32,
    ) -> Size {
        let wrap = match (self.wrap_width, max_width) {
            (wrap, 0) => wrap,
            (Some(own), limit) => Some(own.min(limit)),
            (None, limit) => Some(limit),
        };
        self.size_at(text, class, wrap)
    }

    fn size_at(&mut self, text: &str, class: Option<&str>, wrap: Option<u32>) -> Size {
        let metrics = self.metrics_for(class);
        let max_cells = wrap.map(|px| metrics.cells_in(px));
        let lines = wrap_lines(text, max_cells);

        let widest = lines
            .iter()
            .map(|line| self.cache.get_or_compute(line))
            .max()
            .unwrap_or(0);
        let line_count = u32::try_from(lines.len()).unwrap_or(u32::MAX);

        Size::new(
            metrics.px_for(widest),
            line_count.saturating_mul(metrics.line_height),
        )
    }

    /// Width cache statistics.
    pub fn cache_stats(&self) -> crate::CacheStats {
        self.cache.stats()
    }

    fn metrics_for(&self, class: Option<&str>) -> FontMetrics {
        class
            .and_then(|name| self.classes.get(name))
            .copied()
            .unwrap_or(self.metrics)
    }
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new(FontMetrics::default())
    }
}

impl Measure<str> for TextMeasurer {
    fn measure(&mut self, content: &str) -> Size {
        self.compute_size(content, None)
    }

    fn measure_within(&mut self, content: &str, max_width: u32) -> Size {
        self.compute_size_within(content, None, max_width)
    }
}

impl Measure<String> for TextMeasurer {
    fn measure(&mut self, content: &String) -> Size {
        self.compute_size(content, None)
    }

    fn measure_within(&mut self, content: &String, max_width: u32) -> Size {
        self.compute_size_within(content, None, max_width)
    }
}
