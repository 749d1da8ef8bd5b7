#![forbid(unsafe_code)]

//! Text measurement for callout content.
//!
//! - [`WidthCache`] - LRU cache of display widths
//! - [`wrap`] - greedy word wrapping with a grapheme fallback for long words
//! - [`TextMeasurer`] - pixel sizes from font metrics, implementing
//!   [`Measure<str>`](callout_core::measure::Measure)
//!
//! Widths are Unicode display widths in cells; no shaping is done.

pub mod measure;
pub mod width_cache;
pub mod wrap;

pub use measure::{FontMetrics, TextMeasurer};
pub use width_cache::{CacheStats, DEFAULT_CACHE_CAPACITY, WidthCache};
pub use wrap::{display_width, wrap_lines};
