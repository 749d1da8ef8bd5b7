#![forbid(unsafe_code)]

//! Callout bubble placement.
//!
//! Given a target point, the size of the bubble's content box and the
//! viewport, [`BubblePlacer::place`] decides on which side of the target the
//! bubble goes and where its content box starts. The arrow always exits the
//! edge facing the target and points back at it.
//!
//! # Decision order
//!
//! 1. If the target has horizontal clearance on both sides (half the arrow
//!    width plus border plus padding), try above, then below.
//! 2. Otherwise, or if neither vertical side fits, try left of the target.
//! 3. Right of the target is the unconditional fallback.
//!
//! A preferred [`Side`] forces its branch once that branch is reached; a
//! vertical preference that is never reached (no horizontal clearance) falls
//! through to the right-hand fallback.
//!
//! # Clamping
//!
//! On the axis the bubble slides along, the content box is first centered on
//! the target, then pushed back inside `[padding + border, extent - padding -
//! border - content]`. Only one bound is applied, chosen by which half of the
//! viewport holds the target. When the content is larger than the usable
//! extent the offset is pinned to `padding + border`.
//!
//! ```
//! use callout_core::geometry::{Point, Size};
//! use callout_layout::{ArrowDirection, BubbleConfig, BubblePlacer};
//!
//! let placer = BubblePlacer::new(BubbleConfig::default());
//! let placement = placer.place(
//!     Point::new(500, 10),
//!     Size::new(100, 50),
//!     None,
//!     Size::new(1000, 800),
//! );
//! assert_eq!(placement.arrow, ArrowDirection::Up);
//! assert_eq!(placement.origin().y, 10 + 33);
//! ```

use std::fmt;
use std::str::FromStr;

use callout_core::dimension::{DimensionError, coerce_dimension, parse_dimension};
use callout_core::geometry::{Point, Rect, Sides, Size, saturate};

/// Viewport dimensions in pixels, read by the caller at placement time.
pub type Viewport = Size;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Layout constants of the bubble chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BubbleConfig {
    /// Thickness of the border graphic on every side of the content box.
    pub border: u32,
    /// Distance from the arrow tip to the content edge it attaches to.
    pub arrow_target_offset: u32,
    /// Arrow graphic size along the direction it points.
    pub arrow_length: u32,
    /// Arrow graphic size perpendicular to the direction it points.
    pub arrow_width: u32,
    /// Extra clearance kept between the frame and the viewport edges.
    pub padding: u32,
}

impl BubbleConfig {
    /// Default border thickness.
    pub const DEFAULT_BORDER: u32 = 50;
    /// Default arrow tip to content distance.
    pub const DEFAULT_ARROW_TARGET_OFFSET: u32 = 33;
    /// Default arrow length.
    pub const DEFAULT_ARROW_LENGTH: u32 = 100;
    /// Default arrow width.
    pub const DEFAULT_ARROW_WIDTH: u32 = 49;
    /// Default viewport padding.
    pub const DEFAULT_PADDING: u32 = 20;

    /// Configuration with the stock bubble theme constants.
    pub const fn new() -> Self {
        Self {
            border: Self::DEFAULT_BORDER,
            arrow_target_offset: Self::DEFAULT_ARROW_TARGET_OFFSET,
            arrow_length: Self::DEFAULT_ARROW_LENGTH,
            arrow_width: Self::DEFAULT_ARROW_WIDTH,
            padding: Self::DEFAULT_PADDING,
        }
    }

    /// Set the border thickness.
    #[must_use]
    pub const fn border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    /// Set the arrow tip to content distance.
    #[must_use]
    pub const fn arrow_target_offset(mut self, offset: u32) -> Self {
        self.arrow_target_offset = offset;
        self
    }

    /// Set the arrow graphic size (length along, width across).
    #[must_use]
    pub const fn arrow_size(mut self, length: u32, width: u32) -> Self {
        self.arrow_length = length;
        self.arrow_width = width;
        self
    }

    /// Set the viewport padding.
    #[must_use]
    pub const fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Half the arrow width, rounded up.
    #[inline]
    pub const fn half_arrow_width(&self) -> u32 {
        self.arrow_width.div_ceil(2)
    }
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Where the bubble sits relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Above the target.
    Top,
    /// Below the target.
    Bottom,
    /// Left of the target.
    Left,
    /// Right of the target.
    Right,
}

impl Side {
    /// Direction the arrow points when the bubble sits on this side.
    pub const fn arrow(self) -> ArrowDirection {
        match self {
            Self::Top => ArrowDirection::Down,
            Self::Bottom => ArrowDirection::Up,
            Self::Left => ArrowDirection::Right,
            Self::Right => ArrowDirection::Left,
        }
    }

    /// Whether the bubble is stacked above or below the target.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`Side`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSideError(pub String);

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown side {:?} (expected top, bottom, left or right)",
            self.0
        )
    }
}

impl std::error::Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

/// Direction the bubble's arrow points (toward the target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowDirection {
    /// Lowercase name, as used for arrow graphic variants.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for ArrowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Request / result
// ---------------------------------------------------------------------------

/// Inputs of a placement apart from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest {
    /// Point the arrow must indicate.
    pub target: Point,
    /// Size of the content box.
    pub content: Size,
    /// Side to force, if any.
    pub preferred: Option<Side>,
}

impl PlacementRequest {
    /// Request with no side preference.
    pub const fn new(target: Point, content: Size) -> Self {
        Self {
            target,
            content,
            preferred: None,
        }
    }

    /// Force a side (builder).
    #[must_use]
    pub const fn prefer(mut self, side: Side) -> Self {
        self.preferred = Some(side);
        self
    }

    /// Build a request from loosely typed input.
    ///
    /// Coordinates are truncated; sizes go through
    /// [`parse_dimension`](callout_core::dimension::parse_dimension).
    pub fn parse(x: f64, y: f64, width: &str, height: &str) -> Result<Self, DimensionError> {
        let target = Point::from_f64(x, y).ok_or(DimensionError::NotFinite)?;
        let content = Size::new(parse_dimension(width)?, parse_dimension(height)?);
        Ok(Self::new(target, content))
    }

    /// Build a request from floating point input.
    pub fn from_f64(x: f64, y: f64, width: f64, height: f64) -> Result<Self, DimensionError> {
        let target = Point::from_f64(x, y).ok_or(DimensionError::NotFinite)?;
        let content = Size::new(coerce_dimension(width)?, coerce_dimension(height)?);
        Ok(Self::new(target, content))
    }
}

/// Outcome of a placement. Pure data; recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// The content box.
    pub content: Rect,
    /// The outer frame: content box plus the border on every side.
    pub frame: Rect,
    /// Where the bubble sits relative to the target.
    pub side: Side,
    /// Direction the arrow points.
    pub arrow: ArrowDirection,
    /// Arrow position along the edge it exits from, relative to the content
    /// origin (x for vertical placements, y for horizontal ones).
    pub arrow_offset: i32,
}

impl Placement {
    /// Top-left corner of the content box.
    pub const fn origin(&self) -> Point {
        self.content.origin()
    }

    /// The outer frame rectangle (content plus border).
    pub const fn outer_frame(&self) -> Rect {
        self.frame
    }
}

// ---------------------------------------------------------------------------
// Placer
// ---------------------------------------------------------------------------

/// Computes bubble placements for a fixed chrome configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BubblePlacer {
    config: BubbleConfig,
}

impl BubblePlacer {
    /// Create a placer for `config`.
    pub const fn new(config: BubbleConfig) -> Self {
        Self { config }
    }

    /// The chrome configuration.
    pub const fn config(&self) -> &BubbleConfig {
        &self.config
    }

    /// Place a bubble described by `request`.
    pub fn place_request(&self, request: &PlacementRequest, viewport: Viewport) -> Placement {
        self.place(request.target, request.content, request.preferred, viewport)
    }

    /// Place a bubble with a `content` box so that its arrow indicates `target`.
    ///
    /// Never fails; see the module docs for the decision order.
    pub fn place(
        &self,
        target: Point,
        content: Size,
        preferred: Option<Side>,
        viewport: Viewport,
    ) -> Placement {
        let cfg = &self.config;
        let (tx, ty) = (i64::from(target.x), i64::from(target.y));
        let (cw, ch) = (i64::from(content.width), i64::from(content.height));
        let (vw, vh) = (i64::from(viewport.width), i64::from(viewport.height));
        let offset = i64::from(cfg.arrow_target_offset);
        let half_arrow = i64::from(cfg.half_arrow_width());
        let edge = i64::from(cfg.padding) + i64::from(cfg.border);

        if tx - half_arrow - edge > 0 && tx + half_arrow + edge < vw {
            let left = slide_into_view(tx - round_half(cw), tx, vw, cw, edge);

            let above = match preferred {
                Some(side) => side == Side::Top,
                None => ty - offset - ch - edge > 0,
            };
            if above {
                return self.finish(Side::Top, left, ty - offset - ch, tx - half_arrow - left, content);
            }

            let below = match preferred {
                Some(side) => side == Side::Bottom,
                None => ty + offset + ch + edge < vh,
            };
            if below {
                return self.finish(Side::Bottom, left, ty + offset, tx - half_arrow - left, content);
            }
        }

        let top = slide_into_view(ty - round_half(ch), ty, vh, ch, edge);

        let left_of_target = match preferred {
            Some(side) => side == Side::Left,
            None => tx - offset - cw - edge > 0,
        };
        if left_of_target {
            self.finish(Side::Left, tx - offset - cw, top, ty - half_arrow - top, content)
        } else {
            self.finish(Side::Right, tx + offset, top, ty - half_arrow - top, content)
        }
    }

    fn finish(&self, side: Side, x: i64, y: i64, arrow_offset: i64, content: Size) -> Placement {
        let content = Rect::new(saturate(x), saturate(y), content.width, content.height);
        let placement = Placement {
            content,
            frame: content.outer(Sides::all(self.config.border)),
            side,
            arrow: side.arrow(),
            arrow_offset: saturate(arrow_offset),
        };
        callout_core::trace!(
            side = side.as_str(),
            x = content.x,
            y = content.y,
            arrow_offset = placement.arrow_offset,
            "bubble placed"
        );
        placement
    }
}

/// `Math.round(size / 2)` for non-negative sizes.
#[inline]
fn round_half(size: i64) -> i64 {
    (size + 1) / 2
}

/// Clamp a centered `start` so the box stays inside the viewport on one axis.
///
/// Only the bound on the far side from the target is enforced: a target in
/// the near half can only be pushed away from the near edge, and vice versa.
fn slide_into_view(start: i64, target: i64, extent: i64, size: i64, edge: i64) -> i64 {
    let min = edge;
    let max = extent - edge - size;
    if max < min {
        callout_core::debug!(size, extent, "bubble content exceeds usable viewport; pinning to edge");
        return min;
    }
    if target * 2 < extent {
        start.max(min)
    } else {
        start.min(max)
    }
}
