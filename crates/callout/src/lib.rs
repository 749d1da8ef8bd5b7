#![forbid(unsafe_code)]

//! Callout public facade crate.
//!
//! Re-exports the pieces needed to show callout bubbles: placement, text
//! measurement, eased animation, popup layers and (with the default
//! `extras` feature) the OSC 52 clipboard.
//!
//! ```
//! use callout::prelude::*;
//!
//! let mut stack = LayerStack::new();
//! let mut measurer = TextMeasurer::new(FontMetrics::new(8.0, 16)).wrap_width(240);
//! let request = BubbleRequest::new(Point::new(500, 10), Size::new(1000, 800));
//!
//! let mut bubble = open_bubble(&mut measurer, "Saved to drafts", &request, &mut stack);
//! assert_eq!(bubble.placement().arrow, ArrowDirection::Up);
//! assert!(bubble.close(&mut stack));
//! ```

use std::fmt;

pub mod layers;

// --- Core re-exports -------------------------------------------------------

pub use callout_core::animation::{
    AnimationError, AnimationHandle, FaultPolicy, ManualTicker, RunOutcome, StepOutcome, Stepper,
    StopSignal, ThreadTicker, TickError, Ticker, Tween, ease_in_out_cosine, spawn,
};
pub use callout_core::dimension::{DimensionError, coerce_dimension, parse_dimension};
pub use callout_core::geometry::{Point, Rect, Sides, Size};
pub use callout_core::measure::{FixedSize, Measure};

#[cfg(feature = "tracing-json")]
pub use callout_core::logging::init_json;

// --- Layout re-exports -----------------------------------------------------

pub use callout_layout::{
    ArrowDirection, BubbleConfig, BubblePlacer, ContentFit, FittedContent, MessageChrome,
    ParseSideError, Placement, PlacementRequest, Side, Viewport,
};

// --- Text re-exports -------------------------------------------------------

pub use callout_text::{FontMetrics, TextMeasurer, WidthCache};

// --- Extras re-exports -----------------------------------------------------

#[cfg(feature = "extras")]
pub use callout_extras::clipboard::{
    Clipboard, ClipboardError, ClipboardSelection, CopyButton, MouseButton, Passthrough,
};

pub use layers::{Bubble, BubbleRequest, LayerId, LayerStack, open_bubble, open_bubble_with};

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while writing to the terminal or host.
    Io(std::io::Error),
    /// Loosely typed size or coordinate input was rejected.
    Dimension(DimensionError),
    /// A side name did not parse.
    Side(ParseSideError),
    /// An animation stopped on a tick error.
    Animation(AnimationError),
    /// Clipboard write failed.
    #[cfg(feature = "extras")]
    Clipboard(ClipboardError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Dimension(err) => write!(f, "{err}"),
            Self::Side(err) => write!(f, "{err}"),
            Self::Animation(err) => write!(f, "{err}"),
            #[cfg(feature = "extras")]
            Self::Clipboard(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Dimension(err) => Some(err),
            Self::Side(err) => Some(err),
            Self::Animation(err) => Some(err),
            #[cfg(feature = "extras")]
            Self::Clipboard(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<DimensionError> for Error {
    fn from(err: DimensionError) -> Self {
        Self::Dimension(err)
    }
}

impl From<ParseSideError> for Error {
    fn from(err: ParseSideError) -> Self {
        Self::Side(err)
    }
}

impl From<AnimationError> for Error {
    fn from(err: AnimationError) -> Self {
        Self::Animation(err)
    }
}

#[cfg(feature = "extras")]
impl From<ClipboardError> for Error {
    fn from(err: ClipboardError) -> Self {
        Self::Clipboard(err)
    }
}

/// Standard result type for callout APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ArrowDirection, Bubble, BubbleConfig, BubblePlacer, BubbleRequest, ContentFit, Error,
        FontMetrics, LayerStack, ManualTicker, Measure, Placement, Point, Rect, Result, Side,
        Size, Stepper, TextMeasurer, open_bubble,
    };

    #[cfg(feature = "extras")]
    pub use crate::{Clipboard, ClipboardSelection};

    pub use crate::{core, layout, text};
}

pub use callout_core as core;
pub use callout_layout as layout;
pub use callout_text as text;

#[cfg(feature = "extras")]
pub use callout_extras as extras;
