#![forbid(unsafe_code)]

//! Callout layout.
//!
//! - [`BubblePlacer`] - positions a bubble and its arrow relative to a target
//! - [`ContentFit`] - slack and scroll capping between measure and place
//! - [`MessageChrome`] - centered modal message frames
//!
//! Placement is a pure function of its inputs: no globals, no I/O. Callers
//! measure content first (see [`callout_core::measure::Measure`]) and hand
//! the resulting size to [`BubblePlacer::place`].

pub mod bubble;
pub mod content;
pub mod message;

pub use bubble::{
    ArrowDirection, BubbleConfig, BubblePlacer, ParseSideError, Placement, PlacementRequest, Side,
    Viewport,
};
pub use content::{ContentFit, FittedContent};
pub use message::MessageChrome;
