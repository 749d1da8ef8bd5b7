#![forbid(unsafe_code)]

//! Popup layers and the two-phase bubble opener.
//!
//! Open popups form a stack. Closing a layer closes everything opened on
//! top of it first, so a bubble spawned from inside another bubble never
//! outlives its parent. Every close callback runs exactly once.

use std::fmt;

use callout_core::geometry::{Point, Size};
use callout_core::measure::Measure;
use callout_layout::{BubbleConfig, BubblePlacer, ContentFit, FittedContent, Placement, Side};

/// Identifier of an open layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    /// Raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

type CloseFn = Box<dyn FnOnce() + Send>;

/// Open popups in stacking order, bottom first.
#[derive(Default)]
pub struct LayerStack {
    layers: Vec<(LayerId, CloseFn)>,
    next_id: u64,
}

impl fmt::Debug for LayerStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerStack")
            .field("layers", &self.ids())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a layer on top. `on_close` runs when the layer is closed.
    pub fn push<F>(&mut self, on_close: F) -> LayerId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push((id, Box::new(on_close)));
        callout_core::trace!(layer = id.0, depth = self.layers.len(), "layer opened");
        id
    }

    /// Close `id` and every layer above it, topmost first.
    ///
    /// Returns the number of layers closed; zero if `id` is not open.
    pub fn pop(&mut self, id: LayerId) -> usize {
        let Some(index) = self.layers.iter().position(|(layer, _)| *layer == id) else {
            return 0;
        };
        self.close_from(index)
    }

    /// Close every layer, topmost first.
    pub fn pop_all(&mut self) -> usize {
        self.close_from(0)
    }

    fn close_from(&mut self, index: usize) -> usize {
        let closing: Vec<_> = self.layers.drain(index..).collect();
        let count = closing.len();
        callout_core::trace!(depth = index, count, "closing layers");
        for (_, on_close) in closing.into_iter().rev() {
            on_close();
        }
        count
    }

    /// Whether `id` is still open.
    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.iter().any(|(layer, _)| *layer == id)
    }

    /// Topmost open layer.
    pub fn top(&self) -> Option<LayerId> {
        self.layers.last().map(|(id, _)| *id)
    }

    /// Open layer ids, bottom first.
    pub fn ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(|(id, _)| *id).collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// An open bubble: where it went and which layer holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    placement: Placement,
    content: FittedContent,
    layer: LayerId,
    closed: bool,
}

impl Bubble {
    pub const fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Fitted content size and scroll state.
    pub const fn content(&self) -> &FittedContent {
        &self.content
    }

    pub const fn layer(&self) -> LayerId {
        self.layer
    }

    /// Whether this handle has closed its layer, or the layer is gone.
    pub fn is_closed(&self, stack: &LayerStack) -> bool {
        self.closed || !stack.contains(self.layer)
    }

    /// Close the bubble's layer (and anything above it). Idempotent.
    ///
    /// Returns `true` only on the call that actually closed the layer.
    pub fn close(&mut self, stack: &mut LayerStack) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        stack.pop(self.layer) > 0
    }
}

/// Everything [`open_bubble`] needs besides the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleRequest {
    pub target: Point,
    pub viewport: Size,
    pub preferred: Option<Side>,
    /// Width the content is laid out at (`None` or zero: the fit default).
    pub content_width: Option<u32>,
    /// Height above which the content scrolls (zero or `None`: never).
    pub max_height: Option<u32>,
    pub config: BubbleConfig,
    pub fit: ContentFit,
}

impl BubbleRequest {
    /// Request with default chrome and fit rules.
    pub const fn new(target: Point, viewport: Size) -> Self {
        Self {
            target,
            viewport,
            preferred: None,
            content_width: None,
            max_height: None,
            config: BubbleConfig::new(),
            fit: ContentFit::new(),
        }
    }

    #[must_use]
    pub const fn prefer(mut self, side: Side) -> Self {
        self.preferred = Some(side);
        self
    }

    #[must_use]
    pub const fn content_width(mut self, width: u32) -> Self {
        self.content_width = Some(width);
        self
    }

    #[must_use]
    pub const fn max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }

    #[must_use]
    pub const fn config(mut self, config: BubbleConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn fit(mut self, fit: ContentFit) -> Self {
        self.fit = fit;
        self
    }
}

/// Measure `content` at the request's content width, fit it, place the bubble and open a layer for it.
pub fn open_bubble<M, C>(
    measurer: &mut M,
    content: &C,
    request: &BubbleRequest,
    stack: &mut LayerStack,
) -> Bubble
where
    M: Measure<C> + ?Sized,
    C: ?Sized,
{
    open_bubble_with(measurer, content, request, stack, || {})
}

/// [`open_bubble`] with a callback run when the bubble's layer closes.
pub fn open_bubble_with<M, C, F>(
    measurer: &mut M,
    content: &C,
    request: &BubbleRequest,
    stack: &mut LayerStack,
    on_close: F,
) -> Bubble
where
    M: Measure<C> + ?Sized,
    C: ?Sized,
    F: FnOnce() + Send + 'static,
{
    let width = request.fit.wrap_width(request.content_width);
    let measured = measurer.measure_within(content, width);
    let fitted = request.fit.fit(measured, request.max_height);
    let placement = BubblePlacer::new(request.config).place(
        request.target,
        fitted.size,
        request.preferred,
        request.viewport,
    );
    let layer = stack.push(on_close);
    callout_core::debug!(
        layer = layer.0,
        side = placement.side.as_str(),
        width = fitted.size.width,
        height = fitted.size.height,
        scrolls = fitted.scrolls(),
        "bubble opened"
    );
    Bubble {
        placement,
        content: fitted,
        layer,
        closed: false,
    }
}
