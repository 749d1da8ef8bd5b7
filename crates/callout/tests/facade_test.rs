//! End-to-end flows through the facade.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use callout::prelude::*;
use callout::{Error, FaultPolicy, MessageChrome, PlacementRequest, RunOutcome, open_bubble_with};

fn placed_from_loose_input(x: f64, y: f64, w: &str, h: &str, side: &str) -> Result<Placement> {
    let request = PlacementRequest::parse(x, y, w, h)?.prefer(side.parse()?);
    Ok(BubblePlacer::default().place_request(&request, Size::new(1000, 800)))
}

#[test]
fn loose_input_is_validated() {
    let placement = placed_from_loose_input(500.0, 400.0, "100px", "50", "left").unwrap();
    assert_eq!(placement.side, Side::Left);

    assert!(matches!(
        placed_from_loose_input(500.0, 400.0, "auto", "50", "left"),
        Err(Error::Dimension(_))
    ));
    assert!(matches!(
        placed_from_loose_input(500.0, 400.0, "10", "50", "center"),
        Err(Error::Side(_))
    ));
}

#[test]
fn text_bubble_over_message_frame() {
    let mut stack = LayerStack::new();
    let mut measurer = TextMeasurer::new(FontMetrics::new(8.0, 16)).wrap_width(160);
    let request = BubbleRequest::new(Point::new(40, 400), Size::new(1000, 800));

    let closed = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&closed);
    let mut bubble = open_bubble_with(
        &mut measurer,
        "a callout near the left edge of the page",
        &request,
        &mut stack,
        move || {
            seen.fetch_add(1, Ordering::SeqCst);
        },
    );

    // No horizontal clearance for a vertical bubble at x = 40.
    assert_eq!(bubble.placement().side, Side::Right);
    assert!(bubble.content().size.width <= 160 + 10);

    let frame = MessageChrome::plain().frame(bubble.content().size, Size::new(1000, 800));
    assert!(frame.x >= 0 && frame.y >= 0);

    bubble.close(&mut stack);
    bubble.close(&mut stack);
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn aborted_animation_converts_to_facade_error() {
    fn animate() -> Result<RunOutcome> {
        let outcome = Stepper::new(
            |_, _| Err("surface gone".into()),
            0.0,
            1.0,
            Duration::from_millis(100),
        )
        .fault_policy(FaultPolicy::Abort)
        .run(&mut ManualTicker::new())?;
        Ok(outcome)
    }

    let err = animate().unwrap_err();
    assert!(matches!(err, Error::Animation(_)));
    assert!(err.to_string().contains("surface gone"));
    assert!(std::error::Error::source(&err).is_some());
}

#[cfg(feature = "extras")]
#[test]
fn copy_button_through_facade() -> Result<()> {
    use callout::{CopyButton, MouseButton};

    let button = CopyButton::new("copy.png", Size::new(16, 16), || "id,name\n1,x".to_string());
    let mut out = Vec::new();
    let copied = button.copy_on_mouse_down(MouseButton::Secondary, &Clipboard::new(), &mut out)?;
    assert_eq!(copied.as_deref(), Some("id,name\n1,x"));
    assert!(out.ends_with(b"\x07"));
    Ok(())
}

#[cfg(feature = "extras")]
#[test]
fn clipboard_error_converts() {
    let result: Result<()> = Clipboard::new()
        .set("x", ClipboardSelection::CutBuffer(9), &mut Vec::new())
        .map_err(Error::from);
    assert!(matches!(result, Err(Error::Clipboard(_))));
}
