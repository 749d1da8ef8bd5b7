#![forbid(unsafe_code)]

//! Feature-gated extras for callout bubbles.
//!
//! - `clipboard` (default): OSC 52 [`Clipboard`](clipboard::Clipboard) and
//!   the structured-data [`CopyButton`](clipboard::CopyButton)
//! - `clipboard-logging`: `tracing` events for clipboard writes

#[cfg(feature = "clipboard")]
pub mod clipboard;
