#![forbid(unsafe_code)]

//! OSC 52 clipboard writes and the structured-data copy button.
//!
//! The clipboard only ever writes escape sequences to a caller-provided
//! [`Write`]; it never spawns processes or reads terminal responses.

use std::env;
use std::fmt;
use std::io::Write;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use callout_core::geometry::{Sides, Size};

/// Environment variable forcing the passthrough mode (`tmux`, `screen`, `none`).
pub const ENV_CLIPBOARD_PASSTHROUGH: &str = "CALLOUT_CLIPBOARD_PASSTHROUGH";

/// OSC 52 clipboard selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardSelection {
    /// System clipboard.
    #[default]
    Clipboard,
    /// Primary selection (X11).
    Primary,
    /// Secondary selection (X11).
    Secondary,
    /// Cut buffer 0..=7.
    CutBuffer(u8),
}

impl ClipboardSelection {
    fn osc52_code(self) -> Result<char, ClipboardError> {
        match self {
            Self::Clipboard => Ok('c'),
            Self::Primary => Ok('p'),
            Self::Secondary => Ok('s'),
            Self::CutBuffer(index) if index <= 7 => Ok(char::from(b'0' + index)),
            Self::CutBuffer(index) => Err(ClipboardError::InvalidInput(format!(
                "cut buffer index must be 0..=7 (got {index})",
            ))),
        }
    }
}

/// DCS passthrough wrapping for terminal multiplexers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Passthrough {
    /// Write the sequence as is.
    #[default]
    None,
    /// tmux: `ESC P tmux; <ESC-doubled seq> ESC \`.
    Tmux,
    /// GNU screen: `ESC P <seq> ESC \`.
    Screen,
}

impl Passthrough {
    /// Parse an override value. Unknown values yield `None` (no override).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tmux" => Some(Self::Tmux),
            "screen" => Some(Self::Screen),
            "none" | "off" => Some(Self::None),
            _ => None,
        }
    }

    /// Detect the mode from the environment.
    ///
    /// [`ENV_CLIPBOARD_PASSTHROUGH`] wins; otherwise `TMUX` and `STY` are
    /// checked.
    pub fn from_env() -> Self {
        Self::resolve(
            env::var(ENV_CLIPBOARD_PASSTHROUGH).ok().as_deref(),
            env::var_os("TMUX").is_some(),
            env::var_os("STY").is_some(),
        )
    }

    fn resolve(override_value: Option<&str>, in_tmux: bool, in_screen: bool) -> Self {
        if let Some(mode) = override_value.and_then(Self::parse) {
            return mode;
        }
        if in_tmux {
            Self::Tmux
        } else if in_screen {
            Self::Screen
        } else {
            Self::None
        }
    }
}

/// Clipboard errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    InvalidInput(String),
    PayloadTooLarge { len: usize, max: usize },
    WriteError(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::PayloadTooLarge { len, max } => {
                write!(f, "OSC 52 payload too large ({len} > {max})")
            }
            Self::WriteError(msg) => write!(f, "clipboard write failed: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

fn write_err(e: std::io::Error) -> ClipboardError {
    ClipboardError::WriteError(e.to_string())
}

/// OSC 52 clipboard writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clipboard {
    max_payload: usize,
    passthrough: Passthrough,
}

impl Clipboard {
    /// Common OSC 52 size limit (base64 payload bytes).
    pub const DEFAULT_MAX_OSC52_PAYLOAD: usize = 74_994;

    /// Direct OSC 52 with the default payload limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_payload: Self::DEFAULT_MAX_OSC52_PAYLOAD,
            passthrough: Passthrough::None,
        }
    }

    /// OSC 52 with passthrough detected from the environment.
    #[must_use]
    pub fn auto() -> Self {
        let clipboard = Self::new().with_passthrough(Passthrough::from_env());
        log_detected(clipboard.passthrough);
        clipboard
    }

    /// Set the payload limit (builder). Zero restores the default.
    #[must_use]
    pub const fn with_max_payload(mut self, max_payload: usize) -> Self {
        self.max_payload = if max_payload == 0 {
            Self::DEFAULT_MAX_OSC52_PAYLOAD
        } else {
            max_payload
        };
        self
    }

    /// Set the passthrough mode (builder).
    #[must_use]
    pub const fn with_passthrough(mut self, passthrough: Passthrough) -> Self {
        self.passthrough = passthrough;
        self
    }

    /// Maximum base64 payload size.
    #[must_use]
    pub const fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Passthrough mode in use.
    #[must_use]
    pub const fn passthrough(&self) -> Passthrough {
        self.passthrough
    }

    /// Copy `content` into `selection`.
    pub fn set(
        &self,
        content: &str,
        selection: ClipboardSelection,
        writer: &mut impl Write,
    ) -> Result<(), ClipboardError> {
        let code = selection.osc52_code()?;
        let encoded = STANDARD.encode(content.as_bytes());
        if encoded.len() > self.max_payload {
            return Err(ClipboardError::PayloadTooLarge {
                len: encoded.len(),
                max: self.max_payload,
            });
        }
        let seq = format!("\x1b]52;{code};{encoded}\x07");
        self.write_with_passthrough(writer, seq.as_bytes())?;
        log_write(self.passthrough, content.len());
        Ok(())
    }

    /// Empty `selection`.
    pub fn clear(
        &self,
        selection: ClipboardSelection,
        writer: &mut impl Write,
    ) -> Result<(), ClipboardError> {
        let code = selection.osc52_code()?;
        let seq = format!("\x1b]52;{code};\x07");
        self.write_with_passthrough(writer, seq.as_bytes())
    }

    fn write_with_passthrough(
        &self,
        writer: &mut impl Write,
        seq: &[u8],
    ) -> Result<(), ClipboardError> {
        match self.passthrough {
            Passthrough::None => writer.write_all(seq).map_err(write_err)?,
            Passthrough::Tmux => write_tmux_passthrough(writer, seq)?,
            Passthrough::Screen => write_screen_passthrough(writer, seq)?,
        }
        writer.flush().map_err(write_err)
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

fn write_tmux_passthrough(writer: &mut impl Write, seq: &[u8]) -> Result<(), ClipboardError> {
    let mut wrapped = Vec::with_capacity(seq.len() + 10);
    wrapped.extend_from_slice(b"\x1bPtmux;");
    for &byte in seq {
        if byte == 0x1b {
            wrapped.push(0x1b);
        }
        wrapped.push(byte);
    }
    wrapped.extend_from_slice(b"\x1b\\");
    writer.write_all(&wrapped).map_err(write_err)
}

fn write_screen_passthrough(writer: &mut impl Write, seq: &[u8]) -> Result<(), ClipboardError> {
    writer.write_all(b"\x1bP").map_err(write_err)?;
    writer.write_all(seq).map_err(write_err)?;
    writer.write_all(b"\x1b\\").map_err(write_err)
}

// ---------------------------------------------------------------------------
// Copy button
// ---------------------------------------------------------------------------

/// Mouse button reported with a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

impl MouseButton {
    /// Map a DOM-style button index (0 primary, 1 middle, 2 secondary).
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A button that produces structured data for copying.
///
/// The data is generated lazily, only when the secondary button goes down,
/// so the host can offer it through its context menu.
pub struct CopyButton<F> {
    image: String,
    size: Size,
    create_data: F,
}

impl<F> fmt::Debug for CopyButton<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyButton")
            .field("image", &self.image)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<F: Fn() -> String> CopyButton<F> {
    /// Margin around the button on every side.
    pub const MARGIN: u32 = 2;

    /// Create a button drawn with `image` at `size`.
    pub fn new(image: impl Into<String>, size: Size, create_data: F) -> Self {
        Self {
            image: image.into(),
            size,
            create_data,
        }
    }

    /// Background image reference.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Button size without margin.
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Space taken including the margin.
    pub const fn outer_size(&self) -> Size {
        self.size.expand(Sides::all(Self::MARGIN))
    }

    /// Handle a press: generates the data on the secondary button only.
    pub fn on_mouse_down(&self, button: MouseButton) -> Option<String> {
        (button == MouseButton::Secondary).then(|| (self.create_data)())
    }

    /// Handle a press and copy the generated data to the clipboard.
    ///
    /// Returns the copied data, or `None` for buttons that do not copy.
    pub fn copy_on_mouse_down(
        &self,
        button: MouseButton,
        clipboard: &Clipboard,
        writer: &mut impl Write,
    ) -> Result<Option<String>, ClipboardError> {
        let Some(data) = self.on_mouse_down(button) else {
            return Ok(None);
        };
        clipboard.set(&data, ClipboardSelection::Clipboard, writer)?;
        Ok(Some(data))
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[cfg(feature = "clipboard-logging")]
fn log_detected(passthrough: Passthrough) {
    tracing::info!(passthrough = ?passthrough, "Clipboard passthrough detected");
}

#[cfg(not(feature = "clipboard-logging"))]
fn log_detected(_passthrough: Passthrough) {}

#[cfg(feature = "clipboard-logging")]
fn log_write(passthrough: Passthrough, bytes: usize) {
    tracing::debug!(passthrough = ?passthrough, bytes, "Clipboard write");
}

#[cfg(not(feature = "clipboard-logging"))]
fn log_write(_passthrough: Passthrough, _bytes: usize) {}
