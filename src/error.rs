//! Host interaction errors.
//!
//! The physics itself never fails; only talking to the page can.

use std::fmt;

/// Errors raised while reading from or scheduling on the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    /// No global `window` (not running in a browser).
    NoWindow,
    /// The window has no document.
    NoDocument,
    /// A required element was not found.
    MissingElement(String),
    /// The frame scheduler refused to schedule a callback.
    Scheduler(String),
    /// Reading or writing an inline style failed.
    Style(String),
    /// A frame was requested before the frame callback was installed.
    CallbackMissing,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::NoWindow => write!(f, "no global window"),
            HostError::NoDocument => write!(f, "window has no document"),
            HostError::MissingElement(selector) => write!(f, "element not found: {}", selector),
            HostError::Scheduler(msg) => write!(f, "could not schedule frame: {}", msg),
            HostError::Style(msg) => write!(f, "style update failed: {}", msg),
            HostError::CallbackMissing => write!(f, "frame callback not installed"),
        }
    }
}

impl std::error::Error for HostError {}
