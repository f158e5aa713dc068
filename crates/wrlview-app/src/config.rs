#![forbid(unsafe_code)]

//! Frontend configuration.
//!
//! Options arrive from the embedding page as a JSON object; every field is
//! optional and defaulted, so `{}` (or no options at all) is a valid
//! configuration.

use serde::Deserialize;

fn default_width() -> u16 {
    320
}

fn default_height() -> u16 {
    240
}

fn default_highlight_border() -> String {
    "2px dashed #00ff00".to_string()
}

/// Options accepted at frontend initialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerOptions {
    /// Framebuffer (and canvas) width in pixels.
    pub width: u16,
    /// Framebuffer (and canvas) height in pixels.
    pub height: u16,
    /// Deliver dropped text to the host-global bridge function instead of
    /// the built-in viewer.
    pub bridge: bool,
    /// CSS border applied while a drag hovers the window.
    pub highlight_border: String,
    /// CSS border applied when no drag is in progress. The empty string
    /// restores the stylesheet default.
    pub idle_border: String,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            bridge: false,
            highlight_border: default_highlight_border(),
            idle_border: String::new(),
        }
    }
}

impl ViewerOptions {
    /// Parse options from a JSON object string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
