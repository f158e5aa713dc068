#![forbid(unsafe_code)]

//! Deterministic, JSON-friendly pointer input schema.
//!
//! The web host forwards pointer events in canvas pixel coordinates. This
//! module gives them a stable shape with a compact modifier bitset
//! (`mods: u8`) and a JSON encoding suitable for record/replay tests.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier keys held during a pointer event.
    ///
    /// These flags are encoded as a compact `u8` bitset in JSON (`mods`).
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

impl Modifiers {
    #[must_use]
    pub const fn from_bits_truncate_u8(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }
}

/// Phase for pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Up,
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    Other(u8),
}

impl PointerButton {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
            Self::Other(n) => n,
        }
    }

    #[must_use]
    pub const fn from_u8(n: u8) -> Self {
        match n {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            other => Self::Other(other),
        }
    }
}

/// Normalized pointer event in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerInput {
    pub phase: PointerPhase,
    /// `None` for pure movement.
    pub button: Option<PointerButton>,
    pub x: i32,
    pub y: i32,
    pub mods: Modifiers,
}

/// JSON encoding used by the web host and golden traces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointerInputJson {
    pub phase: PointerPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<u8>,
    pub x: i32,
    pub y: i32,
    pub mods: u8,
}

impl PointerInput {
    /// Encode this event as a stable JSON string.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&PointerInputJson::from(self))
    }

    /// Decode a previously encoded event JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        let json: PointerInputJson = serde_json::from_str(s)?;
        Ok(Self::from(json))
    }
}

impl From<&PointerInput> for PointerInputJson {
    fn from(value: &PointerInput) -> Self {
        Self {
            phase: value.phase,
            button: value.button.map(PointerButton::to_u8),
            x: value.x,
            y: value.y,
            mods: value.mods.bits(),
        }
    }
}

impl From<PointerInputJson> for PointerInput {
    fn from(value: PointerInputJson) -> Self {
        Self {
            phase: value.phase,
            button: value.button.map(PointerButton::from_u8),
            x: value.x,
            y: value.y,
            mods: Modifiers::from_bits_truncate_u8(value.mods),
        }
    }
}
