#![forbid(unsafe_code)]

//! Host-driven application logic for the wrlview viewer.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (the wasm frontend, or a
//!   test harness) pushes gestures, pointer events, and read completions.
//! - **Effect descriptions, not effects**: DOM side effects (default-action
//!   suppression, border styling, console diagnostics) are returned as plain
//!   values for the host to apply, so every drop-target behavior is testable
//!   natively.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.

pub mod config;
pub mod drop_zone;
pub mod input;
pub mod logging;
pub mod sink;
pub mod viewer;

pub use config::ViewerOptions;
pub use drop_zone::{
    Border, Delivery, Diagnostic, Disposition, DropItem, DropZone, Gesture, GestureEffects,
    LogLevel, PendingReads, ReadTicket, accepts_file_name, classify, delivery_diagnostic,
    disposition_diagnostic,
};
pub use input::{Modifiers, PointerButton, PointerInput, PointerPhase};
pub use sink::{ModelSink, RecordingSink};
pub use viewer::Viewer;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
