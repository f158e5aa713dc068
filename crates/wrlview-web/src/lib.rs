#![forbid(unsafe_code)]

//! WASM frontend for wrlview.
//!
//! This crate is intentionally host-specific (web/WASM). It provides a
//! `wasm-bindgen` API surface for:
//! - attaching the viewer to a `<canvas>` element,
//! - registering the window drag-and-drop handlers that load `.wrl` files,
//! - capturing pointer input for manual rotation,
//! - driving rendering from `requestAnimationFrame`.
//!
//! All decisions live in `wrlview-app`; this crate only mirrors the effect
//! descriptions it returns onto the DOM and runs the asynchronous file
//! reads.

#[cfg(target_arch = "wasm32")]
mod bridge;
#[cfg(target_arch = "wasm32")]
mod dnd;
#[cfg(target_arch = "wasm32")]
mod pointer;
#[cfg(target_arch = "wasm32")]
mod present;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::WrlViewerWeb;

/// Native builds compile this crate as a stub so `cargo check --workspace`
/// stays green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct WrlViewerWeb;

#[cfg(not(target_arch = "wasm32"))]
impl WrlViewerWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
