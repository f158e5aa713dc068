#![forbid(unsafe_code)]

//! Host-global bridge sink.
//!
//! In bridge mode the viewer does not consume drops itself; decoded text is
//! handed to a Python-in-browser runtime instead. The handoff contract:
//! a global `pyodide` object whose `globals` mapping exposes a callable
//! named `load_wrl_data` taking the text as its sole argument. Existence is
//! checked per delivery; registration order between the page and the
//! runtime therefore does not matter.

use js_sys::{Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use wrlview_app::ModelSink;

/// Name of the Python function that receives dropped model text.
const TARGET_FN: &str = "load_wrl_data";

/// Error printed when the runtime or the target function is absent.
pub(crate) const BRIDGE_MISSING_LOG: &str = "Pyodide or 'load_wrl_data' function not found.";

/// A resolved `load_wrl_data` callable.
pub(crate) struct PyodideBridgeSink {
    callable: Function,
}

impl PyodideBridgeSink {
    /// Resolve the target callable, or `None` when any link of the chain
    /// (window, `pyodide`, `globals`, the function itself) is missing.
    pub(crate) fn lookup() -> Option<Self> {
        let window = web_sys::window()?;
        let pyodide = Reflect::get(window.as_ref(), &JsValue::from_str("pyodide")).ok()?;
        if pyodide.is_undefined() || pyodide.is_null() {
            return None;
        }

        let globals = Reflect::get(&pyodide, &JsValue::from_str("globals")).ok()?;
        let has = Reflect::get(&globals, &JsValue::from_str("has"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        let present = has
            .call1(&globals, &JsValue::from_str(TARGET_FN))
            .ok()?
            .as_bool()
            .unwrap_or(false);
        if !present {
            return None;
        }

        let get = Reflect::get(&globals, &JsValue::from_str("get"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        let callable = get
            .call1(&globals, &JsValue::from_str(TARGET_FN))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some(Self { callable })
    }
}

impl ModelSink for PyodideBridgeSink {
    fn deliver(&mut self, text: String) {
        if let Err(err) = self.callable.call1(&JsValue::NULL, &JsValue::from_str(&text)) {
            web_sys::console::error_2(&format!("{TARGET_FN} raised:").into(), &err);
        }
    }
}
