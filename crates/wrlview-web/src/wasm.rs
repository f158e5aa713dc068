#![forbid(unsafe_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use wrlview_app::{
    Border, Delivery, Diagnostic, DropZone, Gesture, GestureEffects, LogLevel, ModelSink,
    ReadTicket, Viewer, ViewerOptions, delivery_diagnostic,
};
use wrlview_raster::{Frame, Palette};

use crate::bridge::{self, PyodideBridgeSink};
use crate::dnd;
use crate::pointer;
use crate::present;

/// Everything the event closures and the frame loop share.
pub(crate) struct AppState {
    pub options: ViewerOptions,
    pub viewer: Viewer,
    pub zone: DropZone,
    pub canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    frame: Frame,
    rgba: Vec<u8>,
    palette: Palette,
}

pub(crate) type SharedApp = Rc<RefCell<AppState>>;

impl AppState {
    /// Step the viewer and present one frame.
    fn tick(&mut self) -> Result<(), JsValue> {
        self.viewer.step();
        self.viewer.render(&mut self.frame);
        present::present(&self.frame, &self.palette, &mut self.rgba, &self.ctx)
    }

    /// Mirror one gesture's effects onto the canvas.
    ///
    /// Default-action suppression happens at the event site (it needs the
    /// event object); the border write happens here, overwriting whatever
    /// style was set before.
    pub fn apply_gesture(&mut self, gesture: Gesture) {
        let GestureEffects { border, .. } = self.zone.gesture(gesture);
        let style = match border {
            Border::Highlight => self.options.highlight_border.as_str(),
            Border::Idle => self.options.idle_border.as_str(),
        };
        if let Err(err) = self.canvas.style().set_property("border", style) {
            web_sys::console::error_2(&"border style write failed:".into(), &err);
        }
    }

    /// Deliver a completed read to the configured sink.
    pub fn complete_read(&mut self, ticket: ReadTicket, text: String) {
        let delivery = if self.options.bridge {
            let mut sink = PyodideBridgeSink::lookup();
            self.zone
                .reads
                .complete(ticket, text, sink.as_mut().map(|s| s as &mut dyn ModelSink))
        } else {
            self.zone.reads.complete(ticket, text, Some(&mut self.viewer))
        };

        if delivery == Delivery::SinkMissing && self.options.bridge {
            web_sys::console::error_1(&bridge::BRIDGE_MISSING_LOG.into());
        } else if let Some(diagnostic) = delivery_diagnostic(delivery) {
            emit(diagnostic);
        }
    }
}

/// Print one diagnostic at its severity, console-only.
pub(crate) fn emit(diagnostic: Diagnostic) {
    let message = JsValue::from_str(diagnostic.message);
    match diagnostic.level {
        LogLevel::Info => web_sys::console::log_1(&message),
        LogLevel::Error => web_sys::console::error_1(&message),
    }
}

/// Web/WASM viewer surface.
///
/// Lifecycle: `new()` then `init(canvas, options)` (or `init_first_canvas`),
/// then the viewer runs itself from `requestAnimationFrame` until
/// `destroy()`.
#[wasm_bindgen]
pub struct WrlViewerWeb {
    app: Option<SharedApp>,
    listeners: Vec<dnd::Listener>,
    frame_loop: Option<FrameLoop>,
}

#[wasm_bindgen]
impl WrlViewerWeb {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            app: None,
            listeners: Vec::new(),
            frame_loop: None,
        }
    }

    /// Attach to the first `<canvas>` in the document.
    ///
    /// Fails fast when the document has no canvas; nothing is registered in
    /// that case.
    #[wasm_bindgen(js_name = initFirstCanvas)]
    pub fn init_first_canvas(&mut self, options: Option<String>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .query_selector("canvas")?
            .ok_or_else(|| JsValue::from_str("no <canvas> element in document"))?
            .dyn_into::<HtmlCanvasElement>()?;
        self.init(canvas, options)
    }

    /// Attach the viewer to an existing `<canvas>`.
    ///
    /// `options` is a JSON object string; `None` means all defaults. Sizes
    /// the canvas backing store, registers the drag-and-drop and pointer
    /// handlers on the window/canvas, and starts the frame loop.
    pub fn init(
        &mut self,
        canvas: HtmlCanvasElement,
        options: Option<String>,
    ) -> Result<(), JsValue> {
        let options = match options {
            Some(json) => ViewerOptions::from_json(&json)
                .map_err(|err| JsValue::from_str(&format!("invalid options: {err}")))?,
            None => ViewerOptions::default(),
        };
        if options.width == 0 || options.height == 0 {
            return Err(JsValue::from_str("viewer size must be non-zero"));
        }

        canvas.set_width(u32::from(options.width));
        canvas.set_height(u32::from(options.height));
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let frame = Frame::new(options.width, options.height);
        let app: SharedApp = Rc::new(RefCell::new(AppState {
            options,
            viewer: Viewer::new(),
            zone: DropZone::new(),
            canvas,
            ctx,
            frame,
            rgba: Vec::new(),
            palette: Palette::DEFAULT,
        }));

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        self.listeners = dnd::install(&window, &app)?;
        self.listeners.extend(pointer::install(&app)?);
        self.frame_loop = Some(FrameLoop::start(Rc::clone(&app))?);
        self.app = Some(app);
        Ok(())
    }

    /// Whether `init` has completed.
    #[wasm_bindgen(js_name = isAttached)]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.app.is_some()
    }

    /// Explicit teardown for JS callers. Unregisters every listener, stops
    /// the frame loop, and releases the canvas.
    pub fn destroy(&mut self) {
        self.frame_loop = None;
        self.listeners.clear();
        self.app = None;
    }
}

impl Default for WrlViewerWeb {
    fn default() -> Self {
        Self::new()
    }
}

/// `requestAnimationFrame` recursion driving [`AppState::tick`].
///
/// Dropping the loop stops rescheduling after the next callback fires.
struct FrameLoop {
    run: Rc<Cell<bool>>,
}

impl FrameLoop {
    fn start(app: SharedApp) -> Result<Self, JsValue> {
        let run = Rc::new(Cell::new(true));
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

        let run_inner = Rc::clone(&run);
        let callback_inner = Rc::clone(&callback);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
            if !run_inner.get() {
                // Stopped: simply stop rescheduling. The closure cell keeps
                // itself alive; one stale callback is the accepted cost of
                // not freeing a closure from inside its own invocation.
                return;
            }
            if let Err(err) = app.borrow_mut().tick() {
                web_sys::console::error_2(&"frame render failed:".into(), &err);
            }
            if let Some(cb) = callback_inner.borrow().as_ref()
                && let Err(err) = request_animation_frame(cb)
            {
                web_sys::console::error_2(&"requestAnimationFrame failed:".into(), &err);
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(cb) = callback.borrow().as_ref() {
            request_animation_frame(cb)?;
        }
        Ok(Self { run })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.run.set(false);
    }
}

fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}
