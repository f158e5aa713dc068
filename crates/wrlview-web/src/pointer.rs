#![forbid(unsafe_code)]

//! Canvas pointer capture for manual rotation.
//!
//! Mouse events are normalized into the app's pointer schema and forwarded
//! to the viewer. `contextmenu` is suppressed so the right button is usable
//! as the rotation-mode toggle.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, MouseEvent};

use wrlview_app::{Modifiers, PointerButton, PointerInput, PointerPhase};

use crate::dnd::Listener;
use crate::wasm::SharedApp;

/// Register the pointer handlers on the canvas.
pub(crate) fn install(app: &SharedApp) -> Result<Vec<Listener>, JsValue> {
    let canvas = app.borrow().canvas.clone();
    let target: &EventTarget = canvas.as_ref();
    let mut listeners = Vec::with_capacity(4);

    for (name, phase) in [
        ("mousedown", PointerPhase::Down),
        ("mouseup", PointerPhase::Up),
        ("mousemove", PointerPhase::Move),
    ] {
        let app = Rc::clone(app);
        listeners.push(Listener::add(
            target,
            name,
            Box::new(move |event: web_sys::Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let input = normalize(event, phase);
                    app.borrow_mut().viewer.pointer(&input);
                }
            }),
        )?);
    }

    listeners.push(Listener::add(
        target,
        "contextmenu",
        Box::new(move |event: web_sys::Event| {
            event.prevent_default();
        }),
    )?);

    Ok(listeners)
}

fn normalize(event: &MouseEvent, phase: PointerPhase) -> PointerInput {
    let button = match phase {
        PointerPhase::Move => None,
        PointerPhase::Down | PointerPhase::Up => {
            Some(PointerButton::from_u8(event.button().max(0) as u8))
        }
    };

    let mut mods = Modifiers::empty();
    mods.set(Modifiers::SHIFT, event.shift_key());
    mods.set(Modifiers::ALT, event.alt_key());
    mods.set(Modifiers::CTRL, event.ctrl_key());
    mods.set(Modifiers::SUPER, event.meta_key());

    PointerInput {
        phase,
        button,
        x: event.offset_x(),
        y: event.offset_y(),
        mods,
    }
}
