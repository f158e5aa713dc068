#![forbid(unsafe_code)]

//! Window drag-and-drop wiring.
//!
//! Registers `dragover` / `dragleave` / `drop` on the window, mirrors the
//! pure layer's effect descriptions onto the DOM, and runs the asynchronous
//! file reads. Only the first dropped item is consulted; reads are never
//! tracked beyond their at-most-once ticket, so overlapping drops finish in
//! completion order.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DataTransferItem, DragEvent, EventTarget, Window};

use wrlview_app::{Disposition, DropItem, Gesture, classify, disposition_diagnostic};

use crate::wasm::{SharedApp, emit};

/// A registered DOM event listener; unregisters itself on drop.
pub(crate) struct Listener {
    target: EventTarget,
    name: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub(crate) fn add(
        target: &EventTarget,
        name: &'static str,
        handler: Box<dyn FnMut(web_sys::Event)>,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(handler);
        target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            name,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.name, self.closure.as_ref().unchecked_ref());
    }
}

/// Register the three drag gestures on the window.
pub(crate) fn install(window: &Window, app: &SharedApp) -> Result<Vec<Listener>, JsValue> {
    let target: &EventTarget = window.as_ref();
    let mut listeners = Vec::with_capacity(3);

    for (name, gesture) in [
        ("dragover", Gesture::DragOver),
        ("dragleave", Gesture::DragLeave),
    ] {
        let app = Rc::clone(app);
        listeners.push(Listener::add(
            target,
            name,
            Box::new(move |event: web_sys::Event| {
                event.prevent_default();
                app.borrow_mut().apply_gesture(gesture);
            }),
        )?);
    }

    let drop_app = Rc::clone(app);
    listeners.push(Listener::add(
        target,
        "drop",
        Box::new(move |event: web_sys::Event| {
            event.prevent_default();
            drop_app.borrow_mut().apply_gesture(Gesture::Drop);
            if let Some(event) = event.dyn_ref::<DragEvent>() {
                handle_drop(&drop_app, event);
            }
        }),
    )?);

    Ok(listeners)
}

/// Inspect the dropped items and start a read for an accepted file.
fn handle_drop(app: &SharedApp, event: &DragEvent) {
    let Some(transfer) = event.data_transfer() else {
        return;
    };
    let items = transfer.items();

    let item = items.get(0);
    let file = match first_item(item.as_ref()) {
        FirstItem::Ignore => {
            // Nothing useful to do; stay silent (no diagnostic).
            return;
        }
        FirstItem::File(file) => file,
    };

    let name = file.name();
    let disposition = classify(&DropItem::File { name: &name });
    if let Some(diagnostic) = disposition_diagnostic(disposition) {
        emit(diagnostic);
    }
    if disposition != Disposition::Accept {
        return;
    }

    let ticket = app.borrow_mut().zone.reads.begin();
    let app = Rc::clone(app);
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(file.text()).await {
            Ok(value) => {
                let text = value.as_string().unwrap_or_default();
                app.borrow_mut().complete_read(ticket, text);
            }
            Err(err) => {
                app.borrow_mut().zone.reads.abandon(ticket);
                web_sys::console::error_2(&"file read failed:".into(), &err);
            }
        }
    });
}

enum FirstItem {
    Ignore,
    File(web_sys::File),
}

fn first_item(item: Option<&DataTransferItem>) -> FirstItem {
    let Some(item) = item else {
        return FirstItem::Ignore;
    };
    if item.kind() != "file" {
        return FirstItem::Ignore;
    }
    match item.get_as_file() {
        Ok(Some(file)) => FirstItem::File(file),
        // A "file" item with no File behind it; nothing to read.
        Ok(None) | Err(_) => FirstItem::Ignore,
    }
}
