//! End-to-end drop-target properties, driven the way the web host drives the
//! pure layer: gesture, classify, begin read, complete read, apply the
//! returned effect descriptions.

use pretty_assertions::assert_eq;

use wrlview_app::{
    Border, Delivery, Disposition, DropItem, DropZone, Gesture, LogLevel, RecordingSink, Viewer,
    classify, delivery_diagnostic, disposition_diagnostic,
};

/// Drives one full drop of a named file with the given text content,
/// collecting the diagnostics a host would print.
fn drive_drop(
    zone: &mut DropZone,
    sink: Option<&mut RecordingSink>,
    name: &str,
    content: &str,
) -> Vec<(LogLevel, &'static str)> {
    let mut logs = Vec::new();

    let effects = zone.gesture(Gesture::Drop);
    assert!(effects.suppress_default);
    assert_eq!(effects.border, Border::Idle);

    let disposition = classify(&DropItem::File { name });
    if let Some(diagnostic) = disposition_diagnostic(disposition) {
        logs.push((diagnostic.level, diagnostic.message));
    }
    if disposition != Disposition::Accept {
        return logs;
    }

    let ticket = zone.reads.begin();
    let delivery = zone.reads.complete(
        ticket,
        content.to_string(),
        sink.map(|s| s as &mut dyn wrlview_app::ModelSink),
    );
    if let Some(diagnostic) = delivery_diagnostic(delivery) {
        logs.push((diagnostic.level, diagnostic.message));
    }
    logs
}

#[test]
fn mixed_case_wrl_file_reaches_the_sink() {
    let mut zone = DropZone::new();
    let mut sink = RecordingSink::new();
    let logs = drive_drop(&mut zone, Some(&mut sink), "Model.WRL", "torus text");
    assert!(logs.is_empty());
    assert_eq!(sink.delivered, vec!["torus text"]);
}

#[test]
fn txt_file_never_reaches_the_sink_and_logs_once() {
    let mut zone = DropZone::new();
    let mut sink = RecordingSink::new();
    let logs = drive_drop(&mut zone, Some(&mut sink), "model.txt", "not a model");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].0, LogLevel::Info);
    assert!(sink.delivered.is_empty());
}

#[test]
fn absent_sink_logs_one_error_and_nothing_else() {
    let mut zone = DropZone::new();
    let logs = drive_drop(&mut zone, None, "model.wrl", "content");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].0, LogLevel::Error);
}

#[test]
fn hover_cycles_leave_the_border_as_it_started() {
    let mut zone = DropZone::new();
    let initial = zone.border();
    for _ in 0..7 {
        zone.gesture(Gesture::DragOver);
        zone.gesture(Gesture::DragLeave);
    }
    assert_eq!(zone.border(), initial);
}

#[test]
fn overlapping_drops_deliver_both_texts_in_completion_order() {
    let mut zone = DropZone::new();
    let mut sink = RecordingSink::new();

    // Two drops in quick succession: both reads are in flight at once.
    zone.gesture(Gesture::Drop);
    assert_eq!(classify(&DropItem::File { name: "a.wrl" }), Disposition::Accept);
    let first = zone.reads.begin();

    zone.gesture(Gesture::Drop);
    assert_eq!(classify(&DropItem::File { name: "b.wrl" }), Disposition::Accept);
    let second = zone.reads.begin();

    // Completion order is the reverse of drop order.
    assert_eq!(
        zone.reads.complete(second, "text b".to_string(), Some(&mut sink)),
        Delivery::Delivered
    );
    assert_eq!(
        zone.reads.complete(first, "text a".to_string(), Some(&mut sink)),
        Delivery::Delivered
    );

    assert_eq!(sink.delivered, vec!["text b", "text a"]);
}

#[test]
fn delivered_text_drives_the_viewer_sink() {
    let mut zone = DropZone::new();
    let mut viewer = Viewer::new();

    zone.gesture(Gesture::Drop);
    let ticket = zone.reads.begin();
    let delivery = zone.reads.complete(
        ticket,
        "point [ 0 0 0 1 0 0 0 1 0 ]\ncoordIndex [ 0 1 2 -1 ]".to_string(),
        Some(&mut viewer),
    );
    assert_eq!(delivery, Delivery::Delivered);
    assert_eq!(viewer.mesh().triangles.len(), 1);
}
