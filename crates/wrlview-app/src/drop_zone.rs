#![forbid(unsafe_code)]

//! Drop-target handling.
//!
//! The browser side of drag-and-drop is deliberately thin: the host forwards
//! each gesture and the first dropped item here, applies the returned effect
//! descriptions (suppress the default action, restyle the border, emit one
//! console diagnostic), and runs the asynchronous file read. Everything that
//! can be decided without the DOM is decided here.
//!
//! Guarantees:
//! - Every gesture suppresses the browser default action.
//! - The border style is overwritten (never merged) on every gesture, so
//!   repeated over/leave cycles are idempotent and order-independent.
//! - A drop with no items, or a non-file first item, is a silent no-op.
//! - A file is accepted only by case-insensitive `.wrl` suffix; rejection
//!   produces exactly one informational diagnostic.
//! - Reads are untracked and uncancellable; overlapping drops each deliver
//!   at most once, in completion order.

use std::collections::BTreeSet;

use crate::sink::ModelSink;

/// Drag gestures the host forwards from the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    DragOver,
    DragLeave,
    Drop,
}

/// Border styling state of the drop target.
///
/// Purely cosmetic; the host maps these to concrete CSS strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// Dashed highlight while a drag hovers the window.
    Highlight,
    /// The element's initial appearance.
    Idle,
}

/// Effects the host must apply for one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEffects {
    pub suppress_default: bool,
    pub border: Border,
}

/// The first entry of a drop's item collection, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropItem<'a> {
    /// The item collection was empty.
    None,
    /// The first item is not of kind "file".
    NonFile,
    /// The first item is a file with this name.
    File { name: &'a str },
}

/// What to do with a drop payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Nothing useful to do; no diagnostic either.
    SilentIgnore,
    /// A file, but not a `.wrl` one.
    RejectExtension,
    /// Start an asynchronous text read.
    Accept,
}

/// Outcome of one read completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The sink received the text.
    Delivered,
    /// No sink is registered; the text was discarded.
    SinkMissing,
    /// The ticket was already completed or never issued.
    UnknownTicket,
}

/// Console diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// One console diagnostic the host should emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: LogLevel,
    pub message: &'static str,
}

/// Informational message for a non-`.wrl` drop.
pub const WRONG_EXTENSION_LOG: &str = "Please drop a .wrl file.";
/// Error message when a read completes with no sink registered.
pub const SINK_MISSING_LOG: &str = "no model sink registered; dropped file discarded";

/// True when the file name ends in `.wrl`, compared case-insensitively.
#[must_use]
pub fn accepts_file_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".wrl")
}

/// Classify the first dropped item.
#[must_use]
pub fn classify(item: &DropItem<'_>) -> Disposition {
    match item {
        DropItem::None | DropItem::NonFile => Disposition::SilentIgnore,
        DropItem::File { name } => {
            if accepts_file_name(name) {
                Disposition::Accept
            } else {
                Disposition::RejectExtension
            }
        }
    }
}

/// The diagnostic (if any) a disposition asks the host to emit.
///
/// Only the extension mismatch logs; the no-item and non-file cases stay
/// silent.
#[must_use]
pub fn disposition_diagnostic(disposition: Disposition) -> Option<Diagnostic> {
    match disposition {
        Disposition::RejectExtension => Some(Diagnostic {
            level: LogLevel::Info,
            message: WRONG_EXTENSION_LOG,
        }),
        Disposition::SilentIgnore | Disposition::Accept => None,
    }
}

/// The diagnostic (if any) a delivery outcome asks the host to emit.
#[must_use]
pub fn delivery_diagnostic(delivery: Delivery) -> Option<Diagnostic> {
    match delivery {
        Delivery::SinkMissing => Some(Diagnostic {
            level: LogLevel::Error,
            message: SINK_MISSING_LOG,
        }),
        Delivery::Delivered | Delivery::UnknownTicket => None,
    }
}

/// Handle for one in-flight read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReadTicket(u64);

/// Bookkeeping for in-flight file reads.
///
/// Reads are never cancelled and never time out; a ticket exists only to
/// guarantee at-most-once delivery per drop. Completion order is delivery
/// order.
#[derive(Debug, Default, Clone)]
pub struct PendingReads {
    next: u64,
    outstanding: BTreeSet<u64>,
}

impl PendingReads {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reads started but not yet completed.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// Register a new read.
    pub fn begin(&mut self) -> ReadTicket {
        let id = self.next;
        self.next += 1;
        self.outstanding.insert(id);
        ReadTicket(id)
    }

    /// Forget a read whose underlying I/O failed.
    ///
    /// Read failures are silent (matching the drop-target's console-only,
    /// best-effort posture); the ticket just stops being completable.
    pub fn abandon(&mut self, ticket: ReadTicket) -> bool {
        self.outstanding.remove(&ticket.0)
    }

    /// Complete a read, delivering its text to the sink if one is present.
    pub fn complete(
        &mut self,
        ticket: ReadTicket,
        text: String,
        sink: Option<&mut dyn ModelSink>,
    ) -> Delivery {
        if !self.outstanding.remove(&ticket.0) {
            return Delivery::UnknownTicket;
        }
        match sink {
            Some(sink) => {
                sink.deliver(text);
                Delivery::Delivered
            }
            None => Delivery::SinkMissing,
        }
    }
}

/// The drop target's only persistent state: the applied border style.
#[derive(Debug, Clone)]
pub struct DropZone {
    border: Border,
    pub reads: PendingReads,
}

impl DropZone {
    #[must_use]
    pub fn new() -> Self {
        Self {
            border: Border::Idle,
            reads: PendingReads::new(),
        }
    }

    /// Currently applied border style.
    #[must_use]
    pub const fn border(&self) -> Border {
        self.border
    }

    /// Apply one gesture, returning the effects the host must mirror.
    pub fn gesture(&mut self, gesture: Gesture) -> GestureEffects {
        let border = match gesture {
            Gesture::DragOver => Border::Highlight,
            Gesture::DragLeave | Gesture::Drop => Border::Idle,
        };
        self.border = border;
        GestureEffects {
            suppress_default: true,
            border,
        }
    }
}

impl Default for DropZone {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use crate::sink::RecordingSink;

    use super::*;

    #[test]
    fn every_gesture_suppresses_the_default_action() {
        let mut zone = DropZone::new();
        for gesture in [Gesture::DragOver, Gesture::DragLeave, Gesture::Drop] {
            assert!(zone.gesture(gesture).suppress_default);
        }
    }

    #[test]
    fn drag_over_highlights_and_leave_restores() {
        let mut zone = DropZone::new();
        assert_eq!(zone.border(), Border::Idle);
        assert_eq!(zone.gesture(Gesture::DragOver).border, Border::Highlight);
        assert_eq!(zone.gesture(Gesture::DragLeave).border, Border::Idle);
    }

    #[test]
    fn drop_clears_the_highlight() {
        let mut zone = DropZone::new();
        zone.gesture(Gesture::DragOver);
        assert_eq!(zone.gesture(Gesture::Drop).border, Border::Idle);
    }

    #[test]
    fn mixed_case_suffix_is_accepted() {
        assert!(accepts_file_name("Model.WRL"));
        assert!(accepts_file_name("model.wrl"));
        assert!(accepts_file_name("MODEL.WrL"));
    }

    #[test]
    fn wrong_extension_rejects_with_one_info_log() {
        let disposition = classify(&DropItem::File { name: "model.txt" });
        assert_eq!(disposition, Disposition::RejectExtension);
        let diagnostic = disposition_diagnostic(disposition).unwrap();
        assert_eq!(diagnostic.level, LogLevel::Info);
        assert_eq!(diagnostic.message, WRONG_EXTENSION_LOG);
    }

    #[test]
    fn suffix_must_be_at_the_end() {
        assert!(!accepts_file_name("model.wrl.txt"));
        assert!(!accepts_file_name("wrl"));
        assert!(accepts_file_name(".wrl"));
    }

    #[test]
    fn empty_and_non_file_drops_are_silent() {
        for item in [DropItem::None, DropItem::NonFile] {
            let disposition = classify(&item);
            assert_eq!(disposition, Disposition::SilentIgnore);
            assert_eq!(disposition_diagnostic(disposition), None);
        }
    }

    #[test]
    fn missing_sink_yields_exactly_one_error_log_and_no_delivery() {
        let mut reads = PendingReads::new();
        let ticket = reads.begin();
        let delivery = reads.complete(ticket, "content".to_string(), None);
        assert_eq!(delivery, Delivery::SinkMissing);
        let diagnostic = delivery_diagnostic(delivery).unwrap();
        assert_eq!(diagnostic.level, LogLevel::Error);
    }

    #[test]
    fn a_ticket_delivers_at_most_once() {
        let mut reads = PendingReads::new();
        let mut sink = RecordingSink::new();
        let ticket = reads.begin();
        assert_eq!(
            reads.complete(ticket, "a".to_string(), Some(&mut sink)),
            Delivery::Delivered
        );
        assert_eq!(
            reads.complete(ticket, "a".to_string(), Some(&mut sink)),
            Delivery::UnknownTicket
        );
        assert_eq!(sink.delivered, vec!["a"]);
    }

    #[test]
    fn abandoned_reads_never_deliver() {
        let mut reads = PendingReads::new();
        let mut sink = RecordingSink::new();
        let ticket = reads.begin();
        assert!(reads.abandon(ticket));
        assert_eq!(
            reads.complete(ticket, "late".to_string(), Some(&mut sink)),
            Delivery::UnknownTicket
        );
        assert!(sink.delivered.is_empty());
    }

    #[test]
    fn overlapping_reads_deliver_in_completion_order() {
        let mut reads = PendingReads::new();
        let mut sink = RecordingSink::new();
        let first = reads.begin();
        let second = reads.begin();
        assert_eq!(reads.outstanding(), 2);

        // The second drop's read finishes first.
        reads.complete(second, "second file".to_string(), Some(&mut sink));
        reads.complete(first, "first file".to_string(), Some(&mut sink));

        assert_eq!(sink.delivered, vec!["second file", "first file"]);
        assert_eq!(reads.outstanding(), 0);
    }

    proptest! {
        #[test]
        fn any_case_permutation_of_the_suffix_is_accepted(
            stem in "[a-zA-Z0-9 _-]{0,24}",
            mask in prop::collection::vec(any::<bool>(), 4),
        ) {
            let suffix: String = ".wrl"
                .chars()
                .zip(&mask)
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert!(accepts_file_name(&format!("{stem}{suffix}")));
        }

        #[test]
        fn border_returns_to_idle_after_any_cycle_count(cycles in 1usize..64) {
            let mut zone = DropZone::new();
            for _ in 0..cycles {
                zone.gesture(Gesture::DragOver);
                zone.gesture(Gesture::DragLeave);
            }
            prop_assert_eq!(zone.border(), Border::Idle);
        }
    }
}
