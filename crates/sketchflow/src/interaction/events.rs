//! Requests sent from renderers to the controller.
//!
//! Renderers never mutate the model. They hold an [`EventSender`] and post
//! [`EditorEvent`]s; the [`Editor`](super::Editor) is the single subscriber
//! and applies them in order when its events are pumped.

use std::sync::mpsc::{self, Receiver, Sender};

use log::trace;

use super::label_edit::{LabelCommit, LabelTarget};

/// A request posted to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Store `text` as the label of `target`, subject to the empty-label rule.
    LabelCommitRequested(LabelCommit),
}

/// A cloneable handle for posting [`EditorEvent`]s.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: Sender<EditorEvent>,
}

impl EventSender {
    /// Posts a label commit request. Returns `false` if the controller is gone.
    pub fn request_label_commit(&self, target: LabelTarget, text: impl Into<String>) -> bool {
        self.send(EditorEvent::LabelCommitRequested(LabelCommit::new(
            target, text,
        )))
    }

    /// Posts an event. Returns `false` if the controller is gone.
    pub fn send(&self, event: EditorEvent) -> bool {
        trace!(event:?; "Posting editor event");
        self.sender.send(event).is_ok()
    }
}

/// The receiving side owned by the controller.
#[derive(Debug)]
pub(crate) struct EventBus {
    sender: Sender<EditorEvent>,
    receiver: Receiver<EditorEvent>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub(crate) fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Takes every queued event without blocking.
    pub(crate) fn drain(&self) -> Vec<EditorEvent> {
        self.receiver.try_iter().collect()
    }
}
