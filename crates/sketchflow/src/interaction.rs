//! The Interaction Controller and its state machines.
//!
//! [`Editor`] is the only writer of the [`Diagram`](crate::model::Diagram).
//! It runs the label editing, connection, drop, selection and keyboard
//! state machines and applies the [`EditorEvent`]s posted by renderers.

mod connection;
mod drop;
mod editor;
mod events;
mod gesture;
mod label_edit;
mod selection;
mod shortcuts;

pub use connection::{AbortReason, ConnectionDrag, ConnectionOutcome};
pub use drop::{DropOutcome, node_data_for_token};
pub use editor::{Editor, HANDLE_HIT_RADIUS};
pub use events::{EditorEvent, EventSender};
pub use gesture::{Gesture, GestureKind, NodeDrag};
pub use label_edit::{LabelCommit, LabelEditOutcome, LabelEditor, LabelSession, LabelTarget};
pub use selection::{Marquee, Selection};
pub use shortcuts::{EditorAction, Key, KeyChord, Modifiers, resolve as resolve_shortcut};
