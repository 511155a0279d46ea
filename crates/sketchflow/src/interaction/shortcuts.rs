//! Keyboard map.
//!
//! | Chord | Action |
//! |-------|--------|
//! | Enter (while editing a label) | commit the label |
//! | Escape (while editing a label) | cancel the edit |
//! | Ctrl/Cmd + S | export the structured snapshot |
//! | Ctrl/Cmd + E | export a raster image |
//! | Ctrl/Cmd + Delete/Backspace | remove the selection, if any |
//!
//! Label keys take priority over the global shortcuts.

use crate::export::ExportFormat;

/// A key, reduced to what the map distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Delete,
    Backspace,
    Other,
}

/// Modifier keys held with a [`Key`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Self::NONE
    };

    pub const META: Modifiers = Modifiers {
        meta: true,
        ..Self::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    key: Key,
    modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key pressed without modifiers
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// A key pressed with Ctrl
    pub fn ctrl(key: Key) -> Self {
        Self::new(key, Modifiers::CTRL)
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

/// What a chord asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    CommitLabel,
    CancelLabel,
    RemoveSelection,
    /// Run the export pipeline; the controller only reports this.
    Export(ExportFormat),
}

/// Maps a chord to an action given the controller's state.
pub fn resolve(chord: KeyChord, editing_label: bool, has_selection: bool) -> Option<EditorAction> {
    if editing_label {
        match chord.key {
            Key::Enter => return Some(EditorAction::CommitLabel),
            Key::Escape => return Some(EditorAction::CancelLabel),
            _ => {}
        }
    }

    if !chord.modifiers.command() {
        return None;
    }

    match chord.key {
        Key::Char(c) if c.eq_ignore_ascii_case(&'s') => Some(EditorAction::Export(ExportFormat::Json)),
        Key::Char(c) if c.eq_ignore_ascii_case(&'e') => Some(EditorAction::Export(ExportFormat::Png)),
        Key::Delete | Key::Backspace if has_selection => Some(EditorAction::RemoveSelection),
        _ => None,
    }
}
