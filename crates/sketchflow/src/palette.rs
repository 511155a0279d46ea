//! Default styles keyed by shape kind and by shape-library token.
//!
//! Two tables live here. [`kind_defaults`] gives the fill, border and text
//! colors for a node created programmatically for a given [`ShapeKind`].
//! [`library_entry`] resolves the tokens carried by palette drags, which
//! name a label and a single accent color.

use sketchflow_core::{color::Color, shape::ShapeKind};

/// Label given to nodes dropped with an unrecognized token.
pub const FALLBACK_LABEL: &str = "New Node";

/// Accent color given to nodes dropped with an unrecognized token.
pub const FALLBACK_COLOR: &str = "#6366f1";

/// Text color of dropped nodes.
pub const DROPPED_TEXT_COLOR: &str = "#ffffff";

/// Fill, border and text colors for one shape kind.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefaults {
    fill: Color,
    border: Color,
    text: Color,
}

impl StyleDefaults {
    fn from_hex(fill: &str, border: &str, text: &str) -> Self {
        Self {
            fill: parse_static(fill),
            border: parse_static(border),
            text: parse_static(text),
        }
    }

    /// A single accent used for both fill and border, with white text.
    pub fn accent(color: Color) -> Self {
        Self {
            fill: color.clone(),
            border: color,
            text: parse_static(DROPPED_TEXT_COLOR),
        }
    }

    pub fn fill(&self) -> &Color {
        &self.fill
    }

    pub fn border(&self) -> &Color {
        &self.border
    }

    pub fn text(&self) -> &Color {
        &self.text
    }
}

fn parse_static(color: &str) -> Color {
    Color::new(color).expect("palette colors are valid CSS colors")
}

/// Returns the default colors for a programmatically created node.
pub fn kind_defaults(kind: ShapeKind) -> StyleDefaults {
    use ShapeKind::*;

    match kind {
        Rectangle => StyleDefaults::from_hex("#3b82f6", "#1e40af", "#ffffff"),
        Circle => StyleDefaults::from_hex("#10b981", "#059669", "#ffffff"),
        Diamond => StyleDefaults::from_hex("#f59e0b", "#d97706", "#ffffff"),
        Triangle => StyleDefaults::from_hex("#ef4444", "#dc2626", "#ffffff"),
        Star => StyleDefaults::from_hex("#8b5cf6", "#7c3aed", "#ffffff"),
        Hexagon => StyleDefaults::from_hex("#06b6d4", "#0891b2", "#ffffff"),
        Heart => StyleDefaults::from_hex("#ec4899", "#db2777", "#ffffff"),
        ArrowUp | ArrowDown | ArrowLeft | ArrowRight => {
            StyleDefaults::from_hex("#6b7280", "#4b5563", "#ffffff")
        }
        Text => StyleDefaults::from_hex("transparent", "transparent", "#000000"),
        Image => StyleDefaults::from_hex("#f3f4f6", "#d1d5db", "#000000"),
        MindmapNode => StyleDefaults::from_hex("#fbbf24", "#f59e0b", "#000000"),
        Pentagon | Parallelogram | Database | Cloud | Document | Terminator => {
            let accent = parse_static(library_color_for_kind(kind));
            let text = accent.contrasting_text();
            StyleDefaults {
                fill: accent.clone(),
                border: accent,
                text,
            }
        }
    }
}

fn library_color_for_kind(kind: ShapeKind) -> &'static str {
    LIBRARY
        .iter()
        .find(|entry| entry.token == kind.tag())
        .map(|entry| entry.color)
        .unwrap_or(FALLBACK_COLOR)
}

/// One draggable entry of the shape library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryEntry {
    token: &'static str,
    label: &'static str,
    color: &'static str,
}

impl LibraryEntry {
    const fn new(token: &'static str, label: &'static str, color: &'static str) -> Self {
        Self {
            token,
            label,
            color,
        }
    }

    /// The drag token
    pub fn token(&self) -> &'static str {
        self.token
    }

    /// The label given to a dropped node
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The shape a dropped node renders as
    pub fn kind(&self) -> ShapeKind {
        ShapeKind::from_tag(self.token)
    }

    pub fn color(&self) -> Color {
        parse_static(self.color)
    }
}

const LIBRARY: &[LibraryEntry] = &[
    // flowchart
    LibraryEntry::new("process", "Process", "#3b82f6"),
    LibraryEntry::new("decision", "Decision", "#f59e0b"),
    LibraryEntry::new("terminator", "Start/End", "#10b981"),
    LibraryEntry::new("data", "Data", "#8b5cf6"),
    LibraryEntry::new("document", "Document", "#06b6d4"),
    LibraryEntry::new("delay", "Delay", "#f97316"),
    LibraryEntry::new("database", "Database", "#84cc16"),
    LibraryEntry::new("cloud", "Cloud", "#06b6d4"),
    // uml
    LibraryEntry::new("class", "Class", "#ef4444"),
    LibraryEntry::new("interface", "Interface", "#ec4899"),
    LibraryEntry::new("actor", "Actor", "#14b8a6"),
    LibraryEntry::new("usecase", "Use Case", "#f59e0b"),
    LibraryEntry::new("package", "Package", "#8b5cf6"),
    LibraryEntry::new("component", "Component", "#06b6d4"),
    // network
    LibraryEntry::new("server", "Server", "#374151"),
    LibraryEntry::new("router", "Router", "#4338ca"),
    LibraryEntry::new("switch", "Switch", "#059669"),
    LibraryEntry::new("firewall", "Firewall", "#dc2626"),
    LibraryEntry::new("laptop", "Laptop", "#6b7280"),
    LibraryEntry::new("mobile", "Mobile", "#7c3aed"),
    // bpmn
    LibraryEntry::new("event", "Event", "#eab308"),
    LibraryEntry::new("gateway", "Gateway", "#f97316"),
    LibraryEntry::new("task", "Task", "#3b82f6"),
    LibraryEntry::new("subprocess", "Subprocess", "#06b6d4"),
    LibraryEntry::new("annotation", "Annotation", "#64748b"),
    // basic
    LibraryEntry::new("rectangle", "Rectangle", "#3b82f6"),
    LibraryEntry::new("circle", "Circle", "#10b981"),
    LibraryEntry::new("triangle", "Triangle", "#f59e0b"),
    LibraryEntry::new("diamond", "Diamond", "#ef4444"),
    LibraryEntry::new("hexagon", "Hexagon", "#8b5cf6"),
    LibraryEntry::new("star", "Star", "#f59e0b"),
    LibraryEntry::new("pentagon", "Pentagon", "#06b6d4"),
    LibraryEntry::new("parallelogram", "Parallelogram", "#84cc16"),
];

/// Every library entry in palette order.
pub fn library() -> &'static [LibraryEntry] {
    LIBRARY
}

/// Looks up a drag token, or `None` when it is not in the library.
pub fn library_entry(token: &str) -> Option<&'static LibraryEntry> {
    LIBRARY.iter().find(|entry| entry.token == token)
}
