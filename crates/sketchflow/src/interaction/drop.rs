//! Drag-and-drop node creation from the shape library.

use log::debug;

use sketchflow_core::{color::Color, identifier::Id, shape::ShapeKind};

use crate::{
    model::NodeData,
    palette::{self, FALLBACK_COLOR, FALLBACK_LABEL, StyleDefaults},
};

/// Result of a drop on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// A node with this id was created.
    Created(Id),
    /// The payload carried no shape token; nothing changed.
    Ignored,
}

/// Builds the data for a node dropped with `token`.
///
/// Library tokens take their label and accent color, with the accent used for
/// both fill and border and white text. Other shape kinds and aliases take the
/// per-kind palette defaults. Anything else becomes an indigo rectangle
/// labeled "New Node".
pub fn node_data_for_token(token: &str) -> NodeData {
    if let Some(entry) = palette::library_entry(token) {
        return NodeData::new(
            entry.label(),
            entry.kind().into(),
            &StyleDefaults::accent(entry.color()),
        );
    }

    match ShapeKind::parse(token) {
        Some(kind) => NodeData::for_kind(kind, display_label(token)),
        None => {
            debug!(token; "Unknown shape token, using default node");
            let color = Color::new(FALLBACK_COLOR).expect("fallback color is valid");
            NodeData::new(
                FALLBACK_LABEL,
                ShapeKind::Rectangle.into(),
                &StyleDefaults::accent(color),
            )
        }
    }
}

/// `"arrow-up"` becomes `"Arrow Up"`.
fn display_label(token: &str) -> String {
    token
        .trim()
        .split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Returns the token if it is usable, `None` for a missing or blank payload.
pub(crate) fn usable_token(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_token() {
        let data = node_data_for_token("circle");
        assert_eq!(data.shape().kind(), ShapeKind::Circle);
        assert_eq!(data.label(), "Circle");
        assert_eq!(data.color().to_string(), "#10b981");
        assert_eq!(data.border_color(), data.color());
        assert_eq!(data.text_color().to_string(), "#ffffff");
    }

    #[test]
    fn test_aliased_token_renders_as_kind() {
        let data = node_data_for_token("decision");
        assert_eq!(data.shape().kind(), ShapeKind::Diamond);
        assert_eq!(data.shape().as_str(), "diamond");
        assert_eq!(data.label(), "Decision");
    }

    #[test]
    fn test_catalogue_kind_takes_kind_defaults() {
        let data = node_data_for_token("heart");
        assert_eq!(data.shape().kind(), ShapeKind::Heart);
        assert_eq!(data.label(), "Heart");
        assert_eq!(data.color().to_string(), "#ec4899");
        assert_eq!(data.border_color().to_string(), "#db2777");

        let arrow = node_data_for_token("arrow-up");
        assert_eq!(arrow.shape().kind(), ShapeKind::ArrowUp);
        assert_eq!(arrow.label(), "Arrow Up");
        assert_eq!(arrow.color().to_string(), "#6b7280");

        let topic = node_data_for_token("central-topic");
        assert_eq!(topic.shape().kind(), ShapeKind::Circle);
        assert_eq!(topic.label(), "Central Topic");

        let mindmap = node_data_for_token("mindmap-node");
        assert_eq!(mindmap.shape().kind(), ShapeKind::MindmapNode);
        assert_eq!(mindmap.color().to_string(), "#fbbf24");
    }

    #[test]
    fn test_unknown_token_falls_back() {
        let data = node_data_for_token("teleporter");
        assert_eq!(data.shape().kind(), ShapeKind::Rectangle);
        assert_eq!(data.label(), "New Node");
        assert_eq!(data.color().to_string(), "#6366f1");
    }

    #[test]
    fn test_usable_token() {
        assert_eq!(usable_token(Some(" circle ")), Some("circle"));
        assert_eq!(usable_token(Some("  ")), None);
        assert_eq!(usable_token(None), None);
    }
}
