//! The Interaction Controller.

use std::fmt;

use log::{debug, info, warn};

use sketchflow_core::{
    color::Color,
    edge_path::EdgePath,
    geometry::Point,
    identifier::Id,
    shape::AnchorId,
};

use super::{
    ConnectionDrag, ConnectionOutcome, DropOutcome, EditorAction, EditorEvent, EventSender,
    Gesture, GestureKind, KeyChord, LabelEditOutcome, LabelEditor, LabelSession, LabelTarget,
    Marquee, NodeDrag, Selection,
    connection::AbortReason,
    drop::{self, node_data_for_token},
    events::EventBus,
    shortcuts,
};
use crate::{
    config::{AppConfig, SelfLoopPolicy},
    error::{InteractionError, ModelError},
    model::{
        DEFAULT_EDGE_COLOR, Diagram, Edge, EdgeData, EdgeStylePatch, InsertedFragment,
        LabelUpdate, Node, NodeStylePatch, Removal, Snapshot,
    },
};

/// Distance in screen pixels within which a pointer counts as over an anchor.
pub const HANDLE_HIT_RADIUS: f32 = 12.0;

type SelectionListener = Box<dyn FnMut(&Selection)>;

/// Owns the [`Diagram`] and turns user input into model commands.
///
/// All writes to the diagram go through the controller. Collaborators read
/// through [`Editor::diagram`] or [`Editor::snapshot`], post label commits
/// through an [`EventSender`], and observe selection changes with
/// [`Editor::subscribe_selection`].
///
/// # Examples
///
/// ```
/// use sketchflow::{config::AppConfig, interaction::{DropOutcome, Editor}};
/// use sketchflow_core::{geometry::Point, shape::ShapeKind};
///
/// let mut editor = Editor::new(AppConfig::default());
/// let outcome = editor
///     .drop_shape(Some("circle"), Point::new(140.0, 140.0))
///     .expect("no gesture is active");
///
/// let DropOutcome::Created(id) = outcome else { panic!("drop was ignored") };
/// let node = editor.diagram().node(id).unwrap();
/// assert_eq!(node.position(), Point::new(140.0, 140.0));
/// assert_eq!(node.data().shape().kind(), ShapeKind::Circle);
/// ```
pub struct Editor {
    diagram: Diagram,
    config: AppConfig,
    selection: Selection,
    labels: LabelEditor,
    gesture: Option<Gesture>,
    events: EventBus,
    selection_listeners: Vec<SelectionListener>,
}

impl Editor {
    /// Creates a controller over an empty diagram.
    pub fn new(config: AppConfig) -> Self {
        let diagram = Diagram::new(*config.viewport());
        Self::with_diagram(diagram, config)
    }

    /// Creates a controller over an existing diagram.
    pub fn with_diagram(diagram: Diagram, config: AppConfig) -> Self {
        Self {
            diagram,
            config,
            selection: Selection::new(),
            labels: LabelEditor::new(),
            gesture: None,
            events: EventBus::new(),
            selection_listeners: Vec::new(),
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// An immutable copy of the diagram for rendering or export.
    pub fn snapshot(&self) -> Snapshot {
        self.diagram.snapshot()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn label_session(&self) -> Option<&LabelSession> {
        self.labels.session()
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// A handle renderers use to post [`EditorEvent`]s.
    pub fn event_sender(&self) -> EventSender {
        self.events.sender()
    }

    /// Registers a callback run after every change of the selection.
    pub fn subscribe_selection(&mut self, listener: impl FnMut(&Selection) + 'static) {
        self.selection_listeners.push(Box::new(listener));
    }

    // Model commands

    /// Adds a node. See [`Diagram::add_node`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateId`] if the id is taken.
    pub fn add_node(&mut self, node: Node) -> Result<Id, ModelError> {
        self.diagram.add_node(node)
    }

    /// Adds an edge. See [`Diagram::add_edge`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidReference`] if an endpoint is missing.
    pub fn add_edge(&mut self, edge: Edge) -> Result<Id, ModelError> {
        self.diagram.add_edge(edge)
    }

    /// Sets a node label directly. See [`Diagram::update_node_label`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownNode`] if the node does not exist.
    pub fn update_node_label(&mut self, id: Id, text: &str) -> Result<LabelUpdate, ModelError> {
        self.diagram.update_node_label(id, text)
    }

    /// Sets an edge label directly. See [`Diagram::update_edge_label`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownEdge`] if the edge does not exist.
    pub fn update_edge_label(&mut self, id: Id, text: &str) -> Result<LabelUpdate, ModelError> {
        self.diagram.update_edge_label(id, text)
    }

    /// Moves a node. See [`Diagram::move_node`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownNode`] if the node does not exist.
    pub fn move_node(&mut self, id: Id, position: Point) -> Result<(), ModelError> {
        self.diagram.move_node(id, position)
    }

    /// # Errors
    ///
    /// Returns [`ModelError::UnknownNode`] if the node does not exist.
    pub fn update_node_style(&mut self, id: Id, patch: &NodeStylePatch) -> Result<(), ModelError> {
        self.diagram.update_node_style(id, patch)
    }

    /// # Errors
    ///
    /// Returns [`ModelError::UnknownEdge`] if the edge does not exist.
    pub fn update_edge_style(&mut self, id: Id, patch: &EdgeStylePatch) -> Result<(), ModelError> {
        self.diagram.update_edge_style(id, patch)
    }

    /// Removes entities with cascade, then drops any selection, label
    /// session or gesture that referred to them.
    pub fn remove_entities(&mut self, node_ids: &[Id], edge_ids: &[Id]) -> Removal {
        let removal = self.diagram.remove_entities(node_ids, edge_ids);
        if removal.is_empty() {
            return removal;
        }

        let diagram = &self.diagram;
        self.labels.forget(|target| match target {
            LabelTarget::Node(id) => !diagram.contains_node(id),
            LabelTarget::Edge(id) => !diagram.contains_edge(id),
        });

        let stale_gesture = match &self.gesture {
            Some(Gesture::Connection(drag)) => !self.diagram.contains_node(drag.source()),
            Some(Gesture::NodeDrag(drag)) => !self.diagram.contains_node(drag.node()),
            _ => false,
        };
        if stale_gesture {
            self.cancel_gesture();
        }

        self.change_selection(|selection, diagram| selection.retain_existing(diagram));
        removal
    }

    /// Removes the selected nodes and edges, cascading to touching edges.
    pub fn remove_selection(&mut self) -> Removal {
        let nodes: Vec<Id> = self.selection.nodes().collect();
        let edges: Vec<Id> = self.selection.edges().collect();
        self.remove_entities(&nodes, &edges)
    }

    /// Inserts a template fragment and selects the inserted nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidReference`] if a fragment edge dangles.
    pub fn insert_fragment(
        &mut self,
        fragment: &Snapshot,
        offset: Point,
    ) -> Result<InsertedFragment, ModelError> {
        let inserted = self.diagram.insert_fragment(fragment, offset)?;
        let nodes = inserted.nodes().to_vec();
        self.change_selection(|selection, _| {
            selection.clear();
            selection.extend_nodes(nodes);
        });
        Ok(inserted)
    }

    // Viewport

    pub fn pan_by(&mut self, delta: Point) {
        self.diagram.viewport_mut().pan_by(delta);
    }

    /// Zooms around a screen point and returns the applied zoom.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f32) -> f32 {
        self.diagram.viewport_mut().zoom_at(screen_point, factor)
    }

    fn snap(&self, point: Point) -> Point {
        match self.config.canvas().snap_grid() {
            Some(grid) => point.snap_to_grid(grid),
            None => point,
        }
    }

    // Label editing

    /// Opens a label session on `target`, as on double-click.
    ///
    /// A session already open on another entity is committed first; its
    /// outcome is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownNode`] or [`ModelError::UnknownEdge`] if
    /// the target does not exist.
    pub fn begin_label_edit(&mut self, target: LabelTarget) -> Result<LabelEditOutcome, ModelError> {
        let current = match target {
            LabelTarget::Node(id) => self
                .diagram
                .node(id)
                .ok_or(ModelError::UnknownNode(id))?
                .data()
                .label()
                .to_string(),
            LabelTarget::Edge(id) => self
                .diagram
                .edge(id)
                .ok_or(ModelError::UnknownEdge(id))?
                .data()
                .label()
                .unwrap_or_default()
                .to_string(),
        };

        let previous = self.labels.begin(target, &current);
        self.request_commit(&previous);
        Ok(previous)
    }

    /// Replaces the text of the open label session.
    pub fn edit_label_text(&mut self, text: &str) {
        self.labels.set_text(text);
    }

    /// Commits the open label session, as on Enter or loss of focus.
    pub fn commit_label(&mut self) -> LabelEditOutcome {
        let outcome = self.labels.commit();
        self.request_commit(&outcome);
        outcome
    }

    /// Cancels the open label session, as on Escape.
    pub fn cancel_label(&mut self) -> LabelEditOutcome {
        self.labels.cancel()
    }

    fn request_commit(&mut self, outcome: &LabelEditOutcome) {
        if let LabelEditOutcome::Committed(commit) = outcome {
            self.events
                .sender()
                .send(EditorEvent::LabelCommitRequested(commit.clone()));
            self.pump_events();
        }
    }

    /// Applies every queued [`EditorEvent`] and returns how many changed
    /// the model.
    pub fn pump_events(&mut self) -> usize {
        let mut applied = 0;
        for event in self.events.drain() {
            match event {
                EditorEvent::LabelCommitRequested(commit) => {
                    let result = match commit.target() {
                        LabelTarget::Node(id) => self.diagram.update_node_label(id, commit.text()),
                        LabelTarget::Edge(id) => self.diagram.update_edge_label(id, commit.text()),
                    };
                    match result {
                        Ok(LabelUpdate::Applied) => applied += 1,
                        Ok(LabelUpdate::Discarded) => {}
                        Err(err) => {
                            warn!(label_target:% = commit.target(), err:%; "Dropped label commit")
                        }
                    }
                }
            }
        }
        applied
    }

    // Gestures

    fn start_gesture(&mut self, gesture: Gesture) -> Result<(), InteractionError> {
        if let Some(active) = &self.gesture {
            let conflict = InteractionError::GestureConflict {
                active: active.kind(),
                requested: gesture.kind(),
            };
            debug!(err:% = conflict; "Rejected gesture");
            return Err(conflict);
        }
        debug!(gesture:% = gesture.kind(); "Gesture started");
        self.gesture = Some(gesture);
        Ok(())
    }

    /// Abandons the active gesture without changing the model.
    pub fn cancel_gesture(&mut self) -> Option<GestureKind> {
        let kind = self.gesture.take().map(|gesture| gesture.kind());
        if let Some(kind) = kind {
            debug!(gesture:% = kind; "Gesture cancelled");
        }
        kind
    }

    /// Feeds a pointer move in screen coordinates to the active gesture.
    ///
    /// A node drag moves its node; connection and marquee gestures track
    /// the pointer.
    pub fn update_pointer(&mut self, screen_point: Point) {
        let diagram_point = self.diagram.viewport().screen_to_diagram(screen_point);
        let mut moved = None;
        match &mut self.gesture {
            Some(Gesture::Connection(drag)) => drag.update(diagram_point),
            Some(Gesture::Marquee(marquee)) => marquee.update(screen_point),
            Some(Gesture::NodeDrag(drag)) => {
                moved = Some((drag.node(), drag.position_for(diagram_point)));
            }
            Some(Gesture::ShapeDrag(_)) | None => {}
        }
        if let Some((node, position)) = moved {
            let position = self.snap(position);
            if let Err(err) = self.diagram.move_node(node, position) {
                warn!(err:%; "Node drag lost its node");
                self.cancel_gesture();
            }
        }
    }

    /// Finds the topmost anchor within [`HANDLE_HIT_RADIUS`] of a screen point.
    pub fn anchor_at(&self, screen_point: Point) -> Option<(Id, AnchorId)> {
        let viewport = self.diagram.viewport();
        self.diagram.nodes().rev().find_map(|node| {
            let geometry = node.geometry();
            geometry.anchors().iter().find_map(|(anchor, local)| {
                let screen = viewport.diagram_to_screen(node.position().add_point(local));
                (screen.distance(screen_point) <= HANDLE_HIT_RADIUS).then_some((node.id(), anchor))
            })
        })
    }

    /// Starts a connection from an anchor of `source`.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::UnknownNode`] if the node does not exist, or
    /// with a gesture conflict if another gesture is active.
    pub fn begin_connection(&mut self, source: Id, anchor: AnchorId) -> Result<(), InteractionError> {
        let node = self
            .diagram
            .node(source)
            .ok_or(ModelError::UnknownNode(source))?;
        let origin = node.anchor_point(anchor);
        self.start_gesture(Gesture::Connection(ConnectionDrag::new(source, anchor, origin)))
    }

    /// The connection line of the active connection drag.
    pub fn connection_preview(&self) -> Option<EdgePath> {
        match &self.gesture {
            Some(Gesture::Connection(drag)) => Some(drag.preview_path()),
            _ => None,
        }
    }

    /// Ends the connection drag over the anchor under `screen_point`, if any.
    pub fn finish_connection_at(&mut self, screen_point: Point) -> ConnectionOutcome {
        let target = self.anchor_at(screen_point);
        self.finish_connection(target)
    }

    /// Ends the connection drag on `target`, or aborts it when `None`.
    pub fn finish_connection(&mut self, target: Option<(Id, AnchorId)>) -> ConnectionOutcome {
        let drag = match self.gesture.take() {
            Some(Gesture::Connection(drag)) => drag,
            other => {
                self.gesture = other;
                return ConnectionOutcome::Aborted(AbortReason::NotDragging);
            }
        };

        let Some((target, target_anchor)) = target else {
            debug!(source:% = drag.source(); "Connection aborted");
            return ConnectionOutcome::Aborted(AbortReason::NoTarget);
        };
        if target == drag.source() && self.config.canvas().self_loops() == SelfLoopPolicy::Reject {
            debug!(source:% = drag.source(); "Self-loop rejected by policy");
            return ConnectionOutcome::Aborted(AbortReason::SelfLoop);
        }

        let style = self.config.style();
        let color = style.edge_color().unwrap_or_else(|err| {
            warn!(err:%; "Invalid configured edge color, using default");
            Color::new(DEFAULT_EDGE_COLOR).expect("default edge color is valid")
        });
        let id = self.diagram.next_edge_id(drag.source(), target);
        let edge = Edge::new(
            id,
            drag.source(),
            target,
            EdgeData::connected(color, style.edge_width(), style.path_type()),
        )
        .with_handles(Some(drag.source_anchor()), Some(target_anchor));

        match self.diagram.add_edge(edge) {
            Ok(id) => {
                info!(edge_id:% = id; "Connection created");
                ConnectionOutcome::Connected(id)
            }
            Err(err) => {
                warn!(err:%; "Connection target vanished");
                ConnectionOutcome::Aborted(AbortReason::MissingNode)
            }
        }
    }

    /// Starts dragging a palette item carrying `token`.
    ///
    /// # Errors
    ///
    /// Fails with a gesture conflict if another gesture is active.
    pub fn begin_shape_drag(&mut self, token: &str) -> Result<(), InteractionError> {
        self.start_gesture(Gesture::ShapeDrag(token.to_string()))
    }

    /// Drops the dragged palette item at a screen point.
    ///
    /// Returns [`DropOutcome::Ignored`] when no shape drag is active or its
    /// token is blank.
    pub fn drop_at(&mut self, screen_point: Point) -> DropOutcome {
        let token = match self.gesture.take() {
            Some(Gesture::ShapeDrag(token)) => token,
            other => {
                self.gesture = other;
                return DropOutcome::Ignored;
            }
        };
        self.create_dropped_node(Some(&token), screen_point)
    }

    /// Handles a drop whose payload arrives with the drop event.
    ///
    /// A missing or blank token leaves the model untouched.
    ///
    /// # Errors
    ///
    /// Fails with a gesture conflict if a different gesture is active.
    pub fn drop_shape(
        &mut self,
        token: Option<&str>,
        screen_point: Point,
    ) -> Result<DropOutcome, InteractionError> {
        match &self.gesture {
            Some(Gesture::ShapeDrag(_)) => {
                self.gesture = None;
            }
            Some(active) => {
                return Err(InteractionError::GestureConflict {
                    active: active.kind(),
                    requested: GestureKind::ShapeDrag,
                });
            }
            None => {}
        }
        Ok(self.create_dropped_node(token, screen_point))
    }

    fn create_dropped_node(&mut self, token: Option<&str>, screen_point: Point) -> DropOutcome {
        let Some(token) = drop::usable_token(token) else {
            debug!("Drop without shape token ignored");
            return DropOutcome::Ignored;
        };
        let position = self.snap(self.diagram.viewport().screen_to_diagram(screen_point));
        let id = self
            .diagram
            .create_node(position, node_data_for_token(token));
        info!(node_id:% = id, token; "Node dropped");
        DropOutcome::Created(id)
    }

    /// Starts moving `node` with the pointer at `screen_point`.
    ///
    /// Returns `Ok(false)` for locked nodes, which stay put.
    ///
    /// # Errors
    ///
    /// Fails with [`ModelError::UnknownNode`] or a gesture conflict.
    pub fn begin_node_drag(&mut self, node: Id, screen_point: Point) -> Result<bool, InteractionError> {
        let found = self.diagram.node(node).ok_or(ModelError::UnknownNode(node))?;
        if found.data().is_locked() {
            return Ok(false);
        }
        let pointer = self.diagram.viewport().screen_to_diagram(screen_point);
        let grab_offset = pointer.sub_point(found.position());
        self.start_gesture(Gesture::NodeDrag(NodeDrag::new(node, grab_offset)))?;
        Ok(true)
    }

    /// Ends a node drag, leaving the node where it was last moved.
    pub fn finish_node_drag(&mut self) -> Option<Id> {
        match self.gesture.take() {
            Some(Gesture::NodeDrag(drag)) => Some(drag.node()),
            other => {
                self.gesture = other;
                None
            }
        }
    }

    // Selection

    fn change_selection(&mut self, change: impl FnOnce(&mut Selection, &Diagram)) {
        let before = self.selection.clone();
        change(&mut self.selection, &self.diagram);
        if self.selection != before {
            debug!(selected = self.selection.len(); "Selection changed");
            for listener in &mut self.selection_listeners {
                listener(&self.selection);
            }
        }
    }

    /// Clicks a node. With `additive` (modifier held) its membership toggles.
    pub fn click_node(&mut self, id: Id, additive: bool) {
        if !self.diagram.contains_node(id) {
            return;
        }
        self.change_selection(|selection, _| {
            if additive {
                selection.toggle_node(id);
            } else {
                selection.select_node(id, false);
            }
        });
    }

    /// Clicks an edge. With `additive` (modifier held) its membership toggles.
    pub fn click_edge(&mut self, id: Id, additive: bool) {
        if !self.diagram.contains_edge(id) {
            return;
        }
        self.change_selection(|selection, _| {
            if additive {
                selection.toggle_edge(id);
            } else {
                selection.select_edge(id, false);
            }
        });
    }

    /// Clicks empty canvas, clearing the selection.
    pub fn click_canvas(&mut self) {
        self.change_selection(|selection, _| selection.clear());
    }

    /// Starts a marquee at a screen point.
    ///
    /// # Errors
    ///
    /// Fails with a gesture conflict if another gesture is active.
    pub fn begin_marquee(&mut self, screen_point: Point, additive: bool) -> Result<(), InteractionError> {
        self.start_gesture(Gesture::Marquee(Marquee::new(screen_point, additive)))
    }

    /// Ends the marquee, selecting every node it touches. Returns the
    /// number of nodes hit, or `None` when no marquee was active.
    pub fn finish_marquee(&mut self) -> Option<usize> {
        let marquee = match self.gesture.take() {
            Some(Gesture::Marquee(marquee)) => marquee,
            other => {
                self.gesture = other;
                return None;
            }
        };
        let hits = marquee.hits(&self.diagram);
        let count = hits.len();
        self.change_selection(|selection, _| {
            if !marquee.is_additive() {
                selection.clear();
            }
            selection.extend_nodes(hits);
        });
        Some(count)
    }

    // Keyboard

    /// Handles a key chord and returns the action it resolved to.
    ///
    /// Label and removal actions are carried out here. An
    /// [`EditorAction::Export`] is only reported; running the export
    /// pipeline is up to the caller.
    pub fn handle_key(&mut self, chord: KeyChord) -> Option<EditorAction> {
        let action = shortcuts::resolve(chord, self.labels.is_editing(), !self.selection.is_empty())?;
        match action {
            EditorAction::CommitLabel => {
                self.commit_label();
            }
            EditorAction::CancelLabel => {
                self.cancel_label();
            }
            EditorAction::RemoveSelection => {
                self.remove_selection();
            }
            EditorAction::Export(format) => {
                debug!(format:%; "Export requested from keyboard");
            }
        }
        Some(action)
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("diagram", &self.diagram)
            .field("selection", &self.selection)
            .field("labels", &self.labels)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        config::CanvasConfig,
        export::ExportFormat,
        interaction::{Key, Modifiers},
        model::NodeData,
    };
    use sketchflow_core::shape::ShapeKind;

    fn editor_with_nodes() -> Editor {
        let mut editor = Editor::new(AppConfig::default());
        for (id, x) in [("A", 0.0), ("B", 300.0)] {
            editor
                .add_node(Node::new(
                    Id::new(id),
                    Point::new(x, 0.0),
                    NodeData::for_kind(ShapeKind::Rectangle, "Start"),
                ))
                .unwrap();
        }
        editor
    }

    fn label_of(editor: &Editor, id: &str) -> String {
        editor
            .diagram()
            .node(Id::new(id))
            .unwrap()
            .data()
            .label()
            .to_string()
    }

    #[test]
    fn test_label_edit_commit_on_enter() {
        let mut editor = editor_with_nodes();
        editor.begin_label_edit(LabelTarget::Node(Id::new("A"))).unwrap();
        editor.edit_label_text("Begin");
        assert_eq!(
            editor.handle_key(KeyChord::plain(Key::Enter)),
            Some(EditorAction::CommitLabel)
        );
        assert_eq!(label_of(&editor, "A"), "Begin");
        assert!(editor.label_session().is_none());
    }

    #[test]
    fn test_label_edit_escape_keeps_label() {
        let mut editor = editor_with_nodes();
        editor.begin_label_edit(LabelTarget::Node(Id::new("A"))).unwrap();
        editor.edit_label_text("Begin");
        editor.handle_key(KeyChord::plain(Key::Escape));
        assert_eq!(label_of(&editor, "A"), "Start");
    }

    #[test]
    fn test_opening_second_session_commits_first() {
        let mut editor = editor_with_nodes();
        editor.begin_label_edit(LabelTarget::Node(Id::new("A"))).unwrap();
        editor.edit_label_text("First");
        editor.begin_label_edit(LabelTarget::Node(Id::new("B"))).unwrap();
        assert_eq!(label_of(&editor, "A"), "First");
        assert_eq!(
            editor.label_session().map(LabelSession::target),
            Some(LabelTarget::Node(Id::new("B")))
        );
    }

    #[test]
    fn test_label_edit_unknown_target() {
        let mut editor = editor_with_nodes();
        assert_eq!(
            editor.begin_label_edit(LabelTarget::Edge(Id::new("nope"))),
            Err(ModelError::UnknownEdge(Id::new("nope")))
        );
    }

    #[test]
    fn test_renderer_posted_commit() {
        let mut editor = editor_with_nodes();
        let sender = editor.event_sender();
        sender.request_label_commit(LabelTarget::Node(Id::new("B")), "  Done ");
        sender.request_label_commit(LabelTarget::Node(Id::new("A")), "   ");
        sender.request_label_commit(LabelTarget::Node(Id::new("gone")), "x");
        assert_eq!(editor.pump_events(), 1);
        assert_eq!(label_of(&editor, "B"), "Done");
        assert_eq!(label_of(&editor, "A"), "Start");
    }

    #[test]
    fn test_connection_creates_edge() {
        let mut editor = editor_with_nodes();
        editor
            .begin_connection(Id::new("A"), AnchorId::Right)
            .unwrap();
        editor.update_pointer(Point::new(250.0, 40.0));
        assert!(editor.connection_preview().is_some());

        let outcome = editor.finish_connection(Some((Id::new("B"), AnchorId::Left)));
        let ConnectionOutcome::Connected(id) = outcome else {
            panic!("expected a connection, got {outcome:?}");
        };
        assert_eq!(id, "eA-B");
        let edge = editor.diagram().edge(id).unwrap();
        assert_eq!(edge.source_handle(), AnchorId::Right);
        assert_eq!(edge.target_handle(), AnchorId::Left);
        assert_eq!(edge.data().color().to_string(), "#6366f1");
        assert!(editor.gesture().is_none());
    }

    #[test]
    fn test_connection_released_on_canvas_aborts() {
        let mut editor = editor_with_nodes();
        editor.begin_connection(Id::new("A"), AnchorId::Bottom).unwrap();
        assert_eq!(
            editor.finish_connection_at(Point::new(1000.0, 1000.0)),
            ConnectionOutcome::Aborted(AbortReason::NoTarget)
        );
        assert_eq!(editor.diagram().edge_count(), 0);
    }

    #[test]
    fn test_connection_hit_tests_anchor() {
        let mut editor = editor_with_nodes();
        editor.begin_connection(Id::new("A"), AnchorId::Right).unwrap();
        // B's left anchor sits at (300, 25)
        let outcome = editor.finish_connection_at(Point::new(305.0, 28.0));
        assert!(matches!(outcome, ConnectionOutcome::Connected(_)));
    }

    #[test]
    fn test_self_loop_policy() {
        let mut editor = editor_with_nodes();
        editor.begin_connection(Id::new("A"), AnchorId::Right).unwrap();
        assert!(matches!(
            editor.finish_connection(Some((Id::new("A"), AnchorId::Top))),
            ConnectionOutcome::Connected(_)
        ));

        let config = AppConfig::new(
            Default::default(),
            CanvasConfig::new(None, SelfLoopPolicy::Reject),
            Default::default(),
            Default::default(),
        );
        let mut strict = Editor::with_diagram(editor.diagram().clone(), config);
        strict.begin_connection(Id::new("A"), AnchorId::Right).unwrap();
        assert_eq!(
            strict.finish_connection(Some((Id::new("A"), AnchorId::Top))),
            ConnectionOutcome::Aborted(AbortReason::SelfLoop)
        );
    }

    #[test]
    fn test_gestures_are_exclusive() {
        let mut editor = editor_with_nodes();
        editor.begin_marquee(Point::default(), false).unwrap();
        assert_eq!(
            editor.begin_connection(Id::new("A"), AnchorId::Top),
            Err(InteractionError::GestureConflict {
                active: GestureKind::Marquee,
                requested: GestureKind::Connection,
            })
        );
        assert!(editor.drop_shape(Some("circle"), Point::default()).is_err());
        assert_eq!(editor.diagram().node_count(), 2);
        assert_eq!(editor.cancel_gesture(), Some(GestureKind::Marquee));
    }

    #[test]
    fn test_drop_creates_node() {
        let mut editor = Editor::new(AppConfig::default());
        let outcome = editor
            .drop_shape(Some("circle"), Point::new(140.0, 140.0))
            .unwrap();
        let DropOutcome::Created(id) = outcome else {
            panic!("drop ignored");
        };
        let node = editor.diagram().node(id).unwrap();
        assert_eq!(node.position(), Point::new(140.0, 140.0));
        assert_eq!(node.data().shape().kind(), ShapeKind::Circle);
    }

    #[test]
    fn test_drop_uses_viewport_and_snap() {
        let config = AppConfig::new(
            Default::default(),
            CanvasConfig::new(Some(20.0), SelfLoopPolicy::Allow),
            Default::default(),
            Default::default(),
        );
        let mut editor = Editor::new(config);
        editor.pan_by(Point::new(100.0, 0.0));
        editor.begin_shape_drag("process").unwrap();
        let DropOutcome::Created(id) = editor.drop_at(Point::new(147.0, 52.0)) else {
            panic!("drop ignored");
        };
        let node = editor.diagram().node(id).unwrap();
        assert_eq!(node.position(), Point::new(40.0, 60.0));
        assert_eq!(node.data().label(), "Process");
    }

    #[test]
    fn test_drop_catalogue_kind_uses_kind_palette() {
        let mut editor = Editor::new(AppConfig::default());
        let DropOutcome::Created(id) = editor
            .drop_shape(Some("heart"), Point::new(140.0, 140.0))
            .unwrap()
        else {
            panic!("drop ignored");
        };
        let data = editor.diagram().node(id).unwrap().data();
        assert_eq!(data.shape().kind(), ShapeKind::Heart);
        assert_eq!(data.label(), "Heart");
        assert_eq!(data.color().to_string(), "#ec4899");
        assert_eq!(data.border_color().to_string(), "#db2777");
    }

    #[test]
    fn test_click_edge_selection() {
        let mut editor = editor_with_nodes();
        editor
            .add_edge(Edge::new(
                Id::new("eA-B"),
                Id::new("A"),
                Id::new("B"),
                EdgeData::new(),
            ))
            .unwrap();
        let edge = Id::new("eA-B");

        editor.click_node(Id::new("A"), false);
        editor.click_edge(edge, false);
        assert!(editor.selection().contains_edge(edge));
        assert!(!editor.selection().contains_node(Id::new("A")));

        editor.click_node(Id::new("A"), true);
        editor.click_edge(edge, true);
        assert!(!editor.selection().contains_edge(edge));
        assert!(editor.selection().contains_node(Id::new("A")));

        editor.click_edge(Id::new("missing"), false);
        assert_eq!(editor.selection().len(), 1);
    }

    #[test]
    fn test_drop_without_token_is_ignored() {
        let mut editor = Editor::new(AppConfig::default());
        assert_eq!(
            editor.drop_shape(None, Point::default()),
            Ok(DropOutcome::Ignored)
        );
        assert_eq!(
            editor.drop_shape(Some(""), Point::default()),
            Ok(DropOutcome::Ignored)
        );
        assert_eq!(editor.diagram().node_count(), 0);
    }

    #[test]
    fn test_delete_shortcut_cascades() {
        let mut editor = editor_with_nodes();
        editor.begin_connection(Id::new("A"), AnchorId::Right).unwrap();
        editor.finish_connection(Some((Id::new("B"), AnchorId::Left)));

        editor.click_node(Id::new("A"), false);
        assert_eq!(
            editor.handle_key(KeyChord::new(Key::Delete, Modifiers::META)),
            Some(EditorAction::RemoveSelection)
        );
        assert_eq!(editor.diagram().node_count(), 1);
        assert_eq!(editor.diagram().edge_count(), 0);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_export_shortcut_is_reported() {
        let mut editor = editor_with_nodes();
        assert_eq!(
            editor.handle_key(KeyChord::ctrl(Key::Char('e'))),
            Some(EditorAction::Export(ExportFormat::Png))
        );
    }

    #[test]
    fn test_selection_listeners() {
        let mut editor = editor_with_nodes();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        editor.subscribe_selection(move |selection| sink.borrow_mut().push(selection.len()));

        editor.click_node(Id::new("A"), false);
        editor.click_node(Id::new("A"), false);
        editor.click_node(Id::new("B"), true);
        editor.click_canvas();
        assert_eq!(*seen.borrow(), vec![1, 2, 0]);
    }

    #[test]
    fn test_marquee_selection() {
        let mut editor = editor_with_nodes();
        editor.click_node(Id::new("A"), false);
        editor.begin_marquee(Point::new(250.0, -10.0), true).unwrap();
        editor.update_pointer(Point::new(450.0, 100.0));
        assert_eq!(editor.finish_marquee(), Some(1));
        assert_eq!(editor.selection().len(), 2);
    }

    #[test]
    fn test_node_drag_moves_and_respects_lock() {
        let mut editor = editor_with_nodes();
        assert!(editor.begin_node_drag(Id::new("A"), Point::new(10.0, 10.0)).unwrap());
        editor.update_pointer(Point::new(60.0, 110.0));
        assert_eq!(editor.finish_node_drag(), Some(Id::new("A")));
        assert_eq!(
            editor.diagram().node(Id::new("A")).unwrap().position(),
            Point::new(50.0, 100.0)
        );

        editor
            .update_node_style(Id::new("B"), &NodeStylePatch::new().with_locked(true))
            .unwrap();
        assert!(!editor.begin_node_drag(Id::new("B"), Point::new(310.0, 10.0)).unwrap());
        assert!(editor.gesture().is_none());
    }

    #[test]
    fn test_removing_source_cancels_connection() {
        let mut editor = editor_with_nodes();
        editor.begin_connection(Id::new("A"), AnchorId::Right).unwrap();
        editor.remove_entities(&[Id::new("A")], &[]);
        assert!(editor.gesture().is_none());
    }

    #[test]
    fn test_insert_fragment_selects_nodes() {
        let mut editor = editor_with_nodes();
        let fragment = editor.snapshot();
        let inserted = editor
            .insert_fragment(&fragment, Point::new(0.0, 200.0))
            .unwrap();
        assert_eq!(inserted.nodes().len(), 2);
        assert_eq!(editor.selection().len(), 2);
        assert_eq!(editor.diagram().node_count(), 4);
    }
}
