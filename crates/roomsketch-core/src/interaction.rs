//! Pointer-event dispatch.
//!
//! [`dispatch`] is the single entry point for pointer input. It takes the
//! event, the current [`InteractionState`] and the store by value and returns
//! the next state and store, so every transition is a plain function call
//! that can be tested without a rendering surface.

use crate::attachment::{find_loop, resolve_attachment};
use crate::color::{generate_seed, room_fill};
use crate::config::EngineConfig;
use crate::placement::{drag_to, resize_corner};
use crate::polygon::{DrawingSession, Step};
use crate::shapes::{Corner, EntityId, Line, ShapeId};
use crate::snap::{SnapResult, line_vertices, snap};
use crate::store::ShapeStore;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer input in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Press. `target` names the handle under the pointer, if any.
    Down {
        position: Point,
        target: Option<HandleTarget>,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
    },
}

/// A draggable part of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleTarget {
    RectangleBody(ShapeId),
    RectangleCorner(ShapeId, Corner),
    /// A vertex of an open line or a room.
    LineVertex { line: ShapeId, index: usize },
}

impl HandleTarget {
    /// The entity the handle belongs to.
    pub fn entity(self) -> EntityId {
        match self {
            HandleTarget::RectangleBody(id) | HandleTarget::RectangleCorner(id, _) => {
                EntityId::Rectangle(id)
            }
            HandleTarget::LineVertex { line, .. } => EntityId::Line(line),
        }
    }
}

/// Which part of a rectangle is being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectangleGrip {
    /// The body, grabbed at `offset` from the top-left corner.
    Body { offset: Vec2 },
    Corner(Corner),
}

/// What the editor is doing. Exactly one shape can be live at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    DrawingPolyline(DrawingSession),
    DraggingRectangle { id: ShapeId, grip: RectangleGrip },
    DraggingVertex { line: ShapeId, index: usize },
}

impl InteractionState {
    /// Short name for logging.
    pub fn label(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::DrawingPolyline(_) => "drawing",
            InteractionState::DraggingRectangle { .. } => "dragging rectangle",
            InteractionState::DraggingVertex { .. } => "dragging vertex",
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            InteractionState::DraggingRectangle { .. } | InteractionState::DraggingVertex { .. }
        )
    }
}

/// Side effect of a transition that the owner may want to react to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Effect {
    #[default]
    None,
    /// The selection changes to the given entity (or is cleared).
    Select(Option<EntityId>),
    /// A room was added to the store.
    RoomCreated(ShapeId),
}

/// Result of [`dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub store: ShapeStore,
    pub state: InteractionState,
    /// Vertex the pointer snapped onto, for highlighting.
    pub snapped: Option<Point>,
    pub effect: Effect,
}

impl Transition {
    fn new(store: ShapeStore, state: InteractionState) -> Self {
        Self {
            store,
            state,
            snapped: None,
            effect: Effect::None,
        }
    }

    fn snapped(mut self, result: SnapResult) -> Self {
        self.snapped = result.snapped_point();
        self
    }

    fn effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }
}

/// Apply one pointer event.
pub fn dispatch(
    event: PointerEvent,
    state: InteractionState,
    mut store: ShapeStore,
    config: &EngineConfig,
) -> Transition {
    let from = state.label();
    let transition = match (state, event) {
        (InteractionState::Idle, PointerEvent::Down { position, target: None }) => {
            let snapped = snap_to_lines(position, &store, config);
            let session = DrawingSession::start(snapped.point);
            Transition::new(store, InteractionState::DrawingPolyline(session))
                .snapped(snapped)
                .effect(Effect::Select(None))
        }
        (InteractionState::Idle, PointerEvent::Down { position, target: Some(target) }) => {
            begin_drag(target, position, store)
        }
        (InteractionState::Idle, PointerEvent::Move { position } | PointerEvent::Up { position }) => {
            let snapped = snap_to_lines(position, &store, config);
            Transition::new(store, InteractionState::Idle).snapped(snapped)
        }

        (InteractionState::DrawingPolyline(session), PointerEvent::Down { position, target }) => {
            match target {
                None => {
                    let snapped = snap_to_lines(position, &store, config);
                    let step = session.press(snapped.point, config.closure_tolerance, &mut store);
                    after_step(step, store).snapped(snapped)
                }
                Some(target) if !session.pressed => {
                    log::debug!(
                        "Abandoning polyline with {} committed segments",
                        session.committed.len()
                    );
                    begin_drag(target, position, store)
                }
                Some(_) => Transition::new(store, InteractionState::DrawingPolyline(session)),
            }
        }
        (InteractionState::DrawingPolyline(mut session), PointerEvent::Move { position }) => {
            let snapped = snap_to_lines(position, &store, config);
            session.hover(position, snapped);
            Transition::new(store, InteractionState::DrawingPolyline(session)).snapped(snapped)
        }
        (InteractionState::DrawingPolyline(session), PointerEvent::Up { position }) => {
            let snapped = snap_to_lines(position, &store, config);
            if session.pressed {
                let step = session.release(snapped, &mut store);
                after_step(step, store).snapped(snapped)
            } else {
                Transition::new(store, InteractionState::DrawingPolyline(session)).snapped(snapped)
            }
        }

        (InteractionState::DraggingRectangle { id, grip }, PointerEvent::Move { position }) => {
            move_rectangle(&mut store, id, grip, position, false);
            Transition::new(store, InteractionState::DraggingRectangle { id, grip })
        }
        (InteractionState::DraggingRectangle { id, grip }, PointerEvent::Up { position }) => {
            move_rectangle(&mut store, id, grip, position, true);
            Transition::new(store, InteractionState::Idle)
        }

        (InteractionState::DraggingVertex { line, index }, PointerEvent::Move { position }) => {
            move_vertex(&mut store, line, index, position, config);
            Transition::new(store, InteractionState::DraggingVertex { line, index })
        }
        (InteractionState::DraggingVertex { line, index }, PointerEvent::Up { position }) => {
            move_vertex(&mut store, line, index, position, config);
            let effect = fill_attachment_loop(&mut store, line, config)
                .map_or(Effect::None, Effect::RoomCreated);
            Transition::new(store, InteractionState::Idle).effect(effect)
        }

        // A second press while a drag is live is ignored.
        (state @ InteractionState::DraggingRectangle { .. }, PointerEvent::Down { .. })
        | (state @ InteractionState::DraggingVertex { .. }, PointerEvent::Down { .. }) => {
            Transition::new(store, state)
        }
    };

    if transition.state.label() != from {
        log::debug!("Interaction {} -> {}", from, transition.state.label());
    }
    transition
}

fn snap_to_lines(position: Point, store: &ShapeStore, config: &EngineConfig) -> SnapResult {
    snap(position, line_vertices(store.lines()), config.snap_threshold)
}

fn after_step(step: Step, store: ShapeStore) -> Transition {
    match step {
        Step::Continue(session) => {
            Transition::new(store, InteractionState::DrawingPolyline(session))
        }
        Step::Closed(id) => {
            Transition::new(store, InteractionState::Idle).effect(Effect::RoomCreated(id))
        }
    }
}

/// Enter the drag state for `target`. Unknown targets leave the editor idle.
fn begin_drag(target: HandleTarget, position: Point, store: ShapeStore) -> Transition {
    let state = match target {
        HandleTarget::RectangleBody(id) => store.rectangle(id).map(|rect| {
            InteractionState::DraggingRectangle {
                id,
                grip: RectangleGrip::Body {
                    offset: position - rect.position,
                },
            }
        }),
        HandleTarget::RectangleCorner(id, corner) => {
            store.rectangle(id).map(|_| InteractionState::DraggingRectangle {
                id,
                grip: RectangleGrip::Corner(corner),
            })
        }
        HandleTarget::LineVertex { line, index } => store
            .line(line)
            .filter(|l| index < l.points.len())
            .map(|_| InteractionState::DraggingVertex { line, index }),
    };

    match state {
        Some(state) => {
            Transition::new(store, state).effect(Effect::Select(Some(target.entity())))
        }
        None => {
            log::warn!("Pointer down on unknown handle {target:?}");
            Transition::new(store, InteractionState::Idle)
        }
    }
}

fn move_rectangle(store: &mut ShapeStore, id: ShapeId, grip: RectangleGrip, pointer: Point, finish: bool) {
    let Some(rect) = store.rectangle(id) else {
        return;
    };
    let mut updated = match grip {
        RectangleGrip::Body { offset } => {
            let placement = drag_to(rect, pointer - offset, store.rectangles());
            let mut moved = rect.clone();
            moved.position = placement.position;
            moved
        }
        RectangleGrip::Corner(corner) => resize_corner(rect, corner, pointer),
    };
    if finish {
        updated.clamp_size();
    }
    store.replace_rectangle(updated);
}

/// Move one vertex and, for an endpoint of an open line, recompute its attachment.
fn move_vertex(store: &mut ShapeStore, line: ShapeId, index: usize, pointer: Point, config: &EngineConfig) {
    let Some(mut updated) = store.line(line).cloned() else {
        return;
    };
    if !updated.points.set(index, pointer) {
        return;
    }
    if let Some(endpoint) = updated.endpoint_at(index) {
        let target = resolve_attachment(
            pointer,
            store.rectangles(),
            store.lines(),
            Some(line),
            config.attach_tolerance,
        );
        updated.set_attachment(endpoint, target);
    }
    store.replace_line(updated);
}

/// Fill the attachment loop through `line`, once per set of member lines.
fn fill_attachment_loop(store: &mut ShapeStore, line: ShapeId, config: &EngineConfig) -> Option<ShapeId> {
    let found = find_loop(line, store.lines(), config.attach_tolerance)?;
    if store.has_loop_room(&found.lines) {
        return None;
    }

    let mut members = found.lines;
    members.sort();
    let count = members.len();
    let mut room = Line::room(found.vertices, room_fill(generate_seed()));
    room.loop_members = members;
    let id = store.push_line(room);
    log::info!("Filled attachment loop of {count} lines as room {id}");
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::shapes::{Endpoint, Rectangle};

    fn run(events: &[PointerEvent], mut state: InteractionState, mut store: ShapeStore) -> Transition {
        let config = EngineConfig::default();
        let mut last = Transition::new(ShapeStore::new(), InteractionState::Idle);
        for event in events {
            last = dispatch(*event, state, store, &config);
            state = last.state.clone();
            store = last.store.clone();
        }
        last
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            target: None,
        }
    }

    fn down_on(x: f64, y: f64, target: HandleTarget) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            target: Some(target),
        }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
        }
    }

    fn clicks(points: &[(f64, f64)]) -> Vec<PointerEvent> {
        points.iter().flat_map(|&(x, y)| [down(x, y), up(x, y)]).collect()
    }

    #[test]
    fn test_click_polygon_closes_room() {
        let events = clicks(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (2.0, 2.0)]);
        let t = run(&events, InteractionState::Idle, ShapeStore::new());

        assert_eq!(t.state, InteractionState::Idle);
        assert!(matches!(t.effect, Effect::RoomCreated(_)));
        assert!(t.store.lines().is_empty());
        assert_eq!(t.store.rooms().len(), 1);
        let room = &t.store.rooms()[0];
        assert_eq!(room.points.as_flat(), &[0.0, 0.0, 100.0, 0.0, 100.0, 100.0]);
        let fill = room.fill.expect("rooms are filled").to_string();
        assert!(fill.starts_with("rgba(") && fill.ends_with(",0.24)"));
    }

    #[test]
    fn test_drawing_rubber_band_and_snap_highlight() {
        let mut events = clicks(&[(0.0, 0.0), (100.0, 0.0)]);
        events.push(mv(96.0, 3.0));
        let t = run(&events, InteractionState::Idle, ShapeStore::new());

        assert_eq!(t.snapped, Some(Point::new(100.0, 0.0)));
        let InteractionState::DrawingPolyline(session) = t.state else {
            panic!("expected drawing state");
        };
        assert_eq!(session.preview, Some((Point::new(100.0, 0.0), Point::new(100.0, 0.0))));
    }

    #[test]
    fn test_rectangle_drag_resolves_collision() {
        let mut store = ShapeStore::new();
        store.push_rectangle(Rectangle::new(Point::ZERO, 100.0, 100.0, Rgba::outline()));
        let second = store.push_rectangle(Rectangle::new(Point::ZERO, 100.0, 100.0, Rgba::outline()));

        let events = [
            down_on(10.0, 10.0, HandleTarget::RectangleBody(second)),
            mv(60.0, 60.0),
            up(60.0, 60.0),
        ];
        let t = run(&events, InteractionState::Idle, store);

        assert_eq!(t.state, InteractionState::Idle);
        let rect = t.store.rectangle(second).expect("rectangle exists");
        assert!((rect.position.x - 100.0).abs() < f64::EPSILON);
        assert!((rect.position.y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_corner_drag_clamps_size() {
        let mut store = ShapeStore::new();
        let id = store.push_rectangle(Rectangle::new(Point::new(100.0, 100.0), 50.0, 50.0, Rgba::outline()));

        let events = [
            down_on(150.0, 150.0, HandleTarget::RectangleCorner(id, Corner::BottomRight)),
            mv(20.0, 400.0),
            up(20.0, 400.0),
        ];
        let t = run(&events, InteractionState::Idle, store);

        let rect = t.store.rectangle(id).expect("rectangle exists");
        assert_eq!(rect.position, Point::new(100.0, 100.0));
        assert!((rect.width - 5.0).abs() < f64::EPSILON);
        assert!((rect.height - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_endpoint_drag_updates_attachment() {
        let mut store = ShapeStore::new();
        let rect = store.push_rectangle(Rectangle::new(Point::new(200.0, 200.0), 50.0, 50.0, Rgba::outline()));
        let line = store.push_line(Line::segment(Point::ZERO, Point::new(100.0, 0.0)));
        let handle = HandleTarget::LineVertex { line, index: 1 };

        let t = run(&[down_on(100.0, 0.0, handle), mv(210.0, 210.0)], InteractionState::Idle, store);
        let moved = t.store.line(line).expect("line exists");
        assert_eq!(moved.points.last(), Some(Point::new(210.0, 210.0)));
        assert_eq!(moved.attachment(Endpoint::End), Some(EntityId::Rectangle(rect)));

        let t = run(&[mv(500.0, 500.0), up(500.0, 500.0)], t.state, t.store);
        let moved = t.store.line(line).expect("line exists");
        assert_eq!(moved.attachment(Endpoint::End), None);
        assert_eq!(t.state, InteractionState::Idle);
    }

    #[test]
    fn test_attached_lines_forming_loop_fill_once() {
        let mut store = ShapeStore::new();
        let a = store.push_line(Line::segment(Point::new(0.0, 0.0), Point::new(100.0, 0.0)));
        let b = store.push_line(Line::segment(Point::new(100.0, 3.0), Point::new(100.0, 100.0)));
        let c = store.push_line(Line::segment(Point::new(97.0, 100.0), Point::new(0.0, 50.0)));

        let drag = |line, x, y| {
            [
                down_on(x, y, HandleTarget::LineVertex { line, index: 1 }),
                mv(x, y),
                up(x, y),
            ]
        };
        let mut events = Vec::new();
        events.extend(drag(a, 100.0, 1.0));
        events.extend(drag(b, 99.0, 99.0));
        let t = run(&events, InteractionState::Idle, store);
        assert!(t.store.rooms().is_empty());

        let t = run(&drag(c, 2.0, 2.0), t.state, t.store);
        assert!(matches!(t.effect, Effect::RoomCreated(_)));
        assert_eq!(t.store.rooms().len(), 1);
        let room = &t.store.rooms()[0];
        assert_eq!(room.points.as_flat(), &[2.0, 2.0, 100.0, 1.0, 99.0, 99.0]);
        assert_eq!(t.store.lines().len(), 3);

        let t = run(&drag(c, 1.0, 1.0), t.state, t.store);
        assert_eq!(t.effect, Effect::None);
        assert_eq!(t.store.rooms().len(), 1);
    }

    #[test]
    fn test_moved_away_target_breaks_loop() {
        let mut store = ShapeStore::new();
        let a = store.push_line(Line::segment(Point::new(0.0, 0.0), Point::new(1000.0, 0.0)));
        let b = store.push_line(Line::segment(Point::new(1000.0, 50.0), Point::new(500.0, 500.0)));
        let c = store.push_line(Line::segment(Point::new(500.0, 600.0), Point::new(300.0, 300.0)));

        let drag = |line, index, x, y| {
            [
                down_on(x, y, HandleTarget::LineVertex { line, index }),
                mv(x, y),
                up(x, y),
            ]
        };
        let mut events = Vec::new();
        // c's end attaches to a's start, then a's start moves far away.
        events.extend(drag(c, 1, 2.0, 2.0));
        events.extend(drag(a, 0, 0.0, 100.0));
        events.extend(drag(a, 1, 1000.0, 45.0));
        let t = run(&events, InteractionState::Idle, store);
        let c_line = t.store.line(c).expect("line exists");
        assert_eq!(c_line.attachment(Endpoint::End), Some(EntityId::Line(a)));

        let t = run(&drag(b, 1, 500.0, 595.0), t.state, t.store);
        assert_eq!(t.effect, Effect::None);
        assert!(t.store.rooms().is_empty());
        assert_eq!(t.store.lines().len(), 3);
    }

    #[test]
    fn test_rectangle_attachment_ends_loop_walk() {
        let mut store = ShapeStore::new();
        let rect = store.push_rectangle(Rectangle::new(Point::new(-10.0, -10.0), 20.0, 20.0, Rgba::outline()));
        let a = store.push_line(Line::segment(Point::new(0.0, 0.0), Point::new(100.0, 0.0)));
        let b = store.push_line(Line::segment(Point::new(100.0, 3.0), Point::new(100.0, 100.0)));
        let c = store.push_line(Line::segment(Point::new(97.0, 100.0), Point::new(0.0, 50.0)));

        let drag = |line, x, y| {
            [
                down_on(x, y, HandleTarget::LineVertex { line, index: 1 }),
                mv(x, y),
                up(x, y),
            ]
        };
        let mut events = Vec::new();
        events.extend(drag(a, 100.0, 1.0));
        events.extend(drag(b, 99.0, 99.0));
        events.extend(drag(c, 2.0, 2.0));
        let t = run(&events, InteractionState::Idle, store);

        let c_line = t.store.line(c).expect("line exists");
        assert_eq!(c_line.attachment(Endpoint::End), Some(EntityId::Rectangle(rect)));
        assert_eq!(t.effect, Effect::None);
        assert!(t.store.rooms().is_empty());
    }

    #[test]
    fn test_room_vertex_drag() {
        let events = clicks(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (2.0, 2.0)]);
        let t = run(&events, InteractionState::Idle, ShapeStore::new());
        let room = t.store.rooms()[0].id();

        let handle = HandleTarget::LineVertex { line: room, index: 2 };
        let t = run(&[down_on(100.0, 100.0, handle), mv(120.0, 130.0), up(120.0, 130.0)], t.state, t.store);
        let room = t.store.line(room).expect("room exists");
        assert!(room.is_closed());
        assert_eq!(room.points.get(2), Some(Point::new(120.0, 130.0)));
        assert_eq!(room.attachment(Endpoint::End), None);
    }

    #[test]
    fn test_targeted_down_abandons_idle_polyline() {
        let mut store = ShapeStore::new();
        let rect = store.push_rectangle(Rectangle::new(Point::new(300.0, 300.0), 50.0, 50.0, Rgba::outline()));
        let mut events = clicks(&[(0.0, 0.0), (100.0, 0.0)]);
        events.push(down_on(310.0, 310.0, HandleTarget::RectangleBody(rect)));
        let t = run(&events, InteractionState::Idle, store);

        assert!(matches!(t.state, InteractionState::DraggingRectangle { id, .. } if id == rect));
        assert_eq!(t.effect, Effect::Select(Some(EntityId::Rectangle(rect))));
        assert_eq!(t.store.lines().len(), 1);
    }

    #[test]
    fn test_targeted_down_while_pressed_is_ignored() {
        let mut store = ShapeStore::new();
        let rect = store.push_rectangle(Rectangle::new(Point::new(300.0, 300.0), 50.0, 50.0, Rgba::outline()));
        let held = run(&[down(0.0, 0.0), mv(40.0, 40.0)], InteractionState::Idle, store);
        let InteractionState::DrawingPolyline(session) = &held.state else {
            panic!("expected drawing state");
        };
        assert!(session.pressed);

        let t = run(
            &[down_on(310.0, 310.0, HandleTarget::RectangleBody(rect))],
            held.state.clone(),
            held.store.clone(),
        );
        assert_eq!(t.state, held.state);
        assert_eq!(t.store, held.store);
        assert_eq!(t.effect, Effect::None);
    }

    #[test]
    fn test_presses_during_drag_are_ignored() {
        let mut store = ShapeStore::new();
        let rect = store.push_rectangle(Rectangle::new(Point::ZERO, 50.0, 50.0, Rgba::outline()));
        let events = [down_on(10.0, 10.0, HandleTarget::RectangleBody(rect)), down(400.0, 400.0)];
        let t = run(&events, InteractionState::Idle, store);

        assert!(t.state.is_dragging());
        assert!(t.store.lines().is_empty());
    }

    #[test]
    fn test_unknown_handle_stays_idle() {
        let t = run(
            &[down_on(0.0, 0.0, HandleTarget::RectangleBody(uuid::Uuid::new_v4()))],
            InteractionState::Idle,
            ShapeStore::new(),
        );
        assert_eq!(t.state, InteractionState::Idle);
        assert_eq!(t.effect, Effect::None);
    }
}
