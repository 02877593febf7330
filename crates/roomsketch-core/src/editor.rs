//! Stateful editor façade.

use crate::color::{generate_seed, room_fill};
use crate::config::EngineConfig;
use crate::interaction::{Effect, HandleTarget, InteractionState, PointerEvent, dispatch};
use crate::scene::{Frame, Renderer, build_frame};
use crate::shapes::{EntityId, Line, Rectangle, ShapeId};
use crate::store::ShapeStore;
use kurbo::Point;
use std::mem;

/// Owns the shape store, the interaction state and the selection, and feeds
/// pointer events through [`dispatch`].
#[derive(Debug, Clone, Default)]
pub struct Editor {
    store: ShapeStore,
    state: InteractionState,
    selection: Option<EntityId>,
    snapped: Option<Point>,
    config: EngineConfig,
}

impl Editor {
    /// Create an empty editor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn selection(&self) -> Option<EntityId> {
        self.selection
    }

    /// Vertex highlighted by the last snap, if any.
    pub fn snapped(&self) -> Option<Point> {
        self.snapped
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Feed one pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Effect {
        let transition = dispatch(
            event,
            mem::take(&mut self.state),
            mem::take(&mut self.store),
            &self.config,
        );
        self.store = transition.store;
        self.state = transition.state;
        self.snapped = transition.snapped;

        if let Effect::Select(selection) = transition.effect {
            self.selection = selection;
        }
        // Lines merged into a room no longer exist.
        if self.selection.is_some_and(|s| !self.store.contains(s)) {
            self.selection = None;
        }
        transition.effect
    }

    /// Press at `point`, targeting whichever handle lies under it.
    pub fn press_at(&mut self, point: Point) -> Effect {
        let target = self.hit_test_handles(point);
        self.handle_pointer_event(PointerEvent::Down {
            position: point,
            target,
        })
    }

    /// Add a square rectangle with a fresh fill at `position`.
    pub fn add_rectangle(&mut self, position: Point) -> ShapeId {
        let size = self.config.new_rectangle_size;
        let rect = Rectangle::new(position, size, size, room_fill(generate_seed()));
        let id = self.store.push_rectangle(rect);
        log::info!("Added rectangle {id} at ({}, {})", position.x, position.y);
        id
    }

    /// Add an unattached straight line.
    pub fn add_line(&mut self) -> ShapeId {
        let (start, end) = self.config.new_line;
        let id = self.store.push_line(Line::segment(start, end));
        log::info!("Added line {id}");
        id
    }

    /// Select an entity, or clear the selection with `None`.
    /// Returns false (and clears the selection) for unknown entities.
    pub fn select(&mut self, entity: Option<EntityId>) -> bool {
        match entity {
            Some(e) if !self.store.contains(e) => {
                self.selection = None;
                false
            }
            _ => {
                self.selection = entity;
                true
            }
        }
    }

    /// Drop the polyline being drawn (committed segments stay) or end a
    /// live drag where it is.
    pub fn cancel(&mut self) {
        if self.state != InteractionState::Idle {
            log::debug!("Cancelled {}", self.state.label());
        }
        self.state = InteractionState::Idle;
        self.snapped = None;
    }

    /// The topmost handle or rectangle body under `point`.
    ///
    /// Handles win over bodies; among handles the last painted (rooms, then
    /// lines, then rectangle corners) wins.
    pub fn hit_test_handles(&self, point: Point) -> Option<HandleTarget> {
        let frame = self.frame();
        let handles: Vec<_> = frame.handles().collect();
        let handle = handles
            .into_iter()
            .rev()
            .find(|(center, radius, _)| center.distance(point) <= *radius)
            .map(|(_, _, target)| target);

        handle.or_else(|| {
            self.store
                .rectangles()
                .iter()
                .rev()
                .find(|r| r.contains(point))
                .map(|r| HandleTarget::RectangleBody(r.id()))
        })
    }

    /// Build the current frame.
    pub fn frame(&self) -> Frame {
        build_frame(
            &self.store,
            &self.state,
            self.selection,
            self.snapped,
            &self.config,
        )
    }

    /// Hand the current frame to a renderer.
    pub fn render(&self, renderer: &mut impl Renderer) {
        renderer.build_scene(&self.frame());
    }
}
