// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless [`Canvas`] that records every call.
//!
//! [`RecordingCanvas`] keeps the live primitive set and an operation log in a
//! shared [`CanvasLog`], so the log can still be inspected after the canvas
//! has been boxed into a [`DrawingSurface`](super::DrawingSurface).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use super::canvas::Canvas;
use super::id::PrimitiveId;
use super::image_cache::RasterImage;
use super::primitive::{Color, Coords, Primitive};

/// What kind of primitive was created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Text run.
    Text,
    /// Line.
    Line,
    /// Rectangle.
    Rectangle,
    /// Oval.
    Oval,
    /// Raster image.
    Image,
}

/// The recorded state of one live primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedPrimitive {
    /// Kind.
    pub kind: PrimitiveKind,
    /// Current coordinates.
    pub coords: Coords,
    /// Current text, for text primitives.
    pub text: Option<String>,
    /// Fill color, where the primitive has one.
    pub fill: Option<Color>,
    /// Source path, for images.
    pub image: Option<PathBuf>,
}

/// One call made on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasOp {
    /// `create`.
    Create(PrimitiveId, PrimitiveKind),
    /// `set_text`.
    SetText(PrimitiveId, String),
    /// `set_coords`.
    SetCoords(PrimitiveId, Coords),
    /// `set_image`.
    SetImage(PrimitiveId, PathBuf),
    /// `send_to_back`.
    SendToBack(PrimitiveId),
    /// `delete`.
    Delete(PrimitiveId),
    /// `delete_all`.
    DeleteAll,
}

#[derive(Debug, Default)]
struct LogState {
    next_id: u64,
    live: BTreeMap<PrimitiveId, RecordedPrimitive>,
    z_order: Vec<PrimitiveId>,
    ops: Vec<CanvasOp>,
    created: u64,
}

/// Shared view of what a [`RecordingCanvas`] has drawn.
#[derive(Clone, Debug, Default)]
pub struct CanvasLog(Rc<RefCell<LogState>>);

impl CanvasLog {
    /// Number of primitives currently on the canvas.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.0.borrow().live.len()
    }

    /// Number of primitives ever created.
    #[must_use]
    pub fn created_count(&self) -> u64 {
        self.0.borrow().created
    }

    /// A copy of the operation log.
    #[must_use]
    pub fn ops(&self) -> Vec<CanvasOp> {
        self.0.borrow().ops.clone()
    }

    /// Number of logged operations.
    #[must_use]
    pub fn op_count(&self) -> usize {
        self.0.borrow().ops.len()
    }

    /// Forgets the operation log, keeping the live primitives.
    pub fn clear_ops(&self) {
        self.0.borrow_mut().ops.clear();
    }

    /// The recorded state of a live primitive.
    #[must_use]
    pub fn primitive(&self, id: PrimitiveId) -> Option<RecordedPrimitive> {
        self.0.borrow().live.get(&id).cloned()
    }

    /// Live primitives from bottom to top.
    #[must_use]
    pub fn z_order(&self) -> Vec<PrimitiveId> {
        self.0.borrow().z_order.clone()
    }

    /// Text content of every live text primitive, bottom to top.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        let state = self.0.borrow();
        state
            .z_order
            .iter()
            .filter_map(|id| state.live.get(id).and_then(|p| p.text.clone()))
            .collect()
    }

    /// Whether some live text primitive shows exactly `text`.
    #[must_use]
    pub fn shows(&self, text: &str) -> bool {
        self.texts().iter().any(|t| t == text)
    }

    /// Number of live primitives of `kind`.
    #[must_use]
    pub fn count_kind(&self, kind: PrimitiveKind) -> usize {
        self.0
            .borrow()
            .live
            .values()
            .filter(|p| p.kind == kind)
            .count()
    }
}

/// A [`Canvas`] that only records.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    log: CanvasLog,
}

impl RecordingCanvas {
    /// Creates an empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle to this canvas's log.
    #[must_use]
    pub fn log(&self) -> CanvasLog {
        self.log.clone()
    }
}

impl Canvas for RecordingCanvas {
    fn create(&mut self, primitive: &Primitive<'_>) -> PrimitiveId {
        let (kind, text, fill, image) = match *primitive {
            Primitive::Text { text, style, .. } => {
                (PrimitiveKind::Text, Some(text.to_owned()), Some(style.fill), None)
            }
            Primitive::Line { style, .. } => (PrimitiveKind::Line, None, Some(style.fill), None),
            Primitive::Rectangle { style, .. } => {
                (PrimitiveKind::Rectangle, None, style.fill, None)
            }
            Primitive::Oval { style, .. } => (PrimitiveKind::Oval, None, style.fill, None),
            Primitive::Image { image, .. } => {
                (PrimitiveKind::Image, None, None, Some(image.key().path.clone()))
            }
        };
        let mut state = self.log.0.borrow_mut();
        let id = PrimitiveId(state.next_id);
        state.next_id += 1;
        state.created += 1;
        state.live.insert(
            id,
            RecordedPrimitive {
                kind,
                coords: primitive.coords(),
                text,
                fill,
                image,
            },
        );
        state.z_order.push(id);
        state.ops.push(CanvasOp::Create(id, kind));
        id
    }

    fn set_text(&mut self, id: PrimitiveId, text: &str) {
        let mut state = self.log.0.borrow_mut();
        if let Some(p) = state.live.get_mut(&id) {
            p.text = Some(text.to_owned());
        }
        state.ops.push(CanvasOp::SetText(id, text.to_owned()));
    }

    fn set_coords(&mut self, id: PrimitiveId, coords: Coords) {
        let mut state = self.log.0.borrow_mut();
        if let Some(p) = state.live.get_mut(&id) {
            p.coords = coords;
        }
        state.ops.push(CanvasOp::SetCoords(id, coords));
    }

    fn set_image(&mut self, id: PrimitiveId, image: &RasterImage) {
        let path = image.key().path.clone();
        let mut state = self.log.0.borrow_mut();
        if let Some(p) = state.live.get_mut(&id) {
            p.image = Some(path.clone());
        }
        state.ops.push(CanvasOp::SetImage(id, path));
    }

    fn send_to_back(&mut self, id: PrimitiveId) {
        let mut state = self.log.0.borrow_mut();
        if let Some(pos) = state.z_order.iter().position(|p| *p == id) {
            state.z_order.remove(pos);
            state.z_order.insert(0, id);
        }
        state.ops.push(CanvasOp::SendToBack(id));
    }

    fn delete(&mut self, id: PrimitiveId) {
        let mut state = self.log.0.borrow_mut();
        state.live.remove(&id);
        state.z_order.retain(|p| *p != id);
        state.ops.push(CanvasOp::Delete(id));
    }

    fn delete_all(&mut self) {
        let mut state = self.log.0.borrow_mut();
        state.live.clear();
        state.z_order.clear();
        state.ops.push(CanvasOp::DeleteAll);
    }
}
