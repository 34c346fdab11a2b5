// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for drawing targets.
//!
//! The engine never rasterizes anything itself. A backend wraps a stateful,
//! retained drawing target (a Tk-style canvas, an immediate-mode renderer
//! with its own item list, an e-ink framebuffer compositor) and implements
//! [`Canvas`]:
//!
//! - **Creation**: [`Canvas::create`] adds a primitive on top of the current
//!   z-order and returns the backend's [`PrimitiveId`] for it.
//! - **Mutation**: text, coordinates and image content are changed in place.
//!   Calls naming an id the backend no longer knows must be ignored.
//! - **Ordering**: [`Canvas::send_to_back`] moves a primitive beneath all
//!   others (used for the background image).
//! - **Removal**: single primitives or everything at once.
//!
//! [`DrawingSurface`](super::DrawingSurface) layers handles, halos, glyph
//! stacks and the image cache on top of this contract.
//! [`RecordingCanvas`](super::RecordingCanvas) is the headless implementation.

use super::id::PrimitiveId;
use super::image_cache::RasterImage;
use super::primitive::{Coords, Primitive};

/// A retained drawing target.
///
/// Both real backends and test doubles implement this trait. All calls happen
/// on the thread that owns the surface.
pub trait Canvas {
    /// Creates a primitive on top of the z-order.
    fn create(&mut self, primitive: &Primitive<'_>) -> PrimitiveId;

    /// Replaces the content of a text primitive.
    fn set_text(&mut self, id: PrimitiveId, text: &str);

    /// Moves a primitive.
    fn set_coords(&mut self, id: PrimitiveId, coords: Coords);

    /// Replaces the pixels shown by an image primitive.
    fn set_image(&mut self, id: PrimitiveId, image: &RasterImage);

    /// Moves a primitive beneath every other primitive.
    fn send_to_back(&mut self, id: PrimitiveId);

    /// Removes one primitive.
    fn delete(&mut self, id: PrimitiveId);

    /// Removes every primitive.
    fn delete_all(&mut self);
}
