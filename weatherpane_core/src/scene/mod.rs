// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained scene elements over a stateful drawing target.
//!
//! A [`DrawingSurface`] turns one-shot [`Canvas`] calls into handles that can
//! be mutated later:
//!
//! ```text
//!   Widget ──create_text()──► DrawingSurface ──create()──► Canvas
//!     │                           │  slot: primary + halo copies
//!     │◄────── ElementId ─────────┘
//!     │
//!     └──update_text(id)──► DrawingSurface ──set_text() x N──► Canvas
//! ```
//!
//! Handles carry a generation, so [`DrawingSurface::clear`] and
//! [`DrawingSurface::delete`] leave every outstanding copy permanently dead
//! and every later mutation through it a no-op.

use std::path::PathBuf;

mod canvas;
mod glyph;
mod id;
mod image_cache;
mod primitive;
mod recording;
mod surface;

pub use canvas::Canvas;
pub use glyph::{GlyphBack, GlyphLayer, GlyphStack, GlyphStackSpec};
pub use id::{ElementId, PrimitiveId};
pub use image_cache::{ImageCache, ImageKey, RasterImage};
pub use primitive::{
    Anchor, ArrowHead, Color, ColorParseError, Coords, Font, FontWeight, Halo, Justify, LineStyle,
    Primitive, ShapeStyle, TextStyle,
};
pub use recording::{CanvasLog, CanvasOp, PrimitiveKind, RecordedPrimitive, RecordingCanvas};
pub use surface::{DrawingSurface, ElementKind};

/// Errors raised while creating or changing scene elements.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// An image could not be opened or decoded.
    #[error("failed to load image `{}`", path.display())]
    Image {
        /// The file that failed.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },
}
