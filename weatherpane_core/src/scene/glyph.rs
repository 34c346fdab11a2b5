// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Three-layer glyph stacks for weather emoji and icons.

use std::path::Path;

use kurbo::{Point, Vec2};

use super::id::ElementId;
use super::primitive::{Anchor, Halo, TextStyle};

/// Handle to a back/middle/front stack of elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphStack {
    /// Bottom layer.
    pub back: ElementId,
    /// Middle layer.
    pub middle: ElementId,
    /// Top layer.
    pub front: ElementId,
}

impl GlyphStack {
    /// The three layers, bottom to top.
    #[must_use]
    pub const fn layers(&self) -> [ElementId; 3] {
        [self.back, self.middle, self.front]
    }
}

/// One text layer of a glyph stack.
#[derive(Clone, Copy, Debug)]
pub struct GlyphLayer<'a> {
    /// Glyph text.
    pub text: &'a str,
    /// Offset from the stack origin.
    pub offset: Vec2,
    /// Style, including the per-layer font size.
    pub style: &'a TextStyle,
    /// Optional stroke halo.
    pub halo: Option<&'a Halo>,
}

/// The bottom layer of a glyph stack.
#[derive(Clone, Copy, Debug)]
pub enum GlyphBack<'a> {
    /// A text glyph.
    Text(GlyphLayer<'a>),
    /// A raster icon.
    Image {
        /// Source file.
        path: &'a Path,
        /// Offset from the stack origin.
        offset: Vec2,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Anchor point of the image.
        anchor: Anchor,
    },
}

/// Everything needed to create a [`GlyphStack`].
#[derive(Clone, Copy, Debug)]
pub struct GlyphStackSpec<'a> {
    /// Base position the layer offsets are relative to.
    pub origin: Point,
    /// Bottom layer.
    pub back: GlyphBack<'a>,
    /// Middle layer.
    pub middle: GlyphLayer<'a>,
    /// Top layer.
    pub front: GlyphLayer<'a>,
}
