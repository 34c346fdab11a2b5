// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays element storage over a [`Canvas`].

use std::fmt;
use std::path::Path;

use kurbo::{Point, Rect, Size, Vec2};
use tracing::debug;

use super::SurfaceError;
use super::canvas::Canvas;
use super::glyph::{GlyphBack, GlyphLayer, GlyphStack, GlyphStackSpec};
use super::id::{ElementId, PrimitiveId};
use super::image_cache::ImageCache;
use super::primitive::{Anchor, Coords, Halo, LineStyle, Primitive, ShapeStyle, TextStyle};

/// What an element was created as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Text, possibly haloed.
    Text,
    /// Line, possibly haloed.
    Line,
    /// Rectangle.
    Rectangle,
    /// Oval.
    Oval,
    /// Raster image.
    Image,
}

/// A halo copy that follows its primary at a fixed offset.
#[derive(Clone, Copy, Debug)]
struct Backing {
    id: PrimitiveId,
    offset: Vec2,
}

/// Retained elements drawn on a [`Canvas`].
///
/// Elements are addressed by [`ElementId`] handles. Internally each element
/// occupies a slot in parallel arrays holding its primary primitive and its
/// halo backing primitives. Deleted elements are recycled via a free list, and
/// generation counters keep stale handles dead.
///
/// Every mutation on a dead handle is a silent no-op: widgets may still hold
/// handles from before a [`clear`](Self::clear).
pub struct DrawingSurface {
    canvas: Box<dyn Canvas>,
    size: Size,
    images: ImageCache,

    // -- Slots --
    kind: Vec<ElementKind>,
    primary: Vec<PrimitiveId>,
    backing: Vec<Vec<Backing>>,

    // -- Allocation --
    generation: Vec<u32>,
    live: Vec<bool>,
    free_list: Vec<u32>,
    len: u32,

    // -- Counters --
    live_elements: usize,
    live_primitives: usize,
}

impl fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("size", &self.size)
            .field("images", &self.images)
            .field("live_elements", &self.live_elements)
            .field("live_primitives", &self.live_primitives)
            .finish_non_exhaustive()
    }
}

impl DrawingSurface {
    /// Creates an empty surface of `size` pixels drawing onto `canvas`.
    #[must_use]
    pub fn new(canvas: Box<dyn Canvas>, size: Size) -> Self {
        Self::with_image_cache(canvas, size, ImageCache::default())
    }

    /// Creates an empty surface with a preconfigured image cache.
    #[must_use]
    pub fn with_image_cache(canvas: Box<dyn Canvas>, size: Size, images: ImageCache) -> Self {
        Self {
            canvas,
            size,
            images,
            kind: Vec::new(),
            primary: Vec::new(),
            backing: Vec::new(),
            generation: Vec::new(),
            live: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            live_elements: 0,
            live_primitives: 0,
        }
    }

    /// Surface size in pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The image cache.
    #[must_use]
    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    // -- Allocation API --

    fn alloc(
        &mut self,
        kind: ElementKind,
        primary: PrimitiveId,
        backing: Vec<Backing>,
    ) -> ElementId {
        self.live_elements += 1;
        self.live_primitives += 1 + backing.len();
        let idx = if let Some(idx) = self.free_list.pop() {
            let slot = idx as usize;
            self.kind[slot] = kind;
            self.primary[slot] = primary;
            self.backing[slot] = backing;
            self.live[slot] = true;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.kind.push(kind);
            self.primary.push(primary);
            self.backing.push(backing);
            self.generation.push(0);
            self.live.push(true);
            idx
        };
        ElementId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    fn release(&mut self, idx: u32) {
        let slot = idx as usize;
        self.live[slot] = false;
        // Bump generation so old handles immediately fail validation.
        self.generation[slot] = self.generation[slot].wrapping_add(1);
        self.live_elements -= 1;
        self.live_primitives -= 1 + self.backing[slot].len();
        self.backing[slot].clear();
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live element.
    #[must_use]
    pub fn is_alive(&self, id: ElementId) -> bool {
        let slot = id.idx as usize;
        id.idx < self.len && self.live[slot] && self.generation[slot] == id.generation
    }

    /// Returns whether all three layers of a glyph stack are live.
    #[must_use]
    pub fn is_stack_alive(&self, stack: &GlyphStack) -> bool {
        stack.layers().into_iter().all(|id| self.is_alive(id))
    }

    /// Number of live elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.live_elements
    }

    /// Number of live canvas primitives, halo copies included.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.live_primitives
    }

    /// Kind of a live element.
    #[must_use]
    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.is_alive(id).then(|| self.kind[id.idx as usize])
    }

    /// The primary primitive of a live element.
    #[must_use]
    pub fn primary(&self, id: ElementId) -> Option<PrimitiveId> {
        self.is_alive(id).then(|| self.primary[id.idx as usize])
    }

    /// Halo primitives of a live element, in creation order.
    #[must_use]
    pub fn backing(&self, id: ElementId) -> Vec<PrimitiveId> {
        if !self.is_alive(id) {
            return Vec::new();
        }
        self.backing[id.idx as usize].iter().map(|b| b.id).collect()
    }

    // -- Creation API --

    /// Creates a text element, with halo copies beneath it when `halo` is set.
    pub fn create_text(
        &mut self,
        text: &str,
        at: Point,
        style: &TextStyle,
        halo: Option<&Halo>,
    ) -> ElementId {
        let backing = match halo {
            Some(halo) => {
                let halo_style = TextStyle {
                    fill: halo.color,
                    ..style.clone()
                };
                halo.offsets()
                    .into_iter()
                    .map(|offset| Backing {
                        id: self.canvas.create(&Primitive::Text {
                            at: at + offset,
                            text,
                            style: &halo_style,
                        }),
                        offset,
                    })
                    .collect()
            }
            None => Vec::new(),
        };
        let primary = self.canvas.create(&Primitive::Text { at, text, style });
        self.alloc(ElementKind::Text, primary, backing)
    }

    /// Creates a line element, with halo copies beneath it when `halo` is set.
    pub fn create_line(
        &mut self,
        from: Point,
        to: Point,
        style: &LineStyle,
        halo: Option<&Halo>,
    ) -> ElementId {
        let backing = match halo {
            Some(halo) => {
                let halo_style = LineStyle {
                    fill: halo.color,
                    ..*style
                };
                halo.offsets()
                    .into_iter()
                    .map(|offset| Backing {
                        id: self.canvas.create(&Primitive::Line {
                            from: from + offset,
                            to: to + offset,
                            style: &halo_style,
                        }),
                        offset,
                    })
                    .collect()
            }
            None => Vec::new(),
        };
        let primary = self.canvas.create(&Primitive::Line { from, to, style });
        self.alloc(ElementKind::Line, primary, backing)
    }

    /// Creates a rectangle element.
    pub fn create_rectangle(&mut self, rect: Rect, style: &ShapeStyle) -> ElementId {
        let primary = self.canvas.create(&Primitive::Rectangle { rect, style });
        self.alloc(ElementKind::Rectangle, primary, Vec::new())
    }

    /// Creates an oval element inscribed in `rect`.
    pub fn create_oval(&mut self, rect: Rect, style: &ShapeStyle) -> ElementId {
        let primary = self.canvas.create(&Primitive::Oval { rect, style });
        self.alloc(ElementKind::Oval, primary, Vec::new())
    }

    /// Creates an image element from `path` resized to `width` x `height`.
    ///
    /// Decoded images come from the cache when the same (path, size) was
    /// loaded before.
    pub fn create_image(
        &mut self,
        path: &Path,
        at: Point,
        width: u32,
        height: u32,
        anchor: Anchor,
    ) -> Result<ElementId, SurfaceError> {
        let image = self.images.load(path, width, height)?;
        let primary = self.canvas.create(&Primitive::Image {
            at,
            anchor,
            image: &image,
        });
        Ok(self.alloc(ElementKind::Image, primary, Vec::new()))
    }

    /// Creates a full-surface image at the origin, beneath everything else.
    pub fn create_background(&mut self, path: &Path) -> Result<ElementId, SurfaceError> {
        let (width, height) = self.pixel_size();
        let id = self.create_image(path, Point::ORIGIN, width, height, Anchor::NorthWest)?;
        self.canvas.send_to_back(self.primary[id.idx as usize]);
        Ok(id)
    }

    /// Creates a back/middle/front glyph stack.
    ///
    /// An image back layer is decoded before anything is drawn, so a load
    /// failure leaves the surface untouched.
    pub fn create_glyph_stack(
        &mut self,
        spec: &GlyphStackSpec<'_>,
    ) -> Result<GlyphStack, SurfaceError> {
        let back = match spec.back {
            GlyphBack::Text(layer) => self.create_layer(spec.origin, &layer),
            GlyphBack::Image {
                path,
                offset,
                width,
                height,
                anchor,
            } => self.create_image(path, spec.origin + offset, width, height, anchor)?,
        };
        let middle = self.create_layer(spec.origin, &spec.middle);
        let front = self.create_layer(spec.origin, &spec.front);
        Ok(GlyphStack {
            back,
            middle,
            front,
        })
    }

    fn create_layer(&mut self, origin: Point, layer: &GlyphLayer<'_>) -> ElementId {
        self.create_text(layer.text, origin + layer.offset, layer.style, layer.halo)
    }

    // -- Mutation API --

    /// Replaces the text of an element and all of its halo copies.
    pub fn update_text(&mut self, id: ElementId, text: &str) {
        if !self.is_alive(id) {
            return;
        }
        let slot = id.idx as usize;
        for b in &self.backing[slot] {
            self.canvas.set_text(b.id, text);
        }
        self.canvas.set_text(self.primary[slot], text);
    }

    /// Moves a single-point element (text, image) to `at`.
    ///
    /// Halo copies keep their offsets.
    pub fn move_to(&mut self, id: ElementId, at: Point) {
        self.set_coords(id, Coords::At(at));
    }

    /// Moves a two-point element (line endpoints, rectangle or oval corners).
    pub fn move_segment(&mut self, id: ElementId, a: Point, b: Point) {
        self.set_coords(id, Coords::Span(a, b));
    }

    fn set_coords(&mut self, id: ElementId, coords: Coords) {
        if !self.is_alive(id) {
            return;
        }
        let slot = id.idx as usize;
        for b in &self.backing[slot] {
            self.canvas.set_coords(b.id, coords.offset(b.offset));
        }
        self.canvas.set_coords(self.primary[slot], coords);
    }

    /// Swaps the pixels of an image element.
    ///
    /// On a dead handle nothing is decoded and `Ok(())` is returned.
    pub fn change_image(
        &mut self,
        id: ElementId,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), SurfaceError> {
        if !self.is_alive(id) {
            return Ok(());
        }
        let image = self.images.load(path, width, height)?;
        self.canvas.set_image(self.primary[id.idx as usize], &image);
        Ok(())
    }

    /// Swaps a background element to a new full-surface image.
    pub fn change_background_image(
        &mut self,
        id: ElementId,
        path: &Path,
    ) -> Result<(), SurfaceError> {
        let (width, height) = self.pixel_size();
        self.change_image(id, path, width, height)
    }

    // -- Removal API --

    /// Deletes an element and its halo copies. Dead handles are ignored.
    pub fn delete(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        let slot = id.idx as usize;
        for b in &self.backing[slot] {
            self.canvas.delete(b.id);
        }
        self.canvas.delete(self.primary[slot]);
        self.release(id.idx);
    }

    /// Deletes every layer of a glyph stack.
    pub fn delete_glyph_stack(&mut self, stack: &GlyphStack) {
        for id in stack.layers() {
            self.delete(id);
        }
    }

    /// Removes everything from the canvas and kills every live handle.
    pub fn clear(&mut self) {
        self.canvas.delete_all();
        let mut killed = 0_usize;
        for idx in 0..self.len {
            if self.live[idx as usize] {
                self.release(idx);
                killed += 1;
            }
        }
        debug!(elements = killed, "surface cleared");
    }

    fn pixel_size(&self) -> (u32, u32) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "surface sizes are far below u32::MAX and clamped at zero"
        )]
        let to_px = |v: f64| v.round().max(0.0) as u32;
        (to_px(self.size.width), to_px(self.size.height))
    }
}
