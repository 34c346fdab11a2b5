// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoded-image cache keyed by (path, width, height).
//!
//! Each distinct key is decoded and resized once. Entries are evicted in
//! insertion order once the cache holds `capacity` images, which bounds memory
//! when the background rotates through a large image directory.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;
use image::imageops::FilterType;
use tracing::debug;

use super::SurfaceError;

/// Cache key: source path plus requested pixel size.
///
/// A zero width or height means "as decoded".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageKey {
    /// Source file.
    pub path: PathBuf,
    /// Requested width in pixels.
    pub width: u32,
    /// Requested height in pixels.
    pub height: u32,
}

impl ImageKey {
    /// A key for `path` resized to `width` x `height`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    fn wants_resize(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A decoded image, cheap to clone.
#[derive(Clone)]
pub struct RasterImage {
    key: ImageKey,
    pixels: Rc<RgbaImage>,
}

impl RasterImage {
    /// The key the image was loaded under.
    #[must_use]
    pub fn key(&self) -> &ImageKey {
        &self.key
    }

    /// The decoded pixels.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Pixel dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Whether both values share the same decoded buffer.
    #[must_use]
    pub fn shares_pixels(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dimensions();
        f.debug_struct("RasterImage")
            .field("path", &self.key.path)
            .field("dimensions", &(w, h))
            .finish_non_exhaustive()
    }
}

/// Bounded cache of decoded images.
#[derive(Debug)]
pub struct ImageCache {
    entries: HashMap<ImageKey, RasterImage>,
    order: VecDeque<ImageKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl ImageCache {
    /// Capacity used by [`ImageCache::default`].
    pub const DEFAULT_CAPACITY: usize = 32;

    /// Creates an empty cache holding at most `capacity` images (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the image for `path` at `width` x `height`, decoding on a miss.
    pub fn load(
        &mut self,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<RasterImage, SurfaceError> {
        let key = ImageKey::new(path, width, height);
        if let Some(image) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(image.clone());
        }
        self.misses += 1;
        debug!(path = %path.display(), width, height, "decoding image");

        let decoded = image::open(path).map_err(|source| SurfaceError::Image {
            path: path.to_owned(),
            source,
        })?;
        let resize = key.wants_resize() && (decoded.width(), decoded.height()) != (width, height);
        let decoded = if resize {
            decoded.resize_exact(width, height, FilterType::Lanczos3)
        } else {
            decoded
        };
        let image = RasterImage {
            key: key.clone(),
            pixels: Rc::new(decoded.to_rgba8()),
        };

        if self.entries.len() >= self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            self.entries.remove(&oldest);
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, image.clone());
        Ok(image)
    }

    /// Whether an entry for this exact key is cached.
    #[must_use]
    pub fn contains(&self, key: &ImageKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups served from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to decode.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drops every cached image.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
