// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element and primitive identity types.

use core::fmt;

/// A handle to an element on a [`DrawingSurface`](super::DrawingSurface).
///
/// Contains both a slot index and a generation counter so that a handle stays
/// dead after its element is deleted or the surface is cleared, even once the
/// slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    /// Slot index into the surface's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the surface's generation for this slot.
    pub(crate) generation: u32,
}

impl ElementId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({}@gen{})", self.idx, self.generation)
    }
}

/// An opaque reference to a primitive owned by a [`Canvas`](super::Canvas).
///
/// Primitive ids are minted by the canvas backend. The surface never
/// interprets them beyond passing them back.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub u64);

impl fmt::Debug for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrimitiveId({})", self.0)
    }
}
