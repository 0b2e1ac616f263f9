//! Lazily regenerated screen rectangles
//!
//! Elements keep their outer and inner rectangles in a [`CachedRect`]. Reads
//! go through `&self` (the tree hands out shared references while it walks
//! parents), so the cached value lives in a [`Cell`]. The generator is passed
//! in by the caller; it receives `skip_all_pixel_alignment` and must be a pure
//! function of the owning element's current state.

use super::geometry::Rect;
use std::cell::Cell;

/// Which of an element's cached rectangles is meant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RectKind {
    /// Full area including decoration
    Outer,
    /// Area available to client children
    Inner,
}

/// A derived rectangle with a binary valid/invalid cache
#[derive(Debug, Default)]
pub struct CachedRect {
    cached: Cell<Rect>,
    valid: Cell<bool>,
}

impl CachedRect {
    /// Create an invalid cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value, regenerated with pixel alignment applied if invalid
    pub fn get(&self, generator: impl FnOnce(bool) -> Rect) -> Rect {
        if !self.valid.get() {
            self.regenerate(generator);
        }
        self.cached.get()
    }

    /// Bypass the cache
    ///
    /// With `skip_all_pixel_alignment == false` an invalid cache is refreshed
    /// on the way. With `true` the generator is always called and the stored
    /// value is never touched, since an unaligned rect is not the canonical one.
    pub fn get_fresh(&self, skip_all_pixel_alignment: bool, generator: impl FnOnce(bool) -> Rect) -> Rect {
        if !self.valid.get() && !skip_all_pixel_alignment {
            return self.get(generator);
        }
        generator(skip_all_pixel_alignment)
    }

    /// Whatever is stored right now, valid or not
    pub fn current(&self) -> Rect {
        self.cached.get()
    }

    /// Mark the cache invalid; regeneration waits for the next read
    pub fn invalidate(&self) {
        self.valid.set(false);
    }

    /// Returns true if the stored value is up to date
    pub fn is_valid(&self) -> bool {
        self.valid.get()
    }

    /// Regenerate now
    pub fn regenerate(&self, generator: impl FnOnce(bool) -> Rect) {
        self.cached.set(generator(false));
        self.valid.set(true);
    }
}
