// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Append-only arena for variable-length geometry payloads
//!
//! An [`Arena`] hands out [`Span`] handles into one contiguous table. Spans
//! stay valid for the lifetime of the arena; nothing is released before the
//! arena itself is dropped.

use std::fmt;
use std::marker::PhantomData;

/// Handle to a contiguous run of items inside an [`Arena`]
pub struct Span<T> {
    start: usize,
    len: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Span<T> {
    /// An empty span
    pub const EMPTY: Span<T> = Span {
        start: 0,
        len: 0,
        _marker: PhantomData,
    };

    fn new(start: usize, len: usize) -> Self {
        Self {
            start,
            len,
            _marker: PhantomData,
        }
    }

    /// Number of items covered
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the span covers nothing
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.len
    }
}

impl<T> Clone for Span<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<T> {}

impl<T> Default for Span<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> PartialEq for Span<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.len == other.len
    }
}

impl<T> Eq for Span<T> {}

impl<T> fmt::Debug for Span<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({}..{})", self.start, self.start + self.len)
    }
}

/// Bump allocator over a single growable table
#[derive(Debug)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Clone + Default> Arena<T> {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve exactly `len` default-initialized items
    pub fn alloc(&mut self, len: usize) -> Span<T> {
        if len == 0 {
            return Span::EMPTY;
        }
        let start = self.items.len();
        self.items.resize(start + len, T::default());
        Span::new(start, len)
    }

    /// Items covered by `span`
    pub fn get(&self, span: Span<T>) -> &[T] {
        self.items.get(span.range()).unwrap_or(&[])
    }

    /// Mutable items covered by `span`
    pub fn get_mut(&mut self, span: Span<T>) -> &mut [T] {
        self.items.get_mut(span.range()).unwrap_or(&mut [])
    }

    /// Total items allocated so far
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing was allocated
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
