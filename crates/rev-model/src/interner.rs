// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! String interning for node text fields

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Stable handle to an interned string
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Symbol(u32);

impl Symbol {
    /// Raw index into the interner table
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Deduplicating string table
///
/// Identical strings share one allocation and compare equal by [`Symbol`].
#[derive(Debug, Default)]
pub struct StringInterner {
    lookup: FxHashMap<Arc<str>, Symbol>,
    strings: Vec<Arc<str>>,
}

impl StringInterner {
    /// Create an empty interner
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning the existing symbol if already present
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.lookup.get(s) {
            return sym;
        }
        let sym = Symbol(self.strings.len() as u32);
        let shared: Arc<str> = Arc::from(s);
        self.strings.push(Arc::clone(&shared));
        self.lookup.insert(shared, sym);
        sym
    }

    /// Look up the text for `sym`
    pub fn get(&self, sym: Symbol) -> Option<&str> {
        self.strings.get(sym.index()).map(|s| &**s)
    }

    /// Text for `sym`, or the empty string for a symbol from another interner
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.get(sym).unwrap_or("")
    }

    /// Number of distinct strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if nothing has been interned
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_deduplicates() {
        let mut interner = StringInterner::new();
        let a = interner.intern("PIPE-100");
        let b = interner.intern("PIPE-200");
        let c = interner.intern("PIPE-100");

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(interner.len(), 2);
        assert_eq!(interner.resolve(a), "PIPE-100");
        assert_eq!(interner.resolve(b), "PIPE-200");
    }

    #[test]
    fn test_empty_string_is_a_symbol() {
        let mut interner = StringInterner::new();
        let empty = interner.intern("");
        assert_eq!(interner.get(empty), Some(""));
    }

    #[test]
    fn test_foreign_symbol_resolves_empty() {
        let mut other = StringInterner::new();
        other.intern("a");
        let foreign = other.intern("b");

        let interner = StringInterner::new();
        assert_eq!(interner.get(foreign), None);
        assert_eq!(interner.resolve(foreign), "");
    }
}
