/*
    MIT License

    Copyright (c) 2020 Lars Krueger <lars_e_krueger@gmx.de>

    Permission is hereby granted, free of charge, to any person obtaining a copy
    of this software and associated documentation files (the "Software"), to deal
    in the Software without restriction, including without limitation the rights
    to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
    copies of the Software, and to permit persons to whom the Software is
    furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in all
    copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
    OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
    SOFTWARE.
*/

//! Ordered Unique-Set: an insertion-order-preserving, string-keyed set of
//! theorems, used as the growing corpus a formal system's derivation
//! accumulates into.

use std::collections::HashMap;
use std::rc::Rc;

use crate::theorem::Theorem;

/// A set of theorems, unique by string, that remembers insertion order.
///
/// Lookup by string is `O(1)` via an index into `order`; iteration yields
/// theorems in the order they were first inserted, which is what makes the
/// "STEP i" / derivation reports read sensibly.
#[derive(Default, Clone)]
pub struct Corpus {
    order: Vec<Rc<Theorem>>,
    index: HashMap<String, usize>,
}

impl Corpus {
    pub fn new() -> Self {
        Corpus {
            order: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert `theorem` if its string is not already present. Returns
    /// `true` if it was newly inserted.
    pub fn insert(&mut self, theorem: Rc<Theorem>) -> bool {
        if self.index.contains_key(&theorem.string) {
            return false;
        }
        self.index.insert(theorem.string.clone(), self.order.len());
        self.order.push(theorem);
        true
    }

    pub fn contains(&self, string: &str) -> bool {
        self.index.contains_key(string)
    }

    pub fn get(&self, string: &str) -> Option<&Rc<Theorem>> {
        self.index.get(string).map(|&i| &self.order[i])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Theorem>> {
        self.order.iter()
    }

    /// Merge `other` into `self`, in `other`'s order, skipping anything
    /// already present.
    pub fn union(&mut self, other: &Corpus) {
        for theorem in other.iter() {
            self.insert(Rc::clone(theorem));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut corpus = Corpus::new();
        assert!(corpus.insert(Theorem::axiom("MI".to_string())));
        assert!(!corpus.insert(Theorem::axiom("MI".to_string())));
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut corpus = Corpus::new();
        corpus.insert(Theorem::axiom("MI".to_string()));
        corpus.insert(Theorem::axiom("MIU".to_string()));
        corpus.insert(Theorem::axiom("MII".to_string()));
        let strings: Vec<&str> = corpus.iter().map(|t| t.string.as_str()).collect();
        assert_eq!(strings, vec!["MI", "MIU", "MII"]);
    }

    #[test]
    fn union_skips_duplicates_and_preserves_order() {
        let mut a = Corpus::new();
        a.insert(Theorem::axiom("MI".to_string()));
        let mut b = Corpus::new();
        b.insert(Theorem::axiom("MI".to_string()));
        b.insert(Theorem::axiom("MIU".to_string()));
        a.union(&b);
        let strings: Vec<&str> = a.iter().map(|t| t.string.as_str()).collect();
        assert_eq!(strings, vec!["MI", "MIU"]);
    }
}
