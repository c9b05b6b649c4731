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

//! Theorems and their provenance.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::rule::CompiledRule;

/// What produced a theorem: either an axiom schema instantiation, or a rule
/// application. Theorems never clone the rule that produced them — they
/// share it by reference.
#[derive(Clone)]
pub enum Producer {
    Axiom,
    Rule(Rc<CompiledRule>),
}

/// A derived string, together with the parents it was produced from and
/// what produced it.
///
/// Equality and hashing are defined over `string` alone, never derived:
/// two theorems with the same string are the same theorem for corpus
/// membership purposes, no matter how many different ways they can be
/// produced. Deriving `PartialEq`/`Hash` here would be wrong since it
/// would also compare `parents`/`producer`, which `Rc<CompiledRule>` (no
/// `PartialEq`) can't even support.
#[derive(Clone)]
pub struct Theorem {
    pub string: String,
    pub parents: Vec<Rc<Theorem>>,
    pub producer: Producer,
}

impl Theorem {
    pub fn axiom(string: String) -> Rc<Theorem> {
        Rc::new(Theorem {
            string,
            parents: Vec::new(),
            producer: Producer::Axiom,
        })
    }

    pub fn from_rule(string: String, parents: Vec<Rc<Theorem>>, rule: Rc<CompiledRule>) -> Rc<Theorem> {
        Rc::new(Theorem {
            string,
            parents,
            producer: Producer::Rule(rule),
        })
    }

    pub fn len(&self) -> usize {
        self.string.chars().count()
    }
}

impl PartialEq for Theorem {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
    }
}

impl Eq for Theorem {}

impl Hash for Theorem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.string.hash(state);
    }
}

impl std::fmt::Debug for Theorem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Theorem").field("string", &self.string).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_provenance() {
        let a = Theorem::axiom("MI".to_string());
        let b = Theorem::axiom("MI".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_strings_are_unequal() {
        let a = Theorem::axiom("MI".to_string());
        let b = Theorem::axiom("MIU".to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn len_counts_chars() {
        let t = Theorem::axiom("MIUIU".to_string());
        assert_eq!(t.len(), 5);
    }
}
