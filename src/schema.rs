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

//! Axiom schemas and their lazy, fair enumeration.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::DefinitionError;
use crate::matcher::{consistency_join, Binding, CompiledMatcher};
use crate::pattern::{compile_schema, substitute_template, Aliases, Wildcards};
use crate::wildcard::Wildcard;

/// A compiled axiom schema: its declared wildcards, the alias map, the
/// matcher used by `-a target`, and the template used to enumerate ground
/// axioms.
pub struct AxiomSchema {
    pub name: String,
    pub raw: String,
    pub wildcards: Wildcards,
    pub aliases: Aliases,
    pub matcher: CompiledMatcher,
    pub template: String,
    /// Fixed ordering of wildcard names, assigning each a coordinate of the
    /// triangle-enumeration tuple. Stable for the lifetime of this schema
    /// since it is computed once at compile time.
    names: Vec<String>,
}

impl AxiomSchema {
    pub fn compile(name: &str, raw: &str) -> Result<Self, DefinitionError> {
        let compiled = compile_schema(raw)?;
        let names: Vec<String> = compiled.wildcards.keys().cloned().collect();
        Ok(AxiomSchema {
            name: name.to_string(),
            raw: raw.to_string(),
            wildcards: compiled.wildcards,
            aliases: compiled.aliases,
            matcher: compiled.matcher,
            template: compiled.template,
            names,
        })
    }

    /// Number of distinct wildcard names — the dimension `d` of the
    /// triangle enumeration.
    pub fn dim(&self) -> usize {
        self.names.len()
    }

    fn instantiate(&self, coords: &[usize]) -> String {
        let mut bindings = HashMap::new();
        for (name, &k) in self.names.iter().zip(coords) {
            let wildcard: Wildcard = self.wildcards[name];
            bindings.insert(name.clone(), wildcard.instantiate(k));
        }
        substitute_template(&self.template, &bindings)
    }

    /// Lazily enumerate every ground theorem string this schema denotes.
    ///
    /// A wildcard-free schema emits its template once and stops; otherwise
    /// it's the image of a triangle enumeration over `ℕ^d` under
    /// `instantiate`.
    pub fn enumerate(&self) -> Box<dyn Iterator<Item = String> + '_> {
        if self.dim() == 0 {
            Box::new(std::iter::once(self.template.clone()))
        } else {
            Box::new(TriangleEnumerator::new(self.dim()).map(move |coords| self.instantiate(&coords)))
        }
    }

    /// `-a target`: does `target` match this schema, and if so under which
    /// binding?
    pub fn check(&self, target: &str) -> Option<Binding> {
        self.matcher
            .matches(target)
            .find_map(|m| consistency_join(&self.aliases, &[&m]))
    }
}

/// Lazy, fair enumeration of `ℕ^d`, the "triangle enumeration": start at
/// `(1,…,1)`; at each step the frontier is every coordinate increment of
/// the previous frontier (deduplicated — multiple points can increment to
/// the same neighbor once `d > 1`); emit the starting point, then each
/// frontier in turn.
///
/// Every tuple has a finite sum of coordinates, frontiers strictly increase
/// that sum by one each step, and every tuple is reachable by incrementing
/// from `(1,…,1)`, so every tuple is emitted after finitely many steps —
/// a fairness property worth testing directly.
pub struct TriangleEnumerator {
    dim: usize,
    frontier: Vec<Vec<usize>>,
    queue: VecDeque<Vec<usize>>,
}

impl TriangleEnumerator {
    pub fn new(dim: usize) -> Self {
        let dim = dim.max(1);
        let start = vec![1; dim];
        let mut queue = VecDeque::new();
        queue.push_back(start.clone());
        TriangleEnumerator {
            dim,
            frontier: vec![start],
            queue,
        }
    }
}

impl Iterator for TriangleEnumerator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.queue.is_empty() {
            let mut seen = HashSet::new();
            let mut next_frontier = Vec::new();
            for point in &self.frontier {
                for i in 0..self.dim {
                    let mut next = point.clone();
                    next[i] += 1;
                    if seen.insert(next.clone()) {
                        next_frontier.push(next);
                    }
                }
            }
            self.frontier = next_frontier.clone();
            self.queue = next_frontier.into_iter().collect();
        }
        self.queue.pop_front()
    }
}

/// Round-robin merge of every schema's enumerator: advances one step per
/// still-alive source per round, so no infinite schema starves another,
/// and drops a source once it's exhausted. Yields `(schema_index,
/// ground_string)`.
pub fn round_robin<'a>(schemas: &'a [AxiomSchema]) -> impl Iterator<Item = (usize, String)> + 'a {
    let mut iters: Vec<_> = schemas.iter().map(|s| s.enumerate()).collect();
    let mut alive = vec![true; iters.len()];
    let mut pos = 0usize;
    std::iter::from_fn(move || {
        let n = iters.len();
        if n == 0 {
            return None;
        }
        for _ in 0..n {
            let i = pos % n;
            pos += 1;
            if alive[i] {
                match iters[i].next() {
                    Some(s) => return Some((i, s)),
                    None => alive[i] = false,
                }
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_free_schema_emits_once() {
        let schema = AxiomSchema::compile("mi", "MI").unwrap();
        let emitted: Vec<String> = schema.enumerate().take(5).collect();
        assert_eq!(emitted, vec!["MI".to_string()]);
    }

    #[test]
    fn single_wildcard_schema_emits_in_order() {
        // "x Ax" (x is a+) → Aa, Aaa, Aaaa, Aaaaa, ...
        let schema = AxiomSchema::compile("a-schema", "x is a+, Ax").unwrap();
        let emitted: Vec<String> = schema.enumerate().take(4).collect();
        assert_eq!(
            emitted,
            vec!["Aa".to_string(), "Aaa".to_string(), "Aaaa".to_string(), "Aaaaa".to_string()]
        );
    }

    #[test]
    fn triangle_enumeration_covers_every_pair_fairly() {
        let points: Vec<Vec<usize>> = TriangleEnumerator::new(2).take(20).collect();
        let mut seen = HashSet::new();
        for p in &points {
            assert!(seen.insert(p.clone()), "duplicate tuple {:?}", p);
        }
        assert!(points.contains(&vec![1, 1]));
        assert!(points.contains(&vec![3, 2]));
    }

    #[test]
    fn check_returns_witness_binding() {
        let schema = AxiomSchema::compile("a-schema", "x is a+, Ax").unwrap();
        assert!(schema.check("MUIU").is_none());
        let binding = schema.check("Aaaa").unwrap();
        assert_eq!(binding.get("x"), Some(&"aaa".to_string()));
    }

    #[test]
    fn round_robin_interleaves_and_drops_exhausted() {
        let finite = AxiomSchema::compile("finite", "MI").unwrap();
        let infinite = AxiomSchema::compile("infinite", "x is a+, Ax").unwrap();
        let schemas = vec![finite, infinite];
        let emitted: Vec<(usize, String)> = round_robin(&schemas).take(3).collect();
        assert_eq!(emitted[0], (0, "MI".to_string()));
        assert_eq!(emitted[1], (1, "Aa".to_string()));
        assert_eq!(emitted[2], (1, "Aaa".to_string()));
    }
}
