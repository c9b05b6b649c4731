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

//! Matcher: matches a compiled pattern against a theorem string, producing
//! every alias-binding map under which the pattern accepts the string, and
//! the consistency join that unifies such maps.

use std::collections::HashMap;

use crate::pattern::Aliases;
use crate::wildcard::Wildcard;

/// One piece of a compiled pattern, in source order.
enum Component {
    Literal(char),
    Wildcard { alias: String, wildcard: Wildcard },
}

/// A pattern compiled from a schema expression or a rule antecedent: a
/// sequence of literals and aliased wildcards, anchored at both ends.
///
/// Built incrementally by the pattern compiler (`push_literal`/
/// `push_wildcard`/`push_end`) and, once built, safe to match against many
/// different theorem strings.
pub struct CompiledMatcher {
    components: Vec<Component>,
    ended: bool,
}

/// An alias-binding map: the result of one successful match.
pub type AliasBindings = HashMap<String, String>;

/// A unified name-binding map: the result of a successful consistency join.
pub type Binding = HashMap<String, String>;

impl CompiledMatcher {
    pub fn new() -> Self {
        CompiledMatcher {
            components: Vec::new(),
            ended: false,
        }
    }

    pub fn push_literal(&mut self, c: char) {
        self.components.push(Component::Literal(c));
    }

    pub fn push_wildcard(&mut self, alias: String, wildcard: Wildcard) {
        self.components.push(Component::Wildcard { alias, wildcard });
    }

    /// Add the trailing end-of-string anchor. A no-op beyond the first
    /// call, since the anchor is implicit in `matches`' check that the
    /// whole string, not a prefix, was consumed.
    pub fn push_end(&mut self) {
        self.ended = true;
    }

    /// Enumerate every distinct alias-binding map under which this pattern
    /// accepts `string` in its entirety. Empty on total failure.
    ///
    /// This is a plain nondeterministic backtracking matcher: a hand-rolled
    /// search over wildcard split points rather than a general
    /// parser-combinator library. It materializes every match eagerly; at
    /// the string lengths this engine deals with (axiom schema
    /// instantiations under a small iteration bound) that is simpler than
    /// threading real laziness through backtracking, and callers only ever
    /// consume the result through `Iterator` regardless.
    pub fn matches(&self, string: &str) -> impl Iterator<Item = AliasBindings> + ExactSizeIterator {
        debug_assert!(self.ended, "matcher used before push_end");
        let chars: Vec<char> = string.chars().collect();
        let mut results = Vec::new();
        let mut bindings = AliasBindings::new();
        self.match_from(0, &chars, 0, &mut bindings, &mut results);
        results.into_iter()
    }

    fn match_from(
        &self,
        comp: usize,
        chars: &[char],
        pos: usize,
        bindings: &mut AliasBindings,
        results: &mut Vec<AliasBindings>,
    ) {
        if comp == self.components.len() {
            if pos == chars.len() {
                results.push(bindings.clone());
            }
            return;
        }
        match &self.components[comp] {
            Component::Literal(c) => {
                if pos < chars.len() && chars[pos] == *c {
                    self.match_from(comp + 1, chars, pos + 1, bindings, results);
                }
            }
            Component::Wildcard { alias, wildcard } => {
                let remaining = chars.len() - pos;
                for len in wildcard.min_len()..=remaining {
                    if !chars[pos..pos + len].iter().all(|c| wildcard.matches_char(*c)) {
                        break;
                    }
                    let matched: String = chars[pos..pos + len].iter().collect();
                    let previous = bindings.insert(alias.clone(), matched);
                    self.match_from(comp + 1, chars, pos + len, bindings, results);
                    match previous {
                        Some(v) => {
                            bindings.insert(alias.clone(), v);
                        }
                        None => {
                            bindings.remove(alias);
                        }
                    }
                }
            }
        }
    }
}

/// Project every alias in `matches` back to its original wildcard name via
/// `aliases`, and unify the results into a single name-binding map. This is
/// the engine's sole unification primitive.
///
/// Fails (returns `None`) if two aliases of the same name disagree on the
/// string they matched.
pub fn consistency_join(aliases: &Aliases, matches: &[&AliasBindings]) -> Option<Binding> {
    let mut unified: Binding = HashMap::new();
    for m in matches {
        for (alias, value) in m.iter() {
            let name = reverse_alias(aliases, alias)?;
            match unified.get(&name) {
                Some(existing) if existing != value => return None,
                _ => {
                    unified.insert(name, value.clone());
                }
            }
        }
    }
    Some(unified)
}

/// Find which original wildcard name `alias` belongs to.
fn reverse_alias(aliases: &Aliases, alias: &str) -> Option<String> {
    aliases
        .iter()
        .find(|(_, alias_list)| alias_list.iter().any(|a| a == alias))
        .map(|(name, _)| name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile_schema;

    #[test]
    fn matches_literal_exactly() {
        let compiled = compile_schema("MI").unwrap();
        assert_eq!(compiled.matcher.matches("MI").len(), 1);
        assert_eq!(compiled.matcher.matches("MIU").len(), 0);
    }

    #[test]
    fn binds_a_plus_wildcard() {
        let compiled = compile_schema("x is a+, Mx").unwrap();
        let matches: Vec<_> = compiled.matcher.matches("Maaa").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].get("x_0"), Some(&"aaa".to_string()));
        assert_eq!(compiled.matcher.matches("M").len(), 0);
    }

    #[test]
    fn zero_repetition_wildcard_matches_empty_string() {
        let compiled = compile_schema("x is a*, Mx").unwrap();
        let matches: Vec<_> = compiled.matcher.matches("M").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].get("x_0"), Some(&"".to_string()));
    }

    #[test]
    fn repeated_wildcard_must_agree_via_consistency_join() {
        let compiled = compile_schema("x is a+, xMx").unwrap();
        let candidates: Vec<_> = compiled.matcher.matches("aaMaa").collect();
        assert!(!candidates.is_empty());
        for m in &candidates {
            let joined = consistency_join(&compiled.aliases, &[m]).unwrap();
            assert_eq!(joined.get("x"), Some(&"aa".to_string()));
        }
        // "aaMa" has no consistent split where both x occurrences agree.
        let none_consistent = compiled
            .matcher
            .matches("aaMa")
            .filter_map(|m| consistency_join(&compiled.aliases, &[&m]))
            .count();
        assert_eq!(none_consistent, 0);
    }

    #[test]
    fn dot_wildcard_matches_any_symbol() {
        let compiled = compile_schema("x is .+, Mx").unwrap();
        assert_eq!(compiled.matcher.matches("MIUab").len(), 1);
    }
}
