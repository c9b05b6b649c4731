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

//! Rule engine: combines a compiled rule with a theorem corpus to produce
//! derived theorems.

use std::rc::Rc;

use itertools::Itertools;

use crate::corpus::Corpus;
use crate::error::DefinitionError;
use crate::matcher::{consistency_join, AliasBindings, CompiledMatcher};
use crate::pattern::{compile_rule, substitute_template, Aliases};
use crate::theorem::Theorem;

/// A compiled rule: one matcher per antecedent (in declaration order), one
/// template per consequent, and the alias map tying wildcard occurrences
/// across every antecedent and consequent together.
pub struct CompiledRule {
    pub name: String,
    pub raw: String,
    pub aliases: Aliases,
    pub antecedents: Vec<CompiledMatcher>,
    pub consequents: Vec<String>,
}

impl CompiledRule {
    pub fn compile(name: &str, raw: &str) -> Result<Self, DefinitionError> {
        let parts = compile_rule(raw)?;
        Ok(CompiledRule {
            name: name.to_string(),
            raw: raw.to_string(),
            aliases: parts.aliases,
            antecedents: parts.antecedents,
            consequents: parts.consequents,
        })
    }

    pub fn arity(&self) -> usize {
        self.antecedents.len()
    }
}

/// One line of the per-production trace: either a rule firing
/// successfully, or a candidate tuple whose antecedent matches could not
/// be consistency-joined.
pub enum TraceEvent {
    Produced {
        rule: String,
        parents: Vec<String>,
        theorem: String,
    },
    Failed {
        rule: String,
        parents: Vec<String>,
    },
}

/// Combine `rule` with the corpus to produce every derivable theorem,
/// together with the per-production trace.
///
/// `old_corpus` suppresses tuples entirely drawn from a previous turn's
/// corpus, so repeated calls across search turns don't redo work already
/// done. Pass an empty `old_corpus` to consider the full corpus every time
/// (the step driver's case).
pub fn produce_traced(
    rule: &Rc<CompiledRule>,
    corpus: &Corpus,
    old_corpus: &Corpus,
) -> (Vec<Rc<Theorem>>, Vec<TraceEvent>) {
    let n = rule.arity();

    let mut combined = Corpus::new();
    combined.union(old_corpus);
    combined.union(corpus);
    let elements: Vec<Rc<Theorem>> = combined.iter().cloned().collect();
    if elements.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut produced = Vec::new();
    let mut trace = Vec::new();
    let tuples = (0..n).map(|_| elements.iter().cloned()).multi_cartesian_product();

    for tuple in tuples {
        // Step 1: skip tuples wholly drawn from the previous turn.
        if tuple.iter().all(|t| old_corpus.contains(&t.string)) {
            continue;
        }

        let parents: Vec<String> = tuple.iter().map(|t| t.string.clone()).collect();

        // Step 2: match each antecedent against its corresponding element.
        let mut per_position: Vec<Vec<AliasBindings>> = Vec::with_capacity(n);
        let mut any_empty = false;
        for (matcher, theorem) in rule.antecedents.iter().zip(tuple.iter()) {
            let maps: Vec<AliasBindings> = matcher.matches(&theorem.string).collect();
            if maps.is_empty() {
                any_empty = true;
                break;
            }
            per_position.push(maps);
        }
        if any_empty {
            trace.push(TraceEvent::Failed {
                rule: rule.name.clone(),
                parents: parents.clone(),
            });
            continue;
        }

        // Step 3: cartesian product across positions, consistency-joined.
        for combo in per_position.into_iter().multi_cartesian_product() {
            let refs: Vec<&AliasBindings> = combo.iter().collect();
            let binding = match consistency_join(&rule.aliases, &refs) {
                Some(b) => b,
                None => {
                    trace.push(TraceEvent::Failed {
                        rule: rule.name.clone(),
                        parents: parents.clone(),
                    });
                    continue;
                }
            };

            // Step 4: instantiate every consequent.
            for consequent in &rule.consequents {
                let string = substitute_template(consequent, &binding);
                trace.push(TraceEvent::Produced {
                    rule: rule.name.clone(),
                    parents: parents.clone(),
                    theorem: string.clone(),
                });
                produced.push(Theorem::from_rule(string, tuple.clone(), Rc::clone(rule)));
            }
        }
    }

    (produced, trace)
}

/// `produce_traced` without the trace, for callers that only need results.
pub fn produce(rule: &Rc<CompiledRule>, corpus: &Corpus, old_corpus: &Corpus) -> Vec<Rc<Theorem>> {
    produce_traced(rule, corpus, old_corpus).0
}

/// Chain `produce` over every rule in declaration order and flatten the
/// results.
pub fn apply_all(rules: &[Rc<CompiledRule>], corpus: &Corpus, old_corpus: &Corpus) -> Vec<Rc<Theorem>> {
    let mut all = Vec::new();
    for rule in rules {
        all.extend(produce(rule, corpus, old_corpus));
    }
    all
}

/// `apply_all`, plus the flattened per-rule trace, in rule-declaration order.
pub fn apply_all_traced(
    rules: &[Rc<CompiledRule>],
    corpus: &Corpus,
    old_corpus: &Corpus,
) -> (Vec<Rc<Theorem>>, Vec<TraceEvent>) {
    let mut all = Vec::new();
    let mut trace = Vec::new();
    for rule in rules {
        let (produced, events) = produce_traced(rule, corpus, old_corpus);
        all.extend(produced);
        trace.extend(events);
    }
    (all, trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(corpus: &mut Corpus, s: &str) {
        corpus.insert(Theorem::axiom(s.to_string()));
    }

    #[test]
    fn empty_corpus_produces_nothing() {
        let rule = Rc::new(CompiledRule::compile("xi-rule", "x is .*, xI => xIU").unwrap());
        let corpus = Corpus::new();
        let old = Corpus::new();
        assert!(produce(&rule, &corpus, &old).is_empty());
    }

    #[test]
    fn non_matching_antecedent_produces_nothing() {
        let rule = Rc::new(CompiledRule::compile("xi-rule", "x is .*, xI => xIU").unwrap());
        let mut corpus = Corpus::new();
        insert(&mut corpus, "MU");
        let old = Corpus::new();
        assert!(produce(&rule, &corpus, &old).is_empty());
    }

    #[test]
    fn single_antecedent_rule_rewrites_each_match() {
        // "xI => xIU": MI -> MIU.
        let rule = Rc::new(CompiledRule::compile("xi-rule", "x is .*, xI => xIU").unwrap());
        let mut corpus = Corpus::new();
        insert(&mut corpus, "MI");
        let old = Corpus::new();
        let produced = produce(&rule, &corpus, &old);
        let strings: Vec<&str> = produced.iter().map(|t| t.string.as_str()).collect();
        assert_eq!(strings, vec!["MIU"]);
        assert_eq!(produced[0].parents.len(), 1);
        assert_eq!(produced[0].parents[0].string, "MI");
    }

    #[test]
    fn two_antecedent_rule_joins_consistent_bindings() {
        // A toy two-antecedent rule: "x is .*, xA and xB => xC" requires
        // both antecedents to bind the same x.
        let rule = Rc::new(CompiledRule::compile("join-rule", "x is .*, xA and xB => xC").unwrap());
        let mut corpus = Corpus::new();
        insert(&mut corpus, "MA");
        insert(&mut corpus, "MB");
        insert(&mut corpus, "NB");
        let old = Corpus::new();
        let produced = produce(&rule, &corpus, &old);
        let strings: Vec<&str> = produced.iter().map(|t| t.string.as_str()).collect();
        assert!(strings.contains(&"MC"));
        assert!(!strings.contains(&"NC"));
    }

    #[test]
    fn old_corpus_suppresses_previously_seen_tuples() {
        let rule = Rc::new(CompiledRule::compile("xi-rule", "x is .*, xI => xIU").unwrap());
        let mut old = Corpus::new();
        insert(&mut old, "MI");
        let corpus = old.clone();
        // Every element of the only tuple (MI) is already in old_corpus, so
        // nothing new is produced this turn.
        assert!(produce(&rule, &corpus, &old).is_empty());
    }
}
