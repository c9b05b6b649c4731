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

//! Search drivers: the step loop for finite axiom bases, the bucket loop
//! for infinite ones, and the derivation extractor that walks a theorem's
//! parent DAG back to its axioms.

use std::rc::Rc;

use crate::corpus::Corpus;
use crate::rule::{apply_all_traced, TraceEvent};
use crate::schema::round_robin;
use crate::system::FormalSystem;
use crate::theorem::Theorem;

/// One emitted turn of the step driver.
pub struct StepTurn {
    pub index: usize,
    pub corpus: Corpus,
    pub trace: Vec<TraceEvent>,
}

/// Corpus C₁ = the first `step` ground axioms from the round-robin schema
/// enumerator. For i ≥ 2, Cᵢ = apply_all(rules, Cᵢ₋₁) — each turn's corpus
/// is the *new* productions from the previous turn, not a running union.
/// `old_corpus` is always passed as empty, so nothing from Cᵢ₋₁ is
/// suppressed as "already seen," but Cᵢ₋₁ itself is not folded into Cᵢ.
pub fn run_step(system: &FormalSystem, step: usize) -> Vec<StepTurn> {
    let mut turns = Vec::new();
    let mut current = Corpus::new();
    for (_, ground) in round_robin(&system.axioms).take(step) {
        current.insert(Theorem::axiom(ground));
    }
    turns.push(StepTurn {
        index: 1,
        corpus: current.clone(),
        trace: Vec::new(),
    });

    for i in 2..=step {
        let empty = Corpus::new();
        let (produced, trace) = apply_all_traced(&system.rules, &current, &empty);
        let mut next = Corpus::new();
        for theorem in produced {
            next.insert(theorem);
        }
        turns.push(StepTurn {
            index: i,
            corpus: next.clone(),
            trace,
        });
        current = next;
    }

    turns
}

/// One emitted turn of the bucket driver.
pub struct BucketTurn {
    pub index: usize,
    pub bucket: Corpus,
    pub trace: Vec<TraceEvent>,
}

/// Drip-feeds one axiom per turn into `bucket`, applying every rule across
/// `bucket` and (if `full`) the accumulated `old_bucket` each turn. Stops
/// when every theorem in the post-turn bucket has grown past `min_len`, or
/// after `max_turns`, whichever comes first; either bound may be `None`
/// for "unbounded".
pub fn run_bucket(system: &FormalSystem, max_turns: Option<usize>, min_len: Option<usize>) -> Vec<BucketTurn> {
    let full = system.full();
    let mut bucket = Corpus::new();
    let mut old_bucket = Corpus::new();
    let mut turns = Vec::new();
    let mut axioms = round_robin(&system.axioms);
    let mut t = 0usize;

    loop {
        if let Some(limit) = max_turns {
            if t >= limit {
                break;
            }
        }
        let ground = match axioms.next() {
            Some((_, s)) => s,
            None => break,
        };
        t += 1;

        // Step 1: drip the next axiom in and emit this turn's bucket.
        bucket.insert(Theorem::axiom(ground));
        let emitted = bucket.clone();

        // Step 2: apply every rule to bucket ∪ old_bucket.
        let (produced, trace) = apply_all_traced(&system.rules, &bucket, &old_bucket);

        turns.push(BucketTurn {
            index: t,
            bucket: emitted,
            trace,
        });

        // Step 3: accumulate old_bucket only for multi-antecedent systems.
        if full {
            old_bucket.union(&bucket);
        } else {
            old_bucket = Corpus::new();
        }

        // Step 4: bucket becomes this turn's productions.
        let mut new_bucket = Corpus::new();
        for theorem in produced {
            new_bucket.insert(theorem);
        }
        bucket = new_bucket;

        if let Some(min) = min_len {
            if !bucket.is_empty() && bucket.iter().all(|theorem| theorem.len() >= min) {
                break;
            }
        }
    }

    turns
}

/// Look up `target` by string across every emitted turn's corpus, in turn
/// order, returning its provenance record if found.
pub fn find_target<'a>(target: &str, corpora: impl Iterator<Item = &'a Corpus>) -> Option<Rc<Theorem>> {
    for corpus in corpora {
        if let Some(theorem) = corpus.get(target) {
            return Some(Rc::clone(theorem));
        }
    }
    None
}

/// One line of a derivation report: how many hops back from the target
/// (generation 0) this theorem sits, and the theorem itself.
pub struct DerivationStep {
    pub generation: usize,
    pub theorem: Rc<Theorem>,
}

pub enum Derivation {
    Found(Vec<DerivationStep>),
    NotFound,
}

/// Breadth-first walk back along `parents` from `found`, recording
/// `(generation, theorem)` pairs and reversing them into a numbered
/// genealogy from axioms down to the target.
pub fn derive(found: Option<Rc<Theorem>>) -> Derivation {
    let Some(root) = found else {
        return Derivation::NotFound;
    };

    let mut report = Vec::new();
    let mut frontier = vec![(0usize, root)];
    while !frontier.is_empty() {
        let mut next_frontier = Vec::new();
        for (generation, theorem) in frontier {
            for parent in &theorem.parents {
                next_frontier.push((generation + 1, Rc::clone(parent)));
            }
            report.push(DerivationStep { generation, theorem });
        }
        frontier = next_frontier;
    }
    report.reverse();
    Derivation::Found(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Definition;

    fn miu_system() -> FormalSystem {
        let yaml = "\
axioms:
  - MI
rules:
  - \"x is .*, xI => xIU\"
  - \"x is .*, Mx => Mxx\"
  - \"x is .*, y is .*, xIIIy => xUy\"
  - \"x is .*, y is .*, xUUy => xy\"
";
        FormalSystem::compile(&Definition::from_yaml(yaml).unwrap()).unwrap()
    }

    #[test]
    fn step_one_is_the_sole_axiom() {
        let system = miu_system();
        let turns = run_step(&system, 1);
        assert_eq!(turns.len(), 1);
        let strings: Vec<&str> = turns[0].corpus.iter().map(|t| t.string.as_str()).collect();
        assert_eq!(strings, vec!["MI"]);
    }

    #[test]
    fn step_two_contains_miu_and_mii() {
        let system = miu_system();
        let turns = run_step(&system, 2);
        let strings: Vec<&str> = turns[1].corpus.iter().map(|t| t.string.as_str()).collect();
        assert!(strings.contains(&"MIU"));
        assert!(strings.contains(&"MII"));
    }

    #[test]
    fn step_three_contains_miiii_and_miuiu() {
        let system = miu_system();
        let turns = run_step(&system, 3);
        let strings: Vec<&str> = turns[2].corpus.iter().map(|t| t.string.as_str()).collect();
        assert!(strings.contains(&"MIIII"));
        assert!(strings.contains(&"MIUIU"));
    }

    #[test]
    fn derives_miiiiiiii_in_four_hops_via_doubling() {
        let system = miu_system();
        let turns = run_step(&system, 5);
        let corpora: Vec<&Corpus> = turns.iter().map(|t| &t.corpus).collect();
        let found = find_target("MIIIIIIII", corpora.into_iter());
        assert!(found.is_some());
        match derive(found) {
            Derivation::Found(report) => {
                // MI -> MII -> MIIII -> MIIIIIIII: a chain of 4 theorems,
                // all but the axiom produced by the doubling rule.
                assert_eq!(report.len(), 4);
                let last = report.last().unwrap();
                assert_eq!(last.theorem.string, "MIIIIIIII");
                assert_eq!(last.generation, 0);
                assert_eq!(report[0].theorem.string, "MI");
                assert_eq!(report[0].generation, 3);
            }
            Derivation::NotFound => panic!("expected a derivation"),
        }
    }

    #[test]
    fn not_found_reports_absent_target() {
        let found = find_target("ZZZ", std::iter::empty());
        assert!(matches!(derive(found), Derivation::NotFound));
    }
}
