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

//! Pure line formatting for the observable output. No component here
//! touches stdout directly; `main` is the only writer.

use axiomata::driver::{BucketTurn, DerivationStep, StepTurn};
use axiomata::matcher::Binding;
use axiomata::rule::TraceEvent;
use axiomata::system::Mode;
use axiomata::theorem::{Producer, Theorem};

pub fn mode_banner(mode: Mode) -> String {
    match mode {
        Mode::Step => "> step mode selected (finite axiom base)".to_string(),
        Mode::Bucket => "> bucket mode selected (infinite axiom base)".to_string(),
    }
}

pub fn step_line(turn: &StepTurn) -> String {
    let theorems: Vec<&str> = turn.corpus.iter().map(|t| t.string.as_str()).collect();
    format!("STEP {}: {}", turn.index, theorems.join("/"))
}

pub fn bucket_line(turn: &BucketTurn) -> String {
    let theorems: Vec<&str> = turn.bucket.iter().map(|t| t.string.as_str()).collect();
    format!("=== BUCKET {}: {}", turn.index, theorems.join("/"))
}

fn join_parents(parents: &[String]) -> String {
    parents.join(", ")
}

pub fn trace_line(event: &TraceEvent) -> String {
    match event {
        TraceEvent::Produced { rule, parents, theorem } => {
            format!("P {} for {} gives {}", rule, join_parents(parents), theorem)
        }
        TraceEvent::Failed { rule, parents } => {
            format!(". {} for {}", rule, join_parents(parents))
        }
    }
}

fn format_binding(binding: &Binding) -> String {
    let mut entries: Vec<(&String, &String)> = binding.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn axiom_check_line(target: &str, schema_name: &str, witness: Option<&Binding>) -> String {
    match witness {
        Some(binding) if !binding.is_empty() => {
            format!("Y {} is an axiom [{} with {}]", target, schema_name, format_binding(binding))
        }
        Some(_) => format!("Y {} is an axiom [{}]", target, schema_name),
        None => format!("N {} is not an axiom [{}]", target, schema_name),
    }
}

pub fn derivation_banner(target: &str) -> String {
    format!("> derivation of {}", target)
}

/// `step.generation` is already "hops back from the target" — k counting
/// backward from the target (k=0) to the axioms — so it doubles directly
/// as the bracketed index.
pub fn derivation_line(step: &DerivationStep) -> String {
    let k = step.generation;
    match &step.theorem.producer {
        Producer::Axiom => format!("[{}] axiom gives {}", k, step.theorem.string),
        Producer::Rule(rule) => {
            let parents = parent_strings(&step.theorem);
            format!("[{}] {} for {} gives {}", k, rule.name, parents.join(", "), step.theorem.string)
        }
    }
}

fn parent_strings(theorem: &Theorem) -> Vec<String> {
    theorem.parents.iter().map(|p| p.string.clone()).collect()
}

pub fn not_found_line(target: &str) -> String {
    format!("not found: {}", target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn formats_mode_banners() {
        assert_eq!(mode_banner(Mode::Step), "> step mode selected (finite axiom base)");
        assert_eq!(mode_banner(Mode::Bucket), "> bucket mode selected (infinite axiom base)");
    }

    #[test]
    fn formats_axiom_check_with_bindings() {
        let mut binding = HashMap::new();
        binding.insert("x".to_string(), "aaa".to_string());
        assert_eq!(
            axiom_check_line("Aaaa", "a-schema", Some(&binding)),
            "Y Aaaa is an axiom [a-schema with x=aaa]"
        );
        assert_eq!(axiom_check_line("MUIU", "mi", None), "N MUIU is not an axiom [mi]");
    }

    #[test]
    fn formats_trace_lines() {
        let produced = TraceEvent::Produced {
            rule: "rule0".to_string(),
            parents: vec!["MI".to_string()],
            theorem: "MIU".to_string(),
        };
        assert_eq!(trace_line(&produced), "P rule0 for MI gives MIU");

        let failed = TraceEvent::Failed {
            rule: "rule1".to_string(),
            parents: vec!["MA".to_string(), "NB".to_string()],
        };
        assert_eq!(trace_line(&failed), ". rule1 for MA, NB");
    }
}
