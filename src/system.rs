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

//! The formal system itself: a compiled set of axiom schemas and rules,
//! plus the static classification that picks a search driver.

use std::rc::Rc;

use crate::definition::Definition;
use crate::error::DefinitionError;
use crate::rule::CompiledRule;
use crate::schema::AxiomSchema;

/// Which search driver a formal system requires.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// No axiom schema has wildcards: finite axiom base, step driver.
    Step,
    /// At least one axiom schema has wildcards: infinite axiom base,
    /// bucket driver.
    Bucket,
}

/// A compiled formal system, ready to drive a search.
pub struct FormalSystem {
    pub axioms: Vec<AxiomSchema>,
    pub rules: Vec<Rc<CompiledRule>>,
}

impl FormalSystem {
    /// Compile every axiom and rule out of a loaded `Definition`.
    pub fn compile(definition: &Definition) -> Result<FormalSystem, DefinitionError> {
        let axioms = definition
            .axioms
            .iter()
            .enumerate()
            .map(|(i, raw)| AxiomSchema::compile(&format!("axiom{}", i), raw))
            .collect::<Result<Vec<_>, _>>()?;

        let rules = definition
            .rules
            .iter()
            .enumerate()
            .map(|(i, raw)| CompiledRule::compile(&format!("rule{}", i), raw).map(Rc::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FormalSystem { axioms, rules })
    }

    /// Step driver (finite axiom base) or bucket driver (infinite)?
    pub fn mode(&self) -> Mode {
        if self.axioms.iter().any(|a| a.dim() > 0) {
            Mode::Bucket
        } else {
            Mode::Step
        }
    }

    /// Whether the bucket driver must accumulate `old_bucket` across
    /// turns: true as soon as any rule has more than one antecedent.
    pub fn full(&self) -> bool {
        self.rules.iter().any(|r| r.arity() > 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_axioms_select_step_mode() {
        let def = Definition::from_yaml("axioms:\n  - MI\nrules:\n  - \"x is .*, xI => xIU\"\n").unwrap();
        let system = FormalSystem::compile(&def).unwrap();
        assert_eq!(system.mode(), Mode::Step);
        assert!(!system.full());
    }

    #[test]
    fn wildcard_axiom_selects_bucket_mode() {
        let def = Definition::from_yaml("axioms:\n  - \"x is a+, Ax\"\nrules: []\n").unwrap();
        let system = FormalSystem::compile(&def).unwrap();
        assert_eq!(system.mode(), Mode::Bucket);
    }

    #[test]
    fn multi_antecedent_rule_sets_full() {
        let def =
            Definition::from_yaml("axioms:\n  - \"x is a+, Ax\"\nrules:\n  - \"x is .*, xA and xB => xC\"\n")
                .unwrap();
        let system = FormalSystem::compile(&def).unwrap();
        assert!(system.full());
    }
}
