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

//! Pattern compiler: turns a raw schema/rule string into a matcher, a
//! template, and the alias map that ties the two together.

use std::collections::HashMap;

use crate::error::DefinitionError;
use crate::matcher::CompiledMatcher;
use crate::wildcard::Wildcard;

/// Wildcard declarations parsed from the `cond₁, cond₂, …` prefix of a raw
/// schema/rule string.
pub type Wildcards = HashMap<String, Wildcard>;

/// Maps each original wildcard name to every alias generated for its
/// occurrences across every matcher compiled from the same raw string. A
/// name used once has one alias; a name used in `xMx` has two.
pub type Aliases = HashMap<String, Vec<String>>;

/// A schema/rule body split into its conditions and the remainder.
struct Split<'a> {
    conditions: Vec<&'a str>,
    body: &'a str,
}

/// Split `cond₁, cond₂, …, body` on commas, keeping the last piece as the
/// body. Commas may appear only as condition separators: the grammar never
/// quotes strings, so this is an unambiguous top-level split.
fn split_conditions(raw: &str) -> Split<'_> {
    let mut parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let body = parts.pop().unwrap_or("");
    Split {
        conditions: parts,
        body,
    }
}

/// Parse the wildcard declarations out of a list of condition clauses.
///
/// Accepted forms: `x is reg`, `x are reg`, `x reg`, `x y reg` (multiple
/// names sharing one regex), separated by the literal words `is`/`are` or
/// by whitespace.
fn parse_wildcards(raw: &str, conditions: &[&str]) -> Result<Wildcards, DefinitionError> {
    let mut wildcards = Wildcards::new();
    for cond in conditions {
        let tokens: Vec<&str> = cond
            .split(|c: char| c.is_whitespace())
            .filter(|t| !t.is_empty() && *t != "is" && *t != "are")
            .collect();
        let (names, regex) = match tokens.split_last() {
            Some((regex, names)) if !names.is_empty() => (names, *regex),
            _ => {
                return Err(DefinitionError::MalformedCondition {
                    raw: raw.to_string(),
                    condition: (*cond).to_string(),
                })
            }
        };
        let wildcard = Wildcard::parse(raw, regex)?;
        for name in names {
            wildcards.insert((*name).to_string(), wildcard);
        }
    }
    Ok(wildcards)
}

/// Walk `body` character by character, turning each wildcard-name character
/// into a uniquely-aliased sub-matcher and every other character into a
/// literal, while also building the printer template and the alias map.
///
/// A single walk produces all three outputs together because they must
/// agree on exactly which characters are wildcard occurrences.
fn walk_body(
    raw: &str,
    body: &str,
    wildcards: &Wildcards,
    aliases: &mut Aliases,
) -> Result<(CompiledMatcher, String), DefinitionError> {
    let mut matcher = CompiledMatcher::new();
    let mut template = String::new();
    for c in body.chars() {
        if let Some(wildcard) = wildcards.get(&c.to_string()) {
            let occurrence = aliases.entry(c.to_string()).or_insert_with(Vec::new);
            let alias = format!("{}_{}", c, occurrence.len());
            occurrence.push(alias.clone());
            matcher.push_wildcard(alias, *wildcard);
            template.push_str(&format!("{{{}}}", c));
        } else if c.is_ascii_lowercase() {
            // Lowercase letters are reserved for wildcard names (`x`, `y`,
            // `a` name wildcards, `M`, `I`, `U` are literals). One that
            // reaches here was never declared by a condition.
            return Err(DefinitionError::UndeclaredWildcard {
                raw: raw.to_string(),
                name: c.to_string(),
            });
        } else {
            matcher.push_literal(c);
            template.push(c);
        }
    }
    matcher.push_end();
    Ok((matcher, template))
}

/// Build a consequent template, without allocating new aliases: every
/// wildcard name it uses must already have occurred in some antecedent
/// (`aliases`), otherwise it could never be bound.
fn walk_consequent(
    raw: &str,
    body: &str,
    wildcards: &Wildcards,
    aliases: &Aliases,
) -> Result<String, DefinitionError> {
    let mut template = String::new();
    for c in body.chars() {
        if wildcards.contains_key(&c.to_string()) {
            if !aliases.contains_key(&c.to_string()) {
                return Err(DefinitionError::UndeclaredWildcard {
                    raw: raw.to_string(),
                    name: c.to_string(),
                });
            }
            template.push_str(&format!("{{{}}}", c));
        } else if c.is_ascii_lowercase() {
            return Err(DefinitionError::UndeclaredWildcard {
                raw: raw.to_string(),
                name: c.to_string(),
            });
        } else {
            template.push(c);
        }
    }
    Ok(template)
}

/// Compiled form of an axiom schema: its wildcard declarations, the alias
/// map, the compiled matcher, and the printer template.
pub struct CompiledSchema {
    pub wildcards: Wildcards,
    pub aliases: Aliases,
    pub matcher: CompiledMatcher,
    pub template: String,
}

/// Compile a raw schema string (`cond₁, …, expr`) into its matcher and
/// template.
pub fn compile_schema(raw: &str) -> Result<CompiledSchema, DefinitionError> {
    let split = split_conditions(raw);
    let wildcards = parse_wildcards(raw, &split.conditions)?;
    let mut aliases = Aliases::new();
    let (matcher, template) = walk_body(raw, split.body, &wildcards, &mut aliases)?;
    Ok(CompiledSchema {
        wildcards,
        aliases,
        matcher,
        template,
    })
}

/// Compiled form of a rule: one matcher per antecedent, one template per
/// consequent, and the alias map shared across all of them.
pub struct CompiledRuleParts {
    pub wildcards: Wildcards,
    pub aliases: Aliases,
    pub antecedents: Vec<CompiledMatcher>,
    pub consequents: Vec<String>,
}

/// Compile a raw rule string (`cond₁, …, lhs₁ and lhs₂ … => rhs₁ and …`).
pub fn compile_rule(raw: &str) -> Result<CompiledRuleParts, DefinitionError> {
    let split = split_conditions(raw);
    let wildcards = parse_wildcards(raw, &split.conditions)?;

    let mut sides = split.body.splitn(2, "=>");
    let lhs = sides.next().unwrap_or("").trim();
    let rhs = sides
        .next()
        .ok_or_else(|| DefinitionError::MissingArrow {
            raw: raw.to_string(),
        })?
        .trim();

    let mut aliases = Aliases::new();
    let mut antecedents = Vec::new();
    for term in split_and(lhs) {
        let (matcher, _) = walk_body(raw, term, &wildcards, &mut aliases)?;
        antecedents.push(matcher);
    }

    let mut consequents = Vec::new();
    for term in split_and(rhs) {
        consequents.push(walk_consequent(raw, term, &wildcards, &aliases)?);
    }

    if antecedents.is_empty() || consequents.is_empty() {
        return Err(DefinitionError::EmptyBody {
            raw: raw.to_string(),
        });
    }

    Ok(CompiledRuleParts {
        wildcards,
        aliases,
        antecedents,
        consequents,
    })
}

/// Split on the literal separator `and`, trimming whitespace from each term.
fn split_and(s: &str) -> Vec<&str> {
    s.split(" and ").map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Substitute every `{name}` placeholder in `template` with its bound value.
/// Used by the schema enumerator and the rule engine's consequent
/// instantiation.
pub fn substitute_template(template: &str, bindings: &HashMap<String, String>) -> String {
    let mut out = template.to_string();
    for (name, value) in bindings {
        out = out.replace(&format!("{{{}}}", name), value);
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_conditions_and_body() {
        let split = split_conditions("x is a+, xMx");
        assert_eq!(split.conditions, vec!["x is a+"]);
        assert_eq!(split.body, "xMx");
    }

    #[test]
    fn parses_wildcard_declaration_forms() {
        let w1 = parse_wildcards("x is a+", &["x is a+"]).unwrap();
        let w2 = parse_wildcards("x are a+", &["x are a+"]).unwrap();
        let w3 = parse_wildcards("x a+", &["x a+"]).unwrap();
        assert_eq!(w1.get("x"), w2.get("x"));
        assert_eq!(w1.get("x"), w3.get("x"));
    }

    #[test]
    fn shared_regex_across_multiple_names() {
        let w = parse_wildcards("x y a+", &["x y a+"]).unwrap();
        assert!(w.contains_key("x"));
        assert!(w.contains_key("y"));
    }

    #[test]
    fn aliases_repeated_wildcard_occurrences() {
        let compiled = compile_schema("x is a+, xMx").unwrap();
        let x_aliases = compiled.aliases.get("x").unwrap();
        assert_eq!(x_aliases.len(), 2);
        assert_eq!(x_aliases[0], "x_0");
        assert_eq!(x_aliases[1], "x_1");
    }

    #[test]
    fn template_uses_original_name_not_alias() {
        let compiled = compile_schema("x is a+, xMx").unwrap();
        assert_eq!(compiled.template, "{x}M{x}");
    }

    #[test]
    fn rejects_unsupported_regex() {
        assert!(compile_schema("x is a?, Mx").is_err());
    }

    #[test]
    fn rule_requires_arrow() {
        assert!(compile_rule("x is a+, xIx").is_err());
    }

    #[test]
    fn compiles_miu_rule() {
        // "xI => xIU"
        let rule = compile_rule("x is .*, xI => xIU").unwrap();
        assert_eq!(rule.antecedents.len(), 1);
        assert_eq!(rule.consequents, vec!["{x}IU".to_string()]);
    }
}
