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

//! Wildcard regexes: a single base symbol repeated zero-or-more or
//! one-or-more times.

use crate::error::DefinitionError;

/// What a wildcard's repetitions are made of.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Base {
    /// A literal character, e.g. the `a` in `a+`.
    Symbol(char),
    /// The any-symbol dot, e.g. `.+`.
    Any,
}

/// How many times the base may repeat.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Repetition {
    /// `x+`: one or more.
    Plus,
    /// `x*`: zero or more.
    Star,
}

/// A compiled repetition regex, e.g. `a+` or `.*`.
///
/// The trailing `?` (non-greedy marker) is accepted at parse time and
/// discarded; it carries no further semantics in this engine beyond being
/// legal syntax to strip.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Wildcard {
    pub base: Base,
    pub rep: Repetition,
}

impl Wildcard {
    /// Parse a raw repetition regex like `a+`, `.*`, or `b*?`.
    ///
    /// `raw` is the whole condition string, kept only for error messages.
    pub fn parse(raw: &str, regex: &str) -> std::result::Result<Self, DefinitionError> {
        let regex = regex.strip_suffix('?').unwrap_or(regex);
        let rep = match regex.chars().last() {
            Some('+') => Repetition::Plus,
            Some('*') => Repetition::Star,
            _ => {
                return Err(DefinitionError::UnsupportedRegex {
                    raw: raw.to_string(),
                    regex: regex.to_string(),
                })
            }
        };
        let body: String = regex.chars().take(regex.chars().count() - 1).collect();
        let base = if body == "." {
            Base::Any
        } else if body.chars().count() == 1 {
            Base::Symbol(body.chars().next().unwrap())
        } else {
            return Err(DefinitionError::UnsupportedRegex {
                raw: raw.to_string(),
                regex: regex.to_string(),
            });
        };
        Ok(Wildcard { base, rep })
    }

    /// Does an empty match satisfy this wildcard (`x*` at zero repetitions)?
    pub fn allows_empty(&self) -> bool {
        self.rep == Repetition::Star
    }

    /// The minimum number of repeated symbols this wildcard can match.
    pub fn min_len(&self) -> usize {
        match self.rep {
            Repetition::Plus => 1,
            Repetition::Star => 0,
        }
    }

    /// Instantiate this wildcard's string for the given triangle-enumeration
    /// coordinate `k`: a `+` wildcard at `k` yields `k` copies of the base
    /// symbol; a `*` wildcard at `k` yields `k - 1` copies (so `k == 1`
    /// yields the empty string).
    ///
    /// `.` is treated identically to a literal symbol for instantiation
    /// purposes: we pick `'.'` itself as the canonical representative.
    pub fn instantiate(&self, k: usize) -> String {
        let symbol = match self.base {
            Base::Symbol(c) => c,
            Base::Any => '.',
        };
        let count = match self.rep {
            Repetition::Plus => k,
            Repetition::Star => k - 1,
        };
        std::iter::repeat(symbol).take(count).collect()
    }

    /// Does a window of `len` symbols satisfy this wildcard's cardinality?
    pub fn accepts_len(&self, len: usize) -> bool {
        len >= self.min_len()
    }

    /// Does `c` satisfy this wildcard's base symbol?
    pub fn matches_char(&self, c: char) -> bool {
        match self.base {
            Base::Symbol(s) => c == s,
            Base::Any => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plus_and_star() {
        let w = Wildcard::parse("x a+", "a+").unwrap();
        assert_eq!(w.base, Base::Symbol('a'));
        assert_eq!(w.rep, Repetition::Plus);

        let w = Wildcard::parse("x a*", "a*").unwrap();
        assert_eq!(w.rep, Repetition::Star);
        assert!(w.allows_empty());
    }

    #[test]
    fn strips_non_greedy_marker() {
        let w = Wildcard::parse("x .*?", ".*?").unwrap();
        assert_eq!(w.base, Base::Any);
        assert_eq!(w.rep, Repetition::Star);
    }

    #[test]
    fn rejects_unsupported_regex() {
        assert!(Wildcard::parse("x a?", "a?").is_err());
        assert!(Wildcard::parse("x ab+", "ab+").is_err());
    }

    #[test]
    fn instantiates_plus_and_star() {
        let plus = Wildcard::parse("x a+", "a+").unwrap();
        assert_eq!(plus.instantiate(1), "a");
        assert_eq!(plus.instantiate(3), "aaa");

        let star = Wildcard::parse("x a*", "a*").unwrap();
        assert_eq!(star.instantiate(1), "");
        assert_eq!(star.instantiate(3), "aa");
    }
}
