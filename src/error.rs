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

//! Crate-level error types

use thiserror::Error;

/// Errors raised while compiling a raw schema or rule string into its matcher
/// and template.
///
/// These are the only errors the symbolic engine itself can raise; they
/// always abort the run immediately, never drive backtracking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// A repetition regex did not end in `+` or `*` (after stripping a
    /// trailing non-greedy `?`).
    #[error("unsupported repetition regex {regex:?} in {raw:?}")]
    UnsupportedRegex { raw: String, regex: String },

    /// A wildcard appeared in the body (schema expression or rule
    /// antecedent/consequent) that was never declared by a condition.
    #[error("wildcard {name:?} used in {raw:?} but never declared")]
    UndeclaredWildcard { raw: String, name: String },

    /// A condition clause could not be split into `name(s) regex`.
    #[error("malformed condition {condition:?} in {raw:?}")]
    MalformedCondition { raw: String, condition: String },

    /// A rule body had no `=>` separating antecedents from consequents.
    #[error("rule {raw:?} is missing '=>'")]
    MissingArrow { raw: String },

    /// A raw schema/rule string had no body at all (e.g. only conditions,
    /// or the empty string).
    #[error("{raw:?} has no body")]
    EmptyBody { raw: String },
}

/// Top-level error type, covering everything that can abort a run: a
/// malformed definition, or a failure to read/parse the definition file.
#[derive(Error, Debug)]
pub enum Error {
    /// A schema or rule failed to compile.
    #[error("malformed formal-system definition: {0}")]
    Definition(#[from] DefinitionError),

    /// The definition file could not be read.
    #[error("could not read definition file: {0}")]
    Io(#[from] std::io::Error),

    /// The definition file was not valid YAML, or did not match the
    /// `{axioms: [String], rules: [String]}` shape.
    #[error("could not parse definition file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
