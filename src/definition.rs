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

//! Definition loader: the external collaborator that turns a YAML
//! document into the `(axioms, rules)` shape the compiler consumes.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// A formal-system definition: two ordered sequences of raw strings, each
/// compiled independently by the pattern compiler.
#[derive(Debug, Deserialize)]
pub struct Definition {
    pub axioms: Vec<String>,
    #[serde(default)]
    pub rules: Vec<String>,
}

impl Definition {
    /// Read and parse a definition document from `path`.
    pub fn load(path: &Path) -> Result<Definition> {
        let text = std::fs::read_to_string(path)?;
        let definition: Definition = serde_yaml::from_str(&text)?;
        Ok(definition)
    }

    pub fn from_yaml(text: &str) -> Result<Definition> {
        Ok(serde_yaml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_miu_style_document() {
        let yaml = "\
axioms:
  - MI
rules:
  - \"x is .*, xI => xIU\"
  - \"x is .*, Mx => Mxx\"
";
        let def = Definition::from_yaml(yaml).unwrap();
        assert_eq!(def.axioms, vec!["MI".to_string()]);
        assert_eq!(def.rules.len(), 2);
    }

    #[test]
    fn rules_default_to_empty() {
        let def = Definition::from_yaml("axioms:\n  - MI\n").unwrap();
        assert!(def.rules.is_empty());
    }
}
