//! Preprocessor define sets.

use serde::{Deserialize, Serialize};

/// Ordered set of distinct preprocessor symbol names active for one shader
/// variant.
///
/// Only membership is meaningful to the dialect rules. Insertion order is kept
/// so that [`DefineSet::to_preamble`] is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct DefineSet {
    names: Vec<String>,
}

impl DefineSet {
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Insert a symbol. Accepts either a bare name (`MULTIVIEW`) or a full
    /// directive (`#define MULTIVIEW 1`); the stored entry is always the name.
    /// Returns `false` if the symbol was already present or the entry is empty.
    pub fn insert(&mut self, entry: &str) -> bool {
        let Some(name) = symbol_name(entry) else {
            return false;
        };
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn with(mut self, entry: &str) -> Self {
        self.insert(entry);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Collect every `#define` directive found in a block of text.
    pub fn parse_directives(text: &str) -> Self {
        text.lines()
            .filter(|line| line.trim_start().starts_with('#'))
            .fold(Self::new(), |set, line| set.with(line))
    }

    /// Render the set as `#define NAME` lines.
    pub fn to_preamble(&self) -> String {
        let mut out = String::new();
        for name in &self.names {
            out.push_str("#define ");
            out.push_str(name);
            out.push('\n');
        }
        out
    }
}

/// Extract the symbol name from a bare name or a `#define` directive.
fn symbol_name(entry: &str) -> Option<&str> {
    let entry = entry.trim();
    let body = match entry.strip_prefix('#') {
        Some(rest) => rest.trim_start().strip_prefix("define")?,
        None => entry,
    };
    let name = body.split_whitespace().next()?;
    // Function-like macros are keyed by their bare name.
    let name = name.split('(').next().unwrap_or(name);
    (!name.is_empty()).then_some(name)
}

impl<S: AsRef<str>> FromIterator<S> for DefineSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.insert(entry.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for DefineSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<DefineSet> for Vec<String> {
    fn from(set: DefineSet) -> Self {
        set.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_entries_distinct() {
        let mut set = DefineSet::new();
        assert!(set.insert("MULTIVIEW"));
        assert!(!set.insert("MULTIVIEW"));
        assert!(!set.insert("#define MULTIVIEW"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_directive_entries_are_normalised() {
        let set: DefineSet = ["#define NUM_BONES 4", "#  define SHADOWS", "#define BLUR(x) x"]
            .into_iter()
            .collect();
        assert!(set.contains("NUM_BONES"));
        assert!(set.contains("SHADOWS"));
        assert!(set.contains("BLUR"));
        assert!(!set.contains("4"));
    }

    #[test]
    fn test_empty_and_non_define_entries_ignored() {
        let mut set = DefineSet::new();
        assert!(!set.insert(""));
        assert!(!set.insert("   "));
        assert!(!set.insert("#ifdef FOO"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_parse_directives_and_preamble() {
        let set = DefineSet::parse_directives("#define A\nvoid main() {}\n#define B 2\n#ifdef A\n#endif\n");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(set.to_preamble(), "#define A\n#define B\n");
    }

    #[test]
    fn test_serde_as_list() {
        let set: DefineSet = serde_json::from_str(r#"["MULTIVIEW", "MULTIVIEW", "FOG"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["MULTIVIEW","FOG"]"#);
    }
}
