//! Insertion-ordered collection of bundle files

use std::collections::HashMap;

use bundle_fs::ConfigPath;

/// Map from canonical path to file content that remembers insertion order.
///
/// Iteration always yields entries in the order they were inserted, and a
/// path can be inserted only once. Both properties are part of this type's
/// contract: classification relies on the second to detect duplicate
/// targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedEntries {
    entries: Vec<(ConfigPath, String)>,
    index: HashMap<ConfigPath, usize>,
}

impl OrderedEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Returns the path back if it is already present.
    pub fn insert(&mut self, path: ConfigPath, content: String) -> Result<(), ConfigPath> {
        if self.index.contains_key(&path) {
            return Err(path);
        }
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push((path, content));
        Ok(())
    }

    pub fn get(&self, path: &ConfigPath) -> Option<&str> {
        self.index
            .get(path)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    pub fn contains(&self, path: &ConfigPath) -> bool {
        self.index.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigPath, &str)> {
        self.entries.iter().map(|(path, content)| (path, content.as_str()))
    }

    /// Apply `f` to every content, keeping order and keys.
    pub fn map_contents(self, mut f: impl FnMut(&str) -> String) -> Self {
        let entries = self
            .entries
            .into_iter()
            .map(|(path, content)| {
                let mapped = f(&content);
                (path, mapped)
            })
            .collect();
        Self {
            entries,
            index: self.index,
        }
    }

    /// Entries re-ordered to follow `order`; paths not in `order` are dropped.
    pub fn ordered_by(&self, order: &[ConfigPath]) -> Vec<(ConfigPath, String)> {
        order
            .iter()
            .filter_map(|path| self.get(path).map(|content| (path.clone(), content.to_string())))
            .collect()
    }

    /// Consume into a list sorted by path.
    pub fn into_sorted(self) -> Vec<(ConfigPath, String)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
