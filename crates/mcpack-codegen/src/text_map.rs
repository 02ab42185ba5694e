//! The named function map that renaming produces and optimization rewrites.
//!
//! Entries keep the key assigned at discovery. Removed entries stay in place
//! as tombstones so their identifiers can still be resolved, but they are
//! skipped by iteration, counting and emission.

use mcpack_common::{Identifier, TagRef};
use rustc_hash::FxHashMap;

use crate::ir::{FunctionKey, Line};

#[derive(Debug, Clone)]
pub struct FunctionEntry {
    pub id: Identifier,
    pub label: String,
    /// Explicit functions are never inlined or removed.
    pub explicit: bool,
    pub lines: Vec<Line>,
    removed: bool,
}

impl FunctionEntry {
    pub fn new(id: Identifier, label: String, explicit: bool, lines: Vec<Line>) -> Self {
        Self {
            id,
            label,
            explicit,
            lines,
            removed: false,
        }
    }
}

/// A member of the load or tick function tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Function(FunctionKey),
    /// A function outside this build, by identifier.
    Id(Identifier),
    Tag(TagRef),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    values: Vec<TagValue>,
    pub replace: bool,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value unless it is already present.
    pub fn insert(&mut self, value: TagValue) {
        if !self.values.contains(&value) {
            self.values.push(value);
        }
    }

    pub fn values(&self) -> &[TagValue] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn count(&self, key: FunctionKey) -> usize {
        self.values
            .iter()
            .filter(|value| **value == TagValue::Function(key))
            .count()
    }
}

#[derive(Debug, Default)]
pub struct FunctionTextMap {
    entries: Vec<FunctionEntry>,
    by_id: FxHashMap<Identifier, FunctionKey>,
    pub load: TagSet,
    pub tick: TagSet,
}

impl FunctionTextMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; entries must be pushed in key order.
    pub fn push(&mut self, entry: FunctionEntry) -> FunctionKey {
        let key = FunctionKey(self.entries.len() as u32);
        self.by_id.insert(entry.id.clone(), key);
        self.entries.push(entry);
        key
    }

    pub fn contains_id(&self, id: &Identifier) -> bool {
        self.by_id.contains_key(id)
    }

    /// Look up a live function by identifier.
    pub fn lookup(&self, id: &Identifier) -> Option<FunctionKey> {
        self.by_id
            .get(id)
            .copied()
            .filter(|key| !self.entries[key.index()].removed)
    }

    /// The identifier of any entry, removed or not.
    pub fn id(&self, key: FunctionKey) -> &Identifier {
        &self.entries[key.index()].id
    }

    pub fn get(&self, key: FunctionKey) -> Option<&FunctionEntry> {
        self.entries.get(key.index()).filter(|entry| !entry.removed)
    }

    pub fn get_mut(&mut self, key: FunctionKey) -> Option<&mut FunctionEntry> {
        self.entries.get_mut(key.index()).filter(|entry| !entry.removed)
    }

    /// Live entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (FunctionKey, &FunctionEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.removed)
            .map(|(i, entry)| (FunctionKey(i as u32), entry))
    }

    pub fn keys(&self) -> Vec<FunctionKey> {
        self.iter().map(|(key, _)| key).collect()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live and not explicit.
    pub fn is_eligible(&self, key: FunctionKey) -> bool {
        self.get(key).is_some_and(|entry| !entry.explicit)
    }

    /// Occurrences of `key` across load/tick membership and every live body,
    /// including its own.
    pub fn reference_count(&self, key: FunctionKey) -> usize {
        let in_bodies: usize = self
            .iter()
            .flat_map(|(_, entry)| entry.lines.iter())
            .map(|line| line.count_references(key))
            .sum();
        self.load.count(key) + self.tick.count(key) + in_bodies
    }

    pub fn remove(&mut self, key: FunctionKey) {
        if let Some(entry) = self.entries.get_mut(key.index()) {
            entry.removed = true;
            entry.lines.clear();
        }
    }

    /// The function's file content: lines joined by `\n`.
    pub fn render(&self, key: FunctionKey) -> Option<String> {
        let entry = self.get(key)?;
        let lines: Vec<String> = entry
            .lines
            .iter()
            .map(|line| line.render(|k| self.id(k)))
            .collect();
        Some(lines.join("\n"))
    }

    /// Canonical strings of a tag set's values, `#`-prefixed for tags.
    /// Values rendering to the same string are listed once.
    pub fn render_tag_values(&self, set: &TagSet) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(set.values.len());
        for value in &set.values {
            let text = match value {
                TagValue::Function(key) => self.id(*key).to_string(),
                TagValue::Id(id) => id.to_string(),
                TagValue::Tag(tag) => tag.to_string(),
            };
            if !out.contains(&text) {
                out.push(text);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(text: &str) -> Identifier {
        Identifier::parse(text).unwrap()
    }

    fn call(key: u32) -> Line {
        let mut line = Line::from_text("function ");
        line.push_ref(FunctionKey(key));
        line
    }

    fn sample() -> FunctionTextMap {
        let mut map = FunctionTextMap::new();
        map.push(FunctionEntry::new(id("ns:main"), "main".into(), true, vec![call(1), call(1)]));
        map.push(FunctionEntry::new(
            id("ns:internal/helper"),
            "helper".into(),
            false,
            vec![Line::from_text("say hi")],
        ));
        map
    }

    #[test]
    fn reference_count_includes_tags() {
        let mut map = sample();
        assert_eq!(map.reference_count(FunctionKey(1)), 2);
        assert_eq!(map.reference_count(FunctionKey(0)), 0);
        map.load.insert(TagValue::Function(FunctionKey(0)));
        assert_eq!(map.reference_count(FunctionKey(0)), 1);
    }

    #[test]
    fn removed_entries_are_skipped_but_resolvable() {
        let mut map = sample();
        map.remove(FunctionKey(1));
        assert!(map.get(FunctionKey(1)).is_none());
        assert!(!map.is_eligible(FunctionKey(1)));
        assert_eq!(map.lookup(&id("ns:internal/helper")), None);
        assert_eq!(map.id(FunctionKey(1)).to_string(), "ns:internal/helper");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn render_joins_lines() {
        let map = sample();
        assert_eq!(
            map.render(FunctionKey(0)).unwrap(),
            "function ns:internal/helper\nfunction ns:internal/helper"
        );
    }

    #[test]
    fn tag_set_deduplicates() {
        let mut set = TagSet::new();
        set.insert(TagValue::Function(FunctionKey(0)));
        set.insert(TagValue::Function(FunctionKey(0)));
        set.insert(TagValue::Tag(TagRef(id("minecraft:load"))));
        assert_eq!(set.values().len(), 2);

        let map = sample();
        assert_eq!(
            map.render_tag_values(&set),
            vec!["ns:main".to_string(), "#minecraft:load".to_string()]
        );
    }
}
