use std::collections::{HashMap, HashSet};

use crate::initials::InitialTable;

/// Glyphs in first-insertion order with set semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphSet {
    glyphs: Vec<String>,
    seen: HashSet<String>,
}

impl GlyphSet {
    /// Returns `true` if `glyph` was not already present.
    pub fn insert(&mut self, glyph: &str) -> bool {
        if self.seen.contains(glyph) {
            return false;
        }
        self.seen.insert(glyph.to_string());
        self.glyphs.push(glyph.to_string());
        true
    }

    pub fn contains(&self, glyph: &str) -> bool {
        self.seen.contains(glyph)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// All glyphs concatenated in insertion order.
    pub fn concat(&self) -> String {
        self.glyphs.concat()
    }
}

/// Initial → glyph set, one entry per initial of the [`InitialTable`].
#[derive(Debug, Clone)]
pub struct CharTable {
    sets: HashMap<&'static str, GlyphSet>,
}

impl CharTable {
    pub fn new(initials: &InitialTable) -> Self {
        let sets = initials
            .keys()
            .map(|(_, initial)| (initial, GlyphSet::default()))
            .collect();
        Self { sets }
    }

    /// Add `glyph` under `initial`. Unknown initials are ignored and return
    /// `false`, as do repeats.
    pub fn insert(&mut self, initial: &str, glyph: &str) -> bool {
        self.sets
            .get_mut(initial)
            .is_some_and(|set| set.insert(glyph))
    }

    pub fn get(&self, initial: &str) -> Option<&GlyphSet> {
        self.sets.get(initial)
    }

    pub fn chars(&self, initial: &str) -> &[String] {
        self.sets
            .get(initial)
            .map(GlyphSet::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, initial: &str, glyph: &str) -> bool {
        self.sets.get(initial).is_some_and(|set| set.contains(glyph))
    }

    /// Initials whose set holds `glyph`, in key order.
    pub fn initials_for(&self, initials: &InitialTable, glyph: &str) -> Vec<&'static str> {
        initials
            .keys()
            .map(|(_, initial)| initial)
            .filter(|initial| self.contains(initial, glyph))
            .collect()
    }

    /// Number of (initial, glyph) memberships across all sets.
    pub fn total(&self) -> usize {
        self.sets.values().map(GlyphSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_set_keeps_first_insertion_order() {
        let mut set = GlyphSet::default();
        assert!(set.insert("中"));
        assert!(set.insert("重"));
        assert!(!set.insert("中"));
        assert!(set.insert("种"));
        assert_eq!(set.len(), 3);
        assert_eq!(set.concat(), "中重种");
    }

    #[test]
    fn char_table_starts_with_26_empty_sets() {
        let initials = InitialTable::standard();
        let table = CharTable::new(initials);
        for (_, initial) in initials.keys() {
            assert!(table.get(initial).is_some_and(GlyphSet::is_empty));
        }
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn char_table_insert_and_query() {
        let initials = InitialTable::standard();
        let mut table = CharTable::new(initials);
        assert!(table.insert("zh", "重"));
        assert!(table.insert("ch", "重"));
        assert!(!table.insert("zh", "重"));
        assert!(!table.insert("v", "重"));
        assert_eq!(table.initials_for(initials, "重"), vec!["ch", "zh"]);
        assert_eq!(table.chars("zh"), ["重".to_string()]);
        assert!(table.chars("nope").is_empty());
        assert_eq!(table.total(), 2);
    }
}
