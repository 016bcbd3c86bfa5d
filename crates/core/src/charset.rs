//! Deduplicated character sets built up by union.

use std::{
    collections::{BTreeSet, btree_set},
    fmt,
};

/// An unordered, deduplicated set of characters.
///
/// Sets only ever grow: every contribution is a union. Iteration order is
/// code point order so that output (and the text handed to the subsetter)
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    chars: BTreeSet<char>,
}

impl CharSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every character of `text`.
    pub fn add_str(&mut self, text: &str) {
        self.chars.extend(text.chars());
    }

    /// Adds every character of every word.
    pub fn add_words<S: AsRef<str>>(&mut self, words: impl IntoIterator<Item = S>) {
        for word in words {
            self.add_str(word.as_ref());
        }
    }

    /// Unions `other` into this set.
    pub fn union_with(&mut self, other: &CharSet) {
        self.chars.extend(other.chars.iter().copied());
    }

    /// Returns the union of both sets without modifying either.
    pub fn merge(&self, other: &CharSet) -> CharSet {
        let mut merged = self.clone();
        merged.union_with(other);
        merged
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// True if every character of `text` is in the set.
    pub fn contains_all(&self, text: &str) -> bool {
        text.chars().all(|c| self.contains(c))
    }

    pub fn is_superset(&self, other: &CharSet) -> bool {
        self.chars.is_superset(&other.chars)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl From<&str> for CharSet {
    fn from(text: &str) -> Self {
        text.chars().collect()
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            chars: iter.into_iter().collect(),
        }
    }
}

impl Extend<char> for CharSet {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        self.chars.extend(iter);
    }
}

impl IntoIterator for CharSet {
    type Item = char;
    type IntoIter = btree_set::IntoIter<char>;

    fn into_iter(self) -> Self::IntoIter {
        self.chars.into_iter()
    }
}

impl<'a> IntoIterator for &'a CharSet {
    type Item = &'a char;
    type IntoIter = btree_set::Iter<'a, char>;

    fn into_iter(self) -> Self::IntoIter {
        self.chars.iter()
    }
}

/// Writes the characters concatenated in code point order.
impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
