use std::collections::HashMap;

use ticketry_canonical::Bytes32;

/// Enumerable set of venue keys with O(1) swap-delete.
///
/// Keys keep insertion order until a removal moves the last key into the
/// vacated slot.
#[derive(Debug, Clone, Default)]
pub struct VenueIndex {
    keys: Vec<Bytes32>,
    positions: HashMap<Bytes32, usize>,
}

impl VenueIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key`. Returns false if it is already present.
    pub fn push(&mut self, key: Bytes32) -> bool {
        if self.positions.contains_key(&key) {
            return false;
        }
        self.positions.insert(key, self.keys.len());
        self.keys.push(key);
        true
    }

    /// Removes `key` by moving the last key into its slot.
    ///
    /// Returns the position `key` occupied, or `None` if it was absent.
    pub fn swap_remove(&mut self, key: &Bytes32) -> Option<usize> {
        let position = self.positions.remove(key)?;
        self.keys.swap_remove(position);
        if let Some(moved) = self.keys.get(position) {
            self.positions.insert(*moved, position);
        }
        Some(position)
    }

    /// True if `key` is present.
    pub fn contains(&self, key: &Bytes32) -> bool {
        self.positions.contains_key(key)
    }

    /// Current position of `key`.
    pub fn position(&self, key: &Bytes32) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in index order.
    pub fn as_slice(&self) -> &[Bytes32] {
        &self.keys
    }

    /// Iterates over keys in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Bytes32> {
        self.keys.iter()
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = (&Bytes32, usize)> {
        self.positions.iter().map(|(key, pos)| (key, *pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> Bytes32 {
        Bytes32::parse(name).unwrap()
    }

    fn names(index: &VenueIndex) -> Vec<&str> {
        index.iter().map(|k| k.as_str()).collect()
    }

    #[test]
    fn push_rejects_duplicates() {
        let mut index = VenueIndex::new();
        assert!(index.push(key("a")));
        assert!(!index.push(key("a")));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn removing_middle_moves_tail() {
        let mut index = VenueIndex::new();
        for name in ["a", "b", "c", "d"] {
            index.push(key(name));
        }
        assert_eq!(index.swap_remove(&key("b")), Some(1));
        assert_eq!(names(&index), vec!["a", "d", "c"]);
        assert_eq!(index.position(&key("d")), Some(1));
        assert_eq!(index.position(&key("b")), None);
    }

    #[test]
    fn removing_last_keeps_order() {
        let mut index = VenueIndex::new();
        for name in ["a", "b", "c"] {
            index.push(key(name));
        }
        assert_eq!(index.swap_remove(&key("c")), Some(2));
        assert_eq!(names(&index), vec!["a", "b"]);
    }

    #[test]
    fn removing_absent_key() {
        let mut index = VenueIndex::new();
        index.push(key("a"));
        assert_eq!(index.swap_remove(&key("z")), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn removing_only_key() {
        let mut index = VenueIndex::new();
        index.push(key("a"));
        assert_eq!(index.swap_remove(&key("a")), Some(0));
        assert!(index.is_empty());
        assert!(index.push(key("a")));
    }
}
