use std::{collections::HashMap, hash::Hash};

/// Frequency map that remembers insertion order.
///
/// Ties are always broken in favour of the key that was counted first, both
/// when picking the leader and when ranking.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, i64)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn add(&mut self, key: K, amount: i64) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    pub fn get(&self, key: &K) -> i64 {
        self.index.get(key).map_or(0, |&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, i64)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    pub fn leader(&self) -> Option<(&K, i64)> {
        self.iter()
            .fold(None, |best: Option<(&K, i64)>, (key, count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((key, count)),
            })
    }

    /// All entries by count, highest first. The sort is stable.
    pub fn ranked(&self) -> Vec<(K, i64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|(_, lhs), (_, rhs)| rhs.cmp(lhs));
        ranked
    }

    pub fn top(&self, n: usize) -> Vec<(K, i64)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl<K: Eq + Hash + Clone> Default for Tally<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, i64)> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut tally = Self::new();
        for (key, amount) in iter {
            tally.add(key, amount);
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_per_key() {
        let tally: Tally<&str> = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(tally.get(&"a"), 4);
        assert_eq!(tally.get(&"b"), 2);
        assert_eq!(tally.get(&"c"), 0);
        assert_eq!(tally.total(), 6);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn leader_prefers_first_inserted_on_tie() {
        let tally: Tally<&str> = [("late", 0), ("x", 3), ("y", 3)].into_iter().collect();
        assert_eq!(tally.leader(), Some((&"x", 3)));
    }

    #[test]
    fn ranking_is_stable() {
        let tally: Tally<&str> = [("a", 1), ("b", 5), ("c", 1), ("d", 5)].into_iter().collect();
        assert_eq!(tally.ranked(), vec![("b", 5), ("d", 5), ("a", 1), ("c", 1)]);
        assert_eq!(tally.top(1), vec![("b", 5)]);
    }

    #[test]
    fn empty_tally_has_no_leader() {
        let tally: Tally<i32> = Tally::new();
        assert!(tally.is_empty());
        assert_eq!(tally.leader(), None);
        assert!(tally.top(4).is_empty());
    }
}
