use std::collections::btree_map::{self, BTreeMap, Entry};
use std::fmt;

/// A multiset with integer multiplicities, kept in key order.
///
/// Entries with multiplicity zero are never stored. Multiplicities may temporarily become negative
/// through [`Multiset::add_scaled`]; callers that need a genuine multiset check for this.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Multiset<K: Ord>(BTreeMap<K, i64>);

impl<K: Ord> Default for Multiset<K> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<K: Ord> Multiset<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The multiset containing `key` once.
    pub fn singleton(key: K) -> Self {
        let mut result = Self::new();
        result.insert(key, 1);
        result
    }

    /// Count each element of `iter` once.
    pub fn from_elements(iter: impl IntoIterator<Item = K>) -> Self {
        iter.into_iter().map(|k| (k, 1)).collect()
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &K) -> i64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.0.contains_key(key)
    }

    /// Add `count` copies of `key`. `count` may be negative.
    pub fn insert(&mut self, key: K, count: i64) {
        if count == 0 {
            return;
        }
        match self.0.entry(key) {
            Entry::Vacant(e) => {
                e.insert(count);
            }
            Entry::Occupied(mut e) => {
                *e.get_mut() += count;
                if *e.get() == 0 {
                    e.remove();
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, i64)> + Clone + '_ {
        self.0.iter().map(|(k, &v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.0.keys()
    }

    /// Iterate over the elements, each repeated according to its (positive) multiplicity.
    pub fn elements(&self) -> impl Iterator<Item = &K> + Clone + '_ {
        self.iter()
            .flat_map(|(k, v)| std::iter::repeat(k).take(v.max(0) as usize))
    }

    /// Sum of all multiplicities.
    pub fn total(&self) -> i64 {
        self.0.values().sum()
    }

    pub fn retain(&mut self, mut f: impl FnMut(&K, i64) -> bool) {
        self.0.retain(|k, v| f(k, *v));
    }

    pub fn map_counts(mut self, f: impl Fn(i64) -> i64) -> Self {
        self.0.values_mut().for_each(|v| *v = f(*v));
        self.0.retain(|_, v| *v != 0);
        self
    }

    pub fn scaled(self, factor: i64) -> Self {
        self.map_counts(|v| v * factor)
    }
}

impl<K: Ord + Clone> Multiset<K> {
    /// `self += factor * other`. Multiplicities may become negative.
    pub fn add_scaled(&mut self, other: &Multiset<K>, factor: i64) {
        for (k, v) in other.iter() {
            self.insert(k.clone(), v * factor);
        }
    }

    pub fn add(&mut self, other: &Multiset<K>) {
        self.add_scaled(other, 1);
    }

    /// `self -= factor * other`, where elements whose multiplicity drops to zero or below are
    /// removed entirely.
    pub fn saturating_sub_scaled(&mut self, other: &Multiset<K>, factor: i64) {
        for (k, v) in other.iter() {
            if let Some(count) = self.0.get_mut(k) {
                *count -= v * factor;
                if *count <= 0 {
                    self.0.remove(k);
                }
            }
        }
    }
}

impl<K: Ord> FromIterator<(K, i64)> for Multiset<K> {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

impl<K: Ord> Extend<(K, i64)> for Multiset<K> {
    fn extend<I: IntoIterator<Item = (K, i64)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord> IntoIterator for Multiset<K> {
    type Item = (K, i64);
    type IntoIter = btree_map::IntoIter<K, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Ord + fmt::Display> fmt::Display for Multiset<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            if v != 1 {
                write!(f, "{v} ")?;
            }
            write!(f, "{k}")?;
        }
        Ok(())
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for Multiset<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut set = Multiset::from_elements(["a", "b", "a"]);
        assert_eq!(set.get(&"a"), 2);
        assert_eq!(set.total(), 3);
        set.insert("a", -2);
        assert!(!set.contains(&"a"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.elements().collect::<Vec<_>>(), vec![&"b"]);
    }

    #[test]
    fn test_scaled_arithmetic() {
        let a: Multiset<u32> = [(1, 2), (2, 1)].into_iter().collect();
        let b: Multiset<u32> = [(1, 1), (3, 4)].into_iter().collect();

        let mut signed = a.clone();
        signed.add_scaled(&b, -1);
        assert_eq!(
            signed,
            [(1, 1), (2, 1), (3, -4)].into_iter().collect::<Multiset<u32>>()
        );

        let mut saturated = a.clone();
        saturated.saturating_sub_scaled(&b, 2);
        assert_eq!(saturated, [(2, 1)].into_iter().collect::<Multiset<u32>>());

        assert_eq!(a.scaled(3).total(), 9);
    }

    #[test]
    fn test_display() {
        let set: Multiset<u32> = [(1, 2), (5, 1)].into_iter().collect();
        assert_eq!(set.to_string(), "2 1 + 5");
        assert_eq!(Multiset::<u32>::new().to_string(), "0");
    }
}
