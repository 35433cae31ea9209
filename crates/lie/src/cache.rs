//! Process-wide memo tables.
//!
//! Every table maps a value key to an `Arc` of the computed result. Entries are never invalidated
//! by the engine itself since the keys fully determine the values; [`clear_caches`] exists to
//! bound memory in long-running processes.

use std::hash::{BuildHasherDefault, Hash};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use rustc_hash::FxHasher;

use crate::algebra::{AlgebraData, SimpleAlgebra};
use crate::irrep::{Irrep, IrrepCounter, Statistics};
use crate::weight_system::WeightSystem;

pub(crate) type Table<K, V> = Lazy<DashMap<K, Arc<V>, BuildHasherDefault<FxHasher>>>;

pub(crate) static ALGEBRA_DATA: Table<SimpleAlgebra, AlgebraData> = Lazy::new(Default::default);
pub(crate) static WEIGHT_SYSTEMS: Table<Irrep, WeightSystem> = Lazy::new(Default::default);
pub(crate) static PRODUCTS: Table<(Irrep, Irrep), IrrepCounter> = Lazy::new(Default::default);
pub(crate) static POWERS: Table<(Irrep, usize, Statistics), IrrepCounter> =
    Lazy::new(Default::default);

/// Look up `key`, computing and storing the value on a miss.
///
/// The computation runs without holding a shard lock, since computing one entry typically looks
/// up others in the same table. Two threads racing on the same key may both compute it; the first
/// insertion wins.
pub(crate) fn try_get_or_insert<K, V, E>(
    table: &Table<K, V>,
    key: K,
    compute: impl FnOnce() -> Result<V, E>,
) -> Result<Arc<V>, E>
where
    K: Eq + Hash,
{
    if let Some(value) = table.get(&key) {
        return Ok(Arc::clone(&value));
    }
    let value = Arc::new(compute()?);
    let entry = table.entry(key).or_insert(value);
    Ok(Arc::clone(&entry))
}

pub(crate) fn get_or_insert<K, V>(table: &Table<K, V>, key: K, compute: impl FnOnce() -> V) -> Arc<V>
where
    K: Eq + Hash,
{
    match try_get_or_insert(table, key, || Ok::<_, std::convert::Infallible>(compute())) {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Number of entries in each memo table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub algebras: usize,
    pub weight_systems: usize,
    pub products: usize,
    pub powers: usize,
}

pub fn cache_stats() -> CacheStats {
    CacheStats {
        algebras: ALGEBRA_DATA.len(),
        weight_systems: WEIGHT_SYSTEMS.len(),
        products: PRODUCTS.len(),
        powers: POWERS.len(),
    }
}

/// Drop every memoized result. Later computations repopulate the tables on demand and return the
/// same values.
pub fn clear_caches() {
    POWERS.clear();
    PRODUCTS.clear();
    WEIGHT_SYSTEMS.clear();
    ALGEBRA_DATA.clear();
}
