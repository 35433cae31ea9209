use std::collections::btree_map::{BTreeMap, Entry};

use crate::algebra::Algebra;
use crate::error::{LieError, Result};
use crate::irrep::{Irrep, IrrepCounter};
use crate::multiset::Multiset;
use crate::weight::Weight;

/// A finite multiset of weights, i.e. the character of a finite-dimensional representation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightSystem {
    weights: Multiset<Weight>,
}

impl WeightSystem {
    pub fn new(weights: Multiset<Weight>) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &Multiset<Weight> {
        &self.weights
    }

    pub fn into_weights(self) -> Multiset<Weight> {
        self.weights
    }

    pub fn dimension(&self) -> i64 {
        self.weights.total()
    }

    pub fn multiplicity(&self, weight: &Weight) -> i64 {
        self.weights.get(weight)
    }

    /// The weight system of the tensor product: all pairwise sums, with multiplicities multiplied.
    pub fn product(&self, other: &WeightSystem) -> WeightSystem {
        let mut weights = Multiset::new();
        for (a, m) in self.weights.iter() {
            for (b, n) in other.weights.iter() {
                weights.insert(a + b, m * n);
            }
        }
        WeightSystem { weights }
    }

    /// The weight system of a direct product of algebras: concatenated weights, multiplicities
    /// multiplied.
    pub fn concat(&self, other: &WeightSystem) -> WeightSystem {
        let mut weights = Multiset::new();
        for (a, m) in self.weights.iter() {
            for (b, n) in other.weights.iter() {
                weights.insert(a.concat(b), m * n);
            }
        }
        WeightSystem { weights }
    }

    /// Write this weight system as a sum of irreps of `algebra`.
    ///
    /// Repeatedly take the highest remaining weight (by height, then lexicographically), record an
    /// irrep with that highest weight and subtract its weight system.
    pub fn decompose(&self, algebra: &Algebra) -> Result<IrrepCounter> {
        let mut remaining: BTreeMap<(i64, Weight), i64> = BTreeMap::new();
        for (weight, count) in self.weights.iter() {
            remaining.insert((algebra.height(weight)?, weight.clone()), count);
        }

        let mut irreps = IrrepCounter::new();
        while let Some(((_, highest), multiplicity)) = remaining.pop_last() {
            // The highest remaining weight of a genuine character is dominant and occurs a positive
            // number of times.
            if multiplicity < 0 || highest.iter().any(|x| x < 0) {
                return Err(LieError::InconsistentDecomposition {
                    weight: highest,
                    multiplicity,
                });
            }
            let irrep = Irrep::new(algebra.clone(), highest.clone())?;
            let system = irrep.weight_system()?;
            irreps.insert(irrep, multiplicity);

            // The highest weight occurs once in its irrep, so popping it already accounted for it.
            for (weight, count) in system.weights.iter().filter(|(w, _)| **w != highest) {
                match remaining.entry((algebra.height(weight)?, weight.clone())) {
                    Entry::Occupied(mut e) => {
                        *e.get_mut() -= count * multiplicity;
                        if *e.get() == 0 {
                            e.remove();
                        }
                    }
                    Entry::Vacant(e) => {
                        e.insert(-count * multiplicity);
                    }
                }
            }
        }
        Ok(irreps)
    }
}

impl From<Multiset<Weight>> for WeightSystem {
    fn from(weights: Multiset<Weight>) -> Self {
        Self::new(weights)
    }
}
