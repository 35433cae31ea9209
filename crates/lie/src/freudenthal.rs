//! Weights of an irreducible representation of a simple algebra, with multiplicities.
//!
//! The weights are generated level by level below the highest weight: a weight `w` with a
//! positive Dynkin label `w_i` has `w - k α_i` as a weight for `1 <= k <= w_i`, one level down for
//! each `α_i` subtracted. Multiplicities then follow from Freudenthal's recursion, processed in the
//! same order so that every weight above the current one is already known.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;

use crate::algebra::SimpleAlgebra;
use crate::error::{LieError, Result};
use crate::multiset::Multiset;
use crate::weight::Weight;

/// All weights of the irrep with the given highest weight, keyed by level. Level zero holds the
/// highest weight alone.
pub(crate) fn weights_by_level(
    simple_roots: &[Weight],
    highest_weight: &Weight,
) -> BTreeMap<usize, BTreeSet<Weight>> {
    let mut pending: BTreeMap<usize, BTreeSet<Weight>> = BTreeMap::new();
    let mut done = BTreeMap::new();
    pending.insert(0, BTreeSet::from([highest_weight.clone()]));

    while let Some((level, weights)) = pending.pop_first() {
        for weight in &weights {
            for (i, root) in simple_roots.iter().enumerate() {
                let mut child = weight.clone();
                for k in 1..=weight[i].max(0) as usize {
                    child = &child - root;
                    pending.entry(level + k).or_default().insert(child.clone());
                }
            }
        }
        done.insert(level, weights);
    }
    done
}

/// The weight system of the irrep of `algebra` with the given highest weight.
pub(crate) fn weight_multiplicities(
    algebra: &SimpleAlgebra,
    highest_weight: &Weight,
) -> Result<Multiset<Weight>> {
    let data = algebra.data();
    let delta = algebra.sum_of_positive_roots();
    let shifted_norm = |w: &Weight| {
        let shifted = w + &delta;
        data.scaled_scalar_product(shifted.components(), shifted.components())
    };
    let top = shifted_norm(highest_weight);

    let mut multiplicities: FxHashMap<Weight, i64> = FxHashMap::default();
    for (level, weights) in weights_by_level(&data.simple_roots, highest_weight) {
        for weight in weights {
            if level == 0 {
                multiplicities.insert(weight, 1);
                continue;
            }

            // Every w + kα along a root string is either a weight at a lower level, hence already
            // computed, or not a weight at all. Strings are unbroken, so the first miss ends them.
            let mut numerator = 0;
            for root in &data.positive_roots {
                let mut above = &weight + root;
                while let Some(&m) = multiplicities.get(&above) {
                    numerator += m * data.scaled_scalar_product(above.components(), root.components());
                    above = &above + root;
                }
            }
            numerator *= 2;
            let denominator = top - shifted_norm(&weight);

            if denominator == 0 || numerator % denominator != 0 {
                return Err(LieError::NonIntegralMultiplicity {
                    highest_weight: highest_weight.clone(),
                    weight,
                    numerator,
                    denominator,
                });
            }
            let multiplicity = numerator / denominator;
            if multiplicity < 0 {
                return Err(LieError::NegativeMultiplicity {
                    highest_weight: highest_weight.clone(),
                    weight,
                    multiplicity,
                });
            }
            multiplicities.insert(weight, multiplicity);
        }
    }

    Ok(multiplicities.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Series;
    use expect_test::expect;

    #[test]
    fn test_levels_su3_adjoint() {
        let a2 = SimpleAlgebra::new(Series::A, 2).unwrap();
        let levels = weights_by_level(&a2.simple_roots(), &Weight::from([1, 1]));
        expect![[r#"
            {
                0: {
                    (1 1),
                },
                1: {
                    (-1 2),
                    (2 -1),
                },
                2: {
                    (0 0),
                },
                3: {
                    (-2 1),
                    (1 -2),
                },
                4: {
                    (-1 -1),
                },
            }
        "#]]
        .assert_debug_eq(&levels);
    }

    #[test]
    fn test_multiplicities_su3_adjoint() {
        let a2 = SimpleAlgebra::new(Series::A, 2).unwrap();
        let system = weight_multiplicities(&a2, &Weight::from([1, 1])).unwrap();
        assert_eq!(system.total(), 8);
        assert_eq!(system.get(&Weight::from([0, 0])), 2);
        assert_eq!(system.len(), 7);
    }

    #[test]
    fn test_multiplicities_b2() {
        // The 10 of Sp(4) ~ SO(5) adjoint has the zero weight twice.
        let b2 = SimpleAlgebra::new(Series::B, 2).unwrap();
        let system = weight_multiplicities(&b2, &b2.highest_root()).unwrap();
        assert_eq!(system.total(), 10);
        assert_eq!(system.get(&Weight::from([0, 0])), 2);
    }
}
