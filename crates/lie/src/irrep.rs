use std::fmt;
use std::ops::{Add, Range};
use std::str::FromStr;
use std::sync::Arc;

use itertools::Itertools;

use crate::algebra::Algebra;
use crate::cache::{self, POWERS, PRODUCTS, WEIGHT_SYSTEMS};
use crate::error::{LieError, Result};
use crate::freudenthal::weight_multiplicities;
use crate::multiset::Multiset;
use crate::weight::Weight;
use crate::weight_system::WeightSystem;

/// A sum of irreps with multiplicities.
pub type IrrepCounter = Multiset<Irrep>;

/// Whether identical copies of a field commute or anticommute, which decides between symmetric
/// and antisymmetric powers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Statistics {
    #[default]
    Boson,
    Fermion,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistics::Boson => write!(f, "boson"),
            Statistics::Fermion => write!(f, "fermion"),
        }
    }
}

impl FromStr for Statistics {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "boson" | "BOSON" => Ok(Statistics::Boson),
            "fermion" | "FERMION" => Ok(Statistics::Fermion),
            _ => Err(anyhow::anyhow!("Unknown statistics '{s}'")),
        }
    }
}

/// An irreducible representation, identified by its algebra and highest weight.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Irrep {
    algebra: Algebra,
    highest_weight: Weight,
}

impl Irrep {
    /// The highest weight must have the algebra's rank and non-negative Dynkin labels.
    pub fn new(algebra: Algebra, highest_weight: Weight) -> Result<Self> {
        algebra.check_weight(&highest_weight)?;
        if highest_weight.iter().any(|label| label < 0) {
            return Err(LieError::NonDominantWeight {
                weight: highest_weight,
            });
        }
        Ok(Self {
            algebra,
            highest_weight,
        })
    }

    /// Only for weights known to have the algebra's rank.
    pub(crate) fn new_unchecked(algebra: Algebra, highest_weight: Weight) -> Self {
        debug_assert_eq!(algebra.rank(), highest_weight.len());
        Self {
            algebra,
            highest_weight,
        }
    }

    pub fn singlet(algebra: Algebra) -> Self {
        let highest_weight = Weight::zero(algebra.rank());
        Self {
            algebra,
            highest_weight,
        }
    }

    pub fn algebra(&self) -> &Algebra {
        &self.algebra
    }

    pub fn highest_weight(&self) -> &Weight {
        &self.highest_weight
    }

    pub fn is_singlet(&self) -> bool {
        self.highest_weight.is_zero()
    }

    /// One irrep per simple factor of the algebra.
    pub fn split(&self) -> Vec<Irrep> {
        self.algebra
            .factors()
            .iter()
            .zip(self.algebra.split_weight(&self.highest_weight))
            .map(|(&algebra, highest_weight)| Irrep {
                algebra: algebra.into(),
                highest_weight,
            })
            .collect()
    }

    /// The irrep of the direct sum of the two algebras.
    pub fn direct_sum(&self, other: &Irrep) -> Irrep {
        Irrep {
            algebra: self.algebra.direct_sum(&other.algebra),
            highest_weight: self.highest_weight.concat(&other.highest_weight),
        }
    }

    /// Restrict to the simple factors in `range`.
    pub fn factors(&self, range: Range<usize>) -> Irrep {
        let ranges = self.algebra.factor_ranges();
        let start = ranges.get(range.start).map_or(self.highest_weight.len(), |r| r.start);
        let end = if range.end > range.start {
            ranges[range.end - 1].end
        } else {
            start
        };
        Irrep {
            algebra: self.algebra.slice(range),
            highest_weight: self.highest_weight.slice(start..end),
        }
    }

    pub fn conjugate(&self) -> Irrep {
        Irrep {
            algebra: self.algebra.clone(),
            highest_weight: self.algebra.conjugate_weight_unchecked(&self.highest_weight),
        }
    }

    /// All weights of the representation, with multiplicities.
    pub fn weight_system(&self) -> Result<Arc<WeightSystem>> {
        cache::try_get_or_insert(&WEIGHT_SYSTEMS, self.clone(), || self.compute_weight_system())
    }

    fn compute_weight_system(&self) -> Result<WeightSystem> {
        match &self.algebra {
            Algebra::Simple(algebra) => {
                weight_multiplicities(algebra, &self.highest_weight).map(WeightSystem::new)
            }
            Algebra::Semisimple(_) => self.split().iter().try_fold(
                WeightSystem::new(Multiset::singleton(Weight::default())),
                |acc, irrep| -> Result<WeightSystem> { Ok(acc.concat(&*irrep.weight_system()?)) },
            ),
        }
    }

    pub fn dimension(&self) -> Result<i64> {
        Ok(self.weight_system()?.dimension())
    }

    fn check_algebra(&self, other: &Irrep) -> Result<()> {
        if self.algebra == other.algebra {
            Ok(())
        } else {
            Err(LieError::AlgebraMismatch {
                left: self.algebra.clone(),
                right: other.algebra.clone(),
            })
        }
    }

    /// Decompose the tensor product of two irreps of the same algebra.
    pub fn multiply(&self, other: &Irrep) -> Result<Arc<IrrepCounter>> {
        self.check_algebra(other)?;
        cache::try_get_or_insert(&PRODUCTS, (self.clone(), other.clone()), || -> Result<_> {
            match &self.algebra {
                Algebra::Simple(_) => self
                    .weight_system()?
                    .product(&*other.weight_system()?)
                    .decompose(&self.algebra),
                Algebra::Semisimple(factors) if factors.is_empty() => {
                    Ok(Multiset::singleton(self.clone()))
                }
                Algebra::Semisimple(_) => {
                    let products = self
                        .split()
                        .iter()
                        .zip(other.split())
                        .map(|(a, b)| a.multiply(&b))
                        .collect::<Result<Vec<_>>>()?;
                    Ok(self.combine_factors(&products))
                }
            }
        })
    }

    /// Reassemble per-factor decompositions into a decomposition for the whole algebra.
    fn combine_factors(&self, per_factor: &[Arc<IrrepCounter>]) -> IrrepCounter {
        per_factor
            .iter()
            .map(|counter| counter.iter())
            .multi_cartesian_product()
            .map(|choice| {
                let highest_weight =
                    Algebra::join_weights(choice.iter().map(|(irrep, _)| &irrep.highest_weight));
                let count = choice.iter().map(|(_, count)| count).product::<i64>();
                (
                    Irrep {
                        algebra: self.algebra.clone(),
                        highest_weight,
                    },
                    count,
                )
            })
            .collect()
    }

    /// Decompose the `exponent`-th symmetric (bosons) or antisymmetric (fermions) power.
    pub fn power(&self, exponent: usize, statistics: Statistics) -> Result<Arc<IrrepCounter>> {
        cache::try_get_or_insert(&POWERS, (self.clone(), exponent, statistics), || -> Result<_> {
            match exponent {
                0 => Ok(Multiset::singleton(Irrep::singlet(self.algebra.clone()))),
                1 => Ok(Multiset::singleton(self.clone())),
                _ => {
                    let system = self.weight_system()?;
                    let states: Vec<&Weight> = system.weights().elements().collect();
                    let rank = self.algebra.rank();
                    let sum = |combination: Vec<&&Weight>| {
                        let mut total = Weight::zero(rank);
                        for weight in combination {
                            total.add_assign_slice(weight.components());
                        }
                        total
                    };
                    let weights: Multiset<Weight> = match statistics {
                        Statistics::Boson => Multiset::from_elements(
                            states.iter().combinations_with_replacement(exponent).map(sum),
                        ),
                        Statistics::Fermion => {
                            Multiset::from_elements(states.iter().combinations(exponent).map(sum))
                        }
                    };
                    WeightSystem::new(weights).decompose(&self.algebra)
                }
            }
        })
    }
}

/// Decompose the product of two sums of irreps, distributing over both.
pub fn multiply_counters(first: &IrrepCounter, second: &IrrepCounter) -> Result<IrrepCounter> {
    let mut result = IrrepCounter::new();
    for (a, m) in first.iter() {
        for (b, n) in second.iter() {
            result.add_scaled(&*a.multiply(b)?, m * n);
        }
    }
    Ok(result)
}

impl Add for &Irrep {
    type Output = Irrep;

    fn add(self, other: &Irrep) -> Irrep {
        self.direct_sum(other)
    }
}

impl fmt::Display for Irrep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.algebra.factors().is_empty() {
            return write!(f, "1");
        }
        for (i, irrep) in self.split().iter().enumerate() {
            if i > 0 {
                write!(f, " x ")?;
            }
            write!(f, "{}{}", irrep.algebra, irrep.highest_weight)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Irrep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{Series, SimpleAlgebra};
    use proptest::prelude::*;
    use rstest::rstest;

    fn algebra(series: Series, rank: usize) -> Algebra {
        SimpleAlgebra::new(series, rank).unwrap().into()
    }

    fn irrep(algebra: &Algebra, weight: &[i64]) -> Irrep {
        Irrep::new(algebra.clone(), Weight::new(weight.to_vec())).unwrap()
    }

    #[rstest]
    #[case(Series::A, 1, &[1], 2)]
    #[case(Series::A, 1, &[4], 5)]
    #[case(Series::A, 2, &[1, 1], 8)]
    #[case(Series::A, 2, &[2, 2], 27)]
    #[case(Series::A, 4, &[0, 0, 0, 1], 5)]
    #[case(Series::A, 4, &[0, 1, 0, 0], 10)]
    #[case(Series::B, 3, &[0, 0, 1], 8)]
    #[case(Series::C, 2, &[1, 0], 4)]
    #[case(Series::D, 5, &[0, 0, 0, 0, 1], 16)]
    #[case(Series::D, 5, &[1, 0, 0, 0, 0], 10)]
    #[case(Series::E, 6, &[1, 0, 0, 0, 0, 0], 27)]
    #[case(Series::E, 6, &[0, 0, 0, 0, 0, 1], 78)]
    #[case(Series::F, 4, &[0, 0, 0, 1], 26)]
    #[case(Series::G, 2, &[0, 1], 7)]
    #[case(Series::G, 2, &[1, 0], 14)]
    fn test_dimension(
        #[case] series: Series,
        #[case] rank: usize,
        #[case] weight: &[i64],
        #[case] dimension: i64,
    ) {
        assert_eq!(irrep(&algebra(series, rank), weight).dimension().unwrap(), dimension);
    }

    #[test]
    fn test_new_rejects_invalid_highest_weights() {
        let a2 = algebra(Series::A, 2);
        assert_eq!(
            Irrep::new(a2.clone(), Weight::from([1, -1])),
            Err(LieError::NonDominantWeight { weight: Weight::from([1, -1]) })
        );
        assert_eq!(
            Irrep::new(a2, Weight::from([1])),
            Err(LieError::DimensionMismatch { expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_d5_spinor_weights() {
        let d5 = algebra(Series::D, 5);
        let system = irrep(&d5, &[0, 0, 0, 0, 1]).weight_system().unwrap();
        // Every weight of the spinor occurs once.
        assert_eq!(system.weights().len(), 16);
        assert!(system.weights().iter().all(|(_, m)| m == 1));
        assert_eq!(system.multiplicity(&Weight::from([0, 0, 0, 1, 0])), 0);
        assert_eq!(system.multiplicity(&Weight::from([0, 0, 0, -1, 0])), 1);
    }

    #[test]
    fn test_semisimple_weight_system() {
        let a1 = algebra(Series::A, 1);
        let a2 = algebra(Series::A, 2);
        let algebra = &a1 + &a2;
        let bifundamental = irrep(&algebra, &[1, 1, 0]);
        let system = bifundamental.weight_system().unwrap();
        assert_eq!(system.dimension(), 6);
        assert_eq!(system.multiplicity(&Weight::from([-1, -1, 1])), 1);

        let trivial = Irrep::singlet(Algebra::trivial());
        assert_eq!(trivial.dimension().unwrap(), 1);
        assert_eq!(trivial.to_string(), "1");
    }

    #[test]
    fn test_su2_products() {
        let a1 = algebra(Series::A, 1);
        let doublet = irrep(&a1, &[1]);
        let triplet = irrep(&a1, &[2]);
        expect_test::expect![[r#"A1(1) + A1(3)"#]]
            .assert_eq(&doublet.multiply(&triplet).unwrap().to_string());
        expect_test::expect![[r#"A1(0) + A1(2) + A1(4)"#]]
            .assert_eq(&triplet.multiply(&triplet).unwrap().to_string());
    }

    #[test]
    fn test_semisimple_product() {
        let algebra = &algebra(Series::A, 1) + &algebra(Series::A, 1);
        let vector = irrep(&algebra, &[1, 1]);
        let product = vector.multiply(&vector).unwrap();
        expect_test::expect![[r#"A1(0) x A1(0) + A1(0) x A1(2) + A1(2) x A1(0) + A1(2) x A1(2)"#]]
            .assert_eq(&product.to_string());
    }

    #[test]
    fn test_algebra_mismatch() {
        let doublet = irrep(&algebra(Series::A, 1), &[1]);
        let triplet = irrep(&algebra(Series::A, 2), &[1, 0]);
        assert!(matches!(
            doublet.multiply(&triplet),
            Err(LieError::AlgebraMismatch { .. })
        ));
    }

    #[test]
    fn test_powers() {
        let a1 = algebra(Series::A, 1);
        let doublet = irrep(&a1, &[1]);
        assert_eq!(
            doublet.power(2, Statistics::Boson).unwrap().to_string(),
            "A1(2)"
        );
        assert_eq!(
            doublet.power(2, Statistics::Fermion).unwrap().to_string(),
            "A1(0)"
        );
        // Pauli exclusion: three fermions cannot sit in two states.
        assert!(doublet.power(3, Statistics::Fermion).unwrap().is_empty());
        assert_eq!(
            doublet.power(0, Statistics::Fermion).unwrap().to_string(),
            "A1(0)"
        );

        let a2 = algebra(Series::A, 2);
        let triplet = irrep(&a2, &[1, 0]);
        assert_eq!(
            triplet.power(3, Statistics::Fermion).unwrap().to_string(),
            "A2(0 0)"
        );
        assert_eq!(
            triplet.power(2, Statistics::Boson).unwrap().to_string(),
            "A2(2 0)"
        );
    }

    #[test]
    fn test_conjugate_and_split() {
        let algebra = &(&algebra(Series::A, 2) + &algebra(Series::A, 1)) + &algebra(Series::D, 5);
        let irrep = irrep(&algebra, &[1, 0, 1, 0, 0, 0, 0, 1]);
        assert_eq!(
            irrep.conjugate().highest_weight(),
            &Weight::from([0, 1, 1, 0, 0, 0, 1, 0])
        );
        let parts = irrep.split();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2].to_string(), "D5(0 0 0 0 1)");
        assert_eq!(irrep.factors(1..3).highest_weight(), &Weight::from([1, 0, 0, 0, 0, 1]));
        assert_eq!(&parts[0] + &irrep.factors(1..3), irrep);
    }

    fn su3_irrep() -> impl Strategy<Value = Irrep> {
        (0i64..3, 0i64..3).prop_map(|(a, b)| irrep(&algebra(Series::A, 2), &[a, b]))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn product_commutes(a in su3_irrep(), b in su3_irrep()) {
            prop_assert_eq!(a.multiply(&b).unwrap(), b.multiply(&a).unwrap());
        }

        #[test]
        fn product_preserves_dimension(a in su3_irrep(), b in su3_irrep()) {
            let product = a.multiply(&b).unwrap();
            let total: i64 = product.iter().map(|(irrep, m)| m * irrep.dimension().unwrap()).sum();
            prop_assert_eq!(total, a.dimension().unwrap() * b.dimension().unwrap());
        }
    }
}
