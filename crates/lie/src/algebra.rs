//! Simple and semisimple Lie algebras, described by their Cartan data.
//!
//! All the structure constants are the standard tables for the classical and exceptional series,
//! with the simple roots labelled so that the Cartan matrix is
//!
//!  - tridiagonal with `-1` off the diagonal for the chain `0 - 1 - ... - (n - 1)`;
//!  - `B_n`: a `-2` at `(n - 2, n - 1)`; `C_n`: a `-2` at `(n - 1, n - 2)`;
//!  - `D_n`: the nodes `n - 2` and `n - 1` both attach to `n - 3`;
//!  - `E_n`: the chain `0 - ... - (n - 2)` with node `n - 1` attached to node `2`;
//!  - `F_4`: a `-2` at `(1, 2)`; `G_2`: a `-3` at `(0, 1)`.
//!
//! The metric is normalised so that long roots have norm squared `2`.

use std::fmt;
use std::ops::{Add, Range};
use std::sync::Arc;

use num_rational::Rational64;

use crate::cache::{self, ALGEBRA_DATA};
use crate::error::{LieError, Result};
use crate::freudenthal::weights_by_level;
use crate::weight::Weight;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Series {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Series {
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'A' => Series::A,
            'B' => Series::B,
            'C' => Series::C,
            'D' => Series::D,
            'E' => Series::E,
            'F' => Series::F,
            'G' => Series::G,
            _ => return None,
        })
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A simple Lie algebra, identified by its series and rank.
///
/// This is a plain value. Every derived quantity is computed once per (series, rank) pair and
/// shared by all values that compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimpleAlgebra {
    series: Series,
    rank: usize,
}

/// The constants of a simple algebra. The metric is stored as an integer matrix together with a
/// common denominator.
pub(crate) struct AlgebraData {
    pub(crate) cartan_matrix: Vec<Vec<i64>>,
    pub(crate) simple_roots: Vec<Weight>,
    pub(crate) highest_root: Weight,
    pub(crate) level_of_simple_roots: usize,
    pub(crate) metric: Vec<Vec<i64>>,
    pub(crate) metric_denominator: i64,
    pub(crate) level_vector: Vec<i64>,
    pub(crate) positive_roots: Vec<Weight>,
}

impl AlgebraData {
    fn new(algebra: SimpleAlgebra) -> Self {
        let cartan_matrix = algebra.compute_cartan_matrix();
        let simple_roots: Vec<Weight> = cartan_matrix.iter().cloned().map(Weight::new).collect();
        let highest_root = algebra.compute_highest_root();
        let level_of_simple_roots = algebra.compute_level_of_simple_roots();
        let (metric, metric_denominator) = algebra.compute_metric();

        // The adjoint representation has the highest root as its highest weight. Its weights at
        // levels up to the level of the simple roots are exactly the positive roots.
        let positive_roots = weights_by_level(&simple_roots, &highest_root)
            .into_iter()
            .take_while(|(level, _)| *level <= level_of_simple_roots)
            .flat_map(|(_, weights)| weights)
            .collect();

        Self {
            cartan_matrix,
            simple_roots,
            highest_root,
            level_of_simple_roots,
            metric,
            metric_denominator,
            level_vector: algebra.compute_level_vector(),
            positive_roots,
        }
    }

    /// The scalar product multiplied by `metric_denominator`.
    pub(crate) fn scaled_scalar_product(&self, first: &[i64], second: &[i64]) -> i64 {
        first
            .iter()
            .zip(&self.metric)
            .map(|(x, row)| x * row.iter().zip(second).map(|(m, y)| m * y).sum::<i64>())
            .sum()
    }
}

impl SimpleAlgebra {
    pub fn new(series: Series, rank: usize) -> Result<Self> {
        let bounds = match series {
            Series::A if rank < 1 => Some("n >= 1"),
            Series::B if rank < 2 => Some("n >= 2"),
            Series::C if rank < 2 => Some("n >= 2"),
            Series::D if rank < 4 => Some("n >= 4"),
            Series::E if !(6..=8).contains(&rank) => Some("6 <= n <= 8"),
            Series::F if rank != 4 => Some("n = 4"),
            Series::G if rank != 2 => Some("n = 2"),
            _ => None,
        };
        match bounds {
            Some(bounds) => Err(LieError::InvalidRank {
                series,
                rank,
                bounds,
            }),
            None => Ok(Self { series, rank }),
        }
    }

    /// Only for constants that are known to be within bounds.
    pub(crate) const fn new_unchecked(series: Series, rank: usize) -> Self {
        Self { series, rank }
    }

    pub fn series(&self) -> Series {
        self.series
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub(crate) fn data(&self) -> Arc<AlgebraData> {
        cache::get_or_insert(&ALGEBRA_DATA, *self, || AlgebraData::new(*self))
    }

    pub fn cartan_matrix(&self) -> Vec<Vec<i64>> {
        self.data().cartan_matrix.clone()
    }

    /// The simple roots, i.e. the rows of the Cartan matrix read as weights.
    pub fn simple_roots(&self) -> Vec<Weight> {
        self.data().simple_roots.clone()
    }

    pub fn highest_root(&self) -> Weight {
        self.data().highest_root.clone()
    }

    /// The level at which the simple roots appear in the adjoint representation, i.e. the height
    /// of the highest root minus one.
    pub fn level_of_simple_roots(&self) -> usize {
        self.data().level_of_simple_roots
    }

    pub fn positive_roots(&self) -> Vec<Weight> {
        self.data().positive_roots.clone()
    }

    /// Half the sum of the positive roots (the Weyl vector). In the Dynkin basis all its labels
    /// are `1`.
    pub fn sum_of_positive_roots(&self) -> Weight {
        Weight::new(vec![1; self.rank])
    }

    pub fn metric(&self) -> Vec<Vec<Rational64>> {
        let data = self.data();
        data.metric
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&x| Rational64::new(x, data.metric_denominator))
                    .collect()
            })
            .collect()
    }

    pub fn scalar_product(&self, first: &Weight, second: &Weight) -> Rational64 {
        let data = self.data();
        Rational64::new(
            data.scaled_scalar_product(first.components(), second.components()),
            data.metric_denominator,
        )
    }

    pub fn norm_squared(&self, weight: &Weight) -> Rational64 {
        self.scalar_product(weight, weight)
    }

    /// The heights assigned to each fundamental weight direction. Dotting a weight with this
    /// vector gives a total order refining the dominance order.
    pub fn level_vector(&self) -> Vec<i64> {
        self.data().level_vector.clone()
    }

    pub fn height(&self, weight: &Weight) -> Result<i64> {
        weight.check_len(self.rank)?;
        Ok(weight.dot(&self.data().level_vector))
    }

    /// The highest weight of the conjugate representation.
    pub fn conjugate_weight(&self, weight: &Weight) -> Result<Weight> {
        weight.check_len(self.rank)?;
        Ok(self.conjugate_weight_unchecked(weight))
    }

    /// As [`SimpleAlgebra::conjugate_weight`], for weights known to have the right length.
    pub(crate) fn conjugate_weight_unchecked(&self, weight: &Weight) -> Weight {
        let n = self.rank;
        match self.series {
            Series::A => weight.reversed(),
            Series::D if n % 2 == 1 => {
                let mut components = weight.components().to_vec();
                components.swap(n - 2, n - 1);
                Weight::new(components)
            }
            Series::E if n == 6 => {
                let w = weight.components();
                Weight::new(vec![w[4], w[3], w[2], w[1], w[0], w[5]])
            }
            _ => weight.clone(),
        }
    }

    fn compute_cartan_matrix(&self) -> Vec<Vec<i64>> {
        let n = self.rank;
        let exceptional: Vec<((usize, usize), i64)> = match self.series {
            Series::A => vec![],
            Series::B => vec![((n - 2, n - 1), -2)],
            Series::C => vec![((n - 1, n - 2), -2)],
            Series::D => vec![
                ((n - 3, n - 1), -1),
                ((n - 1, n - 3), -1),
                ((n - 2, n - 1), 0),
                ((n - 1, n - 2), 0),
            ],
            Series::E => vec![
                ((2, n - 1), -1),
                ((n - 1, 2), -1),
                ((n - 1, n - 2), 0),
                ((n - 2, n - 1), 0),
            ],
            Series::F => vec![((1, 2), -2)],
            Series::G => vec![((0, 1), -3)],
        };

        (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        exceptional
                            .iter()
                            .find(|(position, _)| *position == (i, j))
                            .map(|(_, value)| *value)
                            .unwrap_or(match i.abs_diff(j) {
                                0 => 2,
                                1 => -1,
                                _ => 0,
                            })
                    })
                    .collect()
            })
            .collect()
    }

    fn compute_highest_root(&self) -> Weight {
        let n = self.rank;
        let unit = |index: usize| {
            let mut components = vec![0; n];
            components[index] = 1;
            Weight::new(components)
        };
        match self.series {
            Series::A if n == 1 => Weight::from([2]),
            Series::A => {
                let mut components = vec![0; n];
                components[0] = 1;
                components[n - 1] = 1;
                Weight::new(components)
            }
            // For B2 the second simple root is short, so the highest root is twice its weight.
            Series::B if n == 2 => Weight::from([0, 2]),
            Series::B | Series::D => unit(1),
            Series::C => 2 * &unit(0),
            Series::E => match n {
                6 => unit(5),
                7 => unit(0),
                _ => unit(6),
            },
            Series::F | Series::G => unit(0),
        }
    }

    fn compute_level_of_simple_roots(&self) -> usize {
        let n = self.rank;
        match self.series {
            Series::A => n - 1,
            Series::B | Series::C => 2 * n - 2,
            Series::D => 2 * n - 4,
            Series::E => match n {
                6 => 10,
                7 => 16,
                _ => 28,
            },
            Series::F => 10,
            Series::G => 4,
        }
    }

    /// Returns the metric multiplied by the denominator, together with the denominator.
    fn compute_metric(&self) -> (Vec<Vec<i64>>, i64) {
        fn table(rows: &[&[i64]], denominator: i64) -> (Vec<Vec<i64>>, i64) {
            (rows.iter().map(|row| row.to_vec()).collect(), denominator)
        }
        let n = self.rank as i64;
        let build = |element: &dyn Fn(i64, i64) -> i64, denominator: i64| -> (Vec<Vec<i64>>, i64) {
            (
                (1..=n)
                    .map(|i| (1..=n).map(|j| element(i, j)).collect())
                    .collect(),
                denominator,
            )
        };

        // Indices below run from 1 to n.
        match (self.series, self.rank) {
            (Series::A, _) => build(&|i, j| i.min(j) * (n + 1 - i.max(j)), n + 1),
            (Series::B, _) => build(
                &|i, j| match (i == n, j == n) {
                    (true, true) => n,
                    (true, false) => 2 * j,
                    (false, true) => 2 * i,
                    (false, false) => 4 * i.min(j),
                },
                4,
            ),
            (Series::C, _) => build(&|i, j| i.min(j), 2),
            (Series::D, _) => build(
                &|i, j| match (i > n - 2, j > n - 2) {
                    (true, true) if i == j => n,
                    (true, true) => n - 2,
                    (true, false) => 2 * j,
                    (false, true) => 2 * i,
                    (false, false) => 4 * i.min(j),
                },
                4,
            ),
            (Series::E, 6) => table(
                &[
                    &[4, 5, 6, 4, 2, 3],
                    &[5, 10, 12, 8, 4, 6],
                    &[6, 12, 18, 12, 6, 9],
                    &[4, 8, 12, 10, 5, 6],
                    &[2, 4, 6, 5, 4, 3],
                    &[3, 6, 9, 6, 3, 6],
                ],
                3,
            ),
            (Series::E, 7) => table(
                &[
                    &[4, 6, 8, 6, 4, 2, 4],
                    &[6, 12, 16, 12, 8, 4, 8],
                    &[8, 16, 24, 18, 12, 6, 12],
                    &[6, 12, 18, 15, 10, 5, 9],
                    &[4, 8, 12, 10, 8, 4, 6],
                    &[2, 4, 6, 5, 4, 3, 3],
                    &[4, 8, 12, 9, 6, 3, 7],
                ],
                2,
            ),
            (Series::E, _) => table(
                &[
                    &[4, 7, 10, 8, 6, 4, 2, 5],
                    &[7, 14, 20, 16, 12, 8, 4, 10],
                    &[10, 20, 30, 24, 18, 12, 6, 15],
                    &[8, 16, 24, 20, 15, 10, 5, 12],
                    &[6, 12, 18, 15, 12, 8, 4, 9],
                    &[4, 8, 12, 10, 8, 6, 3, 6],
                    &[2, 4, 6, 5, 4, 3, 2, 3],
                    &[5, 10, 15, 12, 9, 6, 3, 8],
                ],
                1,
            ),
            (Series::F, _) => table(
                &[&[4, 6, 4, 2], &[6, 12, 8, 4], &[4, 8, 6, 3], &[2, 4, 3, 2]],
                2,
            ),
            (Series::G, _) => table(&[&[6, 3], &[3, 2]], 3),
        }
    }

    fn compute_level_vector(&self) -> Vec<i64> {
        let n = self.rank as i64;
        match self.series {
            Series::A => (0..n).map(|i| (n - i) * (i + 1)).collect(),
            Series::B => (0..n - 1)
                .map(|i| (2 * n - i) * (i + 1))
                .chain([n * (n + 1) / 2])
                .collect(),
            Series::C => (0..n).map(|i| (2 * n - i - 1) * (i + 1)).collect(),
            Series::D => (0..n - 2)
                .map(|i| (2 * n - i - 2) * (i + 1))
                .chain([n * (n - 1) / 2; 2])
                .collect(),
            Series::E => match n {
                6 => vec![16, 30, 42, 30, 16, 22],
                7 => vec![34, 66, 96, 75, 52, 27, 49],
                _ => vec![92, 182, 270, 220, 168, 114, 58, 136],
            },
            Series::F => vec![22, 42, 30, 16],
            Series::G => vec![10, 6],
        }
    }
}

impl fmt::Display for SimpleAlgebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.series, self.rank)
    }
}

impl fmt::Debug for SimpleAlgebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A simple or semisimple Lie algebra.
///
/// A semisimple algebra with a single factor is always represented as [`Algebra::Simple`], so
/// structurally equal algebras compare equal. `Semisimple(vec![])` is the trivial algebra of rank
/// zero.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algebra {
    Simple(SimpleAlgebra),
    Semisimple(Vec<SimpleAlgebra>),
}

impl Algebra {
    pub fn from_factors(mut factors: Vec<SimpleAlgebra>) -> Self {
        if factors.len() == 1 {
            Algebra::Simple(factors.remove(0))
        } else {
            Algebra::Semisimple(factors)
        }
    }

    pub fn trivial() -> Self {
        Algebra::Semisimple(Vec::new())
    }

    pub fn factors(&self) -> &[SimpleAlgebra] {
        match self {
            Algebra::Simple(algebra) => std::slice::from_ref(algebra),
            Algebra::Semisimple(factors) => factors,
        }
    }

    pub fn rank(&self) -> usize {
        self.factors().iter().map(SimpleAlgebra::rank).sum()
    }

    pub fn level_vector(&self) -> Vec<i64> {
        match self {
            Algebra::Simple(algebra) => algebra.level_vector(),
            Algebra::Semisimple(factors) => factors
                .iter()
                .flat_map(|algebra| algebra.data().level_vector.clone())
                .collect(),
        }
    }

    pub fn height(&self, weight: &Weight) -> Result<i64> {
        self.check_weight(weight)?;
        Ok(weight.dot(&self.level_vector()))
    }

    /// The component ranges of a weight that belong to each simple factor.
    pub fn factor_ranges(&self) -> Vec<Range<usize>> {
        let mut offset = 0;
        self.factors()
            .iter()
            .map(|algebra| {
                let range = offset..offset + algebra.rank();
                offset = range.end;
                range
            })
            .collect()
    }

    pub fn split_weight(&self, weight: &Weight) -> Vec<Weight> {
        self.factor_ranges()
            .into_iter()
            .map(|range| weight.slice(range))
            .collect()
    }

    pub fn join_weights<'a>(weights: impl IntoIterator<Item = &'a Weight>) -> Weight {
        weights.into_iter().flat_map(Weight::iter).collect()
    }

    /// The algebra made of the simple factors in `range`.
    pub fn slice(&self, range: Range<usize>) -> Algebra {
        Algebra::from_factors(self.factors()[range].to_vec())
    }

    pub fn direct_sum(&self, other: &Algebra) -> Algebra {
        Algebra::from_factors(
            self.factors()
                .iter()
                .chain(other.factors())
                .copied()
                .collect(),
        )
    }

    pub fn conjugate_weight(&self, weight: &Weight) -> Result<Weight> {
        self.check_weight(weight)?;
        Ok(self.conjugate_weight_unchecked(weight))
    }

    pub(crate) fn conjugate_weight_unchecked(&self, weight: &Weight) -> Weight {
        Algebra::join_weights(
            &self
                .factors()
                .iter()
                .zip(self.split_weight(weight))
                .map(|(algebra, weight)| algebra.conjugate_weight_unchecked(&weight))
                .collect::<Vec<_>>(),
        )
    }

    pub fn check_weight(&self, weight: &Weight) -> Result<()> {
        weight.check_len(self.rank())
    }
}

impl From<SimpleAlgebra> for Algebra {
    fn from(algebra: SimpleAlgebra) -> Self {
        Algebra::Simple(algebra)
    }
}

impl Add for &Algebra {
    type Output = Algebra;

    fn add(self, other: &Algebra) -> Algebra {
        self.direct_sum(other)
    }
}

impl Add for Algebra {
    type Output = Algebra;

    fn add(self, other: Algebra) -> Algebra {
        self.direct_sum(&other)
    }
}

impl fmt::Display for Algebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factors = self.factors();
        if factors.is_empty() {
            return write!(f, "0");
        }
        for (i, algebra) in factors.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{algebra}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Algebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn simple(series: Series, rank: usize) -> SimpleAlgebra {
        SimpleAlgebra::new(series, rank).unwrap()
    }

    fn weights(list: &[&[i64]]) -> Vec<Weight> {
        list.iter().map(|w| Weight::new(w.to_vec())).collect()
    }

    fn rationals(rows: &[&[(i64, i64)]]) -> Vec<Vec<Rational64>> {
        rows.iter()
            .map(|row| row.iter().map(|&(n, d)| Rational64::new(n, d)).collect())
            .collect()
    }

    #[rstest]
    #[case(Series::A, 0)]
    #[case(Series::B, 1)]
    #[case(Series::C, 1)]
    #[case(Series::D, 3)]
    #[case(Series::E, 5)]
    #[case(Series::E, 9)]
    #[case(Series::F, 3)]
    #[case(Series::G, 3)]
    fn test_invalid_rank(#[case] series: Series, #[case] rank: usize) {
        let err = SimpleAlgebra::new(series, rank).unwrap_err();
        assert!(matches!(err, LieError::InvalidRank { series: s, rank: r, .. } if s == series && r == rank));
    }

    #[test]
    fn test_invalid_rank_message() {
        let err = SimpleAlgebra::new(Series::E, 9).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected rank 9 for algebra series E. The rank n must satisfy: 6 <= n <= 8"
        );
    }

    #[rstest]
    #[case(Series::A, 1, vec![vec![2]])]
    #[case(Series::A, 2, vec![vec![2, -1], vec![-1, 2]])]
    #[case(Series::B, 4, vec![vec![2, -1, 0, 0], vec![-1, 2, -1, 0], vec![0, -1, 2, -2], vec![0, 0, -1, 2]])]
    #[case(Series::C, 3, vec![vec![2, -1, 0], vec![-1, 2, -1], vec![0, -2, 2]])]
    #[case(Series::D, 5, vec![
        vec![2, -1, 0, 0, 0],
        vec![-1, 2, -1, 0, 0],
        vec![0, -1, 2, -1, -1],
        vec![0, 0, -1, 2, 0],
        vec![0, 0, -1, 0, 2],
    ])]
    #[case(Series::E, 6, vec![
        vec![2, -1, 0, 0, 0, 0],
        vec![-1, 2, -1, 0, 0, 0],
        vec![0, -1, 2, -1, 0, -1],
        vec![0, 0, -1, 2, -1, 0],
        vec![0, 0, 0, -1, 2, 0],
        vec![0, 0, -1, 0, 0, 2],
    ])]
    #[case(Series::E, 8, vec![
        vec![2, -1, 0, 0, 0, 0, 0, 0],
        vec![-1, 2, -1, 0, 0, 0, 0, 0],
        vec![0, -1, 2, -1, 0, 0, 0, -1],
        vec![0, 0, -1, 2, -1, 0, 0, 0],
        vec![0, 0, 0, -1, 2, -1, 0, 0],
        vec![0, 0, 0, 0, -1, 2, -1, 0],
        vec![0, 0, 0, 0, 0, -1, 2, 0],
        vec![0, 0, -1, 0, 0, 0, 0, 2],
    ])]
    #[case(Series::F, 4, vec![vec![2, -1, 0, 0], vec![-1, 2, -2, 0], vec![0, -1, 2, -1], vec![0, 0, -1, 2]])]
    #[case(Series::G, 2, vec![vec![2, -3], vec![-1, 2]])]
    fn test_cartan_matrix(
        #[case] series: Series,
        #[case] rank: usize,
        #[case] expected: Vec<Vec<i64>>,
    ) {
        assert_eq!(simple(series, rank).cartan_matrix(), expected);
    }

    #[rstest]
    #[case(Series::A, 1, &[2], 0)]
    #[case(Series::A, 2, &[1, 1], 1)]
    #[case(Series::B, 2, &[0, 2], 2)]
    #[case(Series::B, 4, &[0, 1, 0, 0], 6)]
    #[case(Series::C, 6, &[2, 0, 0, 0, 0, 0], 10)]
    #[case(Series::D, 5, &[0, 1, 0, 0, 0], 6)]
    #[case(Series::E, 6, &[0, 0, 0, 0, 0, 1], 10)]
    #[case(Series::E, 7, &[1, 0, 0, 0, 0, 0, 0], 16)]
    #[case(Series::E, 8, &[0, 0, 0, 0, 0, 0, 1, 0], 28)]
    #[case(Series::F, 4, &[1, 0, 0, 0], 10)]
    #[case(Series::G, 2, &[1, 0], 4)]
    fn test_highest_root(
        #[case] series: Series,
        #[case] rank: usize,
        #[case] root: &[i64],
        #[case] level: usize,
    ) {
        let algebra = simple(series, rank);
        assert_eq!(algebra.highest_root(), Weight::new(root.to_vec()));
        assert_eq!(algebra.level_of_simple_roots(), level);
        // Long roots have norm squared 2 in every series.
        assert_eq!(
            algebra.norm_squared(&algebra.highest_root()),
            Rational64::from_integer(2)
        );
    }

    #[rstest]
    #[case(Series::A, 2, vec![vec![1, 1], vec![2, -1], vec![-1, 2]])]
    #[case(Series::C, 2, vec![vec![2, 0], vec![0, 1], vec![2, -1], vec![-2, 2]])]
    #[case(Series::G, 2, vec![vec![1, 0], vec![-1, 3], vec![0, 1], vec![1, -1], vec![2, -3], vec![-1, 2]])]
    #[case(Series::A, 3, vec![vec![1, 0, 1], vec![1, 1, -1], vec![-1, 1, 1], vec![2, -1, 0], vec![-1, 2, -1], vec![0, -1, 2]])]
    #[case(Series::B, 3, vec![
        vec![0, 1, 0], vec![1, -1, 2], vec![1, 0, 0], vec![-1, 0, 2], vec![1, 1, -2],
        vec![-1, 1, 0], vec![2, -1, 0], vec![-1, 2, -2], vec![0, -1, 2],
    ])]
    #[case(Series::C, 3, vec![
        vec![2, 0, 0], vec![0, 1, 0], vec![1, -1, 1], vec![-2, 2, 0], vec![1, 1, -1],
        vec![-1, 0, 1], vec![2, -1, 0], vec![-1, 2, -1], vec![0, -2, 2],
    ])]
    #[case(Series::D, 5, vec![
        vec![0, 1, 0, 0, 0], vec![1, -1, 1, 0, 0], vec![-1, 0, 1, 0, 0], vec![1, 0, -1, 1, 1],
        vec![-1, 1, -1, 1, 1], vec![1, 0, 0, -1, 1], vec![1, 0, 0, 1, -1], vec![0, -1, 0, 1, 1],
        vec![-1, 1, 0, -1, 1], vec![-1, 1, 0, 1, -1], vec![1, 0, 1, -1, -1], vec![0, -1, 1, -1, 1],
        vec![0, -1, 1, 1, -1], vec![-1, 1, 1, -1, -1], vec![1, 1, -1, 0, 0], vec![0, 0, -1, 0, 2],
        vec![0, 0, -1, 2, 0], vec![0, -1, 2, -1, -1], vec![-1, 2, -1, 0, 0], vec![2, -1, 0, 0, 0],
    ])]
    fn test_positive_roots(
        #[case] series: Series,
        #[case] rank: usize,
        #[case] roots: Vec<Vec<i64>>,
    ) {
        let mut expected: Vec<Weight> = roots.into_iter().map(Weight::new).collect();
        expected.sort();
        let mut actual = simple(series, rank).positive_roots();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_positive_root_count() {
        // |Δ+| = n(n+1)/2 for A_n, n^2 for B_n and C_n, n(n-1) for D_n.
        assert_eq!(simple(Series::A, 5).positive_roots().len(), 15);
        assert_eq!(simple(Series::B, 4).positive_roots().len(), 16);
        assert_eq!(simple(Series::C, 4).positive_roots().len(), 16);
        assert_eq!(simple(Series::D, 6).positive_roots().len(), 30);
        assert_eq!(simple(Series::E, 6).positive_roots().len(), 36);
        assert_eq!(simple(Series::F, 4).positive_roots().len(), 24);
    }

    #[test]
    fn test_metric() {
        assert_eq!(simple(Series::A, 1).metric(), rationals(&[&[(1, 2)]]));
        assert_eq!(
            simple(Series::A, 2).metric(),
            rationals(&[&[(2, 3), (1, 3)], &[(1, 3), (2, 3)]])
        );
        assert_eq!(
            simple(Series::B, 4).metric(),
            rationals(&[
                &[(1, 1), (1, 1), (1, 1), (1, 2)],
                &[(1, 1), (2, 1), (2, 1), (1, 1)],
                &[(1, 1), (2, 1), (3, 1), (3, 2)],
                &[(1, 2), (1, 1), (3, 2), (1, 1)],
            ])
        );
        assert_eq!(
            simple(Series::D, 5).metric(),
            rationals(&[
                &[(1, 1), (1, 1), (1, 1), (1, 2), (1, 2)],
                &[(1, 1), (2, 1), (2, 1), (1, 1), (1, 1)],
                &[(1, 1), (2, 1), (3, 1), (3, 2), (3, 2)],
                &[(1, 2), (1, 1), (3, 2), (5, 4), (3, 4)],
                &[(1, 2), (1, 1), (3, 2), (3, 4), (5, 4)],
            ])
        );
        assert_eq!(
            simple(Series::G, 2).metric(),
            rationals(&[&[(2, 1), (1, 1)], &[(1, 1), (2, 3)]])
        );
        let c6 = simple(Series::C, 6).metric();
        assert_eq!(c6[4][5], Rational64::new(5, 2));
        assert_eq!(c6[5][5], Rational64::from_integer(3));
        let e7 = simple(Series::E, 7).metric();
        assert_eq!(e7[3][3], Rational64::new(15, 2));
        assert_eq!(e7[6][6], Rational64::new(7, 2));
    }

    #[rstest]
    #[case(Series::A, 4)]
    #[case(Series::B, 3)]
    #[case(Series::C, 4)]
    #[case(Series::D, 6)]
    #[case(Series::E, 6)]
    #[case(Series::E, 7)]
    #[case(Series::E, 8)]
    #[case(Series::F, 4)]
    #[case(Series::G, 2)]
    fn test_metric_inverts_cartan(#[case] series: Series, #[case] rank: usize) {
        // The metric is the inverse Cartan matrix rescaled column by column, so the product of the
        // Cartan matrix with the metric is diagonal.
        let algebra = simple(series, rank);
        let cartan = algebra.cartan_matrix();
        let metric = algebra.metric();
        for i in 0..rank {
            for j in 0..rank {
                let entry: Rational64 = (0..rank)
                    .map(|k| Rational64::from_integer(cartan[i][k]) * metric[k][j])
                    .sum();
                if i != j {
                    assert_eq!(entry, Rational64::from_integer(0), "{algebra} ({i}, {j})");
                }
            }
        }
    }

    #[test]
    fn test_level_vector() {
        assert_eq!(simple(Series::A, 3).level_vector(), vec![3, 4, 3]);
        assert_eq!(simple(Series::B, 3).level_vector(), vec![6, 10, 6]);
        assert_eq!(simple(Series::C, 3).level_vector(), vec![5, 8, 9]);
        assert_eq!(simple(Series::D, 4).level_vector(), vec![6, 10, 6, 6]);
        // The simple roots all have height 2.
        for algebra in [simple(Series::A, 5), simple(Series::D, 5), simple(Series::E, 7)] {
            for root in algebra.simple_roots() {
                assert_eq!(algebra.height(&root).unwrap(), 2, "{algebra}");
            }
        }
    }

    #[test]
    fn test_semisimple() {
        let algebras = [
            simple(Series::A, 1),
            simple(Series::A, 2),
            simple(Series::A, 9),
            simple(Series::C, 7),
            simple(Series::E, 7),
            simple(Series::G, 2),
        ];
        let algebra = algebras
            .iter()
            .fold(Algebra::trivial(), |acc, &a| acc + Algebra::from(a));
        assert_eq!(algebra, Algebra::from_factors(algebras.to_vec()));
        assert_eq!(algebra.rank(), 28);

        let weight = Weight::from([
            1, 2, 5, -8, 3, 4, 5, 4, 2, 11, 2, 4, 0, -2, -3, -4, 5, 7, 6, 4, 3, 4, 3, 4, 3, 4, 0, 0,
        ]);
        let split = algebra.split_weight(&weight);
        assert_eq!(
            split,
            weights(&[
                &[1],
                &[2, 5],
                &[-8, 3, 4, 5, 4, 2, 11, 2, 4],
                &[0, -2, -3, -4, 5, 7, 6],
                &[4, 3, 4, 3, 4, 3, 4],
                &[0, 0],
            ])
        );
        assert_eq!(Algebra::join_weights(&split), weight);
        assert_eq!(algebra.slice(1..2), Algebra::from(simple(Series::A, 2)));
        assert_eq!(algebra.to_string(), "A1 + A2 + A9 + C7 + E7 + G2");
    }

    #[test]
    fn test_conjugate_weight() {
        let a3 = simple(Series::A, 3);
        assert_eq!(a3.conjugate_weight(&Weight::from([1, 2, 0])).unwrap(), Weight::from([0, 2, 1]));
        let d5 = simple(Series::D, 5);
        assert_eq!(
            d5.conjugate_weight(&Weight::from([0, 0, 0, 0, 1])).unwrap(),
            Weight::from([0, 0, 0, 1, 0])
        );
        let d4 = simple(Series::D, 4);
        assert_eq!(
            d4.conjugate_weight(&Weight::from([0, 0, 0, 1])).unwrap(),
            Weight::from([0, 0, 0, 1])
        );
        let e6 = simple(Series::E, 6);
        assert_eq!(
            e6.conjugate_weight(&Weight::from([1, 0, 0, 0, 0, 0])).unwrap(),
            Weight::from([0, 0, 0, 0, 1, 0])
        );

        assert_eq!(
            a3.conjugate_weight(&Weight::from([1, 0])),
            Err(LieError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
        assert!(Algebra::from(d5).height(&Weight::from([1])).is_err());
    }
}
