use std::fmt;
use std::ops::{Add, Mul, Neg, Range, Sub};
use std::str::FromStr;

use crate::error::{LieError, Result};

/// A weight in the Dynkin basis, i.e. the vector of its Dynkin labels.
///
/// Weights of a semisimple algebra are laid out as the concatenation of the weights of its simple
/// factors, in factor order.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Weight(Vec<i64>);

impl Weight {
    pub fn new(components: Vec<i64>) -> Self {
        Self(components)
    }

    pub fn zero(len: usize) -> Self {
        Self(vec![0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn components(&self) -> &[i64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&x| x == 0)
    }

    pub fn dot(&self, other: &[i64]) -> i64 {
        self.0.iter().zip(other).map(|(a, b)| a * b).sum()
    }

    /// Concatenate two weights. This is the weight of the direct sum of the two algebras.
    pub fn concat(&self, other: &Weight) -> Weight {
        let mut components = Vec::with_capacity(self.len() + other.len());
        components.extend_from_slice(&self.0);
        components.extend_from_slice(&other.0);
        Weight(components)
    }

    pub fn slice(&self, range: Range<usize>) -> Weight {
        Weight(self.0[range].to_vec())
    }

    pub fn scale(&self, factor: i64) -> Weight {
        Weight(self.0.iter().map(|x| factor * x).collect())
    }

    pub fn reversed(&self) -> Weight {
        Weight(self.0.iter().rev().copied().collect())
    }

    pub fn add_assign_slice(&mut self, other: &[i64]) {
        for (a, b) in self.0.iter_mut().zip(other) {
            *a += b;
        }
    }

    pub(crate) fn check_len(&self, expected: usize) -> Result<()> {
        if self.len() == expected {
            Ok(())
        } else {
            Err(LieError::DimensionMismatch {
                expected,
                found: self.len(),
            })
        }
    }
}

impl From<Vec<i64>> for Weight {
    fn from(components: Vec<i64>) -> Self {
        Self(components)
    }
}

impl<const N: usize> From<[i64; N]> for Weight {
    fn from(components: [i64; N]) -> Self {
        Self(components.to_vec())
    }
}

impl FromIterator<i64> for Weight {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::ops::Index<usize> for Weight {
    type Output = i64;

    fn index(&self, index: usize) -> &i64 {
        &self.0[index]
    }
}

// All arithmetic is component-wise. Weights of different lengths are never combined by the engine;
// `zip` would silently truncate, so we assert instead.
impl Add for &Weight {
    type Output = Weight;

    fn add(self, other: &Weight) -> Weight {
        debug_assert_eq!(self.len(), other.len());
        Weight(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect())
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, other: Weight) -> Weight {
        &self + &other
    }
}

impl Sub for &Weight {
    type Output = Weight;

    fn sub(self, other: &Weight) -> Weight {
        debug_assert_eq!(self.len(), other.len());
        Weight(self.0.iter().zip(&other.0).map(|(a, b)| a - b).collect())
    }
}

impl Sub for Weight {
    type Output = Weight;

    fn sub(self, other: Weight) -> Weight {
        &self - &other
    }
}

impl Neg for &Weight {
    type Output = Weight;

    fn neg(self) -> Weight {
        Weight(self.0.iter().map(|x| -x).collect())
    }
}

impl Neg for Weight {
    type Output = Weight;

    fn neg(self) -> Weight {
        -&self
    }
}

impl Mul<&Weight> for i64 {
    type Output = Weight;

    fn mul(self, weight: &Weight) -> Weight {
        weight.scale(self)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Weight {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        crate::parser::parse_weight(s)
    }
}
