use std::iter::{self, Sum};
use std::ops::{Add, Sub};

/// Iterates through the ways of writing `total` as an ordered sum of `parts` non-negative
/// integers, starting from `[total, 0, ..., 0]` and ending at `[0, ..., 0, total]`.
///
/// There are no compositions into zero parts unless `total` is zero, in which case the empty
/// composition is the only one.
pub struct Compositions {
    current: Option<Vec<usize>>,
}

impl Compositions {
    pub fn new(total: usize, parts: usize) -> Self {
        let current = match parts {
            0 if total > 0 => None,
            0 => Some(Vec::new()),
            _ => {
                let mut first = vec![0; parts];
                first[0] = total;
                Some(first)
            }
        };
        Self { current }
    }

    fn advance(parts: &mut [usize]) -> bool {
        let Some(last) = parts.len().checked_sub(1) else {
            return false;
        };
        let Some(i) = (0..last).rev().find(|&i| parts[i] > 0) else {
            return false;
        };
        let tail = std::mem::take(&mut parts[last]);
        parts[i] -= 1;
        parts[i + 1] = tail + 1;
        true
    }
}

impl Iterator for Compositions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.current.clone()?;
        let current = self.current.as_mut()?;
        if !Self::advance(current) {
            self.current = None;
        }
        Some(result)
    }
}

pub fn compositions(total: usize, parts: usize) -> Compositions {
    Compositions::new(total, parts)
}

/// Iterates through the exponent vectors `e` with `sum(e[i] * weights[i]) <= budget`, in
/// lexicographic order with the first coordinate varying slowest.
///
/// Every weight must be positive.
pub struct BoundedExponents<T> {
    weights: Vec<T>,
    budget: T,
    exponents: Vec<usize>,
    used: T,
    done: bool,
}

impl<T> BoundedExponents<T>
where
    T: Copy + PartialOrd + Add<Output = T> + Sub<Output = T> + Sum,
{
    pub fn new(weights: Vec<T>, budget: T) -> Self {
        let zero: T = iter::empty().sum();
        Self {
            exponents: vec![0; weights.len()],
            weights,
            budget,
            used: zero,
            done: budget < zero,
        }
    }

    fn advance(&mut self) -> bool {
        for i in (0..self.exponents.len()).rev() {
            self.used = self.used + self.weights[i];
            self.exponents[i] += 1;
            if self.used <= self.budget {
                return true;
            }
            for _ in 0..self.exponents[i] {
                self.used = self.used - self.weights[i];
            }
            self.exponents[i] = 0;
        }
        false
    }
}

impl<T> Iterator for BoundedExponents<T>
where
    T: Copy + PartialOrd + Add<Output = T> + Sub<Output = T> + Sum,
{
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.exponents.clone();
        self.done = !self.advance();
        Some(result)
    }
}
