use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Mul;

use itertools::Itertools;
use lie::shortcuts::vector;
use lie::{multiply_counters, Irrep, IrrepCounter, Multiset, Statistics};
use num_rational::Rational64;

use crate::field::Field;
use crate::partitions::compositions;

/// Irreps keyed by the number of derivatives acting on the operator.
pub type IrrepsByDerivatives = BTreeMap<usize, IrrepCounter>;

/// A monomial in the fields, i.e. a multiset of fields.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Operator(Multiset<Field>);

impl Operator {
    pub fn new(content: Multiset<Field>) -> Self {
        Self(content)
    }

    pub fn from_fields(fields: impl IntoIterator<Item = Field>) -> Self {
        Self(Multiset::from_elements(fields))
    }

    pub fn power(field: Field, exponent: usize) -> Self {
        let mut content = Multiset::new();
        content.insert(field, exponent as i64);
        Self(content)
    }

    pub fn content(&self) -> &Multiset<Field> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn dimension(&self) -> Rational64 {
        self.0
            .iter()
            .map(|(field, exponent)| field.dimension() * exponent)
            .sum()
    }

    /// Total charges. Fields with fewer charges count as neutral under the missing ones.
    pub fn charges(&self) -> Vec<Rational64> {
        let mut total = Vec::new();
        for (field, exponent) in self.0.iter() {
            if total.len() < field.charges().len() {
                total.resize(field.charges().len(), Rational64::from_integer(0));
            }
            for (sum, charge) in total.iter_mut().zip(field.charges()) {
                *sum += *charge * exponent;
            }
        }
        total
    }

    pub fn is_neutral(&self) -> bool {
        self.charges().iter().all(|charge| *charge == Rational64::from_integer(0))
    }

    /// Number of derivatives that fit within `max_dimension`, if any.
    fn max_derivatives(&self, max_dimension: i64) -> Option<usize> {
        let room = Rational64::from_integer(max_dimension) - self.dimension();
        usize::try_from(room.floor().to_integer()).ok()
    }

    /// Whether `derivatives` more derivatives bring the operator to exactly `max_dimension`.
    fn reaches(&self, derivatives: usize, max_dimension: i64) -> bool {
        self.dimension() + Rational64::from_integer(derivatives as i64)
            == Rational64::from_integer(max_dimension)
    }

    /// Decompose the product of all fields. The empty operator has no irreps.
    pub fn irreps(&self) -> lie::Result<IrrepCounter> {
        let mut result: Option<IrrepCounter> = None;
        for (field, exponent) in self.0.iter() {
            let powers = field.power_irreps(exponent as usize)?;
            result = Some(match result {
                None => powers,
                Some(previous) => multiply_counters(&previous, &powers)?,
            });
        }
        Ok(result.unwrap_or_default())
    }

    /// All distinct operators obtained by distributing `times` derivatives among the fields.
    pub fn differentiate_fields(&self, times: usize, use_eom: bool) -> lie::Result<BTreeSet<Operator>> {
        if self.is_empty() {
            return Ok(if times == 0 {
                BTreeSet::from([self.clone()])
            } else {
                BTreeSet::new()
            });
        }

        let content: Vec<(&Field, usize)> = self
            .0
            .iter()
            .map(|(field, exponent)| (field, exponent as usize))
            .collect();
        let mut result = BTreeSet::new();

        for split in compositions(times, content.len()) {
            let mut choices = Vec::with_capacity(content.len());
            for (&(field, exponent), &derivatives) in content.iter().zip(&split) {
                choices.push(distribute_among_copies(field, exponent, derivatives, use_eom)?);
            }
            for factors in choices.iter().map(|c| c.iter()).multi_cartesian_product() {
                result.insert(factors.into_iter().fold(Operator::default(), |acc, op| &acc * op));
            }
        }
        Ok(result)
    }

    /// Irreps of the operators with `n` derivatives, for every `n` allowed by `max_dimension`.
    ///
    /// With `internal_singlets_only`, only irreps that are singlets of the internal algebra are
    /// kept.
    pub fn irreps_with_derivatives(
        &self,
        max_dimension: i64,
        internal_singlets_only: bool,
        use_eom: bool,
    ) -> lie::Result<IrrepsByDerivatives> {
        let mut result = IrrepsByDerivatives::new();
        let Some(max_derivatives) = self.max_derivatives(max_dimension) else {
            return Ok(result);
        };
        for n in 0..=max_derivatives {
            let mut irreps = IrrepCounter::new();
            for operator in self.differentiate_fields(n, use_eom)? {
                let mut current = operator.irreps()?;
                if internal_singlets_only {
                    current.retain(|irrep, _| internal_part(irrep).is_singlet());
                }
                irreps.add(&current);
            }
            result.insert(n, irreps);
        }
        Ok(result)
    }

    /// The irreps of the total derivatives `D^n X` for `1 <= n <= max_derivatives`, where `X`
    /// has irrep `initial` and already carries `initial_derivatives` derivatives.
    pub fn total_derivatives(
        initial: &Irrep,
        max_derivatives: usize,
        initial_derivatives: usize,
    ) -> lie::Result<IrrepsByDerivatives> {
        let internal_singlet = Irrep::singlet(internal_part(initial).algebra().clone());
        let mut result = IrrepsByDerivatives::new();
        for n in 1..=max_derivatives {
            let mut irreps = IrrepCounter::new();
            for (lorentz, count) in vector().power(n, Statistics::Boson)?.iter() {
                let derivative = lorentz.direct_sum(&internal_singlet);
                irreps.add_scaled(&*initial.multiply(&derivative)?, count);
            }
            result.insert(initial_derivatives + n, irreps);
        }
        Ok(result)
    }

    /// Irreps with derivatives, keeping internal singlets only, once every total derivative of
    /// an operator with fewer derivatives has been removed.
    ///
    /// Towers are removed in increasing order of derivatives: the towers rooted at `d`
    /// derivatives are computed from what survives the removal of towers rooted below `d`.
    pub fn irreps_without_total_derivatives(
        &self,
        max_dimension: i64,
        use_eom: bool,
    ) -> lie::Result<IrrepsByDerivatives> {
        let mut irreps = self.irreps_with_derivatives(max_dimension, true, use_eom)?;
        let Some(max_derivatives) = self.max_derivatives(max_dimension) else {
            return Ok(irreps);
        };

        for derivatives in 0..max_derivatives {
            let roots: Vec<(Irrep, i64)> = irreps
                .get(&derivatives)
                .map(|counter| counter.iter().map(|(irrep, count)| (irrep.clone(), count)).collect())
                .unwrap_or_default();
            for (irrep, count) in roots {
                let tower =
                    Self::total_derivatives(&irrep, max_derivatives - derivatives, derivatives)?;
                for (n, descendants) in tower {
                    if let Some(counter) = irreps.get_mut(&n) {
                        counter.saturating_sub_scaled(&descendants, count);
                    }
                }
            }
        }
        Ok(irreps)
    }

    /// Number of independent invariants, keyed by number of derivatives. Derivative counts with
    /// no invariants are omitted.
    pub fn invariants(
        &self,
        max_dimension: i64,
        ignore_lower_dimensions: bool,
        use_eom: bool,
    ) -> lie::Result<BTreeMap<usize, i64>> {
        Ok(self
            .irreps_without_total_derivatives(max_dimension, use_eom)?
            .into_iter()
            .filter(|&(n, _)| !ignore_lower_dimensions || self.reaches(n, max_dimension))
            .map(|(n, irreps)| {
                let singlets = irreps
                    .iter()
                    .filter(|(irrep, _)| irrep.is_singlet())
                    .map(|(_, count)| count)
                    .sum::<i64>();
                (n, singlets)
            })
            .filter(|&(_, singlets)| singlets != 0)
            .collect())
    }

    /// All irreps the operator and its derivatives transform in, without removing anything.
    pub fn covariants(
        &self,
        max_dimension: i64,
        ignore_lower_dimensions: bool,
        use_eom: bool,
    ) -> lie::Result<IrrepsByDerivatives> {
        let mut irreps = self.irreps_with_derivatives(max_dimension, false, use_eom)?;
        if ignore_lower_dimensions {
            irreps.retain(|&n, _| self.reaches(n, max_dimension));
        }
        Ok(irreps)
    }
}

/// The part of an irrep of Lorentz plus internal algebra belonging to the internal algebra.
pub(crate) fn internal_part(irrep: &Irrep) -> Irrep {
    irrep.factors(2..irrep.algebra().factors().len())
}

/// The distinct products of `exponent` copies of `field` carrying `derivatives` derivatives in
/// total.
fn distribute_among_copies(
    field: &Field,
    exponent: usize,
    derivatives: usize,
    use_eom: bool,
) -> lie::Result<BTreeSet<Operator>> {
    let mut result = BTreeSet::new();
    for split in compositions(derivatives, exponent) {
        // Copies are interchangeable, so only non-increasing splits need to be visited.
        if split.iter().tuple_windows().any(|(a, b)| a < b) {
            continue;
        }
        let mut options = Vec::with_capacity(split.len());
        for &k in &split {
            options.push(field.differentiate(k, use_eom)?);
        }
        for fields in options.iter().map(|o| o.iter()).multi_cartesian_product() {
            result.insert(Operator::from_fields(fields.into_iter().cloned()));
        }
    }
    Ok(result)
}

impl Mul for &Operator {
    type Output = Operator;

    fn mul(self, other: &Operator) -> Operator {
        let mut content = self.0.clone();
        content.add(&other.0);
        Operator(content)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "1");
        }
        for (i, (field, exponent)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if exponent == 1 {
                write!(f, "{field}")?;
            } else {
                write!(f, "({field})^{exponent}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
