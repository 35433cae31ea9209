use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use anyhow::bail;
use lie::shortcuts::{l_tensor, lorentz_algebra, lorentz_irrep, vector};
use lie::{Irrep, Statistics};
use num_rational::Rational64;

/// A field of the theory, possibly acted on by some number of covariant derivatives.
///
/// Fields are identified by their name, their number of derivatives and their combined irrep.
/// Charges, statistics, dimension and flavors are carried along but do not take part in
/// comparisons.
#[derive(Clone)]
pub struct Field {
    name: String,
    lorentz: Irrep,
    internal: Irrep,
    charges: Vec<Rational64>,
    statistics: Statistics,
    dimension: Rational64,
    derivatives: usize,
    flavors: usize,
}

impl Field {
    /// A neutral boson of dimension one with a single flavor. `lorentz` must be an irrep of
    /// [`lorentz_algebra`].
    pub fn new(name: impl Into<String>, lorentz: Irrep, internal: Irrep) -> anyhow::Result<Self> {
        let name = name.into();
        if lorentz.algebra() != &lorentz_algebra() {
            bail!(
                "Lorentz irrep of field '{name}' belongs to {} instead of A1 + A1",
                lorentz.algebra()
            );
        }
        Ok(Self::from_irreps(name, lorentz, internal))
    }

    /// As [`Field::new`], for Lorentz irreps known to be valid.
    pub(crate) fn from_irreps(name: impl Into<String>, lorentz: Irrep, internal: Irrep) -> Self {
        Self {
            name: name.into(),
            lorentz,
            internal,
            charges: Vec::new(),
            statistics: Statistics::Boson,
            dimension: Rational64::from_integer(1),
            derivatives: 0,
            flavors: 1,
        }
    }

    pub fn with_charges(mut self, charges: Vec<Rational64>) -> Self {
        self.charges = charges;
        self
    }

    pub fn with_statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn with_dimension(mut self, dimension: Rational64) -> Self {
        self.dimension = dimension;
        self
    }

    /// Number of copies of the field. An [`Eft`](crate::Eft) only accepts positive values.
    pub fn with_flavors(mut self, flavors: usize) -> Self {
        self.flavors = flavors;
        self
    }

    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The left- and right-handed parts `{name}L`, `{name}R` of a field strength tensor.
    pub fn strength_tensors(
        name: &str,
        internal: Irrep,
        charges: Vec<Rational64>,
    ) -> (Field, Field) {
        let left = Field::from_irreps(format!("{name}L"), l_tensor(), internal)
            .with_charges(charges)
            .with_dimension(Rational64::from_integer(2));
        let right = left.conjugate().renamed(format!("{name}R"));
        (left, right)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lorentz(&self) -> &Irrep {
        &self.lorentz
    }

    pub fn internal(&self) -> &Irrep {
        &self.internal
    }

    pub fn charges(&self) -> &[Rational64] {
        &self.charges
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    pub fn dimension(&self) -> Rational64 {
        self.dimension
    }

    pub fn derivatives(&self) -> usize {
        self.derivatives
    }

    pub fn flavors(&self) -> usize {
        self.flavors
    }

    /// The irrep of the Lorentz algebra plus the internal algebra.
    pub fn irrep(&self) -> Irrep {
        self.lorentz.direct_sum(&self.internal)
    }

    /// The field with opposite charges whose irreps are conjugate, with the two Lorentz labels
    /// exchanged.
    pub fn conjugate(&self) -> Field {
        let weight = self.lorentz.highest_weight();
        Field {
            name: format!("{}c", self.name),
            lorentz: lorentz_irrep(weight[1], weight[0]),
            internal: self.internal.conjugate(),
            charges: self.charges.iter().map(|c| -c).collect(),
            ..self.clone()
        }
    }

    /// The fields obtained by acting with `times` derivatives.
    ///
    /// On shell there is exactly one: the equations of motion remove every contraction, leaving
    /// the symmetric traceless combination with Lorentz weight raised by `(times, times)`. Off
    /// shell every irrep of the field times a symmetric power of the vector of the same parity
    /// survives.
    pub fn differentiate(&self, times: usize, use_eom: bool) -> lie::Result<BTreeSet<Field>> {
        let lorentz_irreps: BTreeSet<Irrep> = if use_eom {
            let weight = self.lorentz.highest_weight();
            let times = times as i64;
            BTreeSet::from([lorentz_irrep(weight[0] + times, weight[1] + times)])
        } else {
            let mut irreps = BTreeSet::new();
            for n in (times % 2..=times).step_by(2) {
                for (power, _) in vector().power(n, Statistics::Boson)?.iter() {
                    irreps.extend(self.lorentz.multiply(power)?.keys().cloned());
                }
            }
            irreps
        };

        Ok(lorentz_irreps
            .into_iter()
            .map(|lorentz| Field {
                lorentz,
                dimension: self.dimension + Rational64::from_integer(times as i64),
                derivatives: self.derivatives + times,
                ..self.clone()
            })
            .collect())
    }

    /// Decompose the `exponent`-th power of the field, summing over the ways of distributing the
    /// copies among the flavors.
    pub fn power_irreps(&self, exponent: usize) -> lie::Result<lie::IrrepCounter> {
        let irrep = self.irrep();
        let mut result = lie::IrrepCounter::new();
        for parts in crate::partitions::compositions(exponent, self.flavors) {
            let mut term: Option<lie::IrrepCounter> = None;
            for part in parts.into_iter().filter(|&part| part > 0) {
                let power = irrep.power(part, self.statistics)?;
                term = Some(match term {
                    None => (*power).clone(),
                    Some(previous) => lie::multiply_counters(&previous, &power)?,
                });
            }
            match term {
                Some(term) => result.add(&term),
                None => result.insert(Irrep::singlet(irrep.algebra().clone()), 1),
            }
        }
        Ok(result)
    }

    fn key(&self) -> (&str, usize, &Irrep, &Irrep) {
        (&self.name, self.derivatives, &self.lorentz, &self.internal)
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Field {}

impl PartialOrd for Field {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Field {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for Field {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.derivatives {
            0 => write!(f, "{}", self.name),
            1 => write!(f, "D{}", self.name),
            n => write!(f, "D^{n}({})", self.name),
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} [{}]", self.irrep())
    }
}
