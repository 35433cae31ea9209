use std::collections::BTreeMap;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::Arc;

use anyhow::{ensure, Context};
use dashmap::DashMap;
use itertools::Itertools;
use lie::shortcuts::lorentz_algebra;
use lie::{Algebra, Multiset, Weight};
use num_rational::Rational64;
use rustc_hash::FxHasher;
use serde_json::{json, Value};

use crate::field::Field;
use crate::operator::Operator;
use crate::partitions::BoundedExponents;
use crate::progress::{NoProgress, Progress};

/// Parameters of an [`Eft`] query besides the maximal dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EftOptions {
    /// Remove operators related by the free equations of motion.
    pub use_eom: bool,
    /// Only report operators of exactly the maximal dimension.
    pub ignore_lower_dimensions: bool,
}

impl Default for EftOptions {
    fn default() -> Self {
        Self {
            use_eom: true,
            ignore_lower_dimensions: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Query {
    max_dimension: i64,
    options: EftOptions,
}

type ResultCache<T> = DashMap<Query, Arc<T>, BuildHasherDefault<FxHasher>>;

/// An effective field theory: an internal symmetry algebra and a list of fields.
///
/// Results are memoized per query for the lifetime of the instance.
pub struct Eft {
    internal_algebra: Algebra,
    algebra: Algebra,
    fields: Vec<Field>,
    invariants_cache: ResultCache<Invariants>,
    covariants_cache: ResultCache<Covariants>,
}

impl Eft {
    pub fn new(internal_algebra: Algebra, fields: Vec<Field>) -> anyhow::Result<Self> {
        for field in &fields {
            ensure!(
                field.internal().algebra() == &internal_algebra,
                "Field '{}' transforms under {} instead of {internal_algebra}",
                field.name(),
                field.internal().algebra(),
            );
            ensure!(
                field.dimension() > Rational64::from_integer(0),
                "Field '{}' must have positive dimension, found {}",
                field.name(),
                field.dimension(),
            );
            ensure!(
                field.flavors() > 0,
                "Field '{}' must have at least one flavor",
                field.name()
            );
        }
        Ok(Self {
            algebra: lorentz_algebra() + internal_algebra.clone(),
            internal_algebra,
            fields,
            invariants_cache: Default::default(),
            covariants_cache: Default::default(),
        })
    }

    pub fn internal_algebra(&self) -> &Algebra {
        &self.internal_algebra
    }

    /// The Lorentz algebra plus the internal algebra.
    pub fn algebra(&self) -> &Algebra {
        &self.algebra
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Forget every memoized result.
    pub fn clear_cache(&self) {
        self.invariants_cache.clear();
        self.covariants_cache.clear();
    }

    /// Every product of the fields, including the empty one, whose dimension is at most
    /// `max_dimension`.
    pub fn operators(&self, max_dimension: i64) -> impl Iterator<Item = Operator> + '_ {
        let dimensions = self.fields.iter().map(Field::dimension).collect();
        BoundedExponents::new(dimensions, Rational64::from_integer(max_dimension)).map(
            move |exponents| {
                let mut content = Multiset::new();
                for (field, exponent) in self.fields.iter().zip(exponents) {
                    content.insert(field.clone(), exponent as i64);
                }
                Operator::new(content)
            },
        )
    }

    fn collect_operators(&self, max_dimension: i64, progress: &mut dyn Progress) -> Vec<Operator> {
        let stage = "Computing field content combinations";
        progress.start(stage);
        let operators: Vec<_> = self.operators(max_dimension).collect();
        progress.finish(stage);
        tracing::debug!(count = operators.len(), "enumerated operators");
        operators
    }

    fn charge_count(&self) -> usize {
        self.fields
            .iter()
            .map(|field| field.charges().len())
            .max()
            .unwrap_or(0)
    }

    pub fn invariants(&self, max_dimension: i64, options: EftOptions) -> anyhow::Result<Arc<Invariants>> {
        self.invariants_with_progress(max_dimension, options, &mut NoProgress)
    }

    /// Count the independent invariant operators of each neutral field content up to
    /// `max_dimension`.
    #[tracing::instrument(skip(self, progress), fields(fields = self.fields.len()))]
    pub fn invariants_with_progress(
        &self,
        max_dimension: i64,
        options: EftOptions,
        progress: &mut dyn Progress,
    ) -> anyhow::Result<Arc<Invariants>> {
        let query = Query {
            max_dimension,
            options,
        };
        if let Some(cached) = self.invariants_cache.get(&query) {
            tracing::debug!("reusing cached invariants");
            return Ok(Arc::clone(cached.value()));
        }

        let operators = self.collect_operators(max_dimension, progress);
        let stage = "Computing invariants";
        progress.start(stage);
        let total = operators.len();
        let mut result = BTreeMap::new();
        for (done, operator) in operators.into_iter().enumerate() {
            progress.update(done, total);
            if operator.is_empty() || !operator.is_neutral() {
                continue;
            }
            let invariants = operator
                .invariants(max_dimension, options.ignore_lower_dimensions, options.use_eom)
                .with_context(|| format!("Error when counting the invariants of {operator}"))?;
            if !invariants.is_empty() {
                result.insert(operator, invariants);
            }
        }
        progress.finish(stage);

        let result = Arc::new(Invariants(result));
        tracing::info!(count = result.count(), "computed invariants");
        self.invariants_cache.insert(query, Arc::clone(&result));
        Ok(result)
    }

    pub fn covariants(&self, max_dimension: i64, options: EftOptions) -> anyhow::Result<Arc<Covariants>> {
        self.covariants_with_progress(max_dimension, options, &mut NoProgress)
    }

    /// Group the irreps of every field content, charged or not, and its derivatives by highest
    /// weight and charges.
    #[tracing::instrument(skip(self, progress), fields(fields = self.fields.len()))]
    pub fn covariants_with_progress(
        &self,
        max_dimension: i64,
        options: EftOptions,
        progress: &mut dyn Progress,
    ) -> anyhow::Result<Arc<Covariants>> {
        let query = Query {
            max_dimension,
            options,
        };
        if let Some(cached) = self.covariants_cache.get(&query) {
            tracing::debug!("reusing cached covariants");
            return Ok(Arc::clone(cached.value()));
        }

        let operators = self.collect_operators(max_dimension, progress);
        let charge_count = self.charge_count();
        let stage = "Computing covariant operators";
        progress.start(stage);
        let total = operators.len();
        let mut result: BTreeMap<CovariantKey, Multiset<(Operator, usize)>> = BTreeMap::new();
        for (done, operator) in operators.into_iter().enumerate() {
            progress.update(done, total);
            if operator.is_empty() {
                continue;
            }
            let mut charges = operator.charges();
            charges.resize(charge_count, Rational64::from_integer(0));
            let covariants = operator
                .covariants(max_dimension, options.ignore_lower_dimensions, options.use_eom)
                .with_context(|| format!("Error when decomposing {operator}"))?;
            for (derivatives, irreps) in covariants {
                for (irrep, count) in irreps.iter() {
                    result
                        .entry((irrep.highest_weight().clone(), charges.clone()))
                        .or_default()
                        .insert((operator.clone(), derivatives), count);
                }
            }
        }
        progress.finish(stage);

        let result = Arc::new(Covariants(result));
        tracing::info!(classes = result.len(), "computed covariants");
        self.covariants_cache.insert(query, Arc::clone(&result));
        Ok(result)
    }
}

fn show_derivatives(derivatives: usize) -> String {
    match derivatives {
        0 => String::new(),
        1 => " D".to_owned(),
        n => format!(" D^{n}"),
    }
}

fn show_item(operator: impl fmt::Display, derivatives: usize, count: i64) -> String {
    format!("{operator}{}: {count}", show_derivatives(derivatives))
}

fn show_power(base: &str, exponent: i64) -> String {
    if exponent == 1 {
        base.to_owned()
    } else {
        format!("({base})^{exponent}")
    }
}

/// Independent invariant operators: for each field content, the number of invariants keyed by
/// number of derivatives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invariants(BTreeMap<Operator, BTreeMap<usize, i64>>);

impl Invariants {
    pub fn new(invariants: BTreeMap<Operator, BTreeMap<usize, i64>>) -> Self {
        Self(invariants)
    }

    pub fn get(&self, operator: &Operator) -> Option<&BTreeMap<usize, i64>> {
        self.0.get(operator)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Operator, &BTreeMap<usize, i64>)> + '_ {
        self.0.iter()
    }

    /// Number of field contents with at least one invariant.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of invariants.
    pub fn count(&self) -> i64 {
        self.0.values().flat_map(BTreeMap::values).sum()
    }

    /// Merge field contents that agree once each field is replaced by its class. Fields missing
    /// from `classes` stand for themselves.
    pub fn by_classes(&self, classes: &BTreeMap<String, String>) -> BTreeMap<String, BTreeMap<usize, i64>> {
        let mut merged: BTreeMap<String, BTreeMap<usize, i64>> = BTreeMap::new();
        for (operator, counts) in &self.0 {
            let mut content: BTreeMap<&str, i64> = BTreeMap::new();
            for (field, exponent) in operator.content().iter() {
                let class = classes.get(field.name()).map_or(field.name(), String::as_str);
                *content.entry(class).or_default() += exponent;
            }
            let key = content
                .into_iter()
                .map(|(class, exponent)| show_power(class, exponent))
                .join(" ");
            let entry = merged.entry(key).or_default();
            for (&derivatives, &count) in counts {
                *entry.entry(derivatives).or_default() += count;
            }
        }
        merged
    }

    /// Render like [`Display`](fmt::Display), after merging field contents by class.
    pub fn show_by_classes(&self, classes: &BTreeMap<String, String>) -> String {
        self.by_classes(classes)
            .iter()
            .flat_map(|(content, counts)| {
                counts
                    .iter()
                    .map(move |(&derivatives, &count)| show_item(content, derivatives, count))
            })
            .join("\n")
    }

    pub fn to_json(&self) -> Value {
        let operators: Vec<Value> = self
            .0
            .iter()
            .map(|(operator, counts)| {
                let counts: serde_json::Map<String, Value> = counts
                    .iter()
                    .map(|(derivatives, count)| (derivatives.to_string(), json!(count)))
                    .collect();
                json!({
                    "operator": operator.to_string(),
                    "dimension": operator.dimension().to_string(),
                    "invariants": counts,
                })
            })
            .collect();
        json!({
            "count": self.count(),
            "operators": operators,
        })
    }
}

impl fmt::Display for Invariants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.0.iter().flat_map(|(operator, counts)| {
            counts
                .iter()
                .map(move |(&derivatives, &count)| show_item(operator, derivatives, count))
        });
        write!(f, "{}", lines.format("\n"))
    }
}

/// The highest weight of a covariant together with its charges.
pub type CovariantKey = (Weight, Vec<Rational64>);

/// Operators (with their number of derivatives) grouped by the irrep and charges they carry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Covariants(BTreeMap<CovariantKey, Multiset<(Operator, usize)>>);

impl Covariants {
    pub fn get(&self, key: &CovariantKey) -> Option<&Multiset<(Operator, usize)>> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CovariantKey, &Multiset<(Operator, usize)>)> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Value {
        let entries: Vec<Value> = self
            .0
            .iter()
            .map(|((weight, charges), operators)| {
                let operators: Vec<Value> = operators
                    .iter()
                    .map(|((operator, derivatives), count)| {
                        json!({
                            "operator": operator.to_string(),
                            "derivatives": derivatives,
                            "count": count,
                        })
                    })
                    .collect();
                json!({
                    "highest_weight": weight.components(),
                    "charges": charges.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "operators": operators,
                })
            })
            .collect();
        Value::Array(entries)
    }
}

fn show_charges(charges: &[Rational64]) -> String {
    match charges {
        [charge] => format!("charge={charge}"),
        _ => format!("charges=[{}]", charges.iter().format(", ")),
    }
}

impl fmt::Display for Covariants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.0.iter().map(|((weight, charges), operators)| {
            let items = operators
                .iter()
                .map(|((operator, derivatives), count)| show_item(operator, *derivatives, count))
                .join(" + ");
            format!("[irrep={weight}, {}]: {items}", show_charges(charges))
        });
        write!(f, "{}", lines.format("\n"))
    }
}
