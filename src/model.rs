//! Models described in JSON files.
//!
//! A model names the internal algebra and lists its fields:
//!
//! ```json
//! {
//!     "algebra": "SU3 x SU2",
//!     "fields": [
//!         {
//!             "name": "phi",
//!             "lorentz": "scalar",
//!             "internal": "0 0 1",
//!             "charges": ["1/2"],
//!             "dimension": 1,
//!             "conjugate": true,
//!             "class": "phi"
//!         }
//!     ]
//! }
//! ```
//!
//! `lorentz` is either a name such as `L_spinor` or a pair of Dynkin labels and defaults to
//! `scalar`. `internal` defaults to the singlet. Rational quantities may be integers, strings
//! like `"3/2"` or floats. `statistics` is `"boson"` (the default) or `"fermion"`; `flavors`
//! defaults to one. With `conjugate` set, the conjugate field is added right after the field.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context};
use lie::shortcuts::parse_lorentz;
use lie::{parse_algebra, parse_weight, Algebra, Irrep, Statistics};
use num_rational::Rational64;
use serde::Deserialize;

use crate::eft::Eft;
use crate::field::Field;

const STATIC_MODELS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/models");

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RationalSpec {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RationalSpec {
    pub fn to_rational(&self) -> anyhow::Result<Rational64> {
        match self {
            RationalSpec::Integer(n) => Ok(Rational64::from_integer(*n)),
            RationalSpec::Float(x) => Rational64::approximate_float(*x)
                .ok_or_else(|| anyhow!("Cannot represent {x} as a fraction")),
            RationalSpec::Text(s) => Rational64::from_str(s.trim())
                .map_err(|e| anyhow!("Invalid fraction '{s}': {e}")),
        }
    }
}

impl Default for RationalSpec {
    fn default() -> Self {
        RationalSpec::Integer(1)
    }
}

fn default_lorentz() -> String {
    "scalar".to_owned()
}

fn default_statistics() -> String {
    Statistics::Boson.to_string()
}

fn default_flavors() -> usize {
    1
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default = "default_lorentz")]
    pub lorentz: String,
    #[serde(default)]
    pub internal: Option<String>,
    #[serde(default)]
    pub charges: Vec<RationalSpec>,
    #[serde(default = "default_statistics")]
    pub statistics: String,
    #[serde(default)]
    pub dimension: RationalSpec,
    #[serde(default = "default_flavors")]
    pub flavors: usize,
    #[serde(default)]
    pub conjugate: bool,
    #[serde(default)]
    pub class: Option<String>,
}

impl FieldSpec {
    fn build(&self, algebra: &Algebra) -> anyhow::Result<Field> {
        let lorentz = parse_lorentz(&self.lorentz)?;
        let internal = match &self.internal {
            None => Irrep::singlet(algebra.clone()),
            Some(code) => Irrep::new(algebra.clone(), parse_weight(code)?)
                .with_context(|| format!("Invalid internal irrep '{code}' for {algebra}"))?,
        };
        let charges = self
            .charges
            .iter()
            .map(RationalSpec::to_rational)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Field::new(&self.name, lorentz, internal)?
            .with_charges(charges)
            .with_statistics(self.statistics.parse()?)
            .with_dimension(self.dimension.to_rational()?)
            .with_flavors(self.flavors))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSpec {
    pub algebra: String,
    pub fields: Vec<FieldSpec>,
}

/// An [`Eft`] together with the classes of its fields.
pub struct Model {
    pub eft: Eft,
    /// Field name to class name, for [`Invariants::show_by_classes`](crate::Invariants::show_by_classes).
    pub classes: BTreeMap<String, String>,
}

impl Model {
    pub fn from_spec(spec: &ModelSpec) -> anyhow::Result<Self> {
        let algebra = parse_algebra(&spec.algebra)?;
        let mut fields = Vec::new();
        let mut classes = BTreeMap::new();
        for field_spec in &spec.fields {
            let field = field_spec
                .build(&algebra)
                .with_context(|| format!("Invalid field '{}'", field_spec.name))?;
            let conjugate = field_spec.conjugate.then(|| field.conjugate());
            fields.extend(std::iter::once(field).chain(conjugate));
            if let Some(class) = &field_spec.class {
                for field in &fields[fields.len() - 1 - usize::from(field_spec.conjugate)..] {
                    classes.insert(field.name().to_owned(), class.clone());
                }
            }
        }
        Ok(Self {
            eft: Eft::new(algebra, fields)?,
            classes,
        })
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let spec: ModelSpec = serde_json::from_str(json)?;
        Self::from_spec(&spec)
    }

    /// Load a model from a path, or by name from the current directory, `./models` or the bundled
    /// models.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        let path = find_model(name)?;
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read model file '{}'", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Error when loading model '{}'", path.display()))
    }
}

fn find_model(name: &str) -> anyhow::Result<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Ok(direct.to_path_buf());
    }
    let current_dir = std::env::current_dir()?;
    let relative_dir = current_dir.join("models");

    for dir in [current_dir, relative_dir, PathBuf::from(STATIC_MODELS_PATH)] {
        let mut path = dir.join(name);
        path.set_extension("json");
        if path.is_file() {
            return Ok(path);
        }
    }
    Err(anyhow!("Model file '{name}' not found on path"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::{expect, Expect};

    #[test]
    fn test_rational_spec() {
        let parse = |json: &str| -> Rational64 {
            serde_json::from_str::<RationalSpec>(json)
                .unwrap()
                .to_rational()
                .unwrap()
        };
        assert_eq!(parse("2"), Rational64::from_integer(2));
        assert_eq!(parse("\"3/2\""), Rational64::new(3, 2));
        assert_eq!(parse("\"-1/3\""), Rational64::new(-1, 3));
        assert_eq!(parse("1.5"), Rational64::new(3, 2));
        assert!(serde_json::from_str::<RationalSpec>("\"a/b\"")
            .unwrap()
            .to_rational()
            .is_err());
    }

    #[test]
    fn test_from_json() {
        let model = Model::from_json(
            r#"{
                "algebra": "SU2",
                "fields": [
                    {"name": "phi", "internal": "1", "charges": ["1/2"], "conjugate": true, "class": "H"},
                    {"name": "psi", "lorentz": "1 0", "statistics": "fermion", "dimension": "3/2", "flavors": 2}
                ]
            }"#,
        )
        .unwrap();
        let names: Vec<_> = model.eft.fields().iter().map(Field::name).collect();
        assert_eq!(names, vec!["phi", "phic", "psi"]);
        assert_eq!(model.classes.get("phic").map(String::as_str), Some("H"));
        assert!(!model.classes.contains_key("psi"));

        let psi = &model.eft.fields()[2];
        assert_eq!(psi.statistics(), Statistics::Fermion);
        assert_eq!(psi.flavors(), 2);
        assert_eq!(psi.dimension(), Rational64::new(3, 2));
        assert!(psi.internal().is_singlet());
    }

    #[test]
    fn test_errors() {
        let check = |json: &str, output: Expect| {
            let error = Model::from_json(json).err().unwrap();
            output.assert_eq(&format!("{error:#}"));
        };
        check(
            r#"{"algebra": "SU2", "fields": [{"name": "x", "internal": "1 1"}]}"#,
            expect![[r#"Invalid field 'x': Invalid internal irrep '1 1' for A1: Weight has 2 components but the algebra has rank 1"#]],
        );
        check(
            r#"{"algebra": "SU2", "fields": [{"name": "x", "lorentz": "tensor"}]}"#,
            expect![[r#"Invalid field 'x': Unknown Lorentz irrep 'tensor'"#]],
        );
        check(
            r#"{"algebra": "SU2", "fields": [{"name": "x", "internal": "-1"}]}"#,
            expect![[r#"Invalid field 'x': Invalid internal irrep '-1' for A1: Highest weight (-1) has a negative Dynkin label"#]],
        );
        assert!(Model::from_json(r#"{"algebra": "SU2", "fields": [{"name": "x", "spin": 1}]}"#).is_err());
        assert!(Model::from_json(r#"{"algebra": "SU2", "fields": [{"name": "x", "flavors": 0}]}"#).is_err());
    }

    #[test]
    fn test_bundled_models() {
        for name in ["higgs", "su5_gut", "field_strength"] {
            let model = Model::load(name).unwrap();
            assert!(!model.eft.fields().is_empty(), "{name}");
        }
        assert!(Model::load("no_such_model").is_err());
    }
}
