//! Operator bases for effective field theories.
//!
//! An [`Eft`] is a list of [`Field`]s charged under the Lorentz algebra, an internal semisimple
//! algebra and a number of abelian charges. Products of fields and their derivatives form
//! [`Operator`]s. For every neutral field content up to a given dimension we count the independent
//! Lorentz and gauge invariant operators, after removing those related by integration by parts
//! and, optionally, the free equations of motion.
//!
//! The representation theory lives in the [`lie`] crate, re-exported here.
//!
//! ```no_run
//! use basisgen::{smeft, EftOptions};
//!
//! let eft = smeft::smeft(1)?;
//! let invariants = eft.invariants(6, EftOptions::default())?;
//! println!("{}", invariants.show_by_classes(&smeft::field_classes()));
//! # anyhow::Ok(())
//! ```

mod eft;
mod field;
mod model;
mod operator;
mod partitions;
mod progress;
pub mod smeft;

pub use lie;

pub use crate::eft::{CovariantKey, Covariants, Eft, EftOptions, Invariants};
pub use crate::field::Field;
pub use crate::model::{FieldSpec, Model, ModelSpec, RationalSpec};
pub use crate::operator::{IrrepsByDerivatives, Operator};
pub use crate::partitions::{compositions, BoundedExponents, Compositions};
pub use crate::progress::{NoProgress, Progress, TracingProgress};
