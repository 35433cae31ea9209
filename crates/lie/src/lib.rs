//! Simple and semisimple Lie algebras, their irreducible representations, and the decomposition of
//! tensor products and symmetric/antisymmetric powers into irreps.
//!
//! Weights are written in the Dynkin basis throughout. Everything derived from an algebra or an
//! irrep is memoized per value in process-wide tables; see [`clear_caches`].

mod algebra;
mod cache;
mod error;
mod freudenthal;
mod irrep;
mod multiset;
pub mod parser;
pub mod shortcuts;
mod weight;
mod weight_system;

pub use crate::algebra::{Algebra, Series, SimpleAlgebra};
pub use crate::cache::{cache_stats, clear_caches, CacheStats};
pub use crate::error::{LieError, Result};
pub use crate::irrep::{multiply_counters, Irrep, IrrepCounter, Statistics};
pub use crate::multiset::Multiset;
pub use crate::parser::{parse_algebra, parse_weight};
pub use crate::weight::Weight;
pub use crate::weight_system::WeightSystem;
