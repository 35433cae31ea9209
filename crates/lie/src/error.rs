use crate::algebra::{Algebra, Series};
use crate::weight::Weight;

pub type Result<T> = std::result::Result<T, LieError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LieError {
    #[error("Unexpected rank {rank} for algebra series {series}. The rank n must satisfy: {bounds}")]
    InvalidRank {
        series: Series,
        rank: usize,
        bounds: &'static str,
    },

    #[error("Weight has {found} components but the algebra has rank {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Highest weight {weight} has a negative Dynkin label")]
    NonDominantWeight { weight: Weight },

    #[error("Cannot combine irreps of {left} and {right}")]
    AlgebraMismatch { left: Algebra, right: Algebra },

    #[error("Multiplicity of weight {weight} in the irrep with highest weight {highest_weight} is not an integer ({numerator}/{denominator})")]
    NonIntegralMultiplicity {
        highest_weight: Weight,
        weight: Weight,
        numerator: i64,
        denominator: i64,
    },

    #[error("Multiplicity of weight {weight} in the irrep with highest weight {highest_weight} is negative ({multiplicity})")]
    NegativeMultiplicity {
        highest_weight: Weight,
        weight: Weight,
        multiplicity: i64,
    },

    #[error("Weight system decomposition left weight {weight} with multiplicity {multiplicity}")]
    InconsistentDecomposition { weight: Weight, multiplicity: i64 },
}
