//! Ready-made problem models.
//!
//! Each model implements [`PermutProblem`](crate::problem::PermutProblem)
//! with incremental error tables and ships a `suggested_config` carrying
//! the tuning that works well for it.

mod magic_square;
mod queens;

pub use magic_square::MagicSquare;
pub use queens::Queens;
