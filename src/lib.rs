//! Adaptive Search: permutation-based local search for combinatorial
//! constraint satisfaction.
//!
//! Implements the Adaptive Search metaheuristic of Codognet and Diaz:
//! a constraint problem is modeled as a permutation of values over
//! variable slots plus a cost function that reaches zero exactly on
//! solutions. Each iteration swaps one pair of slots, chosen either by
//! a two-phase heuristic (worst variable, then best partner) or by an
//! exhaustive pair scan, with variable freezing, partial resets and
//! full restarts to escape local minima.
//!
//! The pieces:
//!
//! - **[`PermutProblem`]**: the modeling trait — mandatory total cost,
//!   optional incremental hooks (per-variable projection, swap deltas,
//!   post-swap patching, custom resets and pair enumeration).
//! - **[`SolveConfig`]**: tuning knobs — selection strategy, plateau
//!   policy, freeze durations, reset and restart budgets, value set,
//!   seeding.
//! - **[`AdaptiveRunner`]**: the solve loop, returning a
//!   [`SolveResult`] with the reached solution and work counters.
//! - **[`problems`]**: ready-made models (N-queens, magic squares).
//! - **[`coord`](mod@coord)**: optional cost sharing between
//!   independent searches running in parallel.
//!
//! # Example
//!
//! ```
//! use adaptive_search::{AdaptiveRunner, PermutProblem, Queens};
//!
//! let mut problem = Queens::new(100);
//! let config = Queens::suggested_config(100).with_seed(7);
//! let result = AdaptiveRunner::run(&mut problem, &config).unwrap();
//!
//! assert!(result.solved());
//! assert!(problem.check(&result.solution));
//! ```

pub mod config;
pub mod coord;
pub mod display;
pub mod marks;
pub mod permut;
pub mod problem;
pub mod problems;
pub mod runner;

mod select;

pub use config::{SelectStrategy, SolveConfig, UnmarkPolicy};
pub use coord::{CoordHandle, SearchPeers};
pub use permut::{PermutError, ValueSet};
pub use problem::{PermutProblem, ResetOutcome};
pub use problems::{MagicSquare, Queens};
pub use runner::{AdaptiveRunner, Counters, SolveError, SolveResult};
