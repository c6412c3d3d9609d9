//! Core trait for problems solved by permutation local search.

use rand::Rng;

use crate::display::format_solution;

/// Result of a problem-specific reset.
///
/// A reset perturbs part of the solution; the model either knows the
/// resulting total cost (incremental bookkeeping kept up to date) or asks
/// the solver to recompute it from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The model tracked the perturbation and reports the new total cost.
    KnownCost(i64),
    /// The solver must call [`PermutProblem::cost`] with `record = true`.
    Unknown,
}

/// Defines a constraint-satisfaction problem over a permutation.
///
/// The solution is an array of `size` slots holding a permutation of a
/// configured value set; the solver searches for an assignment of total
/// cost zero by swapping slot pairs. Only [`size`](Self::size) and
/// [`cost`](Self::cost) are mandatory. The remaining hooks have sensible
/// defaults; overriding them with incremental implementations is what
/// makes a model fast:
///
/// - [`variable_cost`](Self::variable_cost) enables the two-phase
///   heuristic selection; without it the solver falls back to exhaustive
///   pair scanning.
/// - [`swap_cost`](Self::swap_cost) defaults to swap / recompute / swap
///   back.
/// - [`executed_swap`](Self::executed_swap) lets the model patch its
///   internal error tables after a committed swap instead of relying on
///   full recomputations.
///
/// Models usually hold error projection state (filled in by `cost` when
/// `record` is true), which is why most hooks take `&mut self`.
pub trait PermutProblem {
    /// Number of variable slots.
    fn size(&self) -> usize;

    /// Recomputes the total cost of `sol` from scratch.
    ///
    /// With `record` set, the model must also refresh whatever internal
    /// per-variable or per-constraint error state the incremental hooks
    /// below depend on.
    fn cost(&mut self, sol: &[i32], record: bool) -> i64;

    /// Projected error on slot `i`, using state recorded by the last
    /// `cost(sol, true)` call.
    ///
    /// Returning `None` (the default) tells the solver the model has no
    /// per-variable projection; the solver then uses exhaustive pair
    /// selection regardless of the configured strategy. A model must
    /// answer `Some` for every slot or `None` for every slot.
    fn variable_cost(&mut self, sol: &[i32], i: usize) -> Option<i64> {
        let _ = (sol, i);
        None
    }

    /// Hypothetical total cost after swapping slots `i` and `j`.
    ///
    /// Must leave both `sol` and any recorded state as it found them.
    /// The default performs the swap, recomputes, and swaps back.
    fn swap_cost(&mut self, sol: &mut [i32], current_cost: i64, i: usize, j: usize) -> i64 {
        let _ = current_cost;
        sol.swap(i, j);
        let cost = self.cost(sol, false);
        sol.swap(i, j);
        if self.refresh_after_probe() {
            self.cost(sol, false);
        }
        cost
    }

    /// Whether the default [`swap_cost`](Self::swap_cost) must re-evaluate
    /// the restored solution after a probe.
    ///
    /// Needed by models whose `cost` mutates projection state even when
    /// `record` is false, so the trial evaluation leaves stale state
    /// behind.
    fn refresh_after_probe(&self) -> bool {
        false
    }

    /// Notifies the model that slots `i` and `j` have just been swapped in
    /// `sol`, so it can patch its recorded error state incrementally.
    /// Default: no-op (the model relies on full recomputations).
    fn executed_swap(&mut self, sol: &[i32], i: usize, j: usize) {
        let _ = (sol, i, j);
    }

    /// Enumerates first indices for the exhaustive pair scan.
    ///
    /// `prev` is `None` on the first call, then the previously returned
    /// index. The default walks `0..size`. Models override this to prune
    /// structurally symmetric or invalid pairs.
    fn next_i(&self, prev: Option<usize>) -> Option<usize> {
        let next = prev.map_or(0, |i| i + 1);
        (next < self.size()).then_some(next)
    }

    /// Enumerates partner indices for first index `i`. The default walks
    /// `i+1..size` (the strict upper triangle).
    fn next_j(&self, i: usize, prev: Option<usize>) -> Option<usize> {
        let next = prev.map_or(i + 1, |j| j + 1);
        (next < self.size()).then_some(next)
    }

    /// Perturbs `n` variables to escape an over-frozen region.
    ///
    /// The default performs `n` random transpositions and reports
    /// [`ResetOutcome::Unknown`].
    fn reset<R: Rng>(&mut self, sol: &mut [i32], n: usize, rng: &mut R) -> ResetOutcome {
        let size = sol.len();
        for _ in 0..n {
            let i = rng.random_range(0..size);
            let j = rng.random_range(0..size);
            sol.swap(i, j);
        }
        ResetOutcome::Unknown
    }

    /// Formats the solution for diagnostics. Default: the raw vector on
    /// one line.
    fn display(&self, sol: &[i32]) -> String {
        format_solution(sol, 0)
    }

    /// Independent validity check, for use by drivers after a successful
    /// run. Not called by the solve loop.
    fn check(&self, sol: &[i32]) -> bool {
        let _ = sol;
        true
    }
}
