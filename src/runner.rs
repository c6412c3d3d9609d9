//! Adaptive Search solve loop.
//!
//! [`AdaptiveRunner`] drives a [`PermutProblem`] from a (random or
//! supplied) permutation toward zero cost, one swap per iteration:
//!
//! 1. a selector ([`SelectStrategy`](crate::config::SelectStrategy))
//!    proposes the next move;
//! 2. an accepted local minimum freezes the chosen variable for a few
//!    swaps instead of moving;
//! 3. too many frozen variables trigger a partial reset, too many
//!    iterations a full restart, until the iteration budget is spent.
//!
//! # Example
//!
//! ```
//! use adaptive_search::{AdaptiveRunner, SolveConfig};
//! use adaptive_search::problems::Queens;
//!
//! let mut problem = Queens::new(16);
//! let config = Queens::suggested_config(16).with_seed(42);
//! let result = AdaptiveRunner::run(&mut problem, &config).unwrap();
//! assert!(result.solved());
//! ```

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::config::{SelectStrategy, SolveConfig, UnmarkPolicy};
use crate::coord::CoordHandle;
use crate::marks::MarkLedger;
use crate::permut::{self, PermutError};
use crate::problem::{PermutProblem, ResetOutcome};
use crate::select::{self, SwapChoice};

/// Error raised by [`AdaptiveRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The configuration failed validation.
    InvalidConfig(String),
    /// The value set does not cover one slot per variable.
    ValueSetMismatch { expected: usize, found: usize },
    /// The supplied initial solution is not a permutation of the value
    /// set and repair was not requested.
    InvalidInitialSolution(PermutError),
    /// Every variable was frozen and no reset could free one.
    AllVariablesFrozen { iteration: u64 },
    /// The two-phase strategy needs per-variable costs but the model
    /// does not expose them.
    MissingVariableCost { index: usize },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            SolveError::ValueSetMismatch { expected, found } => write!(
                f,
                "value set mismatch: problem has {expected} variables but the value set yields {found} values"
            ),
            SolveError::InvalidInitialSolution(e) => {
                write!(f, "invalid initial solution: {e}")
            }
            SolveError::AllVariablesFrozen { iteration } => {
                write!(f, "all variables frozen at iteration {iteration}")
            }
            SolveError::MissingVariableCost { index } => write!(
                f,
                "two-phase selection requires per-variable costs (none for variable {index})"
            ),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::InvalidInitialSolution(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PermutError> for SolveError {
    fn from(e: PermutError) -> Self {
        SolveError::InvalidInitialSolution(e)
    }
}

/// Work counters, kept both per run and accumulated across restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counters {
    /// Selector invocations, including bounded retries.
    pub iterations: u64,
    /// Swaps actually applied to the solution.
    pub swaps: u64,
    /// Candidates tied for selection, summed over iterations.
    pub candidate_ties: u64,
    /// Partial resets performed.
    pub resets: u64,
    /// Local minima accepted (stays).
    pub local_minima: u64,
}

impl Counters {
    fn fold_into(&self, total: &mut Counters) {
        total.iterations += self.iterations;
        total.swaps += self.swaps;
        total.candidate_ties += self.candidate_ties;
        total.resets += self.resets;
        total.local_minima += self.local_minima;
    }
}

/// Outcome of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResult {
    /// Final cost of `solution` (zero iff solved).
    pub cost: i64,
    /// The solution reached when the search stopped.
    pub solution: Vec<i32>,
    /// Full restarts performed.
    pub restarts: u32,
    /// Best cost seen across all restarts.
    pub best_cost: i64,
    /// Counters of the final run.
    pub last_run: Counters,
    /// Counters accumulated across every run.
    pub total: Counters,
}

impl SolveResult {
    /// Whether the search reached a zero-cost solution.
    pub fn solved(&self) -> bool {
        self.cost == 0
    }
}

/// Mutable search state threaded through the selectors.
pub(crate) struct SearchState<'a> {
    pub(crate) cfg: &'a SolveConfig,
    pub(crate) size: usize,
    pub(crate) sol: Vec<i32>,
    pub(crate) marks: MarkLedger,
    pub(crate) total_cost: i64,
    pub(crate) best_cost: i64,
    pub(crate) nb_var_marked: usize,
    pub(crate) list_i: Vec<usize>,
    pub(crate) list_j: Vec<usize>,
    pub(crate) pair_buf: Vec<(usize, usize)>,
    pub(crate) run: Counters,
}

impl<'a> SearchState<'a> {
    fn new(cfg: &'a SolveConfig, size: usize, sol: Vec<i32>) -> Self {
        SearchState {
            cfg,
            size,
            sol,
            marks: MarkLedger::new(size),
            total_cost: 0,
            best_cost: i64::MAX,
            nb_var_marked: 0,
            list_i: Vec::with_capacity(size),
            list_j: Vec::with_capacity(size),
            pair_buf: vec![(0, 0); size],
            run: Counters::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests(cfg: &'a SolveConfig, size: usize, total_cost: i64) -> Self {
        let mut st = SearchState::new(cfg, size, (0..size as i32).collect());
        st.total_cost = total_cost;
        st.best_cost = total_cost;
        st
    }
}

/// Adaptive Search runner.
///
/// Stateless; all tuning lives in [`SolveConfig`] and all problem
/// knowledge in the [`PermutProblem`] implementation.
pub struct AdaptiveRunner;

impl AdaptiveRunner {
    /// Solves `problem`, seeding the generator from `config.seed` (or
    /// entropy when unset).
    pub fn run<P: PermutProblem>(
        problem: &mut P,
        config: &SolveConfig,
    ) -> Result<SolveResult, SolveError> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self::run_inner(problem, config, None, &mut rng)
    }

    /// Solves `problem` with a caller-supplied generator.
    pub fn run_with_rng<P: PermutProblem, R: Rng>(
        problem: &mut P,
        config: &SolveConfig,
        rng: &mut R,
    ) -> Result<SolveResult, SolveError> {
        Self::run_inner(problem, config, None, rng)
    }

    /// Solves `problem` while exchanging progress with sibling searches
    /// through `coord`.
    pub fn run_monitored<P: PermutProblem, R: Rng>(
        problem: &mut P,
        config: &SolveConfig,
        coord: &CoordHandle,
        rng: &mut R,
    ) -> Result<SolveResult, SolveError> {
        Self::run_inner(problem, config, Some(coord), rng)
    }

    fn run_inner<P: PermutProblem, R: Rng>(
        problem: &mut P,
        cfg: &SolveConfig,
        coord: Option<&CoordHandle>,
        rng: &mut R,
    ) -> Result<SolveResult, SolveError> {
        cfg.validate().map_err(SolveError::InvalidConfig)?;
        let size = problem.size();
        if size == 0 {
            return Err(SolveError::InvalidConfig(
                "problem size must be at least 1".into(),
            ));
        }

        // resolve derived parameters once per solve
        let reset_limit = cfg
            .reset_limit
            .unwrap_or(size / 5 + 1)
            .min(size.saturating_sub(1).max(1));
        let nb_var_to_reset = cfg
            .nb_var_to_reset
            .unwrap_or_else(|| ((size * cfg.reset_percent as usize) + 99) / 100)
            .clamp(1, size);

        let materialized = cfg.values.materialize(size).len();
        if materialized != size {
            return Err(SolveError::ValueSetMismatch {
                expected: size,
                found: materialized,
            });
        }

        // initial permutation
        let sol = match &cfg.initial {
            Some(init) => {
                if init.len() != size {
                    return Err(SolveError::ValueSetMismatch {
                        expected: size,
                        found: init.len(),
                    });
                }
                let mut s = init.clone();
                if let Err(e) = permut::check_permutation(&s, &cfg.values) {
                    if cfg.repair_initial {
                        permut::repair_permutation(&mut s, &cfg.values, rng);
                    } else {
                        return Err(e.into());
                    }
                }
                s
            }
            None => permut::random_permutation(size, &cfg.values, rng),
        };

        let mut st = SearchState::new(cfg, size, sol);
        st.total_cost = problem.cost(&st.sol, true);
        st.best_cost = st.total_cost;

        // two-phase degrades to exhaustive when the model exposes no
        // per-variable costs
        let strategy = match cfg.strategy {
            SelectStrategy::TwoPhase if problem.variable_cost(&st.sol, 0).is_none() => {
                debug!("model exposes no per-variable cost, using exhaustive selection");
                SelectStrategy::Exhaustive
            }
            s => s,
        };

        let mut total = Counters::default();
        let mut restarts = 0u32;
        let mut best_cost_overall = st.total_cost;
        let mut plateau = 0u64;
        let mut restart_requested = false;

        debug!(
            size,
            cost = st.total_cost,
            ?strategy,
            "starting adaptive search"
        );

        'solve: while st.total_cost > 0 {
            // restart once the per-run budget is spent
            if restart_requested || st.run.iterations >= cfg.restart_limit {
                if restarts >= cfg.restart_max {
                    break 'solve;
                }
                restart_requested = false;
                st.run.fold_into(&mut total);
                restarts += 1;
                st.sol = permut::random_permutation(size, &cfg.values, rng);
                st.marks.clear();
                st.run = Counters::default();
                plateau = 0;
                st.total_cost = problem.cost(&st.sol, true);
                st.best_cost = st.total_cost;
                debug!(restarts, cost = st.total_cost, "restarted");
                if st.total_cost == 0 {
                    break 'solve;
                }
            }

            if let Some(handle) = coord {
                let it = st.run.iterations + total.iterations;
                // poll_interval is a public field, so it can be zero
                if it > 0 && it % handle.poll_interval.max(1) == 0 {
                    if handle.peers.terminated() {
                        debug!("peer requested termination");
                        break 'solve;
                    }
                    handle.peers.publish_cost(best_cost_overall);
                    let remote = handle.peers.best_cost();
                    if remote < st.total_cost
                        && rng.random_range(0..100u32) < handle.accept_prob
                        && restarts < cfg.restart_max
                    {
                        // a peer is doing better: give up this run early
                        restart_requested = true;
                        continue 'solve;
                    }
                }
            }

            st.run.iterations += 1;

            let choice = match strategy {
                SelectStrategy::TwoPhase => select::select_two_phase(&mut st, problem, rng)?,
                SelectStrategy::Exhaustive => select::select_exhaustive(&mut st, problem, rng)?,
            };

            // without the plateau policy the partner scan may draw the
            // selected variable itself; a self-pair is a local minimum,
            // not a swap
            let choice = match choice {
                SwapChoice::Pair { i, j, cost } if i == j => SwapChoice::Stay { i, cost },
                other => other,
            };

            // plateau bookkeeping (diagnostic only)
            if let Some(new_cost) = choice.cost() {
                if new_cost != st.total_cost {
                    if plateau > 1 {
                        trace!(length = plateau, "end of plateau");
                    }
                    plateau = 0;
                }
                if new_cost < st.best_cost {
                    st.best_cost = new_cost;
                }
            }
            plateau += 1;

            match choice {
                SwapChoice::Pair { i, j, cost } => {
                    st.marks.mark(i, st.run.swaps, cfg.freeze_swap);
                    st.marks.mark(j, st.run.swaps, cfg.freeze_swap);
                    st.run.swaps += 1;
                    st.sol.swap(i, j);
                    problem.executed_swap(&mut st.sol, i, j);
                    st.total_cost = cost;
                    trace!(i, j, cost, swap = st.run.swaps, "swap");
                }
                SwapChoice::Stay { i, cost } => {
                    st.run.local_minima += 1;
                    st.marks.mark(i, st.run.swaps, cfg.freeze_loc_min);
                    trace!(i, cost, "local minimum accepted");
                    // the frozen count is from the scan, before this mark
                    if st.nb_var_marked + 1 >= reset_limit {
                        trace!(
                            frozen = st.nb_var_marked + 1,
                            iteration = st.run.iterations,
                            "too many frozen variables"
                        );
                        st.total_cost = Self::do_reset(problem, &mut st, nb_var_to_reset, rng);
                    }
                }
                SwapChoice::NoCandidate => {
                    trace!(iteration = st.run.iterations, "no candidate move");
                }
            }

            if st.total_cost < best_cost_overall {
                best_cost_overall = st.total_cost;
            }
        }

        if st.total_cost < best_cost_overall {
            best_cost_overall = st.total_cost;
        }
        st.run.fold_into(&mut total);

        if let Some(handle) = coord {
            handle.peers.publish_cost(best_cost_overall);
            if st.total_cost == 0 {
                handle.peers.request_terminate();
            }
        }

        debug!(
            cost = st.total_cost,
            best = best_cost_overall,
            iterations = total.iterations,
            swaps = total.swaps,
            restarts,
            "search finished"
        );

        Ok(SolveResult {
            cost: st.total_cost,
            solution: st.sol,
            restarts,
            best_cost: best_cost_overall,
            last_run: st.run,
            total,
        })
    }

    /// Perturbs the solution, clears marks per the configured policy and
    /// returns the cost of the perturbed solution.
    fn do_reset<P: PermutProblem, R: Rng>(
        problem: &mut P,
        st: &mut SearchState<'_>,
        nb_var_to_reset: usize,
        rng: &mut R,
    ) -> i64 {
        let outcome = problem.reset(&mut st.sol, nb_var_to_reset, rng);
        if st.cfg.unmark_policy == UnmarkPolicy::All {
            st.marks.clear();
        }
        st.run.resets += 1;
        match outcome {
            ResetOutcome::KnownCost(c) => c,
            ResetOutcome::Unknown => problem.cost(&st.sol, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::CoordHandle;
    use crate::problem::PermutProblem;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Cost = number of slots out of place relative to the identity
    /// permutation. Any swap fixing at least one slot improves.
    struct SortModel {
        n: usize,
        resets_seen: u64,
    }

    impl SortModel {
        fn new(n: usize) -> Self {
            SortModel { n, resets_seen: 0 }
        }
    }

    impl PermutProblem for SortModel {
        fn size(&self) -> usize {
            self.n
        }

        fn cost(&mut self, sol: &[i32], _record: bool) -> i64 {
            sol.iter()
                .enumerate()
                .filter(|&(i, &v)| v != i as i32)
                .count() as i64
        }

        fn variable_cost(&mut self, sol: &[i32], i: usize) -> Option<i64> {
            Some(i64::from(sol[i] != i as i32))
        }

        fn reset<R: Rng>(&mut self, sol: &mut [i32], n: usize, rng: &mut R) -> ResetOutcome {
            self.resets_seen += 1;
            for _ in 0..n {
                let a = rng.random_range(0..sol.len());
                let b = rng.random_range(0..sol.len());
                sol.swap(a, b);
            }
            ResetOutcome::Unknown
        }
    }

    fn seeded(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_zero_cost_initial_returns_immediately() {
        let init: Vec<i32> = (0..8).collect();
        let cfg = SolveConfig::default().with_initial(init.clone());
        let mut model = SortModel::new(8);
        let result = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(0)).unwrap();
        assert!(result.solved());
        assert_eq!(result.solution, init);
        assert_eq!(result.total.iterations, 0);
        assert_eq!(result.total.swaps, 0);
    }

    #[test]
    fn test_solves_sort_model_two_phase() {
        for seed in 0..20 {
            let cfg = SolveConfig::default();
            let mut model = SortModel::new(12);
            let result =
                AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(seed)).unwrap();
            assert!(result.solved(), "seed {seed} failed: {result:?}");
            assert_eq!(result.solution, (0..12).collect::<Vec<i32>>());
        }
    }

    #[test]
    fn test_solves_sort_model_exhaustive() {
        for seed in 0..20 {
            let cfg =
                SolveConfig::default().with_strategy(crate::config::SelectStrategy::Exhaustive);
            let mut model = SortModel::new(10);
            let result =
                AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(seed)).unwrap();
            assert!(result.solved(), "seed {seed} failed: {result:?}");
        }
    }

    /// Model without per-variable costs; forces the strategy downgrade.
    struct PairOnly(SortModel);

    impl PermutProblem for PairOnly {
        fn size(&self) -> usize {
            self.0.size()
        }

        fn cost(&mut self, sol: &[i32], record: bool) -> i64 {
            self.0.cost(sol, record)
        }
    }

    #[test]
    fn test_two_phase_degrades_without_variable_costs() {
        let cfg = SolveConfig::default();
        let mut model = PairOnly(SortModel::new(8));
        let result = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(3)).unwrap();
        assert!(result.solved());
    }

    #[test]
    fn test_invalid_initial_rejected_without_repair() {
        let cfg = SolveConfig::default().with_initial(vec![0, 0, 2, 3]);
        let mut model = SortModel::new(4);
        let err = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(0)).unwrap_err();
        assert!(matches!(err, SolveError::InvalidInitialSolution(_)));
    }

    #[test]
    fn test_invalid_initial_repaired_when_requested() {
        let cfg = SolveConfig::default()
            .with_initial(vec![0, 0, 2, 3])
            .with_repair_initial(true);
        let mut model = SortModel::new(4);
        let result = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(0)).unwrap();
        assert!(result.solved());
    }

    #[test]
    fn test_initial_length_mismatch() {
        let cfg = SolveConfig::default().with_initial(vec![0, 1, 2]);
        let mut model = SortModel::new(4);
        let err = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(0)).unwrap_err();
        assert_eq!(
            err,
            SolveError::ValueSetMismatch {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_multiset_length_mismatch_rejected() {
        let cfg =
            SolveConfig::default().with_values(crate::permut::ValueSet::Multiset(vec![1, 2]));
        let mut model = SortModel::new(4);
        let err = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(0)).unwrap_err();
        assert_eq!(
            err,
            SolveError::ValueSetMismatch {
                expected: 4,
                found: 2
            }
        );
    }

    #[test]
    fn test_zero_size_problem_rejected() {
        let cfg = SolveConfig::default();
        let mut model = SortModel::new(0);
        let err = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(0)).unwrap_err();
        assert!(matches!(err, SolveError::InvalidConfig(_)));
    }

    /// Cost function with a built-in plateau: only the swap (0, 1) on a
    /// particular arrangement ever improves, everything else is flat.
    /// Forces the reset machinery to fire on small freeze budgets.
    struct FlatModel {
        n: usize,
        resets_seen: u64,
    }

    impl PermutProblem for FlatModel {
        fn size(&self) -> usize {
            self.n
        }

        fn cost(&mut self, _sol: &[i32], _record: bool) -> i64 {
            1
        }

        fn variable_cost(&mut self, _sol: &[i32], _i: usize) -> Option<i64> {
            Some(1)
        }

        fn reset<R: Rng>(&mut self, sol: &mut [i32], _n: usize, _rng: &mut R) -> ResetOutcome {
            self.resets_seen += 1;
            if self.resets_seen >= 3 {
                // pretend the perturbation solved the instance
                sol.sort_unstable();
                return ResetOutcome::KnownCost(0);
            }
            ResetOutcome::Unknown
        }
    }

    #[test]
    fn test_reset_fires_and_known_cost_is_trusted() {
        // aggressive freezing so the reset threshold trips quickly
        let cfg = SolveConfig::default()
            .with_prob_select_loc_min(Some(100))
            .with_freeze_loc_min(50)
            .with_reset_limit(2)
            .with_restart_limit(5_000);
        let mut model = FlatModel {
            n: 8,
            resets_seen: 0,
        };
        let result = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(7)).unwrap();
        assert!(result.solved());
        assert_eq!(model.resets_seen, 3);
        assert_eq!(result.total.resets, 3);
    }

    /// Unsolvable model: cost never reaches zero.
    struct Unsolvable(usize);

    impl PermutProblem for Unsolvable {
        fn size(&self) -> usize {
            self.0
        }

        fn cost(&mut self, _sol: &[i32], _record: bool) -> i64 {
            1
        }

        fn variable_cost(&mut self, _sol: &[i32], _i: usize) -> Option<i64> {
            Some(1)
        }
    }

    #[test]
    fn test_termination_bound_with_restarts() {
        let cfg = SolveConfig::default()
            .with_restart_limit(200)
            .with_restart_max(3)
            .with_prob_select_loc_min(None);
        let mut model = Unsolvable(6);
        let result = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(11)).unwrap();
        assert!(!result.solved());
        assert_eq!(result.restarts, 3);
        // every run consumes exactly its iteration budget when unsolved
        assert_eq!(result.total.iterations, 4 * 200);
    }

    #[test]
    fn test_self_pair_without_policy_counts_as_local_minimum() {
        // on a flat landscape with no plateau policy the partner scan
        // may draw the selected variable itself; that step must land in
        // the local-minimum branch, never in the swap branch
        let cfg = SolveConfig::default()
            .with_restart_limit(500)
            .with_prob_select_loc_min(None);
        let mut model = Unsolvable(6);
        let result = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(21)).unwrap();
        assert!(!result.solved());
        assert!(result.total.local_minima > 0);
        assert_eq!(
            result.total.swaps + result.total.local_minima,
            result.total.iterations
        );
        // consecutive self-pairs must reach the reset threshold too
        assert!(result.total.resets > 0);
    }

    #[test]
    fn test_unmark_keep_preserves_marks_across_resets() {
        // every step is a plateau stay, so marks only ever accumulate;
        // with Keep the resets leave them in place and selection
        // eventually runs out of variables
        let cfg = SolveConfig::default()
            .with_prob_select_loc_min(Some(100))
            .with_freeze_loc_min(1_000)
            .with_reset_limit(6)
            .with_unmark_policy(UnmarkPolicy::Keep)
            .with_restart_limit(5_000);
        let mut model = Unsolvable(8);
        let err = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(3)).unwrap_err();
        assert!(matches!(err, SolveError::AllVariablesFrozen { .. }));

        // the same setup with All clears marks at each reset and keeps
        // searching until the iteration budget runs out
        let cfg = SolveConfig::default()
            .with_prob_select_loc_min(Some(100))
            .with_freeze_loc_min(1_000)
            .with_reset_limit(6)
            .with_unmark_policy(UnmarkPolicy::All)
            .with_restart_limit(60);
        let mut model = Unsolvable(8);
        let result = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(3)).unwrap();
        assert!(!result.solved());
        assert!(result.total.resets >= 2);
    }

    #[test]
    fn test_counter_folding_is_consistent() {
        let cfg = SolveConfig::default()
            .with_restart_limit(100)
            .with_restart_max(2)
            .with_prob_select_loc_min(None);
        let mut model = Unsolvable(5);
        let result = AdaptiveRunner::run_with_rng(&mut model, &cfg, &mut seeded(13)).unwrap();
        assert!(result.last_run.iterations <= result.total.iterations);
        assert!(result.total.swaps <= result.total.iterations);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let cfg = SolveConfig::default().with_seed(99);
        let mut a = SortModel::new(10);
        let mut b = SortModel::new(10);
        let ra = AdaptiveRunner::run(&mut a, &cfg).unwrap();
        let rb = AdaptiveRunner::run(&mut b, &cfg).unwrap();
        assert_eq!(ra, rb);
    }

    #[test]
    fn test_monitored_run_publishes_and_terminates_peers() {
        let handle = CoordHandle::new(crate::coord::SearchPeers::new());
        let cfg = SolveConfig::default();
        let mut model = SortModel::new(10);
        let result =
            AdaptiveRunner::run_monitored(&mut model, &cfg, &handle, &mut seeded(5)).unwrap();
        assert!(result.solved());
        assert_eq!(handle.peers.best_cost(), 0);
        assert!(handle.peers.terminated());
    }

    #[test]
    fn test_monitored_run_stops_when_terminated() {
        let handle = CoordHandle::new(crate::coord::SearchPeers::new()).with_poll_interval(10);
        handle.peers.request_terminate();
        let cfg = SolveConfig::default()
            .with_restart_limit(100_000)
            .with_prob_select_loc_min(None);
        let mut model = Unsolvable(6);
        let result =
            AdaptiveRunner::run_monitored(&mut model, &cfg, &handle, &mut seeded(5)).unwrap();
        assert!(!result.solved());
        assert!(result.total.iterations <= 10);
    }

    #[test]
    fn test_monitored_run_tolerates_zero_poll_interval() {
        // the fields are public, so a handle built by struct literal
        // can carry an interval of zero
        let handle = CoordHandle {
            peers: crate::coord::SearchPeers::new(),
            poll_interval: 0,
            accept_prob: 80,
        };
        handle.peers.request_terminate();
        let cfg = SolveConfig::default()
            .with_restart_limit(100_000)
            .with_prob_select_loc_min(None);
        let mut model = Unsolvable(6);
        let result =
            AdaptiveRunner::run_monitored(&mut model, &cfg, &handle, &mut seeded(5)).unwrap();
        assert!(!result.solved());
        assert!(result.total.iterations <= 1);
    }
}
