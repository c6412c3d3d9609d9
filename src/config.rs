//! Solver configuration.

use crate::permut::ValueSet;

/// How the solver picks the pair of variables to swap each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectStrategy {
    /// Two-phase heuristic: pick the variable with maximal projected
    /// error, then the partner minimizing the post-swap cost. Requires
    /// the model to implement
    /// [`variable_cost`](crate::problem::PermutProblem::variable_cost);
    /// the solver silently falls back to [`Exhaustive`](Self::Exhaustive)
    /// otherwise.
    #[default]
    TwoPhase,
    /// Scan every candidate pair and take the global best swap.
    Exhaustive,
}

/// What happens to frozen variables when a reset fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnmarkPolicy {
    /// Clear every mark (the reference behavior).
    #[default]
    All,
    /// Leave marks untouched; they expire as the swap counter advances.
    Keep,
}

/// Tuning parameters for one solve call.
///
/// All fields are read-only during a run. The defaults are reasonable
/// generic settings; shipped models provide tuned variants (e.g.
/// [`Queens::suggested_config`](crate::problems::Queens::suggested_config)).
///
/// # Examples
///
/// ```
/// use adaptive_search::config::SolveConfig;
///
/// let config = SolveConfig::default()
///     .with_first_best(true)
///     .with_prob_select_loc_min(Some(6))
///     .with_freeze_loc_min(3)
///     .with_restart_limit(100_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveConfig {
    /// Variable-pair selection strategy.
    pub strategy: SelectStrategy,

    /// Accept the first strictly improving swap found instead of scanning
    /// for the best one.
    pub first_best: bool,

    /// Percentage chance, in `0..=100`, of accepting a local minimum
    /// (freeze the selected variable and stay) rather than walking along
    /// a plateau. `None` disables the policy entirely: the selector then
    /// returns the best swap found even when it does not improve.
    pub prob_select_loc_min: Option<u32>,

    /// Number of swaps a local-minimum variable stays frozen.
    pub freeze_loc_min: u64,

    /// Number of swaps both variables of an executed swap stay frozen.
    pub freeze_swap: u64,

    /// Number of simultaneously frozen variables that triggers a reset.
    /// `None` derives `size / 5 + 1` at solve time; either way the value
    /// is capped at `size - 1`.
    pub reset_limit: Option<usize>,

    /// Number of variables perturbed by a reset. `None` derives the count
    /// from [`reset_percent`](Self::reset_percent).
    pub nb_var_to_reset: Option<usize>,

    /// Percentage of variables perturbed by a reset when
    /// [`nb_var_to_reset`](Self::nb_var_to_reset) is `None`.
    pub reset_percent: u32,

    /// Iteration budget of one run; reaching it triggers a restart (or
    /// termination once [`restart_max`](Self::restart_max) is exhausted).
    pub restart_limit: u64,

    /// Maximum number of restarts (full re-randomizations) per call.
    pub restart_max: u32,

    /// Value set the solution is a permutation of.
    pub values: ValueSet,

    /// Starting configuration. `None` draws a random permutation; a
    /// supplied vector is validated first (see
    /// [`repair_initial`](Self::repair_initial)).
    pub initial: Option<Vec<i32>>,

    /// Repair an invalid starting configuration instead of failing.
    pub repair_initial: bool,

    /// Allow a frozen partner variable anyway when the probed swap beats
    /// the best cost seen this run.
    pub ignore_marks_if_best: bool,

    /// Mark handling when a reset fires.
    pub unmark_policy: UnmarkPolicy,

    /// Bound on the two-phase selector's partner-rescan loop (when every
    /// partner of the chosen variable is frozen, another maximal-error
    /// variable is drawn and the scan repeats). Exceeding the bound
    /// forces a local-minimum acceptance, guaranteeing progress.
    pub select_retry_limit: u32,

    /// Random seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            strategy: SelectStrategy::TwoPhase,
            first_best: false,
            prob_select_loc_min: Some(6),
            freeze_loc_min: 1,
            freeze_swap: 0,
            reset_limit: None,
            nb_var_to_reset: None,
            reset_percent: 10,
            restart_limit: 10_000_000,
            restart_max: 0,
            values: ValueSet::default(),
            initial: None,
            repair_initial: false,
            ignore_marks_if_best: false,
            unmark_policy: UnmarkPolicy::All,
            select_retry_limit: 16,
            seed: None,
        }
    }
}

impl SolveConfig {
    /// Sets the selection strategy.
    pub fn with_strategy(mut self, strategy: SelectStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enables or disables first-best selection.
    pub fn with_first_best(mut self, first_best: bool) -> Self {
        self.first_best = first_best;
        self
    }

    /// Sets the local-minimum acceptance probability (`None` disables).
    pub fn with_prob_select_loc_min(mut self, prob: Option<u32>) -> Self {
        self.prob_select_loc_min = prob;
        self
    }

    /// Sets the freeze duration for local-minimum variables.
    pub fn with_freeze_loc_min(mut self, swaps: u64) -> Self {
        self.freeze_loc_min = swaps;
        self
    }

    /// Sets the freeze duration for swapped variables.
    pub fn with_freeze_swap(mut self, swaps: u64) -> Self {
        self.freeze_swap = swaps;
        self
    }

    /// Sets the frozen-variable count that triggers a reset.
    pub fn with_reset_limit(mut self, limit: usize) -> Self {
        self.reset_limit = Some(limit);
        self
    }

    /// Sets the exact number of variables a reset perturbs.
    pub fn with_nb_var_to_reset(mut self, n: usize) -> Self {
        self.nb_var_to_reset = Some(n);
        self
    }

    /// Sets the percentage of variables a reset perturbs.
    pub fn with_reset_percent(mut self, percent: u32) -> Self {
        self.reset_percent = percent;
        self
    }

    /// Sets the per-run iteration budget.
    pub fn with_restart_limit(mut self, iterations: u64) -> Self {
        self.restart_limit = iterations;
        self
    }

    /// Sets the maximum number of restarts.
    pub fn with_restart_max(mut self, restarts: u32) -> Self {
        self.restart_max = restarts;
        self
    }

    /// Sets the value set.
    pub fn with_values(mut self, values: ValueSet) -> Self {
        self.values = values;
        self
    }

    /// Supplies a starting configuration.
    pub fn with_initial(mut self, initial: Vec<i32>) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Enables repair of an invalid starting configuration.
    pub fn with_repair_initial(mut self, repair: bool) -> Self {
        self.repair_initial = repair;
        self
    }

    /// Enables the frozen-partner exemption for best-beating swaps.
    pub fn with_ignore_marks_if_best(mut self, ignore: bool) -> Self {
        self.ignore_marks_if_best = ignore;
        self
    }

    /// Sets the unmark policy applied at reset.
    pub fn with_unmark_policy(mut self, policy: UnmarkPolicy) -> Self {
        self.unmark_policy = policy;
        self
    }

    /// Sets the partner-rescan retry bound.
    pub fn with_select_retry_limit(mut self, retries: u32) -> Self {
        self.select_retry_limit = retries;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(p) = self.prob_select_loc_min {
            if p > 100 {
                return Err(format!(
                    "prob_select_loc_min must be in 0..=100, got {p}"
                ));
            }
        }
        if self.reset_percent > 100 {
            return Err(format!(
                "reset_percent must be in 0..=100, got {}",
                self.reset_percent
            ));
        }
        if self.restart_limit == 0 {
            return Err("restart_limit must be at least 1".into());
        }
        if self.select_retry_limit == 0 {
            return Err("select_retry_limit must be at least 1".into());
        }
        Ok(())
    }
}
