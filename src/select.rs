//! Variable-pair selection strategies.
//!
//! Two interchangeable selectors produce the next move from the current
//! search state:
//!
//! - the two-phase heuristic picks the variable with maximal projected
//!   error, then the partner minimizing the post-swap cost;
//! - the exhaustive selector scans every candidate pair and keeps the
//!   global best swap.
//!
//! Both break ties uniformly at random and share the plateau policy: when
//! the best reachable cost does not improve on the current one, the move
//! may be replaced by an accepted local minimum (a "stay") that freezes
//! the chosen variable.

use rand::Rng;

use crate::problem::PermutProblem;
use crate::runner::{SearchState, SolveError};

/// The move decided by a selector for one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SwapChoice {
    /// Swap slots `i` and `j`; `cost` is the resulting total cost.
    Pair { i: usize, j: usize, cost: i64 },
    /// Accept a local minimum at slot `i` (no swap); `cost` is the best
    /// cost the scan could reach.
    Stay { i: usize, cost: i64 },
    /// Every candidate was frozen; skip this iteration.
    NoCandidate,
}

impl SwapChoice {
    /// The cost the scan settled on, for plateau bookkeeping.
    pub(crate) fn cost(&self) -> Option<i64> {
        match *self {
            SwapChoice::Pair { cost, .. } | SwapChoice::Stay { cost, .. } => Some(cost),
            SwapChoice::NoCandidate => None,
        }
    }
}

/// Phase one of the heuristic selector: the unfrozen variable with
/// maximal projected error, ties collected and broken uniformly.
///
/// Also recounts the frozen variables, which the solve loop compares
/// against the reset threshold.
fn select_var_high_cost<P: PermutProblem, R: Rng>(
    st: &mut SearchState<'_>,
    problem: &mut P,
    rng: &mut R,
) -> Result<usize, SolveError> {
    st.list_i.clear();
    st.nb_var_marked = 0;
    let mut max = 0i64;

    for i in 0..st.size {
        if st.marks.is_marked(i, st.run.swaps) {
            st.nb_var_marked += 1;
            continue;
        }
        let x = match problem.variable_cost(&st.sol, i) {
            Some(x) => x,
            None => return Err(SolveError::MissingVariableCost { index: i }),
        };
        if x >= max {
            if x > max {
                max = x;
                st.list_i.clear();
            }
            st.list_i.push(i);
        }
    }

    if st.list_i.is_empty() {
        return Err(SolveError::AllVariablesFrozen {
            iteration: st.run.iterations,
        });
    }

    st.run.candidate_ties += st.list_i.len() as u64;
    Ok(st.list_i[rng.random_range(0..st.list_i.len())])
}

/// Two-phase heuristic selection.
///
/// When the plateau policy is active and every partner of the chosen
/// variable is frozen, another maximal-error variable is drawn and the
/// partner scan repeats, up to `select_retry_limit` times before forcing
/// a local-minimum acceptance.
pub(crate) fn select_two_phase<P: PermutProblem, R: Rng>(
    st: &mut SearchState<'_>,
    problem: &mut P,
    rng: &mut R,
) -> Result<SwapChoice, SolveError> {
    let mut max_i = select_var_high_cost(st, problem, rng)?;
    let policy = st.cfg.prob_select_loc_min;
    let mut retries = 0u32;

    loop {
        st.list_j.clear();
        let mut new_cost = st.total_cost;

        for j in 0..st.size {
            let marked = st.marks.is_marked(j, st.run.swaps);
            if marked && !st.cfg.ignore_marks_if_best {
                continue;
            }
            let x = problem.swap_cost(&mut st.sol, st.total_cost, j, max_i);
            if marked && x >= st.best_cost {
                continue;
            }
            if policy.is_some() && j == max_i {
                // staying put is decided by the plateau policy below
                continue;
            }
            if x <= new_cost {
                if x < new_cost {
                    st.list_j.clear();
                    new_cost = x;
                    if st.cfg.first_best {
                        return Ok(SwapChoice::Pair {
                            i: max_i,
                            j,
                            cost: x,
                        });
                    }
                }
                st.list_j.push(j);
            }
        }

        if let Some(p) = policy {
            if new_cost >= st.total_cost
                && (rng.random_range(0..100u32) < p
                    || (st.list_i.len() <= 1 && st.list_j.len() <= 1))
            {
                return Ok(SwapChoice::Stay {
                    i: max_i,
                    cost: new_cost,
                });
            }
            if st.list_j.is_empty() {
                // every partner frozen: re-draw among the tied
                // maximal-error variables and rescan, bounded
                if retries >= st.cfg.select_retry_limit {
                    return Ok(SwapChoice::Stay {
                        i: max_i,
                        cost: st.total_cost,
                    });
                }
                retries += 1;
                st.run.iterations += 1;
                max_i = st.list_i[rng.random_range(0..st.list_i.len())];
                continue;
            }
        }

        if st.list_j.is_empty() {
            return Ok(SwapChoice::NoCandidate);
        }
        let j = st.list_j[rng.random_range(0..st.list_j.len())];
        return Ok(SwapChoice::Pair {
            i: max_i,
            j,
            cost: new_cost,
        });
    }
}

/// Exhaustive pair selection.
///
/// Walks the pair enumeration exposed by the model (defaulting to the
/// `i < j` triangle) and keeps the swaps tied for minimal cost in a
/// circular buffer of capacity `size`. Once more than `size` ties
/// accumulate, older ones are silently overwritten: a bounded-memory
/// approximation of uniform tie-breaking, slightly biased toward late
/// ties, kept for parity with the reference implementation.
pub(crate) fn select_exhaustive<P: PermutProblem, R: Rng>(
    st: &mut SearchState<'_>,
    problem: &mut P,
    rng: &mut R,
) -> Result<SwapChoice, SolveError> {
    st.nb_var_marked = 0;
    let mut ties = 0usize;
    let mut stored = 0usize;
    let mut new_cost = i64::MAX;

    let mut i_next = problem.next_i(None);
    while let Some(i) = i_next {
        if i >= st.size {
            break;
        }
        let i_marked = st.marks.is_marked(i, st.run.swaps);
        if i_marked {
            st.nb_var_marked += 1;
            if !st.cfg.ignore_marks_if_best {
                i_next = problem.next_i(Some(i));
                continue;
            }
        }

        let mut j_next = problem.next_j(i, None);
        while let Some(j) = j_next {
            if j >= st.size {
                break;
            }
            j_next = problem.next_j(i, Some(j));

            let j_marked = st.marks.is_marked(j, st.run.swaps);
            if j_marked && !st.cfg.ignore_marks_if_best {
                continue;
            }
            let x = problem.swap_cost(&mut st.sol, st.total_cost, i, j);
            if (i_marked || j_marked) && x >= st.best_cost {
                continue;
            }

            if x <= new_cost {
                if x < new_cost {
                    new_cost = x;
                    ties = 0;
                    stored = 0;
                    if st.cfg.first_best && x < st.total_cost {
                        return Ok(SwapChoice::Pair { i, j, cost: x });
                    }
                }
                st.pair_buf[stored] = (i, j);
                stored = (stored + 1) % st.size;
                ties = (ties + 1).min(st.size);
            }
        }
        i_next = problem.next_i(Some(i));
    }

    st.run.candidate_ties += ties as u64;

    if new_cost >= st.total_cost {
        let policy_hit = st
            .cfg
            .prob_select_loc_min
            .is_some_and(|p| rng.random_range(0..100u32) < p);
        if ties == 0 || policy_hit {
            // forced stay at the first unfrozen variable
            for v in 0..st.size {
                if !st.marks.is_marked(v, st.run.swaps) {
                    return Ok(SwapChoice::Stay { i: v, cost: new_cost });
                }
            }
            return Err(SolveError::AllVariablesFrozen {
                iteration: st.run.iterations,
            });
        }
        if st.cfg.prob_select_loc_min.is_none() {
            // without the plateau policy, stay on a uniformly random
            // variable with probability size / (ties + size)
            let x = rng.random_range(0..ties + st.size);
            if x < st.size {
                return Ok(SwapChoice::Stay { i: x, cost: new_cost });
            }
        }
    }

    let (i, j) = st.pair_buf[rng.random_range(0..ties)];
    Ok(SwapChoice::Pair { i, j, cost: new_cost })
}
