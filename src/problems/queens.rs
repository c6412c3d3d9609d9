//! N-queens as a permutation problem.
//!
//! `sol[i] = j` places a queen on row `i`, column `j`. Rows and columns
//! are conflict-free by construction; the cost counts over-occupied
//! diagonals. With `n` rows there are `2n - 1` diagonals per direction,
//! indexed `i + (n-1) - j` for `\` and `i + j` for `/`.

use crate::config::SolveConfig;
use crate::problem::PermutProblem;

/// Penalty of a diagonal holding `x` queens: zero up to one queen, `x`
/// beyond that.
fn penalty(x: i32) -> i64 {
    if x <= 1 {
        0
    } else {
        i64::from(x)
    }
}

/// The N-queens model with incremental diagonal occupancy tables.
#[derive(Debug, Clone)]
pub struct Queens {
    n: usize,
    /// Queens per `\` diagonal, indexed by `i + (n-1) - j`.
    err_d1: Vec<i32>,
    /// Queens per `/` diagonal, indexed by `i + j`.
    err_d2: Vec<i32>,
}

impl Queens {
    /// Creates a model for an `n x n` board.
    pub fn new(n: usize) -> Self {
        let nb_diag = 2 * n.max(1) - 1;
        Queens {
            n,
            err_d1: vec![0; nb_diag],
            err_d2: vec![0; nb_diag],
        }
    }

    /// The tuning that performs well on this model: first-improvement
    /// scanning, light freezing, small resets.
    pub fn suggested_config(n: usize) -> SolveConfig {
        SolveConfig::default()
            .with_first_best(true)
            .with_prob_select_loc_min(Some(6))
            .with_freeze_loc_min(3)
            .with_freeze_swap(0)
            .with_reset_limit((n / 5).max(1))
            .with_reset_percent(10)
    }

    fn d1(&self, i: usize, j: i32) -> usize {
        (i as i32 + (self.n as i32 - 1) - j) as usize
    }

    fn d2(&self, i: usize, j: i32) -> usize {
        (i as i32 + j) as usize
    }

    /// Accumulates a diagonal update, merging duplicates so a diagonal
    /// touched twice by one swap is adjusted once with the net delta.
    fn push_update(updates: &mut [(usize, i32); 4], len: &mut usize, d: usize, delta: i32) {
        for entry in updates[..*len].iter_mut() {
            if entry.0 == d {
                entry.1 += delta;
                return;
            }
        }
        updates[*len] = (d, delta);
        *len += 1;
    }

    /// Re-projects `current` over the listed diagonal deltas.
    fn apply_updates(err: &[i32], updates: &[(usize, i32)], mut current: i64) -> i64 {
        for &(d, delta) in updates {
            let x = err[d];
            current -= penalty(x);
            current += penalty(x + delta);
        }
        current
    }
}

impl PermutProblem for Queens {
    fn size(&self) -> usize {
        self.n
    }

    fn cost(&mut self, sol: &[i32], _record: bool) -> i64 {
        self.err_d1.fill(0);
        self.err_d2.fill(0);
        for (i, &j) in sol.iter().enumerate() {
            let (d1, d2) = (self.d1(i, j), self.d2(i, j));
            self.err_d1[d1] += 1;
            self.err_d2[d2] += 1;
        }
        self.err_d1
            .iter()
            .zip(&self.err_d2)
            .map(|(&a, &b)| penalty(a) + penalty(b))
            .sum()
    }

    fn variable_cost(&mut self, sol: &[i32], i: usize) -> Option<i64> {
        let j = sol[i];
        Some(penalty(self.err_d1[self.d1(i, j)]) + penalty(self.err_d2[self.d2(i, j)]))
    }

    fn swap_cost(&mut self, sol: &mut [i32], current_cost: i64, i1: usize, i2: usize) -> i64 {
        let j1 = sol[i1];
        let j2 = sol[i2];

        let mut upd1 = [(0usize, 0i32); 4];
        let mut len1 = 0;
        Self::push_update(&mut upd1, &mut len1, self.d1(i1, j1), -1);
        Self::push_update(&mut upd1, &mut len1, self.d1(i2, j2), -1);
        Self::push_update(&mut upd1, &mut len1, self.d1(i1, j2), 1);
        Self::push_update(&mut upd1, &mut len1, self.d1(i2, j1), 1);

        let mut upd2 = [(0usize, 0i32); 4];
        let mut len2 = 0;
        Self::push_update(&mut upd2, &mut len2, self.d2(i1, j1), -1);
        Self::push_update(&mut upd2, &mut len2, self.d2(i2, j2), -1);
        Self::push_update(&mut upd2, &mut len2, self.d2(i1, j2), 1);
        Self::push_update(&mut upd2, &mut len2, self.d2(i2, j1), 1);

        let r = Self::apply_updates(&self.err_d1, &upd1[..len1], current_cost);
        Self::apply_updates(&self.err_d2, &upd2[..len2], r)
    }

    fn executed_swap(&mut self, sol: &[i32], i1: usize, i2: usize) {
        // sol already holds the swapped values
        let j1 = sol[i2];
        let j2 = sol[i1];

        for (d, delta) in [
            (self.d1(i1, j1), -1),
            (self.d1(i2, j2), -1),
            (self.d1(i1, j2), 1),
            (self.d1(i2, j1), 1),
        ] {
            self.err_d1[d] += delta;
        }
        for (d, delta) in [
            (self.d2(i1, j1), -1),
            (self.d2(i2, j2), -1),
            (self.d2(i1, j2), 1),
            (self.d2(i2, j1), 1),
        ] {
            self.err_d2[d] += delta;
        }
    }

    fn check(&self, sol: &[i32]) -> bool {
        for i1 in 0..sol.len() {
            for i2 in i1 + 1..sol.len() {
                if (sol[i2] - sol[i1]).abs() as usize == i2 - i1 {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::AdaptiveRunner;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn brute_cost(sol: &[i32]) -> i64 {
        let n = sol.len();
        let mut d1 = vec![0i32; 2 * n - 1];
        let mut d2 = vec![0i32; 2 * n - 1];
        for (i, &j) in sol.iter().enumerate() {
            d1[i + (n - 1) - j as usize] += 1;
            d2[i + j as usize] += 1;
        }
        d1.iter().chain(&d2).map(|&x| penalty(x)).sum()
    }

    #[test]
    fn test_cost_matches_brute_force() {
        let mut q = Queens::new(6);
        for sol in [
            vec![0, 1, 2, 3, 4, 5],
            vec![1, 3, 5, 0, 2, 4],
            vec![5, 4, 3, 2, 1, 0],
            vec![2, 0, 5, 3, 1, 4],
        ] {
            assert_eq!(q.cost(&sol, true), brute_cost(&sol), "sol {sol:?}");
        }
    }

    #[test]
    fn test_known_solution_has_zero_cost() {
        let mut q = Queens::new(6);
        let sol = vec![1, 3, 5, 0, 2, 4];
        assert_eq!(q.cost(&sol, true), 0);
        assert!(q.check(&sol));
    }

    #[test]
    fn test_swap_cost_agrees_with_recomputation() {
        let mut q = Queens::new(8);
        let mut sol: Vec<i32> = (0..8).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        use rand::seq::SliceRandom;
        sol.shuffle(&mut rng);

        let current = q.cost(&sol, true);
        for i in 0..8 {
            for j in i + 1..8 {
                let predicted = q.swap_cost(&mut sol, current, i, j);
                let mut swapped = sol.clone();
                swapped.swap(i, j);
                assert_eq!(
                    predicted,
                    brute_cost(&swapped),
                    "swap ({i}, {j}) on {sol:?}"
                );
            }
        }
    }

    #[test]
    fn test_executed_swap_keeps_tables_in_sync() {
        let mut q = Queens::new(8);
        let mut sol: Vec<i32> = vec![3, 1, 4, 7, 5, 0, 2, 6];
        let mut fresh = q.clone();
        q.cost(&sol, true);

        for (i, j) in [(0, 4), (2, 7), (1, 3), (5, 6)] {
            sol.swap(i, j);
            q.executed_swap(&sol, i, j);
            assert_eq!(q.err_d1, {
                fresh.cost(&sol, true);
                fresh.err_d1.clone()
            });
            assert_eq!(q.err_d2, fresh.err_d2);
        }
    }

    #[test]
    fn test_variable_cost_sums_diagonal_penalties() {
        let mut q = Queens::new(4);
        // all queens on the main diagonal: every variable conflicts
        let sol = vec![0, 1, 2, 3];
        let total = q.cost(&sol, true);
        assert_eq!(total, 4);
        for i in 0..4 {
            assert_eq!(q.variable_cost(&sol, i), Some(4));
        }
    }

    #[test]
    fn test_check_rejects_diagonal_conflicts() {
        let q = Queens::new(4);
        assert!(!q.check(&[0, 1, 3, 2]));
        assert!(q.check(&[1, 3, 0, 2]));
    }

    #[test]
    fn test_solves_eight_queens_across_seeds() {
        let mut solved = 0;
        for seed in 0..100 {
            let mut q = Queens::new(8);
            let cfg = Queens::suggested_config(8).with_restart_max(2);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let result = AdaptiveRunner::run_with_rng(&mut q, &cfg, &mut rng).unwrap();
            if result.solved() {
                assert!(q.check(&result.solution), "seed {seed} claims wrongly");
                solved += 1;
            }
        }
        assert!(solved >= 95, "only {solved}/100 seeds solved 8-queens");
    }

    #[test]
    fn test_solves_fifty_queens() {
        let mut q = Queens::new(50);
        let cfg = Queens::suggested_config(50).with_restart_max(2);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let result = AdaptiveRunner::run_with_rng(&mut q, &cfg, &mut rng).unwrap();
        assert!(result.solved());
        assert!(q.check(&result.solution));
    }
}
