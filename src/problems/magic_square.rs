//! Magic squares as a permutation problem.
//!
//! The solution holds the values `1..=n*n` row by row; every row, column
//! and both main diagonals must sum to the magic constant
//! `n * (n*n + 1) / 2`. The cost is the sum of absolute deviations from
//! that constant, maintained incrementally per row, column and diagonal.

use crate::config::SolveConfig;
use crate::permut::ValueSet;
use crate::problem::PermutProblem;

/// The magic square model of side `n` with incremental sum tables.
#[derive(Debug, Clone)]
pub struct MagicSquare {
    n: usize,
    /// The magic constant each line must reach.
    magic: i64,
    /// Signed deviation of each row sum from the magic constant.
    err_row: Vec<i64>,
    /// Signed deviation of each column sum.
    err_col: Vec<i64>,
    /// Signed deviation of the `\` diagonal.
    err_d1: i64,
    /// Signed deviation of the `/` diagonal.
    err_d2: i64,
}

impl MagicSquare {
    /// Creates a model for an `n x n` square.
    pub fn new(n: usize) -> Self {
        let cells = (n * n) as i64;
        MagicSquare {
            n,
            magic: n as i64 * (cells + 1) / 2,
            err_row: vec![0; n],
            err_col: vec![0; n],
            err_d1: 0,
            err_d2: 0,
        }
    }

    /// Side length of the square.
    pub fn side(&self) -> usize {
        self.n
    }

    /// The sum every row, column and diagonal must reach.
    pub fn magic_constant(&self) -> i64 {
        self.magic
    }

    /// The tuning that performs well on this model: values starting at 1,
    /// heavier resets than the defaults.
    pub fn suggested_config(n: usize) -> SolveConfig {
        SolveConfig::default()
            .with_values(ValueSet::Range { base: 1 })
            .with_prob_select_loc_min(Some(6))
            .with_freeze_loc_min(1)
            .with_freeze_swap(0)
            .with_reset_limit((n * 12 / 10).max(1))
            .with_reset_percent(25)
    }

    fn row(&self, k: usize) -> usize {
        k / self.n
    }

    fn col(&self, k: usize) -> usize {
        k % self.n
    }

    fn on_d1(&self, k: usize) -> bool {
        self.row(k) == self.col(k)
    }

    fn on_d2(&self, k: usize) -> bool {
        self.row(k) + self.col(k) == self.n - 1
    }
}

impl PermutProblem for MagicSquare {
    fn size(&self) -> usize {
        self.n * self.n
    }

    fn cost(&mut self, sol: &[i32], _record: bool) -> i64 {
        self.err_row.fill(-self.magic);
        self.err_col.fill(-self.magic);
        self.err_d1 = -self.magic;
        self.err_d2 = -self.magic;

        for (k, &v) in sol.iter().enumerate() {
            let v = i64::from(v);
            let (row, col) = (self.row(k), self.col(k));
            self.err_row[row] += v;
            self.err_col[col] += v;
            if self.on_d1(k) {
                self.err_d1 += v;
            }
            if self.on_d2(k) {
                self.err_d2 += v;
            }
        }

        self.err_row.iter().chain(self.err_col.iter()).map(|e| e.abs()).sum::<i64>()
            + self.err_d1.abs()
            + self.err_d2.abs()
    }

    fn variable_cost(&mut self, _sol: &[i32], k: usize) -> Option<i64> {
        let mut r = self.err_row[self.row(k)].abs() + self.err_col[self.col(k)].abs();
        if self.on_d1(k) {
            r += self.err_d1.abs();
        }
        if self.on_d2(k) {
            r += self.err_d2.abs();
        }
        Some(r)
    }

    fn swap_cost(&mut self, sol: &mut [i32], current_cost: i64, k1: usize, k2: usize) -> i64 {
        let diff1 = i64::from(sol[k2]) - i64::from(sol[k1]);
        let diff2 = -diff1;
        let (r1, c1) = (self.row(k1), self.col(k1));
        let (r2, c2) = (self.row(k2), self.col(k2));
        let mut r = current_cost;

        if r1 != r2 {
            r += (self.err_row[r1] + diff1).abs() - self.err_row[r1].abs();
            r += (self.err_row[r2] + diff2).abs() - self.err_row[r2].abs();
        }
        if c1 != c2 {
            r += (self.err_col[c1] + diff1).abs() - self.err_col[c1].abs();
            r += (self.err_col[c2] + diff2).abs() - self.err_col[c2].abs();
        }

        // a swap within one diagonal leaves its sum unchanged
        match (self.on_d1(k1), self.on_d1(k2)) {
            (true, false) => r += (self.err_d1 + diff1).abs() - self.err_d1.abs(),
            (false, true) => r += (self.err_d1 + diff2).abs() - self.err_d1.abs(),
            _ => {}
        }
        match (self.on_d2(k1), self.on_d2(k2)) {
            (true, false) => r += (self.err_d2 + diff1).abs() - self.err_d2.abs(),
            (false, true) => r += (self.err_d2 + diff2).abs() - self.err_d2.abs(),
            _ => {}
        }

        r
    }

    fn executed_swap(&mut self, sol: &[i32], k1: usize, k2: usize) {
        // sol already holds the swapped values
        let diff1 = i64::from(sol[k1]) - i64::from(sol[k2]);
        let diff2 = -diff1;
        let (r1, c1) = (self.row(k1), self.col(k1));
        let (r2, c2) = (self.row(k2), self.col(k2));

        self.err_row[r1] += diff1;
        self.err_row[r2] += diff2;
        self.err_col[c1] += diff1;
        self.err_col[c2] += diff2;

        if self.on_d1(k1) {
            self.err_d1 += diff1;
        }
        if self.on_d1(k2) {
            self.err_d1 += diff2;
        }
        if self.on_d2(k1) {
            self.err_d2 += diff1;
        }
        if self.on_d2(k2) {
            self.err_d2 += diff2;
        }
    }

    fn display(&self, sol: &[i32]) -> String {
        crate::display::format_solution(sol, self.n)
    }

    fn check(&self, sol: &[i32]) -> bool {
        let n = self.n;
        let mut sum_d1 = 0i64;
        let mut sum_d2 = 0i64;
        for i in 0..n {
            sum_d1 += i64::from(sol[i * (n + 1)]);
            sum_d2 += i64::from(sol[(i + 1) * (n - 1)]);
            let mut sum_row = 0i64;
            let mut sum_col = 0i64;
            for j in 0..n {
                sum_row += i64::from(sol[i * n + j]);
                sum_col += i64::from(sol[j * n + i]);
            }
            if sum_row != self.magic || sum_col != self.magic {
                return false;
            }
        }
        sum_d1 == self.magic && sum_d2 == self.magic
    }
}
