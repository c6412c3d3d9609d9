//! Permutation construction, validation and repair.
//!
//! Solutions handled by the solver are permutations of a configured value
//! set: either a contiguous range `base..base+size` or an arbitrary
//! multiset of values (duplicates allowed, e.g. for number partitioning
//! instances). This module builds random permutations, checks candidate
//! vectors against the value set, and repairs invalid vectors with the
//! smallest possible random perturbation (only the offending positions are
//! reassigned).

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

/// The set of values a solution vector is a permutation of.
///
/// # Examples
///
/// ```
/// use adaptive_search::permut::ValueSet;
///
/// // values 1..=9, e.g. a 3x3 magic square
/// let range = ValueSet::Range { base: 1 };
/// assert_eq!(range.materialize(9), (1..=9).collect::<Vec<_>>());
///
/// // an explicit multiset with repeated values
/// let multi = ValueSet::Multiset(vec![-2, 0, 0, 5]);
/// assert_eq!(multi.materialize(4), vec![-2, 0, 0, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueSet {
    /// The contiguous range `base .. base + size`.
    Range {
        /// Value held by the smallest slot.
        base: i32,
    },
    /// An explicit multiset of values; its length must equal the problem
    /// size.
    Multiset(Vec<i32>),
}

impl Default for ValueSet {
    fn default() -> Self {
        ValueSet::Range { base: 0 }
    }
}

impl ValueSet {
    /// Expands the value set for a problem of `size` variables.
    ///
    /// For [`ValueSet::Multiset`] the stored values are returned as-is;
    /// the caller is responsible for checking the length against the
    /// problem size (the solver does this before a run).
    pub fn materialize(&self, size: usize) -> Vec<i32> {
        match self {
            ValueSet::Range { base } => (0..size as i32).map(|v| base + v).collect(),
            ValueSet::Multiset(values) => values.clone(),
        }
    }

    fn value_counts(&self, size: usize) -> HashMap<i32, usize> {
        let mut counts = HashMap::new();
        for v in self.materialize(size) {
            *counts.entry(v).or_insert(0) += 1;
        }
        counts
    }
}

/// A position in a candidate vector holding a value that does not belong
/// to the configured value set (or exceeds its multiplicity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermutError {
    /// Index of the offending slot.
    pub index: usize,
    /// The value found there.
    pub value: i32,
}

impl std::fmt::Display for PermutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "slot {} holds value {} which is not available in the value set",
            self.index, self.value
        )
    }
}

impl std::error::Error for PermutError {}

/// Generates a uniformly random permutation of the value set.
///
/// Fisher-Yates shuffle of the materialized values.
pub fn random_permutation<R: Rng>(size: usize, values: &ValueSet, rng: &mut R) -> Vec<i32> {
    let mut sol = values.materialize(size);
    sol.shuffle(rng);
    sol
}

/// Checks that `sol` is a permutation of the value set.
///
/// Values are consumed left to right, so for a multiset with repeated
/// values the reported index is the first position whose value has run out
/// of remaining occurrences.
pub fn check_permutation(sol: &[i32], values: &ValueSet) -> Result<(), PermutError> {
    let mut remaining = values.value_counts(sol.len());
    for (index, &value) in sol.iter().enumerate() {
        match remaining.get_mut(&value) {
            Some(n) if *n > 0 => *n -= 1,
            _ => return Err(PermutError { index, value }),
        }
    }
    Ok(())
}

/// Repairs `sol` into a valid permutation of the value set.
///
/// Positions holding a valid value (first come, first served for repeated
/// values) are left untouched; every other position receives one of the
/// missing values, assigned in random order.
pub fn repair_permutation<R: Rng>(sol: &mut [i32], values: &ValueSet, rng: &mut R) {
    let mut remaining = values.value_counts(sol.len());
    let mut bad = Vec::new();

    for (index, &value) in sol.iter().enumerate() {
        match remaining.get_mut(&value) {
            Some(n) if *n > 0 => *n -= 1,
            _ => bad.push(index),
        }
    }

    let mut missing: Vec<i32> = Vec::with_capacity(bad.len());
    for (value, n) in remaining {
        for _ in 0..n {
            missing.push(value);
        }
    }
    missing.shuffle(rng);

    for (&index, value) in bad.iter().zip(missing) {
        sol[index] = value;
    }
}
