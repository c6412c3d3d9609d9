//! Short-term freeze bookkeeping for variable slots.
//!
//! A marked (frozen) slot is temporarily excluded from selection so the
//! search does not immediately undo its latest moves. Instead of decaying
//! marks every iteration, each slot stores the swap number at which it
//! unlocks and the test compares against the current swap counter: only
//! the baseline ever advances.

/// Per-slot freeze ledger, indexed by variable slot.
///
/// All methods panic if `i` is out of range; passing a bad index is a
/// caller bug, not a recoverable condition.
///
/// # Examples
///
/// ```
/// use adaptive_search::marks::MarkLedger;
///
/// let mut marks = MarkLedger::new(4);
/// marks.mark(2, 10, 3); // at swap 10, freeze slot 2 for 3 swaps
/// assert!(marks.is_marked(2, 10));
/// assert!(marks.is_marked(2, 12));
/// assert!(!marks.is_marked(2, 13));
/// ```
#[derive(Debug, Clone)]
pub struct MarkLedger {
    /// Swap number at which each slot becomes selectable again.
    until: Vec<u64>,
}

impl MarkLedger {
    /// Creates a ledger of `size` unmarked slots.
    pub fn new(size: usize) -> Self {
        Self {
            until: vec![0; size],
        }
    }

    /// Number of slots tracked.
    pub fn len(&self) -> usize {
        self.until.len()
    }

    /// True for a zero-size ledger.
    pub fn is_empty(&self) -> bool {
        self.until.is_empty()
    }

    /// Freezes slot `i` for `duration` swaps counted from `swap_no`.
    pub fn mark(&mut self, i: usize, swap_no: u64, duration: u64) {
        self.until[i] = swap_no + duration;
    }

    /// Clears the mark on slot `i` immediately.
    pub fn unmark(&mut self, i: usize) {
        self.until[i] = 0;
    }

    /// Tests whether slot `i` is frozen at swap number `swap_no`.
    pub fn is_marked(&self, i: usize, swap_no: u64) -> bool {
        self.until[i] > swap_no
    }

    /// Clears every mark.
    pub fn clear(&mut self) {
        self.until.fill(0);
    }
}
