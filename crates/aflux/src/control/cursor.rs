//! Positions in the logical result sequence and their page coordinates.

use aflux_keywords::Dir;

/// Where the record at a logical position lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlot {
    /// Signed page number; negative when the query is descending.
    pub page: i64,
    /// Position inside the page.
    pub offset: usize,
}

impl PageSlot {
    /// Locates position `i` (0-based) for pages of `k` records.
    pub fn locate(i: usize, k: usize, dir: Dir) -> Self {
        let k = k.max(1);
        PageSlot {
            page: (i / k + 1) as i64 * dir.page_sign(),
            offset: i % k,
        }
    }

    /// 1-based rank of the record within the whole result set.
    pub fn ordinal(&self, k: usize) -> usize {
        k.max(1) * (self.page.unsigned_abs() as usize - 1) + self.offset + 1
    }

    /// The page key holding this record: `"<ordinal> of <total>"`.
    pub fn key(&self, k: usize, total: usize) -> String {
        format!("{} of {}", self.ordinal(k), total)
    }
}

/// Iteration state of one query or one of its copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Next position to materialize.
    pub position: usize,
    /// Position restored by [`Cursor::rewind`].
    pub start: usize,
    /// Exclusive upper bound; the total when unset.
    pub stop: Option<usize>,
    pub step: usize,
    halted: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::bounded(0, None, 1)
    }
}

impl Cursor {
    /// A cursor over `[start, stop)` advancing by `step` (at least one).
    pub fn bounded(start: usize, stop: Option<usize>, step: usize) -> Self {
        Cursor {
            position: start,
            start,
            stop,
            step: step.max(1),
            halted: false,
        }
    }

    /// An unbounded cursor positioned at `position`.
    pub fn at(position: usize) -> Self {
        Cursor::bounded(position, None, 1)
    }

    /// Effective exclusive bound for a result set of `total` records.
    pub fn bound(&self, total: usize) -> usize {
        self.stop.map_or(total, |stop| stop.min(total))
    }

    /// Returns `true` when no position is left below the bound.
    pub fn is_exhausted(&self, total: usize) -> bool {
        self.halted || self.position >= self.bound(total)
    }

    /// Positions still to be visited.
    pub fn remaining(&self, total: usize) -> usize {
        if self.is_exhausted(total) {
            0
        } else {
            (self.bound(total) - self.position).div_ceil(self.step)
        }
    }

    pub fn advance(&mut self) {
        self.position = self.position.saturating_add(self.step);
    }

    /// Advances by whole steps until the position reaches `boundary`.
    pub fn skip_to(&mut self, boundary: usize) {
        if self.position < boundary {
            let steps = (boundary - self.position).div_ceil(self.step);
            self.position = self.position.saturating_add(steps.saturating_mul(self.step));
        }
    }

    /// Stops iteration until the next rewind.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    pub fn rewind(&mut self) {
        self.position = self.start;
        self.halted = false;
    }
}
