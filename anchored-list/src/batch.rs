use alloc::vec;
use alloc::vec::Vec;

/// Accumulated measurements for rows inserted at the head of the sequence.
///
/// Rows are tracked by their position inside the batch, `0..len()`, which is also their row
/// index while the batch is pending. Summation is order-independent; a row that reports twice
/// replaces its earlier height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrependBatch {
    heights: Vec<Option<u32>>,
    measured_height: u64,
    remaining: usize,
}

impl PrependBatch {
    pub fn new(count: usize) -> Self {
        Self {
            heights: vec![None; count],
            measured_height: 0,
            remaining: count,
        }
    }

    /// Number of rows in the batch (its original count, independent of `remaining`).
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn measured_height(&self) -> u64 {
        self.measured_height
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Records the height of row `index`. Returns `true` when this report completed the batch.
    ///
    /// Reports for indexes outside the batch are ignored.
    pub fn record(&mut self, index: usize, height: u32) -> bool {
        let Some(slot) = self.heights.get_mut(index) else {
            return false;
        };
        match slot.replace(height) {
            Some(prev) => {
                self.measured_height = self.measured_height - prev as u64 + height as u64;
                false
            }
            None => {
                self.measured_height += height as u64;
                self.remaining -= 1;
                self.remaining == 0
            }
        }
    }

    /// Extends the batch with `count` rows inserted in front of it.
    ///
    /// Every existing row moves down by `count`, so earlier measurements shift with them.
    pub fn prepend(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.heights.splice(0..0, core::iter::repeat_n(None, count));
        self.remaining += count;
    }
}
