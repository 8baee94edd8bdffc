use std::ops::Range;

/// Row positions for one commit.
///
/// Rows out of flow (measure-only) have zero flow height: they sit at the start of the next
/// in-flow row and push nothing down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlowLayout {
    starts: Vec<u64>,
    ends: Vec<u64>,
    total: u64,
}

impl FlowLayout {
    pub fn new(flow_heights: impl IntoIterator<Item = u32>) -> Self {
        let iter = flow_heights.into_iter();
        let (lower, _) = iter.size_hint();
        let mut starts = Vec::with_capacity(lower);
        let mut ends = Vec::with_capacity(lower);
        let mut off = 0u64;
        for h in iter {
            starts.push(off);
            off = off.saturating_add(h as u64);
            ends.push(off);
        }
        Self {
            starts,
            ends,
            total: off,
        }
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn start(&self, index: usize) -> Option<u64> {
        self.starts.get(index).copied()
    }

    pub fn end(&self, index: usize) -> Option<u64> {
        self.ends.get(index).copied()
    }

    pub fn max_offset(&self, viewport: u32) -> u64 {
        self.total.saturating_sub(viewport as u64)
    }

    /// Rows intersecting `[offset, offset + viewport)`. Zero-height rows count when their start
    /// lies strictly inside the window.
    pub fn visible_range(&self, offset: u64, viewport: u32) -> Range<usize> {
        if self.is_empty() || viewport == 0 {
            return 0..0;
        }
        let view_end = offset.saturating_add(viewport as u64);
        let start = self.ends.partition_point(|&e| e <= offset);
        let end = self.starts.partition_point(|&s| s < view_end);
        start..end.max(start)
    }

    /// Rows to mount: the visible range widened by `overscan` on both sides, plus the first
    /// `pinned_head` rows, which are never unmounted. Sorted ascending, no duplicates.
    pub fn mount_window(
        &self,
        offset: u64,
        viewport: u32,
        overscan: usize,
        pinned_head: usize,
    ) -> Vec<usize> {
        let count = self.len();
        let visible = self.visible_range(offset, viewport);
        let start = visible.start.saturating_sub(overscan);
        let end = visible.end.saturating_add(overscan).min(count);
        let pinned = pinned_head.min(count);

        let mut out: Vec<usize> = (0..pinned).collect();
        out.extend((start..end).filter(|&i| i >= pinned));
        out
    }
}
