//! Prepend detection: how many rows at the head of a new sequence were inserted rather than
//! shifted forward.

/// Inputs that gate whether a prepend needs anchoring at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetectGate {
    pub content_offset: u64,
    pub min_scroll_position_to_maintain: u64,
    /// A batch is already in flight. Its rows are anchored regardless of the threshold, so
    /// rows inserted above them must be found too.
    pub pending: bool,
}

impl DetectGate {
    /// Returns the length growth when anchoring applies, `None` otherwise.
    ///
    /// Nothing is preserved when the list shrank or kept its length, when the previous sequence
    /// was empty, or when the viewport has not scrolled past the threshold.
    pub fn growth(&self, old_len: usize, new_len: usize) -> Option<usize> {
        if new_len <= old_len || old_len == 0 {
            return None;
        }
        if !self.pending && self.content_offset <= self.min_scroll_position_to_maintain {
            return None;
        }
        Some(new_len - old_len)
    }
}

/// Counts rows inserted at the head of `new` by comparing keys against `old`.
///
/// Scans the first `len(new) - len(old)` rows of `new`. Each key mismatch counts as an inserted
/// row; the first match means the sequences have re-aligned and stops the scan. Both sides are
/// keyed with the scan index `i`, so `get_key` must not depend on the index for rows that moved.
pub fn count_prepended<T, K: PartialEq>(
    old: &[T],
    new: &[T],
    mut get_key: impl FnMut(&T, usize) -> K,
) -> usize {
    if old.is_empty() || new.len() <= old.len() {
        return 0;
    }
    let diff = new.len() - old.len();
    let mut found = 0usize;
    for i in 0..diff {
        let prev = &old[i - found];
        if get_key(prev, i) != get_key(&new[i], i) {
            found += 1;
        } else {
            break;
        }
    }
    found
}

/// Full detection: gate, then either the caller's override or the key scan.
///
/// An override result larger than the length growth is clamped to it.
pub fn detect_prepended<T, K: PartialEq>(
    old: &[T],
    new: &[T],
    gate: DetectGate,
    get_key: impl FnMut(&T, usize) -> K,
    number_added_to_top: Option<&(dyn Fn(&[T], &[T]) -> usize + Send + Sync)>,
) -> usize {
    let Some(growth) = gate.growth(old.len(), new.len()) else {
        return 0;
    };
    match number_added_to_top {
        Some(f) => {
            let n = f(old, new);
            if n > growth {
                awarn!(
                    reported = n,
                    growth,
                    "number_added_to_top exceeds length growth; clamping"
                );
            }
            n.min(growth)
        }
        None => count_prepended(old, new, get_key),
    }
}
