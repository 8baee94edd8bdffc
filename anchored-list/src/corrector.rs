use crate::{CorrectionPolicy, ViewportState};

/// A scroll correction waiting for its scheduling point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StagedCorrection {
    /// Absolute target offset.
    pub offset: u64,
    /// Offset the batch completed at.
    pub from: u64,
    pub policy: CorrectionPolicy,
    /// Measure-only rows that become visible once the correction runs.
    pub reveals: usize,
}

impl StagedCorrection {
    /// Builds the correction for a completed batch.
    ///
    /// `viewport` is the state at the moment of completion; the policy is decided against the
    /// offset from before the correction.
    pub fn for_batch(
        viewport: &ViewportState,
        measured_height: u64,
        reveals: usize,
        slack: u32,
    ) -> Self {
        Self {
            offset: viewport.content_offset.saturating_add(measured_height),
            from: viewport.content_offset,
            policy: choose_policy(viewport, slack),
            reveals,
        }
    }
}

/// Picks how a correction is scheduled.
///
/// The bottom check reads `viewport` as it is before the jump. A viewport that sits within the
/// batch height of the end, but not within `slack` of it, is not resting at the bottom.
pub fn choose_policy(viewport: &ViewportState, slack: u32) -> CorrectionPolicy {
    if viewport.is_at_bottom(slack) {
        CorrectionPolicy::BottomResting
    } else {
        CorrectionPolicy::Deferred
    }
}
