use alloc::vec::Vec;
use core::mem;

use crate::batch::PrependBatch;
use crate::corrector::StagedCorrection;
use crate::detector::{DetectGate, detect_prepended};
use crate::host::Scroller;
use crate::interceptor;
use crate::{
    AnchorOptions, AppliedCorrection, ContentSize, CorrectionPolicy, HostView, Probe, Rect,
    RenderedRow, RowContext, RowKey, ScrollEvent, ViewportState,
};

/// Per-batch state: `Idle -> Accumulating -> Correcting -> Idle`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// Rows of the batch are mounted measure-only and reporting their heights.
    Accumulating(PrependBatch),
    /// Every row has been measured and the correction is waiting for its scheduling point.
    ///
    /// Rows prepended in the meantime collect in `queued`; they sit above the rows being
    /// revealed and become the active batch once the correction has run.
    Correcting {
        staged: StagedCorrection,
        queued: Option<PrependBatch>,
    },
}

impl Phase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Rows at the head of the sequence currently rendered measure-only.
    pub fn hidden_rows(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Accumulating(batch) => batch.len(),
            Self::Correcting { staged, queued } => {
                staged.reveals + queued.as_ref().map_or(0, PrependBatch::len)
            }
        }
    }

    pub fn staged(&self) -> Option<&StagedCorrection> {
        match self {
            Self::Correcting { staged, .. } => Some(staged),
            _ => None,
        }
    }

    fn take_due(
        &mut self,
        due: CorrectionPolicy,
    ) -> Option<(StagedCorrection, Option<PrependBatch>)> {
        match mem::take(self) {
            Self::Correcting { staged, queued } if staged.policy == due => Some((staged, queued)),
            other => {
                *self = other;
                None
            }
        }
    }
}

/// A drop-in wrapper around a host virtualization view that keeps the viewport anchored when
/// rows of unknown height are prepended.
///
/// The controller is driven entirely by host notifications:
/// - [`AnchoredList::set_rows`] when the data set changes (before the next render)
/// - [`AnchoredList::render_row`] for every row the host mounts
/// - [`AnchoredList::on_probe_layout`] when a probed row has been laid out
/// - [`AnchoredList::on_scroll`] / [`AnchoredList::on_layout`] /
///   [`AnchoredList::on_content_size_change`] for viewport bookkeeping
/// - [`AnchoredList::before_commit`] right before the host commits a render, and
///   [`AnchoredList::on_next_tick`] on the event-loop tick after a paint
///
/// Nothing blocks: a batch whose rows are never all measured (for example because the host
/// unmounted one first) simply never produces a correction.
#[derive(Debug)]
pub struct AnchoredList<T, H, K = RowKey> {
    options: AnchorOptions<T, K>,
    rows: Vec<T>,
    host: Option<H>,
    viewport: ViewportState,
    phase: Phase,
}

impl<T, H: HostView, K: PartialEq> AnchoredList<T, H, K> {
    /// Creates a controller with no host attached.
    pub fn new(options: AnchorOptions<T, K>) -> Self {
        Self {
            options,
            rows: Vec::new(),
            host: None,
            viewport: ViewportState::default(),
            phase: Phase::Idle,
        }
    }

    pub fn with_host(options: AnchorOptions<T, K>, host: H) -> Self {
        let mut list = Self::new(options);
        list.host = Some(host);
        list
    }

    /// Attaches a host, returning the previous one.
    pub fn attach(&mut self, host: H) -> Option<H> {
        self.host.replace(host)
    }

    pub fn detach(&mut self) -> Option<H> {
        self.host.take()
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn options(&self) -> &AnchorOptions<T, K> {
        &self.options
    }

    /// Replaces the options. Disabling drops any in-flight batch or staged correction.
    pub fn set_options(&mut self, options: AnchorOptions<T, K>) {
        let was_enabled = self.options.enabled;
        self.options = options;
        if was_enabled && !self.options.enabled {
            self.abandon();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut AnchorOptions<T, K>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn key_for(&self, index: usize) -> Option<K> {
        let item = self.rows.get(index)?;
        Some((self.options.get_row_key)(item, index))
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn staged_correction(&self) -> Option<&StagedCorrection> {
        self.phase.staged()
    }

    /// Rows at the head of the sequence currently rendered measure-only.
    pub fn hidden_rows(&self) -> usize {
        self.phase.hidden_rows()
    }

    /// Replaces the row sequence, detecting rows prepended since the previous one.
    ///
    /// Call this when the host receives new data, before it renders. Returns the number of rows
    /// treated as newly prepended.
    pub fn set_rows(&mut self, rows: Vec<T>) -> usize {
        if rows.len() < self.rows.len() && !self.phase.is_idle() {
            adebug!(
                prev = self.rows.len(),
                next = rows.len(),
                "rows removed while a prepend is pending; abandoning it"
            );
            self.abandon();
        }

        let added = if self.options.enabled {
            let gate = DetectGate {
                content_offset: self.viewport.content_offset,
                min_scroll_position_to_maintain: self.options.min_scroll_position_to_maintain,
                pending: !self.phase.is_idle(),
            };
            detect_prepended(
                &self.rows,
                &rows,
                gate,
                &*self.options.get_row_key,
                self.options.number_added_to_top.as_deref(),
            )
        } else {
            0
        };
        self.rows = rows;

        if added > 0 {
            adebug!(
                added,
                count = self.rows.len(),
                overridden = self.options.number_added_to_top.is_some(),
                "prepend detected"
            );
            self.begin_batch(added);
        }
        added
    }

    fn begin_batch(&mut self, added: usize) {
        match &mut self.phase {
            Phase::Idle => self.phase = Phase::Accumulating(PrependBatch::new(added)),
            Phase::Accumulating(batch) => {
                adebug!(added, in_flight = batch.len(), "merging prepend into batch");
                batch.prepend(added);
            }
            Phase::Correcting { queued, .. } => {
                adebug!(added, "queueing prepend behind staged correction");
                match queued {
                    Some(batch) => batch.prepend(added),
                    None => *queued = Some(PrependBatch::new(added)),
                }
            }
        }
    }

    fn abandon(&mut self) {
        match mem::take(&mut self.phase) {
            Phase::Idle => {}
            Phase::Accumulating(_batch) => {
                adebug!(hidden = _batch.len(), "abandoning pending prepend");
            }
            // The staged jump never reaches the host, so the recorded offset must not keep it.
            Phase::Correcting { staged, .. } => {
                adebug!(
                    offset = staged.offset,
                    "abandoning staged correction; restoring offset"
                );
                self.restore_offset(&staged);
            }
        }
    }

    /// The render contract for row `index`, or `None` when out of range.
    pub fn row_context(&self, index: usize) -> Option<RowContext> {
        if index >= self.rows.len() {
            return None;
        }
        if !self.options.enabled {
            return Some(RowContext::plain(index));
        }
        Some(interceptor::row_context(
            index,
            self.rows.len(),
            self.phase.hidden_rows(),
        ))
    }

    /// Renders row `index` through the caller's render function, wrapping the result with the
    /// visibility and probe the host must honor.
    pub fn render_row<R>(
        &self,
        index: usize,
        render: impl FnOnce(&T, RowContext) -> R,
    ) -> Option<RenderedRow<R>> {
        let item = self.rows.get(index)?;
        let ctx = self.row_context(index)?;
        Some(RenderedRow {
            index,
            visibility: ctx.visibility,
            probe: ctx.probe,
            content: render(item, ctx),
        })
    }

    /// Receives the laid-out height of a probed row.
    pub fn on_probe_layout(&mut self, probe: Probe, height: u32) {
        match probe {
            Probe::LastRow => self.viewport.last_item_height = Some(height),
            Probe::NewRow { index } => self.record_new_row(index, height),
        }
    }

    fn record_new_row(&mut self, index: usize, height: u32) {
        atrace!(index, height, "new row measured");
        let completed = match &mut self.phase {
            Phase::Accumulating(batch) => batch.record(index, height),
            Phase::Correcting {
                queued: Some(batch),
                ..
            } => {
                batch.record(index, height);
                false
            }
            _ => false,
        };
        if completed {
            self.complete_batch();
        }
    }

    fn complete_batch(&mut self) {
        let batch = match mem::take(&mut self.phase) {
            Phase::Accumulating(batch) if batch.is_complete() => batch,
            other => {
                self.phase = other;
                return;
            }
        };

        let slack = self
            .options
            .bottom_slack
            .resolve(self.viewport.last_item_height);
        let staged =
            StagedCorrection::for_batch(&self.viewport, batch.measured_height(), batch.len(), slack);
        adebug!(
            rows = batch.len(),
            measured_height = batch.measured_height(),
            offset = staged.offset,
            policy = ?staged.policy,
            "prepend batch measured"
        );

        self.viewport.content_offset = staged.offset;
        self.phase = Phase::Correcting {
            staged,
            queued: None,
        };
        if let Some(host) = self.host.as_mut() {
            host.request_render();
        }
    }

    /// Pre-commit hook: call immediately before the host commits a render.
    ///
    /// Runs a staged [`CorrectionPolicy::Deferred`] correction so the offset moves in the same
    /// frame the measured rows become visible.
    pub fn before_commit(&mut self) -> Option<AppliedCorrection> {
        self.run_due(CorrectionPolicy::Deferred)
    }

    /// Next-tick hook: call on the event-loop tick following a paint.
    ///
    /// Runs a staged [`CorrectionPolicy::BottomResting`] correction.
    pub fn on_next_tick(&mut self) -> Option<AppliedCorrection> {
        self.run_due(CorrectionPolicy::BottomResting)
    }

    fn run_due(&mut self, due: CorrectionPolicy) -> Option<AppliedCorrection> {
        let (staged, queued) = self.phase.take_due(due)?;
        self.phase = match queued {
            Some(batch) => Phase::Accumulating(batch),
            None => Phase::Idle,
        };

        let applied = self.apply(staged);
        if matches!(&self.phase, Phase::Accumulating(batch) if batch.is_complete()) {
            self.complete_batch();
        }
        applied
    }

    fn apply(&mut self, staged: StagedCorrection) -> Option<AppliedCorrection> {
        let Some(host) = self.host.as_mut() else {
            awarn!(offset = staged.offset, "no host attached; skipping correction");
            self.restore_offset(&staged);
            return None;
        };

        if let Err(_err) = host.scroll_to_offset(staged.offset, false) {
            awarn!(offset = staged.offset, error = %_err, "scroll correction failed");
            self.restore_offset(&staged);
            return None;
        }
        // A deferred correction runs inside the commit that reveals the rows.
        if staged.policy == CorrectionPolicy::BottomResting {
            host.request_render();
        }

        let applied = AppliedCorrection {
            offset: staged.offset,
            policy: staged.policy,
            revealed: staged.reveals,
        };
        adebug!(offset = applied.offset, policy = ?applied.policy, "correction applied");
        if let Some(cb) = &self.options.on_correction {
            cb(&applied);
        }
        Some(applied)
    }

    // The host never moved; unless a scroll arrived since staging, fall back to where it is.
    fn restore_offset(&mut self, staged: &StagedCorrection) {
        if self.viewport.content_offset == staged.offset {
            self.viewport.content_offset = staged.from;
        }
    }

    pub fn on_scroll(&mut self, event: ScrollEvent) {
        self.viewport.content_offset = event.content_offset;
        if let Some(cb) = &self.options.on_scroll {
            cb(&event);
        }
    }

    pub fn on_layout(&mut self, rect: Rect) {
        self.viewport.apply_frame(rect);
        if let Some(cb) = &self.options.on_layout {
            cb(&rect);
        }
    }

    pub fn on_content_size_change(&mut self, size: ContentSize) {
        self.viewport.apply_content_size(size);
        if let Some(cb) = &self.options.on_content_size_change {
            cb(&size);
        }
    }

    /// Scroll capability for external callers.
    pub fn scroller(&mut self) -> Scroller<'_, H> {
        Scroller {
            host: self.host.as_mut(),
            count: self.rows.len(),
            content_offset: &mut self.viewport.content_offset,
        }
    }
}
