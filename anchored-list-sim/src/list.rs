use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use anchored_list::{
    AnchorOptions, AnchoredList, AppliedCorrection, HostView, Probe, RowKey, Scroller,
};

use crate::layout::FlowLayout;
use crate::view::SimView;

/// Measures a row's laid-out height. Stands in for the caller's render function.
pub type MeasureFn<T> = Arc<dyn Fn(&T) -> u32 + Send + Sync>;

/// A row painted in a frame, in viewport coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaintedRow<K> {
    pub index: usize,
    pub key: K,
    /// Distance from the viewport's top edge; negative when partially scrolled past.
    pub top: i64,
    pub height: u32,
}

/// What happened during one simulated frame.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameReport<K> {
    pub frame: u64,
    /// Correction applied by the pre-commit hook.
    pub pre_commit: Option<AppliedCorrection>,
    /// Correction applied by the next-tick hook.
    pub next_tick: Option<AppliedCorrection>,
    pub offset: u64,
    pub content_height: u64,
    pub mounted: Vec<usize>,
    /// Mounted rows laid out for measurement only.
    pub measuring: Vec<usize>,
    pub painted: Vec<PaintedRow<K>>,
}

impl<K> FrameReport<K> {
    /// The painted row under the viewport's top edge.
    pub fn anchor(&self) -> Option<&PaintedRow<K>> {
        self.painted.first()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProbeState {
    Last(u32),
    New(u32),
}

struct ProbedRow<K> {
    key: K,
    probe: Probe,
    height: u32,
}

/// A simulated virtualized list driving an [`AnchoredList`] through a full frame loop.
///
/// Each [`SimList::frame`]:
/// 1. runs the pre-commit hook
/// 2. lays out every row (measure-only rows out of flow), clamps the offset, mounts the window
///    and paints the in-flow rows intersecting the viewport
/// 3. delivers scroll, layout, content-size and probe notifications
/// 4. runs the next-tick hook
///
/// A probed row reports its height when it is mounted or its probe or height changes, the way
/// a host fires layout callbacks.
pub struct SimList<T, K = RowKey> {
    list: AnchoredList<T, SimView, K>,
    measure: MeasureFn<T>,
    probed: HashMap<K, ProbeState>,
    frames: u64,
}

impl<T, K: Clone + Hash + Eq> SimList<T, K> {
    pub fn new(
        options: AnchorOptions<T, K>,
        view: SimView,
        measure: impl Fn(&T) -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            list: AnchoredList::with_host(options, view),
            measure: Arc::new(measure),
            probed: HashMap::new(),
            frames: 0,
        }
    }

    pub fn list(&self) -> &AnchoredList<T, SimView, K> {
        &self.list
    }

    pub fn view(&self) -> Option<&SimView> {
        self.list.host()
    }

    pub fn view_mut(&mut self) -> Option<&mut SimView> {
        self.list.host_mut()
    }

    pub fn scroller(&mut self) -> Scroller<'_, SimView> {
        self.list.scroller()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// New data from the list's owner.
    pub fn set_rows(&mut self, rows: Vec<T>) -> usize {
        let added = self.list.set_rows(rows);
        if let Some(view) = self.list.host_mut() {
            view.request_render();
        }
        added
    }

    /// A user-driven scroll to `offset`, delivered to the controller immediately.
    ///
    /// Clamped against the last committed layout, so run a frame after setting rows first.
    pub fn scroll_to(&mut self, offset: u64) {
        let Some(view) = self.list.host_mut() else {
            return;
        };
        let event = view.user_scroll(offset);
        self.list.on_scroll(event);
    }

    pub fn needs_frame(&self) -> bool {
        self.view().is_some_and(SimView::render_requested)
            || self.list.staged_correction().is_some()
    }

    /// Runs frames until nothing is pending, at most `max_frames`.
    pub fn run_until_idle(&mut self, max_frames: usize) -> Vec<FrameReport<K>> {
        let mut out = Vec::new();
        while out.len() < max_frames && self.needs_frame() {
            out.push(self.frame());
        }
        out
    }

    pub fn frame(&mut self) -> FrameReport<K> {
        self.frames += 1;
        let pre_commit = self.list.before_commit();
        let (mut report, probed) = self.commit();
        report.pre_commit = pre_commit;
        self.deliver_notifications(probed);
        report.next_tick = self.list.on_next_tick();
        report
    }

    fn commit(&mut self) -> (FrameReport<K>, Vec<ProbedRow<K>>) {
        let measure = Arc::clone(&self.measure);
        let flow: Vec<u32> = self
            .list
            .rows()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let in_flow = self
                    .list
                    .row_context(i)
                    .is_some_and(|ctx| ctx.visibility.is_painted());
                if in_flow { measure(item) } else { 0 }
            })
            .collect();

        let mut report = FrameReport {
            frame: self.frames,
            pre_commit: None,
            next_tick: None,
            offset: 0,
            content_height: 0,
            mounted: Vec::new(),
            measuring: Vec::new(),
            painted: Vec::new(),
        };

        let mut probed = Vec::new();
        let Some(view) = self.list.host_mut() else {
            return (report, probed);
        };
        view.install_layout(FlowLayout::new(flow));
        let offset = view.offset();
        let frame = view.frame();
        let viewport = frame.main as u64;
        let mounted =
            view.layout
                .mount_window(offset, frame.main, view.overscan(), view.pinned_head());
        let starts: Vec<u64> = mounted
            .iter()
            .map(|&i| view.layout.start(i).unwrap_or_default())
            .collect();
        report.offset = offset;
        report.content_height = view.content_height();

        for (&index, &start) in mounted.iter().zip(&starts) {
            let Some(row) = self.list.render_row(index, |item, _| measure(item)) else {
                continue;
            };
            if let (Some(probe), Some(key)) = (row.probe, self.list.key_for(index)) {
                probed.push(ProbedRow {
                    key,
                    probe,
                    height: row.content,
                });
            }
            if !row.in_flow() {
                report.measuring.push(index);
                continue;
            }
            let end = start.saturating_add(row.content as u64);
            if end <= offset || start >= offset.saturating_add(viewport) {
                continue;
            }
            let Some(key) = self.list.key_for(index) else {
                continue;
            };
            report.painted.push(PaintedRow {
                index,
                key,
                top: start as i64 - offset as i64,
                height: row.content,
            });
        }
        report.mounted = mounted;
        (report, probed)
    }

    fn deliver_notifications(&mut self, probed: Vec<ProbedRow<K>>) {
        let (scroll, frame, content) = match self.list.host_mut() {
            Some(view) => (
                view.take_scroll_event(),
                view.take_frame_change(),
                view.take_content_change(),
            ),
            None => (None, None, None),
        };
        if let Some(event) = scroll {
            self.list.on_scroll(event);
        }
        if let Some(rect) = frame {
            self.list.on_layout(rect);
        }
        if let Some(size) = content {
            self.list.on_content_size_change(size);
        }

        // Reporting a probe may advance the controller's phase; the set was fixed at render time.
        let mut next = HashMap::with_capacity(probed.len());
        for ProbedRow { key, probe, height } in probed {
            let state = match probe {
                Probe::LastRow => ProbeState::Last(height),
                Probe::NewRow { .. } => ProbeState::New(height),
            };
            if self.probed.get(&key) != Some(&state) {
                self.list.on_probe_layout(probe, height);
            }
            next.insert(key, state);
        }
        self.probed = next;
    }
}
