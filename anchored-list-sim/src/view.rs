use anchored_list::{Align, ContentSize, HostError, HostView, Rect, ScrollEvent};

use crate::layout::FlowLayout;

/// A scroll call received by the simulated view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollCall {
    pub offset: u64,
    pub animated: bool,
}

/// The simulated host scroll container.
///
/// Programmatic jumps are recorded and take effect at the next commit, where the offset is
/// clamped against the freshly laid-out content. This models a host that applies a jump
/// atomically with the paint that follows it.
#[derive(Clone, Debug)]
pub struct SimView {
    frame: Rect,
    offset: u64,
    content: ContentSize,
    pub(crate) layout: FlowLayout,
    overscan: usize,
    pinned_head: usize,

    pending_scroll: Option<ScrollEvent>,
    frame_dirty: bool,
    content_dirty: bool,
    render_requested: bool,
    scroll_calls: Vec<ScrollCall>,
    reject_scrolls: bool,
}

impl SimView {
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            offset: 0,
            content: ContentSize {
                main: 0,
                cross: frame.cross,
            },
            layout: FlowLayout::default(),
            overscan: 1,
            pinned_head: 0,
            pending_scroll: None,
            frame_dirty: true,
            content_dirty: true,
            render_requested: true,
            scroll_calls: Vec::new(),
            reject_scrolls: false,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Keeps the first `pinned_head` rows mounted at all times.
    pub fn with_pinned_head(mut self, pinned_head: usize) -> Self {
        self.pinned_head = pinned_head;
        self
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn content_height(&self) -> u64 {
        self.content.main
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn pinned_head(&self) -> usize {
        self.pinned_head
    }

    pub fn scroll_calls(&self) -> &[ScrollCall] {
        &self.scroll_calls
    }

    pub fn render_requested(&self) -> bool {
        self.render_requested
    }

    /// Makes every programmatic scroll fail, as a host tearing down would.
    pub fn set_reject_scrolls(&mut self, reject: bool) {
        self.reject_scrolls = reject;
    }

    pub fn resize(&mut self, frame: Rect) {
        if self.frame != frame {
            self.frame = frame;
            self.frame_dirty = true;
            self.render_requested = true;
        }
    }

    /// A user-driven scroll: clamped immediately against the current content.
    pub(crate) fn user_scroll(&mut self, offset: u64) -> ScrollEvent {
        self.offset = offset.min(self.layout.max_offset(self.frame.main));
        self.render_requested = true;
        ScrollEvent {
            content_offset: self.offset,
        }
    }

    pub(crate) fn set_offset(&mut self, offset: u64) {
        if self.offset != offset {
            self.offset = offset;
            self.pending_scroll = Some(ScrollEvent {
                content_offset: offset,
            });
        }
    }

    /// Installs the layout of a commit and clamps the offset against it.
    pub(crate) fn install_layout(&mut self, layout: FlowLayout) {
        if layout.total() != self.content.main {
            self.content.main = layout.total();
            self.content_dirty = true;
        }
        self.layout = layout;
        let clamped = self.offset.min(self.layout.max_offset(self.frame.main));
        self.set_offset(clamped);
        self.render_requested = false;
    }

    pub(crate) fn take_scroll_event(&mut self) -> Option<ScrollEvent> {
        self.pending_scroll.take()
    }

    pub(crate) fn take_frame_change(&mut self) -> Option<Rect> {
        std::mem::take(&mut self.frame_dirty).then_some(self.frame)
    }

    pub(crate) fn take_content_change(&mut self) -> Option<ContentSize> {
        std::mem::take(&mut self.content_dirty).then_some(self.content)
    }

    fn index_offset(&self, index: usize, align: Align) -> Option<u64> {
        let start = self.layout.start(index)?;
        let end = self.layout.end(index)?;
        let view = self.frame.main as u64;
        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => {
                let center = start + (end - start) / 2;
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.offset;
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };
        Some(target.min(self.layout.max_offset(self.frame.main)))
    }
}

impl HostView for SimView {
    fn scroll_to_offset(&mut self, offset: u64, animated: bool) -> Result<(), HostError> {
        if self.reject_scrolls {
            return Err(HostError::rejected("simulated view rejects scrolling"));
        }
        self.scroll_calls.push(ScrollCall { offset, animated });
        self.set_offset(offset);
        self.render_requested = true;
        Ok(())
    }

    fn scroll_to_index(
        &mut self,
        index: usize,
        align: Align,
        animated: bool,
    ) -> Result<(), HostError> {
        let offset = self
            .index_offset(index, align)
            .ok_or(HostError::IndexOutOfRange {
                index,
                count: self.layout.len(),
            })?;
        self.scroll_to_offset(offset, animated)
    }

    fn request_render(&mut self) {
        self.render_requested = true;
    }
}
