use crate::{ContentSize, Rect};

/// Passive record of the host's viewport, updated from scroll/layout/content-size notifications.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    /// Current scroll position, vertical pixels from the top.
    pub content_offset: u64,
    pub frame_height: u32,
    /// Total scrollable content height; `None` until the host has reported one.
    pub content_height: Option<u64>,
    /// Height of the final row, once it has been laid out.
    pub last_item_height: Option<u32>,
}

impl ViewportState {
    pub fn apply_frame(&mut self, rect: Rect) {
        self.frame_height = rect.main;
    }

    pub fn apply_content_size(&mut self, size: ContentSize) {
        self.content_height = Some(size.main);
    }

    /// Bottom edge of the viewport in content coordinates.
    pub fn viewport_end(&self) -> u64 {
        self.content_offset.saturating_add(self.frame_height as u64)
    }

    /// Whether the viewport shows the end of the list, allowing `slack` pixels of tolerance.
    ///
    /// The boundary `viewport_end == content_height - slack` counts as resting at the bottom.
    /// Without a reported content height the viewport is never at the bottom.
    pub fn is_at_bottom(&self, slack: u32) -> bool {
        self.content_height
            .is_some_and(|h| self.viewport_end() >= h.saturating_sub(slack as u64))
    }
}
