use alloc::sync::Arc;

use crate::{AppliedCorrection, ContentSize, Rect, ScrollEvent};

/// Key-extraction function: `get_row_key(item, index)` returns the item's stable identity.
pub type GetRowKeyCallback<T, K> = Arc<dyn Fn(&T, usize) -> K + Send + Sync>;

/// Authoritative inserted-count for callers whose sequences cannot be diffed by key.
///
/// Receives `(previous, next)` and returns how many rows were inserted at the head of `next`.
pub type NumberAddedToTopCallback<T> = Arc<dyn Fn(&[T], &[T]) -> usize + Send + Sync>;

pub type OnScrollCallback = Arc<dyn Fn(&ScrollEvent) + Send + Sync>;
pub type OnLayoutCallback = Arc<dyn Fn(&Rect) + Send + Sync>;
pub type OnContentSizeChangeCallback = Arc<dyn Fn(&ContentSize) + Send + Sync>;
pub type OnCorrectionCallback = Arc<dyn Fn(&AppliedCorrection) + Send + Sync>;

/// Tolerance used to decide whether the viewport already shows the end of the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BottomSlack {
    /// A fixed pixel margin.
    Fixed(u32),
    /// Half of the last row's measured height. Uses `fallback` until the last row is measured.
    HalfLastRow { fallback: u32 },
}

impl BottomSlack {
    pub const DEFAULT_PX: u32 = 5;

    pub fn resolve(self, last_item_height: Option<u32>) -> u32 {
        match self {
            Self::Fixed(px) => px,
            Self::HalfLastRow { fallback } => last_item_height.map_or(fallback, |h| h / 2),
        }
    }
}

impl Default for BottomSlack {
    fn default() -> Self {
        Self::Fixed(Self::DEFAULT_PX)
    }
}

/// Configuration for [`crate::AnchoredList`].
///
/// Closures are stored in `Arc`s so options stay cheap to clone and can be swapped with
/// `AnchoredList::set_options` without reallocating.
pub struct AnchorOptions<T, K> {
    pub get_row_key: GetRowKeyCallback<T, K>,

    /// Scroll offset (pixels) at or below which no correction is attempted.
    pub min_scroll_position_to_maintain: u64,

    /// Replaces key-based prepend detection when set.
    pub number_added_to_top: Option<NumberAddedToTopCallback<T>>,

    pub bottom_slack: BottomSlack,

    /// When disabled, no prepend is detected and every row renders plainly.
    pub enabled: bool,

    pub on_scroll: Option<OnScrollCallback>,
    pub on_layout: Option<OnLayoutCallback>,
    pub on_content_size_change: Option<OnContentSizeChangeCallback>,

    /// Fired after a correction has been handed to the host.
    pub on_correction: Option<OnCorrectionCallback>,
}

impl<T, K> Clone for AnchorOptions<T, K> {
    fn clone(&self) -> Self {
        Self {
            get_row_key: Arc::clone(&self.get_row_key),
            min_scroll_position_to_maintain: self.min_scroll_position_to_maintain,
            number_added_to_top: self.number_added_to_top.clone(),
            bottom_slack: self.bottom_slack,
            enabled: self.enabled,
            on_scroll: self.on_scroll.clone(),
            on_layout: self.on_layout.clone(),
            on_content_size_change: self.on_content_size_change.clone(),
            on_correction: self.on_correction.clone(),
        }
    }
}

impl<T, K> AnchorOptions<T, K> {
    pub fn new(get_row_key: impl Fn(&T, usize) -> K + Send + Sync + 'static) -> Self {
        Self {
            get_row_key: Arc::new(get_row_key),
            min_scroll_position_to_maintain: 0,
            number_added_to_top: None,
            bottom_slack: BottomSlack::default(),
            enabled: true,
            on_scroll: None,
            on_layout: None,
            on_content_size_change: None,
            on_correction: None,
        }
    }

    pub fn with_min_scroll_position_to_maintain(mut self, px: u64) -> Self {
        self.min_scroll_position_to_maintain = px;
        self
    }

    pub fn with_number_added_to_top(
        mut self,
        f: Option<impl Fn(&[T], &[T]) -> usize + Send + Sync + 'static>,
    ) -> Self {
        self.number_added_to_top = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_bottom_slack(mut self, bottom_slack: BottomSlack) -> Self {
        self.bottom_slack = bottom_slack;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_on_scroll(mut self, f: Option<impl Fn(&ScrollEvent) + Send + Sync + 'static>) -> Self {
        self.on_scroll = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_layout(mut self, f: Option<impl Fn(&Rect) + Send + Sync + 'static>) -> Self {
        self.on_layout = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_content_size_change(
        mut self,
        f: Option<impl Fn(&ContentSize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_content_size_change = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_correction(
        mut self,
        f: Option<impl Fn(&AppliedCorrection) + Send + Sync + 'static>,
    ) -> Self {
        self.on_correction = f.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T, K> core::fmt::Debug for AnchorOptions<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnchorOptions")
            .field(
                "min_scroll_position_to_maintain",
                &self.min_scroll_position_to_maintain,
            )
            .field(
                "number_added_to_top",
                &self.number_added_to_top.as_ref().map(|_| ".."),
            )
            .field("bottom_slack", &self.bottom_slack)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
