#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// Viewport geometry reported by the host's layout notification.
///
/// `main` is the scroll axis (the frame height for vertical lists), `cross` the other axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub main: u32,
    pub cross: u32,
}

/// Scrollable content extent reported by the host's content-size notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentSize {
    pub main: u64,
    pub cross: u32,
}

/// A scroll notification from the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollEvent {
    /// Vertical pixels from the top of the content.
    pub content_offset: u64,
}

/// How a row participates in paint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    /// Painted and laid out in flow.
    #[default]
    Visible,
    /// Laid out and measured, but not painted and detached from flow: siblings are positioned
    /// as if the row did not exist.
    MeasureOnly,
}

impl Visibility {
    pub fn is_painted(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// A measurement probe attached to a rendered row.
///
/// The host reports the row's laid-out height back through
/// [`crate::AnchoredList::on_probe_layout`] once the row has been laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Probe {
    /// The final row of the sequence; its height feeds bottom-edge detection.
    LastRow,
    /// A row of the pending prepend batch.
    NewRow { index: usize },
}

/// Per-row render contract passed to the caller's render function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowContext {
    pub index: usize,
    pub visibility: Visibility,
    pub probe: Option<Probe>,
}

impl RowContext {
    pub fn plain(index: usize) -> Self {
        Self {
            index,
            visibility: Visibility::Visible,
            probe: None,
        }
    }
}

/// The output of [`crate::AnchoredList::render_row`]: the caller's rendered content plus the
/// instructions the host needs to lay it out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedRow<R> {
    pub index: usize,
    pub visibility: Visibility,
    pub probe: Option<Probe>,
    pub content: R,
}

impl<R> RenderedRow<R> {
    /// Whether the row occupies space in the list's flow.
    pub fn in_flow(&self) -> bool {
        self.visibility.is_painted()
    }

    pub fn map<U>(self, f: impl FnOnce(R) -> U) -> RenderedRow<U> {
        RenderedRow {
            index: self.index,
            visibility: self.visibility,
            probe: self.probe,
            content: f(self.content),
        }
    }
}

/// Which scheduling path a correction took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CorrectionPolicy {
    /// The viewport was resting at the end of the list; the jump runs on the next tick after the
    /// current paint.
    BottomResting,
    /// The jump runs immediately before the next render commit.
    Deferred,
}

/// A correction that has been handed to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedCorrection {
    pub offset: u64,
    pub policy: CorrectionPolicy,
    /// Number of measure-only rows revealed by this correction.
    pub revealed: usize,
}
