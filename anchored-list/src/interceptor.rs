use crate::{Probe, RowContext, Visibility};

/// Decides how row `index` of a `count`-row sequence is rendered.
///
/// - The final row (when more than one row exists) carries a [`Probe::LastRow`] so the host
///   reports its height.
/// - Rows below `hidden` are measure-only and carry a [`Probe::NewRow`].
/// - Everything else renders unmodified.
pub fn row_context(index: usize, count: usize, hidden: usize) -> RowContext {
    if count > 1 && index + 1 == count {
        return RowContext {
            index,
            visibility: Visibility::Visible,
            probe: Some(Probe::LastRow),
        };
    }
    if index < hidden {
        return RowContext {
            index,
            visibility: Visibility::MeasureOnly,
            probe: Some(Probe::NewRow { index }),
        };
    }
    RowContext::plain(index)
}
