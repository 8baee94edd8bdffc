//! A headless simulated virtualization host for [`anchored_list`].
//!
//! [`SimList`] plays the part of a real list view: it mounts only the rows near the viewport,
//! lays them out from their measured heights, keeps measure-only rows out of paint and flow, and
//! fires the scroll/layout/content-size/probe notifications and the pre-commit / next-tick hooks
//! in the order a UI runtime would. Use it to exercise anchoring end to end without a UI toolkit.
#![forbid(unsafe_code)]

mod layout;
mod list;
mod view;

#[cfg(test)]
mod tests;

pub use layout::FlowLayout;
pub use list::{FrameReport, MeasureFn, PaintedRow, SimList};
pub use view::{ScrollCall, SimView};
