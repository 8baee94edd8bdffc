//! Scroll anchoring for virtualized lists that grow at the head.
//!
//! When rows are prepended to a list the user has scrolled into, the content they are reading
//! must not jump, even though the new rows' heights are unknown until laid out and even though the
//! host only mounts rows near the viewport. [`AnchoredList`] wraps a host view and:
//!
//! - detects how many rows were inserted at the head of each new row sequence
//! - renders those rows measure-only (laid out, not painted, out of flow) and collects their heights
//! - once every new row is measured, jumps the scroll offset by their total height, either right
//!   before the commit that reveals them or, when the viewport rests at the bottom, on the next tick
//!
//! It is UI-agnostic. A host adapter is expected to provide:
//! - an implementation of [`HostView`] (imperative scroll calls)
//! - scroll, layout, content-size and per-row probe notifications
//! - calls to [`AnchoredList::before_commit`] / [`AnchoredList::on_next_tick`] at the matching
//!   points of its frame loop
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod batch;
mod controller;
mod corrector;
mod detector;
mod error;
mod host;
mod interceptor;
mod options;
mod state;
mod types;


pub use batch::PrependBatch;
pub use controller::{AnchoredList, Phase};
pub use corrector::{StagedCorrection, choose_policy};
pub use detector::{DetectGate, count_prepended, detect_prepended};
pub use error::HostError;
pub use host::{HostView, Scroller};
pub use interceptor::row_context;
pub use options::{
    AnchorOptions, BottomSlack, GetRowKeyCallback, NumberAddedToTopCallback,
    OnContentSizeChangeCallback, OnCorrectionCallback, OnLayoutCallback, OnScrollCallback,
};
pub use state::ViewportState;
pub use types::{
    Align, AppliedCorrection, ContentSize, CorrectionPolicy, Probe, Rect, RenderedRow, RowContext,
    ScrollEvent, Visibility,
};

pub type RowKey = u64;
