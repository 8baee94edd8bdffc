use alloc::borrow::Cow;

/// Errors reported by a [`crate::HostView`] or by the scroll passthrough.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("no host view is attached")]
    Detached,

    #[error("row index {index} is out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("host rejected the scroll request: {reason}")]
    Rejected { reason: Cow<'static, str> },
}

impl HostError {
    pub fn rejected(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}
