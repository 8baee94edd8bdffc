use crate::{Align, HostError};

/// The host virtualization view wrapped by [`crate::AnchoredList`].
///
/// Implementations own the real scroll container. The controller only ever issues the calls
/// below; everything else flows the other way as notifications.
pub trait HostView {
    /// Jumps (or animates, when `animated`) to an absolute offset.
    fn scroll_to_offset(&mut self, offset: u64, animated: bool) -> Result<(), HostError>;

    fn scroll_to_index(&mut self, index: usize, align: Align, animated: bool)
    -> Result<(), HostError>;

    /// Asks the host to re-render its rows (the mounted rows' visibility changed).
    fn request_render(&mut self);
}

impl<H: HostView + ?Sized> HostView for &mut H {
    fn scroll_to_offset(&mut self, offset: u64, animated: bool) -> Result<(), HostError> {
        (**self).scroll_to_offset(offset, animated)
    }

    fn scroll_to_index(
        &mut self,
        index: usize,
        align: Align,
        animated: bool,
    ) -> Result<(), HostError> {
        (**self).scroll_to_index(index, align, animated)
    }

    fn request_render(&mut self) {
        (**self).request_render();
    }
}

/// Scroll capability handed to external callers in place of the host view itself.
///
/// Obtained from [`crate::AnchoredList::scroller`]. It exposes only the sanctioned operations;
/// offsets requested through it are recorded so the controller's bookkeeping stays in sync.
pub struct Scroller<'a, H> {
    pub(crate) host: Option<&'a mut H>,
    pub(crate) count: usize,
    pub(crate) content_offset: &'a mut u64,
}

impl<H: HostView> Scroller<'_, H> {
    pub fn scroll_to_index(
        &mut self,
        index: usize,
        align: Align,
        animated: bool,
    ) -> Result<(), HostError> {
        if index >= self.count {
            return Err(HostError::IndexOutOfRange {
                index,
                count: self.count,
            });
        }
        let host = self.host.as_deref_mut().ok_or(HostError::Detached)?;
        host.scroll_to_index(index, align, animated)
    }

    pub fn scroll_to_offset(&mut self, offset: u64, animated: bool) -> Result<(), HostError> {
        let host = self.host.as_deref_mut().ok_or(HostError::Detached)?;
        host.scroll_to_offset(offset, animated)?;
        if !animated {
            *self.content_offset = offset;
        }
        Ok(())
    }
}
