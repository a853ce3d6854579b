use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Coalescing redraw request shared between a widget and its host.
///
/// Setters call [`request`](Self::request) instead of painting. The host's
/// waker runs only on the clean → dirty edge, so a burst of requests between
/// two frames wakes the host once; [`take`](Self::take) clears the flag when
/// the frame is produced.
#[derive(Clone, Default)]
pub struct RedrawHandle {
    inner: Rc<RedrawInner>,
}

#[derive(Default)]
struct RedrawInner {
    dirty: Cell<bool>,
    waker: RefCell<Option<Rc<dyn Fn()>>>,
}

impl RedrawHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_waker(&self, waker: impl Fn() + 'static) {
        *self.inner.waker.borrow_mut() = Some(Rc::new(waker));
    }

    pub fn request(&self) {
        if self.inner.dirty.replace(true) {
            return;
        }
        let waker = self.inner.waker.borrow().clone();
        if let Some(w) = waker {
            w();
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.get()
    }

    /// Returns whether a redraw was pending and clears it.
    pub fn take(&self) -> bool {
        self.inner.dirty.replace(false)
    }
}

impl std::fmt::Debug for RedrawHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedrawHandle")
            .field("dirty", &self.inner.dirty.get())
            .field("waker", &self.inner.waker.borrow().as_ref().map(|_| "..."))
            .finish()
    }
}
