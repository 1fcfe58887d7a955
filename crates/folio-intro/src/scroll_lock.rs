#![forbid(unsafe_code)]

//! Scoped suppression of page scrolling.
//!
//! [`ScrollLock`] disables scrolling on acquisition and re-enables it when
//! released or dropped, whichever comes first. Holding it in an `Option` and
//! taking it out at the `Complete` stage gives the intro its "locked until
//! complete" behaviour, and dropping the owner restores scrolling on every
//! exit path.

use std::fmt;
use std::rc::Rc;

/// The host surface whose scrolling can be switched off (the document body).
pub trait ScrollControl {
    /// Enable or disable user scrolling.
    fn set_scroll_enabled(&self, enabled: bool);
}

/// RAII guard keeping scrolling disabled while held.
pub struct ScrollLock {
    surface: Rc<dyn ScrollControl>,
    held: bool,
}

impl fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLock")
            .field("held", &self.held)
            .finish()
    }
}

impl ScrollLock {
    /// Disable scrolling on `surface` until the guard is released.
    #[must_use]
    pub fn acquire(surface: Rc<dyn ScrollControl>) -> Self {
        surface.set_scroll_enabled(false);
        tracing::debug!("page scroll locked");
        Self {
            surface,
            held: true,
        }
    }

    /// Re-enable scrolling. Idempotent.
    pub fn release(&mut self) {
        if self.held {
            self.held = false;
            self.surface.set_scroll_enabled(true);
            tracing::debug!("page scroll unlocked");
        }
    }

    /// Whether scrolling is still suppressed by this guard.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Body {
        calls: RefCell<Vec<bool>>,
    }

    impl ScrollControl for Body {
        fn set_scroll_enabled(&self, enabled: bool) {
            self.calls.borrow_mut().push(enabled);
        }
    }

    #[test]
    fn acquire_disables_and_drop_restores() {
        let body = Rc::new(Body::default());
        {
            let lock = ScrollLock::acquire(body.clone());
            assert!(lock.is_held());
            assert_eq!(*body.calls.borrow(), vec![false]);
        }
        assert_eq!(*body.calls.borrow(), vec![false, true]);
    }

    #[test]
    fn release_is_idempotent() {
        let body = Rc::new(Body::default());
        let mut lock = ScrollLock::acquire(body.clone());
        lock.release();
        lock.release();
        drop(lock);
        assert_eq!(*body.calls.borrow(), vec![false, true]);
    }
}
