//! Completion signals for animations and timers.
//!
//! A [`Completion`] is a cloneable, single-threaded handle that resolves once
//! the animation it belongs to has finished or been killed. It implements
//! [`Future`], so several of them can be joined with
//! `futures::future::join_all` and awaited before a new transition starts.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Debug, Default)]
struct Inner {
    done: bool,
    wakers: Vec<Waker>,
}

/// Shared completion signal.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    inner: Rc<RefCell<Inner>>,
}

impl Completion {
    /// Create an unresolved completion.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a completion that is already resolved.
    #[must_use]
    pub fn resolved() -> Self {
        let completion = Self::new();
        completion.resolve();
        completion
    }

    /// Resolve the completion and wake every waiter. Resolving twice is a no-op.
    pub fn resolve(&self) {
        let wakers = {
            let mut inner = self.inner.borrow_mut();
            if inner.done {
                return;
            }
            inner.done = true;
            std::mem::take(&mut inner.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
    }

    /// Whether the completion has resolved.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.inner.borrow().done
    }

    /// Whether two handles refer to the same signal.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut inner = self.inner.borrow_mut();
        if inner.done {
            Poll::Ready(())
        } else {
            if !inner.wakers.iter().any(|w| w.will_wake(cx.waker())) {
                inner.wakers.push(cx.waker().clone());
            }
            Poll::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use futures::task::noop_waker_ref;
    use futures::FutureExt;

    #[test]
    fn test_new_is_pending() {
        let c = Completion::new();
        assert!(!c.is_done());
        let mut cx = Context::from_waker(noop_waker_ref());
        assert!(c.clone().poll_unpin(&mut cx).is_pending());
    }

    #[test]
    fn test_resolve_is_shared_between_clones() {
        let c = Completion::new();
        let other = c.clone();
        c.resolve();
        assert!(other.is_done());
        assert!(other.same_as(&c));
    }

    #[test]
    fn test_resolved_is_ready() {
        assert_eq!(Completion::resolved().now_or_never(), Some(()));
    }

    #[test]
    fn test_resolve_twice_is_noop() {
        let c = Completion::new();
        c.resolve();
        c.resolve();
        assert!(c.is_done());
    }

    #[test]
    fn test_join_all_waits_for_every_signal() {
        let a = Completion::new();
        let b = Completion::new();
        let mut join = join_all(vec![a.clone(), b.clone()]).boxed_local();
        let mut cx = Context::from_waker(noop_waker_ref());

        assert!(join.poll_unpin(&mut cx).is_pending());
        a.resolve();
        assert!(join.poll_unpin(&mut cx).is_pending());
        b.resolve();
        assert!(join.poll_unpin(&mut cx).is_ready());
    }

    #[test]
    fn test_join_of_nothing_is_ready() {
        let mut join = join_all(Vec::<Completion>::new()).boxed_local();
        let mut cx = Context::from_waker(noop_waker_ref());
        assert!(join.poll_unpin(&mut cx).is_ready());
    }

    #[test]
    fn test_distinct_signals_are_not_same() {
        assert!(!Completion::new().same_as(&Completion::new()));
    }
}
