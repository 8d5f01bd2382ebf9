//! # Scoped cleanup for cancellation-safe workers.
//!
//! Workers acquire resources (sockets, in-flight buffer frames, device
//! handles) while blocked at suspension points, and may be cancelled at any of
//! them. Release must happen exactly once on *every* exit path: normal return,
//! early `?`, panic unwind, or the worker future being dropped after its token
//! fired.
//!
//! Both types here lean on `Drop` for that guarantee:
//!
//! - [`CleanupStack`] — a per-worker LIFO stack of release actions. Push an
//!   action before entering a risky region, [`pop`](CleanupStack::pop) it after
//!   leaving cleanly; anything still on the stack runs in reverse push order
//!   when the stack is dropped.
//! - [`Guard`] — a single resource paired with its release closure;
//!   [`into_inner`](Guard::into_inner) disarms it once ownership moves on.
//!
//! ```rust
//! use skyvisor::CleanupStack;
//!
//! let mut stack = CleanupStack::new();
//! stack.push("return frame", || { /* ring_buffer.release(frame) */ });
//! // ... blocking region ...
//! stack.pop(); // left cleanly: release now, in order
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};

type Action = Box<dyn FnOnce() + Send>;

/// LIFO stack of release actions, unwound exactly once.
///
/// Entries run in reverse push order. Each entry runs at most once: either
/// explicitly via [`pop`](Self::pop), or implicitly on drop. [`dismiss`](Self::dismiss)
/// disarms everything that is still pending.
#[derive(Default)]
pub struct CleanupStack {
    entries: Vec<(&'static str, Action)>,
}

impl CleanupStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers a release action under a short label (used in `Debug` output).
    pub fn push<F>(&mut self, label: &'static str, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.entries.push((label, Box::new(action)));
    }

    /// Runs the most recently pushed action now and removes it.
    ///
    /// Returns `false` if the stack was empty.
    pub fn pop(&mut self) -> bool {
        match self.entries.pop() {
            Some((_, action)) => {
                action();
                true
            }
            None => false,
        }
    }

    /// Removes the most recently pushed action *without* running it.
    ///
    /// For the case where the resource was handed off (e.g. a frame was
    /// successfully dispatched and is now owned elsewhere).
    pub fn forget_last(&mut self) -> bool {
        self.entries.pop().is_some()
    }

    /// Disarms every pending action.
    pub fn dismiss(&mut self) {
        // Dropping a Box<dyn FnOnce> without calling it discards the action.
        self.entries.clear();
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no actions are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for CleanupStack {
    fn drop(&mut self) {
        while let Some((_, action)) = self.entries.pop() {
            action();
        }
    }
}

impl fmt::Debug for CleanupStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(label, _)| label))
            .finish()
    }
}

/// A resource paired with its release closure.
///
/// The closure runs on drop unless the value is extracted with
/// [`into_inner`](Self::into_inner). Dereferences to the wrapped value.
///
/// ```rust
/// use skyvisor::Guard;
///
/// let fd = 7_i32;
/// let guard = Guard::new(fd, |fd| { /* close(fd) */ let _ = fd; });
/// assert_eq!(*guard, 7);
/// let fd = guard.into_inner(); // disarmed; caller now owns fd
/// # let _ = fd;
/// ```
pub struct Guard<T, F: FnOnce(T)> {
    // Both Options are only None between disarm and drop.
    value: Option<T>,
    release: Option<F>,
}

impl<T, F: FnOnce(T)> Guard<T, F> {
    /// Wraps `value`, arming `release` to run on drop.
    pub fn new(value: T, release: F) -> Self {
        Self {
            value: Some(value),
            release: Some(release),
        }
    }

    /// Disarms the guard and returns the wrapped value.
    pub fn into_inner(mut self) -> T {
        self.release = None;
        self.value.take().unwrap()
    }
}

impl<T, F: FnOnce(T)> Deref for Guard<T, F> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value.as_ref().unwrap()
    }
}

impl<T, F: FnOnce(T)> DerefMut for Guard<T, F> {
    fn deref_mut(&mut self) -> &mut T {
        self.value.as_mut().unwrap()
    }
}

impl<T, F: FnOnce(T)> Drop for Guard<T, F> {
    fn drop(&mut self) {
        if let (Some(value), Some(release)) = (self.value.take(), self.release.take()) {
            release(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_stack_unwinds_lifo_on_drop() {
        let order = Arc::new(Mutex::new(Vec::new()));
        {
            let mut stack = CleanupStack::new();
            for tag in ["socket", "frame", "lock"] {
                let order = order.clone();
                stack.push(tag, move || order.lock().unwrap().push(tag));
            }
        }
        assert_eq!(*order.lock().unwrap(), vec!["lock", "frame", "socket"]);
    }

    #[test]
    fn test_pop_runs_now_and_only_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut stack = CleanupStack::new();
        let c = count.clone();
        stack.push("once", move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(stack.pop());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(stack.is_empty());

        drop(stack);
        assert_eq!(count.load(Ordering::SeqCst), 1, "drop must not re-run it");
    }

    #[test]
    fn test_pop_on_empty_stack() {
        let mut stack = CleanupStack::new();
        assert!(!stack.pop());
    }

    #[test]
    fn test_dismiss_disarms_everything() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut stack = CleanupStack::new();
        for _ in 0..3 {
            let c = count.clone();
            stack.push("n", move || {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }
        stack.dismiss();
        drop(stack);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_forget_last_skips_only_newest() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut stack = CleanupStack::new();
        for tag in ["a", "b"] {
            let order = order.clone();
            stack.push(tag, move || order.lock().unwrap().push(tag));
        }
        assert!(stack.forget_last());
        drop(stack);
        assert_eq!(*order.lock().unwrap(), vec!["a"]);
    }

    #[test]
    fn test_unpolled_future_drop_runs_nothing() {
        // A future dropped before its first poll never acquired anything,
        // so no release action may run.
        let ran = Arc::new(AtomicUsize::new(0));
        let r = ran.clone();
        let fut = async move {
            let mut stack = CleanupStack::new();
            stack.push("socket", move || {
                r.fetch_add(1, Ordering::SeqCst);
            });
            std::future::pending::<()>().await;
            drop(stack);
        };
        drop(fut);
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stack_runs_when_polled_future_is_dropped() {
        let ran = Arc::new(AtomicUsize::new(0));
        let r = ran.clone();
        let handle = tokio::spawn(async move {
            let mut stack = CleanupStack::new();
            stack.push("socket", move || {
                r.fetch_add(1, Ordering::SeqCst);
            });
            std::future::pending::<()>().await;
            drop(stack);
        });
        tokio::task::yield_now().await;
        handle.abort();
        let _ = handle.await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let released = Arc::new(AtomicUsize::new(0));
        let r = released.clone();
        {
            let guard = Guard::new(42_u32, move |v| {
                assert_eq!(v, 42);
                r.fetch_add(1, Ordering::SeqCst);
            });
            assert_eq!(*guard, 42);
        }
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_into_inner_disarms() {
        let released = Arc::new(AtomicUsize::new(0));
        let r = released.clone();
        let guard = Guard::new(7_u32, move |_| {
            r.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(guard.into_inner(), 7);
        assert_eq!(released.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_guard_deref_mut() {
        let mut guard = Guard::new(vec![1, 2], |_| {});
        guard.push(3);
        assert_eq!(guard.len(), 3);
    }
}
