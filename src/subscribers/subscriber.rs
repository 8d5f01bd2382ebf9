//! # Event subscriber trait.
//!
//! [`Subscriber`] is the extension point for plugging event handlers into the
//! runtime: logging, statistics counters, watchdog feeders. Subscribers are
//! invoked sequentially from the supervisor's listener task, so a handler
//! should return quickly and never block the executor.

use async_trait::async_trait;

use crate::events::Event;

/// Event handler for runtime observability.
///
/// ## Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Return promptly — one slow subscriber delays delivery to the rest.
///
/// ## Example
/// ```rust
/// use async_trait::async_trait;
/// use skyvisor::{Event, EventKind, Subscriber};
///
/// struct DropCounter;
///
/// #[async_trait]
/// impl Subscriber for DropCounter {
///     async fn on_event(&self, ev: &Event) {
///         if matches!(ev.kind, EventKind::ConnectFailed) {
///             // bump a statistics counter
///         }
///     }
///
///     fn name(&self) -> &'static str { "drop-counter" }
/// }
/// ```
#[async_trait]
pub trait Subscriber: Send + Sync + 'static {
    /// Processes a single event.
    async fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose —
    /// override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
