//! # Worker trait: the long-running body of a threaded component.
//!
//! A worker receives a [`CancellationToken`] and must observe it at its
//! suspension points — connect, blocking read, bounded sleep — by selecting
//! on `ctx.cancelled()` alongside the blocking future. Cancellation is
//! cooperative: a body that never reaches a suspension point cannot be
//! stopped promptly, and `stop` will wait for it indefinitely.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::components::Component;
use crate::error::WorkerError;

/// Shared handle to a worker (`Arc<dyn Worker>`).
pub type WorkerRef = Arc<dyn Worker>;

/// Long-running, cancellable component body.
///
/// Returning `Err(WorkerError::Canceled)` after the token fires is the normal
/// shutdown path and is reported as a clean stop. Any other error marks the
/// worker as failed; the runtime does not restart it (transient I/O belongs
/// inside the body, behind [`connect_forever`](crate::connect_forever)).
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use skyvisor::{Component, Worker, WorkerError};
///
/// struct Heartbeat;
///
/// #[async_trait]
/// impl Component for Heartbeat {
///     fn name(&self) -> &str { "heartbeat" }
/// }
///
/// #[async_trait]
/// impl Worker for Heartbeat {
///     async fn run(&self, ctx: CancellationToken) -> Result<(), WorkerError> {
///         loop {
///             tokio::select! {
///                 _ = ctx.cancelled() => return Err(WorkerError::Canceled),
///                 _ = tokio::time::sleep(std::time::Duration::from_secs(1)) => {}
///             }
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Worker: Component {
    /// Executes the worker until cancellation or an unrecoverable error.
    async fn run(&self, ctx: CancellationToken) -> Result<(), WorkerError>;
}
