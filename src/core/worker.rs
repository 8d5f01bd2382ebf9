//! # Worker lifecycle manager: the default threaded start/stop pair.
//!
//! A component with a long-running body gets its `start` and `stop`
//! synthesized here:
//!
//! - **start** = derive a child [`CancellationToken`] and spawn the body on
//!   the runtime. Fire-and-forget: the call never waits for the body to do
//!   anything.
//! - **stop** = cancel the child token, then await the join handle with no
//!   timeout. The call returns only once the worker future is gone — and a
//!   dropped future has, by `Drop` semantics, already unwound every
//!   [`CleanupStack`](crate::CleanupStack) and guard it held.
//!
//! ## Exit reporting
//! ```text
//! run() → Ok(())                → ComponentStopped
//! run() → Err(Canceled)         → ComponentStopped   (clean, silent)
//! run() → Err(other)            → WorkerFailed
//! task panicked                 → WorkerPanicked     (contained at join)
//! ```

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::components::WorkerRef;
use crate::events::{Bus, Event, EventKind};

/// Handle to one spawned worker: its cancellation token plus join handle.
pub(crate) struct WorkerHandle {
    name: Arc<str>,
    cancel: CancellationToken,
    join: JoinHandle<()>,
    bus: Bus,
}

impl WorkerHandle {
    /// Spawns `worker` under a child token of `parent`.
    ///
    /// The spawned task reports the body's exit on the bus; cancellation is
    /// not a failure and is reported as a normal stop.
    pub(crate) fn spawn(worker: WorkerRef, parent: &CancellationToken, bus: Bus) -> Self {
        let name: Arc<str> = Arc::from(worker.name());
        let cancel = parent.child_token();

        let task_name = name.clone();
        let task_bus = bus.clone();
        let token = cancel.clone();
        let join = tokio::spawn(async move {
            match worker.run(token).await {
                Ok(()) => {}
                Err(e) if e.is_cancel() => {}
                Err(e) => {
                    task_bus.publish(
                        Event::now(EventKind::WorkerFailed)
                            .with_component(task_name.clone())
                            .with_reason(e.to_string()),
                    );
                }
            }
        });

        Self {
            name,
            cancel,
            join,
            bus,
        }
    }

    /// Returns the worker's component name.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Requests cancellation and waits for the worker to fully exit.
    ///
    /// No timeout: a worker that never reaches a suspension point will hold
    /// this call indefinitely, which is a bug in that worker, not here.
    pub(crate) async fn stop(self) {
        self.bus
            .publish(Event::now(EventKind::ComponentStopping).with_component(self.name.clone()));
        self.cancel.cancel();

        if self.join.await.is_err() {
            // Worker panicked; the panic ends at this join boundary.
            self.bus
                .publish(Event::now(EventKind::WorkerPanicked).with_component(self.name.clone()));
        }

        self.bus
            .publish(Event::now(EventKind::ComponentStopped).with_component(self.name));
    }
}
