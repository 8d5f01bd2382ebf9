//! # skyvisor
//!
//! **skyvisor** is a component supervision runtime for embedded receiver
//! daemons: a fixed set of long-running subsystems (hardware programming,
//! positioning, network relay, frame ingestion) is registered once at
//! bootstrap, started in registration order, run as independently cancellable
//! workers, and torn down deterministically — on shutdown and on partial
//! startup failure alike.
//!
//! ## Architecture
//! ```text
//!  ┌───────────────┐  ┌───────────────┐  ┌───────────────┐
//!  │ ComponentSpec │  │ ComponentSpec │  │ ComponentSpec │
//!  │ (gps worker)  │  │ (relay worker)│  │ (custom pair) │
//!  └───────┬───────┘  └───────┬───────┘  └───────┬───────┘
//!          ▼                  ▼                  ▼
//!  ┌───────────────────────────────────────────────────────────┐
//!  │  Supervisor                                               │
//!  │  - Registry (insertion-ordered component sequence)        │
//!  │  - Bus (broadcast events) ──► Subscriber fan-out          │
//!  │  - ShutdownHandle / OS signals                            │
//!  └──────┬──────────────────────┬─────────────────────────────┘
//!         ▼                      ▼
//!  ┌───────────────┐     ┌───────────────┐
//!  │ WorkerHandle  │     │ WorkerHandle  │   (one tokio task per
//!  │ token + join  │     │ token + join  │    Threaded component)
//!  └──────┬────────┘     └──────┬────────┘
//!         │ worker body:        │
//!         │   connect_forever ──► Connector::connect ──► read loop
//!         │   CleanupStack unwinds on every exit path
//!         ▼                      ▼
//!               Bus (Connected / ConnectFailed / RetryScheduled / ...)
//! ```
//!
//! ## Lifecycle
//! ```text
//! Supervisor::run(specs)
//!   ├─► register each spec            (append-only, duplicate name = panic)
//!   ├─► construct_all                 (registration order; first error is fatal)
//!   ├─► start_all                     (registration order)
//!   │     └─ on failure at k: stop k-1..1, destruct_all, return Err
//!   ├─► park on shutdown request      (signal or ShutdownHandle)
//!   ├─► stop_all                      (reverse start order, no timeout)
//!   └─► destruct_all                  (reverse registration order)
//! ```
//!
//! ## Cancellation model
//! Stopping a worker cancels its [`CancellationToken`](tokio_util::sync::CancellationToken)
//! and then awaits its join handle. Workers honor the token at their
//! *suspension points* — connect, blocking read, bounded sleep — by selecting
//! on the token alongside the blocking future. When the worker future is
//! dropped, every [`CleanupStack`] and [`Guard`] it holds runs its release
//! actions in LIFO order, so `stop` returning implies no component-owned
//! resource is still live.
//!
//! ## Example
//! ```no_run
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use skyvisor::{ComponentSpec, Config, Supervisor, WorkerError, WorkerFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sup = Supervisor::new(Config::default(), Vec::new());
//!
//!     let ticker = WorkerFn::arc("ticker", |ctx: CancellationToken| async move {
//!         loop {
//!             tokio::select! {
//!                 _ = ctx.cancelled() => return Err(WorkerError::Canceled),
//!                 _ = tokio::time::sleep(Duration::from_secs(1)) => { /* poll hardware */ }
//!             }
//!         }
//!     });
//!
//!     sup.run(vec![ComponentSpec::threaded(ticker)]).await?;
//!     Ok(())
//! }
//! ```

mod cleanup;
mod components;
mod config;
mod core;
mod error;
mod events;
mod net;
mod subscribers;

// ---- Public re-exports ----

pub use cleanup::{CleanupStack, Guard};
pub use components::{
    Component, ComponentSpec, Lifecycle, LifecycleRef, Runner, Worker, WorkerFn, WorkerRef,
};
pub use config::Config;
pub use crate::core::{ShutdownHandle, Supervisor};
pub use error::{ComponentError, ConnectError, RuntimeError, WorkerError};
pub use events::{Bus, Event, EventKind};
pub use net::{connect_forever, Connector, RetryPolicy};
pub use subscribers::{LogWriter, Subscriber};
