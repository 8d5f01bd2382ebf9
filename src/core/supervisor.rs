//! # Supervisor: drives the whole component lifecycle.
//!
//! The [`Supervisor`] owns the event bus, the registry, and the subscriber
//! fan-out. One call to [`run`](Supervisor::run) takes a fixed set of
//! [`ComponentSpec`]s through bootstrap, steady state, and teardown:
//!
//! ```text
//! run(specs)
//!   ├─► register each spec                  (duplicate name = panic)
//!   ├─► construct_all                       ── Err ─► return (fatal, nothing started)
//!   ├─► start_all                           ── Err ─► destruct_all, return
//!   │     (failure at k already stopped k-1..1 in reverse)
//!   ├─► park: OS signal │ ShutdownHandle
//!   ├─► stop_all                            (reverse order, no timeout)
//!   ├─► destruct_all                        (reverse order)
//!   └─► Ok(())
//! ```
//!
//! The supervisor's own task performs every lifecycle call sequentially and
//! is never cancelled; only workers are.
//!
//! ## Example
//! ```no_run
//! use tokio_util::sync::CancellationToken;
//! use skyvisor::{ComponentSpec, Config, LogWriter, Subscriber, Supervisor, WorkerError, WorkerFn};
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subscribers: Vec<Arc<dyn Subscriber>> = vec![Arc::new(LogWriter)];
//!     let sup = Supervisor::new(Config::default(), subscribers);
//!
//!     let relay = WorkerFn::arc("relay", |ctx: CancellationToken| async move {
//!         ctx.cancelled().await;
//!         Err(WorkerError::Canceled)
//!     });
//!
//!     sup.run(vec![ComponentSpec::threaded(relay)]).await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::select;
use tokio_util::sync::CancellationToken;

use crate::components::ComponentSpec;
use crate::config::Config;
use crate::core::{shutdown, Registry};
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscriber;

/// Handle for requesting an orderly shutdown from outside the supervisor.
///
/// Clones share the same request; firing it once is enough. Embedders use it
/// where a daemon would receive a signal; tests use it to end a run
/// deterministically.
#[derive(Clone)]
pub struct ShutdownHandle {
    token: CancellationToken,
}

impl ShutdownHandle {
    /// Requests an orderly stop of the supervisor's current run.
    pub fn request(&self) {
        self.token.cancel();
    }

    /// Returns `true` once a shutdown has been requested.
    pub fn is_requested(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Coordinates component lifecycle, event delivery, and shutdown.
pub struct Supervisor {
    cfg: Config,
    bus: Bus,
    subscribers: Vec<Arc<dyn Subscriber>>,
    shutdown: CancellationToken,
}

impl Supervisor {
    /// Creates a supervisor with the given config and subscribers.
    pub fn new(cfg: Config, subscribers: Vec<Arc<dyn Subscriber>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self {
            cfg,
            bus,
            subscribers,
            shutdown: CancellationToken::new(),
        }
    }

    /// Returns the bus shared with all components.
    ///
    /// Components clone it at bootstrap for their connectors and retry loops.
    pub fn bus(&self) -> Bus {
        self.bus.clone()
    }

    /// Returns the runtime configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns a handle that requests an orderly shutdown of [`run`](Self::run).
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            token: self.shutdown.clone(),
        }
    }

    /// Runs the given components until shutdown is requested.
    ///
    /// Registers the specs in the given order, constructs and starts them,
    /// then parks until an OS signal or the [`ShutdownHandle`] fires, and
    /// finally stops and destructs everything in reverse.
    ///
    /// Returns `Err` without reaching steady state if a construct or start
    /// fails; a start failure has already rolled back every started
    /// component and run `destruct_all` by the time it surfaces here.
    pub async fn run(&self, specs: Vec<ComponentSpec>) -> Result<(), RuntimeError> {
        self.subscriber_listener();

        let mut registry = Registry::new(self.bus.clone());
        for spec in specs {
            registry.register(spec);
        }

        registry.construct_all().await?;

        let runtime_token = CancellationToken::new();
        if let Err(e) = registry.start_all(&runtime_token).await {
            // Rollback already stopped everything start_all had started.
            registry.destruct_all().await;
            return Err(e);
        }

        self.wait_for_shutdown_request().await;
        self.bus.publish(Event::now(EventKind::ShutdownRequested));

        // stop_all cancels each worker's child token individually, in
        // reverse start order; the shared parent token stays untouched so
        // an earlier worker keeps running until every later one has stopped.
        registry.stop_all().await;
        registry.destruct_all().await;

        self.bus.publish(Event::now(EventKind::AllStopped));
        Ok(())
    }

    /// Subscribes to the bus and forwards events to every subscriber in order.
    fn subscriber_listener(&self) {
        if self.subscribers.is_empty() {
            return;
        }
        let mut rx = self.bus.subscribe();
        let subs = self.subscribers.clone();
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                for sub in &subs {
                    sub.on_event(&ev).await;
                }
            }
        });
    }

    /// Parks until an OS signal or the shutdown handle fires.
    async fn wait_for_shutdown_request(&self) {
        select! {
            _ = shutdown::wait_for_shutdown_signal() => {}
            _ = self.shutdown.cancelled() => {}
        }
    }
}
