//! # Component registration spec.
//!
//! [`ComponentSpec`] is the unit handed to the registry: the component's
//! runtime shape ([`Runner`]) plus the optional hooks reachable through the
//! base [`Component`] trait. The spec is immutable after registration;
//! registration order is the only ordering the runtime uses.

use crate::components::{LifecycleRef, WorkerRef};
use crate::error::ComponentError;

/// Runtime shape of a component.
///
/// `Threaded` is the promotion of a plain long-running body into a supervised
/// worker: the runtime supplies start (spawn) and stop (cancel + join).
/// `Custom` components supply their own pair.
#[derive(Clone)]
pub enum Runner {
    /// Long-running body executed under the worker lifecycle manager.
    Threaded(WorkerRef),
    /// Component manages its own start/stop.
    Custom(LifecycleRef),
}

/// Specification for one registered component.
///
/// ## Example
/// ```rust
/// use tokio_util::sync::CancellationToken;
/// use skyvisor::{ComponentSpec, WorkerError, WorkerFn};
///
/// let spec = ComponentSpec::threaded(WorkerFn::arc(
///     "ingest",
///     |_ctx: CancellationToken| async { Ok::<(), WorkerError>(()) },
/// ));
/// assert_eq!(spec.name(), "ingest");
/// ```
#[derive(Clone)]
pub struct ComponentSpec {
    runner: Runner,
}

impl ComponentSpec {
    /// Wraps a worker body as a supervised threaded component.
    pub fn threaded(worker: WorkerRef) -> Self {
        Self {
            runner: Runner::Threaded(worker),
        }
    }

    /// Wraps a component that manages its own start/stop.
    pub fn custom(lifecycle: LifecycleRef) -> Self {
        Self {
            runner: Runner::Custom(lifecycle),
        }
    }

    /// Returns the component name.
    pub fn name(&self) -> &str {
        match &self.runner {
            Runner::Threaded(w) => w.name(),
            Runner::Custom(c) => c.name(),
        }
    }

    /// Returns the runtime shape.
    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    /// Dispatches the optional construct hook.
    pub(crate) async fn construct(&self) -> Result<(), ComponentError> {
        match &self.runner {
            Runner::Threaded(w) => w.construct().await,
            Runner::Custom(c) => c.construct().await,
        }
    }

    /// Dispatches the optional destruct hook.
    pub(crate) async fn destruct(&self) {
        match &self.runner {
            Runner::Threaded(w) => w.destruct().await,
            Runner::Custom(c) => c.destruct().await,
        }
    }
}
