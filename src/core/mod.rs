//! Runtime core: orchestration and lifecycle.
//!
//! The public API from this module is [`Supervisor`] (plus its
//! [`ShutdownHandle`]), which drives the whole component lifecycle.
//!
//! Internal modules:
//! - [`registry`]: insertion-ordered component sequence; construct/start/stop/destruct orchestration with startup rollback;
//! - [`worker`]: maps a worker body onto a spawned, cancellable task (the default threaded start/stop pair);
//! - [`supervisor`]: wires registry, bus, subscribers and shutdown together;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod registry;
mod shutdown;
mod supervisor;
mod worker;

pub use supervisor::{ShutdownHandle, Supervisor};

pub(crate) use registry::Registry;
