//! Error types used by the skyvisor runtime and components.
//!
//! Four enums cover the error taxonomy:
//!
//! - [`RuntimeError`] — startup failures surfaced by the supervisor/registry.
//! - [`ComponentError`] — errors raised by `construct` and custom `start` callbacks.
//! - [`ConnectError`] — one-shot connection establishment failures.
//! - [`WorkerError`] — errors raised inside a worker body.
//!
//! Transient I/O failures never appear here at the supervisor boundary: they
//! are absorbed by the reconnect-retry loop and only surface as
//! `RetryScheduled` events. Cancellation ([`WorkerError::Canceled`]) is an
//! expected exit path, not a failure.

use std::io;
use thiserror::Error;

/// Errors raised by component lifecycle callbacks.
///
/// `Config` marks a construct-time rejection (bad or missing configuration);
/// `Start` marks a custom component that could not enter its running state.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ComponentError {
    /// Configuration was rejected during `construct`.
    #[error("configuration rejected: {reason}")]
    Config {
        /// What the component objected to.
        reason: String,
    },

    /// A custom `start` callback failed.
    #[error("start failed: {reason}")]
    Start {
        /// Why the component could not start.
        reason: String,
    },
}

impl ComponentError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ComponentError::Config { .. } => "component_config_rejected",
            ComponentError::Start { .. } => "component_start_failed",
        }
    }
}

/// Errors produced by the supervision runtime during startup.
///
/// Both variants are fatal to the run: the process is expected to exit with a
/// non-zero status without ever reaching steady state.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A component's `construct` failed. No rollback is performed; components
    /// constructed before the failing one keep whatever state they built.
    #[error("construct failed for `{component}`: {source}")]
    ConstructFailed {
        /// Name of the failing component.
        component: String,
        /// The underlying callback error.
        source: ComponentError,
    },

    /// A component failed to start. Every component started before it has
    /// already been stopped again (reverse order) by the time this is returned.
    #[error("start failed for `{component}` after rolling back {rolled_back} component(s): {source}")]
    StartFailed {
        /// Name of the failing component.
        component: String,
        /// How many previously started components were stopped during rollback.
        rolled_back: usize,
        /// The underlying callback error.
        source: ComponentError,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::ConstructFailed { .. } => "runtime_construct_failed",
            RuntimeError::StartFailed { .. } => "runtime_start_failed",
        }
    }

    /// Name of the component the failure is attributed to.
    pub fn component(&self) -> &str {
        match self {
            RuntimeError::ConstructFailed { component, .. } => component,
            RuntimeError::StartFailed { component, .. } => component,
        }
    }
}

/// Errors produced by one-shot connection establishment.
///
/// These are *per-call* failures of the resilient connector. Inside a worker
/// they are normally swallowed by [`connect_forever`](crate::connect_forever) rather than
/// propagated.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConnectError {
    /// The host name could not be resolved at all.
    #[error("resolving `{host}` failed: {source}")]
    Resolve {
        /// Host name as given.
        host: String,
        /// Resolver error from the OS.
        source: io::Error,
    },

    /// Resolution succeeded but produced no usable addresses.
    #[error("`{host}` resolved to no usable addresses")]
    NoAddresses {
        /// Host name as given.
        host: String,
    },

    /// Every resolved address was tried and refused/errored.
    #[error("all {attempts} address(es) for `{host}` failed, last error: {source}")]
    Exhausted {
        /// Host name as given.
        host: String,
        /// Number of addresses attempted.
        attempts: usize,
        /// The error from the final attempt.
        source: io::Error,
    },
}

impl ConnectError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConnectError::Resolve { .. } => "connect_resolve_failed",
            ConnectError::NoAddresses { .. } => "connect_no_addresses",
            ConnectError::Exhausted { .. } => "connect_exhausted",
        }
    }
}

/// Errors raised inside a worker body.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The worker observed its cancellation token and exited cooperatively.
    ///
    /// This is the clean shutdown path: it is reported as a normal stop,
    /// never as a failure.
    #[error("worker cancelled")]
    Canceled,

    /// The worker hit an I/O error it could not absorb locally.
    #[error("worker i/o error: {0}")]
    Io(#[from] io::Error),

    /// The worker failed for a component-specific reason.
    #[error("worker failed: {reason}")]
    Fail {
        /// Component-specific failure description.
        reason: String,
    },
}

impl WorkerError {
    /// Returns `true` for the cooperative-cancellation exit path.
    pub fn is_cancel(&self) -> bool {
        matches!(self, WorkerError::Canceled)
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            WorkerError::Canceled => "worker_canceled",
            WorkerError::Io(_) => "worker_io",
            WorkerError::Fail { .. } => "worker_failed",
        }
    }
}
