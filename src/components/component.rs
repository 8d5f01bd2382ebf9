//! # Base component trait: name plus optional one-shot hooks.
//!
//! `construct` and `destruct` have default no-op implementations, so a
//! component overrides only what it needs. Both run on the supervisor's own
//! task, never concurrently with each other, and each runs at most once per
//! process lifetime:
//!
//! - `construct` in registration order, before anything starts;
//! - `destruct` in reverse registration order, after everything has stopped.

use async_trait::async_trait;

use crate::error::ComponentError;

/// A registered subsystem with optional setup and teardown hooks.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use skyvisor::{Component, ComponentError};
///
/// struct FrameBuffer;
///
/// #[async_trait]
/// impl Component for FrameBuffer {
///     fn name(&self) -> &str { "frame-buffer" }
///
///     async fn construct(&self) -> Result<(), ComponentError> {
///         // allocate the ring buffer; a failure here is fatal to the run
///         Ok(())
///     }
///
///     async fn destruct(&self) {
///         // free it
///     }
/// }
/// ```
#[async_trait]
pub trait Component: Send + Sync + 'static {
    /// Returns a stable, human-readable component name.
    ///
    /// Names identify components in events and errors and must be unique
    /// within one registry.
    fn name(&self) -> &str;

    /// One-shot setup, run before any component starts.
    ///
    /// An error here aborts the whole run: no rollback is attempted, the
    /// supervisor surfaces it as fatal. Report configuration problems here
    /// rather than deferring them into the worker body.
    async fn construct(&self) -> Result<(), ComponentError> {
        Ok(())
    }

    /// One-shot teardown, mirror of [`construct`](Self::construct).
    ///
    /// Runs after every component has stopped; not expected to fail.
    async fn destruct(&self) {}
}
