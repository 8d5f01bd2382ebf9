//! # Lifecycle trait: components that manage their own runtime.
//!
//! Most components are workers; a few own no task of their own (a hardware
//! programmer that configures an FPGA during startup, a component that only
//! installs interrupt routing). Those implement [`Lifecycle`] directly and
//! the registry calls `start`/`stop` in place of spawning anything.

use std::sync::Arc;

use async_trait::async_trait;

use crate::components::Component;
use crate::error::ComponentError;

/// Shared handle to a custom-lifecycle component (`Arc<dyn Lifecycle>`).
pub type LifecycleRef = Arc<dyn Lifecycle>;

/// Self-managed start/stop pair.
///
/// `start` must leave the component either fully running or fully stopped;
/// returning an error triggers rollback of every component started before it.
/// `stop` is called at most once, and only after a successful `start`.
#[async_trait]
pub trait Lifecycle: Component {
    /// Brings the component into its running state.
    async fn start(&self) -> Result<(), ComponentError>;

    /// Takes the component out of its running state; returns when it is
    /// fully stopped and has released its resources.
    async fn stop(&self);
}
