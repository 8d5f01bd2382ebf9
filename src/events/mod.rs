//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to runtime events emitted by the supervisor, registry,
//! worker handles, connector and retry loop.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Supervisor`, `Registry`, `WorkerHandle`, `Connector`,
//!   `connect_forever`.
//! - **Consumer**: the supervisor's subscriber listener, which fans events out
//!   to every registered [`Subscriber`](crate::Subscriber).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
