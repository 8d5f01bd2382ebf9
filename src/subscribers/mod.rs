//! # Event subscribers for runtime observability.
//!
//! The supervisor forwards every bus event to the registered subscribers, in
//! registration order, from a single listener task.
//!
//! ## Contents
//! - [`Subscriber`] - extension point for logging, metrics, alerts
//! - [`LogWriter`] - built-in stdout line-per-event subscriber

mod log;
mod subscriber;

pub use log::LogWriter;
pub use subscriber::Subscriber;
