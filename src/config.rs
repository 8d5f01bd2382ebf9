//! # Global runtime configuration.
//!
//! [`Config`] centralizes the supervisor's runtime settings. Parsing a
//! configuration file into this struct happens outside the runtime; the
//! struct is the boundary.

use crate::net::RetryPolicy;

/// Global configuration for the supervision runtime.
///
/// ## Field semantics
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by the bus)
/// - `retry`: default reconnect policy handed to I/O workers
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Subscribers lagging behind more than `bus_capacity` events observe
    /// `Lagged` and skip the oldest items.
    pub bus_capacity: usize,

    /// Default reconnect policy for network/serial workers.
    pub retry: RetryPolicy,
}

impl Config {
    /// Returns the bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `retry = RetryPolicy::default()` (fixed 30s delay)
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            retry: RetryPolicy::default(),
        }
    }
}
