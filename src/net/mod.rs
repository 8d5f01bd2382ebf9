//! Connection establishment for network-backed workers.
//!
//! ## Contents
//! - [`Connector`] resilient multi-address connect: resolve, shuffle,
//!   sequential fallback
//! - [`RetryPolicy`], [`connect_forever`] unbounded reconnect loop with a fixed
//!   inter-attempt delay
//!
//! ## Quick wiring
//! ```text
//! worker body:
//!   connect_forever(ctx, policy, || connector.connect(host, port))
//!       │                              │
//!       │                              ├─ lookup_host → shuffle → walk addresses
//!       │                              └─ first success wins, failures close sockets
//!       ├─ Err → RetryScheduled, sleep(delay), try again (forever)
//!       └─ Ok(stream) → enter read/dispatch loop
//! ```

mod connector;
pub(crate) mod retry;

pub use connector::Connector;
pub use retry::{connect_forever, RetryPolicy};
