//! # Unbounded reconnect loop with a fixed inter-attempt delay.
//!
//! Every network- or serial-backed worker runs its connect step inside
//! [`connect_forever`]: the one-shot operation is retried until it succeeds, sleeping
//! a fixed [`RetryPolicy::delay`] between attempts. The loop never surfaces a
//! connect failure to the worker — failures are published as
//! [`EventKind::RetryScheduled`] and absorbed.
//!
//! The delay is deliberately constant rather than exponential: the peer is a
//! LAN host or a local device, and the steady cadence doubles as a liveness
//! probe an operator can read straight from the event log.
//!
//! ## Cancellation
//! The loop selects on the worker's token at both of its suspension points —
//! inside the connect attempt and during the delay — and exits with
//! [`WorkerError::Canceled`] as soon as the token fires, so `?` on the loop's
//! result unwinds the worker body cleanly.
//!
//! ```text
//! DISCONNECTED ──(forever)──► CONNECTED ──(read loop, error)──► DISCONNECTED
//!       ▲                                                            │
//!       └────────────── sleep(delay), next attempt ──────────────────┘
//! ```

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::error::WorkerError;
use crate::events::{Bus, Event, EventKind};

/// Reconnect policy: a fixed delay between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed delay between consecutive connect attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    /// Returns a 30-second inter-attempt delay.
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given inter-attempt delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

/// Retries `op` until it succeeds or `ctx` is cancelled.
///
/// Each failed attempt publishes [`EventKind::RetryScheduled`] with the
/// attempt number, the failure reason, and the configured delay, then sleeps.
/// Returns `Ok` with the operation's success value, or
/// `Err(WorkerError::Canceled)` if the token fired mid-attempt or mid-sleep.
///
/// `op` is a closure producing a fresh attempt future per call, so the
/// operation may capture `&self` state without moving it.
pub async fn connect_forever<T, E, F, Fut>(
    label: &str,
    ctx: &CancellationToken,
    policy: RetryPolicy,
    bus: &Bus,
    mut op: F,
) -> Result<T, WorkerError>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt: u32 = 0;

    loop {
        if ctx.is_cancelled() {
            return Err(WorkerError::Canceled);
        }
        attempt += 1;

        let result = select! {
            res = op() => res,
            _ = ctx.cancelled() => return Err(WorkerError::Canceled),
        };

        let err = match result {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        bus.publish(
            Event::now(EventKind::RetryScheduled)
                .with_component(label)
                .with_reason(err.to_string())
                .with_attempt(attempt)
                .with_delay(policy.delay),
        );

        select! {
            _ = time::sleep(policy.delay) => {}
            _ = ctx.cancelled() => return Err(WorkerError::Canceled),
        }
    }
}
