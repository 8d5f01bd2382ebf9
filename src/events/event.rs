//! # Runtime events emitted by the supervision runtime.
//!
//! [`EventKind`] classifies events across four categories:
//! - **Lifecycle events**: component startup/teardown flow
//! - **Worker events**: how a worker task exited
//! - **Connection events**: connector attempts and retry scheduling
//! - **Shutdown events**: supervisor-level shutdown progress
//!
//! [`Event`] carries the metadata attached to each kind: component name,
//! reason, attempt counter, retry delay, peer address.
//!
//! ## Ordering
//! Each event gets a globally unique, monotonically increasing sequence
//! number (`seq`); use it to restore publish order if delivery interleaves.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Component lifecycle ===
    /// A component's start is about to be invoked.
    ///
    /// Sets: `component`.
    ComponentStarting,

    /// A component started successfully (worker spawned or custom start returned).
    ///
    /// Sets: `component`.
    ComponentStarted,

    /// A component failed to start; rollback of earlier components follows.
    ///
    /// Sets: `component`, `reason`.
    StartFailed,

    /// Reverse-order stop of already-started components has begun.
    ///
    /// Sets: `component` (the component whose failure triggered it).
    RollbackStarted,

    /// A component's stop is about to be invoked (cancellation requested).
    ///
    /// Sets: `component`.
    ComponentStopping,

    /// A component has fully stopped (worker joined or custom stop returned).
    ///
    /// Sets: `component`.
    ComponentStopped,

    // === Worker exits ===
    /// A worker body returned an error other than cancellation.
    ///
    /// Sets: `component`, `reason`.
    WorkerFailed,

    /// A worker task panicked; the panic was contained at the join boundary.
    ///
    /// Sets: `component`.
    WorkerPanicked,

    // === Connections ===
    /// A connection was established.
    ///
    /// Sets: `component` (connector label), `peer`.
    Connected,

    /// One whole connect call failed (all addresses exhausted, or resolve failed).
    ///
    /// Sets: `component` (connector label), `reason`.
    ConnectFailed,

    /// The retry loop scheduled another attempt after a failure.
    ///
    /// Sets: `component` (loop label), `reason`, `attempt`, `delay_ms`.
    RetryScheduled,

    // === Shutdown ===
    /// Shutdown was requested (OS signal or explicit handle).
    ShutdownRequested,

    /// Every component has been stopped and destructed.
    AllStopped,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - remaining fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Component (or connector/loop label) the event concerns.
    pub component: Option<Arc<str>>,
    /// Human-readable reason (errors, rollback cause, etc.).
    pub reason: Option<Arc<str>>,
    /// Attempt count (starting from 1) for retry events.
    pub attempt: Option<u32>,
    /// Retry delay before the next attempt, in milliseconds.
    pub delay_ms: Option<u32>,
    /// Remote address for connection events.
    pub peer: Option<Arc<str>>,
}

impl Event {
    /// Creates an event of the given kind with the current timestamp and the
    /// next global sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            component: None,
            reason: None,
            attempt: None,
            delay_ms: None,
            peer: None,
        }
    }

    /// Attaches a component (or label) name.
    #[inline]
    pub fn with_component(mut self, component: impl Into<Arc<str>>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches an attempt count.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a retry delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a peer address rendered as text.
    #[inline]
    pub fn with_peer(mut self, peer: impl ToString) -> Self {
        self.peer = Some(Arc::from(peer.to_string()));
        self
    }
}
