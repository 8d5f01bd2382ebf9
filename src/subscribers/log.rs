//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format, one line
//! per event. This is where transient connect failures become visible to an
//! operator; nothing else in the runtime surfaces them.
//!
//! ## Output format
//! ```text
//! [starting] component=gps
//! [started] component=gps
//! [retry] component=gps attempt=2 delay_ms=30000 reason="connection refused"
//! [connected] component=relay peer=10.0.0.5:30005
//! [shutdown-requested]
//! [stopped] component=gps
//! [all-stopped]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscriber;

/// Stdout line-per-event subscriber.
///
/// Intended for development and small deployments — implement a custom
/// [`Subscriber`] for structured logging or metrics export.
pub struct LogWriter;

#[async_trait]
impl Subscriber for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::ComponentStarting => {
                println!("[starting] component={:?}", e.component);
            }
            EventKind::ComponentStarted => {
                println!("[started] component={:?}", e.component);
            }
            EventKind::StartFailed => {
                println!(
                    "[start-failed] component={:?} reason={:?}",
                    e.component, e.reason
                );
            }
            EventKind::RollbackStarted => {
                println!("[rollback] failed_component={:?}", e.component);
            }
            EventKind::ComponentStopping => {
                println!("[stopping] component={:?}", e.component);
            }
            EventKind::ComponentStopped => {
                println!("[stopped] component={:?}", e.component);
            }
            EventKind::WorkerFailed => {
                println!(
                    "[worker-failed] component={:?} reason={:?}",
                    e.component, e.reason
                );
            }
            EventKind::WorkerPanicked => {
                println!("[worker-panicked] component={:?}", e.component);
            }
            EventKind::Connected => {
                println!("[connected] component={:?} peer={:?}", e.component, e.peer);
            }
            EventKind::ConnectFailed => {
                println!(
                    "[connect-failed] component={:?} reason={:?}",
                    e.component, e.reason
                );
            }
            EventKind::RetryScheduled => {
                println!(
                    "[retry] component={:?} attempt={:?} delay_ms={:?} reason={:?}",
                    e.component, e.attempt, e.delay_ms, e.reason
                );
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::AllStopped => {
                println!("[all-stopped]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
