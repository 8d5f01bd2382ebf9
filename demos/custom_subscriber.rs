//! # Example: custom subscriber
//!
//! Counts failures observed on the event bus. Demonstrates:
//! - implementing [`Subscriber`] for an application-specific handler;
//! - ending a run programmatically through the [`ShutdownHandle`] instead of
//!   waiting for a signal.
//!
//! ```bash
//! cargo run --example custom_subscriber
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use skyvisor::{
    ComponentSpec, Config, Event, EventKind, Subscriber, Supervisor, WorkerError, WorkerFn,
};

struct Stats {
    failures: AtomicU64,
}

#[async_trait]
impl Subscriber for Stats {
    async fn on_event(&self, ev: &Event) {
        match ev.kind {
            EventKind::WorkerFailed | EventKind::ConnectFailed => {
                let n = self.failures.fetch_add(1, Ordering::Relaxed) + 1;
                println!(
                    "[stats] failure #{n}: component={:?} reason={:?}",
                    ev.component, ev.reason
                );
            }
            EventKind::AllStopped => println!("[stats] run complete"),
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "stats"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let stats = Arc::new(Stats {
        failures: AtomicU64::new(0),
    });
    let subscribers: Vec<Arc<dyn Subscriber>> = vec![stats.clone()];
    let sup = Supervisor::new(Config::default(), subscribers);
    let handle = sup.shutdown_handle();

    let flaky = WorkerFn::arc("flaky", |_ctx: CancellationToken| async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Err::<(), _>(WorkerError::Fail {
            reason: "frame checksum mismatch".into(),
        })
    });

    // End the demo after a second instead of waiting for Ctrl-C.
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.request();
    });

    sup.run(vec![ComponentSpec::threaded(flaky)]).await?;
    println!(
        "total failures observed: {}",
        stats.failures.load(Ordering::Relaxed)
    );
    Ok(())
}
