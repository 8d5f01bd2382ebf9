//! # Example: embedded receiver daemon
//!
//! A miniature receiver pipeline:
//! - a custom-lifecycle hardware component that "programs" the receiver
//!   during startup and powers it down on shutdown;
//! - a relay worker that keeps a TCP feed connection alive through the
//!   reconnect loop and honors cancellation at every suspension point.
//!
//! Run it with nothing listening on `127.0.0.1:30005` to watch the retry
//! cadence in the log output, then stop it with Ctrl-C.
//!
//! ```bash
//! cargo run --example receiver
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use skyvisor::{
    connect_forever, Component, ComponentError, ComponentSpec, Config, Connector, Lifecycle,
    LogWriter, RetryPolicy, Subscriber, Supervisor, WorkerError, WorkerFn,
};

/// Pretend hardware programmer: owns no task, only a start/stop pair.
struct HardwareProgrammer;

#[async_trait]
impl Component for HardwareProgrammer {
    fn name(&self) -> &str {
        "hw"
    }

    async fn construct(&self) -> Result<(), ComponentError> {
        println!("[hw] checking firmware image");
        Ok(())
    }
}

#[async_trait]
impl Lifecycle for HardwareProgrammer {
    async fn start(&self) -> Result<(), ComponentError> {
        println!("[hw] programming receiver");
        Ok(())
    }

    async fn stop(&self) {
        println!("[hw] powering receiver down");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cfg = Config {
        retry: RetryPolicy::new(Duration::from_secs(2)),
        ..Config::default()
    };

    let subscribers: Vec<Arc<dyn Subscriber>> = vec![Arc::new(LogWriter)];
    let sup = Supervisor::new(cfg.clone(), subscribers);
    let bus = sup.bus();
    let retry = cfg.retry;

    let relay = WorkerFn::arc("relay", move |ctx: CancellationToken| {
        let bus = bus.clone();
        async move {
            let connector = Connector::new("relay", bus.clone());
            loop {
                let stream = connect_forever("relay", &ctx, retry, &bus, || {
                    let c = connector.clone();
                    async move { c.connect("127.0.0.1", 30005).await }
                })
                .await?;

                // A real worker enters its frame read loop here; this one
                // just holds the connection for a moment and reconnects.
                drop(stream);
                tokio::select! {
                    _ = ctx.cancelled() => return Err(WorkerError::Canceled),
                    _ = tokio::time::sleep(Duration::from_secs(5)) => {}
                }
            }
        }
    });

    let specs = vec![
        ComponentSpec::custom(Arc::new(HardwareProgrammer)),
        ComponentSpec::threaded(relay),
    ];

    println!("receiver daemon up; press Ctrl-C to stop");
    sup.run(specs).await?;
    Ok(())
}
