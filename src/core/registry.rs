//! # Component registry: ordered lifecycle orchestration.
//!
//! The registry owns the insertion-ordered component sequence and drives the
//! four lifecycle passes over it:
//!
//! ```text
//! construct_all   → registration order       (first error is fatal, no rollback)
//! start_all       → registration order       (failure at k: stop k-1..1, return Err)
//! stop_all        → reverse start order
//! destruct_all    → reverse registration order
//! ```
//!
//! Start-forward / stop-reverse mirrors a stack discipline: the last-started
//! subsystem may depend on every earlier one (the relay depends on the frame
//! buffer), so it is the first torn down.
//!
//! ## Rules
//! - Registration order is the **only** ordering; components declare no
//!   dependency metadata and the registry performs no topological sorting.
//! - The sequence is append-only and mutated only during single-threaded
//!   bootstrap, before anything starts.
//! - Registering two components with the same name is a programmer error and
//!   panics immediately.

use tokio_util::sync::CancellationToken;

use crate::components::{ComponentSpec, Runner};
use crate::core::worker::WorkerHandle;
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};

/// A component that has been started and must eventually be stopped.
enum Running {
    /// Supervised worker task.
    Worker(WorkerHandle),
    /// Custom-lifecycle component; stop goes through its own callback.
    Custom(ComponentSpec),
}

/// Insertion-ordered component sequence plus the stack of running components.
pub(crate) struct Registry {
    components: Vec<ComponentSpec>,
    running: Vec<Running>,
    bus: Bus,
}

impl Registry {
    /// Creates an empty registry publishing on `bus`.
    pub(crate) fn new(bus: Bus) -> Self {
        Self {
            components: Vec::new(),
            running: Vec::new(),
            bus,
        }
    }

    /// Appends a component to the sequence.
    ///
    /// # Panics
    /// Panics if a component with the same name is already registered —
    /// duplicate registration is a bootstrap bug, caught before anything runs.
    pub(crate) fn register(&mut self, spec: ComponentSpec) {
        assert!(
            !self.components.iter().any(|c| c.name() == spec.name()),
            "component `{}` registered twice",
            spec.name()
        );
        self.components.push(spec);
    }

    /// Number of currently running components.
    #[cfg(test)]
    pub(crate) fn running_len(&self) -> usize {
        self.running.len()
    }

    /// Runs every `construct` hook in registration order.
    ///
    /// The first failure aborts the pass and is returned as fatal; earlier
    /// components keep whatever state they built (no rollback by design —
    /// nothing has started yet and the process is about to exit).
    pub(crate) async fn construct_all(&self) -> Result<(), RuntimeError> {
        for spec in &self.components {
            spec.construct()
                .await
                .map_err(|source| RuntimeError::ConstructFailed {
                    component: spec.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Starts every component in registration order.
    ///
    /// Threaded components are spawned under a child token of
    /// `runtime_token`; custom components have their `start` awaited. On the
    /// first failure every previously started component is stopped again in
    /// reverse order, and the error reports the failing component plus the
    /// rollback count. Components after the failing one are never started.
    pub(crate) async fn start_all(
        &mut self,
        runtime_token: &CancellationToken,
    ) -> Result<(), RuntimeError> {
        for i in 0..self.components.len() {
            let spec = self.components[i].clone();
            let name = spec.name().to_string();

            self.bus
                .publish(Event::now(EventKind::ComponentStarting).with_component(name.as_str()));

            match spec.runner() {
                Runner::Threaded(worker) => {
                    let handle =
                        WorkerHandle::spawn(worker.clone(), runtime_token, self.bus.clone());
                    self.running.push(Running::Worker(handle));
                }
                Runner::Custom(lifecycle) => {
                    if let Err(source) = lifecycle.start().await {
                        self.bus.publish(
                            Event::now(EventKind::StartFailed)
                                .with_component(name.as_str())
                                .with_reason(source.to_string()),
                        );
                        let rolled_back = self.rollback(&name).await;
                        return Err(RuntimeError::StartFailed {
                            component: name,
                            rolled_back,
                            source,
                        });
                    }
                    self.running.push(Running::Custom(spec));
                }
            }

            self.bus
                .publish(Event::now(EventKind::ComponentStarted).with_component(name.as_str()));
        }
        Ok(())
    }

    /// Stops every running component in reverse start order, unconditionally.
    pub(crate) async fn stop_all(&mut self) {
        while let Some(running) = self.running.pop() {
            Self::stop_one(&self.bus, running).await;
        }
    }

    /// Runs every `destruct` hook in reverse registration order.
    ///
    /// Call only after [`stop_all`](Self::stop_all) (or a start failure where
    /// rollback already emptied the running stack).
    pub(crate) async fn destruct_all(&self) {
        for spec in self.components.iter().rev() {
            spec.destruct().await;
        }
    }

    /// Reverse-order stop of everything started before `failed`; returns the
    /// number of components stopped.
    async fn rollback(&mut self, failed: &str) -> usize {
        self.bus
            .publish(Event::now(EventKind::RollbackStarted).with_component(failed));

        let mut rolled_back = 0;
        while let Some(running) = self.running.pop() {
            Self::stop_one(&self.bus, running).await;
            rolled_back += 1;
        }
        rolled_back
    }

    async fn stop_one(bus: &Bus, running: Running) {
        match running {
            // WorkerHandle::stop publishes its own stopping/stopped pair.
            Running::Worker(handle) => handle.stop().await,
            Running::Custom(spec) => {
                let name = spec.name().to_string();
                bus.publish(
                    Event::now(EventKind::ComponentStopping).with_component(name.as_str()),
                );
                if let Runner::Custom(lifecycle) = spec.runner() {
                    lifecycle.stop().await;
                }
                bus.publish(Event::now(EventKind::ComponentStopped).with_component(name.as_str()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Component, Lifecycle};
    use crate::error::ComponentError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Shared call journal: every lifecycle callback appends "<name>.<op>".
    type Journal = Arc<Mutex<Vec<String>>>;

    /// Custom-lifecycle probe recording every callback; `start` fails when
    /// `fail_start` is set.
    struct Probe {
        name: String,
        journal: Journal,
        fail_start: bool,
    }

    impl Probe {
        fn spec(name: &str, journal: &Journal, fail_start: bool) -> ComponentSpec {
            ComponentSpec::custom(Arc::new(Self {
                name: name.to_string(),
                journal: journal.clone(),
                fail_start,
            }))
        }

        fn log(&self, op: &str) {
            self.journal
                .lock()
                .unwrap()
                .push(format!("{}.{op}", self.name));
        }
    }

    #[async_trait]
    impl Component for Probe {
        fn name(&self) -> &str {
            &self.name
        }

        async fn construct(&self) -> Result<(), ComponentError> {
            self.log("construct");
            Ok(())
        }

        async fn destruct(&self) {
            self.log("destruct");
        }
    }

    #[async_trait]
    impl Lifecycle for Probe {
        async fn start(&self) -> Result<(), ComponentError> {
            if self.fail_start {
                self.log("start-fail");
                return Err(ComponentError::Start {
                    reason: "probe refused".into(),
                });
            }
            self.log("start");
            Ok(())
        }

        async fn stop(&self) {
            self.log("stop");
        }
    }

    fn registry_with(journal: &Journal, names: &[&str]) -> Registry {
        let mut reg = Registry::new(Bus::new(256));
        for name in names {
            reg.register(Probe::spec(name, journal, false));
        }
        reg
    }

    #[tokio::test]
    async fn test_construct_in_registration_order() {
        let journal: Journal = Default::default();
        let reg = registry_with(&journal, &["a", "b", "c"]);

        reg.construct_all().await.unwrap();
        assert_eq!(
            *journal.lock().unwrap(),
            vec!["a.construct", "b.construct", "c.construct"]
        );
    }

    #[tokio::test]
    async fn test_destruct_in_reverse_registration_order() {
        let journal: Journal = Default::default();
        let reg = registry_with(&journal, &["a", "b", "c"]);

        reg.destruct_all().await;
        assert_eq!(
            *journal.lock().unwrap(),
            vec!["c.destruct", "b.destruct", "a.destruct"]
        );
    }

    #[tokio::test]
    async fn test_start_all_then_stop_all_reverse() {
        let journal: Journal = Default::default();
        let mut reg = registry_with(&journal, &["a", "b", "c"]);
        let token = CancellationToken::new();

        reg.start_all(&token).await.unwrap();
        assert_eq!(reg.running_len(), 3);

        reg.stop_all().await;
        assert_eq!(reg.running_len(), 0);
        assert_eq!(
            *journal.lock().unwrap(),
            vec!["a.start", "b.start", "c.start", "c.stop", "b.stop", "a.stop"]
        );
    }

    #[tokio::test]
    async fn test_start_failure_rolls_back_started_components() {
        let journal: Journal = Default::default();
        let mut reg = Registry::new(Bus::new(256));
        reg.register(Probe::spec("a", &journal, false));
        reg.register(Probe::spec("b", &journal, false));
        reg.register(Probe::spec("c", &journal, true)); // fails
        reg.register(Probe::spec("d", &journal, false)); // never reached

        let token = CancellationToken::new();
        let err = reg.start_all(&token).await.unwrap_err();

        match &err {
            RuntimeError::StartFailed {
                component,
                rolled_back,
                ..
            } => {
                assert_eq!(component, "c");
                assert_eq!(*rolled_back, 2);
            }
            other => panic!("expected StartFailed, got {other:?}"),
        }

        // a, b start; c fails; rollback stops b then a; c gets no stop call;
        // d is never started.
        assert_eq!(
            *journal.lock().unwrap(),
            vec!["a.start", "b.start", "c.start-fail", "b.stop", "a.stop"]
        );
        assert_eq!(reg.running_len(), 0);
    }

    #[tokio::test]
    async fn test_first_component_failing_rolls_back_nothing() {
        let journal: Journal = Default::default();
        let mut reg = Registry::new(Bus::new(256));
        reg.register(Probe::spec("a", &journal, true));
        reg.register(Probe::spec("b", &journal, false));

        let token = CancellationToken::new();
        let err = reg.start_all(&token).await.unwrap_err();
        match err {
            RuntimeError::StartFailed { rolled_back, .. } => assert_eq!(rolled_back, 0),
            other => panic!("expected StartFailed, got {other:?}"),
        }
        assert_eq!(*journal.lock().unwrap(), vec!["a.start-fail"]);
    }

    #[tokio::test]
    #[should_panic(expected = "registered twice")]
    async fn test_duplicate_registration_panics() {
        let journal: Journal = Default::default();
        let mut reg = Registry::new(Bus::new(8));
        reg.register(Probe::spec("dup", &journal, false));
        reg.register(Probe::spec("dup", &journal, false));
    }

    #[tokio::test]
    async fn test_construct_failure_is_fatal_and_ordered() {
        struct BadConfig(Journal);

        #[async_trait]
        impl Component for BadConfig {
            fn name(&self) -> &str {
                "bad"
            }
            async fn construct(&self) -> Result<(), ComponentError> {
                self.0.lock().unwrap().push("bad.construct".into());
                Err(ComponentError::Config {
                    reason: "missing serial port".into(),
                })
            }
        }

        #[async_trait]
        impl Lifecycle for BadConfig {
            async fn start(&self) -> Result<(), ComponentError> {
                Ok(())
            }
            async fn stop(&self) {}
        }

        let journal: Journal = Default::default();
        let mut reg = Registry::new(Bus::new(8));
        reg.register(Probe::spec("a", &journal, false));
        reg.register(ComponentSpec::custom(Arc::new(BadConfig(journal.clone()))));
        reg.register(Probe::spec("z", &journal, false));

        let err = reg.construct_all().await.unwrap_err();
        match err {
            RuntimeError::ConstructFailed { component, .. } => assert_eq!(component, "bad"),
            other => panic!("expected ConstructFailed, got {other:?}"),
        }
        // `z.construct` never ran.
        assert_eq!(
            *journal.lock().unwrap(),
            vec!["a.construct", "bad.construct"]
        );
    }

    #[tokio::test]
    async fn test_threaded_and_custom_mix_stops_in_reverse() {
        use crate::components::WorkerFn;
        use crate::error::WorkerError;

        let journal: Journal = Default::default();
        let mut reg = Registry::new(Bus::new(256));

        let j = journal.clone();
        let worker = WorkerFn::arc("w", move |ctx: CancellationToken| {
            let j = j.clone();
            async move {
                ctx.cancelled().await;
                j.lock().unwrap().push("w.cancelled".into());
                Err(WorkerError::Canceled)
            }
        });

        reg.register(Probe::spec("a", &journal, false));
        reg.register(ComponentSpec::threaded(worker));
        reg.register(Probe::spec("b", &journal, false));

        let token = CancellationToken::new();
        reg.start_all(&token).await.unwrap();
        tokio::task::yield_now().await;
        reg.stop_all().await;

        assert_eq!(
            *journal.lock().unwrap(),
            vec!["a.start", "b.start", "b.stop", "w.cancelled", "a.stop"]
        );
    }
}
