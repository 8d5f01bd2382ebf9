//! # Component abstractions and registration specs.
//!
//! A *component* is a registered subsystem with optional one-shot
//! `construct`/`destruct` hooks and one of two runtime shapes:
//!
//! - a **threaded** component provides a long-running [`Worker`] body that the
//!   runtime promotes into a supervised, cancellable task;
//! - a **custom** component implements [`Lifecycle`] and manages its own
//!   start/stop (e.g. a one-shot FPGA programmer that owns no task at all).
//!
//! The shape is encoded in the [`Runner`] enum carried by a
//! [`ComponentSpec`], the unit handed to the registry.
//!
//! ## Contents
//! - [`Component`] - base trait with optional construct/destruct
//! - [`Worker`], [`WorkerRef`] - cancellable long-running body
//! - [`Lifecycle`], [`LifecycleRef`] - self-managed start/stop pair
//! - [`WorkerFn`] - closure-backed worker
//! - [`ComponentSpec`], [`Runner`] - registration unit

mod component;
mod lifecycle;
mod spec;
mod worker;
mod worker_fn;

pub use component::Component;
pub use lifecycle::{Lifecycle, LifecycleRef};
pub use spec::{ComponentSpec, Runner};
pub use worker::{Worker, WorkerRef};
pub use worker_fn::WorkerFn;
