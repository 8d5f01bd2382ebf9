//! # OS shutdown signals.
//!
//! [`wait_for_shutdown_signal`] completes when the process receives a
//! termination signal: `SIGINT` (Ctrl-C), `SIGTERM` (init systems) or
//! `SIGQUIT` on unix, Ctrl-C elsewhere.

/// Waits until any termination signal is delivered.
///
/// Each call installs its own listeners. A signal whose listener cannot be
/// registered is simply never observed; the remaining signals still work,
/// and so does the explicit `ShutdownHandle` path.
#[cfg(unix)]
pub(crate) async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    async fn wait(kind: SignalKind) {
        match signal(kind) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    }

    tokio::select! {
        _ = wait(SignalKind::interrupt()) => {}
        _ = wait(SignalKind::terminate()) => {}
        _ = wait(SignalKind::quit()) => {}
    }
}

/// Waits until any termination signal is delivered.
///
/// Non-unix platforms only observe Ctrl-C.
#[cfg(not(unix))]
pub(crate) async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
