//! Supervises daemon launch sequencing and runtime orchestration.

use std::sync::Arc;

use tracing::info;

use crate::StructuredHealthReporter;
use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::health::HealthReporter;

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Collaborators required to launch the daemon runtime.
pub struct LaunchPlan<L, S> {
    /// Source of the resolved configuration.
    pub loader: L,
    /// Sink for lifecycle events.
    pub reporter: Arc<dyn HealthReporter>,
    /// Blocks until the daemon should stop.
    pub shutdown: S,
}

/// Runs the daemon using the production collaborators.
///
/// # Errors
///
/// Returns an error if bootstrap fails, the listener cannot start or stop,
/// or signal handlers cannot be installed.
pub fn run_daemon() -> Result<(), LaunchError> {
    let shutdown = SystemShutdownSignal::install()?;
    run_daemon_with(LaunchPlan {
        loader: SystemConfigLoader,
        reporter: Arc::new(StructuredHealthReporter::new()),
        shutdown,
    })
}

/// Runs the daemon with injected collaborators.
///
/// The message store is created during bootstrap, before the listener
/// accepts its first connection. Sessions still running at shutdown are
/// ended by process exit.
///
/// # Errors
///
/// See [`run_daemon`].
pub fn run_daemon_with<L, S>(plan: LaunchPlan<L, S>) -> Result<(), LaunchError>
where
    L: ConfigLoader,
    S: ShutdownSignal,
{
    let LaunchPlan {
        loader,
        reporter,
        shutdown,
    } = plan;

    info!(target: PROCESS_TARGET, "starting collector runtime");
    let daemon = bootstrap_with(&loader, reporter)?;
    let listener = daemon.start_listener()?;
    shutdown.wait()?;
    daemon.report_shutdown();
    listener.shutdown();
    let open_sessions = listener.open_sessions();
    listener.join()?;
    info!(
        target: PROCESS_TARGET,
        messages = daemon.store().len(),
        open_sessions,
        "shutdown sequence completed"
    );
    Ok(())
}
