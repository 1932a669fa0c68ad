//! Watch mode
//!
//! Runs the toolchain's own watch loop against the workspace while keeping
//! the workspace in sync with the user's source file:
//! - notify events for the source are sent over a channel
//! - bursts are coalesced (trailing edge, 200ms by default)
//! - each burst re-materializes the workspace without restoring or building
//!
//! The session ends when the external watch process exits.

mod debounce;
mod subscription;

pub use debounce::{coalesce, DEBOUNCE_MS};
pub use subscription::{subscribe, Subscription};

use crate::error::SprintResult;
use crate::project::Pipeline;
use crate::toolchain::Status;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Run a watch session for the pipeline's source file
///
/// Returns the exit status of the external watch process. Failures while
/// re-syncing are logged and the session carries on, since editors often
/// leave the file briefly missing or half-written.
pub async fn run_session(pipeline: &Pipeline, window: Duration) -> SprintResult<Status> {
    let workspace = pipeline.workspace();
    let (subscription, events) = subscribe(workspace.source_dir(), workspace.file_name())?;
    info!("Watching {}", workspace.source().display());

    let resync = coalesce(events, window, move || async move {
        match pipeline.sync().await {
            Ok(outcome) if outcome.is_regenerated() => {
                info!("Synchronized {}", pipeline.workspace().file_name())
            }
            Ok(_) => debug!("Change event without content change"),
            Err(e) => warn!("Failed to synchronize changes: {}", e),
        }
    });

    let external = async move {
        let status = pipeline.invoker().watch(workspace).await;
        debug!("Stopped watching {}", subscription.dir().display());
        drop(subscription);
        status
    };

    let (status, resyncs) = tokio::join!(external, resync);
    debug!("Watch session re-synchronized {} time(s)", resyncs);
    status
}
