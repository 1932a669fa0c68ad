//! File-system subscription for a single source file

use crate::error::{SprintError, SprintResult};
use notify::event::{AccessKind, AccessMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{trace, warn};

/// Live notification subscription
///
/// Events for the watched file are delivered on the receiver returned by
/// [`subscribe`]. Dropping the subscription stops the watcher and closes
/// that channel.
pub struct Subscription {
    _watcher: RecommendedWatcher,
    dir: PathBuf,
}

impl Subscription {
    /// Directory being watched
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Watch `dir` recursively for changes to `file_name`
///
/// Every relevant event sends one `()` on the returned channel.
pub fn subscribe(
    dir: &Path,
    file_name: &str,
) -> SprintResult<(Subscription, UnboundedReceiver<()>)> {
    let (tx, rx) = unbounded_channel();
    let watched_dir = dir.to_path_buf();
    let watched_name = file_name.to_string();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if is_relevant(&event, &watched_dir, &watched_name) {
                    trace!("Change event: {:?}", event.kind);
                    // Receiver gone means the session is ending
                    let _ = tx.send(());
                }
            }
            Err(e) => warn!("File watcher error: {}", e),
        },
        Config::default(),
    )
    .map_err(|e| SprintError::Watch {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    watcher
        .watch(dir, RecursiveMode::Recursive)
        .map_err(|e| SprintError::Watch {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok((
        Subscription {
            _watcher: watcher,
            dir: dir.to_path_buf(),
        },
        rx,
    ))
}

/// Whether an event concerns `file_name` directly inside `dir`
///
/// Plain reads are ignored: the materializer itself reads the file, and
/// reacting to that would loop forever.
pub(crate) fn is_relevant(event: &Event, dir: &Path, file_name: &str) -> bool {
    let is_read = matches!(
        event.kind,
        EventKind::Access(kind) if kind != AccessKind::Close(AccessMode::Write)
    );
    if is_read {
        return false;
    }

    event
        .paths
        .iter()
        .any(|path| path.strip_prefix(dir).is_ok_and(|rel| rel == Path::new(file_name)))
}
