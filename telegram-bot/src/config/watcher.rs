//! Watches the dotenv file and reports changes. Nothing reloads the running config; subscribers only
//! get a change counter.
//!
//! The watch sits on the parent directory and filters on the file name, so a file replaced by rename
//! (how most editors save) keeps being reported.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::watch;
use tracing::{info, warn};

use super::ConfigError;

/// Keeps a filesystem watch on the config file alive for as long as it is held.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
    changes: watch::Receiver<u64>,
}

impl ConfigWatcher {
    /// Starts watching `path`. Fails if the file does not exist or the platform watcher is unavailable.
    pub fn watch(path: &Path) -> Result<Self, ConfigError> {
        let file_name = match path.file_name() {
            Some(name) if path.is_file() => OsString::from(name),
            _ => {
                return Err(notify::Error::path_not_found()
                    .add_path(path.to_path_buf())
                    .into())
            }
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, rx) = watch::channel(0u64);
        let watched = path.to_path_buf();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                let ours = event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(file_name.as_os_str()));
                if ours {
                    info!(path = %watched.display(), "Config file changed");
                    tx.send_modify(|count| *count += 1);
                }
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Config watcher error"),
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            path: path.to_path_buf(),
            changes: rx,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Receiver whose value increments on every observed change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.clone()
    }
}
