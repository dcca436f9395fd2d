//! File watching for rebuilds.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Quiet period after the last change before a batch is forwarded.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Changes that require a rebuild.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// An article was created, modified or removed
    Article(PathBuf),

    /// The config file changed
    Config(PathBuf),
}

/// Which watcher reported an event.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Source {
    Articles,
    ConfigDir,
}

/// Watches article directories and the config file.
pub struct FileWatcher {
    _articles: RecommendedWatcher,
    _config: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch `paths` recursively and the directory holding `config`.
    ///
    /// Article paths that do not exist yet are skipped. The config file may be
    /// created later. Returns the watcher and a channel to receive events.
    pub fn new(
        paths: &[PathBuf],
        config: &Path,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut articles = forwarding_watcher(Source::Articles, sync_tx.clone())?;
        for path in paths {
            if path.exists() {
                articles
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        let config_dir = config
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut config_watcher = forwarding_watcher(Source::ConfigDir, sync_tx)?;
        config_watcher
            .watch(config_dir, RecursiveMode::NonRecursive)
            .map_err(std::io::Error::other)?;

        let config_name = config.file_name().map(OsStr::to_os_string);
        std::thread::spawn(move || forward(sync_rx, async_tx, config_name));

        Ok((
            Self {
                _articles: articles,
                _config: config_watcher,
            },
            async_rx,
        ))
    }
}

fn forwarding_watcher(
    source: Source,
    tx: mpsc::Sender<(Source, notify::Event)>,
) -> Result<RecommendedWatcher, std::io::Error> {
    notify::recommended_watcher(move |res: Result<notify::Event, _>| {
        if let Ok(event) = res {
            let _ = tx.send((source, event));
        }
    })
    .map_err(std::io::Error::other)
}

/// Collect events until the watchers have been quiet for `DEBOUNCE`, then
/// forward the batch without duplicates.
fn forward(
    sync_rx: mpsc::Receiver<(Source, notify::Event)>,
    async_tx: async_mpsc::Sender<WatchEvent>,
    config_name: Option<OsString>,
) {
    while let Ok(first) = sync_rx.recv() {
        let mut batch: Vec<WatchEvent> = Vec::new();
        let mut collect = |(source, event): (Source, notify::Event)| {
            for path in &event.paths {
                if let Some(e) = classify_event(path, &event.kind, source, config_name.as_deref())
                {
                    if !batch.contains(&e) {
                        batch.push(e);
                    }
                }
            }
        };

        collect(first);
        let disconnected = loop {
            match sync_rx.recv_timeout(DEBOUNCE) {
                Ok(next) => collect(next),
                Err(RecvTimeoutError::Timeout) => break false,
                Err(RecvTimeoutError::Disconnected) => break true,
            }
        };

        for e in batch {
            if async_tx.blocking_send(e).is_err() {
                return;
            }
        }

        if disconnected {
            return;
        }
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(
    path: &Path,
    kind: &notify::EventKind,
    source: Source,
    config_name: Option<&OsStr>,
) -> Option<WatchEvent> {
    use notify::EventKind;

    if !matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return None;
    }

    match source {
        Source::ConfigDir => (config_name.is_some() && path.file_name() == config_name)
            .then(|| WatchEvent::Config(path.to_path_buf())),
        Source::Articles => (path.extension().and_then(|e| e.to_str()) == Some("md"))
            .then(|| WatchEvent::Article(path.to_path_buf())),
    }
}
