// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Shared build lifecycle for one bundle configuration.
//!
//! A [`Compiler`] owns the configuration, runs builds through a [`Bundler`]
//! and broadcasts [`CompilerEvent`]s. The dev server's bundling and
//! hot-reload middlewares hold the same `Arc<Compiler>`, so both observe
//! the same builds.

pub mod output;
pub mod types;
pub mod webpack;

pub use self::types::{
    BuildRequest, BuildStats, Bundler, CompileState, CompilerError, CompilerEvent, CompilerResult,
};
pub use self::webpack::WebpackBundler;

use archetype::BundleConfig;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, info, warn};

const EVENT_CAPACITY: usize = 16;
const HASH_LEN: usize = 20;

/// Builds one configuration on demand and reports its lifecycle.
pub struct Compiler {
    /// What gets built
    request: BuildRequest,
    /// Where the bundler emits artifacts
    output_dir: PathBuf,
    /// Build backend
    bundler: Arc<dyn Bundler>,
    /// Current lifecycle state
    state: RwLock<CompileState>,
    /// Bumped by every invalidation
    generation: AtomicU64,
    /// Serializes builds
    build_lock: Mutex<()>,
    /// Lifecycle notifications
    events: broadcast::Sender<CompilerEvent>,
}

impl Compiler {
    /// Creates a compiler for `config`. Nothing is built until requested.
    ///
    /// Artifacts are expected in the configuration's output path, or in
    /// `./dist` when the configuration sets none.
    pub fn new(config: BundleConfig, bundler: Arc<dyn Bundler>) -> Self {
        let output_dir = config
            .output_path()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("dist"));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            request: BuildRequest { config },
            output_dir,
            bundler,
            state: RwLock::new(CompileState::Idle),
            generation: AtomicU64::new(0),
            build_lock: Mutex::new(()),
            events,
        }
    }

    /// The configuration being built.
    pub fn config(&self) -> &BundleConfig {
        &self.request.config
    }

    /// Directory artifacts are served from.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Subscribes to lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<CompilerEvent> {
        self.events.subscribe()
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> CompileState {
        self.state.read().await.clone()
    }

    /// Returns the current build, building first if there is none.
    ///
    /// Concurrent callers share a single build. A failed build is reported
    /// again until [`Compiler::invalidate`] or [`Compiler::rebuild`].
    pub async fn ensure_compiled(&self) -> CompilerResult<BuildStats> {
        if let Some(result) = self.settled().await {
            return result;
        }

        let _guard = self.build_lock.lock().await;
        // Another caller may have finished the build while we waited.
        if let Some(result) = self.settled().await {
            return result;
        }
        self.compile_locked().await
    }

    /// Marks the current build stale; the next request rebuilds.
    ///
    /// A build still running when this is called finishes, but its result
    /// is not kept as current.
    pub async fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        if !matches!(*state, CompileState::Building) {
            *state = CompileState::Idle;
        }
    }

    /// Rebuilds immediately, waiting for any in-flight build first.
    pub async fn rebuild(&self) -> CompilerResult<BuildStats> {
        let _guard = self.build_lock.lock().await;
        self.compile_locked().await
    }

    async fn settled(&self) -> Option<CompilerResult<BuildStats>> {
        match &*self.state.read().await {
            CompileState::Built(stats) => Some(Ok(stats.clone())),
            CompileState::Failed(message) => Some(Err(CompilerError::BuildFailed(message.clone()))),
            CompileState::Idle | CompileState::Building => None,
        }
    }

    /// Runs a build. Callers must hold `build_lock`.
    async fn compile_locked(&self) -> CompilerResult<BuildStats> {
        let generation = self.generation.load(Ordering::SeqCst);
        *self.state.write().await = CompileState::Building;
        let _ = self.events.send(CompilerEvent::Building);
        debug!(bundler = self.bundler.name(), "build started");

        let start = Instant::now();
        let result = match clean_output(&self.output_dir).await {
            Ok(()) => match self.bundler.run(&self.request).await {
                Ok(()) => hash_output(self.output_dir.clone()).await,
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok((hash, assets)) => {
                let stats = BuildStats {
                    hash,
                    duration_ms,
                    assets,
                };
                info!(
                    hash = %stats.hash,
                    assets = stats.assets.len(),
                    duration_ms,
                    "build finished"
                );
                self.settle(generation, CompileState::Built(stats.clone()))
                    .await;
                let _ = self.events.send(CompilerEvent::Built {
                    hash: stats.hash.clone(),
                    time: duration_ms,
                });
                Ok(stats)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "build failed");
                self.settle(generation, CompileState::Failed(message.clone()))
                    .await;
                let _ = self.events.send(CompilerEvent::Failed { message });
                Err(e)
            }
        }
    }

    /// Stores the outcome of a build started at `generation`.
    async fn settle(&self, generation: u64, outcome: CompileState) {
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) == generation {
            *state = outcome;
        } else {
            debug!("sources changed during build, result is stale");
            *state = CompileState::Idle;
        }
    }
}

/// Removes artifacts of earlier builds so only fresh output is served and hashed.
async fn clean_output(dir: &Path) -> CompilerResult<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Hashes every file under `dir`, returning the hash and the sorted file list.
async fn hash_output(dir: PathBuf) -> CompilerResult<(String, Vec<String>)> {
    tokio::task::spawn_blocking(move || hash_dir(&dir))
        .await
        .map_err(|e| CompilerError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
}

fn hash_dir(dir: &Path) -> CompilerResult<(String, Vec<String>)> {
    let mut files = Vec::new();
    if dir.exists() {
        collect_files(dir, dir, &mut files)?;
    }
    files.sort();

    let mut hasher = Sha256::new();
    for relative in &files {
        hasher.update(relative.as_bytes());
        hasher.update([0u8]);
        hasher.update(std::fs::read(dir.join(relative))?);
    }
    let digest = hasher.finalize();
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();

    Ok((hex[..HASH_LEN].to_string(), files))
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<String>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(root, &path, files)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            files.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
    Ok(())
}
