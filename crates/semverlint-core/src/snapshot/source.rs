use crate::diff::{diff, ApiChanges};
use crate::errors::{Result, SemverLintError};
use crate::model::Api;
use crate::version::{order_versions, Version};
use crate::{log_op_end, log_op_error, log_op_start};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Produces the exported API of a project at a given version.
pub trait ApiSource {
    /// # Errors
    ///
    /// `Introspection` when the project at `version` cannot be loaded.
    fn api_for(&self, version: &Version) -> Result<Api>;
}

/// Read a JSON-encoded [`Api`] from `path`, normalized.
///
/// # Errors
///
/// - `SnapshotRead`: the file cannot be read
/// - `Serialization`: the content is not a valid snapshot
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Api> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| SemverLintError::SnapshotRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let mut api: Api = serde_json::from_slice(&bytes)?;
    api.normalize();
    tracing::debug!(
        path = %path.display(),
        pkg_count = api.packages.len(),
        "snapshot loaded"
    );
    Ok(api)
}

/// Write `api` to `path` as pretty-printed JSON.
///
/// # Errors
///
/// `SnapshotWrite` when the file cannot be created or written.
pub fn write_snapshot(path: impl AsRef<Path>, api: &Api) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(api)?;
    std::fs::write(path, json).map_err(|e| SemverLintError::SnapshotWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// An [`ApiSource`] backed by a directory holding `<version>.json` files.
#[derive(Debug, Clone)]
pub struct SnapshotDir {
    root: PathBuf,
}

impl SnapshotDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, version: &Version) -> PathBuf {
        self.root.join(format!("{}.json", version.name))
    }

    /// Versions with a snapshot in this directory, in canonical order.
    ///
    /// Files whose stem is neither `HEAD` nor a semantic version are
    /// ignored. A snapshot has no commit of its own, so the file stem
    /// stands in for it.
    pub fn versions(&self) -> Result<Vec<Version>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| SemverLintError::SnapshotRead {
            path: self.root.display().to_string(),
            message: e.to_string(),
        })?;

        let mut found = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| SemverLintError::SnapshotRead {
                    path: self.root.display().to_string(),
                    message: e.to_string(),
                })?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                found.push(Version::new(stem, stem));
            }
        }
        Ok(order_versions(found))
    }
}

impl ApiSource for SnapshotDir {
    fn api_for(&self, version: &Version) -> Result<Api> {
        load_snapshot(self.path_for(version)).map_err(|e| SemverLintError::Introspection {
            version: version.name.clone(),
            message: e.to_string(),
        })
    }
}

/// Obtain both versions' APIs from `source` and diff them.
///
/// # Errors
///
/// Propagates the source's error for whichever version failed first
/// (`prev` is loaded before `current`).
pub fn compare<S: ApiSource + ?Sized>(
    source: &S,
    prev: &Version,
    current: &Version,
) -> Result<ApiChanges> {
    let start = Instant::now();
    log_op_start!("compare", prev = %prev.name, current = %current.name);

    let loaded = source
        .api_for(prev)
        .and_then(|p| source.api_for(current).map(|c| (p, c)));
    let duration_ms = start.elapsed().as_millis() as u64;

    match loaded {
        Ok((prev_api, current_api)) => {
            let changes = diff(&prev_api, &current_api);
            log_op_end!(
                "compare",
                duration_ms = start.elapsed().as_millis() as u64,
                breaking = changes.is_breaking()
            );
            Ok(changes)
        }
        Err(err) => {
            log_op_error!("compare", err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}
