//! Replace source files with their `.updated` counterparts.
//!
//! Every target is copied to `<target>.bak` before it is overwritten, so an
//! update can be reverted by hand.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OpsError, OpsResult};

pub const UPDATED_SUFFIX: &str = ".updated";
pub const BACKUP_SUFFIX: &str = ".bak";

/// A pending replacement of `target` by `updated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePair {
    pub updated: PathBuf,
    pub target: PathBuf,
}

impl UpdatePair {
    /// Pair for `target`, expecting `<target>.updated` next to it.
    pub fn for_target(target: impl Into<PathBuf>) -> Self {
        let target = target.into();
        Self {
            updated: with_suffix(&target, UPDATED_SUFFIX),
            target,
        }
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Copy `path` to `<path>.bak`, returning the backup path.
pub fn backup_file(path: &Path) -> OpsResult<PathBuf> {
    if !path.exists() {
        return Err(OpsError::not_found("file", path.display()));
    }
    let backup = with_suffix(path, BACKUP_SUFFIX);
    fs::copy(path, &backup).map_err(|e| OpsError::io(path, e))?;
    tracing::info!(backup = %backup.display(), "Created backup");
    Ok(backup)
}

/// Copy `updated` over `target`, backing up `target` first if it exists.
///
/// A failed backup aborts before `target` is touched.
pub fn apply_update(updated: &Path, target: &Path) -> OpsResult<()> {
    if !updated.exists() {
        return Err(OpsError::not_found("updated file", updated.display()));
    }
    if target.exists() {
        backup_file(target)?;
    }
    fs::copy(updated, target).map_err(|e| OpsError::io(target, e))?;
    tracing::info!(
        updated = %updated.display(),
        file = %target.display(),
        "Applied update"
    );
    Ok(())
}

/// Directories never searched for updates.
const SKIPPED_DIRS: [&str; 2] = ["target", ".git"];

/// Find every `*.updated` file under `root`, recursively.
///
/// Symlinked directories are not followed, so a link cycle cannot yield the
/// same file twice.
pub fn discover_updates(root: &Path) -> OpsResult<Vec<UpdatePair>> {
    let mut pairs = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| OpsError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| OpsError::io(&dir, e))?;
            let file_type = entry.file_type().map_err(|e| OpsError::io(&dir, e))?;
            let path = entry.path();
            if file_type.is_dir() {
                let skipped = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| SKIPPED_DIRS.contains(&n));
                if !skipped {
                    pending.push(path);
                }
                continue;
            }
            if file_type.is_symlink() && path.is_dir() {
                tracing::debug!(dir = %path.display(), "Not following symlinked directory");
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(stem) = name.strip_suffix(UPDATED_SUFFIX) {
                if !stem.is_empty() {
                    pairs.push(UpdatePair {
                        target: path.with_file_name(stem),
                        updated: path,
                    });
                }
            }
        }
    }

    pairs.sort_by(|a, b| a.target.cmp(&b.target));
    Ok(pairs)
}

/// Per-file results of [`apply_updates`].
#[derive(Debug, Default)]
pub struct PatchReport {
    pub applied: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, OpsError)>,
    /// Targets whose `.updated` file does not exist.
    pub skipped: Vec<PathBuf>,
}

impl PatchReport {
    /// At least one file was replaced.
    pub fn succeeded(&self) -> bool {
        !self.applied.is_empty()
    }

    pub fn summary(&self) -> String {
        if !self.succeeded() {
            return "No updates were applied.\n".to_string();
        }
        let mut out = String::from("Updates applied successfully:\n");
        for path in &self.applied {
            out.push_str(&format!("- {}\n", path.display()));
        }
        out.push_str("\nTo restore the original files, use the .bak files created during the update.\n");
        out
    }
}

/// Apply every pair whose `.updated` file exists.
///
/// Failures are recorded and do not stop the remaining pairs. A target is
/// replaced at most once, so its `.bak` always holds the original content.
pub fn apply_updates(pairs: &[UpdatePair]) -> PatchReport {
    let mut report = PatchReport::default();
    let mut seen = HashSet::new();
    for pair in pairs {
        let key = fs::canonicalize(&pair.target).unwrap_or_else(|_| pair.target.clone());
        if !seen.insert(key) {
            tracing::warn!(file = %pair.target.display(), "Duplicate update target, skipping");
            continue;
        }
        if !pair.updated.exists() {
            tracing::warn!(updated = %pair.updated.display(), "Updated file not found");
            report.skipped.push(pair.target.clone());
            continue;
        }
        match apply_update(&pair.updated, &pair.target) {
            Ok(()) => report.applied.push(pair.target.clone()),
            Err(e) => {
                tracing::error!(file = %pair.target.display(), error = %e, "Failed to apply update");
                report.failed.push((pair.target.clone(), e));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_for_target_appends_suffix() {
        let pair = UpdatePair::for_target("server/utils/email_service.py");
        assert_eq!(
            pair.updated,
            PathBuf::from("server/utils/email_service.py.updated")
        );
    }

    #[test]
    fn empty_report_is_failure() {
        let report = PatchReport::default();
        assert!(!report.succeeded());
        assert_eq!(report.summary(), "No updates were applied.\n");
    }
}
