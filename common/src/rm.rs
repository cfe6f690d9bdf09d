use anyhow::Context;

/// Error type for remove operations that preserves the operation summary
/// even on failure.
#[derive(Debug, thiserror::Error)]
#[error("{source:#}")]
pub struct Error {
    #[source]
    pub source: anyhow::Error,
    pub summary: Summary,
}

impl Error {
    #[must_use]
    pub fn new(source: anyhow::Error, summary: Summary) -> Self {
        Error { source, summary }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Summary {
    pub files_removed: usize,
    pub symlinks_removed: usize,
    pub directories_removed: usize,
}

impl std::ops::Add for Summary {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            files_removed: self.files_removed + other.files_removed,
            symlinks_removed: self.symlinks_removed + other.symlinks_removed,
            directories_removed: self.directories_removed + other.directories_removed,
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "files removed: {}\n\
            symlinks removed: {}\n\
            directories removed: {}",
            self.files_removed, self.symlinks_removed, self.directories_removed,
        )
    }
}

/// Remove `path` recursively.
///
/// Symlinks are removed as links, never followed; their targets are left
/// in place. The first error aborts the removal and propagates with the
/// partial summary attached.
pub fn rm(path: &std::path::Path) -> Result<Summary, Error> {
    tracing::debug!("remove: {:?}", path);
    let src_metadata = std::fs::symlink_metadata(path)
        .with_context(|| format!("failed reading metadata from {:?}", &path))
        .map_err(|err| Error::new(err, Summary::default()))?;
    if !src_metadata.is_dir() {
        std::fs::remove_file(path)
            .with_context(|| format!("failed removing {:?}", &path))
            .map_err(|err| Error::new(err, Summary::default()))?;
        if src_metadata.is_symlink() {
            return Ok(Summary {
                symlinks_removed: 1,
                ..Default::default()
            });
        }
        return Ok(Summary {
            files_removed: 1,
            ..Default::default()
        });
    }
    let entries = std::fs::read_dir(path)
        .with_context(|| format!("cannot open directory {path:?} for reading"))
        .map_err(|err| Error::new(err, Summary::default()))?;
    let mut rm_summary = Summary::default();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed traversing directory {:?}", &path))
            .map_err(|err| Error::new(err, rm_summary))?;
        let entry_summary =
            rm(&entry.path()).map_err(|err| Error::new(err.source, rm_summary + err.summary))?;
        rm_summary = rm_summary + entry_summary;
    }
    std::fs::remove_dir(path)
        .with_context(|| format!("failed removing directory {:?}", &path))
        .map_err(|err| Error::new(err, rm_summary))?;
    rm_summary.directories_removed += 1;
    Ok(rm_summary)
}
