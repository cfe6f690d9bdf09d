//! Clear a vendored directory ahead of a refresh, keeping a configured
//! set of entries in place.

use anyhow::Context;

use crate::filter;
use crate::rm;

/// Error type for clear operations that preserves the operation summary
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
    pub entries_kept: usize,
    pub rm_summary: rm::Summary,
}

impl std::ops::Add for Summary {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            entries_kept: self.entries_kept + other.entries_kept,
            rm_summary: self.rm_summary + other.rm_summary,
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "entries kept: {}\n\
            {}",
            self.entries_kept, &self.rm_summary,
        )
    }
}

/// Remove every entry of `dir` whose name is not accepted by `keep`.
///
/// The directory itself stays in place; kept entries are counted, the rest
/// are removed recursively.
pub fn clear(dir: &std::path::Path, keep: &filter::KeepSet) -> Result<Summary, Error> {
    tracing::debug!("clear: {:?}", dir);
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("cannot open directory {dir:?} for reading"))
        .map_err(|err| Error::new(err, Summary::default()))?;
    let mut clear_summary = Summary::default();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed traversing directory {:?}", &dir))
            .map_err(|err| Error::new(err, clear_summary))?;
        let file_name = entry.file_name();
        if keep.is_kept(&file_name.to_string_lossy()) {
            tracing::debug!("keeping: {:?}", entry.path());
            clear_summary.entries_kept += 1;
            continue;
        }
        let rm_summary = rm::rm(&entry.path()).map_err(|err| {
            Error::new(
                err.source,
                clear_summary
                    + Summary {
                        rm_summary: err.summary,
                        ..Default::default()
                    },
            )
        })?;
        clear_summary.rm_summary = clear_summary.rm_summary + rm_summary;
    }
    Ok(clear_summary)
}
