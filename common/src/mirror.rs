//! The tree mirror operation: full destructive replacement of a
//! destination directory with a copy of a source directory.

use anyhow::{Context, anyhow};

use crate::rm;

/// Error type for mirror operations that preserves the operation summary
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
    pub bytes_copied: u64,
    pub files_copied: usize,
    pub directories_created: usize,
    pub rm_summary: rm::Summary,
}

impl std::ops::Add for Summary {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            bytes_copied: self.bytes_copied + other.bytes_copied,
            files_copied: self.files_copied + other.files_copied,
            directories_created: self.directories_created + other.directories_created,
            rm_summary: self.rm_summary + other.rm_summary,
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "bytes copied: {}\n\
            files copied: {}\n\
            directories created: {}\n\
            {}",
            bytesize::ByteSize(self.bytes_copied),
            self.files_copied,
            self.directories_created,
            &self.rm_summary,
        )
    }
}

/// Copy the referent of `src` into a regular file at `dst`.
///
/// Symlinks are dereferenced; the destination is always a regular file
/// holding the referent's byte content.
pub fn copy_file(src: &std::path::Path, dst: &std::path::Path) -> Result<Summary, Error> {
    tracing::debug!("copy file: {:?} -> {:?}", src, dst);
    let bytes_copied = std::fs::copy(src, dst)
        .with_context(|| format!("failed copying {:?} to {:?}", &src, &dst))
        .map_err(|err| Error::new(err, Summary::default()))?;
    Ok(Summary {
        bytes_copied,
        files_copied: 1,
        ..Default::default()
    })
}

/// Mirror the directory tree at `src` into `dst`.
///
/// Any pre-existing `dst` (file, directory or symlink) is removed first;
/// no backup is kept. Symlinks in `src` are resolved, so the destination
/// holds only regular files and directories. `src` is validated before
/// `dst` is touched, and is never modified.
pub fn mirror(src: &std::path::Path, dst: &std::path::Path) -> Result<Summary, Error> {
    tracing::debug!("mirror: {:?} -> {:?}", src, dst);
    let src_metadata = std::fs::metadata(src)
        .with_context(|| format!("failed reading metadata from src: {:?}", &src))
        .map_err(|err| Error::new(err, Summary::default()))?;
    if !src_metadata.is_dir() {
        return Err(Error::new(
            anyhow!(
                "mirror: {:?} -> {:?} failed, source is not a directory",
                src,
                dst
            ),
            Summary::default(),
        ));
    }
    let rm_summary = if std::fs::symlink_metadata(dst).is_ok() {
        rm::rm(dst).map_err(|err| {
            let rm_summary = err.summary;
            Error::new(
                err.source,
                Summary {
                    rm_summary,
                    ..Default::default()
                },
            )
        })?
    } else {
        rm::Summary::default()
    };
    let mut mirror_summary = Summary {
        rm_summary,
        ..Default::default()
    };
    let entries = std::fs::read_dir(src)
        .with_context(|| format!("cannot open directory {src:?} for reading"))
        .map_err(|err| Error::new(err, mirror_summary))?;
    std::fs::create_dir(dst)
        .with_context(|| format!("cannot create directory {dst:?}"))
        .map_err(|err| Error::new(err, mirror_summary))?;
    mirror_summary.directories_created += 1;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed traversing src directory {:?}", &src))
            .map_err(|err| Error::new(err, mirror_summary))?;
        let entry_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        // link-following metadata so a symlinked directory is walked into
        let entry_metadata = std::fs::metadata(&entry_path)
            .with_context(|| format!("failed reading metadata from {:?}", &entry_path))
            .map_err(|err| Error::new(err, mirror_summary))?;
        let entry_summary = if entry_metadata.is_dir() {
            mirror(&entry_path, &dst_path)
        } else {
            copy_file(&entry_path, &dst_path)
        }
        .map_err(|err| Error::new(err.source, mirror_summary + err.summary))?;
        mirror_summary = mirror_summary + entry_summary;
    }
    Ok(mirror_summary)
}
