//! Delivery of export artifacts.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::{error, info};
use tempfile::NamedTempFile;

use super::{ExportArtifact, ExportError};

/// Receives finished exports, the way a browser receives a download.
pub trait DownloadSink {
    /// Delivers one artifact.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Delivery`] if the artifact cannot be stored.
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<(), ExportError>;
}

/// Where a [`FileSink`] writes.
#[derive(Debug, Clone)]
enum Target {
    /// A directory; the artifact's own file name is used.
    Directory(PathBuf),
    /// An exact path.
    File(PathBuf),
}

/// Writes artifacts to the filesystem.
///
/// Bytes go to a temporary file next to the destination, which is then
/// renamed into place. The temporary file is removed on every failure path.
#[derive(Debug, Clone)]
pub struct FileSink {
    target: Target,
    delivered: Vec<PathBuf>,
}

impl FileSink {
    /// Saves artifacts into `dir` under their own file names.
    pub fn in_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::Directory(dir.into()),
            delivered: Vec::new(),
        }
    }

    /// Saves artifacts to exactly `path`.
    pub fn to_path(path: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::File(path.into()),
            delivered: Vec::new(),
        }
    }

    /// Paths written so far, oldest first.
    pub fn delivered(&self) -> &[PathBuf] {
        &self.delivered
    }

    fn destination(&self, artifact: &ExportArtifact) -> PathBuf {
        match &self.target {
            Target::Directory(dir) => dir.join(artifact.file_name()),
            Target::File(path) => path.clone(),
        }
    }
}

impl DownloadSink for FileSink {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<(), ExportError> {
        let path = self.destination(artifact);
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let delivery_error = |source| ExportError::Delivery {
            file_name: path.display().to_string(),
            source,
        };

        let mut file = NamedTempFile::new_in(dir).map_err(delivery_error)?;
        file.write_all(artifact.blob().bytes())
            .and_then(|()| file.flush())
            .map_err(delivery_error)?;
        if let Err(err) = file.persist(&path) {
            error!(path:? = path, err:err = err.error; "Failed to save export");
            return Err(delivery_error(err.error));
        }

        info!(
            path:? = path,
            mime = artifact.blob().mime(),
            bytes = artifact.blob().len();
            "Export saved"
        );
        self.delivered.push(path);
        Ok(())
    }
}
