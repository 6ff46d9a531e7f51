use crate::ports::outbound::OutputPresenter;
use crate::shared::error::DependencyError;
use crate::shared::Result;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// AtomicFileWriter adapter for `--output`
///
/// The rendered document goes to a hidden sibling file first and is then
/// renamed over the destination, so readers of the output path only ever
/// see the previous document or the complete new one.
pub struct AtomicFileWriter {
    output_path: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn write_error(&self, details: impl Into<String>) -> DependencyError {
        DependencyError::FileWriteError {
            path: self.output_path.clone(),
            details: details.into(),
        }
    }

    /// `<dir>/.<name>.<pid>.tmp` next to the destination; renames only stay
    /// atomic within one filesystem.
    fn staging_path(&self) -> Result<PathBuf> {
        let file_name = self
            .output_path
            .file_name()
            .ok_or_else(|| self.write_error("Output path has no file name"))?;
        let mut staged = OsString::from(".");
        staged.push(file_name);
        staged.push(format!(".{}.tmp", std::process::id()));
        Ok(self.output_path.with_file_name(staged))
    }

    fn check_destination(&self) -> Result<()> {
        let parent = self
            .output_path
            .parent()
            .filter(|p| *p != Path::new(""))
            .unwrap_or_else(|| Path::new("."));
        if !parent.is_dir() {
            return Err(self
                .write_error(format!(
                    "Parent directory does not exist: {}",
                    parent.display()
                ))
                .into());
        }

        match fs::symlink_metadata(&self.output_path) {
            Ok(metadata) if metadata.is_symlink() => Err(self
                .write_error("Output path is a symbolic link; refusing to replace it")
                .into()),
            Ok(metadata) if metadata.is_dir() => {
                Err(self.write_error("Output path is a directory").into())
            }
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self
                .write_error(format!("Failed to read file metadata: {}", e))
                .into()),
        }
    }

    fn stage(&self, staging: &Path, content: &str) -> io::Result<()> {
        let mut file = File::create(staging)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()
    }
}

impl OutputPresenter for AtomicFileWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.check_destination()?;
        let staging = self.staging_path()?;

        let committed = self
            .stage(&staging, content)
            .and_then(|()| fs::rename(&staging, &self.output_path));
        if let Err(e) = committed {
            // Best effort; the staging file may never have been created.
            let _ = fs::remove_file(&staging);
            return Err(self.write_error(e.to_string()).into());
        }

        tracing::debug!(path = %self.output_path.display(), bytes = content.len(), "wrote output");
        Ok(())
    }
}

/// StdoutPresenter adapter for writing the rendered document to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}
