use cps_dependencies::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock AssetsFileReader for testing, serving assets files from memory
#[derive(Default, Clone)]
pub struct MockAssetsFileReader {
    pub files: HashMap<PathBuf, String>,
    pub should_fail: bool,
    pub reads: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockAssetsFileReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn read_paths(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap().clone()
    }
}

impl AssetsFileReader for MockAssetsFileReader {
    fn read_assets_file(&self, path: &Path) -> Result<String> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        if self.should_fail {
            anyhow::bail!("Mock assets file read failure");
        }
        match self.files.get(path) {
            Some(content) => Ok(content.clone()),
            None => anyhow::bail!("Mock has no assets file at {}", path.display()),
        }
    }
}
