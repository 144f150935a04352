use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::Error;

const REGION_FILE_NAME: &str = "default_region.txt";

/// The one piece of state that outlives a run: the operator's default region.
#[derive(Debug, Clone)]
pub struct RegionStore {
    path: PathBuf,
}

impl RegionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/ecs-session/default_region.txt`, or the working directory
    /// when the platform has no config directory.
    pub fn default_location() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("ecs-session").join(REGION_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(REGION_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the saved region. A missing file is the normal first-run case;
    /// any other read failure is logged and treated the same way.
    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let region = contents.trim();
                (!region.is_empty()).then(|| region.to_string())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no default region file at {}", self.path.display());
                None
            }
            Err(e) => {
                warn!(
                    "Could not read default region file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Replaces the saved region. The new contents are written next to the
    /// target and renamed over it, so readers never see a partial file.
    pub fn save(&self, region: &str) -> Result<(), Error> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut file = NamedTempFile::new_in(&dir)?;
        file.write_all(region.trim().as_bytes())?;
        file.flush()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        debug!("saved default region to {}", self.path.display());
        Ok(())
    }
}
