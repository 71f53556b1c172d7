//! JSON-lines writer for simulation results.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::metrics::GameMetrics;

pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl OutputWriter {
    /// Create (or truncate) `path`, making parent directories as needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(metrics)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        self.writer.flush()?;
        Ok(self.path)
    }
}
