//! Output sinks for rendered tables
//!
//! Rendering never touches the filesystem. Writing the result goes through
//! the `TableSink` trait, so the same call works against a real file
//! (`FileSink`) or an in-memory buffer (`MemorySink`, used in tests).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::TableResult;

/// Whether a write extends or replaces the existing content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Append,
    Truncate,
}

/// What to write and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    pub mode: WriteMode,
    /// Write the plain-text rendering
    pub write_table: bool,
    /// Write the LaTeX `table` float
    pub write_latex: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            mode: WriteMode::Append,
            write_table: true,
            write_latex: false,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// LaTeX only
    pub fn latex() -> Self {
        Self {
            write_table: false,
            write_latex: true,
            ..Default::default()
        }
    }

    /// Text followed by LaTeX
    pub fn both() -> Self {
        Self {
            write_latex: true,
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Destination for rendered output
pub trait TableSink {
    /// Write `content`, appending to or replacing what is already there
    fn write(&mut self, content: &str, mode: WriteMode) -> TableResult<()>;
}

/// Standard filesystem sink
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSink for FileSink {
    fn write(&mut self, content: &str, mode: WriteMode) -> TableResult<()> {
        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Append => options.append(true),
            WriteMode::Truncate => options.write(true).truncate(true),
        };

        let mut file = options.open(&self.path)?;
        file.write_all(content.as_bytes())?;
        debug!(path = %self.path.display(), bytes = content.len(), ?mode, "table written");
        Ok(())
    }
}

/// In-memory sink
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    contents: String,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl TableSink for MemorySink {
    fn write(&mut self, content: &str, mode: WriteMode) -> TableResult<()> {
        if mode == WriteMode::Truncate {
            self.contents.clear();
        }
        self.contents.push_str(content);
        Ok(())
    }
}
