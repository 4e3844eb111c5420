use crate::output::{OutputError, OutputResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only destination for accepted-page text
///
/// One sink instance belongs to exactly one crawl run. A write failure here
/// is the run's single fatal condition, so implementations must surface
/// errors rather than swallow them.
pub trait CorpusSink {
    /// Appends one accepted page's block to the corpus
    ///
    /// # Arguments
    ///
    /// * `url` - The page's absolute URL
    /// * `text` - The page's flattened text
    fn append_page(&mut self, url: &str, text: &str) -> OutputResult<()>;

    /// Flushes buffered output; called once when the run reaches a
    /// terminal state
    fn finish(&mut self) -> OutputResult<()>;
}

/// File-backed corpus sink
///
/// Writes blocks in the corpus format consumed by the extraction step:
///
/// ```text
/// \n\n[<absolute URL>]\n<flattened text>
/// ```
///
/// There is no trailing delimiter; the next block's leading blank lines
/// separate entries.
pub struct FileCorpusSink {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl FileCorpusSink {
    /// Creates (truncating) the corpus file at the given path
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    /// The path this sink writes to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CorpusSink for FileCorpusSink {
    fn append_page(&mut self, url: &str, text: &str) -> OutputResult<()> {
        write!(self.writer, "\n\n[{}]\n{}", url, text).map_err(OutputError::from)
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush().map_err(OutputError::from)
    }
}
