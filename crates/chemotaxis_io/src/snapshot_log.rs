use crate::error::{IoError, Result};
use chemotaxis_core::snapshot::{Snapshot, SnapshotSink};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

enum LogWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl LogWriter {
    fn writer(&mut self) -> &mut dyn Write {
        match self {
            LogWriter::Plain(w) => w,
            LogWriter::Gzip(w) => w,
        }
    }

    fn close(self) -> std::io::Result<()> {
        match self {
            LogWriter::Plain(mut w) => w.flush(),
            LogWriter::Gzip(w) => w.finish()?.flush(),
        }
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// JSON Lines snapshot log, one [`Snapshot`] per line. Paths ending in `.gz`
/// are gzip-compressed.
pub struct SnapshotLog {
    path: PathBuf,
    writer: Option<LogWriter>,
    written: usize,
}

impl SnapshotLog {
    /// Creates (or truncates) the log, creating parent directories as needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let file = BufWriter::new(File::create(&path)?);
        let writer = if is_gzip(&path) {
            LogWriter::Gzip(GzEncoder::new(file, Compression::default()))
        } else {
            LogWriter::Plain(file)
        };
        tracing::debug!(path = %path.display(), "Snapshot log opened");
        Ok(Self {
            path,
            writer: Some(writer),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn append(&mut self, snapshot: &Snapshot) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| IoError::validation("snapshot log already closed"))?
            .writer();
        serde_json::to_writer(&mut *writer, snapshot)?;
        writeln!(writer)?;
        self.written += 1;
        Ok(())
    }

    /// Flushes and, for gzip logs, writes the trailer. Later appends fail.
    pub fn close(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            writer.close()?;
            tracing::debug!(path = %self.path.display(), snapshots = self.written, "Snapshot log closed");
        }
        Ok(())
    }
}

impl SnapshotSink for SnapshotLog {
    fn emit(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        self.append(snapshot)
            .map_err(|e| e.with_context(format!("writing {}", self.path.display())))?;
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.close()?;
        Ok(())
    }
}

impl Drop for SnapshotLog {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to close snapshot log");
        }
    }
}

/// Reads every snapshot from a log written by [`SnapshotLog`]. Blank lines are
/// skipped; anything else that does not parse is an error.
pub fn read_snapshots<P: AsRef<Path>>(path: P) -> Result<Vec<Snapshot>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| IoError::from(e).with_context(format!("opening {}", path.display())))?;
    let source: Box<dyn Read> = if is_gzip(path) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut snapshots = Vec::new();
    for (idx, line) in BufReader::new(source).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let snapshot: Snapshot =
            serde_json::from_str(&line).map_err(|e| IoError::Malformed {
                line: idx + 1,
                message: e.to_string(),
            })?;
        if snapshot.population.len() != snapshot.shape.len()
            || snapshot.resource.len() != snapshot.shape.len()
        {
            return Err(IoError::Malformed {
                line: idx + 1,
                message: format!("field lengths do not match grid {}", snapshot.shape),
            });
        }
        snapshots.push(snapshot);
    }
    Ok(snapshots)
}
