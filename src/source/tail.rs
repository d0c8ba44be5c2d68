//! File-tailing source.
//!
//! Opens a log positioned at end-of-file and incrementally returns the lines
//! appended afterwards.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::LineSource;

/// Bytes read per `read_lines` call.
const CHUNK_SIZE: usize = 40960;

/// A source that tails an append-only text log.
///
/// The file is opened read-only and seeked to its current end, so only lines
/// written after construction are ever returned. Regular-file reads past the
/// current end return zero bytes immediately, so no non-blocking flag is
/// needed for the polling loop.
///
/// A missing or unopenable file is an error at construction; there is no
/// reopen logic afterwards, the handle lives as long as the source.
#[derive(Debug)]
pub struct TailSource {
    file: File,
    path: PathBuf,
    description: String,
    /// Unterminated trailing fragment from the previous read.
    residual: Vec<u8>,
}

impl TailSource {
    /// Open `path` and position the read cursor at end-of-file.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path)?;
        file.seek(SeekFrom::End(0))?;
        let description = format!("tail: {}", path.display());
        Ok(Self {
            file,
            path,
            description,
            residual: Vec::new(),
        })
    }

    /// Returns the path being tailed.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for TailSource {
    fn read_lines(&mut self) -> io::Result<Vec<String>> {
        let mut chunk = vec![0u8; CHUNK_SIZE];
        let n = self.file.read(&mut chunk)?;
        if n == 0 {
            return Ok(Vec::new());
        }
        self.residual.extend_from_slice(&chunk[..n]);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(off) = self.residual[start..].iter().position(|&b| b == b'\n') {
            let end = start + off;
            // Lines that are not valid UTF-8 count as malformed input and
            // are dropped like any other unparseable line.
            if let Ok(line) = std::str::from_utf8(&self.residual[start..end]) {
                lines.push(line.to_string());
            }
            start = end + 1;
        }
        self.residual.drain(..start);

        Ok(lines)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
