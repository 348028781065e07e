//! Line-oriented input source
//!
//! Candidates arrive one per line from a file. The source is lazy — lines are
//! read as the queue accepts them, so a large input file never has to fit in
//! memory — and finite; it is not restartable within one run.

use crate::error::Result;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

/// Lazy line reader producing one candidate per non-blank line
#[derive(Debug)]
pub struct LineSource {
    lines: Lines<BufReader<File>>,
}

impl LineSource {
    /// Open a file as a candidate source
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Io`] if the file cannot be opened.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path).await?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }

    /// Take the next candidate, or `None` at end of input
    ///
    /// Blank lines are skipped; surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Io`] if reading fails mid-file.
    pub async fn next(&mut self) -> Result<Option<String>> {
        while let Some(line) = self.lines.next_line().await? {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
        Ok(None)
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn yields_lines_in_order() {
        let file = temp_file("http://example.com/a\nhttp://example.com/b\n");
        let mut source = LineSource::open(file.path()).await.unwrap();

        assert_eq!(
            source.next().await.unwrap().as_deref(),
            Some("http://example.com/a")
        );
        assert_eq!(
            source.next().await.unwrap().as_deref(),
            Some("http://example.com/b")
        );
        assert_eq!(source.next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn skips_blank_lines_and_trims_whitespace() {
        let file = temp_file("\n  http://example.com/a  \n\n\nexample.com\n");
        let mut source = LineSource::open(file.path()).await.unwrap();

        assert_eq!(
            source.next().await.unwrap().as_deref(),
            Some("http://example.com/a")
        );
        assert_eq!(source.next().await.unwrap().as_deref(), Some("example.com"));
        assert_eq!(source.next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_file_yields_nothing() {
        let file = temp_file("");
        let mut source = LineSource::open(file.path()).await.unwrap();
        assert_eq!(source.next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = LineSource::open("/nonexistent/input.txt").await.unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
