//! Text sources the readers scrape.
//!
//! A [`SourceLocation`] names where a report comes from: an external utility
//! or a file holding its captured output. A [`SourceOpener`] turns a location
//! into a [`SourceStream`] that yields the report line by line. Each reader
//! owns its stream for the duration of one scan; dropping the stream closes
//! the file or terminates and reaps the child process, whichever exit path the
//! reader took.
//!
//! Reports are read as raw bytes and decoded lossily, one line at a time, so a
//! stray non-UTF-8 byte only garbles the line it sits on.

use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use std::process::Stdio;

use memcmp_core::error::{CompareError, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::debug;

// ── SourceLocation ────────────────────────────────────────────────────────────

/// Where a textual report is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceLocation {
    /// Run `program` with `args` and read its standard output.
    Command { program: String, args: Vec<String> },
    /// Read a previously captured report from disk.
    File(PathBuf),
}

impl SourceLocation {
    /// Convenience constructor for [`SourceLocation::Command`].
    pub fn command(program: &str, args: &[&str]) -> Self {
        SourceLocation::Command {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Command { program, args } if args.is_empty() => write!(f, "{}", program),
            SourceLocation::Command { program, args } => write!(f, "{} {}", program, args.join(" ")),
            SourceLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ── SourceStream ──────────────────────────────────────────────────────────────

/// Line-oriented view over an opened source.
///
/// When the stream wraps a child process, the child was spawned with
/// `kill_on_drop`, so dropping the stream before end-of-output terminates it.
pub struct SourceStream {
    label: String,
    reader: Box<dyn AsyncBufRead + Unpin + Send>,
    buf: Vec<u8>,
    child: Option<Child>,
}

impl SourceStream {
    /// Wrap any buffered reader, e.g. an in-memory fixture.
    pub fn from_reader<R>(label: impl Into<String>, reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        Self {
            label: label.into(),
            reader: Box::new(reader),
            buf: Vec::new(),
            child: None,
        }
    }

    /// Take ownership of a spawned child and read its piped stdout.
    fn from_child(label: String, mut child: Child) -> Result<Self> {
        let stdout = child.stdout.take().ok_or_else(|| CompareError::SourceUnavailable {
            command: label.clone(),
            source: std::io::Error::other("child stdout was not captured"),
        })?;
        let mut stream = Self::from_reader(label, BufReader::new(stdout));
        stream.child = Some(child);
        Ok(stream)
    }

    /// Next line without its `\n` or `\r\n` terminator, or `None` at end of
    /// output. Invalid UTF-8 is replaced with U+FFFD rather than rejected.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .await
            .map_err(|source| CompareError::SourceRead {
                source_name: self.label.clone(),
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }

    /// Hand each line to `visit` until it returns `true` or the output ends.
    pub async fn scan<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&str) -> bool,
    {
        while let Some(line) = self.next_line().await? {
            if visit(&line) {
                break;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SourceStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceStream")
            .field("label", &self.label)
            .field("child", &self.child.as_ref().and_then(|c| c.id()))
            .finish()
    }
}

// ── SourceOpener ──────────────────────────────────────────────────────────────

/// Capability for opening a [`SourceLocation`].
///
/// Kept behind a trait so the readers can be driven by in-memory fixtures.
#[allow(async_fn_in_trait)]
pub trait SourceOpener {
    /// Open `location` for line-by-line reading.
    async fn open(&self, location: &SourceLocation) -> Result<SourceStream>;
}

/// Opens sources on the local host: spawns utilities, opens files.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSources;

impl SourceOpener for SystemSources {
    async fn open(&self, location: &SourceLocation) -> Result<SourceStream> {
        let label = location.to_string();
        match location {
            SourceLocation::Command { program, args } => {
                let child = Command::new(program)
                    .args(args)
                    .stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .kill_on_drop(true)
                    .spawn()
                    .map_err(|source| CompareError::SourceUnavailable {
                        command: label.clone(),
                        source,
                    })?;
                debug!(command = %label, pid = ?child.id(), "spawned source command");
                SourceStream::from_child(label, child)
            }
            SourceLocation::File(path) => {
                let file = tokio::fs::File::open(path).await.map_err(|source| {
                    CompareError::SourceUnavailable {
                        command: label.clone(),
                        source,
                    }
                })?;
                debug!(path = %label, "opened captured report");
                Ok(SourceStream::from_reader(label, BufReader::new(file)))
            }
        }
    }
}

/// Serves fixed report bytes per location; unknown locations are unavailable.
#[derive(Debug, Default, Clone)]
pub struct MemorySources {
    reports: HashMap<SourceLocation, Vec<u8>>,
}

impl MemorySources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `text` as the full output of `location`.
    pub fn with(mut self, location: SourceLocation, text: impl Into<Vec<u8>>) -> Self {
        self.reports.insert(location, text.into());
        self
    }
}

impl SourceOpener for MemorySources {
    async fn open(&self, location: &SourceLocation) -> Result<SourceStream> {
        let text = self
            .reports
            .get(location)
            .ok_or_else(|| CompareError::SourceUnavailable {
                command: location.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })?;
        Ok(SourceStream::from_reader(
            location.to_string(),
            Cursor::new(text.clone()),
        ))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    async fn collect(mut stream: SourceStream) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = stream.next_line().await.unwrap() {
            lines.push(line);
        }
        lines
    }

    // ── SourceLocation ────────────────────────────────────────────────────────

    #[test]
    fn test_location_display() {
        assert_eq!(SourceLocation::command("lgrpinfo", &["-a"]).to_string(), "lgrpinfo -a");
        assert_eq!(SourceLocation::command("prtconf", &[]).to_string(), "prtconf");
        assert_eq!(
            SourceLocation::File(PathBuf::from("/tmp/report.txt")).to_string(),
            "/tmp/report.txt"
        );
    }

    // ── MemorySources ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_memory_sources_yields_lines() {
        let location = SourceLocation::command("prtconf", &["-v"]);
        let sources = MemorySources::new().with(location.clone(), "first\nsecond\n");

        let stream = sources.open(&location).await.unwrap();
        assert_eq!(format!("{:?}", stream), "SourceStream { label: \"prtconf -v\", child: None }");
        assert_eq!(collect(stream).await, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_stream_decodes_invalid_utf8_lossily() {
        let location = SourceLocation::command("prtconf", &["-v"]);
        let sources = MemorySources::new().with(location.clone(), &b"Soci\xe9t\xe9\r\nnext\nlast"[..]);

        let stream = sources.open(&location).await.unwrap();
        assert_eq!(collect(stream).await, vec!["Soci\u{FFFD}t\u{FFFD}", "next", "last"]);
    }

    #[tokio::test]
    async fn test_stream_scan_stops_when_visitor_is_done() {
        let location = SourceLocation::command("lgrpinfo", &["-a"]);
        let sources = MemorySources::new().with(location.clone(), "a\nb\nc\n");

        let mut stream = sources.open(&location).await.unwrap();
        let mut seen = Vec::new();
        stream
            .scan(|line| {
                seen.push(line.to_string());
                line == "b"
            })
            .await
            .unwrap();
        assert_eq!(seen, vec!["a", "b"]);
        assert_eq!(stream.next_line().await.unwrap().as_deref(), Some("c"));
    }

    #[tokio::test]
    async fn test_memory_sources_unknown_location_is_unavailable() {
        let sources = MemorySources::new();
        let err = sources
            .open(&SourceLocation::command("lgrpinfo", &["-a"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CompareError::SourceUnavailable { .. }));
    }

    // ── SystemSources ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_system_sources_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Memory size: 16384 Megabytes").unwrap();
        writeln!(file, "System Peripherals (Software Nodes):").unwrap();

        let location = SourceLocation::File(file.path().to_path_buf());
        let stream = SystemSources.open(&location).await.unwrap();
        let lines = collect(stream).await;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Memory size: 16384 Megabytes");
    }

    #[tokio::test]
    async fn test_system_sources_missing_file_is_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        let location = SourceLocation::File(dir.path().join("absent.txt"));
        let err = SystemSources.open(&location).await.unwrap_err();
        assert!(matches!(err, CompareError::SourceUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_system_sources_missing_program_is_unavailable() {
        let location = SourceLocation::command("memcmp-no-such-utility", &["-a"]);
        let err = SystemSources.open(&location).await.unwrap_err();
        assert!(err.to_string().contains("memcmp-no-such-utility -a"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_sources_reads_command_output() {
        let location = SourceLocation::command("sh", &["-c", "echo one; echo two"]);
        let stream = SystemSources.open(&location).await.unwrap();
        assert_eq!(collect(stream).await, vec!["one", "two"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_sources_early_drop_terminates_child() {
        let location = SourceLocation::command("sh", &["-c", "echo ready; sleep 30"]);
        let mut stream = SystemSources.open(&location).await.unwrap();
        assert_eq!(stream.next_line().await.unwrap().as_deref(), Some("ready"));
        // Dropping mid-output must not block on the sleeping child.
        drop(stream);
    }
}
