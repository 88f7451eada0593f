//! Conversation transcripts
//!
//! Every bubble is appended to `<data_dir>/moodify-client/transcripts/YYYY-MM-DD.log`
//! by a dedicated writer thread, so the UI never waits on disk.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;

use chrono::Local;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// One transcript line
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub session_id: String,
    pub timestamp: String,
    pub author: String,
    pub message: String,
}

impl LogEntry {
    /// `[HH:MM:SS] (session) <Author> text`, always a single line
    fn to_line(&self) -> String {
        format!(
            "[{}] ({}) <{}> {}",
            self.timestamp,
            self.session_id,
            self.author,
            flatten_newlines(&self.message)
        )
    }
}

/// Handle to the transcript writer thread
pub struct Logger {
    tx: Sender<LogEntry>,
}

impl Logger {
    /// Create a logger writing under the default data directory
    pub fn new() -> io::Result<Self> {
        let dir = transcript_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
        Self::with_directory(dir)
    }

    /// Create a logger writing into `dir`
    pub fn with_directory(dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&dir)?;
        let (tx, rx) = unbounded::<LogEntry>();
        thread::Builder::new()
            .name("transcript-writer".into())
            .spawn(move || TranscriptWriter::new(dir).run(rx))?;
        Ok(Self { tx })
    }

    /// Queue an entry. Entries sent after the writer has stopped are dropped.
    pub fn log(&self, entry: LogEntry) {
        let _ = self.tx.send(entry);
    }
}

/// Writer-thread state: the open file for the current day
struct TranscriptWriter {
    dir: PathBuf,
    current: Option<(String, BufWriter<File>)>,
}

impl TranscriptWriter {
    fn new(dir: PathBuf) -> Self {
        Self { dir, current: None }
    }

    fn run(mut self, rx: Receiver<LogEntry>) {
        for entry in rx {
            if let Err(e) = self.write(&entry) {
                tracing::warn!(dir = %self.dir.display(), "transcript write failed: {}", e);
            }
        }
        if let Some((_, mut file)) = self.current.take() {
            let _ = file.flush();
        }
    }

    fn write(&mut self, entry: &LogEntry) -> io::Result<()> {
        let today = Local::now().format("%Y-%m-%d").to_string();
        let file = self.file_for(&today)?;
        writeln!(file, "{}", entry.to_line())?;
        // Flushed per line so a crash loses nothing
        file.flush()
    }

    /// The writer for `day`, rolling over to a new file when the date changes
    fn file_for(&mut self, day: &str) -> io::Result<&mut BufWriter<File>> {
        let stale = !matches!(&self.current, Some((open_day, _)) if open_day == day);
        if stale {
            let file = open_append(&self.dir.join(format!("{}.log", day)))?;
            self.current = Some((day.to_string(), BufWriter::new(file)));
        }
        match self.current.as_mut() {
            Some((_, file)) => Ok(file),
            None => Err(io::Error::other("transcript file not open")),
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn transcript_dir() -> Option<PathBuf> {
    let base = directories::BaseDirs::new()?;
    Some(base.data_dir().join("moodify-client").join("transcripts"))
}

fn flatten_newlines(message: &str) -> String {
    message.replace("\r\n", " / ").replace('\n', " / ")
}
