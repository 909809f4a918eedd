// In crates/journal/src/journal.rs

use crate::event::{ConfirmationRecorded, DecisionRecorded, DraftRecorded, JournalEvent, Rejected};
use crate::types::JournalEntry;
use crate::{Error, Result};
use chrono::Utc;
use core_types::{ExecutionDecision, ExposureState, IdGenerator, RandomIdGenerator, TradeIntent};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An append-only audit log of risk decisions and order lifecycle events.
///
/// Entries accumulate in memory and only reach disk when [`Journal::flush_to_file`]
/// is called, so the caller decides when the I/O happens. A single lock covers
/// both appends and the whole flush: a flush never observes a half-written
/// buffer, and concurrent recorders simply wait for it.
pub struct Journal {
    log_dir: PathBuf,
    ids: Arc<dyn IdGenerator>,
    buffer: Mutex<Vec<JournalEntry>>,
}

impl Journal {
    /// Creates a journal writing under `log_dir`, with random entry ids.
    ///
    /// The directory is not touched until the first non-empty flush.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self::with_id_generator(log_dir, Arc::new(RandomIdGenerator::new()))
    }

    pub fn with_id_generator(log_dir: impl Into<PathBuf>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            log_dir: log_dir.into(),
            ids,
            buffer: Mutex::new(Vec::new()),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Appends an entry of any event type and returns a copy of it.
    ///
    /// `data` is an object by type; `metadata` is free-form.
    ///
    /// This is the entry point for caller-defined event types; the lifecycle
    /// events have their own typed `record_*` methods.
    pub fn record(
        &self,
        event_type: impl Into<String>,
        data: Map<String, Value>,
        metadata: Option<Value>,
    ) -> JournalEntry {
        let entry = JournalEntry {
            id: self.ids.next_id(),
            timestamp: Utc::now(),
            event_type: event_type.into(),
            data,
            metadata,
        };
        self.buffer.lock().push(entry.clone());
        entry
    }

    pub fn record_event(&self, event: &JournalEvent) -> JournalEntry {
        self.record(event.event_type(), event.to_data(), None)
    }

    pub fn record_decision(
        &self,
        decision: &ExecutionDecision,
        intent: Option<&TradeIntent>,
        exposure: Option<&ExposureState>,
    ) -> JournalEntry {
        self.record_event(&JournalEvent::Decision(DecisionRecorded {
            decision: decision.clone(),
            intent: intent.cloned(),
            exposure: exposure.cloned(),
        }))
    }

    pub fn record_draft(&self, draft: DraftRecorded) -> JournalEntry {
        self.record_event(&JournalEvent::DraftOrder(draft))
    }

    pub fn record_confirmation(&self, confirmation: ConfirmationRecorded) -> JournalEntry {
        self.record_event(&JournalEvent::Confirmation(confirmation))
    }

    pub fn record_rejection(&self, reason: impl Into<String>, details: Option<Value>) -> JournalEntry {
        self.record_event(&JournalEvent::Rejection(Rejected {
            reason: reason.into(),
            details,
        }))
    }

    /// Number of recorded entries not yet flushed.
    pub fn pending_count(&self) -> usize {
        self.buffer.lock().len()
    }

    /// A copy of the buffered, unflushed entries in recording order.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.buffer.lock().clone()
    }

    /// Appends every buffered entry to `<log_dir>/<filename>` as one JSON object
    /// per line, then empties the buffer.
    ///
    /// Without a `filename` the file is named `journal_YYYYMMDD_HHMMSS.jsonl`
    /// (UTC). The log directory is created if needed and existing file content
    /// is never truncated. If a write fails partway, the file is cut back to its
    /// previous length so a retry does not land after half a line. A file whose
    /// last line was torn by a crash gets a newline first, keeping new entries
    /// on lines of their own.
    ///
    /// # Returns
    ///
    /// * `Ok(None)`: the buffer was empty; no file was touched.
    /// * `Ok(Some(path))`: the file the entries were appended to.
    /// * `Err(_)`: nothing was cleared; every entry is still buffered.
    pub fn flush_to_file(&self, filename: Option<&str>) -> Result<Option<PathBuf>> {
        let mut buffer = self.buffer.lock();
        if buffer.is_empty() {
            return Ok(None);
        }

        // Encode everything up front so a serialization failure writes nothing.
        let mut payload = String::new();
        for entry in buffer.iter() {
            payload.push_str(&serde_json::to_string(entry)?);
            payload.push('\n');
        }

        let path = self.log_dir.join(filename.map_or_else(default_file_name, str::to_string));

        if let Err(e) = append_to_file(&self.log_dir, &path, payload.as_bytes()) {
            tracing::error!(error = %e, path = %path.display(), pending = buffer.len(), "Journal flush failed; entries kept in buffer.");
            return Err(e);
        }

        tracing::info!(path = %path.display(), entries = buffer.len(), "Journal flushed.");
        buffer.clear();
        Ok(Some(path))
    }
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal")
            .field("log_dir", &self.log_dir)
            .field("pending", &self.pending_count())
            .finish()
    }
}

fn default_file_name() -> String {
    format!("journal_{}.jsonl", Utc::now().format("%Y%m%d_%H%M%S"))
}

fn append_to_file(dir: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    fs::create_dir_all(dir)?;
    let mut file = OpenOptions::new().create(true).read(true).append(true).open(path)?;
    let original_len = file.metadata()?.len();

    let mut payload = Vec::with_capacity(bytes.len() + 1);
    if original_len > 0 && !ends_with_newline(&mut file, original_len)? {
        payload.push(b'\n');
    }
    payload.extend_from_slice(bytes);

    if let Err(e) = file.write_all(&payload).and_then(|()| file.sync_data()) {
        if let Err(truncate_err) = file.set_len(original_len) {
            tracing::warn!(error = %truncate_err, path = %path.display(), "Could not roll back partial journal write.");
        }
        return Err(e.into());
    }
    Ok(())
}

fn ends_with_newline(file: &mut File, len: u64) -> io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Reads a journal file written by [`Journal::flush_to_file`].
///
/// Blank lines are skipped; any other line that does not parse is an error
/// naming its 1-based line number.
pub fn read_entries(path: impl AsRef<Path>) -> Result<Vec<JournalEntry>> {
    let file = fs::File::open(path)?;
    let mut entries = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = serde_json::from_str(&line).map_err(|source| Error::Parse {
            line: index + 1,
            source,
        })?;
        entries.push(entry);
    }
    Ok(entries)
}
