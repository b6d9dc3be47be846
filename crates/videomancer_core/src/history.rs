use std::collections::VecDeque;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::Style;

/// Identifier of a completed generation; equal to the run that produced it.
pub type RecordId = u64;

/// One completed (simulated) generation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub id: RecordId,
    pub title: String,
    pub style: Style,
    pub video_url: String,
    pub created_at: DateTime<Local>,
    pub thumbnail_url: Option<String>,
}

impl HistoryRecord {
    /// Local wall-clock time the record was created, e.g. `14:03:27`.
    pub fn created_at_display(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no history record with id {id}")]
pub struct NotFoundError {
    pub id: RecordId,
}

/// Newest-first list of completed generations plus the active selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct History {
    records: VecDeque<HistoryRecord>,
    selected: Option<RecordId>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `record` and makes it the selection.
    pub fn record_completion(&mut self, record: HistoryRecord) {
        self.selected = Some(record.id);
        self.records.push_front(record);
    }

    /// Selects an existing record. The selection is left untouched on error.
    pub fn select(&mut self, id: RecordId) -> Result<(), NotFoundError> {
        if self.get(id).is_none() {
            return Err(NotFoundError { id });
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn selected_id(&self) -> Option<RecordId> {
        self.selected
    }

    pub fn current_selection(&self) -> Option<&HistoryRecord> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: RecordId) -> Option<&HistoryRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// The `n` newest records, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter().take(n)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
