use crate::{HistoryRecord, Notice, RecordId, RunId, Style};

/// Number of records shown in the "Recent Generations" grid.
pub const RECENT_PREVIEW_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub draft_text: String,
    pub style: Style,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    /// Present only while a run is in flight.
    pub generation: Option<GenerationView>,
    /// Selected record shown in the player.
    pub player: Option<RecordView>,
    pub recent: Vec<RecordView>,
    pub history: Vec<RecordView>,
    pub sidebar_open: bool,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationView {
    pub run_id: RunId,
    pub progress: u8,
    pub stage_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    pub id: RecordId,
    pub title: String,
    pub style: Style,
    pub video_url: String,
    pub created_at: String,
    pub thumbnail_url: Option<String>,
    pub selected: bool,
}

impl RecordView {
    pub(crate) fn from_record(record: &HistoryRecord, selected: Option<RecordId>) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            style: record.style,
            video_url: record.video_url.clone(),
            created_at: record.created_at_display(),
            thumbnail_url: record.thumbnail_url.clone(),
            selected: selected == Some(record.id),
        }
    }
}
