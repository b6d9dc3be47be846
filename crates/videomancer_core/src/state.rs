use thiserror::Error;

use crate::view_model::{AppViewModel, GenerationView, RecordView, RECENT_PREVIEW_LIMIT};
use crate::{
    History, HistoryRecord, NotFoundError, ProgressSnapshot, RecordId, ScenarioDraft, Stage,
    Style,
};

/// Identifier of one simulated generation run.
pub type RunId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("generation {run_id} is already in progress")]
    AlreadyRunning { run_id: RunId },
}

/// Progress of the single in-flight generation, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationState {
    run: Option<RunId>,
    progress: u8,
    stage: Option<Stage>,
}

impl GenerationState {
    fn started(run_id: RunId) -> Self {
        Self {
            run: Some(run_id),
            progress: 0,
            stage: Some(Stage::for_progress(0)),
        }
    }

    pub fn is_generating(&self) -> bool {
        self.run.is_some()
    }

    pub fn run(&self) -> Option<RunId> {
        self.run
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Info,
    Success,
    Warning,
    Error,
}

/// One-line status message surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub text: String,
}

impl Notice {
    pub fn new(severity: NoticeSeverity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    draft: ScenarioDraft,
    generation: GenerationState,
    history: History,
    sidebar_open: bool,
    next_run_id: RunId,
    notice: Option<Notice>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            draft: ScenarioDraft::default(),
            generation: GenerationState::default(),
            history: History::new(),
            sidebar_open: true,
            next_run_id: 1,
            notice: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ScenarioDraft {
        &self.draft
    }

    pub fn generation(&self) -> &GenerationState {
        &self.generation
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        let selected = self.history.selected_id();
        let record_view = |record: &HistoryRecord| RecordView::from_record(record, selected);
        let generation = self.generation.run.map(|run_id| GenerationView {
            run_id,
            progress: self.generation.progress,
            stage_label: self.generation.stage.map(Stage::label).unwrap_or_default(),
        });

        AppViewModel {
            draft_text: self.draft.text.clone(),
            style: self.draft.style,
            submit_enabled: !self.generation.is_generating(),
            submit_label: if self.generation.is_generating() {
                "Generating..."
            } else {
                "Generate Video"
            },
            generation,
            player: self.history.current_selection().map(record_view),
            recent: self
                .history
                .recent(RECENT_PREVIEW_LIMIT)
                .map(record_view)
                .collect(),
            history: self.history.iter().map(record_view).collect(),
            sidebar_open: self.sidebar_open,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_draft_text(&mut self, text: String) {
        if self.draft.text != text {
            self.draft.text = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_style(&mut self, style: Style) {
        if self.draft.style != style {
            self.draft.style = style;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    /// Dismisses the current notice, if any.
    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Enters the Generating state and allocates a run id. Only one run may be active.
    pub fn start_generation(&mut self) -> Result<RunId, GenerationError> {
        if let Some(run_id) = self.generation.run {
            return Err(GenerationError::AlreadyRunning { run_id });
        }
        let run_id = self.next_run_id;
        self.next_run_id += 1;
        self.generation = GenerationState::started(run_id);
        self.mark_dirty();
        Ok(run_id)
    }

    /// Applies simulator progress. Stale runs and regressions are ignored.
    pub(crate) fn apply_progress(&mut self, run_id: RunId, snapshot: ProgressSnapshot) -> bool {
        if self.generation.run != Some(run_id) || snapshot.progress < self.generation.progress {
            return false;
        }
        self.generation.progress = snapshot.progress;
        self.generation.stage = Some(snapshot.stage);
        self.mark_dirty();
        true
    }

    /// Prepends `record`, selects it and returns to Idle.
    pub fn record_completion(&mut self, record: HistoryRecord) {
        self.history.record_completion(record);
        self.generation = GenerationState::default();
        self.mark_dirty();
    }

    /// Drops the active run without producing a record.
    pub(crate) fn reset_generation(&mut self) -> Option<RunId> {
        let run_id = self.generation.run;
        if run_id.is_some() {
            self.generation = GenerationState::default();
            self.mark_dirty();
        }
        run_id
    }

    pub fn select(&mut self, id: RecordId) -> Result<(), NotFoundError> {
        let before = self.history.selected_id();
        self.history.select(id)?;
        if before != Some(id) {
            self.mark_dirty();
        }
        Ok(())
    }

    pub fn current_selection(&self) -> Option<&HistoryRecord> {
        self.history.current_selection()
    }

    pub(crate) fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        self.mark_dirty();
    }
}
