#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the scenario text.
    ScenarioChanged(String),
    /// User picked a video style.
    StyleSelected(crate::Style),
    /// User pressed Generate with the current draft.
    SubmitClicked,
    /// User aborted the running generation.
    CancelClicked,
    /// Simulator reached a new progress value for a run.
    GenerationProgress {
        run_id: crate::RunId,
        snapshot: crate::ProgressSnapshot,
    },
    /// Simulator finished a run and the resolver produced its record.
    GenerationCompleted(crate::HistoryRecord),
    /// Simulator confirmed a run was stopped.
    GenerationCancelled { run_id: crate::RunId },
    /// Simulator refused to start a run because another one is active.
    GenerationRejected { run_id: crate::RunId },
    /// User picked a past result from the recent grid or the history sidebar.
    HistorySelected(crate::RecordId),
    /// User toggled the history sidebar.
    SidebarToggled,
}
