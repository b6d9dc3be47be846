use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::{AppState, Effect, Msg, Notice, NoticeSeverity};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ScenarioChanged(text) => {
            state.set_draft_text(text);
            Vec::new()
        }
        Msg::StyleSelected(style) => {
            state.set_style(style);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // The submit button is disabled while generating; a stray click is dropped.
            if let Some(run_id) = state.generation().run() {
                engine_debug!("Submit ignored, run {} still generating", run_id);
                state.set_notice(Notice::new(
                    NoticeSeverity::Warning,
                    "A generation is already in progress",
                ));
                return (state, Vec::new());
            }
            let submitted = state.draft().submit();
            match submitted {
                Ok(request) => match state.start_generation() {
                    Ok(run_id) => {
                        engine_info!(
                            "Generation {} requested style={} scenario_len={}",
                            run_id,
                            request.style(),
                            request.scenario_chars()
                        );
                        state.set_notice(Notice::new(
                            NoticeSeverity::Info,
                            format!("Generating {}...", request.style().display_name()),
                        ));
                        vec![Effect::StartGeneration { run_id, request }]
                    }
                    Err(err) => {
                        engine_warn!("{}", err);
                        Vec::new()
                    }
                },
                Err(err) => {
                    engine_debug!("Submission rejected: {}", err);
                    state.set_notice(Notice::new(NoticeSeverity::Error, err.to_string()));
                    Vec::new()
                }
            }
        }
        Msg::CancelClicked => match state.reset_generation() {
            Some(run_id) => {
                engine_info!("Generation {} cancelled by user", run_id);
                state.set_notice(Notice::new(NoticeSeverity::Info, "Generation cancelled"));
                vec![Effect::CancelGeneration { run_id }]
            }
            None => Vec::new(),
        },
        Msg::GenerationProgress { run_id, snapshot } => {
            if !state.apply_progress(run_id, snapshot) {
                engine_debug!(
                    "Dropped progress {} for run {} (active {:?})",
                    snapshot.progress,
                    run_id,
                    state.generation().run()
                );
            }
            Vec::new()
        }
        Msg::GenerationCompleted(record) => {
            if state.generation().run() == Some(record.id) {
                engine_info!(
                    "Generation {} completed: {} -> {}",
                    record.id,
                    record.title,
                    record.video_url
                );
                state.record_completion(record);
                state.set_notice(Notice::new(
                    NoticeSeverity::Success,
                    "Video generated successfully!",
                ));
            } else {
                engine_warn!("Ignoring completion for inactive run {}", record.id);
            }
            Vec::new()
        }
        Msg::GenerationCancelled { run_id } => {
            engine_debug!("Simulator confirmed cancel of run {}", run_id);
            Vec::new()
        }
        Msg::GenerationRejected { run_id } => {
            if state.generation().run() == Some(run_id) {
                state.reset_generation();
                state.set_notice(Notice::new(
                    NoticeSeverity::Warning,
                    "A generation is already in progress",
                ));
            }
            Vec::new()
        }
        Msg::HistorySelected(id) => {
            match state.select(id) {
                Ok(()) => state.clear_notice(),
                Err(err) => engine_warn!("History selection ignored: {}", err),
            }
            Vec::new()
        }
        Msg::SidebarToggled => {
            state.toggle_sidebar();
            state.clear_notice();
            Vec::new()
        }
    };

    (state, effects)
}
