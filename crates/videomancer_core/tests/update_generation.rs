use chrono::{Local, TimeZone};
use pretty_assertions::assert_eq;
use videomancer_core::{
    update, AppState, Clock, Effect, FixedPicker, GenerationRequest, HistoryRecord, Msg,
    NoticeSeverity, ProgressTicker, RandomPicker, Resolver, RunId, SampleAssets, Stage, Style,
    Tick, DEFAULT_SAMPLE_VIDEOS, RECENT_PREVIEW_LIMIT,
};

fn init_logging() {
    engine_logging::initialize_for_tests();
}

struct FrozenClock;

impl Clock for FrozenClock {
    fn now(&self) -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2025, 5, 4, 6, 30, 0).unwrap()
    }
}

fn submit_scenario(state: AppState, text: &str, style: Style) -> (AppState, RunId, GenerationRequest) {
    let (state, _) = update(state, Msg::ScenarioChanged(text.to_string()));
    let (state, _) = update(state, Msg::StyleSelected(style));
    let (state, effects) = update(state, Msg::SubmitClicked);
    match effects.as_slice() {
        [Effect::StartGeneration { run_id, request }] => (state, *run_id, request.clone()),
        other => panic!("expected a start effect, got {other:?}"),
    }
}

/// Drives a run to completion the way the simulator does, recording the
/// (progress, stage label) pairs the progress panel shows along the way.
fn drive_run(
    mut state: AppState,
    run_id: RunId,
    request: &GenerationRequest,
    resolver: &mut Resolver,
) -> (AppState, Vec<(u8, &'static str)>) {
    let mut observed = Vec::new();
    let panel = |state: &AppState| {
        let view = state.view().generation.expect("generating");
        (view.progress, view.stage_label)
    };
    observed.push(panel(&state));

    let mut ticker = ProgressTicker::new();
    loop {
        match ticker.advance() {
            Tick::Advanced(snapshot) => {
                state = update(state, Msg::GenerationProgress { run_id, snapshot }).0;
                observed.push(panel(&state));
            }
            Tick::Finished(snapshot) => {
                state = update(state, Msg::GenerationProgress { run_id, snapshot }).0;
                observed.push(panel(&state));
                let record = resolver.complete(run_id, request);
                state = update(state, Msg::GenerationCompleted(record)).0;
                break;
            }
            Tick::Exhausted => unreachable!(),
        }
    }
    (state, observed)
}

fn complete_one(state: AppState, text: &str, resolver: &mut Resolver) -> AppState {
    let (state, run_id, request) = submit_scenario(state, text, Style::Clips);
    drive_run(state, run_id, &request, resolver).0
}

fn record_ids(state: &AppState) -> Vec<RunId> {
    state.history().iter().map(|r| r.id).collect()
}

#[test]
fn end_to_end_generation_produces_selected_record() {
    init_logging();
    let mut resolver = Resolver::new(SampleAssets::default(), RandomPicker::from_entropy(), FrozenClock);
    let (state, run_id, request) = submit_scenario(
        AppState::new(),
        "Attack the northern ridge at dawn with armor support",
        Style::Cinematic,
    );

    let (state, observed) = drive_run(state, run_id, &request, &mut resolver);

    let progress: Vec<u8> = observed.iter().map(|(p, _)| *p).collect();
    assert_eq!(progress, (0..=100).step_by(5).collect::<Vec<u8>>());
    let mut labels: Vec<&str> = observed.iter().map(|(_, l)| *l).collect();
    labels.dedup();
    assert_eq!(
        labels,
        vec![
            "Analyzing scenario...",
            "Generating scenes...",
            "Rendering video...",
            "Applying effects...",
            "Finalizing...",
        ]
    );

    assert!(!state.generation().is_generating());
    assert_eq!(state.history().len(), 1);
    let record = &state.history().iter().next().expect("one record").clone();
    assert_eq!(record.id, run_id);
    assert_eq!(record.style, Style::Cinematic);
    assert_eq!(record.title, "Attack the northern ridge at d...");
    assert!(DEFAULT_SAMPLE_VIDEOS.contains(&record.video_url.as_str()));
    assert_eq!(state.current_selection(), Some(record));
    assert_eq!(
        state.notice().map(|n| n.severity),
        Some(NoticeSeverity::Success)
    );

    let view = state.view();
    assert!(view.generation.is_none());
    assert!(view.submit_enabled);
    let player = view.player.expect("player shows the new record");
    assert_eq!(player.id, run_id);
    assert!(player.selected);
    assert_eq!(player.created_at, "06:30:00");
}

#[test]
fn completion_prepends_to_existing_history() {
    init_logging();
    let mut resolver = Resolver::new(SampleAssets::default(), FixedPicker(0), FrozenClock);
    let mut state = AppState::new();
    for text in ["First mission brief", "Second mission brief", "Third mission brief"] {
        state = complete_one(state, text, &mut resolver);
    }

    assert_eq!(record_ids(&state), vec![3, 2, 1]);
    assert_eq!(state.history().selected_id(), Some(3));
    let titles: Vec<_> = state.history().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Third mission brief", "Second mission brief", "First mission brief"]);
}

#[test]
fn selecting_history_updates_player() {
    init_logging();
    let mut resolver = Resolver::new(SampleAssets::default(), FixedPicker(2), FrozenClock);
    let state = complete_one(AppState::new(), "First mission brief", &mut resolver);
    let state = complete_one(state, "Second mission brief", &mut resolver);

    let (mut state, effects) = update(state, Msg::HistorySelected(1));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    let view = state.view();
    assert_eq!(view.player.as_ref().map(|p| p.id), Some(1));
    let flags: Vec<_> = view.history.iter().map(|r| (r.id, r.selected)).collect();
    assert_eq!(flags, vec![(2, false), (1, true)]);
}

#[test]
fn success_notice_is_dismissed_by_later_interaction() {
    init_logging();
    let mut resolver = Resolver::new(SampleAssets::default(), FixedPicker(0), FrozenClock);
    let state = complete_one(AppState::new(), "First mission brief", &mut resolver);
    let state = complete_one(state, "Second mission brief", &mut resolver);
    assert_eq!(
        state.notice().map(|n| n.severity),
        Some(NoticeSeverity::Success)
    );

    let (state, _) = update(state, Msg::HistorySelected(1));
    assert_eq!(state.notice(), None);
    assert!(state.view().notice.is_none());

    let state = complete_one(state, "Third mission brief", &mut resolver);
    assert!(state.notice().is_some());
    let (state, _) = update(state, Msg::SidebarToggled);
    assert_eq!(state.notice(), None);
}

#[test]
fn failed_selection_keeps_notice() {
    init_logging();
    let mut resolver = Resolver::new(SampleAssets::default(), FixedPicker(0), FrozenClock);
    let state = complete_one(AppState::new(), "Only mission brief", &mut resolver);

    let (state, _) = update(state, Msg::HistorySelected(42));
    assert_eq!(
        state.notice().map(|n| n.severity),
        Some(NoticeSeverity::Success)
    );
}

#[test]
fn selecting_unknown_id_leaves_selection_unchanged() {
    init_logging();
    let mut resolver = Resolver::new(SampleAssets::default(), FixedPicker(0), FrozenClock);
    let mut state = complete_one(AppState::new(), "Only mission brief", &mut resolver);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::HistorySelected(99));

    assert!(effects.is_empty());
    assert_eq!(state.history().selected_id(), Some(1));
    assert!(!state.consume_dirty());
    assert!(state.select(99).is_err());
}

#[test]
fn recent_grid_is_capped_but_history_is_not() {
    init_logging();
    let mut resolver = Resolver::new(SampleAssets::default(), FixedPicker(1), FrozenClock);
    let mut state = AppState::new();
    for i in 0..6 {
        state = complete_one(state, &format!("Mission number {i} brief"), &mut resolver);
    }

    let view = state.view();
    assert_eq!(view.recent.len(), RECENT_PREVIEW_LIMIT);
    assert_eq!(view.history.len(), 6);
    let recent: Vec<_> = view.recent.iter().map(|r| r.id).collect();
    assert_eq!(recent, vec![6, 5, 4, 3]);
}

#[test]
fn progress_from_stale_or_regressing_ticks_is_ignored() {
    init_logging();
    let (state, run_id, _) = submit_scenario(AppState::new(), "Recon the valley floor", Style::Clips);
    let mut ticker = ProgressTicker::new();
    let mut state = state;
    let mut snapshots = Vec::new();
    for _ in 0..4 {
        if let Tick::Advanced(snapshot) = ticker.advance() {
            snapshots.push(snapshot);
            state = update(state, Msg::GenerationProgress { run_id, snapshot }).0;
        }
    }
    assert_eq!(state.generation().progress(), 20);
    assert_eq!(state.generation().stage(), Some(Stage::GeneratingScenes));

    // Older value for the same run.
    let (state, _) = update(state, Msg::GenerationProgress { run_id, snapshot: snapshots[0] });
    assert_eq!(state.generation().progress(), 20);

    // Progress for some other run.
    let (state, _) = update(
        state,
        Msg::GenerationProgress { run_id: run_id + 7, snapshot: snapshots[3] },
    );
    assert_eq!(state.generation().run(), Some(run_id));
    assert_eq!(state.generation().progress(), 20);
}

#[test]
fn completion_after_cancel_creates_no_record() {
    init_logging();
    let mut resolver = Resolver::new(SampleAssets::default(), FixedPicker(0), FrozenClock);
    let (state, run_id, request) = submit_scenario(AppState::new(), "Recon the valley floor", Style::Clips);
    let (state, _) = update(state, Msg::CancelClicked);

    let late: HistoryRecord = resolver.complete(run_id, &request);
    let (state, _) = update(state, Msg::GenerationCompleted(late));

    assert!(state.history().is_empty());
    assert_eq!(state.history().selected_id(), None);
}

#[test]
fn rejected_start_returns_to_idle() {
    init_logging();
    let (state, run_id, _) = submit_scenario(AppState::new(), "Recon the valley floor", Style::Clips);
    let (state, effects) = update(state, Msg::GenerationRejected { run_id });

    assert!(effects.is_empty());
    assert!(!state.generation().is_generating());
    assert!(state.view().submit_enabled);
}
