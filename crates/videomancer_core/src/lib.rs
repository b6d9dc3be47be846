//! VideoMancer core: pure state machine, simulated progress, result resolution
//! and view-model helpers.
mod effect;
mod history;
mod msg;
mod progress;
mod resolver;
mod scenario;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use history::{History, HistoryRecord, NotFoundError, RecordId};
pub use msg::Msg;
pub use progress::{
    ProgressSnapshot, ProgressTicker, Stage, Tick, PROGRESS_MAX, PROGRESS_STEP, STAGE_CHECKPOINTS,
};
pub use resolver::{
    make_title, AssetError, AssetPicker, Clock, FixedPicker, RandomPicker, Resolver,
    SampleAssets, SystemClock, DEFAULT_SAMPLE_VIDEOS, TITLE_ELLIPSIS, TITLE_MAX_CHARS,
};
pub use scenario::{
    submit, GenerationRequest, ParseStyleError, ScenarioDraft, Style, ValidationError,
    MIN_SCENARIO_CHARS,
};
pub use state::{AppState, GenerationError, GenerationState, Notice, NoticeSeverity, RunId};
pub use update::update;
pub use view_model::{AppViewModel, GenerationView, RecordView, RECENT_PREVIEW_LIMIT};
