//! Deterministic staged progress for a simulated generation run.
//!
//! The ticker knows nothing about time; whoever owns the timer calls
//! [`ProgressTicker::advance`] once per interval.

use std::fmt;

/// Amount added to the progress value on every tick.
pub const PROGRESS_STEP: u8 = 5;
/// Progress value that ends a run.
pub const PROGRESS_MAX: u8 = 100;

/// Named phase shown while a generation is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Analyzing,
    GeneratingScenes,
    Rendering,
    ApplyingEffects,
    Finalizing,
}

/// Checkpoints at which each stage begins, in ascending order.
pub const STAGE_CHECKPOINTS: [(u8, Stage); 5] = [
    (0, Stage::Analyzing),
    (10, Stage::GeneratingScenes),
    (40, Stage::Rendering),
    (70, Stage::ApplyingEffects),
    (90, Stage::Finalizing),
];

impl Stage {
    /// Stage active at `progress`: the last checkpoint not above it.
    pub fn for_progress(progress: u8) -> Stage {
        STAGE_CHECKPOINTS
            .iter()
            .rev()
            .find(|(checkpoint, _)| progress >= *checkpoint)
            .map(|(_, stage)| *stage)
            .unwrap_or(Stage::Analyzing)
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Analyzing => "Analyzing scenario...",
            Stage::GeneratingScenes => "Generating scenes...",
            Stage::Rendering => "Rendering video...",
            Stage::ApplyingEffects => "Applying effects...",
            Stage::Finalizing => "Finalizing...",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress value paired with the stage it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub progress: u8,
    pub stage: Stage,
}

impl ProgressSnapshot {
    fn at(progress: u8) -> Self {
        Self {
            progress,
            stage: Stage::for_progress(progress),
        }
    }
}

/// Result of a single [`ProgressTicker::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Progress moved forward and the run continues.
    Advanced(ProgressSnapshot),
    /// Progress reached [`PROGRESS_MAX`]. Reported exactly once per ticker.
    Finished(ProgressSnapshot),
    /// The run already finished; nothing changed.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTicker {
    progress: u8,
    finished: bool,
}

impl Default for ProgressTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTicker {
    pub fn new() -> Self {
        Self {
            progress: 0,
            finished: false,
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::at(self.progress)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn advance(&mut self) -> Tick {
        if self.finished {
            return Tick::Exhausted;
        }
        self.progress = self.progress.saturating_add(PROGRESS_STEP).min(PROGRESS_MAX);
        let snapshot = self.snapshot();
        if self.progress >= PROGRESS_MAX {
            self.finished = true;
            Tick::Finished(snapshot)
        } else {
            Tick::Advanced(snapshot)
        }
    }
}
