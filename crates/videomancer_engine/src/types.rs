use std::io;

use thiserror::Error;
use videomancer_core::{GenerationRequest, HistoryRecord, ProgressSnapshot, RunId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatorCommand {
    Start {
        run_id: RunId,
        request: GenerationRequest,
    },
    Cancel {
        run_id: RunId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress {
        run_id: RunId,
        snapshot: ProgressSnapshot,
    },
    /// A run reached 100% and the resolver produced its record.
    Completed(HistoryRecord),
    Cancelled {
        run_id: RunId,
    },
    /// `run_id` was refused because `active` is still running.
    StartRejected {
        run_id: RunId,
        active: RunId,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start simulator runtime: {0}")]
    Runtime(#[from] io::Error),
}
