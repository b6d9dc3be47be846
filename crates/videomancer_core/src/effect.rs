use crate::{GenerationRequest, RunId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Begin simulating a run for a validated request.
    StartGeneration {
        run_id: RunId,
        request: GenerationRequest,
    },
    /// Stop the timer for a run without producing a record.
    CancelGeneration { run_id: RunId },
}
