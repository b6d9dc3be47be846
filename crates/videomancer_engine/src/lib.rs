//! VideoMancer engine: the timer-driven generation simulator.
mod engine;
mod simulator;
mod sink;
mod types;

pub use engine::{EngineEvents, EngineHandle};
pub use simulator::{Simulator, SimulatorSettings};
pub use sink::{ChannelProgressSink, ProgressSink};
pub use types::{EngineError, EngineEvent, SimulatorCommand};
