use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio_util::sync::CancellationToken;
use videomancer_core::{GenerationRequest, Resolver, RunId};

use crate::sink::ChannelProgressSink;
use crate::{EngineError, EngineEvent, Simulator, SimulatorCommand, SimulatorSettings};

/// Owns the simulator thread. Dropping the handle stops the thread.
pub struct EngineHandle {
    cmd_tx: UnboundedSender<SimulatorCommand>,
    shutdown: CancellationToken,
    thread: Option<JoinHandle<()>>,
}

/// Receiving side for events emitted by the simulator thread.
pub struct EngineEvents {
    rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    /// Spawns the simulator on its own thread with a current-thread tokio runtime.
    pub fn new(
        settings: SimulatorSettings,
        resolver: Resolver,
    ) -> Result<(Self, EngineEvents), EngineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let (cmd_tx, cmd_rx) = unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();

        let simulator = Simulator::new(settings, resolver, ChannelProgressSink::new(event_tx));
        let token = shutdown.clone();
        let thread = thread::Builder::new()
            .name("videomancer-engine".to_string())
            .spawn(move || runtime.block_on(simulator.run(cmd_rx, token)))?;

        engine_info!("Simulator thread started");
        Ok((
            Self {
                cmd_tx,
                shutdown,
                thread: Some(thread),
            },
            EngineEvents { rx: event_rx },
        ))
    }

    pub fn start(&self, run_id: RunId, request: GenerationRequest) {
        self.send(SimulatorCommand::Start { run_id, request });
    }

    pub fn cancel(&self, run_id: RunId) {
        self.send(SimulatorCommand::Cancel { run_id });
    }

    fn send(&self, command: SimulatorCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Simulator thread is gone; command dropped");
        }
    }

    /// Stops the simulator and waits for its thread to exit.
    pub fn shutdown(&mut self) {
        self.shutdown.cancel();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                engine_warn!("Simulator thread panicked");
            }
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the simulator has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}
