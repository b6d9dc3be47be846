use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_trace, engine_warn};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use videomancer_core::{GenerationError, GenerationRequest, ProgressTicker, Resolver, RunId, Tick};

use crate::{EngineEvent, ProgressSink, SimulatorCommand};

#[derive(Debug, Clone)]
pub struct SimulatorSettings {
    /// Delay between progress ticks.
    pub tick_interval: Duration,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(500),
        }
    }
}

struct ActiveRun {
    run_id: RunId,
    request: GenerationRequest,
    ticker: ProgressTicker,
    interval: Interval,
}

/// Drives at most one simulated generation at a time.
///
/// All run state lives in this value; [`Simulator::run`] multiplexes incoming
/// commands with the tick timer on a single task.
pub struct Simulator {
    settings: SimulatorSettings,
    resolver: Resolver,
    sink: Box<dyn ProgressSink>,
    active: Option<ActiveRun>,
}

impl Simulator {
    pub fn new(
        settings: SimulatorSettings,
        resolver: Resolver,
        sink: impl ProgressSink + 'static,
    ) -> Self {
        Self {
            settings,
            resolver,
            sink: Box::new(sink),
            active: None,
        }
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.active.as_ref().map(|run| run.run_id)
    }

    /// Starts ticking `request`. Refused while another run is active.
    ///
    /// Must be called from within a tokio runtime with the time driver enabled.
    pub fn start(
        &mut self,
        run_id: RunId,
        request: GenerationRequest,
    ) -> Result<(), GenerationError> {
        if let Some(active) = self.active_run() {
            engine_warn!("Start of run {} rejected, run {} active", run_id, active);
            self.sink.emit(EngineEvent::StartRejected { run_id, active });
            return Err(GenerationError::AlreadyRunning { run_id: active });
        }

        let period = self.settings.tick_interval;
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let ticker = ProgressTicker::new();
        let snapshot = ticker.snapshot();

        engine_info!(
            "Run {} started style={} interval_ms={}",
            run_id,
            request.style(),
            period.as_millis()
        );
        self.active = Some(ActiveRun {
            run_id,
            request,
            ticker,
            interval,
        });
        self.sink.emit(EngineEvent::Progress { run_id, snapshot });
        Ok(())
    }

    /// Stops `run_id` without producing a record. Returns whether it was active.
    pub fn cancel(&mut self, run_id: RunId) -> bool {
        if self.active_run() != Some(run_id) {
            engine_debug!("Cancel for inactive run {} ignored", run_id);
            return false;
        }
        self.active = None;
        engine_info!("Run {} cancelled", run_id);
        self.sink.emit(EngineEvent::Cancelled { run_id });
        true
    }

    fn handle(&mut self, command: SimulatorCommand) {
        match command {
            SimulatorCommand::Start { run_id, request } => {
                let _ = self.start(run_id, request);
            }
            SimulatorCommand::Cancel { run_id } => {
                self.cancel(run_id);
            }
        }
    }

    fn on_tick(&mut self) {
        let Some(run_id) = self.active_run() else {
            return;
        };
        engine_logging::with_run(run_id, || self.advance_active());
    }

    fn advance_active(&mut self) {
        let Some(run) = self.active.as_mut() else {
            return;
        };
        let run_id = run.run_id;
        match run.ticker.advance() {
            Tick::Advanced(snapshot) => {
                engine_trace!("progress={} stage={:?}", snapshot.progress, snapshot.stage);
                self.sink.emit(EngineEvent::Progress { run_id, snapshot });
            }
            Tick::Finished(snapshot) => {
                self.sink.emit(EngineEvent::Progress { run_id, snapshot });
                // Taking the run drops its interval; no further ticks reach it.
                if let Some(finished) = self.active.take() {
                    let record = self.resolver.complete(finished.run_id, &finished.request);
                    engine_info!("completed -> {}", record.video_url);
                    self.sink.emit(EngineEvent::Completed(record));
                }
            }
            Tick::Exhausted => {
                self.active = None;
            }
        }
    }

    /// Processes commands and ticks until `shutdown` fires or all senders are gone.
    pub async fn run(
        mut self,
        mut commands: UnboundedReceiver<SimulatorCommand>,
        shutdown: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                _ = next_tick(&mut self.active) => self.on_tick(),
            }
        }
        engine_debug!("Simulator stopped");
    }
}

async fn next_tick(active: &mut Option<ActiveRun>) {
    match active {
        Some(run) => {
            run.interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
