use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use engine_logging::{engine_debug, engine_info};
use videomancer_core::{Effect, Msg, RandomPicker, Resolver, SystemClock};
use videomancer_engine::{EngineEvent, EngineEvents, EngineHandle, SimulatorSettings};

use super::app::AppInput;
use super::config::AppConfig;

/// Executes effects emitted by `update` against the generation simulator.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, input_tx: mpsc::Sender<AppInput>) -> anyhow::Result<Self> {
        let picker = match config.seed {
            Some(seed) => RandomPicker::seeded(seed),
            None => RandomPicker::from_entropy(),
        };
        let resolver = Resolver::new(config.assets.clone(), picker, SystemClock);
        let (engine, events) = EngineHandle::new(SimulatorSettings::default(), resolver)
            .context("failed to start the generation simulator")?;
        spawn_event_loop(events, input_tx)?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartGeneration { run_id, request } => {
                    engine_info!(
                        "StartGeneration run_id={} style={} scenario_len={}",
                        run_id,
                        request.style(),
                        request.scenario_chars()
                    );
                    self.engine.start(run_id, request);
                }
                Effect::CancelGeneration { run_id } => {
                    engine_info!("CancelGeneration run_id={}", run_id);
                    self.engine.cancel(run_id);
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, input_tx: mpsc::Sender<AppInput>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("videomancer-events".to_string())
        .spawn(move || {
            while let Some(event) = events.recv() {
                if input_tx.send(AppInput::Msgs(vec![map_event(event)])).is_err() {
                    break;
                }
            }
            engine_debug!("Engine event loop finished");
        })
        .context("failed to spawn engine event thread")?;
    Ok(())
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress { run_id, snapshot } => Msg::GenerationProgress { run_id, snapshot },
        EngineEvent::Completed(record) => Msg::GenerationCompleted(record),
        EngineEvent::Cancelled { run_id } => Msg::GenerationCancelled { run_id },
        EngineEvent::StartRejected { run_id, .. } => Msg::GenerationRejected { run_id },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use videomancer_core::{ProgressTicker, Stage};

    #[test]
    fn engine_events_map_to_messages() {
        let snapshot = ProgressTicker::new().snapshot();
        assert_eq!(
            map_event(EngineEvent::Progress { run_id: 4, snapshot }),
            Msg::GenerationProgress { run_id: 4, snapshot }
        );
        assert_eq!(snapshot.stage, Stage::Analyzing);
        assert_eq!(
            map_event(EngineEvent::StartRejected { run_id: 5, active: 4 }),
            Msg::GenerationRejected { run_id: 5 }
        );
        assert_eq!(
            map_event(EngineEvent::Cancelled { run_id: 4 }),
            Msg::GenerationCancelled { run_id: 4 }
        );
    }
}
