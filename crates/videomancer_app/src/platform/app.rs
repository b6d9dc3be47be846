use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context};
use clap::Parser;
use engine_logging::{engine_info, engine_warn};
use videomancer_core::{update, AppState, Msg, Style};

use super::cli::Cli;
use super::config::{self, AppConfig, FileConfig};
use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{parse_command, Command, InputError, HELP};
use super::ui::render;

/// Everything the dispatch loop reacts to, from stdin or from the engine.
pub enum AppInput {
    Msgs(Vec<Msg>),
    Show,
    Help,
    Invalid(InputError),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match cli.config.as_deref() {
        Some(path) => config::load_file_config(path),
        None => Ok(FileConfig::default()),
    };
    let destination = cli
        .log
        .or_else(|| file_config.as_ref().ok().and_then(|file| file.log))
        .unwrap_or_default();
    logging::initialize(destination);
    let file_config = file_config.unwrap_or_else(|err| {
        engine_warn!("Ignoring config file: {:#}", err);
        FileConfig::default()
    });
    let config = AppConfig::resolve(&cli, file_config);
    engine_info!(
        "VideoMancer starting: {} sample videos, seed={:?}",
        config.assets.urls().len(),
        config.seed
    );

    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let runner = EffectRunner::new(&config, input_tx.clone())?;
    let app = App::new(runner);

    match cli.scenario {
        Some(scenario) => {
            drop(input_tx);
            app.run_once(scenario, cli.style.unwrap_or_default(), &input_rx)
        }
        None => {
            spawn_stdin_reader(input_tx)?;
            app.run_interactive(&input_rx)
        }
    }
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    /// Applies `msgs` in order, runs their effects and renders once if anything changed.
    fn dispatch(&mut self, msgs: Vec<Msg>) {
        let progress_only = msgs
            .iter()
            .all(|msg| matches!(msg, Msg::GenerationProgress { .. }));
        for msg in msgs {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            self.runner.enqueue(effects);
        }

        if !self.state.consume_dirty() {
            return;
        }
        let view = self.state.view();
        match &view.generation {
            Some(generation) if progress_only => print(&render::progress_line(generation)),
            _ => print(&render::render(&view)),
        }
    }

    fn run_interactive(mut self, inputs: &mpsc::Receiver<AppInput>) -> anyhow::Result<()> {
        print(&render::render(&self.state.view()));
        print("Type `help` for commands.");

        for input in inputs.iter() {
            match input {
                AppInput::Msgs(msgs) => self.dispatch(msgs),
                AppInput::Show => print(&render::render(&self.state.view())),
                AppInput::Help => print(HELP),
                AppInput::Invalid(err) => print(&format!("[x] {err}")),
                AppInput::Quit => break,
            }
        }
        engine_info!("Shutting down");
        Ok(())
    }

    fn run_once(
        mut self,
        scenario: String,
        style: Style,
        inputs: &mpsc::Receiver<AppInput>,
    ) -> anyhow::Result<()> {
        self.dispatch(vec![
            Msg::ScenarioChanged(scenario),
            Msg::StyleSelected(style),
            Msg::SubmitClicked,
        ]);
        if !self.state.generation().is_generating() {
            let reason = self
                .state
                .notice()
                .map(|notice| notice.text.clone())
                .unwrap_or_else(|| "submission rejected".to_string());
            bail!("{reason}");
        }

        for input in inputs.iter() {
            if let AppInput::Msgs(msgs) = input {
                self.dispatch(msgs);
            }
            if !self.state.generation().is_generating() {
                break;
            }
        }

        match self.state.current_selection() {
            Some(record) => {
                print(&format!("Result #{}: {}", record.id, record.video_url));
                Ok(())
            }
            None => bail!("generation ended without a result"),
        }
    }
}

fn print(text: &str) {
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{text}");
    let _ = out.flush();
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<AppInput>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("videomancer-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                let input = match parse_command(&line) {
                    Ok(Command::Send(msgs)) => AppInput::Msgs(msgs),
                    Ok(Command::Show) => AppInput::Show,
                    Ok(Command::Help) => AppInput::Help,
                    Ok(Command::Quit) => AppInput::Quit,
                    Err(err) => AppInput::Invalid(err),
                };
                let quit = matches!(input, AppInput::Quit);
                if input_tx.send(input).is_err() || quit {
                    return;
                }
            }
            // EOF on stdin ends the session.
            let _ = input_tx.send(AppInput::Quit);
        })
        .context("failed to spawn stdin reader")?;
    Ok(())
}
