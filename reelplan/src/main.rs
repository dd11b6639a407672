//! reelplan: a terminal storyboard planner for short explainer videos.
//!
//! Entry point for the `reelplan` binary. Wires together the terminal
//! lifecycle (`tui`), the unified event bus (`event`), the storyboard producer
//! thread (`producer`), rendering (`ui`) and the interaction model in
//! `reelplan-core`.
//!
//! # Startup sequence
//!
//! 1. Parse arguments and load the config file. Both happen before terminal
//!    init so errors print normally.
//! 2. Install file logging.
//! 3. `install_panic_hook()` so a panic restores the terminal first.
//! 4. `register_sigterm()`, polled in the event loop.
//! 5. `init_tui()` enters the alternate screen and raw mode.
//! 6. Spawn the event task and the producer thread.
//!
//! `restore_tui()` runs after the event loop exits, whichever way it exits.
//! Inside the loop `?` is only used in the Render arm, and the draw error is
//! returned after the terminal is restored.

mod app;
mod config;
mod event;
mod logging;
mod platform;
mod producer;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;

use clap::Parser;

use crate::config::{Config, ProducerKind};
use crate::ui::keybindings::{self, KeyAction};

/// Plan a short video as a timeline of segments with clips and concepts.
#[derive(Debug, Parser)]
#[command(name = "reelplan", version, about)]
struct Args {
    /// Config file (defaults to $XDG_CONFIG_HOME/reelplan/config.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Load storyboards from this JSON file.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["endpoint", "demo"])]
    payload: Option<PathBuf>,

    /// Generate storyboards by POSTing the topic to this URL.
    #[arg(long, value_name = "URL", conflicts_with = "demo")]
    endpoint: Option<String>,

    /// Use the bundled sample storyboard.
    #[arg(long)]
    demo: bool,

    /// Start generating a plan for this topic immediately.
    #[arg(long, value_name = "TEXT")]
    topic: Option<String>,
}

impl Args {
    /// Command-line producer flags override the config file.
    fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.payload {
            config.producer.kind = ProducerKind::File;
            config.producer.path = Some(path.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.producer.kind = ProducerKind::Http;
            config.producer.endpoint = endpoint.clone();
        }
        if self.demo {
            config.producer.kind = ProducerKind::Demo;
        }
    }
}

fn load_config(args: &Args) -> Config {
    let path = args.config.clone().unwrap_or_else(config::config_path);
    let mut config = Config::load(&path).unwrap_or_else(|err| {
        eprintln!("reelplan: {err}; using defaults");
        Config::default()
    });
    args.apply(&mut config);
    config
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let config = load_config(&args);

    let log_path = match logging::init(&config.log) {
        Ok(path) => Some(path),
        Err(err) => {
            eprintln!("reelplan: logging disabled: {err}");
            None
        }
    };
    tracing::info!(producer = ?config.producer.kind, "reelplan starting");

    let theme = theme::Theme::from_name(&config.theme);

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    // Producer thread. It exits when `load_tx` is dropped with the state.
    let (load_tx, load_rx) = crossbeam_channel::unbounded();
    let producer = producer::worker::build_producer(&config.producer);
    let latency = Duration::from_millis(config.producer.latency_ms);
    let producer_tx = handler.tx.clone();
    std::thread::spawn(move || {
        producer::worker::producer_worker_loop(producer, latency, load_rx, producer_tx);
    });

    let mut state = app::AppState::new(
        &config.timeline,
        Box::new(platform::Osc52Clipboard::stderr()),
    );
    state.load_tx = Some(load_tx);
    state.log_path = log_path;

    if let Some(topic) = args.topic.as_deref() {
        if let Some(field) = state.plan.topic_mut() {
            field.push_str(topic);
        }
        state.generate();
    }

    let mut result = Ok(());
    'event_loop: loop {
        tokio::select! {
            // Heartbeat so SIGTERM is noticed even when no events arrive.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        state.on_render_tick();
                        if let Err(err) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            result = Err(err);
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if keybindings::handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        if keybindings::handle_mouse(mouse, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Resize(_, _)) => state.on_resize(),
                    Some(event::AppEvent::Tick) => state.on_tick(),
                    Some(event::AppEvent::Storyboard(response)) => {
                        state.apply_load_response(*response);
                    }
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tracing::info!("reelplan exiting");
    tui::restore_tui()?;
    result
}
