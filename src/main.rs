mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use pomo::app::{App, RawModeGuard};
use pomo::clock::Clock;
use pomo::config;
use pomo::display::renderer::Renderer;
use pomo::event::AppEvent;
use pomo::notify::Notifier;
use pomo::session::controller::Controller;
use pomo::session::state::Session;
use pomo::store::Store;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    install_panic_hook();
    let cli = Cli::parse();

    let home = home_dir()?;
    let mut config = config::load(&home)?;
    cli.apply(&mut config);

    let state_dir = cli
        .state_dir
        .clone()
        .unwrap_or_else(|| home.join(".pomo").join("state"));
    let store = Store::new(state_dir);
    let saved = store.load();

    let timing = config.timing();
    let session = Session::restored(
        timing,
        saved.items,
        saved.completed_work_sessions,
        saved.pending_overall_title,
    );
    let controller = Controller::with_session(timing, session);

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_terminal_reader(tx.clone());
    let clock = Clock::new(tx);
    let notifier = Notifier::new(config.sound, config.notifications);

    let _raw = RawModeGuard::acquire()?;
    let mut app = App::new(controller, clock, store, notifier, Renderer::new());
    app.run(&mut rx).await
}

/// Log to stderr, quiet by default; `RUST_LOG` overrides.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

/// Install a panic hook that restores terminal state before printing the panic.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        crossterm::terminal::disable_raw_mode().ok();
        default_hook(info);
    }));
}

/// Forward crossterm events to the app event channel.
fn spawn_terminal_reader(tx: mpsc::UnboundedSender<AppEvent>) {
    use crossterm::event::EventStream;
    use futures::StreamExt;

    tokio::spawn(async move {
        let mut stream = EventStream::new();
        while let Some(result) = stream.next().await {
            match result {
                Ok(event) => {
                    if tx.send(AppEvent::Terminal(event)).is_err() {
                        return;
                    }
                }
                Err(_) => return,
            }
        }
    });
}

fn home_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME not set; use --state-dir to specify state location"))?;
    Ok(PathBuf::from(home))
}
