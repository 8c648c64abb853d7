use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use karaokebox::app::cli::Args;
use karaokebox::app::config::{AppConfig, UserConfig};
use karaokebox::app::events::AppEvent;
use karaokebox::app::{inputs, logging, App};
use karaokebox::catalog::SongRepository;
use karaokebox::media::build_backend;
use karaokebox::session::{Evaluator, Scheduler, Session};
use karaokebox::storage::LocalFs;
use karaokebox::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    if args.generate_config {
        let config = UserConfig::default();
        println!(
            "{}",
            toml::to_string_pretty(&config).context("serialising default config")?
        );
        return Ok(());
    }

    let config_dir = AppConfig::get_config_dir();
    let _log_guard = logging::configure_logging(&config_dir);

    let (config, mut state) = AppConfig::load();
    if let Some(folder) = &args.folder {
        state.karaoke_folder_path = folder.to_string_lossy().to_string();
        state.save();
    }
    info!(folder = %state.karaoke_folder_path, no_video = args.no_video, "starting");

    // Channels: UI events, timer firings, media reports
    let (tx, mut rx) = mpsc::channel(100);
    let (timer_tx, mut timer_rx) = mpsc::channel(16);
    let (media_tx, mut media_rx) = mpsc::channel(16);

    let repo = SongRepository::new(
        Arc::new(LocalFs),
        &state.karaoke_folder_path,
        &config.catalog_file,
    );
    let media = build_backend(
        args.no_video,
        &config.player_command,
        &config.player_args,
        config.headless_fallback(),
        media_tx,
    );
    let mut session = Session::new(
        repo,
        media,
        Scheduler::new(timer_tx),
        Evaluator::new(),
        config.session_config(),
    );
    session.start();

    let theme = ui::theme::load_theme(&config_dir);
    let mut app = App::new(session, config.keys.clone(), theme, state.show_help_on_start);
    app.drain_notices();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Tick Task ⚡ (toast animation, elapsed time)
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    let result = run(&mut terminal, &mut app, &mut rx, &mut timer_rx, &mut media_rx).await;

    app.session.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Help is shown on the first start only
    state.show_help_on_start = false;
    state.save();
    info!("bye");

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mut mpsc::Receiver<AppEvent>,
    timer_rx: &mut mpsc::Receiver<karaokebox::session::TimerFired>,
    media_rx: &mut mpsc::Receiver<karaokebox::media::MediaEvent>,
) -> Result<()> {
    while app.is_running {
        terminal.draw(|f| ui::ui(f, app))?;

        tokio::select! {
            Some(event) = rx.recv() => match event {
                AppEvent::Input(Event::Key(key)) => inputs::handle_event(key, app),
                AppEvent::Input(_) => {}
                AppEvent::Tick => app.on_tick(),
            },
            Some(fired) = timer_rx.recv() => {
                app.session.on_timer(fired);
                app.drain_notices();
            }
            Some(report) = media_rx.recv() => {
                app.session.on_media_event(report);
                app.drain_notices();
            }
            else => break,
        }
    }
    Ok(())
}
