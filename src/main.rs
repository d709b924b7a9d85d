use birdedge_monitor::adapters::ReqwestHttpClient;
use birdedge_monitor::app::{Action, App, AppMessage};
use birdedge_monitor::cli::Cli;
use birdedge_monitor::config::MonitorConfig;
use birdedge_monitor::device::{DeviceClient, WifiCredentials};
use birdedge_monitor::display::DisplayBoard;
use birdedge_monitor::logging::init_logging;
use birdedge_monitor::poller::spawn_status_poller;
use birdedge_monitor::terminal::{setup_panic_hook, TerminalManager};
use birdedge_monitor::traits::HttpClient;
use birdedge_monitor::ui;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// How often the screen is redrawn without any input.
const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = Cli::parse().into_config();

    color_eyre::install()?;
    init_logging(config.log_file.as_deref())?;
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config))
}

/// Spawn a device command and report its result to the UI loop.
fn spawn_device_command<F>(tx: &mpsc::UnboundedSender<AppMessage>, command: F)
where
    F: std::future::Future<Output = AppMessage> + Send + 'static,
{
    let tx = tx.clone();
    tokio::spawn(async move {
        let _ = tx.send(command.await);
    });
}

async fn run(config: MonitorConfig) -> Result<()> {
    tracing::info!("Starting BirdEdge monitor for {}", config.base_url);

    let client: Arc<dyn HttpClient> =
        Arc::new(ReqwestHttpClient::with_timeout(config.request_timeout)?);
    let board = DisplayBoard::birdedge();
    let device = DeviceClient::new(Arc::clone(&client), config.clone());

    let (message_tx, mut message_rx) = mpsc::unbounded_channel::<AppMessage>();
    let (poll_tx, mut poll_rx) = mpsc::unbounded_channel();
    let poller = spawn_status_poller(client, &config, board.clone(), poll_tx);

    let mut app = App::new(config.base_url.clone(), board);
    let mut term_manager = TerminalManager::new()?;
    let mut events = EventStream::new();
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);

    loop {
        term_manager.terminal().draw(|frame| ui::render(frame, &app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match app.handle_key(key) {
                        Action::Quit => break,
                        Action::SaveWifi => match WifiCredentials::from_board(&app.board) {
                            Ok(credentials) => {
                                app.busy = true;
                                let device = device.clone();
                                spawn_device_command(&message_tx, async move {
                                    AppMessage::WifiSaved(device.save_wifi(&credentials).await)
                                });
                            }
                            Err(e) => app.set_notice(e.to_string(), true),
                        },
                        Action::Restart => {
                            app.busy = true;
                            let device = device.clone();
                            spawn_device_command(&message_tx, async move {
                                AppMessage::Restarted(device.restart().await)
                            });
                        }
                        Action::None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = poll_rx.recv() => app.handle_message(AppMessage::Poll(event)),
            Some(message) = message_rx.recv() => app.handle_message(message),
            _ = redraw.tick() => {}
        }
    }

    poller.stop();
    term_manager.restore()?;
    tracing::info!("BirdEdge monitor exited");
    Ok(())
}
