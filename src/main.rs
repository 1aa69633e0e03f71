use medicare::app::App;
use medicare::cli::{parse_args, run_cli_command};
use medicare::config::AppConfig;
use medicare::logging;
use medicare::services::Services;
use medicare::terminal::{setup_panic_hook, TerminalManager};
use medicare::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use std::time::Duration;
use tracing::info;

/// Frame interval for animations and dirty checks.
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = parse_args(std::env::args());
    let mut config = AppConfig::from_env();
    if let Some(url) = &args.api_url {
        config = config.with_api_url(url.clone());
    }
    logging::init(&config);

    let services = Services::from_config(config)?;

    // Flags run to completion without touching the terminal
    if let Some(result) = run_cli_command(&args.command, &services) {
        return result;
    }

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    info!("Starting medicare against {}", services.config.api_url);

    let mut app = App::new(services);
    let mut manager = TerminalManager::new()?;

    let result = runtime.block_on(async {
        app.start();
        run_app(manager.terminal(), &mut app).await
    });

    manager.restore();
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        let timeout = tokio::time::sleep(TICK);

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Paste(text))) => {
                        app.handle_paste(&text);
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        app.mark_dirty();
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("Terminal event error: {}", e);
                    }
                    None => {
                        app.quit();
                    }
                }
            }

            Some(msg) = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                app.handle_message(msg);
            }
        }

        if app.should_quit {
            info!("Exiting");
            return Ok(());
        }
    }
}
