//! Runner orchestration.

use std::io::BufRead;
use std::sync::Arc;

use commdash_client::{ApiClient, ConnectionMonitor};
use commdash_core::Page;
use commdash_export::CsvExporter;
use commdash_telemetry::Metrics;
use commdash_ui::{InputHandler, KeyEvent, PageRegistry, RefreshDispatcher, UiContext};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::pages::CommissionPage;
use crate::terminal::TerminalSurface;

/// One line of stdin input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A key press such as `ctrl+r` or `F5`.
    Key(KeyEvent),
    /// `goto <path>`: show another page.
    Goto(String),
    /// Dump Prometheus metrics.
    Metrics,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "quit" | "exit" => return Self::Quit,
            "metrics" => return Self::Metrics,
            _ => {}
        }
        if let Some(path) = line.strip_prefix("goto ") {
            return Self::Goto(path.trim().to_string());
        }
        match line.parse::<KeyEvent>() {
            Ok(event) => Self::Key(event),
            Err(_) => Self::Unknown(line.to_string()),
        }
    }
}

/// Send each line of `reader` to `tx` until end of input, a read error or
/// the receiver closing. Blocks; run it on a dedicated thread.
pub(crate) fn forward_lines<R: BufRead>(reader: R, tx: mpsc::Sender<String>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to read input");
                break;
            }
        };
        if tx.blocking_send(line).is_err() {
            break;
        }
    }
    debug!("Input reader finished");
}

/// The wired dashboard.
pub struct Application {
    config: AppConfig,
    surface: Arc<TerminalSurface>,
    ui: UiContext,
    client: ApiClient,
    dispatcher: RefreshDispatcher,
    input: InputHandler,
}

impl Application {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let surface = Arc::new(TerminalSurface::new(&config.page, &config.export_dir));
        let ui = UiContext::new(surface.clone(), &config.ui);
        let client = ApiClient::new(&config.client, &ui)?;
        let exporter = CsvExporter::new(&ui, &config.export);

        let registry = Arc::new(PageRegistry::new());
        for page in Page::ALL {
            registry.register(
                page,
                Arc::new(CommissionPage::new(page, client.clone(), exporter.clone())),
            );
        }

        let dispatcher = ui.dispatcher(registry);
        let input = ui.input_handler(dispatcher.clone());

        Ok(Self {
            config,
            surface,
            ui,
            client,
            dispatcher,
            input,
        })
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    pub fn surface(&self) -> &Arc<TerminalSurface> {
        &self.surface
    }

    /// Apply one command. Returns false when the runner should stop.
    pub async fn handle_command(&self, command: Command) -> bool {
        match command {
            Command::Key(event) => {
                if !self.input.handle_key(&event).await {
                    debug!(key = %event, "Not a shortcut");
                }
            }
            Command::Goto(path) => {
                self.surface.navigate(path);
                self.dispatcher.refresh_current_page().await;
            }
            Command::Metrics => match Metrics::gather_text() {
                Ok(text) => info!("\n{text}"),
                Err(e) => warn!(error = %e, "Failed to gather metrics"),
            },
            Command::Quit => return false,
            Command::Unknown(line) if line.is_empty() => {}
            Command::Unknown(line) => {
                warn!(input = %line, "Unknown command (try ctrl+r, F5, ctrl+e, ctrl+p, goto <path>, metrics, quit)")
            }
        }
        true
    }

    /// Run until ctrl-c, `quit` or end of input.
    pub async fn run(self) -> AppResult<()> {
        info!(
            page = %self.config.page,
            base_url = %self.config.client.base_url,
            "Dashboard starting"
        );

        let monitor = ConnectionMonitor::new(&self.client, &self.config.client);
        let monitor_handle = tokio::spawn(monitor.run());
        let refresh_handle = tokio::spawn(
            self.dispatcher
                .clone()
                .run_auto_refresh(self.ui.config().refresh_interval()),
        );

        let initial = self.dispatcher.clone();
        self.ui.reporter().spawn_reported("initial-load", async move {
            initial.refresh_current_page().await;
            Ok(())
        });

        // Detached: a blocking stdin read cannot be cancelled.
        let (line_tx, mut line_rx) = mpsc::channel::<String>(16);
        std::thread::Builder::new()
            .name("commdash-stdin".to_string())
            .spawn(move || forward_lines(std::io::stdin().lock(), line_tx))?;

        info!("Entering input loop");
        loop {
            tokio::select! {
                line = line_rx.recv() => {
                    let Some(line) = line else {
                        info!("Input closed");
                        break;
                    };
                    if !self.handle_command(Command::parse(&line)).await {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        info!("Shutting down");
        monitor_handle.abort();
        refresh_handle.abort();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commdash_ui::Key;

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse(" metrics "), Command::Metrics);
        assert_eq!(
            Command::parse("goto /trends"),
            Command::Goto("/trends".to_string())
        );
        assert_eq!(Command::parse("ctrl+e"), Command::Key(KeyEvent::ctrl('e')));
        assert_eq!(Command::parse("F5"), Command::Key(KeyEvent::plain(Key::F5)));
        assert_eq!(
            Command::parse("refresh please"),
            Command::Unknown("refresh please".to_string())
        );
    }

    #[test]
    fn test_forward_lines_until_end_of_input() {
        let (tx, mut rx) = mpsc::channel(16);
        let input = std::io::Cursor::new("ctrl+r\ngoto /trends\n");
        let reader = std::thread::spawn(move || forward_lines(input, tx));

        assert_eq!(rx.blocking_recv().as_deref(), Some("ctrl+r"));
        assert_eq!(rx.blocking_recv().as_deref(), Some("goto /trends"));
        assert_eq!(rx.blocking_recv(), None);
        reader.join().unwrap();
    }

    #[test]
    fn test_forward_lines_stops_when_receiver_closes() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let input = std::io::Cursor::new("a\nb\nc\n");
        let reader = std::thread::spawn(move || forward_lines(input, tx));
        reader.join().unwrap();
    }
}
