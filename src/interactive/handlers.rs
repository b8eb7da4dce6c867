use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::app::UserBrowser;
use super::event::{Event, EventHandler};
use super::ui;
use crate::config::Config;
use crate::error::{ErrorContext, ScrollError, ScrollResult};
use crate::logging::{log_debug, log_error, log_info};
use crate::models::UserListResponse;

pub fn run_browser(users_file: &Path, page_size: usize, config: &Config) -> ScrollResult<()> {
    log_info(&format!("Starting browser on {} (page size {})", users_file.display(), page_size));

    let source = UserListResponse::load_file(users_file)
        .with_context(|| format!("Failed to load users from {}", users_file.display()))?;
    log_debug(&format!("Loaded {} users", source.len()));

    let mut app = UserBrowser::new(source, page_size, config.observer_options()?)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    log_debug("Terminal initialized");

    let result = event_loop(&mut terminal, &mut app, config.tick_rate_ms);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.shutdown()?;
    log_info("Exiting browser");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut UserBrowser,
    tick_rate_ms: u64,
) -> ScrollResult<()> {
    let events = EventHandler::new(tick_rate_ms);
    app.sync_layout(ui::list_viewport(terminal.size()?));

    loop {
        app.tick();

        if let Err(e) = terminal.draw(|f| ui::draw(f, app)) {
            log_error(&format!("Error drawing UI: {}", e));
            return Err(ScrollError::TerminalError(e.to_string()));
        }

        match events.recv() {
            Ok(Event::Key(key_event)) => {
                log_debug(&format!("Key pressed: {:?}", key_event.code));
                app.handle_key(key_event.code);
            }
            Ok(Event::Resize(width, height)) => {
                log_debug(&format!("Resized to {}x{}", width, height));
                app.sync_layout(ui::list_viewport(terminal.size()?));
            }
            Ok(Event::Tick) => {}
            Err(e) => return Err(ScrollError::TerminalError(e.to_string())),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
