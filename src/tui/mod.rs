//! Terminal front-end.

mod app;
mod input;
mod mouse;
mod ui;
mod view;

pub use app::App;
pub use input::{KeyAction, key_action};
pub use mouse::{Click, DOUBLE_CLICK_WINDOW, DRAG_HOLD, MouseClassifier};
pub use ui::{Areas, CELL_HEIGHT, CELL_WIDTH, cell_at, layout, tile_label};
pub use view::BoardView;

use crate::{AppConfig, Session};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the game in the terminal until the session ends.
pub fn run_tui(config: &AppConfig, session: Session) -> Result<()> {
    // Log to a file so output does not tear the screen
    config.ensure_data_dir()?;
    let log_file = std::fs::File::create(config.log_path())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting connect-log2 TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let delay = Duration::from_millis(*config.animation_delay_ms());
    let res = run_loop(&mut terminal, App::new(session), delay);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

#[instrument(skip_all)]
fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    delay: Duration,
) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        while app.advance_view() {
            if !delay.is_zero() {
                terminal.draw(|f| ui::draw(f, &app))?;
                std::thread::sleep(delay);
            }
        }
        terminal.draw(|f| ui::draw(f, &app))?;

        if app.is_finished() {
            info!("Session finished");
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                // Skip key release events (crossterm fires both press and release)
                Event::Key(key) if key.kind != KeyEventKind::Release => app.handle_key(key),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    let dimensions = *app.view().dimensions();
                    let board = layout(area, dimensions).board;
                    let pos = cell_at(board, dimensions, mouse.column, mouse.row);
                    let now = Instant::now();
                    let clicks = match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            app.mouse_mut().left_down(pos, now)
                        }
                        MouseEventKind::Up(MouseButton::Left) => app.mouse_mut().left_up(now),
                        MouseEventKind::Drag(MouseButton::Left) => {
                            app.mouse_mut().left_drag(pos, now)
                        }
                        MouseEventKind::Down(MouseButton::Right) => app.mouse_mut().right_down(),
                        _ => Vec::new(),
                    };
                    app.handle_clicks(clicks);
                }
                _ => {}
            }
        }

        let clicks = app.mouse_mut().tick(Instant::now());
        app.handle_clicks(clicks);
    }
}
