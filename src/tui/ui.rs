//! Stateless rendering of the board, status pane and score table.

use super::app::App;
use super::view::BoardView;
use connect_log2_engine::{GridDimensions, TilePos};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

/// Width of one board cell in terminal columns.
pub const CELL_WIDTH: u16 = 7;
/// Height of one board cell in terminal rows.
pub const CELL_HEIGHT: u16 = 3;

const PALETTE: [Color; 8] = [
    Color::Blue,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::LightRed,
    Color::LightBlue,
    Color::LightGreen,
];

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    /// Title line.
    pub title: Rect,
    /// Board, borders included.
    pub board: Rect,
    /// Score and message pane.
    pub status: Rect,
    /// Key help line.
    pub help: Rect,
}

/// Splits the terminal area for a board of `dimensions`.
pub fn layout(area: Rect, dimensions: GridDimensions) -> Areas {
    let board_width = dimensions.columns() as u16 * CELL_WIDTH + 2;
    let board_height = dimensions.rows() as u16 * CELL_HEIGHT + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Title
            Constraint::Min(board_height),    // Board
            Constraint::Length(4),            // Status
            Constraint::Length(1),            // Help
        ])
        .split(area);

    Areas {
        title: chunks[0],
        board: center_rect(chunks[1], board_width, board_height),
        status: chunks[2],
        help: chunks[3],
    }
}

/// Cell under terminal coordinates `(column, row)`, if any.
pub fn cell_at(board: Rect, dimensions: GridDimensions, column: u16, row: u16) -> Option<TilePos> {
    let inner_x = column.checked_sub(board.x + 1)?;
    let inner_y = row.checked_sub(board.y + 1)?;
    let pos = TilePos::new(
        i32::from(inner_x / CELL_WIDTH),
        i32::from(inner_y / CELL_HEIGHT),
    );
    dimensions.contains(pos).then_some(pos)
}

/// Text shown on a tile: the real value while it fits, the exponent after.
pub fn tile_label(number: u8) -> String {
    if number <= 16 {
        (1u32 << number).to_string()
    } else {
        format!("2^{}", number)
    }
}

/// Draws one frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let view = app.view();
    let areas = layout(frame.area(), *view.dimensions());

    let title = Paragraph::new("connect-log2")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, areas.title);

    if app.showing_scores() {
        draw_scores(frame, areas.board.union(areas.status), app);
    } else {
        draw_board(frame, areas.board, view);
        draw_status(frame, areas.status, app);
    }

    let help_text = if app.showing_scores() && *app.session().finished() {
        "Any key: exit"
    } else if app.showing_scores() {
        "Any key: back"
    } else {
        "Arrows/WASD: move | Space: mark | Enter: merge | Esc: clear | ^S: scores | ^N: new | ^Q: quit"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, areas.help);
}

fn draw_board(frame: &mut Frame, area: Rect, view: &BoardView) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let dimensions = *view.dimensions();
    for y in 0..dimensions.rows() {
        for x in 0..dimensions.columns() {
            let cell = Rect::new(
                inner.x + x as u16 * CELL_WIDTH,
                inner.y + y as u16 * CELL_HEIGHT,
                CELL_WIDTH,
                CELL_HEIGHT,
            )
            .intersection(inner);
            draw_cell(frame, cell, view, TilePos::new(x, y));
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, view: &BoardView, pos: TilePos) {
    let Some(number) = view.number_at(pos) else {
        return;
    };

    let color = PALETTE[usize::from(number) % PALETTE.len()];
    let mut style = Style::default().fg(Color::Black).bg(color);
    if view.is_marked(pos) {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    let border_style = if *view.highlight() == Some(pos) {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(tile_label(number), style)))
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(paragraph, area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.view();
    let score_line = format!(
        "Score: {}   Highest: {}   New tiles: {}..{}",
        view.points(),
        tile_label(*view.highest()),
        tile_label(view.range().low()),
        tile_label(view.range().high() - 1),
    );

    let (message, color) = match (app.session().prompt(), app.chain_text()) {
        (Some(prompt), _) => (prompt.to_string(), Color::Yellow),
        (None, Some(chain)) => (chain, Color::Green),
        (None, None) => (app.message().clone().unwrap_or_default(), Color::Gray),
    };

    let text = vec![
        Line::from(score_line),
        Line::from(Span::styled(message, Style::default().fg(color))),
    ];
    let status = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn draw_scores(frame: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(vec![
        Cell::from("#").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Score").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Tile").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("User").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Time (UTC)").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .style(Style::default().fg(Color::Yellow));

    let latest = app.session().last_score().as_ref();
    let rows: Vec<Row> = app
        .session()
        .hiscores()
        .scores()
        .iter()
        .enumerate()
        .map(|(i, score)| {
            let style = if Some(score) == latest {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::LightBlue)
            };
            Row::new(vec![
                Cell::from(format!("{:2}", i + 1)),
                Cell::from(score.points().to_string()),
                Cell::from(tile_label(*score.tile())),
                Cell::from(score.user().as_str()),
                Cell::from(score.datetime().as_str()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Percentage(25),
        Constraint::Length(8),
        Constraint::Percentage(20),
        Constraint::Length(20),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title("High scores (top 10)"),
    );
    frame.render_widget(table, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
