//! Dungeon grid view

use crate::app::App;
use dungeon_core::TileView;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Terminal columns per grid cell; emoji are two wide plus a gap
const CELL_WIDTH: u16 = 3;

/// Width of the map panel including borders
pub fn width(app: &App) -> u16 {
    app.session.map().size() as u16 * CELL_WIDTH + 2
}

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = match &app.screen.grid {
        Some(grid) => grid
            .rows
            .iter()
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|cell| Span::styled(cell_text(*cell), cell_style(*cell)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect(),
        None => vec![Line::from("")],
    };

    let map = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Map "));
    f.render_widget(map, area);
}

fn cell_text(cell: TileView) -> String {
    match cell {
        // single-width glyph, padded to match the emoji
        TileView::Empty => format!(" {} ", cell.icon()),
        _ => format!("{} ", cell.icon()),
    }
}

fn cell_style(cell: TileView) -> Style {
    match cell {
        TileView::Empty => Style::default().fg(Color::DarkGray),
        TileView::Player => Style::default().fg(Color::Cyan),
        TileView::Goblin | TileView::Orc | TileView::Dragon => Style::default().fg(Color::Red),
        TileView::Key | TileView::Chest => Style::default().fg(Color::Yellow),
        TileView::Portal => Style::default().fg(Color::Magenta),
        TileView::Wall => Style::default().fg(Color::Gray),
    }
}
