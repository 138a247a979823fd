//! UI rendering

mod battle_view;
mod map_view;
mod stats_view;

use crate::app::{App, BattleMenu};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Map and side panel
            Constraint::Length(3), // Status message
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_title(f, app, chunks[0]);

    let side_width = chunks[1].width.saturating_sub(map_view::width(app));
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(map_view::width(app)), Constraint::Min(side_width.min(30))])
        .split(chunks[1]);

    map_view::draw(f, app, main_chunks[0]);
    if app.in_battle() {
        battle_view::draw(f, app, main_chunks[1]);
    } else {
        stats_view::draw(f, app, main_chunks[1]);
    }

    draw_status(f, app, chunks[2]);
    draw_keybindings(f, app, chunks[3]);
}

fn draw_title(f: &mut Frame, app: &App, area: Rect) {
    let level = app.screen.stats.as_ref().map(|s| s.level).unwrap_or(1);
    let line = Line::from(vec![
        Span::styled(
            "Elemental Dungeon",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Dungeon: {}", app.session.dungeon_number()),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled("  │  ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("Level {}", level), Style::default().fg(Color::White)),
    ]);
    let title = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let style = if app.screen.game_over {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let status = Paragraph::new(app.screen.status.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Status "));
    f.render_widget(status, area);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![("F5", "Restart"), ("q", "Quit")];

    let mode_keys: Vec<(&str, &str)> = if app.screen.game_over {
        vec![]
    } else if !app.in_battle() {
        vec![("←↑↓→", "Move")]
    } else {
        match app.menu {
            BattleMenu::Spells => vec![("1-5", "Cast spell"), ("p", "Potions")],
            BattleMenu::Potions => vec![("1-9", "Throw potion"), ("Esc", "Back")],
        }
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in mode_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    if !mode_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

/// Colour for a health percentage
pub fn health_color(percent: f64) -> Color {
    if percent > 50.0 {
        Color::Green
    } else if percent > 25.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn progress_bar(percent: f64, width: u16) -> Line<'static> {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64) as usize;
    let empty = (width as usize).saturating_sub(filled);

    Line::from(Span::styled(
        format!("{}{}", "█".repeat(filled), "░".repeat(empty)),
        Style::default().fg(health_color(percent)),
    ))
}
