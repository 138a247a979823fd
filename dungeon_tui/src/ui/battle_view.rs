//! Battle view

use super::stats_view::effect_badges;
use crate::app::{App, BattleMenu};
use dungeon_core::CastSide;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Health bars
            Constraint::Length(3), // Cast animation
            Constraint::Min(0),    // Battle log
            Constraint::Length(4), // Options
        ])
        .split(area);

    draw_combatants(f, app, chunks[0]);
    draw_cast(f, app, chunks[1]);
    draw_log(f, app, chunks[2]);
    draw_options(f, app, chunks[3]);
}

fn draw_combatants(f: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let player_name = app
        .screen
        .stats
        .as_ref()
        .map(|s| s.name.clone())
        .unwrap_or_default();
    let enemy_name = app.screen.enemy_title.clone().unwrap_or_default();

    draw_combatant(
        f,
        halves[0],
        &player_name,
        app.screen.player_pct,
        &effect_badges(&app.screen.player_effects),
        Color::Green,
    );
    draw_combatant(
        f,
        halves[1],
        &enemy_name,
        app.screen.enemy_pct,
        &effect_badges(&app.screen.enemy_effects),
        Color::Red,
    );
}

fn draw_combatant(f: &mut Frame, area: Rect, name: &str, percent: f64, badges: &str, color: Color) {
    let lines = vec![
        Line::from(Span::styled(
            name.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        super::progress_bar(percent, area.width.saturating_sub(4)),
        Line::from(Span::styled(
            format!("{:.0}%", percent),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(badges.to_string()),
    ];
    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn draw_cast(f: &mut Frame, app: &App, area: Rect) {
    let (alignment, icon) = match &app.screen.cast {
        Some((CastSide::Player, icon)) => (Alignment::Left, icon.as_str()),
        Some((CastSide::Enemy, icon)) => (Alignment::Right, icon.as_str()),
        Some((CastSide::Center, icon)) => (Alignment::Center, icon.as_str()),
        None => (Alignment::Center, ""),
    };
    let widget = Paragraph::new(icon)
        .alignment(alignment)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn draw_log(f: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.screen.battle_log.len().saturating_sub(visible);
    let items: Vec<ListItem> = app
        .screen
        .battle_log
        .iter()
        .skip(skip)
        .map(|line| {
            let style = if line.starts_with("Critical hit") {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if line.starts_with("You have defeated") {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if line.contains("Game Over") {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else if line.contains("frozen") {
                Style::default().fg(Color::Cyan)
            } else if line.contains("burn") {
                Style::default().fg(Color::LightRed)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(line.as_str(), style))
        })
        .collect();

    let widget = List::new(items).block(Block::default().borders(Borders::ALL).title(" Battle Log "));
    f.render_widget(widget, area);
}

fn draw_options(f: &mut Frame, app: &App, area: Rect) {
    let Some(options) = app.session.request_battle_options() else {
        return;
    };

    let (title, spans): (&str, Vec<Span>) = match app.menu {
        BattleMenu::Spells => (
            " Spells ",
            options
                .spells
                .iter()
                .enumerate()
                .flat_map(|(i, spell)| {
                    vec![
                        Span::styled(
                            format!("[{}] ", i + 1),
                            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(format!("{} {}    ", spell.icon(), spell)),
                    ]
                })
                .collect(),
        ),
        BattleMenu::Potions => (
            " Potions ",
            options
                .potions
                .iter()
                .enumerate()
                .flat_map(|(i, entry)| {
                    vec![
                        Span::styled(
                            format!("[{}] ", i + 1),
                            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(format!("{} ({})    ", entry.display_name, entry.quantity)),
                    ]
                })
                .collect(),
        ),
    };

    let widget = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}
