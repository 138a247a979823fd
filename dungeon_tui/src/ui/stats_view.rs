//! Player stats, inventory and spellbook

use crate::app::App;
use dungeon_core::StatusEffect;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Stats
            Constraint::Length(4), // Spellbook
            Constraint::Min(0),    // Inventory and message history
        ])
        .split(area);

    draw_stats(f, app, chunks[0]);
    draw_spellbook(f, app, chunks[1]);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    draw_inventory(f, app, lower[0]);
    draw_history(f, app, lower[1]);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let Some(stats) = &app.screen.stats else {
        return;
    };
    let percent = if stats.max_health > 0 {
        stats.health as f64 / stats.max_health as f64 * 100.0
    } else {
        0.0
    };

    let lines = vec![
        Line::from(Span::styled(
            stats.name.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        stat_line("Level", stats.level.to_string()),
        stat_line("Health", format!("{}/{}", stats.health, stats.max_health)),
        super::progress_bar(percent, area.width.saturating_sub(4)),
        stat_line("Attack", format!("{:.1}", stats.attack)),
        stat_line("Defense", format!("{:.1}", stats.defense)),
        stat_line("XP", format!("{} / {} XP", stats.xp, stats.xp_to_next_level)),
    ];

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Player "));
    f.render_widget(widget, area);
}

fn draw_spellbook(f: &mut Frame, app: &App, area: Rect) {
    let spells: Vec<Span> = app
        .screen
        .spells
        .iter()
        .flat_map(|spell| {
            vec![
                Span::raw(format!("{} ", spell.icon())),
                Span::styled(spell.name(), Style::default().fg(Color::White)),
                Span::raw("   "),
            ]
        })
        .collect();

    let widget = Paragraph::new(Line::from(spells))
        .block(Block::default().borders(Borders::ALL).title(" Spellbook "));
    f.render_widget(widget, area);
}

fn draw_inventory(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = if app.screen.inventory.is_empty() {
        vec![ListItem::new(Span::styled("Empty", Style::default().fg(Color::DarkGray)))]
    } else {
        app.screen
            .inventory
            .iter()
            .map(|entry| ListItem::new(entry.label()))
            .collect()
    };

    let widget = List::new(items).block(Block::default().borders(Borders::ALL).title(" Inventory "));
    f.render_widget(widget, area);
}

fn draw_history(f: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .screen
        .history
        .iter()
        .rev()
        .take(visible)
        .map(|line| ListItem::new(line.as_str()))
        .collect();

    let widget = List::new(items).block(Block::default().borders(Borders::ALL).title(" Messages "));
    f.render_widget(widget, area);
}

fn stat_line(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:10}", name), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

/// Badges like `🔥(3) 💫(2)`
pub fn effect_badges(effects: &[StatusEffect]) -> String {
    effects
        .iter()
        .map(StatusEffect::badge)
        .collect::<Vec<_>>()
        .join(" ")
}
