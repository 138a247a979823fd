//! dungeon_tui - Terminal front end for the elemental dungeon crawler
//!
//! Usage: `dungeon_tui [constants.toml] [seed]`

mod app;
mod ui;

use app::{App, BattleMenu};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dungeon_core::config::load_constants;
use dungeon_core::{Direction, GameConstants};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let constants = match args.first() {
        Some(path) => match load_constants(Path::new(path)) {
            Ok(constants) => constants,
            Err(e) => {
                eprintln!("Error: Cannot load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GameConstants::bundled(),
    };
    let seed = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random);

    // Create app before terminal setup so panics are visible
    let mut app = App::new(constants, seed);

    // Setup terminal
    if let Err(e) = enable_raw_mode() {
        eprintln!("Error: Cannot enable raw mode: {}", e);
        eprintln!("This game requires a terminal. Run it directly, not piped or in a non-TTY context.");
        return Err(e);
    }
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        eprintln!("Error: Cannot enter alternate screen: {}", e);
        return Err(e);
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut last_frame = Instant::now();

    // Main loop
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::F(5), _) => app.restart(),
                    (code, _) if !app.in_battle() => match code {
                        KeyCode::Up => app.move_player(Direction::Up),
                        KeyCode::Down => app.move_player(Direction::Down),
                        KeyCode::Left => app.move_player(Direction::Left),
                        KeyCode::Right => app.move_player(Direction::Right),
                        _ => {}
                    },
                    (code, _) => match (app.menu, code) {
                        (BattleMenu::Spells, KeyCode::Char(c @ '1'..='5')) => {
                            app.cast_slot(c as usize - '1' as usize)
                        }
                        (BattleMenu::Spells, KeyCode::Char('p')) => app.open_potions(),
                        (BattleMenu::Potions, KeyCode::Char(c @ '1'..='9')) => {
                            app.use_potion_slot(c as usize - '1' as usize)
                        }
                        (BattleMenu::Potions, KeyCode::Esc) => app.back(),
                        _ => {}
                    },
                }
            }
        }

        // Tick enemy movement
        let now = Instant::now();
        app.tick(now.duration_since(last_frame).as_millis() as u64);
        last_frame = now;
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
