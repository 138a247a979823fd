//! Whole-game runs through the public API

use dungeon_core::prelude::*;
use dungeon_core::{GameEvent, Tile};

#[derive(Debug, Clone, Copy)]
enum Input {
    Move(Direction),
    Cast(Element),
    Potion(Element),
    Wait(u64),
}

fn apply(session: &mut GameSession, input: Input, log: &mut EventLog) {
    // Refusals are part of normal play here
    let _ = match input {
        Input::Move(direction) => session.move_player(direction, log).map(|_| ()),
        Input::Cast(element) => session.choose_spell(element, log).map(|_| ()),
        Input::Potion(element) => session.use_potion(element, log).map(|_| ()),
        Input::Wait(ms) => {
            session.tick(ms, log);
            Ok(())
        }
    };
}

/// Walk around, fight whatever shows up with the first known spell
fn autoplay(seed: u64, steps: usize) -> (GameSession, EventLog) {
    let mut session = GameSession::new(GameConstants::default(), seed);
    let mut log = EventLog::new();
    session.start(&mut log);
    let pattern = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Down,
        Direction::Right,
        Direction::Right,
        Direction::Up,
    ];

    for i in 0..steps {
        if session.is_game_over() {
            break;
        }
        if let Some(options) = session.request_battle_options() {
            let spell = options.spells[i % options.spells.len()];
            apply(&mut session, Input::Cast(spell), &mut log);
        } else {
            apply(&mut session, Input::Move(pattern[i % pattern.len()]), &mut log);
            apply(&mut session, Input::Wait(300), &mut log);
        }
    }
    (session, log)
}

fn assert_consistent(session: &GameSession) {
    let player = session.player();
    let map = session.map();
    assert!(player.stats.health <= player.stats.max_health);
    assert!(map.in_bounds(player.position));
    assert_ne!(map.tile_at(player.position), Some(Tile::Wall));
    assert_eq!(map.count(Tile::Portal), 1);
    assert_eq!(map.count(Tile::Enemy), map.enemies().len());
    for entry in player.inventory.entries() {
        assert!(entry.quantity >= 1);
        if !entry.id.is_stackable() {
            assert_eq!(entry.quantity, 1);
        }
    }
}

#[test]
fn test_start_reports_initial_state() {
    let session = GameSession::new(GameConstants::default(), 5);
    let mut log = EventLog::new();

    session.start(&mut log);

    assert!(matches!(log.events[0], GameEvent::MapChanged { .. }));
    assert!(log.events.iter().any(|e| matches!(
        e,
        GameEvent::SpellbookChanged { spells } if spells == &vec![Element::Fire, Element::Water, Element::Earth]
    )));
    assert!(log.events.iter().any(|e| matches!(
        e,
        GameEvent::PlayerStats { stats } if stats.level == 1 && stats.health == 100
    )));
}

#[test]
fn test_same_seed_same_game() {
    let (first, first_log) = autoplay(1234, 200);
    let (second, second_log) = autoplay(1234, 200);

    assert_eq!(first_log.events, second_log.events);
    assert_eq!(first.player().snapshot(), second.player().snapshot());
    assert_eq!(first.dungeon_number(), second.dungeon_number());
}

#[test]
fn test_long_runs_stay_consistent() {
    for seed in 0..20 {
        let (session, log) = autoplay(seed, 300);
        assert_consistent(&session);
        if session.is_game_over() {
            assert!(log.saw_game_over());
            assert_eq!(log.last_status(), Some("Game Over. Press F5 to restart."));
        }
    }
}

#[test]
fn test_battles_open_and_close() {
    for seed in 0..10 {
        let (session, log) = autoplay(seed, 300);
        let started = log
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BattleStarted { .. }))
            .count();
        let ended = log
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BattleEnded))
            .count();
        let open = usize::from(session.is_in_battle());
        assert_eq!(started, ended + open);
    }
}

#[test]
fn test_event_log_serializes() {
    let (_, log) = autoplay(77, 50);
    let json = log.to_json_lines().unwrap();
    assert_eq!(json.lines().count(), log.events.len());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn element() -> impl Strategy<Value = Element> {
        prop_oneof![
            Just(Element::Fire),
            Just(Element::Water),
            Just(Element::Earth),
            Just(Element::Air),
            Just(Element::Lightning),
        ]
    }

    fn input() -> impl Strategy<Value = Input> {
        prop_oneof![
            3 => prop_oneof![
                Just(Direction::Up),
                Just(Direction::Down),
                Just(Direction::Left),
                Just(Direction::Right),
            ]
            .prop_map(Input::Move),
            2 => element().prop_map(Input::Cast),
            1 => element().prop_map(Input::Potion),
            1 => (0u64..2_000).prop_map(Input::Wait),
        ]
    }

    proptest! {
        #[test]
        fn any_input_keeps_game_consistent(seed in any::<u64>(), inputs in prop::collection::vec(input(), 1..120)) {
            let mut session = GameSession::new(GameConstants::default(), seed);
            let mut log = EventLog::new();
            let mut dungeon = session.dungeon_number();
            let mut enemies = session.map().enemies().len();

            for input in inputs {
                let was_over = session.is_game_over();
                log.clear();
                apply(&mut session, input, &mut log);
                assert_consistent(&session);

                if was_over {
                    prop_assert!(log.events.is_empty());
                }
                if session.dungeon_number() == dungeon {
                    // enemies only ever leave a dungeon
                    prop_assert!(session.map().enemies().len() <= enemies);
                } else {
                    prop_assert_eq!(session.dungeon_number(), dungeon + 1);
                    prop_assert_eq!(session.player().position, session.constants().spawn);
                    dungeon = session.dungeon_number();
                }
                enemies = session.map().enemies().len();
            }
        }

        #[test]
        fn blocked_moves_change_nothing(seed in any::<u64>(), direction in prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]) {
            let mut session = GameSession::new(GameConstants::default(), seed);
            let before = session.player().position;
            let xp = session.player().xp;
            let mut log = EventLog::new();

            if let Err(err) = session.move_player(direction, &mut log) {
                prop_assert_eq!(err, ActionError::Blocked);
                prop_assert_eq!(session.player().position, before);
                prop_assert_eq!(session.player().xp, xp);
                prop_assert_eq!(log.last_status(), Some("You cannot move in that direction."));
            }
        }
    }
}
