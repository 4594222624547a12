use std::collections::{HashMap, VecDeque};

use crawler_core::{CellKind, Direction, Game, Pos, Snapshot, TurnOutcome, TurnPhase};

/// First step of a shortest walkable path from the player to the exit.
fn step_towards_exit(snapshot: &Snapshot) -> Option<Direction> {
    let start = snapshot.player.pos;
    let mut came_from: HashMap<Pos, (Pos, Direction)> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    let mut goal = None;

    while let Some(pos) = queue.pop_front() {
        if snapshot.cell_at(pos) == CellKind::Exit {
            goal = Some(pos);
            break;
        }
        for direction in Direction::ALL {
            let next = pos.step(direction);
            if next == start || came_from.contains_key(&next) {
                continue;
            }
            if snapshot.cell_at(next) == CellKind::Wall {
                continue;
            }
            came_from.insert(next, (pos, direction));
            queue.push_back(next);
        }
    }

    let mut cursor = goal?;
    loop {
        let (previous, direction) = came_from[&cursor];
        if previous == start {
            return Some(direction);
        }
        cursor = previous;
    }
}

fn walk_to_level_two(seed: u64) -> (bool, u64) {
    let mut game = Game::new(seed).expect("level one generates");

    for _ in 0..600 {
        let snapshot = game.snapshot(0);
        let direction = step_towards_exit(&snapshot).expect("exit is reachable");
        let report = game.move_player(direction).expect("turn resolves");
        match report.outcome {
            TurnOutcome::LevelComplete { new_level } => {
                assert_eq!(new_level, 2);
                assert_eq!(game.phase(), TurnPhase::AwaitingInput);
                return (true, game.snapshot_hash());
            }
            TurnOutcome::PlayerDead => return (false, game.snapshot_hash()),
            TurnOutcome::Resolved | TurnOutcome::FreeAction => {}
        }
    }
    panic!("walker neither descended nor died for seed {seed}");
}

#[test]
fn test_smoke_walker_descends_on_some_seed() {
    let descended = (1..=6_u64).filter(|seed| walk_to_level_two(*seed).0).count();
    assert!(descended > 0, "no seed reached the second level");
}

#[test]
fn test_smoke_new_game_snapshot_is_consistent() {
    let game = Game::new(77).expect("game");
    let snapshot = game.snapshot(0);

    assert_eq!((snapshot.width, snapshot.height), (50, 20));
    assert_eq!(snapshot.cells.len(), 50 * 20);
    assert_eq!(snapshot.cell_at(snapshot.player.pos), CellKind::Player);
    assert_eq!(snapshot.cells.iter().filter(|cell| **cell == CellKind::Player).count(), 1);
    assert_eq!(snapshot.cells.iter().filter(|cell| **cell == CellKind::Exit).count(), 1);
    assert_eq!(snapshot.dungeon_level, 1);
    assert_eq!(snapshot.phase, TurnPhase::AwaitingInput);
    assert!(!snapshot.player.low_hp);
    assert!(snapshot.messages.is_empty());
}

#[test]
fn test_smoke_snapshot_serializes() {
    let game = Game::new(3).expect("game");
    let json = serde_json::to_value(game.snapshot(0)).expect("snapshot serializes");
    assert_eq!(json["dungeon_level"], 1);
    assert_eq!(json["player"]["hp"], 100);
    assert_eq!(json["inventory"]["total_pages"], 1);
}
