//! Tests for fatal generation errors surfacing through the turn API.

use super::support::*;

#[test]
fn failed_descent_returns_fatal_error_and_keeps_the_old_level() {
    let mut game = arena_game();
    let exit = game.state.exit_tile;
    let before_exit = exit.step(Direction::Left);
    game.state.player.pos = before_exit;
    let earlier = game.disable_trap();
    let enemy = add_enemy(&mut game, Pos { y: 6, x: 3 }, 30, 5);
    let tiles = game.state.map.tiles.clone();
    let turn = game.turn();
    break_level_generation(&mut game);

    let error = game.move_player(Direction::Right).expect_err("descent cannot generate");

    assert!(error.is_fatal());
    assert!(matches!(
        error,
        GameError::GenerationUnsatisfiable { stage: GenerationStage::Rooms, .. }
    ));
    assert_eq!(game.message_history(), earlier.messages.as_slice());
    assert_eq!(game.phase(), TurnPhase::LevelComplete);
    assert_eq!(game.turn(), turn);
    assert_eq!(game.dungeon_level(), 1);
    assert_eq!(game.state.player.pos, exit);
    assert_eq!(game.state.map.tiles, tiles);
    assert_eq!(game.state.enemies[enemy].pos, Pos { y: 6, x: 3 });
}

#[test]
fn descent_succeeds_once_generation_recovers() {
    let mut game = arena_game();
    let exit = game.state.exit_tile;
    game.state.player.pos = exit.step(Direction::Left);
    break_level_generation(&mut game);
    game.move_player(Direction::Right).expect_err("descent cannot generate");

    restore_level_generation(&mut game);
    let report = game.move_player(Direction::Left).expect("step off the exit");
    assert_eq!(report.outcome, TurnOutcome::Resolved);
    assert!(report.messages.is_empty(), "nothing from the failed call leaks into the next report");
    let report = game.move_player(Direction::Right).expect("next level generates");

    assert_eq!(report.outcome, TurnOutcome::LevelComplete { new_level: 2 });
    assert_eq!(game.phase(), TurnPhase::AwaitingInput);
}

#[test]
fn failed_restart_leaves_the_dead_run_and_its_log_alone() {
    let mut game = arena_game();
    let target = arena_center().step(Direction::Right);
    add_floor_trap(&mut game, target);
    game.state.player.hp = 1;
    game.move_player(Direction::Right).expect("turn");
    assert!(game.is_over());
    let history = game.message_history().to_vec();
    break_level_generation(&mut game);

    let error = game.restart().expect_err("level one cannot generate");

    assert!(error.is_fatal());
    assert_eq!(game.message_history(), history.as_slice());
    assert_eq!(game.phase(), TurnPhase::PlayerDead);
    assert_eq!(game.state.player.pos, target);

    restore_level_generation(&mut game);
    game.restart().expect("restart");
    assert!(!game.is_over());
    assert!(game.message_history().is_empty());
}
