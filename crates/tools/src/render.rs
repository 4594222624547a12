//! ASCII rendering of a core snapshot.

use std::fmt::Write;

use crawler_core::{CellKind, Snapshot, TurnPhase};

pub fn glyph(cell: CellKind) -> char {
    match cell {
        CellKind::Player => '@',
        CellKind::Enemy => 'E',
        CellKind::Boss => 'B',
        CellKind::Item => '!',
        CellKind::SpecialItem => '*',
        CellKind::Trap => '^',
        CellKind::WaterPool => '~',
        CellKind::Wall => '#',
        CellKind::Floor => '.',
        CellKind::Exit => '>',
    }
}

pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for y in 0..snapshot.height {
        out.extend(snapshot.row(y).iter().map(|cell| glyph(*cell)));
        out.push('\n');
    }

    let player = &snapshot.player;
    let _ = writeln!(
        out,
        "Depth {}  HP {}/{}{}  Atk {}  Def {}  Luck {}  Lvl {}  XP {}/{}  SP {}",
        snapshot.dungeon_level,
        player.hp,
        player.max_hp,
        if player.low_hp { " (low!)" } else { "" },
        player.attack,
        player.defense,
        player.luck,
        player.level,
        player.xp,
        player.xp_to_level,
        player.skill_points,
    );

    let inventory = &snapshot.inventory;
    let _ = write!(
        out,
        "Inventory {}/{} (page {}/{}):",
        player.inventory_len,
        player.max_inventory_size,
        inventory.page + 1,
        inventory.total_pages,
    );
    if inventory.entries.is_empty() {
        out.push_str(" empty");
    }
    for entry in &inventory.entries {
        let marker = if entry.special { "*" } else { "" };
        let _ = write!(out, " [{}] {}{}", entry.slot, entry.name, marker);
    }
    out.push('\n');

    for message in &snapshot.messages {
        let _ = writeln!(out, "> {message}");
    }
    if snapshot.phase == TurnPhase::PlayerDead {
        out.push_str("You are dead. Type `restart` to try again.\n");
    }
    out
}
