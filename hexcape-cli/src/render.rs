//! ASCII board rendering

use hexcape_core::{BoardSnapshot, Hex, Terrain};

pub const LEGEND: &str = "@ player  X exit  E enemy  # barrier  . open";

/// Draw the board as offset rows of glyphs, one row per `r`
pub fn render_board(snapshot: &BoardSnapshot, board_radius: u32) -> String {
    let n = board_radius as i32 - 1;
    let mut out = String::new();

    for r in -n..=n {
        out.push_str(&" ".repeat(r.unsigned_abs() as usize));
        let q_min = (-n).max(-r - n);
        let q_max = n.min(-r + n);
        for q in q_min..=q_max {
            out.push(glyph(snapshot, Hex::axial(q, r)));
            out.push(' ');
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }

    out.push_str(&format!(
        "level {}  status {:?}  teleports {}\n",
        snapshot.level, snapshot.status, snapshot.teleports
    ));
    out
}

fn glyph(snapshot: &BoardSnapshot, hex: Hex) -> char {
    match snapshot.get(hex) {
        None => ' ',
        Some(cell) if cell.is_player => '@',
        Some(cell) if cell.is_enemy => 'E',
        Some(cell) if cell.is_exit => 'X',
        Some(cell) if cell.terrain == Terrain::Barrier => '#',
        Some(_) => '.',
    }
}
