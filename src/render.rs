//! Terminal drawing.  Nothing here changes game state.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, PrintStyledContent, Stylize};
use engine::gameplay::SIZE;
use engine::state::SEATS;
use engine::{Cell, Color, GameState};

fn term_color(color: Color) -> Option<TermColor> {
    match color {
        Color::None => None,
        Color::Red => Some(TermColor::Red),
        Color::Blue => Some(TermColor::Blue),
        Color::Green => Some(TermColor::Green),
        Color::Yellow => Some(TermColor::Yellow),
    }
}

/// A seat's color name, padded to `width` before styling.
fn seat_name(seat: usize, width: usize) -> String {
    let color = Color::SEATS[seat];
    let name = format!("{:<width$}", color.name(), width = width);
    match term_color(color) {
        Some(c) => name.with(c).bold().to_string(),
        None => name,
    }
}

/// Draw the board with 1-based coordinates, then the scoreboard.
///
/// `to_move` names the seat about to act.  `winners` is given once the game
/// is over.
pub fn draw(
    out: &mut impl Write,
    state: &GameState,
    to_move: Option<usize>,
    winners: Option<&[usize]>,
) -> io::Result<()> {
    queue!(out, Print(format!("\nRound {}", state.round + 1)))?;
    if let Some(seat) = to_move {
        queue!(out, Print(format!("   {} to move", seat_name(seat, 0))))?;
    }
    queue!(out, Print("\n\n    "))?;

    for x in 0..SIZE {
        queue!(out, Print(format!("{:>2}", x + 1)))?;
    }
    queue!(out, Print("\n"))?;

    for (y, row) in state.board.0.iter().enumerate() {
        queue!(out, Print(format!("{:>3} ", y + 1)))?;
        for &color in row.iter() {
            match term_color(color) {
                Some(c) => queue!(out, PrintStyledContent("██".with(c)))?,
                None => queue!(out, PrintStyledContent(" ·".dim()))?,
            }
        }
        queue!(out, Print("\n"))?;
    }

    queue!(out, Print("\n"))?;
    for seat in 0..SEATS {
        let player = &state.players[seat];
        queue!(
            out,
            Print(format!(
                "  {} {:>3} points, {:>2} pieces left\n",
                seat_name(seat, 6),
                player.score,
                player.remaining.len()
            ))
        )?;
    }

    if let Some(winners) = winners {
        let names: Vec<String> = winners.iter().map(|&seat| seat_name(seat, 0)).collect();
        queue!(out, Print(format!("\nWinner: {}\n", names.join(", "))))?;
    }

    out.flush()
}

/// Draw a lone piece, cropped to its bounding box.
pub fn draw_footprint(out: &mut impl Write, cells: &[Cell]) -> io::Result<()> {
    let xs = cells.iter().map(|&(x, _)| x);
    let ys = cells.iter().map(|&(_, y)| y);
    let (Some(left), Some(right)) = (xs.clone().min(), xs.max()) else {
        return Ok(());
    };
    let (Some(top), Some(bottom)) = (ys.clone().min(), ys.max()) else {
        return Ok(());
    };

    for y in top..=bottom {
        queue!(out, Print("    "))?;
        for x in left..=right {
            if cells.contains(&(x, y)) {
                queue!(out, PrintStyledContent("██".bold()))?;
            } else {
                queue!(out, Print("  "))?;
            }
        }
        queue!(out, Print("\n"))?;
    }

    out.flush()
}
