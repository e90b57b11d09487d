//! A seat played from the terminal.
//!
//! The player picks a piece, then an anchor, then an orientation.  Each list
//! is numbered; an answer can be the number or the thing itself.  Pieces and
//! orientations can be drawn with `show`.  Board coordinates are 1-based.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use engine::agent::{first_legal, Agent};
use engine::placements::Footprint;
use engine::{Cell, Move, Piece, Placement, ValidMoveSet};
use tracing::info;

use crate::render;

pub struct PromptAgent<R, W> {
    input: R,
    output: W,
    quit: bool,
}

impl<R: BufRead, W: Write> PromptAgent<R, W> {
    pub fn new(input: R, output: W) -> PromptAgent<R, W> {
        PromptAgent {
            input,
            output,
            quit: false,
        }
    }

    /// Read one trimmed answer.
    ///
    /// Returns `None` if the player quits or input ends.
    fn ask(&mut self, question: &str) -> Option<String> {
        write!(self.output, "{} ", question).ok()?;
        self.output.flush().ok()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }

        let line = line.trim();
        if line == "q" || line == "quit" {
            return None;
        }
        Some(line.to_owned())
    }

    /// Offer numbered `options` until one is chosen.
    ///
    /// With `preview`, answering `show` draws every option and asks again.
    fn menu<T: Copy>(
        &mut self,
        title: &str,
        options: &[T],
        label: impl Fn(T) -> String,
        preview: Option<&dyn Fn(T) -> Footprint>,
    ) -> Option<T> {
        loop {
            writeln!(self.output, "{}:", title).ok()?;
            for (i, &option) in options.iter().enumerate() {
                writeln!(self.output, "  {:>3}: {}", i + 1, label(option)).ok()?;
            }

            let answer = self.ask(if preview.is_some() { "> (or show)" } else { ">" })?;

            if let (Some(preview), true) = (preview, answer.eq_ignore_ascii_case("show")) {
                for &option in options {
                    writeln!(self.output, "{}", label(option)).ok()?;
                    render::draw_footprint(&mut self.output, &preview(option)).ok()?;
                }
                continue;
            }

            let by_number = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| options.get(i).copied());
            let chosen = by_number.or_else(|| {
                let answer = answer.replace(' ', "");
                options.iter().copied().find(|&o| label(o).replace(' ', "") == answer)
            });

            match chosen {
                Some(option) => return Some(option),
                None => writeln!(self.output, "Not one of the choices.").ok()?,
            }
        }
    }

    /// Walk the player through choosing a move.  `None` means they quit.
    pub fn choose(&mut self, moves: &ValidMoveSet) -> Option<Move> {
        let pieces: Vec<Piece> = moves.pieces().collect();
        let piece = self.menu(
            "Pieces",
            &pieces,
            |p| p.name().to_owned(),
            Some(&|p: Piece| -> Footprint { p.cells().iter().copied().collect() }),
        )?;

        let anchors: Vec<Cell> = moves.anchors(piece).collect();
        let anchor = self.menu(
            "Anchors",
            &anchors,
            |(x, y)| format!("({}, {})", x + 1, y + 1),
            None,
        )?;

        let placements = moves.placements(piece, anchor).to_vec();
        let placement = self.menu(
            "Orientations",
            &placements,
            |p| p.to_string(),
            Some(&|placement: Placement| -> Footprint {
                Move {
                    piece,
                    anchor,
                    placement,
                }
                .cells()
            }),
        )?;

        Some(Move {
            piece,
            anchor,
            placement,
        })
    }
}

impl<R: BufRead, W: Write> Agent for PromptAgent<R, W> {
    fn choose_move(&mut self, moves: &ValidMoveSet) -> Move {
        match self.choose(moves) {
            Some(m) => m,
            None => {
                info!("player quit");
                self.quit = true;
                first_legal(moves)
            }
        }
    }

    fn has_quit(&self) -> bool {
        self.quit
    }
}

/// One agent behind several seats, so they can take turns at one terminal.
pub struct SharedPrompt<A>(Rc<RefCell<A>>);

impl<A> SharedPrompt<A> {
    pub fn new(agent: A) -> SharedPrompt<A> {
        SharedPrompt(Rc::new(RefCell::new(agent)))
    }
}

impl<A> Clone for SharedPrompt<A> {
    fn clone(&self) -> SharedPrompt<A> {
        SharedPrompt(Rc::clone(&self.0))
    }
}

impl<A: Agent> Agent for SharedPrompt<A> {
    fn choose_move(&mut self, moves: &ValidMoveSet) -> Move {
        self.0.borrow_mut().choose_move(moves)
    }

    fn has_quit(&self) -> bool {
        self.0.borrow().has_quit()
    }
}
