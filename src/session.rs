//! Drives one game from the empty board to the end.

use std::io::{self, BufRead};

use engine::agent::{Agent, RandomAgent};
use engine::state::SEATS;
use engine::{Action, EngineError, GameState, Outcome};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::prompt::{PromptAgent, SharedPrompt};
use crate::render;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Who sits at a seat.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AgentKind {
    Random,
    Human,
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub seats: [AgentKind; SEATS],
    /// Random seats are seeded with `seed + seat`.
    pub seed: u64,
    /// Draw the board to stdout before every turn and at the end.
    pub render: bool,
    /// Stop early after this many rounds.
    pub max_rounds: u32,
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            seats: [AgentKind::Random; SEATS],
            seed: 0,
            render: false,
            // every round but the last places at least one of the 84 pieces
            max_rounds: 100,
        }
    }
}

impl SessionConfig {
    /// One agent per seat.  Human seats share a single terminal prompt.
    pub fn agents(&self) -> [Box<dyn Agent>; SEATS] {
        let mut terminal = None;

        std::array::from_fn(|seat| -> Box<dyn Agent> {
            match self.seats[seat] {
                AgentKind::Random => Box::new(RandomAgent::new(self.seed.wrapping_add(seat as u64))),
                AgentKind::Human => {
                    let shared = terminal
                        .get_or_insert_with(|| SharedPrompt::new(PromptAgent::new(io::stdin().lock(), io::stdout())));
                    Box::new(shared.clone())
                }
            }
        })
    }
}

/// Everything needed to replay or score a finished game.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GameRecord {
    /// Encoded actions in turn order, starting with seat 0.  Passes are
    /// empty strings.
    pub actions: Vec<String>,
    pub scores: [u32; SEATS],
    pub winners: Vec<usize>,
    pub rounds: u32,
    /// False if the round limit or a quitting seat stopped the game.
    pub finished: bool,
    /// The seat whose player left, if one did.
    pub quit: Option<usize>,
    /// Sum of the sizes of every legal move set offered to an agent.
    pub moves_generated: u64,
}

/// Play a game, asking `agents[seat]` for each of that seat's moves.
///
/// A seat with no legal move passes without consulting its agent.
pub fn run(config: &SessionConfig, agents: &mut [Box<dyn Agent>; SEATS]) -> Result<GameRecord, SessionError> {
    let mut state = GameState::new();
    let mut actions = Vec::new();
    let mut moves_generated = 0;
    let mut seat = 0;

    let mut quit = None;

    let (winners, finished) = loop {
        if state.round >= config.max_rounds {
            warn!(rounds = state.round, "round limit reached, stopping");
            break (state.winners(), false);
        }

        if config.render {
            render::draw(&mut io::stdout(), &state, Some(seat), None)?;
        }

        let moves = state.valid_moves(seat)?;
        moves_generated += moves.len() as u64;

        let action = if moves.is_empty() {
            Action::Pass
        } else {
            let m = agents[seat].choose_move(&moves);
            if agents[seat].has_quit() {
                info!(seat, "seat quit, stopping");
                quit = Some(seat);
                break (state.winners(), false);
            }
            Action::Place(m)
        };

        // everything crosses the wire format, as a remote seat would
        let encoded = action.to_string();
        let transition = state.apply(seat, &encoded.parse()?)?;

        actions.push(encoded);
        state = transition.state;

        if let Outcome::Terminal { winners, .. } = transition.outcome {
            break (winners, true);
        }

        seat = (seat + 1) % SEATS;
    };

    if config.render {
        render::draw(&mut io::stdout(), &state, None, Some(winners.as_slice()))?;
    }

    info!(scores = ?state.scores(), ?winners, rounds = state.round, "game finished");

    Ok(GameRecord {
        actions,
        scores: state.scores(),
        winners,
        rounds: state.round,
        finished,
        quit,
        moves_generated,
    })
}

/// Apply encoded actions in turn order, starting with seat 0.
pub fn replay<I, S>(actions: I) -> Result<GameState, SessionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = GameState::new();

    for (turn, line) in actions.into_iter().enumerate() {
        let action: Action = line.as_ref().parse()?;
        state = state.apply(turn % SEATS, &action)?.state;
    }

    Ok(state)
}

/// [`replay`] one action per line.
pub fn replay_lines(input: impl BufRead) -> Result<GameState, SessionError> {
    let lines = input.lines().collect::<Result<Vec<_>, _>>()?;
    replay(lines)
}
