use std::error::Error;
use std::io;

use clap::{Parser, Subcommand};
use engine::observation::Observation;
use engine::EngineError;
use tracing_subscriber::EnvFilter;

use session::{AgentKind, SessionConfig};

pub mod counter;
pub mod prompt;
pub mod render;
pub mod selfplay;
pub mod session;

/// Four-player polyomino placement on a 20x20 board
#[derive(Debug, Parser)]
#[command(name = "blokus")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play one game in the terminal
    Play {
        /// Seats (0-3) played from the keyboard; the rest play randomly
        #[arg(long, value_delimiter = ',')]
        human: Vec<usize>,

        /// Seed for the random seats
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Print the game record as JSON instead of drawing the board
        #[arg(long)]
        json: bool,

        /// Stop after this many rounds
        #[arg(long, default_value_t = 100)]
        max_rounds: u32,
    },

    /// Play many random games in parallel and summarize them
    Selfplay {
        #[arg(long, default_value_t = 100)]
        games: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(long)]
        json: bool,
    },

    /// Apply actions read from stdin, one per line, and print what a seat observes
    Replay {
        /// Seat whose observation is printed
        #[arg(long, default_value_t = 0)]
        seat: usize,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Command::Play {
            human,
            seed,
            json,
            max_rounds,
        } => {
            let mut config = SessionConfig {
                seed,
                render: !json,
                max_rounds,
                ..SessionConfig::default()
            };
            for seat in human {
                let kind = config
                    .seats
                    .get_mut(seat)
                    .ok_or(EngineError::NoSuchSeat(seat))?;
                *kind = AgentKind::Human;
            }

            let record = session::run(&config, &mut config.agents())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else if record.quit.is_some() {
                println!("\nGoodbye!");
            }
        }

        Command::Selfplay { games, seed, json } => {
            let summary = selfplay::run(games, seed)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary);
            }
        }

        Command::Replay { seat } => {
            let state = session::replay_lines(io::stdin().lock())?;
            println!("{}", serde_json::to_string(&Observation::new(&state, seat)?)?);
        }
    }

    Ok(())
}
