//! Many random games at once, for statistics.

use std::fmt;

use engine::state::SEATS;
use parking_lot::Mutex;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::counter::Counter;
use crate::session::{self, SessionConfig, SessionError};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelfPlaySummary {
    pub games: usize,
    /// Games stopped by the round limit.
    pub unfinished: usize,
    /// Total size of every legal move set generated.
    pub moves_generated: u64,
    /// Total actions taken, passes included.
    pub actions: u64,
    /// Games won by each seat.  Shared wins count for every winner.
    pub wins: [u64; SEATS],
    pub mean_scores: [f64; SEATS],
}

/// Play `games` games between random agents, in parallel.
///
/// Game `n` seats agents seeded from `seed + 4n`, so a run is reproducible
/// whatever the thread count.
pub fn run(games: usize, seed: u64) -> Result<SelfPlaySummary, SessionError> {
    let moves_generated = Counter::zero();
    let actions = Counter::zero();
    let wins = Mutex::new([0u64; SEATS]);

    let records = (0..games)
        .into_par_iter()
        .map(|game| {
            let config = SessionConfig {
                seed: seed.wrapping_add((game * SEATS) as u64),
                ..SessionConfig::default()
            };
            let record = session::run(&config, &mut config.agents())?;

            moves_generated.add(record.moves_generated);
            actions.add(record.actions.len() as u64);
            {
                let mut wins = wins.lock();
                for &seat in &record.winners {
                    wins[seat] += 1;
                }
            }

            debug!(game, scores = ?record.scores, "self-play game done");

            Ok((record.scores, record.finished))
        })
        .collect::<Result<Vec<_>, SessionError>>()?;

    let mut totals = [0u64; SEATS];
    for (scores, _) in &records {
        for seat in 0..SEATS {
            totals[seat] += u64::from(scores[seat]);
        }
    }

    let mean_scores = totals.map(|total| if games == 0 { 0.0 } else { total as f64 / games as f64 });

    Ok(SelfPlaySummary {
        games,
        unfinished: records.iter().filter(|(_, finished)| !finished).count(),
        moves_generated: moves_generated.get(),
        actions: actions.get(),
        wins: wins.into_inner(),
        mean_scores,
    })
}

impl fmt::Display for SelfPlaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "games:           {}", self.games)?;
        if self.unfinished > 0 {
            writeln!(f, "unfinished:      {}", self.unfinished)?;
        }
        writeln!(f, "actions:         {}", self.actions)?;
        writeln!(f, "moves generated: {}", self.moves_generated)?;

        for seat in 0..SEATS {
            writeln!(
                f,
                "{:<7} {:>6} wins, mean score {:.2}",
                engine::Color::SEATS[seat].name(),
                self.wins[seat],
                self.mean_scores[seat]
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::selfplay::run;

    #[test]
    fn summary_adds_up() {
        let summary = run(6, 100).unwrap();

        assert_eq!(summary.games, 6);
        assert_eq!(summary.unfinished, 0);
        assert!(summary.wins.iter().sum::<u64>() >= 6);
        assert!(summary.actions >= 6 * 4);
        assert!(summary.moves_generated > 0);
        assert!(summary.mean_scores.iter().all(|&s| s > 0.0));
    }

    #[test]
    fn reproducible() {
        let a = run(4, 9).unwrap();
        let b = run(4, 9).unwrap();

        assert_eq!(a, b);
        assert!(a.to_string().contains("mean score"));
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(run(2, 0).unwrap()).unwrap();

        assert_eq!(json["games"], 2);
        assert_eq!(json["wins"].as_array().unwrap().len(), 4);
        assert_eq!(json["mean_scores"].as_array().unwrap().len(), 4);
    }
}
