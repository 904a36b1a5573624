mod algo;
mod region;
mod tiers;

use std::fmt;

use crate::board::{self, Board, Loc, Outcome};

#[derive(Debug, PartialEq, Eq, Copy, Clone, thiserror::Error)]
pub enum SolverError {
    /// The counts around a component rule out every mine layout. Only a wrong flag or broken
    /// bookkeeping gets here.
    #[error("no mine layout fits the {constraints} counts around {anchor:?} ({unknowns} hidden cells)")]
    Inconsistent {
        anchor: Loc,
        unknowns: usize,
        constraints: usize,
    },
    #[error(transparent)]
    Board(#[from] board::Error),
}

/// What a single solver pass did to the board.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct Pass {
    pub flagged: usize,
    pub revealed: usize,
    /// Times the cheap tiers were run to a standstill.
    pub rounds: usize,
    pub outcome: Option<Outcome>,
    pub interrupted: bool,
}

impl Pass {
    pub fn is_idle(&self) -> bool {
        self.flagged == 0 && self.revealed == 0
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_idle() {
            write!(f, "solver found nothing certain")?;
        } else {
            write!(
                f,
                "solver flagged {}, revealed {} in {} round{}",
                self.flagged,
                self.revealed,
                self.rounds,
                if self.rounds == 1 { "" } else { "s" },
            )?;
        }
        match self.outcome {
            Some(Outcome::Won) => write!(f, ", board cleared")?,
            Some(Outcome::Lost) => write!(f, ", mine hit")?,
            None => (),
        }
        if self.interrupted {
            write!(f, " (interrupted)")?;
        }
        Ok(())
    }
}

type Tier = fn(&mut Board) -> Result<bool, board::Error>;

/// Cheapest first.
const TIERS: [Tier; 3] = [tiers::complete_trivial, tiers::saturate, tiers::subtract_pairs];

pub struct Solver<'a> {
    pub board: &'a mut Board,
}

impl<'a> Solver<'a> {
    pub fn new(board: &'a mut Board) -> Self {
        Self { board }
    }

    /// Applies every certain deduction until none is left or the game ends.
    pub fn run_to_fixed_point(&mut self) -> Result<Pass, SolverError> {
        self.run_until(|| false)
    }

    /// Same as `run_to_fixed_point`, but gives up between tiers once `cancel` returns true.
    pub fn run_until<F>(&mut self, mut cancel: F) -> Result<Pass, SolverError>
    where
        F: FnMut() -> bool,
    {
        let flagged = self.board.flagged_count();
        let revealed = self.board.revealed_count();
        let mut pass = Pass::default();

        loop {
            pass.rounds += 1;
            if self.settle(&mut cancel)? {
                pass.interrupted = true;
                break;
            }
            if self.board.is_terminal() {
                break;
            }
            if cancel() {
                pass.interrupted = true;
                break;
            }
            if !algo::run(self.board)? {
                break;
            }
        }

        pass.flagged = self.board.flagged_count().saturating_sub(flagged);
        pass.revealed = self.board.revealed_count().saturating_sub(revealed);
        pass.outcome = self.board.outcome();
        Ok(pass)
    }

    /// Runs the tiers until a full sweep changes nothing. Returns whether `cancel` cut it short.
    fn settle<F>(&mut self, cancel: &mut F) -> Result<bool, SolverError>
    where
        F: FnMut() -> bool,
    {
        loop {
            let mut progress = false;
            for &tier in TIERS.iter() {
                if self.board.is_terminal() {
                    return Ok(false);
                }
                if cancel() {
                    return Ok(true);
                }
                progress |= tier(self.board)?;
            }
            if !progress {
                return Ok(false);
            }
        }
    }
}
