mod cc;

use indexmap::IndexSet;
use rayon::prelude::*;

use crate::board::{Board, CellState, Loc};
use super::{region::Region, SolverError};

/// Components with this many unknown cells or more are left alone.
pub const MAX_UNKNOWNS: usize = 12;

/// Frontier regions linked through neighbouring anchors. Nothing outside the component
/// constrains its unknown cells.
#[derive(Debug, Clone)]
pub struct Component {
    pub regions: Vec<Region>,
}

impl Component {
    pub fn unknowns(&self) -> IndexSet<Loc> {
        self.regions.iter()
            .flat_map(|r| r.hidden.iter().cloned())
            .collect()
    }
}

/// Cells that hold the same value in every assignment that satisfies a component.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Verdict {
    pub mines: Vec<Loc>,
    pub safe: Vec<Loc>,
}

impl Verdict {
    pub fn is_empty(&self) -> bool {
        self.mines.is_empty() && self.safe.is_empty()
    }
}

/// Tries every mine layout over the component's unknown cells.
///
/// `Ok(None)` when the component is empty or too large to enumerate.
pub fn solve(component: &Component) -> Result<Option<Verdict>, SolverError> {
    let unknowns = component.unknowns();
    let n = unknowns.len();
    if n == 0 || n >= MAX_UNKNOWNS {
        return Ok(None);
    }

    // One bit per unknown, in `unknowns` order.
    let constraints: Vec<(u32, u32)> = component.regions.iter()
        .map(|r| {
            let mask = r.hidden.iter()
                .filter_map(|loc| unknowns.get_index_of(loc))
                .fold(0u32, |mask, bit| mask | 1 << bit);
            (mask, r.mines.max(0) as u32)
        })
        .collect();

    let all = (1u32 << n) - 1;
    let mut always = all;
    let mut ever = 0u32;
    let mut valid = 0usize;
    for assignment in 0..=all {
        let fits = constraints.iter()
            .all(|&(mask, mines)| (assignment & mask).count_ones() == mines);
        if fits {
            always &= assignment;
            ever |= assignment;
            valid += 1;
        }
    }

    if valid == 0 {
        return Err(SolverError::Inconsistent {
            anchor: component.regions[0].anchor,
            unknowns: n,
            constraints: constraints.len(),
        });
    }

    let mut verdict = Verdict::default();
    for (bit, &loc) in unknowns.iter().enumerate() {
        if always & 1 << bit != 0 {
            verdict.mines.push(loc);
        } else if ever & 1 << bit == 0 {
            verdict.safe.push(loc);
        }
    }
    Ok(Some(verdict))
}

/// Enumerates every frontier component and applies what they force. Components are solved
/// side by side against the current board, then applied one at a time.
pub fn run(board: &mut Board) -> Result<bool, SolverError> {
    let components = cc::components(board);
    let verdicts = components.par_iter()
        .map(solve)
        .collect::<Result<Vec<_>, _>>()?;

    let mut progress = false;
    for verdict in verdicts.into_iter().flatten().filter(|v| !v.is_empty()) {
        for loc in verdict.mines {
            if board.grid().cell(loc).state != CellState::Hidden {
                continue;
            }
            board.flag(loc)?;
            progress = true;
            if board.is_terminal() {
                return Ok(progress);
            }
        }
        for loc in verdict.safe {
            if board.grid().cell(loc).state != CellState::Hidden {
                continue;
            }
            board.reveal(loc)?;
            progress = true;
            if board.is_terminal() {
                return Ok(progress);
            }
        }
    }
    Ok(progress)
}
