//! The cheap deductions, cheapest first. Each tier reports whether it changed the board and
//! stops as soon as the game ends.

use indexmap::IndexSet;
use itertools::Itertools;

use crate::board::{Board, CellCategory, CellState, Error, Loc};
use super::region::{LinkedSubRegion, Region};

/// Numbered cells whose mines are all flagged: everything else around them is safe.
pub fn complete_trivial(board: &mut Board) -> Result<bool, Error> {
    let mut progress = false;
    for loc in board.grid().locs() {
        if board.is_terminal() {
            break;
        }
        let grid = board.grid();
        let cell = grid.cell(loc);
        let completed = cell.state == CellState::Revealed
            && matches!(cell.category, CellCategory::Empty(n) if n != 0)
            && grid.effective_remaining(loc) == Some(0)
            && grid.has_free_neighbor(loc);
        if completed {
            let before = board.revealed_count();
            board.chord(loc)?;
            progress |= board.revealed_count() != before;
        }
    }
    Ok(progress)
}

/// Frontier cells with exactly as many free neighbours as mines left: all of them are mines.
pub fn saturate(board: &mut Board) -> Result<bool, Error> {
    let mut progress = false;
    let members: Vec<Loc> = board.frontier().members().iter().cloned().collect();
    for loc in members {
        let region = match Region::around(board.grid(), loc) {
            Some(region) if region.is_all_mines() => region,
            _ => continue,
        };
        for mine in region.hidden {
            board.flag(mine)?;
            progress = true;
            if board.is_terminal() {
                return Ok(progress);
            }
        }
    }
    Ok(progress)
}

/// Compares neighbouring frontier cells. When the number of mines in their shared cells is
/// forced, the cells only one of them sees may be forced too.
pub fn subtract_pairs(board: &mut Board) -> Result<bool, Error> {
    let regions = Region::frontier(board);
    let mut to_flag = IndexSet::new();
    let mut to_reveal = IndexSet::new();
    {
        let grid = board.grid();
        let pairs = regions.iter()
            .cartesian_product(regions.iter())
            .filter(|(a, b)| a.anchor != b.anchor && b.borders(grid, a));
        for (a, b) in pairs {
            if let Some(link) = LinkedSubRegion::deduce(a, b) {
                let (empty, mined) = link.conclusions();
                to_reveal.extend(empty);
                to_flag.extend(mined);
            }
        }
    }

    let mut progress = false;
    for loc in to_flag {
        if board.grid().cell(loc).state != CellState::Hidden {
            continue;
        }
        board.flag(loc)?;
        progress = true;
        if board.is_terminal() {
            return Ok(progress);
        }
    }
    for loc in to_reveal {
        if board.grid().cell(loc).state != CellState::Hidden {
            continue;
        }
        board.reveal(loc)?;
        progress = true;
        if board.is_terminal() {
            return Ok(progress);
        }
    }
    Ok(progress)
}
