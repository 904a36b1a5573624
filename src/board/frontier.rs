use indexmap::IndexSet;

use super::{CellState, Grid, Loc};

/// Revealed cells that still owe mines and still touch a hidden cell. The only cells the
/// solver needs to look at.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Frontier {
    members: IndexSet<Loc>,
}

impl Frontier {
    pub fn rebuild(grid: &Grid) -> Self {
        Self {
            members: grid.locs().filter(|&loc| Self::qualifies(grid, loc)).collect(),
        }
    }

    fn qualifies(grid: &Grid, loc: Loc) -> bool {
        grid.cell(loc).state == CellState::Revealed
            && grid.effective_remaining(loc).map_or(false, |remaining| remaining > 0)
            && grid.has_free_neighbor(loc)
    }

    fn reevaluate(&mut self, grid: &Grid, loc: Loc) {
        if Self::qualifies(grid, loc) {
            self.members.insert(loc);
        } else {
            self.members.shift_remove(&loc);
        }
    }

    /// `loc` was just revealed, which also took a free cell away from its revealed neighbours.
    pub fn on_reveal(&mut self, grid: &Grid, loc: Loc) {
        self.reevaluate(grid, loc);
        self.reevaluate_around(grid, loc);
    }

    /// `loc` was flagged or unflagged, shifting the counts of every revealed neighbour.
    pub fn on_flag_change(&mut self, grid: &Grid, loc: Loc) {
        self.reevaluate_around(grid, loc);
    }

    fn reevaluate_around(&mut self, grid: &Grid, loc: Loc) {
        for &neighbor in grid.neighbors_of(loc) {
            if grid.cell(neighbor).state == CellState::Revealed {
                self.reevaluate(grid, neighbor);
            }
        }
    }

    pub fn members(&self) -> &IndexSet<Loc> {
        &self.members
    }

    #[cfg(test)]
    pub fn contains(&self, loc: Loc) -> bool {
        self.members.contains(&loc)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod test {
    use crate::board::Board;

    use super::Frontier;

    #[test]
    fn rebuild_picks_unresolved_cells() {
        let board = Board::from_save(include_bytes!("../../testing/boards/pairwise.txt"))
            .expect("board to parse correctly from file.");
        let frontier = Frontier::rebuild(board.grid());
        assert_eq!(frontier.len(), 3);
        assert!(frontier.contains((0, 0)));
        assert!(frontier.contains((1, 0)));
        assert!(frontier.contains((2, 0)));
    }

    #[test]
    fn reveal_removes_exhausted_neighbors() {
        let mut board = Board::from_save(include_bytes!("../../testing/boards/saturation.txt"))
            .expect("board to parse correctly from file.");
        // Middle cell still owes two mines, the side cells one each.
        assert_eq!(board.frontier().len(), 3);

        board.flag((0, 0)).expect("flag to be in bounds.");
        assert!(!board.frontier().contains((0, 1)));
        assert!(board.frontier().contains((1, 1)));
        assert_eq!(board.frontier(), &Frontier::rebuild(board.grid()));
    }

    #[test]
    fn empty_board_has_no_frontier() {
        let board = Board::from_save(include_bytes!("../../testing/boards/cascade.txt"))
            .expect("board to parse correctly from file.");
        assert!(board.frontier().is_empty());
    }
}
