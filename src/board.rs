use indexmap::IndexSet;
use itertools::Itertools;
use rand::{rngs::OsRng, seq::SliceRandom, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus as BaseRng;

mod frontier;
pub use frontier::Frontier;

/// Column, row.
pub type Loc = (usize, usize);

#[derive(Debug, PartialEq, Eq, Copy, Clone, thiserror::Error)]
pub enum Error {
    #[error("({0}, {1}) is not on the board")]
    OutOfBounds(usize, usize),
    #[error("{mines} mines do not fit, the board has room for {capacity}")]
    TooManyMines { mines: usize, capacity: usize },
    #[error("a board needs at least one row and one column")]
    EmptyBoard,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum CellCategory {
    Mine,
    /// Number of mines among the neighbours.
    Empty(u8),
}

impl Default for CellCategory {
    fn default() -> Self {
        Self::Empty(0)
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum CellState {
    Hidden,
    Flagged,
    Revealed,
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct Cell {
    pub state: CellState,
    pub category: CellCategory,
}

impl Cell {
    fn to_char(&self, show_mines: bool) -> char {
        match (self.state, self.category) {
            (CellState::Hidden, CellCategory::Mine) if show_mines => 'M',
            (CellState::Hidden, _) => '\u{25A1}',
            (CellState::Flagged, _) => 'F',
            (CellState::Revealed, CellCategory::Mine) => 'M',
            (CellState::Revealed, CellCategory::Empty(0)) => '\u{25A0}',
            (CellState::Revealed, CellCategory::Empty(n)) => (b'0' + n) as char,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Dim {
    Square(usize),
    Rect(usize, usize),
}

impl Dim {
    pub fn w(&self) -> usize {
        match self {
            Dim::Square(n) => *n,
            Dim::Rect(n, _) => *n,
        }
    }
    pub fn h(&self) -> usize {
        match self {
            Dim::Square(n) => *n,
            Dim::Rect(_, n) => *n,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Outcome {
    Won,
    Lost,
}

/// Final tally handed to scoring once the game is over.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Snapshot {
    pub outcome: Option<Outcome>,
    pub revealed: usize,
    pub flagged: usize,
    pub cells: usize,
}

/// Flat cell storage plus the neighbour lists, which never change for the lifetime of a grid.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Box<[Cell]>,
    neighbors: Box<[Box<[Loc]>]>,
    dims: (usize, usize),
}

fn surroundings_of(dims: (usize, usize), loc: Loc) -> impl Iterator<Item = Loc> {
    (0..9usize)
        .map(|i| (i % 3, i / 3))
        // Remove out of bounds and loc.
        .filter(move |offset| {
            if *offset == (1, 1) {
                return false;
            }
            // 0 means decrement, 2 means increment.
            if offset.0 == 0 && loc.0 == 0 || offset.0 == 2 && loc.0 + 1 == dims.0 {
                return false;
            }
            if offset.1 == 0 && loc.1 == 0 || offset.1 == 2 && loc.1 + 1 == dims.1 {
                return false;
            }
            true
        })
        .map(move |offset| (loc.0 + offset.0 - 1, loc.1 + offset.1 - 1))
}

impl Grid {
    fn new(cells: Box<[Cell]>, dims: (usize, usize)) -> Self {
        let neighbors = (0..dims.1)
            .cartesian_product(0..dims.0)
            .map(|(y, x)| surroundings_of(dims, (x, y)).collect::<Box<[_]>>())
            .collect();
        Self {
            cells,
            neighbors,
            dims,
        }
    }

    fn index(&self, (x, y): Loc) -> usize {
        y * self.dims.0 + x
    }

    pub fn w(&self) -> usize {
        self.dims.0
    }

    pub fn h(&self) -> usize {
        self.dims.1
    }

    pub fn is_loc(&self, (x, y): Loc) -> bool {
        (0..self.dims.0).contains(&x) && (0..self.dims.1).contains(&y)
    }

    /// Every location, row by row.
    pub fn locs(&self) -> impl Iterator<Item = Loc> {
        let (w, h) = self.dims;
        (0..h).cartesian_product(0..w).map(|(y, x)| (x, y))
    }

    pub fn cell(&self, loc: Loc) -> &Cell {
        &self.cells[self.index(loc)]
    }

    fn cell_mut(&mut self, loc: Loc) -> &mut Cell {
        let idx = self.index(loc);
        &mut self.cells[idx]
    }

    pub fn neighbors_of(&self, loc: Loc) -> &[Loc] {
        &self.neighbors[self.index(loc)]
    }

    /// Mine count minus adjacent flags. Only defined for revealed, non-mine cells.
    pub fn effective_remaining(&self, loc: Loc) -> Option<i32> {
        let cell = self.cell(loc);
        match (cell.state, cell.category) {
            (CellState::Revealed, CellCategory::Empty(n)) => {
                let flags = self.neighbors_of(loc)
                    .iter()
                    .filter(|&&l| self.cell(l).state == CellState::Flagged)
                    .count() as i32;
                Some(n as i32 - flags)
            },
            _ => None,
        }
    }

    pub fn free_neighbors(&self, loc: Loc) -> IndexSet<Loc> {
        self.neighbors_of(loc)
            .iter()
            .filter(|&&n| self.cell(n).state == CellState::Hidden)
            .cloned()
            .collect()
    }

    pub fn has_free_neighbor(&self, loc: Loc) -> bool {
        self.neighbors_of(loc)
            .iter()
            .any(|&n| self.cell(n).state == CellState::Hidden)
    }

    fn count_mines(&mut self) {
        for loc in self.locs() {
            if self.cell(loc).category == CellCategory::Mine {
                continue;
            }
            let nearby = self.neighbors_of(loc)
                .iter()
                .filter(|&&n| self.cell(n).category == CellCategory::Mine)
                .count() as u8;
            self.cell_mut(loc).category = CellCategory::Empty(nearby);
        }
    }
}

pub struct Board {
    grid: Grid,
    frontier: Frontier,
    num_mines: usize,
    mines_placed: bool,
    rng: BaseRng,
    outcome: Option<Outcome>,
    finish_reported: bool,
    revealed: usize,
    flagged: usize,
    changed: IndexSet<Loc>,
}

// Constructors
impl Board {
    pub fn new(dim: Dim, num_mines: usize) -> Result<Self, Error> {
        let mut seed = [0; 32];
        OsRng.fill_bytes(&mut seed);
        Self::with_rng(dim, num_mines, BaseRng::from_seed(seed))
    }

    pub fn new_seeded(dim: Dim, num_mines: usize, seed: u64) -> Result<Self, Error> {
        Self::with_rng(dim, num_mines, BaseRng::seed_from_u64(seed))
    }

    fn with_rng(dim: Dim, num_mines: usize, rng: BaseRng) -> Result<Self, Error> {
        let (w, h) = (dim.w(), dim.h());
        if w == 0 || h == 0 {
            return Err(Error::EmptyBoard);
        }
        // The first reveal keeps itself and up to 8 neighbours clear.
        let capacity = (w * h).saturating_sub(9);
        if num_mines > capacity {
            return Err(Error::TooManyMines {
                mines: num_mines,
                capacity,
            });
        }
        let cells = vec![Cell::default(); w * h].into_boxed_slice();
        Ok(Self::assemble(Grid::new(cells, (w, h)), num_mines, false, rng))
    }

    /// Parses a textual board: `.` revealed, `H` hidden, `x` hidden mine, `F` flagged mine,
    /// `f` flagged non-mine. Rows end with a newline.
    #[cfg(test)]
    pub fn from_save(save: &[u8]) -> Result<Self, ()> {
        let mut rows = vec![];
        let mut row = vec![];
        for byte in save {
            let (state, category) = match byte {
                b'\n' => {
                    rows.push(std::mem::take(&mut row));
                    continue;
                },
                b'\r' => continue,
                b'.' => (CellState::Revealed, CellCategory::Empty(0)),
                b'H' => (CellState::Hidden, CellCategory::Empty(0)),
                b'x' => (CellState::Hidden, CellCategory::Mine),
                b'F' => (CellState::Flagged, CellCategory::Mine),
                b'f' => (CellState::Flagged, CellCategory::Empty(0)),
                _ => return Err(()),
            };
            row.push(Cell { state, category });
        }
        if !row.is_empty() {
            rows.push(row);
        }

        // Validate board size.
        let h = rows.len();
        let w = rows.first().map_or(0, |r| r.len());
        if w == 0 || rows.iter().any(|r| r.len() != w) {
            return Err(());
        }

        let cells = rows.into_iter().flatten().collect::<Box<[_]>>();
        let mut grid = Grid::new(cells, (w, h));
        grid.count_mines();
        let num_mines = grid.cells.iter().filter(|c| c.category == CellCategory::Mine).count();
        let mut board = Self::assemble(grid, num_mines, true, BaseRng::seed_from_u64(0));
        board.check_won();
        Ok(board)
    }

    fn assemble(grid: Grid, num_mines: usize, mines_placed: bool, rng: BaseRng) -> Self {
        let frontier = Frontier::rebuild(&grid);
        let revealed = grid.cells.iter().filter(|c| c.state == CellState::Revealed).count();
        let flagged = grid.cells.iter().filter(|c| c.state == CellState::Flagged).count();
        Self {
            grid,
            frontier,
            num_mines,
            mines_placed,
            rng,
            outcome: None,
            finish_reported: false,
            revealed,
            flagged,
            changed: IndexSet::new(),
        }
    }

    /// Mines go anywhere except the first revealed cell and its neighbours.
    fn place_mines(&mut self, avoid: Loc) {
        let excluded: IndexSet<Loc> = std::iter::once(avoid)
            .chain(self.grid.neighbors_of(avoid).iter().cloned())
            .collect();
        let candidates: Vec<Loc> = self.grid.locs()
            .filter(|loc| !excluded.contains(loc))
            .collect();
        let chosen: Vec<Loc> = candidates
            .choose_multiple(&mut self.rng, self.num_mines)
            .cloned()
            .collect();
        for loc in chosen {
            self.grid.cell_mut(loc).category = CellCategory::Mine;
        }
        self.grid.count_mines();
        self.mines_placed = true;
    }
}

// Queries
impl Board {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn w(&self) -> usize {
        self.grid.w()
    }

    pub fn h(&self) -> usize {
        self.grid.h()
    }

    pub fn is_loc(&self, loc: Loc) -> bool {
        self.grid.is_loc(loc)
    }

    pub fn num_mines(&self) -> usize {
        self.num_mines
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    /// Mine counter as shown to the player; negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        self.num_mines as isize - self.flagged as isize
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            outcome: self.outcome,
            revealed: self.revealed,
            flagged: self.flagged,
            cells: self.grid.cells.len(),
        }
    }

    /// Locations whose state changed since the last call.
    pub fn drain_changed(&mut self) -> Vec<Loc> {
        self.changed.drain(..).collect()
    }

    /// Yields the final snapshot exactly once, after the game has ended.
    pub fn take_finished(&mut self) -> Option<Snapshot> {
        if self.outcome.is_none() || self.finish_reported {
            return None;
        }
        self.finish_reported = true;
        Some(self.snapshot())
    }

    fn check_loc(&self, loc: Loc) -> Result<(), Error> {
        if self.grid.is_loc(loc) {
            Ok(())
        } else {
            Err(Error::OutOfBounds(loc.0, loc.1))
        }
    }
}

// Revealing and flagging.
impl Board {
    fn set_state(&mut self, loc: Loc, state: CellState) {
        let cell = self.grid.cell_mut(loc);
        match cell.state {
            CellState::Revealed => self.revealed -= 1,
            CellState::Flagged => self.flagged -= 1,
            CellState::Hidden => (),
        }
        match state {
            CellState::Revealed => self.revealed += 1,
            CellState::Flagged => self.flagged += 1,
            CellState::Hidden => (),
        }
        cell.state = state;
        self.changed.insert(loc);
    }

    fn check_won(&mut self) {
        if !self.mines_placed || self.outcome.is_some() {
            return;
        }
        let won = self.grid.cells.iter().all(|cell| match cell.category {
            CellCategory::Mine => cell.state == CellState::Flagged,
            CellCategory::Empty(_) => cell.state == CellState::Revealed,
        });
        if won {
            self.outcome = Some(Outcome::Won);
        }
    }

    /// Reveals a hidden cell, flooding outwards through zero cells. Revealing a mine loses.
    pub fn reveal(&mut self, loc: Loc) -> Result<(), Error> {
        self.check_loc(loc)?;
        if self.is_terminal() || self.grid.cell(loc).state != CellState::Hidden {
            return Ok(());
        }
        if !self.mines_placed {
            self.place_mines(loc);
        }

        if self.grid.cell(loc).category == CellCategory::Mine {
            self.set_state(loc, CellState::Revealed);
            self.frontier.on_reveal(&self.grid, loc);
            self.outcome = Some(Outcome::Lost);
        } else {
            self.cascade(loc);
            self.check_won();
        }
        Ok(())
    }

    fn cascade(&mut self, start: Loc) {
        let mut scanning_locs = vec![start];
        while let Some(loc) = scanning_locs.pop() {
            if self.grid.cell(loc).state != CellState::Hidden {
                continue;
            }
            self.set_state(loc, CellState::Revealed);
            self.frontier.on_reveal(&self.grid, loc);
            // Zero cells have no mined neighbours, so the flood never hits a mine.
            if self.grid.cell(loc).category == CellCategory::Empty(0) {
                let grid = &self.grid;
                scanning_locs.extend(
                    grid.neighbors_of(loc)
                        .iter()
                        .filter(|&&n| grid.cell(n).state == CellState::Hidden),
                );
            }
        }
    }

    /// Reveals every unflagged hidden neighbour of a revealed cell.
    pub fn chord(&mut self, loc: Loc) -> Result<(), Error> {
        self.check_loc(loc)?;
        if self.grid.cell(loc).state != CellState::Revealed {
            return Ok(());
        }
        for neighbor in self.grid.free_neighbors(loc) {
            self.reveal(neighbor)?;
            if self.is_terminal() {
                break;
            }
        }
        Ok(())
    }

    pub fn flag(&mut self, loc: Loc) -> Result<(), Error> {
        self.set_flag(loc, true)
    }

    pub fn unflag(&mut self, loc: Loc) -> Result<(), Error> {
        self.set_flag(loc, false)
    }

    pub fn toggle_flag(&mut self, loc: Loc) -> Result<(), Error> {
        self.check_loc(loc)?;
        match self.grid.cell(loc).state {
            CellState::Hidden => self.flag(loc),
            CellState::Flagged => self.unflag(loc),
            CellState::Revealed => Ok(()),
        }
    }

    fn set_flag(&mut self, loc: Loc, flagged: bool) -> Result<(), Error> {
        self.check_loc(loc)?;
        let (from, to) = if flagged {
            (CellState::Hidden, CellState::Flagged)
        } else {
            (CellState::Flagged, CellState::Hidden)
        };
        if self.is_terminal() || self.grid.cell(loc).state != from {
            return Ok(());
        }
        self.set_state(loc, to);
        self.frontier.on_flag_change(&self.grid, loc);
        self.check_won();
        Ok(())
    }

    /// Primary click: reveal a hidden cell, or chord a revealed one whose mines are all flagged.
    pub fn left_click(&mut self, loc: Loc) -> Result<(), Error> {
        self.check_loc(loc)?;
        let cell = *self.grid.cell(loc);
        match (cell.state, cell.category) {
            (CellState::Revealed, CellCategory::Empty(n))
                if n != 0 && self.grid.effective_remaining(loc) == Some(0) => self.chord(loc),
            _ => self.reveal(loc),
        }
    }

    pub fn right_click(&mut self, loc: Loc) -> Result<(), Error> {
        self.toggle_flag(loc)
    }

    /// The clock ran out.
    pub fn expire(&mut self) {
        if self.outcome.is_none() {
            self.outcome = Some(Outcome::Lost);
        }
    }
}

impl Board {
    pub fn display(&self, max_dims: (usize, usize), top_left: Loc) -> Box<[Box<[char]>]> {
        let rem_dims = (
            self.w().saturating_sub(top_left.0),
            self.h().saturating_sub(top_left.1),
        );
        let true_dims = (max_dims.0.min(rem_dims.0), max_dims.1.min(rem_dims.1));
        let show_mines = self.outcome == Some(Outcome::Lost);
        (0..true_dims.1)
            .map(|row| {
                (0..true_dims.0)
                    .map(|col| {
                        self.grid
                            .cell((top_left.0 + col, top_left.1 + row))
                            .to_char(show_mines)
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn states(board: &Board) -> Vec<CellState> {
        board.grid().locs().map(|loc| board.grid().cell(loc).state).collect()
    }

    #[test]
    fn board_surroundings_iter() {
        let board = Board::new_seeded(Dim::Rect(5, 4), 3, 7).expect("board to fit its mines.");
        assert_eq!(board.grid().neighbors_of((0, 0)).len(), 3);
        assert_eq!(board.grid().neighbors_of((4, 3)).len(), 3);
        assert_eq!(board.grid().neighbors_of((0, 2)).len(), 5);
        assert_eq!(board.grid().neighbors_of((2, 0)).len(), 5);
        assert_eq!(board.grid().neighbors_of((2, 2)).len(), 8);
        for &(x, y) in board.grid().neighbors_of((2, 2)) {
            assert!((1..=3).contains(&x) && (1..=3).contains(&y));
            assert_ne!((x, y), (2, 2));
        }
    }

    #[test]
    fn rejects_unplaceable_boards() {
        assert_eq!(
            Board::new_seeded(Dim::Square(3), 1, 0).err(),
            Some(Error::TooManyMines { mines: 1, capacity: 0 }),
        );
        assert_eq!(Board::new_seeded(Dim::Rect(0, 4), 0, 0).err(), Some(Error::EmptyBoard));
        let mut board = Board::new_seeded(Dim::Rect(4, 3), 3, 0).expect("3 mines to fit on 4x3.");
        assert_eq!(board.reveal((4, 0)), Err(Error::OutOfBounds(4, 0)));
        assert_eq!(board.chord((0, 3)), Err(Error::OutOfBounds(0, 3)));
    }

    #[test]
    fn first_reveal_is_safe() {
        for seed in 0..20 {
            let mut board = Board::new_seeded(Dim::Square(9), 72, seed)
                .expect("board to fit its mines.");
            board.reveal((4, 4)).expect("reveal to be in bounds.");
            assert_ne!(board.outcome(), Some(Outcome::Lost));
            assert_eq!(board.grid().cell((4, 4)).category, CellCategory::Empty(0));
            for &n in board.grid().neighbors_of((4, 4)) {
                assert_ne!(board.grid().cell(n).category, CellCategory::Mine);
            }
            let mines = board.grid().locs()
                .filter(|&loc| board.grid().cell(loc).category == CellCategory::Mine)
                .count();
            assert_eq!(mines, 72);
        }
    }

    #[test]
    fn reveal_cascades_through_zeroes() {
        let mut board = Board::from_save(include_bytes!("../testing/boards/cascade.txt"))
            .expect("board to parse correctly from file.");
        board.reveal((0, 0)).expect("reveal to be in bounds.");

        for loc in board.grid().locs() {
            let expected = if loc == (4, 4) { CellState::Hidden } else { CellState::Revealed };
            assert_eq!(board.grid().cell(loc).state, expected, "at {:?}", loc);
        }
        assert_eq!(board.grid().cell((3, 3)).category, CellCategory::Empty(1));
        assert_eq!(board.revealed_count(), 24);
        assert_eq!(board.outcome(), None);
        // Only the boundary cells beside the mine carry information.
        let mut members: Vec<_> = board.frontier().members().iter().cloned().collect();
        members.sort();
        assert_eq!(members, vec![(3, 3), (3, 4), (4, 3)]);

        board.flag((4, 4)).expect("flag to be in bounds.");
        assert_eq!(board.outcome(), Some(Outcome::Won));
        assert!(board.frontier().members().is_empty());
    }

    #[test]
    fn flags_toggle_only_hidden_cells() {
        let mut board = Board::from_save(include_bytes!("../testing/boards/cascade.txt"))
            .expect("board to parse correctly from file.");
        board.right_click((1, 1)).expect("flag to be in bounds.");
        assert_eq!(board.grid().cell((1, 1)).state, CellState::Flagged);
        assert_eq!(board.mines_left(), 0);

        // Flagged cells are not revealed by a click.
        board.left_click((1, 1)).expect("click to be in bounds.");
        assert_eq!(board.grid().cell((1, 1)).state, CellState::Flagged);

        board.right_click((1, 1)).expect("flag to be in bounds.");
        assert_eq!(board.grid().cell((1, 1)).state, CellState::Hidden);

        board.reveal((0, 0)).expect("reveal to be in bounds.");
        let before = states(&board);
        board.right_click((0, 0)).expect("flag to be in bounds.");
        board.unflag((0, 0)).expect("unflag to be in bounds.");
        assert_eq!(states(&board), before);

        assert_eq!(board.flag((5, 0)), Err(Error::OutOfBounds(5, 0)));
    }

    #[test]
    fn revealing_a_mine_loses() {
        let mut board = Board::from_save(include_bytes!("../testing/boards/cascade.txt"))
            .expect("board to parse correctly from file.");
        board.reveal((4, 4)).expect("reveal to be in bounds.");
        assert_eq!(board.outcome(), Some(Outcome::Lost));
        assert!(board.is_terminal());
        assert_eq!(board.grid().cell((4, 4)).state, CellState::Revealed);
        assert_eq!(board.frontier(), &Frontier::rebuild(board.grid()));

        // Nothing moves once the game is over.
        let before = states(&board);
        board.reveal((0, 0)).expect("reveal to be in bounds.");
        board.flag((1, 1)).expect("flag to be in bounds.");
        assert_eq!(states(&board), before);
    }

    #[test]
    fn losing_reveal_empties_frontier() {
        let mut board = Board::from_save(include_bytes!("../testing/boards/lone.txt"))
            .expect("board to parse correctly from file.");
        assert_eq!(board.frontier().len(), 5);
        board.reveal((1, 1)).expect("reveal to be in bounds.");
        assert_eq!(board.outcome(), Some(Outcome::Lost));
        assert!(board.frontier().is_empty());
        assert_eq!(board.frontier(), &Frontier::rebuild(board.grid()));
    }

    #[test]
    fn chord_reveals_around_satisfied_cell() {
        let mut board = Board::from_save(include_bytes!("../testing/boards/complete.txt"))
            .expect("board to parse correctly from file.");
        assert_eq!(board.grid().effective_remaining((1, 1)), Some(0));
        board.left_click((1, 1)).expect("click to be in bounds.");
        assert_eq!(board.revealed_count(), 8);
        assert_eq!(board.outcome(), Some(Outcome::Won));
    }

    #[test]
    fn chord_over_misplaced_flag_loses() {
        let mut board = Board::from_save(include_bytes!("../testing/boards/misflag.txt"))
            .expect("board to parse correctly from file.");
        board.left_click((1, 1)).expect("click to be in bounds.");
        assert_eq!(board.outcome(), Some(Outcome::Lost));
        assert_eq!(board.grid().cell((2, 0)).state, CellState::Revealed);
    }

    #[test]
    fn finish_is_reported_once() {
        let mut board = Board::from_save(include_bytes!("../testing/boards/cascade.txt"))
            .expect("board to parse correctly from file.");
        assert_eq!(board.take_finished(), None);
        board.reveal((0, 0)).expect("reveal to be in bounds.");
        assert_eq!(board.drain_changed().len(), 24);
        assert!(board.drain_changed().is_empty());

        board.expire();
        assert_eq!(
            board.take_finished(),
            Some(Snapshot {
                outcome: Some(Outcome::Lost),
                revealed: 24,
                flagged: 0,
                cells: 25,
            }),
        );
        assert_eq!(board.take_finished(), None);
    }

    #[test]
    fn frontier_tracks_flag_changes() {
        let mut board = Board::from_save(include_bytes!("../testing/boards/saturation.txt"))
            .expect("board to parse correctly from file.");
        assert!(board.frontier().contains((1, 1)));

        board.flag((0, 0)).expect("flag to be in bounds.");
        board.flag((2, 0)).expect("flag to be in bounds.");
        assert!(!board.frontier().contains((1, 1)));
        assert_eq!(board.outcome(), Some(Outcome::Won));
    }

    #[test]
    fn unflag_readmits_frontier_cell() {
        let mut board = Board::from_save(include_bytes!("../testing/boards/pairwise.txt"))
            .expect("board to parse correctly from file.");
        board.flag((0, 1)).expect("flag to be in bounds.");
        assert!(!board.frontier().contains((0, 0)));
        board.unflag((0, 1)).expect("unflag to be in bounds.");
        assert!(board.frontier().contains((0, 0)));
        assert_eq!(board.frontier(), &Frontier::rebuild(board.grid()));
    }

    #[test]
    fn display_window() {
        let mut board = Board::from_save(include_bytes!("../testing/boards/cascade.txt"))
            .expect("board to parse correctly from file.");
        board.reveal((0, 0)).expect("reveal to be in bounds.");
        let snippet = board.display((2, 2), (3, 3));
        assert_eq!(snippet.len(), 2);
        assert_eq!(&snippet[0][..], &['1', '1']);
        assert_eq!(&snippet[1][..], &['1', '\u{25A1}']);

        board.reveal((4, 4)).expect("reveal to be in bounds.");
        assert_eq!(board.display((5, 5), (0, 0))[4][4], 'M');
    }
}
