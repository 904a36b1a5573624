use indexmap::IndexSet;

use crate::{
    board::{Board, Grid, Loc},
    util::split_sets,
};

// Regions have a definite number of mines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// The revealed cell the count comes from.
    pub anchor: Loc,
    pub mines: i32,
    pub hidden: IndexSet<Loc>,
}

// Construction.
impl Region {
    pub fn new(anchor: Loc, mines: i32, hidden: IndexSet<Loc>) -> Self {
        Self {
            anchor,
            mines,
            hidden,
        }
    }

    pub fn around(grid: &Grid, anchor: Loc) -> Option<Region> {
        let mines = grid.effective_remaining(anchor)?;
        Some(Region::new(anchor, mines, grid.free_neighbors(anchor)))
    }

    /// One region per frontier cell that still touches a hidden cell, in frontier order.
    pub fn frontier(board: &Board) -> Vec<Region> {
        board.frontier()
            .members()
            .iter()
            .filter_map(|&loc| Region::around(board.grid(), loc))
            .filter(|r| !r.hidden.is_empty())
            .collect()
    }
}

// Stat calculation.
impl Region {
    pub fn is_all_mines(&self) -> bool {
        !self.hidden.is_empty() && self.hidden.len() as i32 == self.mines
    }

    /// Whether `other`'s anchor sits next to this one's.
    pub fn borders(&self, grid: &Grid, other: &Region) -> bool {
        grid.neighbors_of(self.anchor).contains(&other.anchor)
    }
}

/// Two overlapping regions split into the cells only the first sees (`r0`), the shared cells
/// (`rs`) and the cells only the second sees (`r1`), with the mine count forced into each part.
#[derive(Debug, PartialEq, Eq)]
pub struct LinkedSubRegion {
    pub r0: IndexSet<Loc>,
    pub rs: IndexSet<Loc>,
    pub r1: IndexSet<Loc>,
    pub m0: i32,
    pub ms: i32,
    pub m1: i32,
}

impl LinkedSubRegion {
    /// Only links whose shared mine count has a single possible value come back.
    pub fn deduce(parent0: &Region, parent1: &Region) -> Option<LinkedSubRegion> {
        let (r0, rs, r1) = split_sets(&parent0.hidden, &parent1.hidden);
        if r0.is_empty() && rs.is_empty() && r1.is_empty() {
            return None;
        }
        let (p0_mines, p1_mines) = (parent0.mines, parent1.mines);

        // The shared part holds at least whatever does not fit in either exclusive part...
        let rs_min_mines = 0i32
            .max(p0_mines - r0.len() as i32)
            .max(p1_mines - r1.len() as i32);
        // ...and at most what fits in it and what either parent has to give.
        let rs_max_mines = (rs.len() as i32).min(p0_mines).min(p1_mines);
        if rs_min_mines != rs_max_mines {
            return None;
        }

        Some(LinkedSubRegion {
            m0: p0_mines - rs_min_mines,
            ms: rs_min_mines,
            m1: p1_mines - rs_min_mines,
            r0,
            rs,
            r1,
        })
    }

    /// Cells of any part that are certainly empty or certainly mined.
    pub fn conclusions(&self) -> (IndexSet<Loc>, IndexSet<Loc>) {
        let mut empty = IndexSet::new();
        let mut mined = IndexSet::new();
        let parts = [(&self.r0, self.m0), (&self.rs, self.ms), (&self.r1, self.m1)];
        for (part, mines) in parts.iter() {
            if *mines == 0 {
                empty.extend(part.iter().cloned());
            } else if *mines == part.len() as i32 {
                mined.extend(part.iter().cloned());
            }
        }
        (empty, mined)
    }
}

#[cfg(test)]
mod test {
    use indexmap::IndexSet;

    use super::{LinkedSubRegion, Region};
    use crate::board::Board;

    fn region(anchor: (usize, usize), mines: i32, hidden: &[(usize, usize)]) -> Region {
        Region::new(anchor, mines, hidden.iter().cloned().collect())
    }

    fn test_board() -> Board {
        Board::from_save(include_bytes!("../../testing/boards/pairwise.txt"))
            .expect("board to parse correctly from file.")
    }

    #[test]
    fn around_counts_flags_and_hidden() {
        let board = Board::from_save(include_bytes!("../../testing/boards/saturation.txt"))
            .expect("board to parse correctly from file.");
        let r = Region::around(board.grid(), (1, 1)).expect("revealed cell to have a region.");
        assert_eq!(r, region((1, 1), 2, &[(0, 0), (2, 0)]));
        assert!(r.is_all_mines());
        assert_eq!(Region::around(board.grid(), (0, 0)), None);
    }

    #[test]
    fn frontier_regions_follow_frontier() {
        let board = test_board();
        let regions = Region::frontier(&board);
        assert_eq!(regions.len(), 3);
        assert!(regions[0].borders(board.grid(), &regions[1]));
        assert!(!regions[0].borders(board.grid(), &regions[2]));
    }

    #[test]
    fn one_two_one_links() {
        let n0 = region((0, 0), 1, &[(0, 1), (1, 1)]);
        let n1 = region((1, 0), 2, &[(0, 1), (1, 1), (2, 1)]);

        let link = LinkedSubRegion::deduce(&n0, &n1).expect("shared count to be forced.");
        assert_eq!((link.m0, link.ms, link.m1), (0, 1, 1));
        let (empty, mined) = link.conclusions();
        assert!(empty.is_empty());
        assert_eq!(mined, vec![(2, 1)].into_iter().collect::<IndexSet<_>>());

        let link = LinkedSubRegion::deduce(&n1, &n0).expect("shared count to be forced.");
        assert_eq!((link.m0, link.ms, link.m1), (1, 1, 0));
        assert_eq!(link.conclusions().1, vec![(2, 1)].into_iter().collect::<IndexSet<_>>());
    }

    #[test]
    fn ambiguous_links_are_dropped() {
        let a = region((0, 0), 1, &[(0, 1), (1, 1)]);
        let b = region((1, 0), 1, &[(1, 1), (2, 1)]);
        assert_eq!(LinkedSubRegion::deduce(&a, &b), None);
        assert_eq!(LinkedSubRegion::deduce(&a, &region((5, 5), 1, &[])), None);
    }

    #[test]
    fn subset_link_clears_remainder() {
        let a = region((0, 0), 1, &[(0, 1), (1, 1)]);
        let b = region((1, 0), 1, &[(0, 1), (1, 1), (2, 1)]);
        let link = LinkedSubRegion::deduce(&a, &b).expect("shared count to be forced.");
        let (empty, mined) = link.conclusions();
        assert_eq!(empty, vec![(2, 1)].into_iter().collect::<IndexSet<_>>());
        assert!(mined.is_empty());
    }

    #[test]
    fn forced_shared_part_is_concluded() {
        let full = region((0, 0), 2, &[(0, 1), (1, 1)]);
        let wide = region((1, 0), 2, &[(0, 1), (1, 1), (2, 1)]);
        let link = LinkedSubRegion::deduce(&full, &wide).expect("shared count to be forced.");
        assert_eq!((link.m0, link.ms, link.m1), (0, 2, 0));
        let (empty, mined) = link.conclusions();
        assert_eq!(empty, vec![(2, 1)].into_iter().collect::<IndexSet<_>>());
        assert_eq!(mined, vec![(0, 1), (1, 1)].into_iter().collect::<IndexSet<_>>());

        let clear = region((0, 0), 0, &[(0, 1), (1, 1)]);
        let one = region((1, 0), 1, &[(0, 1), (1, 1), (2, 1)]);
        let link = LinkedSubRegion::deduce(&clear, &one).expect("shared count to be forced.");
        assert_eq!(link.ms, 0);
        let (empty, mined) = link.conclusions();
        assert_eq!(empty, vec![(0, 1), (1, 1)].into_iter().collect::<IndexSet<_>>());
        assert_eq!(mined, vec![(2, 1)].into_iter().collect::<IndexSet<_>>());
    }
}
