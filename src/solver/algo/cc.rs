use indexmap::IndexMap;

use crate::{
    board::{Board, Loc},
    solver::{algo::Component, region::Region},
};

struct Node {
    parent: usize,
    rank: usize,
}

struct DisjointSet(Box<[Node]>);

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self((0..len).map(|a| Node { parent: a, rank: 0 }).collect())
    }

    fn root(&mut self, id: usize) -> usize {
        let mut root = id;
        while self.0[root].parent != root {
            root = self.0[root].parent;
        }
        // Path compression.
        let mut current = id;
        while current != root {
            let next = self.0[current].parent;
            self.0[current].parent = root;
            current = next;
        }
        root
    }

    fn join(&mut self, id_0: usize, id_1: usize) {
        let (root_0, root_1) = (self.root(id_0), self.root(id_1));
        if root_0 == root_1 {
            return;
        }
        // Join by rank.
        let (rank_0, rank_1) = (self.0[root_0].rank, self.0[root_1].rank);
        if rank_0 < rank_1 {
            self.0[root_0].parent = root_1;
        } else if rank_0 > rank_1 {
            self.0[root_1].parent = root_0;
        } else {
            self.0[root_1].parent = root_0;
            self.0[root_0].rank += 1;
        }
    }

    /// Groups `stuff` by root, in order of each group's first member.
    fn split_on_groups<T>(mut self, stuff: Vec<T>) -> Vec<Vec<T>> {
        debug_assert_eq!(stuff.len(), self.0.len());
        let mut mapping: IndexMap<usize, Vec<T>> = IndexMap::new();
        for (id, item) in stuff.into_iter().enumerate() {
            let root = self.root(id);
            mapping.entry(root).or_insert_with(Vec::new).push(item);
        }
        mapping.into_iter().map(|(_, group)| group).collect()
    }
}

/// Splits the frontier into groups of cells connected through neighbouring frontier cells.
pub fn components(board: &Board) -> Vec<Component> {
    let regions = Region::frontier(board);
    let index: IndexMap<Loc, usize> = regions.iter()
        .enumerate()
        .map(|(i, r)| (r.anchor, i))
        .collect();

    let mut unions = DisjointSet::new(regions.len());
    for (i, region) in regions.iter().enumerate() {
        for neighbor in board.grid().neighbors_of(region.anchor) {
            if let Some(&j) = index.get(neighbor) {
                unions.join(i, j);
            }
        }
    }

    unions.split_on_groups(regions)
        .into_iter()
        .map(|regions| Component { regions })
        .collect()
}
