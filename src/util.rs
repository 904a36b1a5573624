use indexmap::IndexSet;

/// Splits two sets into (only in `aa`, in both, only in `bb`).
pub fn split_sets<T: Eq + std::hash::Hash + Copy>(aa: &IndexSet<T>, bb: &IndexSet<T>) -> (IndexSet<T>, IndexSet<T>, IndexSet<T>) {
    (
        aa.difference(bb).cloned().collect(),
        aa.intersection(bb).cloned().collect(),
        bb.difference(aa).cloned().collect(),
    )
}

#[cfg(test)]
mod test {
    use indexmap::IndexSet;

    use super::split_sets;

    #[test]
    fn split_keeps_insertion_order() {
        let aa: IndexSet<_> = vec![3, 1, 2].into_iter().collect();
        let bb: IndexSet<_> = vec![2, 4, 3].into_iter().collect();
        let (only_a, both, only_b) = split_sets(&aa, &bb);
        assert_eq!(only_a.into_iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(both.into_iter().collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(only_b.into_iter().collect::<Vec<_>>(), vec![4]);
    }
}
