use std::iter::FusedIterator;

use crate::Combination;

/// Lazy iterator over every `size`-subset of a population.
///
/// Subsets are produced in lexicographic order of population positions, i.e. the
/// standard k-combination order over indices `0..n`. Each yielded [`Combination`]
/// is sorted by member value regardless of the population order.
///
/// Created by [`CombinationGenerator::all`](crate::CombinationGenerator::all).
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    members: &'a [u32],
    indices: Vec<usize>,
    started: bool,
    finished: bool,
}

impl<'a> Combinations<'a> {
    pub(crate) fn new(members: &'a [u32], size: usize) -> Self {
        Self {
            members,
            indices: (0..size).collect(),
            started: false,
            finished: size > members.len(),
        }
    }

    fn current(&self) -> Combination {
        Combination::new(self.indices.iter().map(|&i| self.members[i]).collect())
    }

    /// Moves `indices` to the next subset; returns `false` once the last one was reached.
    fn advance(&mut self) -> bool {
        let n = self.members.len();
        let k = self.indices.len();
        let Some(pivot) = (0..k).rev().find(|&i| self.indices[i] != i + n - k) else {
            return false;
        };
        self.indices[pivot] += 1;
        for i in pivot + 1..k {
            self.indices[i] = self.indices[i - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations<'_> {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current());
        }
        if self.advance() {
            Some(self.current())
        } else {
            self.finished = true;
            None
        }
    }
}

impl FusedIterator for Combinations<'_> {}
