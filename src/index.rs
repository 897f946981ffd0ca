//! src/index.rs
//!
//! Inverted coverage index: voor elke knoop de indices van de RR sets waarin
//! hij voorkomt. Eén keer gebouwd per collectie, daarna alleen gelezen.

use crate::sampler::RrSet;

/// CSR-layout: `sets[offsets[v]..offsets[v + 1]]` zijn de RR-set-indices van knoop `v`,
/// oplopend gesorteerd.
#[derive(Clone, Debug)]
pub struct InvertedIndex {
    offsets: Vec<usize>,
    sets: Vec<usize>,
}

impl InvertedIndex {
    /// Bouwt de index in twee lineaire passes over de collectie (tellen, dan vullen).
    /// Knoop-id's `>= num_vertices` worden genegeerd, en een knoop die meerdere
    /// keren in dezelfde RR set staat telt voor die set maar één keer.
    pub fn build(rr_sets: &[RrSet], num_vertices: usize) -> Self {
        // `last_set[v]` is de laatste set waarin `v` al is meegeteld.
        let mut last_set = vec![usize::MAX; num_vertices];
        let mut offsets = vec![0usize; num_vertices + 1];
        for (i, rr) in rr_sets.iter().enumerate() {
            for &v in rr {
                if v < num_vertices && last_set[v] != i {
                    last_set[v] = i;
                    offsets[v + 1] += 1;
                }
            }
        }
        for v in 0..num_vertices {
            offsets[v + 1] += offsets[v];
        }

        last_set.fill(usize::MAX);
        let mut cursor = offsets[..num_vertices].to_vec();
        let mut sets = vec![0usize; offsets[num_vertices]];
        for (i, rr) in rr_sets.iter().enumerate() {
            for &v in rr {
                if v < num_vertices && last_set[v] != i {
                    last_set[v] = i;
                    sets[cursor[v]] = i;
                    cursor[v] += 1;
                }
            }
        }
        Self { offsets, sets }
    }

    /// Aantal knopen waarvoor de index is gebouwd.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.offsets.len() - 1
    }

    /// RR-set-indices die knoop `v` bevatten.
    #[inline]
    pub fn sets_containing(&self, v: usize) -> &[usize] {
        &self.sets[self.offsets[v]..self.offsets[v + 1]]
    }

    /// `|InvertedIndex[v]|`, de initiële marginale winst van `v`.
    #[inline]
    pub fn frequency(&self, v: usize) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }
}
