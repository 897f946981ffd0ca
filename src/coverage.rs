//! src/coverage.rs
//!
//! Greedy maximum coverage over een RR-collectie. In plaats van elke ronde alle
//! winsten opnieuw te berekenen, houden we per knoop een marginale-winst-teller
//! bij die alleen wordt verlaagd op het moment dat een RR set van "ongedekt" naar
//! "gedekt" gaat. Elke set draagt dus precies één keer bij aan het updatewerk:
//! totaal O(Σ|RR_i| + k·n).
//!
//! Gelijke winsten worden beslist in het voordeel van het kleinste knoop-id,
//! zodat herhaalde aanroepen op dezelfde collectie hetzelfde resultaat geven.

use crate::index::InvertedIndex;
use crate::sampler::RrSet;
use bitvec::prelude::*;

/// Geselecteerde seeds in selectievolgorde.
pub type SeedSet = Vec<usize>;

/// Resultaat van een selectie, met de dekking op de collectie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub seeds: SeedSet,
    /// Aantal RR sets dat minstens één seed bevat.
    pub covered: usize,
    /// Totaal aantal RR sets in de collectie.
    pub num_sets: usize,
}

impl Selection {
    /// Fractie gedekte RR sets; 0.0 voor een lege collectie.
    pub fn coverage_fraction(&self) -> f64 {
        if self.num_sets == 0 {
            0.0
        } else {
            self.covered as f64 / self.num_sets as f64
        }
    }

    /// Schatting van de verwachte cascade-omvang: `n · covered / N`.
    pub fn estimated_spread(&self, num_vertices: usize) -> f64 {
        num_vertices as f64 * self.coverage_fraction()
    }
}

/// De veranderlijke toestand van één greedy-run. Alle buffers zijn privé voor
/// deze run; de collectie en de index worden alleen gelezen.
pub struct GreedyCover<'a> {
    rr_sets: &'a [RrSet],
    index: &'a InvertedIndex,
    /// Voor niet-geselecteerde `v`: aantal nog ongedekte RR sets met `v`.
    gains: Vec<usize>,
    selected: BitVec,
    covered: BitVec,
    /// `last_decrement[u]` is de laatste gedekte set waarvoor `u` al is verlaagd.
    last_decrement: Vec<usize>,
    covered_count: usize,
    seeds: SeedSet,
}

impl<'a> GreedyCover<'a> {
    /*────────── Constructors ──────────*/

    /// Initialiseert de winsten op `|InvertedIndex[v]|`.
    pub fn new(rr_sets: &'a [RrSet], index: &'a InvertedIndex) -> Self {
        let n = index.num_vertices();
        Self {
            rr_sets,
            index,
            gains: (0..n).map(|v| index.frequency(v)).collect(),
            selected: bitvec![0; n],
            covered: bitvec![0; rr_sets.len()],
            last_decrement: vec![usize::MAX; n],
            covered_count: 0,
            seeds: SeedSet::new(),
        }
    }

    /*────────── Queries ──────────*/

    /// Huidige marginale winst van `v`. Voor een geselecteerde knoop is dit
    /// de (bevroren) winst op het moment van selectie en niet betekenisvol.
    #[inline]
    pub fn gain(&self, v: usize) -> usize {
        self.gains[v]
    }

    #[inline]
    pub fn is_selected(&self, v: usize) -> bool {
        self.selected[v]
    }

    #[inline]
    pub fn is_covered(&self, set: usize) -> bool {
        self.covered[set]
    }

    pub fn covered_count(&self) -> usize {
        self.covered_count
    }

    pub fn seeds(&self) -> &[usize] {
        &self.seeds
    }

    /// Niet-geselecteerde knoop met de hoogste winst; bij gelijkspel het kleinste id.
    fn best_candidate(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for v in self.selected.iter_zeros() {
            match best {
                Some(b) if self.gains[v] <= self.gains[b] => {}
                _ => best = Some(v),
            }
        }
        best
    }

    /*────────── Mutators ──────────*/

    /// Voert één greedy-iteratie uit. Geeft de gekozen knoop terug, of `None`
    /// als geen enkele kandidaat nog een ongedekte RR set kan dekken.
    pub fn step(&mut self) -> Option<usize> {
        let best = self.best_candidate()?;
        if self.gains[best] == 0 {
            return None;
        }

        self.selected.set(best, true);
        self.seeds.push(best);

        let index = self.index;
        let rr_sets = self.rr_sets;
        let n = self.gains.len();
        for &i in index.sets_containing(best) {
            if self.covered[i] {
                continue;
            }
            self.covered.set(i, true);
            self.covered_count += 1;
            // Herhaalde id's binnen één set worden maar één keer verlaagd.
            for &u in &rr_sets[i] {
                if u < n && !self.selected[u] && self.last_decrement[u] != i {
                    self.last_decrement[u] = i;
                    self.gains[u] -= 1;
                }
            }
        }
        Some(best)
    }

    /// Sluit de run af en geeft het resultaat terug.
    pub fn into_selection(self) -> Selection {
        Selection {
            seeds: self.seeds,
            covered: self.covered_count,
            num_sets: self.rr_sets.len(),
        }
    }
}

/// Kiest hoogstens `k` seeds met greedy maximum coverage.
///
/// Een resultaat korter dan `k` is geen fout: het betekent dat geen enkele
/// resterende knoop nog een ongedekte RR set kan dekken.
pub fn select_seeds(rr_sets: &[RrSet], k: usize, num_vertices: usize) -> SeedSet {
    select_seeds_with_coverage(rr_sets, k, num_vertices).seeds
}

/// Als [`select_seeds`], maar geeft ook de bereikte dekking terug.
pub fn select_seeds_with_coverage(rr_sets: &[RrSet], k: usize, num_vertices: usize) -> Selection {
    if k == 0 {
        return Selection {
            seeds: SeedSet::new(),
            covered: 0,
            num_sets: rr_sets.len(),
        };
    }

    let index = InvertedIndex::build(rr_sets, num_vertices);
    let mut greedy = GreedyCover::new(rr_sets, &index);
    while greedy.seeds().len() < k {
        match greedy.step() {
            Some(v) => tracing::trace!(seed = v, covered = greedy.covered_count(), "picked seed"),
            None => break,
        }
    }

    let selection = greedy.into_selection();
    tracing::debug!(
        k,
        selected = selection.seeds.len(),
        covered = selection.covered,
        num_sets = selection.num_sets,
        "greedy maximum coverage finished"
    );
    selection
}

/// Telt hoeveel RR sets minstens één knoop uit `seeds` bevatten.
pub fn coverage_of(rr_sets: &[RrSet], seeds: &[usize], num_vertices: usize) -> usize {
    let mut is_seed = bitvec![0; num_vertices];
    for &s in seeds.iter().filter(|&&s| s < num_vertices) {
        is_seed.set(s, true);
    }
    rr_sets
        .iter()
        .filter(|rr| rr.iter().any(|&v| v < num_vertices && is_seed[v]))
        .count()
}
