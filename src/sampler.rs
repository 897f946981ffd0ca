//! src/sampler.rs
//!
//! Live-edge sampler: trekt één live-edge realisatie en berekent daarop één
//! Reverse-Reachable (RR) set via een BFS vanuit een willekeurige wortel over
//! de omgekeerde, live-gefilterde graaf.
//!
//! De sampler houdt scratch-buffers vast (visited-stempels en de live-bits)
//! die over opeenvolgende steekproeven worden hergebruikt. Dit heeft geen
//! invloed op de resultaten.

use crate::graph::Graph;
use crate::model::DiffusionModel;
use bitvec::prelude::*;
use rand::Rng;

/// Een RR set: de wortel staat vooraan, daarna de knopen in ontdekkingsvolgorde.
/// Alleen de verzameling is betekenisvol; elke knoop komt precies één keer voor.
pub type RrSet = Vec<usize>;

/// Eén Bernoulli-realisatie van kantactiviteit, geïndexeerd op kant-id.
#[derive(Clone, Debug, Default)]
pub struct LiveEdgeInstance {
    live: BitVec,
}

impl LiveEdgeInstance {
    /// Trekt een nieuwe realisatie: één uniforme trekking per kant.
    pub fn draw<M, R>(probabilities: &[f64], model: &M, rng: &mut R) -> Self
    where
        M: DiffusionModel + ?Sized,
        R: Rng + ?Sized,
    {
        let mut inst = Self::default();
        inst.redraw(probabilities, model, rng);
        inst
    }

    /// Overschrijft de huidige realisatie met een verse trekking, zonder opnieuw te alloceren.
    pub fn redraw<M, R>(&mut self, probabilities: &[f64], model: &M, rng: &mut R)
    where
        M: DiffusionModel + ?Sized,
        R: Rng + ?Sized,
    {
        self.live.clear();
        self.live
            .extend(probabilities.iter().map(|&p| model.is_live(p, rng.gen::<f64>())));
    }

    #[inline]
    pub fn is_live(&self, edge: usize) -> bool {
        self.live[edge]
    }

    /// Aantal live kanten in deze realisatie.
    pub fn live_count(&self) -> usize {
        self.live.count_ones()
    }
}

/// Trekt RR sets uit één graaf met één diffusiemodel.
pub struct RrSampler<'g, M> {
    graph: &'g Graph,
    probabilities: &'g [f64],
    model: M,
    instance: LiveEdgeInstance,
    /// `visited[v] == stamp` betekent: `v` is al bezocht in de huidige BFS.
    visited: Vec<u32>,
    stamp: u32,
}

impl<'g, M: DiffusionModel> RrSampler<'g, M> {
    /// `probabilities[e]` is de activatiekans van kant `e`; de lengte moet `graph.m()` zijn.
    /// Gebruik [`crate::collection::validate_probabilities`] om een gecontroleerde slice te krijgen.
    ///
    /// # Panics
    ///
    /// Als `probabilities.len() != graph.m()`.
    pub fn new(graph: &'g Graph, probabilities: &'g [f64], model: M) -> Self {
        assert_eq!(
            probabilities.len(),
            graph.m(),
            "één kans per kant vereist"
        );
        Self {
            graph,
            probabilities,
            model,
            instance: LiveEdgeInstance::default(),
            visited: vec![0u32; graph.n()],
            stamp: 0,
        }
    }

    /// Trekt een uniforme wortel en daarna een live-edge realisatie.
    /// Een graaf zonder knopen levert een lege set op en verbruikt geen randomness.
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> RrSet {
        let n = self.graph.n();
        if n == 0 {
            return RrSet::new();
        }
        let root = rng.gen_range(0..n);
        self.sample_from(root, rng)
    }

    /// Als [`RrSampler::sample`], maar met een vaste wortel.
    ///
    /// # Panics
    ///
    /// Als `root >= graph.n()`.
    pub fn sample_from<R: Rng + ?Sized>(&mut self, root: usize, rng: &mut R) -> RrSet {
        assert!(root < self.graph.n(), "wortel buiten bereik");
        self.instance.redraw(self.probabilities, &self.model, rng);
        self.reverse_reachable(root)
    }

    /// BFS vanuit `root` langs inkomende live kanten. De uitvoervector dient zelf als wachtrij.
    fn reverse_reachable(&mut self, root: usize) -> RrSet {
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            // Overloop: oude stempels kunnen anders als "bezocht" gelden.
            self.visited.fill(0);
            self.stamp = 1;
        }
        let stamp = self.stamp;

        let mut reached = vec![root];
        self.visited[root] = stamp;
        let mut head = 0usize;
        while head < reached.len() {
            let cur = reached[head];
            head += 1;
            for &(src, e) in self.graph.in_edges(cur) {
                if self.visited[src] != stamp && self.instance.is_live(e) {
                    self.visited[src] = stamp;
                    reached.push(src);
                }
            }
        }
        reached
    }
}
