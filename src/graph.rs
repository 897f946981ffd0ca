//! src/graph.rs
//!
//! Representeert een gerichte graaf met dichte knoop-id's `0..n` en kant-id's
//! `0..m` (in invoegvolgorde). Zowel de voorwaartse als de omgekeerde
//! adjacency worden in CSR-vorm opgeslagen, zodat een omgekeerde BFS geen
//! aparte "reversed view" nodig heeft. Kantattributen leven in benoemde
//! property maps, net als in graph-tool; de kern leest alleen de map `"p"`.

use crate::error::{Result, RisError};
use std::collections::BTreeMap;

/// Naam van de property map met activatiekansen.
pub const PROBABILITY_KEY: &str = "p";

/// Een kantattribuut: één waarde per kant, geïndexeerd op kant-id.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeProperty {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Bool(Vec<bool>),
}

impl EdgeProperty {
    /// Naam van de waardesoort, voor foutmeldingen.
    pub fn kind(&self) -> &'static str {
        match self {
            EdgeProperty::Float(_) => "float",
            EdgeProperty::Int(_) => "int",
            EdgeProperty::Bool(_) => "bool",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EdgeProperty::Float(v) => v.len(),
            EdgeProperty::Int(v) => v.len(),
            EdgeProperty::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compressed sparse row: `adj[offsets[v]..offsets[v + 1]]` zijn de buren van `v`
/// als paren `(buur, kant-id)`.
#[derive(Clone, Debug, Default)]
struct Csr {
    offsets: Vec<usize>,
    adj: Vec<(usize, usize)>,
}

impl Csr {
    /// Bouwt de CSR met een counting sort op het beginpunt (of, omgekeerd, het eindpunt).
    fn build(n: usize, edges: &[(usize, usize)], reversed: bool) -> Self {
        let mut offsets = vec![0usize; n + 1];
        for &(u, v) in edges {
            let from = if reversed { v } else { u };
            offsets[from + 1] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }
        let mut cursor = offsets.clone();
        let mut adj = vec![(0usize, 0usize); edges.len()];
        for (e, &(u, v)) in edges.iter().enumerate() {
            let (from, to) = if reversed { (v, u) } else { (u, v) };
            adj[cursor[from]] = (to, e);
            cursor[from] += 1;
        }
        Self { offsets, adj }
    }

    #[inline]
    fn row(&self, v: usize) -> &[(usize, usize)] {
        &self.adj[self.offsets[v]..self.offsets[v + 1]]
    }
}

/// Een gerichte graaf met kantattributen. Na constructie is de structuur
/// onveranderlijk; alleen property maps kunnen nog worden toegevoegd.
#[derive(Clone, Debug)]
pub struct Graph {
    n: usize,
    edges: Vec<(usize, usize)>,
    out_csr: Csr,
    in_csr: Csr,
    properties: BTreeMap<String, EdgeProperty>,
}

impl Graph {
    /*────────── Constructors ──────────*/

    /// Creëert een graaf met `n` geïsoleerde knopen en geen kanten.
    pub fn with_vertices(n: usize) -> Self {
        Self::from_edges(n, &[])
    }

    /// Bouwt een graaf op basis van een lijst gerichte kanten `u -> v` (0-gebaseerd).
    /// Kanten met een eindpunt buiten `0..n` worden genegeerd.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let edges: Vec<(usize, usize)> =
            edges.iter().copied().filter(|&(u, v)| u < n && v < n).collect();
        Self {
            n,
            out_csr: Csr::build(n, &edges, false),
            in_csr: Csr::build(n, &edges, true),
            edges,
            properties: BTreeMap::new(),
        }
    }

    /// Bouwt een graaf met een kans per kant, opgeslagen als property map `"p"`.
    pub fn with_probabilities(n: usize, edges: &[(usize, usize, f64)]) -> Self {
        let kept: Vec<(usize, usize, f64)> =
            edges.iter().copied().filter(|&(u, v, _)| u < n && v < n).collect();
        let pairs: Vec<(usize, usize)> = kept.iter().map(|&(u, v, _)| (u, v)).collect();
        let mut g = Self::from_edges(n, &pairs);
        let probs = kept.iter().map(|&(_, _, p)| p).collect();
        g.properties
            .insert(PROBABILITY_KEY.to_string(), EdgeProperty::Float(probs));
        g
    }

    /*────────── Getters ──────────*/

    /// Geeft het aantal knopen (vertices) in de graaf terug.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Geeft het aantal gerichte kanten terug.
    #[inline]
    pub fn m(&self) -> usize {
        self.edges.len()
    }

    /// Eindpunten `(bron, doel)` van kant `e`.
    #[inline]
    pub fn edge(&self, e: usize) -> (usize, usize) {
        self.edges[e]
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Uitgaande kanten van `v` als `(doel, kant-id)`.
    #[inline]
    pub fn out_edges(&self, v: usize) -> &[(usize, usize)] {
        self.out_csr.row(v)
    }

    /// Inkomende kanten van `v` als `(bron, kant-id)`.
    #[inline]
    pub fn in_edges(&self, v: usize) -> &[(usize, usize)] {
        self.in_csr.row(v)
    }

    #[inline]
    pub fn out_degree(&self, v: usize) -> usize {
        self.out_edges(v).len()
    }

    #[inline]
    pub fn in_degree(&self, v: usize) -> usize {
        self.in_edges(v).len()
    }

    /// Geeft de property map met de gegeven naam terug, indien aanwezig.
    pub fn edge_property(&self, name: &str) -> Option<&EdgeProperty> {
        self.properties.get(name)
    }

    /*────────── Mutators ──────────*/

    /// Koppelt een property map aan de kanten. Vervangt een bestaande map met dezelfde naam.
    pub fn set_edge_property(&mut self, name: &str, property: EdgeProperty) -> Result<()> {
        if property.len() != self.m() {
            return Err(RisError::PropertyLength {
                name: name.to_string(),
                len: property.len(),
                edges: self.m(),
            });
        }
        self.properties.insert(name.to_string(), property);
        Ok(())
    }

    /// Kent elke kant dezelfde activatiekans `p` toe (de "uniform"-strategie).
    pub fn set_uniform_probability(&mut self, p: f64) {
        self.properties.insert(
            PROBABILITY_KEY.to_string(),
            EdgeProperty::Float(vec![p; self.m()]),
        );
    }
}
