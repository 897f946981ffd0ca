//! src/loader.rs
//!
//! Leest een edge-list (`bron doel` per regel, witruimte-gescheiden) en bouwt
//! een compacte `Graph`: dubbele kanten en zelf-lussen worden verwijderd en de
//! externe id's worden hernummerd naar `0..n` in volgorde van eerste voorkomen
//! (bron vóór doel). De omgekeerde afbeelding wordt meegegeven zodat seeds in
//! de oorspronkelijke id-ruimte kunnen worden gerapporteerd.
//!
//! Bestanden met de extensie `.gz` worden via `flate2` gedecomprimeerd.

use crate::error::{Result, RisError};
use crate::graph::Graph;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

/// Hoe activatiekansen aan kanten worden toegekend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProbabilityPolicy {
    /// Elke kant krijgt dezelfde kans.
    Uniform(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadOptions {
    /// Regels (of regeldelen) vanaf dit prefix worden genegeerd.
    pub comment: Option<String>,
    pub policy: ProbabilityPolicy,
    /// Bij `false` wordt elke kant in beide richtingen toegevoegd, elk met een
    /// eigen kans.
    pub directed: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            comment: Some("#".to_string()),
            policy: ProbabilityPolicy::Uniform(0.1),
            directed: true,
        }
    }
}

/// Een geladen graaf plus `compact_to_original[v]` = externe id van knoop `v`.
#[derive(Clone, Debug)]
pub struct LoadedGraph {
    pub graph: Graph,
    pub compact_to_original: Vec<i64>,
}

impl LoadedGraph {
    /// Vertaalt compacte knoop-id's terug naar de externe id's.
    /// Geeft `None` als een id buiten `0..n` valt.
    pub fn to_original(&self, vertices: &[usize]) -> Option<Vec<i64>> {
        vertices
            .iter()
            .map(|&v| self.compact_to_original.get(v).copied())
            .collect()
    }
}

/// Parset een edge-list vanuit een reader.
pub fn load_edge_list<R: Read>(reader: R, options: &LoadOptions) -> Result<LoadedGraph> {
    let mut raw_edges: Vec<(i64, i64)> = Vec::new();

    for (line_no, line_result) in BufReader::new(reader).lines().enumerate() {
        let line = line_result?;
        let content = match &options.comment {
            Some(prefix) if !prefix.is_empty() => match line.find(prefix.as_str()) {
                Some(pos) => &line[..pos],
                None => &line[..],
            },
            _ => &line[..],
        };

        let mut parts = content.split_whitespace();
        let (src, dst) = match (parts.next(), parts.next()) {
            (None, _) => continue,
            (Some(s), Some(t)) => (s, t),
            (Some(_), None) => {
                return Err(RisError::Parse {
                    line: line_no + 1,
                    message: "expected 'source target'".to_string(),
                })
            }
        };
        // Extra kolommen (bijv. gewichten) worden genegeerd.
        let parse = |tok: &str| {
            tok.parse::<i64>().map_err(|e| RisError::Parse {
                line: line_no + 1,
                message: format!("invalid vertex id '{}': {}", tok, e),
            })
        };
        raw_edges.push((parse(src)?, parse(dst)?));
    }

    let read = raw_edges.len();
    let mut seen: HashSet<(i64, i64)> = HashSet::with_capacity(raw_edges.len());
    raw_edges.retain(|&(u, v)| u != v && seen.insert((u, v)));
    tracing::debug!(read, unique = raw_edges.len(), "cleaned edge list");

    let mut original_to_compact: HashMap<i64, usize> = HashMap::new();
    let mut compact_to_original: Vec<i64> = Vec::new();
    let mut compact = |id: i64| {
        *original_to_compact.entry(id).or_insert_with(|| {
            compact_to_original.push(id);
            compact_to_original.len() - 1
        })
    };
    let mut edges: Vec<(usize, usize)> = raw_edges
        .iter()
        .map(|&(u, v)| {
            let cu = compact(u);
            (cu, compact(v))
        })
        .collect();

    if !options.directed {
        // `a b` en `b a` in de invoer leveren hetzelfde paar gerichte kanten op.
        let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(2 * edges.len());
        edges = edges
            .iter()
            .flat_map(|&(u, v)| [(u, v), (v, u)])
            .filter(|&e| seen.insert(e))
            .collect();
    }

    let mut graph = Graph::from_edges(compact_to_original.len(), &edges);
    match options.policy {
        ProbabilityPolicy::Uniform(p) => graph.set_uniform_probability(p),
    }

    tracing::info!(
        vertices = graph.n(),
        edges = graph.m(),
        directed = options.directed,
        "graph loaded"
    );
    Ok(LoadedGraph {
        graph,
        compact_to_original,
    })
}

/// Opent `path` en parset het als edge-list; een `.gz`-bestand wordt eerst gedecomprimeerd.
pub fn load_edge_list_file<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<LoadedGraph> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "loading graph");
    let file = File::open(path)?;
    if path.extension().map_or(false, |ext| ext == "gz") {
        tracing::debug!("detected .gz file, using gzip decompression");
        load_edge_list(GzDecoder::new(file), options)
    } else {
        load_edge_list(file, options)
    }
}
