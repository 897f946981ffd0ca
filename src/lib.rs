// src/lib.rs
//! Reverse Influence Sampling (RIS) voor influence maximization onder het
//! independent cascade model: trek RR sets, kies daarna seeds met greedy
//! maximum coverage.

// Publieke modules voor gebruik binnen de Rust-crate
pub mod collection;
pub mod coverage;
pub mod error;
pub mod graph;
pub mod index;
pub mod loader;
pub mod model;
pub mod params;
pub mod profile;
pub mod sampler;

// Her-exporteer de belangrijkste types voor Rust-gebruikers
pub use collection::{generate_rr_sets, generate_rr_sets_with, RrCollection};
pub use coverage::{select_seeds, select_seeds_with_coverage, SeedSet, Selection};
pub use error::{Result, RisError};
pub use graph::{EdgeProperty, Graph, PROBABILITY_KEY};
pub use model::{DiffusionModel, IndependentCascade};
pub use params::Params;
pub use profile::MemoryProfile;
pub use sampler::RrSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// Resultaat van een volledige run, inclusief tijdmetingen.
#[derive(Clone, Debug)]
pub struct RisReport {
    pub selection: Selection,
    pub sampling_time: Duration,
    pub selection_time: Duration,
    /// `Σ|RR_i|` over de getrokken collectie.
    pub total_rr_size: usize,
    /// RSS-profiel over sampling en selectie, alleen als `params.profile_memory`.
    pub memory: Option<MemoryProfile>,
}

/// Volledige pipeline: RR sets trekken met een ChaCha-generator geseed met
/// `params.seed`, en daarna `params.k` seeds kiezen.
pub fn run_ris(graph: &Graph, params: &Params) -> Result<RisReport> {
    if !params.profile_memory {
        return run_pipeline(graph, params);
    }
    let (report, memory) = profile::profile_memory(profile::DEFAULT_INTERVAL, || {
        run_pipeline(graph, params)
    });
    tracing::info!(
        peak_mib = memory.peak_mib(),
        average_mib = memory.average_mib(),
        samples = memory.samples,
        "memory profile"
    );
    let mut report = report?;
    report.memory = Some(memory);
    Ok(report)
}

fn run_pipeline(graph: &Graph, params: &Params) -> Result<RisReport> {
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);

    let start = Instant::now();
    let rr_sets = generate_rr_sets(graph, params.num_samples, &mut rng)?;
    let sampling_time = start.elapsed();
    let total_rr_size = collection::total_size(&rr_sets);
    tracing::info!(
        num_samples = rr_sets.len(),
        total_rr_size,
        elapsed = ?sampling_time,
        "RR sets generated"
    );

    let start = Instant::now();
    let selection = select_seeds_with_coverage(&rr_sets, params.k, graph.n());
    let selection_time = start.elapsed();
    tracing::info!(
        seeds = ?selection.seeds,
        covered = selection.covered,
        spread = selection.estimated_spread(graph.n()),
        elapsed = ?selection_time,
        "seed set selected"
    );

    Ok(RisReport {
        selection,
        sampling_time,
        selection_time,
        total_rr_size,
        memory: None,
    })
}

#[cfg(feature = "python")]
mod python {
    use super::*;
    use crate::loader::{load_edge_list_file, LoadOptions, ProbabilityPolicy};
    use pyo3::prelude::*;

    fn to_py_err(e: RisError) -> PyErr {
        match e {
            RisError::Io(io) => PyErr::new::<pyo3::exceptions::PyIOError, _>(io.to_string()),
            other => PyErr::new::<pyo3::exceptions::PyValueError, _>(other.to_string()),
        }
    }

    /// Python-binding voor de volledige RIS-pipeline.
    /// Geeft `(seeds in externe id's, gedekte RR sets, aantal RR sets, geschatte spreiding)`.
    #[pyfunction]
    #[pyo3(signature = (instance_path, py_params))]
    fn run_ris_py(
        instance_path: String,
        py_params: Py<Params>,
    ) -> PyResult<(Vec<i64>, usize, usize, f64)> {
        let p = Python::with_gil(|py| py_params.borrow(py).clone());
        let options = LoadOptions {
            policy: ProbabilityPolicy::Uniform(p.probability),
            ..LoadOptions::default()
        };
        let loaded = load_edge_list_file(&instance_path, &options).map_err(to_py_err)?;
        let report = run_ris(&loaded.graph, &p).map_err(to_py_err)?;
        let selection = report.selection;
        let seeds = loaded.to_original(&selection.seeds).ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>("seed outside the loaded graph")
        })?;
        Ok((
            seeds,
            selection.covered,
            selection.num_sets,
            selection.estimated_spread(loaded.graph.n()),
        ))
    }

    /// Helperfunctie om een edge-list te laden en (n, m) terug te geven.
    #[pyfunction]
    fn load_graph_py(instance_path: String) -> PyResult<(usize, usize)> {
        let loaded =
            load_edge_list_file(&instance_path, &LoadOptions::default()).map_err(to_py_err)?;
        Ok((loaded.graph.n(), loaded.graph.m()))
    }

    /// Definieert de Python-module `_native`.
    #[pymodule]
    fn _native(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<Params>()?;
        m.add_function(wrap_pyfunction!(run_ris_py, m)?)?;
        m.add_function(wrap_pyfunction!(load_graph_py, m)?)?;
        Ok(())
    }
}
