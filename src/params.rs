// src/params.rs
//! src/params.rs
//!
//! Bundelt alle afstembare parameters voor een RIS-run.

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Alle afstembare besturingselementen voor sampling en seed-selectie.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    /// Aantal RR sets dat wordt getrokken.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub num_samples: usize,
    /// Seed-budget.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub k: usize,
    /// Random seed voor de ChaCha-generator van de pipeline.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub seed: u64,
    /// Uniforme activatiekans die de loader aan elke kant toekent.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub probability: f64,
    /// Meet tijdens de run het RSS van het proces (piek en gemiddelde).
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub profile_memory: bool,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            num_samples: 10_000,
            k: 10,
            seed: 42,
            probability: 0.1,
            profile_memory: false,
        }
    }
}

impl Params {
    pub fn new(num_samples: usize, k: usize, seed: u64, probability: f64) -> Self {
        Self {
            num_samples,
            k,
            seed,
            probability,
            profile_memory: false,
        }
    }

    /// Zet budget en steekproefgrootte in één keer.
    pub fn with_budget(&mut self, k: usize, num_samples: usize) -> &mut Self {
        self.k = k;
        self.num_samples = num_samples;
        self
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl Params {
    #[new]
    #[pyo3(signature = (
        num_samples = 10_000,
        k = 10,
        seed = 42,
        probability = 0.1,
        profile_memory = false,
    ))]
    fn py_new(num_samples: i64, k: usize, seed: u64, probability: f64, profile_memory: bool) -> Self {
        // Een negatief aantal steekproeven betekent: geen steekproeven.
        let mut p = Self::new(num_samples.max(0) as usize, k, seed, probability);
        p.profile_memory = profile_memory;
        p
    }

    /// Methode om een kopie te maken, blootgesteld aan Python
    pub fn copy(&self) -> Self {
        self.clone()
    }
}
