//! src/collection.rs
//!
//! Bouwt een collectie van `num_samples` onafhankelijke RR sets. De
//! kansattribuut-validatie gebeurt vooraf: een ongeldige graaf levert een fout
//! op voordat er ook maar één trekking is gedaan.

use crate::error::{Result, RisError};
use crate::graph::{EdgeProperty, Graph, PROBABILITY_KEY};
use crate::model::{DiffusionModel, IndependentCascade};
use crate::sampler::{RrSampler, RrSet};
use rand::Rng;

/// Geordende reeks RR sets; de index is de stabiele identificatie van een set.
pub type RrCollection = Vec<RrSet>;

/// Controleert de property map `"p"` en geeft de kansen per kant terug.
///
/// Faalt als de map ontbreekt, niet van het soort `Float` is, of een waarde
/// buiten `[0, 1]` (of NaN) bevat.
pub fn validate_probabilities(graph: &Graph) -> Result<&[f64]> {
    let probs = match graph.edge_property(PROBABILITY_KEY) {
        None => return Err(RisError::MissingProbability(PROBABILITY_KEY.to_string())),
        Some(EdgeProperty::Float(values)) => values,
        Some(other) => {
            return Err(RisError::WrongPropertyKind {
                name: PROBABILITY_KEY.to_string(),
                found: other.kind(),
            })
        }
    };
    if probs.len() != graph.m() {
        return Err(RisError::PropertyLength {
            name: PROBABILITY_KEY.to_string(),
            len: probs.len(),
            edges: graph.m(),
        });
    }
    // `contains` is onwaar voor NaN, dus NaN valt hier ook af.
    if let Some((edge, &value)) = probs
        .iter()
        .enumerate()
        .find(|(_, p)| !(0.0..=1.0).contains(*p))
    {
        return Err(RisError::ProbabilityOutOfRange { edge, value });
    }
    Ok(probs)
}

/// Genereert `num_samples` RR sets onder het independent cascade model.
/// `num_samples == 0` geeft direct een lege collectie terug.
pub fn generate_rr_sets<R>(graph: &Graph, num_samples: usize, rng: &mut R) -> Result<RrCollection>
where
    R: Rng + ?Sized,
{
    generate_rr_sets_with(graph, num_samples, IndependentCascade, rng)
}

/// Als [`generate_rr_sets`], maar met een willekeurig diffusiemodel.
/// De volgorde van de sets is de volgorde van trekken.
pub fn generate_rr_sets_with<M, R>(
    graph: &Graph,
    num_samples: usize,
    model: M,
    rng: &mut R,
) -> Result<RrCollection>
where
    M: DiffusionModel,
    R: Rng + ?Sized,
{
    if num_samples == 0 {
        return Ok(RrCollection::new());
    }
    let probs = validate_probabilities(graph)?;
    tracing::debug!(num_samples, n = graph.n(), m = graph.m(), "generating RR sets");

    let mut sampler = RrSampler::new(graph, probs, model);
    let rr_sets: RrCollection = (0..num_samples).map(|_| sampler.sample(rng)).collect();

    tracing::debug!(count = rr_sets.len(), "finished generating RR sets");
    Ok(rr_sets)
}

/// Totale omvang `Σ|RR_i|` van een collectie; bepaalt de kosten van selectie.
pub fn total_size(rr_sets: &[RrSet]) -> usize {
    rr_sets.iter().map(Vec::len).sum()
}
