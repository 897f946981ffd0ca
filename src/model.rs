//! src/model.rs
//!
//! Het diffusiemodel bepaalt of een kant "live" is in één steekproef. Traversal
//! en greedy-selectie kennen alleen deze trait, zodat een ander cascademodel
//! kan worden toegevoegd zonder die code aan te raken.

/// Beslist de liveness van een kant op basis van zijn attributen en een
/// uniforme trekking uit `[0, 1)`.
pub trait DiffusionModel {
    fn is_live(&self, probability: f64, draw: f64) -> bool;
}

/// Independent cascade: een kant is live desda de trekking strikt kleiner is
/// dan zijn activatiekans. Dus `p = 0.0` is nooit live en `p = 1.0` altijd.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndependentCascade;

impl DiffusionModel for IndependentCascade {
    #[inline]
    fn is_live(&self, probability: f64, draw: f64) -> bool {
        draw < probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ic_boundaries() {
        let ic = IndependentCascade;
        assert!(!ic.is_live(0.0, 0.0));
        assert!(ic.is_live(1.0, 0.999_999));
        assert!(ic.is_live(0.5, 0.25));
        assert!(!ic.is_live(0.5, 0.5));
    }
}
