//! Derived metric formulas.
//!
//! Three pure functions turn a [`ParameterSet`] into a session's derived
//! metrics. [`DerivedMetrics::from_params`] is the one derivation entry
//! point — lifecycle code calls it after every parameter write instead of
//! updating any metric in place, so there is no hidden recomputation
//! order to reason about.

use serde::{Deserialize, Serialize};

use crate::params::ParameterSet;

/// Metrics derived from a parameter set, never independently mutated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Composite stability score, clamped to [0, 100].
    pub stability_strength: f64,
    /// Entanglement network strength. Unclamped: values past 100 mark
    /// network amplification beyond the per-session scale.
    pub entanglement_strength: f64,
    /// Whole particles held stable this session.
    pub particles_stabilized: u64,
}

impl DerivedMetrics {
    /// Derive all three metrics from a parameter set.
    pub fn from_params(params: &ParameterSet) -> Self {
        let stability = stability_strength(params);
        Self {
            stability_strength: stability,
            entanglement_strength: entanglement_strength(
                stability,
                params.entanglement_depth,
            ),
            particles_stabilized: particles_stabilized(
                stability,
                params.entanglement_depth,
            ),
        }
    }
}

/// Composite multi-field stability score in [0, 100].
///
/// Seven independent factors share one scale and sum:
///
/// ```text
/// magnetic      ln(1 + B) * 10
/// electric      sqrt(E) * 5
/// temperature   max(0, (300 - T) / 10)
/// vacuum        P^0.3 * 20
/// laser         sin(f / 1e6) * 15 + 15
/// coherence     tanh(t / 1000) * 25
/// entanglement  d^0.8 * 10
/// ```
///
/// Total over all inputs: negative magnetic/electric/vacuum values are
/// treated as 0 before `ln`/`sqrt`/`powf` so no factor can produce NaN.
pub fn stability_strength(params: &ParameterSet) -> f64 {
    let magnetic = (1.0 + params.magnetic_field.max(0.0)).ln() * 10.0;
    let electric = params.electric_field.max(0.0).sqrt() * 5.0;
    let temperature = ((300.0 - params.temperature_control) / 10.0).max(0.0);
    let vacuum = params.pressure_vacuum.max(0.0).powf(0.3) * 20.0;
    let laser = (params.laser_frequency / 1_000_000.0).sin() * 15.0 + 15.0;
    let coherence = (params.coherence_time / 1000.0).tanh() * 25.0;
    let entanglement = f64::from(params.entanglement_depth).powf(0.8) * 10.0;

    (magnetic + electric + temperature + vacuum + laser + coherence + entanglement)
        .min(100.0)
}

/// Entanglement network strength from a stability score and network depth.
///
/// `sqrt(depth) * (stability / 100)^2 * 100` — deliberately unclamped at
/// the per-session level; only the cumulative accumulator saturates.
pub fn entanglement_strength(stability_strength: f64, depth: u32) -> f64 {
    let network = f64::from(depth).sqrt();
    let bonus = (stability_strength / 100.0).powi(2);
    network * bonus * 100.0
}

/// Whole-particle yield: `floor(stability * depth / 10)`.
pub fn particles_stabilized(stability_strength: f64, depth: u32) -> u64 {
    let raw = stability_strength * f64::from(depth) / 10.0;
    raw.max(0.0).floor() as u64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
