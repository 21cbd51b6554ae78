//! Process-wide cumulative metrics, folded on every session finalize.
//!
//! Every field derives strictly from the sequence of finalized sessions —
//! nothing here is written outside the two fold phases invoked by
//! [`Stabilizer::finalize`](crate::session::Stabilizer::finalize).

use serde::Serialize;

use crate::scoring::DerivedMetrics;
use crate::trend::TrendAnalysis;

/// Cumulative process metrics. Single instance per engine, alive for the
/// life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CumulativeState {
    /// Accumulated coherence level, saturating at 100.
    pub quantum_coherence: f64,
    /// Accumulated particle stability index, saturating at 100.
    pub particle_stability: f64,
    /// Long-horizon projection multiplier; never drops below 1.0.
    pub field_harmonics: f64,
    /// Event-driven entanglement accumulator, saturating at 100.
    pub entanglement_strength: f64,
    /// Total particles stabilized across all sessions. Unbounded.
    pub stabilized_particles: u64,
}

impl Default for CumulativeState {
    fn default() -> Self {
        Self {
            quantum_coherence: 0.0,
            particle_stability: 0.0,
            field_harmonics: 1.0,
            entanglement_strength: 0.0,
            stabilized_particles: 0,
        }
    }
}

impl CumulativeState {
    /// First fold phase: absorb a finalized session's per-session metrics.
    ///
    /// After this call `quantum_coherence` holds the value recorded on the
    /// session as its coherence snapshot.
    pub fn absorb_metrics(&mut self, metrics: &DerivedMetrics) {
        self.quantum_coherence =
            (self.quantum_coherence + metrics.stability_strength / 10.0).min(100.0);
        self.particle_stability =
            (self.particle_stability + metrics.entanglement_strength / 20.0).min(100.0);
        self.stabilized_particles += metrics.particles_stabilized;
    }

    /// Second fold phase: absorb the trend over the updated history and
    /// the session's event count.
    pub fn absorb_trend(&mut self, trend: &TrendAnalysis, event_count: usize) {
        self.field_harmonics =
            (self.field_harmonics + trend.stability_index * 0.05).max(1.0);
        self.entanglement_strength =
            (self.entanglement_strength + event_count as f64 * 5.0).min(100.0);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::CoherenceTrend;

    fn metrics(stability: f64, entanglement: f64, particles: u64) -> DerivedMetrics {
        DerivedMetrics {
            stability_strength: stability,
            entanglement_strength: entanglement,
            particles_stabilized: particles,
        }
    }

    fn trend(index: f64) -> TrendAnalysis {
        TrendAnalysis {
            coherence: CoherenceTrend::Fluctuating,
            stability_index: index,
        }
    }

    #[test]
    fn test_default_floors() {
        let state = CumulativeState::default();
        assert_eq!(state.field_harmonics, 1.0);
        assert_eq!(state.quantum_coherence, 0.0);
        assert_eq!(state.stabilized_particles, 0);
    }

    #[test]
    fn test_absorb_metrics_accumulates() {
        let mut state = CumulativeState::default();
        state.absorb_metrics(&metrics(50.0, 40.0, 25));
        assert_eq!(state.quantum_coherence, 5.0);
        assert_eq!(state.particle_stability, 2.0);
        assert_eq!(state.stabilized_particles, 25);
    }

    #[test]
    fn test_percentage_fields_saturate_at_100() {
        let mut state = CumulativeState::default();
        for _ in 0..50 {
            state.absorb_metrics(&metrics(100.0, 5000.0, 1));
        }
        assert_eq!(state.quantum_coherence, 100.0);
        assert_eq!(state.particle_stability, 100.0);
        // The particle total is unbounded.
        assert_eq!(state.stabilized_particles, 50);
    }

    #[test]
    fn test_harmonics_never_drop_below_one() {
        let mut state = CumulativeState::default();
        state.absorb_trend(&trend(-500.0), 0);
        assert_eq!(state.field_harmonics, 1.0);
    }

    #[test]
    fn test_harmonics_grow_with_favorable_trend() {
        let mut state = CumulativeState::default();
        state.absorb_trend(&trend(20.0), 0);
        assert!((state.field_harmonics - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_event_accumulator_steps_by_five() {
        let mut state = CumulativeState::default();
        state.absorb_trend(&trend(0.0), 3);
        assert_eq!(state.entanglement_strength, 15.0);

        for _ in 0..30 {
            state.absorb_trend(&trend(0.0), 5);
        }
        assert_eq!(state.entanglement_strength, 100.0);
    }
}
