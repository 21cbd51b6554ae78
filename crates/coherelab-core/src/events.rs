//! Decoherence threshold events.
//!
//! A finalized session's parameters and derived metrics are checked
//! against five independent thresholds. Checks are not mutually
//! exclusive and run in a fixed order; a session can fire zero, one, or
//! all five events.

use serde::Serialize;

use crate::params::ParameterSet;
use crate::scoring::DerivedMetrics;

/// Event kind, in detector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    QuantumLockAchieved,
    EntanglementCascade,
    CryogenicStability,
    TemporalCoherence,
    PerfectVacuum,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuantumLockAchieved => write!(f, "quantum_lock_achieved"),
            Self::EntanglementCascade => write!(f, "entanglement_cascade"),
            Self::CryogenicStability => write!(f, "cryogenic_stability"),
            Self::TemporalCoherence => write!(f, "temporal_coherence"),
            Self::PerfectVacuum => write!(f, "perfect_vacuum"),
        }
    }
}

/// How consequential an event is for the stabilization program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Revolutionary,
    Breakthrough,
    Stabilization,
    ParadigmShift,
    Optimization,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Revolutionary => write!(f, "revolutionary"),
            Self::Breakthrough => write!(f, "breakthrough"),
            Self::Stabilization => write!(f, "stabilization"),
            Self::ParadigmShift => write!(f, "paradigm_shift"),
            Self::Optimization => write!(f, "optimization"),
        }
    }
}

/// Kind-specific payload, flattened into the serialized event record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventDetail {
    Stability { stability: f64 },
    NetworkSize { network_size: u64 },
    Temperature { temperature: f64 },
    Duration { duration: f64 },
    VacuumLevel { vacuum_level: f64 },
}

/// One threshold-crossing notification from a finalized session.
#[derive(Debug, Clone, Serialize)]
pub struct DecoherenceEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub message: &'static str,
    pub impact: Impact,
    #[serde(flatten)]
    pub detail: EventDetail,
}

/// Evaluate all five threshold checks against a finalized session.
///
/// Thresholds are strict (`>`, `<`). No matches yields an empty list;
/// there is no failure mode.
pub fn detect(params: &ParameterSet, metrics: &DerivedMetrics) -> Vec<DecoherenceEvent> {
    let mut events = Vec::new();

    if metrics.stability_strength > 85.0 {
        events.push(DecoherenceEvent {
            kind: EventKind::QuantumLockAchieved,
            message: "PARTICLE QUANTUM STATE LOCKED! Decoherence suppressed indefinitely!",
            impact: Impact::Revolutionary,
            detail: EventDetail::Stability {
                stability: metrics.stability_strength,
            },
        });
    }

    if metrics.entanglement_strength > 75.0 {
        events.push(DecoherenceEvent {
            kind: EventKind::EntanglementCascade,
            message: "Quantum entanglement cascade initiated! Particle network stabilizing!",
            impact: Impact::Breakthrough,
            detail: EventDetail::NetworkSize {
                network_size: (metrics.entanglement_strength / 10.0).floor() as u64,
            },
        });
    }

    if params.temperature_control < 50.0 {
        events.push(DecoherenceEvent {
            kind: EventKind::CryogenicStability,
            message: "Ultra-low temperature achieved! Thermal decoherence eliminated!",
            impact: Impact::Stabilization,
            detail: EventDetail::Temperature {
                temperature: params.temperature_control,
            },
        });
    }

    if params.coherence_time > 10_000.0 {
        events.push(DecoherenceEvent {
            kind: EventKind::TemporalCoherence,
            message: "Extended coherence time maintained! Quantum information preserved!",
            impact: Impact::ParadigmShift,
            detail: EventDetail::Duration {
                duration: params.coherence_time,
            },
        });
    }

    if params.pressure_vacuum > 1000.0 {
        events.push(DecoherenceEvent {
            kind: EventKind::PerfectVacuum,
            message: "Near-perfect vacuum achieved! Environmental decoherence minimized!",
            impact: Impact::Optimization,
            detail: EventDetail::VacuumLevel {
                vacuum_level: params.pressure_vacuum,
            },
        });
    }

    events
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
