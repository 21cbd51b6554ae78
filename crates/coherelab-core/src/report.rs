//! Structured stabilization report assembly.
//!
//! Field names and units in this module are the export schema — they are
//! preserved verbatim so newly generated reports stay comparable with
//! previously exported ones. Assembly is pure: the caller supplies the
//! generation timestamp and the core performs no I/O.

use serde::Serialize;

use crate::cumulative::CumulativeState;
use crate::events::{self, DecoherenceEvent};
use crate::session::Session;
use crate::trend::{self, CoherenceTrend};

/// System identifier stamped into report metadata.
pub const SYSTEM_NAME: &str = "coherelab Particle Stabilizer v0.2";

/// Laboratory identifier stamped into report metadata.
pub const LABORATORY: &str = "Coherence Laboratory Control Systems";

// ---------------------------------------------------------------------------
// Report record
// ---------------------------------------------------------------------------

/// The full stabilization report.
#[derive(Debug, Clone, Serialize)]
pub struct StabilizationReport {
    pub metadata: ReportMetadata,
    pub stabilization_metrics: StabilizationMetrics,
    pub quantum_control_analysis: ControlAnalysis,
    pub session_log: Vec<SessionLogRow>,
    pub decoherence_prevention_events: Vec<DecoherenceEvent>,
    pub quantum_projections: Projections,
    pub stabilization_signature: Signature,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// ISO-8601 generation timestamp.
    pub generated: String,
    pub system: &'static str,
    pub laboratory: &'static str,
    pub field_harmonics: f64,
    pub total_stabilized_particles: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StabilizationMetrics {
    pub total_sessions: usize,
    pub quantum_coherence_level: f64,
    pub particle_stability_index: f64,
    pub entanglement_network_strength: f64,
    pub field_stability_rating: CoherenceTrend,
    pub harmonic_resonance_factor: f64,
    /// Mean stability strength across all sessions; 0 for an empty history.
    pub decoherence_suppression_rate: f64,
}

/// Counts of sessions crossing named control thresholds.
#[derive(Debug, Clone, Serialize)]
pub struct ControlAnalysis {
    pub magnetic_field_sessions: usize,
    pub cryogenic_operations: usize,
    pub high_vacuum_experiments: usize,
    pub laser_frequency_locks: usize,
    pub extended_coherence_events: usize,
    pub entanglement_networks: usize,
}

/// One per-session row with unit-labeled fields.
#[derive(Debug, Clone, Serialize)]
pub struct SessionLogRow {
    pub timestamp: String,
    pub duration_seconds: f64,
    pub magnetic_field_tesla: f64,
    pub electric_field_vm: f64,
    pub temperature_kelvin: f64,
    /// Actual chamber pressure — the inverse of the vacuum-quality input.
    pub vacuum_pressure_torr: f64,
    pub laser_frequency_hz: f64,
    pub coherence_time_ms: f64,
    pub entanglement_depth: u32,
    pub stability_strength: f64,
    pub entanglement_network_strength: f64,
    pub particles_stabilized: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Projections {
    pub next_breakthrough_probability: f64,
    pub particle_stabilization_scaling: ScalingProjection,
    pub field_control_optimization: ControlGuidance,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScalingProjection {
    pub hourly_projection: f64,
    pub daily_projection: f64,
    pub quantum_computer_readiness: &'static str,
}

/// Fixed guidance block: the control ranges the stabilizer is tuned for.
#[derive(Debug, Clone, Serialize)]
pub struct ControlGuidance {
    pub optimal_magnetic_field: &'static str,
    pub optimal_temperature: &'static str,
    pub optimal_vacuum: &'static str,
    pub coherence_target: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Signature {
    pub control_system_classification: &'static str,
    pub reality_control_level: f64,
    pub next_evolution: &'static str,
    pub quantum_mastery_index: f64,
    pub civilization_impact: &'static str,
}

impl StabilizationReport {
    /// Pretty JSON rendering for the export sink.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Assemble the full report from the cumulative state and session history.
pub fn generate(
    cumulative: &CumulativeState,
    history: &[Session],
    generated_at_ms: u64,
) -> StabilizationReport {
    let analysis = trend::analyze(history);

    let suppression_rate = if history.is_empty() {
        0.0
    } else {
        history
            .iter()
            .map(|s| s.metrics.stability_strength)
            .sum::<f64>()
            / history.len() as f64
    };

    let session_log = history
        .iter()
        .map(|s| SessionLogRow {
            timestamp: format_iso8601_ms(s.started_at_ms),
            duration_seconds: s.duration_seconds,
            magnetic_field_tesla: s.params.magnetic_field,
            electric_field_vm: s.params.electric_field,
            temperature_kelvin: s.params.temperature_control,
            vacuum_pressure_torr: 1.0 / s.params.pressure_vacuum,
            laser_frequency_hz: s.params.laser_frequency,
            coherence_time_ms: s.params.coherence_time,
            entanglement_depth: s.params.entanglement_depth,
            stability_strength: s.metrics.stability_strength,
            entanglement_network_strength: s.metrics.entanglement_strength,
            particles_stabilized: s.metrics.particles_stabilized,
        })
        .collect();

    // The detector re-applied over history; identical to the stored
    // per-session events but flattened into one chronological list.
    let all_events = history
        .iter()
        .flat_map(|s| events::detect(&s.params, &s.metrics))
        .collect();

    let particles = cumulative.stabilized_particles as f64;
    let scaling = ScalingProjection {
        hourly_projection: particles * cumulative.field_harmonics,
        daily_projection: particles * cumulative.field_harmonics.powi(24),
        quantum_computer_readiness: if cumulative.stabilized_particles > 1_000_000 {
            "Quantum Supremacy Achieved"
        } else {
            "Scaling Required"
        },
    };

    StabilizationReport {
        metadata: ReportMetadata {
            generated: format_iso8601_ms(generated_at_ms),
            system: SYSTEM_NAME,
            laboratory: LABORATORY,
            field_harmonics: cumulative.field_harmonics,
            total_stabilized_particles: cumulative.stabilized_particles,
        },
        stabilization_metrics: StabilizationMetrics {
            total_sessions: history.len(),
            quantum_coherence_level: cumulative.quantum_coherence,
            particle_stability_index: cumulative.particle_stability,
            entanglement_network_strength: cumulative.entanglement_strength,
            field_stability_rating: analysis.coherence,
            harmonic_resonance_factor: cumulative.field_harmonics,
            decoherence_suppression_rate: suppression_rate,
        },
        quantum_control_analysis: ControlAnalysis {
            magnetic_field_sessions: count(history, |s| s.params.magnetic_field > 100.0),
            cryogenic_operations: count(history, |s| s.params.temperature_control < 100.0),
            high_vacuum_experiments: count(history, |s| s.params.pressure_vacuum > 100.0),
            laser_frequency_locks: count(history, |s| {
                (s.params.laser_frequency - 532_000_000.0).abs() < 1_000_000.0
            }),
            extended_coherence_events: count(history, |s| s.params.coherence_time > 5000.0),
            entanglement_networks: count(history, |s| s.params.entanglement_depth > 5),
        },
        session_log,
        decoherence_prevention_events: all_events,
        quantum_projections: Projections {
            next_breakthrough_probability: (analysis.stability_index * 0.03)
                .clamp(0.0, 0.98),
            particle_stabilization_scaling: scaling,
            field_control_optimization: ControlGuidance {
                optimal_magnetic_field: "10-100 Tesla",
                optimal_temperature: "< 1 Kelvin",
                optimal_vacuum: "< 10^-12 Torr",
                coherence_target: "Indefinite (Perfect Stability)",
            },
        },
        stabilization_signature: Signature {
            control_system_classification: "Quantum Field Manipulation",
            reality_control_level: (cumulative.quantum_coherence / 10.0).min(10.0),
            next_evolution: if cumulative.quantum_coherence > 90.0 {
                "Universal Particle Control"
            } else {
                "Continue Field Optimization"
            },
            quantum_mastery_index: ((cumulative.quantum_coherence
                + cumulative.particle_stability
                + cumulative.entanglement_strength)
                / 3.0)
                .min(100.0),
            civilization_impact: if cumulative.stabilized_particles > 10_000_000 {
                "Type 3 Quantum Civilization"
            } else if cumulative.stabilized_particles > 1_000_000 {
                "Type 2 Quantum Technology"
            } else {
                "Type 1 Quantum Control"
            },
        },
    }
}

/// Suggested export filename incorporating the generation timestamp.
pub fn suggested_filename(generated_at_ms: u64) -> String {
    format!("particle_stabilization_{generated_at_ms}.json")
}

fn count(history: &[Session], pred: impl Fn(&Session) -> bool) -> usize {
    history.iter().filter(|s| pred(s)).count()
}

// ---------------------------------------------------------------------------
// ISO-8601 formatting
// ---------------------------------------------------------------------------

/// Format milliseconds since the Unix epoch as `2026-02-15T01:30:00.250Z`.
fn format_iso8601_ms(ms: u64) -> String {
    let (year, month, day, hour, min, sec) = secs_to_utc(ms / 1000);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year,
        month,
        day,
        hour,
        min,
        sec,
        ms % 1000
    )
}

/// Convert seconds since the Unix epoch to (year, month, day, hour,
/// minute, second) UTC. No leap second handling.
fn secs_to_utc(secs: u64) -> (u64, u64, u64, u64, u64, u64) {
    let sec = secs % 60;
    let min = (secs / 60) % 60;
    let hour = (secs / 3600) % 24;

    let mut days = secs / 86400;
    let mut year = 1970u64;

    loop {
        let days_in_year = if is_leap(year) { 366 } else { 365 };
        if days < days_in_year {
            break;
        }
        days -= days_in_year;
        year += 1;
    }

    let months_days: [u64; 12] = if is_leap(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 0u64;
    for (i, &md) in months_days.iter().enumerate() {
        if days < md {
            month = i as u64 + 1;
            break;
        }
        days -= md;
    }
    let day = days + 1;

    (year, month, day, hour, min, sec)
}

fn is_leap(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
