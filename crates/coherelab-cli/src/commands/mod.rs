//! Command implementations and shared scenario/printing helpers.

pub mod report;
pub mod run;
pub mod simulate;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use coherelab_core::{
    Clock, ManualClock, ParamField, Session, Stabilizer, SystemClock,
};

// ---------------------------------------------------------------------------
// Scenario files
// ---------------------------------------------------------------------------

/// One scripted session: parameter writes plus a dwell before finalize.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioSession {
    /// Parameter writes by wire name (`"magnetic_field"` etc.). Unknown
    /// names are warned about and skipped.
    #[serde(default)]
    pub params: BTreeMap<String, f64>,

    /// Session length in seconds.
    #[serde(default = "default_duration")]
    pub duration_seconds: f64,

    /// Idle gap before the next session in seconds.
    #[serde(default)]
    pub gap_seconds: f64,
}

fn default_duration() -> f64 {
    60.0
}

/// A scripted sequence of stabilization sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub sessions: Vec<ScenarioSession>,
}

/// Read and parse a scenario JSON file.
pub fn load_scenario(path: &str) -> Result<Scenario, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read scenario '{path}': {e}"))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid scenario '{path}': {e}"))
}

/// Replay a scenario through a fresh engine.
///
/// The engine runs on a manual clock seeded from the wall clock, advanced
/// by each session's scripted dwell and gap, so timestamps are realistic
/// while durations stay exactly as scripted.
pub fn execute_scenario(scenario: &Scenario) -> Stabilizer {
    let clock = Arc::new(ManualClock::new(SystemClock.now_ms()));
    let mut lab = Stabilizer::with_clock(Arc::clone(&clock));

    for (i, step) in scenario.sessions.iter().enumerate() {
        lab.start();
        for (name, value) in &step.params {
            match ParamField::parse(name) {
                Some(field) => {
                    lab.update(field, *value);
                }
                None => eprintln!(
                    "Warning: session {}: ignoring unknown parameter '{name}'",
                    i + 1
                ),
            }
        }
        clock.advance((step.duration_seconds.max(0.0) * 1000.0) as u64);
        lab.finalize();
        clock.advance((step.gap_seconds.max(0.0) * 1000.0) as u64);
    }

    lab
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

/// One-line-per-session summary table.
pub fn print_session_table(sessions: &[Session]) {
    println!(
        "{:<4} {:>10} {:>10} {:>10} {:>7} {:>8}",
        "#", "stability", "network", "particles", "events", "dur_s"
    );
    println!("{}", "-".repeat(54));
    for (i, s) in sessions.iter().enumerate() {
        println!(
            "{:<4} {:>9.1}% {:>10.1} {:>10} {:>7} {:>8.1}",
            i + 1,
            s.metrics.stability_strength,
            s.metrics.entanglement_strength,
            s.metrics.particles_stabilized,
            s.events.len(),
            s.duration_seconds
        );
    }
}

/// Fired decoherence events, per session.
pub fn print_events(sessions: &[Session]) {
    let mut any = false;
    for (i, s) in sessions.iter().enumerate() {
        for event in &s.events {
            any = true;
            println!("  [{}] {:<22} {}", i + 1, event.kind.to_string(), event.message);
        }
    }
    if !any {
        println!("  (no decoherence events)");
    }
}

/// Cumulative state and current trend.
pub fn print_cumulative(lab: &Stabilizer) {
    let c = lab.cumulative();
    let trend = lab.trend();
    println!();
    println!("Cumulative state");
    println!("  Quantum coherence:   {:.1}%", c.quantum_coherence);
    println!("  Particle stability:  {:.1}%", c.particle_stability);
    println!("  Field harmonics:     {:.2}x", c.field_harmonics);
    println!("  Entanglement:        {:.1}%", c.entanglement_strength);
    println!("  Particles total:     {}", c.stabilized_particles);
    println!(
        "  Trend:               {} ({:+.2}/min)",
        trend.coherence, trend.stability_index
    );
}

/// Serialize the engine's report and write it to `path`.
pub fn write_report(lab: &Stabilizer, path: &str) {
    let report = lab.report();
    let json = match report.to_pretty_json() {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing report: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(path, json) {
        eprintln!("Error writing report to {path}: {e}");
        std::process::exit(1);
    }
    println!();
    println!("Report saved to {path}");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
