//! Integration tests for coherelab-core.
//!
//! These tests drive the full control loop:
//! start → parameter updates → finalize → cumulative fold → report.

use std::sync::Arc;

use coherelab_core::{
    CoherenceTrend, EventKind, ManualClock, ParamField, Stabilizer,
};

#[test]
fn full_session_fires_expected_events_and_accumulates() {
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let mut lab = Stabilizer::with_clock(Arc::clone(&clock));

    assert!(lab.start());
    assert!(lab.update(ParamField::TemperatureControl, 10.0));
    assert!(lab.update(ParamField::PressureVacuum, 1500.0));
    assert!(lab.update(ParamField::CoherenceTime, 12_000.0));
    assert!(lab.update(ParamField::EntanglementDepth, 10.0));
    clock.advance(120_000);

    let session = lab.finalize().expect("active session");
    let kinds: Vec<EventKind> = session.events.iter().map(|e| e.kind).collect();
    assert!(kinds.contains(&EventKind::CryogenicStability));
    assert!(kinds.contains(&EventKind::TemporalCoherence));
    assert!(kinds.contains(&EventKind::PerfectVacuum));

    let particles = session.metrics.particles_stabilized;
    let duration = session.duration_seconds;
    assert!(particles > 0);
    assert!((duration - 120.0).abs() < 1e-9);
    assert_eq!(lab.cumulative().stabilized_particles, particles);
}

#[test]
fn report_particle_total_tracks_running_sum_after_every_finalize() {
    let clock = Arc::new(ManualClock::new(0));
    let mut lab = Stabilizer::with_clock(Arc::clone(&clock));

    let mut running_sum = 0u64;
    for depth in [1.0, 5.0, 20.0, 50.0] {
        lab.start();
        lab.update(ParamField::EntanglementDepth, depth);
        lab.update(ParamField::CoherenceTime, 2000.0);
        clock.advance(60_000);
        let session = lab.finalize().expect("active session");
        running_sum += session.metrics.particles_stabilized;

        let report = lab.report();
        assert_eq!(
            report.metadata.total_stabilized_particles, running_sum,
            "report total diverged from running sum"
        );
    }
}

#[test]
fn trend_emerges_from_session_cadence() {
    let clock = Arc::new(ManualClock::new(0));
    let mut lab = Stabilizer::with_clock(Arc::clone(&clock));

    assert_eq!(lab.trend().coherence, CoherenceTrend::Initializing);

    // Strong sessions a minute apart: each adds ~10 coherence points,
    // a rate of ~10/minute — stabilizing territory.
    for _ in 0..3 {
        lab.start();
        lab.update(ParamField::TemperatureControl, 1.0);
        lab.update(ParamField::PressureVacuum, 2000.0);
        lab.update(ParamField::CoherenceTime, 20_000.0);
        clock.advance(60_000);
        lab.finalize();
    }

    let trend = lab.trend();
    assert_eq!(trend.coherence, CoherenceTrend::Stabilizing);
    assert!(trend.stability_index > 5.0 && trend.stability_index <= 15.0);

    let report = lab.report();
    assert_eq!(
        report.stabilization_metrics.field_stability_rating,
        CoherenceTrend::Stabilizing
    );
}

#[test]
fn lifecycle_misuse_is_harmless() {
    let mut lab = Stabilizer::new();

    assert!(!lab.update(ParamField::MagneticField, 1.0));
    assert!(lab.finalize().is_none());

    assert!(lab.start());
    assert!(!lab.start());
    assert!(lab.is_active());

    assert!(lab.finalize().is_some());
    assert!(lab.finalize().is_none());
    assert_eq!(lab.history().len(), 1);
}

#[test]
fn report_serializes_with_export_schema() {
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let mut lab = Stabilizer::with_clock(Arc::clone(&clock));

    lab.start();
    lab.update(ParamField::MagneticField, 150.0);
    clock.advance(30_000);
    lab.finalize();

    let report = lab.report();
    let json: serde_json::Value =
        serde_json::from_str(&report.to_pretty_json().unwrap()).unwrap();

    assert_eq!(json["quantum_control_analysis"]["magnetic_field_sessions"], 1);
    assert_eq!(json["session_log"][0]["magnetic_field_tesla"], 150.0);
    assert_eq!(json["stabilization_metrics"]["total_sessions"], 1);
    assert!(json["metadata"]["generated"]
        .as_str()
        .unwrap()
        .ends_with('Z'));
}
