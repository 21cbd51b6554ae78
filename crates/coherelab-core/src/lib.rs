//! # coherelab-core
//!
//! **A laboratory control loop as a library.**
//!
//! `coherelab-core` simulates a particle stabilization laboratory: an
//! operator adjusts seven physical control parameters during a timed
//! session, and the engine derives a composite stability score, an
//! entanglement network strength, and a particle yield from them.
//! Finalized sessions accumulate into an append-only history that feeds
//! a rolling-window trend classifier and a structured report generator.
//!
//! ## Quick Start
//!
//! ```
//! use coherelab_core::{ParamField, Stabilizer};
//!
//! let mut lab = Stabilizer::new();
//!
//! lab.start();
//! lab.update(ParamField::TemperatureControl, 20.0);
//! lab.update(ParamField::EntanglementDepth, 10.0);
//! let session = lab.finalize().expect("a session was active");
//!
//! assert!(session.metrics.stability_strength <= 100.0);
//! for event in &session.events {
//!     println!("{}: {}", event.kind, event.message);
//! }
//!
//! let report = lab.report();
//! assert_eq!(report.stabilization_metrics.total_sessions, 1);
//! ```
//!
//! ## Architecture
//!
//! Parameters → Derived metrics → Finalize (events + trend + fold) → Report
//!
//! The engine is a pure, total-function design: no operation raises a
//! hard failure. Invalid parameter writes sanitize to documented
//! defaults, lifecycle calls in the wrong state are no-ops (logged at
//! `warn`), and no formula can store NaN. All core operations run
//! synchronously to completion; the only external collaborator is a
//! millisecond [`Clock`], injectable for deterministic replays.

pub mod cumulative;
pub mod events;
pub mod params;
pub mod report;
pub mod scoring;
pub mod session;
pub mod trend;

pub use cumulative::CumulativeState;
pub use events::{DecoherenceEvent, EventDetail, EventKind, Impact};
pub use params::{
    DEFAULT_LASER_FREQUENCY, DEFAULT_TEMPERATURE, ParamField, ParameterSet,
};
pub use report::{StabilizationReport, suggested_filename};
pub use scoring::DerivedMetrics;
pub use session::{
    Clock, DraftSession, ManualClock, Session, Stabilizer, SystemClock,
};
pub use trend::{CoherenceTrend, TrendAnalysis};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
