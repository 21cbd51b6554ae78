//! Session lifecycle: draft sessions, finalized sessions, and the
//! engine that owns the history and cumulative state.
//!
//! The lifecycle is a two-state machine. **Idle**: no draft exists;
//! `start()` creates one. **Active**: the draft accepts parameter writes,
//! with derived metrics recomputed synchronously on every write;
//! `finalize()` freezes the draft into an immutable [`Session`], folds it
//! into the cumulative state, and returns to Idle. Lifecycle calls made
//! in the wrong state are ignorable caller errors — they return
//! `false`/`None` and log at `warn`, never panic.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use uuid::Uuid;

use crate::cumulative::CumulativeState;
use crate::events::{self, DecoherenceEvent};
use crate::params::{ParamField, ParameterSet};
use crate::report::{self, StabilizationReport};
use crate::scoring::DerivedMetrics;
use crate::trend::{self, TrendAnalysis};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Millisecond timestamp source, consumed at `start()`, `finalize()`, and
/// report generation.
pub trait Clock: Send {
    fn now_ms(&self) -> u64;
}

/// Wall-clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Settable clock for tests and scripted replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::Relaxed);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

impl<C: Clock + Sync + ?Sized> Clock for Arc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// The active draft: parameters still mutable, metrics recomputed on
/// every write.
#[derive(Debug, Clone, Serialize)]
pub struct DraftSession {
    pub id: String,
    pub started_at_ms: u64,
    pub params: ParameterSet,
    pub metrics: DerivedMetrics,
}

/// One finalized stabilization session. Immutable once appended to the
/// history.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: String,
    pub started_at_ms: u64,
    pub ended_at_ms: u64,
    pub duration_seconds: f64,
    pub params: ParameterSet,
    pub metrics: DerivedMetrics,
    pub events: Vec<DecoherenceEvent>,
    /// Cumulative quantum coherence recorded at this session's completion,
    /// differenced by the trend analyzer across the rolling window.
    pub coherence_snapshot: f64,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The stabilization engine: lifecycle state machine, append-only session
/// history, and the cumulative process metrics.
///
/// Single-threaded by construction — every operation takes `&mut self`
/// and runs to completion before returning.
pub struct Stabilizer {
    clock: Box<dyn Clock>,
    draft: Option<DraftSession>,
    history: Vec<Session>,
    cumulative: CumulativeState,
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stabilizer {
    /// Engine driven by the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Engine with an injected clock (tests, scripted replays).
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            draft: None,
            history: Vec::new(),
            cumulative: CumulativeState::default(),
        }
    }

    /// Begin a new draft session with default parameters.
    ///
    /// Returns `false` and leaves the active draft untouched if a session
    /// is already running.
    pub fn start(&mut self) -> bool {
        if self.draft.is_some() {
            log::warn!("start() ignored: a stabilization session is already active");
            return false;
        }
        let params = ParameterSet::default();
        let metrics = DerivedMetrics::from_params(&params);
        self.draft = Some(DraftSession {
            id: Uuid::new_v4().to_string(),
            started_at_ms: self.clock.now_ms(),
            params,
            metrics,
        });
        true
    }

    /// Write one parameter on the active draft and recompute the derived
    /// metrics. Returns `false` if no session is active.
    ///
    /// The raw value passes through the validation gateway; the draft
    /// never stores a non-finite or out-of-domain value.
    pub fn update(&mut self, field: ParamField, value: f64) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            log::warn!("update({field}) ignored: no active session");
            return false;
        };
        draft.params.set(field, value);
        draft.metrics = DerivedMetrics::from_params(&draft.params);
        true
    }

    /// Finalize the active draft: recompute final metrics, detect
    /// threshold events, fold into the cumulative state, append to the
    /// history. Returns the finalized session, or `None` when idle.
    pub fn finalize(&mut self) -> Option<&Session> {
        let Some(draft) = self.draft.take() else {
            log::warn!("finalize() ignored: no active session");
            return None;
        };

        let ended_at_ms = self.clock.now_ms();
        let duration_seconds =
            ended_at_ms.saturating_sub(draft.started_at_ms) as f64 / 1000.0;
        let metrics = DerivedMetrics::from_params(&draft.params);
        let events = events::detect(&draft.params, &metrics);
        let event_count = events.len();

        self.cumulative.absorb_metrics(&metrics);

        self.history.push(Session {
            id: draft.id,
            started_at_ms: draft.started_at_ms,
            ended_at_ms,
            duration_seconds,
            params: draft.params,
            metrics,
            events,
            coherence_snapshot: self.cumulative.quantum_coherence,
        });

        // Trend runs over the history including the new session, then
        // feeds the harmonics and event accumulators.
        let trend = trend::analyze(&self.history);
        self.cumulative.absorb_trend(&trend, event_count);

        self.history.last()
    }

    /// Whether a draft session is currently active.
    pub fn is_active(&self) -> bool {
        self.draft.is_some()
    }

    /// The active draft, if any.
    pub fn draft(&self) -> Option<&DraftSession> {
        self.draft.as_ref()
    }

    /// All finalized sessions, in completion order.
    pub fn history(&self) -> &[Session] {
        &self.history
    }

    /// The cumulative process metrics.
    pub fn cumulative(&self) -> &CumulativeState {
        &self.cumulative
    }

    /// Current trend classification over the finalized history.
    pub fn trend(&self) -> TrendAnalysis {
        trend::analyze(&self.history)
    }

    /// Snapshot the cumulative state and history into a structured report,
    /// stamped with the clock's current time.
    pub fn report(&self) -> StabilizationReport {
        report::generate(&self.cumulative, &self.history, self.clock.now_ms())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
