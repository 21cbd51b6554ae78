//! Rolling-window coherence trend classification.
//!
//! The trend analyzer differences the cumulative coherence snapshots
//! recorded on consecutive finalized sessions and averages the
//! per-minute rates over the most recent window.

use serde::Serialize;

use crate::session::Session;

/// Number of most-recent sessions in the trend window.
const WINDOW: usize = 5;

/// Coherence trend classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceTrend {
    /// Fewer than two finalized sessions; no rate can be formed yet.
    Initializing,
    /// Average coherence gain above 15 points/minute.
    QuantumLocked,
    /// Average coherence gain above 5 points/minute.
    Stabilizing,
    /// Everything else, including flat and declining histories.
    Fluctuating,
}

impl std::fmt::Display for CoherenceTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initializing => write!(f, "initializing"),
            Self::QuantumLocked => write!(f, "quantum_locked"),
            Self::Stabilizing => write!(f, "stabilizing"),
            Self::Fluctuating => write!(f, "fluctuating"),
        }
    }
}

/// Trend classification plus the averaged per-minute coherence rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendAnalysis {
    pub coherence: CoherenceTrend,
    pub stability_index: f64,
}

impl TrendAnalysis {
    fn initializing() -> Self {
        Self {
            coherence: CoherenceTrend::Initializing,
            stability_index: 0.0,
        }
    }
}

/// Classify the coherence trend over the most recent sessions.
///
/// Each consecutive pair inside the window contributes the delta of the
/// sessions' coherence snapshots per elapsed minute between their
/// completion timestamps. A pair with identical or decreasing
/// timestamps contributes a rate of 0 and still counts toward the
/// average, so the index stays finite for any history.
pub fn analyze(history: &[Session]) -> TrendAnalysis {
    if history.len() < 2 {
        return TrendAnalysis::initializing();
    }

    let recent = &history[history.len().saturating_sub(WINDOW)..];
    let pairs = (recent.len() - 1) as f64;
    let mut rate_sum = 0.0;

    for pair in recent.windows(2) {
        let dt_ms = pair[1].ended_at_ms as i64 - pair[0].ended_at_ms as i64;
        if dt_ms <= 0 {
            continue;
        }
        let minutes = dt_ms as f64 / 1000.0 / 60.0;
        rate_sum += (pair[1].coherence_snapshot - pair[0].coherence_snapshot) / minutes;
    }

    let stability_index = rate_sum / pairs;
    let coherence = if stability_index > 15.0 {
        CoherenceTrend::QuantumLocked
    } else if stability_index > 5.0 {
        CoherenceTrend::Stabilizing
    } else {
        CoherenceTrend::Fluctuating
    };

    TrendAnalysis {
        coherence,
        stability_index,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterSet;
    use crate::scoring::DerivedMetrics;

    /// Minimal finalized session for trend math: only the completion
    /// timestamp and coherence snapshot matter here.
    fn session(ended_at_ms: u64, coherence_snapshot: f64) -> Session {
        Session {
            id: String::from("test"),
            started_at_ms: ended_at_ms.saturating_sub(1000),
            ended_at_ms,
            duration_seconds: 1.0,
            params: ParameterSet::default(),
            metrics: DerivedMetrics::default(),
            events: Vec::new(),
            coherence_snapshot,
        }
    }

    #[test]
    fn test_empty_history_initializing() {
        let analysis = analyze(&[]);
        assert_eq!(analysis.coherence, CoherenceTrend::Initializing);
        assert_eq!(analysis.stability_index, 0.0);
    }

    #[test]
    fn test_single_session_initializing() {
        let analysis = analyze(&[session(1000, 10.0)]);
        assert_eq!(analysis.coherence, CoherenceTrend::Initializing);
        assert_eq!(analysis.stability_index, 0.0);
    }

    #[test]
    fn test_two_sessions_one_minute_apart() {
        // 0 → 20 coherence over one minute is 20 points/minute.
        let history = vec![session(0, 0.0), session(60_000, 20.0)];
        let analysis = analyze(&history);
        assert_eq!(analysis.coherence, CoherenceTrend::QuantumLocked);
        assert!((analysis.stability_index - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_slow_gain_classifies_stabilizing() {
        let history = vec![session(0, 0.0), session(60_000, 8.0)];
        let analysis = analyze(&history);
        assert_eq!(analysis.coherence, CoherenceTrend::Stabilizing);
    }

    #[test]
    fn test_flat_history_fluctuating() {
        let history = vec![session(0, 30.0), session(60_000, 30.0)];
        let analysis = analyze(&history);
        assert_eq!(analysis.coherence, CoherenceTrend::Fluctuating);
        assert_eq!(analysis.stability_index, 0.0);
    }

    #[test]
    fn test_identical_timestamps_contribute_zero() {
        // Same completion instant would divide by zero; the pair counts
        // as 0 in the average instead.
        let history = vec![
            session(0, 0.0),
            session(60_000, 20.0),
            session(60_000, 40.0),
        ];
        let analysis = analyze(&history);
        assert!(analysis.stability_index.is_finite());
        // One 20-point/minute pair and one zero pair, averaged over 2.
        assert!((analysis.stability_index - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_limits_to_last_five() {
        // An early spike outside the window must not affect the rate.
        let mut history = vec![session(0, 0.0), session(1, 100.0)];
        for i in 0..5 {
            let at = 60_000 * (i + 1);
            history.push(session(at, 100.0));
        }
        let analysis = analyze(&history);
        assert_eq!(analysis.coherence, CoherenceTrend::Fluctuating);
        assert_eq!(analysis.stability_index, 0.0);
    }

    #[test]
    fn test_declining_history_negative_index() {
        let history = vec![session(0, 50.0), session(60_000, 20.0)];
        let analysis = analyze(&history);
        assert_eq!(analysis.coherence, CoherenceTrend::Fluctuating);
        assert!(analysis.stability_index < 0.0);
    }
}
