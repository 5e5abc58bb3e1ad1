//! Direction of an operation's risk over its most recent scores.

use crate::config::TrendConfig;
use crate::error::EngineError;
use crate::types::{RiskTrend, TrendDirection};

/// Compare the first and last score of the trailing window.
///
/// Fewer than two scores is always `Stable` with zero evolution.
pub fn risk_trend(history: &[f64], config: &TrendConfig) -> Result<RiskTrend, EngineError> {
  for (i, s) in history.iter().enumerate() {
    if !s.is_finite() || !(0.0..=100.0).contains(s) {
      return Err(EngineError::invalid(
        &format!("scores[{}]", i),
        "must be a score within 0..=100",
      ));
    }
  }

  let start = history.len().saturating_sub(config.window);
  let window = history[start..].to_vec();

  if window.len() < 2 {
    return Ok(RiskTrend {
      direction: TrendDirection::Stable,
      evolution: 0.0,
      window,
    });
  }

  let evolution = window[window.len() - 1] - window[0];
  let direction = if evolution > config.tolerance {
    TrendDirection::Degrading
  } else if evolution < -config.tolerance {
    TrendDirection::Improving
  } else {
    TrendDirection::Stable
  };

  Ok(RiskTrend {
    direction,
    evolution,
    window,
  })
}
