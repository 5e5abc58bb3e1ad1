//! Engine configuration with sane defaults.
//!
//! Every section deserializes with `#[serde(default)]`, so an override file only
//! needs the keys it changes. `validate` runs before any engine is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::{Classification, Criterion};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Tunable scoring parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  pub weights: Weights,
  pub saturation: SaturationTable,
  /// Days a phase may last before stagnation starts counting.
  pub expected_phase_days: u32,
  pub thresholds: Thresholds,
  pub recommendations: RecommendationThresholds,
  pub trend: TrendConfig,
  pub alerts: AlertThresholds,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      weights: Weights::default(),
      saturation: SaturationTable::default(),
      expected_phase_days: 30,
      thresholds: Thresholds::default(),
      recommendations: RecommendationThresholds::default(),
      trend: TrendConfig::default(),
      alerts: AlertThresholds::default(),
    }
  }
}

impl Config {
  pub fn from_json_str(s: &str) -> Result<Self, EngineError> {
    let config: Config = serde_json::from_str(s)?;
    config.validate()?;
    Ok(config)
  }

  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
    let raw = std::fs::read_to_string(path)?;
    Self::from_json_str(&raw)
  }

  pub fn validate(&self) -> Result<(), EngineError> {
    self.weights.validate()?;
    for c in Criterion::ALL {
      self
        .saturation
        .get(c)
        .validate()
        .map_err(|reason| EngineError::config(format!("saturation.{}: {}", c.as_str(), reason)))?;
    }
    self.thresholds.validate()?;
    self.recommendations.validate()?;
    self.trend.validate()?;
    self.alerts.validate()?;
    Ok(())
  }
}

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Per-criterion weights; must be non-negative and sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
  pub schedule_delay: f64,
  pub budget_overrun: f64,
  pub blocked: f64,
  pub phase_stagnation: f64,
  pub activity_recency: f64,
}

impl Default for Weights {
  fn default() -> Self {
    Self {
      schedule_delay: 0.25,
      budget_overrun: 0.30,
      blocked: 0.15,
      phase_stagnation: 0.20,
      activity_recency: 0.10,
    }
  }
}

impl Weights {
  pub fn get(&self, c: Criterion) -> f64 {
    match c {
      Criterion::ScheduleDelay => self.schedule_delay,
      Criterion::BudgetOverrun => self.budget_overrun,
      Criterion::Blocked => self.blocked,
      Criterion::PhaseStagnation => self.phase_stagnation,
      Criterion::ActivityRecency => self.activity_recency,
    }
  }

  fn validate(&self) -> Result<(), EngineError> {
    let mut sum = 0.0;
    for c in Criterion::ALL {
      let w = self.get(c);
      if !w.is_finite() || w < 0.0 {
        return Err(EngineError::config(format!(
          "weights.{}: must be a finite non-negative number",
          c.as_str()
        )));
      }
      sum += w;
    }
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
      return Err(EngineError::config(format!(
        "weights must sum to 1.0 (got {})",
        sum
      )));
    }
    Ok(())
  }
}

// ---------------------------------------------------------------------------
// Saturation curves
// ---------------------------------------------------------------------------

/// Maps a raw magnitude onto [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum Saturation {
  /// 0 maps to 0, `ceiling` and above map to 100, linear in between.
  Linear { ceiling: f64 },
  /// Highest `score` among steps whose `above` the raw value strictly exceeds; 0 if none.
  Stepped { steps: Vec<Step> },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
  pub above: f64,
  pub score: f64,
}

impl Saturation {
  pub fn apply(&self, raw: f64) -> f64 {
    let raw = raw.max(0.0);
    let scaled = match self {
      Self::Linear { ceiling } => raw / ceiling * 100.0,
      Self::Stepped { steps } => steps
        .iter()
        .filter(|s| raw > s.above)
        .map(|s| s.score)
        .fold(0.0, f64::max),
    };
    // NaN and -0.0 both map to 0.0; factors are ordered with total_cmp.
    if scaled.is_nan() || scaled <= 0.0 {
      return 0.0;
    }
    scaled.min(100.0)
  }

  fn validate(&self) -> Result<(), String> {
    match self {
      Self::Linear { ceiling } => {
        if !ceiling.is_finite() || *ceiling <= 0.0 {
          return Err("linear ceiling must be a finite positive number".into());
        }
      }
      Self::Stepped { steps } => {
        if steps.is_empty() {
          return Err("stepped curve needs at least one step".into());
        }
        for s in steps {
          if !s.above.is_finite() {
            return Err("step threshold must be finite".into());
          }
          if !(0.0..=100.0).contains(&s.score) {
            return Err("step score must be within 0..=100".into());
          }
        }
      }
    }
    Ok(())
  }
}

/// One saturation curve per criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationTable {
  /// Days late.
  pub schedule_delay: Saturation,
  /// Overrun ratio (0.5 = 50 % over the initial budget).
  pub budget_overrun: Saturation,
  /// 1 when blocked, 0 otherwise.
  pub blocked: Saturation,
  /// Days in the current phase beyond `expected_phase_days`.
  pub phase_stagnation: Saturation,
  /// Days since the last recorded update.
  pub activity_recency: Saturation,
}

impl Default for SaturationTable {
  fn default() -> Self {
    Self {
      schedule_delay: Saturation::Linear { ceiling: 90.0 },
      budget_overrun: Saturation::Linear { ceiling: 0.5 },
      blocked: Saturation::Linear { ceiling: 1.0 },
      phase_stagnation: Saturation::Linear { ceiling: 90.0 },
      activity_recency: Saturation::Linear { ceiling: 30.0 },
    }
  }
}

impl SaturationTable {
  pub fn get(&self, c: Criterion) -> &Saturation {
    match c {
      Criterion::ScheduleDelay => &self.schedule_delay,
      Criterion::BudgetOverrun => &self.budget_overrun,
      Criterion::Blocked => &self.blocked,
      Criterion::PhaseStagnation => &self.phase_stagnation,
      Criterion::ActivityRecency => &self.activity_recency,
    }
  }
}

// ---------------------------------------------------------------------------
// Classification thresholds
// ---------------------------------------------------------------------------

/// Lower bounds (inclusive) of the MEDIUM, HIGH and CRITICAL bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
  pub medium: f64,
  pub high: f64,
  pub critical: f64,
}

impl Default for Thresholds {
  fn default() -> Self {
    Self {
      medium: 25.0,
      high: 50.0,
      critical: 75.0,
    }
  }
}

impl Thresholds {
  /// Boundary values belong to the higher class.
  pub fn classify(&self, score: f64) -> Classification {
    if score >= self.critical {
      Classification::Critical
    } else if score >= self.high {
      Classification::High
    } else if score >= self.medium {
      Classification::Medium
    } else {
      Classification::Low
    }
  }

  fn validate(&self) -> Result<(), EngineError> {
    let ordered = 0.0 < self.medium
      && self.medium < self.high
      && self.high < self.critical
      && self.critical <= 100.0;
    if !ordered {
      return Err(EngineError::config(
        "thresholds must satisfy 0 < medium < high < critical <= 100",
      ));
    }
    Ok(())
  }
}

// ---------------------------------------------------------------------------
// Recommendations and trend
// ---------------------------------------------------------------------------

/// Sub-score levels (unweighted) that trigger a recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
  pub watch: f64,
  pub urgent: f64,
}

impl Default for RecommendationThresholds {
  fn default() -> Self {
    Self {
      watch: 50.0,
      urgent: 75.0,
    }
  }
}

impl RecommendationThresholds {
  fn validate(&self) -> Result<(), EngineError> {
    if !(0.0 < self.watch && self.watch <= self.urgent && self.urgent <= 100.0) {
      return Err(EngineError::config(
        "recommendations must satisfy 0 < watch <= urgent <= 100",
      ));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
  /// Number of most recent scores considered.
  pub window: usize,
  /// Score change beyond which the trend is no longer "stable".
  pub tolerance: f64,
}

impl Default for TrendConfig {
  fn default() -> Self {
    Self {
      window: 5,
      tolerance: 10.0,
    }
  }
}

impl TrendConfig {
  fn validate(&self) -> Result<(), EngineError> {
    if self.window < 2 {
      return Err(EngineError::config("trend.window must be at least 2"));
    }
    if !self.tolerance.is_finite() || self.tolerance < 0.0 {
      return Err(EngineError::config(
        "trend.tolerance must be a finite non-negative number",
      ));
    }
    Ok(())
  }
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// Levels an operation must strictly exceed to raise an alert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
  /// Days late before a HIGH delay alert.
  pub delay_days: u32,
  /// Days late before the delay alert turns CRITICAL.
  pub delay_critical_days: u32,
  /// Overrun ratio before a HIGH budget alert (0.10 = 10 %).
  pub budget_overrun: f64,
  pub budget_critical_overrun: f64,
  /// Days a blocked operation may sit in its phase before the alert turns CRITICAL.
  pub blocked_critical_days: u32,
}

impl Default for AlertThresholds {
  fn default() -> Self {
    Self {
      delay_days: 7,
      delay_critical_days: 21,
      budget_overrun: 0.10,
      budget_critical_overrun: 0.20,
      blocked_critical_days: 14,
    }
  }
}

impl AlertThresholds {
  fn validate(&self) -> Result<(), EngineError> {
    if self.delay_days >= self.delay_critical_days {
      return Err(EngineError::config(
        "alerts.delay_days must be below alerts.delay_critical_days",
      ));
    }
    let budget_ok = self.budget_overrun.is_finite()
      && self.budget_critical_overrun.is_finite()
      && 0.0 <= self.budget_overrun
      && self.budget_overrun < self.budget_critical_overrun;
    if !budget_ok {
      return Err(EngineError::config(
        "alerts must satisfy 0 <= budget_overrun < budget_critical_overrun",
      ));
    }
    Ok(())
  }
}
