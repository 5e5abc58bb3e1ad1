//! Core types for the risk engine (JSON contracts + internal models).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the dashboard sends)
// ---------------------------------------------------------------------------

/// One operation snapshot as sent by the caller. Unknown fields are silently ignored.
///
/// Every field is optional here so a missing one is reported by name during
/// normalization instead of as an opaque JSON error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundSnapshot {
  #[serde(default)]
  pub planned_end_date: Option<String>,
  #[serde(default)]
  pub current_date: Option<String>,
  #[serde(default)]
  pub budget_initial: Option<f64>,
  #[serde(default)]
  pub budget_current: Option<f64>,
  #[serde(default)]
  pub is_blocked: Option<bool>,
  #[serde(default)]
  pub current_phase_entered_date: Option<String>,
  #[serde(default)]
  pub last_activity_date: Option<String>,
}

/// One portfolio line: an operation id plus its snapshot fields inline.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundPortfolioEntry {
  pub operation_id: String,
  #[serde(flatten)]
  pub snapshot: InboundSnapshot,
}

// ---------------------------------------------------------------------------
// Internal normalized types
// ---------------------------------------------------------------------------

/// Validated operation attributes, immutable for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSnapshot {
  pub planned_end_date: NaiveDate,
  pub current_date: NaiveDate,
  pub budget_initial: f64,
  pub budget_current: f64,
  pub is_blocked: bool,
  pub current_phase_entered_date: NaiveDate,
  pub last_activity_date: NaiveDate,
}

impl OperationSnapshot {
  /// Days past the planned end date (0 when on time).
  pub fn days_late(&self) -> i64 {
    days_between(self.planned_end_date, self.current_date)
  }

  pub fn days_in_phase(&self) -> i64 {
    days_between(self.current_phase_entered_date, self.current_date)
  }

  pub fn days_since_activity(&self) -> i64 {
    days_between(self.last_activity_date, self.current_date)
  }

  /// Overrun as a ratio of the initial budget (0 when under budget).
  pub fn overrun_ratio(&self) -> f64 {
    ((self.budget_current - self.budget_initial) / self.budget_initial).max(0.0)
  }
}

fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
  (to - from).num_days().max(0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioEntry {
  pub operation_id: String,
  pub snapshot: OperationSnapshot,
}

// ---------------------------------------------------------------------------
// Criteria and classification
// ---------------------------------------------------------------------------

/// Scoring criteria, declared in canonical tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
  ScheduleDelay,
  BudgetOverrun,
  Blocked,
  PhaseStagnation,
  ActivityRecency,
}

impl Criterion {
  pub const ALL: [Criterion; 5] = [
    Self::ScheduleDelay,
    Self::BudgetOverrun,
    Self::Blocked,
    Self::PhaseStagnation,
    Self::ActivityRecency,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::ScheduleDelay => "schedule_delay",
      Self::BudgetOverrun => "budget_overrun",
      Self::Blocked => "blocked",
      Self::PhaseStagnation => "phase_stagnation",
      Self::ActivityRecency => "activity_recency",
    }
  }
}

/// Severity band derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
  Low,
  Medium,
  High,
  Critical,
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

/// One criterion's share of the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
  pub criterion: Criterion,
  /// Raw magnitude: days, overrun ratio, or 0/1 for the blocked flag.
  pub raw: f64,
  /// Normalized sub-score (0–100), before weighting.
  pub sub_score: f64,
  /// `weight * sub_score`.
  pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskResult {
  pub score: f64,
  pub classification: Classification,
  pub contributing_factors: Vec<Factor>,
  pub recommendations: Vec<String>,
  pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
  Delay,
  Budget,
  Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
  High,
  Critical,
}

/// Threshold breach raised for the dashboard's alert panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
  pub kind: AlertKind,
  pub level: AlertLevel,
  pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedOperation {
  pub operation_id: String,
  #[serde(flatten)]
  pub result: RiskResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
  Improving,
  Stable,
  Degrading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskTrend {
  pub direction: TrendDirection,
  /// Last score minus first score of the window.
  pub evolution: f64,
  pub window: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Request / response (binary stream contract)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
  Evaluate {
    snapshot: InboundSnapshot,
  },
  Rank {
    operations: Vec<InboundPortfolioEntry>,
    #[serde(default)]
    top: Option<usize>,
  },
  Trend {
    scores: Vec<f64>,
  },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Response {
  Evaluate { result: RiskResult },
  Rank { ranking: Vec<RankedOperation> },
  Trend { trend: RiskTrend },
}

/// Structured error output for rejected requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
