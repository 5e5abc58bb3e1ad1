//! The five scoring criteria as one uniform table.
//!
//! Each row pairs a criterion with the extractor that reads its raw magnitude
//! from a snapshot; weight and saturation curve come from the config. Adding a
//! criterion means adding a row here and a field to the config tables.

use crate::config::Config;
use crate::types::{Criterion, Factor, OperationSnapshot};

pub struct CriterionSpec {
  pub criterion: Criterion,
  extract: fn(&OperationSnapshot, &Config) -> f64,
}

/// Rows in canonical order.
pub const CRITERIA: [CriterionSpec; 5] = [
  CriterionSpec {
    criterion: Criterion::ScheduleDelay,
    extract: days_late,
  },
  CriterionSpec {
    criterion: Criterion::BudgetOverrun,
    extract: overrun_ratio,
  },
  CriterionSpec {
    criterion: Criterion::Blocked,
    extract: blocked,
  },
  CriterionSpec {
    criterion: Criterion::PhaseStagnation,
    extract: stagnant_days,
  },
  CriterionSpec {
    criterion: Criterion::ActivityRecency,
    extract: idle_days,
  },
];

fn days_late(s: &OperationSnapshot, _: &Config) -> f64 {
  s.days_late() as f64
}

fn overrun_ratio(s: &OperationSnapshot, _: &Config) -> f64 {
  s.overrun_ratio()
}

fn blocked(s: &OperationSnapshot, _: &Config) -> f64 {
  if s.is_blocked {
    1.0
  } else {
    0.0
  }
}

/// Days in the current phase beyond the expected duration.
fn stagnant_days(s: &OperationSnapshot, c: &Config) -> f64 {
  (s.days_in_phase() - i64::from(c.expected_phase_days)).max(0) as f64
}

fn idle_days(s: &OperationSnapshot, _: &Config) -> f64 {
  s.days_since_activity() as f64
}

impl CriterionSpec {
  /// Raw magnitude, normalized sub-score and weighted contribution for one snapshot.
  pub fn score(&self, snapshot: &OperationSnapshot, config: &Config) -> Factor {
    let raw = (self.extract)(snapshot, config);
    let sub_score = config.saturation.get(self.criterion).apply(raw);
    let contribution = config.weights.get(self.criterion) * sub_score;
    Factor {
      criterion: self.criterion,
      raw,
      sub_score,
      contribution,
    }
  }
}

/// Score every criterion, in canonical order.
pub fn score_all(snapshot: &OperationSnapshot, config: &Config) -> Vec<Factor> {
  CRITERIA.iter().map(|c| c.score(snapshot, config)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
  }

  #[test]
  fn table_is_in_canonical_order() {
    let order: Vec<Criterion> = CRITERIA.iter().map(|c| c.criterion).collect();
    assert_eq!(order, Criterion::ALL.to_vec());
  }

  #[test]
  fn stagnation_counts_only_days_beyond_expected_duration() {
    let snap = OperationSnapshot {
      planned_end_date: date("2025-12-31"),
      current_date: date("2025-05-01"),
      budget_initial: 100.0,
      budget_current: 100.0,
      is_blocked: false,
      current_phase_entered_date: date("2025-02-15"),
      last_activity_date: date("2025-05-01"),
    };
    let config = Config::default();
    let factors = score_all(&snap, &config);
    let stagnation = &factors[3];
    assert_eq!(stagnation.criterion, Criterion::PhaseStagnation);
    // 75 days in phase, 30 expected.
    assert_eq!(stagnation.raw, 45.0);
    assert_eq!(stagnation.sub_score, 50.0);
    assert_eq!(stagnation.contribution, config.weights.phase_stagnation * 50.0);
  }

  #[test]
  fn half_ceiling_overrun_scores_fifty() {
    let snap = OperationSnapshot {
      planned_end_date: date("2025-12-31"),
      current_date: date("2025-05-01"),
      budget_initial: 200.0,
      budget_current: 250.0,
      is_blocked: false,
      current_phase_entered_date: date("2025-05-01"),
      last_activity_date: date("2025-05-01"),
    };
    let factors = score_all(&snap, &Config::default());
    assert_eq!(factors[1].raw, 0.25);
    assert_eq!(factors[1].sub_score, 50.0);
  }
}
