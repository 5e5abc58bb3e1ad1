//! Rule-based recommended first actions from per-criterion sub-scores.

use crate::config::RecommendationThresholds;
use crate::types::{Criterion, Factor};

pub const UNDER_CONTROL: &str = "Operation under control, keep monitoring";

/// (urgent, watch) actions per criterion. Blocked is binary: no watch level.
fn actions(c: Criterion) -> (&'static str, Option<&'static str>) {
  match c {
    Criterion::ScheduleDelay => (
      "Reprioritize late phases and reinforce site teams",
      Some("Analyze delay causes and adjust the schedule"),
    ),
    Criterion::BudgetOverrun => (
      "Urgent budget revision and cost control",
      Some("Monitor budget evolution closely"),
    ),
    Criterion::Blocked => ("Unblock the operation immediately", None),
    Criterion::PhaseStagnation => (
      "Push the current phase to completion or re-plan it",
      Some("Review why the current phase runs past its expected duration"),
    ),
    Criterion::ActivityRecency => (
      "Record a status update; the operation has gone quiet",
      Some("Schedule a progress check with the operation lead"),
    ),
  }
}

/// Recommendations in canonical criterion order, independent of factor order.
pub fn recommend(factors: &[Factor], thresholds: &RecommendationThresholds) -> Vec<String> {
  let mut out = Vec::new();
  for c in Criterion::ALL {
    let Some(f) = factors.iter().find(|f| f.criterion == c) else {
      continue;
    };
    let (urgent, watch) = actions(c);
    if f.sub_score >= thresholds.urgent {
      out.push(urgent.to_string());
    } else if f.sub_score >= thresholds.watch {
      if let Some(w) = watch {
        out.push(w.to_string());
      }
    }
  }
  if out.is_empty() {
    out.push(UNDER_CONTROL.to_string());
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn factor(criterion: Criterion, sub_score: f64) -> Factor {
    Factor {
      criterion,
      raw: 0.0,
      sub_score,
      contribution: 0.0,
    }
  }

  #[test]
  fn quiet_operation_is_under_control() {
    let factors: Vec<Factor> = Criterion::ALL.iter().map(|&c| factor(c, 10.0)).collect();
    let recs = recommend(&factors, &RecommendationThresholds::default());
    assert_eq!(recs, vec![UNDER_CONTROL.to_string()]);
  }

  #[test]
  fn urgent_and_watch_levels_follow_canonical_order() {
    let factors = vec![
      factor(Criterion::ActivityRecency, 80.0),
      factor(Criterion::BudgetOverrun, 60.0),
      factor(Criterion::Blocked, 100.0),
      factor(Criterion::ScheduleDelay, 0.0),
      factor(Criterion::PhaseStagnation, 0.0),
    ];
    let recs = recommend(&factors, &RecommendationThresholds::default());
    assert_eq!(
      recs,
      vec![
        "Monitor budget evolution closely".to_string(),
        "Unblock the operation immediately".to_string(),
        "Record a status update; the operation has gone quiet".to_string(),
      ]
    );
  }

  #[test]
  fn blocked_has_no_watch_action() {
    let factors = vec![factor(Criterion::Blocked, 60.0)];
    let recs = recommend(&factors, &RecommendationThresholds::default());
    assert_eq!(recs, vec![UNDER_CONTROL.to_string()]);
  }
}
