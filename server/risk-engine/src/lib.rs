//! Operation Risk Engine — weighted multi-criteria scoring for construction operations.
//!
//! Scores one operation snapshot (schedule delay, budget overrun, blocked flag,
//! phase stagnation, activity recency), classifies the score into a severity
//! band, explains it, and ranks portfolios for the dashboard's top-N list.
//!
//! No DB, no network, no logging; every call is a pure function of its input
//! and the engine's configuration. Used by the binary for stdin/stdout; can
//! also be called as a library.

pub mod alerts;
pub mod config;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod recommend;
pub mod trend;
pub mod types;

pub use config::Config;
pub use engine::RiskEngine;
pub use error::EngineError;
pub use types::{
  Alert, AlertKind, AlertLevel, Classification, Criterion, InboundSnapshot, OperationSnapshot,
  PortfolioEntry, RankedOperation, Request, Response, RiskResult,
};

/// Run one request through the engine (no I/O).
pub fn run(request: &Request, engine: &RiskEngine) -> Result<Response, EngineError> {
  match request {
    Request::Evaluate { snapshot } => Ok(Response::Evaluate {
      result: engine.evaluate_inbound(snapshot)?,
    }),
    Request::Rank { operations, top } => {
      let entries = normalize::normalize_portfolio(operations)?;
      let ranking = match top {
        Some(n) => engine.top_n(&entries, *n)?,
        None => engine.rank_portfolio(&entries)?,
      };
      Ok(Response::Rank { ranking })
    }
    Request::Trend { scores } => Ok(Response::Trend {
      trend: engine.trend(scores)?,
    }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn run_returns_valid_output_shape() {
    let request: Request = serde_json::from_str(
      r#"{
        "action": "evaluate",
        "snapshot": {
          "planned_end_date": "2025-03-01",
          "current_date": "2025-04-15",
          "budget_initial": 1000000,
          "budget_current": 1250000,
          "is_blocked": false,
          "current_phase_entered_date": "2025-02-01",
          "last_activity_date": "2025-04-10"
        }
      }"#,
    )
    .unwrap();
    let out = run(&request, &RiskEngine::with_defaults()).unwrap();
    let result = match out {
      Response::Evaluate { result } => result,
      other => panic!("unexpected response: {:?}", other),
    };
    assert!(result.score > 0.0 && result.score <= 100.0);
    assert_eq!(result.contributing_factors.len(), 5);
    assert_eq!(
      result.contributing_factors[0].criterion,
      Criterion::BudgetOverrun
    );
    assert!(!result.recommendations.is_empty());
  }

  #[test]
  fn rank_request_honors_top() {
    let request: Request = serde_json::from_str(
      r#"{
        "action": "rank",
        "top": 1,
        "operations": [
          {"operation_id": "OP-1", "planned_end_date": "2025-12-31", "current_date": "2025-06-01",
           "budget_initial": 10, "budget_current": 10, "is_blocked": false,
           "current_phase_entered_date": "2025-06-01", "last_activity_date": "2025-06-01"},
          {"operation_id": "OP-2", "planned_end_date": "2025-12-31", "current_date": "2025-06-01",
           "budget_initial": 10, "budget_current": 10, "is_blocked": true,
           "current_phase_entered_date": "2025-06-01", "last_activity_date": "2025-06-01"}
        ]
      }"#,
    )
    .unwrap();
    let out = run(&request, &RiskEngine::with_defaults()).unwrap();
    let ranking = match out {
      Response::Rank { ranking } => ranking,
      other => panic!("unexpected response: {:?}", other),
    };
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].operation_id, "OP-2");
  }
}
