//! Core engine: scores snapshots, classifies them, ranks portfolios.

use std::cmp::Ordering;

use crate::alerts;
use crate::config::Config;
use crate::criteria;
use crate::error::EngineError;
use crate::normalize;
use crate::recommend;
use crate::trend;
use crate::types::*;

/// The risk scoring engine. Holds only validated configuration; every call is pure.
#[derive(Debug, Clone)]
pub struct RiskEngine {
  config: Config,
}

impl RiskEngine {
  pub fn new(config: Config) -> Result<Self, EngineError> {
    config.validate()?;
    Ok(Self { config })
  }

  pub fn with_defaults() -> Self {
    Self {
      config: Config::default(),
    }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Score one snapshot.
  ///
  /// Returns `InvalidInput` when the budgets cannot produce a ratio
  /// (`budget_initial <= 0`, non-finite values, negative current budget).
  pub fn evaluate(&self, snapshot: &OperationSnapshot) -> Result<RiskResult, EngineError> {
    normalize::validate(snapshot)?;

    let mut factors = criteria::score_all(snapshot, &self.config);
    let total: f64 = factors.iter().map(|f| f.contribution).sum();
    let score = if total.is_nan() || total <= 0.0 {
      0.0
    } else {
      total.min(100.0)
    };

    let recommendations = recommend::recommend(&factors, &self.config.recommendations);

    // Descending contribution; Criterion's derive order is the canonical tie-break.
    factors.sort_by(|a, b| {
      b.contribution
        .total_cmp(&a.contribution)
        .then(a.criterion.cmp(&b.criterion))
    });

    Ok(RiskResult {
      score,
      classification: self.config.thresholds.classify(score),
      contributing_factors: factors,
      recommendations,
      alerts: alerts::alerts(snapshot, &self.config.alerts),
    })
  }

  /// Threshold alerts for one snapshot, without scoring it.
  pub fn alerts(&self, snapshot: &OperationSnapshot) -> Result<Vec<Alert>, EngineError> {
    normalize::validate(snapshot)?;
    Ok(alerts::alerts(snapshot, &self.config.alerts))
  }

  /// Normalize a raw inbound snapshot and score it.
  pub fn evaluate_inbound(&self, raw: &InboundSnapshot) -> Result<RiskResult, EngineError> {
    let snapshot = normalize::normalize(raw)?;
    self.evaluate(&snapshot)
  }

  /// Score every entry and sort: score descending, then operation id ascending.
  ///
  /// Empty input gives an empty ranking. When several entries are invalid the
  /// error reported is the first one in input order.
  pub fn rank_portfolio(
    &self,
    entries: &[PortfolioEntry],
  ) -> Result<Vec<RankedOperation>, EngineError> {
    normalize::check_ids(entries)?;

    let mut ranked = self
      .score_entries(entries)
      .into_iter()
      .collect::<Result<Vec<_>, EngineError>>()?;
    ranked.sort_by(compare_ranked);
    Ok(ranked)
  }

  /// The `n` riskiest operations (slice of the full ranking).
  pub fn top_n(
    &self,
    entries: &[PortfolioEntry],
    n: usize,
  ) -> Result<Vec<RankedOperation>, EngineError> {
    let mut ranked = self.rank_portfolio(entries)?;
    ranked.truncate(n);
    Ok(ranked)
  }

  pub fn trend(&self, history: &[f64]) -> Result<RiskTrend, EngineError> {
    trend::risk_trend(history, &self.config.trend)
  }

  fn score_one(&self, entry: &PortfolioEntry) -> Result<RankedOperation, EngineError> {
    let result = self.evaluate(&entry.snapshot).map_err(|e| match e {
      EngineError::InvalidInput { field, reason } => EngineError::InvalidInput {
        field: format!("operations[{}].{}", entry.operation_id, field),
        reason,
      },
      other => other,
    })?;
    Ok(RankedOperation {
      operation_id: entry.operation_id.clone(),
      result,
    })
  }

  #[cfg(feature = "parallel")]
  fn score_entries(&self, entries: &[PortfolioEntry]) -> Vec<Result<RankedOperation, EngineError>> {
    use rayon::prelude::*;

    entries.par_iter().map(|e| self.score_one(e)).collect()
  }

  #[cfg(not(feature = "parallel"))]
  fn score_entries(&self, entries: &[PortfolioEntry]) -> Vec<Result<RankedOperation, EngineError>> {
    entries.iter().map(|e| self.score_one(e)).collect()
  }
}

fn compare_ranked(a: &RankedOperation, b: &RankedOperation) -> Ordering {
  b.result
    .score
    .total_cmp(&a.result.score)
    .then_with(|| a.operation_id.cmp(&b.operation_id))
}
