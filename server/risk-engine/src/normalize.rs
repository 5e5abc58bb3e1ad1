//! Normalize inbound snapshots into validated OperationSnapshot models.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::EngineError;
use crate::types::*;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse and validate an InboundSnapshot.
pub fn normalize(raw: &InboundSnapshot) -> Result<OperationSnapshot, EngineError> {
  let snapshot = OperationSnapshot {
    planned_end_date: parse_date("planned_end_date", &raw.planned_end_date)?,
    current_date: parse_date("current_date", &raw.current_date)?,
    budget_initial: require("budget_initial", raw.budget_initial)?,
    budget_current: require("budget_current", raw.budget_current)?,
    is_blocked: require("is_blocked", raw.is_blocked)?,
    current_phase_entered_date: parse_date(
      "current_phase_entered_date",
      &raw.current_phase_entered_date,
    )?,
    last_activity_date: parse_date("last_activity_date", &raw.last_activity_date)?,
  };
  validate(&snapshot)?;
  Ok(snapshot)
}

/// Budget checks shared by normalized and directly-constructed snapshots.
pub fn validate(snapshot: &OperationSnapshot) -> Result<(), EngineError> {
  if !snapshot.budget_initial.is_finite() {
    return Err(EngineError::invalid("budget_initial", "must be a finite number"));
  }
  if snapshot.budget_initial <= 0.0 {
    return Err(EngineError::invalid(
      "budget_initial",
      "must be greater than zero",
    ));
  }
  if !snapshot.budget_current.is_finite() {
    return Err(EngineError::invalid("budget_current", "must be a finite number"));
  }
  if snapshot.budget_current < 0.0 {
    return Err(EngineError::invalid("budget_current", "must not be negative"));
  }
  if !snapshot.overrun_ratio().is_finite() {
    return Err(EngineError::invalid(
      "budget_current",
      "overrun ratio against budget_initial is not a finite number",
    ));
  }
  Ok(())
}

/// Normalize a whole portfolio; ids must be non-empty and unique.
///
/// Ids are checked before any snapshot, so a duplicate is reported even when
/// its snapshot is also invalid.
pub fn normalize_portfolio(
  raw: &[InboundPortfolioEntry],
) -> Result<Vec<PortfolioEntry>, EngineError> {
  check_id_list(raw.iter().map(|e| e.operation_id.as_str()))?;
  raw
    .iter()
    .map(|e| {
      Ok(PortfolioEntry {
        operation_id: e.operation_id.clone(),
        snapshot: normalize(&e.snapshot).map_err(|err| with_operation(err, &e.operation_id))?,
      })
    })
    .collect()
}

pub fn check_ids(entries: &[PortfolioEntry]) -> Result<(), EngineError> {
  check_id_list(entries.iter().map(|e| e.operation_id.as_str()))
}

fn check_id_list<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), EngineError> {
  let mut seen = HashSet::new();
  for id in ids {
    if id.trim().is_empty() {
      return Err(EngineError::invalid("operation_id", "must not be empty"));
    }
    if !seen.insert(id) {
      return Err(EngineError::invalid(
        "operation_id",
        &format!("duplicate id {}", id),
      ));
    }
  }
  Ok(())
}

/// Prefix the failing field with the operation id so portfolio errors point at a line.
fn with_operation(err: EngineError, operation_id: &str) -> EngineError {
  match err {
    EngineError::InvalidInput { field, reason } => EngineError::InvalidInput {
      field: format!("operations[{}].{}", operation_id, field),
      reason,
    },
    other => other,
  }
}

fn require<T: Copy>(field: &str, value: Option<T>) -> Result<T, EngineError> {
  value.ok_or_else(|| EngineError::invalid(field, "is required"))
}

fn parse_date(field: &str, value: &Option<String>) -> Result<NaiveDate, EngineError> {
  let s = value
    .as_deref()
    .ok_or_else(|| EngineError::invalid(field, "is required"))?;
  NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
    .map_err(|e| EngineError::invalid(field, &format!("invalid YYYY-MM-DD date: {}", e)))
}
