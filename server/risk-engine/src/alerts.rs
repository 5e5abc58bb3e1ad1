//! Threshold alerts for the dashboard's alert panel.
//!
//! Independent of the weighted score: an operation can be LOW overall and still
//! raise a budget alert.

use crate::config::AlertThresholds;
use crate::types::{Alert, AlertKind, AlertLevel, OperationSnapshot};

/// Alerts raised by one snapshot, in kind order (delay, budget, blocked).
pub fn alerts(snapshot: &OperationSnapshot, thresholds: &AlertThresholds) -> Vec<Alert> {
  let mut out = Vec::new();

  let late = snapshot.days_late();
  if late > i64::from(thresholds.delay_days) {
    let level = if late > i64::from(thresholds.delay_critical_days) {
      AlertLevel::Critical
    } else {
      AlertLevel::High
    };
    out.push(Alert {
      kind: AlertKind::Delay,
      level,
      message: format!("{} day(s) past the planned end date", late),
    });
  }

  let overrun = snapshot.overrun_ratio();
  if overrun > thresholds.budget_overrun {
    let level = if overrun > thresholds.budget_critical_overrun {
      AlertLevel::Critical
    } else {
      AlertLevel::High
    };
    out.push(Alert {
      kind: AlertKind::Budget,
      level,
      message: format!("Budget overrun of {:.1}%", overrun * 100.0),
    });
  }

  if snapshot.is_blocked {
    let in_phase = snapshot.days_in_phase();
    let level = if in_phase > i64::from(thresholds.blocked_critical_days) {
      AlertLevel::Critical
    } else {
      AlertLevel::High
    };
    out.push(Alert {
      kind: AlertKind::Blocked,
      level,
      message: format!("Blocked, {} day(s) in the current phase", in_phase),
    });
  }

  out
}
