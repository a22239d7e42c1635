// src/scenario/cost.rs

//! Illustrative staffing cost calculations for scenario comparison.
//!
//! Extra appointment slots are converted to whole-time-equivalent (WTE)
//! staff and priced per year. The figures are indicative only; they rank
//! capacity options by cost per week of waiting removed.

use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: f64 = 7.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Daily appointment slots one WTE can deliver.
    pub slots_per_wte: f64,
    /// Annual cost of one WTE.
    pub annual_cost_per_wte: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            slots_per_wte: 8.0,
            annual_cost_per_wte: 60_000.0,
        }
    }
}

impl CostModel {
    /// Staff needed for `extra_slots` more slots per day.
    ///
    /// Formula: WTE = ExtraSlots / SlotsPerWte
    pub fn extra_wte(&self, extra_slots: usize) -> f64 {
        if self.slots_per_wte <= 0.0 {
            return 0.0;
        }
        extra_slots as f64 / self.slots_per_wte
    }

    /// Annual cost of adding `extra_slots` per day.
    pub fn incremental_cost(&self, extra_slots: usize) -> f64 {
        self.extra_wte(extra_slots) * self.annual_cost_per_wte
    }
}

/// Weeks of median wait removed, going from `baseline` to `scenario` days.
///
/// Positive means the scenario waits less.
pub fn median_reduction_weeks(baseline: Option<usize>, scenario: Option<usize>) -> Option<f64> {
    let (baseline, scenario) = (baseline?, scenario?);
    Some((baseline as f64 - scenario as f64) / DAYS_PER_WEEK)
}

/// Cost of each week of median wait removed.
///
/// Only defined when the median actually drops; a flat or worse median has
/// no meaningful price per week.
pub fn cost_per_week_reduction(incremental_cost: f64, reduction_weeks: Option<f64>) -> Option<f64> {
    match reduction_weeks {
        Some(weeks) if weeks > 0.0 => Some(incremental_cost / weeks),
        _ => None,
    }
}
