// src/scenario/comparison.rs

use crate::error::{Result, WaitlistError};
use crate::scenario::cost::{cost_per_week_reduction, median_reduction_weeks, CostModel};
use crate::simulation::config::SimulationParameters;
use crate::simulation::engine::{simulate, SimulationResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A named parameter set. In a comparison the first scenario is the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(flatten)]
    pub params: SimulationParameters,
}

impl Scenario {
    pub fn new(name: impl Into<String>, params: SimulationParameters) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// One line of the comparison table, in export column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub scenario: String,
    pub utilisation: f64,
    pub median_wait: Option<usize>,
    pub p90_wait: Option<usize>,
    pub within_28: Option<f64>,
    pub cost_per_week_reduction: Option<f64>,
    #[serde(skip)]
    pub extra_slots: usize,
    #[serde(skip)]
    pub incremental_cost: f64,
}

/// Runs every scenario independently and prices each against the first.
///
/// Runs are sequential. Each one builds its own random source from its own
/// seed, so the order of scenarios never changes any individual result.
pub fn compare(scenarios: &[Scenario], cost: &CostModel) -> Result<Vec<ComparisonRow>> {
    let (baseline, _) = scenarios.split_first().ok_or(WaitlistError::NoScenarios)?;

    let results: Vec<SimulationResult> = scenarios
        .iter()
        .map(|scenario| {
            info!(scenario = %scenario.name, "running scenario");
            simulate(&scenario.params)
        })
        .collect();

    let baseline_capacity = baseline.params.capacity();
    let baseline_median = results[0].metrics.median_wait;

    let rows = scenarios
        .iter()
        .zip(&results)
        .map(|(scenario, result)| {
            let metrics = &result.metrics;
            let extra_slots = scenario.params.capacity().saturating_sub(baseline_capacity);
            let incremental_cost = cost.incremental_cost(extra_slots);
            let reduction = median_reduction_weeks(baseline_median, metrics.median_wait);

            ComparisonRow {
                scenario: scenario.name.clone(),
                utilisation: metrics.utilisation,
                median_wait: metrics.median_wait,
                p90_wait: metrics.p90_wait,
                within_28: metrics.within_28,
                cost_per_week_reduction: cost_per_week_reduction(incremental_cost, reduction),
                extra_slots,
                incremental_cost,
            }
        })
        .collect();

    Ok(rows)
}
