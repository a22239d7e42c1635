// src/simulation/config.rs

use crate::error::{Result, WaitlistError};
use serde::{Deserialize, Serialize};

/// Inputs for one run. Immutable while the kernel runs.
///
/// Fields stay as plain floats because they come straight from user-editable
/// numbers; the kernel only applies the clamps in [`capacity`](Self::capacity)
/// and [`rebook_delay_days`](Self::rebook_delay_days).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Mean referrals per day (Poisson mean).
    pub arrival_rate: f64,
    /// Appointment slots per day.
    pub capacity_per_day: f64,
    /// Percent chance (0-100) that a booked person does not attend.
    pub dna_rate: f64,
    /// Percent chance (0-100) that a non-attender is rebooked.
    pub rebook_rate: f64,
    /// Days until a rebooked person rejoins the list.
    pub rebook_delay: f64,
    /// Simulation horizon in days.
    pub days: usize,
    /// Leading days excluded from wait statistics.
    pub warmup: usize,
    pub seed: u32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            arrival_rate: 18.0,
            capacity_per_day: 16.0,
            dna_rate: 12.0,
            rebook_rate: 70.0,
            rebook_delay: 7.0,
            days: 180,
            warmup: 14,
            seed: 42,
        }
    }
}

impl SimulationParameters {
    /// Slots offered per day: truncated, never negative.
    pub fn capacity(&self) -> usize {
        self.capacity_per_day.max(0.0).floor() as usize
    }

    pub fn rebook_delay_days(&self) -> usize {
        self.rebook_delay.max(0.0).floor() as usize
    }

    pub fn dna_probability(&self) -> f64 {
        self.dna_rate / 100.0
    }

    pub fn rebook_probability(&self) -> f64 {
        self.rebook_rate / 100.0
    }

    /// Caller-side sanity check for values coming from the CLI or a scenario
    /// file. The kernel does not call this; it accepts any finite input.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("arrival_rate", self.arrival_rate),
            ("capacity_per_day", self.capacity_per_day),
            ("dna_rate", self.dna_rate),
            ("rebook_rate", self.rebook_rate),
            ("rebook_delay", self.rebook_delay),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(WaitlistError::InvalidParameter {
                    name,
                    reason: format!("must be a finite number, got {value}"),
                });
            }
        }

        if self.arrival_rate < 0.0 {
            return Err(WaitlistError::InvalidParameter {
                name: "arrival_rate",
                reason: "must not be negative".to_string(),
            });
        }

        if self.days == 0 {
            return Err(WaitlistError::InvalidParameter {
                name: "days",
                reason: "horizon must be at least one day".to_string(),
            });
        }

        Ok(())
    }
}
