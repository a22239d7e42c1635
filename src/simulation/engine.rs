// src/simulation/engine.rs

use crate::model::poisson::KnuthPoisson;
use crate::model::queues::{RebookingSchedule, WaitingList};
use crate::model::rng::Mulberry32;
use crate::simulation::config::SimulationParameters;
use crate::simulation::metrics::{Metrics, WaitStatistics};
use rand_distr::Distribution;
use serde::Serialize;
use tracing::{debug, info, trace};

const PROGRESS_INTERVAL: usize = 30;

/// What happened on one simulated day. Serialize so it can go straight to CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub day: usize,
    pub new_referrals: usize,
    pub rebook_returns: usize,
    pub capacity: usize,
    pub served: usize,
    pub attended: usize,
    pub did_not_attend: usize,
    pub rebooked: usize,
    pub rebook_dropped: usize,
    /// Queue length after arrivals and service.
    pub queue_size: usize,
}

impl DayRecord {
    pub fn arrivals(&self) -> usize {
        self.new_referrals + self.rebook_returns
    }
}

/// Output of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Queue length at the end of each day, warm-up included.
    pub queue_sizes: Vec<usize>,
    /// Waits of post-warm-up attendances, sorted ascending.
    pub waits: Vec<usize>,
    pub metrics: Metrics,
    pub used_slots: u64,
    pub total_slots: u64,
    pub dropped_rebookings: u64,
}

/// Day-stepped waiting list.
///
/// Owns its random source, so two instances built from equal parameters
/// walk through identical trajectories.
pub struct WaitlistSimulation {
    params: SimulationParameters,
    rng: Mulberry32,
    referrals: KnuthPoisson,

    waiting_list: WaitingList,
    rebookings: RebookingSchedule,

    // Unsorted, in service order.
    waits: Vec<usize>,
    used_slots: u64,
    total_slots: u64,
    dropped_rebookings: u64,

    pub current_day: usize,
    pub history: Vec<DayRecord>,
}

impl WaitlistSimulation {
    pub fn new(params: SimulationParameters) -> Self {
        debug!(
            arrival_rate = params.arrival_rate,
            capacity = params.capacity(),
            dna_rate = params.dna_rate,
            rebook_rate = params.rebook_rate,
            rebook_delay = params.rebook_delay_days(),
            days = params.days,
            warmup = params.warmup,
            seed = params.seed,
            "initialising waitlist simulation"
        );

        let rebookings = RebookingSchedule::new(params.days, params.rebook_delay_days());
        debug!(window = rebookings.window(), "rebooking window");

        Self {
            rng: Mulberry32::new(params.seed),
            referrals: KnuthPoisson::new(params.arrival_rate),
            waiting_list: WaitingList::new(),
            rebookings,
            waits: Vec::new(),
            used_slots: 0,
            total_slots: 0,
            dropped_rebookings: 0,
            current_day: 0,
            history: Vec::new(),
            params,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current_day >= self.params.days
    }

    /// Waits recorded so far, in the order people were seen.
    pub fn waits(&self) -> &[usize] {
        &self.waits
    }

    pub fn queue_len(&self) -> usize {
        self.waiting_list.len()
    }

    pub fn run(&mut self) {
        while !self.is_finished() {
            self.step();
        }

        info!(
            days = self.params.days,
            seen = self.waits.len(),
            used_slots = self.used_slots,
            total_slots = self.total_slots,
            dropped_rebookings = self.dropped_rebookings,
            final_queue = self.waiting_list.len(),
            "simulation complete"
        );
    }

    /// Advances one day. Does nothing once the horizon is reached.
    pub fn step(&mut self) {
        if self.is_finished() {
            return;
        }
        let day = self.current_day;

        // =================================================================
        // PHASE 1: ARRIVALS
        // New referrals first, then anyone due back from a rebooking.
        // =================================================================
        let new_referrals = self.referrals.sample(&mut self.rng) as usize;
        let rebook_returns = self.rebookings.due(day);
        self.waiting_list.join(day, new_referrals + rebook_returns);

        // =================================================================
        // PHASE 2: SERVICE
        // Offer up to `capacity` slots in strict arrival order.
        // =================================================================
        let capacity = self.params.capacity();
        self.total_slots = self.total_slots.saturating_add(capacity as u64);

        let dna_probability = self.params.dna_probability();
        let rebook_probability = self.params.rebook_probability();
        // `None` when the delay is too large to represent: always dropped.
        let return_day = day.checked_add(self.params.rebook_delay_days());

        let mut record = DayRecord {
            day,
            new_referrals,
            rebook_returns,
            capacity,
            served: 0,
            attended: 0,
            did_not_attend: 0,
            rebooked: 0,
            rebook_dropped: 0,
            queue_size: 0,
        };

        for _ in 0..capacity {
            let Some(entry) = self.waiting_list.pop_front() else {
                break;
            };
            self.used_slots += 1;
            record.served += 1;

            if self.rng.next_uniform() < dna_probability {
                record.did_not_attend += 1;
                if self.rng.next_uniform() < rebook_probability {
                    if return_day.is_some_and(|d| self.rebookings.schedule(d)) {
                        record.rebooked += 1;
                    } else {
                        record.rebook_dropped += 1;
                    }
                }
            } else {
                record.attended += 1;
                // Warm-up is judged on the day of service, not of entry.
                if day >= self.params.warmup {
                    self.waits.push(day - entry.day_entered);
                }
            }
        }

        if record.rebook_dropped > 0 {
            debug!(
                day,
                ?return_day,
                dropped = record.rebook_dropped,
                "rebooking beyond schedule window dropped"
            );
            self.dropped_rebookings += record.rebook_dropped as u64;
        }

        // =================================================================
        // PHASE 3: RECORD & ADVANCE
        // =================================================================
        record.queue_size = self.waiting_list.len();
        trace!(
            day,
            arrivals = record.arrivals(),
            served = record.served,
            queue = record.queue_size,
            "day complete"
        );
        if (day + 1) % PROGRESS_INTERVAL == 0 {
            debug!(
                day,
                queue = record.queue_size,
                seen = self.waits.len(),
                "progress"
            );
        }

        self.history.push(record);
        self.current_day += 1;
    }

    /// Sorts the waits and derives the summary metrics.
    pub fn into_result(self) -> SimulationResult {
        let queue_sizes = self.history.iter().map(|r| r.queue_size).collect();
        let stats = WaitStatistics::new(self.waits);
        let metrics = Metrics::derive(&stats, self.used_slots, self.total_slots);

        SimulationResult {
            queue_sizes,
            waits: stats.into_sorted(),
            metrics,
            used_slots: self.used_slots,
            total_slots: self.total_slots,
            dropped_rebookings: self.dropped_rebookings,
        }
    }
}

/// Runs a full simulation. Pure: equal parameters give equal results.
pub fn simulate(params: &SimulationParameters) -> SimulationResult {
    let mut sim = WaitlistSimulation::new(params.clone());
    sim.run();
    sim.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimulationParameters {
        SimulationParameters {
            arrival_rate: 10.0,
            capacity_per_day: 9.0,
            dna_rate: 20.0,
            rebook_rate: 50.0,
            rebook_delay: 3.0,
            days: 60,
            warmup: 5,
            seed: 11,
        }
    }

    #[test]
    fn test_run_covers_horizon() {
        let mut sim = WaitlistSimulation::new(params());
        sim.run();
        assert!(sim.is_finished());
        assert_eq!(sim.history.len(), 60);
        assert_eq!(sim.history.last().map(|r| r.queue_size), Some(sim.queue_len()));

        // Extra steps past the horizon are ignored.
        sim.step();
        assert_eq!(sim.history.len(), 60);
    }

    #[test]
    fn test_simulate_matches_manual_stepping() {
        let mut sim = WaitlistSimulation::new(params());
        while !sim.is_finished() {
            sim.step();
        }
        assert_eq!(sim.into_result(), simulate(&params()));
    }

    #[test]
    fn test_served_in_arrival_order() {
        let mut sim = WaitlistSimulation::new(params());
        let mut entry_days = Vec::new();
        while !sim.is_finished() {
            let day = sim.current_day;
            let before = sim.waits().len();
            sim.step();
            for &wait in &sim.waits()[before..] {
                assert!(wait <= day);
                entry_days.push(day - wait);
            }
        }
        assert!(!entry_days.is_empty());
        assert!(entry_days.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_day_record_bookkeeping() {
        let mut sim = WaitlistSimulation::new(params());
        sim.run();
        for record in &sim.history {
            assert_eq!(record.served, record.attended + record.did_not_attend);
            assert!(record.rebooked + record.rebook_dropped <= record.did_not_attend);
            assert!(record.served <= record.capacity);
        }
    }

    #[test]
    fn test_result_waits_are_sorted() {
        let result = simulate(&params());
        assert!(result.waits.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(result.metrics.n_seen, result.waits.len());
        assert_eq!(result.dropped_rebookings, 0);
    }

    #[test]
    fn test_zero_delay_rebooking_does_not_rejoin() {
        // Returns land on the current day after its arrivals were taken.
        let p = SimulationParameters {
            arrival_rate: 5.0,
            capacity_per_day: 10.0,
            dna_rate: 100.0,
            rebook_rate: 100.0,
            rebook_delay: 0.0,
            days: 20,
            warmup: 0,
            seed: 3,
        };
        let mut sim = WaitlistSimulation::new(p);
        sim.run();
        assert!(sim.history.iter().any(|r| r.rebooked > 0));
        assert!(sim.history.iter().all(|r| r.rebook_returns == 0));
    }
}
