//! Discrete-time stochastic simulation of a service waiting list.
//!
//! Referrals arrive each day (Poisson), a fixed number of slots serve them in
//! arrival order, some people do not attend and some of those are rebooked
//! after a delay. [`simulate`] runs one seeded, fully deterministic
//! trajectory and derives wait-time and utilisation statistics from it.
//!
//! The `scenario` and `io` modules are the caller side: scenario files,
//! staffing-cost comparison, CSV export and text rendering.

pub mod error;
pub mod io;
pub mod model;
pub mod scenario;
pub mod simulation;

pub use error::{Result, WaitlistError};
pub use simulation::config::SimulationParameters;
pub use simulation::engine::{simulate, DayRecord, SimulationResult, WaitlistSimulation};
pub use simulation::metrics::{Metrics, WaitStatistics};
