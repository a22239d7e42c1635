pub mod poisson;
pub mod queues;
pub mod rng;
