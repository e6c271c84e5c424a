//! Domain layer: pure forecast logic and the live forecast aggregate.

pub mod aggregates;
pub mod chart;
pub mod commands;
pub mod config;
pub mod events;
pub mod generator;
pub mod status;
