//! Heatcast terminal front end.
//!
//! Wires the live forecast engine to stdout: environment configuration,
//! tracing setup, a text chart renderer, and the line-based input session.

pub mod config;
pub mod error;
pub mod input;
pub mod session;
pub mod telemetry;
pub mod terminal;
