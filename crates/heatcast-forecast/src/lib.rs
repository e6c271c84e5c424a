//! Heatcast — forecast generation and live updates.
//!
//! Produces a deterministic 15-day temperature forecast for a location and
//! calendar day, then keeps today's reading alive with small bounded
//! perturbations, publishing every change to a renderer and a presenter.

pub mod application;
pub mod domain;
