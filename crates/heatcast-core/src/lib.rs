//! Heatcast Core — shared abstractions.
//!
//! This crate defines the randomness, time, event, error, and collaborator
//! seams that the forecast engine is built on. It contains no I/O.

pub mod advisory;
pub mod aggregate;
pub mod clock;
pub mod error;
pub mod event;
pub mod rng;
pub mod view;
