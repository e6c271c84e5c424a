//! Application layer: command handlers, the live update task, and advisories.

pub mod advisory;
pub mod command_handlers;
pub mod live_loop;
