//! QuadPath Engine - headless driver for the path-planning simulation.
//!
//! This crate populates a world with one of the built-in scenarios and runs
//! the tick loop: seekers replan and steer, then the world moves agents.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod populate;
pub mod sim;

pub use populate::{Scenario, Setup};
pub use sim::{Simulation, Summary};
