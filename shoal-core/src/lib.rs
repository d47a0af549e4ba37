#![cfg_attr(not(feature = "std"), no_std)]

//! Steering-force flocking with predators.
//!
//! Agents live in [`Flock`]s and steer with the rules in [`steering`]. The
//! [`integrator`] weights, sums and saturates those forces once per tick, and
//! a [`Simulation`] advances several flocks together so that prey can flee
//! predators and predators can hunt prey. Predators carry a tick-counted
//! [`BoostState`].

extern crate alloc;

mod agent;
mod boost;
mod config;
mod flock;
pub mod integrator;
mod math;
mod simulation;
pub mod steering;
mod vector;

pub use agent::{heading_of, Agent, Behavior, Predator};
pub use boost::{BoostPhase, BoostState, Envelope};
pub use config::*;
pub use flock::{AgentRef, Flock, FlockId, Neighbor};
pub use integrator::ForcePlan;
pub use simulation::{AgentView, InputSource, Renderer, Simulation};
pub use vector::Vector2D;
