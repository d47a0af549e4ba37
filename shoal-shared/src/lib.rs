#![cfg_attr(not(feature = "std"), no_std)]

//! Wire and file types shared between the simulation driver and whatever
//! consumes its output.
//!
//! Scenario settings use `Option` for every tunable: a missing value means
//! "keep the simulation's built-in default".

extern crate alloc;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// Represents a 2D position in simulation coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Overrides for a single agent's envelope and appearance
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentSettings {
    pub max_speed: Option<f32>,
    pub max_force: Option<f32>,
    pub size: Option<f32>,
    pub jitter_scale: Option<f32>,
    pub full_avoidance_radius: Option<f32>,
    pub ramp_avoidance_radius: Option<f32>,
    /// RGB
    pub color: Option<[u8; 3]>,
}

/// Overrides for the per-rule steering weights
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TuningSettings {
    pub target_weight: Option<f32>,
    pub threat_weight: Option<f32>,
    pub prey_weight: Option<f32>,
    pub jitter_weight: Option<f32>,
    pub border_weight: Option<f32>,
    pub separation_weight: Option<f32>,
    pub alignment_weight: Option<f32>,
    pub cohesion_weight: Option<f32>,
    pub border_buffer: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub name: Option<String>,
    pub initial_size: Option<usize>,
    pub separation_radius: Option<f32>,
    pub alignment_radius: Option<f32>,
    pub cohesion_radius: Option<f32>,
    pub agent: AgentSettings,
    pub tuning: TuningSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredatorSettings {
    /// How many predators with these settings to spawn.
    pub count: usize,
    pub agent: AgentSettings,
    pub boost_strength: Option<f32>,
    pub boost_radius: Option<f32>,
    pub boost_duration_ticks: Option<u32>,
    pub boost_cooldown_ticks: Option<u32>,
}

impl Default for PredatorSettings {
    fn default() -> Self {
        Self {
            count: 1,
            agent: AgentSettings::default(),
            boost_strength: None,
            boost_radius: None,
            boost_duration_ticks: None,
            boost_cooldown_ticks: None,
        }
    }
}

/// The pointer is held at `position` for ticks in `from_tick..until_tick`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointerSegment {
    pub from_tick: u64,
    pub until_tick: u64,
    pub position: Position,
}

impl PointerSegment {
    pub fn covers(&self, tick: u64) -> bool {
        (self.from_tick..self.until_tick).contains(&tick)
    }
}

/// A complete scenario: area, seed, flocks, predators and pointer script
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    pub width: f32,
    pub height: f32,
    pub seed: u64,
    pub flocks: Vec<FlockSettings>,
    /// Settings for the flock the predators live in.
    pub predator_flock: FlockSettings,
    pub predators: Vec<PredatorSettings>,
    pub pointer: Vec<PointerSegment>,
}

impl Default for SimulationSettings {
    /// Four prey flocks of increasing size and agility hunted by two predators.
    fn default() -> Self {
        let flock = |name: &str, size: usize, color: [u8; 3], agent_size: f32| FlockSettings {
            name: Some(name.into()),
            initial_size: Some(size),
            agent: AgentSettings {
                size: Some(agent_size),
                color: Some(color),
                ..AgentSettings::default()
            },
            ..FlockSettings::default()
        };

        let mut purple = flock("purple", 10, [128, 0, 128], 8.0);
        purple.separation_radius = Some(25.0);
        purple.alignment_radius = Some(45.0);
        purple.cohesion_radius = Some(45.0);
        purple.agent.max_speed = Some(1.5);
        purple.agent.jitter_scale = Some(0.0);

        let mut yellow = flock("yellow", 80, [255, 255, 0], 3.0);
        yellow.separation_radius = Some(8.0);
        yellow.agent.max_speed = Some(2.5);
        yellow.agent.max_force = Some(1.0);

        let predator = PredatorSettings {
            count: 2,
            agent: AgentSettings {
                max_speed: Some(1.2),
                max_force: Some(0.4),
                size: Some(16.0),
                jitter_scale: Some(0.0),
                color: Some([0, 0, 0]),
                ..AgentSettings::default()
            },
            ..PredatorSettings::default()
        };

        Self {
            width: 800.0,
            height: 500.0,
            seed: 0,
            flocks: vec![
                purple,
                flock("salmon", 20, [250, 128, 114], 6.0),
                flock("red", 50, [255, 0, 0], 4.0),
                yellow,
            ],
            predator_flock: FlockSettings {
                name: Some("predators".into()),
                ..FlockSettings::default()
            },
            predators: vec![predator],
            pointer: Vec::new(),
        }
    }
}

#[cfg(feature = "std")]
impl SimulationSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// One agent as written to a frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentFrame {
    pub flock: usize,
    pub position: Position,
    pub heading: f32,
    pub size: f32,
    pub color: [u8; 3],
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub predator: bool,
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub boosting: bool,
}

/// Everything needed to draw the state after one tick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameUpdate {
    pub tick: u64,
    pub agents: Vec<AgentFrame>,
}

/// Periodic progress summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusReport {
    pub tick: u64,
    pub agent_count: usize,
    pub boosting_predators: usize,
    pub target_active: bool,
}
