//! Plain parameter bundles for agents, flocks and predators.
//!
//! Every struct is `Copy` and comes with a `Default` that reproduces the
//! classic tuning, plus `with_*` setters for building variants inline.
//! Values are not validated: a zero radius or weight simply disables the
//! rule it belongs to.

use crate::Vector2D;

pub const DEFAULT_MAX_SPEED: f32 = 3.0;
pub const DEFAULT_MAX_FORCE: f32 = 0.5;
pub const DEFAULT_SIZE: f32 = 4.0;
pub const DEFAULT_JITTER_SCALE: f32 = 0.1;
pub const DEFAULT_FULL_AVOIDANCE_RADIUS: f32 = DEFAULT_MAX_SPEED * 10.0;
pub const DEFAULT_RAMP_AVOIDANCE_RADIUS: f32 = DEFAULT_MAX_SPEED * 6.0;
pub const DEFAULT_BORDER_BUFFER: f32 = 50.0;

pub const DEFAULT_SEPARATION_RADIUS: f32 = 15.0;
pub const DEFAULT_ALIGNMENT_RADIUS: f32 = 25.0;
pub const DEFAULT_COHESION_RADIUS: f32 = 25.0;
pub const DEFAULT_FLOCK_SIZE: usize = 20;
pub const DEFAULT_PREDATOR_SEPARATION_RADIUS: f32 = 30.0;

/// Simulation ticks per second the timer defaults are expressed in.
pub const TICKS_PER_SECOND: u32 = 60;

pub const DEFAULT_BOOST_STRENGTH: f32 = 2.0;
pub const DEFAULT_BOOST_RADIUS: f32 = 100.0;
pub const DEFAULT_BOOST_DURATION_TICKS: u32 = TICKS_PER_SECOND;
pub const DEFAULT_BOOST_COOLDOWN_TICKS: u32 = TICKS_PER_SECOND * 5;

/// Display color handed through to the renderer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Rectangular area agents are kept inside of
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Bounds {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Bounds anchored at the origin, e.g. a viewport of `width` x `height`.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Vector2D {
        Vector2D::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Vector2D) -> bool {
        point.x >= self.x_min
            && point.x <= self.x_max
            && point.y >= self.y_min
            && point.y <= self.y_max
    }
}

/// Physical envelope and appearance of a single agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentConfig {
    pub max_speed: f32,
    pub max_force: f32,
    pub size: f32,
    pub jitter_scale: f32,
    pub full_avoidance_radius: f32,
    /// Width of the band beyond `full_avoidance_radius` over which avoidance
    /// ramps. Zero gives a hard cutoff.
    pub ramp_avoidance_radius: f32,
    pub color: Color,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            max_force: DEFAULT_MAX_FORCE,
            size: DEFAULT_SIZE,
            jitter_scale: DEFAULT_JITTER_SCALE,
            full_avoidance_radius: DEFAULT_FULL_AVOIDANCE_RADIUS,
            ramp_avoidance_radius: DEFAULT_RAMP_AVOIDANCE_RADIUS,
            color: Color::BLACK,
        }
    }
}

impl AgentConfig {
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_max_force(mut self, max_force: f32) -> Self {
        self.max_force = max_force;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_jitter_scale(mut self, jitter_scale: f32) -> Self {
        self.jitter_scale = jitter_scale;
        self
    }

    pub fn with_avoidance(mut self, full_radius: f32, ramp_radius: f32) -> Self {
        self.full_avoidance_radius = full_radius;
        self.ramp_avoidance_radius = ramp_radius;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Per-rule weights applied after each steering force is normalized.
///
/// A weight of zero switches the rule off for the whole flock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringTuning {
    pub target_weight: f32,
    pub threat_weight: f32,
    pub prey_weight: f32,
    pub jitter_weight: f32,
    pub border_weight: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    /// Distance from a border at which border avoidance kicks in.
    pub border_buffer: f32,
}

impl Default for SteeringTuning {
    fn default() -> Self {
        Self {
            target_weight: 2.0,
            threat_weight: 2.0,
            prey_weight: 0.0,
            jitter_weight: 0.1,
            border_weight: 2.0,
            separation_weight: 1.5,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            border_buffer: DEFAULT_BORDER_BUFFER,
        }
    }
}

impl SteeringTuning {
    /// Hunters: no flocking pull, chase prey instead.
    pub fn predator() -> Self {
        Self {
            target_weight: 2.0,
            threat_weight: 0.0,
            prey_weight: 2.0,
            jitter_weight: 0.0,
            border_weight: 2.0,
            separation_weight: 1.0,
            alignment_weight: 0.0,
            cohesion_weight: 0.0,
            border_buffer: DEFAULT_BORDER_BUFFER,
        }
    }
}

/// Configuration shared by every member of a flock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockConfig {
    pub initial_size: usize,
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    /// Applied to every member created by the flock itself.
    pub agent: AgentConfig,
    pub tuning: SteeringTuning,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_FLOCK_SIZE,
            separation_radius: DEFAULT_SEPARATION_RADIUS,
            alignment_radius: DEFAULT_ALIGNMENT_RADIUS,
            cohesion_radius: DEFAULT_COHESION_RADIUS,
            agent: AgentConfig::default(),
            tuning: SteeringTuning::default(),
        }
    }
}

impl FlockConfig {
    /// An initially empty flock meant to hold predators.
    pub fn predators() -> Self {
        Self {
            initial_size: 0,
            separation_radius: DEFAULT_PREDATOR_SEPARATION_RADIUS,
            tuning: SteeringTuning::predator(),
            ..Self::default()
        }
    }

    pub fn with_initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }

    pub fn with_separation_radius(mut self, radius: f32) -> Self {
        self.separation_radius = radius;
        self
    }

    pub fn with_alignment_radius(mut self, radius: f32) -> Self {
        self.alignment_radius = radius;
        self
    }

    pub fn with_cohesion_radius(mut self, radius: f32) -> Self {
        self.cohesion_radius = radius;
        self
    }

    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    pub fn with_tuning(mut self, tuning: SteeringTuning) -> Self {
        self.tuning = tuning;
        self
    }
}

/// Agent envelope plus the boost parameters of a hunter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredatorConfig {
    pub agent: AgentConfig,
    /// Speed multiplier (and force divisor) while boosting. Expected to be >= 1.
    pub boost_strength: f32,
    /// Distance to the nearest prey under which a boost is requested.
    pub boost_radius: f32,
    pub boost_duration_ticks: u32,
    pub boost_cooldown_ticks: u32,
}

impl Default for PredatorConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            boost_strength: DEFAULT_BOOST_STRENGTH,
            boost_radius: DEFAULT_BOOST_RADIUS,
            boost_duration_ticks: DEFAULT_BOOST_DURATION_TICKS,
            boost_cooldown_ticks: DEFAULT_BOOST_COOLDOWN_TICKS,
        }
    }
}

impl PredatorConfig {
    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    pub fn with_boost_strength(mut self, strength: f32) -> Self {
        self.boost_strength = strength;
        self
    }

    pub fn with_boost_radius(mut self, radius: f32) -> Self {
        self.boost_radius = radius;
        self
    }

    pub fn with_boost_duration_ticks(mut self, ticks: u32) -> Self {
        self.boost_duration_ticks = ticks;
        self
    }

    pub fn with_boost_cooldown_ticks(mut self, ticks: u32) -> Self {
        self.boost_cooldown_ticks = ticks;
        self
    }
}
