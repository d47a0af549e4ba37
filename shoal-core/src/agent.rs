//! A single steering agent and its per-tick integration.

use alloc::vec::Vec;
use core::f32::consts::{FRAC_PI_2, TAU};

use rand::Rng;

use crate::{AgentConfig, BoostState, Bounds, FlockId, PredatorConfig, Vector2D};

/// Extra state carried by hunting agents
#[derive(Debug, Clone, PartialEq)]
pub struct Predator {
    pub config: PredatorConfig,
    pub boost: BoostState,
    /// Flocks this predator hunts in.
    pub prey: Vec<FlockId>,
}

/// What an agent does on top of the shared steering rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Behavior {
    #[default]
    Basic,
    Predator(Predator),
}

/// A single steering agent
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    /// Orientation in radians; zero points "up" (+y).
    pub heading: f32,
    /// Live envelope. A predator's boost rescales `max_speed` and `max_force` here.
    pub config: AgentConfig,
    pub behavior: Behavior,
}

/// Heading convention shared with the renderer: 0 means facing +y.
pub fn heading_of(velocity: Vector2D) -> f32 {
    velocity.angle() - FRAC_PI_2
}

impl Agent {
    pub fn new(position: Vector2D, velocity: Vector2D, config: AgentConfig) -> Self {
        let heading = if velocity.is_zero() {
            0.0
        } else {
            heading_of(velocity)
        };
        Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
            heading,
            config,
            behavior: Behavior::Basic,
        }
    }

    pub fn predator(
        position: Vector2D,
        velocity: Vector2D,
        config: PredatorConfig,
        prey: Vec<FlockId>,
    ) -> Self {
        Self {
            behavior: Behavior::Predator(Predator {
                config,
                boost: BoostState::default(),
                prey,
            }),
            ..Self::new(position, velocity, config.agent)
        }
    }

    /// Random position inside `bounds`, heading in a random direction at full speed.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds, config: AgentConfig) -> Self {
        let (position, velocity) = random_pose(rng, bounds, config.max_speed);
        Self::new(position, velocity, config)
    }

    pub fn is_predator(&self) -> bool {
        matches!(self.behavior, Behavior::Predator(_))
    }

    pub fn boost(&self) -> Option<&BoostState> {
        match &self.behavior {
            Behavior::Predator(predator) => Some(&predator.boost),
            Behavior::Basic => None,
        }
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    /// Saturates the accumulated force, moves the agent one tick and clears
    /// the accumulator. Returns the acceleration that was applied.
    pub fn integrate(&mut self) -> Vector2D {
        let acceleration = self.acceleration.limit(self.config.max_force);
        self.velocity += acceleration;
        self.velocity = self.velocity.limit(self.config.max_speed);
        self.position += self.velocity;

        // Keep the last heading while at rest.
        if self.velocity.magnitude() > 0.0 {
            self.heading = heading_of(self.velocity);
        }

        self.acceleration = Vector2D::zero();
        acceleration
    }
}

pub(crate) fn random_pose<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &Bounds,
    speed: f32,
) -> (Vector2D, Vector2D) {
    let position = Vector2D::new(
        random_in(rng, bounds.x_min, bounds.x_max),
        random_in(rng, bounds.y_min, bounds.y_max),
    );
    let velocity = Vector2D::from_angle(rng.gen_range(0.0..TAU)) * speed;
    (position, velocity)
}

fn random_in<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    // gen_range panics on an empty range
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_agent_creation() {
        let agent = Agent::new(
            Vector2D::new(10.0, 20.0),
            Vector2D::new(1.0, 1.0),
            AgentConfig::default(),
        );

        assert_eq!(agent.position, Vector2D::new(10.0, 20.0));
        assert_eq!(agent.velocity, Vector2D::new(1.0, 1.0));
        assert_eq!(agent.acceleration, Vector2D::zero());
        assert!(!agent.is_predator());
        assert!(agent.boost().is_none());
    }

    #[test]
    fn test_integrate_moves_and_resets() {
        let mut agent = Agent::new(
            Vector2D::new(0.0, 0.0),
            Vector2D::new(1.0, 1.0),
            AgentConfig::default(),
        );

        agent.integrate();

        assert_eq!(agent.position, Vector2D::new(1.0, 1.0));
        assert_eq!(agent.acceleration, Vector2D::zero());
    }

    #[test]
    fn test_integrate_saturates_force_and_speed() {
        let config = AgentConfig::default().with_max_speed(2.0).with_max_force(0.5);
        let mut agent = Agent::new(Vector2D::zero(), Vector2D::new(1.9, 0.0), config);

        agent.apply_force(Vector2D::new(100.0, 0.0));
        let applied = agent.integrate();

        assert!((applied.magnitude() - 0.5).abs() < 1e-6);
        assert!(agent.velocity.magnitude() <= 2.0 + 1e-6);
        assert_eq!(agent.acceleration, Vector2D::zero());
    }

    #[test]
    fn test_heading_points_up_for_positive_y() {
        let mut agent = Agent::new(
            Vector2D::zero(),
            Vector2D::new(0.0, 1.0),
            AgentConfig::default(),
        );
        agent.integrate();
        assert!(agent.heading.abs() < 1e-6);

        let mut agent = Agent::new(
            Vector2D::zero(),
            Vector2D::new(1.0, 0.0),
            AgentConfig::default(),
        );
        agent.integrate();
        assert!((agent.heading + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_heading_kept_at_rest() {
        let mut agent = Agent::new(
            Vector2D::zero(),
            Vector2D::new(1.0, 0.0),
            AgentConfig::default(),
        );
        agent.integrate();
        let heading = agent.heading;

        agent.velocity = Vector2D::zero();
        agent.integrate();
        assert_eq!(agent.heading, heading);
        assert_eq!(agent.position, Vector2D::new(1.0, 0.0));
    }

    #[test]
    fn test_random_agent_inside_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        let bounds = Bounds::from_size(800.0, 500.0);

        for _ in 0..100 {
            let agent = Agent::random(&mut rng, &bounds, AgentConfig::default());
            assert!(bounds.contains(agent.position));
            assert!((agent.velocity.magnitude() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_predator_starts_idle() {
        let agent = Agent::predator(
            Vector2D::zero(),
            Vector2D::zero(),
            PredatorConfig::default(),
            vec![FlockId(0)],
        );
        assert!(agent.is_predator());
        assert_eq!(agent.boost(), Some(&BoostState::Idle));
    }
}
