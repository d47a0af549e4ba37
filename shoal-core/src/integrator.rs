//! Turns the steering rules into motion.
//!
//! A tick is split in two passes so that no agent ever sees another agent's
//! same-tick state: [`plan`] reads the world and produces a [`ForcePlan`] per
//! agent, [`apply`] then writes each plan back to its own agent.

use rand::Rng;

use crate::{steering, Agent, Behavior, Bounds, Flock, Vector2D};

/// Everything an agent decided during the read pass of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForcePlan {
    /// Sum of the weighted steering forces, not yet saturated.
    pub force: Vector2D,
    /// A predator came within boost range of its nearest prey.
    pub boost_requested: bool,
}

/// Normalizes `force` and scales it by `weight`, so no single rule can
/// dominate through raw magnitude. Zero forces and weights yield zero.
pub fn weighted(force: Vector2D, weight: f32) -> Vector2D {
    if weight == 0.0 || force.is_zero() {
        return Vector2D::zero();
    }
    force.normalize() * weight
}

/// Read pass for member `index` of `flock`.
///
/// `world` holds every flock the agent may look at (threats, prey), indexed
/// by `FlockId`. Returns an empty plan for an out-of-range index.
pub fn plan<R: Rng + ?Sized>(
    flock: &Flock,
    index: usize,
    world: &[Flock],
    bounds: &Bounds,
    rng: &mut R,
) -> ForcePlan {
    let Some(agent) = flock.members.get(index) else {
        return ForcePlan::default();
    };
    let tuning = &flock.config.tuning;
    let mut force = Vector2D::zero();

    if let Some(target) = flock.target {
        let flee = steering::avoid(
            agent,
            target,
            agent.config.full_avoidance_radius,
            agent.config.ramp_avoidance_radius,
        );
        force += weighted(flee, tuning.target_weight);
    }

    if tuning.threat_weight != 0.0 && !flock.threats.is_empty() {
        let flee: Vector2D = flock
            .threats
            .iter()
            .filter_map(|threat| threat.resolve(world))
            .map(|threat| {
                steering::avoid(
                    agent,
                    threat.position,
                    agent.config.full_avoidance_radius,
                    agent.config.ramp_avoidance_radius,
                )
            })
            .sum();
        force += weighted(flee, tuning.threat_weight);
    }

    let mut boost_requested = false;
    if let Behavior::Predator(predator) = &agent.behavior {
        let nearest = predator
            .prey
            .iter()
            .filter_map(|id| id.lookup(world))
            .filter_map(|prey| prey.nearest_to(agent.position))
            .fold(None, |best: Option<crate::Neighbor<'_>>, candidate| match best {
                Some(best) if best.distance <= candidate.distance => Some(best),
                _ => Some(candidate),
            });

        if let Some(prey) = nearest {
            let chase = steering::seek(agent, prey.agent.position, agent.config.size);
            force += weighted(chase, tuning.prey_weight);
            boost_requested = prey.distance < predator.config.boost_radius;
        }
    }

    if tuning.jitter_weight != 0.0 && agent.config.jitter_scale != 0.0 {
        let wobble = steering::jitter(rng, agent.config.jitter_scale);
        force += weighted(wobble, tuning.jitter_weight);
    }

    let borders = steering::avoid_borders(agent, bounds, tuning.border_buffer);
    force += weighted(borders, tuning.border_weight);

    let config = &flock.config;
    force += weighted(
        flock.separation(index, config.separation_radius),
        tuning.separation_weight,
    );
    force += weighted(
        flock.alignment(index, config.alignment_radius),
        tuning.alignment_weight,
    );
    force += weighted(
        flock.cohesion(index, config.cohesion_radius),
        tuning.cohesion_weight,
    );

    ForcePlan {
        force,
        boost_requested,
    }
}

/// Write pass: runs the boost timer, then integrates the planned force.
/// Returns the saturated acceleration that moved the agent.
pub fn apply(agent: &mut Agent, plan: ForcePlan) -> Vector2D {
    let Agent {
        config, behavior, ..
    } = &mut *agent;
    if let Behavior::Predator(predator) = behavior {
        predator.boost.advance(config, &predator.config);
        if plan.boost_requested {
            predator.boost.trigger(config, &predator.config);
        }
    }

    agent.apply_force(plan.force);
    agent.integrate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AgentConfig, BoostPhase, FlockConfig, FlockId, PredatorConfig, SteeringTuning};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn quiet_flock(id: usize) -> Flock {
        let tuning = SteeringTuning {
            jitter_weight: 0.0,
            ..SteeringTuning::default()
        };
        Flock::new(
            FlockId(id),
            FlockConfig::default().with_initial_size(0).with_tuning(tuning),
        )
    }

    #[test]
    fn test_weighted_skips_zero() {
        assert_eq!(weighted(Vector2D::zero(), 3.0), Vector2D::zero());
        assert_eq!(weighted(Vector2D::new(1.0, 0.0), 0.0), Vector2D::zero());
        assert_eq!(weighted(Vector2D::new(10.0, 0.0), 1.5), Vector2D::new(1.5, 0.0));
    }

    #[test]
    fn test_lone_agent_in_the_middle_has_no_force() {
        let bounds = Bounds::from_size(800.0, 500.0);
        let mut flock = quiet_flock(0);
        flock.add_agent(Agent::new(
            Vector2D::new(400.0, 250.0),
            Vector2D::new(1.0, 0.0),
            AgentConfig::default(),
        ));
        let mut rng = SmallRng::seed_from_u64(1);

        let plan = plan(&flock, 0, &[], &bounds, &mut rng);
        assert_eq!(plan, ForcePlan::default());
    }

    #[test]
    fn test_target_repels() {
        let bounds = Bounds::from_size(800.0, 500.0);
        let mut flock = quiet_flock(0);
        flock.add_agent(Agent::new(
            Vector2D::new(400.0, 250.0),
            Vector2D::zero(),
            AgentConfig::default(),
        ));
        flock.set_target(Some(Vector2D::new(410.0, 250.0)));
        let mut rng = SmallRng::seed_from_u64(1);

        let plan = plan(&flock, 0, &[], &bounds, &mut rng);
        assert!(plan.force.x < 0.0);
        assert!((plan.force.magnitude() - flock.config.tuning.target_weight).abs() < 1e-5);
    }

    #[test]
    fn test_threats_repel_across_flocks() {
        let bounds = Bounds::from_size(800.0, 500.0);
        let mut prey = quiet_flock(0);
        prey.add_agent(Agent::new(
            Vector2D::new(400.0, 250.0),
            Vector2D::zero(),
            AgentConfig::default(),
        ));
        let mut hunters = Flock::new(FlockId(1), FlockConfig::predators());
        let threat = hunters.add_agent(Agent::new(
            Vector2D::new(400.0, 260.0),
            Vector2D::zero(),
            AgentConfig::default(),
        ));
        prey.add_threat(threat);
        let world = [prey, hunters];
        let mut rng = SmallRng::seed_from_u64(1);

        let plan = plan(&world[0], 0, &world, &bounds, &mut rng);
        assert!(plan.force.y < 0.0);
    }

    #[test]
    fn test_dangling_threat_is_ignored() {
        let bounds = Bounds::from_size(800.0, 500.0);
        let mut flock = quiet_flock(0);
        flock.add_agent(Agent::new(
            Vector2D::new(400.0, 250.0),
            Vector2D::new(1.0, 0.0),
            AgentConfig::default(),
        ));
        flock.add_threat(crate::AgentRef {
            flock: FlockId(7),
            member: 3,
        });
        let mut rng = SmallRng::seed_from_u64(1);

        let plan = plan(&flock, 0, &[], &bounds, &mut rng);
        assert_eq!(plan.force, Vector2D::zero());
    }

    #[test]
    fn test_predator_chases_and_requests_boost() {
        let bounds = Bounds::from_size(800.0, 500.0);
        let mut prey = quiet_flock(0);
        prey.add_agent(Agent::new(
            Vector2D::new(500.0, 250.0),
            Vector2D::zero(),
            AgentConfig::default(),
        ));
        prey.add_agent(Agent::new(
            Vector2D::new(300.0, 250.0),
            Vector2D::zero(),
            AgentConfig::default(),
        ));
        let mut hunters = Flock::new(FlockId(1), FlockConfig::predators());
        hunters.add_agent(Agent::predator(
            Vector2D::new(350.0, 250.0),
            Vector2D::zero(),
            PredatorConfig::default().with_boost_radius(60.0),
            vec![FlockId(0)],
        ));
        let world = [prey, hunters];
        let mut rng = SmallRng::seed_from_u64(1);

        let plan = plan(&world[1], 0, &world, &bounds, &mut rng);
        assert!(plan.force.x < 0.0);
        assert!(plan.boost_requested);
    }

    #[test]
    fn test_apply_triggers_boost_and_saturates() {
        let config = PredatorConfig::default()
            .with_agent(AgentConfig::default().with_max_speed(1.2).with_max_force(0.4))
            .with_boost_duration_ticks(10);
        let mut agent = Agent::predator(Vector2D::zero(), Vector2D::zero(), config, vec![]);

        let applied = apply(
            &mut agent,
            ForcePlan {
                force: Vector2D::new(5.0, 0.0),
                boost_requested: true,
            },
        );

        assert_eq!(agent.boost().map(|b| b.phase()), Some(BoostPhase::Boosting));
        assert_eq!(agent.config.max_speed, 2.4);
        assert!((applied.magnitude() - 0.2).abs() < 1e-6);
        assert_eq!(agent.acceleration, Vector2D::zero());
    }
}
