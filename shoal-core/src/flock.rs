use alloc::vec::Vec;

use rand::Rng;

use crate::integrator::{self, ForcePlan};
use crate::{steering, Agent, Bounds, FlockConfig, Vector2D};

/// Index of a flock inside a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlockId(pub usize);

impl FlockId {
    /// Finds this flock in `flocks`. A slot holding a flock with another id
    /// does not count.
    pub fn lookup(self, flocks: &[Flock]) -> Option<&Flock> {
        flocks.get(self.0).filter(|flock| flock.id == self)
    }
}

/// Non-owning handle to an agent in some flock.
///
/// Resolved against the current flocks on every use; a handle that no longer
/// points at an agent is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentRef {
    pub flock: FlockId,
    pub member: usize,
}

impl AgentRef {
    pub fn resolve<'a>(&self, flocks: &'a [Flock]) -> Option<&'a Agent> {
        self.flock.lookup(flocks)?.members.get(self.member)
    }
}

/// Another agent as seen from the querying agent.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub agent: &'a Agent,
    pub distance: f32,
}

/// An ordered group of agents sharing one set of rules
#[derive(Debug, Clone)]
pub struct Flock {
    pub id: FlockId,
    pub members: Vec<Agent>,
    /// Pointer position every member flees from, if any.
    pub target: Option<Vector2D>,
    pub threats: Vec<AgentRef>,
    pub config: FlockConfig,
}

impl Flock {
    pub fn new(id: FlockId, config: FlockConfig) -> Self {
        Self {
            id,
            members: Vec::new(),
            target: None,
            threats: Vec::new(),
            config,
        }
    }

    /// Creates a flock with `config.initial_size` randomly placed members.
    pub fn populate<R: Rng + ?Sized>(
        id: FlockId,
        config: FlockConfig,
        bounds: &Bounds,
        rng: &mut R,
    ) -> Self {
        let mut flock = Self::new(id, config);
        flock.members = (0..config.initial_size)
            .map(|_| Agent::random(rng, bounds, config.agent))
            .collect();
        log::debug!("flock {} populated with {} agents", id.0, flock.members.len());
        flock
    }

    pub fn add_agent(&mut self, agent: Agent) -> AgentRef {
        self.members.push(agent);
        AgentRef {
            flock: self.id,
            member: self.members.len() - 1,
        }
    }

    pub fn set_target(&mut self, target: Option<Vector2D>) {
        self.target = target;
    }

    pub fn add_threat(&mut self, threat: AgentRef) {
        if !self.threats.contains(&threat) {
            self.threats.push(threat);
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members strictly closer than `radius` to member `index`, excluding itself.
    pub fn neighbors(&self, index: usize, radius: f32) -> impl Iterator<Item = Neighbor<'_>> {
        let origin = self.members.get(index).map(|agent| agent.position);
        self.members
            .iter()
            .enumerate()
            .filter_map(move |(i, agent)| {
                let origin = origin?;
                if i == index {
                    return None;
                }
                let distance = origin.distance(&agent.position);
                (distance < radius).then_some(Neighbor { agent, distance })
            })
    }

    /// Closest member to `point`; ties keep the earlier member.
    pub fn nearest_to(&self, point: Vector2D) -> Option<Neighbor<'_>> {
        let mut nearest: Option<Neighbor<'_>> = None;
        for agent in &self.members {
            let distance = point.distance(&agent.position);
            if nearest.map_or(true, |n| distance < n.distance) {
                nearest = Some(Neighbor { agent, distance });
            }
        }
        nearest
    }

    pub fn separation(&self, index: usize, radius: f32) -> Vector2D {
        match self.members.get(index) {
            Some(agent) => steering::separation(agent, self.neighbors(index, radius)),
            None => Vector2D::zero(),
        }
    }

    pub fn alignment(&self, index: usize, radius: f32) -> Vector2D {
        match self.members.get(index) {
            Some(agent) => steering::alignment(agent, self.neighbors(index, radius)),
            None => Vector2D::zero(),
        }
    }

    pub fn cohesion(&self, index: usize, radius: f32) -> Vector2D {
        match self.members.get(index) {
            Some(agent) => steering::cohesion(agent, self.neighbors(index, radius)),
            None => Vector2D::zero(),
        }
    }

    /// Computes this tick's forces for every member against the pre-tick
    /// state of `world`. Nothing is mutated.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        world: &[Flock],
        bounds: &Bounds,
        rng: &mut R,
    ) -> Vec<ForcePlan> {
        (0..self.members.len())
            .map(|index| integrator::plan(self, index, world, bounds, rng))
            .collect()
    }

    /// Applies previously computed plans, one per member, in member order.
    pub fn apply(&mut self, plans: Vec<ForcePlan>) {
        for (agent, plan) in self.members.iter_mut().zip(plans) {
            integrator::apply(agent, plan);
        }
    }

    /// Advances this flock alone by one tick. Threats and prey living in
    /// other flocks are not visible here; use a `Simulation` for that.
    pub fn update<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) {
        let plans = self.plan(core::slice::from_ref(&*self), bounds, rng);
        self.apply(plans);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AgentConfig;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn flock_with(positions: &[(f32, f32)]) -> Flock {
        let mut flock = Flock::new(FlockId(0), FlockConfig::default().with_initial_size(0));
        for &(x, y) in positions {
            flock.add_agent(Agent::new(
                Vector2D::new(x, y),
                Vector2D::new(1.0, 0.0),
                AgentConfig::default(),
            ));
        }
        flock
    }

    #[test]
    fn test_populate_creates_initial_members() {
        let mut rng = SmallRng::seed_from_u64(3);
        let bounds = Bounds::from_size(800.0, 600.0);
        let flock = Flock::populate(
            FlockId(2),
            FlockConfig::default().with_initial_size(50),
            &bounds,
            &mut rng,
        );

        assert_eq!(flock.len(), 50);
        assert_eq!(flock.id, FlockId(2));
        assert!(flock.members.iter().all(|a| bounds.contains(a.position)));
    }

    #[test]
    fn test_add_agent_returns_handle() {
        let mut flock = flock_with(&[(0.0, 0.0)]);
        let handle = flock.add_agent(Agent::new(
            Vector2D::new(5.0, 5.0),
            Vector2D::zero(),
            AgentConfig::default(),
        ));

        assert_eq!(handle, AgentRef { flock: FlockId(0), member: 1 });
        let world = [flock];
        assert_eq!(
            handle.resolve(&world).map(|a| a.position),
            Some(Vector2D::new(5.0, 5.0))
        );
    }

    #[test]
    fn test_neighbors_filters_radius_and_self() {
        let flock = flock_with(&[(0.0, 0.0), (3.0, 4.0), (10.0, 0.0), (0.0, 0.0)]);

        let found: Vec<_> = flock.neighbors(0, 10.0).map(|n| n.distance).collect();
        assert_eq!(found, vec![5.0, 0.0]);
    }

    #[test]
    fn test_zero_radius_disables_rules() {
        let flock = flock_with(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(flock.neighbors(0, 0.0).count(), 0);
        assert_eq!(flock.separation(0, 0.0), Vector2D::zero());
    }

    #[test]
    fn test_single_member_rules_are_zero() {
        let flock = flock_with(&[(10.0, 10.0)]);
        assert_eq!(flock.separation(0, 100.0), Vector2D::zero());
        assert_eq!(flock.alignment(0, 100.0), Vector2D::zero());
        assert_eq!(flock.cohesion(0, 100.0), Vector2D::zero());
    }

    #[test]
    fn test_cohesion_at_centroid() {
        let flock = flock_with(&[(0.0, 0.0), (10.0, 0.0), (-10.0, 0.0)]);
        assert_eq!(flock.cohesion(0, 50.0), Vector2D::zero());
    }

    #[test]
    fn test_nearest_to() {
        let flock = flock_with(&[(0.0, 0.0), (8.0, 0.0), (2.0, 0.0)]);
        let nearest = flock.nearest_to(Vector2D::new(3.0, 0.0)).unwrap();
        assert_eq!(nearest.agent.position, Vector2D::new(2.0, 0.0));
        assert_eq!(nearest.distance, 1.0);

        assert!(flock_with(&[]).nearest_to(Vector2D::zero()).is_none());
    }

    #[test]
    fn test_update_moves_members() {
        let mut rng = SmallRng::seed_from_u64(11);
        let bounds = Bounds::from_size(800.0, 600.0);
        let mut flock = Flock::populate(
            FlockId(0),
            FlockConfig::default().with_initial_size(10),
            &bounds,
            &mut rng,
        );
        let initial: Vec<_> = flock.members.iter().map(|b| b.position).collect();

        flock.update(&bounds, &mut rng);

        let changed = flock
            .members
            .iter()
            .zip(initial.iter())
            .any(|(b, &initial)| b.position != initial);
        assert!(changed);
    }

    #[test]
    fn test_update_reads_pre_tick_state() {
        // Two mirrored agents must stay mirrored regardless of update order.
        let mut flock = Flock::new(
            FlockId(0),
            FlockConfig::default().with_initial_size(0).with_tuning(crate::SteeringTuning {
                jitter_weight: 0.0,
                ..Default::default()
            }),
        );
        flock.add_agent(Agent::new(
            Vector2D::new(390.0, 250.0),
            Vector2D::new(1.0, 0.0),
            AgentConfig::default(),
        ));
        flock.add_agent(Agent::new(
            Vector2D::new(410.0, 250.0),
            Vector2D::new(-1.0, 0.0),
            AgentConfig::default(),
        ));
        let bounds = Bounds::from_size(800.0, 500.0);
        let mut rng = SmallRng::seed_from_u64(0);

        for _ in 0..5 {
            flock.update(&bounds, &mut rng);
            let a = flock.members[0].position;
            let b = flock.members[1].position;
            assert!((a.x - 400.0 + (b.x - 400.0)).abs() < 1e-3);
            assert!((a.y - b.y).abs() < 1e-3);
        }
    }

    fn still_flock(id: FlockId, config: FlockConfig) -> Flock {
        let tuning = crate::SteeringTuning {
            jitter_weight: 0.0,
            ..config.tuning
        };
        Flock::new(
            id,
            config
                .with_initial_size(0)
                .with_separation_radius(0.0)
                .with_alignment_radius(0.0)
                .with_cohesion_radius(0.0)
                .with_tuning(tuning),
        )
    }

    #[test]
    fn test_resolve_checks_flock_id() {
        let mut flock = Flock::new(FlockId(1), FlockConfig::default().with_initial_size(0));
        flock.add_agent(Agent::new(Vector2D::zero(), Vector2D::zero(), AgentConfig::default()));
        let world = [flock];

        let foreign = AgentRef { flock: FlockId(0), member: 0 };
        assert!(foreign.resolve(&world).is_none());
        assert!(FlockId(0).lookup(&world).is_none());
        assert!(FlockId(1).lookup(&world).is_none());
    }

    #[test]
    fn test_update_ignores_foreign_threats() {
        let mut flock = still_flock(FlockId(1), FlockConfig::default());
        for x in [400.0, 410.0] {
            flock.add_agent(Agent::new(
                Vector2D::new(x, 250.0),
                Vector2D::zero(),
                AgentConfig::default(),
            ));
        }
        flock.add_threat(AgentRef { flock: FlockId(0), member: 0 });
        let bounds = Bounds::from_size(800.0, 500.0);
        let mut rng = SmallRng::seed_from_u64(0);

        flock.update(&bounds, &mut rng);

        assert_eq!(flock.members[0].position, Vector2D::new(400.0, 250.0));
        assert_eq!(flock.members[1].position, Vector2D::new(410.0, 250.0));
    }

    #[test]
    fn test_update_ignores_foreign_prey() {
        let mut flock = still_flock(FlockId(1), FlockConfig::predators());
        flock.add_agent(Agent::predator(
            Vector2D::new(400.0, 250.0),
            Vector2D::zero(),
            crate::PredatorConfig::default(),
            alloc::vec![FlockId(0)],
        ));
        flock.add_agent(Agent::new(
            Vector2D::new(420.0, 250.0),
            Vector2D::zero(),
            AgentConfig::default(),
        ));
        let bounds = Bounds::from_size(800.0, 500.0);
        let mut rng = SmallRng::seed_from_u64(0);

        flock.update(&bounds, &mut rng);

        let hunter = &flock.members[0];
        assert_eq!(hunter.position, Vector2D::new(400.0, 250.0));
        assert!(hunter.boost().is_some_and(|boost| !boost.is_boosting()));
    }
}
