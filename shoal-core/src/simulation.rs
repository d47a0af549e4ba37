use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::agent::random_pose;
use crate::{
    Agent, AgentRef, Behavior, Bounds, Color, Flock, FlockConfig, FlockId, PredatorConfig,
    Vector2D,
};

/// Supplies the pointer position, if any, once per tick.
pub trait InputSource {
    fn poll(&mut self, tick: u64) -> Option<Vector2D>;
}

impl InputSource for Option<Vector2D> {
    fn poll(&mut self, _tick: u64) -> Option<Vector2D> {
        *self
    }
}

/// Consumes the finished state of a tick. Never feeds back into the simulation.
pub trait Renderer {
    type Error;

    fn render(&mut self, tick: u64, agents: &[AgentView]) -> Result<(), Self::Error>;
}

/// What a renderer needs to draw one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub flock: FlockId,
    pub position: Vector2D,
    pub heading: f32,
    pub size: f32,
    pub color: Color,
    pub predator: bool,
    pub boosting: bool,
}

impl AgentView {
    fn of(flock: FlockId, agent: &Agent) -> Self {
        Self {
            flock,
            position: agent.position,
            heading: agent.heading,
            size: agent.config.size,
            color: agent.config.color,
            predator: agent.is_predator(),
            boosting: agent.boost().is_some_and(|boost| boost.is_boosting()),
        }
    }
}

/// All flocks sharing one area, advanced together tick by tick
pub struct Simulation {
    flocks: Vec<Flock>,
    bounds: Bounds,
    rng: SmallRng,
    tick: u64,
}

impl Simulation {
    /// Empty simulation; every random draw derives from `seed`.
    pub fn new(bounds: Bounds, seed: u64) -> Self {
        Self {
            flocks: Vec::new(),
            bounds,
            rng: SmallRng::seed_from_u64(seed),
            tick: 0,
        }
    }

    /// Adds a flock populated with `config.initial_size` random agents.
    pub fn add_flock(&mut self, config: FlockConfig) -> FlockId {
        let id = FlockId(self.flocks.len());
        let flock = Flock::populate(id, config, &self.bounds, &mut self.rng);
        self.flocks.push(flock);
        id
    }

    /// Adds `agent` to `flock`. Predators are registered as a threat with
    /// every flock they hunt.
    pub fn add_agent(&mut self, flock: FlockId, agent: Agent) -> Option<AgentRef> {
        let prey = match &agent.behavior {
            Behavior::Predator(predator) => predator.prey.clone(),
            Behavior::Basic => Vec::new(),
        };

        let handle = self.flocks.get_mut(flock.0)?.add_agent(agent);
        for id in prey {
            if let Some(prey_flock) = self.flocks.get_mut(id.0) {
                prey_flock.add_threat(handle);
            }
        }
        Some(handle)
    }

    /// Places a new predator at a random position, moving in a random
    /// direction at full speed.
    pub fn spawn_predator(
        &mut self,
        flock: FlockId,
        config: PredatorConfig,
        prey: Vec<FlockId>,
    ) -> Option<AgentRef> {
        if self.flocks.get(flock.0).is_none() {
            return None;
        }
        let (position, velocity) = random_pose(&mut self.rng, &self.bounds, config.agent.max_speed);
        self.add_agent(flock, Agent::predator(position, velocity, config, prey))
    }

    /// Sets (or clears) the pointer target of every flock.
    pub fn set_target(&mut self, target: Option<Vector2D>) {
        for flock in &mut self.flocks {
            flock.set_target(target);
        }
    }

    pub fn resize(&mut self, bounds: Bounds) {
        log::debug!("resized to {}x{}", bounds.width(), bounds.height());
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn flocks(&self) -> &[Flock] {
        &self.flocks
    }

    pub fn flock(&self, id: FlockId) -> Option<&Flock> {
        self.flocks.get(id.0)
    }

    pub fn agent(&self, handle: AgentRef) -> Option<&Agent> {
        handle.resolve(&self.flocks)
    }

    pub fn agent_count(&self) -> usize {
        self.flocks.iter().map(Flock::len).sum()
    }

    /// Number of completed ticks.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Advances every flock by one tick.
    ///
    /// All forces are planned against the pre-tick state before any agent
    /// moves, so update order never leaks into the result.
    pub fn step(&mut self) {
        let world: &[Flock] = &self.flocks;
        let mut plans = Vec::with_capacity(world.len());
        for flock in world {
            plans.push(flock.plan(world, &self.bounds, &mut self.rng));
        }

        for (flock, plans) in self.flocks.iter_mut().zip(plans) {
            flock.apply(plans);
        }

        self.tick += 1;
    }

    /// Reads the input for this tick into every flock's target, then steps.
    pub fn step_with<I: InputSource + ?Sized>(&mut self, input: &mut I) {
        let target = input.poll(self.tick);
        self.set_target(target);
        self.step();
    }

    pub fn views(&self) -> impl Iterator<Item = AgentView> + '_ {
        self.flocks.iter().flat_map(|flock| {
            flock
                .members
                .iter()
                .map(move |agent| AgentView::of(flock.id, agent))
        })
    }

    /// Hands the current state to `renderer`.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<(), R::Error> {
        let views: Vec<AgentView> = self.views().collect();
        renderer.render(self.tick, &views)
    }
}
