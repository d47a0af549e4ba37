//! Turns [`SimulationSettings`] into a ready-to-run [`Simulation`].

use shoal_core::{
    AgentConfig, Bounds, Color, FlockConfig, FlockId, PredatorConfig, Simulation, SteeringTuning,
};
use shoal_shared::{
    AgentSettings, FlockSettings, PredatorSettings, SimulationSettings, TuningSettings,
};

/// Handles to what [`build`] created.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub prey: Vec<FlockId>,
    pub predators: FlockId,
}

pub fn agent_config(settings: &AgentSettings, base: AgentConfig) -> AgentConfig {
    AgentConfig {
        max_speed: settings.max_speed.unwrap_or(base.max_speed),
        max_force: settings.max_force.unwrap_or(base.max_force),
        size: settings.size.unwrap_or(base.size),
        jitter_scale: settings.jitter_scale.unwrap_or(base.jitter_scale),
        full_avoidance_radius: settings
            .full_avoidance_radius
            .unwrap_or(base.full_avoidance_radius),
        ramp_avoidance_radius: settings
            .ramp_avoidance_radius
            .unwrap_or(base.ramp_avoidance_radius),
        color: settings
            .color
            .map(|[r, g, b]| Color::rgb(r, g, b))
            .unwrap_or(base.color),
    }
}

pub fn tuning(settings: &TuningSettings, base: SteeringTuning) -> SteeringTuning {
    SteeringTuning {
        target_weight: settings.target_weight.unwrap_or(base.target_weight),
        threat_weight: settings.threat_weight.unwrap_or(base.threat_weight),
        prey_weight: settings.prey_weight.unwrap_or(base.prey_weight),
        jitter_weight: settings.jitter_weight.unwrap_or(base.jitter_weight),
        border_weight: settings.border_weight.unwrap_or(base.border_weight),
        separation_weight: settings.separation_weight.unwrap_or(base.separation_weight),
        alignment_weight: settings.alignment_weight.unwrap_or(base.alignment_weight),
        cohesion_weight: settings.cohesion_weight.unwrap_or(base.cohesion_weight),
        border_buffer: settings.border_buffer.unwrap_or(base.border_buffer),
    }
}

pub fn flock_config(settings: &FlockSettings, base: FlockConfig) -> FlockConfig {
    FlockConfig {
        initial_size: settings.initial_size.unwrap_or(base.initial_size),
        separation_radius: settings.separation_radius.unwrap_or(base.separation_radius),
        alignment_radius: settings.alignment_radius.unwrap_or(base.alignment_radius),
        cohesion_radius: settings.cohesion_radius.unwrap_or(base.cohesion_radius),
        agent: agent_config(&settings.agent, base.agent),
        tuning: tuning(&settings.tuning, base.tuning),
    }
}

pub fn predator_config(settings: &PredatorSettings) -> PredatorConfig {
    let base = PredatorConfig::default();
    PredatorConfig {
        agent: agent_config(&settings.agent, base.agent),
        boost_strength: settings.boost_strength.unwrap_or(base.boost_strength),
        boost_radius: settings.boost_radius.unwrap_or(base.boost_radius),
        boost_duration_ticks: settings
            .boost_duration_ticks
            .unwrap_or(base.boost_duration_ticks),
        boost_cooldown_ticks: settings
            .boost_cooldown_ticks
            .unwrap_or(base.boost_cooldown_ticks),
    }
}

/// Creates the prey flocks in order, then the predator flock, then spawns
/// every predator hunting all prey flocks.
pub fn build(settings: &SimulationSettings) -> (Simulation, Scenario) {
    let bounds = Bounds::from_size(settings.width, settings.height);
    let mut simulation = Simulation::new(bounds, settings.seed);

    let prey: Vec<FlockId> = settings
        .flocks
        .iter()
        .map(|flock| {
            let id = simulation.add_flock(flock_config(flock, FlockConfig::default()));
            log::debug!(
                "flock {} ({}) ready",
                id.0,
                flock.name.as_deref().unwrap_or("unnamed")
            );
            id
        })
        .collect();

    let predators =
        simulation.add_flock(flock_config(&settings.predator_flock, FlockConfig::predators()));
    for group in &settings.predators {
        let config = predator_config(group);
        for _ in 0..group.count {
            simulation.spawn_predator(predators, config, prey.clone());
        }
    }

    (simulation, Scenario { prey, predators })
}
