//! Individual steering rules.
//!
//! Every function returns a raw desired force from one agent's point of view.
//! Normalizing, weighting and saturating are left to the integrator.

use core::f32::consts::TAU;

use rand::Rng;

use crate::{Agent, Bounds, Neighbor, Vector2D};

/// Floor for neighbor distances used as divisors, so coincident agents
/// never divide by zero.
pub const NEIGHBOR_EPSILON: f32 = 1e-3;

/// Classic steering: desired velocity towards `target` minus current velocity.
/// Inside `accept_distance` the desired velocity drops to zero, so the agent
/// brakes on arrival.
pub fn seek(agent: &Agent, target: Vector2D, accept_distance: f32) -> Vector2D {
    let mut desired = target - agent.position;
    if agent.position.distance(&target) < accept_distance {
        desired = Vector2D::zero();
    }
    desired - agent.velocity
}

/// Push away from `target`.
///
/// Full strength inside `full_radius`; across the following `ramp_radius`
/// band the push grows linearly from zero to `max_speed`; nothing beyond.
pub fn avoid(agent: &Agent, target: Vector2D, full_radius: f32, ramp_radius: f32) -> Vector2D {
    let distance = agent.position.distance(&target);
    let away = (agent.position - target).normalize();
    let max_speed = agent.config.max_speed;

    if distance < full_radius {
        away * max_speed - agent.velocity
    } else if distance < full_radius + ramp_radius {
        let ramp_power = (distance - full_radius) / ramp_radius * max_speed;
        away * ramp_power
    } else {
        Vector2D::zero()
    }
}

/// Keeps an agent inside `bounds`.
///
/// Outside the bounds the agent seeks the center. Inside, it is pushed off the
/// nearest border once closer than `border_buffer`, but only while it is not
/// already moving away from that border.
pub fn avoid_borders(agent: &Agent, bounds: &Bounds, border_buffer: f32) -> Vector2D {
    if !bounds.contains(agent.position) {
        return seek(agent, bounds.center(), agent.config.size);
    }

    let Vector2D { x, y } = agent.position;
    let candidates = [
        Vector2D::new(bounds.x_max, y),
        Vector2D::new(x, bounds.y_max),
        Vector2D::new(x, bounds.y_min),
        Vector2D::new(bounds.x_min, y),
    ];

    let mut nearest = candidates[0];
    let mut nearest_distance = agent.position.distance(&nearest);
    for border in &candidates[1..] {
        let distance = agent.position.distance(border);
        if distance < nearest_distance {
            nearest = *border;
            nearest_distance = distance;
        }
    }

    let heading_out = agent.velocity.dot(&(agent.position - nearest)) <= 0.0;
    if nearest_distance < border_buffer && heading_out {
        avoid(agent, nearest, border_buffer, 0.0)
    } else {
        Vector2D::zero()
    }
}

/// Random direction scaled by `scale`.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, scale: f32) -> Vector2D {
    Vector2D::from_angle(rng.gen_range(0.0..TAU)) * scale
}

/// Average push away from neighbors, stronger the closer they are.
pub fn separation<'a, I>(agent: &Agent, neighbors: I) -> Vector2D
where
    I: IntoIterator<Item = Neighbor<'a>>,
{
    let mut steering = Vector2D::zero();
    let mut count = 0;

    for neighbor in neighbors {
        let away = (agent.position - neighbor.agent.position).normalize();
        steering += away * agent.config.max_speed / neighbor.distance.max(NEIGHBOR_EPSILON);
        count += 1;
    }

    if count > 0 {
        steering / count as f32
    } else {
        steering
    }
}

/// Average of neighbor headings, weighted towards closer neighbors.
pub fn alignment<'a, I>(agent: &Agent, neighbors: I) -> Vector2D
where
    I: IntoIterator<Item = Neighbor<'a>>,
{
    let mut steering = Vector2D::zero();
    let mut count = 0;

    for neighbor in neighbors {
        let direction = neighbor.agent.velocity.normalize();
        steering += direction * agent.config.max_speed / neighbor.distance.max(NEIGHBOR_EPSILON);
        count += 1;
    }

    if count > 0 {
        steering / count as f32
    } else {
        steering
    }
}

/// Pull towards the neighbors' centroid; only the direction is meaningful.
pub fn cohesion<'a, I>(agent: &Agent, neighbors: I) -> Vector2D
where
    I: IntoIterator<Item = Neighbor<'a>>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for neighbor in neighbors {
        sum += neighbor.agent.position;
        count += 1;
    }

    if count > 0 {
        let centroid = sum / count as f32;
        (centroid - agent.position).normalize() * agent.config.max_force
    } else {
        Vector2D::zero()
    }
}
