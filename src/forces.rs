//! The four flocking force calculators.
//!
//! Each force is a pure function of the agent's own state and a borrowed
//! neighbor or obstacle list. Every force returns either the zero vector
//! or a vector of exactly `params.strength` length.
//!
//! | Force | Neighbors considered | Skips self |
//! |-------|----------------------|------------|
//! | [`separation`] | within `distance`, weighted by falloff | by id |
//! | [`alignment`] | strictly within `distance`, moving | by id |
//! | [`cohesion`] | within `distance`, unweighted, self included | no |
//! | [`avoidance`] | obstacles within `distance` | n/a |

use glam::Vec3;

use crate::agent::{AgentId, FlockMember, Obstruction};
use crate::math::{safe_normal, EPSILON};
use crate::tuning::{AvoidanceProjection, BehaviorParams};

/// Steer away from crowding neighbors.
///
/// Returns zero when the list holds fewer than two agents (self included).
/// Coincident neighbors contribute nothing.
pub fn separation<N: FlockMember>(
    self_id: AgentId,
    position: Vec3,
    agents: &[N],
    params: &BehaviorParams,
) -> Vec3 {
    if agents.len() < 2 {
        return Vec3::ZERO;
    }

    let mut direction = Vec3::ZERO;
    for other in agents {
        if other.id() == self_id {
            continue;
        }

        let offset = other.position() - position;
        let weight = params.weight(offset.length());
        direction -= safe_normal(offset) * weight;
    }

    safe_normal(direction) * params.strength
}

/// Steer toward the weighted average heading of nearby moving neighbors.
///
/// Neighbors at zero distance, at or beyond `distance`, or at rest are
/// ignored. Returns zero if none remain.
pub fn alignment<N: FlockMember>(
    self_id: AgentId,
    position: Vec3,
    agents: &[N],
    params: &BehaviorParams,
) -> Vec3 {
    let mut count = 0usize;
    let mut heading = Vec3::ZERO;

    for other in agents {
        if other.id() == self_id {
            continue;
        }

        let distance = (other.position() - position).length();
        if distance >= params.distance || distance <= 0.0 {
            continue;
        }

        let velocity = other.flocking_velocity();
        if velocity.length_squared() <= EPSILON {
            continue;
        }

        count += 1;
        heading += safe_normal(velocity) * params.weight(distance);
    }

    if count == 0 {
        return Vec3::ZERO;
    }

    safe_normal(heading) * params.strength
}

/// Steer toward the centroid of agents within `distance`.
///
/// The agent is expected to be in `agents` and is counted in the centroid,
/// which pulls an isolated agent toward staying put. The centroid is the
/// plain mean of every agent in range; the behavior's falloff is not used.
pub fn cohesion<N: FlockMember>(position: Vec3, agents: &[N], params: &BehaviorParams) -> Vec3 {
    let mut count = 0usize;
    let mut center = Vec3::ZERO;

    for other in agents {
        let other_position = other.position();
        if (other_position - position).length() > params.distance {
            continue;
        }

        count += 1;
        center += other_position;
    }

    // Nobody in range: no centroid to steer to.
    if count == 0 {
        return Vec3::ZERO;
    }

    let center = center / count as f32;
    safe_normal(center - position) * params.strength
}

/// Steer sideways away from obstacles near the current heading.
///
/// For each obstacle in range, the closest point on the agent's heading
/// line is found and the escape direction runs from the obstacle through
/// that point. An agent with no heading is pushed straight away.
pub fn avoidance<O: Obstruction>(
    position: Vec3,
    velocity: Vec3,
    obstacles: &[O],
    params: &BehaviorParams,
    projection: AvoidanceProjection,
) -> Vec3 {
    let heading = safe_normal(velocity);
    let mut total = Vec3::ZERO;

    for obstacle in obstacles {
        let obstacle_position = obstacle.position();
        let offset = obstacle_position - position;
        let distance = offset.length();
        if distance > params.distance {
            continue;
        }

        let along = match projection {
            AvoidanceProjection::Relative => offset.dot(heading),
            AvoidanceProjection::Absolute => obstacle_position.dot(heading),
        };
        let closest = position + heading * along;

        total += safe_normal(closest - obstacle_position) * params.weight(distance);
    }

    safe_normal(total) * params.strength
}
