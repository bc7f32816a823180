//! Per-tick steering update.
//!
//! One update blends the seek term and the four flocking forces into a
//! desired velocity, turns the agent part of the way toward it, ramps the
//! speed up and moves the agent:
//!
//! ```text
//! desired  = normalize(target - position) + separation + alignment + cohesion + avoidance
//! rotation = slerp(heading, look(desired), clamp(turn_speed * dt, 0, 1))
//! speed    = clamp(speed + acceleration * dt, 0, flight_speed)
//! velocity = rotation * FORWARD * speed * dt
//! position = position + velocity
//! ```
//!
//! A desired velocity of exactly zero leaves the agent untouched for that
//! tick. Any non-zero sum, however small, still steers.

use glam::{Quat, Vec3};

use crate::agent::{Agent, FlockMember, NeighborView, Obstruction};
use crate::forces;
use crate::math::{clamp_unit, orientation_from_direction, safe_normal, EPSILON, FORWARD};
use crate::transform::Transform;

/// The individual terms that make up a desired velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SteeringForces {
    pub seek: Vec3,
    pub separation: Vec3,
    pub alignment: Vec3,
    pub cohesion: Vec3,
    pub avoidance: Vec3,
}

impl SteeringForces {
    /// Unweighted sum of every term.
    pub fn total(&self) -> Vec3 {
        self.seek + self.separation + self.alignment + self.cohesion + self.avoidance
    }
}

/// Computed next state of an agent, not yet applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringStep {
    pub position: Vec3,
    pub velocity: Vec3,
    pub speed: f32,
    pub orientation: Quat,
}

impl SteeringStep {
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.orientation)
    }
}

impl Agent {
    /// Evaluate every steering term for this agent.
    pub fn steering_forces<N, O>(&self, target: Vec3, view: NeighborView<'_, N, O>) -> SteeringForces
    where
        N: FlockMember,
        O: Obstruction,
    {
        let tuning = &self.tuning;
        let agents = view.agents();

        SteeringForces {
            seek: safe_normal(target - self.position),
            separation: forces::separation(self.id, self.position, agents, &tuning.separation),
            alignment: forces::alignment(self.id, self.position, agents, &tuning.alignment),
            cohesion: forces::cohesion(self.position, agents, &tuning.cohesion),
            avoidance: forces::avoidance(
                self.position,
                self.velocity,
                view.obstacles(),
                &tuning.avoidance,
                tuning.avoidance_projection,
            ),
        }
    }

    /// Sum of the seek term and the four flocking forces.
    pub fn desired_velocity<N, O>(&self, target: Vec3, view: NeighborView<'_, N, O>) -> Vec3
    where
        N: FlockMember,
        O: Obstruction,
    {
        self.steering_forces(target, view).total()
    }

    /// Compute this tick's motion without applying it.
    ///
    /// Returns `None` when the desired velocity is zero. Negative or
    /// non-finite `dt` is treated as zero.
    pub fn plan_step<N, O>(&self, dt: f32, target: Vec3, view: NeighborView<'_, N, O>) -> Option<SteeringStep>
    where
        N: FlockMember,
        O: Obstruction,
    {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let steering = self.steering_forces(target, view);
        let desired = steering.total();

        // Only an exact cancellation (or an underflowing sum) has no heading.
        let direction = desired.normalize_or_zero();
        if direction == Vec3::ZERO {
            log::debug!("{} has no desired velocity, holding course", self.id);
            return None;
        }

        // A zero-dt tick leaves a zero velocity behind; fall back to the
        // stored orientation so the heading survives it.
        let current_rotation = if self.velocity.length_squared() > EPSILON {
            orientation_from_direction(self.velocity)
        } else {
            self.orientation
        };
        let desired_rotation = orientation_from_direction(direction);
        let rotation = current_rotation
            .slerp(desired_rotation, clamp_unit(self.tuning.turn_speed * dt))
            .normalize();

        let speed = (self.speed + self.tuning.acceleration * dt).clamp(0.0, self.tuning.flight_speed);
        let velocity = rotation * FORWARD * speed * dt;

        log::trace!(
            "{} seek={:?} sep={:?} align={:?} coh={:?} avoid={:?} speed={}",
            self.id,
            steering.seek,
            steering.separation,
            steering.alignment,
            steering.cohesion,
            steering.avoidance,
            speed
        );

        Some(SteeringStep {
            position: self.position + velocity,
            velocity,
            speed,
            orientation: rotation,
        })
    }

    /// Write a planned step into the agent.
    pub fn apply_step(&mut self, step: &SteeringStep) {
        self.position = step.position;
        self.velocity = step.velocity;
        self.speed = step.speed;
        self.orientation = step.orientation;
    }

    /// Run one steering tick toward `target`.
    ///
    /// Returns the new transform, or `None` if the agent had nothing to
    /// steer toward and kept its previous state.
    pub fn follow_target<N, O>(&mut self, dt: f32, target: Vec3, view: NeighborView<'_, N, O>) -> Option<Transform>
    where
        N: FlockMember,
        O: Obstruction,
    {
        let step = self.plan_step(dt, target, view)?;
        self.apply_step(&step);
        Some(step.transform())
    }
}
