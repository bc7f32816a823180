//! Agents, obstacles and the read-only neighbor view.
//!
//! The steering core never owns the world. Hosts expose their own entities
//! through [`FlockMember`] and [`Obstruction`] (or derive them), and hand a
//! [`NeighborView`] over those slices to each update.

use std::fmt;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::transform::Transform;
use crate::tuning::{TuningError, TuningParameters};

/// Opaque agent handle, used only to skip self in neighbor loops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

impl From<u32> for AgentId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Anything that can appear in another agent's neighbor list.
///
/// Can be derived with `#[derive(FlockMember)]`.
pub trait FlockMember {
    fn id(&self) -> AgentId;

    /// World-space position.
    fn position(&self) -> Vec3;

    /// Current velocity. Magnitude-bearing, not necessarily normalized.
    fn flocking_velocity(&self) -> Vec3;
}

/// A static point the flock steers around.
///
/// Can be derived with `#[derive(Obstruction)]`.
pub trait Obstruction {
    fn position(&self) -> Vec3;
}

impl<T: FlockMember + ?Sized> FlockMember for &T {
    fn id(&self) -> AgentId {
        (**self).id()
    }

    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn flocking_velocity(&self) -> Vec3 {
        (**self).flocking_velocity()
    }
}

impl<T: Obstruction + ?Sized> Obstruction for &T {
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

/// Static obstacle: identity and position only.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub position: Vec3,
}

impl Obstacle {
    pub fn new(id: u32, position: Vec3) -> Self {
        Self { id, position }
    }
}

impl Obstruction for Obstacle {
    fn position(&self) -> Vec3 {
        self.position
    }
}

/// Frozen copy of an agent's observable state.
///
/// A tick computes every agent's update against snapshots taken before any
/// agent moves, so results never depend on update order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl FlockMember for AgentSnapshot {
    fn id(&self) -> AgentId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn flocking_velocity(&self) -> Vec3 {
        self.velocity
    }
}

/// Per-tick neighbor and obstacle lists, borrowed for one update.
///
/// The lists are expected to be pre-filtered by the host; the forces do
/// their own range checks but make no attempt at spatial partitioning.
#[derive(Debug)]
pub struct NeighborView<'a, N, O> {
    agents: &'a [N],
    obstacles: &'a [O],
}

impl<N, O> Clone for NeighborView<'_, N, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, O> Copy for NeighborView<'_, N, O> {}

impl<'a, N: FlockMember, O: Obstruction> NeighborView<'a, N, O> {
    pub fn new(agents: &'a [N], obstacles: &'a [O]) -> Self {
        Self { agents, obstacles }
    }

    pub fn agents(&self) -> &'a [N] {
        self.agents
    }

    pub fn obstacles(&self) -> &'a [O] {
        self.obstacles
    }
}

impl<'a, N: FlockMember> NeighborView<'a, N, Obstacle> {
    /// View with no obstacles.
    pub fn agents_only(agents: &'a [N]) -> Self {
        Self {
            agents,
            obstacles: &[],
        }
    }
}

/// A steering agent.
///
/// `velocity` holds the position delta of the last tick (already scaled by
/// that tick's elapsed time), so its magnitude is `speed * dt`.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub(crate) id: AgentId,
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
    pub(crate) speed: f32,
    pub(crate) orientation: Quat,
    pub(crate) tuning: TuningParameters,
}

impl Agent {
    /// Create an agent at rest, facing [`FORWARD`](crate::math::FORWARD).
    pub fn new(id: AgentId, position: Vec3, tuning: TuningParameters) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            id,
            position,
            velocity: Vec3::ZERO,
            speed: 0.0,
            orientation: Quat::IDENTITY,
            tuning,
        })
    }

    /// Seed the agent's motion, e.g. when the host spawns it mid-flight.
    ///
    /// `speed` is clamped to the configured flight speed. Non-finite
    /// values are taken as zero.
    pub fn with_motion(mut self, velocity: Vec3, speed: f32) -> Self {
        let velocity = if velocity.is_finite() { velocity } else { Vec3::ZERO };
        let speed = if speed.is_finite() { speed } else { 0.0 };
        self.velocity = velocity;
        self.speed = speed.clamp(0.0, self.tuning.flight_speed);
        self.orientation = crate::math::orientation_from_direction(velocity);
        self
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Current scalar speed, always within `[0, flight_speed]`.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    #[inline]
    pub fn tuning(&self) -> &TuningParameters {
        &self.tuning
    }

    /// Replace the tuning parameters. The old set stays on error.
    pub fn reconfigure(&mut self, tuning: TuningParameters) -> Result<(), TuningError> {
        tuning.validate()?;
        self.tuning = tuning;
        self.speed = self.speed.min(tuning.flight_speed);
        Ok(())
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.orientation)
    }

    /// Place the agent directly, bypassing steering.
    pub fn set_transform(&mut self, transform: Transform) {
        self.position = transform.position;
        self.orientation = transform.orientation;
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            position: self.position,
            velocity: self.velocity,
        }
    }
}

impl FlockMember for Agent {
    fn id(&self) -> AgentId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn flocking_velocity(&self) -> Vec3 {
        self.velocity
    }
}
