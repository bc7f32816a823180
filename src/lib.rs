//! # flocksteer - Flocking steering core
//!
//! Per-agent steering for boids-style flocks. Each tick an agent blends
//! separation, alignment, cohesion, obstacle avoidance and a seek term
//! toward a target into one desired velocity, turns smoothly toward it and
//! moves.
//!
//! flocksteer owns only the math. Spawning, rendering and scene placement
//! stay with the host, which feeds positions and velocities in and takes
//! the resulting [`Transform`] back out.
//!
//! ## Quick Start
//!
//! ```ignore
//! use flocksteer::prelude::*;
//!
//! let mut flock = Flock::new().with_obstacle(Vec3::new(0.0, 0.0, 300.0));
//! for i in 0..64 {
//!     flock.spawn(Vec3::new(i as f32 * 25.0, 0.0, 0.0), TuningParameters::default())?;
//! }
//!
//! let mut clock = TickClock::new();
//! loop {
//!     let dt = clock.update();
//!     flock.step(dt, Vec3::new(2000.0, 0.0, 0.0));
//!     upload(bytemuck::cast_slice(&flock.raw_transforms()));
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Agents
//!
//! An [`Agent`] carries its position, its last per-tick velocity (already
//! scaled by that tick's `dt`), its scalar speed, its orientation and its
//! own [`TuningParameters`].
//!
//! ### Neighbors
//!
//! Forces read other agents through [`FlockMember`] and obstacles through
//! [`Obstruction`]. Host structs can derive either:
//!
//! ```ignore
//! #[derive(FlockMember)]
//! struct Bird {
//!     id: AgentId,
//!     position: Vec3,
//!     velocity: Vec3,
//! }
//! ```
//!
//! A [`NeighborView`] borrows the neighbor and obstacle slices for one
//! update. Lists are taken as given; any spatial culling is the host's job.
//!
//! ### Ticking
//!
//! [`Agent::follow_target`] runs one agent. When agents read each other,
//! all reads in a tick must see pre-tick state: [`Flock::step`] does this by
//! planning every agent against a snapshot before applying any result.
//!
//! ## Forces
//!
//! | Force | Pulls toward | Function |
//! |-------|--------------|----------|
//! | Separation | away from crowding neighbors | [`forces::separation`] |
//! | Alignment | neighbors' average heading | [`forces::alignment`] |
//! | Cohesion | neighbors' centroid | [`forces::cohesion`] |
//! | Avoidance | sideways off obstacles near the heading | [`forces::avoidance`] |
//! | Seek | the target | [`Agent::steering_forces`] |
//!
//! Degenerate input (coincident agents, empty lists, zero velocity) never
//! errors; it yields a zero force or skips the tick.

mod agent;
pub mod clock;
mod flock;
pub mod forces;
pub mod math;
mod steering;
mod transform;
pub mod tuning;

pub use agent::{Agent, AgentId, AgentSnapshot, FlockMember, NeighborView, Obstacle, Obstruction};
pub use bytemuck;
pub use clock::TickClock;
pub use flock::{Flock, FlockError};
pub use flocksteer_derive::{FlockMember, Obstruction};
pub use glam::{Quat, Vec3};
pub use steering::{SteeringForces, SteeringStep};
pub use transform::{Transform, TransformRaw};
pub use tuning::{AvoidanceProjection, BehaviorParams, Falloff, TuningError, TuningParameters};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use flocksteer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::agent::{Agent, AgentId, FlockMember, NeighborView, Obstacle, Obstruction};
    pub use crate::clock::TickClock;
    pub use crate::flock::Flock;
    pub use crate::steering::SteeringForces;
    pub use crate::transform::{Transform, TransformRaw};
    pub use crate::tuning::{AvoidanceProjection, BehaviorParams, Falloff, TuningParameters};
    pub use crate::{Quat, Vec3};
    pub use flocksteer_derive::{FlockMember, Obstruction};
}
