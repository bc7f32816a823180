//! Flock driver: ticks a set of agents from one consistent snapshot.
//!
//! Every agent in a tick reads its neighbors' pre-tick state. The driver
//! takes a snapshot of the whole flock, plans every agent's step against
//! it, and only then writes the results back, so agent order never changes
//! the outcome.
//!
//! # Example
//!
//! ```ignore
//! use flocksteer::prelude::*;
//!
//! let mut flock = Flock::new().with_obstacle(Vec3::new(0.0, 0.0, 200.0));
//! for i in 0..32 {
//!     flock.spawn(Vec3::new(i as f32 * 20.0, 0.0, 0.0), TuningParameters::default())?;
//! }
//!
//! let target = Vec3::new(1000.0, 0.0, 0.0);
//! flock.step(1.0 / 60.0, target);
//! let raw = flock.raw_transforms();
//! let bytes: &[u8] = bytemuck::cast_slice(&raw);
//! ```

use glam::Vec3;
use thiserror::Error;

use crate::agent::{Agent, AgentId, AgentSnapshot, NeighborView, Obstacle};
use crate::transform::{Transform, TransformRaw};
use crate::tuning::{TuningError, TuningParameters};

#[derive(Debug, Error)]
pub enum FlockError {
    #[error("no agent with id {0}")]
    UnknownAgent(AgentId),

    #[error("every agent id has been handed out")]
    IdsExhausted,

    #[error(transparent)]
    Tuning(#[from] TuningError),
}

/// A set of agents and obstacles stepped together.
#[derive(Debug)]
pub struct Flock {
    agents: Vec<Agent>,
    obstacles: Vec<Obstacle>,
    snapshot: Vec<AgentSnapshot>,
    /// `None` once `u32::MAX` has been used.
    next_agent_id: Option<u32>,
    next_obstacle_id: u32,
    tick: u64,
}

impl Default for Flock {
    fn default() -> Self {
        Self {
            agents: Vec::new(),
            obstacles: Vec::new(),
            snapshot: Vec::new(),
            next_agent_id: Some(0),
            next_obstacle_id: 0,
            tick: 0,
        }
    }
}

impl Flock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a static obstacle while building the flock.
    pub fn with_obstacle(mut self, position: Vec3) -> Self {
        self.add_obstacle(position);
        self
    }

    /// Spawn an agent at rest.
    ///
    /// Fails if `tuning` does not validate or no unused id is left.
    pub fn spawn(&mut self, position: Vec3, tuning: TuningParameters) -> Result<AgentId, FlockError> {
        let raw = self.next_agent_id.ok_or(FlockError::IdsExhausted)?;
        let id = AgentId(raw);
        let agent = Agent::new(id, position, tuning)?;
        self.next_agent_id = raw.checked_add(1);
        self.agents.push(agent);
        log::debug!("spawned {id} at {position:?}");
        Ok(id)
    }

    /// Adopt an agent built by the host, replacing any agent with the same id.
    pub fn insert(&mut self, agent: Agent) -> AgentId {
        let id = agent.id();
        if let Some(existing) = self.get_mut(id) {
            *existing = agent;
        } else {
            if self.next_agent_id.is_some_and(|next| id.0 >= next) {
                self.next_agent_id = id.0.checked_add(1);
            }
            self.agents.push(agent);
        }
        id
    }

    pub fn add_obstacle(&mut self, position: Vec3) -> u32 {
        let id = self.next_obstacle_id;
        self.next_obstacle_id += 1;
        self.obstacles.push(Obstacle::new(id, position));
        id
    }

    /// Remove an agent, returning it.
    pub fn remove(&mut self, id: AgentId) -> Result<Agent, FlockError> {
        let index = self
            .agents
            .iter()
            .position(|a| a.id() == id)
            .ok_or(FlockError::UnknownAgent(id))?;
        Ok(self.agents.remove(index))
    }

    pub fn remove_obstacle(&mut self, id: u32) -> Option<Obstacle> {
        let index = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.remove(index))
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id() == id)
    }

    /// Change one agent's tuning.
    pub fn reconfigure(&mut self, id: AgentId, tuning: TuningParameters) -> Result<(), FlockError> {
        let agent = self.get_mut(id).ok_or(FlockError::UnknownAgent(id))?;
        agent.reconfigure(tuning)?;
        Ok(())
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance every agent one tick toward `target`.
    ///
    /// Returns how many agents moved; the rest had no desired velocity.
    pub fn step(&mut self, dt: f32, target: Vec3) -> usize {
        self.snapshot.clear();
        self.snapshot.extend(self.agents.iter().map(Agent::snapshot));

        let view = NeighborView::new(&self.snapshot, &self.obstacles);
        let steps: Vec<_> = self
            .agents
            .iter()
            .map(|agent| agent.plan_step(dt, target, view))
            .collect();

        let mut moved = 0;
        for (agent, step) in self.agents.iter_mut().zip(&steps) {
            if let Some(step) = step {
                agent.apply_step(step);
                moved += 1;
            }
        }

        self.tick += 1;
        log::debug!(
            "tick {}: {}/{} agents moved (dt={dt})",
            self.tick,
            moved,
            self.agents.len()
        );
        moved
    }

    pub fn transforms(&self) -> Vec<Transform> {
        self.agents.iter().map(Agent::transform).collect()
    }

    /// Fill `out` with one [`TransformRaw`] per agent, in agent order.
    pub fn write_raw_transforms(&self, out: &mut Vec<TransformRaw>) {
        out.clear();
        out.extend(self.agents.iter().map(|a| a.transform().to_raw()));
    }

    pub fn raw_transforms(&self) -> Vec<TransformRaw> {
        let mut out = Vec::with_capacity(self.agents.len());
        self.write_raw_transforms(&mut out);
        out
    }

    /// Mean position of the flock, or `None` when empty.
    pub fn centroid(&self) -> Option<Vec3> {
        if self.agents.is_empty() {
            return None;
        }
        let sum: Vec3 = self.agents.iter().map(Agent::position).sum();
        Some(sum / self.agents.len() as f32)
    }
}
