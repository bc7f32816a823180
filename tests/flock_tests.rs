//! Integration tests for the flock driver.

use flocksteer::prelude::*;
use flocksteer::{AgentSnapshot, FlockError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn spawn_ring(flock: &mut Flock, count: usize, radius: f32) -> Vec<AgentId> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let position = Vec3::new(angle.cos(), 0.0, angle.sin()) * radius;
            flock.spawn(position, TuningParameters::default()).unwrap()
        })
        .collect()
}

#[test]
fn step_reads_pre_tick_state() {
    let mut flock = Flock::new().with_obstacle(Vec3::new(0.0, 0.0, 150.0));
    spawn_ring(&mut flock, 8, 120.0);
    let target = Vec3::new(800.0, 40.0, 0.0);
    let dt = 1.0 / 30.0;

    // Compute the expected result by hand from one frozen snapshot.
    let snapshot: Vec<AgentSnapshot> = flock.agents().iter().map(Agent::snapshot).collect();
    let view = NeighborView::new(&snapshot, flock.obstacles());
    let expected: Vec<Transform> = flock
        .agents()
        .iter()
        .map(|agent| agent.plan_step(dt, target, view).unwrap().transform())
        .collect();

    assert_eq!(flock.step(dt, target), 8);
    assert_eq!(flock.transforms(), expected);
}

fn random_agents(seed: u64, count: u32) -> Vec<Agent> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let position = Vec3::new(
                rng.gen_range(-200.0..200.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-200.0..200.0),
            );
            Agent::new(AgentId(i), position, TuningParameters::default()).unwrap()
        })
        .collect()
}

#[test]
fn update_order_does_not_change_outcome() {
    let mut flock = Flock::new().with_obstacle(Vec3::ZERO);
    for agent in random_agents(11, 16) {
        flock.insert(agent);
    }
    let target = Vec3::new(0.0, 300.0, 600.0);
    let dt = 1.0 / 60.0;

    // Update back to front against the same frozen snapshot.
    let mut manual: Vec<Agent> = flock.agents().to_vec();
    let snapshot: Vec<AgentSnapshot> = manual.iter().map(Agent::snapshot).collect();
    let obstacles = flock.obstacles().to_vec();
    for agent in manual.iter_mut().rev() {
        agent.follow_target(dt, target, NeighborView::new(&snapshot, &obstacles));
    }

    flock.step(dt, target);
    assert_eq!(flock.agents(), manual.as_slice());
}

#[test]
fn neighbor_list_order_only_affects_rounding() {
    let agents = random_agents(12, 16);
    let mut forward = Flock::new().with_obstacle(Vec3::ZERO);
    let mut reversed = Flock::new().with_obstacle(Vec3::ZERO);
    for agent in &agents {
        forward.insert(agent.clone());
    }
    for agent in agents.iter().rev() {
        reversed.insert(agent.clone());
    }

    let target = Vec3::new(0.0, 300.0, 600.0);
    for _ in 0..30 {
        forward.step(1.0 / 60.0, target);
        reversed.step(1.0 / 60.0, target);
    }

    for agent in forward.agents() {
        let twin = reversed.get(agent.id()).unwrap();
        assert!(agent.position().distance(twin.position()) < 1.0e-2);
        assert!((agent.speed() - twin.speed()).abs() < 1.0e-2);
    }
}

#[test]
fn flock_heads_toward_target() {
    let mut flock = Flock::new();
    spawn_ring(&mut flock, 12, 80.0);
    let target = Vec3::new(5000.0, 0.0, 0.0);

    let start = flock.centroid().unwrap();
    for _ in 0..120 {
        flock.step(1.0 / 60.0, target);
    }
    let end = flock.centroid().unwrap();

    assert!(end.distance(target) < start.distance(target));
    for agent in flock.agents() {
        assert!(agent.speed() <= agent.tuning().flight_speed);
    }
}

#[test]
fn lone_agent_on_target_holds_still() {
    let mut flock = Flock::new();
    let id = flock.spawn(Vec3::new(3.0, 3.0, 3.0), TuningParameters::default()).unwrap();

    assert_eq!(flock.step(0.1, Vec3::new(3.0, 3.0, 3.0)), 0);
    let agent = flock.get(id).unwrap();
    assert_eq!(agent.position(), Vec3::new(3.0, 3.0, 3.0));
    assert_eq!(agent.speed(), 0.0);
}

#[test]
fn raw_transforms_cast_to_bytes() {
    let mut flock = Flock::new();
    spawn_ring(&mut flock, 5, 10.0);
    flock.step(0.05, Vec3::new(0.0, 100.0, 0.0));

    let mut raw = Vec::new();
    flock.write_raw_transforms(&mut raw);
    let bytes: &[u8] = flocksteer::bytemuck::cast_slice(&raw);
    assert_eq!(bytes.len(), 5 * std::mem::size_of::<TransformRaw>());

    for (raw, transform) in raw.iter().zip(flock.transforms()) {
        assert_eq!(Transform::from(*raw), transform);
    }
}

#[test]
fn reconfigure_through_flock() {
    let mut flock = Flock::new();
    let id = flock.spawn(Vec3::ZERO, TuningParameters::default()).unwrap();

    flock
        .reconfigure(id, TuningParameters::default().with_flight_speed(1.0))
        .unwrap();
    assert_eq!(flock.get(id).unwrap().tuning().flight_speed, 1.0);

    let bad = TuningParameters::default().with_acceleration(-3.0);
    assert!(matches!(flock.reconfigure(id, bad), Err(FlockError::Tuning(_))));
    assert!(matches!(
        flock.reconfigure(AgentId(77), TuningParameters::default()),
        Err(FlockError::UnknownAgent(AgentId(77)))
    ));

    let removed = flock.remove(id).unwrap();
    assert_eq!(removed.id(), id);
    assert!(flock.is_empty());
}
