//! Integration tests for derive macros.
//!
//! These tests verify that `#[derive(FlockMember)]` and `#[derive(Obstruction)]`
//! generate working trait impls by feeding derived host types through the
//! steering forces.

use flocksteer::forces;
use flocksteer::{AgentId, AvoidanceProjection, BehaviorParams, FlockMember, NeighborView, Obstruction, Vec3};

// ============================================================================
// FlockMember Derive Tests
// ============================================================================

#[derive(FlockMember, Clone, Debug)]
struct Bird {
    id: AgentId,
    position: Vec3,
    velocity: Vec3,
    hunger: f32,
}

#[derive(FlockMember, Clone, Debug)]
struct Drone {
    #[agent_id]
    handle: AgentId,
    #[position]
    location: Vec3,
    #[velocity]
    last_delta: Vec3,
    // Shadowed by the marked field above.
    position: Vec3,
}

#[derive(FlockMember)]
struct Tagged<T> {
    id: AgentId,
    position: Vec3,
    velocity: Vec3,
    tag: T,
}

#[test]
fn test_flock_member_default_fields() {
    let bird = Bird {
        id: AgentId(4),
        position: Vec3::new(1.0, 2.0, 3.0),
        velocity: Vec3::new(0.0, 0.5, 0.0),
        hunger: 0.25,
    };

    assert_eq!(FlockMember::id(&bird), AgentId(4));
    assert_eq!(FlockMember::position(&bird), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(bird.flocking_velocity(), Vec3::new(0.0, 0.5, 0.0));
    assert_eq!(bird.hunger, 0.25);
}

#[test]
fn test_flock_member_marked_fields_win() {
    let drone = Drone {
        handle: AgentId(9),
        location: Vec3::X,
        last_delta: Vec3::Z,
        position: Vec3::splat(100.0),
    };

    assert_eq!(FlockMember::id(&drone), AgentId(9));
    assert_eq!(FlockMember::position(&drone), Vec3::X);
    assert_eq!(drone.flocking_velocity(), Vec3::Z);
    assert_eq!(drone.position, Vec3::splat(100.0));
}

#[test]
fn test_flock_member_generic_struct() {
    let tagged = Tagged {
        id: AgentId(1),
        position: Vec3::Y,
        velocity: Vec3::X,
        tag: "leader",
    };

    assert_eq!(FlockMember::id(&tagged), AgentId(1));
    assert_eq!(tagged.tag, "leader");
}

#[test]
fn test_derived_members_drive_forces() {
    let params = BehaviorParams::new(10.0, 1.0);
    let birds = vec![
        Bird {
            id: AgentId(0),
            position: Vec3::ZERO,
            velocity: Vec3::X,
            hunger: 0.0,
        },
        Bird {
            id: AgentId(1),
            position: Vec3::new(0.0, 4.0, 0.0),
            velocity: Vec3::Z,
            hunger: 0.0,
        },
    ];

    let separation = forces::separation(AgentId(0), Vec3::ZERO, &birds, &params);
    assert!((separation - Vec3::NEG_Y).length() < 1.0e-5);

    let alignment = forces::alignment(AgentId(0), Vec3::ZERO, &birds, &params);
    assert!((alignment - Vec3::Z).length() < 1.0e-5);

    // Borrowed members work too.
    let refs: Vec<&Bird> = birds.iter().collect();
    let view = NeighborView::<&Bird, flocksteer::Obstacle>::agents_only(&refs);
    assert_eq!(view.agents().len(), 2);
}

// ============================================================================
// Obstruction Derive Tests
// ============================================================================

#[derive(Obstruction, Clone, Copy)]
struct Rock {
    position: Vec3,
    radius: f32,
}

#[derive(Obstruction)]
struct Pillar {
    #[position]
    base: Vec3,
}

#[test]
fn test_obstruction_default_field() {
    let rock = Rock {
        position: Vec3::new(5.0, 0.0, 0.0),
        radius: 2.0,
    };
    assert_eq!(Obstruction::position(&rock), Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(rock.radius, 2.0);
}

#[test]
fn test_obstruction_marked_field() {
    let pillar = Pillar { base: Vec3::Z };
    assert_eq!(Obstruction::position(&pillar), Vec3::Z);
}

#[test]
fn test_derived_obstacles_drive_avoidance() {
    let params = BehaviorParams::new(10.0, 3.0);
    let rocks = [Rock {
        position: Vec3::new(3.0, 1.0, 0.0),
        radius: 1.0,
    }];

    let force = forces::avoidance(Vec3::ZERO, Vec3::X, &rocks, &params, AvoidanceProjection::Relative);
    assert!((force - Vec3::NEG_Y * 3.0).length() < 1.0e-5);
}
