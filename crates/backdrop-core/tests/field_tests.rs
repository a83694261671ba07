// Population, motion and pointer behaviour of the node field.

mod common;

use backdrop_core::{NodeField, SceneConfig};
use common::node_at;
use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};

fn seeded_field(seed: u64) -> NodeField {
    let cfg = SceneConfig {
        seed,
        ..SceneConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    NodeField::initialize(&cfg, &mut rng)
}

#[test]
fn initialize_creates_configured_population() {
    let cfg = SceneConfig::default();
    let mut rng = StdRng::seed_from_u64(1);
    let field = NodeField::initialize(&cfg, &mut rng);
    assert_eq!(field.len(), cfg.node_count);
    for n in field.nodes() {
        assert!(
            n.position.abs().cmple(cfg.bound_half_extents).all(),
            "node spawned outside bounds: {:?}",
            n.position
        );
        assert!(
            n.position.abs().cmple(cfg.spawn_half_extents).all(),
            "node spawned outside spawn box: {:?}",
            n.position
        );
        assert!(n.velocity.abs().max_element() <= cfg.max_speed_component);
        assert!(n.radius >= cfg.radius_range.0 && n.radius <= cfg.radius_range.1);
        assert_eq!(n.original_position, n.position);
    }
}

#[test]
fn outside_nodes_flip_velocity_on_that_axis_only() {
    let cfg = SceneConfig::default();
    let b = cfg.bound_half_extents;
    let mut n = node_at(b.x + 1.0, 0.0, -(b.z + 2.0));
    n.velocity = Vec3::new(0.01, 0.01, -0.01);
    let mut field = NodeField::from_nodes(vec![n], &cfg);
    field.step(None);
    let v = field.nodes()[0].velocity;
    assert_eq!(v, Vec3::new(-0.01, 0.01, 0.01));
}

#[test]
fn boundary_flip_holds_for_whole_population() {
    let cfg = SceneConfig::default();
    let mut field = seeded_field(3);
    // run long enough for many nodes to reach the walls
    for _ in 0..20_000 {
        let before: Vec<(Vec3, Vec3)> = field
            .nodes()
            .iter()
            .map(|n| (n.position, n.velocity))
            .collect();
        field.step(None);
        for ((p0, v0), n) in before.iter().zip(field.nodes()) {
            for axis in 0..3 {
                let p_after_move = p0[axis] + v0[axis];
                if p_after_move.abs() > cfg.bound_half_extents[axis] {
                    assert_eq!(n.velocity[axis], -v0[axis]);
                } else {
                    assert_eq!(n.velocity[axis], v0[axis]);
                }
            }
        }
    }
}

#[test]
fn speeds_never_change_magnitude() {
    let mut field = seeded_field(9);
    let before: Vec<Vec3> = field.nodes().iter().map(|n| n.velocity.abs()).collect();
    for _ in 0..5_000 {
        field.step(Some(Vec3::new(3.0, -2.0, 0.0)));
    }
    for (v0, n) in before.iter().zip(field.nodes()) {
        assert_eq!(*v0, n.velocity.abs());
    }
}

#[test]
fn pointer_on_top_of_node_stays_finite() {
    let cfg = SceneConfig::default();
    let mut n = node_at(1.0, 2.0, 0.0);
    n.velocity = Vec3::ZERO;
    let mut field = NodeField::from_nodes(vec![n], &cfg);
    field.step(Some(Vec3::new(1.0, 2.0, 0.0)));
    let node = &field.nodes()[0];
    assert!(node.position.is_finite());
    assert!(node.velocity.is_finite());
    assert_eq!(node.position, Vec3::new(1.0, 2.0, 0.0));
}

#[test]
fn pointer_push_is_constant_inside_radius() {
    let cfg = SceneConfig::default();
    let near = node_at(0.5, 0.0, 0.0);
    let far_inside = node_at(0.0, cfg.repulsion_radius - 0.5, 0.0);
    let mut field = NodeField::from_nodes(vec![near, far_inside], &cfg);
    field.step(Some(Vec3::ZERO));
    let moved_near = field.nodes()[0].position.x - 0.5;
    let moved_far = field.nodes()[1].position.y - (cfg.repulsion_radius - 0.5);
    assert!((moved_near - cfg.repulsion_step).abs() < 1e-5);
    assert!((moved_far - cfg.repulsion_step).abs() < 1e-5);
}

#[test]
fn same_seed_same_trajectories() {
    let mut a = seeded_field(1234);
    let mut b = seeded_field(1234);
    assert_eq!(a.nodes(), b.nodes());
    let pointers = [Vec3::ZERO, Vec3::new(5.0, 5.0, 0.0), Vec3::new(-12.0, 3.0, 0.0)];
    for tick in 0..600 {
        let p = pointers[tick % pointers.len()];
        a.step(Some(p));
        b.step(Some(p));
    }
    assert_eq!(a.nodes(), b.nodes());
}

#[test]
fn different_seeds_differ() {
    let a = seeded_field(1);
    let b = seeded_field(2);
    assert_ne!(a.nodes(), b.nodes());
}
