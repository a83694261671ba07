//! The drifting node population.

use crate::config::SceneConfig;
use crate::math::{self, AXES};
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub position: Vec3,
    /// World units per tick. Components only ever change sign.
    pub velocity: Vec3,
    pub original_position: Vec3,
    pub radius: f32,
}

/// Motion parameters copied out of [`SceneConfig`] at construction.
#[derive(Clone, Copy, Debug)]
struct FieldParams {
    half_extents: Vec3,
    reflect_axes: [bool; 3],
    repulsion_radius: f32,
    repulsion_step: f32,
}

pub struct NodeField {
    nodes: Vec<Node>,
    params: FieldParams,
}

impl NodeField {
    /// Populate `config.node_count` nodes with random position, velocity and
    /// radius. The config is assumed validated.
    pub fn initialize<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let (rmin, rmax) = config.radius_range;
        let nodes = (0..config.node_count)
            .map(|_| {
                let position = math::sample_in_box(rng, config.spawn_half_extents);
                let velocity =
                    math::sample_in_box(rng, Vec3::splat(config.max_speed_component));
                let radius = if rmax > rmin {
                    rng.gen_range(rmin..rmax)
                } else {
                    rmin
                };
                Node {
                    position,
                    velocity,
                    original_position: position,
                    radius,
                }
            })
            .collect::<Vec<_>>();
        log::debug!(
            "[field] {} nodes in +/-({:.1},{:.1},{:.1})",
            nodes.len(),
            config.spawn_half_extents.x,
            config.spawn_half_extents.y,
            config.spawn_half_extents.z
        );
        Self::from_nodes(nodes, config)
    }

    /// Build a field around an explicit population.
    pub fn from_nodes(nodes: Vec<Node>, config: &SceneConfig) -> Self {
        Self {
            nodes,
            params: FieldParams {
                half_extents: config.bound_half_extents,
                reflect_axes: config.reflect_axes,
                repulsion_radius: config.repulsion_radius,
                repulsion_step: config.repulsion_step,
            },
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.nodes.iter().map(|n| n.position)
    }

    /// Advance every node by one fixed tick.
    ///
    /// Integration, boundary reflection and pointer repulsion run in that
    /// order per node. The reflection only flips velocity, so a node may
    /// finish the tick outside the bound.
    pub fn step(&mut self, pointer_world: Option<Vec3>) {
        let p = self.params;
        let radius_sq = p.repulsion_radius * p.repulsion_radius;
        for node in &mut self.nodes {
            node.position += node.velocity;

            for axis in AXES {
                if p.reflect_axes[axis] && node.position[axis].abs() > p.half_extents[axis] {
                    node.velocity[axis] = -node.velocity[axis];
                }
            }

            if let Some(pointer) = pointer_world {
                if node.position.distance_squared(pointer) < radius_sq {
                    if let Some(away) = math::direction(pointer, node.position) {
                        node.position += away * p.repulsion_step;
                    }
                }
            }
        }
    }

    /// Put every node back at its spawn position. Velocities are kept.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.position = node.original_position;
        }
    }
}
