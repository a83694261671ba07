//! Proximity edges between nodes, rebuilt from scratch every tick.
//!
//! Two interchangeable scans produce the same edge set:
//!
//! - [`AllPairs`] checks every `i < j` pair. O(n²), fine for the ~120 node
//!   default (7 140 checks per tick).
//! - [`UniformGrid`] buckets nodes into cubic cells one threshold wide and
//!   only compares nodes in neighbouring cells. Worth it once n grows.
//!
//! Edge order is not part of the contract and differs between the two.

use crate::config::LinkStrategy;
use crate::node::Node;
use fnv::FnvHashMap;
use glam::{IVec3, Vec3};
use smallvec::SmallVec;

/// Flat edge output: index pairs plus two segment endpoints per edge.
#[derive(Clone, Debug, Default)]
pub struct EdgeList {
    pairs: Vec<(u32, u32)>,
    segments: Vec<Vec3>,
}

impl EdgeList {
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(edges),
            segments: Vec::with_capacity(edges * 2),
        }
    }

    /// Drop all edges, keeping the allocations for the next tick.
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.segments.clear();
    }

    #[inline]
    pub fn push(&mut self, i: usize, j: usize, a: Vec3, b: Vec3) {
        self.pairs.push((i as u32, j as u32));
        self.segments.push(a);
        self.segments.push(b);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Node index pairs, always with the lower index first.
    pub fn pairs(&self) -> &[(u32, u32)] {
        &self.pairs
    }

    /// Line-list vertices: edge `k` spans `segments[2k]..segments[2k + 1]`.
    pub fn segments(&self) -> &[Vec3] {
        &self.segments
    }
}

pub trait ProximityLinker {
    /// Replace `out` with one edge per unordered pair closer than `threshold`.
    fn rebuild(&mut self, nodes: &[Node], threshold: f32, out: &mut EdgeList);

    fn name(&self) -> &'static str;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AllPairs;

impl ProximityLinker for AllPairs {
    fn rebuild(&mut self, nodes: &[Node], threshold: f32, out: &mut EdgeList) {
        out.clear();
        let threshold_sq = threshold * threshold;
        for (i, a) in nodes.iter().enumerate() {
            for (j, b) in nodes.iter().enumerate().skip(i + 1) {
                if a.position.distance_squared(b.position) < threshold_sq {
                    out.push(i, j, a.position, b.position);
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "all-pairs"
    }
}

type Bucket = SmallVec<[u32; 8]>;

/// Hash grid keyed by integer cell coordinate.
#[derive(Clone, Debug, Default)]
pub struct UniformGrid {
    cells: FnvHashMap<IVec3, Bucket>,
    node_cells: Vec<IVec3>,
}

impl UniformGrid {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn cell_of(position: Vec3, cell_size: f32) -> IVec3 {
        (position / cell_size).floor().as_ivec3()
    }
}

const NEIGHBOURHOOD: [i32; 3] = [-1, 0, 1];

impl ProximityLinker for UniformGrid {
    fn rebuild(&mut self, nodes: &[Node], threshold: f32, out: &mut EdgeList) {
        out.clear();
        self.cells.clear();
        self.node_cells.clear();

        for (i, n) in nodes.iter().enumerate() {
            let cell = Self::cell_of(n.position, threshold);
            self.node_cells.push(cell);
            self.cells.entry(cell).or_default().push(i as u32);
        }

        let threshold_sq = threshold * threshold;
        for (i, a) in nodes.iter().enumerate() {
            let home = self.node_cells[i];
            for dx in NEIGHBOURHOOD {
                for dy in NEIGHBOURHOOD {
                    for dz in NEIGHBOURHOOD {
                        let Some(bucket) = self.cells.get(&(home + IVec3::new(dx, dy, dz)))
                        else {
                            continue;
                        };
                        for &j in bucket.iter() {
                            let j = j as usize;
                            if j <= i {
                                continue;
                            }
                            let b = &nodes[j];
                            if a.position.distance_squared(b.position) < threshold_sq {
                                out.push(i, j, a.position, b.position);
                            }
                        }
                    }
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "uniform-grid"
    }
}

pub fn linker_for(strategy: LinkStrategy) -> Box<dyn ProximityLinker> {
    match strategy {
        LinkStrategy::AllPairs => Box::new(AllPairs),
        LinkStrategy::UniformGrid => Box::new(UniformGrid::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32, z: f32) -> Node {
        let p = Vec3::new(x, y, z);
        Node {
            position: p,
            velocity: Vec3::ZERO,
            original_position: p,
            radius: 0.1,
        }
    }

    #[test]
    fn segments_follow_pairs() {
        let nodes = vec![at(0.0, 0.0, 0.0), at(1.0, 0.0, 0.0), at(50.0, 0.0, 0.0)];
        let mut out = EdgeList::default();
        AllPairs.rebuild(&nodes, 8.0, &mut out);
        assert_eq!(out.pairs(), &[(0, 1)]);
        assert_eq!(out.segments(), &[nodes[0].position, nodes[1].position]);
    }

    #[test]
    fn exactly_at_threshold_is_not_linked() {
        let nodes = vec![at(0.0, 0.0, 0.0), at(8.0, 0.0, 0.0)];
        let mut out = EdgeList::default();
        AllPairs.rebuild(&nodes, 8.0, &mut out);
        assert!(out.is_empty());
        UniformGrid::new().rebuild(&nodes, 8.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn grid_links_across_cell_boundaries() {
        // straddles the cell edge at x = 8 and the one at the origin
        let nodes = vec![at(7.9, 0.0, 0.0), at(8.1, 0.0, 0.0), at(-0.05, 0.0, 0.0)];
        let mut out = EdgeList::default();
        UniformGrid::new().rebuild(&nodes, 8.0, &mut out);
        let mut pairs = out.pairs().to_vec();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn rebuild_discards_previous_edges() {
        let mut nodes = vec![at(0.0, 0.0, 0.0), at(1.0, 0.0, 0.0)];
        let mut out = EdgeList::default();
        AllPairs.rebuild(&nodes, 8.0, &mut out);
        assert_eq!(out.len(), 1);
        nodes[1].position.x = 20.0;
        AllPairs.rebuild(&nodes, 8.0, &mut out);
        assert!(out.is_empty());
        assert!(out.segments().is_empty());
    }
}
