//! Seeded random placement and edge derivation.
//!
//! Coordinates are drawn uniformly in `[0, area_side]²` from a stream seeded
//! with the instance seed, in a fixed order: every POI, then every sensor,
//! then the sinks. A lone sink sits at the centre of the area and consumes
//! no draws.
//!
//! A [`Placement`] refers to its node by position in an owned node arena.
//! The whole [`Layout`] is dropped once the edges are derived.

use super::{Instance, Node, NodeKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Coordinates of one node during generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Placement {
    /// Position of the node in [`Layout::nodes`].
    pub node: usize,
    pub x: f64,
    pub y: f64,
}

impl Placement {
    fn distance(&self, other: &Placement) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Node arena plus per-family placements.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    pub nodes: Vec<Node>,
    pub pois: Vec<Placement>,
    pub sensors: Vec<Placement>,
    pub sinks: Vec<Placement>,
}

impl Layout {
    /// Draws the placements of every node of `instance`.
    pub fn draw(instance: &Instance) -> Self {
        let config = instance.config();
        let side = f64::from(config.area_side);
        let mut rng = StdRng::seed_from_u64(config.seed);

        let total = config.num_pois + config.num_sensors + config.num_sinks;
        let mut layout = Layout {
            nodes: Vec::with_capacity(total),
            pois: Vec::with_capacity(config.num_pois),
            sensors: Vec::with_capacity(config.num_sensors),
            sinks: Vec::with_capacity(config.num_sinks),
        };

        for kind in [NodeKind::Poi, NodeKind::Sensor] {
            for node in instance.nodes(kind) {
                let x = rng.random_range(0.0..=side);
                let y = rng.random_range(0.0..=side);
                layout.place(node, x, y);
            }
        }

        if config.num_sinks == 1 {
            layout.place(Node::new(NodeKind::Sink, 0), side / 2.0, side / 2.0);
        } else {
            for node in instance.nodes(NodeKind::Sink) {
                let x = rng.random_range(0.0..=side);
                let y = rng.random_range(0.0..=side);
                layout.place(node, x, y);
            }
        }

        layout
    }

    fn place(&mut self, node: Node, x: f64, y: f64) {
        let placement = Placement {
            node: self.nodes.len(),
            x,
            y,
        };
        self.nodes.push(node);
        match node.kind {
            NodeKind::Poi => self.pois.push(placement),
            NodeKind::Sensor => self.sensors.push(placement),
            NodeKind::Sink => self.sinks.push(placement),
        }
    }

    /// The node a placement refers to.
    pub fn node_of(&self, placement: &Placement) -> Node {
        self.nodes[placement.node]
    }
}

/// Derives every edge of `instance` from a freshly drawn layout.
///
/// POI–sensor edges use the coverage radius; sensor–sensor and sensor–sink
/// edges use the communication radius. Distances are inclusive.
pub(crate) fn connect(instance: &mut Instance) {
    let layout = Layout::draw(instance);
    let coverage = f64::from(instance.config.coverage_radius);
    let communication = f64::from(instance.config.communication_radius);

    for (i, sensor) in layout.sensors.iter().enumerate() {
        let s = layout.node_of(sensor).index;
        debug_assert_eq!(s, i);

        for poi in &layout.pois {
            if sensor.distance(poi) <= coverage {
                instance.add_coverage(layout.node_of(poi).index, s);
            }
        }

        for sink in &layout.sinks {
            if sensor.distance(sink) <= communication {
                instance.add_uplink(s, layout.node_of(sink).index);
            }
        }

        for other in &layout.sensors[i + 1..] {
            if sensor.distance(other) <= communication {
                instance.add_link(s, layout.node_of(other).index);
            }
        }
    }

    tracing::debug!(
        key = %instance.key(),
        coverage_edges = instance.poi_sensor.iter().map(|s| s.len()).sum::<usize>(),
        "instance generated"
    );
}
