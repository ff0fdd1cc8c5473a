//! KCMC instance model.
//!
//! An [`Instance`] owns the three node sets (POIs, sensors, sinks) and the
//! adjacency relations between them:
//!
//! - POI ↔ sensor coverage (`poi_sensor` / `sensor_poi`, mirrored)
//! - sensor ↔ sensor communication (symmetric)
//! - sensor ↔ sink communication (`sensor_sink` / `sink_sensor`, mirrored)
//!
//! Instances are built once, either by seeded random generation
//! ([`Instance::generate`]) or by parsing the canonical text form
//! ([`Instance::deserialize`]), and are read-only afterwards. Every query in
//! the crate takes the set of inactive (or active) sensors as an argument
//! instead of mutating the instance.
//!
//! # Submodules
//!
//! - `config`: [`InstanceConfig`], the counts/geometry/seed header
//! - `placement`: seeded coordinate generation and distance thresholding
//! - `codec`: the `KCMC;…;END` text format

mod codec;
mod config;
mod placement;

pub use config::InstanceConfig;

use crate::error::{KcmcError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The three node families of a KCMC instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Point of interest.
    Poi,
    /// Installation spot for a sensor.
    Sensor,
    /// Data sink.
    Sink,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Poi => "POI",
            NodeKind::Sensor => "sensor",
            NodeKind::Sink => "sink",
        })
    }
}

/// A node handle: its family plus its index within that family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Node family.
    pub kind: NodeKind,
    /// Index within the family.
    pub index: usize,
}

impl Node {
    /// Creates a node handle.
    pub fn new(kind: NodeKind, index: usize) -> Self {
        Self { kind, index }
    }
}

/// A KCMC problem instance.
///
/// # Examples
///
/// ```
/// use kcmc_heur::instance::Instance;
///
/// let inst: Instance = "KCMC;2 3 1;10 5 5;42;PI;0 0;0 1;1 2;II;0 1;IS;1 0;END"
///     .parse()
///     .unwrap();
/// assert_eq!(inst.num_sensors(), 3);
/// assert_eq!(inst.key(), "2 3 1;10 5 5;42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    pub(crate) config: InstanceConfig,
    pub(crate) poi_sensor: Vec<BTreeSet<usize>>,
    pub(crate) sensor_poi: Vec<BTreeSet<usize>>,
    pub(crate) sensor_sensor: Vec<BTreeSet<usize>>,
    pub(crate) sensor_sink: Vec<BTreeSet<usize>>,
    pub(crate) sink_sensor: Vec<BTreeSet<usize>>,
}

impl Instance {
    /// Creates an instance with the given header and no edges.
    ///
    /// # Errors
    /// Returns [`InvalidInstanceError::EmptyNodeSet`] if any count is zero.
    ///
    /// [`InvalidInstanceError::EmptyNodeSet`]: crate::error::InvalidInstanceError::EmptyNodeSet
    pub(crate) fn with_header(config: InstanceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            poi_sensor: vec![BTreeSet::new(); config.num_pois],
            sensor_poi: vec![BTreeSet::new(); config.num_sensors],
            sensor_sensor: vec![BTreeSet::new(); config.num_sensors],
            sensor_sink: vec![BTreeSet::new(); config.num_sensors],
            sink_sensor: vec![BTreeSet::new(); config.num_sinks],
            config,
        })
    }

    /// Generates a random instance from its header.
    ///
    /// Identical configurations (seed included) always produce identical
    /// instances.
    ///
    /// # Errors
    /// Returns [`InvalidInstanceError::EmptyNodeSet`] if any count is zero.
    ///
    /// [`InvalidInstanceError::EmptyNodeSet`]: crate::error::InvalidInstanceError::EmptyNodeSet
    pub fn generate(config: &InstanceConfig) -> Result<Self> {
        let mut instance = Self::with_header(config.clone())?;
        placement::connect(&mut instance);
        Ok(instance)
    }

    // ---- edge insertion (construction only) ----

    pub(crate) fn add_coverage(&mut self, poi: usize, sensor: usize) {
        self.poi_sensor[poi].insert(sensor);
        self.sensor_poi[sensor].insert(poi);
    }

    pub(crate) fn add_link(&mut self, a: usize, b: usize) {
        self.sensor_sensor[a].insert(b);
        self.sensor_sensor[b].insert(a);
    }

    pub(crate) fn add_uplink(&mut self, sensor: usize, sink: usize) {
        self.sensor_sink[sensor].insert(sink);
        self.sink_sensor[sink].insert(sensor);
    }

    // ---- header accessors ----

    /// The counts/geometry/seed header.
    pub fn config(&self) -> &InstanceConfig {
        &self.config
    }

    /// Number of POIs.
    pub fn num_pois(&self) -> usize {
        self.config.num_pois
    }

    /// Number of sensor installation spots.
    pub fn num_sensors(&self) -> usize {
        self.config.num_sensors
    }

    /// Number of sinks.
    pub fn num_sinks(&self) -> usize {
        self.config.num_sinks
    }

    /// Stable identity of the instance: `<pois> <sensors> <sinks>;<area> <cov> <comm>;<seed>`.
    ///
    /// Independent of the derived edges.
    pub fn key(&self) -> String {
        self.config.key()
    }

    // ---- adjacency accessors ----

    /// Iterates the nodes of one family in index order.
    pub fn nodes(&self, kind: NodeKind) -> impl Iterator<Item = Node> {
        let count = match kind {
            NodeKind::Poi => self.num_pois(),
            NodeKind::Sensor => self.num_sensors(),
            NodeKind::Sink => self.num_sinks(),
        };
        (0..count).map(move |index| Node::new(kind, index))
    }

    /// Sensors covering `poi`, ascending.
    ///
    /// # Panics
    /// Panics if `poi >= self.num_pois()`.
    pub fn covering_sensors(&self, poi: usize) -> &BTreeSet<usize> {
        &self.poi_sensor[poi]
    }

    /// POIs covered by `sensor`, ascending.
    ///
    /// # Panics
    /// Panics if `sensor >= self.num_sensors()`.
    pub fn covered_pois(&self, sensor: usize) -> &BTreeSet<usize> {
        &self.sensor_poi[sensor]
    }

    /// Sensors in communication range of `sensor`, ascending.
    ///
    /// # Panics
    /// Panics if `sensor >= self.num_sensors()`.
    pub fn neighbours(&self, sensor: usize) -> &BTreeSet<usize> {
        &self.sensor_sensor[sensor]
    }

    /// Sinks in communication range of `sensor`, ascending.
    ///
    /// # Panics
    /// Panics if `sensor >= self.num_sensors()`.
    pub fn sinks_of(&self, sensor: usize) -> &BTreeSet<usize> {
        &self.sensor_sink[sensor]
    }

    /// Sensors in communication range of `sink`, ascending.
    ///
    /// # Panics
    /// Panics if `sink >= self.num_sinks()`.
    pub fn sensors_of(&self, sink: usize) -> &BTreeSet<usize> {
        &self.sink_sensor[sink]
    }

    /// Whether `sensor` reaches at least one sink directly.
    ///
    /// # Panics
    /// Panics if `sensor >= self.num_sensors()`.
    pub fn reaches_sink(&self, sensor: usize) -> bool {
        !self.sensor_sink[sensor].is_empty()
    }

    // ---- sensor sets ----

    /// Complement of `set` over the sensor indices.
    ///
    /// Converts an active set into an inactive set and back. Indices outside
    /// `0..num_sensors` are ignored.
    pub fn invert_set(&self, set: &BTreeSet<usize>) -> BTreeSet<usize> {
        (0..self.num_sensors()).filter(|s| !set.contains(s)).collect()
    }

    /// Boolean mask of `set` over the sensor indices.
    pub(crate) fn mask(&self, set: &BTreeSet<usize>) -> Vec<bool> {
        let mut mask = vec![false; self.num_sensors()];
        for &s in set.range(..self.num_sensors()) {
            mask[s] = true;
        }
        mask
    }

    // ---- transformations ----

    /// Folds a multi-sink instance into an equivalent single-sink one.
    ///
    /// For every original sink, `max_m` virtual relay sensors are appended.
    /// Each relay talks to every sensor that reached that sink and to the new
    /// sole sink `0`; the original sensor–sink links are dropped. `max_m`
    /// bounds the connectivity the folded instance can still certify.
    ///
    /// Returns the folded instance and, per original sink, the indices of its
    /// virtual relays. A single-sink instance is returned as-is with an
    /// empty map.
    ///
    /// # Errors
    /// [`KcmcError::InvalidConfig`](crate::error::KcmcError::InvalidConfig)
    /// if `max_m` is zero on a multi-sink instance.
    pub fn to_single_sink(&self, max_m: usize) -> Result<(Self, BTreeMap<usize, Vec<usize>>)> {
        if self.num_sinks() == 1 {
            return Ok((self.clone(), BTreeMap::new()));
        }
        if max_m == 0 {
            return Err(KcmcError::InvalidConfig(
                "max_m must be at least 1 to fold several sinks".into(),
            ));
        }

        let n = self.num_sensors();
        let config = self
            .config
            .clone()
            .with_sensors(n + max_m * self.num_sinks())
            .with_sinks(1);
        let mut folded = Self::with_header(config)?;

        for (poi, sensors) in self.poi_sensor.iter().enumerate() {
            for &s in sensors {
                folded.add_coverage(poi, s);
            }
        }
        for (a, neighbours) in self.sensor_sensor.iter().enumerate() {
            for &b in neighbours.range(a + 1..) {
                folded.add_link(a, b);
            }
        }

        let mut relays = BTreeMap::new();
        for (sink, sensors) in self.sink_sensor.iter().enumerate() {
            let virtuals: Vec<usize> = (n + sink * max_m..n + (sink + 1) * max_m).collect();
            for &v in &virtuals {
                for &s in sensors {
                    folded.add_link(v, s);
                }
                folded.add_uplink(v, 0);
            }
            relays.insert(sink, virtuals);
        }

        Ok((folded, relays))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidInstanceError;

    const SCENARIO: &str = "KCMC;2 3 1;10 5 5;42;PI;0 0;0 1;1 2;II;0 1;IS;1 0;END";

    #[test]
    fn test_accessors_mirror_relations() {
        let inst: Instance = SCENARIO.parse().unwrap();
        assert_eq!(inst.covering_sensors(0), &BTreeSet::from([0, 1]));
        assert_eq!(inst.covered_pois(2), &BTreeSet::from([1]));
        assert_eq!(inst.neighbours(1), &BTreeSet::from([0]));
        assert_eq!(inst.sinks_of(1), &BTreeSet::from([0]));
        assert_eq!(inst.sensors_of(0), &BTreeSet::from([1]));
        assert!(inst.reaches_sink(1));
        assert!(!inst.reaches_sink(0));
    }

    #[test]
    fn test_nodes_iterates_each_family() {
        let inst: Instance = SCENARIO.parse().unwrap();
        let sensors: Vec<Node> = inst.nodes(NodeKind::Sensor).collect();
        assert_eq!(sensors.len(), 3);
        assert_eq!(sensors[2], Node::new(NodeKind::Sensor, 2));
        assert_eq!(inst.nodes(NodeKind::Sink).count(), 1);
    }

    #[test]
    fn test_invert_set_is_complement() {
        let inst: Instance = SCENARIO.parse().unwrap();
        let active = BTreeSet::from([0, 2]);
        let inactive = inst.invert_set(&active);
        assert_eq!(inactive, BTreeSet::from([1]));
        assert_eq!(inst.invert_set(&inactive), active);
        // out-of-range members are ignored
        assert_eq!(inst.invert_set(&BTreeSet::from([7])).len(), 3);
    }

    #[test]
    fn test_empty_family_rejected() {
        let config = InstanceConfig::default().with_sinks(0);
        let err = Instance::generate(&config).unwrap_err();
        assert_eq!(
            err,
            KcmcError::InvalidInstance(InvalidInstanceError::EmptyNodeSet {
                kind: NodeKind::Sink
            })
        );
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_accessor_rejects_unknown_sensor() {
        let inst: Instance = SCENARIO.parse().unwrap();
        let _ = inst.neighbours(inst.num_sensors());
    }

    #[test]
    fn test_single_sink_fold_is_identity() {
        let inst: Instance = SCENARIO.parse().unwrap();
        let (folded, relays) = inst.to_single_sink(4).unwrap();
        assert_eq!(folded, inst);
        assert!(relays.is_empty());
    }

    #[test]
    fn test_multi_sink_fold_adds_relays() {
        // sensor 0 -> sink 0, sensor 1 -> sink 1
        let text = "KCMC;1 2 2;10 5 5;1;PI;0 0;0 1;II;IS;0 0;1 1;END";
        let inst: Instance = text.parse().unwrap();
        let (folded, relays) = inst.to_single_sink(2).unwrap();

        assert_eq!(folded.num_sinks(), 1);
        assert_eq!(folded.num_sensors(), 2 + 2 * 2);
        assert_eq!(relays[&0], vec![2, 3]);
        assert_eq!(relays[&1], vec![4, 5]);

        // relays of sink 0 talk to sensor 0 only, relays of sink 1 to sensor 1
        assert_eq!(folded.neighbours(2), &BTreeSet::from([0]));
        assert_eq!(folded.neighbours(5), &BTreeSet::from([1]));
        assert_eq!(folded.sensors_of(0), &BTreeSet::from([2, 3, 4, 5]));
        assert!(!folded.reaches_sink(0));
        assert_eq!(folded.covering_sensors(0), inst.covering_sensors(0));

        assert!(matches!(
            inst.to_single_sink(0),
            Err(KcmcError::InvalidConfig(_))
        ));
    }
}
