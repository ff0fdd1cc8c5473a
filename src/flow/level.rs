//! Breadth-first level graph rooted at the sinks.

use crate::instance::Instance;
use std::collections::{BTreeSet, VecDeque};

/// Hop distance from every active sensor to the nearest sink.
///
/// Level 0 holds the active sensors that talk to a sink directly; level
/// `d + 1` holds active sensors adjacent to level `d`. Inactive sensors,
/// and sensors that reach a sink only through inactive ones, have no level
/// and are excluded from every path search that uses this graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelGraph {
    levels: Vec<Option<usize>>,
}

impl LevelGraph {
    /// Level of `sensor`, or `None` if it cannot reach a sink.
    pub fn level(&self, sensor: usize) -> Option<usize> {
        self.levels.get(sensor).copied().flatten()
    }

    /// Whether `sensor` is part of the level graph.
    pub fn contains(&self, sensor: usize) -> bool {
        self.level(sensor).is_some()
    }

    /// Number of sensors with a level.
    pub fn reachable_count(&self) -> usize {
        self.levels.iter().filter(|l| l.is_some()).count()
    }

    /// Deepest level present, if any sensor is reachable.
    pub fn depth(&self) -> Option<usize> {
        self.levels.iter().flatten().max().copied()
    }
}

impl Instance {
    /// Builds the level graph of the sensors not in `inactive`.
    pub fn level_graph(&self, inactive: &BTreeSet<usize>) -> LevelGraph {
        self.level_graph_masked(&self.mask(inactive))
    }

    pub(crate) fn level_graph_masked(&self, inactive: &[bool]) -> LevelGraph {
        let mut levels = vec![None; self.num_sensors()];
        let mut queue = VecDeque::new();

        for sink in 0..self.num_sinks() {
            for &s in self.sensors_of(sink) {
                if !inactive[s] && levels[s].is_none() {
                    levels[s] = Some(0);
                    queue.push_back(s);
                }
            }
        }

        while let Some(u) = queue.pop_front() {
            let next = levels[u].map(|l: usize| l + 1);
            for &v in self.neighbours(u) {
                if !inactive[v] && levels[v].is_none() {
                    levels[v] = next;
                    queue.push_back(v);
                }
            }
        }

        let graph = LevelGraph { levels };
        tracing::trace!(
            reachable = graph.reachable_count(),
            depth = ?graph.depth(),
            "level graph built"
        );
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // chain 0 - 1 - 2 - 3, only sensor 3 talks to the sink
    const CHAIN: &str = "KCMC;1 4 1;10 5 5;0;PI;0 0;II;0 1;1 2;2 3;IS;3 0;END";

    #[test]
    fn test_levels_follow_hop_distance() {
        let inst: Instance = CHAIN.parse().unwrap();
        let lg = inst.level_graph(&BTreeSet::new());
        assert_eq!(lg.level(3), Some(0));
        assert_eq!(lg.level(2), Some(1));
        assert_eq!(lg.level(1), Some(2));
        assert_eq!(lg.level(0), Some(3));
        assert_eq!(lg.depth(), Some(3));
        assert_eq!(lg.reachable_count(), 4);
    }

    #[test]
    fn test_inactive_sensor_cuts_the_chain() {
        let inst: Instance = CHAIN.parse().unwrap();
        let lg = inst.level_graph(&BTreeSet::from([2]));
        assert_eq!(lg.level(3), Some(0));
        assert!(!lg.contains(2));
        assert!(!lg.contains(1));
        assert!(!lg.contains(0));
    }

    #[test]
    fn test_all_inactive_is_empty() {
        let inst: Instance = CHAIN.parse().unwrap();
        let lg = inst.level_graph(&BTreeSet::from([0, 1, 2, 3]));
        assert_eq!(lg.reachable_count(), 0);
        assert_eq!(lg.depth(), None);
        assert_eq!(lg.level(99), None);
    }
}
