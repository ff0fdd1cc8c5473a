//! Single augmenting-path search from a POI to any sink.

use super::level::LevelGraph;
use crate::error::{KcmcError, Result};
use crate::instance::Instance;
use std::collections::{BTreeSet, VecDeque};

/// Predecessor of a sensor on an augmenting path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    /// The sensor covers the POI the search started from.
    Poi,
    /// The sensor was reached from this sensor.
    Sensor(usize),
}

/// A path found by [`Instance::find_path`].
///
/// Holds the terminal sensor (the one talking to a sink) and the
/// predecessor buffer of the search; [`sensors`](Self::sensors) unwinds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    poi: usize,
    terminal: usize,
    predecessors: Vec<Option<Hop>>,
}

impl AugmentingPath {
    /// The POI the path starts from.
    pub fn poi(&self) -> usize {
        self.poi
    }

    /// The last sensor of the path; it reaches a sink directly.
    pub fn terminal(&self) -> usize {
        self.terminal
    }

    /// Predecessor of `sensor` in the search tree, if it was reached.
    pub fn predecessor(&self, sensor: usize) -> Option<Hop> {
        self.predecessors.get(sensor).copied().flatten()
    }

    /// The sensors of the path, from the POI side to the sink side.
    ///
    /// # Errors
    /// [`KcmcError::BrokenPredecessorChain`] if the chain from the terminal
    /// does not lead back to the POI.
    pub fn sensors(&self) -> Result<Vec<usize>> {
        let broken = |sensor| KcmcError::BrokenPredecessorChain {
            poi: self.poi,
            sensor,
        };

        let mut chain = vec![self.terminal];
        let mut current = self.terminal;
        loop {
            match self.predecessor(current) {
                Some(Hop::Poi) => break,
                Some(Hop::Sensor(prev)) => {
                    // a chain longer than the buffer must contain a cycle
                    if chain.len() >= self.predecessors.len() {
                        return Err(broken(prev));
                    }
                    chain.push(prev);
                    current = prev;
                }
                None => return Err(broken(current)),
            }
        }
        chain.reverse();
        Ok(chain)
    }
}

impl Instance {
    /// Searches one path from `poi` to any sink avoiding `used`.
    ///
    /// The path starts at an active covering sensor of `poi`, crosses
    /// sensor–sensor edges between sensors present in `level`, and ends at
    /// a sensor that talks to a sink. Sensors in `used` are never entered.
    /// The search is breadth-first, so the path returned has the fewest
    /// sensors among those available.
    ///
    /// Returns `None` when no such path exists. Repeated calls that add each
    /// path's sensors to `used` yield node-disjoint paths.
    ///
    /// # Panics
    /// Panics if `poi >= self.num_pois()`. `level` must have been built for
    /// this instance.
    pub fn find_path(
        &self,
        poi: usize,
        used: &BTreeSet<usize>,
        level: &LevelGraph,
    ) -> Option<AugmentingPath> {
        assert!(
            poi < self.num_pois(),
            "POI index {poi} out of range ({} POIs)",
            self.num_pois()
        );
        self.find_path_masked(poi, &self.mask(used), level)
    }

    pub(crate) fn find_path_masked(
        &self,
        poi: usize,
        used: &[bool],
        level: &LevelGraph,
    ) -> Option<AugmentingPath> {
        let open = |s: usize| !used[s] && level.contains(s);

        let mut predecessors: Vec<Option<Hop>> = vec![None; self.num_sensors()];
        let mut queue = VecDeque::new();

        // closest-to-sink covering sensors first
        let mut seeds: Vec<usize> = self
            .covering_sensors(poi)
            .iter()
            .copied()
            .filter(|&s| open(s))
            .collect();
        seeds.sort_by_key(|&s| (level.level(s), s));
        for s in seeds {
            predecessors[s] = Some(Hop::Poi);
            queue.push_back(s);
        }

        while let Some(u) = queue.pop_front() {
            if self.reaches_sink(u) {
                return Some(AugmentingPath {
                    poi,
                    terminal: u,
                    predecessors,
                });
            }
            for &v in self.neighbours(u) {
                if open(v) && predecessors[v].is_none() {
                    predecessors[v] = Some(Hop::Sensor(u));
                    queue.push_back(v);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // POI 0 covered by 0 and 1; 0-2-sink, 1-3-sink, 0-1 linked
    const DIAMOND: &str = "KCMC;1 4 1;10 5 5;0;PI;0 0;0 1;II;0 1;0 2;1 3;IS;2 0;3 0;END";

    #[test]
    fn test_path_reaches_sink() {
        let inst: Instance = DIAMOND.parse().unwrap();
        let lg = inst.level_graph(&BTreeSet::new());
        let path = inst.find_path(0, &BTreeSet::new(), &lg).unwrap();
        assert_eq!(path.poi(), 0);
        assert!(inst.reaches_sink(path.terminal()));
        assert_eq!(path.sensors().unwrap(), vec![0, 2]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_unknown_poi_panics() {
        let inst: Instance = DIAMOND.parse().unwrap();
        let lg = inst.level_graph(&BTreeSet::new());
        let _ = inst.find_path(1, &BTreeSet::new(), &lg);
    }

    #[test]
    fn test_disjoint_paths_by_accumulation() {
        let inst: Instance = DIAMOND.parse().unwrap();
        let lg = inst.level_graph(&BTreeSet::new());
        let mut used = BTreeSet::new();

        let first = inst.find_path(0, &used, &lg).unwrap().sensors().unwrap();
        used.extend(&first);
        let second = inst.find_path(0, &used, &lg).unwrap().sensors().unwrap();
        assert_eq!(second, vec![1, 3]);
        assert!(first.iter().all(|s| !second.contains(s)));

        used.extend(&second);
        assert!(inst.find_path(0, &used, &lg).is_none());
    }

    #[test]
    fn test_all_inactive_fails() {
        let inst: Instance = DIAMOND.parse().unwrap();
        let all = BTreeSet::from([0, 1, 2, 3]);
        let lg = inst.level_graph(&all);
        assert!(inst.find_path(0, &all, &lg).is_none());
    }

    #[test]
    fn test_direct_sensor_path() {
        let inst: Instance = "KCMC;1 1 1;10 5 5;0;PI;0 0;II;IS;0 0;END".parse().unwrap();
        let lg = inst.level_graph(&BTreeSet::new());
        let path = inst.find_path(0, &BTreeSet::new(), &lg).unwrap();
        assert_eq!(path.sensors().unwrap(), vec![0]);
        assert_eq!(path.predecessor(0), Some(Hop::Poi));
    }

    #[test]
    fn test_broken_chain_is_reported() {
        let path = AugmentingPath {
            poi: 4,
            terminal: 2,
            predecessors: vec![None, None, Some(Hop::Sensor(1))],
        };
        assert_eq!(
            path.sensors().unwrap_err(),
            KcmcError::BrokenPredecessorChain { poi: 4, sensor: 1 }
        );
    }

    #[test]
    fn test_cyclic_chain_is_reported() {
        let path = AugmentingPath {
            poi: 0,
            terminal: 0,
            predecessors: vec![Some(Hop::Sensor(1)), Some(Hop::Sensor(0))],
        };
        assert!(matches!(
            path.sensors(),
            Err(KcmcError::BrokenPredecessorChain { .. })
        ));
    }
}
